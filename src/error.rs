use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Error: Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Error: No valid file extensions provided. Please provide a comma-separated list like '.png,.jpg'.")]
    NoValidExtensions,

    #[error("Error listing files in '{}': {source}", .dir.display())]
    ListingError {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No images found in '{}' with extensions: {}", .dir.display(), .extensions.join(", "))]
    NoMatchingFiles {
        dir: PathBuf,
        extensions: Vec<String>,
    },

    #[error("Error loading image '{}': {source}", .path.display())]
    ImageDecodeError {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid node input: {0}")]
    InvalidInput(String),

    #[error("Unknown node: {0}")]
    UnknownNode(String),
}

impl From<serde_json::Error> for LoaderError {
    fn from(err: serde_json::Error) -> Self {
        LoaderError::InvalidInput(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LoaderError>;
