use super::tensor::ImageBatch;
use serde::{Deserialize, Serialize};

/// A value produced on one of a node's output sockets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeValue {
    Image(ImageBatch),
    String(String),
}

impl NodeValue {
    pub fn as_image(&self) -> Option<&ImageBatch> {
        match self {
            NodeValue::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            NodeValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Outcome of one random image load: either the decoded image and its file
/// name, or the placeholder image and the reason the load failed.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    Success { image: ImageBatch, filename: String },
    Failure { placeholder: ImageBatch, error: String },
}

impl SelectionOutcome {
    pub fn failure(error: impl Into<String>) -> Self {
        SelectionOutcome::Failure {
            placeholder: ImageBatch::placeholder(),
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SelectionOutcome::Success { .. })
    }

    pub fn image(&self) -> &ImageBatch {
        match self {
            SelectionOutcome::Success { image, .. } => image,
            SelectionOutcome::Failure { placeholder, .. } => placeholder,
        }
    }

    /// File name on success, error message on failure.
    pub fn message(&self) -> &str {
        match self {
            SelectionOutcome::Success { filename, .. } => filename,
            SelectionOutcome::Failure { error, .. } => error,
        }
    }

    /// The `(image, filename)` pair the host wires downstream.
    pub fn into_outputs(self) -> (ImageBatch, String) {
        match self {
            SelectionOutcome::Success { image, filename } => (image, filename),
            SelectionOutcome::Failure { placeholder, error } => (placeholder, error),
        }
    }
}
