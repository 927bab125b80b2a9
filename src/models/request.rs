use crate::config::DEFAULT_EXTENSIONS;
use serde::{Deserialize, Serialize};

/// Inputs of the random image node, as coerced by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionRequest {
    pub seed: u64,
    pub subfolder: String,
    pub extensions: String,
}

impl Default for SelectionRequest {
    fn default() -> Self {
        Self {
            seed: 0,
            subfolder: String::new(),
            extensions: DEFAULT_EXTENSIONS.to_string(),
        }
    }
}

impl SelectionRequest {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    pub fn with_subfolder(mut self, subfolder: impl Into<String>) -> Self {
        self.subfolder = subfolder.into();
        self
    }

    pub fn with_extensions(mut self, extensions: impl Into<String>) -> Self {
        self.extensions = extensions.into();
        self
    }
}
