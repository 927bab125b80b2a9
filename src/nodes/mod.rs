pub mod decode;
pub mod random_image;

use crate::{
    config::LoaderConfig,
    error::{LoaderError, Result},
    models::{NodeSchema, NodeValue},
};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::sync::Arc;

pub use random_image::{RandomImageSelector, NODE_CLASS_NAME, NODE_DISPLAY_NAME};

/// A unit of computation the host can place in its graph.
pub trait Node: Send + Sync {
    fn schema(&self) -> NodeSchema;

    /// Run the node on host-coerced inputs. Only malformed inputs are an
    /// `Err`; nodes report their own failures through their outputs.
    fn execute(&self, inputs: &serde_json::Value) -> Result<Vec<NodeValue>>;
}

static NODE_REGISTRY: Lazy<NodeRegistry> =
    Lazy::new(|| NodeRegistry::with_builtin_nodes(&LoaderConfig::from_env()));

/// The process-wide registry, populated on first access.
pub fn registry() -> &'static NodeRegistry {
    &NODE_REGISTRY
}

#[derive(Default, Clone)]
pub struct NodeRegistry {
    class_mappings: BTreeMap<String, Arc<dyn Node>>,
    display_name_mappings: BTreeMap<String, String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtin_nodes(config: &LoaderConfig) -> Self {
        let mut registry = Self::new();
        registry.register(
            NODE_CLASS_NAME,
            NODE_DISPLAY_NAME,
            Arc::new(RandomImageSelector::from_config(config)),
        );
        registry
    }

    pub fn register(
        &mut self,
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        node: Arc<dyn Node>,
    ) {
        let identifier = identifier.into();
        log::debug!("Registering node {}", identifier);
        self.display_name_mappings
            .insert(identifier.clone(), display_name.into());
        self.class_mappings.insert(identifier, node);
    }

    pub fn get(&self, identifier: &str) -> Option<&Arc<dyn Node>> {
        self.class_mappings.get(identifier)
    }

    pub fn display_name(&self, identifier: &str) -> Option<&str> {
        self.display_name_mappings
            .get(identifier)
            .map(String::as_str)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.class_mappings.keys().map(String::as_str)
    }

    pub fn execute(
        &self,
        identifier: &str,
        inputs: &serde_json::Value,
    ) -> Result<Vec<NodeValue>> {
        let node = self
            .get(identifier)
            .ok_or_else(|| LoaderError::UnknownNode(identifier.to_string()))?;
        node.execute(inputs)
    }
}
