//! A graph node that loads a seeded random image from a folder under the
//! host's input directory and hands it on as a normalized RGB image batch.

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod nodes;

pub use config::{InputRootResolver, LoaderConfig};
pub use error::{LoaderError, Result};
pub use models::*;
pub use nodes::{registry, Node, NodeRegistry, RandomImageSelector};
