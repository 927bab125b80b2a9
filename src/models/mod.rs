pub mod common;
pub mod request;
pub mod schema;
pub mod tensor;

pub use common::*;
pub use request::*;
pub use schema::*;
pub use tensor::*;
