//! Typed data tree and schema-driven JSON instance parsing.
//!
//! A `DataModel` is built from a JSON document in lock-step with a
//! `SchemaModel`: every node in the data tree is bound to the schema node
//! that declared it, and every leaf value has been validated against its
//! declared primitive type at construction time.

pub mod error;
pub mod node;
pub mod parser;
pub mod tree;

pub use error::InstanceError;
pub use node::{DataNode, DataValue, Value};
pub use parser::{parse_instance, parse_instance_with_options, ParseOptions, UnknownFieldPolicy};
pub use tree::DataModel;
