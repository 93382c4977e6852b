//! Schema model and textual schema parser.
//!
//! A schema describes the legal shape of a data tree: nested containers,
//! keyed lists, and typed leaves. Schemas are parsed once from a small
//! declarative grammar and are immutable afterwards.

pub mod error;
pub mod node;
pub mod parser;

pub use error::SchemaError;
pub use node::{LeafType, SchemaId, SchemaKind, SchemaModel, SchemaNode};
pub use parser::parse_schema;
