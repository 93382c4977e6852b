//! ModelQuill - a schema-aware tree query engine.
//!
//! ModelQuill parses a YANG-like textual schema into an immutable
//! `SchemaModel`, validates JSON instance documents against it into typed
//! `DataModel` trees, and evaluates slash-separated path expressions with
//! `[key='literal']` predicates over those trees. A small record-extraction
//! helper flattens matched list entries into name/value mappings.
//!
//! The pipeline is a pure, single-pass transformation: load schema, parse
//! instance, evaluate paths, extract records.

pub mod config;
pub mod data;
pub mod file;
pub mod path;
pub mod record;
pub mod schema;
