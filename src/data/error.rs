//! Error types for instance parsing.

use std::fmt;

/// Errors that can occur while parsing a JSON instance document against a
/// schema.
///
/// Each variant carries the slash/index path of the offending node, e.g.
/// `team[1]/player[0]/number`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    /// The document is not well-formed JSON.
    Json { message: String },
    /// A JSON field names no declared schema child (strict policy only).
    UnknownField { path: String, field: String },
    /// A value cannot convert to the declared type of its schema node.
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },
    /// A list entry lacks a declared key leaf.
    MissingKey { path: String, key: String },
}

impl fmt::Display for InstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceError::Json { message } => write!(f, "Invalid JSON document: {}", message),
            InstanceError::UnknownField { path, field } => {
                write!(f, "Unknown field '{}' at {}", field, path)
            }
            InstanceError::TypeMismatch {
                path,
                expected,
                found,
            } => write!(f, "Type mismatch at {}: expected {}, found {}", path, expected, found),
            InstanceError::MissingKey { path, key } => {
                write!(f, "List entry {} lacks key leaf '{}'", path, key)
            }
        }
    }
}

impl std::error::Error for InstanceError {}
