//! Error types for schema parsing.

use std::fmt;

/// Errors that can occur while parsing a schema definition.
///
/// Syntax variants describe malformed input text; the remaining variants
/// describe well-formed text that violates a schema rule (duplicate sibling
/// names, bad list keys, and so on).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Unexpected token at a specific position.
    UnexpectedToken {
        position: usize,
        found: String,
        expected: String,
    },
    /// Unexpected end of input.
    UnexpectedEnd { expected: String },
    /// Invalid syntax with description.
    InvalidSyntax { message: String },
    /// A name collides with a sibling declaration.
    DuplicateName { parent: String, name: String },
    /// A list declares no key statement.
    MissingKey { list: String },
    /// A list key names no child of the list.
    UnknownKeyLeaf { list: String, key: String },
    /// A list key names a child that is not a leaf.
    KeyNotLeaf { list: String, key: String },
    /// A leaf declares a type name this engine does not know.
    UnknownType { name: String },
    /// The top-level declaration is not a container.
    RootNotContainer { found: String },
}

impl SchemaError {
    /// Returns true for violations of schema rules in otherwise
    /// well-formed text, false for plain syntax errors.
    pub fn is_semantic(&self) -> bool {
        !matches!(
            self,
            SchemaError::UnexpectedToken { .. }
                | SchemaError::UnexpectedEnd { .. }
                | SchemaError::InvalidSyntax { .. }
        )
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::UnexpectedToken {
                position,
                found,
                expected,
            } => write!(
                f,
                "Unexpected token '{}' at position {}, expected {}",
                found, position, expected
            ),
            SchemaError::UnexpectedEnd { expected } => {
                write!(f, "Unexpected end of input, expected {}", expected)
            }
            SchemaError::InvalidSyntax { message } => {
                write!(f, "Invalid schema syntax: {}", message)
            }
            SchemaError::DuplicateName { parent, name } => {
                write!(f, "Duplicate name '{}' under '{}'", name, parent)
            }
            SchemaError::MissingKey { list } => {
                write!(f, "List '{}' declares no key", list)
            }
            SchemaError::UnknownKeyLeaf { list, key } => {
                write!(f, "List '{}' key '{}' matches no child leaf", list, key)
            }
            SchemaError::KeyNotLeaf { list, key } => {
                write!(f, "List '{}' key '{}' is not a leaf", list, key)
            }
            SchemaError::UnknownType { name } => {
                write!(f, "Unknown leaf type '{}'", name)
            }
            SchemaError::RootNotContainer { found } => {
                write!(f, "Top-level declaration must be a container, found {}", found)
            }
        }
    }
}

impl std::error::Error for SchemaError {}
