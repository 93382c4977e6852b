//! Error types for path parsing and evaluation.

use std::fmt;

/// Errors that can occur during path parsing or evaluation.
///
/// An empty result set is never an error; these variants cover malformed
/// path text and predicates that cannot be checked against the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
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
    /// A predicate names a key the targeted list does not declare.
    UnknownKey { list: String, key: String },
    /// A predicate is attached to a segment that is not a list.
    NotAList { segment: String },
    /// A predicate literal does not fit the key leaf's declared type.
    BadLiteral {
        key: String,
        expected: String,
        literal: String,
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::UnexpectedToken {
                position,
                found,
                expected,
            } => write!(
                f,
                "Unexpected token '{}' at position {}, expected {}",
                found, position, expected
            ),
            PathError::UnexpectedEnd { expected } => {
                write!(f, "Unexpected end of input, expected {}", expected)
            }
            PathError::InvalidSyntax { message } => {
                write!(f, "Invalid path syntax: {}", message)
            }
            PathError::UnknownKey { list, key } => {
                write!(f, "List '{}' declares no key '{}'", list, key)
            }
            PathError::NotAList { segment } => {
                write!(f, "Predicate on '{}', which is not a list", segment)
            }
            PathError::BadLiteral {
                key,
                expected,
                literal,
            } => write!(
                f,
                "Literal '{}' does not fit key '{}' of type {}",
                literal, key, expected
            ),
        }
    }
}

impl std::error::Error for PathError {}
