//! Error types for record extraction.

use std::fmt;

/// Errors that can occur while extracting a flat record from a matched
/// list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The node is not the expected kind of list entry.
    SchemaMismatch { expected: String, found: String },
    /// A field the caller declared required is absent.
    RequiredFieldMissing { field: String },
    /// The requested parent-scope field matched no leaf.
    MissingParentField { field: String },
    /// The requested parent-scope field matched more than one leaf.
    AmbiguousParentField { field: String, count: usize },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::SchemaMismatch { expected, found } => {
                write!(f, "Expected {}, found {}", expected, found)
            }
            RecordError::RequiredFieldMissing { field } => {
                write!(f, "Required field '{}' is missing", field)
            }
            RecordError::MissingParentField { field } => {
                write!(f, "Parent scope has no field '{}'", field)
            }
            RecordError::AmbiguousParentField { field, count } => {
                write!(
                    f,
                    "Parent field '{}' matched {} leaves, expected exactly one",
                    field, count
                )
            }
        }
    }
}

impl std::error::Error for RecordError {}
