//! File I/O for schemas and instance documents.
//!
//! This module provides functionality to load schema definitions and JSON
//! instance documents from disk or stdin, and to save instance trees back
//! to JSON files with atomic write operations.

pub mod loader;
pub mod saver;
