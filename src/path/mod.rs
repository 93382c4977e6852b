//! Path expression parser and evaluator for schema-aware data search.
//!
//! Paths select nodes in a data tree by schema name, with optional
//! key-predicate filters on list entries.
//!
//! # Supported Syntax
//!
//! - `name` - child selection by schema name
//! - `a/b/c` - nested selection
//! - `name[key='literal']` - keep only list entries whose key leaf equals
//!   the literal (typed comparison under the key's declared type)
//!
//! # Examples
//!
//! ```
//! // person/name - every name leaf under every person entry
//! // team/player[name='Bob'] - Bob's entries across all teams
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{PathExpr, Predicate, Segment};
pub use error::PathError;
pub use evaluator::Evaluator;
pub use parser::Parser;
