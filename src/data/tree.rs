//! Tree-level ownership and navigation for instance documents.
//!
//! A `DataModel` owns the full data tree for one parsed document. Nodes are
//! addressed by child-index paths (`&[usize]`), which double as the weak
//! parent back-reference: the parent of the node at `path` is the node at
//! `&path[..path.len() - 1]`. No node holds a pointer up the tree, so the
//! whole model is freed as a unit with no ownership cycles.
//!
//! # Example
//!
//! ```
//! use modelquill::data::parse_instance;
//! use modelquill::schema::parse_schema;
//!
//! let schema = parse_schema(
//!     "container c {
//!        list item { key id; leaf id { type uint32; } }
//!      }",
//! )
//! .unwrap();
//! let model = parse_instance(&schema, r#"{"item": [{"id": 1}, {"id": 2}]}"#).unwrap();
//!
//! // Second item entry, its id leaf.
//! let leaf = model.get_node(&[1, 0]).unwrap();
//! assert_eq!(leaf.leaf_value().unwrap().to_string(), "2");
//! ```

use super::node::DataNode;

/// A parsed instance document.
///
/// Read-only after construction; it must not outlive the `SchemaModel` it
/// was built from, since every node binds to that schema by id.
#[derive(Debug, Clone, PartialEq)]
pub struct DataModel {
    root: DataNode,
    /// The original JSON text, when parsed from source.
    source: Option<String>,
    /// Diagnostics accumulated during lenient parsing (skipped fields).
    warnings: Vec<String>,
}

impl DataModel {
    /// Creates a model from an already-built root node.
    pub fn new(root: DataNode) -> Self {
        Self {
            root,
            source: None,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn with_source(root: DataNode, source: String, warnings: Vec<String>) -> Self {
        Self {
            root,
            source: Some(source),
            warnings,
        }
    }

    /// The document root node, bound to the schema's root container.
    pub fn root(&self) -> &DataNode {
        &self.root
    }

    /// Returns the original JSON source, if available.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Warnings recorded while parsing (e.g. skipped unknown fields).
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Gets the node at the given child-index path.
    ///
    /// Returns `None` if the path is out of bounds at any level or
    /// descends through a leaf.
    pub fn get_node(&self, path: &[usize]) -> Option<&DataNode> {
        let mut current = &self.root;
        for &index in path {
            current = current.children().get(index)?;
        }
        Some(current)
    }
}
