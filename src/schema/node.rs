//! Schema tree representation.
//!
//! A parsed schema is an arena of `SchemaNode`s owned by a `SchemaModel`.
//! Nodes refer to their children by `SchemaId`, so data nodes and path
//! evaluation can bind to schema nodes with plain copyable ids instead of
//! references into the tree.
//!
//! # Example
//!
//! ```
//! use modelquill::schema::parse_schema;
//!
//! let schema = parse_schema(
//!     "container library {
//!        list book { key title; leaf title { type string; } }
//!      }",
//! )
//! .unwrap();
//!
//! let root = schema.node(schema.root());
//! assert_eq!(root.name(), "library");
//! assert!(schema.child(schema.root(), "book").is_some());
//! ```

use indexmap::IndexMap;

/// Index of a schema node inside its owning `SchemaModel`.
///
/// Ids are only meaningful together with the model that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaId(pub(crate) usize);

/// Primitive types a leaf may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafType {
    String,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
}

impl LeafType {
    /// Resolves a type name from the schema text.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(LeafType::String),
            "boolean" => Some(LeafType::Boolean),
            "int8" => Some(LeafType::Int8),
            "int16" => Some(LeafType::Int16),
            "int32" => Some(LeafType::Int32),
            "int64" => Some(LeafType::Int64),
            "uint8" => Some(LeafType::Uint8),
            "uint16" => Some(LeafType::Uint16),
            "uint32" => Some(LeafType::Uint32),
            "uint64" => Some(LeafType::Uint64),
            _ => None,
        }
    }

    /// Returns the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            LeafType::String => "string",
            LeafType::Boolean => "boolean",
            LeafType::Int8 => "int8",
            LeafType::Int16 => "int16",
            LeafType::Int32 => "int32",
            LeafType::Int64 => "int64",
            LeafType::Uint8 => "uint8",
            LeafType::Uint16 => "uint16",
            LeafType::Uint32 => "uint32",
            LeafType::Uint64 => "uint64",
        }
    }

    /// Returns true for the signed integer types.
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            LeafType::Int8 | LeafType::Int16 | LeafType::Int32 | LeafType::Int64
        )
    }

    /// Returns true for the unsigned integer types.
    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            LeafType::Uint8 | LeafType::Uint16 | LeafType::Uint32 | LeafType::Uint64
        )
    }

    /// Inclusive bounds for the signed integer types.
    pub fn signed_range(&self) -> Option<(i64, i64)> {
        match self {
            LeafType::Int8 => Some((i8::MIN as i64, i8::MAX as i64)),
            LeafType::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            LeafType::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            LeafType::Int64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Inclusive upper bound for the unsigned integer types.
    pub fn unsigned_max(&self) -> Option<u64> {
        match self {
            LeafType::Uint8 => Some(u8::MAX as u64),
            LeafType::Uint16 => Some(u16::MAX as u64),
            LeafType::Uint32 => Some(u32::MAX as u64),
            LeafType::Uint64 => Some(u64::MAX),
            _ => None,
        }
    }
}

/// The closed set of schema node kinds.
///
/// Traversal code switches exhaustively over this tag; there is no runtime
/// type inspection anywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaKind {
    /// A named grouping of children, instantiated at most once per scope.
    Container,
    /// A repeatable entry type; `keys` name child leaves that identify
    /// entries.
    List { keys: Vec<String> },
    /// A single typed value.
    Leaf { leaf_type: LeafType },
}

impl SchemaKind {
    /// Returns the kind name for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaKind::Container => "container",
            SchemaKind::List { .. } => "list",
            SchemaKind::Leaf { .. } => "leaf",
        }
    }
}

/// A single node-type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub(crate) name: String,
    pub(crate) kind: SchemaKind,
    pub(crate) children: IndexMap<String, SchemaId>,
}

impl SchemaNode {
    /// The declared name, unique among siblings.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// Child declarations in document order. Empty for leaves.
    pub fn children(&self) -> &IndexMap<String, SchemaId> {
        &self.children
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, SchemaKind::Container)
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind, SchemaKind::List { .. })
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, SchemaKind::Leaf { .. })
    }

    /// Declared key leaf names. Empty for non-lists.
    pub fn keys(&self) -> &[String] {
        match &self.kind {
            SchemaKind::List { keys } => keys,
            _ => &[],
        }
    }

    /// The declared primitive type, for leaves.
    pub fn leaf_type(&self) -> Option<LeafType> {
        match self.kind {
            SchemaKind::Leaf { leaf_type } => Some(leaf_type),
            _ => None,
        }
    }
}

/// An immutable schema tree.
///
/// Built once by `parse_schema` and read-only thereafter; safe to share
/// across any number of concurrent evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaModel {
    nodes: Vec<SchemaNode>,
    root: SchemaId,
}

impl SchemaModel {
    pub(crate) fn from_parts(nodes: Vec<SchemaNode>, root: SchemaId) -> Self {
        Self { nodes, root }
    }

    /// The document root node id. Always a container.
    pub fn root(&self) -> SchemaId {
        self.root
    }

    /// Resolves a node id produced by this model.
    pub fn node(&self, id: SchemaId) -> &SchemaNode {
        &self.nodes[id.0]
    }

    /// Looks up a declared child by name within a scope.
    pub fn child(&self, scope: SchemaId, name: &str) -> Option<SchemaId> {
        self.node(scope).children.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_type_names_round_trip() {
        for name in [
            "string", "boolean", "int8", "int16", "int32", "int64", "uint8", "uint16", "uint32",
            "uint64",
        ] {
            let ty = LeafType::from_name(name).unwrap();
            assert_eq!(ty.type_name(), name);
        }
        assert!(LeafType::from_name("decimal64").is_none());
    }

    #[test]
    fn test_uint16_bounds() {
        let ty = LeafType::Uint16;
        assert!(ty.is_unsigned());
        assert!(!ty.is_signed());
        assert_eq!(ty.unsigned_max(), Some(65535));
        assert_eq!(ty.signed_range(), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(SchemaKind::Container.kind_name(), "container");
        assert_eq!(SchemaKind::List { keys: vec![] }.kind_name(), "list");
        assert_eq!(
            SchemaKind::Leaf {
                leaf_type: LeafType::String
            }
            .kind_name(),
            "leaf"
        );
    }
}
