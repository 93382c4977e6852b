//! Data node representation.
//!
//! Every node in a data tree is bound to the schema node that declared it
//! via a `SchemaId`. Containers and list entries own their children by
//! value, in document order; leaves carry one typed `Value` whose variant
//! always matches the declared `LeafType` (checked at construction, never
//! again).
//!
//! # Example
//!
//! ```
//! use modelquill::data::{DataNode, DataValue, Value};
//! use modelquill::schema::parse_schema;
//!
//! let schema = parse_schema("container c { leaf greeting { type string; } }").unwrap();
//! let leaf_id = schema.child(schema.root(), "greeting").unwrap();
//!
//! let leaf = DataNode::new(leaf_id, DataValue::Leaf(Value::String("hello".to_string())));
//! assert_eq!(leaf.leaf_value().unwrap().to_string(), "hello");
//! ```

use std::fmt;

use crate::schema::{LeafType, SchemaId};

/// A typed leaf payload.
///
/// The canonical string form (via `Display`) is what predicate matching
/// and record printing use: strings render verbatim, integers in decimal,
/// booleans as `true`/`false`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Uint(u64),
    Bool(bool),
}

impl Value {
    /// Parses a path-predicate literal under a declared leaf type.
    ///
    /// Returns `None` when the literal's form does not fit the type, e.g.
    /// a non-numeric literal for an integer leaf or an out-of-range value.
    pub fn from_literal(leaf_type: LeafType, literal: &str) -> Option<Value> {
        match leaf_type {
            LeafType::String => Some(Value::String(literal.to_string())),
            LeafType::Boolean => match literal {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            _ if leaf_type.is_signed() => {
                let n = literal.parse::<i64>().ok()?;
                let (min, max) = leaf_type.signed_range()?;
                (min..=max).contains(&n).then_some(Value::Int(n))
            }
            _ => {
                let n = literal.parse::<u64>().ok()?;
                (n <= leaf_type.unsigned_max()?).then_some(Value::Uint(n))
            }
        }
    }

    /// Returns the value's type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Int(_) => "integer",
            Value::Uint(_) => "integer",
            Value::Bool(_) => "boolean",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint(n) => Some(*n),
            Value::Int(n) => u64::try_from(*n).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Uint(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// A data value without its schema binding.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// Children of a container instance or a single list entry, in
    /// document order.
    Container(Vec<DataNode>),
    /// A validated leaf value.
    Leaf(Value),
}

/// An instance node bound to exactly one schema node.
///
/// The binding is a non-owning `SchemaId`; a data node is only meaningful
/// together with the `SchemaModel` its tree was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct DataNode {
    pub(crate) schema: SchemaId,
    pub(crate) value: DataValue,
}

impl DataNode {
    pub fn new(schema: SchemaId, value: DataValue) -> Self {
        Self { schema, value }
    }

    /// The id of the schema node this instance conforms to.
    pub fn schema(&self) -> SchemaId {
        self.schema
    }

    pub fn value(&self) -> &DataValue {
        &self.value
    }

    /// Child nodes in document order. Empty for leaves.
    pub fn children(&self) -> &[DataNode] {
        match &self.value {
            DataValue::Container(children) => children,
            DataValue::Leaf(_) => &[],
        }
    }

    /// The typed value, for leaves.
    pub fn leaf_value(&self) -> Option<&Value> {
        match &self.value {
            DataValue::Leaf(value) => Some(value),
            DataValue::Container(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.value, DataValue::Leaf(_))
    }

    pub fn is_container(&self) -> bool {
        matches!(self.value, DataValue::Container(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display_is_canonical() {
        assert_eq!(Value::String("Alice".to_string()).to_string(), "Alice");
        assert_eq!(Value::Uint(7).to_string(), "7");
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_literal_under_string_type() {
        let v = Value::from_literal(LeafType::String, "42").unwrap();
        assert_eq!(v, Value::String("42".to_string()));
    }

    #[test]
    fn test_literal_under_uint16_type() {
        assert_eq!(
            Value::from_literal(LeafType::Uint16, "7"),
            Some(Value::Uint(7))
        );
        assert_eq!(Value::from_literal(LeafType::Uint16, "seven"), None);
        assert_eq!(Value::from_literal(LeafType::Uint16, "70000"), None);
        assert_eq!(Value::from_literal(LeafType::Uint16, "-1"), None);
    }

    #[test]
    fn test_literal_under_int8_type() {
        assert_eq!(
            Value::from_literal(LeafType::Int8, "-128"),
            Some(Value::Int(-128))
        );
        assert_eq!(Value::from_literal(LeafType::Int8, "128"), None);
    }

    #[test]
    fn test_literal_under_boolean_type() {
        assert_eq!(
            Value::from_literal(LeafType::Boolean, "true"),
            Some(Value::Bool(true))
        );
        assert_eq!(Value::from_literal(LeafType::Boolean, "yes"), None);
    }
}
