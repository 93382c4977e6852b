//! Schema-driven JSON instance parsing.
//!
//! The parser walks a JSON document top-down in lock-step with the schema:
//! object keys must name declared children of the current scope, arrays
//! under a list schema node become one entry per element, and every scalar
//! is converted under its leaf's declared type. The result is a `DataModel`
//! whose shape and value types are guaranteed to conform to the schema.
//!
//! Parsing is a pure function of (schema, input, options); the only output
//! beyond the returned tree is a list of warnings recorded on the model
//! when unknown fields are skipped.
//!
//! # Example
//!
//! ```
//! use modelquill::data::parse_instance;
//! use modelquill::schema::parse_schema;
//!
//! let schema = parse_schema(
//!     "container c { leaf count { type uint16; } }",
//! )
//! .unwrap();
//!
//! let model = parse_instance(&schema, r#"{"count": 7}"#).unwrap();
//! assert_eq!(model.root().children().len(), 1);
//!
//! // Values that do not fit the declared type fail the whole document.
//! assert!(parse_instance(&schema, r#"{"count": "seven"}"#).is_err());
//! ```

use serde_json::Value as SerdeValue;

use super::error::InstanceError;
use super::node::{DataNode, DataValue, Value};
use super::tree::DataModel;
use crate::schema::{LeafType, SchemaId, SchemaKind, SchemaModel};

/// What to do with JSON fields that name no declared schema child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFieldPolicy {
    /// Skip the field and record a warning on the model (lenient default).
    #[default]
    Skip,
    /// Fail parsing with `InstanceError::UnknownField`.
    Error,
}

impl UnknownFieldPolicy {
    /// Resolves a policy name from config or CLI ("skip" / "error").
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "skip" => Some(UnknownFieldPolicy::Skip),
            "error" => Some(UnknownFieldPolicy::Error),
            _ => None,
        }
    }
}

/// Options controlling instance parsing.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub unknown_fields: UnknownFieldPolicy,
}

/// Parses a JSON instance document with default options.
pub fn parse_instance(schema: &SchemaModel, text: &str) -> Result<DataModel, InstanceError> {
    parse_instance_with_options(schema, text, &ParseOptions::default())
}

/// Parses a JSON instance document against a schema.
///
/// The document root must be a JSON object; its keys are matched against
/// the declared children of the schema's root container.
pub fn parse_instance_with_options(
    schema: &SchemaModel,
    text: &str,
    options: &ParseOptions,
) -> Result<DataModel, InstanceError> {
    let doc: SerdeValue = serde_json::from_str(text).map_err(|e| InstanceError::Json {
        message: e.to_string(),
    })?;
    let object = doc.as_object().ok_or_else(|| InstanceError::TypeMismatch {
        path: "/".to_string(),
        expected: "object".to_string(),
        found: json_found(&doc),
    })?;

    let mut builder = Builder {
        schema,
        options,
        warnings: Vec::new(),
    };
    let children = builder.build_children(schema.root(), object, "")?;
    let root = DataNode::new(schema.root(), DataValue::Container(children));

    Ok(DataModel::with_source(
        root,
        text.to_string(),
        builder.warnings,
    ))
}

struct Builder<'a> {
    schema: &'a SchemaModel,
    options: &'a ParseOptions,
    warnings: Vec<String>,
}

impl<'a> Builder<'a> {
    /// Builds the data children of one scope from a JSON object.
    fn build_children(
        &mut self,
        scope: SchemaId,
        object: &serde_json::Map<String, SerdeValue>,
        path: &str,
    ) -> Result<Vec<DataNode>, InstanceError> {
        let mut nodes = Vec::new();

        for (field, value) in object {
            let child_id = match self.schema.child(scope, field) {
                Some(id) => id,
                None => match self.options.unknown_fields {
                    UnknownFieldPolicy::Skip => {
                        self.warnings.push(format!(
                            "unknown field '{}' at {} (skipped)",
                            field,
                            display_path(path)
                        ));
                        continue;
                    }
                    UnknownFieldPolicy::Error => {
                        return Err(InstanceError::UnknownField {
                            path: display_path(path),
                            field: field.clone(),
                        })
                    }
                },
            };

            let child_path = join_path(path, field);
            match self.schema.node(child_id).kind() {
                SchemaKind::Container => {
                    let inner = value.as_object().ok_or_else(|| InstanceError::TypeMismatch {
                        path: child_path.clone(),
                        expected: "object".to_string(),
                        found: json_found(value),
                    })?;
                    let children = self.build_children(child_id, inner, &child_path)?;
                    nodes.push(DataNode::new(child_id, DataValue::Container(children)));
                }
                SchemaKind::Leaf { leaf_type } => {
                    let converted = convert_scalar(*leaf_type, value, &child_path)?;
                    nodes.push(DataNode::new(child_id, DataValue::Leaf(converted)));
                }
                SchemaKind::List { keys } => {
                    let entries = value.as_array().ok_or_else(|| InstanceError::TypeMismatch {
                        path: child_path.clone(),
                        expected: "array of list entries".to_string(),
                        found: json_found(value),
                    })?;
                    for (index, entry) in entries.iter().enumerate() {
                        let entry_path = format!("{}[{}]", child_path, index);
                        let inner =
                            entry.as_object().ok_or_else(|| InstanceError::TypeMismatch {
                                path: entry_path.clone(),
                                expected: "object".to_string(),
                                found: json_found(entry),
                            })?;
                        let children = self.build_children(child_id, inner, &entry_path)?;
                        for key in keys {
                            let present = children.iter().any(|n| {
                                n.is_leaf() && self.schema.node(n.schema()).name() == key
                            });
                            if !present {
                                return Err(InstanceError::MissingKey {
                                    path: entry_path.clone(),
                                    key: key.clone(),
                                });
                            }
                        }
                        nodes.push(DataNode::new(child_id, DataValue::Container(children)));
                    }
                }
            }
        }

        Ok(nodes)
    }
}

/// Converts one JSON scalar under a declared leaf type.
///
/// Integer leaves accept JSON integers in range and strings holding such
/// integers; floats and non-numeric strings never convert.
fn convert_scalar(
    leaf_type: LeafType,
    value: &SerdeValue,
    path: &str,
) -> Result<Value, InstanceError> {
    match leaf_type {
        LeafType::String => match value {
            SerdeValue::String(s) => Ok(Value::String(s.clone())),
            _ => Err(mismatch(path, leaf_type, value)),
        },
        LeafType::Boolean => match value {
            SerdeValue::Bool(b) => Ok(Value::Bool(*b)),
            SerdeValue::String(s) => {
                Value::from_literal(leaf_type, s).ok_or_else(|| mismatch(path, leaf_type, value))
            }
            _ => Err(mismatch(path, leaf_type, value)),
        },
        integer => {
            let literal = match value {
                SerdeValue::Number(n) => n.to_string(),
                SerdeValue::String(s) => s.clone(),
                _ => return Err(mismatch(path, leaf_type, value)),
            };
            Value::from_literal(integer, &literal)
                .ok_or_else(|| mismatch(path, leaf_type, value))
        }
    }
}

fn mismatch(path: &str, leaf_type: LeafType, value: &SerdeValue) -> InstanceError {
    InstanceError::TypeMismatch {
        path: path.to_string(),
        expected: leaf_type.type_name().to_string(),
        found: json_found(value),
    }
}

/// Renders a JSON value for error messages: scalars by value, containers
/// by type.
fn json_found(value: &SerdeValue) -> String {
    match value {
        SerdeValue::Null => "null".to_string(),
        SerdeValue::Bool(b) => b.to_string(),
        SerdeValue::Number(n) => n.to_string(),
        SerdeValue::String(s) => format!("\"{}\"", s),
        SerdeValue::Array(_) => "array".to_string(),
        SerdeValue::Object(_) => "object".to_string(),
    }
}

fn join_path(base: &str, segment: &str) -> String {
    if base.is_empty() {
        segment.to_string()
    } else {
        format!("{}/{}", base, segment)
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}
