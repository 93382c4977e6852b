//! Flat record extraction from matched list entries.
//!
//! After a path query selects list entries, callers typically want a fixed
//! set of leaf fields from each entry as a flat name/value mapping, plus
//! sometimes one field read from the entry's parent scope (e.g. the team
//! name while reading player fields). `extract_record` does exactly that,
//! using the entry's index path for the parent lookup.

pub mod error;

pub use error::RecordError;

use indexmap::IndexMap;

use crate::data::{DataModel, Value};
use crate::schema::SchemaModel;

/// A flat extracted record, in field insertion order.
pub type Record = IndexMap<String, Value>;

/// Which fields to read from a list entry.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    /// Child leaf names to read; absent ones are simply omitted.
    pub names: Vec<String>,
    /// Record keys that must be present in the result.
    pub required: Vec<String>,
    /// One leaf to read from the entry's parent scope. Stored in the
    /// record under `<parent-schema-name>_<leaf>`.
    pub parent: Option<String>,
}

impl FieldSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            required: Vec::new(),
            parent: None,
        }
    }

    /// Marks a record key as required.
    pub fn require(mut self, field: impl Into<String>) -> Self {
        self.required.push(field.into());
        self
    }

    /// Also read one leaf from the entry's parent scope.
    pub fn with_parent(mut self, leaf: impl Into<String>) -> Self {
        self.parent = Some(leaf.into());
        self
    }
}

/// Extracts a flat record from the list entry at `path`.
///
/// The node must be a list entry whose schema name is `expected_name`;
/// anything else is a `SchemaMismatch`. Fields named in `fields.names`
/// that the entry does not carry are omitted from the result unless they
/// are also listed in `fields.required`.
pub fn extract_record(
    schema: &SchemaModel,
    model: &DataModel,
    path: &[usize],
    expected_name: &str,
    fields: &FieldSet,
) -> Result<Record, RecordError> {
    let node = match model.get_node(path) {
        Some(node) => node,
        None => {
            return Err(RecordError::SchemaMismatch {
                expected: format!("list '{}'", expected_name),
                found: "no node at path".to_string(),
            })
        }
    };

    let schema_node = schema.node(node.schema());
    if !schema_node.is_list() || schema_node.name() != expected_name {
        return Err(RecordError::SchemaMismatch {
            expected: format!("list '{}'", expected_name),
            found: format!("{} '{}'", schema_node.kind().kind_name(), schema_node.name()),
        });
    }

    let mut record = Record::new();

    if let Some(leaf) = &fields.parent {
        if path.is_empty() {
            return Err(RecordError::MissingParentField { field: leaf.clone() });
        }
        let parent = match model.get_node(&path[..path.len() - 1]) {
            Some(parent) => parent,
            None => return Err(RecordError::MissingParentField { field: leaf.clone() }),
        };
        let values: Vec<&Value> = parent
            .children()
            .iter()
            .filter(|c| schema.node(c.schema()).name() == leaf.as_str())
            .filter_map(|c| c.leaf_value())
            .collect();
        match values.as_slice() {
            [] => return Err(RecordError::MissingParentField { field: leaf.clone() }),
            [value] => {
                let parent_name = schema.node(parent.schema()).name();
                record.insert(format!("{}_{}", parent_name, leaf), (*value).clone());
            }
            more => {
                return Err(RecordError::AmbiguousParentField {
                    field: leaf.clone(),
                    count: more.len(),
                })
            }
        }
    }

    for child in node.children() {
        let name = schema.node(child.schema()).name();
        if let Some(value) = child.leaf_value() {
            if fields.names.iter().any(|n| n == name) {
                record.insert(name.to_string(), value.clone());
            }
        }
    }

    for field in &fields.required {
        if !record.contains_key(field) {
            return Err(RecordError::RequiredFieldMissing {
                field: field.clone(),
            });
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_instance;
    use crate::path::Evaluator;
    use crate::schema::parse_schema;

    fn fixture() -> (SchemaModel, DataModel) {
        let schema = parse_schema(
            "container sports {
               list person {
                 key name;
                 leaf name { type string; }
               }
               list team {
                 key name;
                 leaf name { type string; }
                 list player {
                   key name;
                   leaf name { type string; }
                   leaf season { type string; }
                   leaf number { type uint16; }
                   leaf scores { type uint16; }
                 }
               }
             }",
        )
        .unwrap();
        let model = parse_instance(
            &schema,
            r#"{
                "person": [{"name": "Bob"}],
                "team": [
                    {"name": "Eagles", "player": [
                        {"name": "Bob", "season": "2019", "number": 7, "scores": 12}
                    ]},
                    {"name": "Hawks", "player": []}
                ]
            }"#,
        )
        .unwrap();
        (schema, model)
    }

    fn bob_path(schema: &SchemaModel, model: &DataModel) -> Vec<usize> {
        let evaluator = Evaluator::new(schema, model);
        let mut paths = evaluator.evaluate_paths("team/player[name='Bob']").unwrap();
        assert_eq!(paths.len(), 1);
        paths.remove(0)
    }

    #[test]
    fn test_extract_player_record() {
        let (schema, model) = fixture();
        let path = bob_path(&schema, &model);

        let fields = FieldSet::new(["name", "season", "number", "scores"]).with_parent("name");
        let record = extract_record(&schema, &model, &path, "player", &fields).unwrap();

        assert_eq!(
            record.get("team_name"),
            Some(&Value::String("Eagles".to_string()))
        );
        assert_eq!(record.get("name"), Some(&Value::String("Bob".to_string())));
        assert_eq!(
            record.get("season"),
            Some(&Value::String("2019".to_string()))
        );
        assert_eq!(record.get("number"), Some(&Value::Uint(7)));
        assert_eq!(record.get("scores"), Some(&Value::Uint(12)));
    }

    #[test]
    fn test_missing_optional_field_is_omitted() {
        let (schema, model) = fixture();
        let path = bob_path(&schema, &model);

        let fields = FieldSet::new(["season", "draft-round"]);
        let record = extract_record(&schema, &model, &path, "player", &fields).unwrap();
        assert!(record.contains_key("season"));
        assert!(!record.contains_key("draft-round"));
    }

    #[test]
    fn test_missing_required_field_fails() {
        let (schema, model) = fixture();
        let path = bob_path(&schema, &model);

        let fields = FieldSet::new(["season", "draft-round"]).require("draft-round");
        let err = extract_record(&schema, &model, &path, "player", &fields).unwrap_err();
        assert_eq!(
            err,
            RecordError::RequiredFieldMissing {
                field: "draft-round".to_string(),
            }
        );
    }

    #[test]
    fn test_wrong_schema_name_fails() {
        let (schema, model) = fixture();
        let path = bob_path(&schema, &model);

        let fields = FieldSet::new(["name"]);
        let err = extract_record(&schema, &model, &path, "person", &fields).unwrap_err();
        assert!(matches!(err, RecordError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_non_list_node_fails() {
        let (schema, model) = fixture();
        let mut path = bob_path(&schema, &model);
        path.push(0); // descend to the name leaf

        let fields = FieldSet::new(["name"]);
        let err = extract_record(&schema, &model, &path, "player", &fields).unwrap_err();
        assert_eq!(
            err,
            RecordError::SchemaMismatch {
                expected: "list 'player'".to_string(),
                found: "leaf 'name'".to_string(),
            }
        );
    }

    #[test]
    fn test_parent_field_absent_fails() {
        let (schema, model) = fixture();
        // person entries sit under the root container, which has no
        // 'name' leaf of its own.
        let fields = FieldSet::new(["name"]).with_parent("name");
        let err = extract_record(&schema, &model, &[0], "person", &fields).unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingParentField {
                field: "name".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_path_fails() {
        let (schema, model) = fixture();
        let fields = FieldSet::new(["name"]);
        let err = extract_record(&schema, &model, &[9, 9], "player", &fields).unwrap_err();
        assert!(matches!(err, RecordError::SchemaMismatch { .. }));
    }
}
