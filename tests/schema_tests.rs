//! Integration tests for schema parsing.

use modelquill::schema::{parse_schema, LeafType, SchemaError};

/// The full roster model used across the integration suites.
const SPORTS: &str = "container sports {
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
}";

#[test]
fn test_sports_model_shape() {
    let schema = parse_schema(SPORTS).unwrap();

    let root = schema.node(schema.root());
    assert_eq!(root.name(), "sports");
    assert!(root.is_container());
    assert_eq!(root.children().len(), 2);

    let team = schema.child(schema.root(), "team").unwrap();
    let team_node = schema.node(team);
    assert!(team_node.is_list());
    assert_eq!(team_node.keys(), ["name"]);

    let player = schema.child(team, "player").unwrap();
    let player_node = schema.node(player);
    assert!(player_node.is_list());
    assert_eq!(player_node.children().len(), 4);

    let number = schema.node(schema.child(player, "number").unwrap());
    assert_eq!(number.leaf_type(), Some(LeafType::Uint16));
}

#[test]
fn test_schema_is_deterministic() {
    let first = parse_schema(SPORTS).unwrap();
    let second = parse_schema(SPORTS).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_sibling_collision_is_semantic_error() {
    let text = "container c {
        leaf name { type string; }
        list name { key id; leaf id { type string; } }
    }";
    let err = parse_schema(text).unwrap_err();
    assert!(err.is_semantic());
    assert!(matches!(err, SchemaError::DuplicateName { .. }));
}

#[test]
fn test_list_key_must_resolve_to_leaf() {
    let text = "container c {
        list entry {
            key missing;
            leaf present { type string; }
        }
    }";
    assert!(matches!(
        parse_schema(text).unwrap_err(),
        SchemaError::UnknownKeyLeaf { .. }
    ));
}

#[test]
fn test_malformed_text_is_syntax_error() {
    for text in [
        "container { }",
        "container c leaf a { type string; }",
        "container c { leaf a { type string } }",
        "container c { leaf a type string; }",
    ] {
        let err = parse_schema(text).unwrap_err();
        assert!(!err.is_semantic(), "expected syntax error for: {}", text);
    }
}
