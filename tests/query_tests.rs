//! Integration tests for path evaluation over parsed instances.

use modelquill::data::{parse_instance, DataModel};
use modelquill::path::{Evaluator, PathError};
use modelquill::schema::{parse_schema, SchemaModel};

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
            "person": [{"name": "Bob"}, {"name": "Erica"}],
            "team": [
                {"name": "Eagles", "player": [
                    {"name": "Bob", "season": "2019", "number": 7, "scores": 12}
                ]},
                {"name": "Hawks", "player": [
                    {"name": "Erica", "season": "2018", "number": 3, "scores": 21},
                    {"name": "Bob", "season": "2020", "number": 9, "scores": 4}
                ]}
            ]
        }"#,
    )
    .unwrap();
    (schema, model)
}

#[test]
fn test_enumerate_person_names() {
    let (schema, model) = fixture();
    let evaluator = Evaluator::new(&schema, &model);

    let names = evaluator.evaluate("person/name").unwrap();
    let rendered: Vec<String> = names
        .iter()
        .map(|n| n.leaf_value().unwrap().to_string())
        .collect();
    assert_eq!(rendered, ["Bob", "Erica"]);
}

/// Predicate matching returns exactly the matching entries, in document
/// order across teams.
#[test]
fn test_player_predicate_across_teams() {
    let (schema, model) = fixture();
    let evaluator = Evaluator::new(&schema, &model);

    let bobs = evaluator.evaluate("team/player[name='Bob']").unwrap();
    assert_eq!(bobs.len(), 2);

    // First match comes from the Eagles (document order), second from
    // the Hawks.
    let seasons: Vec<String> = bobs
        .iter()
        .map(|entry| {
            entry
                .children()
                .iter()
                .find(|c| schema.node(c.schema()).name() == "season")
                .and_then(|c| c.leaf_value())
                .unwrap()
                .to_string()
        })
        .collect();
    assert_eq!(seasons, ["2019", "2020"]);
}

#[test]
fn test_chained_predicates() {
    let (schema, model) = fixture();
    let evaluator = Evaluator::new(&schema, &model);

    let hits = evaluator
        .evaluate("team[name='Hawks']/player[name='Erica']")
        .unwrap();
    assert_eq!(hits.len(), 1);
}

/// A lexically valid path that matches nothing yields an empty result,
/// never an error.
#[test]
fn test_zero_matches_is_not_an_error() {
    let (schema, model) = fixture();
    let evaluator = Evaluator::new(&schema, &model);

    assert!(evaluator.evaluate("person/address").unwrap().is_empty());
    assert!(evaluator.evaluate("venue").unwrap().is_empty());
    assert!(evaluator
        .evaluate("team/player[name='Nobody']")
        .unwrap()
        .is_empty());
}

#[test]
fn test_undeclared_predicate_key_is_path_error() {
    let (schema, model) = fixture();
    let evaluator = Evaluator::new(&schema, &model);

    let err = evaluator.evaluate("team/player[rank='1']").unwrap_err();
    assert_eq!(
        err,
        PathError::UnknownKey {
            list: "player".to_string(),
            key: "rank".to_string(),
        }
    );
}

#[test]
fn test_malformed_path_is_syntax_error() {
    let (schema, model) = fixture();
    let evaluator = Evaluator::new(&schema, &model);

    for query in ["", "team/", "/team", "team[name]", "team[name='x'", "te am"] {
        assert!(
            evaluator.evaluate(query).is_err(),
            "expected syntax error for: {:?}",
            query
        );
    }
}

#[test]
fn test_paths_support_parent_lookup() {
    let (schema, model) = fixture();
    let evaluator = Evaluator::new(&schema, &model);

    let paths = evaluator
        .evaluate_paths("team/player[name='Erica']")
        .unwrap();
    assert_eq!(paths.len(), 1);

    let team = model.get_node(&paths[0][..paths[0].len() - 1]).unwrap();
    let team_name = team
        .children()
        .iter()
        .find(|c| schema.node(c.schema()).name() == "name")
        .and_then(|c| c.leaf_value())
        .unwrap();
    assert_eq!(team_name.to_string(), "Hawks");
}
