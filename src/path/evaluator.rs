use super::ast::{PathExpr, Segment};
use super::error::PathError;
use super::parser::Parser;
use crate::data::{DataModel, DataNode, Value};
use crate::schema::{SchemaKind, SchemaModel};

/// Evaluates path expressions over a data tree.
///
/// Predicates are checked against the schema before any data is scanned,
/// so a predicate naming an undeclared key fails even on an empty tree.
pub struct Evaluator<'a> {
    schema: &'a SchemaModel,
    model: &'a DataModel,
}

impl<'a> Evaluator<'a> {
    pub fn new(schema: &'a SchemaModel, model: &'a DataModel) -> Self {
        Evaluator { schema, model }
    }

    /// Evaluates a path query and returns matching nodes in document order.
    ///
    /// An empty result is not an error; it signals "no matches".
    pub fn evaluate(&self, query: &str) -> Result<Vec<&'a DataNode>, PathError> {
        Ok(self.run(query)?.into_iter().map(|(_, node)| node).collect())
    }

    /// Evaluates a path query and returns matching node paths.
    /// Each path is a `Vec<usize>` of child indices from the root, usable
    /// with `DataModel::get_node` and for parent lookups.
    pub fn evaluate_paths(&self, query: &str) -> Result<Vec<Vec<usize>>, PathError> {
        Ok(self.run(query)?.into_iter().map(|(path, _)| path).collect())
    }

    fn run(&self, query: &str) -> Result<Vec<(Vec<usize>, &'a DataNode)>, PathError> {
        let expr = Parser::parse(query)?;
        let literals = self.check_predicates(&expr)?;

        // Candidate set starts at the root; each segment replaces it with
        // the matching children of every candidate, preserving scan order.
        let mut current: Vec<(Vec<usize>, &DataNode)> = vec![(Vec::new(), self.model.root())];
        for (segment, literal) in expr.segments.iter().zip(&literals) {
            let mut next = Vec::new();
            for (path, node) in &current {
                self.collect_children(node, path, segment, literal.as_ref(), &mut next);
            }
            current = next;
        }

        Ok(current)
    }

    /// Validates predicates against the schema and types their literals.
    ///
    /// Returns one entry per segment: the typed literal for segments with
    /// a predicate, `None` otherwise. Segments whose name resolves to no
    /// schema node yield an empty result later, so nothing to check.
    fn check_predicates(&self, expr: &PathExpr) -> Result<Vec<Option<Value>>, PathError> {
        let mut literals = Vec::with_capacity(expr.segments.len());
        let mut scope = Some(self.schema.root());

        for segment in &expr.segments {
            let target = scope.and_then(|s| self.schema.child(s, &segment.name));

            match (&segment.predicate, target) {
                (Some(pred), Some(id)) => {
                    let node = self.schema.node(id);
                    let keys = match node.kind() {
                        SchemaKind::List { keys } => keys,
                        _ => {
                            return Err(PathError::NotAList {
                                segment: segment.name.clone(),
                            })
                        }
                    };
                    if !keys.iter().any(|k| k == &pred.key) {
                        return Err(PathError::UnknownKey {
                            list: node.name().to_string(),
                            key: pred.key.clone(),
                        });
                    }
                    // Declared keys always resolve to child leaves.
                    if let Some(ty) = self
                        .schema
                        .child(id, &pred.key)
                        .and_then(|kid| self.schema.node(kid).leaf_type())
                    {
                        match Value::from_literal(ty, &pred.literal) {
                            Some(value) => literals.push(Some(value)),
                            None => {
                                return Err(PathError::BadLiteral {
                                    key: pred.key.clone(),
                                    expected: ty.type_name().to_string(),
                                    literal: pred.literal.clone(),
                                })
                            }
                        }
                    } else {
                        literals.push(None);
                    }
                }
                _ => literals.push(None),
            }

            scope = target;
        }

        Ok(literals)
    }

    fn collect_children(
        &self,
        node: &'a DataNode,
        path: &[usize],
        segment: &Segment,
        literal: Option<&Value>,
        out: &mut Vec<(Vec<usize>, &'a DataNode)>,
    ) {
        for (index, child) in node.children().iter().enumerate() {
            if self.schema.node(child.schema()).name() != segment.name {
                continue;
            }
            if let (Some(pred), Some(value)) = (&segment.predicate, literal) {
                if !self.entry_matches(child, &pred.key, value) {
                    continue;
                }
            }
            let mut child_path = path.to_vec();
            child_path.push(index);
            out.push((child_path, child));
        }
    }

    /// True when a list entry's key leaf equals the typed literal.
    fn entry_matches(&self, entry: &DataNode, key: &str, value: &Value) -> bool {
        entry.children().iter().any(|child| {
            self.schema.node(child.schema()).name() == key
                && child.leaf_value() == Some(value)
        })
    }
}
