//! Schema definition text parser.
//!
//! Parses the declarative schema grammar into a `SchemaModel`:
//!
//! ```text
//! container sports {
//!   list team {
//!     key name;
//!     leaf name { type string; }
//!     list player {
//!       key name;
//!       leaf name { type string; }
//!       leaf number { type uint16; }
//!     }
//!   }
//! }
//! ```
//!
//! `//` line comments are skipped. The top-level declaration must be a
//! single container; it becomes the document root.

use indexmap::IndexMap;

use super::error::SchemaError;
use super::node::{LeafType, SchemaId, SchemaKind, SchemaModel, SchemaNode};

/// Parses a schema definition into a `SchemaModel`.
pub fn parse_schema(text: &str) -> Result<SchemaModel, SchemaError> {
    Parser::new(text).parse_model()
}

/// Recursive-descent parser over the schema grammar.
struct Parser {
    input: String,
    position: usize,
    nodes: Vec<SchemaNode>,
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            input: text.to_string(),
            position: 0,
            nodes: Vec::new(),
        }
    }

    fn parse_model(mut self) -> Result<SchemaModel, SchemaError> {
        self.skip_trivia();
        let keyword = self.parse_identifier()?;
        let root = self.parse_statement(&keyword)?;

        self.skip_trivia();
        if let Some(ch) = self.peek() {
            return Err(SchemaError::UnexpectedToken {
                position: self.position,
                found: ch.to_string(),
                expected: "end of input".to_string(),
            });
        }

        if !self.nodes[root.0].is_container() {
            return Err(SchemaError::RootNotContainer {
                found: self.nodes[root.0].kind().kind_name().to_string(),
            });
        }

        Ok(SchemaModel::from_parts(self.nodes, root))
    }

    /// Dispatches on an already-consumed statement keyword.
    fn parse_statement(&mut self, keyword: &str) -> Result<SchemaId, SchemaError> {
        match keyword {
            "container" => self.parse_container(),
            "list" => self.parse_list(),
            "leaf" => self.parse_leaf(),
            other => Err(SchemaError::InvalidSyntax {
                message: format!("unknown statement '{}'", other),
            }),
        }
    }

    fn parse_container(&mut self) -> Result<SchemaId, SchemaError> {
        let name = self.parse_identifier()?;
        let (children, _) = self.parse_body(&name, false)?;
        Ok(self.push(SchemaNode {
            name,
            kind: SchemaKind::Container,
            children,
        }))
    }

    fn parse_list(&mut self) -> Result<SchemaId, SchemaError> {
        let name = self.parse_identifier()?;
        let (children, keys) = self.parse_body(&name, true)?;

        let keys = keys.ok_or_else(|| SchemaError::MissingKey { list: name.clone() })?;
        for key in &keys {
            match children.get(key) {
                None => {
                    return Err(SchemaError::UnknownKeyLeaf {
                        list: name.clone(),
                        key: key.clone(),
                    })
                }
                Some(&id) if !self.nodes[id.0].is_leaf() => {
                    return Err(SchemaError::KeyNotLeaf {
                        list: name.clone(),
                        key: key.clone(),
                    })
                }
                Some(_) => {}
            }
        }

        Ok(self.push(SchemaNode {
            name,
            kind: SchemaKind::List { keys },
            children,
        }))
    }

    fn parse_leaf(&mut self) -> Result<SchemaId, SchemaError> {
        let name = self.parse_identifier()?;
        self.expect('{')?;

        let keyword = self.parse_identifier()?;
        if keyword != "type" {
            return Err(SchemaError::InvalidSyntax {
                message: format!("expected 'type' in leaf '{}', found '{}'", name, keyword),
            });
        }
        let type_name = self.parse_identifier()?;
        let leaf_type =
            LeafType::from_name(&type_name).ok_or(SchemaError::UnknownType { name: type_name })?;
        self.expect(';')?;
        self.expect('}')?;

        Ok(self.push(SchemaNode {
            name,
            kind: SchemaKind::Leaf { leaf_type },
            children: IndexMap::new(),
        }))
    }

    /// Parses a `{ ... }` body: child statements plus, inside lists, one
    /// key statement.
    fn parse_body(
        &mut self,
        parent: &str,
        is_list: bool,
    ) -> Result<(IndexMap<String, SchemaId>, Option<Vec<String>>), SchemaError> {
        self.expect('{')?;
        let mut children: IndexMap<String, SchemaId> = IndexMap::new();
        let mut keys: Option<Vec<String>> = None;

        loop {
            self.skip_trivia();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    break;
                }
                Some(_) => {
                    let word = self.parse_identifier()?;
                    if word == "key" {
                        if !is_list {
                            return Err(SchemaError::InvalidSyntax {
                                message: format!(
                                    "key statement outside a list (in '{}')",
                                    parent
                                ),
                            });
                        }
                        if keys.is_some() {
                            return Err(SchemaError::InvalidSyntax {
                                message: format!("duplicate key statement in list '{}'", parent),
                            });
                        }
                        keys = Some(self.parse_key_names()?);
                    } else {
                        let id = self.parse_statement(&word)?;
                        let child_name = self.nodes[id.0].name().to_string();
                        if children.insert(child_name.clone(), id).is_some() {
                            return Err(SchemaError::DuplicateName {
                                parent: parent.to_string(),
                                name: child_name,
                            });
                        }
                    }
                }
                None => {
                    return Err(SchemaError::UnexpectedEnd {
                        expected: "'}'".to_string(),
                    })
                }
            }
        }

        Ok((children, keys))
    }

    /// Parses the names of a `key a b ... ;` statement.
    fn parse_key_names(&mut self) -> Result<Vec<String>, SchemaError> {
        let mut names = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                Some(';') => {
                    self.bump();
                    break;
                }
                Some(_) => names.push(self.parse_identifier()?),
                None => {
                    return Err(SchemaError::UnexpectedEnd {
                        expected: "';'".to_string(),
                    })
                }
            }
        }
        if names.is_empty() {
            Err(SchemaError::InvalidSyntax {
                message: "key statement names no leaf".to_string(),
            })
        } else {
            Ok(names)
        }
    }

    fn push(&mut self, node: SchemaNode) -> SchemaId {
        let id = SchemaId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Skips whitespace and `//` line comments.
    fn skip_trivia(&mut self) {
        loop {
            while let Some(ch) = self.peek() {
                if ch.is_whitespace() {
                    self.bump();
                } else {
                    break;
                }
            }
            if self.input[self.position..].starts_with("//") {
                while let Some(ch) = self.bump() {
                    if ch == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    /// Expects a specific character and advances, or returns an error.
    fn expect(&mut self, expected: char) -> Result<(), SchemaError> {
        self.skip_trivia();
        let pos = self.position;
        match self.bump() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(SchemaError::UnexpectedToken {
                position: pos,
                found: ch.to_string(),
                expected: format!("'{}'", expected),
            }),
            None => Err(SchemaError::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }

    /// Parses an identifier: `[A-Za-z_][A-Za-z0-9_-]*`.
    fn parse_identifier(&mut self) -> Result<String, SchemaError> {
        self.skip_trivia();
        let mut name = String::new();

        match self.peek() {
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                name.push(ch);
                self.bump();
            }
            Some(ch) => {
                return Err(SchemaError::UnexpectedToken {
                    position: self.position,
                    found: ch.to_string(),
                    expected: "identifier".to_string(),
                })
            }
            None => {
                return Err(SchemaError::UnexpectedEnd {
                    expected: "identifier".to_string(),
                })
            }
        }

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
                name.push(ch);
                self.bump();
            } else {
                break;
            }
        }

        Ok(name)
    }
}
