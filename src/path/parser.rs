//! Path query string parser.

use super::ast::{PathExpr, Predicate, Segment};
use super::error::PathError;

/// Parser for path query strings.
pub struct Parser {
    input: String,
    position: usize,
}

impl Parser {
    /// Creates a new parser for the given query string.
    pub fn new(query: &str) -> Self {
        Self {
            input: query.to_string(),
            position: 0,
        }
    }

    /// Parses the query string into a `PathExpr`.
    pub fn parse(query: &str) -> Result<PathExpr, PathError> {
        let mut parser = Parser::new(query);
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<PathExpr, PathError> {
        let mut segments = vec![self.parse_segment()?];

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('/') => {
                    self.next();
                    segments.push(self.parse_segment()?);
                }
                Some(ch) => {
                    return Err(PathError::UnexpectedToken {
                        position: self.position,
                        found: ch.to_string(),
                        expected: "'/' or end of input".to_string(),
                    })
                }
                None => break,
            }
        }

        Ok(PathExpr::new(segments))
    }

    fn parse_segment(&mut self) -> Result<Segment, PathError> {
        let name = self.parse_identifier()?;
        self.skip_whitespace();
        let predicate = if self.peek() == Some('[') {
            Some(self.parse_predicate()?)
        } else {
            None
        };
        Ok(Segment { name, predicate })
    }

    /// Parses a `[key='literal']` predicate.
    fn parse_predicate(&mut self) -> Result<Predicate, PathError> {
        self.expect('[')?;
        let key = self.parse_identifier()?;
        self.expect('=')?;
        let literal = self.parse_quoted_literal()?;
        self.expect(']')?;
        Ok(Predicate { key, literal })
    }

    /// Parses a single-quoted literal with backslash escapes.
    fn parse_quoted_literal(&mut self) -> Result<String, PathError> {
        self.skip_whitespace();
        let pos = self.position;
        match self.next() {
            Some('\'') => {}
            Some(ch) => {
                return Err(PathError::UnexpectedToken {
                    position: pos,
                    found: ch.to_string(),
                    expected: "quoted literal".to_string(),
                })
            }
            None => {
                return Err(PathError::UnexpectedEnd {
                    expected: "quoted literal".to_string(),
                })
            }
        }

        let mut value = String::new();
        loop {
            match self.next() {
                Some('\'') => break,
                Some('\\') => match self.next() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('\\') => value.push('\\'),
                    Some('\'') => value.push('\''),
                    Some(_) | None => {
                        return Err(PathError::InvalidSyntax {
                            message: "Invalid escape sequence".to_string(),
                        })
                    }
                },
                Some(ch) => value.push(ch),
                None => {
                    return Err(PathError::UnexpectedEnd {
                        expected: "closing quote".to_string(),
                    })
                }
            }
        }
        Ok(value)
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    /// Expects a specific character and advances, or returns an error.
    fn expect(&mut self, expected: char) -> Result<(), PathError> {
        self.skip_whitespace();
        let pos = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(PathError::UnexpectedToken {
                position: pos,
                found: ch.to_string(),
                expected: format!("'{}'", expected),
            }),
            None => Err(PathError::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }

    /// Parses an identifier: `[A-Za-z_][A-Za-z0-9_-]*`.
    fn parse_identifier(&mut self) -> Result<String, PathError> {
        self.skip_whitespace();
        let mut name = String::new();

        match self.peek() {
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                name.push(ch);
                self.next();
            }
            Some(ch) => {
                return Err(PathError::UnexpectedToken {
                    position: self.position,
                    found: ch.to_string(),
                    expected: "identifier".to_string(),
                })
            }
            None => {
                return Err(PathError::UnexpectedEnd {
                    expected: "identifier".to_string(),
                })
            }
        }

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
                name.push(ch);
                self.next();
            } else {
                break;
            }
        }

        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_segment() {
        let path = Parser::parse("person").unwrap();
        assert_eq!(path.segments.len(), 1);
        assert_eq!(path.segments[0].name, "person");
        assert!(path.segments[0].predicate.is_none());
    }

    #[test]
    fn test_parse_nested_path() {
        let path = Parser::parse("person/name").unwrap();
        assert_eq!(path.segments.len(), 2);
        assert_eq!(path.segments[0].name, "person");
        assert_eq!(path.segments[1].name, "name");
    }

    #[test]
    fn test_parse_predicate() {
        let path = Parser::parse("team/player[name='Bob']").unwrap();
        assert_eq!(path.segments.len(), 2);
        assert_eq!(
            path.segments[1].predicate,
            Some(Predicate {
                key: "name".to_string(),
                literal: "Bob".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_predicate_on_inner_segment() {
        let path = Parser::parse("team[name='Eagles']/player").unwrap();
        assert!(path.segments[0].predicate.is_some());
        assert!(path.segments[1].predicate.is_none());
    }

    #[test]
    fn test_parse_escaped_literal() {
        let path = Parser::parse(r"team/player[name='O\'Brien']").unwrap();
        assert_eq!(
            path.segments[1].predicate.as_ref().unwrap().literal,
            "O'Brien"
        );
    }

    #[test]
    fn test_parse_empty_literal() {
        let path = Parser::parse("team[name='']").unwrap();
        assert_eq!(path.segments[0].predicate.as_ref().unwrap().literal, "");
    }

    #[test]
    fn test_parse_whitespace_handling() {
        let path = Parser::parse(" team / player [ name = 'Bob' ] ").unwrap();
        assert_eq!(path.segments.len(), 2);
        assert!(path.segments[1].predicate.is_some());
    }

    #[test]
    fn test_parse_empty_fails() {
        assert!(Parser::parse("").is_err());
    }

    #[test]
    fn test_parse_trailing_slash_fails() {
        assert!(Parser::parse("team/").is_err());
    }

    #[test]
    fn test_parse_leading_digit_fails() {
        let err = Parser::parse("7eam").unwrap_err();
        assert!(matches!(err, PathError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_parse_unterminated_literal_fails() {
        let err = Parser::parse("team[name='Bob").unwrap_err();
        assert!(matches!(err, PathError::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_parse_missing_quote_fails() {
        let err = Parser::parse("team[name=Bob]").unwrap_err();
        assert!(matches!(err, PathError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_parse_missing_bracket_fails() {
        let err = Parser::parse("team[name='Bob'").unwrap_err();
        assert!(matches!(err, PathError::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_parse_bad_escape_fails() {
        let err = Parser::parse(r"team[name='B\ob']").unwrap_err();
        assert!(matches!(err, PathError::InvalidSyntax { .. }));
    }
}
