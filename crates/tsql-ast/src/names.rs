//! Identifiers and multi-part names

use crate::expr::ScalarExpression;
use serde::Serialize;

/// How an identifier was delimited in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuoteType {
    NotQuoted,
    SquareBracket,
    DoubleQuote,
}

/// A single name part with its delimiters stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct Identifier {
    pub value: String,
    pub quote_type: QuoteType,
}

impl Identifier {
    /// An undelimited identifier
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote_type: QuoteType::NotQuoted,
        }
    }

    /// The placeholder for a missing part between dots (`db..tbl`)
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Decode a raw identifier lexeme. `[x]]y]` becomes `x]y` and `"a""b"`
    /// becomes `a"b`; an unterminated delimiter keeps everything after the
    /// opening character.
    pub fn from_lexeme(lexeme: &str) -> Self {
        if let Some(body) = lexeme.strip_prefix('[') {
            let body = body.strip_suffix(']').unwrap_or(body);
            Self {
                value: body.replace("]]", "]"),
                quote_type: QuoteType::SquareBracket,
            }
        } else if let Some(body) = lexeme.strip_prefix('"') {
            let body = body.strip_suffix('"').unwrap_or(body);
            Self {
                value: body.replace("\"\"", "\""),
                quote_type: QuoteType::DoubleQuote,
            }
        } else {
            Self::new(lexeme)
        }
    }

    /// Case-insensitive comparison against an undelimited word
    pub fn is_word(&self, word: &str) -> bool {
        self.quote_type == QuoteType::NotQuoted && self.value.eq_ignore_ascii_case(word)
    }
}

/// A dot-separated sequence of identifiers used as a column or call qualifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct MultiPartIdentifier {
    pub count: usize,
    pub identifiers: Vec<Identifier>,
}

impl MultiPartIdentifier {
    pub fn new(identifiers: Vec<Identifier>) -> Self {
        Self {
            count: identifiers.len(),
            identifiers,
        }
    }

    pub fn last(&self) -> Option<&Identifier> {
        self.identifiers.last()
    }
}

/// A possibly qualified object name: `[server.][database.][schema.]base`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SchemaObjectName {
    pub count: usize,
    pub identifiers: Vec<Identifier>,
    pub server_identifier: Option<Identifier>,
    pub database_identifier: Option<Identifier>,
    pub schema_identifier: Option<Identifier>,
    pub base_identifier: Option<Identifier>,
}

impl SchemaObjectName {
    /// Assign semantic roles right to left: base, schema, database, server.
    pub fn new(identifiers: Vec<Identifier>) -> Self {
        let n = identifiers.len();
        let part = |from_end: usize| {
            if n > from_end {
                identifiers.get(n - 1 - from_end).cloned()
            } else {
                None
            }
        };
        Self {
            count: n,
            server_identifier: part(3),
            database_identifier: part(2),
            schema_identifier: part(1),
            base_identifier: part(0),
            identifiers,
        }
    }

    /// A one-part name
    pub fn single(identifier: Identifier) -> Self {
        Self::new(vec![identifier])
    }

    /// Reinterpret the name as a column/call qualifier
    pub fn to_multi_part(&self) -> MultiPartIdentifier {
        MultiPartIdentifier::new(self.identifiers.clone())
    }

    pub fn base_value(&self) -> Option<&str> {
        self.base_identifier.as_ref().map(|id| id.value.as_str())
    }
}

/// A name given either as an identifier or as a literal (`AS [x]` / `AS 'x'`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct IdentifierOrValueExpression {
    pub value: String,
    pub identifier: Option<Identifier>,
    pub value_expression: Option<ScalarExpression>,
}

impl IdentifierOrValueExpression {
    pub fn from_identifier(identifier: Identifier) -> Self {
        Self {
            value: identifier.value.clone(),
            identifier: Some(identifier),
            value_expression: None,
        }
    }

    pub fn from_value(value: impl Into<String>, expression: ScalarExpression) -> Self {
        Self {
            value: value.into(),
            identifier: None,
            value_expression: Some(expression),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bracket_identifier_unescapes() {
        let id = Identifier::from_lexeme("[x]]y]");
        assert_eq!(id.value, "x]y");
        assert_eq!(id.quote_type, QuoteType::SquareBracket);
    }

    #[test]
    fn test_double_quoted_identifier_unescapes() {
        let id = Identifier::from_lexeme("\"a\"\"b\"");
        assert_eq!(id.value, "a\"b");
        assert_eq!(id.quote_type, QuoteType::DoubleQuote);
    }

    #[test]
    fn test_plain_identifier_keeps_case() {
        let id = Identifier::from_lexeme("MyTable");
        assert_eq!(id.value, "MyTable");
        assert_eq!(id.quote_type, QuoteType::NotQuoted);
        assert!(id.is_word("mytable"));
    }

    #[test]
    fn test_schema_object_name_roles() {
        let name = SchemaObjectName::new(vec![
            Identifier::new("srv"),
            Identifier::new("db"),
            Identifier::new("dbo"),
            Identifier::new("t"),
        ]);
        assert_eq!(name.count, 4);
        assert_eq!(name.server_identifier.unwrap().value, "srv");
        assert_eq!(name.database_identifier.unwrap().value, "db");
        assert_eq!(name.schema_identifier.unwrap().value, "dbo");
        assert_eq!(name.base_identifier.unwrap().value, "t");
    }

    #[test]
    fn test_schema_object_name_empty_middle_part() {
        let name = SchemaObjectName::new(vec![
            Identifier::new("db"),
            Identifier::empty(),
            Identifier::new("t"),
        ]);
        assert_eq!(name.count, 3);
        assert_eq!(name.schema_identifier.unwrap().value, "");
        assert!(name.server_identifier.is_none());
    }

    #[test]
    fn test_identifier_json_shape() {
        let json = serde_json::to_value(Identifier::from_lexeme("[dbo]")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"$type": "Identifier", "Value": "dbo", "QuoteType": "SquareBracket"})
        );
    }

    proptest! {
        #[test]
        fn bracket_escape_round_trip(value in "[a-z\\] ]{0,16}") {
            let lexeme = format!("[{}]", value.replace(']', "]]"));
            let id = Identifier::from_lexeme(&lexeme);
            prop_assert_eq!(id.value, value);
            prop_assert_eq!(id.quote_type, QuoteType::SquareBracket);
        }
    }
}
