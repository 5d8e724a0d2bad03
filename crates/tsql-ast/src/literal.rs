//! Literal values

use serde::Serialize;

/// Lexical category of a literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LiteralType {
    Integer,
    Numeric,
    Real,
    Money,
    Binary,
    String,
    Null,
    Default,
    Max,
    Odbc,
    Identifier,
}

same_shape_nodes! {
    {
        pub literal_type: LiteralType,
        /// The lexeme exactly as written (digits are never normalized)
        pub value: String,
    } =>
    IntegerLiteral,
    NumericLiteral,
    RealLiteral,
    MoneyLiteral,
    NullLiteral,
    DefaultLiteral,
    MaxLiteral,
}

impl IntegerLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            literal_type: LiteralType::Integer,
            value: value.into(),
        }
    }
}

impl NumericLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            literal_type: LiteralType::Numeric,
            value: value.into(),
        }
    }
}

impl RealLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            literal_type: LiteralType::Real,
            value: value.into(),
        }
    }
}

impl MoneyLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            literal_type: LiteralType::Money,
            value: value.into(),
        }
    }
}

impl NullLiteral {
    pub fn new() -> Self {
        Self {
            literal_type: LiteralType::Null,
            value: "NULL".to_string(),
        }
    }
}

impl Default for NullLiteral {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultLiteral {
    pub fn new(lexeme: impl Into<String>) -> Self {
        Self {
            literal_type: LiteralType::Default,
            value: lexeme.into(),
        }
    }
}

impl MaxLiteral {
    pub fn new(lexeme: impl Into<String>) -> Self {
        Self {
            literal_type: LiteralType::Max,
            value: lexeme.into(),
        }
    }
}

/// A bare word standing for a value, e.g. `dmy` in `SET DATEFORMAT dmy`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct IdentifierLiteral {
    pub literal_type: LiteralType,
    pub quote_type: crate::names::QuoteType,
    pub value: String,
}

impl IdentifierLiteral {
    pub fn from_identifier(identifier: crate::names::Identifier) -> Self {
        Self {
            literal_type: LiteralType::Identifier,
            quote_type: identifier.quote_type,
            value: identifier.value,
        }
    }
}

/// A character string literal with its quotes removed and `''` collapsed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct StringLiteral {
    pub literal_type: LiteralType,
    pub is_national: bool,
    pub is_large_object: bool,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<crate::names::Identifier>,
}

/// Strings longer than this many characters are flagged as large objects
pub const LARGE_OBJECT_THRESHOLD: usize = 8000;

impl StringLiteral {
    /// Build from a decoded value
    pub fn new(value: impl Into<String>, is_national: bool) -> Self {
        let value = value.into();
        let limit = if is_national {
            LARGE_OBJECT_THRESHOLD / 2
        } else {
            LARGE_OBJECT_THRESHOLD
        };
        Self {
            literal_type: LiteralType::String,
            is_national,
            is_large_object: value.chars().count() > limit,
            value,
            collation: None,
        }
    }

    /// Decode a raw `'...'` or `N'...'` lexeme
    pub fn from_lexeme(lexeme: &str) -> Self {
        let (is_national, quoted) = match lexeme.as_bytes().first() {
            Some(b'N') | Some(b'n') => (true, &lexeme[1..]),
            _ => (false, lexeme),
        };
        Self::new(unquote(quoted, '\''), is_national)
    }
}

/// A `0x...` literal; the value keeps the prefix as written
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct BinaryLiteral {
    pub literal_type: LiteralType,
    pub is_large_object: bool,
    pub value: String,
}

impl BinaryLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            literal_type: LiteralType::Binary,
            is_large_object: value.len().saturating_sub(2) > LARGE_OBJECT_THRESHOLD * 2,
            value,
        }
    }
}

/// Kind of an ODBC escape literal (`{guid '...'}`, `{d '...'}`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OdbcLiteralType {
    Time,
    Date,
    Timestamp,
    Guid,
}

impl OdbcLiteralType {
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "T" => Some(Self::Time),
            "D" => Some(Self::Date),
            "TS" => Some(Self::Timestamp),
            "GUID" => Some(Self::Guid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct OdbcLiteral {
    pub literal_type: LiteralType,
    pub odbc_literal_type: OdbcLiteralType,
    pub is_national: bool,
    pub value: String,
}

/// Strip the surrounding `quote` characters and collapse doubled quotes.
/// A missing closing quote is tolerated.
pub fn unquote(lexeme: &str, quote: char) -> String {
    let body = lexeme.strip_prefix(quote).unwrap_or(lexeme);
    let body = body.strip_suffix(quote).unwrap_or(body);
    let doubled: String = [quote, quote].iter().collect();
    body.replace(&doubled, &quote.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_string_literal_unescapes_quotes() {
        let lit = StringLiteral::from_lexeme("'it''s'");
        assert_eq!(lit.value, "it's");
        assert!(!lit.is_national);
    }

    #[test]
    fn test_national_string_literal() {
        let lit = StringLiteral::from_lexeme("N'abc'");
        assert_eq!(lit.value, "abc");
        assert!(lit.is_national);
        assert!(!lit.is_large_object);
    }

    #[test]
    fn test_large_object_threshold() {
        let lit = StringLiteral::new("x".repeat(4001), true);
        assert!(lit.is_large_object);
        let lit = StringLiteral::new("x".repeat(4001), false);
        assert!(!lit.is_large_object);
    }

    #[test]
    fn test_integer_literal_json_shape() {
        let json = serde_json::to_value(IntegerLiteral::new("007")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"$type": "IntegerLiteral", "LiteralType": "Integer", "Value": "007"})
        );
    }

    #[test]
    fn test_string_literal_json_omits_missing_collation() {
        let json = serde_json::to_value(StringLiteral::from_lexeme("'a'")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "$type": "StringLiteral",
                "LiteralType": "String",
                "IsNational": false,
                "IsLargeObject": false,
                "Value": "a"
            })
        );
    }

    proptest! {
        #[test]
        fn string_escape_round_trip(value in "[a-z' ]{0,24}") {
            let lexeme = format!("'{}'", value.replace('\'', "''"));
            prop_assert_eq!(StringLiteral::from_lexeme(&lexeme).value, value);
        }
    }
}
