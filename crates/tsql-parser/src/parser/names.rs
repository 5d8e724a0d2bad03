//! Identifiers, multi-part names and small shared lists

use super::{PResult, Parser};
use crate::lexer::{Token, TokenKind};
use tsql_ast::expr::{ColumnReferenceExpression, ScalarExpression, VariableReference};
use tsql_ast::literal::StringLiteral;
use tsql_ast::names::IdentifierOrValueExpression;
use tsql_ast::{Identifier, MultiPartIdentifier, SchemaObjectName};

/// Words that end an expression instead of naming it when written bare
const ALIAS_STOP_WORDS: &[&str] = &[
    "FROM", "WHERE", "GROUP", "HAVING", "ORDER", "OPTION", "INTO", "UNION", "EXCEPT",
    "INTERSECT", "GO", "COLLATE", "FOR", "OUTPUT", "WINDOW",
];

pub(crate) fn is_identifier_token(token: Token<'_>) -> bool {
    token.kind == TokenKind::Ident || token.kind.is_soft_keyword()
}

impl<'a> Parser<'a> {
    /// Plain, delimited or soft-keyword identifier at the cursor
    pub(crate) fn at_identifier(&self) -> bool {
        is_identifier_token(self.current)
    }

    pub(crate) fn parse_identifier(&mut self) -> PResult<Identifier> {
        if self.at_identifier() {
            Ok(Identifier::from_lexeme(self.advance().literal))
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    /// Any word, reserved keywords included. Used for option names and for
    /// name parts after a dot, where keywords cannot be misread.
    pub(crate) fn parse_word(&mut self) -> PResult<Identifier> {
        if self.current.kind.is_word() {
            Ok(Identifier::from_lexeme(self.advance().literal))
        } else {
            Err(self.unexpected("name"))
        }
    }

    /// `a.b.c`, keeping empty parts of `db..t` as empty identifiers
    pub(crate) fn parse_schema_object_name(&mut self) -> PResult<SchemaObjectName> {
        Ok(SchemaObjectName::new(self.parse_dotted_parts(false)?))
    }

    pub(crate) fn parse_multi_part_identifier(&mut self) -> PResult<MultiPartIdentifier> {
        Ok(MultiPartIdentifier::new(self.parse_dotted_parts(true)?))
    }

    /// Dot-separated parts. With `stop_at_star` a trailing `.*` is left for
    /// the caller.
    pub(crate) fn parse_dotted_parts(&mut self, stop_at_star: bool) -> PResult<Vec<Identifier>> {
        let mut parts = Vec::new();
        if self.at(TokenKind::Dot) {
            parts.push(Identifier::empty());
        } else {
            parts.push(self.parse_identifier()?);
        }
        while self.at(TokenKind::Dot) {
            if stop_at_star && self.peek_is(TokenKind::Star) {
                break;
            }
            self.advance();
            if self.at(TokenKind::Dot) {
                parts.push(Identifier::empty());
                continue;
            }
            parts.push(self.parse_word()?);
        }
        Ok(parts)
    }

    pub(crate) fn parse_schema_object_name_list(&mut self) -> PResult<Vec<SchemaObjectName>> {
        let mut names = vec![self.parse_schema_object_name()?];
        while self.eat(TokenKind::Comma) {
            names.push(self.parse_schema_object_name()?);
        }
        Ok(names)
    }

    pub(crate) fn parse_identifier_comma_list(&mut self) -> PResult<Vec<Identifier>> {
        let mut names = vec![self.parse_identifier()?];
        while self.eat(TokenKind::Comma) {
            names.push(self.parse_identifier()?);
        }
        Ok(names)
    }

    /// `(a, b, c)`
    pub(crate) fn parse_parenthesized_identifiers(&mut self) -> PResult<Vec<Identifier>> {
        self.expect(TokenKind::LParen, "'('")?;
        let names = self.parse_identifier_comma_list()?;
        self.expect(TokenKind::RParen, "')'")?;
        Ok(names)
    }

    /// `(a, b)` as column references
    pub(crate) fn parse_parenthesized_columns(&mut self) -> PResult<Vec<ColumnReferenceExpression>> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut columns = Vec::new();
        loop {
            columns.push(ColumnReferenceExpression::regular(
                self.parse_multi_part_identifier()?,
            ));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(columns)
    }

    /// Optional `(a, b)` column alias list after a derived table alias
    pub(crate) fn parse_optional_column_aliases(&mut self) -> PResult<Vec<Identifier>> {
        if self.at(TokenKind::LParen) && is_identifier_token(self.peek) {
            self.parse_parenthesized_identifiers()
        } else {
            Ok(Vec::new())
        }
    }

    /// A string literal token, decoded
    pub(crate) fn parse_string_literal(&mut self) -> PResult<StringLiteral> {
        match self.current.kind {
            TokenKind::String | TokenKind::NationalString => {
                Ok(StringLiteral::from_lexeme(self.advance().literal))
            }
            _ => Err(self.unexpected("string literal")),
        }
    }

    pub(crate) fn at_string(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::String | TokenKind::NationalString
        )
    }

    /// A name written as an identifier, a string or a number
    pub(crate) fn parse_identifier_or_value(&mut self) -> PResult<IdentifierOrValueExpression> {
        match self.current.kind {
            TokenKind::String | TokenKind::NationalString => {
                let literal = self.parse_string_literal()?;
                Ok(IdentifierOrValueExpression::from_value(
                    literal.value.clone(),
                    literal.into(),
                ))
            }
            TokenKind::Number => {
                let lexeme = self.current.literal;
                let value = self.parse_primary_expression()?;
                Ok(IdentifierOrValueExpression::from_value(lexeme, value))
            }
            _ => Ok(IdentifierOrValueExpression::from_identifier(
                self.parse_identifier()?,
            )),
        }
    }

    pub(crate) fn at_variable(&self) -> bool {
        self.current.is_variable()
    }

    /// `@name`
    pub(crate) fn parse_variable(&mut self) -> PResult<VariableReference> {
        if self.at_variable() {
            Ok(VariableReference::new(self.advance().literal))
        } else {
            Err(self.unexpected("variable"))
        }
    }

    /// A bare word that can serve as an alias here
    pub(crate) fn at_bare_alias(&self) -> bool {
        self.current.kind == TokenKind::Ident
            && !self.current.literal.starts_with('@')
            && !ALIAS_STOP_WORDS.iter().any(|w| self.current.is_word(w))
    }

    /// `[AS] alias` on a table source
    pub(crate) fn parse_table_alias(&mut self) -> PResult<Option<Identifier>> {
        if self.eat(TokenKind::As) {
            return self.parse_identifier().map(Some);
        }
        if self.at_bare_alias() {
            return self.parse_identifier().map(Some);
        }
        Ok(None)
    }

    /// `[AS] alias` on a select element; a string also names the column
    pub(crate) fn parse_column_alias(&mut self) -> PResult<Option<IdentifierOrValueExpression>> {
        let explicit = self.eat(TokenKind::As);
        if self.at_string() {
            let literal = self.parse_string_literal()?;
            return Ok(Some(IdentifierOrValueExpression::from_value(
                literal.value.clone(),
                literal.into(),
            )));
        }
        if explicit || self.at_bare_alias() {
            return Ok(Some(IdentifierOrValueExpression::from_identifier(
                self.parse_identifier()?,
            )));
        }
        Ok(None)
    }

    /// `(expr, ...)` after a name, e.g. function or TVF arguments
    pub(crate) fn parse_parenthesized_expressions(&mut self) -> PResult<Vec<ScalarExpression>> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut values = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                values.push(self.parse_scalar_expression()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsql_ast::QuoteType;
    use tsql_core::ParserOptions;

    fn parser(source: &str) -> Parser<'_> {
        Parser::new(source, ParserOptions::default())
    }

    #[test]
    fn test_schema_object_name_parts() {
        let name = parser("srv.db.dbo.t").parse_schema_object_name().unwrap();
        assert_eq!(name.count, 4);
        assert_eq!(name.server_identifier.as_ref().unwrap().value, "srv");
        assert_eq!(name.base_value(), Some("t"));
    }

    #[test]
    fn test_empty_parts_preserved() {
        let name = parser("db..t").parse_schema_object_name().unwrap();
        assert_eq!(name.count, 3);
        assert_eq!(name.identifiers[1].value, "");
        assert_eq!(name.schema_identifier.unwrap().value, "");

        let name = parser("..t").parse_schema_object_name().unwrap();
        assert_eq!(name.count, 3);
        assert_eq!(name.base_value(), Some("t"));
    }

    #[test]
    fn test_soft_keyword_as_name() {
        let name = parser("dbo.[table].user").parse_schema_object_name().unwrap();
        assert_eq!(name.identifiers[1].quote_type, QuoteType::SquareBracket);
        assert_eq!(name.base_value(), Some("user"));

        let id = parser("KEY").parse_identifier().unwrap();
        assert_eq!(id.value, "KEY");
    }

    #[test]
    fn test_reserved_word_is_not_identifier() {
        assert!(parser("SELECT").parse_identifier().is_err());
        assert!(parser("SELECT").parse_word().is_ok());
    }

    #[test]
    fn test_multi_part_stops_before_star() {
        let mut p = parser("t.*");
        let name = p.parse_multi_part_identifier().unwrap();
        assert_eq!(name.count, 1);
        assert_eq!(p.current.kind, TokenKind::Dot);
    }

    #[test]
    fn test_identifier_or_value() {
        let value = parser("'x'").parse_identifier_or_value().unwrap();
        assert_eq!(value.value, "x");
        assert!(value.identifier.is_none());
        let value = parser("[ix]").parse_identifier_or_value().unwrap();
        assert_eq!(value.identifier.unwrap().value, "ix");
    }

    #[test]
    fn test_alias_stop_words() {
        let mut p = parser("FROM");
        assert_eq!(p.parse_table_alias().unwrap(), None);
        let mut p = parser("AS [from]");
        assert_eq!(p.parse_table_alias().unwrap().unwrap().value, "from");
    }
}
