//! Search conditions
//!
//! `(` is ambiguous between a boolean group and a scalar group. The primary
//! parser returns [`BoolOrScalar::UnfinishedScalar`] when a parenthesized
//! body turned out to be a plain value, so the caller can keep going with
//! the scalar and its comparison.

use super::{PResult, Parser};
use crate::lexer::TokenKind;
use tsql_ast::BooleanExpression;
use tsql_ast::ScalarExpression;
use tsql_ast::boolean::{
    BooleanComparisonType, BooleanIsNullExpression, BooleanNotExpression,
    BooleanParenthesisExpression, BooleanTernaryExpression, BooleanTernaryExpressionType,
    ExistsPredicate, InPredicate, LikePredicate, SubqueryComparisonPredicate,
    SubqueryComparisonPredicateType,
};
use tsql_ast::expr::ScalarSubquery;

pub(crate) enum BoolOrScalar {
    Boolean(BooleanExpression),
    UnfinishedScalar(ScalarExpression),
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_boolean_expression(&mut self) -> PResult<BooleanExpression> {
        let result = self.parse_boolean_or()?;
        self.require_boolean(result)
    }

    fn require_boolean(&self, value: BoolOrScalar) -> PResult<BooleanExpression> {
        match value {
            BoolOrScalar::Boolean(expression) => Ok(expression),
            BoolOrScalar::UnfinishedScalar(_) => Err(self.unexpected("comparison operator")),
        }
    }

    fn parse_boolean_or(&mut self) -> PResult<BoolOrScalar> {
        self.nested(|p| {
            let mut left = p.parse_boolean_and()?;
            while p.at(TokenKind::Or) {
                let first = p.require_boolean(left)?;
                p.advance();
                let right = p.parse_boolean_and()?;
                let second = p.require_boolean(right)?;
                left = BoolOrScalar::Boolean(BooleanExpression::or(first, second));
            }
            Ok(left)
        })
    }

    fn parse_boolean_and(&mut self) -> PResult<BoolOrScalar> {
        let mut left = self.parse_boolean_not()?;
        while self.at(TokenKind::And) {
            let first = self.require_boolean(left)?;
            self.advance();
            let right = self.parse_boolean_not()?;
            let second = self.require_boolean(right)?;
            left = BoolOrScalar::Boolean(BooleanExpression::and(first, second));
        }
        Ok(left)
    }

    fn parse_boolean_not(&mut self) -> PResult<BoolOrScalar> {
        if !self.at(TokenKind::Not) {
            return self.parse_boolean_primary();
        }
        self.advance();
        self.nested(|p| {
            let inner = p.parse_boolean_not()?;
            let expression = p.require_boolean(inner)?;
            Ok(BoolOrScalar::Boolean(
                BooleanNotExpression { expression }.into(),
            ))
        })
    }

    fn parse_boolean_primary(&mut self) -> PResult<BoolOrScalar> {
        if self.at(TokenKind::Exists) {
            self.advance();
            self.expect(TokenKind::LParen, "'('")?;
            let subquery = self.parse_query_expression()?;
            self.expect(TokenKind::RParen, "')'")?;
            return Ok(BoolOrScalar::Boolean(ExistsPredicate { subquery }.into()));
        }

        if self.at(TokenKind::LParen) {
            return self.nested(|p| p.parse_parenthesized_condition());
        }

        let scalar = self.parse_scalar_expression()?;
        self.parse_boolean_tail(scalar)
    }

    fn parse_parenthesized_condition(&mut self) -> PResult<BoolOrScalar> {
        if self.at_subquery_start() {
            let subquery = self.attempt(|p| {
                p.expect(TokenKind::LParen, "'('")?;
                let query = p.parse_query_expression()?;
                p.expect(TokenKind::RParen, "')'")?;
                Ok(query)
            });
            if let Some(query) = subquery {
                let scalar = self.continue_scalar_expression(ScalarSubquery::new(query).into())?;
                return self.parse_boolean_tail(scalar);
            }
        }

        self.expect(TokenKind::LParen, "'('")?;
        let inner = self.parse_boolean_or()?;
        self.expect(TokenKind::RParen, "')'")?;
        match inner {
            BoolOrScalar::Boolean(expression) => Ok(BoolOrScalar::Boolean(
                BooleanParenthesisExpression { expression }.into(),
            )),
            BoolOrScalar::UnfinishedScalar(scalar) => {
                let scalar =
                    self.continue_scalar_expression(ScalarExpression::parenthesized(scalar))?;
                self.parse_boolean_tail(scalar)
            }
        }
    }

    fn comparison_operator(&self) -> Option<BooleanComparisonType> {
        let comparison = match self.current.kind {
            TokenKind::Eq => BooleanComparisonType::Equals,
            TokenKind::Gt => BooleanComparisonType::GreaterThan,
            TokenKind::Lt => BooleanComparisonType::LessThan,
            TokenKind::GtEq => BooleanComparisonType::GreaterThanOrEqualTo,
            TokenKind::LtEq => BooleanComparisonType::LessThanOrEqualTo,
            TokenKind::NotEqBrackets => BooleanComparisonType::NotEqualToBrackets,
            TokenKind::NotEqBang => BooleanComparisonType::NotEqualToExclamation,
            TokenKind::NotLt => BooleanComparisonType::NotLessThan,
            TokenKind::NotGt => BooleanComparisonType::NotGreaterThan,
            _ => return None,
        };
        Some(comparison)
    }

    /// Predicates that follow a scalar: comparisons, IS NULL, IN, LIKE, BETWEEN
    fn parse_boolean_tail(&mut self, scalar: ScalarExpression) -> PResult<BoolOrScalar> {
        if let Some(comparison_type) = self.comparison_operator() {
            self.advance();
            let quantifier = match self.current.kind {
                TokenKind::All => Some(SubqueryComparisonPredicateType::All),
                TokenKind::Any => Some(SubqueryComparisonPredicateType::Any),
                TokenKind::Some => Some(SubqueryComparisonPredicateType::Some),
                _ => None,
            };
            if let Some(predicate_type) = quantifier {
                self.advance();
                self.expect(TokenKind::LParen, "'('")?;
                let subquery = self.parse_query_expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                return Ok(BoolOrScalar::Boolean(
                    SubqueryComparisonPredicate {
                        expression: scalar,
                        comparison_type,
                        subquery_comparison_predicate_type: predicate_type,
                        subquery,
                    }
                    .into(),
                ));
            }
            let second = self.parse_scalar_expression()?;
            return Ok(BoolOrScalar::Boolean(BooleanExpression::compare(
                comparison_type,
                scalar,
                second,
            )));
        }

        if self.eat(TokenKind::Is) {
            let is_not = self.eat(TokenKind::Not);
            self.expect(TokenKind::Null, "NULL")?;
            return Ok(BoolOrScalar::Boolean(
                BooleanIsNullExpression {
                    is_not,
                    expression: scalar,
                }
                .into(),
            ));
        }

        let not_defined = self.at(TokenKind::Not)
            && matches!(
                self.peek.kind,
                TokenKind::In | TokenKind::Like | TokenKind::Between
            );
        if not_defined {
            self.advance();
        }

        let predicate: BooleanExpression = match self.current.kind {
            TokenKind::In => {
                self.advance();
                let (values, subquery) = if self.at_subquery_start() {
                    self.expect(TokenKind::LParen, "'('")?;
                    let query = self.parse_query_expression()?;
                    self.expect(TokenKind::RParen, "')'")?;
                    (Vec::new(), Some(query))
                } else {
                    (self.parse_parenthesized_expressions()?, None)
                };
                InPredicate {
                    expression: scalar,
                    not_defined,
                    values,
                    subquery,
                }
                .into()
            }
            TokenKind::Like => {
                self.advance();
                let second_expression = self.parse_scalar_expression()?;
                let escape_expression = if self.eat(TokenKind::Escape) {
                    Some(self.parse_scalar_expression()?)
                } else {
                    None
                };
                LikePredicate {
                    first_expression: scalar,
                    second_expression,
                    not_defined,
                    escape_expression,
                }
                .into()
            }
            TokenKind::Between => {
                self.advance();
                let second_expression = self.parse_scalar_expression()?;
                self.expect(TokenKind::And, "AND")?;
                let third_expression = self.parse_scalar_expression()?;
                BooleanTernaryExpression {
                    ternary_expression_type: if not_defined {
                        BooleanTernaryExpressionType::NotBetween
                    } else {
                        BooleanTernaryExpressionType::Between
                    },
                    first_expression: scalar,
                    second_expression,
                    third_expression,
                }
                .into()
            }
            _ => return Ok(BoolOrScalar::UnfinishedScalar(scalar)),
        };
        Ok(BoolOrScalar::Boolean(predicate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tsql_core::ParserOptions;

    fn condition(source: &str) -> Value {
        let mut parser = Parser::new(source, ParserOptions::default());
        let expression = parser.parse_boolean_expression().unwrap();
        assert_eq!(parser.current.kind, TokenKind::Eof, "unparsed tail in {source}");
        serde_json::to_value(expression).unwrap()
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let value = condition("a = 1 OR b = 2 AND c = 3");
        assert_eq!(value["BinaryExpressionType"], "Or");
        assert_eq!(value["SecondExpression"]["BinaryExpressionType"], "And");
    }

    #[test]
    fn test_parenthesized_boolean() {
        let value = condition("(a = 1 OR b = 2) AND c = 3");
        assert_eq!(value["BinaryExpressionType"], "And");
        assert_eq!(value["FirstExpression"]["$type"], "BooleanParenthesisExpression");
    }

    #[test]
    fn test_parenthesized_scalar_continues() {
        let value = condition("(a + 1) * 2 > 5");
        assert_eq!(value["$type"], "BooleanComparisonExpression");
        assert_eq!(value["FirstExpression"]["BinaryExpressionType"], "Multiply");
        assert_eq!(
            value["FirstExpression"]["FirstExpression"]["$type"],
            "ParenthesisExpression"
        );
    }

    #[test]
    fn test_predicates() {
        assert_eq!(condition("a IS NOT NULL")["IsNot"], true);
        let value = condition("a NOT IN (1, 2)");
        assert_eq!(value["$type"], "InPredicate");
        assert_eq!(value["NotDefined"], true);
        assert_eq!(value["Values"].as_array().unwrap().len(), 2);

        let value = condition("a IN (SELECT id FROM t)");
        assert_eq!(value["Subquery"]["$type"], "QuerySpecification");

        let value = condition("name LIKE 'a%' ESCAPE '!'");
        assert_eq!(value["EscapeExpression"]["Value"], "!");

        let value = condition("a NOT BETWEEN 1 AND 5");
        assert_eq!(value["TernaryExpressionType"], "NotBetween");
    }

    #[test]
    fn test_between_inside_and() {
        let value = condition("a BETWEEN 1 AND 5 AND b = 2");
        assert_eq!(value["BinaryExpressionType"], "And");
        assert_eq!(value["FirstExpression"]["$type"], "BooleanTernaryExpression");
    }

    #[test]
    fn test_exists_and_quantified() {
        assert_eq!(condition("NOT EXISTS (SELECT 1)")["Expression"]["$type"], "ExistsPredicate");
        let value = condition("a > ALL (SELECT b FROM t)");
        assert_eq!(value["$type"], "SubqueryComparisonPredicate");
        assert_eq!(value["SubqueryComparisonPredicateType"], "All");
    }

    #[test]
    fn test_subquery_compared() {
        let value = condition("(SELECT COUNT(*) FROM t) > 0");
        assert_eq!(value["FirstExpression"]["$type"], "ScalarSubquery");
    }

    #[test]
    fn test_bare_scalar_is_error() {
        let mut parser = Parser::new("a + 1", ParserOptions::default());
        let err = parser.parse_boolean_expression().unwrap_err();
        assert!(err.message.contains("comparison"));

        let mut parser = Parser::new("a AND b = 1", ParserOptions::default());
        assert!(parser.parse_boolean_expression().is_err());
    }
}
