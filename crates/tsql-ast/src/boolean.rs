//! Search conditions

use crate::expr::ScalarExpression;
use crate::query::QueryExpression;
use serde::Serialize;

node_enum! {
    /// Any expression producing a truth value
    pub enum BooleanExpression {
        BooleanBinaryExpression,
        BooleanComparisonExpression,
        BooleanNotExpression,
        BooleanIsNullExpression,
        InPredicate,
        LikePredicate,
        BooleanTernaryExpression,
        BooleanParenthesisExpression,
        ExistsPredicate,
        SubqueryComparisonPredicate,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BooleanBinaryExpressionType {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct BooleanBinaryExpression {
    pub binary_expression_type: BooleanBinaryExpressionType,
    pub first_expression: BooleanExpression,
    pub second_expression: BooleanExpression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BooleanComparisonType {
    Equals,
    GreaterThan,
    LessThan,
    GreaterThanOrEqualTo,
    LessThanOrEqualTo,
    NotEqualToBrackets,
    NotEqualToExclamation,
    NotLessThan,
    NotGreaterThan,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct BooleanComparisonExpression {
    pub comparison_type: BooleanComparisonType,
    pub first_expression: ScalarExpression,
    pub second_expression: ScalarExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct BooleanNotExpression {
    pub expression: BooleanExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct BooleanIsNullExpression {
    pub is_not: bool,
    pub expression: ScalarExpression,
}

/// `expr [NOT] IN (values...)` or `expr [NOT] IN (subquery)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct InPredicate {
    pub expression: ScalarExpression,
    pub not_defined: bool,
    pub values: Vec<ScalarExpression>,
    pub subquery: Option<QueryExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct LikePredicate {
    pub first_expression: ScalarExpression,
    pub second_expression: ScalarExpression,
    pub not_defined: bool,
    pub escape_expression: Option<ScalarExpression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BooleanTernaryExpressionType {
    Between,
    NotBetween,
}

/// `first [NOT] BETWEEN second AND third`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct BooleanTernaryExpression {
    pub ternary_expression_type: BooleanTernaryExpressionType,
    pub first_expression: ScalarExpression,
    pub second_expression: ScalarExpression,
    pub third_expression: ScalarExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct BooleanParenthesisExpression {
    pub expression: BooleanExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ExistsPredicate {
    pub subquery: QueryExpression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubqueryComparisonPredicateType {
    All,
    Any,
    Some,
}

/// `expr op ALL|ANY|SOME (subquery)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SubqueryComparisonPredicate {
    pub expression: ScalarExpression,
    pub comparison_type: BooleanComparisonType,
    pub subquery_comparison_predicate_type: SubqueryComparisonPredicateType,
    pub subquery: QueryExpression,
}

impl BooleanExpression {
    pub fn and(first: BooleanExpression, second: BooleanExpression) -> Self {
        BooleanBinaryExpression {
            binary_expression_type: BooleanBinaryExpressionType::And,
            first_expression: first,
            second_expression: second,
        }
        .into()
    }

    pub fn or(first: BooleanExpression, second: BooleanExpression) -> Self {
        BooleanBinaryExpression {
            binary_expression_type: BooleanBinaryExpressionType::Or,
            first_expression: first,
            second_expression: second,
        }
        .into()
    }

    pub fn compare(
        comparison_type: BooleanComparisonType,
        first: ScalarExpression,
        second: ScalarExpression,
    ) -> Self {
        BooleanComparisonExpression {
            comparison_type,
            first_expression: first,
            second_expression: second,
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ColumnReferenceExpression;
    use crate::literal::IntegerLiteral;
    use crate::names::Identifier;

    #[test]
    fn test_comparison_json_shape() {
        let cond = BooleanExpression::compare(
            BooleanComparisonType::Equals,
            ColumnReferenceExpression::single(Identifier::new("id")).into(),
            IntegerLiteral::new("1").into(),
        );
        let json = serde_json::to_value(&cond).unwrap();
        assert_eq!(json["$type"], "BooleanComparisonExpression");
        assert_eq!(json["ComparisonType"], "Equals");
        assert_eq!(json["SecondExpression"]["$type"], "IntegerLiteral");
    }

    #[test]
    fn test_ternary_type_names() {
        let json = serde_json::to_value(BooleanTernaryExpressionType::NotBetween).unwrap();
        assert_eq!(json, "NotBetween");
    }
}
