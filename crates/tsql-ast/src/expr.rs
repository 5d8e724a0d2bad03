//! Scalar expressions

use crate::boolean::BooleanExpression;
use crate::literal::{
    BinaryLiteral, DefaultLiteral, IdentifierLiteral, IntegerLiteral, MaxLiteral, MoneyLiteral,
    NullLiteral, NumericLiteral, OdbcLiteral, RealLiteral, StringLiteral,
};
use crate::names::{Identifier, MultiPartIdentifier, SchemaObjectName};
use crate::query::{OrderByClause, QueryExpression};
use crate::types::DataTypeReference;
use serde::Serialize;

node_enum! {
    /// Any expression producing a scalar value
    pub enum ScalarExpression {
        IntegerLiteral,
        NumericLiteral,
        RealLiteral,
        MoneyLiteral,
        StringLiteral,
        BinaryLiteral,
        NullLiteral,
        DefaultLiteral,
        MaxLiteral,
        OdbcLiteral,
        IdentifierLiteral,
        VariableReference,
        GlobalVariableExpression,
        ColumnReferenceExpression,
        UnaryExpression,
        BinaryExpression,
        ParenthesisExpression,
        ScalarSubquery,
        SimpleCaseExpression,
        SearchedCaseExpression,
        FunctionCall,
        CastCall,
        TryCastCall,
        ConvertCall,
        TryConvertCall,
        IdentityFunctionCall,
        CoalesceExpression,
        NullIfExpression,
        IIfCall,
        ParameterlessCall,
        LeftFunctionCall,
        RightFunctionCall,
        UserDefinedTypePropertyAccess,
        NextValueForExpression,
        AtTimeZoneCall,
    }
}

impl ScalarExpression {
    /// Attach a `COLLATE` clause. Returns the collation back when this kind
    /// of expression cannot carry one.
    pub fn set_collation(&mut self, collation: Identifier) -> Result<(), Identifier> {
        let slot = match self {
            ScalarExpression::StringLiteral(e) => &mut e.collation,
            ScalarExpression::VariableReference(e) => &mut e.collation,
            ScalarExpression::GlobalVariableExpression(e) => &mut e.collation,
            ScalarExpression::ColumnReferenceExpression(e) => &mut e.collation,
            ScalarExpression::ParenthesisExpression(e) => &mut e.collation,
            ScalarExpression::ScalarSubquery(e) => &mut e.collation,
            ScalarExpression::SimpleCaseExpression(e) => &mut e.collation,
            ScalarExpression::SearchedCaseExpression(e) => &mut e.collation,
            ScalarExpression::FunctionCall(e) => &mut e.collation,
            ScalarExpression::CastCall(e) => &mut e.collation,
            ScalarExpression::TryCastCall(e) => &mut e.collation,
            ScalarExpression::ConvertCall(e) => &mut e.collation,
            ScalarExpression::TryConvertCall(e) => &mut e.collation,
            ScalarExpression::CoalesceExpression(e) => &mut e.collation,
            ScalarExpression::NullIfExpression(e) => &mut e.collation,
            ScalarExpression::IIfCall(e) => &mut e.collation,
            ScalarExpression::ParameterlessCall(e) => &mut e.collation,
            ScalarExpression::LeftFunctionCall(e) => &mut e.collation,
            ScalarExpression::RightFunctionCall(e) => &mut e.collation,
            ScalarExpression::UserDefinedTypePropertyAccess(e) => &mut e.collation,
            _ => return Err(collation),
        };
        *slot = Some(collation);
        Ok(())
    }

    /// The column reference behind this expression, if it is one
    pub fn as_column_reference(&self) -> Option<&ColumnReferenceExpression> {
        match self {
            ScalarExpression::ColumnReferenceExpression(c) => Some(c),
            _ => None,
        }
    }

    pub fn parenthesized(expression: ScalarExpression) -> Self {
        ParenthesisExpression {
            expression,
            collation: None,
        }
        .into()
    }
}

/// `@name`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct VariableReference {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
}

impl VariableReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collation: None,
        }
    }
}

/// `@@name`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct GlobalVariableExpression {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Regular,
    Wildcard,
    IdentityCol,
    RowGuidCol,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ColumnReferenceExpression {
    pub column_type: ColumnType,
    pub multi_part_identifier: Option<MultiPartIdentifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
}

impl ColumnReferenceExpression {
    pub fn regular(name: MultiPartIdentifier) -> Self {
        Self {
            column_type: ColumnType::Regular,
            multi_part_identifier: Some(name),
            collation: None,
        }
    }

    pub fn wildcard(qualifier: Option<MultiPartIdentifier>) -> Self {
        Self {
            column_type: ColumnType::Wildcard,
            multi_part_identifier: qualifier,
            collation: None,
        }
    }

    pub fn single(identifier: Identifier) -> Self {
        Self::regular(MultiPartIdentifier::new(vec![identifier]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryExpressionType {
    Positive,
    Negative,
    BitwiseNot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct UnaryExpression {
    pub unary_expression_type: UnaryExpressionType,
    pub expression: ScalarExpression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryExpressionType {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Concat,
    LeftShift,
    RightShift,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct BinaryExpression {
    pub binary_expression_type: BinaryExpressionType,
    pub first_expression: ScalarExpression,
    pub second_expression: ScalarExpression,
}

impl BinaryExpression {
    pub fn new(
        binary_expression_type: BinaryExpressionType,
        first_expression: ScalarExpression,
        second_expression: ScalarExpression,
    ) -> Self {
        Self {
            binary_expression_type,
            first_expression,
            second_expression,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ParenthesisExpression {
    pub expression: ScalarExpression,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
}

/// A parenthesized query used as a value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ScalarSubquery {
    pub query_expression: QueryExpression,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
}

impl ScalarSubquery {
    pub fn new(query_expression: QueryExpression) -> Self {
        Self {
            query_expression,
            collation: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SimpleWhenClause {
    pub when_expression: ScalarExpression,
    pub then_expression: ScalarExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SearchedWhenClause {
    pub when_expression: BooleanExpression,
    pub then_expression: ScalarExpression,
}

/// `CASE input WHEN value THEN result ... [ELSE result] END`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SimpleCaseExpression {
    pub input_expression: ScalarExpression,
    pub when_clauses: Vec<SimpleWhenClause>,
    pub else_expression: Option<ScalarExpression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
}

/// `CASE WHEN condition THEN result ... [ELSE result] END`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SearchedCaseExpression {
    pub when_clauses: Vec<SearchedWhenClause>,
    pub else_expression: Option<ScalarExpression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
}

/// `ALL` / `DISTINCT` inside aggregate calls and SELECT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UniqueRowFilter {
    NotSpecified,
    All,
    Distinct,
}

node_enum! {
    /// What a function or property is invoked on
    pub enum CallTarget {
        MultiPartIdentifierCallTarget,
        ExpressionCallTarget,
        UserDefinedTypeCallTarget,
    }
}

/// `dbo.fn(...)`, `db.dbo.fn(...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct MultiPartIdentifierCallTarget {
    pub multi_part_identifier: MultiPartIdentifier,
}

/// `expr.method(...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ExpressionCallTarget {
    pub expression: ScalarExpression,
}

/// `type::member`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct UserDefinedTypeCallTarget {
    pub schema_object_name: SchemaObjectName,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct FunctionCall {
    pub call_target: Option<CallTarget>,
    pub function_name: Identifier,
    pub parameters: Vec<ScalarExpression>,
    pub unique_row_filter: UniqueRowFilter,
    pub within_group_clause: Option<WithinGroupClause>,
    pub over_clause: Option<OverClause>,
    /// `IGNORE NULLS` / `RESPECT NULLS`, kept as the two words written
    pub ignore_respect_nulls: Vec<Identifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
}

impl FunctionCall {
    pub fn new(function_name: Identifier, parameters: Vec<ScalarExpression>) -> Self {
        Self {
            call_target: None,
            function_name,
            parameters,
            unique_row_filter: UniqueRowFilter::NotSpecified,
            within_group_clause: None,
            over_clause: None,
            ignore_respect_nulls: Vec::new(),
            collation: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct WithinGroupClause {
    pub order_by_clause: OrderByClause,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct OverClause {
    pub window_name: Option<Identifier>,
    pub partitions: Vec<ScalarExpression>,
    pub order_by_clause: Option<OrderByClause>,
    pub window_frame_clause: Option<WindowFrameClause>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WindowFrameType {
    Rows,
    Range,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct WindowFrameClause {
    pub window_frame_type: WindowFrameType,
    pub top: WindowDelimiter,
    pub bottom: Option<WindowDelimiter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WindowDelimiterType {
    UnboundedPreceding,
    ValuePreceding,
    CurrentRow,
    ValueFollowing,
    UnboundedFollowing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct WindowDelimiter {
    pub window_delimiter_type: WindowDelimiterType,
    pub offset_value: Option<ScalarExpression>,
}

same_shape_nodes! {
    {
        pub data_type: DataTypeReference,
        pub parameter: ScalarExpression,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub collation: Option<Identifier>,
    } =>
    /// `CAST(expr AS type)`
    CastCall,
    /// `TRY_CAST(expr AS type)`
    TryCastCall,
}

same_shape_nodes! {
    {
        pub data_type: DataTypeReference,
        pub parameter: ScalarExpression,
        pub style: Option<ScalarExpression>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub collation: Option<Identifier>,
    } =>
    /// `CONVERT(type, expr [, style])`
    ConvertCall,
    /// `TRY_CONVERT(type, expr [, style])`
    TryConvertCall,
}

/// `IDENTITY(type [, seed, increment])` inside SELECT ... INTO
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct IdentityFunctionCall {
    pub data_type: DataTypeReference,
    pub seed: Option<ScalarExpression>,
    pub increment: Option<ScalarExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CoalesceExpression {
    pub expressions: Vec<ScalarExpression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct NullIfExpression {
    pub first_expression: ScalarExpression,
    pub second_expression: ScalarExpression,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct IIfCall {
    pub predicate: BooleanExpression,
    pub then_expression: ScalarExpression,
    pub else_expression: ScalarExpression,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParameterlessCallType {
    User,
    CurrentUser,
    SessionUser,
    SystemUser,
    CurrentTimestamp,
}

/// Niladic built-ins written without parentheses (`CURRENT_TIMESTAMP`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ParameterlessCall {
    pub parameterless_call_type: ParameterlessCallType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
}

same_shape_nodes! {
    {
        pub parameters: Vec<ScalarExpression>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub collation: Option<Identifier>,
    } =>
    /// `LEFT(str, n)`; LEFT is reserved, so it gets its own node
    LeftFunctionCall,
    /// `RIGHT(str, n)`
    RightFunctionCall,
}

/// `type::property` or `expr.property`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct UserDefinedTypePropertyAccess {
    pub call_target: Option<CallTarget>,
    pub property_name: Identifier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
}

/// `NEXT VALUE FOR sequence [OVER (...)]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct NextValueForExpression {
    pub sequence_name: SchemaObjectName,
    pub over_clause: Option<OverClause>,
}

/// `expr AT TIME ZONE zone`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AtTimeZoneCall {
    pub date_value: ScalarExpression,
    pub time_zone: ScalarExpression,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_expression_json_shape() {
        let expr: ScalarExpression = BinaryExpression::new(
            BinaryExpressionType::Add,
            IntegerLiteral::new("1").into(),
            IntegerLiteral::new("2").into(),
        )
        .into();
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(json["$type"], "BinaryExpression");
        assert_eq!(json["BinaryExpressionType"], "Add");
        assert_eq!(json["FirstExpression"]["Value"], "1");
        assert_eq!(expr.kind(), "BinaryExpression");
    }

    #[test]
    fn test_collation_rejected_on_numeric_literal() {
        let mut expr: ScalarExpression = IntegerLiteral::new("1").into();
        assert!(expr.set_collation(Identifier::new("Latin1_General_CI_AS")).is_err());
    }

    #[test]
    fn test_collation_attaches_to_column() {
        let mut expr: ScalarExpression =
            ColumnReferenceExpression::single(Identifier::new("name")).into();
        expr.set_collation(Identifier::new("Latin1_General_CI_AS")).unwrap();
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(json["Collation"]["Value"], "Latin1_General_CI_AS");
    }
}
