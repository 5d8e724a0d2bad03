//! Query expressions and their clauses

use crate::boolean::BooleanExpression;
use crate::expr::{ScalarExpression, UniqueRowFilter, VariableReference};
use crate::literal::StringLiteral;
use crate::names::{Identifier, IdentifierOrValueExpression, MultiPartIdentifier};
use crate::table::TableReference;
use serde::Serialize;

node_enum! {
    pub enum QueryExpression {
        QuerySpecification,
        BinaryQueryExpression,
        QueryParenthesisExpression,
    }
}

impl QueryExpression {
    /// Attach the clauses that may only follow a complete query expression.
    pub fn set_trailing_clauses(
        &mut self,
        order_by: Option<OrderByClause>,
        offset: Option<OffsetClause>,
        for_clause: Option<ForClause>,
    ) {
        let (o, f, x) = match self {
            QueryExpression::QuerySpecification(q) => {
                (&mut q.order_by_clause, &mut q.offset_clause, &mut q.for_clause)
            }
            QueryExpression::BinaryQueryExpression(q) => {
                (&mut q.order_by_clause, &mut q.offset_clause, &mut q.for_clause)
            }
            QueryExpression::QueryParenthesisExpression(q) => {
                (&mut q.order_by_clause, &mut q.offset_clause, &mut q.for_clause)
            }
        };
        if order_by.is_some() {
            *o = order_by;
        }
        if offset.is_some() {
            *f = offset;
        }
        if for_clause.is_some() {
            *x = for_clause;
        }
    }

    pub fn order_by_clause(&self) -> Option<&OrderByClause> {
        match self {
            QueryExpression::QuerySpecification(q) => q.order_by_clause.as_ref(),
            QueryExpression::BinaryQueryExpression(q) => q.order_by_clause.as_ref(),
            QueryExpression::QueryParenthesisExpression(q) => q.order_by_clause.as_ref(),
        }
    }
}

/// The body of a single `SELECT`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct QuerySpecification {
    pub unique_row_filter: UniqueRowFilter,
    pub top_row_filter: Option<TopRowFilter>,
    pub select_elements: Vec<SelectElement>,
    pub from_clause: Option<FromClause>,
    pub where_clause: Option<WhereClause>,
    pub group_by_clause: Option<GroupByClause>,
    pub having_clause: Option<HavingClause>,
    pub order_by_clause: Option<OrderByClause>,
    pub offset_clause: Option<OffsetClause>,
    pub for_clause: Option<ForClause>,
}

impl Default for QuerySpecification {
    fn default() -> Self {
        Self {
            unique_row_filter: UniqueRowFilter::NotSpecified,
            top_row_filter: None,
            select_elements: Vec::new(),
            from_clause: None,
            where_clause: None,
            group_by_clause: None,
            having_clause: None,
            order_by_clause: None,
            offset_clause: None,
            for_clause: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryQueryExpressionType {
    Union,
    Except,
    Intersect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct BinaryQueryExpression {
    pub binary_query_expression_type: BinaryQueryExpressionType,
    pub all: bool,
    pub first_query_expression: QueryExpression,
    pub second_query_expression: QueryExpression,
    pub order_by_clause: Option<OrderByClause>,
    pub offset_clause: Option<OffsetClause>,
    pub for_clause: Option<ForClause>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct QueryParenthesisExpression {
    pub query_expression: QueryExpression,
    pub order_by_clause: Option<OrderByClause>,
    pub offset_clause: Option<OffsetClause>,
    pub for_clause: Option<ForClause>,
}

/// `TOP (n) [PERCENT] [WITH TIES]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct TopRowFilter {
    pub expression: ScalarExpression,
    pub percent: bool,
    pub with_ties: bool,
}

node_enum! {
    pub enum SelectElement {
        SelectStarExpression,
        SelectScalarExpression,
        SelectSetVariable,
    }
}

/// `*` or `qualifier.*`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SelectStarExpression {
    pub qualifier: Option<MultiPartIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SelectScalarExpression {
    pub expression: ScalarExpression,
    pub column_name: Option<IdentifierOrValueExpression>,
}

/// Assignment operators shared by `SET @v`, `SELECT @v =` and `UPDATE ... SET`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentKind {
    Equals,
    AddEquals,
    SubtractEquals,
    MultiplyEquals,
    DivideEquals,
    ModEquals,
    BitwiseAndEquals,
    BitwiseOrEquals,
    BitwiseXorEquals,
}

/// `SELECT @v = expr`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SelectSetVariable {
    pub variable: VariableReference,
    pub expression: ScalarExpression,
    pub assignment_kind: AssignmentKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct FromClause {
    pub table_references: Vec<TableReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct WhereClause {
    pub search_condition: Option<BooleanExpression>,
    /// `WHERE CURRENT OF cursor` in positioned UPDATE / DELETE
    pub cursor: Option<Identifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupByOption {
    None,
    Cube,
    Rollup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct GroupByClause {
    pub all: bool,
    pub group_by_option: GroupByOption,
    pub grouping_specifications: Vec<GroupingSpecification>,
}

node_enum! {
    pub enum GroupingSpecification {
        ExpressionGroupingSpecification,
        CompositeGroupingSpecification,
        RollupGroupingSpecification,
        CubeGroupingSpecification,
        GroupingSetsGroupingSpecification,
        GrandTotalGroupingSpecification,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ExpressionGroupingSpecification {
    pub expression: ScalarExpression,
}

/// A parenthesized column list inside ROLLUP / CUBE / GROUPING SETS
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CompositeGroupingSpecification {
    pub items: Vec<GroupingSpecification>,
}

same_shape_nodes! {
    {
        pub arguments: Vec<GroupingSpecification>,
    } =>
    RollupGroupingSpecification,
    CubeGroupingSpecification,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct GroupingSetsGroupingSpecification {
    pub sets: Vec<GroupingSpecification>,
}

/// `()` inside GROUPING SETS
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type")]
pub struct GrandTotalGroupingSpecification {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct HavingClause {
    pub search_condition: BooleanExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct OrderByClause {
    pub order_by_elements: Vec<ExpressionWithSortOrder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    NotSpecified,
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ExpressionWithSortOrder {
    pub expression: ScalarExpression,
    pub sort_order: SortOrder,
}

/// `OFFSET n ROWS [FETCH FIRST|NEXT m ROWS ONLY]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct OffsetClause {
    pub offset_expression: ScalarExpression,
    pub fetch_expression: Option<ScalarExpression>,
}

node_enum! {
    pub enum ForClause {
        BrowseForClause,
        XmlForClause,
        JsonForClause,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type")]
pub struct BrowseForClause {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum XmlForClauseOptions {
    Raw,
    Auto,
    Explicit,
    Path,
    Elements,
    ElementsXsiNil,
    ElementsAbsent,
    Type,
    XmlData,
    XmlSchema,
    BinaryBase64,
    Root,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct XmlForClauseOption {
    pub option_kind: XmlForClauseOptions,
    pub value: Option<StringLiteral>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct XmlForClause {
    pub options: Vec<XmlForClauseOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JsonForClauseOptions {
    Auto,
    Path,
    Root,
    IncludeNullValues,
    WithoutArrayWrapper,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct JsonForClauseOption {
    pub option_kind: JsonForClauseOptions,
    pub value: Option<StringLiteral>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct JsonForClause {
    pub options: Vec<JsonForClauseOption>,
}

/// The `WITH` prefix of a statement: optional XML namespaces, then CTEs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct WithCtesAndXmlNamespaces {
    pub xml_namespaces: Option<XmlNamespaces>,
    pub common_table_expressions: Vec<CommonTableExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CommonTableExpression {
    pub expression_name: Identifier,
    pub columns: Vec<Identifier>,
    pub query_expression: QueryExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct XmlNamespaces {
    pub xml_namespaces_elements: Vec<XmlNamespacesElement>,
}

/// `'uri' AS prefix`, or `DEFAULT 'uri'` when `identifier` is absent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct XmlNamespacesElement {
    pub identifier: Option<Identifier>,
    pub string: StringLiteral,
}

node_enum! {
    /// An entry of an `OPTION (...)` clause
    pub enum OptimizerHint {
        GeneralOptimizerHint,
        LiteralOptimizerHint,
        OptimizeForOptimizerHint,
        UseHintList,
    }
}

/// A hint that is just a keyword sequence (`RECOMPILE`, `HASH JOIN`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename = "OptimizerHint", rename_all = "PascalCase")]
pub struct GeneralOptimizerHint {
    pub hint_kind: String,
}

/// `MAXDOP 4`, `FAST 10`, `MAXRECURSION 0`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct LiteralOptimizerHint {
    pub hint_kind: String,
    pub value: ScalarExpression,
}

/// `OPTIMIZE FOR (@p = v, @q UNKNOWN)` or `OPTIMIZE FOR UNKNOWN`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct OptimizeForOptimizerHint {
    pub hint_kind: String,
    pub pairs: Vec<VariableValuePair>,
    pub is_for_unknown: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct VariableValuePair {
    pub variable: VariableReference,
    pub value: Option<ScalarExpression>,
    pub is_for_unknown: bool,
}

/// `USE HINT ('name', ...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct UseHintList {
    pub hint_kind: String,
    pub hints: Vec<StringLiteral>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::IntegerLiteral;

    fn spec_with_one() -> QuerySpecification {
        QuerySpecification {
            select_elements: vec![
                SelectScalarExpression {
                    expression: IntegerLiteral::new("1").into(),
                    column_name: None,
                }
                .into(),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_trailing_clauses_attach_to_outer_node() {
        let mut query: QueryExpression = BinaryQueryExpression {
            binary_query_expression_type: BinaryQueryExpressionType::Union,
            all: true,
            first_query_expression: spec_with_one().into(),
            second_query_expression: spec_with_one().into(),
            order_by_clause: None,
            offset_clause: None,
            for_clause: None,
        }
        .into();
        let order_by = OrderByClause {
            order_by_elements: vec![ExpressionWithSortOrder {
                expression: IntegerLiteral::new("1").into(),
                sort_order: SortOrder::Descending,
            }],
        };
        query.set_trailing_clauses(Some(order_by), None, None);
        assert!(query.order_by_clause().is_some());
        let QueryExpression::BinaryQueryExpression(binary) = &query else {
            panic!("expected a binary query");
        };
        assert!(binary.first_query_expression.order_by_clause().is_none());
    }

    #[test]
    fn test_renamed_hint_tag() {
        let hint: OptimizerHint = GeneralOptimizerHint {
            hint_kind: "Recompile".to_string(),
        }
        .into();
        let json = serde_json::to_value(&hint).unwrap();
        assert_eq!(json["$type"], "OptimizerHint");
        assert_eq!(json["HintKind"], "Recompile");
    }

    #[test]
    fn test_empty_marker_nodes_carry_type() {
        let json = serde_json::to_value(BrowseForClause {}).unwrap();
        assert_eq!(json, serde_json::json!({"$type": "BrowseForClause"}));
    }
}
