//! SELECT, INSERT, UPDATE, DELETE and TRUNCATE

use crate::expr::{ColumnReferenceExpression, FunctionCall, ScalarExpression, VariableReference};
use crate::names::{Identifier, SchemaObjectName};
use crate::options::CompressionPartitionRange;
use crate::procedural::ExecuteSpecification;
use crate::query::{
    AssignmentKind, FromClause, OptimizerHint, QueryExpression, SelectElement, TopRowFilter,
    WhereClause, WithCtesAndXmlNamespaces,
};
use crate::table::{RowValue, TableReference};
use serde::Serialize;

/// A query used as a statement, with the statement-level clauses around it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SelectStatement {
    pub query_expression: QueryExpression,
    pub into: Option<SchemaObjectName>,
    pub on: Option<Identifier>,
    pub with_ctes_and_xml_namespaces: Option<WithCtesAndXmlNamespaces>,
    pub optimizer_hints: Vec<OptimizerHint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct OutputClause {
    pub select_columns: Vec<SelectElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct OutputIntoClause {
    pub select_columns: Vec<SelectElement>,
    pub into_table: TableReference,
    pub into_table_columns: Vec<ColumnReferenceExpression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InsertOption {
    None,
    Into,
}

node_enum! {
    pub enum InsertSource {
        ValuesInsertSource,
        SelectInsertSource,
        ExecuteInsertSource,
    }
}

/// `VALUES (...), (...)` or `DEFAULT VALUES`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ValuesInsertSource {
    pub is_default_values: bool,
    pub row_values: Vec<RowValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SelectInsertSource {
    pub select: QueryExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ExecuteInsertSource {
    pub execute: ExecuteSpecification,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct InsertStatement {
    pub with_ctes_and_xml_namespaces: Option<WithCtesAndXmlNamespaces>,
    pub top_row_filter: Option<TopRowFilter>,
    pub insert_option: InsertOption,
    pub target: TableReference,
    pub columns: Vec<ColumnReferenceExpression>,
    pub output_clause: Option<OutputClause>,
    pub output_into_clause: Option<OutputIntoClause>,
    pub insert_source: InsertSource,
    pub optimizer_hints: Vec<OptimizerHint>,
}

node_enum! {
    pub enum SetClause {
        AssignmentSetClause,
        FunctionCallSetClause,
    }
}

/// `col = expr`, `@v = col = expr`, `col += expr`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AssignmentSetClause {
    pub variable: Option<VariableReference>,
    pub column: Option<ColumnReferenceExpression>,
    pub new_value: Option<ScalarExpression>,
    pub assignment_kind: AssignmentKind,
}

/// `col.WRITE(expr, offset, length)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct FunctionCallSetClause {
    pub mutator_function: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct UpdateStatement {
    pub with_ctes_and_xml_namespaces: Option<WithCtesAndXmlNamespaces>,
    pub top_row_filter: Option<TopRowFilter>,
    pub target: TableReference,
    pub set_clauses: Vec<SetClause>,
    pub output_clause: Option<OutputClause>,
    pub output_into_clause: Option<OutputIntoClause>,
    pub from_clause: Option<FromClause>,
    pub where_clause: Option<WhereClause>,
    pub optimizer_hints: Vec<OptimizerHint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DeleteStatement {
    pub with_ctes_and_xml_namespaces: Option<WithCtesAndXmlNamespaces>,
    pub top_row_filter: Option<TopRowFilter>,
    pub target: TableReference,
    pub output_clause: Option<OutputClause>,
    pub output_into_clause: Option<OutputIntoClause>,
    pub from_clause: Option<FromClause>,
    pub where_clause: Option<WhereClause>,
    pub optimizer_hints: Vec<OptimizerHint>,
}

/// `TRUNCATE TABLE t [WITH (PARTITIONS (1, 2 TO 4))]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct TruncateTableStatement {
    pub table_name: SchemaObjectName,
    pub partition_ranges: Vec<CompressionPartitionRange>,
}
