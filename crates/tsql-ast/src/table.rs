//! Table sources in FROM clauses and DML targets

use crate::boolean::BooleanExpression;
use crate::expr::{ColumnReferenceExpression, ScalarExpression, VariableReference};
use crate::literal::StringLiteral;
use crate::names::{Identifier, IdentifierOrValueExpression, MultiPartIdentifier, SchemaObjectName};
use crate::query::QueryExpression;
use crate::types::DataTypeReference;
use serde::Serialize;

node_enum! {
    pub enum TableReference {
        NamedTableReference,
        QueryDerivedTable,
        SchemaObjectFunctionTableReference,
        VariableTableReference,
        VariableMethodCallTableReference,
        PredictTableReference,
        OpenRowsetTableReference,
        BulkOpenRowset,
        InlineDerivedTable,
        JoinParenthesisTableReference,
        QualifiedJoin,
        UnqualifiedJoin,
        PivotedTableReference,
        UnpivotedTableReference,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct NamedTableReference {
    pub schema_object: SchemaObjectName,
    pub alias: Option<Identifier>,
    pub table_hints: Vec<TableHint>,
    pub temporal_clause: Option<TemporalClause>,
}

impl NamedTableReference {
    pub fn new(schema_object: SchemaObjectName) -> Self {
        Self {
            schema_object,
            alias: None,
            table_hints: Vec::new(),
            temporal_clause: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TemporalClauseType {
    TimeAsOf,
    FromTo,
    Between,
    ContainedIn,
    All,
}

/// `FOR SYSTEM_TIME ...` on a temporal table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct TemporalClause {
    pub temporal_clause_type: TemporalClauseType,
    pub start_time: Option<ScalarExpression>,
    pub end_time: Option<ScalarExpression>,
}

/// `(SELECT ...) AS alias [(cols)]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct QueryDerivedTable {
    pub query_expression: QueryExpression,
    pub alias: Option<Identifier>,
    pub columns: Vec<Identifier>,
}

/// A table-valued function call: `dbo.fn(1, 2) AS f`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SchemaObjectFunctionTableReference {
    pub schema_object: SchemaObjectName,
    pub parameters: Vec<ScalarExpression>,
    pub alias: Option<Identifier>,
    pub columns: Vec<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct VariableTableReference {
    pub variable: VariableReference,
    pub alias: Option<Identifier>,
}

/// `@xml.nodes('/a') AS t(c)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct VariableMethodCallTableReference {
    pub variable: VariableReference,
    pub method_name: Identifier,
    pub parameters: Vec<ScalarExpression>,
    pub alias: Option<Identifier>,
    pub columns: Vec<Identifier>,
}

/// Name, type and collation of a column declared in a `WITH (...)` schema
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ColumnDefinitionBase {
    pub column_identifier: Identifier,
    pub data_type: Option<DataTypeReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SchemaDeclarationItem {
    pub column_definition: ColumnDefinitionBase,
    pub mapping: Option<ScalarExpression>,
}

/// `PREDICT(MODEL = @m, DATA = t AS d, RUNTIME = ONNX) WITH (score FLOAT) AS p`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct PredictTableReference {
    pub model_variable: Option<ScalarExpression>,
    pub model_subquery: Option<QueryExpression>,
    pub data_source: Option<TableReference>,
    pub run_time: Option<Identifier>,
    pub schema_declaration_items: Vec<SchemaDeclarationItem>,
    pub alias: Option<Identifier>,
}

/// `OPENROWSET('provider', 'conn', object_or_query) [WITH (...)] AS alias`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct OpenRowsetTableReference {
    pub arguments: Vec<ScalarExpression>,
    pub object: Option<SchemaObjectName>,
    pub with_columns: Vec<SchemaDeclarationItem>,
    pub alias: Option<Identifier>,
    pub columns: Vec<Identifier>,
}

node_enum! {
    /// Options of `OPENROWSET(BULK ...)` and `BULK INSERT`
    pub enum BulkInsertOption {
        SimpleBulkInsertOption,
        LiteralBulkInsertOption,
    }
}

/// A bare flag such as `SINGLE_BLOB`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename = "BulkInsertOption", rename_all = "PascalCase")]
pub struct SimpleBulkInsertOption {
    pub option_kind: String,
}

/// `FORMATFILE = 'path'`, `FIRSTROW = 2`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct LiteralBulkInsertOption {
    pub option_kind: String,
    pub value: ScalarExpression,
}

/// `OPENROWSET(BULK 'file', options...) AS alias`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct BulkOpenRowset {
    pub data_files: Vec<StringLiteral>,
    pub options: Vec<BulkInsertOption>,
    pub with_columns: Vec<SchemaDeclarationItem>,
    pub alias: Option<Identifier>,
    pub columns: Vec<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct RowValue {
    pub column_values: Vec<ScalarExpression>,
}

/// `(VALUES (1, 2), (3, 4)) AS t(a, b)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct InlineDerivedTable {
    pub row_values: Vec<RowValue>,
    pub alias: Option<Identifier>,
    pub columns: Vec<Identifier>,
}

/// A join tree wrapped in parentheses
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct JoinParenthesisTableReference {
    pub join: TableReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QualifiedJoinType {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JoinHint {
    None,
    Loop,
    Hash,
    Merge,
    Remote,
}

impl JoinHint {
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "LOOP" => Some(Self::Loop),
            "HASH" => Some(Self::Hash),
            "MERGE" => Some(Self::Merge),
            "REMOTE" => Some(Self::Remote),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct QualifiedJoin {
    pub qualified_join_type: QualifiedJoinType,
    pub join_hint: JoinHint,
    pub first_table_reference: TableReference,
    pub second_table_reference: TableReference,
    pub search_condition: BooleanExpression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnqualifiedJoinType {
    CrossJoin,
    CrossApply,
    OuterApply,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct UnqualifiedJoin {
    pub unqualified_join_type: UnqualifiedJoinType,
    pub first_table_reference: TableReference,
    pub second_table_reference: TableReference,
}

/// `src PIVOT (agg(value) FOR col IN ([a], [b])) AS p`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct PivotedTableReference {
    pub table_reference: TableReference,
    pub aggregate_function_identifier: MultiPartIdentifier,
    pub value_columns: Vec<ScalarExpression>,
    pub pivot_column: ColumnReferenceExpression,
    pub in_columns: Vec<Identifier>,
    pub alias: Option<Identifier>,
}

/// `src UNPIVOT (value FOR col IN (a, b)) AS u`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct UnpivotedTableReference {
    pub table_reference: TableReference,
    pub value_column: Identifier,
    pub pivot_column: Identifier,
    pub in_columns: Vec<ColumnReferenceExpression>,
    pub alias: Option<Identifier>,
}

/// The closed set of table hint keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableHintKind {
    HoldLock,
    NoLock,
    PagLock,
    ReadCommitted,
    ReadPast,
    ReadUncommitted,
    RepeatableRead,
    Rowlock,
    Serializable,
    Snapshot,
    TabLock,
    TabLockX,
    UpdLock,
    XLock,
    NoWait,
    Index,
    ForceSeek,
    ForceScan,
    KeepIdentity,
    KeepDefaults,
    IgnoreConstraints,
    IgnoreTriggers,
    NoExpand,
    SpatialWindowMaxCells,
}

impl TableHintKind {
    pub fn from_word(word: &str) -> Option<Self> {
        let kind = match word.to_ascii_uppercase().as_str() {
            "HOLDLOCK" => Self::HoldLock,
            "NOLOCK" => Self::NoLock,
            "PAGLOCK" => Self::PagLock,
            "READCOMMITTED" => Self::ReadCommitted,
            "READPAST" => Self::ReadPast,
            "READUNCOMMITTED" => Self::ReadUncommitted,
            "REPEATABLEREAD" => Self::RepeatableRead,
            "ROWLOCK" => Self::Rowlock,
            "SERIALIZABLE" => Self::Serializable,
            "SNAPSHOT" => Self::Snapshot,
            "TABLOCK" => Self::TabLock,
            "TABLOCKX" => Self::TabLockX,
            "UPDLOCK" => Self::UpdLock,
            "XLOCK" => Self::XLock,
            "NOWAIT" => Self::NoWait,
            "INDEX" => Self::Index,
            "FORCESEEK" => Self::ForceSeek,
            "FORCESCAN" => Self::ForceScan,
            "KEEPIDENTITY" => Self::KeepIdentity,
            "KEEPDEFAULTS" => Self::KeepDefaults,
            "IGNORE_CONSTRAINTS" => Self::IgnoreConstraints,
            "IGNORE_TRIGGERS" => Self::IgnoreTriggers,
            "NOEXPAND" => Self::NoExpand,
            "SPATIAL_WINDOW_MAX_CELLS" => Self::SpatialWindowMaxCells,
            _ => return None,
        };
        Some(kind)
    }
}

node_enum! {
    pub enum TableHint {
        PlainTableHint,
        IndexTableHint,
        LiteralTableHint,
        ForceSeekTableHint,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename = "TableHint", rename_all = "PascalCase")]
pub struct PlainTableHint {
    pub hint_kind: TableHintKind,
}

/// `INDEX(ix1, ix2)` or `INDEX = ix`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct IndexTableHint {
    pub hint_kind: TableHintKind,
    pub index_values: Vec<IdentifierOrValueExpression>,
}

/// `SPATIAL_WINDOW_MAX_CELLS = 512`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct LiteralTableHint {
    pub hint_kind: TableHintKind,
    pub value: ScalarExpression,
}

/// `FORCESEEK [(index (col, ...))]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ForceSeekTableHint {
    pub hint_kind: TableHintKind,
    pub index_value: Option<IdentifierOrValueExpression>,
    pub column_values: Vec<ColumnReferenceExpression>,
}

impl TableReference {
    /// Set the correlation name on references that accept one
    pub fn set_alias(&mut self, alias: Identifier) {
        let slot = match self {
            TableReference::NamedTableReference(t) => &mut t.alias,
            TableReference::QueryDerivedTable(t) => &mut t.alias,
            TableReference::SchemaObjectFunctionTableReference(t) => &mut t.alias,
            TableReference::VariableTableReference(t) => &mut t.alias,
            TableReference::VariableMethodCallTableReference(t) => &mut t.alias,
            TableReference::PredictTableReference(t) => &mut t.alias,
            TableReference::OpenRowsetTableReference(t) => &mut t.alias,
            TableReference::BulkOpenRowset(t) => &mut t.alias,
            TableReference::InlineDerivedTable(t) => &mut t.alias,
            TableReference::PivotedTableReference(t) => &mut t.alias,
            TableReference::UnpivotedTableReference(t) => &mut t.alias,
            _ => return,
        };
        *slot = Some(alias);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_words_cover_closed_set() {
        let words = [
            "HOLDLOCK", "NOLOCK", "PAGLOCK", "READCOMMITTED", "READPAST", "READUNCOMMITTED",
            "REPEATABLEREAD", "ROWLOCK", "SERIALIZABLE", "SNAPSHOT", "TABLOCK", "TABLOCKX",
            "UPDLOCK", "XLOCK", "NOWAIT", "INDEX", "FORCESEEK", "FORCESCAN", "KEEPIDENTITY",
            "KEEPDEFAULTS", "IGNORE_CONSTRAINTS", "IGNORE_TRIGGERS", "NOEXPAND",
            "SPATIAL_WINDOW_MAX_CELLS",
        ];
        for word in words {
            assert!(TableHintKind::from_word(word).is_some(), "{word}");
        }
        assert!(TableHintKind::from_word("nolock").is_some());
        assert!(TableHintKind::from_word("LOOP").is_none());
    }

    #[test]
    fn test_plain_hint_serializes_as_table_hint() {
        let hint: TableHint = PlainTableHint {
            hint_kind: TableHintKind::NoLock,
        }
        .into();
        let json = serde_json::to_value(&hint).unwrap();
        assert_eq!(json, serde_json::json!({"$type": "TableHint", "HintKind": "NoLock"}));
    }

    #[test]
    fn test_set_alias_ignores_joins() {
        let mut table: TableReference =
            NamedTableReference::new(SchemaObjectName::single(Identifier::new("t"))).into();
        table.set_alias(Identifier::new("a"));
        let TableReference::NamedTableReference(named) = &table else {
            panic!("expected a named table");
        };
        assert_eq!(named.alias.as_ref().map(|a| a.value.as_str()), Some("a"));
    }
}
