//! Column, constraint and index definitions
//!
//! Shared by `CREATE TABLE`, `ALTER TABLE ... ADD`, table variables, table
//! types and multi-statement table-valued function returns.

use crate::boolean::BooleanExpression;
use crate::expr::{ColumnReferenceExpression, ScalarExpression};
use crate::literal::StringLiteral;
use crate::names::{Identifier, SchemaObjectName};
use crate::options::{FileGroupOrPartitionScheme, IndexOption};
use crate::query::SortOrder;
use crate::types::DataTypeReference;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct TableDefinition {
    pub column_definitions: Vec<ColumnDefinition>,
    pub table_constraints: Vec<ConstraintDefinition>,
    pub indexes: Vec<IndexDefinition>,
    pub system_time_period: Option<SystemTimePeriodDefinition>,
}

impl TableDefinition {
    pub fn is_empty(&self) -> bool {
        self.column_definitions.is_empty()
            && self.table_constraints.is_empty()
            && self.indexes.is_empty()
            && self.system_time_period.is_none()
    }
}

/// `PERIOD FOR SYSTEM_TIME (start, end)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SystemTimePeriodDefinition {
    pub start_time_column: Identifier,
    pub end_time_column: Identifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GeneratedAlwaysType {
    RowStart,
    RowEnd,
    TransactionIdStart,
    TransactionIdEnd,
    SequenceNumberStart,
    SequenceNumberEnd,
}

/// `IDENTITY [(seed, increment)] [NOT FOR REPLICATION]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct IdentityOptions {
    pub identity_seed: Option<ScalarExpression>,
    pub identity_increment: Option<ScalarExpression>,
    pub is_identity_not_for_replication: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ColumnDefinition {
    pub column_identifier: Identifier,
    pub data_type: Option<DataTypeReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
    pub computed_column_expression: Option<ScalarExpression>,
    pub is_persisted: bool,
    pub identity_options: Option<IdentityOptions>,
    pub is_row_guid_col: bool,
    pub is_sparse: bool,
    pub is_hidden: bool,
    pub generated_always: Option<GeneratedAlwaysType>,
    pub is_masked: bool,
    pub masking_function: Option<StringLiteral>,
    pub default_constraint: Option<DefaultConstraintDefinition>,
    pub constraints: Vec<ConstraintDefinition>,
    pub index: Option<IndexDefinition>,
}

impl ColumnDefinition {
    pub fn new(column_identifier: Identifier) -> Self {
        Self {
            column_identifier,
            data_type: None,
            collation: None,
            computed_column_expression: None,
            is_persisted: false,
            identity_options: None,
            is_row_guid_col: false,
            is_sparse: false,
            is_hidden: false,
            generated_always: None,
            is_masked: false,
            masking_function: None,
            default_constraint: None,
            constraints: Vec::new(),
            index: None,
        }
    }
}

node_enum! {
    pub enum ConstraintDefinition {
        UniqueConstraintDefinition,
        ForeignKeyConstraintDefinition,
        CheckConstraintDefinition,
        DefaultConstraintDefinition,
        NullableConstraintDefinition,
        GraphConnectionConstraintDefinition,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ColumnWithSortOrder {
    pub column: ColumnReferenceExpression,
    pub sort_order: SortOrder,
}

/// `[CONSTRAINT name] PRIMARY KEY|UNIQUE [CLUSTERED|NONCLUSTERED] (cols) ...`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct UniqueConstraintDefinition {
    pub constraint_identifier: Option<Identifier>,
    pub clustered: Option<bool>,
    pub is_primary_key: bool,
    pub columns: Vec<ColumnWithSortOrder>,
    pub index_options: Vec<IndexOption>,
    pub on_file_group_or_partition_scheme: Option<FileGroupOrPartitionScheme>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeleteUpdateAction {
    NotSpecified,
    Cascade,
    SetNull,
    SetDefault,
    NoAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ForeignKeyConstraintDefinition {
    pub constraint_identifier: Option<Identifier>,
    pub columns: Vec<Identifier>,
    pub reference_table_name: SchemaObjectName,
    pub referenced_table_columns: Vec<Identifier>,
    pub delete_action: DeleteUpdateAction,
    pub update_action: DeleteUpdateAction,
    pub not_for_replication: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CheckConstraintDefinition {
    pub constraint_identifier: Option<Identifier>,
    pub check_condition: BooleanExpression,
    pub not_for_replication: bool,
}

/// `[CONSTRAINT name] DEFAULT expr [FOR column] [WITH VALUES]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DefaultConstraintDefinition {
    pub constraint_identifier: Option<Identifier>,
    pub expression: ScalarExpression,
    pub column: Option<Identifier>,
    pub with_values: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct NullableConstraintDefinition {
    pub constraint_identifier: Option<Identifier>,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct GraphConnectionBetweenNodes {
    pub from_node: SchemaObjectName,
    pub to_node: SchemaObjectName,
}

/// `CONSTRAINT name CONNECTION (a TO b, ...) [ON DELETE ...]` on graph edges
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct GraphConnectionConstraintDefinition {
    pub constraint_identifier: Option<Identifier>,
    pub from_node_to_node_list: Vec<GraphConnectionBetweenNodes>,
    pub delete_action: DeleteUpdateAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IndexTypeKind {
    Clustered,
    NonClustered,
    ClusteredColumnStore,
    NonClusteredColumnStore,
    NonClusteredHash,
}

/// Inline `INDEX name [UNIQUE] [CLUSTERED|NONCLUSTERED] (cols) ...`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct IndexDefinition {
    pub name: Identifier,
    pub unique: bool,
    pub index_type: Option<IndexTypeKind>,
    pub columns: Vec<ColumnWithSortOrder>,
    pub include_columns: Vec<ColumnReferenceExpression>,
    pub index_options: Vec<IndexOption>,
    pub filter_predicate: Option<BooleanExpression>,
    pub on_file_group_or_partition_scheme: Option<FileGroupOrPartitionScheme>,
}

impl ConstraintDefinition {
    pub fn set_name(&mut self, name: Identifier) {
        let slot = match self {
            ConstraintDefinition::UniqueConstraintDefinition(c) => &mut c.constraint_identifier,
            ConstraintDefinition::ForeignKeyConstraintDefinition(c) => {
                &mut c.constraint_identifier
            }
            ConstraintDefinition::CheckConstraintDefinition(c) => &mut c.constraint_identifier,
            ConstraintDefinition::DefaultConstraintDefinition(c) => &mut c.constraint_identifier,
            ConstraintDefinition::NullableConstraintDefinition(c) => &mut c.constraint_identifier,
            ConstraintDefinition::GraphConnectionConstraintDefinition(c) => {
                &mut c.constraint_identifier
            }
        };
        *slot = Some(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_definition_defaults() {
        let column = ColumnDefinition::new(Identifier::new("id"));
        assert!(column.constraints.is_empty());
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["$type"], "ColumnDefinition");
        assert_eq!(json["DataType"], serde_json::Value::Null);
        assert!(json.get("Collation").is_none());
    }

    #[test]
    fn test_set_constraint_name() {
        let mut constraint: ConstraintDefinition = NullableConstraintDefinition {
            constraint_identifier: None,
            nullable: false,
        }
        .into();
        constraint.set_name(Identifier::new("nn"));
        let json = serde_json::to_value(&constraint).unwrap();
        assert_eq!(json["ConstraintIdentifier"]["Value"], "nn");
    }
}
