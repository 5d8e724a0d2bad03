//! ALTER TABLE statements

use crate::expr::ScalarExpression;
use crate::literal::StringLiteral;
use crate::names::{Identifier, SchemaObjectName};
use crate::options::{IndexOption, OptionState, StatementOption};
use crate::table_def::TableDefinition;
use crate::types::DataTypeReference;
use serde::Serialize;

/// `WITH CHECK` / `WITH NOCHECK` before ADD or CHECK CONSTRAINT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConstraintEnforcement {
    NotSpecified,
    Check,
    NoCheck,
}

/// `ALTER TABLE t [WITH CHECK|NOCHECK] ADD column_or_constraint, ...`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterTableAddTableElementStatement {
    pub schema_object_name: SchemaObjectName,
    pub existing_row_check_enforcement: ConstraintEnforcement,
    pub definition: TableDefinition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableElementType {
    NotSpecified,
    Column,
    Constraint,
    Index,
    Period,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterTableDropTableElement {
    pub table_element_type: TableElementType,
    pub name: Option<Identifier>,
    pub is_if_exists: bool,
    pub drop_clustered_constraint_options: Vec<StatementOption>,
}

/// `ALTER TABLE t DROP [COLUMN|CONSTRAINT] [IF EXISTS] a, b`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterTableDropTableElementStatement {
    pub schema_object_name: SchemaObjectName,
    pub alter_table_drop_table_elements: Vec<AlterTableDropTableElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlterTableAlterColumnOption {
    NoOptionDefined,
    Null,
    NotNull,
    AddRowGuidCol,
    DropRowGuidCol,
    AddPersisted,
    DropPersisted,
    AddNotForReplication,
    DropNotForReplication,
    AddSparse,
    DropSparse,
    AddHidden,
    DropHidden,
    AddMaskingFunction,
    DropMaskingFunction,
}

/// `ALTER TABLE t ALTER COLUMN c type [NULL|NOT NULL]` or `... ADD|DROP property`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterTableAlterColumnStatement {
    pub schema_object_name: SchemaObjectName,
    pub column_identifier: Option<Identifier>,
    pub data_type: Option<DataTypeReference>,
    pub alter_table_alter_column_option: AlterTableAlterColumnOption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
    pub masking_function: Option<StringLiteral>,
    pub options: Vec<IndexOption>,
}

/// `ALTER TABLE t SET (LOCK_ESCALATION = AUTO)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterTableSetStatement {
    pub schema_object_name: SchemaObjectName,
    pub options: Vec<StatementOption>,
}

/// `ALTER TABLE t [WITH CHECK] CHECK|NOCHECK CONSTRAINT ALL|a, b`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterTableConstraintModificationStatement {
    pub schema_object_name: SchemaObjectName,
    pub existing_row_check_enforcement: ConstraintEnforcement,
    pub constraint_enforcement: ConstraintEnforcement,
    pub all: bool,
    pub constraint_names: Vec<Identifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TriggerEnforcement {
    Enable,
    Disable,
}

/// `ALTER TABLE t ENABLE|DISABLE TRIGGER ALL|a, b`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterTableTriggerModificationStatement {
    pub schema_object_name: SchemaObjectName,
    pub trigger_enforcement: TriggerEnforcement,
    pub all: bool,
    pub trigger_names: Vec<Identifier>,
}

/// `ALTER TABLE t ENABLE CHANGE_TRACKING [WITH (TRACK_COLUMNS_UPDATED = ON)]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterTableChangeTrackingModificationStatement {
    pub schema_object_name: SchemaObjectName,
    pub is_enable: bool,
    pub track_columns_updated: OptionState,
}

/// `ALTER TABLE t SWITCH [PARTITION n] TO t2 [PARTITION m] [WITH (...)]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterTableSwitchStatement {
    pub schema_object_name: SchemaObjectName,
    pub source_partition_number: Option<ScalarExpression>,
    pub target_table: Option<SchemaObjectName>,
    pub target_partition_number: Option<ScalarExpression>,
    pub options: Vec<StatementOption>,
}

/// `ALTER TABLE t REBUILD [PARTITION = ALL|n] [WITH (...)]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterTableRebuildStatement {
    pub schema_object_name: SchemaObjectName,
    pub partition: Option<ScalarExpression>,
    pub is_all_partitions: bool,
    pub index_options: Vec<IndexOption>,
}
