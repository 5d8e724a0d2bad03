//! CREATE DATABASE, ALTER DATABASE and database scoped configuration

use crate::expr::ScalarExpression;
use crate::names::Identifier;
use crate::options::StatementOption;
use serde::Serialize;

/// `( NAME = n, FILENAME = 'f', SIZE = 10 MB, ... )`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct FileDeclaration {
    pub is_primary: bool,
    pub options: Vec<StatementOption>,
}

/// `FILEGROUP fg [CONTAINS FILESTREAM|MEMORY_OPTIMIZED_DATA] [DEFAULT] (files)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct FileGroupDefinition {
    pub name: Option<Identifier>,
    pub file_declarations: Vec<FileDeclaration>,
    pub is_default: bool,
    pub contains_file_stream: bool,
    pub contains_memory_optimized_data: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttachMode {
    None,
    Attach,
    AttachRebuildLog,
    AttachForceRebuildLog,
    Load,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateDatabaseStatement {
    pub database_name: Identifier,
    /// `CONTAINMENT = NONE|PARTIAL`
    pub containment: Option<Identifier>,
    pub file_groups: Vec<FileGroupDefinition>,
    pub log_on: Vec<FileDeclaration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Identifier>,
    pub options: Vec<StatementOption>,
    pub attach_mode: AttachMode,
    /// `AS SNAPSHOT OF source`
    pub database_snapshot: Option<Identifier>,
}

/// `WITH ROLLBACK IMMEDIATE | ROLLBACK AFTER n [SECONDS] | NO_WAIT`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterDatabaseTermination {
    pub immediate_rollback: bool,
    pub rollback_after: Option<ScalarExpression>,
    pub no_wait: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterDatabaseSetStatement {
    pub database_name: Option<Identifier>,
    pub use_current: bool,
    pub options: Vec<StatementOption>,
    pub termination: Option<AlterDatabaseTermination>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterDatabaseModifyNameStatement {
    pub database_name: Option<Identifier>,
    pub use_current: bool,
    pub new_database_name: Identifier,
}

/// `ADD [LOG] FILE (...), (...) [TO FILEGROUP fg]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterDatabaseAddFileStatement {
    pub database_name: Option<Identifier>,
    pub use_current: bool,
    pub is_log: bool,
    pub file_declarations: Vec<FileDeclaration>,
    pub file_group: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterDatabaseAddFileGroupStatement {
    pub database_name: Option<Identifier>,
    pub use_current: bool,
    pub file_group: Identifier,
    pub contains_file_stream: bool,
    pub contains_memory_optimized_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterDatabaseRemoveFileStatement {
    pub database_name: Option<Identifier>,
    pub use_current: bool,
    pub file: Identifier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterDatabaseRemoveFileGroupStatement {
    pub database_name: Option<Identifier>,
    pub use_current: bool,
    pub file_group: Identifier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterDatabaseModifyFileStatement {
    pub database_name: Option<Identifier>,
    pub use_current: bool,
    pub file_declaration: FileDeclaration,
}

/// `MODIFY FILEGROUP fg DEFAULT | NAME = new | READ_ONLY | READ_WRITE | AUTOGROW_...`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterDatabaseModifyFileGroupStatement {
    pub database_name: Option<Identifier>,
    pub use_current: bool,
    pub file_group: Identifier,
    pub make_default: bool,
    pub new_file_group_name: Option<Identifier>,
    pub update_ability: Option<String>,
    pub termination: Option<AlterDatabaseTermination>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterDatabaseCollateStatement {
    pub database_name: Option<Identifier>,
    pub use_current: bool,
    pub collation: Identifier,
}

/// `ALTER DATABASE SCOPED CONFIGURATION [FOR SECONDARY] SET name = value`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterDatabaseScopedConfigurationSetStatement {
    pub secondary: bool,
    pub option: StatementOption,
}

/// `ALTER DATABASE SCOPED CONFIGURATION CLEAR PROCEDURE_CACHE [plan_handle]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterDatabaseScopedConfigurationClearStatement {
    pub secondary: bool,
    pub option_kind: String,
    pub plan_handle: Option<ScalarExpression>,
}
