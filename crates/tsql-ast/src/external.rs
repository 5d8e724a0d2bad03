//! PolyBase and external runtime objects

use crate::names::{Identifier, SchemaObjectName};
use crate::options::StatementOption;
use crate::table_def::ColumnDefinition;
use serde::Serialize;

same_shape_nodes! {
    {
        pub name: Identifier,
        /// `TYPE`, `LOCATION`, `CREDENTIAL`, `FORMAT_TYPE`, `FORMAT_OPTIONS (...)`
        pub options: Vec<StatementOption>,
    } =>
    CreateExternalDataSourceStatement,
    AlterExternalDataSourceStatement,
    CreateExternalFileFormatStatement,
}

/// `CREATE EXTERNAL TABLE t (cols) WITH (LOCATION = ..., DATA_SOURCE = ...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateExternalTableStatement {
    pub schema_object_name: SchemaObjectName,
    pub column_definitions: Vec<ColumnDefinition>,
    pub options: Vec<StatementOption>,
}

same_shape_nodes! {
    {
        pub name: Identifier,
        pub owner: Option<Identifier>,
        /// `SET`, `ADD` or `REMOVE` on the ALTER forms
        pub action: Option<String>,
        /// `FROM (CONTENT = ..., FILE_NAME = ...)`, `WITH (LANGUAGE = 'R')`, ...
        pub options: Vec<StatementOption>,
    } =>
    CreateExternalLanguageStatement,
    AlterExternalLanguageStatement,
    CreateExternalLibraryStatement,
    AlterExternalLibraryStatement,
    CreateExternalModelStatement,
    AlterExternalModelStatement,
}
