//! Partitioning, full-text, search property lists and XML schema collections

use crate::broker::AlterAction;
use crate::expr::ScalarExpression;
use crate::names::{Identifier, IdentifierOrValueExpression, SchemaObjectName};
use crate::options::StatementOption;
use crate::types::DataTypeReference;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PartitionFunctionRange {
    NotSpecified,
    Left,
    Right,
}

/// `CREATE PARTITION FUNCTION pf (int) AS RANGE LEFT FOR VALUES (1, 10)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreatePartitionFunctionStatement {
    pub name: Identifier,
    pub parameter_type: DataTypeReference,
    pub range: PartitionFunctionRange,
    pub boundary_values: Vec<ScalarExpression>,
}

/// `ALTER PARTITION FUNCTION pf() SPLIT|MERGE RANGE (v)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterPartitionFunctionStatement {
    pub name: Identifier,
    pub is_split: bool,
    pub boundary: Option<ScalarExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreatePartitionSchemeStatement {
    pub name: Identifier,
    pub partition_function: Identifier,
    pub is_all: bool,
    pub file_groups: Vec<IdentifierOrValueExpression>,
}

/// `ALTER PARTITION SCHEME ps NEXT USED [fg]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterPartitionSchemeStatement {
    pub name: Identifier,
    pub file_group: Option<IdentifierOrValueExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateFullTextCatalogStatement {
    pub name: Identifier,
    pub file_group: Option<Identifier>,
    pub options: Vec<StatementOption>,
    pub is_default: bool,
    pub owner: Option<Identifier>,
}

/// `ALTER FULLTEXT CATALOG c REBUILD [WITH ...] | REORGANIZE | AS DEFAULT`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterFullTextCatalogStatement {
    pub name: Identifier,
    pub action: String,
    pub options: Vec<StatementOption>,
}

/// `col [TYPE COLUMN tc] [LANGUAGE l] [STATISTICAL_SEMANTICS]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct FullTextIndexColumn {
    pub name: Identifier,
    pub type_column: Option<Identifier>,
    pub language_term: Option<ScalarExpression>,
    pub statistical_semantics: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateFullTextIndexStatement {
    pub on_name: SchemaObjectName,
    pub columns: Vec<FullTextIndexColumn>,
    pub key_index_name: Identifier,
    pub catalog_name: Option<Identifier>,
    pub file_group: Option<Identifier>,
    pub options: Vec<StatementOption>,
}

/// `ALTER FULLTEXT INDEX ON t ENABLE|DISABLE|ADD (...)|DROP (...)|START ... POPULATION|SET ...`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterFullTextIndexStatement {
    pub on_name: SchemaObjectName,
    pub action: String,
    pub columns: Vec<FullTextIndexColumn>,
    pub options: Vec<StatementOption>,
}

/// `CREATE FULLTEXT STOPLIST s [FROM [db.]src | SYSTEM STOPLIST] [AUTHORIZATION o]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateFullTextStopListStatement {
    pub name: Identifier,
    pub database_name: Option<Identifier>,
    pub source_stop_list_name: Option<Identifier>,
    pub is_system_stop_list: bool,
    pub owner: Option<Identifier>,
}

/// `ALTER FULLTEXT STOPLIST s ADD|DROP 'word' LANGUAGE l | DROP ALL [LANGUAGE l]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterFullTextStopListStatement {
    pub name: Identifier,
    pub action: AlterAction,
    pub stopword: Option<ScalarExpression>,
    pub language_term: Option<ScalarExpression>,
    pub is_all: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateSearchPropertyListStatement {
    pub name: Identifier,
    pub source_search_property_list: Option<SchemaObjectName>,
    pub owner: Option<Identifier>,
}

/// `ALTER SEARCH PROPERTY LIST l ADD 'p' WITH (...) | DROP 'p'`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterSearchPropertyListStatement {
    pub name: Identifier,
    pub action: AlterAction,
    pub property_name: ScalarExpression,
    pub options: Vec<StatementOption>,
}

same_shape_nodes! {
    {
        pub name: SchemaObjectName,
        pub expression: ScalarExpression,
    } =>
    CreateXmlSchemaCollectionStatement,
    /// `ALTER XML SCHEMA COLLECTION c ADD 'schema'`
    AlterXmlSchemaCollectionStatement,
}
