//! Tables, views, modules, indexes, schemas, types, synonyms and sequences

use crate::boolean::BooleanExpression;
use crate::dml::SelectStatement;
use crate::expr::{ColumnReferenceExpression, ScalarExpression};
use crate::names::{Identifier, IdentifierOrValueExpression, SchemaObjectName};
use crate::options::{FileGroupOrPartitionScheme, IndexOption, StatementOption};
use crate::procedural::ExecuteAsClause;
use crate::statement::Statement;
use crate::table_def::{ColumnWithSortOrder, TableDefinition};
use crate::types::DataTypeReference;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateTableStatement {
    pub schema_object_name: SchemaObjectName,
    pub as_node: bool,
    pub as_edge: bool,
    pub definition: TableDefinition,
    pub on_file_group_or_partition_scheme: Option<FileGroupOrPartitionScheme>,
    pub text_image_on: Option<IdentifierOrValueExpression>,
    pub file_stream_on: Option<IdentifierOrValueExpression>,
    pub options: Vec<StatementOption>,
}

same_shape_nodes! {
    {
        pub schema_object_name: SchemaObjectName,
        pub columns: Vec<Identifier>,
        /// `SCHEMABINDING`, `ENCRYPTION`, `VIEW_METADATA`
        pub view_options: Vec<StatementOption>,
        pub select_statement: SelectStatement,
        pub with_check_option: bool,
    } =>
    CreateViewStatement,
    AlterViewStatement,
    CreateOrAlterViewStatement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParameterModifier {
    None,
    Output,
    ReadOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ProcedureParameter {
    pub variable_name: Identifier,
    pub data_type: Option<DataTypeReference>,
    pub is_varying: bool,
    pub value: Option<ScalarExpression>,
    pub modifier: ParameterModifier,
}

/// `EXTERNAL NAME assembly.class.method`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct MethodSpecifier {
    pub assembly_name: Identifier,
    pub class_name: Option<Identifier>,
    pub method_name: Option<Identifier>,
}

same_shape_nodes! {
    {
        pub procedure_name: SchemaObjectName,
        /// `;n` procedure group number
        pub number: Option<ScalarExpression>,
        pub parameters: Vec<ProcedureParameter>,
        pub options: Vec<StatementOption>,
        pub execute_as: Option<ExecuteAsClause>,
        pub is_for_replication: bool,
        pub statements: Vec<Statement>,
        pub method_specifier: Option<MethodSpecifier>,
    } =>
    CreateProcedureStatement,
    AlterProcedureStatement,
    CreateOrAlterProcedureStatement,
}

node_enum! {
    pub enum FunctionReturnType {
        ScalarFunctionReturnType,
        SelectFunctionReturnType,
        TableValuedFunctionReturnType,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ScalarFunctionReturnType {
    pub data_type: DataTypeReference,
}

/// `RETURNS TABLE AS RETURN (SELECT ...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SelectFunctionReturnType {
    pub select_statement: SelectStatement,
}

/// `RETURNS @t TABLE (...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct TableValuedFunctionReturnType {
    pub variable_name: Identifier,
    pub definition: TableDefinition,
}

same_shape_nodes! {
    {
        pub name: SchemaObjectName,
        pub parameters: Vec<ProcedureParameter>,
        pub return_type: Option<FunctionReturnType>,
        pub options: Vec<StatementOption>,
        pub execute_as: Option<ExecuteAsClause>,
        pub statements: Vec<Statement>,
        pub method_specifier: Option<MethodSpecifier>,
    } =>
    CreateFunctionStatement,
    AlterFunctionStatement,
    CreateOrAlterFunctionStatement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TriggerType {
    For,
    After,
    InsteadOf,
}

/// `ON table`, `ON DATABASE` or `ON ALL SERVER`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct TriggerObject {
    pub trigger_scope: crate::drop::TriggerScope,
    pub name: Option<SchemaObjectName>,
}

/// `INSERT`, `UPDATE`, `DELETE` or a DDL event name such as `CREATE_TABLE`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct TriggerAction {
    pub trigger_action_type: String,
}

same_shape_nodes! {
    {
        pub name: SchemaObjectName,
        pub trigger_object: TriggerObject,
        pub options: Vec<StatementOption>,
        pub execute_as: Option<ExecuteAsClause>,
        pub trigger_type: TriggerType,
        pub trigger_actions: Vec<TriggerAction>,
        pub with_append: bool,
        pub is_not_for_replication: bool,
        pub statements: Vec<Statement>,
        pub method_specifier: Option<MethodSpecifier>,
    } =>
    CreateTriggerStatement,
    AlterTriggerStatement,
    CreateOrAlterTriggerStatement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateIndexStatement {
    pub name: Identifier,
    pub on_name: SchemaObjectName,
    pub unique: bool,
    pub clustered: Option<bool>,
    pub is_column_store: bool,
    pub columns: Vec<ColumnWithSortOrder>,
    pub include_columns: Vec<ColumnReferenceExpression>,
    pub filter_predicate: Option<BooleanExpression>,
    pub index_options: Vec<IndexOption>,
    pub on_file_group_or_partition_scheme: Option<FileGroupOrPartitionScheme>,
    pub file_stream_on: Option<IdentifierOrValueExpression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlterIndexType {
    Rebuild,
    Disable,
    Reorganize,
    Set,
    Resume,
    Pause,
    Abort,
}

/// `ALTER INDEX ix|ALL ON t REBUILD|REORGANIZE|DISABLE|SET (...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterIndexStatement {
    pub all: bool,
    pub name: Option<Identifier>,
    pub on_name: SchemaObjectName,
    pub alter_index_type: AlterIndexType,
    pub partition: Option<ScalarExpression>,
    pub index_options: Vec<IndexOption>,
}

/// `CREATE SCHEMA s [AUTHORIZATION owner] [statements]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateSchemaStatement {
    pub name: Option<Identifier>,
    pub owner: Option<Identifier>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SecurityObjectKind {
    NotSpecified,
    Object,
    Type,
    XmlSchemaCollection,
    Schema,
    Assembly,
    Role,
    ApplicationRole,
    MessageType,
    Contract,
    Service,
    RemoteServiceBinding,
    Route,
    FullTextCatalog,
    FullTextStopList,
    SearchPropertyList,
    SymmetricKey,
    AsymmetricKey,
    Certificate,
    Database,
    Endpoint,
    Login,
    ServerRole,
    AvailabilityGroup,
    User,
}

impl SecurityObjectKind {
    /// Map a class keyword before `::` (e.g. `SCHEMA::dbo`) to a kind
    pub fn from_words(words: &[&str]) -> Option<Self> {
        let joined = words
            .iter()
            .map(|w| w.to_ascii_uppercase())
            .collect::<Vec<_>>()
            .join(" ");
        let kind = match joined.as_str() {
            "OBJECT" => Self::Object,
            "TYPE" => Self::Type,
            "XML SCHEMA COLLECTION" => Self::XmlSchemaCollection,
            "SCHEMA" => Self::Schema,
            "ASSEMBLY" => Self::Assembly,
            "ROLE" => Self::Role,
            "APPLICATION ROLE" => Self::ApplicationRole,
            "MESSAGE TYPE" => Self::MessageType,
            "CONTRACT" => Self::Contract,
            "SERVICE" => Self::Service,
            "REMOTE SERVICE BINDING" => Self::RemoteServiceBinding,
            "ROUTE" => Self::Route,
            "FULLTEXT CATALOG" => Self::FullTextCatalog,
            "FULLTEXT STOPLIST" => Self::FullTextStopList,
            "SEARCH PROPERTY LIST" => Self::SearchPropertyList,
            "SYMMETRIC KEY" => Self::SymmetricKey,
            "ASYMMETRIC KEY" => Self::AsymmetricKey,
            "CERTIFICATE" => Self::Certificate,
            "DATABASE" => Self::Database,
            "ENDPOINT" => Self::Endpoint,
            "LOGIN" => Self::Login,
            "SERVER ROLE" => Self::ServerRole,
            "AVAILABILITY GROUP" => Self::AvailabilityGroup,
            "USER" => Self::User,
            _ => return None,
        };
        Some(kind)
    }
}

/// `ALTER SCHEMA s TRANSFER [class::]object`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterSchemaStatement {
    pub name: Identifier,
    pub object_name: SchemaObjectName,
    pub object_kind: SecurityObjectKind,
}

/// `CREATE TYPE t FROM base [NULL|NOT NULL]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateTypeUddtStatement {
    pub name: SchemaObjectName,
    pub data_type: DataTypeReference,
    pub nullable: Option<bool>,
}

/// `CREATE TYPE t EXTERNAL NAME assembly.class`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateTypeUdtStatement {
    pub name: SchemaObjectName,
    pub assembly_name: MethodSpecifier,
}

/// `CREATE TYPE t AS TABLE (...) [WITH (...)]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateTypeTableStatement {
    pub name: SchemaObjectName,
    pub definition: TableDefinition,
    pub options: Vec<StatementOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateSynonymStatement {
    pub name: SchemaObjectName,
    pub for_name: SchemaObjectName,
}

node_enum! {
    pub enum SequenceOption {
        DataTypeSequenceOption,
        ScalarExpressionSequenceOption,
        SimpleSequenceOption,
    }
}

/// `AS bigint`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DataTypeSequenceOption {
    pub option_kind: String,
    pub data_type: DataTypeReference,
}

/// `START WITH 1`, `INCREMENT BY 1`, `MINVALUE 0`, `CACHE 10`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ScalarExpressionSequenceOption {
    pub option_kind: String,
    pub option_value: ScalarExpression,
}

/// `CYCLE`, `NO CACHE`, `NO MAXVALUE`, `RESTART`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename = "SequenceOption", rename_all = "PascalCase")]
pub struct SimpleSequenceOption {
    pub option_kind: String,
    pub no_value: bool,
}

same_shape_nodes! {
    {
        pub name: SchemaObjectName,
        pub sequence_options: Vec<SequenceOption>,
    } =>
    CreateSequenceStatement,
    AlterSequenceStatement,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_class_words() {
        assert_eq!(
            SecurityObjectKind::from_words(&["xml", "schema", "collection"]),
            Some(SecurityObjectKind::XmlSchemaCollection)
        );
        assert_eq!(SecurityObjectKind::from_words(&["SCHEMA"]), Some(SecurityObjectKind::Schema));
        assert_eq!(SecurityObjectKind::from_words(&["TABLE"]), None);
    }

    #[test]
    fn test_simple_sequence_option_tag() {
        let option: SequenceOption = SimpleSequenceOption {
            option_kind: "Cache".to_string(),
            no_value: true,
        }
        .into();
        let json = serde_json::to_value(&option).unwrap();
        assert_eq!(json["$type"], "SequenceOption");
        assert_eq!(json["NoValue"], true);
    }
}
