//! DROP statements
//!
//! Most object kinds share one of two shapes: a list of schema-qualified
//! names, or a single server/database-level name.

use crate::expr::ColumnReferenceExpression;
use crate::names::{Identifier, SchemaObjectName};
use crate::options::StatementOption;
use crate::security::{CryptoMechanism, SignableElementKind};
use serde::Serialize;

same_shape_nodes! {
    {
        pub is_if_exists: bool,
        pub objects: Vec<SchemaObjectName>,
    } =>
    DropTableStatement,
    DropViewStatement,
    DropProcedureStatement,
    DropFunctionStatement,
    DropSequenceStatement,
    DropTypeStatement,
    DropSynonymStatement,
    DropDefaultStatement,
    DropRuleStatement,
    DropAggregateStatement,
    DropSecurityPolicyStatement,
    DropExternalTableStatement,
    DropQueueStatement,
    DropXmlSchemaCollectionStatement,
    DropStatisticsStatement,
    DropAssemblyStatement,
}

same_shape_nodes! {
    {
        pub is_if_exists: bool,
        pub name: Identifier,
    } =>
    DropSchemaStatement,
    DropUserStatement,
    DropRoleStatement,
    DropServerRoleStatement,
    DropApplicationRoleStatement,
    DropLoginStatement,
    DropCertificateStatement,
    DropAsymmetricKeyStatement,
    DropEndpointStatement,
    DropServiceStatement,
    DropContractStatement,
    DropMessageTypeStatement,
    DropRouteStatement,
    DropRemoteServiceBindingStatement,
    DropPartitionFunctionStatement,
    DropPartitionSchemeStatement,
    DropFullTextCatalogStatement,
    DropFullTextStopListStatement,
    DropSearchPropertyListStatement,
    DropWorkloadGroupStatement,
    DropWorkloadClassifierStatement,
    DropResourcePoolStatement,
    DropExternalResourcePoolStatement,
    DropBrokerPriorityStatement,
    DropExternalDataSourceStatement,
    DropExternalFileFormatStatement,
    DropExternalLanguageStatement,
    DropExternalLibraryStatement,
    DropExternalModelStatement,
    DropColumnEncryptionKeyStatement,
    DropColumnMasterKeyStatement,
    DropAvailabilityGroupStatement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TriggerScope {
    Normal,
    Database,
    AllServer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DropTriggerStatement {
    pub is_if_exists: bool,
    pub objects: Vec<SchemaObjectName>,
    pub trigger_scope: TriggerScope,
}

/// `DROP [DATABASE SCOPED] CREDENTIAL name`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DropCredentialStatement {
    pub is_if_exists: bool,
    pub name: Identifier,
    pub is_database_scoped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DropSymmetricKeyStatement {
    pub is_if_exists: bool,
    pub name: Identifier,
    pub remove_provider_key: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type")]
pub struct DropMasterKeyStatement {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type")]
pub struct DropDatabaseEncryptionKeyStatement {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DropDatabaseStatement {
    pub is_if_exists: bool,
    pub databases: Vec<Identifier>,
}

/// `ix ON t [WITH (...)]` or the legacy `t.ix`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DropIndexClause {
    pub index: Option<Identifier>,
    pub object: SchemaObjectName,
    pub options: Vec<StatementOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DropIndexStatement {
    pub is_if_exists: bool,
    pub drop_index_clauses: Vec<DropIndexClause>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DropFullTextIndexStatement {
    pub table_name: SchemaObjectName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventNotificationTarget {
    Server,
    Database,
    Queue,
}

/// `DROP EVENT NOTIFICATION a, b ON SERVER|DATABASE|QUEUE q`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DropEventNotificationStatement {
    pub notifications: Vec<Identifier>,
    pub scope: EventNotificationTarget,
    pub queue_name: Option<SchemaObjectName>,
}

/// `DROP EVENT SESSION s ON SERVER|DATABASE`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DropEventSessionStatement {
    pub is_if_exists: bool,
    pub name: Identifier,
    pub session_scope: EventNotificationTarget,
}

/// `DROP [COUNTER] SIGNATURE FROM module BY crypto, ...`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DropSignatureStatement {
    pub is_counter: bool,
    pub element_kind: SignableElementKind,
    pub element: SchemaObjectName,
    pub cryptos: Vec<CryptoMechanism>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DropSensitivityClassificationStatement {
    pub columns: Vec<ColumnReferenceExpression>,
}
