//! The script root and the statement family

use crate::alter_table::*;
use crate::broker::*;
use crate::database::*;
use crate::dml::*;
use crate::drop::*;
use crate::external::*;
use crate::governor::*;
use crate::procedural::*;
use crate::routine::*;
use crate::security::*;
use crate::storage::*;
use serde::Serialize;
use tsql_core::Result;

/// A parsed script: statements in source order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct Script {
    pub statements: Vec<Statement>,
}

impl Script {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Compact JSON projection
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON projection, as written to golden files
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

node_enum! {
    pub enum Statement {
        // queries and data modification
        DeleteStatement,
        InsertStatement,
        SelectStatement,
        TruncateTableStatement,
        UpdateStatement,

        // control flow and session
        BeginEndBlockStatement,
        BeginTransactionStatement,
        BreakStatement,
        CloseCursorStatement,
        CommitTransactionStatement,
        ContinueStatement,
        DeallocateCursorStatement,
        DeclareCursorStatement,
        DeclareTableVariableStatement,
        DeclareVariableStatement,
        ExecuteAsStatement,
        ExecuteStatement,
        FetchCursorStatement,
        GeneralSetCommandStatement,
        GoToStatement,
        IfStatement,
        LabelStatement,
        OpenCursorStatement,
        PredicateSetStatement,
        PrintStatement,
        RaiseErrorStatement,
        ReturnStatement,
        RevertStatement,
        RollbackTransactionStatement,
        SaveTransactionStatement,
        SetIdentityInsertStatement,
        SetTransactionIsolationLevelStatement,
        SetVariableStatement,
        ThrowStatement,
        TryCatchStatement,
        UseStatement,
        WaitForStatement,
        WhileStatement,

        // ALTER TABLE
        AlterTableAddTableElementStatement,
        AlterTableAlterColumnStatement,
        AlterTableChangeTrackingModificationStatement,
        AlterTableConstraintModificationStatement,
        AlterTableDropTableElementStatement,
        AlterTableRebuildStatement,
        AlterTableSetStatement,
        AlterTableSwitchStatement,
        AlterTableTriggerModificationStatement,

        // DROP
        DropAggregateStatement,
        DropApplicationRoleStatement,
        DropAssemblyStatement,
        DropAsymmetricKeyStatement,
        DropAvailabilityGroupStatement,
        DropBrokerPriorityStatement,
        DropCertificateStatement,
        DropColumnEncryptionKeyStatement,
        DropColumnMasterKeyStatement,
        DropContractStatement,
        DropCredentialStatement,
        DropDatabaseEncryptionKeyStatement,
        DropDatabaseStatement,
        DropDefaultStatement,
        DropEndpointStatement,
        DropEventNotificationStatement,
        DropEventSessionStatement,
        DropExternalDataSourceStatement,
        DropExternalFileFormatStatement,
        DropExternalLanguageStatement,
        DropExternalLibraryStatement,
        DropExternalModelStatement,
        DropExternalResourcePoolStatement,
        DropExternalTableStatement,
        DropFullTextCatalogStatement,
        DropFullTextIndexStatement,
        DropFullTextStopListStatement,
        DropFunctionStatement,
        DropIndexStatement,
        DropLoginStatement,
        DropMasterKeyStatement,
        DropMessageTypeStatement,
        DropPartitionFunctionStatement,
        DropPartitionSchemeStatement,
        DropProcedureStatement,
        DropQueueStatement,
        DropRemoteServiceBindingStatement,
        DropResourcePoolStatement,
        DropRoleStatement,
        DropRouteStatement,
        DropRuleStatement,
        DropSchemaStatement,
        DropSearchPropertyListStatement,
        DropSecurityPolicyStatement,
        DropSensitivityClassificationStatement,
        DropSequenceStatement,
        DropServerRoleStatement,
        DropServiceStatement,
        DropSignatureStatement,
        DropStatisticsStatement,
        DropSymmetricKeyStatement,
        DropSynonymStatement,
        DropTableStatement,
        DropTriggerStatement,
        DropTypeStatement,
        DropUserStatement,
        DropViewStatement,
        DropWorkloadClassifierStatement,
        DropWorkloadGroupStatement,
        DropXmlSchemaCollectionStatement,

        // tables, views, modules, indexes, types
        AlterFunctionStatement,
        AlterIndexStatement,
        AlterProcedureStatement,
        AlterSchemaStatement,
        AlterSequenceStatement,
        AlterTriggerStatement,
        AlterViewStatement,
        CreateFunctionStatement,
        CreateIndexStatement,
        CreateOrAlterFunctionStatement,
        CreateOrAlterProcedureStatement,
        CreateOrAlterTriggerStatement,
        CreateOrAlterViewStatement,
        CreateProcedureStatement,
        CreateSchemaStatement,
        CreateSequenceStatement,
        CreateSynonymStatement,
        CreateTableStatement,
        CreateTriggerStatement,
        CreateTypeTableStatement,
        CreateTypeUddtStatement,
        CreateTypeUdtStatement,
        CreateViewStatement,

        // databases
        AlterDatabaseAddFileGroupStatement,
        AlterDatabaseAddFileStatement,
        AlterDatabaseCollateStatement,
        AlterDatabaseModifyFileGroupStatement,
        AlterDatabaseModifyFileStatement,
        AlterDatabaseModifyNameStatement,
        AlterDatabaseRemoveFileGroupStatement,
        AlterDatabaseRemoveFileStatement,
        AlterDatabaseScopedConfigurationClearStatement,
        AlterDatabaseScopedConfigurationSetStatement,
        AlterDatabaseSetStatement,
        CreateDatabaseStatement,

        // security
        AddSensitivityClassificationStatement,
        AddSignatureStatement,
        AlterApplicationRoleStatement,
        AlterAssemblyStatement,
        AlterAsymmetricKeyStatement,
        AlterAuthorizationStatement,
        AlterCertificateStatement,
        AlterCredentialStatement,
        AlterLoginStatement,
        AlterMasterKeyStatement,
        AlterRoleStatement,
        AlterServerRoleStatement,
        AlterServiceMasterKeyStatement,
        AlterSymmetricKeyStatement,
        AlterUserStatement,
        CreateApplicationRoleStatement,
        CreateAssemblyStatement,
        CreateAsymmetricKeyStatement,
        CreateCertificateStatement,
        CreateCredentialStatement,
        CreateLoginStatement,
        CreateMasterKeyStatement,
        CreateRoleStatement,
        CreateServerRoleStatement,
        CreateSymmetricKeyStatement,
        CreateUserStatement,
        DenyStatement,
        GrantStatement,
        RevokeStatement,

        // endpoints and Service Broker
        AlterBrokerPriorityStatement,
        AlterEndpointStatement,
        AlterMessageTypeStatement,
        AlterQueueStatement,
        AlterRemoteServiceBindingStatement,
        AlterRouteStatement,
        AlterServiceStatement,
        CreateBrokerPriorityStatement,
        CreateContractStatement,
        CreateEndpointStatement,
        CreateMessageTypeStatement,
        CreateQueueStatement,
        CreateRemoteServiceBindingStatement,
        CreateRouteStatement,
        CreateServiceStatement,

        // partitioning, full-text, XML schemas
        AlterFullTextCatalogStatement,
        AlterFullTextIndexStatement,
        AlterFullTextStopListStatement,
        AlterPartitionFunctionStatement,
        AlterPartitionSchemeStatement,
        AlterSearchPropertyListStatement,
        AlterXmlSchemaCollectionStatement,
        CreateFullTextCatalogStatement,
        CreateFullTextIndexStatement,
        CreateFullTextStopListStatement,
        CreatePartitionFunctionStatement,
        CreatePartitionSchemeStatement,
        CreateSearchPropertyListStatement,
        CreateXmlSchemaCollectionStatement,

        // Resource Governor
        AlterExternalResourcePoolStatement,
        AlterResourceGovernorStatement,
        AlterResourcePoolStatement,
        AlterWorkloadGroupStatement,
        CreateExternalResourcePoolStatement,
        CreateResourcePoolStatement,
        CreateWorkloadClassifierStatement,
        CreateWorkloadGroupStatement,

        // external objects
        AlterExternalDataSourceStatement,
        AlterExternalLanguageStatement,
        AlterExternalLibraryStatement,
        AlterExternalModelStatement,
        CreateExternalDataSourceStatement,
        CreateExternalFileFormatStatement,
        CreateExternalLanguageStatement,
        CreateExternalLibraryStatement,
        CreateExternalModelStatement,
        CreateExternalTableStatement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::{Identifier, SchemaObjectName};

    #[test]
    fn test_script_projection() {
        let script = Script::new(vec![
            DropTableStatement {
                is_if_exists: true,
                objects: vec![SchemaObjectName::new(vec![
                    Identifier::from_lexeme("[dbo]"),
                    Identifier::from_lexeme("[t1]"),
                ])],
            }
            .into(),
            BreakStatement {}.into(),
        ]);
        let value = script.to_value().unwrap();
        assert_eq!(value["$type"], "Script");
        assert_eq!(value["Statements"][0]["$type"], "DropTableStatement");
        assert_eq!(value["Statements"][0]["IsIfExists"], true);
        assert_eq!(value["Statements"][0]["Objects"][0]["SchemaIdentifier"]["Value"], "dbo");
        assert_eq!(value["Statements"][1]["$type"], "BreakStatement");
    }

    #[test]
    fn test_pretty_and_compact_agree() {
        let script = Script::new(vec![ContinueStatement {}.into()]);
        let compact: serde_json::Value =
            serde_json::from_str(&script.to_json().unwrap()).unwrap();
        let pretty: serde_json::Value =
            serde_json::from_str(&script.to_json_pretty().unwrap()).unwrap();
        assert_eq!(compact, pretty);
    }

    #[test]
    fn test_kind_matches_tag() {
        let statement: Statement = DropMasterKeyStatement {}.into();
        let value = serde_json::to_value(&statement).unwrap();
        assert_eq!(value["$type"], statement.kind());
    }
}
