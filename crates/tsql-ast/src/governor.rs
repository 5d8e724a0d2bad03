//! Resource Governor objects

use crate::names::{Identifier, SchemaObjectName};
use crate::options::StatementOption;
use serde::Serialize;

same_shape_nodes! {
    {
        pub name: Identifier,
        pub options: Vec<StatementOption>,
        /// `USING pool`
        pub pool_name: Option<Identifier>,
        /// `EXTERNAL external_pool`
        pub external_pool_name: Option<Identifier>,
    } =>
    CreateWorkloadGroupStatement,
    AlterWorkloadGroupStatement,
}

same_shape_nodes! {
    {
        pub name: Identifier,
        pub options: Vec<StatementOption>,
    } =>
    CreateWorkloadClassifierStatement,
    CreateResourcePoolStatement,
    AlterResourcePoolStatement,
    CreateExternalResourcePoolStatement,
    AlterExternalResourcePoolStatement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResourceGovernorCommand {
    NotSet,
    Reconfigure,
    Disable,
    ResetStatistics,
}

/// `ALTER RESOURCE GOVERNOR RECONFIGURE | DISABLE | RESET STATISTICS | WITH (...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterResourceGovernorStatement {
    pub command: ResourceGovernorCommand,
    pub classifier_function: Option<SchemaObjectName>,
    pub options: Vec<StatementOption>,
}
