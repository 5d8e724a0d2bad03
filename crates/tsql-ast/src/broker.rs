//! Endpoints and Service Broker objects

use crate::expr::ScalarExpression;
use crate::names::{Identifier, IdentifierOrValueExpression, SchemaObjectName};
use crate::options::StatementOption;
use serde::Serialize;

same_shape_nodes! {
    {
        pub name: Identifier,
        pub owner: Option<Identifier>,
        /// `STARTED`, `STOPPED`, `DISABLED`
        pub state: Option<String>,
        /// `TCP`, `HTTP`
        pub protocol: Option<String>,
        pub protocol_options: Vec<StatementOption>,
        /// `SERVICE_BROKER`, `DATABASE_MIRRORING`, `TSQL`, `SOAP`
        pub endpoint_type: Option<String>,
        pub payload_options: Vec<StatementOption>,
    } =>
    CreateEndpointStatement,
    AlterEndpointStatement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlterAction {
    NotSpecified,
    Add,
    Drop,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ServiceContract {
    pub name: Identifier,
    pub action: AlterAction,
}

same_shape_nodes! {
    {
        pub name: Identifier,
        pub owner: Option<Identifier>,
        pub queue_name: Option<SchemaObjectName>,
        pub service_contracts: Vec<ServiceContract>,
    } =>
    CreateServiceStatement,
    AlterServiceStatement,
}

same_shape_nodes! {
    {
        pub name: SchemaObjectName,
        pub options: Vec<StatementOption>,
        pub on_file_group: Option<IdentifierOrValueExpression>,
    } =>
    CreateQueueStatement,
    AlterQueueStatement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageSender {
    NotSpecified,
    Initiator,
    Target,
    Any,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ContractMessage {
    pub name: Identifier,
    pub sender: MessageSender,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateContractStatement {
    pub name: Identifier,
    pub owner: Option<Identifier>,
    pub messages: Vec<ContractMessage>,
}

same_shape_nodes! {
    {
        pub name: Identifier,
        pub owner: Option<Identifier>,
        /// `NONE`, `EMPTY`, `WELL_FORMED_XML`, `VALID_XML`
        pub validation_method: Option<String>,
        pub xml_schema_collection: Option<SchemaObjectName>,
    } =>
    CreateMessageTypeStatement,
    AlterMessageTypeStatement,
}

same_shape_nodes! {
    {
        pub name: Identifier,
        pub owner: Option<Identifier>,
        pub options: Vec<StatementOption>,
    } =>
    CreateRouteStatement,
    AlterRouteStatement,
}

same_shape_nodes! {
    {
        pub name: Identifier,
        pub owner: Option<Identifier>,
        pub service: Option<ScalarExpression>,
        pub options: Vec<StatementOption>,
    } =>
    CreateRemoteServiceBindingStatement,
    AlterRemoteServiceBindingStatement,
}

same_shape_nodes! {
    {
        pub name: Identifier,
        pub options: Vec<StatementOption>,
    } =>
    CreateBrokerPriorityStatement,
    AlterBrokerPriorityStatement,
}
