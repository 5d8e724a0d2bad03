//! Principals, keys, certificates, permissions and signatures

use crate::expr::{ColumnReferenceExpression, ScalarExpression};
use crate::names::{Identifier, SchemaObjectName};
use crate::options::{OptionState, StatementOption};
use crate::routine::SecurityObjectKind;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UserLoginOptionType {
    Login,
    Certificate,
    AsymmetricKey,
    External,
    WithoutLogin,
}

/// `FOR LOGIN l`, `FROM CERTIFICATE c`, `FROM EXTERNAL PROVIDER`, `WITHOUT LOGIN`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct UserLoginOption {
    pub user_login_option_type: UserLoginOptionType,
    pub identifier: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateUserStatement {
    pub name: Identifier,
    pub user_login_option: Option<UserLoginOption>,
    pub options: Vec<StatementOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterUserStatement {
    pub name: Identifier,
    pub options: Vec<StatementOption>,
}

same_shape_nodes! {
    {
        pub name: Identifier,
        pub owner: Option<Identifier>,
    } =>
    CreateRoleStatement,
    CreateServerRoleStatement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlterRoleActionKind {
    AddMember,
    DropMember,
    Rename,
}

same_shape_nodes! {
    {
        pub name: Identifier,
        pub action: AlterRoleActionKind,
        /// The member for ADD/DROP MEMBER, the new name for WITH NAME
        pub target: Identifier,
    } =>
    AlterRoleStatement,
    AlterServerRoleStatement,
}

same_shape_nodes! {
    {
        pub name: Identifier,
        pub options: Vec<StatementOption>,
    } =>
    CreateApplicationRoleStatement,
    AlterApplicationRoleStatement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoginSourceKind {
    Password,
    Windows,
    Certificate,
    AsymmetricKey,
    External,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateLoginStatement {
    pub name: Identifier,
    pub source: LoginSourceKind,
    pub password: Option<ScalarExpression>,
    pub hashed: bool,
    pub must_change: bool,
    /// Certificate or asymmetric key name for key-mapped logins
    pub identifier: Option<Identifier>,
    pub options: Vec<StatementOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterLoginStatement {
    pub name: Identifier,
    /// `ENABLE` / `DISABLE`
    pub is_enable: Option<bool>,
    pub options: Vec<StatementOption>,
}

/// `CREATE ASSEMBLY a [AUTHORIZATION o] FROM bits, ... [WITH PERMISSION_SET = SAFE]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateAssemblyStatement {
    pub name: Identifier,
    pub owner: Option<Identifier>,
    pub parameters: Vec<ScalarExpression>,
    pub options: Vec<StatementOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterAssemblyStatement {
    pub name: Identifier,
    pub parameters: Vec<ScalarExpression>,
    pub options: Vec<StatementOption>,
    pub add_files: Vec<ScalarExpression>,
    pub drop_files: Vec<ScalarExpression>,
    pub is_drop_all: bool,
}

same_shape_nodes! {
    {
        pub name: Identifier,
        pub is_database_scoped: bool,
        pub identity: Option<ScalarExpression>,
        pub secret: Option<ScalarExpression>,
        pub crypto_provider: Option<Identifier>,
    } =>
    CreateCredentialStatement,
    AlterCredentialStatement,
}

/// `CREATE MASTER KEY [ENCRYPTION BY PASSWORD = '...']`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateMasterKeyStatement {
    pub password: Option<ScalarExpression>,
}

/// `ALTER MASTER KEY REGENERATE | ADD|DROP ENCRYPTION BY ...`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterMasterKeyStatement {
    pub option: String,
    pub password: Option<ScalarExpression>,
}

/// `ALTER SERVICE MASTER KEY [FORCE] REGENERATE | WITH OLD_ACCOUNT = ..., OLD_PASSWORD = ...`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterServiceMasterKeyStatement {
    pub kind: String,
    pub account: Option<ScalarExpression>,
    pub password: Option<ScalarExpression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CryptoMechanismType {
    Certificate,
    AsymmetricKey,
    SymmetricKey,
    Password,
}

/// `CERTIFICATE c [WITH PASSWORD = '...']`, `PASSWORD = '...'`, ...
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CryptoMechanism {
    pub crypto_mechanism_type: CryptoMechanismType,
    pub identifier: Option<Identifier>,
    pub password_or_signature: Option<ScalarExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateSymmetricKeyStatement {
    pub name: Identifier,
    pub owner: Option<Identifier>,
    pub key_options: Vec<StatementOption>,
    pub provider: Option<Identifier>,
    pub encrypting_mechanisms: Vec<CryptoMechanism>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterSymmetricKeyStatement {
    pub name: Identifier,
    pub is_add: bool,
    pub encrypting_mechanisms: Vec<CryptoMechanism>,
}

/// `CREATE ASYMMETRIC KEY k FROM FILE = '...' | WITH ALGORITHM = RSA_2048 ...`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateAsymmetricKeyStatement {
    pub name: Identifier,
    pub owner: Option<Identifier>,
    pub source_options: Vec<StatementOption>,
    pub options: Vec<StatementOption>,
    pub password: Option<ScalarExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterAsymmetricKeyStatement {
    pub name: Identifier,
    pub kind: String,
    pub options: Vec<StatementOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CreateCertificateStatement {
    pub name: Identifier,
    pub owner: Option<Identifier>,
    /// `FROM FILE = ...`, `FROM ASSEMBLY a`, `FROM BINARY = 0x...`
    pub source_options: Vec<StatementOption>,
    pub private_key_options: Vec<StatementOption>,
    /// `SUBJECT`, `START_DATE`, `EXPIRY_DATE`, `ENCRYPTION BY PASSWORD`
    pub options: Vec<StatementOption>,
    pub active_for_begin_dialog: OptionState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterCertificateStatement {
    pub name: Identifier,
    pub kind: String,
    pub private_key_options: Vec<StatementOption>,
    pub active_for_begin_dialog: OptionState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct Permission {
    pub identifiers: Vec<Identifier>,
    pub columns: Vec<Identifier>,
}

/// `ON [class::]name [(columns)]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SecurityTargetObject {
    pub object_kind: SecurityObjectKind,
    pub object_name: SchemaObjectName,
    pub columns: Vec<Identifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrincipalType {
    Specific,
    Public,
    Null,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SecurityPrincipal {
    pub principal_type: PrincipalType,
    pub identifier: Option<Identifier>,
}

same_shape_nodes! {
    {
        pub permissions: Vec<Permission>,
        pub security_target_object: Option<SecurityTargetObject>,
        pub principals: Vec<SecurityPrincipal>,
        pub with_grant_option: bool,
        pub cascade_option: bool,
        /// `REVOKE GRANT OPTION FOR ...`
        pub grant_option_for: bool,
        pub as_clause: Option<Identifier>,
    } =>
    GrantStatement,
    DenyStatement,
    RevokeStatement,
}

/// `ALTER AUTHORIZATION ON [class::]name TO principal | SCHEMA OWNER`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AlterAuthorizationStatement {
    pub security_target_object: SecurityTargetObject,
    pub to_schema_owner: bool,
    pub principal_name: Option<Identifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignableElementKind {
    NotSpecified,
    Object,
    Assembly,
    Database,
}

/// `ADD [COUNTER] SIGNATURE TO module BY crypto, ...`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AddSignatureStatement {
    pub is_counter: bool,
    pub element_kind: SignableElementKind,
    pub element: SchemaObjectName,
    pub cryptos: Vec<CryptoMechanism>,
}

/// `LABEL = 'x'`, `LABEL_ID = '...'`, `INFORMATION_TYPE = 'y'`, `RANK = HIGH`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SensitivityClassificationOption {
    pub option_type: String,
    pub value: ScalarExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct AddSensitivityClassificationStatement {
    pub columns: Vec<ColumnReferenceExpression>,
    pub options: Vec<SensitivityClassificationOption>,
}
