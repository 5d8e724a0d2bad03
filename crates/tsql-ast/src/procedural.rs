//! Control flow, variables, cursors, transactions and EXECUTE

use crate::boolean::BooleanExpression;
use crate::expr::{ScalarExpression, VariableReference};
use crate::literal::StringLiteral;
use crate::names::{Identifier, IdentifierOrValueExpression, SchemaObjectName};
use crate::options::OptionState;
use crate::query::{AssignmentKind, QueryExpression};
use crate::statement::Statement;
use crate::table_def::TableDefinition;
use crate::types::DataTypeReference;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct PrintStatement {
    pub expression: ScalarExpression,
}

/// `THROW [number, message, state]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ThrowStatement {
    pub error_number: Option<ScalarExpression>,
    pub message: Option<ScalarExpression>,
    pub state: Option<ScalarExpression>,
}

/// `REVERT [WITH COOKIE = @c]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct RevertStatement {
    pub cookie: Option<ScalarExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DeclareVariableElement {
    pub variable_name: Identifier,
    pub data_type: Option<DataTypeReference>,
    pub value: Option<ScalarExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DeclareVariableStatement {
    pub declarations: Vec<DeclareVariableElement>,
}

/// `DECLARE @t [AS] TABLE (...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DeclareTableVariableStatement {
    pub variable_name: Identifier,
    pub as_defined: bool,
    pub definition: TableDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CursorDefinition {
    /// `LOCAL`, `FAST_FORWARD`, `SCROLL`, ... in PascalCase
    pub options: Vec<String>,
    pub select: QueryExpression,
    pub for_update_columns: Vec<Identifier>,
    pub is_read_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DeclareCursorStatement {
    pub name: Identifier,
    pub cursor_definition: CursorDefinition,
}

/// A cursor named by identifier, optionally `GLOBAL`, or held in a variable
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CursorId {
    pub is_global: bool,
    pub name: IdentifierOrValueExpression,
}

same_shape_nodes! {
    {
        pub cursor: CursorId,
    } =>
    OpenCursorStatement,
    CloseCursorStatement,
    DeallocateCursorStatement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FetchOrientation {
    None,
    First,
    Next,
    Prior,
    Last,
    Relative,
    Absolute,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct FetchCursorStatement {
    pub orientation: FetchOrientation,
    pub row_offset: Option<ScalarExpression>,
    pub cursor: CursorId,
    pub into_variables: Vec<VariableReference>,
}

/// `SET @v = expr`, `SET @v += expr`, `SET @c = CURSOR FOR ...`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SetVariableStatement {
    pub variable: VariableReference,
    pub assignment_kind: AssignmentKind,
    pub expression: Option<ScalarExpression>,
    pub cursor_definition: Option<CursorDefinition>,
}

/// `SET NOCOUNT, XACT_ABORT ON`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct PredicateSetStatement {
    pub options: Vec<String>,
    pub is_on: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Snapshot,
    Serializable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SetTransactionIsolationLevelStatement {
    pub level: IsolationLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SetIdentityInsertStatement {
    pub table: SchemaObjectName,
    pub is_on: bool,
}

/// `DATEFORMAT dmy`, `LOCK_TIMEOUT 100`, `DEADLOCK_PRIORITY LOW`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct GeneralSetCommand {
    pub command_type: String,
    pub parameter: ScalarExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct GeneralSetCommandStatement {
    pub commands: Vec<GeneralSetCommand>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct IfStatement {
    pub predicate: BooleanExpression,
    pub then_statement: Statement,
    pub else_statement: Option<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct WhileStatement {
    pub predicate: BooleanExpression,
    pub statement: Statement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct BeginEndBlockStatement {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct TryCatchStatement {
    pub try_statements: Vec<Statement>,
    pub catch_statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct BeginTransactionStatement {
    pub distributed: bool,
    pub name: Option<IdentifierOrValueExpression>,
    pub mark_defined: bool,
    pub mark_description: Option<ScalarExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CommitTransactionStatement {
    pub name: Option<IdentifierOrValueExpression>,
    pub delayed_durability_option: OptionState,
}

same_shape_nodes! {
    {
        pub name: Option<IdentifierOrValueExpression>,
    } =>
    RollbackTransactionStatement,
    SaveTransactionStatement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ReturnStatement {
    pub expression: Option<ScalarExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type")]
pub struct BreakStatement {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type")]
pub struct ContinueStatement {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct GoToStatement {
    pub label_name: Identifier,
}

/// `label:`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct LabelStatement {
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WaitForOption {
    Delay,
    Time,
    Statement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct WaitForStatement {
    pub wait_for_option: WaitForOption,
    pub parameter: Option<ScalarExpression>,
    pub timeout: Option<ScalarExpression>,
    pub statement: Option<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct UseStatement {
    pub database_name: Identifier,
}

/// `RAISERROR (msg, severity, state [, args]) [WITH LOG, NOWAIT, SETERROR]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct RaiseErrorStatement {
    pub first_parameter: ScalarExpression,
    pub second_parameter: ScalarExpression,
    pub third_parameter: ScalarExpression,
    pub optional_parameters: Vec<ScalarExpression>,
    pub raise_error_options: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExecuteAsOption {
    Caller,
    #[serde(rename = "Self")]
    SelfOption,
    Owner,
    Login,
    User,
    String,
}

/// `EXECUTE AS CALLER|SELF|OWNER|'name'` or `EXECUTE AS LOGIN|USER = 'name'`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ExecuteAsClause {
    pub execute_as_option: ExecuteAsOption,
    pub literal: Option<StringLiteral>,
}

/// `EXECUTE AS USER = 'x' [WITH NO REVERT | COOKIE INTO @c]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ExecuteAsStatement {
    pub execute_context: ExecuteAsClause,
    pub with_no_revert: bool,
    pub cookie: Option<VariableReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ExecuteParameter {
    pub variable: Option<VariableReference>,
    pub parameter_value: Option<ScalarExpression>,
    pub is_output: bool,
}

/// The procedure being executed: a name, optionally `;number`, or `@proc_var`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ProcedureReferenceName {
    pub procedure_reference: Option<SchemaObjectName>,
    pub number: Option<ScalarExpression>,
    pub procedure_variable: Option<VariableReference>,
}

node_enum! {
    pub enum ExecutableEntity {
        ExecutableProcedureReference,
        ExecutableStringList,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ExecutableProcedureReference {
    pub procedure_reference: ProcedureReferenceName,
    pub parameters: Vec<ExecuteParameter>,
}

/// `EXEC ('SELECT ' + @cols) [AT server]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ExecutableStringList {
    pub strings: Vec<ScalarExpression>,
    pub parameters: Vec<ExecuteParameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ExecuteSpecification {
    /// `@rc` in `EXEC @rc = proc`
    pub variable: Option<VariableReference>,
    pub linked_server: Option<Identifier>,
    pub execute_context: Option<ExecuteAsClause>,
    pub executable_entity: ExecutableEntity,
}

/// `WITH RECOMPILE`, `WITH RESULT SETS NONE|UNDEFINED|(...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ExecuteOption {
    pub option_kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ExecuteStatement {
    pub execute_specification: ExecuteSpecification,
    pub options: Vec<ExecuteOption>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_as_self_spelling() {
        let json = serde_json::to_value(ExecuteAsOption::SelfOption).unwrap();
        assert_eq!(json, "Self");
    }

    #[test]
    fn test_break_statement_shape() {
        let json = serde_json::to_value(BreakStatement {}).unwrap();
        assert_eq!(json, serde_json::json!({"$type": "BreakStatement"}));
    }
}
