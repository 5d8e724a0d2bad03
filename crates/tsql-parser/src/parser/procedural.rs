//! Control flow, variables, cursors, transactions and EXECUTE

use super::options::option_kind_name;
use super::{PResult, Parser};
use crate::lexer::TokenKind;
use tsql_ast::expr::{ScalarExpression, VariableReference};
use tsql_ast::literal::{DefaultLiteral, IdentifierLiteral};
use tsql_ast::names::IdentifierOrValueExpression;
use tsql_ast::options::OptionState;
use tsql_ast::procedural::{
    BeginEndBlockStatement, BeginTransactionStatement, CloseCursorStatement,
    CommitTransactionStatement, CursorDefinition, CursorId, DeallocateCursorStatement,
    DeclareCursorStatement, DeclareTableVariableStatement, DeclareVariableElement,
    DeclareVariableStatement, ExecutableProcedureReference, ExecutableStringList,
    ExecuteAsClause, ExecuteAsOption, ExecuteAsStatement, ExecuteOption, ExecuteParameter,
    ExecuteSpecification, ExecuteStatement, FetchCursorStatement, FetchOrientation,
    GeneralSetCommand, GeneralSetCommandStatement, GoToStatement, IfStatement, IsolationLevel,
    LabelStatement, OpenCursorStatement, PredicateSetStatement, PrintStatement,
    ProcedureReferenceName, RaiseErrorStatement, ReturnStatement, RevertStatement,
    RollbackTransactionStatement, SaveTransactionStatement, SetIdentityInsertStatement,
    SetTransactionIsolationLevelStatement, SetVariableStatement, ThrowStatement,
    TryCatchStatement, UseStatement, WaitForOption, WaitForStatement, WhileStatement,
};
use tsql_ast::{Identifier, Statement};

/// Cursor options accepted between `DECLARE name` / `SET @c =` and `FOR`
const CURSOR_OPTIONS: &[&str] = &[
    "INSENSITIVE",
    "SCROLL",
    "LOCAL",
    "GLOBAL",
    "FORWARD_ONLY",
    "STATIC",
    "KEYSET",
    "DYNAMIC",
    "FAST_FORWARD",
    "READ_ONLY",
    "SCROLL_LOCKS",
    "OPTIMISTIC",
    "TYPE_WARNING",
];

impl<'a> Parser<'a> {
    // ========== Variables and cursors ==========

    pub(crate) fn parse_declare_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Declare, "DECLARE")?;

        if !self.at_variable() {
            let name = self.parse_identifier()?;
            let cursor_definition = self.parse_cursor_definition()?;
            return Ok(DeclareCursorStatement {
                name,
                cursor_definition,
            }
            .into());
        }

        let is_table = self.peek_is(TokenKind::Table)
            || (self.peek_is(TokenKind::As) && self.nth(2).kind == TokenKind::Table);
        if is_table {
            let variable_name = Identifier::new(self.advance().literal);
            let as_defined = self.eat(TokenKind::As);
            self.expect(TokenKind::Table, "TABLE")?;
            let definition = self.parse_table_definition()?;
            return Ok(DeclareTableVariableStatement {
                variable_name,
                as_defined,
                definition,
            }
            .into());
        }

        let mut declarations = Vec::new();
        loop {
            let variable_name = match self.at_variable() {
                true => Identifier::new(self.advance().literal),
                false => return Err(self.unexpected("variable")),
            };
            self.eat(TokenKind::As);
            let data_type = self.parse_data_type()?;
            let value = if self.eat(TokenKind::Eq) {
                Some(self.parse_scalar_expression()?)
            } else {
                None
            };
            declarations.push(DeclareVariableElement {
                variable_name,
                data_type: Some(data_type),
                value,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(DeclareVariableStatement { declarations }.into())
    }

    /// `[options] CURSOR [options] FOR select [FOR READ ONLY | FOR UPDATE [OF cols]]`
    fn parse_cursor_definition(&mut self) -> PResult<CursorDefinition> {
        let mut options = self.parse_cursor_options();
        self.expect(TokenKind::Cursor, "CURSOR")?;
        options.extend(self.parse_cursor_options());
        self.expect(TokenKind::For, "FOR")?;
        let select = self.parse_query_expression()?;

        let mut for_update_columns = Vec::new();
        let mut is_read_only = false;
        if self.at(TokenKind::For) {
            self.advance();
            if self.eat(TokenKind::Read) {
                self.expect_word("ONLY")?;
                is_read_only = true;
            } else {
                self.expect(TokenKind::Update, "READ ONLY or UPDATE")?;
                if self.eat(TokenKind::Of) {
                    for_update_columns = self.parse_identifier_comma_list()?;
                }
            }
        }
        Ok(CursorDefinition {
            options,
            select,
            for_update_columns,
            is_read_only,
        })
    }

    fn parse_cursor_options(&mut self) -> Vec<String> {
        let mut options = Vec::new();
        while CURSOR_OPTIONS.iter().any(|w| self.at_word(w)) {
            options.push(option_kind_name(self.advance().literal));
        }
        options
    }

    /// `[GLOBAL] name` or `@cursor`
    fn parse_cursor_id(&mut self) -> PResult<CursorId> {
        let is_global = self.at_word("GLOBAL")
            && (self.peek.kind == TokenKind::Ident || self.peek.kind.is_soft_keyword());
        if is_global {
            self.advance();
        }
        let name = if self.at_variable() {
            let literal = self.advance().literal;
            IdentifierOrValueExpression::from_value(literal, VariableReference::new(literal).into())
        } else {
            IdentifierOrValueExpression::from_identifier(self.parse_identifier()?)
        };
        Ok(CursorId { is_global, name })
    }

    pub(crate) fn parse_open_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Open, "OPEN")?;
        Ok(OpenCursorStatement {
            cursor: self.parse_cursor_id()?,
        }
        .into())
    }

    pub(crate) fn parse_close_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Close, "CLOSE")?;
        Ok(CloseCursorStatement {
            cursor: self.parse_cursor_id()?,
        }
        .into())
    }

    pub(crate) fn parse_deallocate_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Deallocate, "DEALLOCATE")?;
        Ok(DeallocateCursorStatement {
            cursor: self.parse_cursor_id()?,
        }
        .into())
    }

    /// `FETCH [NEXT | PRIOR | FIRST | LAST | ABSOLUTE n | RELATIVE n] [FROM] cursor [INTO @a, ...]`
    pub(crate) fn parse_fetch_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Fetch, "FETCH")?;
        let mut orientation = FetchOrientation::None;
        let mut row_offset = None;
        let simple = [
            ("NEXT", FetchOrientation::Next),
            ("PRIOR", FetchOrientation::Prior),
            ("FIRST", FetchOrientation::First),
            ("LAST", FetchOrientation::Last),
        ];
        if let Some((_, found)) = simple.iter().find(|(word, _)| self.at_word(word)) {
            orientation = *found;
            self.advance();
        } else if self.at_word("ABSOLUTE") || self.at_word("RELATIVE") {
            orientation = if self.advance().is_word("ABSOLUTE") {
                FetchOrientation::Absolute
            } else {
                FetchOrientation::Relative
            };
            row_offset = Some(self.parse_unary_expression()?);
        }
        self.eat(TokenKind::From);
        let cursor = self.parse_cursor_id()?;
        let mut into_variables = Vec::new();
        if self.eat(TokenKind::Into) {
            loop {
                into_variables.push(self.parse_variable()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        Ok(FetchCursorStatement {
            orientation,
            row_offset,
            cursor,
            into_variables,
        }
        .into())
    }

    // ========== SET ==========

    pub(crate) fn parse_set_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Set, "SET")?;

        if self.at_variable() {
            let variable = self.parse_variable()?;
            let assignment_kind = self.parse_assignment_operator()?;
            let at_cursor = self.at(TokenKind::Cursor)
                || (CURSOR_OPTIONS.iter().any(|w| self.at_word(w))
                    && !self.peek_is(TokenKind::Dot));
            if at_cursor {
                let cursor_definition = self.parse_cursor_definition()?;
                return Ok(SetVariableStatement {
                    variable,
                    assignment_kind,
                    expression: None,
                    cursor_definition: Some(cursor_definition),
                }
                .into());
            }
            let expression = self.parse_scalar_expression()?;
            return Ok(SetVariableStatement {
                variable,
                assignment_kind,
                expression: Some(expression),
                cursor_definition: None,
            }
            .into());
        }

        if self.at(TokenKind::Transaction) {
            self.advance();
            self.expect_word("ISOLATION")?;
            self.expect_word("LEVEL")?;
            let level = self.parse_isolation_level()?;
            return Ok(SetTransactionIsolationLevelStatement { level }.into());
        }

        if self.eat(TokenKind::IdentityInsert) {
            let table = self.parse_schema_object_name()?;
            let is_on = self.parse_option_state()? == OptionState::On;
            return Ok(SetIdentityInsertStatement { table, is_on }.into());
        }

        if self.at_predicate_set() {
            return self.parse_predicate_set();
        }

        let mut commands = Vec::new();
        loop {
            let name = self.parse_word()?;
            let parameter = if self.current.kind == TokenKind::Ident && !self.at_variable() {
                IdentifierLiteral::from_identifier(self.parse_identifier()?).into()
            } else {
                self.parse_unary_expression()?
            };
            commands.push(GeneralSetCommand {
                command_type: option_kind_name(&name.value),
                parameter,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(GeneralSetCommandStatement { commands }.into())
    }

    /// `SET name[, name...] ON|OFF`, including `SET STATISTICS IO ON`
    fn at_predicate_set(&self) -> bool {
        let mut n = 0;
        loop {
            let token = self.nth(n);
            if !token.kind.is_word() {
                return false;
            }
            let next = self.nth(n + 1);
            match next.kind {
                TokenKind::On | TokenKind::Off => return true,
                TokenKind::Comma => n += 2,
                _ if token.is_word("STATISTICS") && next.kind.is_word() => n += 1,
                _ => return false,
            }
        }
    }

    fn parse_predicate_set(&mut self) -> PResult<Statement> {
        let mut options = Vec::new();
        loop {
            let name = self.parse_word()?;
            if name.is_word("STATISTICS") {
                let detail = self.parse_word()?;
                options.push(option_kind_name(&format!("STATISTICS_{}", detail.value)));
                while self.at(TokenKind::Comma) && !self.peek.is_word("STATISTICS") {
                    self.advance();
                    let detail = self.parse_word()?;
                    options.push(option_kind_name(&format!("STATISTICS_{}", detail.value)));
                }
            } else {
                options.push(option_kind_name(&name.value));
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        let is_on = self.parse_option_state()? == OptionState::On;
        Ok(PredicateSetStatement { options, is_on }.into())
    }

    fn parse_isolation_level(&mut self) -> PResult<IsolationLevel> {
        if self.eat(TokenKind::Read) {
            if self.eat_word("UNCOMMITTED") {
                return Ok(IsolationLevel::ReadUncommitted);
            }
            self.expect_word("COMMITTED")?;
            return Ok(IsolationLevel::ReadCommitted);
        }
        if self.eat_word("REPEATABLE") {
            self.expect(TokenKind::Read, "READ")?;
            return Ok(IsolationLevel::RepeatableRead);
        }
        if self.eat_word("SNAPSHOT") {
            return Ok(IsolationLevel::Snapshot);
        }
        if self.eat_word("SERIALIZABLE") {
            return Ok(IsolationLevel::Serializable);
        }
        Err(self.unexpected("isolation level"))
    }

    // ========== Output and errors ==========

    pub(crate) fn parse_print_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Print, "PRINT")?;
        Ok(PrintStatement {
            expression: self.parse_scalar_expression()?,
        }
        .into())
    }

    /// `RAISERROR (msg, severity, state [, arg...]) [WITH LOG | NOWAIT | SETERROR, ...]`
    pub(crate) fn parse_raiserror_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Raiserror, "RAISERROR")?;
        self.expect(TokenKind::LParen, "'('")?;
        let first_parameter = self.parse_scalar_expression()?;
        self.expect(TokenKind::Comma, "','")?;
        let second_parameter = self.parse_scalar_expression()?;
        self.expect(TokenKind::Comma, "','")?;
        let third_parameter = self.parse_scalar_expression()?;
        let mut optional_parameters = Vec::new();
        while self.eat(TokenKind::Comma) {
            optional_parameters.push(self.parse_scalar_expression()?);
        }
        self.expect(TokenKind::RParen, "')'")?;

        let mut raise_error_options = Vec::new();
        if self.eat(TokenKind::With) {
            loop {
                let option = self.parse_word()?;
                raise_error_options.push(option_kind_name(&option.value));
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        Ok(RaiseErrorStatement {
            first_parameter,
            second_parameter,
            third_parameter,
            optional_parameters,
            raise_error_options,
        }
        .into())
    }

    /// `THROW` or `THROW number, message, state`
    pub(crate) fn parse_throw_statement(&mut self) -> PResult<Statement> {
        self.expect_word("THROW")?;
        if self.at_statement_boundary() || self.at(TokenKind::End) {
            return Ok(ThrowStatement {
                error_number: None,
                message: None,
                state: None,
            }
            .into());
        }
        let error_number = self.parse_scalar_expression()?;
        self.expect(TokenKind::Comma, "','")?;
        let message = self.parse_scalar_expression()?;
        self.expect(TokenKind::Comma, "','")?;
        let state = self.parse_scalar_expression()?;
        Ok(ThrowStatement {
            error_number: Some(error_number),
            message: Some(message),
            state: Some(state),
        }
        .into())
    }

    // ========== Control flow ==========

    pub(crate) fn parse_if_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::If, "IF")?;
        let predicate = self.parse_boolean_expression()?;
        let then_statement = self.parse_statement()?;
        if self.at(TokenKind::Semicolon) && self.peek_is(TokenKind::Else) {
            self.advance();
        }
        let else_statement = if self.eat(TokenKind::Else) {
            Some(self.parse_statement()?)
        } else {
            None
        };
        Ok(IfStatement {
            predicate,
            then_statement,
            else_statement,
        }
        .into())
    }

    pub(crate) fn parse_while_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::While, "WHILE")?;
        let predicate = self.parse_boolean_expression()?;
        let statement = self.parse_statement()?;
        Ok(WhileStatement {
            predicate,
            statement,
        }
        .into())
    }

    /// `BEGIN ... END`, `BEGIN TRY ... END TRY BEGIN CATCH ... END CATCH`
    /// or `BEGIN [DISTRIBUTED] TRAN`
    pub(crate) fn parse_begin_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Begin, "BEGIN")?;

        if self.at_word("TRY") {
            self.advance();
            let try_statements =
                self.parse_statement_list(|p| p.at(TokenKind::End) && p.peek_is_word("TRY"))?;
            self.expect(TokenKind::End, "END TRY")?;
            self.expect_word("TRY")?;
            self.expect(TokenKind::Begin, "BEGIN CATCH")?;
            self.expect_word("CATCH")?;
            let catch_statements =
                self.parse_statement_list(|p| p.at(TokenKind::End) && p.peek_is_word("CATCH"))?;
            self.expect(TokenKind::End, "END CATCH")?;
            self.expect_word("CATCH")?;
            return Ok(TryCatchStatement {
                try_statements,
                catch_statements,
            }
            .into());
        }

        let distributed = self.eat(TokenKind::Distributed);
        if distributed || self.at(TokenKind::Tran) || self.at(TokenKind::Transaction) {
            if !self.eat(TokenKind::Tran) {
                self.expect(TokenKind::Transaction, "TRANSACTION")?;
            }
            let name = self.parse_optional_transaction_name()?;
            let mut mark_defined = false;
            let mut mark_description = None;
            if self.at(TokenKind::With) && self.peek_is_word("MARK") {
                self.advance();
                self.advance();
                mark_defined = true;
                if self.at_string() || self.at_variable() {
                    mark_description = Some(self.parse_primary_expression()?);
                }
            }
            return Ok(BeginTransactionStatement {
                distributed,
                name,
                mark_defined,
                mark_description,
            }
            .into());
        }

        let statements = self.parse_statement_list(|p| p.at(TokenKind::End))?;
        self.expect(TokenKind::End, "END")?;
        Ok(BeginEndBlockStatement { statements }.into())
    }

    /// Optional `name` or `@name` after TRAN / TRANSACTION / SAVE / ROLLBACK
    fn parse_optional_transaction_name(&mut self) -> PResult<Option<IdentifierOrValueExpression>> {
        if self.at_variable() {
            let literal = self.advance().literal;
            return Ok(Some(IdentifierOrValueExpression::from_value(
                literal,
                VariableReference::new(literal).into(),
            )));
        }
        if self.at_identifier() && !self.at_statement_start() {
            return Ok(Some(IdentifierOrValueExpression::from_identifier(
                self.parse_identifier()?,
            )));
        }
        Ok(None)
    }

    /// `TRAN`, `TRANSACTION` or `WORK`, if present
    fn eat_transaction_word(&mut self) {
        if !self.eat(TokenKind::Tran) && !self.eat(TokenKind::Transaction) {
            self.eat_word("WORK");
        }
    }

    pub(crate) fn parse_commit_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Commit, "COMMIT")?;
        self.eat_transaction_word();
        let name = self.parse_optional_transaction_name()?;
        let mut delayed_durability_option = OptionState::NotSet;
        if self.at(TokenKind::With) && self.peek_is(TokenKind::LParen) {
            self.advance();
            self.advance();
            self.expect_word("DELAYED_DURABILITY")?;
            self.expect(TokenKind::Eq, "'='")?;
            delayed_durability_option = self.parse_option_state()?;
            self.expect(TokenKind::RParen, "')'")?;
        }
        Ok(CommitTransactionStatement {
            name,
            delayed_durability_option,
        }
        .into())
    }

    pub(crate) fn parse_rollback_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Rollback, "ROLLBACK")?;
        self.eat_transaction_word();
        let name = self.parse_optional_transaction_name()?;
        Ok(RollbackTransactionStatement { name }.into())
    }

    pub(crate) fn parse_save_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Save, "SAVE")?;
        if !self.eat(TokenKind::Tran) {
            self.expect(TokenKind::Transaction, "TRANSACTION")?;
        }
        let name = self.parse_optional_transaction_name()?;
        Ok(SaveTransactionStatement { name }.into())
    }

    pub(crate) fn parse_return_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Return, "RETURN")?;
        let expression = if self.can_start_expression() || self.at_variable() {
            Some(self.parse_scalar_expression()?)
        } else {
            None
        };
        Ok(ReturnStatement { expression }.into())
    }

    pub(crate) fn parse_goto_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Goto, "GOTO")?;
        Ok(GoToStatement {
            label_name: self.parse_identifier()?,
        }
        .into())
    }

    /// `name:`; the label keeps its colon
    pub(crate) fn parse_label_statement(&mut self) -> PResult<Statement> {
        let name = self.advance();
        let colon = self.expect(TokenKind::Colon, "':'")?;
        Ok(LabelStatement {
            value: format!("{}{}", name.literal, colon.literal),
        }
        .into())
    }

    /// `WAITFOR DELAY 'hh:mm'`, `WAITFOR TIME @t` or `WAITFOR (statement) [, TIMEOUT n]`
    pub(crate) fn parse_waitfor_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Waitfor, "WAITFOR")?;
        let wait_for_option = match self.current.kind {
            TokenKind::Delay => WaitForOption::Delay,
            TokenKind::Time => WaitForOption::Time,
            TokenKind::LParen => WaitForOption::Statement,
            _ => return Err(self.unexpected("DELAY, TIME or '('")),
        };
        let mut parameter = None;
        let mut statement = None;
        if wait_for_option == WaitForOption::Statement {
            self.advance();
            statement = Some(self.parse_statement()?);
            self.expect(TokenKind::RParen, "')'")?;
        } else {
            self.advance();
            parameter = Some(self.parse_unary_expression()?);
        }
        let timeout = if self.at(TokenKind::Comma) && self.peek_is_word("TIMEOUT") {
            self.advance();
            self.advance();
            Some(self.parse_unary_expression()?)
        } else {
            None
        };
        Ok(WaitForStatement {
            wait_for_option,
            parameter,
            timeout,
            statement,
        }
        .into())
    }

    pub(crate) fn parse_use_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Use, "USE")?;
        Ok(UseStatement {
            database_name: self.parse_identifier()?,
        }
        .into())
    }

    // ========== EXECUTE ==========

    /// `EXEC ...` as a statement, or `EXECUTE AS ...` context switch
    pub(crate) fn parse_execute_statement(&mut self) -> PResult<Statement> {
        if self.peek_is(TokenKind::As) {
            self.advance();
            self.advance();
            let execute_context = self.parse_execute_as_clause()?;
            let mut with_no_revert = false;
            let mut cookie = None;
            if self.at(TokenKind::With) {
                self.advance();
                if self.eat_words(&["NO", "REVERT"]) {
                    with_no_revert = true;
                } else {
                    self.expect_word("COOKIE")?;
                    self.expect(TokenKind::Into, "INTO")?;
                    cookie = Some(self.parse_variable()?);
                }
            }
            return Ok(ExecuteAsStatement {
                execute_context,
                with_no_revert,
                cookie,
            }
            .into());
        }

        let execute_specification = self.parse_execute_specification()?;
        let mut options = Vec::new();
        if self.eat(TokenKind::With) {
            loop {
                options.push(self.parse_execute_option()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        Ok(ExecuteStatement {
            execute_specification,
            options,
        }
        .into())
    }

    /// `RECOMPILE` or `RESULT SETS {NONE | UNDEFINED | (...)}`
    fn parse_execute_option(&mut self) -> PResult<ExecuteOption> {
        if self.eat_words(&["RESULT", "SETS"]) {
            if self.at(TokenKind::LParen) {
                self.skip_parenthesized()?;
                return Ok(ExecuteOption {
                    option_kind: "ResultSets".to_string(),
                });
            }
            let kind = self.parse_word()?;
            return Ok(ExecuteOption {
                option_kind: format!("ResultSets{}", option_kind_name(&kind.value)),
            });
        }
        let name = self.parse_word()?;
        Ok(ExecuteOption {
            option_kind: option_kind_name(&name.value),
        })
    }

    /// Consume a balanced `( ... )` group whose content has no node of its own
    pub(crate) fn skip_parenthesized(&mut self) -> PResult<()> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.current.kind {
                TokenKind::Eof => return Err(self.unexpected("')'")),
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth -= 1,
                _ => {}
            }
            self.advance();
        }
        Ok(())
    }

    /// `CALLER | SELF | OWNER | LOGIN = 'name' | USER = 'name'`
    pub(crate) fn parse_execute_as_clause(&mut self) -> PResult<ExecuteAsClause> {
        let execute_as_option = match self.current.kind {
            TokenKind::Login => ExecuteAsOption::Login,
            TokenKind::User => ExecuteAsOption::User,
            _ if self.at_word("CALLER") => ExecuteAsOption::Caller,
            _ if self.at_word("SELF") => ExecuteAsOption::SelfOption,
            _ if self.at_word("OWNER") => ExecuteAsOption::Owner,
            TokenKind::String | TokenKind::NationalString => {
                return Ok(ExecuteAsClause {
                    execute_as_option: ExecuteAsOption::String,
                    literal: Some(self.parse_string_literal()?),
                });
            }
            _ => return Err(self.unexpected("CALLER, SELF, OWNER, LOGIN or USER")),
        };
        self.advance();
        let literal = match execute_as_option {
            ExecuteAsOption::Login | ExecuteAsOption::User => {
                self.expect(TokenKind::Eq, "'='")?;
                Some(self.parse_string_literal()?)
            }
            _ => None,
        };
        Ok(ExecuteAsClause {
            execute_as_option,
            literal,
        })
    }

    /// The part of EXEC shared with `INSERT ... EXEC`
    pub(crate) fn parse_execute_specification(&mut self) -> PResult<ExecuteSpecification> {
        if !self.eat(TokenKind::Exec) {
            self.expect(TokenKind::Execute, "EXECUTE")?;
        }

        if self.at(TokenKind::LParen) {
            self.advance();
            let mut strings = vec![self.parse_unary_expression()?];
            while self.eat(TokenKind::Plus) {
                strings.push(self.parse_unary_expression()?);
            }
            let mut parameters = Vec::new();
            while self.eat(TokenKind::Comma) {
                parameters.push(self.parse_execute_parameter()?);
            }
            self.expect(TokenKind::RParen, "')'")?;
            let execute_context = if self.eat(TokenKind::As) {
                Some(self.parse_execute_as_clause()?)
            } else {
                None
            };
            let linked_server = if self.eat_word("AT") {
                Some(self.parse_identifier()?)
            } else {
                None
            };
            return Ok(ExecuteSpecification {
                variable: None,
                linked_server,
                execute_context,
                executable_entity: ExecutableStringList {
                    strings,
                    parameters,
                }
                .into(),
            });
        }

        let variable = if self.at_variable() && self.peek_is(TokenKind::Eq) {
            let variable = self.parse_variable()?;
            self.advance();
            Some(variable)
        } else {
            None
        };

        let procedure_reference = if self.at_variable() {
            ProcedureReferenceName {
                procedure_reference: None,
                number: None,
                procedure_variable: Some(self.parse_variable()?),
            }
        } else {
            let name = self.parse_schema_object_name()?;
            let number = if self.at(TokenKind::Semicolon) && self.peek_is(TokenKind::Number) {
                self.advance();
                Some(self.parse_primary_expression()?)
            } else {
                None
            };
            ProcedureReferenceName {
                procedure_reference: Some(name),
                number,
                procedure_variable: None,
            }
        };

        let mut parameters = Vec::new();
        if self.at_execute_parameter_start() {
            loop {
                parameters.push(self.parse_execute_parameter()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        Ok(ExecuteSpecification {
            variable,
            linked_server: None,
            execute_context: None,
            executable_entity: ExecutableProcedureReference {
                procedure_reference,
                parameters,
            }
            .into(),
        })
    }

    fn at_execute_parameter_start(&self) -> bool {
        if self.at(TokenKind::Default) || self.at_variable() {
            return true;
        }
        !self.at(TokenKind::With) && self.can_start_expression()
    }

    /// `[@name =] value [OUTPUT]` or `DEFAULT`
    fn parse_execute_parameter(&mut self) -> PResult<ExecuteParameter> {
        let variable = if self.at_variable() && self.peek_is(TokenKind::Eq) {
            let variable = self.parse_variable()?;
            self.advance();
            Some(variable)
        } else {
            None
        };
        let parameter_value: ScalarExpression = if self.at(TokenKind::Default) {
            DefaultLiteral::new(self.advance().literal).into()
        } else {
            self.parse_scalar_expression()?
        };
        let is_output = self.eat_word("OUTPUT") || self.eat_word("OUT");
        Ok(ExecuteParameter {
            variable,
            parameter_value: Some(parameter_value),
            is_output,
        })
    }

    /// `REVERT [WITH COOKIE = @c]`
    pub(crate) fn parse_revert_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Revert, "REVERT")?;
        let cookie = if self.at(TokenKind::With) && self.peek_is_word("COOKIE") {
            self.advance();
            self.advance();
            self.expect(TokenKind::Eq, "'='")?;
            Some(self.parse_scalar_expression()?)
        } else {
            None
        };
        Ok(RevertStatement { cookie }.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use serde_json::Value;

    fn statements(source: &str) -> Vec<Value> {
        let script = parse(source).unwrap();
        match script.to_value().unwrap()["Statements"].clone() {
            Value::Array(items) => items,
            other => panic!("statements not an array: {other}"),
        }
    }

    fn statement(source: &str) -> Value {
        let mut all = statements(source);
        assert_eq!(all.len(), 1, "expected one statement in {source}");
        all.remove(0)
    }

    #[test]
    fn test_declare_variables() {
        let value = statement("DECLARE @a INT = 1, @b AS NVARCHAR(10)");
        assert_eq!(value["$type"], "DeclareVariableStatement");
        assert_eq!(value["Declarations"][0]["VariableName"]["Value"], "@a");
        assert_eq!(value["Declarations"][0]["Value"]["Value"], "1");
        assert_eq!(value["Declarations"][1]["Value"], Value::Null);
    }

    #[test]
    fn test_declare_table_variable() {
        let value = statement("DECLARE @t AS TABLE (id INT PRIMARY KEY, name SYSNAME)");
        assert_eq!(value["$type"], "DeclareTableVariableStatement");
        assert_eq!(value["AsDefined"], true);
        assert_eq!(value["Definition"]["ColumnDefinitions"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_declare_cursor() {
        let value = statement("DECLARE c CURSOR LOCAL FAST_FORWARD FOR SELECT id FROM t FOR READ ONLY");
        assert_eq!(value["$type"], "DeclareCursorStatement");
        let definition = &value["CursorDefinition"];
        assert_eq!(definition["Options"][1], "FastForward");
        assert_eq!(definition["IsReadOnly"], true);

        let value = statement("DECLARE c INSENSITIVE SCROLL CURSOR FOR SELECT 1 FOR UPDATE OF a, b");
        assert_eq!(value["CursorDefinition"]["Options"][0], "Insensitive");
        assert_eq!(value["CursorDefinition"]["ForUpdateColumns"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_cursor_lifecycle() {
        let all = statements(
            "OPEN GLOBAL c; FETCH NEXT FROM c INTO @a, @b; FETCH ABSOLUTE 5 FROM @cur; CLOSE c; DEALLOCATE c",
        );
        assert_eq!(all[0]["Cursor"]["IsGlobal"], true);
        assert_eq!(all[1]["Orientation"], "Next");
        assert_eq!(all[1]["IntoVariables"].as_array().unwrap().len(), 2);
        assert_eq!(all[2]["RowOffset"]["Value"], "5");
        assert_eq!(all[2]["Cursor"]["Name"]["Value"], "@cur");
        assert_eq!(all[4]["$type"], "DeallocateCursorStatement");
    }

    #[test]
    fn test_set_forms() {
        let all = statements(
            "SET @x += 1; SET NOCOUNT, XACT_ABORT ON; SET STATISTICS IO, TIME OFF; \
             SET TRANSACTION ISOLATION LEVEL READ COMMITTED; SET IDENTITY_INSERT dbo.t ON; \
             SET DATEFORMAT dmy; SET LOCK_TIMEOUT 1000",
        );
        assert_eq!(all[0]["AssignmentKind"], "AddEquals");
        assert_eq!(all[1]["Options"], serde_json::json!(["NoCount", "XactAbort"]));
        assert_eq!(all[1]["IsOn"], true);
        assert_eq!(all[2]["Options"], serde_json::json!(["StatisticsIo", "StatisticsTime"]));
        assert_eq!(all[3]["Level"], "ReadCommitted");
        assert_eq!(all[4]["IsOn"], true);
        assert_eq!(all[5]["Commands"][0]["CommandType"], "DateFormat");
        assert_eq!(all[5]["Commands"][0]["Parameter"]["$type"], "IdentifierLiteral");
        assert_eq!(all[6]["Commands"][0]["Parameter"]["Value"], "1000");
    }

    #[test]
    fn test_set_cursor_variable() {
        let value = statement("SET @c = CURSOR FORWARD_ONLY FOR SELECT 1");
        assert_eq!(value["Expression"], Value::Null);
        assert_eq!(value["CursorDefinition"]["Options"][0], "ForwardOnly");
    }

    #[test]
    fn test_if_else_and_while() {
        let value = statement("IF @a > 1 PRINT 'big'; ELSE BEGIN PRINT 'small' END");
        assert_eq!(value["$type"], "IfStatement");
        assert_eq!(value["ThenStatement"]["$type"], "PrintStatement");
        assert_eq!(value["ElseStatement"]["$type"], "BeginEndBlockStatement");

        let value = statement("WHILE 1 = 1 BEGIN BREAK; CONTINUE END");
        assert_eq!(value["Statement"]["Statements"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_try_catch() {
        let value = statement(
            "BEGIN TRY SELECT 1/0 END TRY BEGIN CATCH THROW; END CATCH",
        );
        assert_eq!(value["$type"], "TryCatchStatement");
        assert_eq!(value["CatchStatements"][0]["$type"], "ThrowStatement");
        assert_eq!(value["CatchStatements"][0]["ErrorNumber"], Value::Null);
    }

    #[test]
    fn test_transactions() {
        let all = statements(
            "BEGIN TRAN t1 WITH MARK 'm'; SAVE TRANSACTION sp; ROLLBACK TRAN sp; \
             COMMIT TRANSACTION WITH (DELAYED_DURABILITY = ON); BEGIN DISTRIBUTED TRANSACTION",
        );
        assert_eq!(all[0]["Name"]["Value"], "t1");
        assert_eq!(all[0]["MarkDefined"], true);
        assert_eq!(all[1]["$type"], "SaveTransactionStatement");
        assert_eq!(all[2]["Name"]["Value"], "sp");
        assert_eq!(all[3]["DelayedDurabilityOption"], "On");
        assert_eq!(all[4]["Distributed"], true);
    }

    #[test]
    fn test_raiserror_and_throw() {
        let all = statements("RAISERROR ('bad %s', 16, 1, @x) WITH NOWAIT, LOG; THROW 50001, 'boom', 1");
        assert_eq!(all[0]["OptionalParameters"].as_array().unwrap().len(), 1);
        assert_eq!(all[0]["RaiseErrorOptions"], serde_json::json!(["NoWait", "Log"]));
        assert_eq!(all[1]["ErrorNumber"]["Value"], "50001");
    }

    #[test]
    fn test_waitfor_goto_use_return() {
        let all = statements(
            "WAITFOR DELAY '00:00:05'; GOTO done; USE [master]; done: RETURN 0",
        );
        assert_eq!(all[0]["WaitForOption"], "Delay");
        assert_eq!(all[1]["LabelName"]["Value"], "done");
        assert_eq!(all[2]["DatabaseName"]["Value"], "master");
        assert_eq!(all[3]["Value"], "done:");
        assert_eq!(all[4]["Expression"]["Value"], "0");
    }

    #[test]
    fn test_execute_procedure() {
        let value = statement("EXEC @rc = dbo.usp_do 1, @name = N'x', @out = @o OUTPUT, DEFAULT WITH RECOMPILE");
        let spec = &value["ExecuteSpecification"];
        assert_eq!(spec["Variable"]["Name"], "@rc");
        let entity = &spec["ExecutableEntity"];
        assert_eq!(entity["ProcedureReference"]["ProcedureReference"]["BaseIdentifier"]["Value"], "usp_do");
        assert_eq!(entity["Parameters"].as_array().unwrap().len(), 4);
        assert_eq!(entity["Parameters"][2]["IsOutput"], true);
        assert_eq!(entity["Parameters"][3]["ParameterValue"]["$type"], "DefaultLiteral");
        assert_eq!(value["Options"][0]["OptionKind"], "Recompile");
    }

    #[test]
    fn test_execute_dynamic_and_context() {
        let value = statement("EXEC ('SELECT ' + @cols) AT remote1");
        let spec = &value["ExecuteSpecification"];
        assert_eq!(spec["ExecutableEntity"]["Strings"].as_array().unwrap().len(), 2);
        assert_eq!(spec["LinkedServer"]["Value"], "remote1");

        let value = statement("EXECUTE AS USER = 'bob' WITH NO REVERT");
        assert_eq!(value["$type"], "ExecuteAsStatement");
        assert_eq!(value["ExecuteContext"]["ExecuteAsOption"], "User");
        assert_eq!(value["WithNoRevert"], true);

        let value = statement("EXECUTE AS SELF");
        assert_eq!(value["ExecuteContext"]["ExecuteAsOption"], "Self");
        assert_eq!(statement("REVERT")["Cookie"], Value::Null);
    }

    #[test]
    fn test_execute_without_parameters_stops_at_next_statement() {
        let all = statements("EXEC sp_who\nSELECT 1");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0]["ExecuteSpecification"]["ExecutableEntity"]["Parameters"], serde_json::json!([]));
    }
}
