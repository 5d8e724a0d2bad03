//! CREATE dispatch plus tables, views, modules, indexes, schemas, types,
//! synonyms and sequences

use super::objects::ExternalModuleKind;
use super::options::option_kind_name;
use super::{PResult, Parser};
use crate::lexer::TokenKind;
use tsql_ast::drop::TriggerScope;
use tsql_ast::options::{FlagOption, StatementOption};
use tsql_ast::procedural::ExecuteAsClause;
use tsql_ast::routine::*;
use tsql_ast::table_def::TableDefinition;
use tsql_ast::{Identifier, Statement};

/// The verb a module definition was introduced with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModuleVerb {
    Create,
    Alter,
    CreateOrAlter,
}

/// Module options that precede `AS`
#[derive(Default)]
struct ModuleOptions {
    options: Vec<StatementOption>,
    execute_as: Option<ExecuteAsClause>,
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_create_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Create, "CREATE")?;
        let statement = if self.at(TokenKind::Or) && self.peek_is(TokenKind::Alter) {
            self.advance();
            self.advance();
            self.parse_create_or_alter_module()?
        } else {
            self.parse_create_object()?
        };
        self.skip_to_end_of_statement()?;
        Ok(statement)
    }

    fn parse_create_or_alter_module(&mut self) -> PResult<Statement> {
        let verb = ModuleVerb::CreateOrAlter;
        match self.current.kind {
            TokenKind::View => {
                self.advance();
                self.parse_view(verb)
            }
            TokenKind::Proc | TokenKind::Procedure => {
                self.advance();
                self.parse_procedure(verb)
            }
            TokenKind::Function => {
                self.advance();
                self.parse_function(verb)
            }
            TokenKind::Trigger => {
                self.advance();
                self.parse_trigger(verb)
            }
            _ => Err(self.unexpected("VIEW, PROCEDURE, FUNCTION or TRIGGER after CREATE OR ALTER")),
        }
    }

    fn parse_create_object(&mut self) -> PResult<Statement> {
        let verb = ModuleVerb::Create;
        match self.current.kind {
            TokenKind::Table => {
                self.advance();
                return self.parse_create_table();
            }
            TokenKind::View => {
                self.advance();
                return self.parse_view(verb);
            }
            TokenKind::Proc | TokenKind::Procedure => {
                self.advance();
                return self.parse_procedure(verb);
            }
            TokenKind::Function => {
                self.advance();
                return self.parse_function(verb);
            }
            TokenKind::Trigger => {
                self.advance();
                return self.parse_trigger(verb);
            }
            TokenKind::Unique | TokenKind::Clustered | TokenKind::Nonclustered | TokenKind::Index => {
                return self.parse_create_index();
            }
            TokenKind::Schema => {
                self.advance();
                return self.parse_create_schema();
            }
            TokenKind::Type => {
                self.advance();
                return self.parse_create_type();
            }
            TokenKind::User => {
                self.advance();
                return self.parse_create_user();
            }
            TokenKind::Login => {
                self.advance();
                return self.parse_create_login();
            }
            TokenKind::Certificate => {
                self.advance();
                return self.parse_create_certificate();
            }
            TokenKind::Credential => {
                self.advance();
                return self.parse_credential(false, false);
            }
            TokenKind::Database => {
                self.advance();
                if self.eat_words(&["SCOPED", "CREDENTIAL"]) {
                    return self.parse_credential(false, true);
                }
                return self.parse_create_database();
            }
            _ => {}
        }

        if self.at_word("COLUMNSTORE") {
            return self.parse_create_index();
        }
        if self.eat_word("SYNONYM") {
            let name = self.parse_schema_object_name()?;
            self.expect(TokenKind::For, "FOR")?;
            let for_name = self.parse_schema_object_name()?;
            return Ok(CreateSynonymStatement { name, for_name }.into());
        }
        if self.eat_word("SEQUENCE") {
            return self.parse_sequence(false);
        }
        if self.eat_word("ROLE") {
            return self.parse_create_role(false);
        }
        if self.eat_words(&["SERVER", "ROLE"]) {
            return self.parse_create_role(true);
        }
        if self.eat_words(&["APPLICATION", "ROLE"]) {
            return self.parse_application_role(false);
        }
        if self.eat_word("ASSEMBLY") {
            return self.parse_create_assembly();
        }
        if self.eat_words(&["MASTER", "KEY"]) {
            return self.parse_create_master_key();
        }
        if self.eat_words(&["SYMMETRIC", "KEY"]) {
            return self.parse_create_symmetric_key();
        }
        if self.eat_words(&["ASYMMETRIC", "KEY"]) {
            return self.parse_create_asymmetric_key();
        }
        if self.eat_word("ENDPOINT") {
            return self.parse_endpoint(false);
        }
        if self.eat_word("SERVICE") {
            return self.parse_service(false);
        }
        if self.eat_word("QUEUE") {
            return self.parse_queue(false);
        }
        if self.eat_word("CONTRACT") {
            return self.parse_create_contract();
        }
        if self.eat_words(&["MESSAGE", "TYPE"]) {
            return self.parse_message_type(false);
        }
        if self.eat_word("ROUTE") {
            return self.parse_route(false);
        }
        if self.eat_words(&["REMOTE", "SERVICE", "BINDING"]) {
            return self.parse_remote_service_binding(false);
        }
        if self.eat_words(&["BROKER", "PRIORITY"]) {
            return self.parse_broker_priority(false);
        }
        if self.eat_words(&["PARTITION", "FUNCTION"]) {
            return self.parse_create_partition_function();
        }
        if self.eat_words(&["PARTITION", "SCHEME"]) {
            return self.parse_create_partition_scheme();
        }
        if self.eat_words(&["FULLTEXT", "CATALOG"]) {
            return self.parse_create_fulltext_catalog();
        }
        if self.eat_words(&["FULLTEXT", "INDEX"]) {
            return self.parse_create_fulltext_index();
        }
        if self.eat_words(&["FULLTEXT", "STOPLIST"]) {
            return self.parse_create_fulltext_stoplist();
        }
        if self.eat_words(&["SEARCH", "PROPERTY", "LIST"]) {
            return self.parse_create_search_property_list();
        }
        if self.eat_words(&["XML", "SCHEMA", "COLLECTION"]) {
            return self.parse_xml_schema_collection(false);
        }
        if self.eat_words(&["WORKLOAD", "GROUP"]) {
            return self.parse_workload_group(false);
        }
        if self.eat_words(&["WORKLOAD", "CLASSIFIER"]) {
            return self.parse_create_workload_classifier();
        }
        if self.eat_words(&["RESOURCE", "POOL"]) {
            return self.parse_resource_pool(false, false);
        }
        if self.eat(TokenKind::External) {
            if self.eat_words(&["RESOURCE", "POOL"]) {
                return self.parse_resource_pool(false, true);
            }
            if self.eat_words(&["DATA", "SOURCE"]) {
                return self.parse_external_data_source(false);
            }
            if self.eat_words(&["FILE", "FORMAT"]) {
                return self.parse_create_external_file_format();
            }
            if self.eat(TokenKind::Table) {
                return self.parse_create_external_table();
            }
            if self.eat(TokenKind::Language) {
                return self.parse_external_module(ExternalModuleKind::Language, false);
            }
            if self.eat_word("LIBRARY") {
                return self.parse_external_module(ExternalModuleKind::Library, false);
            }
            if self.eat_word("MODEL") {
                return self.parse_external_module(ExternalModuleKind::Model, false);
            }
            return Err(self.unexpected("external object kind after CREATE EXTERNAL"));
        }
        Err(self.unexpected("object kind after CREATE"))
    }

    // ========== Tables ==========

    /// After `CREATE TABLE`
    fn parse_create_table(&mut self) -> PResult<Statement> {
        let schema_object_name = self.parse_schema_object_name()?;
        let definition = if self.at(TokenKind::LParen) {
            self.parse_table_definition()?
        } else {
            TableDefinition::default()
        };
        let mut statement = CreateTableStatement {
            schema_object_name,
            as_node: false,
            as_edge: false,
            definition,
            on_file_group_or_partition_scheme: None,
            text_image_on: None,
            file_stream_on: None,
            options: Vec::new(),
        };
        if self.at(TokenKind::As) && (self.peek_is_word("NODE") || self.peek_is_word("EDGE")) {
            self.advance();
            let kind = self.advance();
            statement.as_node = kind.is_word("NODE");
            statement.as_edge = kind.is_word("EDGE");
        }
        loop {
            if self.at(TokenKind::On) {
                statement.on_file_group_or_partition_scheme = self.parse_optional_file_group()?;
            } else if self.eat_word("TEXTIMAGE_ON") {
                statement.text_image_on = Some(self.parse_identifier_or_value()?);
            } else if self.eat_word("FILESTREAM_ON") {
                statement.file_stream_on = Some(self.parse_identifier_or_value()?);
            } else if self.at(TokenKind::With) && self.peek_is(TokenKind::LParen) {
                statement.options = self.parse_optional_with_options()?;
            } else {
                break;
            }
        }
        Ok(statement.into())
    }

    // ========== Views ==========

    /// After `[CREATE [OR ALTER] | ALTER] VIEW`
    pub(crate) fn parse_view(&mut self, verb: ModuleVerb) -> PResult<Statement> {
        let schema_object_name = self.parse_schema_object_name()?;
        let columns = if self.at(TokenKind::LParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            Vec::new()
        };
        let mut view_options = Vec::new();
        if self.eat(TokenKind::With) {
            loop {
                view_options.push(self.parse_statement_option()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::As, "AS")?;
        let select_statement = self.parse_embedded_select()?;
        let with_check_option = self.at(TokenKind::With) && self.peek_is(TokenKind::Check);
        if with_check_option {
            self.advance();
            self.advance();
            self.expect(TokenKind::Option, "OPTION")?;
        }
        Ok(match verb {
            ModuleVerb::Create => CreateViewStatement {
                schema_object_name,
                columns,
                view_options,
                select_statement,
                with_check_option,
            }
            .into(),
            ModuleVerb::Alter => AlterViewStatement {
                schema_object_name,
                columns,
                view_options,
                select_statement,
                with_check_option,
            }
            .into(),
            ModuleVerb::CreateOrAlter => CreateOrAlterViewStatement {
                schema_object_name,
                columns,
                view_options,
                select_statement,
                with_check_option,
            }
            .into(),
        })
    }

    /// `[WITH cte AS (...)] SELECT ...` as a node
    fn parse_embedded_select(&mut self) -> PResult<tsql_ast::dml::SelectStatement> {
        let ctes = if self.at(TokenKind::With) {
            Some(self.parse_with_ctes_and_xml_namespaces()?)
        } else {
            None
        };
        self.parse_select_node(ctes)
    }

    // ========== Procedures and functions ==========

    /// After `[CREATE [OR ALTER] | ALTER] PROC[EDURE]`
    pub(crate) fn parse_procedure(&mut self, verb: ModuleVerb) -> PResult<Statement> {
        let procedure_name = self.parse_schema_object_name()?;
        let number = if self.at(TokenKind::Semicolon) && self.peek_is(TokenKind::Number) {
            self.advance();
            Some(self.parse_primary_expression()?)
        } else {
            None
        };
        let parameters = if self.eat(TokenKind::LParen) {
            let parameters = self.parse_procedure_parameters()?;
            self.expect(TokenKind::RParen, "')'")?;
            parameters
        } else {
            self.parse_procedure_parameters()?
        };
        let ModuleOptions {
            options,
            execute_as,
        } = self.parse_module_options()?;
        let is_for_replication = self.at(TokenKind::For) && self.peek_is(TokenKind::Replication);
        if is_for_replication {
            self.advance();
            self.advance();
        }
        self.expect(TokenKind::As, "AS")?;
        let (statements, method_specifier) = self.parse_module_body()?;

        Ok(match verb {
            ModuleVerb::Create => CreateProcedureStatement {
                procedure_name,
                number,
                parameters,
                options,
                execute_as,
                is_for_replication,
                statements,
                method_specifier,
            }
            .into(),
            ModuleVerb::Alter => AlterProcedureStatement {
                procedure_name,
                number,
                parameters,
                options,
                execute_as,
                is_for_replication,
                statements,
                method_specifier,
            }
            .into(),
            ModuleVerb::CreateOrAlter => CreateOrAlterProcedureStatement {
                procedure_name,
                number,
                parameters,
                options,
                execute_as,
                is_for_replication,
                statements,
                method_specifier,
            }
            .into(),
        })
    }

    /// `@p [AS] type [VARYING] [NULL] [= default] [OUT|OUTPUT|READONLY], ...`
    fn parse_procedure_parameters(&mut self) -> PResult<Vec<ProcedureParameter>> {
        let mut parameters = Vec::new();
        while self.at_variable() {
            let variable_name = Identifier::from_lexeme(self.advance().literal);
            self.eat(TokenKind::As);
            let data_type = Some(self.parse_data_type()?);
            let is_varying = self.eat(TokenKind::Varying);
            if !self.eat(TokenKind::Null) && self.at(TokenKind::Not) && self.peek_is(TokenKind::Null) {
                self.advance();
                self.advance();
            }
            let value = if self.eat(TokenKind::Eq) {
                Some(self.parse_scalar_expression()?)
            } else {
                None
            };
            let modifier = if self.eat_word("OUTPUT") || self.eat_word("OUT") {
                ParameterModifier::Output
            } else if self.eat_word("READONLY") {
                ParameterModifier::ReadOnly
            } else {
                ParameterModifier::None
            };
            parameters.push(ProcedureParameter {
                variable_name,
                data_type,
                is_varying,
                value,
                modifier,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(parameters)
    }

    /// `WITH option, EXECUTE AS ..., RETURNS NULL ON NULL INPUT, ...`
    fn parse_module_options(&mut self) -> PResult<ModuleOptions> {
        let mut module = ModuleOptions::default();
        if !self.eat(TokenKind::With) {
            return Ok(module);
        }
        loop {
            let at_execute_as = matches!(self.current.kind, TokenKind::Exec | TokenKind::Execute)
                && self.peek_is(TokenKind::As);
            if at_execute_as {
                self.advance();
                self.advance();
                module.execute_as = Some(self.parse_execute_as_clause()?);
            } else if self.eat_words(&["RETURNS", "NULL", "ON", "NULL", "INPUT"]) {
                module.options.push(
                    FlagOption {
                        option_kind: "ReturnsNullOnNullInput".to_string(),
                    }
                    .into(),
                );
            } else if self.eat_words(&["CALLED", "ON", "NULL", "INPUT"]) {
                module.options.push(
                    FlagOption {
                        option_kind: "CalledOnNullInput".to_string(),
                    }
                    .into(),
                );
            } else {
                module.options.push(self.parse_statement_option()?);
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(module)
    }

    /// `EXTERNAL NAME assembly.class.method` or the statements up to the
    /// end of the batch
    fn parse_module_body(&mut self) -> PResult<(Vec<Statement>, Option<MethodSpecifier>)> {
        if self.at(TokenKind::External) && self.peek_is_word("NAME") {
            self.advance();
            self.advance();
            return Ok((Vec::new(), Some(self.parse_method_specifier()?)));
        }
        let statements = self.parse_statement_list(|p| p.at_batch_separator())?;
        Ok((statements, None))
    }

    fn parse_method_specifier(&mut self) -> PResult<MethodSpecifier> {
        let assembly_name = self.parse_identifier()?;
        let class_name = if self.eat(TokenKind::Dot) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let method_name = if class_name.is_some() && self.eat(TokenKind::Dot) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(MethodSpecifier {
            assembly_name,
            class_name,
            method_name,
        })
    }

    /// After `[CREATE [OR ALTER] | ALTER] FUNCTION`
    pub(crate) fn parse_function(&mut self, verb: ModuleVerb) -> PResult<Statement> {
        let name = self.parse_schema_object_name()?;
        self.expect(TokenKind::LParen, "'('")?;
        let parameters = self.parse_procedure_parameters()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect_word("RETURNS")?;

        let mut table_return = None;
        let mut scalar_return = None;
        if self.at_variable() {
            let variable_name = Identifier::from_lexeme(self.advance().literal);
            self.expect(TokenKind::Table, "TABLE")?;
            let definition = self.parse_table_definition()?;
            table_return = Some(TableValuedFunctionReturnType {
                variable_name,
                definition,
            });
        } else if !self.eat(TokenKind::Table) {
            scalar_return = Some(self.parse_data_type()?);
        }
        let inline = table_return.is_none() && scalar_return.is_none();

        let ModuleOptions {
            options,
            execute_as,
        } = self.parse_module_options()?;
        self.eat(TokenKind::As);

        let mut statements = Vec::new();
        let mut method_specifier = None;
        let return_type: Option<FunctionReturnType> = if inline {
            self.expect(TokenKind::Return, "RETURN")?;
            let select_statement = self.parse_embedded_select()?;
            Some(SelectFunctionReturnType { select_statement }.into())
        } else {
            (statements, method_specifier) = self.parse_module_body()?;
            match (table_return, scalar_return) {
                (Some(table), _) => Some(table.into()),
                (None, Some(data_type)) => Some(ScalarFunctionReturnType { data_type }.into()),
                (None, None) => None,
            }
        };

        Ok(match verb {
            ModuleVerb::Create => CreateFunctionStatement {
                name,
                parameters,
                return_type,
                options,
                execute_as,
                statements,
                method_specifier,
            }
            .into(),
            ModuleVerb::Alter => AlterFunctionStatement {
                name,
                parameters,
                return_type,
                options,
                execute_as,
                statements,
                method_specifier,
            }
            .into(),
            ModuleVerb::CreateOrAlter => CreateOrAlterFunctionStatement {
                name,
                parameters,
                return_type,
                options,
                execute_as,
                statements,
                method_specifier,
            }
            .into(),
        })
    }

    // ========== Triggers ==========

    /// After `[CREATE [OR ALTER] | ALTER] TRIGGER`
    pub(crate) fn parse_trigger(&mut self, verb: ModuleVerb) -> PResult<Statement> {
        let name = self.parse_schema_object_name()?;
        self.expect(TokenKind::On, "ON")?;
        let trigger_object = if self.eat(TokenKind::Database) {
            TriggerObject {
                trigger_scope: TriggerScope::Database,
                name: None,
            }
        } else if self.at(TokenKind::All) && self.peek_is_word("SERVER") {
            self.advance();
            self.advance();
            TriggerObject {
                trigger_scope: TriggerScope::AllServer,
                name: None,
            }
        } else {
            TriggerObject {
                trigger_scope: TriggerScope::Normal,
                name: Some(self.parse_schema_object_name()?),
            }
        };
        let ModuleOptions {
            options,
            execute_as,
        } = self.parse_module_options()?;

        let trigger_type = if self.eat(TokenKind::For) {
            TriggerType::For
        } else if self.eat_word("AFTER") {
            TriggerType::After
        } else if self.eat_words(&["INSTEAD", "OF"]) {
            TriggerType::InsteadOf
        } else {
            return Err(self.unexpected("FOR, AFTER or INSTEAD OF"));
        };
        let mut trigger_actions = Vec::new();
        loop {
            let action = self.parse_word()?;
            trigger_actions.push(TriggerAction {
                trigger_action_type: option_kind_name(&action.value),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        let with_append = self.at(TokenKind::With) && self.peek_is_word("APPEND");
        if with_append {
            self.advance();
            self.advance();
        }
        let is_not_for_replication = self.eat_not_for_replication();
        self.expect(TokenKind::As, "AS")?;
        let (statements, method_specifier) = self.parse_module_body()?;

        Ok(match verb {
            ModuleVerb::Create => CreateTriggerStatement {
                name,
                trigger_object,
                options,
                execute_as,
                trigger_type,
                trigger_actions,
                with_append,
                is_not_for_replication,
                statements,
                method_specifier,
            }
            .into(),
            ModuleVerb::Alter => AlterTriggerStatement {
                name,
                trigger_object,
                options,
                execute_as,
                trigger_type,
                trigger_actions,
                with_append,
                is_not_for_replication,
                statements,
                method_specifier,
            }
            .into(),
            ModuleVerb::CreateOrAlter => CreateOrAlterTriggerStatement {
                name,
                trigger_object,
                options,
                execute_as,
                trigger_type,
                trigger_actions,
                with_append,
                is_not_for_replication,
                statements,
                method_specifier,
            }
            .into(),
        })
    }

    // ========== Indexes ==========

    /// `[UNIQUE] [CLUSTERED|NONCLUSTERED] [COLUMNSTORE] INDEX name ON t ...`
    fn parse_create_index(&mut self) -> PResult<Statement> {
        let unique = self.eat(TokenKind::Unique);
        let clustered = if self.eat(TokenKind::Clustered) {
            Some(true)
        } else if self.eat(TokenKind::Nonclustered) {
            Some(false)
        } else {
            None
        };
        let is_column_store = self.eat_word("COLUMNSTORE");
        self.expect(TokenKind::Index, "INDEX")?;
        let name = self.parse_identifier()?;
        self.expect(TokenKind::On, "ON")?;
        let on_name = self.parse_schema_object_name()?;
        let columns = if self.at(TokenKind::LParen) {
            self.parse_sorted_columns()?
        } else {
            Vec::new()
        };
        let include_columns = if self.eat_word("INCLUDE") {
            self.parse_parenthesized_columns()?
        } else {
            Vec::new()
        };
        let filter_predicate = if self.eat(TokenKind::Where) {
            Some(self.parse_boolean_expression()?)
        } else {
            None
        };
        let index_options = self.parse_optional_index_options()?;
        let on_file_group_or_partition_scheme = self.parse_optional_file_group()?;
        let file_stream_on = if self.eat_word("FILESTREAM_ON") {
            Some(self.parse_identifier_or_value()?)
        } else {
            None
        };
        Ok(CreateIndexStatement {
            name,
            on_name,
            unique,
            clustered,
            is_column_store,
            columns,
            include_columns,
            filter_predicate,
            index_options,
            on_file_group_or_partition_scheme,
            file_stream_on,
        }
        .into())
    }

    /// After `ALTER INDEX`
    pub(crate) fn parse_alter_index(&mut self) -> PResult<Statement> {
        let all = self.eat(TokenKind::All);
        let name = if all { None } else { Some(self.parse_identifier()?) };
        self.expect(TokenKind::On, "ON")?;
        let on_name = self.parse_schema_object_name()?;

        let action = self.parse_word()?;
        let alter_index_type = match action.value.to_ascii_uppercase().as_str() {
            "REBUILD" => AlterIndexType::Rebuild,
            "DISABLE" => AlterIndexType::Disable,
            "REORGANIZE" => AlterIndexType::Reorganize,
            "SET" => AlterIndexType::Set,
            "RESUME" => AlterIndexType::Resume,
            "PAUSE" => AlterIndexType::Pause,
            "ABORT" => AlterIndexType::Abort,
            _ => {
                return Err(self.error_here(format!(
                    "Expected REBUILD, REORGANIZE, DISABLE, SET, RESUME, PAUSE or ABORT, found '{}'",
                    action.value
                )));
            }
        };

        let mut partition = None;
        let mut index_options = Vec::new();
        match alter_index_type {
            AlterIndexType::Set => {
                index_options = self.parse_index_option_list()?;
            }
            AlterIndexType::Rebuild | AlterIndexType::Reorganize | AlterIndexType::Resume => {
                if self.eat_word("PARTITION") {
                    self.expect(TokenKind::Eq, "'='")?;
                    if !self.eat(TokenKind::All) {
                        partition = Some(self.parse_scalar_expression()?);
                    }
                }
                index_options = self.parse_optional_index_options()?;
            }
            _ => {}
        }
        Ok(AlterIndexStatement {
            all,
            name,
            on_name,
            alter_index_type,
            partition,
            index_options,
        }
        .into())
    }

    // ========== Schemas, types, sequences ==========

    /// After `CREATE SCHEMA`: `[name] [AUTHORIZATION owner]` followed by any
    /// CREATE TABLE, CREATE VIEW, GRANT, DENY or REVOKE elements
    fn parse_create_schema(&mut self) -> PResult<Statement> {
        let name = if self.at(TokenKind::Authorization) {
            None
        } else {
            Some(self.parse_identifier()?)
        };
        let owner = self.parse_optional_owner()?;
        let mut statements = Vec::new();
        loop {
            let at_element = match self.current.kind {
                TokenKind::Create => matches!(self.peek.kind, TokenKind::Table | TokenKind::View),
                TokenKind::Grant | TokenKind::Deny | TokenKind::Revoke => true,
                _ => false,
            };
            if !at_element {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        Ok(CreateSchemaStatement {
            name,
            owner,
            statements,
        }
        .into())
    }

    /// After `CREATE TYPE`
    fn parse_create_type(&mut self) -> PResult<Statement> {
        let name = self.parse_schema_object_name()?;
        if self.eat(TokenKind::From) {
            let data_type = self.parse_data_type()?;
            let nullable = if self.eat(TokenKind::Null) {
                Some(true)
            } else if self.at(TokenKind::Not) && self.peek_is(TokenKind::Null) {
                self.advance();
                self.advance();
                Some(false)
            } else {
                None
            };
            return Ok(CreateTypeUddtStatement {
                name,
                data_type,
                nullable,
            }
            .into());
        }
        if self.at(TokenKind::External) && self.peek_is_word("NAME") {
            self.advance();
            self.advance();
            let assembly_name = self.parse_method_specifier()?;
            return Ok(CreateTypeUdtStatement {
                name,
                assembly_name,
            }
            .into());
        }
        self.expect(TokenKind::As, "FROM, EXTERNAL NAME or AS TABLE")?;
        self.expect(TokenKind::Table, "TABLE")?;
        let definition = self.parse_table_definition()?;
        let options = self.parse_optional_with_options()?;
        Ok(CreateTypeTableStatement {
            name,
            definition,
            options,
        }
        .into())
    }

    /// After `CREATE SEQUENCE` or `ALTER SEQUENCE`
    pub(crate) fn parse_sequence(&mut self, alter: bool) -> PResult<Statement> {
        let name = self.parse_schema_object_name()?;
        let mut sequence_options = Vec::new();
        while let Some(option) = self.parse_sequence_option()? {
            sequence_options.push(option);
        }
        Ok(if alter {
            AlterSequenceStatement {
                name,
                sequence_options,
            }
            .into()
        } else {
            CreateSequenceStatement {
                name,
                sequence_options,
            }
            .into()
        })
    }

    fn parse_sequence_option(&mut self) -> PResult<Option<SequenceOption>> {
        if self.eat(TokenKind::As) {
            let data_type = self.parse_data_type()?;
            return Ok(Some(
                DataTypeSequenceOption {
                    option_kind: "As".to_string(),
                    data_type,
                }
                .into(),
            ));
        }
        if self.eat_word("START") {
            self.expect(TokenKind::With, "WITH")?;
            return self.sequence_value("Start").map(Some);
        }
        if self.eat_word("INCREMENT") {
            self.expect(TokenKind::By, "BY")?;
            return self.sequence_value("Increment").map(Some);
        }
        if self.eat_word("RESTART") {
            if self.eat(TokenKind::With) {
                return self.sequence_value("Restart").map(Some);
            }
            return Ok(Some(simple_sequence_option("Restart", false)));
        }
        if self.at_word("NO") {
            let kind = self.nth(1);
            let no_value = ["MINVALUE", "MAXVALUE", "CYCLE", "CACHE"]
                .iter()
                .any(|w| kind.is_word(w));
            if no_value {
                self.advance();
                let option = self.advance();
                return Ok(Some(simple_sequence_option(&option_kind_name(option.literal), true)));
            }
            return Ok(None);
        }
        if self.at_word("MINVALUE") || self.at_word("MAXVALUE") {
            let option_kind = option_kind_name(self.advance().literal);
            return self.sequence_value(&option_kind).map(Some);
        }
        if self.eat_word("CYCLE") {
            return Ok(Some(simple_sequence_option("Cycle", false)));
        }
        if self.eat_word("CACHE") {
            if matches!(self.current.kind, TokenKind::Number | TokenKind::Minus) {
                return self.sequence_value("Cache").map(Some);
            }
            return Ok(Some(simple_sequence_option("Cache", false)));
        }
        Ok(None)
    }

    fn sequence_value(&mut self, option_kind: &str) -> PResult<SequenceOption> {
        let option_value = self.parse_unary_expression()?;
        Ok(ScalarExpressionSequenceOption {
            option_kind: option_kind.to_string(),
            option_value,
        }
        .into())
    }
}

fn simple_sequence_option(option_kind: &str, no_value: bool) -> SequenceOption {
    SimpleSequenceOption {
        option_kind: option_kind.to_string(),
        no_value,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use serde_json::{Value, json};

    fn statement(source: &str) -> Value {
        let script = parse(source).unwrap();
        assert_eq!(script.statements.len(), 1, "expected one statement in {source}");
        script.to_value().unwrap()["Statements"][0].clone()
    }

    #[test]
    fn test_create_table() {
        let value = statement(
            "CREATE TABLE dbo.orders (id INT IDENTITY(1, 1) NOT NULL, total MONEY, CONSTRAINT pk PRIMARY KEY (id)) ON [PRIMARY] TEXTIMAGE_ON [big] WITH (DATA_COMPRESSION = PAGE)",
        );
        assert_eq!(value["$type"], "CreateTableStatement");
        assert_eq!(value["Definition"]["ColumnDefinitions"].as_array().unwrap().len(), 2);
        assert_eq!(value["OnFileGroupOrPartitionScheme"]["Name"]["Value"], "PRIMARY");
        assert_eq!(value["TextImageOn"]["Value"], "big");
        assert_eq!(value["Options"][0]["OptionKind"], "DataCompression");

        let value = statement("CREATE TABLE likes AS EDGE");
        assert_eq!(value["AsEdge"], true);
        assert_eq!(value["Definition"]["ColumnDefinitions"], json!([]));
    }

    #[test]
    fn test_views() {
        let value = statement("CREATE VIEW v (a, b) WITH SCHEMABINDING AS SELECT x, y FROM dbo.t WITH CHECK OPTION");
        assert_eq!(value["$type"], "CreateViewStatement");
        assert_eq!(value["Columns"].as_array().unwrap().len(), 2);
        assert_eq!(value["ViewOptions"][0]["OptionKind"], "SchemaBinding");
        assert_eq!(value["WithCheckOption"], true);
        assert_eq!(value["SelectStatement"]["$type"], "SelectStatement");

        let value = statement("CREATE OR ALTER VIEW v AS WITH c AS (SELECT 1 AS n) SELECT n FROM c");
        assert_eq!(value["$type"], "CreateOrAlterViewStatement");
        assert!(value["SelectStatement"]["WithCtesAndXmlNamespaces"].is_object());

        assert_eq!(statement("ALTER VIEW v AS SELECT 1 AS one")["$type"], "AlterViewStatement");
    }

    #[test]
    fn test_procedures() {
        let value = statement(
            "CREATE PROCEDURE dbo.p @a INT = 1, @b VARCHAR(10) OUTPUT, @c CURSOR VARYING OUT WITH RECOMPILE, EXECUTE AS OWNER AS SET NOCOUNT ON; SELECT @a",
        );
        assert_eq!(value["$type"], "CreateProcedureStatement");
        let parameters = value["Parameters"].as_array().unwrap();
        assert_eq!(parameters.len(), 3);
        assert_eq!(parameters[0]["Value"]["Value"], "1");
        assert_eq!(parameters[1]["Modifier"], "Output");
        assert_eq!(parameters[2]["IsVarying"], true);
        assert_eq!(value["Options"][0]["OptionKind"], "Recompile");
        assert_eq!(value["ExecuteAs"]["ExecuteAsOption"], "Owner");
        assert_eq!(value["Statements"].as_array().unwrap().len(), 2);

        let value = statement("ALTER PROC p (@x INT READONLY) AS BEGIN RETURN 0 END");
        assert_eq!(value["$type"], "AlterProcedureStatement");
        assert_eq!(value["Parameters"][0]["Modifier"], "ReadOnly");

        let value = statement("CREATE PROCEDURE clr_p AS EXTERNAL NAME asm.[Ns.Cls].Run");
        assert_eq!(value["MethodSpecifier"]["ClassName"]["Value"], "Ns.Cls");
        assert_eq!(value["Statements"], json!([]));
    }

    #[test]
    fn test_procedure_body_ends_at_batch() {
        let script = parse("CREATE PROC p AS SELECT 1\nSELECT 2\nGO\nSELECT 3").unwrap();
        assert_eq!(script.statements.len(), 2);
        let json = script.to_value().unwrap();
        assert_eq!(json["Statements"][0]["Statements"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_functions() {
        let value = statement(
            "CREATE FUNCTION dbo.f (@x INT) RETURNS INT WITH SCHEMABINDING, RETURNS NULL ON NULL INPUT AS BEGIN RETURN @x * 2 END",
        );
        assert_eq!(value["ReturnType"]["$type"], "ScalarFunctionReturnType");
        assert_eq!(value["Options"][1]["OptionKind"], "ReturnsNullOnNullInput");
        assert_eq!(value["Statements"][0]["$type"], "BeginEndBlockStatement");

        let value = statement("CREATE OR ALTER FUNCTION f() RETURNS TABLE AS RETURN (SELECT 1 AS one)");
        assert_eq!(value["$type"], "CreateOrAlterFunctionStatement");
        assert_eq!(value["ReturnType"]["$type"], "SelectFunctionReturnType");

        let value = statement("ALTER FUNCTION f() RETURNS @r TABLE (id INT) AS BEGIN INSERT @r VALUES (1) RETURN END");
        assert_eq!(value["ReturnType"]["$type"], "TableValuedFunctionReturnType");
        assert_eq!(value["ReturnType"]["VariableName"]["Value"], "@r");
    }

    #[test]
    fn test_triggers() {
        let value = statement("CREATE TRIGGER tr ON dbo.t AFTER INSERT, UPDATE NOT FOR REPLICATION AS PRINT 'x'");
        assert_eq!(value["TriggerType"], "After");
        assert_eq!(value["TriggerActions"][1]["TriggerActionType"], "Update");
        assert_eq!(value["IsNotForReplication"], true);
        assert_eq!(value["TriggerObject"]["TriggerScope"], "Normal");

        let value = statement("CREATE TRIGGER ddl ON DATABASE FOR CREATE_TABLE AS ROLLBACK");
        assert_eq!(value["TriggerObject"]["TriggerScope"], "Database");
        assert_eq!(value["TriggerActions"][0]["TriggerActionType"], "CreateTable");

        let value = statement("ALTER TRIGGER tr ON dbo.v INSTEAD OF DELETE AS RETURN");
        assert_eq!(value["TriggerType"], "InsteadOf");
    }

    #[test]
    fn test_indexes() {
        let value = statement(
            "CREATE UNIQUE NONCLUSTERED INDEX ix ON dbo.t (a DESC, b) INCLUDE (c) WHERE a > 0 WITH (FILLFACTOR = 80) ON ps(a)",
        );
        assert_eq!(value["Unique"], true);
        assert_eq!(value["Clustered"], false);
        assert_eq!(value["Columns"][0]["SortOrder"], "Descending");
        assert_eq!(value["IncludeColumns"].as_array().unwrap().len(), 1);
        assert_eq!(value["FilterPredicate"]["$type"], "BooleanComparisonExpression");
        assert_eq!(value["OnFileGroupOrPartitionScheme"]["PartitionSchemeColumns"][0]["Value"], "a");

        let value = statement("CREATE CLUSTERED COLUMNSTORE INDEX cci ON t");
        assert_eq!(value["IsColumnStore"], true);

        let value = statement("ALTER INDEX ALL ON t REBUILD PARTITION = 3 WITH (ONLINE = ON)");
        assert_eq!(value["All"], true);
        assert_eq!(value["AlterIndexType"], "Rebuild");
        assert_eq!(value["Partition"]["Value"], "3");

        let value = statement("ALTER INDEX ix ON t SET (ALLOW_PAGE_LOCKS = OFF)");
        assert_eq!(value["AlterIndexType"], "Set");
        assert_eq!(value["IndexOptions"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_schema_with_elements() {
        let value = statement("CREATE SCHEMA sales AUTHORIZATION dbo CREATE TABLE t (a INT) GRANT SELECT TO u");
        assert_eq!(value["Owner"]["Value"], "dbo");
        assert_eq!(value["Statements"][0]["$type"], "CreateTableStatement");
        assert_eq!(value["Statements"][1]["$type"], "GrantStatement");
    }

    #[test]
    fn test_types_and_synonyms() {
        let value = statement("CREATE TYPE dbo.Phone FROM VARCHAR(20) NOT NULL");
        assert_eq!(value["$type"], "CreateTypeUddtStatement");
        assert_eq!(value["Nullable"], false);

        let value = statement("CREATE TYPE dbo.Ids AS TABLE (id INT PRIMARY KEY)");
        assert_eq!(value["$type"], "CreateTypeTableStatement");

        let value = statement("CREATE TYPE Point EXTERNAL NAME geo.[Geo.Point]");
        assert_eq!(value["AssemblyName"]["AssemblyName"]["Value"], "geo");

        let value = statement("CREATE SYNONYM s1 FOR srv.db.dbo.t");
        assert_eq!(value["ForName"]["ServerIdentifier"]["Value"], "srv");
    }

    #[test]
    fn test_sequences() {
        let value = statement("CREATE SEQUENCE dbo.s AS BIGINT START WITH 1 INCREMENT BY -1 NO MAXVALUE CYCLE CACHE 50");
        let options = value["SequenceOptions"].as_array().unwrap();
        assert_eq!(options.len(), 6);
        assert_eq!(options[0]["$type"], "DataTypeSequenceOption");
        assert_eq!(options[2]["OptionKind"], "Increment");
        assert_eq!(options[3]["$type"], "SequenceOption");
        assert_eq!(options[3]["NoValue"], true);
        assert_eq!(options[3]["OptionKind"], "MaxValue");

        let value = statement("ALTER SEQUENCE s RESTART WITH 10 NO CACHE");
        assert_eq!(value["$type"], "AlterSequenceStatement");
        assert_eq!(value["SequenceOptions"][0]["OptionKind"], "Restart");
        assert_eq!(value["SequenceOptions"][1]["NoValue"], true);
    }

    #[test]
    fn test_unknown_create_kind_is_error() {
        let err = parse("CREATE WIDGET w").unwrap_err();
        assert!(err.message.contains("object kind after CREATE"));
        assert!(parse("CREATE OR ALTER TABLE t (a INT)").is_err());
    }
}
