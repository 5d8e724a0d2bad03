//! Endpoints, Service Broker, partitioning, full-text, XML schema
//! collections, Resource Governor and external objects
//!
//! Most of these statements are option bags. Their options go through the
//! generic [`StatementOption`] shapes; only the parts a consumer is likely to
//! query (names, owners, queues, file groups) get dedicated fields.

use super::options::option_kind_name;
use super::{PResult, Parser};
use crate::lexer::TokenKind;
use tsql_ast::broker::*;
use tsql_ast::external::*;
use tsql_ast::governor::*;
use tsql_ast::names::IdentifierOrValueExpression;
use tsql_ast::options::{FlagOption, IdentifierOption, ListOption, LiteralOption, StatementOption};
use tsql_ast::storage::*;
use tsql_ast::{Identifier, Statement};

/// Which `EXTERNAL` module statement is being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExternalModuleKind {
    Language,
    Library,
    Model,
}

impl<'a> Parser<'a> {
    // ========== Loose options ==========

    /// Source text between a `(` under the cursor and its matching `)`,
    /// e.g. the `0 TO 3` of `AFFINITY SCHEDULER = (0 TO 3)`
    fn parse_parenthesized_text(&mut self) -> PResult<String> {
        self.expect(TokenKind::LParen, "'('")?;
        let start = self.current.offset;
        let mut depth = 1usize;
        loop {
            match self.current.kind {
                TokenKind::Eof => return Err(self.unexpected("')'")),
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            self.advance();
        }
        let end = self.current.offset;
        self.advance();
        let source = self.lexer.source();
        Ok(source.get(start..end).unwrap_or_default().trim().to_string())
    }

    /// `NAME [=] value`, where the value may run over several words
    /// (`AUTHENTICATION = WINDOWS KERBEROS`) or be a parenthesized list kept
    /// as text (`LISTENER_IP = (127.0.0.1)`)
    fn parse_loose_option(&mut self) -> PResult<StatementOption> {
        let name = self.parse_word()?;
        let option_kind = option_kind_name(&name.value);
        let explicit = self.eat(TokenKind::Eq);

        if self.at(TokenKind::LParen) {
            let value = Identifier::new(self.parse_parenthesized_text()?);
            return Ok(IdentifierOption { option_kind, value }.into());
        }
        if self.current.kind.is_word() && !self.at_variable() && !self.at(TokenKind::Null) {
            if !explicit && self.at_statement_start() {
                return Ok(FlagOption { option_kind }.into());
            }
            let mut words = vec![self.parse_word()?.value];
            while self.current.kind.is_word() && !self.at_statement_start() {
                words.push(self.parse_word()?.value);
            }
            let value = Identifier::new(words.join(" "));
            return Ok(IdentifierOption { option_kind, value }.into());
        }
        if !explicit {
            return Ok(FlagOption { option_kind }.into());
        }
        let value = self.parse_unary_expression()?;
        Ok(LiteralOption {
            option_kind,
            value,
            unit: None,
        }
        .into())
    }

    /// `(loose option, ...)`
    fn parse_loose_option_list(&mut self) -> PResult<Vec<StatementOption>> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut options = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                options.push(self.parse_loose_option()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(options)
    }

    /// `WITH (...)` or the unparenthesized `WITH a = 1, b = 2`
    fn parse_with_option_bag(&mut self) -> PResult<Vec<StatementOption>> {
        if !self.eat(TokenKind::With) {
            return Ok(Vec::new());
        }
        if self.at(TokenKind::LParen) {
            self.parse_statement_option_list()
        } else {
            self.parse_bare_option_list()
        }
    }

    // ========== Endpoints ==========

    /// After `CREATE|ALTER ENDPOINT`:
    /// `name [AUTHORIZATION l] [STATE = s] [AS TCP (...)] [FOR SERVICE_BROKER (...)]`
    pub(crate) fn parse_endpoint(&mut self, alter: bool) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let owner = self.parse_optional_owner()?;
        let mut state = None;
        if self.eat_word("STATE") {
            self.expect(TokenKind::Eq, "'='")?;
            state = Some(option_kind_name(&self.parse_word()?.value));
        }

        let mut protocol = None;
        let mut protocol_options = Vec::new();
        if self.eat(TokenKind::As) {
            protocol = Some(self.parse_word()?.value.to_ascii_uppercase());
            if self.at(TokenKind::LParen) {
                protocol_options = self.parse_loose_option_list()?;
            }
        } else if !alter {
            return Err(self.unexpected("AS"));
        }

        let mut endpoint_type = None;
        let mut payload_options = Vec::new();
        if self.eat(TokenKind::For) {
            endpoint_type = Some(self.parse_word()?.value.to_ascii_uppercase());
            if self.at(TokenKind::LParen) {
                payload_options = self.parse_loose_option_list()?;
            }
        }

        if alter {
            Ok(AlterEndpointStatement {
                name,
                owner,
                state,
                protocol,
                protocol_options,
                endpoint_type,
                payload_options,
            }
            .into())
        } else {
            Ok(CreateEndpointStatement {
                name,
                owner,
                state,
                protocol,
                protocol_options,
                endpoint_type,
                payload_options,
            }
            .into())
        }
    }

    // ========== Service Broker ==========

    /// After `CREATE|ALTER SERVICE`:
    /// `name [AUTHORIZATION o] [ON QUEUE q] [(contract, ...)]`; the ALTER
    /// form lists `ADD CONTRACT c` / `DROP CONTRACT c`
    pub(crate) fn parse_service(&mut self, alter: bool) -> PResult<Statement> {
        let name = self.parse_word()?;
        let owner = self.parse_optional_owner()?;
        let queue_name = if self.at(TokenKind::On) && self.peek_is_word("QUEUE") {
            self.advance();
            self.advance();
            Some(self.parse_schema_object_name()?)
        } else {
            None
        };
        if !alter && queue_name.is_none() {
            return Err(self.unexpected("ON QUEUE"));
        }

        let mut service_contracts = Vec::new();
        if self.eat(TokenKind::LParen) {
            loop {
                let action = if self.eat(TokenKind::Add) {
                    AlterAction::Add
                } else if self.eat(TokenKind::Drop) {
                    AlterAction::Drop
                } else {
                    AlterAction::NotSpecified
                };
                if action != AlterAction::NotSpecified {
                    self.expect_word("CONTRACT")?;
                }
                let name = self.parse_word()?;
                service_contracts.push(ServiceContract { name, action });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen, "')'")?;
        }

        if alter {
            Ok(AlterServiceStatement {
                name,
                owner,
                queue_name,
                service_contracts,
            }
            .into())
        } else {
            Ok(CreateServiceStatement {
                name,
                owner,
                queue_name,
                service_contracts,
            }
            .into())
        }
    }

    /// After `CREATE|ALTER QUEUE`
    pub(crate) fn parse_queue(&mut self, alter: bool) -> PResult<Statement> {
        let name = self.parse_schema_object_name()?;
        let mut options = Vec::new();
        let mut on_file_group = None;

        if self.eat(TokenKind::With) {
            loop {
                options.push(self.parse_queue_option()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        if alter {
            for action in ["REBUILD", "REORGANIZE"] {
                if self.eat_word(action) {
                    let nested = self.parse_optional_with_options()?;
                    options.push(
                        ListOption {
                            option_kind: option_kind_name(action),
                            options: nested,
                        }
                        .into(),
                    );
                }
            }
            if self.at_word("MOVE") && self.peek_is(TokenKind::To) {
                self.advance();
                self.advance();
                on_file_group = Some(self.parse_file_group_name()?);
            }
        } else if self.eat(TokenKind::On) {
            on_file_group = Some(self.parse_file_group_name()?);
        }

        if alter {
            Ok(AlterQueueStatement {
                name,
                options,
                on_file_group,
            }
            .into())
        } else {
            Ok(CreateQueueStatement {
                name,
                options,
                on_file_group,
            }
            .into())
        }
    }

    /// `STATUS = ON`, `ACTIVATION (..., EXECUTE AS SELF)`, ...
    fn parse_queue_option(&mut self) -> PResult<StatementOption> {
        if !self.at_word("ACTIVATION") {
            return self.parse_statement_option();
        }
        self.advance();
        self.expect(TokenKind::LParen, "'('")?;
        let mut options = Vec::new();
        loop {
            if self.at(TokenKind::Execute) && self.peek_is(TokenKind::As) {
                self.advance();
                self.advance();
                let value = if self.at_string() {
                    let literal = self.parse_string_literal()?;
                    Identifier::new(literal.value)
                } else {
                    self.parse_word()?
                };
                options.push(
                    IdentifierOption {
                        option_kind: "ExecuteAs".to_string(),
                        value,
                    }
                    .into(),
                );
            } else {
                options.push(self.parse_statement_option()?);
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(ListOption {
            option_kind: "Activation".to_string(),
            options,
        }
        .into())
    }

    /// A file group reference: identifier, `[PRIMARY]`, bare `PRIMARY`,
    /// `DEFAULT` or a string
    fn parse_file_group_name(&mut self) -> PResult<IdentifierOrValueExpression> {
        if self.at_string() {
            return self.parse_identifier_or_value();
        }
        Ok(IdentifierOrValueExpression::from_identifier(self.parse_word()?))
    }

    /// After `CREATE CONTRACT`:
    /// `name [AUTHORIZATION o] (message SENT BY INITIATOR|TARGET|ANY, ...)`
    pub(crate) fn parse_create_contract(&mut self) -> PResult<Statement> {
        let name = self.parse_word()?;
        let owner = self.parse_optional_owner()?;
        self.expect(TokenKind::LParen, "'('")?;
        let mut messages = Vec::new();
        loop {
            let message = self.parse_word()?;
            self.expect_word("SENT")?;
            self.expect(TokenKind::By, "BY")?;
            let sender = self.parse_word()?;
            let sender = match sender.value.to_ascii_uppercase().as_str() {
                "INITIATOR" => MessageSender::Initiator,
                "TARGET" => MessageSender::Target,
                "ANY" => MessageSender::Any,
                _ => {
                    return Err(self.error_here(format!(
                        "Expected INITIATOR, TARGET or ANY, found '{}'",
                        sender.value
                    )));
                }
            };
            messages.push(ContractMessage {
                name: message,
                sender,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(CreateContractStatement {
            name,
            owner,
            messages,
        }
        .into())
    }

    /// After `CREATE|ALTER MESSAGE TYPE`:
    /// `name [AUTHORIZATION o] [VALIDATION = v [WITH SCHEMA COLLECTION c]]`
    pub(crate) fn parse_message_type(&mut self, alter: bool) -> PResult<Statement> {
        let name = self.parse_word()?;
        let owner = self.parse_optional_owner()?;
        let mut validation_method = None;
        let mut xml_schema_collection = None;
        if self.eat_word("VALIDATION") {
            self.expect(TokenKind::Eq, "'='")?;
            validation_method = Some(option_kind_name(&self.parse_word()?.value));
            if self.eat(TokenKind::With) {
                self.expect(TokenKind::Schema, "SCHEMA")?;
                self.expect_word("COLLECTION")?;
                xml_schema_collection = Some(self.parse_schema_object_name()?);
            }
        }
        if alter {
            Ok(AlterMessageTypeStatement {
                name,
                owner,
                validation_method,
                xml_schema_collection,
            }
            .into())
        } else {
            Ok(CreateMessageTypeStatement {
                name,
                owner,
                validation_method,
                xml_schema_collection,
            }
            .into())
        }
    }

    /// After `CREATE|ALTER ROUTE`: `name [AUTHORIZATION o] WITH option, ...`
    pub(crate) fn parse_route(&mut self, alter: bool) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let owner = self.parse_optional_owner()?;
        self.expect(TokenKind::With, "WITH")?;
        let options = self.parse_bare_option_list()?;
        if alter {
            Ok(AlterRouteStatement {
                name,
                owner,
                options,
            }
            .into())
        } else {
            Ok(CreateRouteStatement {
                name,
                owner,
                options,
            }
            .into())
        }
    }

    /// After `CREATE|ALTER REMOTE SERVICE BINDING`:
    /// `name [AUTHORIZATION o] [TO SERVICE 's'] WITH USER = u [, ANONYMOUS = ON]`
    pub(crate) fn parse_remote_service_binding(&mut self, alter: bool) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let owner = self.parse_optional_owner()?;
        let service = if self.at(TokenKind::To) && self.peek_is_word("SERVICE") {
            self.advance();
            self.advance();
            Some(self.parse_primary_expression()?)
        } else {
            None
        };
        if !alter && service.is_none() {
            return Err(self.unexpected("TO SERVICE"));
        }
        self.expect(TokenKind::With, "WITH")?;
        let options = self.parse_bare_option_list()?;
        if alter {
            Ok(AlterRemoteServiceBindingStatement {
                name,
                owner,
                service,
                options,
            }
            .into())
        } else {
            Ok(CreateRemoteServiceBindingStatement {
                name,
                owner,
                service,
                options,
            }
            .into())
        }
    }

    /// After `CREATE|ALTER BROKER PRIORITY`: `name FOR CONVERSATION SET (...)`
    pub(crate) fn parse_broker_priority(&mut self, alter: bool) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        self.expect(TokenKind::For, "FOR")?;
        self.expect_word("CONVERSATION")?;
        self.expect(TokenKind::Set, "SET")?;
        let options = self.parse_statement_option_list()?;
        if alter {
            Ok(AlterBrokerPriorityStatement { name, options }.into())
        } else {
            Ok(CreateBrokerPriorityStatement { name, options }.into())
        }
    }

    // ========== Partitioning ==========

    /// After `CREATE PARTITION FUNCTION`:
    /// `pf (type) AS RANGE [LEFT|RIGHT] FOR VALUES (v, ...)`
    pub(crate) fn parse_create_partition_function(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        self.expect(TokenKind::LParen, "'('")?;
        let parameter_type = self.parse_data_type()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::As, "AS")?;
        self.expect_word("RANGE")?;
        let range = if self.eat(TokenKind::Left) {
            PartitionFunctionRange::Left
        } else if self.eat(TokenKind::Right) {
            PartitionFunctionRange::Right
        } else {
            PartitionFunctionRange::NotSpecified
        };
        self.expect(TokenKind::For, "FOR")?;
        self.expect(TokenKind::Values, "VALUES")?;
        self.expect(TokenKind::LParen, "'('")?;
        let boundary_values = if self.at(TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_expression_comma_list()?
        };
        self.expect(TokenKind::RParen, "')'")?;
        Ok(CreatePartitionFunctionStatement {
            name,
            parameter_type,
            range,
            boundary_values,
        }
        .into())
    }

    /// After `ALTER PARTITION FUNCTION`: `pf() SPLIT|MERGE RANGE (v)`
    pub(crate) fn parse_alter_partition_function(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        self.expect(TokenKind::LParen, "'('")?;
        self.expect(TokenKind::RParen, "')'")?;
        let is_split = if self.eat_word("SPLIT") {
            true
        } else if self.eat(TokenKind::Merge) {
            false
        } else {
            return Err(self.unexpected("SPLIT or MERGE"));
        };
        self.expect_word("RANGE")?;
        self.expect(TokenKind::LParen, "'('")?;
        let boundary = if self.at(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_scalar_expression()?)
        };
        self.expect(TokenKind::RParen, "')'")?;
        Ok(AlterPartitionFunctionStatement {
            name,
            is_split,
            boundary,
        }
        .into())
    }

    /// After `CREATE PARTITION SCHEME`:
    /// `ps AS PARTITION pf [ALL] TO (fg, ...)`
    pub(crate) fn parse_create_partition_scheme(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        self.expect(TokenKind::As, "AS")?;
        self.expect_word("PARTITION")?;
        let partition_function = self.parse_identifier()?;
        let is_all = self.eat(TokenKind::All);
        self.expect(TokenKind::To, "TO")?;
        self.expect(TokenKind::LParen, "'('")?;
        let mut file_groups = vec![self.parse_file_group_name()?];
        while self.eat(TokenKind::Comma) {
            file_groups.push(self.parse_file_group_name()?);
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(CreatePartitionSchemeStatement {
            name,
            partition_function,
            is_all,
            file_groups,
        }
        .into())
    }

    /// After `ALTER PARTITION SCHEME`: `ps NEXT USED [fg]`
    pub(crate) fn parse_alter_partition_scheme(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        self.expect_word("NEXT")?;
        self.expect_word("USED")?;
        let file_group = if self.at_string() || (self.current.kind.is_word() && !self.at_statement_start()) {
            Some(self.parse_file_group_name()?)
        } else {
            None
        };
        Ok(AlterPartitionSchemeStatement { name, file_group }.into())
    }

    // ========== Full-text ==========

    /// After `CREATE FULLTEXT CATALOG`: `c [ON FILEGROUP fg] [IN PATH 'p']
    /// [WITH ACCENT_SENSITIVITY = ON|OFF] [AS DEFAULT] [AUTHORIZATION o]`
    pub(crate) fn parse_create_fulltext_catalog(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let mut statement = CreateFullTextCatalogStatement {
            name,
            file_group: None,
            options: Vec::new(),
            is_default: false,
            owner: None,
        };
        loop {
            if self.at(TokenKind::On) && self.peek_is_word("FILEGROUP") {
                self.advance();
                self.advance();
                statement.file_group = Some(self.parse_identifier()?);
            } else if self.at(TokenKind::In) && self.peek_is_word("PATH") {
                self.advance();
                self.advance();
                let value = self.parse_primary_expression()?;
                statement.options.push(
                    LiteralOption {
                        option_kind: "Path".to_string(),
                        value,
                        unit: None,
                    }
                    .into(),
                );
            } else if self.eat(TokenKind::With) {
                statement.options.push(self.parse_statement_option()?);
            } else if self.at(TokenKind::As) && self.peek_is(TokenKind::Default) {
                self.advance();
                self.advance();
                statement.is_default = true;
            } else if self.at(TokenKind::Authorization) {
                statement.owner = self.parse_optional_owner()?;
            } else {
                break;
            }
        }
        Ok(statement.into())
    }

    /// After `ALTER FULLTEXT CATALOG`: `c REBUILD [WITH ...] | REORGANIZE | AS DEFAULT`
    pub(crate) fn parse_alter_fulltext_catalog(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let mut options = Vec::new();
        let action = if self.eat_word("REBUILD") {
            if self.eat(TokenKind::With) {
                options.push(self.parse_statement_option()?);
            }
            "Rebuild"
        } else if self.eat_word("REORGANIZE") {
            "Reorganize"
        } else if self.at(TokenKind::As) && self.peek_is(TokenKind::Default) {
            self.advance();
            self.advance();
            "AsDefault"
        } else {
            return Err(self.unexpected("REBUILD, REORGANIZE or AS DEFAULT"));
        };
        Ok(AlterFullTextCatalogStatement {
            name,
            action: action.to_string(),
            options,
        }
        .into())
    }

    /// `col [TYPE COLUMN tc] [LANGUAGE l] [STATISTICAL_SEMANTICS]`
    fn parse_fulltext_index_column(&mut self) -> PResult<FullTextIndexColumn> {
        let name = self.parse_identifier()?;
        let mut column = FullTextIndexColumn {
            name,
            type_column: None,
            language_term: None,
            statistical_semantics: false,
        };
        loop {
            if self.at(TokenKind::Type) && self.peek_is(TokenKind::Column) {
                self.advance();
                self.advance();
                column.type_column = Some(self.parse_identifier()?);
            } else if self.eat(TokenKind::Language) {
                column.language_term = Some(self.parse_primary_expression()?);
            } else if self.eat_word("STATISTICAL_SEMANTICS") {
                column.statistical_semantics = true;
            } else {
                break;
            }
        }
        Ok(column)
    }

    fn parse_fulltext_index_columns(&mut self) -> PResult<Vec<FullTextIndexColumn>> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut columns = vec![self.parse_fulltext_index_column()?];
        while self.eat(TokenKind::Comma) {
            columns.push(self.parse_fulltext_index_column()?);
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(columns)
    }

    /// After `CREATE FULLTEXT INDEX`: `ON t [(cols)] KEY INDEX ix
    /// [ON catalog | ON (catalog, FILEGROUP fg)] [WITH [(] options [)]]`
    pub(crate) fn parse_create_fulltext_index(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::On, "ON")?;
        let on_name = self.parse_schema_object_name()?;
        let columns = if self.at(TokenKind::LParen) {
            self.parse_fulltext_index_columns()?
        } else {
            Vec::new()
        };
        self.expect(TokenKind::Key, "KEY")?;
        self.expect(TokenKind::Index, "INDEX")?;
        let key_index_name = self.parse_identifier()?;

        let mut catalog_name = None;
        let mut file_group = None;
        if self.eat(TokenKind::On) {
            if self.eat(TokenKind::LParen) {
                loop {
                    if self.eat_word("FILEGROUP") {
                        file_group = Some(self.parse_identifier()?);
                    } else {
                        catalog_name = Some(self.parse_identifier()?);
                    }
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RParen, "')'")?;
            } else {
                catalog_name = Some(self.parse_identifier()?);
            }
        }

        let mut options = Vec::new();
        if self.eat(TokenKind::With) {
            if self.at(TokenKind::LParen) {
                options = self.parse_loose_option_list()?;
            } else {
                options.push(self.parse_loose_option()?);
                while self.eat(TokenKind::Comma) {
                    options.push(self.parse_loose_option()?);
                }
            }
        }
        Ok(CreateFullTextIndexStatement {
            on_name,
            columns,
            key_index_name,
            catalog_name,
            file_group,
            options,
        }
        .into())
    }

    /// After `ALTER FULLTEXT INDEX`
    pub(crate) fn parse_alter_fulltext_index(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::On, "ON")?;
        let on_name = self.parse_schema_object_name()?;
        let mut columns = Vec::new();
        let mut options = Vec::new();

        let action = if self.eat_word("ENABLE") {
            "Enable".to_string()
        } else if self.eat_word("DISABLE") {
            "Disable".to_string()
        } else if self.eat(TokenKind::Set) {
            if self.eat_words(&["SEARCH", "PROPERTY", "LIST"]) {
                self.eat(TokenKind::Eq);
                let value = self.parse_word()?;
                options.push(
                    IdentifierOption {
                        option_kind: "SearchPropertyList".to_string(),
                        value,
                    }
                    .into(),
                );
            } else {
                options.push(self.parse_loose_option()?);
            }
            self.parse_fulltext_no_population(&mut options)?;
            "Set".to_string()
        } else if self.eat(TokenKind::Add) {
            columns = self.parse_fulltext_index_columns()?;
            self.parse_fulltext_no_population(&mut options)?;
            "Add".to_string()
        } else if self.at(TokenKind::Alter) && self.peek_is(TokenKind::Column) {
            self.advance();
            self.advance();
            let mut column = self.parse_fulltext_index_column()?;
            let verb = if self.eat(TokenKind::Add) {
                "AlterColumnAdd"
            } else {
                self.expect(TokenKind::Drop, "ADD or DROP")?;
                "AlterColumnDrop"
            };
            self.expect_word("STATISTICAL_SEMANTICS")?;
            column.statistical_semantics = true;
            columns.push(column);
            self.parse_fulltext_no_population(&mut options)?;
            verb.to_string()
        } else if self.eat(TokenKind::Drop) {
            columns = self.parse_fulltext_index_columns()?;
            self.parse_fulltext_no_population(&mut options)?;
            "Drop".to_string()
        } else if self.eat_word("START") {
            let kind = self.parse_word()?;
            self.expect_word("POPULATION")?;
            format!("Start{}Population", option_kind_name(&kind.value))
        } else if self.at_words(&["STOP", "POPULATION"])
            || self.at_words(&["PAUSE", "POPULATION"])
            || self.at_words(&["RESUME", "POPULATION"])
        {
            let verb = option_kind_name(self.advance().literal);
            self.advance();
            format!("{verb}Population")
        } else {
            return Err(self.unexpected("full-text index action"));
        };
        Ok(AlterFullTextIndexStatement {
            on_name,
            action,
            columns,
            options,
        }
        .into())
    }

    /// Optional `WITH NO POPULATION`
    fn parse_fulltext_no_population(&mut self, options: &mut Vec<StatementOption>) -> PResult<()> {
        if self.at(TokenKind::With) && self.peek_is_word("NO") {
            self.advance();
            self.advance();
            self.expect_word("POPULATION")?;
            options.push(
                FlagOption {
                    option_kind: "NoPopulation".to_string(),
                }
                .into(),
            );
        }
        Ok(())
    }

    /// After `CREATE FULLTEXT STOPLIST`
    pub(crate) fn parse_create_fulltext_stoplist(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let mut database_name = None;
        let mut source_stop_list_name = None;
        let mut is_system_stop_list = false;
        if self.eat(TokenKind::From) {
            if self.at_words(&["SYSTEM", "STOPLIST"]) {
                self.advance();
                self.advance();
                is_system_stop_list = true;
            } else {
                let first = self.parse_identifier()?;
                if self.eat(TokenKind::Dot) {
                    database_name = Some(first);
                    source_stop_list_name = Some(self.parse_identifier()?);
                } else {
                    source_stop_list_name = Some(first);
                }
            }
        }
        let owner = self.parse_optional_owner()?;
        Ok(CreateFullTextStopListStatement {
            name,
            database_name,
            source_stop_list_name,
            is_system_stop_list,
            owner,
        }
        .into())
    }

    /// After `ALTER FULLTEXT STOPLIST`:
    /// `s ADD 'w' LANGUAGE l | DROP 'w' LANGUAGE l | DROP ALL [LANGUAGE l]`
    pub(crate) fn parse_alter_fulltext_stoplist(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let action = if self.eat(TokenKind::Add) {
            AlterAction::Add
        } else {
            self.expect(TokenKind::Drop, "ADD or DROP")?;
            AlterAction::Drop
        };
        let is_all = action == AlterAction::Drop && self.eat(TokenKind::All);
        let stopword = if is_all {
            None
        } else {
            Some(self.parse_primary_expression()?)
        };
        let language_term = if self.eat(TokenKind::Language) {
            Some(self.parse_primary_expression()?)
        } else if is_all {
            None
        } else {
            return Err(self.unexpected("LANGUAGE"));
        };
        Ok(AlterFullTextStopListStatement {
            name,
            action,
            stopword,
            language_term,
            is_all,
        }
        .into())
    }

    /// After `CREATE SEARCH PROPERTY LIST`: `l [FROM [db.]src] [AUTHORIZATION o]`
    pub(crate) fn parse_create_search_property_list(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let source_search_property_list = if self.eat(TokenKind::From) {
            Some(self.parse_schema_object_name()?)
        } else {
            None
        };
        let owner = self.parse_optional_owner()?;
        Ok(CreateSearchPropertyListStatement {
            name,
            source_search_property_list,
            owner,
        }
        .into())
    }

    /// After `ALTER SEARCH PROPERTY LIST`: `l ADD 'p' WITH (...) | DROP 'p'`
    pub(crate) fn parse_alter_search_property_list(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let action = if self.eat(TokenKind::Add) {
            AlterAction::Add
        } else {
            self.expect(TokenKind::Drop, "ADD or DROP")?;
            AlterAction::Drop
        };
        let property_name = self.parse_primary_expression()?;
        let options = if action == AlterAction::Add {
            self.expect(TokenKind::With, "WITH")?;
            self.parse_statement_option_list()?
        } else {
            Vec::new()
        };
        Ok(AlterSearchPropertyListStatement {
            name,
            action,
            property_name,
            options,
        }
        .into())
    }

    /// After `CREATE|ALTER XML SCHEMA COLLECTION`: `name AS expr` / `name ADD expr`
    pub(crate) fn parse_xml_schema_collection(&mut self, alter: bool) -> PResult<Statement> {
        let name = self.parse_schema_object_name()?;
        if alter {
            self.expect(TokenKind::Add, "ADD")?;
            let expression = self.parse_scalar_expression()?;
            Ok(AlterXmlSchemaCollectionStatement { name, expression }.into())
        } else {
            self.expect(TokenKind::As, "AS")?;
            let expression = self.parse_scalar_expression()?;
            Ok(CreateXmlSchemaCollectionStatement { name, expression }.into())
        }
    }

    // ========== Resource Governor ==========

    /// After `CREATE|ALTER WORKLOAD GROUP`:
    /// `g [WITH (...)] [USING pool [, EXTERNAL ext_pool]]`
    pub(crate) fn parse_workload_group(&mut self, alter: bool) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let options = self.parse_optional_with_options()?;
        let mut pool_name = None;
        let mut external_pool_name = None;
        if self.eat_word("USING") {
            loop {
                if self.eat(TokenKind::External) {
                    external_pool_name = Some(self.parse_word()?);
                } else {
                    pool_name = Some(self.parse_word()?);
                }
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        if alter {
            Ok(AlterWorkloadGroupStatement {
                name,
                options,
                pool_name,
                external_pool_name,
            }
            .into())
        } else {
            Ok(CreateWorkloadGroupStatement {
                name,
                options,
                pool_name,
                external_pool_name,
            }
            .into())
        }
    }

    /// After `CREATE WORKLOAD CLASSIFIER`: `c WITH (WORKLOAD_GROUP = 'g', ...)`
    pub(crate) fn parse_create_workload_classifier(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        self.expect(TokenKind::With, "WITH")?;
        let options = self.parse_statement_option_list()?;
        Ok(CreateWorkloadClassifierStatement { name, options }.into())
    }

    /// After `CREATE|ALTER [EXTERNAL] RESOURCE POOL`: `p [WITH (...)]`
    pub(crate) fn parse_resource_pool(&mut self, alter: bool, external: bool) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let mut options = Vec::new();
        if self.at(TokenKind::With) && self.peek_is(TokenKind::LParen) {
            self.advance();
            self.advance();
            loop {
                options.push(self.parse_resource_pool_option()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen, "')'")?;
        }
        Ok(match (alter, external) {
            (false, false) => CreateResourcePoolStatement { name, options }.into(),
            (true, false) => AlterResourcePoolStatement { name, options }.into(),
            (false, true) => CreateExternalResourcePoolStatement { name, options }.into(),
            (true, true) => AlterExternalResourcePoolStatement { name, options }.into(),
        })
    }

    /// `AFFINITY SCHEDULER|NUMANODE|CPU = AUTO | (ranges)` or a generic option
    fn parse_resource_pool_option(&mut self) -> PResult<StatementOption> {
        if !self.at_word("AFFINITY") {
            return self.parse_statement_option();
        }
        self.advance();
        let target = self.parse_word()?;
        let option_kind = format!("Affinity{}", option_kind_name(&target.value));
        self.expect(TokenKind::Eq, "'='")?;
        let value = if self.at(TokenKind::LParen) {
            Identifier::new(self.parse_parenthesized_text()?)
        } else {
            self.parse_word()?
        };
        Ok(IdentifierOption { option_kind, value }.into())
    }

    /// After `ALTER RESOURCE GOVERNOR`
    pub(crate) fn parse_alter_resource_governor(&mut self) -> PResult<Statement> {
        let mut statement = AlterResourceGovernorStatement {
            command: ResourceGovernorCommand::NotSet,
            classifier_function: None,
            options: Vec::new(),
        };
        if self.eat_word("RECONFIGURE") {
            statement.command = ResourceGovernorCommand::Reconfigure;
        } else if self.eat_word("DISABLE") {
            statement.command = ResourceGovernorCommand::Disable;
        } else if self.eat_words(&["RESET", "STATISTICS"]) {
            statement.command = ResourceGovernorCommand::ResetStatistics;
        } else if self.eat(TokenKind::With) {
            self.expect(TokenKind::LParen, "'('")?;
            loop {
                if self.at_word("CLASSIFIER_FUNCTION") && self.peek_is(TokenKind::Eq) {
                    self.advance();
                    self.advance();
                    if !self.eat(TokenKind::Null) {
                        statement.classifier_function = Some(self.parse_schema_object_name()?);
                    }
                } else {
                    statement.options.push(self.parse_statement_option()?);
                }
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen, "')'")?;
        } else {
            return Err(self.unexpected("RECONFIGURE, DISABLE, RESET STATISTICS or WITH"));
        }
        Ok(statement.into())
    }

    // ========== External objects ==========

    /// After `CREATE|ALTER EXTERNAL DATA SOURCE`:
    /// `ds WITH (...)`, or `ds SET option, ...` when altering
    pub(crate) fn parse_external_data_source(&mut self, alter: bool) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        if alter {
            let options = if self.eat(TokenKind::Set) {
                self.parse_bare_option_list()?
            } else {
                self.parse_with_option_bag()?
            };
            return Ok(AlterExternalDataSourceStatement { name, options }.into());
        }
        self.expect(TokenKind::With, "WITH")?;
        let options = self.parse_statement_option_list()?;
        Ok(CreateExternalDataSourceStatement { name, options }.into())
    }

    /// After `CREATE EXTERNAL FILE FORMAT`: `ff WITH (FORMAT_TYPE = ..., ...)`
    pub(crate) fn parse_create_external_file_format(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        self.expect(TokenKind::With, "WITH")?;
        let options = self.parse_statement_option_list()?;
        Ok(CreateExternalFileFormatStatement { name, options }.into())
    }

    /// After `CREATE EXTERNAL TABLE`: `t (columns) WITH (LOCATION = ..., ...)`
    pub(crate) fn parse_create_external_table(&mut self) -> PResult<Statement> {
        let schema_object_name = self.parse_schema_object_name()?;
        let definition = self.parse_table_definition()?;
        let options = self.parse_optional_with_options()?;
        Ok(CreateExternalTableStatement {
            schema_object_name,
            column_definitions: definition.column_definitions,
            options,
        }
        .into())
    }

    /// After `CREATE|ALTER EXTERNAL LANGUAGE|LIBRARY|MODEL`:
    /// `name [AUTHORIZATION o] [FROM (...), ... | SET|ADD (...) | REMOVE PLATFORM p] [WITH (...)]`
    ///
    /// Each `FROM` file spec becomes a `From` list option; `WITH` options are
    /// kept flat.
    pub(crate) fn parse_external_module(&mut self, kind: ExternalModuleKind, alter: bool) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let owner = self.parse_optional_owner()?;
        let mut action = None;
        let mut options = Vec::new();

        if self.eat(TokenKind::From) {
            loop {
                let spec = self.parse_statement_option_list()?;
                options.push(
                    ListOption {
                        option_kind: "From".to_string(),
                        options: spec,
                    }
                    .into(),
                );
                if !(self.at(TokenKind::Comma) && self.peek_is(TokenKind::LParen)) {
                    break;
                }
                self.advance();
            }
        } else if alter {
            if self.at(TokenKind::Set) || self.at(TokenKind::Add) {
                action = Some(option_kind_name(self.advance().literal));
                options.extend(self.parse_statement_option_list()?);
            } else if self.eat_word("REMOVE") {
                action = Some("Remove".to_string());
                self.expect_word("PLATFORM")?;
                let value = self.parse_word()?;
                options.push(
                    IdentifierOption {
                        option_kind: "Platform".to_string(),
                        value,
                    }
                    .into(),
                );
            }
        }
        options.extend(self.parse_optional_with_options()?);

        Ok(match (kind, alter) {
            (ExternalModuleKind::Language, false) => CreateExternalLanguageStatement {
                name,
                owner,
                action,
                options,
            }
            .into(),
            (ExternalModuleKind::Language, true) => AlterExternalLanguageStatement {
                name,
                owner,
                action,
                options,
            }
            .into(),
            (ExternalModuleKind::Library, false) => CreateExternalLibraryStatement {
                name,
                owner,
                action,
                options,
            }
            .into(),
            (ExternalModuleKind::Library, true) => AlterExternalLibraryStatement {
                name,
                owner,
                action,
                options,
            }
            .into(),
            (ExternalModuleKind::Model, false) => CreateExternalModelStatement {
                name,
                owner,
                action,
                options,
            }
            .into(),
            (ExternalModuleKind::Model, true) => AlterExternalModelStatement {
                name,
                owner,
                action,
                options,
            }
            .into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use serde_json::Value;

    fn statement(source: &str) -> Value {
        let script = parse(source).unwrap();
        assert_eq!(script.statements.len(), 1, "expected one statement in {source}");
        script.to_value().unwrap()["Statements"][0].clone()
    }

    #[test]
    fn test_endpoint() {
        let value = statement(
            "CREATE ENDPOINT BrokerEndpoint STATE = STARTED AS TCP (LISTENER_PORT = 4022, LISTENER_IP = (127.0.0.1)) \
             FOR SERVICE_BROKER (AUTHENTICATION = WINDOWS KERBEROS, ENCRYPTION = REQUIRED ALGORITHM AES)",
        );
        assert_eq!(value["$type"], "CreateEndpointStatement");
        assert_eq!(value["State"], "Started");
        assert_eq!(value["Protocol"], "TCP");
        assert_eq!(value["ProtocolOptions"][0]["$type"], "LiteralOption");
        assert_eq!(value["ProtocolOptions"][1]["Value"]["Value"], "127.0.0.1");
        assert_eq!(value["EndpointType"], "SERVICE_BROKER");
        assert_eq!(value["PayloadOptions"][0]["Value"]["Value"], "WINDOWS KERBEROS");
        assert_eq!(value["PayloadOptions"][1]["Value"]["Value"], "REQUIRED ALGORITHM AES");

        let value = statement("ALTER ENDPOINT BrokerEndpoint STATE = STOPPED");
        assert_eq!(value["$type"], "AlterEndpointStatement");
        assert_eq!(value["Protocol"], Value::Null);
    }

    #[test]
    fn test_service_and_queue() {
        let value = statement(
            "CREATE SERVICE [//app/Expenses] AUTHORIZATION dbo ON QUEUE dbo.ExpenseQueue ([//app/Submit], [DEFAULT])",
        );
        assert_eq!(value["$type"], "CreateServiceStatement");
        assert_eq!(value["QueueName"]["BaseIdentifier"]["Value"], "ExpenseQueue");
        assert_eq!(value["ServiceContracts"][1]["Name"]["Value"], "DEFAULT");
        assert_eq!(value["ServiceContracts"][1]["Action"], "NotSpecified");

        let value = statement("ALTER SERVICE [//app/Expenses] (ADD CONTRACT [//app/New], DROP CONTRACT [//app/Old])");
        assert_eq!(value["ServiceContracts"][0]["Action"], "Add");
        assert_eq!(value["ServiceContracts"][1]["Action"], "Drop");

        let value = statement(
            "CREATE QUEUE dbo.ExpenseQueue WITH STATUS = ON, RETENTION = OFF, \
             ACTIVATION (STATUS = ON, PROCEDURE_NAME = dbo.process, MAX_QUEUE_READERS = 5, EXECUTE AS SELF) ON [DEFAULT]",
        );
        assert_eq!(value["Options"].as_array().unwrap().len(), 3);
        assert_eq!(value["Options"][2]["OptionKind"], "Activation");
        assert_eq!(value["Options"][2]["Options"][1]["Value"]["Value"], "dbo.process");
        assert_eq!(value["Options"][2]["Options"][3]["OptionKind"], "ExecuteAs");
        assert_eq!(value["OnFileGroup"]["Identifier"]["Value"], "DEFAULT");

        let value = statement("ALTER QUEUE dbo.ExpenseQueue REBUILD WITH (MAXDOP = 2)");
        assert_eq!(value["Options"][0]["OptionKind"], "Rebuild");
        assert_eq!(value["Options"][0]["Options"][0]["OptionKind"], "MaxDop");
    }

    #[test]
    fn test_contract_message_type_route() {
        let value = statement(
            "CREATE CONTRACT [//app/Contract] ([//app/Request] SENT BY INITIATOR, [//app/Reply] SENT BY TARGET, [DEFAULT] SENT BY ANY)",
        );
        assert_eq!(value["Messages"].as_array().unwrap().len(), 3);
        assert_eq!(value["Messages"][2]["Sender"], "Any");

        let value = statement("CREATE MESSAGE TYPE [//app/Request] VALIDATION = VALID_XML WITH SCHEMA COLLECTION dbo.RequestSchema");
        assert_eq!(value["ValidationMethod"], "ValidXml");
        assert_eq!(value["XmlSchemaCollection"]["BaseIdentifier"]["Value"], "RequestSchema");

        let value = statement("CREATE ROUTE ExpenseRoute WITH SERVICE_NAME = '//app/Expenses', ADDRESS = 'TCP://host:4022'");
        assert_eq!(value["$type"], "CreateRouteStatement");
        assert_eq!(value["Options"][1]["OptionKind"], "Address");

        let value = statement("CREATE REMOTE SERVICE BINDING b TO SERVICE '//remote/svc' WITH USER = remote_user, ANONYMOUS = ON");
        assert_eq!(value["Service"]["Value"], "//remote/svc");
        assert_eq!(value["Options"][1]["OptionState"], "On");

        let value = statement(
            "CREATE BROKER PRIORITY p FOR CONVERSATION SET (CONTRACT_NAME = [//app/Contract], LOCAL_SERVICE_NAME = ANY, PRIORITY_LEVEL = 8)",
        );
        assert_eq!(value["Options"][2]["Value"]["Value"], "8");
    }

    #[test]
    fn test_partitioning() {
        let value = statement("CREATE PARTITION FUNCTION pf (int) AS RANGE RIGHT FOR VALUES (1, 100, 1000)");
        assert_eq!(value["Range"], "Right");
        assert_eq!(value["BoundaryValues"].as_array().unwrap().len(), 3);

        let value = statement("ALTER PARTITION FUNCTION pf() SPLIT RANGE (500)");
        assert_eq!(value["IsSplit"], true);

        let value = statement("CREATE PARTITION SCHEME ps AS PARTITION pf ALL TO ([PRIMARY])");
        assert_eq!(value["IsAll"], true);
        assert_eq!(value["FileGroups"][0]["Identifier"]["Value"], "PRIMARY");

        let value = statement("ALTER PARTITION SCHEME ps NEXT USED fg5");
        assert_eq!(value["FileGroup"]["Identifier"]["Value"], "fg5");
    }

    #[test]
    fn test_fulltext() {
        let value = statement("CREATE FULLTEXT CATALOG ftc WITH ACCENT_SENSITIVITY = OFF AS DEFAULT AUTHORIZATION dbo");
        assert_eq!(value["IsDefault"], true);
        assert_eq!(value["Owner"]["Value"], "dbo");
        assert_eq!(value["Options"][0]["OptionKind"], "AccentSensitivity");

        let value = statement(
            "CREATE FULLTEXT INDEX ON dbo.Docs (Title LANGUAGE 1033, Body TYPE COLUMN Ext STATISTICAL_SEMANTICS) \
             KEY INDEX PK_Docs ON (ftc, FILEGROUP fg) WITH (CHANGE_TRACKING = AUTO, STOPLIST = SYSTEM)",
        );
        assert_eq!(value["Columns"][0]["LanguageTerm"]["Value"], "1033");
        assert_eq!(value["Columns"][1]["TypeColumn"]["Value"], "Ext");
        assert_eq!(value["Columns"][1]["StatisticalSemantics"], true);
        assert_eq!(value["CatalogName"]["Value"], "ftc");
        assert_eq!(value["FileGroup"]["Value"], "fg");
        assert_eq!(value["Options"][1]["Value"]["Value"], "SYSTEM");

        let value = statement("ALTER FULLTEXT INDEX ON dbo.Docs START FULL POPULATION");
        assert_eq!(value["Action"], "StartFullPopulation");
        let value = statement("ALTER FULLTEXT INDEX ON dbo.Docs ADD (Summary) WITH NO POPULATION");
        assert_eq!(value["Action"], "Add");
        assert_eq!(value["Options"][0]["OptionKind"], "NoPopulation");

        let value = statement("ALTER FULLTEXT STOPLIST sl ADD 'the' LANGUAGE 'English'");
        assert_eq!(value["Action"], "Add");
        let value = statement("ALTER FULLTEXT STOPLIST sl DROP ALL");
        assert_eq!(value["IsAll"], true);
        assert_eq!(value["Stopword"], Value::Null);

        let value = statement("CREATE FULLTEXT STOPLIST sl FROM SYSTEM STOPLIST");
        assert_eq!(value["IsSystemStopList"], true);
        let value = statement("CREATE FULLTEXT STOPLIST sl FROM otherdb.base AUTHORIZATION dbo");
        assert_eq!(value["DatabaseName"]["Value"], "otherdb");
    }

    #[test]
    fn test_search_property_list_and_xml_schema() {
        let value = statement(
            "ALTER SEARCH PROPERTY LIST spl ADD 'Title' WITH (PROPERTY_SET_GUID = 'F29F85E0-4FF9-1068-AB91-08002B27B3D9', PROPERTY_INT_ID = 2)",
        );
        assert_eq!(value["Action"], "Add");
        assert_eq!(value["Options"].as_array().unwrap().len(), 2);

        let value = statement("CREATE XML SCHEMA COLLECTION dbo.Schemas AS @schema");
        assert_eq!(value["$type"], "CreateXmlSchemaCollectionStatement");
        let value = statement("ALTER XML SCHEMA COLLECTION dbo.Schemas ADD N'<xsd:schema/>'");
        assert_eq!(value["$type"], "AlterXmlSchemaCollectionStatement");
    }

    #[test]
    fn test_resource_governor() {
        let value = statement("CREATE WORKLOAD GROUP reports WITH (IMPORTANCE = LOW, MAX_DOP = 2) USING [pool1], EXTERNAL ext_pool");
        assert_eq!(value["PoolName"]["Value"], "pool1");
        assert_eq!(value["ExternalPoolName"]["Value"], "ext_pool");

        let value = statement("CREATE RESOURCE POOL pool1 WITH (MAX_CPU_PERCENT = 20, AFFINITY SCHEDULER = (0 TO 3))");
        assert_eq!(value["Options"][1]["OptionKind"], "AffinityScheduler");
        assert_eq!(value["Options"][1]["Value"]["Value"], "0 TO 3");

        let value = statement("ALTER EXTERNAL RESOURCE POOL ext_pool WITH (AFFINITY CPU = AUTO)");
        assert_eq!(value["$type"], "AlterExternalResourcePoolStatement");

        let value = statement("ALTER RESOURCE GOVERNOR WITH (CLASSIFIER_FUNCTION = dbo.classify)");
        assert_eq!(value["Command"], "NotSet");
        assert_eq!(value["ClassifierFunction"]["BaseIdentifier"]["Value"], "classify");
        assert_eq!(statement("ALTER RESOURCE GOVERNOR RECONFIGURE")["Command"], "Reconfigure");
        assert_eq!(statement("ALTER RESOURCE GOVERNOR RESET STATISTICS")["Command"], "ResetStatistics");

        let value = statement("CREATE WORKLOAD CLASSIFIER wc WITH (WORKLOAD_GROUP = 'reports', MEMBERNAME = 'analyst')");
        assert_eq!(value["Options"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_external_objects() {
        let value = statement("CREATE EXTERNAL DATA SOURCE hdfs WITH (TYPE = HADOOP, LOCATION = 'hdfs://10.0.0.1:8020')");
        assert_eq!(value["Options"][0]["Value"]["Value"], "HADOOP");
        let value = statement("ALTER EXTERNAL DATA SOURCE hdfs SET LOCATION = 'hdfs://10.0.0.2:8020'");
        assert_eq!(value["$type"], "AlterExternalDataSourceStatement");

        let value = statement(
            "CREATE EXTERNAL FILE FORMAT csv WITH (FORMAT_TYPE = DELIMITEDTEXT, FORMAT_OPTIONS (FIELD_TERMINATOR = ',', USE_TYPE_DEFAULT = TRUE))",
        );
        assert_eq!(value["Options"][1]["$type"], "ListOption");

        let value = statement(
            "CREATE EXTERNAL TABLE dbo.Clicks (id int NOT NULL, url nvarchar(400)) WITH (LOCATION = '/clicks/', DATA_SOURCE = hdfs, FILE_FORMAT = csv)",
        );
        assert_eq!(value["ColumnDefinitions"].as_array().unwrap().len(), 2);
        assert_eq!(value["Options"].as_array().unwrap().len(), 3);

        let value = statement("CREATE EXTERNAL LIBRARY pkg FROM (CONTENT = 'C:\\pkg.zip', PLATFORM = WINDOWS) WITH (LANGUAGE = 'R')");
        assert_eq!(value["$type"], "CreateExternalLibraryStatement");
        assert_eq!(value["Options"][0]["OptionKind"], "From");
        assert_eq!(value["Options"][1]["OptionKind"], "Language");

        let value = statement("ALTER EXTERNAL LANGUAGE Java REMOVE PLATFORM LINUX");
        assert_eq!(value["Action"], "Remove");
        let value = statement("ALTER EXTERNAL MODEL m SET (LOCATION = 'https://host/embed')");
        assert_eq!(value["Action"], "Set");
    }
}
