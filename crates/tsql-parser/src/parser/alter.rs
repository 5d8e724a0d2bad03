//! ALTER dispatch and ALTER TABLE

use super::create::ModuleVerb;
use super::objects::ExternalModuleKind;
use super::{PResult, Parser};
use crate::lexer::TokenKind;
use tracing::debug;
use tsql_ast::alter_table::*;
use tsql_ast::literal::StringLiteral;
use tsql_ast::options::OptionState;
use tsql_ast::routine::AlterSchemaStatement;
use tsql_ast::table_def::TableDefinition;
use tsql_ast::{Identifier, SchemaObjectName, Statement};

impl<'a> Parser<'a> {
    pub(crate) fn parse_alter_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Alter, "ALTER")?;
        let statement = self.parse_alter_object()?;
        self.skip_to_end_of_statement()?;
        Ok(statement)
    }

    fn parse_alter_object(&mut self) -> PResult<Statement> {
        match self.current.kind {
            TokenKind::Table => {
                self.advance();
                return self.parse_alter_table();
            }
            TokenKind::View => {
                self.advance();
                return self.parse_view(ModuleVerb::Alter);
            }
            TokenKind::Proc | TokenKind::Procedure => {
                self.advance();
                return self.parse_procedure(ModuleVerb::Alter);
            }
            TokenKind::Function => {
                self.advance();
                return self.parse_function(ModuleVerb::Alter);
            }
            TokenKind::Trigger => {
                self.advance();
                return self.parse_trigger(ModuleVerb::Alter);
            }
            TokenKind::Index => {
                self.advance();
                return self.parse_alter_index();
            }
            TokenKind::Schema => {
                self.advance();
                return self.parse_alter_schema();
            }
            TokenKind::User => {
                self.advance();
                return self.parse_alter_user();
            }
            TokenKind::Login => {
                self.advance();
                return self.parse_alter_login();
            }
            TokenKind::Certificate => {
                self.advance();
                return self.parse_alter_certificate();
            }
            TokenKind::Credential => {
                self.advance();
                return self.parse_credential(true, false);
            }
            TokenKind::Authorization => {
                self.advance();
                return self.parse_alter_authorization();
            }
            TokenKind::Database => {
                self.advance();
                if self.eat_words(&["SCOPED", "CREDENTIAL"]) {
                    return self.parse_credential(true, true);
                }
                return self.parse_alter_database();
            }
            _ => {}
        }

        if self.eat_word("SEQUENCE") {
            return self.parse_sequence(true);
        }
        if self.eat_word("ROLE") {
            return self.parse_alter_role(false);
        }
        if self.eat_words(&["SERVER", "ROLE"]) {
            return self.parse_alter_role(true);
        }
        if self.eat_words(&["APPLICATION", "ROLE"]) {
            return self.parse_application_role(true);
        }
        if self.eat_word("ASSEMBLY") {
            return self.parse_alter_assembly();
        }
        if self.eat_words(&["MASTER", "KEY"]) {
            return self.parse_alter_master_key();
        }
        if self.eat_words(&["SERVICE", "MASTER", "KEY"]) {
            return self.parse_alter_service_master_key();
        }
        if self.eat_words(&["SYMMETRIC", "KEY"]) {
            return self.parse_alter_symmetric_key();
        }
        if self.eat_words(&["ASYMMETRIC", "KEY"]) {
            return self.parse_alter_asymmetric_key();
        }
        if self.eat_word("ENDPOINT") {
            return self.parse_endpoint(true);
        }
        if self.eat_word("SERVICE") {
            return self.parse_service(true);
        }
        if self.eat_word("QUEUE") {
            return self.parse_queue(true);
        }
        if self.eat_words(&["MESSAGE", "TYPE"]) {
            return self.parse_message_type(true);
        }
        if self.eat_word("ROUTE") {
            return self.parse_route(true);
        }
        if self.eat_words(&["REMOTE", "SERVICE", "BINDING"]) {
            return self.parse_remote_service_binding(true);
        }
        if self.eat_words(&["BROKER", "PRIORITY"]) {
            return self.parse_broker_priority(true);
        }
        if self.eat_words(&["PARTITION", "FUNCTION"]) {
            return self.parse_alter_partition_function();
        }
        if self.eat_words(&["PARTITION", "SCHEME"]) {
            return self.parse_alter_partition_scheme();
        }
        if self.eat_words(&["FULLTEXT", "CATALOG"]) {
            return self.parse_alter_fulltext_catalog();
        }
        if self.eat_words(&["FULLTEXT", "INDEX"]) {
            return self.parse_alter_fulltext_index();
        }
        if self.eat_words(&["FULLTEXT", "STOPLIST"]) {
            return self.parse_alter_fulltext_stoplist();
        }
        if self.eat_words(&["SEARCH", "PROPERTY", "LIST"]) {
            return self.parse_alter_search_property_list();
        }
        if self.eat_words(&["XML", "SCHEMA", "COLLECTION"]) {
            return self.parse_xml_schema_collection(true);
        }
        if self.eat_words(&["WORKLOAD", "GROUP"]) {
            return self.parse_workload_group(true);
        }
        if self.eat_words(&["RESOURCE", "POOL"]) {
            return self.parse_resource_pool(true, false);
        }
        if self.eat_words(&["RESOURCE", "GOVERNOR"]) {
            return self.parse_alter_resource_governor();
        }
        if self.eat(TokenKind::External) {
            if self.eat_words(&["RESOURCE", "POOL"]) {
                return self.parse_resource_pool(true, true);
            }
            if self.eat_words(&["DATA", "SOURCE"]) {
                return self.parse_external_data_source(true);
            }
            if self.eat(TokenKind::Language) {
                return self.parse_external_module(ExternalModuleKind::Language, true);
            }
            if self.eat_word("LIBRARY") {
                return self.parse_external_module(ExternalModuleKind::Library, true);
            }
            if self.eat_word("MODEL") {
                return self.parse_external_module(ExternalModuleKind::Model, true);
            }
            return Err(self.unexpected("external object kind after ALTER EXTERNAL"));
        }
        Err(self.unexpected("object kind after ALTER"))
    }

    /// `ALTER SCHEMA s TRANSFER [class::]object`
    fn parse_alter_schema(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        self.expect_word("TRANSFER")?;
        let object_kind = self.parse_optional_security_class()?;
        let object_name = self.parse_schema_object_name()?;
        Ok(AlterSchemaStatement {
            name,
            object_name,
            object_kind,
        }
        .into())
    }

    // ========== ALTER TABLE ==========

    /// After `ALTER TABLE`. An action the grammar does not know still yields
    /// a node when tail recovery is on.
    fn parse_alter_table(&mut self) -> PResult<Statement> {
        let schema_object_name = self.parse_schema_object_name()?;
        let checkpoint = self.checkpoint();
        let action_offset = self.current.offset;
        match self.parse_alter_table_action(schema_object_name.clone()) {
            Ok(statement) => {
                self.skip_to_end_of_statement()?;
                Ok(statement)
            }
            Err(err) if self.options.recover_statement_tails => {
                debug!(
                    offset = err.offset,
                    error = %err.message,
                    "unrecognized ALTER TABLE action"
                );
                self.restore(checkpoint);
                self.skip_past_failed_action(action_offset, err.offset);
                self.skip_to_end_of_statement()?;
                Ok(AlterTableSetStatement {
                    schema_object_name,
                    options: Vec::new(),
                }
                .into())
            }
            Err(err) => Err(err),
        }
    }

    /// Move from the start of a failed action up to the token that failed,
    /// then step over it (and any statement-start words right after it) when
    /// the tail skip would otherwise stop there. An unknown first word that
    /// starts a statement is left in place so it parses as the next statement.
    fn skip_past_failed_action(&mut self, action_offset: usize, failed_at: usize) {
        while self.current.offset < failed_at && !self.at(TokenKind::Eof) {
            self.advance();
        }
        if self.at(TokenKind::Eof) || self.at_batch_separator() {
            return;
        }
        let at_action_verb = matches!(
            self.current.kind,
            TokenKind::Alter | TokenKind::Drop | TokenKind::Set | TokenKind::Add
        );
        let step_over = if self.current.offset == action_offset {
            at_action_verb
        } else {
            at_action_verb || self.at_statement_start()
        };
        if step_over {
            self.advance();
            while self.at_statement_start() && !self.at_batch_separator() {
                self.advance();
            }
        }
    }

    fn parse_alter_table_action(&mut self, schema_object_name: SchemaObjectName) -> PResult<Statement> {
        let existing_row_check_enforcement = self.parse_existing_row_check()?;

        if self.eat(TokenKind::Add) {
            return self.parse_alter_table_add(schema_object_name, existing_row_check_enforcement);
        }
        if self.at(TokenKind::Check) || self.at(TokenKind::Nocheck) {
            let constraint_enforcement = if self.eat(TokenKind::Check) {
                ConstraintEnforcement::Check
            } else {
                self.advance();
                ConstraintEnforcement::NoCheck
            };
            self.expect(TokenKind::Constraint, "CONSTRAINT")?;
            let (all, constraint_names) = self.parse_all_or_names()?;
            return Ok(AlterTableConstraintModificationStatement {
                schema_object_name,
                existing_row_check_enforcement,
                constraint_enforcement,
                all,
                constraint_names,
            }
            .into());
        }
        if existing_row_check_enforcement != ConstraintEnforcement::NotSpecified {
            return Err(self.unexpected("ADD, CHECK or NOCHECK"));
        }

        if self.eat(TokenKind::Drop) {
            return self.parse_alter_table_drop(schema_object_name);
        }
        if self.at(TokenKind::Alter) && self.peek_is(TokenKind::Column) {
            self.advance();
            self.advance();
            return self.parse_alter_table_alter_column(schema_object_name);
        }
        if self.eat(TokenKind::Set) {
            let options = self.parse_statement_option_list()?;
            return Ok(AlterTableSetStatement {
                schema_object_name,
                options,
            }
            .into());
        }
        if self.at_word("ENABLE") || self.at_word("DISABLE") {
            let is_enable = self.advance().is_word("ENABLE");
            if self.eat(TokenKind::Trigger) {
                let (all, trigger_names) = self.parse_all_or_names()?;
                let trigger_enforcement = if is_enable {
                    TriggerEnforcement::Enable
                } else {
                    TriggerEnforcement::Disable
                };
                return Ok(AlterTableTriggerModificationStatement {
                    schema_object_name,
                    trigger_enforcement,
                    all,
                    trigger_names,
                }
                .into());
            }
            self.expect_word("CHANGE_TRACKING")?;
            let mut track_columns_updated = OptionState::NotSet;
            if self.at(TokenKind::With) && self.peek_is(TokenKind::LParen) {
                self.advance();
                self.advance();
                self.expect_word("TRACK_COLUMNS_UPDATED")?;
                self.expect(TokenKind::Eq, "'='")?;
                track_columns_updated = self.parse_option_state()?;
                self.expect(TokenKind::RParen, "')'")?;
            }
            return Ok(AlterTableChangeTrackingModificationStatement {
                schema_object_name,
                is_enable,
                track_columns_updated,
            }
            .into());
        }
        if self.eat_word("SWITCH") {
            return self.parse_alter_table_switch(schema_object_name);
        }
        if self.eat_word("REBUILD") {
            let mut partition = None;
            let mut is_all_partitions = false;
            if self.eat_word("PARTITION") {
                self.expect(TokenKind::Eq, "'='")?;
                if self.eat(TokenKind::All) {
                    is_all_partitions = true;
                } else {
                    partition = Some(self.parse_scalar_expression()?);
                }
            }
            let index_options = self.parse_optional_index_options()?;
            return Ok(AlterTableRebuildStatement {
                schema_object_name,
                partition,
                is_all_partitions,
                index_options,
            }
            .into());
        }
        Err(self.unexpected("ALTER TABLE action"))
    }

    /// Optional `WITH CHECK` / `WITH NOCHECK`
    fn parse_existing_row_check(&mut self) -> PResult<ConstraintEnforcement> {
        if !self.at(TokenKind::With) {
            return Ok(ConstraintEnforcement::NotSpecified);
        }
        let enforcement = match self.peek.kind {
            TokenKind::Check => ConstraintEnforcement::Check,
            TokenKind::Nocheck => ConstraintEnforcement::NoCheck,
            _ => return Err(self.unexpected("WITH CHECK or WITH NOCHECK")),
        };
        self.advance();
        self.advance();
        Ok(enforcement)
    }

    /// `ALL` or a comma-separated list of names
    fn parse_all_or_names(&mut self) -> PResult<(bool, Vec<Identifier>)> {
        if self.eat(TokenKind::All) {
            Ok((true, Vec::new()))
        } else {
            Ok((false, self.parse_identifier_comma_list()?))
        }
    }

    /// Columns, constraints, indexes and periods after `ADD`. With tail
    /// recovery on, a constraint form the grammar does not know ends the
    /// list and the rest of the statement is skipped.
    fn parse_alter_table_add(
        &mut self,
        schema_object_name: SchemaObjectName,
        existing_row_check_enforcement: ConstraintEnforcement,
    ) -> PResult<Statement> {
        let mut definition = TableDefinition::default();
        loop {
            if self.at(TokenKind::Default) {
                let constraint = self.parse_constraint_body()?;
                definition.table_constraints.push(constraint);
            } else if self.at(TokenKind::Constraint) && self.options.recover_statement_tails {
                let constraint = self.attempt(|p| p.parse_table_constraint());
                match constraint {
                    Some(constraint) => definition.table_constraints.push(constraint),
                    None => {
                        debug!(
                            offset = self.current.offset,
                            "dropping unrecognized ADD CONSTRAINT form"
                        );
                        self.skip_to_end_of_statement()?;
                        break;
                    }
                }
            } else {
                self.parse_table_element(&mut definition)?;
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(AlterTableAddTableElementStatement {
            schema_object_name,
            existing_row_check_enforcement,
            definition,
        }
        .into())
    }

    /// `[COLUMN|CONSTRAINT|INDEX] [IF EXISTS] name [WITH (...)], ...` or
    /// `PERIOD FOR SYSTEM_TIME`
    fn parse_alter_table_drop(&mut self, schema_object_name: SchemaObjectName) -> PResult<Statement> {
        let mut table_element_type = TableElementType::NotSpecified;
        let mut alter_table_drop_table_elements = Vec::new();
        loop {
            if self.eat(TokenKind::Column) {
                table_element_type = TableElementType::Column;
            } else if self.eat(TokenKind::Constraint) {
                table_element_type = TableElementType::Constraint;
            } else if self.eat(TokenKind::Index) {
                table_element_type = TableElementType::Index;
            } else if self.at_word("PERIOD") {
                self.advance();
                self.expect(TokenKind::For, "FOR")?;
                self.expect_word("SYSTEM_TIME")?;
                alter_table_drop_table_elements.push(AlterTableDropTableElement {
                    table_element_type: TableElementType::Period,
                    name: None,
                    is_if_exists: false,
                    drop_clustered_constraint_options: Vec::new(),
                });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
                continue;
            }
            let is_if_exists = self.parse_if_exists();
            let name = self.parse_identifier()?;
            let drop_clustered_constraint_options = self.parse_optional_with_options()?;
            alter_table_drop_table_elements.push(AlterTableDropTableElement {
                table_element_type,
                name: Some(name),
                is_if_exists,
                drop_clustered_constraint_options,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(AlterTableDropTableElementStatement {
            schema_object_name,
            alter_table_drop_table_elements,
        }
        .into())
    }

    /// `c type [COLLATE x] [NULL|NOT NULL] [WITH (...)]` or
    /// `c ADD|DROP {ROWGUIDCOL|PERSISTED|NOT FOR REPLICATION|SPARSE|HIDDEN|MASKED}`
    fn parse_alter_table_alter_column(&mut self, schema_object_name: SchemaObjectName) -> PResult<Statement> {
        let column_identifier = Some(self.parse_identifier()?);
        let mut statement = AlterTableAlterColumnStatement {
            schema_object_name,
            column_identifier,
            data_type: None,
            alter_table_alter_column_option: AlterTableAlterColumnOption::NoOptionDefined,
            collation: None,
            masking_function: None,
            options: Vec::new(),
        };

        if self.at(TokenKind::Add) || self.at(TokenKind::Drop) {
            let add = self.advance().kind == TokenKind::Add;
            statement.alter_table_alter_column_option = self.parse_column_property_change(add)?;
            if add && statement.alter_table_alter_column_option == AlterTableAlterColumnOption::AddMaskingFunction {
                statement.masking_function = Some(self.parse_masking_function()?);
            }
        } else {
            statement.data_type = Some(self.parse_data_type()?);
            if self.eat(TokenKind::Collate) {
                statement.collation = Some(self.parse_identifier()?);
            }
            self.eat_word("SPARSE");
            if self.eat(TokenKind::Null) {
                statement.alter_table_alter_column_option = AlterTableAlterColumnOption::Null;
            } else if self.at(TokenKind::Not) && self.peek_is(TokenKind::Null) {
                self.advance();
                self.advance();
                statement.alter_table_alter_column_option = AlterTableAlterColumnOption::NotNull;
            }
        }
        statement.options = self.parse_optional_index_options()?;
        Ok(statement.into())
    }

    fn parse_column_property_change(&mut self, add: bool) -> PResult<AlterTableAlterColumnOption> {
        use AlterTableAlterColumnOption::*;
        let pick = |added, dropped| if add { added } else { dropped };
        if self.eat_word("ROWGUIDCOL") {
            return Ok(pick(AddRowGuidCol, DropRowGuidCol));
        }
        if self.eat_word("PERSISTED") {
            return Ok(pick(AddPersisted, DropPersisted));
        }
        if self.eat_not_for_replication() {
            return Ok(pick(AddNotForReplication, DropNotForReplication));
        }
        if self.eat_word("SPARSE") {
            return Ok(pick(AddSparse, DropSparse));
        }
        if self.eat_word("HIDDEN") {
            return Ok(pick(AddHidden, DropHidden));
        }
        if self.eat_word("MASKED") {
            return Ok(pick(AddMaskingFunction, DropMaskingFunction));
        }
        Err(self.unexpected("ROWGUIDCOL, PERSISTED, NOT FOR REPLICATION, SPARSE, HIDDEN or MASKED"))
    }

    /// `WITH (FUNCTION = 'default()')`
    fn parse_masking_function(&mut self) -> PResult<StringLiteral> {
        self.expect(TokenKind::With, "WITH")?;
        self.expect(TokenKind::LParen, "'('")?;
        self.expect(TokenKind::Function, "FUNCTION")?;
        self.expect(TokenKind::Eq, "'='")?;
        let function = self.parse_string_literal()?;
        self.expect(TokenKind::RParen, "')'")?;
        Ok(function)
    }

    /// `[PARTITION n] TO target [PARTITION m] [WITH (...)]`
    fn parse_alter_table_switch(&mut self, schema_object_name: SchemaObjectName) -> PResult<Statement> {
        let source_partition_number = if self.eat_word("PARTITION") {
            Some(self.parse_scalar_expression()?)
        } else {
            None
        };
        self.expect(TokenKind::To, "TO")?;
        let target_table = Some(self.parse_schema_object_name()?);
        let target_partition_number = if self.eat_word("PARTITION") {
            Some(self.parse_scalar_expression()?)
        } else {
            None
        };
        let options = self.parse_optional_with_options()?;
        Ok(AlterTableSwitchStatement {
            schema_object_name,
            source_partition_number,
            target_table,
            target_partition_number,
            options,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{parse, parse_with_options};
    use serde_json::{Value, json};
    use tsql_core::ParserOptions;

    fn statement(source: &str) -> Value {
        let script = parse(source).unwrap();
        assert_eq!(script.statements.len(), 1, "expected one statement in {source}");
        script.to_value().unwrap()["Statements"][0].clone()
    }

    #[test]
    fn test_add_primary_key_constraint() {
        let value = statement("ALTER TABLE t ADD CONSTRAINT pk PRIMARY KEY CLUSTERED (id ASC) WITH (MAXDOP = 4);");
        assert_eq!(value["$type"], "AlterTableAddTableElementStatement");
        let constraint = &value["Definition"]["TableConstraints"][0];
        assert_eq!(constraint["$type"], "UniqueConstraintDefinition");
        assert_eq!(constraint["ConstraintIdentifier"]["Value"], "pk");
        assert_eq!(constraint["IsPrimaryKey"], true);
        assert_eq!(constraint["Clustered"], true);
        assert_eq!(constraint["Columns"][0]["SortOrder"], "Ascending");
        assert_eq!(constraint["IndexOptions"][0]["OptionKind"], "MaxDop");
    }

    #[test]
    fn test_add_columns_with_check() {
        let value = statement("ALTER TABLE dbo.t WITH NOCHECK ADD c1 INT NULL, c2 VARCHAR(10), CONSTRAINT fk FOREIGN KEY (c1) REFERENCES p (id)");
        assert_eq!(value["ExistingRowCheckEnforcement"], "NoCheck");
        assert_eq!(value["Definition"]["ColumnDefinitions"].as_array().unwrap().len(), 2);
        assert_eq!(value["Definition"]["TableConstraints"].as_array().unwrap().len(), 1);

        let value = statement("ALTER TABLE t ADD DEFAULT 0 FOR c1");
        assert_eq!(value["Definition"]["TableConstraints"][0]["$type"], "DefaultConstraintDefinition");
    }

    #[test]
    fn test_drop_elements() {
        let value = statement("ALTER TABLE t DROP CONSTRAINT IF EXISTS pk WITH (ONLINE = ON), COLUMN a, b, PERIOD FOR SYSTEM_TIME");
        let elements = value["AlterTableDropTableElements"].as_array().unwrap();
        assert_eq!(elements.len(), 4);
        assert_eq!(elements[0]["TableElementType"], "Constraint");
        assert_eq!(elements[0]["IsIfExists"], true);
        assert_eq!(elements[0]["DropClusteredConstraintOptions"][0]["OptionKind"], "Online");
        assert_eq!(elements[2]["TableElementType"], "Column");
        assert_eq!(elements[2]["Name"]["Value"], "b");
        assert_eq!(elements[3]["TableElementType"], "Period");
    }

    #[test]
    fn test_alter_column_forms() {
        let value = statement("ALTER TABLE t ALTER COLUMN c NVARCHAR(50) COLLATE Latin1_General_CI_AS NOT NULL");
        assert_eq!(value["AlterTableAlterColumnOption"], "NotNull");
        assert_eq!(value["Collation"]["Value"], "Latin1_General_CI_AS");

        let value = statement("ALTER TABLE t ALTER COLUMN c INT");
        assert!(value.get("Collation").is_none());

        let value = statement("ALTER TABLE t ALTER COLUMN ssn ADD MASKED WITH (FUNCTION = 'partial(0,\"X\",4)')");
        assert_eq!(value["AlterTableAlterColumnOption"], "AddMaskingFunction");
        assert_eq!(value["MaskingFunction"]["Value"], "partial(0,\"X\",4)");

        let value = statement("ALTER TABLE t ALTER COLUMN c DROP NOT FOR REPLICATION");
        assert_eq!(value["AlterTableAlterColumnOption"], "DropNotForReplication");
    }

    #[test]
    fn test_set_and_modifications() {
        let value = statement(
            "ALTER TABLE t SET (SYSTEM_VERSIONING = ON (HISTORY_TABLE = dbo.t_history, HISTORY_RETENTION_PERIOD = 6 MONTHS))",
        );
        assert_eq!(value["Options"][0]["OptionKind"], "SystemVersioning");
        assert_eq!(value["Options"][0]["Options"][1]["Unit"]["Value"], "MONTHS");

        let value = statement(
            "ALTER TABLE t SET (DATA_DELETION = ON (FILTER_COLUMN = dbdatetime2, RETENTION_PERIOD = 1 WEEK))",
        );
        assert_eq!(value["$type"], "AlterTableSetStatement");
        assert_eq!(value["Options"][0]["OptionKind"], "DataDeletion");

        let value = statement("ALTER TABLE t WITH CHECK CHECK CONSTRAINT ALL");
        assert_eq!(value["ExistingRowCheckEnforcement"], "Check");
        assert_eq!(value["ConstraintEnforcement"], "Check");
        assert_eq!(value["All"], true);

        let value = statement("ALTER TABLE t DISABLE TRIGGER tr1, tr2");
        assert_eq!(value["TriggerEnforcement"], "Disable");
        assert_eq!(value["TriggerNames"].as_array().unwrap().len(), 2);

        let value = statement("ALTER TABLE t ENABLE CHANGE_TRACKING WITH (TRACK_COLUMNS_UPDATED = ON)");
        assert_eq!(value["IsEnable"], true);
        assert_eq!(value["TrackColumnsUpdated"], "On");
    }

    #[test]
    fn test_switch_and_rebuild() {
        let value = statement("ALTER TABLE t SWITCH PARTITION 2 TO t_archive PARTITION 3");
        assert_eq!(value["SourcePartitionNumber"]["Value"], "2");
        assert_eq!(value["TargetTable"]["BaseIdentifier"]["Value"], "t_archive");

        let value = statement("ALTER TABLE t REBUILD PARTITION = ALL WITH (DATA_COMPRESSION = PAGE)");
        assert_eq!(value["IsAllPartitions"], true);
        assert_eq!(value["IndexOptions"][0]["OptionKind"], "DataCompression");
    }

    #[test]
    fn test_unknown_action_recovers() {
        let script = parse("ALTER TABLE t FROB the widgets; SELECT 1").unwrap();
        let json = script.to_value().unwrap();
        assert_eq!(json["Statements"][0]["$type"], "AlterTableSetStatement");
        assert_eq!(json["Statements"][0]["Options"], json!([]));
        assert_eq!(json["Statements"][1]["$type"], "SelectStatement");

        let err = parse_with_options("ALTER TABLE t FROB the widgets", &ParserOptions::strict()).unwrap_err();
        assert!(err.message.contains("ALTER TABLE action"));
    }

    #[test]
    fn test_broken_action_prefixes_recover() {
        let sources = [
            "ALTER TABLE t DROP",
            "ALTER TABLE dbo.t DROP CONSTRAINT IF garbage zz ;",
            "ALTER TABLE dbo.t ALTER garbage zz ;",
            "ALTER TABLE t ALTER COLUMN",
            "ALTER TABLE t ADD",
            "ALTER TABLE t SET garbage zz",
            "ALTER TABLE t WITH CHECK garbage",
        ];
        for source in sources {
            let value = statement(source);
            assert_eq!(value["$type"], "AlterTableSetStatement", "{source}");
            assert_eq!(value["Options"], json!([]), "{source}");
            assert!(parse_with_options(source, &ParserOptions::strict()).is_err(), "{source}");
        }
    }

    #[test]
    fn test_recovery_keeps_following_statements() {
        let script = parse("ALTER TABLE t DROP CONSTRAINT IF garbage; SELECT 1").unwrap();
        let json = script.to_value().unwrap();
        assert_eq!(json["Statements"][0]["$type"], "AlterTableSetStatement");
        assert_eq!(json["Statements"][1]["$type"], "SelectStatement");

        let script = parse("ALTER TABLE t\nSELECT 1").unwrap();
        let json = script.to_value().unwrap();
        assert_eq!(json["Statements"].as_array().unwrap().len(), 2);
        assert_eq!(json["Statements"][1]["$type"], "SelectStatement");
    }

    #[test]
    fn test_unknown_constraint_form_is_dropped() {
        let value = statement("ALTER TABLE t ADD CONSTRAINT ck EXCLUDE USING gist (c)");
        assert_eq!(value["$type"], "AlterTableAddTableElementStatement");
        assert_eq!(value["Definition"]["TableConstraints"], json!([]));
    }

    #[test]
    fn test_alter_schema_transfer() {
        let value = statement("ALTER SCHEMA sales TRANSFER OBJECT::dbo.orders");
        assert_eq!(value["$type"], "AlterSchemaStatement");
        assert_eq!(value["ObjectKind"], "Object");
        assert_eq!(value["ObjectName"]["SchemaIdentifier"]["Value"], "dbo");
    }

    #[test]
    fn test_unknown_alter_kind_is_error() {
        let err = parse("ALTER WIDGET w").unwrap_err();
        assert!(err.message.contains("object kind after ALTER"));
    }
}
