//! CREATE DATABASE, ALTER DATABASE and ALTER DATABASE SCOPED CONFIGURATION

use super::options::option_kind_name;
use super::{PResult, Parser, STATEMENT_START_WORDS};
use crate::lexer::TokenKind;
use tsql_ast::database::*;
use tsql_ast::options::{IdentifierOption, StatementOption};
use tsql_ast::{Identifier, Statement};

/// Database name of an ALTER DATABASE statement; `None` means `CURRENT`
type DatabaseTarget = (Option<Identifier>, bool);

impl<'a> Parser<'a> {
    // ========== CREATE DATABASE ==========

    /// After `CREATE DATABASE`
    pub(crate) fn parse_create_database(&mut self) -> PResult<Statement> {
        let database_name = self.parse_identifier()?;
        let mut statement = CreateDatabaseStatement {
            database_name,
            containment: None,
            file_groups: Vec::new(),
            log_on: Vec::new(),
            collation: None,
            options: Vec::new(),
            attach_mode: AttachMode::None,
            database_snapshot: None,
        };

        if self.eat_word("CONTAINMENT") {
            self.expect(TokenKind::Eq, "'='")?;
            statement.containment = Some(self.parse_word()?);
        }
        if self.eat(TokenKind::On) {
            statement.file_groups = self.parse_file_groups()?;
        }
        loop {
            if self.at_word("LOG") && self.peek_is(TokenKind::On) {
                self.advance();
                self.advance();
                statement.log_on = self.parse_file_declaration_list()?;
            } else if self.eat(TokenKind::Collate) {
                statement.collation = Some(self.parse_identifier()?);
            } else if self.eat(TokenKind::With) {
                statement.options = self.parse_bare_option_list()?;
            } else if self.eat(TokenKind::For) {
                let mode = self.parse_word()?;
                statement.attach_mode = match mode.value.to_ascii_uppercase().as_str() {
                    "ATTACH" => AttachMode::Attach,
                    "ATTACH_REBUILD_LOG" => AttachMode::AttachRebuildLog,
                    "ATTACH_FORCE_REBUILD_LOG" => AttachMode::AttachForceRebuildLog,
                    "LOAD" => AttachMode::Load,
                    _ => {
                        return Err(self.error_here(format!(
                            "Expected ATTACH or ATTACH_REBUILD_LOG, found '{}'",
                            mode.value
                        )));
                    }
                };
            } else if self.at(TokenKind::As) && self.peek_is_word("SNAPSHOT") {
                self.advance();
                self.advance();
                self.expect(TokenKind::Of, "OF")?;
                statement.database_snapshot = Some(self.parse_identifier()?);
            } else {
                break;
            }
        }
        Ok(statement.into())
    }

    /// `[PRIMARY] (file), ... [, FILEGROUP fg [CONTAINS ...] [DEFAULT] (file), ...]`
    fn parse_file_groups(&mut self) -> PResult<Vec<FileGroupDefinition>> {
        let mut groups = vec![FileGroupDefinition {
            name: None,
            file_declarations: Vec::new(),
            is_default: false,
            contains_file_stream: false,
            contains_memory_optimized_data: false,
        }];
        loop {
            if self.eat_word("FILEGROUP") {
                let name = Some(self.parse_identifier()?);
                let (contains_file_stream, contains_memory_optimized_data) = self.parse_contains()?;
                let is_default = self.eat(TokenKind::Default);
                groups.push(FileGroupDefinition {
                    name,
                    file_declarations: Vec::new(),
                    is_default,
                    contains_file_stream,
                    contains_memory_optimized_data,
                });
                continue;
            }
            let is_primary = self.eat(TokenKind::Primary);
            let declaration = self.parse_file_declaration(is_primary)?;
            if let Some(group) = groups.last_mut() {
                group.file_declarations.push(declaration);
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        groups.retain(|group| group.name.is_some() || !group.file_declarations.is_empty());
        Ok(groups)
    }

    /// Optional `CONTAINS FILESTREAM` / `CONTAINS MEMORY_OPTIMIZED_DATA`
    fn parse_contains(&mut self) -> PResult<(bool, bool)> {
        if !self.eat_word("CONTAINS") {
            return Ok((false, false));
        }
        if self.eat_word("FILESTREAM") {
            return Ok((true, false));
        }
        self.expect_word("MEMORY_OPTIMIZED_DATA")?;
        Ok((false, true))
    }

    /// `( NAME = n, FILENAME = 'f', SIZE = 10 MB, FILEGROWTH = 10% )`
    fn parse_file_declaration(&mut self, is_primary: bool) -> PResult<FileDeclaration> {
        let options = self.parse_statement_option_list()?;
        Ok(FileDeclaration {
            is_primary,
            options,
        })
    }

    fn parse_file_declaration_list(&mut self) -> PResult<Vec<FileDeclaration>> {
        let mut declarations = vec![self.parse_file_declaration(false)?];
        while self.at(TokenKind::Comma) && self.peek_is(TokenKind::LParen) {
            self.advance();
            declarations.push(self.parse_file_declaration(false)?);
        }
        Ok(declarations)
    }

    // ========== ALTER DATABASE ==========

    /// After `ALTER DATABASE`
    pub(crate) fn parse_alter_database(&mut self) -> PResult<Statement> {
        if self.eat_words(&["SCOPED", "CONFIGURATION"]) {
            return self.parse_alter_database_scoped_configuration();
        }
        let (database_name, use_current) = self.parse_database_target()?;

        if self.eat(TokenKind::Set) {
            let mut options = vec![self.parse_database_option()?];
            while self.eat(TokenKind::Comma) {
                options.push(self.parse_database_option()?);
            }
            let termination = self.parse_optional_termination()?;
            return Ok(AlterDatabaseSetStatement {
                database_name,
                use_current,
                options,
                termination,
            }
            .into());
        }
        if self.eat(TokenKind::Collate) {
            let collation = self.parse_identifier()?;
            return Ok(AlterDatabaseCollateStatement {
                database_name,
                use_current,
                collation,
            }
            .into());
        }
        if self.eat(TokenKind::Add) {
            return self.parse_alter_database_add((database_name, use_current));
        }
        if self.eat_word("REMOVE") {
            if self.eat_word("FILEGROUP") {
                let file_group = self.parse_identifier()?;
                return Ok(AlterDatabaseRemoveFileGroupStatement {
                    database_name,
                    use_current,
                    file_group,
                }
                .into());
            }
            self.expect(TokenKind::File, "FILE or FILEGROUP")?;
            let file = self.parse_identifier()?;
            return Ok(AlterDatabaseRemoveFileStatement {
                database_name,
                use_current,
                file,
            }
            .into());
        }
        if self.eat_word("MODIFY") {
            return self.parse_alter_database_modify((database_name, use_current));
        }
        Err(self.unexpected("SET, COLLATE, ADD, REMOVE or MODIFY"))
    }

    fn parse_database_target(&mut self) -> PResult<DatabaseTarget> {
        if self.eat(TokenKind::Current) {
            Ok((None, true))
        } else {
            Ok((Some(self.parse_identifier()?), false))
        }
    }

    /// A SET option; besides the generic forms this accepts a bare word
    /// value as in `RECOVERY SIMPLE` or `PAGE_VERIFY CHECKSUM`
    fn parse_database_option(&mut self) -> PResult<StatementOption> {
        let peek = self.peek;
        let word_valued = self.current.kind.is_word()
            && peek.kind.is_word()
            && !matches!(peek.kind, TokenKind::On | TokenKind::Off | TokenKind::With)
            && !STATEMENT_START_WORDS.iter().any(|w| peek.is_word(w));
        if word_valued {
            let option_kind = option_kind_name(self.advance().literal);
            let value = self.parse_word()?;
            return Ok(IdentifierOption { option_kind, value }.into());
        }
        self.parse_statement_option()
    }

    /// `WITH ROLLBACK IMMEDIATE | WITH ROLLBACK AFTER n [SECONDS] | WITH NO_WAIT`
    fn parse_optional_termination(&mut self) -> PResult<Option<AlterDatabaseTermination>> {
        let at_termination = self.at(TokenKind::With)
            && (self.peek.kind == TokenKind::Rollback || self.peek_is_word("NO_WAIT"));
        if !at_termination {
            return Ok(None);
        }
        self.advance();
        let mut termination = AlterDatabaseTermination {
            immediate_rollback: false,
            rollback_after: None,
            no_wait: false,
        };
        if self.eat_word("NO_WAIT") {
            termination.no_wait = true;
        } else {
            self.expect(TokenKind::Rollback, "ROLLBACK")?;
            if self.eat_word("IMMEDIATE") {
                termination.immediate_rollback = true;
            } else {
                self.expect_word("AFTER")?;
                termination.rollback_after = Some(self.parse_unary_expression()?);
                self.eat_word("SECONDS");
            }
        }
        Ok(Some(termination))
    }

    /// After `ALTER DATABASE x ADD`
    fn parse_alter_database_add(&mut self, target: DatabaseTarget) -> PResult<Statement> {
        let (database_name, use_current) = target;
        if self.eat_word("FILEGROUP") {
            let file_group = self.parse_identifier()?;
            let (contains_file_stream, contains_memory_optimized_data) = self.parse_contains()?;
            return Ok(AlterDatabaseAddFileGroupStatement {
                database_name,
                use_current,
                file_group,
                contains_file_stream,
                contains_memory_optimized_data,
            }
            .into());
        }
        let is_log = self.eat_word("LOG");
        self.expect(TokenKind::File, "FILE, LOG FILE or FILEGROUP")?;
        let file_declarations = self.parse_file_declaration_list()?;
        let file_group = if self.at(TokenKind::To) && self.peek_is_word("FILEGROUP") {
            self.advance();
            self.advance();
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(AlterDatabaseAddFileStatement {
            database_name,
            use_current,
            is_log,
            file_declarations,
            file_group,
        }
        .into())
    }

    /// After `ALTER DATABASE x MODIFY`
    fn parse_alter_database_modify(&mut self, target: DatabaseTarget) -> PResult<Statement> {
        let (database_name, use_current) = target;
        if self.at_word("NAME") && self.peek_is(TokenKind::Eq) {
            self.advance();
            self.advance();
            let new_database_name = self.parse_identifier()?;
            return Ok(AlterDatabaseModifyNameStatement {
                database_name,
                use_current,
                new_database_name,
            }
            .into());
        }
        if self.eat(TokenKind::File) {
            let file_declaration = self.parse_file_declaration(false)?;
            return Ok(AlterDatabaseModifyFileStatement {
                database_name,
                use_current,
                file_declaration,
            }
            .into());
        }
        self.expect_word("FILEGROUP")?;
        let file_group = self.parse_identifier()?;
        let mut make_default = false;
        let mut new_file_group_name = None;
        let mut update_ability = None;
        if self.eat(TokenKind::Default) {
            make_default = true;
        } else if self.at_word("NAME") && self.peek_is(TokenKind::Eq) {
            self.advance();
            self.advance();
            new_file_group_name = Some(self.parse_identifier()?);
        } else {
            let ability = self.parse_word()?;
            update_ability = Some(option_kind_name(&ability.value));
        }
        let termination = self.parse_optional_termination()?;
        Ok(AlterDatabaseModifyFileGroupStatement {
            database_name,
            use_current,
            file_group,
            make_default,
            new_file_group_name,
            update_ability,
            termination,
        }
        .into())
    }

    /// After `ALTER DATABASE SCOPED CONFIGURATION`
    fn parse_alter_database_scoped_configuration(&mut self) -> PResult<Statement> {
        let secondary = self.at(TokenKind::For) && self.peek_is_word("SECONDARY");
        if secondary {
            self.advance();
            self.advance();
        }
        if self.eat_word("CLEAR") {
            let option = self.parse_word()?;
            let plan_handle = if self.current.kind == TokenKind::BinaryLiteral {
                Some(self.parse_primary_expression()?)
            } else {
                None
            };
            return Ok(AlterDatabaseScopedConfigurationClearStatement {
                secondary,
                option_kind: option_kind_name(&option.value),
                plan_handle,
            }
            .into());
        }
        self.expect(TokenKind::Set, "SET or CLEAR")?;
        let option = self.parse_statement_option()?;
        Ok(AlterDatabaseScopedConfigurationSetStatement { secondary, option }.into())
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
    fn test_create_database_files() {
        let value = statement(
            "CREATE DATABASE Sales ON PRIMARY (NAME = Sales_dat, FILENAME = 'c:\\sales.mdf', SIZE = 10 MB, FILEGROWTH = 10%), \
             FILEGROUP fs CONTAINS FILESTREAM DEFAULT (NAME = fs1, FILENAME = 'c:\\fs') \
             LOG ON (NAME = Sales_log, FILENAME = 'c:\\sales.ldf') COLLATE Latin1_General_CI_AS WITH TRUSTWORTHY ON",
        );
        assert_eq!(value["$type"], "CreateDatabaseStatement");
        let groups = value["FileGroups"].as_array().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0]["Name"], Value::Null);
        assert_eq!(groups[0]["FileDeclarations"][0]["IsPrimary"], true);
        assert_eq!(groups[0]["FileDeclarations"][0]["Options"][2]["Unit"]["Value"], "MB");
        assert_eq!(groups[0]["FileDeclarations"][0]["Options"][3]["Unit"]["Value"], "%");
        assert_eq!(groups[1]["ContainsFileStream"], true);
        assert_eq!(groups[1]["IsDefault"], true);
        assert_eq!(value["LogOn"].as_array().unwrap().len(), 1);
        assert_eq!(value["Collation"]["Value"], "Latin1_General_CI_AS");
        assert_eq!(value["Options"][0]["OptionKind"], "Trustworthy");
    }

    #[test]
    fn test_create_database_attach_and_snapshot() {
        let value = statement("CREATE DATABASE d ON (FILENAME = 'd.mdf') FOR ATTACH");
        assert_eq!(value["AttachMode"], "Attach");

        let value = statement("CREATE DATABASE snap ON (NAME = d, FILENAME = 'd.ss') AS SNAPSHOT OF d");
        assert_eq!(value["DatabaseSnapshot"]["Value"], "d");
        assert!(value.get("Collation").is_none());
    }

    #[test]
    fn test_alter_database_set() {
        let value = statement("ALTER DATABASE app SET SINGLE_USER WITH ROLLBACK IMMEDIATE");
        assert_eq!(value["$type"], "AlterDatabaseSetStatement");
        assert_eq!(value["Options"][0]["$type"], "FlagOption");
        assert_eq!(value["Termination"]["ImmediateRollback"], true);

        let value = statement("ALTER DATABASE CURRENT SET RECOVERY SIMPLE, READ_COMMITTED_SNAPSHOT ON, COMPATIBILITY_LEVEL = 150");
        assert_eq!(value["UseCurrent"], true);
        assert_eq!(value["DatabaseName"], Value::Null);
        assert_eq!(value["Options"][0]["Value"]["Value"], "SIMPLE");
        assert_eq!(value["Options"][1]["OptionState"], "On");
        assert_eq!(value["Options"][2]["$type"], "LiteralOption");

        let value = statement("ALTER DATABASE app SET OFFLINE WITH ROLLBACK AFTER 30 SECONDS");
        assert_eq!(value["Termination"]["RollbackAfter"]["Value"], "30");
    }

    #[test]
    fn test_alter_database_files() {
        let value = statement("ALTER DATABASE app ADD FILE (NAME = f2, FILENAME = 'f2.ndf'), (NAME = f3, FILENAME = 'f3.ndf') TO FILEGROUP fg1");
        assert_eq!(value["FileDeclarations"].as_array().unwrap().len(), 2);
        assert_eq!(value["FileGroup"]["Value"], "fg1");
        assert_eq!(value["IsLog"], false);

        let value = statement("ALTER DATABASE app ADD FILEGROUP mem CONTAINS MEMORY_OPTIMIZED_DATA");
        assert_eq!(value["ContainsMemoryOptimizedData"], true);

        assert_eq!(statement("ALTER DATABASE app REMOVE FILE f2")["$type"], "AlterDatabaseRemoveFileStatement");
        assert_eq!(statement("ALTER DATABASE app MODIFY NAME = app2")["NewDatabaseName"]["Value"], "app2");

        let value = statement("ALTER DATABASE app MODIFY FILEGROUP fg1 READ_ONLY");
        assert_eq!(value["UpdateAbility"], "ReadOnly");
        assert_eq!(statement("ALTER DATABASE app MODIFY FILEGROUP fg1 DEFAULT")["MakeDefault"], true);

        let value = statement("ALTER DATABASE app COLLATE SQL_Latin1_General_CP1_CI_AS");
        assert_eq!(value["$type"], "AlterDatabaseCollateStatement");
    }

    #[test]
    fn test_scoped_configuration() {
        let value = statement("ALTER DATABASE SCOPED CONFIGURATION FOR SECONDARY SET MAXDOP = 4");
        assert_eq!(value["Secondary"], true);
        assert_eq!(value["Option"]["OptionKind"], "MaxDop");

        let value = statement("ALTER DATABASE SCOPED CONFIGURATION CLEAR PROCEDURE_CACHE");
        assert_eq!(value["OptionKind"], "ProcedureCache");
        assert_eq!(value["PlanHandle"], Value::Null);
    }
}
