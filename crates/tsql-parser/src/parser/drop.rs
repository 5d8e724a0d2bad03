//! DROP statements

use super::{PResult, Parser};
use crate::lexer::TokenKind;
use tsql_ast::drop::*;
use tsql_ast::expr::ColumnReferenceExpression;
use tsql_ast::{Identifier, SchemaObjectName, Statement};

/// `[IF EXISTS] name` into one of the single-name DROP nodes
macro_rules! named {
    ($parser:expr, $node:ident) => {
        $parser.drop_named(|is_if_exists, name| $node { is_if_exists, name })
    };
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_drop_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Drop, "DROP")?;
        let statement = self.parse_drop_object()?;
        self.skip_to_end_of_statement()?;
        Ok(statement)
    }

    /// Optional `IF EXISTS`
    pub(crate) fn parse_if_exists(&mut self) -> bool {
        if self.at(TokenKind::If) && self.peek_is(TokenKind::Exists) {
            self.advance();
            self.advance();
            true
        } else {
            false
        }
    }

    /// `[IF EXISTS] a.b, c.d` into a list-shaped node
    fn drop_objects<T: Into<Statement>>(
        &mut self,
        build: impl FnOnce(bool, Vec<SchemaObjectName>) -> T,
    ) -> PResult<Statement> {
        let is_if_exists = self.parse_if_exists();
        let objects = self.parse_schema_object_name_list()?;
        Ok(build(is_if_exists, objects).into())
    }

    /// `[IF EXISTS] name` into a single-name node
    fn drop_named<T: Into<Statement>>(
        &mut self,
        build: impl FnOnce(bool, Identifier) -> T,
    ) -> PResult<Statement> {
        let is_if_exists = self.parse_if_exists();
        let name = self.parse_identifier()?;
        Ok(build(is_if_exists, name).into())
    }

    fn parse_drop_object(&mut self) -> PResult<Statement> {
        // schema-scoped objects, dropped as lists
        if self.eat(TokenKind::Table) {
            return self.drop_objects(|is_if_exists, objects| DropTableStatement {
                is_if_exists,
                objects,
            });
        }
        if self.eat(TokenKind::View) {
            return self.drop_objects(|is_if_exists, objects| DropViewStatement {
                is_if_exists,
                objects,
            });
        }
        if self.eat(TokenKind::Procedure) || self.eat(TokenKind::Proc) {
            return self.drop_objects(|is_if_exists, objects| DropProcedureStatement {
                is_if_exists,
                objects,
            });
        }
        if self.eat(TokenKind::Function) {
            return self.drop_objects(|is_if_exists, objects| DropFunctionStatement {
                is_if_exists,
                objects,
            });
        }
        if self.eat_word("SEQUENCE") {
            return self.drop_objects(|is_if_exists, objects| DropSequenceStatement {
                is_if_exists,
                objects,
            });
        }
        if self.eat(TokenKind::Type) {
            return self.drop_objects(|is_if_exists, objects| DropTypeStatement {
                is_if_exists,
                objects,
            });
        }
        if self.eat_word("SYNONYM") {
            return self.drop_objects(|is_if_exists, objects| DropSynonymStatement {
                is_if_exists,
                objects,
            });
        }
        if self.eat(TokenKind::Default) {
            return self.drop_objects(|is_if_exists, objects| DropDefaultStatement {
                is_if_exists,
                objects,
            });
        }
        if self.eat(TokenKind::Rule) {
            return self.drop_objects(|is_if_exists, objects| DropRuleStatement {
                is_if_exists,
                objects,
            });
        }
        if self.eat_word("AGGREGATE") {
            return self.drop_objects(|is_if_exists, objects| DropAggregateStatement {
                is_if_exists,
                objects,
            });
        }
        if self.eat_words(&["SECURITY", "POLICY"]) {
            return self.drop_objects(|is_if_exists, objects| DropSecurityPolicyStatement {
                is_if_exists,
                objects,
            });
        }
        if self.eat_words(&["EXTERNAL", "TABLE"]) {
            return self.drop_objects(|is_if_exists, objects| DropExternalTableStatement {
                is_if_exists,
                objects,
            });
        }
        if self.eat_word("QUEUE") {
            return self.drop_objects(|is_if_exists, objects| DropQueueStatement {
                is_if_exists,
                objects,
            });
        }
        if self.eat_words(&["XML", "SCHEMA", "COLLECTION"]) {
            return self.drop_objects(|is_if_exists, objects| DropXmlSchemaCollectionStatement {
                is_if_exists,
                objects,
            });
        }
        if self.eat(TokenKind::Statistics) {
            return self.drop_objects(|is_if_exists, objects| DropStatisticsStatement {
                is_if_exists,
                objects,
            });
        }
        if self.eat_word("ASSEMBLY") {
            let statement = self.drop_objects(|is_if_exists, objects| DropAssemblyStatement {
                is_if_exists,
                objects,
            })?;
            if self.at(TokenKind::With) && self.peek_is_word("NO") {
                self.advance();
                self.advance();
                self.expect_word("DEPENDENTS")?;
            }
            return Ok(statement);
        }
        if self.eat(TokenKind::Trigger) {
            return self.parse_drop_trigger();
        }
        if self.eat(TokenKind::Index) {
            return self.parse_drop_index();
        }

        // multi-word kinds that share a leading word with another kind
        if self.eat_words(&["DATABASE", "SCOPED", "CREDENTIAL"]) {
            let is_if_exists = self.parse_if_exists();
            let name = self.parse_identifier()?;
            return Ok(DropCredentialStatement {
                is_if_exists,
                name,
                is_database_scoped: true,
            }
            .into());
        }
        if self.eat_words(&["DATABASE", "ENCRYPTION", "KEY"]) {
            return Ok(DropDatabaseEncryptionKeyStatement {}.into());
        }
        if self.eat(TokenKind::Database) {
            let is_if_exists = self.parse_if_exists();
            let databases = self.parse_identifier_comma_list()?;
            return Ok(DropDatabaseStatement {
                is_if_exists,
                databases,
            }
            .into());
        }
        if self.eat(TokenKind::Credential) {
            let is_if_exists = self.parse_if_exists();
            let name = self.parse_identifier()?;
            return Ok(DropCredentialStatement {
                is_if_exists,
                name,
                is_database_scoped: false,
            }
            .into());
        }
        if self.eat_words(&["MASTER", "KEY"]) {
            return Ok(DropMasterKeyStatement {}.into());
        }
        if self.eat_words(&["SYMMETRIC", "KEY"]) {
            let is_if_exists = self.parse_if_exists();
            let name = self.parse_identifier()?;
            let remove_provider_key = self.eat_remove_provider_key();
            return Ok(DropSymmetricKeyStatement {
                is_if_exists,
                name,
                remove_provider_key,
            }
            .into());
        }
        if self.eat_words(&["ASYMMETRIC", "KEY"]) {
            let statement = self.drop_named(|is_if_exists, name| DropAsymmetricKeyStatement {
                is_if_exists,
                name,
            })?;
            self.eat_remove_provider_key();
            return Ok(statement);
        }
        if self.eat_words(&["FULLTEXT", "INDEX"]) {
            self.expect(TokenKind::On, "ON")?;
            let table_name = self.parse_schema_object_name()?;
            return Ok(DropFullTextIndexStatement { table_name }.into());
        }
        if self.eat_words(&["EVENT", "NOTIFICATION"]) {
            return self.parse_drop_event_notification();
        }
        if self.eat_words(&["EVENT", "SESSION"]) {
            let is_if_exists = self.parse_if_exists();
            let name = self.parse_identifier()?;
            self.expect(TokenKind::On, "ON")?;
            let session_scope = self.parse_event_target()?;
            return Ok(DropEventSessionStatement {
                is_if_exists,
                name,
                session_scope,
            }
            .into());
        }
        if self.at_word("SIGNATURE") || self.at_words(&["COUNTER", "SIGNATURE"]) {
            let is_counter = self.eat_word("COUNTER");
            self.expect_word("SIGNATURE")?;
            self.expect(TokenKind::From, "FROM")?;
            let (element_kind, element) = self.parse_signable_element()?;
            self.expect(TokenKind::By, "BY")?;
            let cryptos = self.parse_crypto_mechanism_list()?;
            return Ok(DropSignatureStatement {
                is_counter,
                element_kind,
                element,
                cryptos,
            }
            .into());
        }
        if self.eat_words(&["SENSITIVITY", "CLASSIFICATION"]) {
            self.expect(TokenKind::From, "FROM")?;
            let mut columns = Vec::new();
            loop {
                columns.push(ColumnReferenceExpression::regular(
                    self.parse_multi_part_identifier()?,
                ));
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            return Ok(DropSensitivityClassificationStatement { columns }.into());
        }

        // single-name kinds
        if self.eat(TokenKind::Schema) {
            return named!(self, DropSchemaStatement);
        }
        if self.eat(TokenKind::User) {
            return named!(self, DropUserStatement);
        }
        if self.eat_word("ROLE") {
            return named!(self, DropRoleStatement);
        }
        if self.eat_words(&["SERVER", "ROLE"]) {
            return named!(self, DropServerRoleStatement);
        }
        if self.eat_words(&["APPLICATION", "ROLE"]) {
            return named!(self, DropApplicationRoleStatement);
        }
        if self.eat(TokenKind::Login) {
            return named!(self, DropLoginStatement);
        }
        if self.eat(TokenKind::Certificate) {
            return named!(self, DropCertificateStatement);
        }
        if self.eat_word("ENDPOINT") {
            return named!(self, DropEndpointStatement);
        }
        if self.eat_word("SERVICE") {
            return named!(self, DropServiceStatement);
        }
        if self.eat_word("CONTRACT") {
            return named!(self, DropContractStatement);
        }
        if self.eat_words(&["MESSAGE", "TYPE"]) {
            return named!(self, DropMessageTypeStatement);
        }
        if self.eat_word("ROUTE") {
            return named!(self, DropRouteStatement);
        }
        if self.eat_words(&["REMOTE", "SERVICE", "BINDING"]) {
            return named!(self, DropRemoteServiceBindingStatement);
        }
        if self.eat_words(&["PARTITION", "FUNCTION"]) {
            return named!(self, DropPartitionFunctionStatement);
        }
        if self.eat_words(&["PARTITION", "SCHEME"]) {
            return named!(self, DropPartitionSchemeStatement);
        }
        if self.eat_words(&["FULLTEXT", "CATALOG"]) {
            return named!(self, DropFullTextCatalogStatement);
        }
        if self.eat_words(&["FULLTEXT", "STOPLIST"]) {
            return named!(self, DropFullTextStopListStatement);
        }
        if self.eat_words(&["SEARCH", "PROPERTY", "LIST"]) {
            return named!(self, DropSearchPropertyListStatement);
        }
        if self.eat_words(&["WORKLOAD", "GROUP"]) {
            return named!(self, DropWorkloadGroupStatement);
        }
        if self.eat_words(&["WORKLOAD", "CLASSIFIER"]) {
            return named!(self, DropWorkloadClassifierStatement);
        }
        if self.eat_words(&["RESOURCE", "POOL"]) {
            return named!(self, DropResourcePoolStatement);
        }
        if self.eat_words(&["EXTERNAL", "RESOURCE", "POOL"]) {
            return named!(self, DropExternalResourcePoolStatement);
        }
        if self.eat_words(&["BROKER", "PRIORITY"]) {
            return named!(self, DropBrokerPriorityStatement);
        }
        if self.eat_words(&["EXTERNAL", "DATA", "SOURCE"]) {
            return named!(self, DropExternalDataSourceStatement);
        }
        if self.eat_words(&["EXTERNAL", "FILE", "FORMAT"]) {
            return named!(self, DropExternalFileFormatStatement);
        }
        if self.eat_words(&["EXTERNAL", "LANGUAGE"]) {
            return named!(self, DropExternalLanguageStatement);
        }
        if self.eat_words(&["EXTERNAL", "LIBRARY"]) {
            return named!(self, DropExternalLibraryStatement);
        }
        if self.eat_words(&["EXTERNAL", "MODEL"]) {
            return named!(self, DropExternalModelStatement);
        }
        if self.eat_words(&["COLUMN", "ENCRYPTION", "KEY"]) {
            return named!(self, DropColumnEncryptionKeyStatement);
        }
        if self.eat_words(&["COLUMN", "MASTER", "KEY"]) {
            return named!(self, DropColumnMasterKeyStatement);
        }
        if self.eat_words(&["AVAILABILITY", "GROUP"]) {
            return named!(self, DropAvailabilityGroupStatement);
        }

        Err(self.unexpected("object kind after DROP"))
    }

    fn eat_remove_provider_key(&mut self) -> bool {
        self.eat_words(&["REMOVE", "PROVIDER", "KEY"])
    }

    /// `[IF EXISTS] a, b [ON DATABASE | ON ALL SERVER]`
    fn parse_drop_trigger(&mut self) -> PResult<Statement> {
        let is_if_exists = self.parse_if_exists();
        let objects = self.parse_schema_object_name_list()?;
        let mut trigger_scope = TriggerScope::Normal;
        if self.eat(TokenKind::On) {
            if self.eat(TokenKind::Database) {
                trigger_scope = TriggerScope::Database;
            } else {
                self.expect(TokenKind::All, "DATABASE or ALL SERVER")?;
                self.expect_word("SERVER")?;
                trigger_scope = TriggerScope::AllServer;
            }
        }
        Ok(DropTriggerStatement {
            is_if_exists,
            objects,
            trigger_scope,
        }
        .into())
    }

    /// `[IF EXISTS] ix ON t [WITH (...)], ...` or the legacy `t.ix, ...`
    fn parse_drop_index(&mut self) -> PResult<Statement> {
        let is_if_exists = self.parse_if_exists();
        let mut drop_index_clauses = Vec::new();
        loop {
            let name = self.parse_schema_object_name()?;
            let clause = if self.eat(TokenKind::On) {
                let object = self.parse_schema_object_name()?;
                let options = self.parse_optional_with_options()?;
                DropIndexClause {
                    index: name.base_identifier,
                    object,
                    options,
                }
            } else {
                DropIndexClause {
                    index: None,
                    object: name,
                    options: Vec::new(),
                }
            };
            drop_index_clauses.push(clause);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(DropIndexStatement {
            is_if_exists,
            drop_index_clauses,
        }
        .into())
    }

    /// `a, b ON SERVER | DATABASE | QUEUE q`
    fn parse_drop_event_notification(&mut self) -> PResult<Statement> {
        let notifications = self.parse_identifier_comma_list()?;
        self.expect(TokenKind::On, "ON")?;
        let scope = self.parse_event_target()?;
        let queue_name = if scope == EventNotificationTarget::Queue {
            Some(self.parse_schema_object_name()?)
        } else {
            None
        };
        Ok(DropEventNotificationStatement {
            notifications,
            scope,
            queue_name,
        }
        .into())
    }

    fn parse_event_target(&mut self) -> PResult<EventNotificationTarget> {
        if self.eat_word("SERVER") {
            Ok(EventNotificationTarget::Server)
        } else if self.eat(TokenKind::Database) {
            Ok(EventNotificationTarget::Database)
        } else if self.eat_word("QUEUE") {
            Ok(EventNotificationTarget::Queue)
        } else {
            Err(self.unexpected("SERVER, DATABASE or QUEUE"))
        }
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
    fn test_drop_table_if_exists() {
        let value = statement("DROP TABLE IF EXISTS [dbo].[t1], [dbo].[t2];");
        assert_eq!(value["$type"], "DropTableStatement");
        assert_eq!(value["IsIfExists"], true);
        assert_eq!(value["Objects"][1]["BaseIdentifier"]["Value"], "t2");
        assert_eq!(value["Objects"][1]["SchemaIdentifier"]["QuoteType"], "SquareBracket");
    }

    #[test]
    fn test_list_and_named_kinds() {
        let cases = [
            ("DROP VIEW v1, v2", "DropViewStatement"),
            ("DROP PROC dbo.p", "DropProcedureStatement"),
            ("DROP FUNCTION IF EXISTS f", "DropFunctionStatement"),
            ("DROP SEQUENCE s", "DropSequenceStatement"),
            ("DROP TYPE dbo.Phone", "DropTypeStatement"),
            ("DROP STATISTICS t.s1, t.s2", "DropStatisticsStatement"),
            ("DROP XML SCHEMA COLLECTION dbo.c", "DropXmlSchemaCollectionStatement"),
            ("DROP ASSEMBLY a WITH NO DEPENDENTS", "DropAssemblyStatement"),
            ("DROP SCHEMA IF EXISTS sales", "DropSchemaStatement"),
            ("DROP USER bob", "DropUserStatement"),
            ("DROP SERVER ROLE auditors", "DropServerRoleStatement"),
            ("DROP MESSAGE TYPE [//x/y]", "DropMessageTypeStatement"),
            ("DROP PARTITION SCHEME ps", "DropPartitionSchemeStatement"),
            ("DROP EXTERNAL DATA SOURCE src", "DropExternalDataSourceStatement"),
            ("DROP EXTERNAL RESOURCE POOL ep", "DropExternalResourcePoolStatement"),
            ("DROP COLUMN MASTER KEY cmk", "DropColumnMasterKeyStatement"),
            ("DROP MASTER KEY", "DropMasterKeyStatement"),
            ("DROP DATABASE ENCRYPTION KEY", "DropDatabaseEncryptionKeyStatement"),
            ("DROP FULLTEXT INDEX ON dbo.docs", "DropFullTextIndexStatement"),
        ];
        for (source, kind) in cases {
            assert_eq!(statement(source)["$type"], kind, "{source}");
        }
    }

    #[test]
    fn test_drop_credentials_and_keys() {
        let value = statement("DROP DATABASE SCOPED CREDENTIAL cred");
        assert_eq!(value["$type"], "DropCredentialStatement");
        assert_eq!(value["IsDatabaseScoped"], true);

        let value = statement("DROP SYMMETRIC KEY k REMOVE PROVIDER KEY");
        assert_eq!(value["RemoveProviderKey"], true);

        let value = statement("DROP DATABASE IF EXISTS a, b");
        assert_eq!(value["Databases"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_drop_trigger_scope() {
        let value = statement("DROP TRIGGER trg_audit ON ALL SERVER");
        assert_eq!(value["TriggerScope"], "AllServer");
        assert_eq!(statement("DROP TRIGGER dbo.t1")["TriggerScope"], "Normal");
    }

    #[test]
    fn test_drop_index_forms() {
        let value = statement("DROP INDEX IF EXISTS ix1 ON dbo.t WITH (ONLINE = ON), t2.ix2");
        let clauses = &value["DropIndexClauses"];
        assert_eq!(clauses[0]["Index"]["Value"], "ix1");
        assert_eq!(clauses[0]["Object"]["SchemaIdentifier"]["Value"], "dbo");
        assert_eq!(clauses[0]["Options"][0]["OptionKind"], "Online");
        assert_eq!(clauses[1]["Index"], Value::Null);
        assert_eq!(clauses[1]["Object"]["Count"], 2);
    }

    #[test]
    fn test_drop_events_and_signatures() {
        let value = statement("DROP EVENT NOTIFICATION n1, n2 ON QUEUE dbo.q");
        assert_eq!(value["Scope"], "Queue");
        assert_eq!(value["QueueName"]["BaseIdentifier"]["Value"], "q");

        let value = statement("DROP EVENT SESSION s ON SERVER");
        assert_eq!(value["SessionScope"], "Server");

        let value = statement("DROP COUNTER SIGNATURE FROM dbo.p BY CERTIFICATE c1");
        assert_eq!(value["IsCounter"], true);
        assert_eq!(value["Cryptos"][0]["CryptoMechanismType"], "Certificate");

        let value = statement("DROP SENSITIVITY CLASSIFICATION FROM dbo.t.c1, dbo.t.c2");
        assert_eq!(value["Columns"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_drop_unknown_kind_is_error() {
        assert!(parse("DROP WIDGET w").is_err());
    }

    #[test]
    fn test_drop_tail_is_strict_only_when_asked() {
        let source = "DROP TABLE t CASCADE CONSTRAINTS";
        assert_eq!(parse(source).unwrap().statements.len(), 1);
        assert!(parse_with_options(source, &ParserOptions::strict()).is_err());

        let script = parse("DROP TABLE t\nSELECT 1;").unwrap().to_value().unwrap();
        assert_eq!(script["Statements"][1]["$type"], json!("SelectStatement"));
    }
}
