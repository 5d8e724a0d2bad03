//! Permissions, principals, credentials, keys, certificates and signatures

use super::options::option_kind_name;
use super::{PResult, Parser};
use crate::lexer::TokenKind;
use tsql_ast::expr::{ColumnReferenceExpression, ScalarExpression};
use tsql_ast::literal::IdentifierLiteral;
use tsql_ast::options::{IdentifierOption, LiteralOption, OptionState, StatementOption};
use tsql_ast::routine::SecurityObjectKind;
use tsql_ast::security::*;
use tsql_ast::{Identifier, SchemaObjectName, Statement};

/// Which permission statement is being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PermissionVerb {
    Grant,
    Deny,
    Revoke,
}

impl<'a> Parser<'a> {
    // ========== GRANT / DENY / REVOKE ==========

    pub(crate) fn parse_grant_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Grant, "GRANT")?;
        self.parse_permission_statement(PermissionVerb::Grant)
    }

    pub(crate) fn parse_deny_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Deny, "DENY")?;
        self.parse_permission_statement(PermissionVerb::Deny)
    }

    pub(crate) fn parse_revoke_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Revoke, "REVOKE")?;
        self.parse_permission_statement(PermissionVerb::Revoke)
    }

    fn parse_permission_statement(&mut self, verb: PermissionVerb) -> PResult<Statement> {
        let grant_option_for = verb == PermissionVerb::Revoke
            && self.at(TokenKind::Grant)
            && self.peek_is_word("OPTION");
        if grant_option_for {
            self.advance();
            self.advance();
            self.expect(TokenKind::For, "FOR")?;
        }

        let mut permissions = Vec::new();
        loop {
            permissions.push(self.parse_permission()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        let security_target_object = if self.eat(TokenKind::On) {
            Some(self.parse_security_target_object()?)
        } else {
            None
        };

        if !self.eat(TokenKind::To) {
            if verb == PermissionVerb::Revoke {
                self.expect(TokenKind::From, "TO or FROM")?;
            } else {
                return Err(self.unexpected("TO"));
            }
        }
        let mut principals = Vec::new();
        loop {
            principals.push(self.parse_security_principal()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        let mut with_grant_option = false;
        if self.at(TokenKind::With) && self.peek_is(TokenKind::Grant) {
            self.advance();
            self.advance();
            self.expect_word("OPTION")?;
            with_grant_option = true;
        }
        let cascade_option = self.eat(TokenKind::Cascade);
        let as_clause = if self.eat(TokenKind::As) {
            Some(self.parse_identifier()?)
        } else {
            None
        };

        let permissions = permissions;
        Ok(match verb {
            PermissionVerb::Grant => GrantStatement {
                permissions,
                security_target_object,
                principals,
                with_grant_option,
                cascade_option,
                grant_option_for,
                as_clause,
            }
            .into(),
            PermissionVerb::Deny => DenyStatement {
                permissions,
                security_target_object,
                principals,
                with_grant_option,
                cascade_option,
                grant_option_for,
                as_clause,
            }
            .into(),
            PermissionVerb::Revoke => RevokeStatement {
                permissions,
                security_target_object,
                principals,
                with_grant_option,
                cascade_option,
                grant_option_for,
                as_clause,
            }
            .into(),
        })
    }

    /// `SELECT`, `VIEW DEFINITION`, `ALTER ANY USER`, `UPDATE (a, b)`
    fn parse_permission(&mut self) -> PResult<Permission> {
        let mut identifiers = Vec::new();
        while self.current.kind.is_word()
            && !matches!(
                self.current.kind,
                TokenKind::On | TokenKind::To | TokenKind::From
            )
        {
            identifiers.push(Identifier::from_lexeme(self.advance().literal));
        }
        if identifiers.is_empty() {
            return Err(self.unexpected("permission"));
        }
        let columns = if self.at(TokenKind::LParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            Vec::new()
        };
        Ok(Permission {
            identifiers,
            columns,
        })
    }

    /// `[class::]name [(columns)]`
    pub(crate) fn parse_security_target_object(&mut self) -> PResult<SecurityTargetObject> {
        let object_kind = self.parse_optional_security_class()?;
        let object_name = self.parse_schema_object_name()?;
        let columns = if self.at(TokenKind::LParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            Vec::new()
        };
        Ok(SecurityTargetObject {
            object_kind,
            object_name,
            columns,
        })
    }

    /// A class prefix such as `SCHEMA::` or `XML SCHEMA COLLECTION::`
    pub(crate) fn parse_optional_security_class(&mut self) -> PResult<SecurityObjectKind> {
        let mut n = 0;
        while self.nth(n).kind.is_word() && n < 4 {
            n += 1;
        }
        if n == 0 || self.nth(n).kind != TokenKind::DoubleColon {
            return Ok(SecurityObjectKind::NotSpecified);
        }
        let words: Vec<&str> = (0..n).map(|i| self.nth(i).literal).collect();
        let Some(kind) = SecurityObjectKind::from_words(&words) else {
            return Err(self.error_here(format!(
                "Unknown securable class '{}'",
                words.join(" ")
            )));
        };
        for _ in 0..=n {
            self.advance();
        }
        Ok(kind)
    }

    fn parse_security_principal(&mut self) -> PResult<SecurityPrincipal> {
        if self.eat(TokenKind::Public) {
            return Ok(SecurityPrincipal {
                principal_type: PrincipalType::Public,
                identifier: None,
            });
        }
        if self.eat(TokenKind::Null) {
            return Ok(SecurityPrincipal {
                principal_type: PrincipalType::Null,
                identifier: None,
            });
        }
        Ok(SecurityPrincipal {
            principal_type: PrincipalType::Specific,
            identifier: Some(self.parse_identifier()?),
        })
    }

    /// `ALTER AUTHORIZATION ON [class::]name TO principal | SCHEMA OWNER`
    pub(crate) fn parse_alter_authorization(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::On, "ON")?;
        let security_target_object = self.parse_security_target_object()?;
        self.expect(TokenKind::To, "TO")?;
        let to_schema_owner = self.eat_words(&["SCHEMA", "OWNER"]);
        let principal_name = if to_schema_owner {
            None
        } else {
            Some(self.parse_identifier()?)
        };
        Ok(AlterAuthorizationStatement {
            security_target_object,
            to_schema_owner,
            principal_name,
        }
        .into())
    }

    // ========== ADD SIGNATURE / SENSITIVITY CLASSIFICATION ==========

    pub(crate) fn parse_add_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Add, "ADD")?;
        let statement = if self.eat_words(&["SENSITIVITY", "CLASSIFICATION"]) {
            self.parse_add_sensitivity_classification()?
        } else {
            let is_counter = self.eat_word("COUNTER");
            self.expect_word("SIGNATURE")?;
            self.expect(TokenKind::To, "TO")?;
            let (element_kind, element) = self.parse_signable_element()?;
            self.expect(TokenKind::By, "BY")?;
            let cryptos = self.parse_crypto_mechanism_list()?;
            AddSignatureStatement {
                is_counter,
                element_kind,
                element,
                cryptos,
            }
            .into()
        };
        self.skip_to_end_of_statement()?;
        Ok(statement)
    }

    /// `TO t.c, ... WITH (LABEL = 'x', INFORMATION_TYPE = 'y', RANK = HIGH)`
    fn parse_add_sensitivity_classification(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::To, "TO")?;
        let mut columns = Vec::new();
        loop {
            columns.push(ColumnReferenceExpression::regular(
                self.parse_multi_part_identifier()?,
            ));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        let mut options = Vec::new();
        if self.eat(TokenKind::With) {
            self.expect(TokenKind::LParen, "'('")?;
            loop {
                let name = self.parse_word()?;
                self.expect(TokenKind::Eq, "'='")?;
                let value: ScalarExpression = if self.current.kind == TokenKind::Ident {
                    IdentifierLiteral::from_identifier(self.parse_identifier()?).into()
                } else if self.current.kind.is_word() {
                    IdentifierLiteral::from_identifier(self.parse_word()?).into()
                } else {
                    self.parse_unary_expression()?
                };
                options.push(SensitivityClassificationOption {
                    option_type: option_kind_name(&name.value),
                    value,
                });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen, "')'")?;
        }
        Ok(AddSensitivityClassificationStatement { columns, options }.into())
    }

    /// `[OBJECT:: | ASSEMBLY:: | DATABASE::]name`
    pub(crate) fn parse_signable_element(
        &mut self,
    ) -> PResult<(SignableElementKind, SchemaObjectName)> {
        let mut element_kind = SignableElementKind::NotSpecified;
        if self.peek_is(TokenKind::DoubleColon) {
            element_kind = if self.at_word("OBJECT") {
                SignableElementKind::Object
            } else if self.at_word("ASSEMBLY") {
                SignableElementKind::Assembly
            } else if self.at(TokenKind::Database) {
                SignableElementKind::Database
            } else {
                return Err(self.unexpected("OBJECT, ASSEMBLY or DATABASE"));
            };
            self.advance();
            self.advance();
        }
        Ok((element_kind, self.parse_schema_object_name()?))
    }

    pub(crate) fn parse_crypto_mechanism_list(&mut self) -> PResult<Vec<CryptoMechanism>> {
        let mut mechanisms = vec![self.parse_crypto_mechanism()?];
        while self.eat(TokenKind::Comma) {
            mechanisms.push(self.parse_crypto_mechanism()?);
        }
        Ok(mechanisms)
    }

    /// `CERTIFICATE c [WITH PASSWORD = 'p' | WITH SIGNATURE = 0x..]`,
    /// `[A]SYMMETRIC KEY k [...]` or `PASSWORD = 'p'`
    fn parse_crypto_mechanism(&mut self) -> PResult<CryptoMechanism> {
        if self.eat(TokenKind::Password) {
            self.expect(TokenKind::Eq, "'='")?;
            return Ok(CryptoMechanism {
                crypto_mechanism_type: CryptoMechanismType::Password,
                identifier: None,
                password_or_signature: Some(self.parse_unary_expression()?),
            });
        }
        let crypto_mechanism_type = if self.eat(TokenKind::Certificate) {
            CryptoMechanismType::Certificate
        } else if self.eat_words(&["ASYMMETRIC", "KEY"]) {
            CryptoMechanismType::AsymmetricKey
        } else if self.eat_words(&["SYMMETRIC", "KEY"]) {
            CryptoMechanismType::SymmetricKey
        } else {
            return Err(self.unexpected("CERTIFICATE, ASYMMETRIC KEY, SYMMETRIC KEY or PASSWORD"));
        };
        let identifier = Some(self.parse_identifier()?);
        let password_or_signature = if self.at(TokenKind::With)
            && (self.peek_is(TokenKind::Password) || self.peek_is_word("SIGNATURE"))
        {
            self.advance();
            self.advance();
            self.expect(TokenKind::Eq, "'='")?;
            Some(self.parse_unary_expression()?)
        } else {
            None
        };
        Ok(CryptoMechanism {
            crypto_mechanism_type,
            identifier,
            password_or_signature,
        })
    }

    // ========== Shared option forms ==========

    /// `NAME = value, NAME = value ...` with no parentheses, as in
    /// `CREATE USER u WITH DEFAULT_SCHEMA = dbo`. Entries may also follow
    /// each other without a comma (`PASSWORD = 'x' OLD_PASSWORD = 'y'`).
    pub(crate) fn parse_bare_option_list(&mut self) -> PResult<Vec<StatementOption>> {
        let mut options = vec![self.parse_statement_option()?];
        loop {
            if self.eat(TokenKind::Comma) {
                options.push(self.parse_statement_option()?);
                continue;
            }
            let continues = self.current.kind.is_word()
                && self.peek_is(TokenKind::Eq)
                && !self.at_statement_start();
            if !continues {
                break;
            }
            options.push(self.parse_statement_option()?);
        }
        Ok(options)
    }

    /// An option whose name is a phrase: `DECRYPTION BY PASSWORD = 'x'`,
    /// `EXECUTABLE FILE = 'f'`, `SUBJECT = 's'`
    pub(crate) fn parse_phrase_option(&mut self) -> PResult<StatementOption> {
        let mut words = vec![self.parse_word()?.value];
        while !self.at(TokenKind::Eq) && self.current.kind.is_word() {
            words.push(self.parse_word()?.value);
        }
        let option_kind = option_kind_name(&words.join(" "));
        self.expect(TokenKind::Eq, "'='")?;
        if self.current.kind.is_word() && !self.at_variable() && !self.at(TokenKind::Null) {
            let value = self.parse_word()?;
            return Ok(IdentifierOption { option_kind, value }.into());
        }
        Ok(LiteralOption {
            option_kind,
            value: self.parse_unary_expression()?,
            unit: None,
        }
        .into())
    }

    pub(crate) fn parse_phrase_option_list(&mut self) -> PResult<Vec<StatementOption>> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut options = vec![self.parse_phrase_option()?];
        while self.eat(TokenKind::Comma) {
            options.push(self.parse_phrase_option()?);
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(options)
    }

    /// Optional `AUTHORIZATION owner`
    pub(crate) fn parse_optional_owner(&mut self) -> PResult<Option<Identifier>> {
        if self.eat(TokenKind::Authorization) {
            Ok(Some(self.parse_identifier()?))
        } else {
            Ok(None)
        }
    }

    // ========== Users, roles, logins ==========

    /// After `CREATE USER`
    pub(crate) fn parse_create_user(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let mut user_login_option = None;
        if self.at(TokenKind::For) || self.at(TokenKind::From) {
            self.advance();
            let option_type = if self.eat(TokenKind::Login) {
                UserLoginOptionType::Login
            } else if self.eat(TokenKind::Certificate) {
                UserLoginOptionType::Certificate
            } else if self.eat_words(&["ASYMMETRIC", "KEY"]) {
                UserLoginOptionType::AsymmetricKey
            } else if self.eat_words(&["EXTERNAL", "PROVIDER"]) {
                UserLoginOptionType::External
            } else {
                return Err(self.unexpected("LOGIN, CERTIFICATE, ASYMMETRIC KEY or EXTERNAL PROVIDER"));
            };
            let identifier = if option_type == UserLoginOptionType::External {
                None
            } else {
                Some(self.parse_identifier()?)
            };
            user_login_option = Some(UserLoginOption {
                user_login_option_type: option_type,
                identifier,
            });
        } else if self.eat_words(&["WITHOUT", "LOGIN"]) {
            user_login_option = Some(UserLoginOption {
                user_login_option_type: UserLoginOptionType::WithoutLogin,
                identifier: None,
            });
        }
        let options = if self.eat(TokenKind::With) {
            self.parse_bare_option_list()?
        } else {
            Vec::new()
        };
        Ok(CreateUserStatement {
            name,
            user_login_option,
            options,
        }
        .into())
    }

    /// After `ALTER USER`
    pub(crate) fn parse_alter_user(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        self.expect(TokenKind::With, "WITH")?;
        let options = self.parse_bare_option_list()?;
        Ok(AlterUserStatement { name, options }.into())
    }

    /// After `CREATE [SERVER] ROLE`
    pub(crate) fn parse_create_role(&mut self, server: bool) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let owner = self.parse_optional_owner()?;
        Ok(if server {
            CreateServerRoleStatement { name, owner }.into()
        } else {
            CreateRoleStatement { name, owner }.into()
        })
    }

    /// After `ALTER [SERVER] ROLE`: `ADD MEMBER m | DROP MEMBER m | WITH NAME = n`
    pub(crate) fn parse_alter_role(&mut self, server: bool) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let action = if self.eat(TokenKind::Add) {
            self.expect_word("MEMBER")?;
            AlterRoleActionKind::AddMember
        } else if self.eat(TokenKind::Drop) {
            self.expect_word("MEMBER")?;
            AlterRoleActionKind::DropMember
        } else {
            self.expect(TokenKind::With, "ADD MEMBER, DROP MEMBER or WITH NAME")?;
            self.expect_word("NAME")?;
            self.expect(TokenKind::Eq, "'='")?;
            AlterRoleActionKind::Rename
        };
        let target = self.parse_identifier()?;
        Ok(if server {
            AlterServerRoleStatement {
                name,
                action,
                target,
            }
            .into()
        } else {
            AlterRoleStatement {
                name,
                action,
                target,
            }
            .into()
        })
    }

    /// After `CREATE|ALTER APPLICATION ROLE`
    pub(crate) fn parse_application_role(&mut self, alter: bool) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        self.expect(TokenKind::With, "WITH")?;
        let options = self.parse_bare_option_list()?;
        Ok(if alter {
            AlterApplicationRoleStatement { name, options }.into()
        } else {
            CreateApplicationRoleStatement { name, options }.into()
        })
    }

    /// After `CREATE LOGIN`
    pub(crate) fn parse_create_login(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let mut statement = CreateLoginStatement {
            name,
            source: LoginSourceKind::Password,
            password: None,
            hashed: false,
            must_change: false,
            identifier: None,
            options: Vec::new(),
        };

        if self.eat(TokenKind::From) {
            if self.eat_word("WINDOWS") {
                statement.source = LoginSourceKind::Windows;
            } else if self.eat(TokenKind::Certificate) {
                statement.source = LoginSourceKind::Certificate;
                statement.identifier = Some(self.parse_identifier()?);
            } else if self.eat_words(&["ASYMMETRIC", "KEY"]) {
                statement.source = LoginSourceKind::AsymmetricKey;
                statement.identifier = Some(self.parse_identifier()?);
            } else if self.eat_words(&["EXTERNAL", "PROVIDER"]) {
                statement.source = LoginSourceKind::External;
            } else {
                return Err(self.unexpected("WINDOWS, CERTIFICATE, ASYMMETRIC KEY or EXTERNAL PROVIDER"));
            }
            if self.eat(TokenKind::With) {
                statement.options = self.parse_bare_option_list()?;
            }
            return Ok(statement.into());
        }

        self.expect(TokenKind::With, "WITH or FROM")?;
        self.expect(TokenKind::Password, "PASSWORD")?;
        self.expect(TokenKind::Eq, "'='")?;
        statement.password = Some(self.parse_unary_expression()?);
        loop {
            if self.eat_word("HASHED") {
                statement.hashed = true;
            } else if self.eat_word("MUST_CHANGE") {
                statement.must_change = true;
            } else {
                break;
            }
        }
        if self.eat(TokenKind::Comma) {
            statement.options = self.parse_bare_option_list()?;
        }
        Ok(statement.into())
    }

    /// After `ALTER LOGIN`: `ENABLE | DISABLE | WITH options`
    pub(crate) fn parse_alter_login(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let mut is_enable = None;
        let mut options = Vec::new();
        if self.eat_word("ENABLE") {
            is_enable = Some(true);
        } else if self.eat_word("DISABLE") {
            is_enable = Some(false);
        } else {
            self.expect(TokenKind::With, "ENABLE, DISABLE or WITH")?;
            options = self.parse_login_option_list()?;
        }
        Ok(AlterLoginStatement {
            name,
            is_enable,
            options,
        }
        .into())
    }

    /// Bare options where `PASSWORD = 'x'` may be followed by flags such as
    /// `HASHED`, `MUST_CHANGE` or `UNLOCK`
    fn parse_login_option_list(&mut self) -> PResult<Vec<StatementOption>> {
        let mut options = self.parse_bare_option_list()?;
        while self.current.kind == TokenKind::Ident && !self.at_statement_start() {
            options.push(self.parse_statement_option()?);
            if self.eat(TokenKind::Comma) {
                options.extend(self.parse_bare_option_list()?);
            }
        }
        Ok(options)
    }

    // ========== Assemblies and credentials ==========

    /// After `CREATE ASSEMBLY`
    pub(crate) fn parse_create_assembly(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let owner = self.parse_optional_owner()?;
        self.expect(TokenKind::From, "FROM")?;
        let parameters = self.parse_expression_comma_list()?;
        let options = if self.eat(TokenKind::With) {
            self.parse_bare_option_list()?
        } else {
            Vec::new()
        };
        Ok(CreateAssemblyStatement {
            name,
            owner,
            parameters,
            options,
        }
        .into())
    }

    /// After `ALTER ASSEMBLY`
    pub(crate) fn parse_alter_assembly(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let mut statement = AlterAssemblyStatement {
            name,
            parameters: Vec::new(),
            options: Vec::new(),
            add_files: Vec::new(),
            drop_files: Vec::new(),
            is_drop_all: false,
        };
        loop {
            if self.eat(TokenKind::From) {
                statement.parameters = self.parse_expression_comma_list()?;
            } else if self.eat(TokenKind::With) {
                statement.options = self.parse_bare_option_list()?;
            } else if self.at(TokenKind::Drop) && self.peek.kind == TokenKind::File {
                self.advance();
                self.advance();
                if self.eat(TokenKind::All) {
                    statement.is_drop_all = true;
                } else {
                    statement.drop_files = self.parse_expression_comma_list()?;
                }
            } else if self.at(TokenKind::Add) && self.peek.kind == TokenKind::File {
                self.advance();
                self.advance();
                self.expect(TokenKind::From, "FROM")?;
                loop {
                    statement.add_files.push(self.parse_unary_expression()?);
                    if self.eat(TokenKind::As) {
                        statement.add_files.push(self.parse_unary_expression()?);
                    }
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
            } else {
                break;
            }
        }
        Ok(statement.into())
    }

    pub(crate) fn parse_expression_comma_list(&mut self) -> PResult<Vec<ScalarExpression>> {
        let mut values = vec![self.parse_scalar_expression()?];
        while self.eat(TokenKind::Comma) {
            values.push(self.parse_scalar_expression()?);
        }
        Ok(values)
    }

    /// After `CREATE|ALTER [DATABASE SCOPED] CREDENTIAL`:
    /// `name WITH IDENTITY = 'i' [, SECRET = 's'] [FOR CRYPTOGRAPHIC PROVIDER p]`
    pub(crate) fn parse_credential(&mut self, alter: bool, is_database_scoped: bool) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        self.expect(TokenKind::With, "WITH")?;
        self.expect(TokenKind::Identity, "IDENTITY")?;
        self.expect(TokenKind::Eq, "'='")?;
        let identity = Some(self.parse_unary_expression()?);
        let secret = if self.at(TokenKind::Comma) && self.peek_is_word("SECRET") {
            self.advance();
            self.advance();
            self.expect(TokenKind::Eq, "'='")?;
            Some(self.parse_unary_expression()?)
        } else {
            None
        };
        let crypto_provider = if self.eat(TokenKind::For) {
            self.expect_word("CRYPTOGRAPHIC")?;
            self.expect_word("PROVIDER")?;
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(if alter {
            AlterCredentialStatement {
                name,
                is_database_scoped,
                identity,
                secret,
                crypto_provider,
            }
            .into()
        } else {
            CreateCredentialStatement {
                name,
                is_database_scoped,
                identity,
                secret,
                crypto_provider,
            }
            .into()
        })
    }

    // ========== Keys and certificates ==========

    /// After `CREATE MASTER KEY`
    pub(crate) fn parse_create_master_key(&mut self) -> PResult<Statement> {
        let password = if self.eat_words(&["ENCRYPTION", "BY"]) {
            self.expect(TokenKind::Password, "PASSWORD")?;
            self.expect(TokenKind::Eq, "'='")?;
            Some(self.parse_unary_expression()?)
        } else {
            None
        };
        Ok(CreateMasterKeyStatement { password }.into())
    }

    /// After `ALTER MASTER KEY`
    pub(crate) fn parse_alter_master_key(&mut self) -> PResult<Statement> {
        let force = self.eat_word("FORCE");
        let mut option = String::new();
        if self.eat_word("REGENERATE") {
            option = if force { "ForceRegenerate" } else { "Regenerate" }.to_string();
            self.expect(TokenKind::With, "WITH")?;
        } else if self.eat(TokenKind::Add) {
            option = "AddEncryptionBy".to_string();
        } else if self.eat(TokenKind::Drop) {
            option = "DropEncryptionBy".to_string();
        }
        if option.is_empty() {
            return Err(self.unexpected("REGENERATE, ADD or DROP"));
        }
        self.expect_word("ENCRYPTION")?;
        self.expect(TokenKind::By, "BY")?;
        let mut password = None;
        if self.eat(TokenKind::Password) {
            self.expect(TokenKind::Eq, "'='")?;
            password = Some(self.parse_unary_expression()?);
            option.push_str("Password");
        } else {
            self.expect_word("SERVICE")?;
            self.expect(TokenKind::Master, "MASTER")?;
            self.expect(TokenKind::Key, "KEY")?;
            option.push_str("ServiceMasterKey");
        }
        Ok(AlterMasterKeyStatement { option, password }.into())
    }

    /// After `ALTER SERVICE MASTER KEY`
    pub(crate) fn parse_alter_service_master_key(&mut self) -> PResult<Statement> {
        let force = self.eat_word("FORCE");
        if self.eat_word("REGENERATE") {
            let kind = if force { "ForceRegenerate" } else { "Regenerate" };
            return Ok(AlterServiceMasterKeyStatement {
                kind: kind.to_string(),
                account: None,
                password: None,
            }
            .into());
        }
        self.expect(TokenKind::With, "REGENERATE or WITH")?;
        let account_word = self.parse_word()?;
        let kind = if account_word.is_word("OLD_ACCOUNT") {
            "WithOldAccount"
        } else if account_word.is_word("NEW_ACCOUNT") {
            "WithNewAccount"
        } else {
            return Err(self.error_here(format!(
                "Expected OLD_ACCOUNT or NEW_ACCOUNT, found '{}'",
                account_word.value
            )));
        };
        self.expect(TokenKind::Eq, "'='")?;
        let account = Some(self.parse_unary_expression()?);
        self.expect(TokenKind::Comma, "','")?;
        self.parse_word()?;
        self.expect(TokenKind::Eq, "'='")?;
        let password = Some(self.parse_unary_expression()?);
        Ok(AlterServiceMasterKeyStatement {
            kind: kind.to_string(),
            account,
            password,
        }
        .into())
    }

    /// After `CREATE SYMMETRIC KEY`
    pub(crate) fn parse_create_symmetric_key(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let owner = self.parse_optional_owner()?;
        let provider = if self.at(TokenKind::From) && self.peek_is_word("PROVIDER") {
            self.advance();
            self.advance();
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let mut key_options = Vec::new();
        if self.eat(TokenKind::With) {
            loop {
                if self.at_words(&["ENCRYPTION", "BY"]) {
                    break;
                }
                key_options.push(self.parse_statement_option()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        let encrypting_mechanisms = if self.eat_words(&["ENCRYPTION", "BY"]) {
            self.parse_crypto_mechanism_list()?
        } else {
            Vec::new()
        };
        Ok(CreateSymmetricKeyStatement {
            name,
            owner,
            key_options,
            provider,
            encrypting_mechanisms,
        }
        .into())
    }

    /// After `ALTER SYMMETRIC KEY`: `name ADD|DROP ENCRYPTION BY ...`
    pub(crate) fn parse_alter_symmetric_key(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let is_add = if self.eat(TokenKind::Add) {
            true
        } else {
            self.expect(TokenKind::Drop, "ADD or DROP")?;
            false
        };
        self.expect_word("ENCRYPTION")?;
        self.expect(TokenKind::By, "BY")?;
        let encrypting_mechanisms = self.parse_crypto_mechanism_list()?;
        Ok(AlterSymmetricKeyStatement {
            name,
            is_add,
            encrypting_mechanisms,
        }
        .into())
    }

    /// `FILE = 'f'`, `EXECUTABLE FILE = 'f'`, `ASSEMBLY a`, `PROVIDER p` or
    /// `BINARY = 0x..` after `FROM`
    fn parse_key_source_option(&mut self) -> PResult<StatementOption> {
        if self.at_word("ASSEMBLY") || self.at_word("PROVIDER") {
            let option_kind = option_kind_name(self.advance().literal);
            let value = self.parse_identifier()?;
            return Ok(IdentifierOption { option_kind, value }.into());
        }
        self.parse_phrase_option()
    }

    /// After `CREATE ASYMMETRIC KEY`
    pub(crate) fn parse_create_asymmetric_key(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let owner = self.parse_optional_owner()?;
        let mut source_options = Vec::new();
        if self.eat(TokenKind::From) {
            source_options.push(self.parse_key_source_option()?);
        }
        let mut options = Vec::new();
        if self.eat(TokenKind::With) {
            loop {
                options.push(self.parse_statement_option()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        let password = if self.eat_words(&["ENCRYPTION", "BY"]) {
            self.expect(TokenKind::Password, "PASSWORD")?;
            self.expect(TokenKind::Eq, "'='")?;
            Some(self.parse_unary_expression()?)
        } else {
            None
        };
        Ok(CreateAsymmetricKeyStatement {
            name,
            owner,
            source_options,
            options,
            password,
        }
        .into())
    }

    /// After `ALTER ASYMMETRIC KEY`
    pub(crate) fn parse_alter_asymmetric_key(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let (kind, options) = self.parse_private_key_change()?;
        Ok(AlterAsymmetricKeyStatement {
            name,
            kind,
            options,
        }
        .into())
    }

    /// `REMOVE PRIVATE KEY` or `WITH PRIVATE KEY (...)`
    fn parse_private_key_change(&mut self) -> PResult<(String, Vec<StatementOption>)> {
        if self.eat_words(&["REMOVE", "PRIVATE", "KEY"]) {
            return Ok(("RemovePrivateKey".to_string(), Vec::new()));
        }
        self.expect(TokenKind::With, "REMOVE or WITH")?;
        self.expect_word("PRIVATE")?;
        self.expect(TokenKind::Key, "KEY")?;
        let options = self.parse_phrase_option_list()?;
        Ok(("WithPrivateKey".to_string(), options))
    }

    /// After `CREATE CERTIFICATE`
    pub(crate) fn parse_create_certificate(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        let owner = self.parse_optional_owner()?;
        let mut source_options = Vec::new();
        let mut private_key_options = Vec::new();
        let mut options = Vec::new();

        if self.eat(TokenKind::From) {
            source_options.push(self.parse_key_source_option()?);
            if self.at(TokenKind::With) && self.peek_is_word("PRIVATE") {
                self.advance();
                self.advance();
                self.expect(TokenKind::Key, "KEY")?;
                private_key_options = self.parse_phrase_option_list()?;
            }
        } else {
            if self.at_words(&["ENCRYPTION", "BY"]) {
                options.push(self.parse_phrase_option()?);
            }
            if self.eat(TokenKind::With) {
                options.push(self.parse_phrase_option()?);
                while self.eat(TokenKind::Comma) {
                    options.push(self.parse_phrase_option()?);
                }
            }
        }

        let active_for_begin_dialog = self.parse_active_for_begin_dialog()?;
        Ok(CreateCertificateStatement {
            name,
            owner,
            source_options,
            private_key_options,
            options,
            active_for_begin_dialog,
        }
        .into())
    }

    /// After `ALTER CERTIFICATE`
    pub(crate) fn parse_alter_certificate(&mut self) -> PResult<Statement> {
        let name = self.parse_identifier()?;
        if self.at(TokenKind::With) && self.peek_is_word("ACTIVE") {
            self.advance();
            let active_for_begin_dialog = self.parse_active_for_begin_dialog()?;
            return Ok(AlterCertificateStatement {
                name,
                kind: "WithActiveForBeginDialog".to_string(),
                private_key_options: Vec::new(),
                active_for_begin_dialog,
            }
            .into());
        }
        let (kind, private_key_options) = self.parse_private_key_change()?;
        Ok(AlterCertificateStatement {
            name,
            kind,
            private_key_options,
            active_for_begin_dialog: OptionState::NotSet,
        }
        .into())
    }

    /// Optional `ACTIVE FOR BEGIN_DIALOG = ON|OFF`
    fn parse_active_for_begin_dialog(&mut self) -> PResult<OptionState> {
        if !self.eat_word("ACTIVE") {
            return Ok(OptionState::NotSet);
        }
        self.expect(TokenKind::For, "FOR")?;
        self.expect_word("BEGIN_DIALOG")?;
        self.expect(TokenKind::Eq, "'='")?;
        self.parse_option_state()
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
    fn test_grant_on_object() {
        let value = statement("GRANT SELECT, UPDATE (a, b) ON OBJECT::dbo.t TO app_user, public WITH GRANT OPTION AS dbo");
        assert_eq!(value["$type"], "GrantStatement");
        assert_eq!(value["Permissions"][1]["Columns"].as_array().unwrap().len(), 2);
        assert_eq!(value["SecurityTargetObject"]["ObjectKind"], "Object");
        assert_eq!(value["Principals"][1]["PrincipalType"], "Public");
        assert_eq!(value["WithGrantOption"], true);
        assert_eq!(value["AsClause"]["Value"], "dbo");
    }

    #[test]
    fn test_multi_word_permissions_and_classes() {
        let value = statement("GRANT VIEW DEFINITION ON XML SCHEMA COLLECTION::dbo.c TO [domain\\u]");
        assert_eq!(value["Permissions"][0]["Identifiers"].as_array().unwrap().len(), 2);
        assert_eq!(value["SecurityTargetObject"]["ObjectKind"], "XmlSchemaCollection");
        assert_eq!(value["Principals"][0]["Identifier"]["Value"], "domain\\u");

        let value = statement("GRANT CREATE TABLE TO bob");
        assert_eq!(value["SecurityTargetObject"], Value::Null);
    }

    #[test]
    fn test_deny_and_revoke() {
        let value = statement("DENY EXECUTE ON SCHEMA::sales TO clerk CASCADE");
        assert_eq!(value["$type"], "DenyStatement");
        assert_eq!(value["CascadeOption"], true);

        let value = statement("REVOKE GRANT OPTION FOR SELECT ON dbo.t FROM alice CASCADE");
        assert_eq!(value["$type"], "RevokeStatement");
        assert_eq!(value["GrantOptionFor"], true);
        assert_eq!(value["SecurityTargetObject"]["ObjectKind"], "NotSpecified");
    }

    #[test]
    fn test_add_signature_and_classification() {
        let value = statement("ADD SIGNATURE TO OBJECT::dbo.p BY CERTIFICATE c1 WITH PASSWORD = 'pw', ASYMMETRIC KEY k1");
        assert_eq!(value["$type"], "AddSignatureStatement");
        assert_eq!(value["ElementKind"], "Object");
        assert_eq!(value["Cryptos"][0]["PasswordOrSignature"]["Value"], "pw");
        assert_eq!(value["Cryptos"][1]["CryptoMechanismType"], "AsymmetricKey");

        let value = statement(
            "ADD SENSITIVITY CLASSIFICATION TO dbo.t.ssn WITH (LABEL = 'Highly Confidential', INFORMATION_TYPE = 'SSN', RANK = CRITICAL)",
        );
        assert_eq!(value["Options"][0]["OptionType"], "Label");
        assert_eq!(value["Options"][1]["OptionType"], "InformationType");
        assert_eq!(value["Options"][2]["Value"]["$type"], "IdentifierLiteral");
    }

    #[test]
    fn test_users_and_roles() {
        let value = statement("CREATE USER u1 FOR LOGIN l1 WITH DEFAULT_SCHEMA = sales");
        assert_eq!(value["UserLoginOption"]["UserLoginOptionType"], "Login");
        assert_eq!(value["Options"][0]["OptionKind"], "DefaultSchema");

        let value = statement("CREATE USER u2 WITHOUT LOGIN");
        assert_eq!(value["UserLoginOption"]["UserLoginOptionType"], "WithoutLogin");

        let value = statement("ALTER ROLE db_datareader ADD MEMBER u1");
        assert_eq!(value["Action"], "AddMember");
        assert_eq!(value["Target"]["Value"], "u1");

        let value = statement("ALTER SERVER ROLE r WITH NAME = r2");
        assert_eq!(value["$type"], "AlterServerRoleStatement");
        assert_eq!(value["Action"], "Rename");
    }

    #[test]
    fn test_logins() {
        let value = statement("CREATE LOGIN l WITH PASSWORD = 'x' MUST_CHANGE, CHECK_EXPIRATION = ON, DEFAULT_DATABASE = app");
        assert_eq!(value["Source"], "Password");
        assert_eq!(value["MustChange"], true);
        assert_eq!(value["Options"].as_array().unwrap().len(), 2);

        let value = statement("CREATE LOGIN [dom\\x] FROM WINDOWS WITH DEFAULT_DATABASE = app");
        assert_eq!(value["Source"], "Windows");

        let value = statement("ALTER LOGIN l WITH PASSWORD = 'n' OLD_PASSWORD = 'o'");
        assert_eq!(value["Options"].as_array().unwrap().len(), 2);
        assert_eq!(statement("ALTER LOGIN l DISABLE")["IsEnable"], false);
    }

    #[test]
    fn test_keys_and_certificates() {
        let value = statement("CREATE SYMMETRIC KEY k WITH ALGORITHM = AES_256 ENCRYPTION BY CERTIFICATE c");
        assert_eq!(value["KeyOptions"][0]["Value"]["Value"], "AES_256");
        assert_eq!(value["EncryptingMechanisms"][0]["Identifier"]["Value"], "c");

        let value = statement("CREATE CERTIFICATE c ENCRYPTION BY PASSWORD = 'p' WITH SUBJECT = 's', EXPIRY_DATE = '20301231'");
        assert_eq!(value["Options"][0]["OptionKind"], "EncryptionByPassword");
        assert_eq!(value["Options"][1]["OptionKind"], "Subject");
        assert_eq!(value["ActiveForBeginDialog"], "NotSet");

        let value = statement(
            "CREATE CERTIFICATE c FROM FILE = 'c.cer' WITH PRIVATE KEY (FILE = 'c.pvk', DECRYPTION BY PASSWORD = 'p') ACTIVE FOR BEGIN_DIALOG = ON",
        );
        assert_eq!(value["SourceOptions"][0]["OptionKind"], "File");
        assert_eq!(value["PrivateKeyOptions"][1]["OptionKind"], "DecryptionByPassword");
        assert_eq!(value["ActiveForBeginDialog"], "On");

        let value = statement("ALTER MASTER KEY ADD ENCRYPTION BY SERVICE MASTER KEY");
        assert_eq!(value["Option"], "AddEncryptionByServiceMasterKey");

        let value = statement("ALTER SERVICE MASTER KEY FORCE REGENERATE");
        assert_eq!(value["Kind"], "ForceRegenerate");
    }

    #[test]
    fn test_credentials_and_assemblies() {
        let value = statement("CREATE DATABASE SCOPED CREDENTIAL c WITH IDENTITY = 'id', SECRET = 's'");
        assert_eq!(value["$type"], "CreateCredentialStatement");
        assert_eq!(value["IsDatabaseScoped"], true);
        assert_eq!(value["Secret"]["Value"], "s");

        let value = statement("CREATE ASSEMBLY a AUTHORIZATION dbo FROM 'c:\\a.dll' WITH PERMISSION_SET = SAFE");
        assert_eq!(value["Owner"]["Value"], "dbo");
        assert_eq!(value["Options"][0]["OptionKind"], "PermissionSet");

        let value = statement("ALTER ASSEMBLY a DROP FILE ALL ADD FILE FROM 'x.pdb'");
        assert_eq!(value["IsDropAll"], true);
        assert_eq!(value["AddFiles"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_alter_authorization() {
        let value = statement("ALTER AUTHORIZATION ON SCHEMA::sales TO SCHEMA OWNER");
        assert_eq!(value["ToSchemaOwner"], true);
        assert_eq!(value["SecurityTargetObject"]["ObjectKind"], "Schema");
    }
}
