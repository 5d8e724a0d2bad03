//! Table bodies: columns, constraints, inline indexes and system-time periods

use super::{PResult, Parser};
use crate::lexer::TokenKind;
use tsql_ast::expr::ColumnReferenceExpression;
use tsql_ast::query::SortOrder;
use tsql_ast::table_def::{
    CheckConstraintDefinition, ColumnDefinition, ColumnWithSortOrder, ConstraintDefinition,
    DefaultConstraintDefinition, DeleteUpdateAction, ForeignKeyConstraintDefinition,
    GeneratedAlwaysType, GraphConnectionBetweenNodes, GraphConnectionConstraintDefinition,
    IdentityOptions, IndexDefinition, IndexTypeKind, NullableConstraintDefinition,
    SystemTimePeriodDefinition, TableDefinition, UniqueConstraintDefinition,
};

impl<'a> Parser<'a> {
    /// `( element, ... )`; the cursor is on `(`
    pub(crate) fn parse_table_definition(&mut self) -> PResult<TableDefinition> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut definition = TableDefinition::default();
        loop {
            if self.at(TokenKind::RParen) {
                break;
            }
            self.parse_table_element(&mut definition)?;
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(definition)
    }

    /// One column, table constraint, inline index or period, appended to
    /// `definition`
    pub(crate) fn parse_table_element(&mut self, definition: &mut TableDefinition) -> PResult<()> {
        if self.at_table_constraint_start() {
            let constraint = self.parse_table_constraint()?;
            definition.table_constraints.push(constraint);
        } else if self.at(TokenKind::Index) && !self.peek_is(TokenKind::Comma) {
            self.advance();
            let index = self.parse_inline_index(true)?;
            definition.indexes.push(index);
        } else if self.at_word("PERIOD") && self.peek_is(TokenKind::For) {
            definition.system_time_period = Some(self.parse_system_time_period()?);
        } else {
            let column = self.parse_column_definition()?;
            definition.column_definitions.push(column);
        }
        Ok(())
    }

    pub(crate) fn at_table_constraint_start(&self) -> bool {
        match self.current.kind {
            TokenKind::Constraint
            | TokenKind::Primary
            | TokenKind::Unique
            | TokenKind::Foreign
            | TokenKind::Check => true,
            _ => self.at_word("CONNECTION") && self.peek_is(TokenKind::LParen),
        }
    }

    /// `PERIOD FOR SYSTEM_TIME (start, end)`
    pub(crate) fn parse_system_time_period(&mut self) -> PResult<SystemTimePeriodDefinition> {
        self.expect_word("PERIOD")?;
        self.expect(TokenKind::For, "FOR")?;
        self.expect_word("SYSTEM_TIME")?;
        self.expect(TokenKind::LParen, "'('")?;
        let start_time_column = self.parse_identifier()?;
        self.expect(TokenKind::Comma, "','")?;
        let end_time_column = self.parse_identifier()?;
        self.expect(TokenKind::RParen, "')'")?;
        Ok(SystemTimePeriodDefinition {
            start_time_column,
            end_time_column,
        })
    }

    // ========== Columns ==========

    pub(crate) fn parse_column_definition(&mut self) -> PResult<ColumnDefinition> {
        let mut column = ColumnDefinition::new(self.parse_identifier()?);

        if self.eat(TokenKind::As) {
            column.computed_column_expression = Some(self.parse_scalar_expression()?);
            column.is_persisted = self.eat_word("PERSISTED");
        } else {
            column.data_type = Some(self.parse_data_type()?);
        }

        self.parse_column_attributes(&mut column)?;
        Ok(column)
    }

    /// Everything after the type: collation, identity, nullability and
    /// column-level constraints, in any order
    fn parse_column_attributes(&mut self, column: &mut ColumnDefinition) -> PResult<()> {
        loop {
            let pending_name = if self.eat(TokenKind::Constraint) {
                Some(self.parse_identifier()?)
            } else {
                None
            };

            let kind = self.current.kind;
            match kind {
                TokenKind::Collate if pending_name.is_none() => {
                    self.advance();
                    column.collation = Some(self.parse_identifier()?);
                }
                TokenKind::Identity if pending_name.is_none() => {
                    column.identity_options = Some(self.parse_identity_options()?);
                }
                TokenKind::Rowguidcol if pending_name.is_none() => {
                    self.advance();
                    column.is_row_guid_col = true;
                }
                TokenKind::Null | TokenKind::Not
                    if !(self.at(TokenKind::Not) && self.peek_is(TokenKind::For)) =>
                {
                    let nullable = !self.eat(TokenKind::Not);
                    self.expect(TokenKind::Null, "NULL")?;
                    column.constraints.push(
                        NullableConstraintDefinition {
                            constraint_identifier: pending_name,
                            nullable,
                        }
                        .into(),
                    );
                }
                TokenKind::Default => {
                    self.advance();
                    let expression = self.parse_scalar_expression()?;
                    let with_values = self.eat_words(&["WITH", "VALUES"]);
                    column.default_constraint = Some(DefaultConstraintDefinition {
                        constraint_identifier: pending_name,
                        expression,
                        column: None,
                        with_values,
                    });
                }
                TokenKind::Primary
                | TokenKind::Unique
                | TokenKind::Check
                | TokenKind::Foreign
                | TokenKind::References => {
                    let mut constraint = self.parse_constraint_body()?;
                    if let Some(name) = pending_name {
                        constraint.set_name(name);
                    }
                    column.constraints.push(constraint);
                }
                TokenKind::Index if pending_name.is_none() => {
                    self.advance();
                    column.index = Some(self.parse_inline_index(false)?);
                }
                _ if pending_name.is_some() => {
                    return Err(self.unexpected("constraint"));
                }
                _ if self.at_word("GENERATED") => {
                    column.generated_always = Some(self.parse_generated_always()?);
                }
                _ if self.at_word("MASKED") => {
                    self.advance();
                    self.expect(TokenKind::With, "WITH")?;
                    self.expect(TokenKind::LParen, "'('")?;
                    self.expect(TokenKind::Function, "FUNCTION")?;
                    self.expect(TokenKind::Eq, "'='")?;
                    column.is_masked = true;
                    column.masking_function = Some(self.parse_string_literal()?);
                    self.expect(TokenKind::RParen, "')'")?;
                }
                _ => {
                    if self.eat_word("SPARSE") {
                        column.is_sparse = true;
                    } else if self.eat_word("HIDDEN") {
                        column.is_hidden = true;
                    } else if !self.eat_word("FILESTREAM") {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// `IDENTITY [(seed, increment)] [NOT FOR REPLICATION]`
    fn parse_identity_options(&mut self) -> PResult<IdentityOptions> {
        self.expect(TokenKind::Identity, "IDENTITY")?;
        let mut identity = IdentityOptions {
            identity_seed: None,
            identity_increment: None,
            is_identity_not_for_replication: false,
        };
        if self.eat(TokenKind::LParen) {
            identity.identity_seed = Some(self.parse_unary_expression()?);
            self.expect(TokenKind::Comma, "','")?;
            identity.identity_increment = Some(self.parse_unary_expression()?);
            self.expect(TokenKind::RParen, "')'")?;
        }
        identity.is_identity_not_for_replication = self.eat_not_for_replication();
        Ok(identity)
    }

    pub(crate) fn eat_not_for_replication(&mut self) -> bool {
        self.eat_words(&["NOT", "FOR", "REPLICATION"])
    }

    /// `GENERATED ALWAYS AS {ROW | TRANSACTION_ID | SEQUENCE_NUMBER} {START | END} [HIDDEN]`
    fn parse_generated_always(&mut self) -> PResult<GeneratedAlwaysType> {
        self.expect_word("GENERATED")?;
        self.expect_word("ALWAYS")?;
        self.expect(TokenKind::As, "AS")?;
        let kind = self.parse_word()?;
        let start = if self.eat_word("START") {
            true
        } else if self.eat(TokenKind::End) {
            false
        } else {
            return Err(self.unexpected("START or END"));
        };
        let generated = match (kind.value.to_ascii_uppercase().as_str(), start) {
            ("ROW", true) => GeneratedAlwaysType::RowStart,
            ("ROW", false) => GeneratedAlwaysType::RowEnd,
            ("TRANSACTION_ID", true) => GeneratedAlwaysType::TransactionIdStart,
            ("TRANSACTION_ID", false) => GeneratedAlwaysType::TransactionIdEnd,
            ("SEQUENCE_NUMBER", true) => GeneratedAlwaysType::SequenceNumberStart,
            ("SEQUENCE_NUMBER", false) => GeneratedAlwaysType::SequenceNumberEnd,
            _ => {
                return Err(self.error_here(format!(
                    "Unknown GENERATED ALWAYS column kind '{}'",
                    kind.value
                )));
            }
        };
        Ok(generated)
    }

    // ========== Constraints ==========

    /// `[CONSTRAINT name] constraint-body`
    pub(crate) fn parse_table_constraint(&mut self) -> PResult<ConstraintDefinition> {
        let name = if self.eat(TokenKind::Constraint) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let mut constraint = self.parse_constraint_body()?;
        if let Some(name) = name {
            constraint.set_name(name);
        }
        Ok(constraint)
    }

    /// PRIMARY KEY, UNIQUE, FOREIGN KEY / REFERENCES, CHECK, DEFAULT ... FOR
    /// or CONNECTION, without the leading name
    pub(crate) fn parse_constraint_body(&mut self) -> PResult<ConstraintDefinition> {
        match self.current.kind {
            TokenKind::Primary | TokenKind::Unique => {
                let is_primary_key = self.eat(TokenKind::Primary);
                if is_primary_key {
                    self.expect(TokenKind::Key, "KEY")?;
                } else {
                    self.advance();
                }
                let clustered = if self.eat(TokenKind::Clustered) {
                    Some(true)
                } else if self.eat(TokenKind::Nonclustered) {
                    self.eat_word("HASH");
                    Some(false)
                } else {
                    None
                };
                let columns = if self.at(TokenKind::LParen) {
                    self.parse_sorted_columns()?
                } else {
                    Vec::new()
                };
                let index_options = self.parse_optional_index_options()?;
                let on_file_group_or_partition_scheme = self.parse_optional_file_group()?;
                Ok(UniqueConstraintDefinition {
                    constraint_identifier: None,
                    clustered,
                    is_primary_key,
                    columns,
                    index_options,
                    on_file_group_or_partition_scheme,
                }
                .into())
            }
            TokenKind::Foreign | TokenKind::References => {
                let columns = if self.eat(TokenKind::Foreign) {
                    self.expect(TokenKind::Key, "KEY")?;
                    self.parse_parenthesized_identifiers()?
                } else {
                    Vec::new()
                };
                self.expect(TokenKind::References, "REFERENCES")?;
                let reference_table_name = self.parse_schema_object_name()?;
                let referenced_table_columns = if self.at(TokenKind::LParen) {
                    self.parse_parenthesized_identifiers()?
                } else {
                    Vec::new()
                };
                let mut delete_action = DeleteUpdateAction::NotSpecified;
                let mut update_action = DeleteUpdateAction::NotSpecified;
                while self.at(TokenKind::On) {
                    if self.peek_is(TokenKind::Delete) {
                        self.advance();
                        self.advance();
                        delete_action = self.parse_delete_update_action()?;
                    } else if self.peek_is(TokenKind::Update) {
                        self.advance();
                        self.advance();
                        update_action = self.parse_delete_update_action()?;
                    } else {
                        break;
                    }
                }
                let not_for_replication = self.eat_not_for_replication();
                Ok(ForeignKeyConstraintDefinition {
                    constraint_identifier: None,
                    columns,
                    reference_table_name,
                    referenced_table_columns,
                    delete_action,
                    update_action,
                    not_for_replication,
                }
                .into())
            }
            TokenKind::Check => {
                self.advance();
                let not_for_replication = self.eat_not_for_replication();
                self.expect(TokenKind::LParen, "'('")?;
                let check_condition = self.parse_boolean_expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(CheckConstraintDefinition {
                    constraint_identifier: None,
                    check_condition,
                    not_for_replication,
                }
                .into())
            }
            TokenKind::Default => {
                self.advance();
                let expression = self.parse_scalar_expression()?;
                let column = if self.eat(TokenKind::For) {
                    Some(self.parse_identifier()?)
                } else {
                    None
                };
                let with_values = self.eat_words(&["WITH", "VALUES"]);
                Ok(DefaultConstraintDefinition {
                    constraint_identifier: None,
                    expression,
                    column,
                    with_values,
                }
                .into())
            }
            _ if self.at_word("CONNECTION") => {
                self.advance();
                self.expect(TokenKind::LParen, "'('")?;
                let mut from_node_to_node_list = Vec::new();
                loop {
                    let from_node = self.parse_schema_object_name()?;
                    self.expect(TokenKind::To, "TO")?;
                    let to_node = self.parse_schema_object_name()?;
                    from_node_to_node_list.push(GraphConnectionBetweenNodes { from_node, to_node });
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RParen, "')'")?;
                let delete_action = if self.at(TokenKind::On) && self.peek_is(TokenKind::Delete) {
                    self.advance();
                    self.advance();
                    self.parse_delete_update_action()?
                } else {
                    DeleteUpdateAction::NotSpecified
                };
                Ok(GraphConnectionConstraintDefinition {
                    constraint_identifier: None,
                    from_node_to_node_list,
                    delete_action,
                }
                .into())
            }
            _ => Err(self.unexpected("constraint")),
        }
    }

    /// `CASCADE | SET NULL | SET DEFAULT | NO ACTION`
    fn parse_delete_update_action(&mut self) -> PResult<DeleteUpdateAction> {
        if self.eat(TokenKind::Cascade) {
            return Ok(DeleteUpdateAction::Cascade);
        }
        if self.eat(TokenKind::Set) {
            if self.eat(TokenKind::Null) {
                return Ok(DeleteUpdateAction::SetNull);
            }
            self.expect(TokenKind::Default, "NULL or DEFAULT")?;
            return Ok(DeleteUpdateAction::SetDefault);
        }
        if self.eat_words(&["NO", "ACTION"]) {
            return Ok(DeleteUpdateAction::NoAction);
        }
        Err(self.unexpected("CASCADE, SET NULL, SET DEFAULT or NO ACTION"))
    }

    /// `(col [ASC|DESC], ...)`
    pub(crate) fn parse_sorted_columns(&mut self) -> PResult<Vec<ColumnWithSortOrder>> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut columns = Vec::new();
        loop {
            let column = ColumnReferenceExpression::regular(self.parse_multi_part_identifier()?);
            let sort_order = if self.eat(TokenKind::Asc) {
                SortOrder::Ascending
            } else if self.eat(TokenKind::Desc) {
                SortOrder::Descending
            } else {
                SortOrder::NotSpecified
            };
            columns.push(ColumnWithSortOrder { column, sort_order });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(columns)
    }

    // ========== Indexes ==========

    /// `[CLUSTERED | NONCLUSTERED] [COLUMNSTORE | HASH]`
    pub(crate) fn parse_index_type(&mut self) -> Option<IndexTypeKind> {
        if self.eat(TokenKind::Clustered) {
            if self.eat_word("COLUMNSTORE") {
                return Some(IndexTypeKind::ClusteredColumnStore);
            }
            return Some(IndexTypeKind::Clustered);
        }
        if self.eat(TokenKind::Nonclustered) {
            if self.eat_word("COLUMNSTORE") {
                return Some(IndexTypeKind::NonClusteredColumnStore);
            }
            if self.eat_word("HASH") {
                return Some(IndexTypeKind::NonClusteredHash);
            }
            return Some(IndexTypeKind::NonClustered);
        }
        if self.eat_word("COLUMNSTORE") {
            return Some(IndexTypeKind::NonClusteredColumnStore);
        }
        None
    }

    /// `name [UNIQUE] [kind] (cols) [INCLUDE (...)] [WHERE ...] [WITH (...)] [ON fg]`
    /// after `INDEX`. Column-level indexes name no columns.
    fn parse_inline_index(&mut self, table_level: bool) -> PResult<IndexDefinition> {
        let name = self.parse_identifier()?;
        let unique = self.eat(TokenKind::Unique);
        let index_type = self.parse_index_type();
        let columns = if table_level && self.at(TokenKind::LParen) {
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
        Ok(IndexDefinition {
            name,
            unique,
            index_type,
            columns,
            include_columns,
            index_options,
            filter_predicate,
            on_file_group_or_partition_scheme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tsql_core::ParserOptions;

    fn table(source: &str) -> Value {
        let mut parser = Parser::new(source, ParserOptions::default());
        let definition = parser.parse_table_definition().unwrap();
        assert_eq!(parser.current.kind, TokenKind::Eof, "unparsed tail in {source}");
        serde_json::to_value(definition).unwrap()
    }

    #[test]
    fn test_columns_and_column_constraints() {
        let value = table(
            "(id INT IDENTITY(1, 1) NOT NULL CONSTRAINT pk_t PRIMARY KEY, \
             name NVARCHAR(50) COLLATE Latin1_General_CI_AS NULL DEFAULT N'x', \
             parent INT REFERENCES dbo.t (id) ON DELETE CASCADE)",
        );
        let id = &value["ColumnDefinitions"][0];
        assert_eq!(id["IdentityOptions"]["IdentitySeed"]["Value"], "1");
        assert_eq!(id["Constraints"][0]["Nullable"], false);
        assert_eq!(id["Constraints"][1]["$type"], "UniqueConstraintDefinition");
        assert_eq!(id["Constraints"][1]["ConstraintIdentifier"]["Value"], "pk_t");

        let name = &value["ColumnDefinitions"][1];
        assert_eq!(name["Collation"]["Value"], "Latin1_General_CI_AS");
        assert_eq!(name["DefaultConstraint"]["Expression"]["IsNational"], true);

        let parent = &value["ColumnDefinitions"][2];
        assert_eq!(parent["Constraints"][0]["DeleteAction"], "Cascade");
        assert_eq!(parent["Constraints"][0]["ReferencedTableColumns"][0]["Value"], "id");
    }

    #[test]
    fn test_table_constraints() {
        let value = table(
            "(a INT, b INT, CONSTRAINT pk PRIMARY KEY CLUSTERED (a ASC, b DESC) WITH (FILLFACTOR = 90) ON [PRIMARY], \
             UNIQUE NONCLUSTERED (b), CHECK (a > 0), \
             CONSTRAINT fk FOREIGN KEY (b) REFERENCES other (id) ON UPDATE NO ACTION NOT FOR REPLICATION)",
        );
        let constraints = &value["TableConstraints"];
        assert_eq!(constraints[0]["IsPrimaryKey"], true);
        assert_eq!(constraints[0]["Clustered"], true);
        assert_eq!(constraints[0]["Columns"][1]["SortOrder"], "Descending");
        assert_eq!(constraints[0]["IndexOptions"][0]["OptionKind"], "FillFactor");
        assert_eq!(
            constraints[0]["OnFileGroupOrPartitionScheme"]["Name"]["Value"],
            "PRIMARY"
        );
        assert_eq!(constraints[1]["Clustered"], false);
        assert_eq!(constraints[2]["$type"], "CheckConstraintDefinition");
        assert_eq!(constraints[3]["UpdateAction"], "NoAction");
        assert_eq!(constraints[3]["NotForReplication"], true);
    }

    #[test]
    fn test_computed_and_temporal_columns() {
        let value = table(
            "(total AS price * qty PERSISTED, \
             valid_from DATETIME2 GENERATED ALWAYS AS ROW START HIDDEN NOT NULL, \
             valid_to DATETIME2 GENERATED ALWAYS AS ROW END NOT NULL, \
             email VARCHAR(100) MASKED WITH (FUNCTION = 'email()'), \
             PERIOD FOR SYSTEM_TIME (valid_from, valid_to))",
        );
        let columns = &value["ColumnDefinitions"];
        assert_eq!(columns[0]["IsPersisted"], true);
        assert_eq!(columns[0]["DataType"], Value::Null);
        assert_eq!(columns[1]["GeneratedAlways"], "RowStart");
        assert_eq!(columns[1]["IsHidden"], true);
        assert_eq!(columns[2]["GeneratedAlways"], "RowEnd");
        assert_eq!(columns[3]["MaskingFunction"]["Value"], "email()");
        assert_eq!(value["SystemTimePeriod"]["EndTimeColumn"]["Value"], "valid_to");
    }

    #[test]
    fn test_inline_indexes() {
        let value = table(
            "(id INT INDEX ix_id NONCLUSTERED, v INT, \
             INDEX ix_v UNIQUE CLUSTERED (v) INCLUDE (id) WHERE v > 0, \
             INDEX ix_cs CLUSTERED COLUMNSTORE)",
        );
        assert_eq!(value["ColumnDefinitions"][0]["Index"]["IndexType"], "NonClustered");
        let indexes = &value["Indexes"];
        assert_eq!(indexes[0]["Unique"], true);
        assert_eq!(indexes[0]["IncludeColumns"][0]["$type"], "ColumnReferenceExpression");
        assert_eq!(indexes[0]["FilterPredicate"]["$type"], "BooleanComparisonExpression");
        assert_eq!(indexes[1]["IndexType"], "ClusteredColumnStore");
    }

    #[test]
    fn test_graph_connection_constraint() {
        let value = table("(CONSTRAINT ec CONNECTION (Person TO City, Person TO Person) ON DELETE CASCADE)");
        let constraint = &value["TableConstraints"][0];
        assert_eq!(constraint["$type"], "GraphConnectionConstraintDefinition");
        assert_eq!(constraint["FromNodeToNodeList"].as_array().unwrap().len(), 2);
        assert_eq!(constraint["DeleteAction"], "Cascade");
    }

    #[test]
    fn test_default_for_column() {
        let mut parser = Parser::new("CONSTRAINT df DEFAULT 0 FOR qty", ParserOptions::default());
        let constraint = serde_json::to_value(parser.parse_table_constraint().unwrap()).unwrap();
        assert_eq!(constraint["ConstraintIdentifier"]["Value"], "df");
        assert_eq!(constraint["Column"]["Value"], "qty");
    }

    #[test]
    fn test_dangling_constraint_name_is_error() {
        let mut parser = Parser::new("(a INT CONSTRAINT c)", ParserOptions::default());
        assert!(parser.parse_table_definition().is_err());
    }
}
