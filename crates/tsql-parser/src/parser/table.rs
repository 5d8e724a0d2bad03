//! Table sources, joins and table hints

use super::{PResult, Parser};
use crate::lexer::TokenKind;
use tsql_ast::expr::ColumnReferenceExpression;
use tsql_ast::table::{
    BulkInsertOption, BulkOpenRowset, ColumnDefinitionBase, ForceSeekTableHint, IndexTableHint,
    InlineDerivedTable, JoinHint, JoinParenthesisTableReference, LiteralBulkInsertOption,
    LiteralTableHint, NamedTableReference, OpenRowsetTableReference, PivotedTableReference,
    PlainTableHint, PredictTableReference, QualifiedJoin, QualifiedJoinType, QueryDerivedTable,
    RowValue, SchemaDeclarationItem, SchemaObjectFunctionTableReference, SimpleBulkInsertOption,
    TableHint, TableHintKind, TemporalClause, TemporalClauseType, UnpivotedTableReference,
    UnqualifiedJoin, UnqualifiedJoinType, VariableMethodCallTableReference,
    VariableTableReference,
};
use tsql_ast::{Identifier, SchemaObjectName, TableReference};
use tsql_core::ParseError;

enum JoinKeyword {
    Qualified(QualifiedJoinType, JoinHint),
    Unqualified(UnqualifiedJoinType),
}

impl<'a> Parser<'a> {
    /// Comma-separated join trees of a FROM clause
    pub(crate) fn parse_table_reference_list(&mut self) -> PResult<Vec<TableReference>> {
        let mut references = vec![self.parse_table_reference()?];
        while self.eat(TokenKind::Comma) {
            references.push(self.parse_table_reference()?);
        }
        Ok(references)
    }

    /// One table source with every join folded onto it, left to right
    pub(crate) fn parse_table_reference(&mut self) -> PResult<TableReference> {
        self.nested(|p| {
            let first = p.parse_table_source()?;
            p.parse_joins(first)
        })
    }

    fn parse_joins(&mut self, mut left: TableReference) -> PResult<TableReference> {
        while let Some(keyword) = self.parse_join_keyword()? {
            left = match keyword {
                JoinKeyword::Unqualified(unqualified_join_type) => UnqualifiedJoin {
                    unqualified_join_type,
                    first_table_reference: left,
                    second_table_reference: self.parse_table_source()?,
                }
                .into(),
                JoinKeyword::Qualified(qualified_join_type, join_hint) => {
                    let mut second = self.parse_table_source()?;
                    // `a JOIN b JOIN c ON ... ON ...` nests to the right
                    if !self.at(TokenKind::On) {
                        second = self.nested(|p| p.parse_joins(second))?;
                    }
                    self.expect(TokenKind::On, "ON")?;
                    let search_condition = self.parse_boolean_expression()?;
                    QualifiedJoin {
                        qualified_join_type,
                        join_hint,
                        first_table_reference: left,
                        second_table_reference: second,
                        search_condition,
                    }
                    .into()
                }
            };
        }
        Ok(left)
    }

    /// Consume a join introducer if one is at the cursor
    fn parse_join_keyword(&mut self) -> PResult<Option<JoinKeyword>> {
        let keyword = match self.current.kind {
            TokenKind::Cross if self.peek_is(TokenKind::Join) => {
                JoinKeyword::Unqualified(UnqualifiedJoinType::CrossJoin)
            }
            TokenKind::Cross if self.peek_is_word("APPLY") => {
                JoinKeyword::Unqualified(UnqualifiedJoinType::CrossApply)
            }
            TokenKind::Outer if self.peek_is_word("APPLY") => {
                JoinKeyword::Unqualified(UnqualifiedJoinType::OuterApply)
            }
            TokenKind::Join => {
                self.advance();
                return Ok(Some(JoinKeyword::Qualified(
                    QualifiedJoinType::Inner,
                    JoinHint::None,
                )));
            }
            TokenKind::Inner | TokenKind::Left | TokenKind::Right | TokenKind::Full => {
                let join_type = match self.current.kind {
                    TokenKind::Inner => QualifiedJoinType::Inner,
                    TokenKind::Left => QualifiedJoinType::LeftOuter,
                    TokenKind::Right => QualifiedJoinType::RightOuter,
                    _ => QualifiedJoinType::FullOuter,
                };
                let starts_join = self.peek_is(TokenKind::Join)
                    || (join_type != QualifiedJoinType::Inner && self.peek_is(TokenKind::Outer))
                    || JoinHint::from_word(self.peek.literal).is_some();
                if !starts_join {
                    return Ok(None);
                }
                self.advance();
                if join_type != QualifiedJoinType::Inner {
                    self.eat(TokenKind::Outer);
                }
                let hint = if self.current.kind.is_word() && !self.at(TokenKind::Join) {
                    let word = self.advance();
                    JoinHint::from_word(word.literal).ok_or_else(|| {
                        ParseError::new(format!("Unknown join hint '{}'", word.literal), word.offset)
                    })?
                } else {
                    JoinHint::None
                };
                self.expect(TokenKind::Join, "JOIN")?;
                return Ok(Some(JoinKeyword::Qualified(join_type, hint)));
            }
            _ => return Ok(None),
        };
        self.advance();
        self.advance();
        Ok(Some(keyword))
    }

    /// A single table source followed by any PIVOT / UNPIVOT
    fn parse_table_source(&mut self) -> PResult<TableReference> {
        let mut source = self.parse_table_primary()?;
        loop {
            if self.at(TokenKind::Pivot) {
                source = self.parse_pivot(source)?;
            } else if self.at(TokenKind::Unpivot) {
                source = self.parse_unpivot(source)?;
            } else {
                return Ok(source);
            }
        }
    }

    fn parse_table_primary(&mut self) -> PResult<TableReference> {
        match self.current.kind {
            TokenKind::LParen => self.parse_parenthesized_table_source(),
            TokenKind::Openrowset => self.parse_openrowset(),
            TokenKind::Openquery => {
                let name = SchemaObjectName::single(Identifier::new(self.advance().literal));
                self.parse_function_table_reference(name)
            }
            TokenKind::Ident if self.at_variable() => self.parse_variable_table_reference(),
            TokenKind::Ident if self.at_word("PREDICT") && self.peek_is(TokenKind::LParen) => {
                self.parse_predict()
            }
            _ => {
                let name = self.parse_schema_object_name()?;
                if self.at(TokenKind::LParen) && !self.at_legacy_hint_list() {
                    return self.parse_function_table_reference(name);
                }
                self.parse_named_table_tail(name)
            }
        }
    }

    /// `(SELECT ...)`, `(VALUES ...)` or a parenthesized join
    fn parse_parenthesized_table_source(&mut self) -> PResult<TableReference> {
        self.nested(|p| {
            if p.at_subquery_start() {
                let query = p.attempt(|p| {
                    p.expect(TokenKind::LParen, "'('")?;
                    let query = p.parse_query_expression()?;
                    p.expect(TokenKind::RParen, "')'")?;
                    Ok(query)
                });
                if let Some(query_expression) = query {
                    let alias = p.parse_table_alias()?;
                    let columns = p.parse_optional_column_aliases()?;
                    return Ok(QueryDerivedTable {
                        query_expression,
                        alias,
                        columns,
                    }
                    .into());
                }
            }

            p.expect(TokenKind::LParen, "'('")?;
            if p.eat(TokenKind::Values) {
                let row_values = p.parse_row_values()?;
                p.expect(TokenKind::RParen, "')'")?;
                let alias = p.parse_table_alias()?;
                let columns = p.parse_optional_column_aliases()?;
                return Ok(InlineDerivedTable {
                    row_values,
                    alias,
                    columns,
                }
                .into());
            }
            let join = p.parse_table_reference()?;
            p.expect(TokenKind::RParen, "')'")?;
            Ok(JoinParenthesisTableReference { join }.into())
        })
    }

    /// `(a, b), (c, d)` after VALUES
    pub(crate) fn parse_row_values(&mut self) -> PResult<Vec<RowValue>> {
        let mut rows = Vec::new();
        loop {
            rows.push(RowValue {
                column_values: self.parse_parenthesized_expressions()?,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(rows)
    }

    fn parse_function_table_reference(&mut self, name: SchemaObjectName) -> PResult<TableReference> {
        let parameters = self.parse_parenthesized_expressions()?;
        let alias = self.parse_table_alias()?;
        let columns = self.parse_optional_column_aliases()?;
        Ok(SchemaObjectFunctionTableReference {
            schema_object: name,
            parameters,
            alias,
            columns,
        }
        .into())
    }

    /// `@t [AS] alias` or `@x.method(...) [AS] alias [(cols)]`
    fn parse_variable_table_reference(&mut self) -> PResult<TableReference> {
        let variable = self.parse_variable()?;
        if self.at(TokenKind::Dot) && self.peek.kind.is_word() {
            self.advance();
            let method_name = self.parse_word()?;
            let parameters = self.parse_parenthesized_expressions()?;
            let alias = self.parse_table_alias()?;
            let columns = self.parse_optional_column_aliases()?;
            return Ok(VariableMethodCallTableReference {
                variable,
                method_name,
                parameters,
                alias,
                columns,
            }
            .into());
        }
        let alias = self.parse_table_alias()?;
        Ok(VariableTableReference { variable, alias }.into())
    }

    /// Temporal clause, alias and hints after a table name
    pub(crate) fn parse_named_table_tail(
        &mut self,
        name: SchemaObjectName,
    ) -> PResult<TableReference> {
        let mut table = NamedTableReference::new(name);
        if self.at(TokenKind::For) && self.peek_is_word("SYSTEM_TIME") {
            table.temporal_clause = Some(self.parse_temporal_clause()?);
        }
        if self.at_legacy_hint_list() {
            table.table_hints = self.parse_table_hint_list()?;
        }
        table.alias = self.parse_table_alias()?;
        if self.at(TokenKind::With) && self.peek_is(TokenKind::LParen) {
            self.advance();
            table.table_hints.extend(self.parse_table_hint_list()?);
        } else if self.at_legacy_hint_list() {
            table.table_hints.extend(self.parse_table_hint_list()?);
        }
        Ok(table.into())
    }

    /// `(NOLOCK)` written without WITH
    fn at_legacy_hint_list(&self) -> bool {
        self.at(TokenKind::LParen)
            && self.peek.kind.is_word()
            && !self.peek.is_delimited()
            && TableHintKind::from_word(self.peek.literal).is_some()
    }

    fn parse_temporal_clause(&mut self) -> PResult<TemporalClause> {
        self.expect(TokenKind::For, "FOR")?;
        self.expect_word("SYSTEM_TIME")?;
        let (temporal_clause_type, start_time, end_time) = if self.eat_words(&["AS", "OF"]) {
            (
                TemporalClauseType::TimeAsOf,
                Some(self.parse_scalar_expression()?),
                None,
            )
        } else if self.eat(TokenKind::From) {
            let start = self.parse_scalar_expression()?;
            self.expect(TokenKind::To, "TO")?;
            (
                TemporalClauseType::FromTo,
                Some(start),
                Some(self.parse_scalar_expression()?),
            )
        } else if self.eat(TokenKind::Between) {
            let start = self.parse_scalar_expression()?;
            self.expect(TokenKind::And, "AND")?;
            (
                TemporalClauseType::Between,
                Some(start),
                Some(self.parse_scalar_expression()?),
            )
        } else if self.eat_word("CONTAINED") {
            self.expect(TokenKind::In, "IN")?;
            self.expect(TokenKind::LParen, "'('")?;
            let start = self.parse_scalar_expression()?;
            self.expect(TokenKind::Comma, "','")?;
            let end = self.parse_scalar_expression()?;
            self.expect(TokenKind::RParen, "')'")?;
            (TemporalClauseType::ContainedIn, Some(start), Some(end))
        } else if self.eat(TokenKind::All) {
            (TemporalClauseType::All, None, None)
        } else {
            return Err(self.unexpected("AS OF, FROM, BETWEEN, CONTAINED IN or ALL"));
        };
        Ok(TemporalClause {
            temporal_clause_type,
            start_time,
            end_time,
        })
    }

    /// `(hint [,] hint ...)`; the cursor is on `(`
    pub(crate) fn parse_table_hint_list(&mut self) -> PResult<Vec<TableHint>> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut hints = Vec::new();
        while !self.at(TokenKind::RParen) {
            hints.push(self.parse_table_hint()?);
            self.eat(TokenKind::Comma);
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(hints)
    }

    fn parse_table_hint(&mut self) -> PResult<TableHint> {
        let word = self.current;
        let hint_kind = match TableHintKind::from_word(word.literal) {
            Some(kind) if word.kind.is_word() && !word.is_delimited() => kind,
            _ => return Err(self.unexpected("table hint")),
        };
        self.advance();
        match hint_kind {
            TableHintKind::Index => {
                let index_values = if self.eat(TokenKind::Eq) {
                    vec![self.parse_identifier_or_value()?]
                } else {
                    self.expect(TokenKind::LParen, "'('")?;
                    let mut values = vec![self.parse_identifier_or_value()?];
                    while self.eat(TokenKind::Comma) {
                        values.push(self.parse_identifier_or_value()?);
                    }
                    self.expect(TokenKind::RParen, "')'")?;
                    values
                };
                Ok(IndexTableHint {
                    hint_kind,
                    index_values,
                }
                .into())
            }
            TableHintKind::ForceSeek if self.at(TokenKind::LParen) => {
                self.advance();
                let index_value = Some(self.parse_identifier_or_value()?);
                let column_values = if self.at(TokenKind::LParen) {
                    self.parse_parenthesized_columns()?
                } else {
                    Vec::new()
                };
                self.expect(TokenKind::RParen, "')'")?;
                Ok(ForceSeekTableHint {
                    hint_kind,
                    index_value,
                    column_values,
                }
                .into())
            }
            TableHintKind::SpatialWindowMaxCells => {
                self.expect(TokenKind::Eq, "'='")?;
                let value = self.parse_unary_expression()?;
                Ok(LiteralTableHint { hint_kind, value }.into())
            }
            _ => Ok(PlainTableHint { hint_kind }.into()),
        }
    }

    // ========== Rowset functions ==========

    fn parse_openrowset(&mut self) -> PResult<TableReference> {
        self.expect(TokenKind::Openrowset, "OPENROWSET")?;
        self.expect(TokenKind::LParen, "'('")?;
        if self.eat(TokenKind::Bulk) {
            return self.parse_bulk_openrowset();
        }

        let mut arguments = Vec::new();
        let mut object = None;
        loop {
            if self.at_identifier() && !self.at_variable() {
                object = Some(self.parse_schema_object_name()?);
            } else {
                arguments.push(self.parse_scalar_expression()?);
            }
            if !(self.eat(TokenKind::Comma) || self.eat(TokenKind::Semicolon)) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        let with_columns = self.parse_optional_schema_declaration()?;
        let alias = self.parse_table_alias()?;
        let columns = self.parse_optional_column_aliases()?;
        Ok(OpenRowsetTableReference {
            arguments,
            object,
            with_columns,
            alias,
            columns,
        }
        .into())
    }

    fn parse_bulk_openrowset(&mut self) -> PResult<TableReference> {
        let mut data_files = vec![self.parse_string_literal()?];
        let mut options = Vec::new();
        while self.eat(TokenKind::Comma) {
            if self.at_string() {
                data_files.push(self.parse_string_literal()?);
                continue;
            }
            options.push(self.parse_bulk_insert_option()?);
        }
        self.expect(TokenKind::RParen, "')'")?;
        let with_columns = self.parse_optional_schema_declaration()?;
        let alias = self.parse_table_alias()?;
        let columns = self.parse_optional_column_aliases()?;
        Ok(BulkOpenRowset {
            data_files,
            options,
            with_columns,
            alias,
            columns,
        }
        .into())
    }

    /// `SINGLE_BLOB` or `FIRSTROW = 2`
    pub(crate) fn parse_bulk_insert_option(&mut self) -> PResult<BulkInsertOption> {
        let name = self.parse_word()?;
        let option_kind = super::option_kind_name(&name.value);
        if self.eat(TokenKind::Eq) {
            let value = self.parse_unary_expression()?;
            return Ok(LiteralBulkInsertOption { option_kind, value }.into());
        }
        Ok(SimpleBulkInsertOption { option_kind }.into())
    }

    /// `WITH (name type [COLLATE c] ['path' | ordinal], ...)`
    fn parse_optional_schema_declaration(&mut self) -> PResult<Vec<SchemaDeclarationItem>> {
        if !(self.at(TokenKind::With) && self.peek_is(TokenKind::LParen)) {
            return Ok(Vec::new());
        }
        self.advance();
        self.advance();
        let mut items = Vec::new();
        loop {
            let column_identifier = self.parse_identifier()?;
            let data_type = Some(self.parse_data_type()?);
            let collation = if self.eat(TokenKind::Collate) {
                Some(self.parse_word()?)
            } else {
                None
            };
            let mapping = match self.current.kind {
                TokenKind::String | TokenKind::NationalString | TokenKind::Number => {
                    Some(self.parse_primary_expression()?)
                }
                _ => None,
            };
            items.push(SchemaDeclarationItem {
                column_definition: ColumnDefinitionBase {
                    column_identifier,
                    data_type,
                    collation,
                },
                mapping,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(items)
    }

    /// `PREDICT(MODEL = ..., DATA = ..., RUNTIME = ...) WITH (...) AS alias`
    fn parse_predict(&mut self) -> PResult<TableReference> {
        self.expect_word("PREDICT")?;
        self.expect(TokenKind::LParen, "'('")?;
        let mut model_variable = None;
        let mut model_subquery = None;
        let mut data_source = None;
        let mut run_time = None;
        loop {
            let argument = self.parse_word()?;
            self.expect(TokenKind::Eq, "'='")?;
            if argument.is_word("MODEL") {
                if self.at_subquery_start() {
                    self.advance();
                    model_subquery = Some(self.parse_query_expression()?);
                    self.expect(TokenKind::RParen, "')'")?;
                } else {
                    model_variable = Some(self.parse_scalar_expression()?);
                }
            } else if argument.is_word("DATA") {
                data_source = Some(self.parse_table_source()?);
            } else if argument.is_word("RUNTIME") {
                run_time = Some(self.parse_identifier()?);
            } else {
                return Err(ParseError::new(
                    format!("Unknown PREDICT argument '{}'", argument.value),
                    self.current.offset,
                ));
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        let schema_declaration_items = self.parse_optional_schema_declaration()?;
        let alias = self.parse_table_alias()?;
        Ok(PredictTableReference {
            model_variable,
            model_subquery,
            data_source,
            run_time,
            schema_declaration_items,
            alias,
        }
        .into())
    }

    // ========== PIVOT / UNPIVOT ==========

    fn parse_pivot(&mut self, table_reference: TableReference) -> PResult<TableReference> {
        self.expect(TokenKind::Pivot, "PIVOT")?;
        self.expect(TokenKind::LParen, "'('")?;
        let aggregate_function_identifier = self.parse_multi_part_identifier()?;
        let value_columns = self.parse_parenthesized_expressions()?;
        self.expect(TokenKind::For, "FOR")?;
        let pivot_column = ColumnReferenceExpression::regular(self.parse_multi_part_identifier()?);
        self.expect(TokenKind::In, "IN")?;
        let in_columns = self.parse_parenthesized_identifiers()?;
        self.expect(TokenKind::RParen, "')'")?;
        let alias = self.parse_table_alias()?;
        Ok(PivotedTableReference {
            table_reference,
            aggregate_function_identifier,
            value_columns,
            pivot_column,
            in_columns,
            alias,
        }
        .into())
    }

    fn parse_unpivot(&mut self, table_reference: TableReference) -> PResult<TableReference> {
        self.expect(TokenKind::Unpivot, "UNPIVOT")?;
        self.expect(TokenKind::LParen, "'('")?;
        let value_column = self.parse_identifier()?;
        self.expect(TokenKind::For, "FOR")?;
        let pivot_column = self.parse_identifier()?;
        self.expect(TokenKind::In, "IN")?;
        let in_columns = self.parse_parenthesized_columns()?;
        self.expect(TokenKind::RParen, "')'")?;
        let alias = self.parse_table_alias()?;
        Ok(UnpivotedTableReference {
            table_reference,
            value_column,
            pivot_column,
            in_columns,
            alias,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tsql_core::ParserOptions;

    fn table(source: &str) -> Value {
        let mut parser = Parser::new(source, ParserOptions::default());
        let table = parser.parse_table_reference().unwrap();
        assert_eq!(parser.current.kind, TokenKind::Eof, "unparsed tail in {source}");
        serde_json::to_value(table).unwrap()
    }

    #[test]
    fn test_named_table_with_alias_and_hints() {
        let value = table("dbo.t AS a WITH (NOLOCK, INDEX(ix_a), FORCESEEK)");
        assert_eq!(value["$type"], "NamedTableReference");
        assert_eq!(value["Alias"]["Value"], "a");
        let hints = value["TableHints"].as_array().unwrap();
        assert_eq!(hints[0]["HintKind"], "NoLock");
        assert_eq!(hints[1]["$type"], "IndexTableHint");
        assert_eq!(hints[1]["IndexValues"][0]["Value"], "ix_a");
        assert_eq!(hints[2]["$type"], "TableHint");
    }

    #[test]
    fn test_legacy_hint_list() {
        let value = table("t (NOLOCK)");
        assert_eq!(value["TableHints"][0]["HintKind"], "NoLock");
        assert_eq!(value["Alias"], Value::Null);
    }

    #[test]
    fn test_joins_fold_left() {
        let value = table("a INNER JOIN b ON a.id = b.id LEFT OUTER JOIN c ON c.id = b.id CROSS APPLY fn(a.x) f");
        assert_eq!(value["$type"], "UnqualifiedJoin");
        assert_eq!(value["UnqualifiedJoinType"], "CrossApply");
        assert_eq!(value["SecondTableReference"]["$type"], "SchemaObjectFunctionTableReference");
        let left = &value["FirstTableReference"];
        assert_eq!(left["QualifiedJoinType"], "LeftOuter");
        assert_eq!(left["FirstTableReference"]["QualifiedJoinType"], "Inner");
    }

    #[test]
    fn test_join_hint() {
        let value = table("a INNER HASH JOIN b ON a.id = b.id");
        assert_eq!(value["JoinHint"], "Hash");
        let value = table("a FULL JOIN b ON 1 = 1");
        assert_eq!(value["QualifiedJoinType"], "FullOuter");
        assert_eq!(value["JoinHint"], "None");
    }

    #[test]
    fn test_nested_join_without_on() {
        let value = table("a JOIN b JOIN c ON c.id = b.id ON b.id = a.id");
        assert_eq!(value["SecondTableReference"]["$type"], "QualifiedJoin");
    }

    #[test]
    fn test_derived_tables() {
        let value = table("(SELECT 1 AS x) AS d (c)");
        assert_eq!(value["$type"], "QueryDerivedTable");
        assert_eq!(value["Columns"][0]["Value"], "c");

        let value = table("(VALUES (1, 2), (3, 4)) AS v (a, b)");
        assert_eq!(value["$type"], "InlineDerivedTable");
        assert_eq!(value["RowValues"].as_array().unwrap().len(), 2);

        let value = table("(a JOIN b ON a.id = b.id)");
        assert_eq!(value["$type"], "JoinParenthesisTableReference");
    }

    #[test]
    fn test_variable_sources() {
        assert_eq!(table("@t AS x")["$type"], "VariableTableReference");
        let value = table("@doc.nodes('/r') AS n(c)");
        assert_eq!(value["$type"], "VariableMethodCallTableReference");
        assert_eq!(value["MethodName"]["Value"], "nodes");
    }

    #[test]
    fn test_temporal_clause() {
        let value = table("t FOR SYSTEM_TIME BETWEEN @a AND @b AS h");
        assert_eq!(value["TemporalClause"]["TemporalClauseType"], "Between");
        assert_eq!(value["Alias"]["Value"], "h");
        let value = table("t FOR SYSTEM_TIME ALL");
        assert_eq!(value["TemporalClause"]["StartTime"], Value::Null);
    }

    #[test]
    fn test_pivot_and_unpivot() {
        let value = table("s PIVOT (SUM(amount) FOR yr IN ([2019], [2020])) AS p");
        assert_eq!(value["$type"], "PivotedTableReference");
        assert_eq!(value["InColumns"][1]["Value"], "2020");
        let value = table("s UNPIVOT (amount FOR yr IN (y2019, y2020)) AS u");
        assert_eq!(value["$type"], "UnpivotedTableReference");
    }

    #[test]
    fn test_openrowset_forms() {
        let value = table("OPENROWSET(BULK 'c:\\data.bin', SINGLE_BLOB) AS b");
        assert_eq!(value["$type"], "BulkOpenRowset");
        assert_eq!(value["Options"][0]["OptionKind"], "SingleBlob");

        let value = table("OPENROWSET('SQLNCLI', 'Server=.;', 'SELECT 1') AS r");
        assert_eq!(value["Arguments"].as_array().unwrap().len(), 3);
        assert_eq!(value["Object"], Value::Null);
    }

    #[test]
    fn test_predict() {
        let value = table("PREDICT(MODEL = @m, DATA = dbo.t AS d, RUNTIME = ONNX) WITH (score FLOAT) AS p");
        assert_eq!(value["$type"], "PredictTableReference");
        assert_eq!(value["DataSource"]["Alias"]["Value"], "d");
        assert_eq!(value["RunTime"]["Value"], "ONNX");
        assert_eq!(
            value["SchemaDeclarationItems"][0]["ColumnDefinition"]["ColumnIdentifier"]["Value"],
            "score"
        );
    }

    #[test]
    fn test_unknown_hint_is_error() {
        let mut parser = Parser::new("t WITH (FASTEST)", ParserOptions::default());
        assert!(parser.parse_table_reference().is_err());
    }
}
