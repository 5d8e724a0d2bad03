//! SELECT, INSERT, UPDATE, DELETE and TRUNCATE statements

use super::{PResult, Parser};
use crate::lexer::TokenKind;
use tsql_ast::Statement;
use tsql_ast::dml::{
    AssignmentSetClause, DeleteStatement, ExecuteInsertSource, FunctionCallSetClause,
    InsertOption, InsertSource, InsertStatement, OutputClause, OutputIntoClause,
    SelectInsertSource, SelectStatement, SetClause, TruncateTableStatement, UpdateStatement,
    ValuesInsertSource,
};
use tsql_ast::expr::ScalarExpression;
use tsql_ast::query::{FromClause, TopRowFilter, WithCtesAndXmlNamespaces};
use tsql_ast::table::{TableReference, VariableTableReference};

/// OUTPUT clauses of one DML statement
#[derive(Default)]
struct OutputClauses {
    output: Option<OutputClause>,
    output_into: Option<OutputIntoClause>,
}

impl<'a> Parser<'a> {
    /// `WITH cte AS (...)` followed by the statement it prefixes
    pub(crate) fn parse_with_statement(&mut self) -> PResult<Statement> {
        let ctes = self.parse_with_ctes_and_xml_namespaces()?;
        match self.current.kind {
            TokenKind::Select | TokenKind::LParen => self.parse_select_statement(Some(ctes)),
            TokenKind::Insert => self.parse_insert_statement(Some(ctes)),
            TokenKind::Update => self.parse_update_statement(Some(ctes)),
            TokenKind::Delete => self.parse_delete_statement(Some(ctes)),
            _ => Err(self.unexpected("SELECT, INSERT, UPDATE or DELETE after WITH")),
        }
    }

    pub(crate) fn parse_select_statement(
        &mut self,
        with_ctes_and_xml_namespaces: Option<WithCtesAndXmlNamespaces>,
    ) -> PResult<Statement> {
        Ok(self.parse_select_node(with_ctes_and_xml_namespaces)?.into())
    }

    /// A SELECT statement as its own node, for the places that embed one
    /// (views, inline functions)
    pub(crate) fn parse_select_node(
        &mut self,
        with_ctes_and_xml_namespaces: Option<WithCtesAndXmlNamespaces>,
    ) -> PResult<SelectStatement> {
        let outer_into = self.select_into.take();
        let query_expression = self.parse_query_expression();
        let into = std::mem::replace(&mut self.select_into, outer_into);
        let query_expression = query_expression?;
        let (into, on) = match into {
            Some((into, on)) => (Some(into), on),
            None => (None, None),
        };
        let optimizer_hints = self.parse_optimizer_hints()?;
        Ok(SelectStatement {
            query_expression,
            into,
            on,
            with_ctes_and_xml_namespaces,
            optimizer_hints,
        })
    }

    pub(crate) fn parse_insert_statement(
        &mut self,
        with_ctes_and_xml_namespaces: Option<WithCtesAndXmlNamespaces>,
    ) -> PResult<Statement> {
        self.expect(TokenKind::Insert, "INSERT")?;
        let top_row_filter = self.parse_optional_dml_top()?;
        let insert_option = if self.eat(TokenKind::Into) {
            InsertOption::Into
        } else {
            InsertOption::None
        };
        let target = self.parse_dml_target()?;
        let columns = if self.at(TokenKind::LParen) && !self.at_subquery_start() {
            self.parse_parenthesized_columns()?
        } else {
            Vec::new()
        };
        let outputs = self.parse_output_clauses()?;
        let insert_source = self.parse_insert_source()?;
        let optimizer_hints = self.parse_optimizer_hints()?;
        Ok(InsertStatement {
            with_ctes_and_xml_namespaces,
            top_row_filter,
            insert_option,
            target,
            columns,
            output_clause: outputs.output,
            output_into_clause: outputs.output_into,
            insert_source,
            optimizer_hints,
        }
        .into())
    }

    fn parse_insert_source(&mut self) -> PResult<InsertSource> {
        match self.current.kind {
            TokenKind::Values => {
                self.advance();
                Ok(ValuesInsertSource {
                    is_default_values: false,
                    row_values: self.parse_row_values()?,
                }
                .into())
            }
            TokenKind::Default => {
                self.advance();
                self.expect(TokenKind::Values, "VALUES")?;
                Ok(ValuesInsertSource {
                    is_default_values: true,
                    row_values: Vec::new(),
                }
                .into())
            }
            TokenKind::Exec | TokenKind::Execute => Ok(ExecuteInsertSource {
                execute: self.parse_execute_specification()?,
            }
            .into()),
            TokenKind::Select | TokenKind::LParen => Ok(SelectInsertSource {
                select: self.parse_query_expression()?,
            }
            .into()),
            _ => Err(self.unexpected("VALUES, SELECT, EXECUTE or DEFAULT VALUES")),
        }
    }

    pub(crate) fn parse_update_statement(
        &mut self,
        with_ctes_and_xml_namespaces: Option<WithCtesAndXmlNamespaces>,
    ) -> PResult<Statement> {
        self.expect(TokenKind::Update, "UPDATE")?;
        let top_row_filter = self.parse_optional_dml_top()?;
        let target = self.parse_dml_target()?;
        self.expect(TokenKind::Set, "SET")?;
        let mut set_clauses = vec![self.parse_set_clause()?];
        while self.eat(TokenKind::Comma) {
            set_clauses.push(self.parse_set_clause()?);
        }
        let outputs = self.parse_output_clauses()?;
        let from_clause = self.parse_optional_from_clause()?;
        let where_clause = if self.at(TokenKind::Where) {
            Some(self.parse_where_clause()?)
        } else {
            None
        };
        let optimizer_hints = self.parse_optimizer_hints()?;
        Ok(UpdateStatement {
            with_ctes_and_xml_namespaces,
            top_row_filter,
            target,
            set_clauses,
            output_clause: outputs.output,
            output_into_clause: outputs.output_into,
            from_clause,
            where_clause,
            optimizer_hints,
        }
        .into())
    }

    /// `@v = expr`, `@v = col = expr`, `col += expr` or `col.WRITE(...)`
    fn parse_set_clause(&mut self) -> PResult<SetClause> {
        if self.at_variable() {
            let variable = self.parse_variable()?;
            let assignment_kind = self.parse_assignment_operator()?;
            let value = self.parse_scalar_expression()?;
            if self.at(TokenKind::Eq) {
                if let Some(column) = value.as_column_reference() {
                    let column = column.clone();
                    self.advance();
                    return Ok(AssignmentSetClause {
                        variable: Some(variable),
                        column: Some(column),
                        new_value: Some(self.parse_scalar_expression()?),
                        assignment_kind,
                    }
                    .into());
                }
            }
            return Ok(AssignmentSetClause {
                variable: Some(variable),
                column: None,
                new_value: Some(value),
                assignment_kind,
            }
            .into());
        }

        let target = match self.parse_scalar_expression()? {
            ScalarExpression::FunctionCall(call) => {
                return Ok(FunctionCallSetClause {
                    mutator_function: *call,
                }
                .into());
            }
            other => other,
        };
        let column = match target.as_column_reference() {
            Some(column) => column.clone(),
            None => return Err(self.error_here("Expected a column on the left of SET assignment")),
        };
        let assignment_kind = self.parse_assignment_operator()?;
        let new_value = self.parse_scalar_expression()?;
        Ok(AssignmentSetClause {
            variable: None,
            column: Some(column),
            new_value: Some(new_value),
            assignment_kind,
        }
        .into())
    }

    pub(crate) fn parse_delete_statement(
        &mut self,
        with_ctes_and_xml_namespaces: Option<WithCtesAndXmlNamespaces>,
    ) -> PResult<Statement> {
        self.expect(TokenKind::Delete, "DELETE")?;
        let top_row_filter = self.parse_optional_dml_top()?;
        self.eat(TokenKind::From);
        let target = self.parse_dml_target()?;
        let outputs = self.parse_output_clauses()?;
        let from_clause = self.parse_optional_from_clause()?;
        let where_clause = if self.at(TokenKind::Where) {
            Some(self.parse_where_clause()?)
        } else {
            None
        };
        let optimizer_hints = self.parse_optimizer_hints()?;
        Ok(DeleteStatement {
            with_ctes_and_xml_namespaces,
            top_row_filter,
            target,
            output_clause: outputs.output,
            output_into_clause: outputs.output_into,
            from_clause,
            where_clause,
            optimizer_hints,
        }
        .into())
    }

    /// `TRUNCATE TABLE name [WITH (PARTITIONS (1, 3 TO 5))]`
    pub(crate) fn parse_truncate_table_statement(&mut self) -> PResult<Statement> {
        self.expect(TokenKind::Truncate, "TRUNCATE")?;
        self.expect(TokenKind::Table, "TABLE")?;
        let table_name = self.parse_schema_object_name()?;
        let mut partition_ranges = Vec::new();
        if self.at(TokenKind::With) && self.peek_is(TokenKind::LParen) {
            self.advance();
            self.advance();
            self.expect_word("PARTITIONS")?;
            partition_ranges = self.parse_partition_ranges()?;
            self.expect(TokenKind::RParen, "')'")?;
        }
        Ok(TruncateTableStatement {
            table_name,
            partition_ranges,
        }
        .into())
    }

    // ========== Shared pieces ==========

    /// `TOP (n) [PERCENT]` on INSERT / UPDATE / DELETE
    fn parse_optional_dml_top(&mut self) -> PResult<Option<TopRowFilter>> {
        if self.at(TokenKind::Top) {
            self.parse_top_row_filter().map(Some)
        } else {
            Ok(None)
        }
    }

    /// The table an INSERT, UPDATE, DELETE or OUTPUT INTO writes to
    fn parse_dml_target(&mut self) -> PResult<TableReference> {
        if self.at_variable() {
            let variable = self.parse_variable()?;
            let alias = self.parse_table_alias()?;
            return Ok(VariableTableReference { variable, alias }.into());
        }
        if matches!(
            self.current.kind,
            TokenKind::Openquery | TokenKind::Openrowset
        ) {
            return self.parse_table_reference();
        }
        let name = self.parse_schema_object_name()?;
        self.parse_named_table_tail(name)
    }

    fn parse_optional_from_clause(&mut self) -> PResult<Option<FromClause>> {
        if self.eat(TokenKind::From) {
            Ok(Some(FromClause {
                table_references: self.parse_table_reference_list()?,
            }))
        } else {
            Ok(None)
        }
    }

    /// `OUTPUT ... INTO target [(cols)]` and/or a plain `OUTPUT ...`
    fn parse_output_clauses(&mut self) -> PResult<OutputClauses> {
        let mut clauses = OutputClauses::default();
        while self.at_word("OUTPUT") {
            self.advance();
            let select_columns = self.parse_select_elements()?;
            if self.eat(TokenKind::Into) {
                let into_table = self.parse_dml_target()?;
                let into_table_columns = if self.at(TokenKind::LParen) {
                    self.parse_parenthesized_columns()?
                } else {
                    Vec::new()
                };
                clauses.output_into = Some(OutputIntoClause {
                    select_columns,
                    into_table,
                    into_table_columns,
                });
            } else {
                clauses.output = Some(OutputClause { select_columns });
            }
        }
        Ok(clauses)
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
    fn test_select_into_and_option() {
        let value = statement("SELECT a INTO #tmp FROM t OPTION (MAXDOP 1, RECOMPILE)");
        assert_eq!(value["$type"], "SelectStatement");
        assert_eq!(value["Into"]["BaseIdentifier"]["Value"], "#tmp");
        assert_eq!(value["OptimizerHints"].as_array().unwrap().len(), 2);
        assert_eq!(value["OptimizerHints"][0]["HintKind"], "MaxDop");
    }

    #[test]
    fn test_cte_prefixes() {
        let value = statement("WITH c (x) AS (SELECT 1) SELECT x FROM c");
        assert_eq!(
            value["WithCtesAndXmlNamespaces"]["CommonTableExpressions"][0]["ExpressionName"]["Value"],
            "c"
        );
        let value = statement("WITH c AS (SELECT id FROM t) DELETE FROM c WHERE id = 1");
        assert_eq!(value["$type"], "DeleteStatement");
        assert!(parse("WITH c AS (SELECT 1) PRINT 1").is_err());
    }

    #[test]
    fn test_insert_sources() {
        let value = statement("INSERT INTO dbo.t (a, b) VALUES (1, 2), (3, 4)");
        assert_eq!(value["InsertOption"], "Into");
        assert_eq!(value["Columns"].as_array().unwrap().len(), 2);
        assert_eq!(value["InsertSource"]["RowValues"].as_array().unwrap().len(), 2);

        let value = statement("INSERT t DEFAULT VALUES");
        assert_eq!(value["InsertOption"], "None");
        assert_eq!(value["InsertSource"]["IsDefaultValues"], true);

        let value = statement("INSERT INTO t WITH (TABLOCK) SELECT * FROM s");
        assert_eq!(value["Target"]["TableHints"][0]["HintKind"], "TabLock");
        assert_eq!(value["InsertSource"]["$type"], "SelectInsertSource");

        let value = statement("INSERT INTO @t EXEC dbo.p 1");
        assert_eq!(value["Target"]["$type"], "VariableTableReference");
        assert_eq!(value["InsertSource"]["$type"], "ExecuteInsertSource");
    }

    #[test]
    fn test_insert_output_into() {
        let value = statement(
            "INSERT INTO t (a) OUTPUT inserted.id, inserted.a INTO @ids (id, a) VALUES (1)",
        );
        let output = &value["OutputIntoClause"];
        assert_eq!(output["SelectColumns"].as_array().unwrap().len(), 2);
        assert_eq!(output["IntoTable"]["Variable"]["Name"], "@ids");
        assert_eq!(value["OutputClause"], Value::Null);
    }

    #[test]
    fn test_update_set_clauses() {
        let value = statement(
            "UPDATE TOP (10) t SET a = 1, b += 2, @v = c = 3, doc.WRITE(N'x', 0, 1) FROM t JOIN u ON t.id = u.id WHERE t.x > 0",
        );
        let clauses = &value["SetClauses"];
        assert_eq!(clauses[0]["AssignmentKind"], "Equals");
        assert_eq!(clauses[1]["AssignmentKind"], "AddEquals");
        assert_eq!(clauses[2]["Variable"]["Name"], "@v");
        assert_eq!(clauses[2]["Column"]["$type"], "ColumnReferenceExpression");
        assert_eq!(clauses[3]["$type"], "FunctionCallSetClause");
        assert_eq!(value["TopRowFilter"]["Expression"]["$type"], "ParenthesisExpression");
        assert_eq!(value["FromClause"]["TableReferences"][0]["$type"], "QualifiedJoin");
    }

    #[test]
    fn test_update_positioned() {
        let value = statement("UPDATE t SET a = 1 WHERE CURRENT OF c");
        assert_eq!(value["WhereClause"]["Cursor"]["Value"], "c");
    }

    #[test]
    fn test_delete_forms() {
        let value = statement("DELETE FROM t OUTPUT deleted.* WHERE id = 1");
        assert_eq!(value["OutputClause"]["SelectColumns"][0]["$type"], "SelectStarExpression");
        let value = statement("DELETE t FROM t INNER JOIN u ON t.id = u.id");
        assert_eq!(value["Target"]["SchemaObject"]["BaseIdentifier"]["Value"], "t");
        assert!(value["FromClause"].is_object());
    }

    #[test]
    fn test_truncate_partitions() {
        let value = statement("TRUNCATE TABLE dbo.t WITH (PARTITIONS (1, 4 TO 6))");
        assert_eq!(value["TableName"]["SchemaIdentifier"]["Value"], "dbo");
        assert_eq!(value["PartitionRanges"].as_array().unwrap().len(), 2);
    }
}
