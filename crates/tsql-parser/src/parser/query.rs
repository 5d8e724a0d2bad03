//! Query expressions: SELECT bodies, set operators and trailing clauses

use super::{PResult, Parser};
use crate::lexer::TokenKind;
use tsql_ast::expr::{ColumnType, UniqueRowFilter, VariableReference};
use tsql_ast::names::IdentifierOrValueExpression;
use tsql_ast::query::{
    AssignmentKind, BinaryQueryExpression, BinaryQueryExpressionType, BrowseForClause,
    CommonTableExpression, CompositeGroupingSpecification, CubeGroupingSpecification,
    ExpressionGroupingSpecification, ExpressionWithSortOrder, ForClause, FromClause,
    GeneralOptimizerHint, GrandTotalGroupingSpecification, GroupByClause, GroupByOption,
    GroupingSetsGroupingSpecification, GroupingSpecification, HavingClause, JsonForClause,
    JsonForClauseOption, JsonForClauseOptions, LiteralOptimizerHint, OffsetClause,
    OptimizeForOptimizerHint, OptimizerHint, OrderByClause, QueryParenthesisExpression,
    QuerySpecification, RollupGroupingSpecification, SelectElement, SelectScalarExpression,
    SelectSetVariable, SelectStarExpression, SortOrder, TopRowFilter, UseHintList,
    VariableValuePair, WhereClause, WithCtesAndXmlNamespaces, XmlForClause, XmlForClauseOption,
    XmlForClauseOptions, XmlNamespaces, XmlNamespacesElement,
};
use tsql_ast::{Identifier, QueryExpression};

/// Optimizer hints that carry a numeric or string argument
const LITERAL_HINTS: &[&str] = &[
    "MAXDOP",
    "FAST",
    "MAXRECURSION",
    "QUERYTRACEON",
    "MAX_GRANT_PERCENT",
    "MIN_GRANT_PERCENT",
    "LABEL",
];

impl<'a> Parser<'a> {
    /// A full query expression with set operators and trailing clauses
    pub(crate) fn parse_query_expression(&mut self) -> PResult<QueryExpression> {
        self.nested(|p| {
            let mut query = p.parse_query_primary()?;
            loop {
                let binary_query_expression_type = match p.current.kind {
                    TokenKind::Union => BinaryQueryExpressionType::Union,
                    TokenKind::Except => BinaryQueryExpressionType::Except,
                    TokenKind::Intersect => BinaryQueryExpressionType::Intersect,
                    _ => break,
                };
                p.advance();
                let all = p.eat(TokenKind::All);
                let second = p.parse_query_primary()?;
                query = BinaryQueryExpression {
                    binary_query_expression_type,
                    all,
                    first_query_expression: query,
                    second_query_expression: second,
                    order_by_clause: None,
                    offset_clause: None,
                    for_clause: None,
                }
                .into();
            }

            let order_by = if p.at(TokenKind::Order) {
                Some(p.parse_order_by_clause()?)
            } else {
                None
            };
            let offset = if p.at_word("OFFSET") {
                Some(p.parse_offset_clause()?)
            } else {
                None
            };
            let for_clause = if p.at(TokenKind::For)
                && (p.peek_is(TokenKind::Browse)
                    || p.peek_is_word("XML")
                    || p.peek_is_word("JSON"))
            {
                Some(p.parse_for_clause()?)
            } else {
                None
            };
            query.set_trailing_clauses(order_by, offset, for_clause);
            Ok(query)
        })
    }

    fn parse_query_primary(&mut self) -> PResult<QueryExpression> {
        if self.eat(TokenKind::LParen) {
            let query_expression = self.parse_query_expression()?;
            self.expect(TokenKind::RParen, "')'")?;
            return Ok(QueryParenthesisExpression {
                query_expression,
                order_by_clause: None,
                offset_clause: None,
                for_clause: None,
            }
            .into());
        }
        self.parse_query_specification()
    }

    fn parse_query_specification(&mut self) -> PResult<QueryExpression> {
        self.expect(TokenKind::Select, "SELECT")?;
        let mut spec = QuerySpecification::default();

        if self.eat(TokenKind::All) {
            spec.unique_row_filter = UniqueRowFilter::All;
        } else if self.eat(TokenKind::Distinct) {
            spec.unique_row_filter = UniqueRowFilter::Distinct;
        }
        if self.at(TokenKind::Top) {
            spec.top_row_filter = Some(self.parse_top_row_filter()?);
        }
        spec.select_elements = self.parse_select_elements()?;

        // SELECT ... INTO belongs to the enclosing statement
        if self.eat(TokenKind::Into) {
            let into = self.parse_schema_object_name()?;
            let on = if self.eat(TokenKind::On) {
                Some(self.parse_identifier()?)
            } else {
                None
            };
            if self.select_into.is_none() {
                self.select_into = Some((into, on));
            }
        }

        if self.eat(TokenKind::From) {
            spec.from_clause = Some(FromClause {
                table_references: self.parse_table_reference_list()?,
            });
        }
        if self.at(TokenKind::Where) {
            spec.where_clause = Some(self.parse_where_clause()?);
        }
        if self.at(TokenKind::Group) && self.peek_is(TokenKind::By) {
            spec.group_by_clause = Some(self.parse_group_by_clause()?);
        }
        if self.eat(TokenKind::Having) {
            spec.having_clause = Some(HavingClause {
                search_condition: self.parse_boolean_expression()?,
            });
        }
        Ok(spec.into())
    }

    /// `TOP n`, `TOP (expr) [PERCENT] [WITH TIES]`
    pub(crate) fn parse_top_row_filter(&mut self) -> PResult<TopRowFilter> {
        self.expect(TokenKind::Top, "TOP")?;
        let expression = if self.at(TokenKind::LParen) {
            self.parse_primary_expression()?
        } else {
            self.parse_unary_expression()?
        };
        let percent = self.eat(TokenKind::Percent);
        let with_ties = self.eat_words(&["WITH", "TIES"]);
        Ok(TopRowFilter {
            expression,
            percent,
            with_ties,
        })
    }

    pub(crate) fn parse_select_elements(&mut self) -> PResult<Vec<SelectElement>> {
        let mut elements = Vec::new();
        loop {
            elements.push(self.parse_select_element()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(elements)
    }

    fn parse_select_element(&mut self) -> PResult<SelectElement> {
        if self.at(TokenKind::Star) {
            self.advance();
            return Ok(SelectStarExpression { qualifier: None }.into());
        }

        // SELECT @v = expr
        if self.at_variable() && assignment_kind(self.peek.kind).is_some() {
            let variable = self.parse_variable()?;
            let assignment_kind = self.parse_assignment_operator()?;
            let expression = self.parse_scalar_expression()?;
            return Ok(SelectSetVariable {
                variable,
                expression,
                assignment_kind,
            }
            .into());
        }

        // SELECT alias = expr
        if self.peek_is(TokenKind::Eq) && (self.at_bare_alias() || self.at_string()) {
            let column_name = if self.at_string() {
                let literal = self.parse_string_literal()?;
                IdentifierOrValueExpression::from_value(literal.value.clone(), literal.into())
            } else {
                IdentifierOrValueExpression::from_identifier(self.parse_identifier()?)
            };
            self.advance();
            let expression = self.parse_scalar_expression()?;
            return Ok(SelectScalarExpression {
                expression,
                column_name: Some(column_name),
            }
            .into());
        }

        let expression = self.parse_scalar_expression()?;
        if self.at(TokenKind::Dot) && self.peek_is(TokenKind::Star) {
            let qualifier = expression
                .as_column_reference()
                .filter(|column| column.column_type == ColumnType::Regular)
                .and_then(|column| column.multi_part_identifier.clone());
            if let Some(qualifier) = qualifier {
                self.advance();
                self.advance();
                return Ok(SelectStarExpression {
                    qualifier: Some(qualifier),
                }
                .into());
            }
        }
        let column_name = self.parse_column_alias()?;
        Ok(SelectScalarExpression {
            expression,
            column_name,
        }
        .into())
    }

    /// `=`, `+=`, `-=`, ...
    pub(crate) fn parse_assignment_operator(&mut self) -> PResult<AssignmentKind> {
        match assignment_kind(self.current.kind) {
            Some(kind) => {
                self.advance();
                Ok(kind)
            }
            None => Err(self.unexpected("assignment operator")),
        }
    }

    /// `WHERE condition` or `WHERE CURRENT OF [GLOBAL] cursor`
    pub(crate) fn parse_where_clause(&mut self) -> PResult<WhereClause> {
        self.expect(TokenKind::Where, "WHERE")?;
        if self.at(TokenKind::Current) && self.peek_is(TokenKind::Of) {
            self.advance();
            self.advance();
            self.eat_word("GLOBAL");
            let cursor = if self.at_variable() {
                Identifier::new(self.advance().literal)
            } else {
                self.parse_identifier()?
            };
            return Ok(WhereClause {
                search_condition: None,
                cursor: Some(cursor),
            });
        }
        Ok(WhereClause {
            search_condition: Some(self.parse_boolean_expression()?),
            cursor: None,
        })
    }

    fn parse_group_by_clause(&mut self) -> PResult<GroupByClause> {
        self.expect(TokenKind::Group, "GROUP")?;
        self.expect(TokenKind::By, "BY")?;
        let all = self.eat(TokenKind::All);
        let mut grouping_specifications = Vec::new();
        loop {
            grouping_specifications.push(self.parse_grouping_specification(false)?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        let mut group_by_option = GroupByOption::None;
        if self.at(TokenKind::With) && self.peek_is_word("ROLLUP") {
            self.advance();
            self.advance();
            group_by_option = GroupByOption::Rollup;
        } else if self.at(TokenKind::With) && self.peek_is_word("CUBE") {
            self.advance();
            self.advance();
            group_by_option = GroupByOption::Cube;
        }
        Ok(GroupByClause {
            all,
            group_by_option,
            grouping_specifications,
        })
    }

    /// One grouping item. Inside ROLLUP, CUBE and GROUPING SETS a
    /// parenthesized list is a composite and `()` a grand total.
    fn parse_grouping_specification(&mut self, nested: bool) -> PResult<GroupingSpecification> {
        if self.at_word("ROLLUP") && self.peek_is(TokenKind::LParen) {
            self.advance();
            let arguments = self.parse_grouping_list()?;
            return Ok(RollupGroupingSpecification { arguments }.into());
        }
        if self.at_word("CUBE") && self.peek_is(TokenKind::LParen) {
            self.advance();
            let arguments = self.parse_grouping_list()?;
            return Ok(CubeGroupingSpecification { arguments }.into());
        }
        if self.at_word("GROUPING") && self.peek_is_word("SETS") {
            self.advance();
            self.advance();
            let sets = self.parse_grouping_list()?;
            return Ok(GroupingSetsGroupingSpecification { sets }.into());
        }
        if nested && self.at(TokenKind::LParen) {
            if self.peek_is(TokenKind::RParen) {
                self.advance();
                self.advance();
                return Ok(GrandTotalGroupingSpecification {}.into());
            }
            let items = self.parse_grouping_list()?;
            return Ok(CompositeGroupingSpecification { items }.into());
        }
        Ok(ExpressionGroupingSpecification {
            expression: self.parse_scalar_expression()?,
        }
        .into())
    }

    fn parse_grouping_list(&mut self) -> PResult<Vec<GroupingSpecification>> {
        self.nested(|p| {
            p.expect(TokenKind::LParen, "'('")?;
            let mut items = Vec::new();
            loop {
                items.push(p.parse_grouping_specification(true)?);
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            p.expect(TokenKind::RParen, "')'")?;
            Ok(items)
        })
    }

    pub(crate) fn parse_order_by_clause(&mut self) -> PResult<OrderByClause> {
        self.expect(TokenKind::Order, "ORDER")?;
        self.expect(TokenKind::By, "BY")?;
        let mut order_by_elements = Vec::new();
        loop {
            let expression = self.parse_scalar_expression()?;
            let sort_order = if self.eat(TokenKind::Asc) {
                SortOrder::Ascending
            } else if self.eat(TokenKind::Desc) {
                SortOrder::Descending
            } else {
                SortOrder::NotSpecified
            };
            order_by_elements.push(ExpressionWithSortOrder {
                expression,
                sort_order,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(OrderByClause { order_by_elements })
    }

    fn parse_offset_clause(&mut self) -> PResult<OffsetClause> {
        self.expect_word("OFFSET")?;
        let offset_expression = self.parse_scalar_expression()?;
        if !self.eat_word("ROWS") {
            self.expect_word("ROW")?;
        }
        let fetch_expression = if self.eat(TokenKind::Fetch) {
            if !self.eat_word("NEXT") {
                self.expect_word("FIRST")?;
            }
            let fetch = self.parse_scalar_expression()?;
            if !self.eat_word("ROWS") {
                self.expect_word("ROW")?;
            }
            self.expect_word("ONLY")?;
            Some(fetch)
        } else {
            None
        };
        Ok(OffsetClause {
            offset_expression,
            fetch_expression,
        })
    }

    fn parse_for_clause(&mut self) -> PResult<ForClause> {
        self.expect(TokenKind::For, "FOR")?;
        if self.eat(TokenKind::Browse) {
            return Ok(BrowseForClause {}.into());
        }
        if self.eat_word("XML") {
            let mut options = Vec::new();
            loop {
                options.push(self.parse_xml_for_option()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            return Ok(XmlForClause { options }.into());
        }
        self.expect_word("JSON")?;
        let mut options = Vec::new();
        loop {
            options.push(self.parse_json_for_option()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(JsonForClause { options }.into())
    }

    /// `('name')` after RAW, PATH, ROOT and XMLSCHEMA
    fn parse_optional_parenthesized_string(
        &mut self,
    ) -> PResult<Option<tsql_ast::literal::StringLiteral>> {
        if !self.at(TokenKind::LParen) {
            return Ok(None);
        }
        self.advance();
        let value = self.parse_string_literal()?;
        self.expect(TokenKind::RParen, "')'")?;
        Ok(Some(value))
    }

    fn parse_xml_for_option(&mut self) -> PResult<XmlForClauseOption> {
        let word = self.current;
        if !word.kind.is_word() {
            return Err(self.unexpected("FOR XML option"));
        }
        self.advance();
        let upper = word.literal.to_ascii_uppercase();
        let option_kind = match upper.as_str() {
            "RAW" => XmlForClauseOptions::Raw,
            "AUTO" => XmlForClauseOptions::Auto,
            "EXPLICIT" => XmlForClauseOptions::Explicit,
            "PATH" => XmlForClauseOptions::Path,
            "TYPE" => XmlForClauseOptions::Type,
            "XMLDATA" => XmlForClauseOptions::XmlData,
            "XMLSCHEMA" => XmlForClauseOptions::XmlSchema,
            "ROOT" => XmlForClauseOptions::Root,
            "BINARY" => {
                self.expect_word("BASE64")?;
                XmlForClauseOptions::BinaryBase64
            }
            "ELEMENTS" => {
                if self.eat_word("XSINIL") {
                    XmlForClauseOptions::ElementsXsiNil
                } else if self.eat_word("ABSENT") {
                    XmlForClauseOptions::ElementsAbsent
                } else {
                    XmlForClauseOptions::Elements
                }
            }
            _ => {
                return Err(tsql_core::ParseError::new(
                    format!("Unknown FOR XML option '{}'", word.literal),
                    word.offset,
                ));
            }
        };
        let value = match option_kind {
            XmlForClauseOptions::Raw
            | XmlForClauseOptions::Path
            | XmlForClauseOptions::Root
            | XmlForClauseOptions::XmlSchema => self.parse_optional_parenthesized_string()?,
            _ => None,
        };
        Ok(XmlForClauseOption { option_kind, value })
    }

    fn parse_json_for_option(&mut self) -> PResult<JsonForClauseOption> {
        let word = self.current;
        if !word.kind.is_word() {
            return Err(self.unexpected("FOR JSON option"));
        }
        self.advance();
        let option_kind = match word.literal.to_ascii_uppercase().as_str() {
            "AUTO" => JsonForClauseOptions::Auto,
            "PATH" => JsonForClauseOptions::Path,
            "ROOT" => JsonForClauseOptions::Root,
            "INCLUDE_NULL_VALUES" => JsonForClauseOptions::IncludeNullValues,
            "WITHOUT_ARRAY_WRAPPER" => JsonForClauseOptions::WithoutArrayWrapper,
            _ => {
                return Err(tsql_core::ParseError::new(
                    format!("Unknown FOR JSON option '{}'", word.literal),
                    word.offset,
                ));
            }
        };
        let value = if option_kind == JsonForClauseOptions::Root {
            self.parse_optional_parenthesized_string()?
        } else {
            None
        };
        Ok(JsonForClauseOption { option_kind, value })
    }

    // ========== WITH prefix ==========

    /// `WITH [XMLNAMESPACES (...),] cte AS (...), ...`
    pub(crate) fn parse_with_ctes_and_xml_namespaces(
        &mut self,
    ) -> PResult<WithCtesAndXmlNamespaces> {
        self.expect(TokenKind::With, "WITH")?;
        let mut xml_namespaces = None;
        if self.at_word("XMLNAMESPACES") {
            self.advance();
            self.expect(TokenKind::LParen, "'('")?;
            let mut elements = Vec::new();
            loop {
                if self.eat(TokenKind::Default) {
                    elements.push(XmlNamespacesElement {
                        identifier: None,
                        string: self.parse_string_literal()?,
                    });
                } else {
                    let string = self.parse_string_literal()?;
                    self.expect(TokenKind::As, "AS")?;
                    elements.push(XmlNamespacesElement {
                        identifier: Some(self.parse_identifier()?),
                        string,
                    });
                }
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen, "')'")?;
            xml_namespaces = Some(XmlNamespaces {
                xml_namespaces_elements: elements,
            });
            if !self.eat(TokenKind::Comma) {
                return Ok(WithCtesAndXmlNamespaces {
                    xml_namespaces,
                    common_table_expressions: Vec::new(),
                });
            }
        }

        let mut common_table_expressions = Vec::new();
        loop {
            let expression_name = self.parse_identifier()?;
            let columns = if self.at(TokenKind::LParen) {
                self.parse_parenthesized_identifiers()?
            } else {
                Vec::new()
            };
            self.expect(TokenKind::As, "AS")?;
            self.expect(TokenKind::LParen, "'('")?;
            let query_expression = self.parse_query_expression()?;
            self.expect(TokenKind::RParen, "')'")?;
            common_table_expressions.push(CommonTableExpression {
                expression_name,
                columns,
                query_expression,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(WithCtesAndXmlNamespaces {
            xml_namespaces,
            common_table_expressions,
        })
    }

    // ========== OPTION (...) ==========

    pub(crate) fn parse_optimizer_hints(&mut self) -> PResult<Vec<OptimizerHint>> {
        if !(self.at(TokenKind::Option) && self.peek_is(TokenKind::LParen)) {
            return Ok(Vec::new());
        }
        self.advance();
        self.advance();
        let mut hints = Vec::new();
        loop {
            hints.push(self.parse_optimizer_hint()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(hints)
    }

    fn parse_optimizer_hint(&mut self) -> PResult<OptimizerHint> {
        if self.at_word("OPTIMIZE") && self.peek_is(TokenKind::For) {
            self.advance();
            self.advance();
            return self.parse_optimize_for_hint();
        }
        if self.at(TokenKind::Use) && self.peek_is_word("HINT") {
            self.advance();
            self.advance();
            self.expect(TokenKind::LParen, "'('")?;
            let mut hints = Vec::new();
            loop {
                hints.push(self.parse_string_literal()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen, "')'")?;
            return Ok(UseHintList {
                hint_kind: "UseHint".to_string(),
                hints,
            }
            .into());
        }
        if LITERAL_HINTS.iter().any(|w| self.at_word(w)) {
            let hint_kind = super::option_kind_name(self.advance().literal);
            self.eat(TokenKind::Eq);
            let value = self.parse_unary_expression()?;
            return Ok(LiteralOptimizerHint { hint_kind, value }.into());
        }

        let mut words = Vec::new();
        while self.current.kind.is_word() {
            words.push(self.advance().literal.to_ascii_uppercase());
        }
        if words.is_empty() {
            return Err(self.unexpected("optimizer hint"));
        }
        Ok(GeneralOptimizerHint {
            hint_kind: super::option_kind_name(&words.join("_")),
        }
        .into())
    }

    fn parse_optimize_for_hint(&mut self) -> PResult<OptimizerHint> {
        let hint_kind = "OptimizeFor".to_string();
        if self.eat_word("UNKNOWN") {
            return Ok(OptimizeForOptimizerHint {
                hint_kind,
                pairs: Vec::new(),
                is_for_unknown: true,
            }
            .into());
        }
        self.expect(TokenKind::LParen, "'('")?;
        let mut pairs = Vec::new();
        loop {
            let variable: VariableReference = self.parse_variable()?;
            if self.eat_word("UNKNOWN") {
                pairs.push(VariableValuePair {
                    variable,
                    value: None,
                    is_for_unknown: true,
                });
            } else {
                self.expect(TokenKind::Eq, "'='")?;
                pairs.push(VariableValuePair {
                    variable,
                    value: Some(self.parse_scalar_expression()?),
                    is_for_unknown: false,
                });
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(OptimizeForOptimizerHint {
            hint_kind,
            pairs,
            is_for_unknown: false,
        }
        .into())
    }
}

pub(crate) fn assignment_kind(kind: TokenKind) -> Option<AssignmentKind> {
    let assignment = match kind {
        TokenKind::Eq => AssignmentKind::Equals,
        TokenKind::PlusEq => AssignmentKind::AddEquals,
        TokenKind::MinusEq => AssignmentKind::SubtractEquals,
        TokenKind::StarEq => AssignmentKind::MultiplyEquals,
        TokenKind::SlashEq => AssignmentKind::DivideEquals,
        TokenKind::ModuloEq => AssignmentKind::ModEquals,
        TokenKind::AmpersandEq => AssignmentKind::BitwiseAndEquals,
        TokenKind::PipeEq => AssignmentKind::BitwiseOrEquals,
        TokenKind::CaretEq => AssignmentKind::BitwiseXorEquals,
        _ => return None,
    };
    Some(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tsql_core::ParserOptions;

    fn query(source: &str) -> Value {
        let mut parser = Parser::new(source, ParserOptions::default());
        let query = parser.parse_query_expression().unwrap();
        assert_eq!(parser.current.kind, TokenKind::Eof, "unparsed tail in {source}");
        serde_json::to_value(query).unwrap()
    }

    #[test]
    fn test_select_elements() {
        let value = query("SELECT a, b AS x, c y, 'lit' z, t.*, *, n = 1, @v = 2 FROM t");
        let elements = value["SelectElements"].as_array().unwrap();
        assert_eq!(elements.len(), 8);
        assert_eq!(elements[1]["ColumnName"]["Value"], "x");
        assert_eq!(elements[2]["ColumnName"]["Value"], "y");
        assert_eq!(elements[4]["$type"], "SelectStarExpression");
        assert_eq!(elements[4]["Qualifier"]["Identifiers"][0]["Value"], "t");
        assert_eq!(elements[5]["Qualifier"], Value::Null);
        assert_eq!(elements[6]["ColumnName"]["Value"], "n");
        assert_eq!(elements[7]["$type"], "SelectSetVariable");
    }

    #[test]
    fn test_top_and_distinct() {
        let value = query("SELECT DISTINCT TOP (10) PERCENT WITH TIES a FROM t ORDER BY a");
        assert_eq!(value["UniqueRowFilter"], "Distinct");
        assert_eq!(value["TopRowFilter"]["Percent"], true);
        assert_eq!(value["TopRowFilter"]["WithTies"], true);
        assert_eq!(value["TopRowFilter"]["Expression"]["$type"], "ParenthesisExpression");
    }

    #[test]
    fn test_union_with_order_by() {
        let value = query("SELECT a FROM t UNION ALL SELECT b FROM u ORDER BY 1");
        assert_eq!(value["$type"], "BinaryQueryExpression");
        assert_eq!(value["All"], true);
        assert_eq!(value["OrderByClause"]["$type"], "OrderByClause");
        assert_eq!(value["SecondQueryExpression"]["OrderByClause"], Value::Null);
    }

    #[test]
    fn test_group_by_forms() {
        let value = query("SELECT a FROM t GROUP BY ROLLUP (a, (b, c)), GROUPING SETS ((), (a))");
        let specs = value["GroupByClause"]["GroupingSpecifications"].as_array().unwrap();
        assert_eq!(specs[0]["$type"], "RollupGroupingSpecification");
        assert_eq!(specs[0]["Arguments"][1]["$type"], "CompositeGroupingSpecification");
        assert_eq!(specs[1]["Sets"][0]["$type"], "GrandTotalGroupingSpecification");

        let value = query("SELECT a FROM t GROUP BY a WITH CUBE HAVING COUNT(*) > 1");
        assert_eq!(value["GroupByClause"]["GroupByOption"], "Cube");
        assert_eq!(value["HavingClause"]["$type"], "HavingClause");
    }

    #[test]
    fn test_offset_fetch() {
        let value = query("SELECT a FROM t ORDER BY a OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY");
        assert_eq!(value["OffsetClause"]["FetchExpression"]["Value"], "5");
    }

    #[test]
    fn test_for_clauses() {
        let value = query("SELECT a FROM t FOR XML PATH('row'), ROOT('rows'), TYPE");
        let options = value["ForClause"]["Options"].as_array().unwrap();
        assert_eq!(options[0]["OptionKind"], "Path");
        assert_eq!(options[0]["Value"]["Value"], "row");
        assert_eq!(options[2]["Value"], Value::Null);

        let value = query("SELECT a FROM t FOR JSON AUTO, WITHOUT_ARRAY_WRAPPER");
        assert_eq!(value["ForClause"]["$type"], "JsonForClause");

        let value = query("SELECT a FROM t FOR BROWSE");
        assert_eq!(value["ForClause"]["$type"], "BrowseForClause");
    }

    #[test]
    fn test_parenthesized_query_takes_order_by() {
        let value = query("(SELECT a FROM t) ORDER BY a");
        assert_eq!(value["$type"], "QueryParenthesisExpression");
        assert_eq!(value["OrderByClause"]["$type"], "OrderByClause");
        assert_eq!(value["QueryExpression"]["OrderByClause"], Value::Null);
    }

    #[test]
    fn test_where_current_of() {
        let mut parser = Parser::new("WHERE CURRENT OF c1", ParserOptions::default());
        let clause = parser.parse_where_clause().unwrap();
        assert!(clause.search_condition.is_none());
        assert_eq!(clause.cursor.unwrap().value, "c1");
    }

    #[test]
    fn test_optimizer_hints() {
        let mut parser = Parser::new(
            "OPTION (MAXDOP 4, RECOMPILE, HASH JOIN, OPTIMIZE FOR (@p UNKNOWN, @q = 1), USE HINT ('X'))",
            ParserOptions::default(),
        );
        let hints = serde_json::to_value(parser.parse_optimizer_hints().unwrap()).unwrap();
        assert_eq!(hints[0]["$type"], "LiteralOptimizerHint");
        assert_eq!(hints[0]["HintKind"], "MaxDop");
        assert_eq!(hints[1]["$type"], "OptimizerHint");
        assert_eq!(hints[1]["HintKind"], "Recompile");
        assert_eq!(hints[2]["HintKind"], "HashJoin");
        assert_eq!(hints[3]["Pairs"][0]["IsForUnknown"], true);
        assert_eq!(hints[4]["Hints"][0]["Value"], "X");
    }

    #[test]
    fn test_optimize_for_unknown() {
        let mut parser = Parser::new("OPTION (OPTIMIZE FOR UNKNOWN)", ParserOptions::default());
        let hints = serde_json::to_value(parser.parse_optimizer_hints().unwrap()).unwrap();
        assert_eq!(hints[0]["IsForUnknown"], true);
    }
}
