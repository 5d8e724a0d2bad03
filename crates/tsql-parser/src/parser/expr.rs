//! Scalar expressions
//!
//! Binary operators are folded by precedence climbing over three levels:
//! shifts, additive (`+ - || & | ^`) and multiplicative (`* / %`). Postfix
//! forms (method calls, `OVER`, `COLLATE`, `AT TIME ZONE`) bind tighter than
//! any binary operator.

use super::{PResult, Parser};
use crate::lexer::TokenKind;
use tsql_ast::expr::{
    AtTimeZoneCall, BinaryExpression, BinaryExpressionType, CallTarget, CastCall,
    CoalesceExpression, ColumnReferenceExpression, ColumnType, ConvertCall, ExpressionCallTarget,
    FunctionCall, GlobalVariableExpression, IIfCall, IdentityFunctionCall, LeftFunctionCall,
    MultiPartIdentifierCallTarget, NextValueForExpression, NullIfExpression, OverClause,
    ParameterlessCall, ParameterlessCallType, RightFunctionCall, ScalarSubquery,
    SearchedCaseExpression, SearchedWhenClause, SimpleCaseExpression, SimpleWhenClause,
    TryCastCall, TryConvertCall, UnaryExpression, UnaryExpressionType, UniqueRowFilter,
    UserDefinedTypeCallTarget, UserDefinedTypePropertyAccess, VariableReference,
    WindowDelimiter, WindowDelimiterType, WindowFrameClause, WindowFrameType, WithinGroupClause,
};
use tsql_ast::literal::{
    BinaryLiteral, DefaultLiteral, IntegerLiteral, LiteralType, NullLiteral, NumericLiteral,
    OdbcLiteral, OdbcLiteralType, RealLiteral, StringLiteral, unquote,
};
use tsql_ast::{Identifier, MultiPartIdentifier, ScalarExpression, SchemaObjectName};

/// Keywords that never start a function call even when `(` follows
const NON_CALLABLE_KEYWORDS: &[TokenKind] = &[
    TokenKind::Select,
    TokenKind::Values,
    TokenKind::Exists,
    TokenKind::Not,
    TokenKind::In,
    TokenKind::With,
];

/// Classify a numeric lexeme the way T-SQL types it
pub(crate) fn number_literal(lexeme: &str) -> ScalarExpression {
    if lexeme.contains(['e', 'E']) {
        RealLiteral::new(lexeme).into()
    } else if lexeme.contains('.') {
        NumericLiteral::new(lexeme).into()
    } else {
        IntegerLiteral::new(lexeme).into()
    }
}

fn as_function_call_mut(expression: &mut ScalarExpression) -> Option<&mut FunctionCall> {
    match expression {
        ScalarExpression::FunctionCall(call) => Some(&mut **call),
        _ => None,
    }
}

fn accepts_member_access(expression: &ScalarExpression) -> bool {
    matches!(
        expression,
        ScalarExpression::FunctionCall(_)
            | ScalarExpression::ParenthesisExpression(_)
            | ScalarExpression::UserDefinedTypePropertyAccess(_)
            | ScalarExpression::VariableReference(_)
            | ScalarExpression::CastCall(_)
            | ScalarExpression::ConvertCall(_)
    )
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_scalar_expression(&mut self) -> PResult<ScalarExpression> {
        self.nested(|p| {
            let lhs = p.parse_unary_expression()?;
            p.parse_binary_tail(0, lhs)
        })
    }

    /// Resume a scalar expression whose primary has already been parsed
    pub(crate) fn continue_scalar_expression(
        &mut self,
        primary: ScalarExpression,
    ) -> PResult<ScalarExpression> {
        let lhs = self.parse_postfix(primary)?;
        self.parse_binary_tail(0, lhs)
    }

    fn binary_operator(&self) -> Option<(BinaryExpressionType, u8)> {
        let operator = match self.current.kind {
            TokenKind::ShiftLeft => (BinaryExpressionType::LeftShift, 1),
            TokenKind::ShiftRight => (BinaryExpressionType::RightShift, 1),
            TokenKind::Plus => (BinaryExpressionType::Add, 2),
            TokenKind::Minus => (BinaryExpressionType::Subtract, 2),
            TokenKind::Concat => (BinaryExpressionType::Concat, 2),
            TokenKind::Ampersand => (BinaryExpressionType::BitwiseAnd, 2),
            TokenKind::Pipe => (BinaryExpressionType::BitwiseOr, 2),
            TokenKind::Caret => (BinaryExpressionType::BitwiseXor, 2),
            TokenKind::Star => (BinaryExpressionType::Multiply, 3),
            TokenKind::Slash => (BinaryExpressionType::Divide, 3),
            TokenKind::Modulo => (BinaryExpressionType::Modulo, 3),
            _ => return None,
        };
        Some(operator)
    }

    /// Fold binary operators of at least `min_precedence` onto `lhs`
    pub(crate) fn parse_binary_tail(
        &mut self,
        min_precedence: u8,
        mut lhs: ScalarExpression,
    ) -> PResult<ScalarExpression> {
        while let Some((operator, precedence)) = self.binary_operator() {
            if precedence < min_precedence {
                break;
            }
            self.advance();
            let mut rhs = self.parse_unary_expression()?;
            while let Some((_, next)) = self.binary_operator() {
                if next <= precedence {
                    break;
                }
                rhs = self.nested(|p| p.parse_binary_tail(next, rhs))?;
            }
            lhs = BinaryExpression::new(operator, lhs, rhs).into();
        }
        Ok(lhs)
    }

    pub(crate) fn parse_unary_expression(&mut self) -> PResult<ScalarExpression> {
        let unary_expression_type = match self.current.kind {
            TokenKind::Plus => UnaryExpressionType::Positive,
            TokenKind::Minus => UnaryExpressionType::Negative,
            TokenKind::Tilde => UnaryExpressionType::BitwiseNot,
            _ => {
                let primary = self.parse_primary_expression()?;
                return self.parse_postfix(primary);
            }
        };
        self.advance();
        let expression = self.nested(|p| p.parse_unary_expression())?;
        Ok(UnaryExpression {
            unary_expression_type,
            expression,
        }
        .into())
    }

    /// Method calls, window clauses, `COLLATE` and `AT TIME ZONE`
    fn parse_postfix(&mut self, mut expression: ScalarExpression) -> PResult<ScalarExpression> {
        loop {
            if self.at(TokenKind::Dot)
                && self.peek.kind.is_word()
                && accepts_member_access(&expression)
            {
                self.advance();
                let name = self.parse_word()?;
                let target: CallTarget = ExpressionCallTarget { expression }.into();
                expression = if self.at(TokenKind::LParen) {
                    self.parse_function_call(Some(target), name)?
                } else {
                    UserDefinedTypePropertyAccess {
                        call_target: Some(target),
                        property_name: name,
                        collation: None,
                    }
                    .into()
                };
            } else if self.at_word("WITHIN")
                && self.peek_is(TokenKind::Group)
                && as_function_call_mut(&mut expression).is_some()
            {
                self.advance();
                self.advance();
                self.expect(TokenKind::LParen, "'('")?;
                let order_by_clause = self.parse_order_by_clause()?;
                self.expect(TokenKind::RParen, "')'")?;
                if let Some(call) = as_function_call_mut(&mut expression) {
                    call.within_group_clause = Some(WithinGroupClause { order_by_clause });
                }
            } else if (self.at_word("IGNORE") || self.at_word("RESPECT"))
                && self.peek_is_word("NULLS")
                && as_function_call_mut(&mut expression).is_some()
            {
                let first = Identifier::from_lexeme(self.advance().literal);
                let second = Identifier::from_lexeme(self.advance().literal);
                if let Some(call) = as_function_call_mut(&mut expression) {
                    call.ignore_respect_nulls = vec![first, second];
                }
            } else if self.at(TokenKind::Over) && as_function_call_mut(&mut expression).is_some() {
                let over = self.parse_over_clause()?;
                if let Some(call) = as_function_call_mut(&mut expression) {
                    call.over_clause = Some(over);
                }
            } else if self.at(TokenKind::Collate) {
                let offset = self.current.offset;
                self.advance();
                let collation = self.parse_word()?;
                if expression.set_collation(collation).is_err() {
                    return Err(tsql_core::ParseError::new(
                        "COLLATE is not allowed on this expression",
                        offset,
                    ));
                }
            } else if self.at_words(&["AT", "TIME", "ZONE"]) {
                self.advance();
                self.advance();
                self.advance();
                let time_zone = self.parse_primary_expression()?;
                expression = AtTimeZoneCall {
                    date_value: expression,
                    time_zone,
                }
                .into();
            } else {
                return Ok(expression);
            }
        }
    }

    pub(crate) fn parse_primary_expression(&mut self) -> PResult<ScalarExpression> {
        let token = self.current;
        match token.kind {
            TokenKind::Number => {
                self.advance();
                Ok(number_literal(token.literal))
            }
            TokenKind::String | TokenKind::NationalString => {
                self.advance();
                Ok(StringLiteral::from_lexeme(token.literal).into())
            }
            TokenKind::BinaryLiteral => {
                self.advance();
                Ok(BinaryLiteral::new(token.literal).into())
            }
            TokenKind::Null => {
                self.advance();
                Ok(NullLiteral::new().into())
            }
            TokenKind::Default if !self.peek_is(TokenKind::LParen) => {
                self.advance();
                Ok(DefaultLiteral::new(token.literal).into())
            }
            TokenKind::LParen => self.parse_parenthesized_scalar(),
            TokenKind::LBrace => self.parse_odbc_literal(),
            TokenKind::Star => {
                self.advance();
                Ok(ColumnReferenceExpression::wildcard(None).into())
            }
            TokenKind::Dot => self.parse_column_or_function_call(),
            TokenKind::Case => self.parse_case_expression(),
            TokenKind::Convert | TokenKind::TryConvert => self.parse_convert_call(),
            TokenKind::Coalesce => {
                self.advance();
                let expressions = self.parse_parenthesized_expressions()?;
                Ok(CoalesceExpression {
                    expressions,
                    collation: None,
                }
                .into())
            }
            TokenKind::Nullif => self.parse_nullif_expression(),
            TokenKind::Left | TokenKind::Right if self.peek_is(TokenKind::LParen) => {
                self.advance();
                let parameters = self.parse_parenthesized_expressions()?;
                Ok(if token.kind == TokenKind::Left {
                    LeftFunctionCall {
                        parameters,
                        collation: None,
                    }
                    .into()
                } else {
                    RightFunctionCall {
                        parameters,
                        collation: None,
                    }
                    .into()
                })
            }
            TokenKind::Identity if self.peek_is(TokenKind::LParen) => {
                self.parse_identity_function_call()
            }
            TokenKind::Identitycol => {
                self.advance();
                Ok(special_column(ColumnType::IdentityCol))
            }
            TokenKind::Rowguidcol => {
                self.advance();
                Ok(special_column(ColumnType::RowGuidCol))
            }
            TokenKind::CurrentTimestamp => self.parameterless(ParameterlessCallType::CurrentTimestamp),
            TokenKind::CurrentUser => self.parameterless(ParameterlessCallType::CurrentUser),
            TokenKind::SessionUser => self.parameterless(ParameterlessCallType::SessionUser),
            TokenKind::SystemUser => self.parameterless(ParameterlessCallType::SystemUser),
            TokenKind::User if !self.peek_is(TokenKind::LParen) => {
                self.parameterless(ParameterlessCallType::User)
            }
            TokenKind::Ident => self.parse_identifier_expression(),
            TokenKind::Invalid => Err(self.error_here(format!(
                "Unexpected character '{}'",
                token.literal
            ))),
            kind if kind.is_soft_keyword() => self.parse_column_or_function_call(),
            kind if kind.is_keyword()
                && self.peek_is(TokenKind::LParen)
                && !NON_CALLABLE_KEYWORDS.contains(&kind) =>
            {
                self.advance();
                self.parse_function_call(None, Identifier::new(token.literal))
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn parameterless(&mut self, call_type: ParameterlessCallType) -> PResult<ScalarExpression> {
        self.advance();
        Ok(ParameterlessCall {
            parameterless_call_type: call_type,
            collation: None,
        }
        .into())
    }

    /// Variables, quoted strings under QUOTED_IDENTIFIER OFF, special
    /// functions spelled as plain identifiers, then names and calls
    fn parse_identifier_expression(&mut self) -> PResult<ScalarExpression> {
        let token = self.current;
        let literal = token.literal;
        if literal.starts_with('"') && !self.options.quoted_identifier {
            self.advance();
            return Ok(StringLiteral::new(unquote(literal, '"'), false).into());
        }
        if literal.starts_with("@@") && literal.len() > 2 {
            self.advance();
            return Ok(GlobalVariableExpression {
                name: literal.to_string(),
                collation: None,
            }
            .into());
        }
        if token.is_variable() {
            self.advance();
            return Ok(VariableReference::new(literal).into());
        }
        if self.peek_is(TokenKind::LParen) && (token.is_word("CAST") || token.is_word("TRY_CAST"))
        {
            return self.parse_cast_call();
        }
        if self.peek_is(TokenKind::LParen) && token.is_word("IIF") {
            return self.parse_iif_call();
        }
        if token.is_word("NEXT") && self.peek_is_word("VALUE") {
            return self.parse_next_value_for();
        }
        if token.is_word("$IDENTITY") {
            self.advance();
            return Ok(special_column(ColumnType::IdentityCol));
        }
        if token.is_word("$ROWGUID") {
            self.advance();
            return Ok(special_column(ColumnType::RowGuidCol));
        }
        self.parse_column_or_function_call()
    }

    /// `a.b.c`, `a.b.fn(...)`, `type::member` or `type::method(...)`
    fn parse_column_or_function_call(&mut self) -> PResult<ScalarExpression> {
        let mut parts = self.parse_dotted_parts(true)?;
        if self.eat(TokenKind::DoubleColon) {
            let target: CallTarget = UserDefinedTypeCallTarget {
                schema_object_name: SchemaObjectName::new(parts),
            }
            .into();
            let member = self.parse_word()?;
            if self.at(TokenKind::LParen) {
                return self.parse_function_call(Some(target), member);
            }
            return Ok(UserDefinedTypePropertyAccess {
                call_target: Some(target),
                property_name: member,
                collation: None,
            }
            .into());
        }
        if self.at(TokenKind::LParen) {
            let name = parts
                .pop()
                .ok_or_else(|| self.unexpected("function name"))?;
            let target = if parts.is_empty() {
                None
            } else {
                Some(
                    MultiPartIdentifierCallTarget {
                        multi_part_identifier: MultiPartIdentifier::new(parts),
                    }
                    .into(),
                )
            };
            return self.parse_function_call(target, name);
        }
        Ok(ColumnReferenceExpression::regular(MultiPartIdentifier::new(parts)).into())
    }

    /// Argument list of an ordinary call; the cursor is on `(`
    pub(crate) fn parse_function_call(
        &mut self,
        call_target: Option<CallTarget>,
        function_name: Identifier,
    ) -> PResult<ScalarExpression> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut call = FunctionCall::new(function_name, Vec::new());
        call.call_target = call_target;
        if !self.at(TokenKind::RParen) {
            if self.eat(TokenKind::Distinct) {
                call.unique_row_filter = UniqueRowFilter::Distinct;
            } else if self.eat(TokenKind::All) {
                call.unique_row_filter = UniqueRowFilter::All;
            }
            loop {
                call.parameters.push(self.parse_scalar_expression()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(call.into())
    }

    /// `( ... )`: a subquery or a parenthesized scalar
    fn parse_parenthesized_scalar(&mut self) -> PResult<ScalarExpression> {
        self.nested(|p| {
            if p.at_subquery_start() {
                let subquery = p.attempt(|p| {
                    p.expect(TokenKind::LParen, "'('")?;
                    let query = p.parse_query_expression()?;
                    p.expect(TokenKind::RParen, "')'")?;
                    Ok(query)
                });
                if let Some(query) = subquery {
                    return Ok(ScalarSubquery::new(query).into());
                }
            }
            p.expect(TokenKind::LParen, "'('")?;
            let inner = p.parse_scalar_expression()?;
            p.expect(TokenKind::RParen, "')'")?;
            Ok(ScalarExpression::parenthesized(inner))
        })
    }

    /// The cursor is on `(` and the first non-`(` token after it starts a query
    pub(crate) fn at_subquery_start(&self) -> bool {
        if !self.at(TokenKind::LParen) {
            return false;
        }
        let mut n = 1;
        loop {
            match self.nth(n).kind {
                TokenKind::LParen => n += 1,
                TokenKind::Select => return true,
                TokenKind::With => return n == 1,
                _ => return false,
            }
        }
    }

    fn parse_odbc_literal(&mut self) -> PResult<ScalarExpression> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let kind_token = self.current;
        let odbc_literal_type = OdbcLiteralType::from_word(kind_token.literal)
            .filter(|_| kind_token.kind.is_word())
            .ok_or_else(|| self.unexpected("ODBC literal type"))?;
        self.advance();
        let literal = self.parse_string_literal()?;
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(OdbcLiteral {
            literal_type: LiteralType::Odbc,
            odbc_literal_type,
            is_national: literal.is_national,
            value: literal.value,
        }
        .into())
    }

    fn parse_case_expression(&mut self) -> PResult<ScalarExpression> {
        self.expect(TokenKind::Case, "CASE")?;
        if self.at(TokenKind::When) {
            let mut when_clauses = Vec::new();
            while self.eat(TokenKind::When) {
                let when_expression = self.parse_boolean_expression()?;
                self.expect(TokenKind::Then, "THEN")?;
                let then_expression = self.parse_scalar_expression()?;
                when_clauses.push(SearchedWhenClause {
                    when_expression,
                    then_expression,
                });
            }
            let else_expression = self.parse_case_else()?;
            return Ok(SearchedCaseExpression {
                when_clauses,
                else_expression,
                collation: None,
            }
            .into());
        }

        let input_expression = self.parse_scalar_expression()?;
        let mut when_clauses = Vec::new();
        while self.eat(TokenKind::When) {
            let when_expression = self.parse_scalar_expression()?;
            self.expect(TokenKind::Then, "THEN")?;
            let then_expression = self.parse_scalar_expression()?;
            when_clauses.push(SimpleWhenClause {
                when_expression,
                then_expression,
            });
        }
        if when_clauses.is_empty() {
            return Err(self.unexpected("WHEN"));
        }
        let else_expression = self.parse_case_else()?;
        Ok(SimpleCaseExpression {
            input_expression,
            when_clauses,
            else_expression,
            collation: None,
        }
        .into())
    }

    fn parse_case_else(&mut self) -> PResult<Option<ScalarExpression>> {
        let else_expression = if self.eat(TokenKind::Else) {
            Some(self.parse_scalar_expression()?)
        } else {
            None
        };
        self.expect(TokenKind::End, "END")?;
        Ok(else_expression)
    }

    /// `CAST(expr AS type)` / `TRY_CAST(expr AS type)`
    fn parse_cast_call(&mut self) -> PResult<ScalarExpression> {
        let is_try = self.advance().is_word("TRY_CAST");
        self.expect(TokenKind::LParen, "'('")?;
        let parameter = self.parse_scalar_expression()?;
        self.expect(TokenKind::As, "AS")?;
        let data_type = self.parse_data_type()?;
        self.expect(TokenKind::RParen, "')'")?;
        Ok(if is_try {
            TryCastCall {
                data_type,
                parameter,
                collation: None,
            }
            .into()
        } else {
            CastCall {
                data_type,
                parameter,
                collation: None,
            }
            .into()
        })
    }

    /// `CONVERT(type, expr [, style])` / `TRY_CONVERT(...)`
    fn parse_convert_call(&mut self) -> PResult<ScalarExpression> {
        let is_try = self.advance().kind == TokenKind::TryConvert;
        self.expect(TokenKind::LParen, "'('")?;
        let data_type = self.parse_data_type()?;
        self.expect(TokenKind::Comma, "','")?;
        let parameter = self.parse_scalar_expression()?;
        let style = if self.eat(TokenKind::Comma) {
            Some(self.parse_scalar_expression()?)
        } else {
            None
        };
        self.expect(TokenKind::RParen, "')'")?;
        Ok(if is_try {
            TryConvertCall {
                data_type,
                parameter,
                style,
                collation: None,
            }
            .into()
        } else {
            ConvertCall {
                data_type,
                parameter,
                style,
                collation: None,
            }
            .into()
        })
    }

    fn parse_nullif_expression(&mut self) -> PResult<ScalarExpression> {
        self.expect(TokenKind::Nullif, "NULLIF")?;
        self.expect(TokenKind::LParen, "'('")?;
        let first_expression = self.parse_scalar_expression()?;
        self.expect(TokenKind::Comma, "','")?;
        let second_expression = self.parse_scalar_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        Ok(NullIfExpression {
            first_expression,
            second_expression,
            collation: None,
        }
        .into())
    }

    fn parse_iif_call(&mut self) -> PResult<ScalarExpression> {
        self.advance();
        self.expect(TokenKind::LParen, "'('")?;
        let predicate = self.parse_boolean_expression()?;
        self.expect(TokenKind::Comma, "','")?;
        let then_expression = self.parse_scalar_expression()?;
        self.expect(TokenKind::Comma, "','")?;
        let else_expression = self.parse_scalar_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        Ok(IIfCall {
            predicate,
            then_expression,
            else_expression,
            collation: None,
        }
        .into())
    }

    /// `IDENTITY(type [, seed, increment])`
    fn parse_identity_function_call(&mut self) -> PResult<ScalarExpression> {
        self.expect(TokenKind::Identity, "IDENTITY")?;
        self.expect(TokenKind::LParen, "'('")?;
        let data_type = self.parse_data_type()?;
        let (seed, increment) = if self.eat(TokenKind::Comma) {
            let seed = self.parse_scalar_expression()?;
            self.expect(TokenKind::Comma, "','")?;
            (Some(seed), Some(self.parse_scalar_expression()?))
        } else {
            (None, None)
        };
        self.expect(TokenKind::RParen, "')'")?;
        Ok(IdentityFunctionCall {
            data_type,
            seed,
            increment,
        }
        .into())
    }

    /// `NEXT VALUE FOR seq [OVER (ORDER BY ...)]`
    fn parse_next_value_for(&mut self) -> PResult<ScalarExpression> {
        self.advance();
        self.advance();
        self.expect(TokenKind::For, "FOR")?;
        let sequence_name = self.parse_schema_object_name()?;
        let over_clause = if self.at(TokenKind::Over) {
            Some(self.parse_over_clause()?)
        } else {
            None
        };
        Ok(NextValueForExpression {
            sequence_name,
            over_clause,
        }
        .into())
    }

    /// `OVER window` or `OVER ([PARTITION BY ...] [ORDER BY ...] [frame])`
    pub(crate) fn parse_over_clause(&mut self) -> PResult<OverClause> {
        self.expect(TokenKind::Over, "OVER")?;
        let mut over = OverClause {
            window_name: None,
            partitions: Vec::new(),
            order_by_clause: None,
            window_frame_clause: None,
        };
        if !self.at(TokenKind::LParen) {
            over.window_name = Some(self.parse_identifier()?);
            return Ok(over);
        }
        self.advance();
        if self.at(TokenKind::Ident)
            && !self.at_any_word(&["PARTITION", "ROWS", "RANGE"])
        {
            over.window_name = Some(self.parse_identifier()?);
        }
        if self.at_word("PARTITION") && self.peek_is(TokenKind::By) {
            self.advance();
            self.advance();
            loop {
                over.partitions.push(self.parse_scalar_expression()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        if self.at(TokenKind::Order) {
            over.order_by_clause = Some(self.parse_order_by_clause()?);
        }
        if self.at_any_word(&["ROWS", "RANGE"]) {
            over.window_frame_clause = Some(self.parse_window_frame()?);
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(over)
    }

    fn parse_window_frame(&mut self) -> PResult<WindowFrameClause> {
        let window_frame_type = if self.advance().is_word("ROWS") {
            WindowFrameType::Rows
        } else {
            WindowFrameType::Range
        };
        if self.eat(TokenKind::Between) {
            let top = self.parse_window_delimiter()?;
            self.expect(TokenKind::And, "AND")?;
            let bottom = self.parse_window_delimiter()?;
            return Ok(WindowFrameClause {
                window_frame_type,
                top,
                bottom: Some(bottom),
            });
        }
        Ok(WindowFrameClause {
            window_frame_type,
            top: self.parse_window_delimiter()?,
            bottom: None,
        })
    }

    fn parse_window_delimiter(&mut self) -> PResult<WindowDelimiter> {
        if self.eat_word("UNBOUNDED") {
            let window_delimiter_type = if self.eat_word("PRECEDING") {
                WindowDelimiterType::UnboundedPreceding
            } else {
                self.expect_word("FOLLOWING")?;
                WindowDelimiterType::UnboundedFollowing
            };
            return Ok(WindowDelimiter {
                window_delimiter_type,
                offset_value: None,
            });
        }
        if self.at(TokenKind::Current) && self.peek_is_word("ROW") {
            self.advance();
            self.advance();
            return Ok(WindowDelimiter {
                window_delimiter_type: WindowDelimiterType::CurrentRow,
                offset_value: None,
            });
        }
        let offset_value = self.parse_scalar_expression()?;
        let window_delimiter_type = if self.eat_word("PRECEDING") {
            WindowDelimiterType::ValuePreceding
        } else {
            self.expect_word("FOLLOWING")?;
            WindowDelimiterType::ValueFollowing
        };
        Ok(WindowDelimiter {
            window_delimiter_type,
            offset_value: Some(offset_value),
        })
    }

    /// True if the cursor can begin a scalar expression
    pub(crate) fn can_start_expression(&self) -> bool {
        match self.current.kind {
            TokenKind::Number
            | TokenKind::String
            | TokenKind::NationalString
            | TokenKind::BinaryLiteral
            | TokenKind::Null
            | TokenKind::LParen
            | TokenKind::LBrace
            | TokenKind::Minus
            | TokenKind::Plus
            | TokenKind::Tilde
            | TokenKind::Case
            | TokenKind::Convert
            | TokenKind::TryConvert
            | TokenKind::Coalesce
            | TokenKind::Nullif
            | TokenKind::CurrentTimestamp
            | TokenKind::CurrentUser
            | TokenKind::SessionUser
            | TokenKind::SystemUser => true,
            TokenKind::Left | TokenKind::Right | TokenKind::Identity => {
                self.peek_is(TokenKind::LParen)
            }
            TokenKind::Ident => !self.at_statement_start(),
            kind => kind.is_soft_keyword() && !self.at_statement_start(),
        }
    }
}

fn special_column(column_type: ColumnType) -> ScalarExpression {
    ColumnReferenceExpression {
        column_type,
        multi_part_identifier: None,
        collation: None,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tsql_core::ParserOptions;

    fn expr(source: &str) -> Value {
        let mut parser = Parser::new(source, ParserOptions::default());
        let expression = parser.parse_scalar_expression().unwrap();
        assert_eq!(parser.current.kind, TokenKind::Eof, "unparsed tail in {source}");
        serde_json::to_value(expression).unwrap()
    }

    fn expr_err(source: &str) -> tsql_core::ParseError {
        let mut parser = Parser::new(source, ParserOptions::default());
        parser.parse_scalar_expression().unwrap_err()
    }

    #[test]
    fn test_numeric_literal_kinds() {
        assert_eq!(expr("42")["$type"], "IntegerLiteral");
        assert_eq!(expr("4.2")["$type"], "NumericLiteral");
        assert_eq!(expr("4.2e1")["$type"], "RealLiteral");
        assert_eq!(expr("0x1F")["$type"], "BinaryLiteral");
        assert_eq!(expr("42")["Value"], "42");
        assert_eq!(expr(".5")["$type"], "NumericLiteral");
        assert_eq!(expr(".5")["Value"], ".5");
        assert_eq!(expr("-.5e2")["Expression"]["$type"], "RealLiteral");
    }

    #[test]
    fn test_precedence() {
        let value = expr("1 + 2 * 3");
        assert_eq!(value["BinaryExpressionType"], "Add");
        assert_eq!(value["SecondExpression"]["BinaryExpressionType"], "Multiply");

        let value = expr("a - b - c");
        assert_eq!(value["FirstExpression"]["BinaryExpressionType"], "Subtract");
        assert_eq!(value["SecondExpression"]["$type"], "ColumnReferenceExpression");

        let value = expr("1 << 2 + 3");
        assert_eq!(value["BinaryExpressionType"], "LeftShift");
        assert_eq!(value["SecondExpression"]["BinaryExpressionType"], "Add");
    }

    #[test]
    fn test_bitwise_and_unary() {
        let value = expr("~a & 3");
        assert_eq!(value["BinaryExpressionType"], "BitwiseAnd");
        assert_eq!(value["FirstExpression"]["UnaryExpressionType"], "BitwiseNot");
        assert_eq!(expr("-1")["UnaryExpressionType"], "Negative");
    }

    #[test]
    fn test_variables() {
        assert_eq!(expr("@x"), json!({"$type": "VariableReference", "Name": "@x"}));
        assert_eq!(expr("@@ROWCOUNT")["$type"], "GlobalVariableExpression");
    }

    #[test]
    fn test_column_and_calls() {
        let value = expr("dbo.t.col");
        assert_eq!(value["MultiPartIdentifier"]["Count"], 3);

        let value = expr("dbo.fn(1, 2)");
        assert_eq!(value["$type"], "FunctionCall");
        assert_eq!(value["FunctionName"]["Value"], "fn");
        assert_eq!(value["CallTarget"]["$type"], "MultiPartIdentifierCallTarget");
        assert_eq!(value["Parameters"].as_array().unwrap().len(), 2);

        let value = expr("COUNT(DISTINCT x)");
        assert_eq!(value["UniqueRowFilter"], "Distinct");

        let value = expr("COUNT(*)");
        assert_eq!(value["Parameters"][0]["ColumnType"], "Wildcard");
    }

    #[test]
    fn test_keyword_call_forms() {
        let value = expr("LEFT(name, 3)");
        assert_eq!(value["$type"], "LeftFunctionCall");
        let value = expr("UPDATE(col)");
        assert_eq!(value["$type"], "FunctionCall");
        assert_eq!(value["FunctionName"]["Value"], "UPDATE");
    }

    #[test]
    fn test_cast_and_convert() {
        let value = expr("CAST(x AS varchar(10))");
        assert_eq!(value["$type"], "CastCall");
        assert_eq!(value["DataType"]["SqlDataTypeOption"], "VarChar");

        let value = expr("TRY_CONVERT(int, '5', 1)");
        assert_eq!(value["$type"], "TryConvertCall");
        assert_eq!(value["Style"]["Value"], "1");
    }

    #[test]
    fn test_case_expressions() {
        let value = expr("CASE WHEN a = 1 THEN 'x' ELSE 'y' END");
        assert_eq!(value["$type"], "SearchedCaseExpression");
        assert_eq!(value["ElseExpression"]["Value"], "y");

        let value = expr("CASE a WHEN 1 THEN 'x' END");
        assert_eq!(value["$type"], "SimpleCaseExpression");
        assert_eq!(value["ElseExpression"], Value::Null);

        assert!(expr_err("CASE a WHEN 1 THEN 2").message.contains("END"));
    }

    #[test]
    fn test_window_function() {
        let value = expr(
            "SUM(x) OVER (PARTITION BY a ORDER BY b ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)",
        );
        let over = &value["OverClause"];
        assert_eq!(over["Partitions"].as_array().unwrap().len(), 1);
        assert_eq!(over["WindowFrameClause"]["Top"]["WindowDelimiterType"], "UnboundedPreceding");
        assert_eq!(over["WindowFrameClause"]["Bottom"]["WindowDelimiterType"], "CurrentRow");
    }

    #[test]
    fn test_collate_and_time_zone() {
        let value = expr("name COLLATE Latin1_General_CI_AS");
        assert_eq!(value["Collation"]["Value"], "Latin1_General_CI_AS");

        let value = expr("d AT TIME ZONE 'UTC'");
        assert_eq!(value["$type"], "AtTimeZoneCall");

        assert!(expr_err("1 COLLATE x").message.contains("COLLATE"));
    }

    #[test]
    fn test_subquery_and_parenthesis() {
        assert_eq!(expr("(SELECT 1)")["$type"], "ScalarSubquery");
        assert_eq!(expr("(1 + 2)")["$type"], "ParenthesisExpression");
        assert_eq!(expr("((SELECT 1) + 1)")["$type"], "ParenthesisExpression");
    }

    #[test]
    fn test_method_and_udt_calls() {
        let value = expr("@x.value('a', 'int')");
        assert_eq!(value["CallTarget"]["$type"], "ExpressionCallTarget");
        let value = expr("geography::Point(1, 2, 4326)");
        assert_eq!(value["CallTarget"]["$type"], "UserDefinedTypeCallTarget");
        let value = expr("hierarchyid::GetRoot().ToString()");
        assert_eq!(value["FunctionName"]["Value"], "ToString");
    }

    #[test]
    fn test_special_forms() {
        assert_eq!(expr("CURRENT_TIMESTAMP")["ParameterlessCallType"], "CurrentTimestamp");
        assert_eq!(expr("$IDENTITY")["ColumnType"], "IdentityCol");
        assert_eq!(expr("NEXT VALUE FOR dbo.seq")["$type"], "NextValueForExpression");
        assert_eq!(expr("IIF(a > 1, 'x', 'y')")["$type"], "IIfCall");
        assert_eq!(expr("{d '2020-01-01'}")["OdbcLiteralType"], "Date");
    }

    #[test]
    fn test_quoted_identifier_off() {
        let options = ParserOptions::default().quoted_identifier(false);
        let mut parser = Parser::new("\"abc\"", options);
        let value = serde_json::to_value(parser.parse_scalar_expression().unwrap()).unwrap();
        assert_eq!(value["$type"], "StringLiteral");
        assert_eq!(value["Value"], "abc");

        assert_eq!(expr("\"abc\"")["MultiPartIdentifier"]["Identifiers"][0]["QuoteType"], "DoubleQuote");
    }
}
