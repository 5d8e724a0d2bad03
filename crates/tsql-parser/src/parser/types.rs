//! Data type references

use super::{PResult, Parser};
use crate::lexer::TokenKind;
use tsql_ast::expr::ScalarExpression;
use tsql_ast::literal::MaxLiteral;
use tsql_ast::types::{
    SqlDataTypeOption, SqlDataTypeReference, UserDataTypeReference, XmlDataTypeOption,
    XmlDataTypeReference,
};
use tsql_ast::{DataTypeReference, Identifier, SchemaObjectName};

impl<'a> Parser<'a> {
    /// `INT`, `NVARCHAR(MAX)`, `DECIMAL(10, 2)`, `dbo.MyType`, `XML(schema)`
    pub(crate) fn parse_data_type(&mut self) -> PResult<DataTypeReference> {
        if !self.current.kind.is_word() {
            return Err(self.unexpected("data type"));
        }
        let mut parts = vec![Identifier::from_lexeme(self.advance().literal)];
        while self.at(TokenKind::Dot) {
            self.advance();
            parts.push(self.parse_word()?);
        }

        if parts.len() == 1 && parts[0].is_word("XML") {
            return self.parse_xml_type_tail(SchemaObjectName::new(parts));
        }

        // two-word spellings of built-in types
        if parts.len() == 1 {
            if parts[0].is_word("DOUBLE") && self.at_word("PRECISION") {
                let second = self.advance();
                parts[0].value = format!("{} {}", parts[0].value, second.literal);
                let name = SchemaObjectName::new(parts);
                return Ok(SqlDataTypeReference {
                    sql_data_type_option: SqlDataTypeOption::Float,
                    name,
                    parameters: Vec::new(),
                }
                .into());
            }
            let varying = match parts[0].value.to_ascii_uppercase().as_str() {
                "CHAR" | "CHARACTER" => Some(SqlDataTypeOption::VarChar),
                "BINARY" => Some(SqlDataTypeOption::VarBinary),
                _ => None,
            };
            if let Some(option) = varying {
                if self.at(TokenKind::Varying) {
                    self.advance();
                    let parameters = self.parse_type_parameters()?;
                    return Ok(SqlDataTypeReference {
                        sql_data_type_option: option,
                        name: SchemaObjectName::new(parts),
                        parameters,
                    }
                    .into());
                }
            }
        }

        let builtin = if parts.len() == 1 {
            SqlDataTypeOption::from_name(&parts[0].value)
        } else {
            None
        };
        let name = SchemaObjectName::new(parts);
        let parameters = self.parse_type_parameters()?;
        Ok(match builtin {
            Some(sql_data_type_option) => SqlDataTypeReference {
                sql_data_type_option,
                name,
                parameters,
            }
            .into(),
            None => UserDataTypeReference { name, parameters }.into(),
        })
    }

    /// Optional `(n)`, `(p, s)` or `(MAX)`
    fn parse_type_parameters(&mut self) -> PResult<Vec<ScalarExpression>> {
        if !self.at(TokenKind::LParen) {
            return Ok(Vec::new());
        }
        self.advance();
        let mut parameters = Vec::new();
        loop {
            if self.at_word("MAX") {
                parameters.push(MaxLiteral::new(self.advance().literal).into());
            } else {
                parameters.push(self.parse_unary_expression()?);
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(parameters)
    }

    fn parse_xml_type_tail(&mut self, name: SchemaObjectName) -> PResult<DataTypeReference> {
        let mut xml_data_type_option = XmlDataTypeOption::None;
        let mut xml_schema_collection = None;
        if self.eat(TokenKind::LParen) {
            if self.eat_word("CONTENT") {
                xml_data_type_option = XmlDataTypeOption::Content;
            } else if self.eat_word("DOCUMENT") {
                xml_data_type_option = XmlDataTypeOption::Document;
            }
            xml_schema_collection = Some(self.parse_schema_object_name()?);
            self.expect(TokenKind::RParen, "')'")?;
        }
        Ok(XmlDataTypeReference {
            xml_data_type_option,
            xml_schema_collection,
            name,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tsql_core::ParserOptions;

    fn data_type(source: &str) -> Value {
        let mut parser = Parser::new(source, ParserOptions::default());
        let data_type = parser.parse_data_type().unwrap();
        assert_eq!(parser.current.kind, TokenKind::Eof, "unparsed tail in {source}");
        serde_json::to_value(data_type).unwrap()
    }

    #[test]
    fn test_builtin_types() {
        let value = data_type("nvarchar(MAX)");
        assert_eq!(value["$type"], "SqlDataTypeReference");
        assert_eq!(value["SqlDataTypeOption"], "NVarChar");
        assert_eq!(value["Parameters"][0]["$type"], "MaxLiteral");

        let value = data_type("DECIMAL(10, 2)");
        assert_eq!(value["Parameters"].as_array().unwrap().len(), 2);
        assert_eq!(data_type("int")["Name"]["BaseIdentifier"]["Value"], "int");
    }

    #[test]
    fn test_user_types() {
        let value = data_type("dbo.Phone");
        assert_eq!(value["$type"], "UserDataTypeReference");
        assert_eq!(value["Name"]["SchemaIdentifier"]["Value"], "dbo");

        let value = data_type("[int]");
        assert_eq!(value["$type"], "SqlDataTypeReference");
        assert_eq!(value["Name"]["BaseIdentifier"]["QuoteType"], "SquareBracket");
    }

    #[test]
    fn test_xml_types() {
        let value = data_type("XML(DOCUMENT dbo.schemas)");
        assert_eq!(value["$type"], "XmlDataTypeReference");
        assert_eq!(value["XmlDataTypeOption"], "Document");
        assert_eq!(data_type("xml")["XmlSchemaCollection"], Value::Null);
    }

    #[test]
    fn test_multi_word_types() {
        assert_eq!(data_type("DOUBLE PRECISION")["SqlDataTypeOption"], "Float");
        assert_eq!(data_type("CHAR VARYING(10)")["SqlDataTypeOption"], "VarChar");
    }

    #[test]
    fn test_keyword_named_types() {
        assert_eq!(data_type("TIME(7)")["SqlDataTypeOption"], "Time");
        assert_eq!(data_type("CURSOR")["SqlDataTypeOption"], "Cursor");
    }
}
