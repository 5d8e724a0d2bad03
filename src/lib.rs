//! tsqlscript - lenient T-SQL parsing into a JSON-serializable syntax tree
//!
//! This is the main library crate that re-exports all tsqlscript components.

pub use tsql_ast as ast;
pub use tsql_core as core;
pub use tsql_parser as parser;

// Re-export commonly used types
pub use tsql_core::{Error, LineIndex, ParseError, ParserOptions, Result};

pub use tsql_ast::{
    BooleanExpression, DataTypeReference, Identifier, MultiPartIdentifier, QueryExpression,
    QuoteType, ScalarExpression, SchemaObjectName, Script, Statement, TableReference,
};
pub use tsql_parser::{Token, TokenKind, parse, parse_to_json, parse_with_options, tokenize};
