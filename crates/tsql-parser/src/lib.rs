//! tsqlscript Parser
//!
//! Lenient T-SQL lexing and recursive-descent parsing into the `tsql-ast`
//! syntax tree.
//!
//! # Overview
//!
//! - `lexer` - logos-based tokenizer that never fails; unknown characters
//!   become `Invalid` tokens
//! - `parser` - statement, query, expression and DDL grammar with bounded
//!   recovery over unrecognized statement tails
//!
//! ```
//! let script = tsql_parser::parse("SELECT a FROM dbo.t WHERE b = 1").unwrap();
//! assert_eq!(script.statements.len(), 1);
//! ```

pub mod lexer;
pub mod parser;

pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use parser::{Parser, option_kind_name, parse, parse_with_options};

/// Parse a script and project it to compact JSON
pub fn parse_to_json(source: &str, options: &tsql_core::ParserOptions) -> tsql_core::Result<String> {
    let script = parse_with_options(source, options)?;
    Ok(script.to_json()?)
}
