//! Recursive-descent T-SQL parser
//!
//! The parser pulls tokens from [`Lexer`] with one token of lookahead
//! (`current` / `peek`); deeper lookahead clones the lexer, which is cheap
//! because a logos lexer is just a cursor over the source.
//!
//! Grammar is split by area:
//!
//! - `names`, `types`, `options` - identifiers, data types, option lists
//! - `expr`, `boolean` - scalar and boolean expressions
//! - `query`, `table` - query expressions and table sources
//! - `dml`, `procedural` - data manipulation and control flow
//! - `table_def`, `alter`, `create`, `drop` - DDL
//! - `security`, `database`, `objects` - the long tail of server objects

mod alter;
mod boolean;
mod create;
mod database;
mod dml;
mod drop;
mod expr;
mod names;
mod objects;
mod options;
mod procedural;
mod query;
mod security;
mod table;
mod table_def;
mod types;

pub use options::option_kind_name;

use crate::lexer::{Lexer, Token, TokenKind};
use tracing::{debug, trace};
use tsql_ast::{Identifier, SchemaObjectName, Script, Statement};
use tsql_core::{ParseError, ParserOptions};

pub(crate) type PResult<T> = std::result::Result<T, ParseError>;

/// Words that begin a new statement. Tail recovery never skips past them.
const STATEMENT_START_WORDS: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "CREATE", "ALTER", "DROP", "DECLARE", "EXEC",
    "EXECUTE", "IF", "WHILE", "BEGIN", "END", "PRINT", "THROW", "GRANT", "REVOKE", "RETURN",
    "BREAK", "CONTINUE", "GOTO", "WAITFOR", "BACKUP", "RESTORE", "USE", "GO",
];

/// Parse a script with default options
pub fn parse(source: &str) -> Result<Script, ParseError> {
    parse_with_options(source, &ParserOptions::default())
}

/// Parse a script. The result is either the whole script or the first error.
pub fn parse_with_options(source: &str, options: &ParserOptions) -> Result<Script, ParseError> {
    if let Err(err) = options.validate() {
        return Err(ParseError::new(err.to_string(), 0));
    }
    Parser::new(source, options.clone()).parse_script()
}

/// Saved parser position for speculative parses
#[derive(Clone)]
struct Checkpoint<'a> {
    lexer: Lexer<'a>,
    current: Token<'a>,
    peek: Token<'a>,
    depth: usize,
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token<'a>,
    peek: Token<'a>,
    options: ParserOptions,
    depth: usize,
    /// `SELECT ... INTO t [ON fg]` seen inside the query being parsed
    select_into: Option<(SchemaObjectName, Option<Identifier>)>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, options: ParserOptions) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            options,
            depth: 0,
            select_into: None,
        }
    }

    /// Parse every statement up to end of input
    pub fn parse_script(mut self) -> PResult<Script> {
        let mut statements = Vec::new();
        loop {
            self.skip_separators();
            if self.at(TokenKind::Eof) {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        Ok(Script::new(statements))
    }

    // ========== Token cursor ==========

    fn advance(&mut self) -> Token<'a> {
        let token = self.current;
        self.current = self.peek;
        self.peek = self.lexer.next_token();
        token
    }

    /// The token `n` positions ahead; `nth(0)` is the current token
    fn nth(&self, n: usize) -> Token<'a> {
        match n {
            0 => self.current,
            1 => self.peek,
            _ => {
                let mut lexer = self.lexer.clone();
                let mut token = self.peek;
                for _ in 1..n {
                    token = lexer.next_token();
                }
                token
            }
        }
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    fn at_word(&self, word: &str) -> bool {
        self.current.is_word(word)
    }

    fn peek_is_word(&self, word: &str) -> bool {
        self.peek.is_word(word)
    }

    fn at_any_word(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.current.is_word(w))
    }

    /// True if the next tokens spell out `words` in order
    fn at_words(&self, words: &[&str]) -> bool {
        words
            .iter()
            .enumerate()
            .all(|(i, word)| self.nth(i).is_word(word))
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_word(&mut self, word: &str) -> bool {
        if self.at_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_words(&mut self, words: &[&str]) -> bool {
        if !self.at_words(words) {
            return false;
        }
        for _ in words {
            self.advance();
        }
        true
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> PResult<Token<'a>> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn expect_word(&mut self, word: &str) -> PResult<Token<'a>> {
        if self.at_word(word) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(word))
        }
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.current.offset)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.current.kind {
            TokenKind::Eof => {
                self.error_here(format!("Expected {expected} but reached end of input"))
            }
            _ => self.error_here(format!(
                "Expected {expected}, found '{}'",
                self.current.literal
            )),
        }
    }

    // ========== Backtracking and nesting ==========

    fn checkpoint(&self) -> Checkpoint<'a> {
        Checkpoint {
            lexer: self.lexer.clone(),
            current: self.current,
            peek: self.peek,
            depth: self.depth,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint<'a>) {
        self.lexer = checkpoint.lexer;
        self.current = checkpoint.current;
        self.peek = checkpoint.peek;
        self.depth = checkpoint.depth;
    }

    /// Run `f` speculatively; on failure rewind and return `None`
    fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> Option<T> {
        let checkpoint = self.checkpoint();
        match f(self) {
            Ok(value) => Some(value),
            Err(err) => {
                trace!(offset = err.offset, "speculative parse rewound");
                self.restore(checkpoint);
                None
            }
        }
    }

    /// Guard a recursive production against runaway nesting
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.options.max_nesting_depth {
            return Err(self.error_here(format!(
                "Maximum nesting depth of {} exceeded",
                self.options.max_nesting_depth
            )));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // ========== Statement boundaries ==========

    fn at_batch_separator(&self) -> bool {
        self.at_word("GO") && !self.peek_is(TokenKind::Colon)
    }

    fn at_statement_start(&self) -> bool {
        STATEMENT_START_WORDS.iter().any(|w| self.current.is_word(w))
    }

    fn at_statement_boundary(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof | TokenKind::Semicolon)
            || self.at_statement_start()
    }

    /// Swallow `;` terminators and `GO [count]` batch separators
    fn skip_separators(&mut self) {
        loop {
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            if self.at_batch_separator() {
                self.advance();
                self.eat(TokenKind::Number);
                continue;
            }
            break;
        }
    }

    /// Skip whatever is left of a statement the grammar only partly covers.
    ///
    /// Stops at end of input, `;`, or a statement-start word outside any
    /// parentheses opened while skipping. Fails instead when tail recovery is
    /// switched off and there is something to skip.
    fn skip_to_end_of_statement(&mut self) -> PResult<()> {
        if self.at_statement_boundary() {
            return Ok(());
        }
        if !self.options.recover_statement_tails {
            return Err(self.unexpected("end of statement"));
        }
        let start = self.current.offset;
        let mut skipped = 0usize;
        let mut parens = 0usize;
        loop {
            match self.current.kind {
                TokenKind::Eof | TokenKind::Semicolon => break,
                _ if parens == 0 && self.at_statement_start() => break,
                TokenKind::LParen => parens += 1,
                TokenKind::RParen => parens = parens.saturating_sub(1),
                _ => {}
            }
            self.advance();
            skipped += 1;
        }
        debug!(offset = start, tokens = skipped, "skipped unrecognized statement tail");
        Ok(())
    }

    /// Statements up to (not including) the point where `is_end` holds
    fn parse_statement_list(
        &mut self,
        is_end: impl Fn(&Self) -> bool,
    ) -> PResult<Vec<Statement>> {
        let mut statements = Vec::new();
        loop {
            while self.eat(TokenKind::Semicolon) {}
            if self.at(TokenKind::Eof) || is_end(self) {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    // ========== Dispatch ==========

    fn parse_statement(&mut self) -> PResult<Statement> {
        trace!(
            offset = self.current.offset,
            token = self.current.literal,
            "dispatching statement"
        );
        self.nested(|p| p.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> PResult<Statement> {
        let token = self.current;
        match token.kind {
            TokenKind::Select | TokenKind::LParen => self.parse_select_statement(None),
            TokenKind::With => self.parse_with_statement(),
            TokenKind::Insert => self.parse_insert_statement(None),
            TokenKind::Update => self.parse_update_statement(None),
            TokenKind::Delete => self.parse_delete_statement(None),
            TokenKind::Truncate => self.parse_truncate_table_statement(),
            TokenKind::Declare => self.parse_declare_statement(),
            TokenKind::Set => self.parse_set_statement(),
            TokenKind::Print => self.parse_print_statement(),
            TokenKind::Raiserror => self.parse_raiserror_statement(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Begin => self.parse_begin_statement(),
            TokenKind::Commit => self.parse_commit_statement(),
            TokenKind::Rollback => self.parse_rollback_statement(),
            TokenKind::Save => self.parse_save_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Break => {
                self.advance();
                Ok(tsql_ast::procedural::BreakStatement {}.into())
            }
            TokenKind::Continue => {
                self.advance();
                Ok(tsql_ast::procedural::ContinueStatement {}.into())
            }
            TokenKind::Goto => self.parse_goto_statement(),
            TokenKind::Waitfor => self.parse_waitfor_statement(),
            TokenKind::Use => self.parse_use_statement(),
            TokenKind::Exec | TokenKind::Execute => self.parse_execute_statement(),
            TokenKind::Revert => self.parse_revert_statement(),
            TokenKind::Open => self.parse_open_statement(),
            TokenKind::Close => self.parse_close_statement(),
            TokenKind::Deallocate => self.parse_deallocate_statement(),
            TokenKind::Fetch => self.parse_fetch_statement(),
            TokenKind::Grant => self.parse_grant_statement(),
            TokenKind::Deny => self.parse_deny_statement(),
            TokenKind::Revoke => self.parse_revoke_statement(),
            TokenKind::Create => self.parse_create_statement(),
            TokenKind::Alter => self.parse_alter_statement(),
            TokenKind::Drop => self.parse_drop_statement(),
            TokenKind::Add => self.parse_add_statement(),
            TokenKind::Ident if token.is_word("THROW") => self.parse_throw_statement(),
            TokenKind::Ident if self.peek_is(TokenKind::Colon) && !token.literal.starts_with('@') => {
                self.parse_label_statement()
            }
            TokenKind::Invalid => Err(self.error_here(format!(
                "Unexpected character '{}'",
                token.literal
            ))),
            TokenKind::Eof => Err(self.unexpected("statement")),
            _ => Err(self.error_here(format!(
                "Unknown statement starting with '{}'",
                token.literal
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_json(source: &str) -> serde_json::Value {
        parse(source).unwrap().to_value().unwrap()
    }

    #[test]
    fn test_empty_script() {
        let script = parse("").unwrap();
        assert!(script.statements.is_empty());
        let script = parse("  ;; GO\n;").unwrap();
        assert!(script.statements.is_empty());
    }

    #[test]
    fn test_go_separates_batches() {
        let script = parse("SELECT 1\nGO\nSELECT 2\nGO 3").unwrap();
        assert_eq!(script.statements.len(), 2);
    }

    #[test]
    fn test_unknown_statement_is_error() {
        let err = parse("FROBNICATE x").unwrap_err();
        assert_eq!(err.offset, 0);
        assert!(err.message.contains("FROBNICATE"));
    }

    #[test]
    fn test_invalid_character_is_error() {
        let err = parse("SELECT 1; ?").unwrap_err();
        assert_eq!(err.offset, 10);
    }

    #[test]
    fn test_label_statement() {
        let json = parse_json("retry: PRINT 'x'");
        assert_eq!(json["Statements"][0]["$type"], "LabelStatement");
        assert_eq!(json["Statements"][0]["Value"], "retry:");
        assert_eq!(json["Statements"][1]["$type"], "PrintStatement");
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("SELECT {}1{}", "(".repeat(100), ")".repeat(100));
        let err = parse(&deep).unwrap_err();
        assert!(err.message.contains("nesting depth"));

        let shallow = format!("SELECT {}1{}", "(".repeat(20), ")".repeat(20));
        assert!(parse(&shallow).is_ok());
        let options = ParserOptions::default().max_nesting_depth(8);
        assert!(parse_with_options(&shallow, &options).is_err());
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = ParserOptions::default().max_nesting_depth(0);
        assert!(parse_with_options("SELECT 1", &options).is_err());
    }

    #[test]
    fn test_nth_lookahead() {
        let parser = Parser::new("a b c d", ParserOptions::default());
        assert_eq!(parser.nth(0).literal, "a");
        assert_eq!(parser.nth(1).literal, "b");
        assert_eq!(parser.nth(3).literal, "d");
        assert_eq!(parser.nth(9).kind, TokenKind::Eof);
    }

    #[test]
    fn test_attempt_rewinds() {
        let mut parser = Parser::new("a b c", ParserOptions::default());
        let result: Option<()> = parser.attempt(|p| {
            p.advance();
            p.advance();
            Err(p.error_here("nope"))
        });
        assert!(result.is_none());
        assert_eq!(parser.current.literal, "a");
        assert_eq!(parser.peek.literal, "b");
    }

    #[test]
    fn test_tail_recovery_and_strict_mode() {
        let source = "ALTER TABLE t REBUILD PARTITION = ALL WITH (DATA_COMPRESSION = PAGE) NONSENSE here SELECT 1";
        let script = parse(source).unwrap();
        assert_eq!(script.statements.len(), 2);

        let err = parse_with_options(source, &ParserOptions::strict()).unwrap_err();
        assert!(err.message.contains("end of statement"));
    }
}
