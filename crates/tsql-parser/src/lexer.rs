//! T-SQL lexer using logos
//!
//! Keywords are matched case-insensitively and win over the identifier rule
//! on equal length. Bracketed identifiers, quoted identifiers and string
//! literals are scanned by callbacks so that doubled closing delimiters are
//! kept inside the token and a missing terminator runs to the end of input.

use logos::Logos;

/// Token kinds
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    /// End of input; returned repeatedly once reached
    Eof,

    /// A byte no other rule accepts
    Invalid,

    // Comments (skipped)
    #[regex(r"--[^\n]*", logos::skip)]
    LineComment,

    #[token("/*", skip_block_comment)]
    BlockComment,

    // Identifiers and literals
    #[regex(r"[\p{L}_@#][\p{L}\p{N}_@#$]*")]
    #[regex(r"\$[\p{L}_][\p{L}\p{N}_]*")]
    #[token("[", |lex| scan_delimited(lex, b']'))]
    #[token("\"", |lex| scan_delimited(lex, b'"'))]
    Ident,

    #[regex(r"[0-9]+", scan_number_tail)]
    #[regex(r"\.[0-9]+", scan_exponent)]
    Number,

    #[token("'", |lex| scan_delimited(lex, b'\''))]
    String,

    #[token("N'", |lex| scan_delimited(lex, b'\''), ignore(ascii_case))]
    NationalString,

    #[regex(r"0[xX][0-9a-fA-F]*")]
    BinaryLiteral,

    // Punctuation
    #[token("*")]
    Star,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("::")]
    DoubleColon,

    // Comparison
    #[token("=")]
    Eq,
    #[token("<>")]
    NotEqBrackets,
    #[token("!=")]
    NotEqBang,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("!<")]
    NotLt,
    #[token("!>")]
    NotGt,

    // Arithmetic and bitwise
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("/")]
    Slash,
    #[token("%")]
    Modulo,
    #[token("||")]
    Concat,
    #[token("<<")]
    ShiftLeft,
    #[token(">>")]
    ShiftRight,
    #[token("&")]
    Ampersand,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,

    // Compound assignment
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    ModuloEq,
    #[token("&=")]
    AmpersandEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,

    // Reserved keywords
    #[token("ADD", ignore(ascii_case))]
    Add,
    #[token("ALL", ignore(ascii_case))]
    All,
    #[token("ALTER", ignore(ascii_case))]
    Alter,
    #[token("AND", ignore(ascii_case))]
    And,
    #[token("ANY", ignore(ascii_case))]
    Any,
    #[token("AS", ignore(ascii_case))]
    As,
    #[token("ASC", ignore(ascii_case))]
    Asc,
    #[token("AUTHORIZATION", ignore(ascii_case))]
    Authorization,
    #[token("BACKUP", ignore(ascii_case))]
    Backup,
    #[token("BEGIN", ignore(ascii_case))]
    Begin,
    #[token("BETWEEN", ignore(ascii_case))]
    Between,
    #[token("BREAK", ignore(ascii_case))]
    Break,
    #[token("BROWSE", ignore(ascii_case))]
    Browse,
    #[token("BULK", ignore(ascii_case))]
    Bulk,
    #[token("BY", ignore(ascii_case))]
    By,
    #[token("CASCADE", ignore(ascii_case))]
    Cascade,
    #[token("CASE", ignore(ascii_case))]
    Case,
    #[token("CHECK", ignore(ascii_case))]
    Check,
    #[token("CLOSE", ignore(ascii_case))]
    Close,
    #[token("CLUSTERED", ignore(ascii_case))]
    Clustered,
    #[token("COALESCE", ignore(ascii_case))]
    Coalesce,
    #[token("COLLATE", ignore(ascii_case))]
    Collate,
    #[token("COLUMN", ignore(ascii_case))]
    Column,
    #[token("COMMIT", ignore(ascii_case))]
    Commit,
    #[token("CONSTRAINT", ignore(ascii_case))]
    Constraint,
    #[token("CONTAINS", ignore(ascii_case))]
    Contains,
    #[token("CONTINUE", ignore(ascii_case))]
    Continue,
    #[token("CONVERT", ignore(ascii_case))]
    Convert,
    #[token("CREATE", ignore(ascii_case))]
    Create,
    #[token("CROSS", ignore(ascii_case))]
    Cross,
    #[token("CURRENT", ignore(ascii_case))]
    Current,
    #[token("CURRENT_TIMESTAMP", ignore(ascii_case))]
    CurrentTimestamp,
    #[token("CURRENT_USER", ignore(ascii_case))]
    CurrentUser,
    #[token("CURSOR", ignore(ascii_case))]
    Cursor,
    #[token("DATABASE", ignore(ascii_case))]
    Database,
    #[token("DEALLOCATE", ignore(ascii_case))]
    Deallocate,
    #[token("DECLARE", ignore(ascii_case))]
    Declare,
    #[token("DEFAULT", ignore(ascii_case))]
    Default,
    #[token("DELETE", ignore(ascii_case))]
    Delete,
    #[token("DENY", ignore(ascii_case))]
    Deny,
    #[token("DESC", ignore(ascii_case))]
    Desc,
    #[token("DISTINCT", ignore(ascii_case))]
    Distinct,
    #[token("DISTRIBUTED", ignore(ascii_case))]
    Distributed,
    #[token("DROP", ignore(ascii_case))]
    Drop,
    #[token("ELSE", ignore(ascii_case))]
    Else,
    #[token("END", ignore(ascii_case))]
    End,
    #[token("ESCAPE", ignore(ascii_case))]
    Escape,
    #[token("EXCEPT", ignore(ascii_case))]
    Except,
    #[token("EXEC", ignore(ascii_case))]
    Exec,
    #[token("EXECUTE", ignore(ascii_case))]
    Execute,
    #[token("EXISTS", ignore(ascii_case))]
    Exists,
    #[token("EXTERNAL", ignore(ascii_case))]
    External,
    #[token("FETCH", ignore(ascii_case))]
    Fetch,
    #[token("FILE", ignore(ascii_case))]
    File,
    #[token("FILLFACTOR", ignore(ascii_case))]
    Fillfactor,
    #[token("FOR", ignore(ascii_case))]
    For,
    #[token("FOREIGN", ignore(ascii_case))]
    Foreign,
    #[token("FREETEXT", ignore(ascii_case))]
    Freetext,
    #[token("FROM", ignore(ascii_case))]
    From,
    #[token("FULL", ignore(ascii_case))]
    Full,
    #[token("FUNCTION", ignore(ascii_case))]
    Function,
    #[token("GOTO", ignore(ascii_case))]
    Goto,
    #[token("GRANT", ignore(ascii_case))]
    Grant,
    #[token("GROUP", ignore(ascii_case))]
    Group,
    #[token("HAVING", ignore(ascii_case))]
    Having,
    #[token("HOLDLOCK", ignore(ascii_case))]
    Holdlock,
    #[token("IDENTITY", ignore(ascii_case))]
    Identity,
    #[token("IDENTITY_INSERT", ignore(ascii_case))]
    IdentityInsert,
    #[token("IDENTITYCOL", ignore(ascii_case))]
    Identitycol,
    #[token("IF", ignore(ascii_case))]
    If,
    #[token("IN", ignore(ascii_case))]
    In,
    #[token("INDEX", ignore(ascii_case))]
    Index,
    #[token("INNER", ignore(ascii_case))]
    Inner,
    #[token("INSERT", ignore(ascii_case))]
    Insert,
    #[token("INTERSECT", ignore(ascii_case))]
    Intersect,
    #[token("INTO", ignore(ascii_case))]
    Into,
    #[token("IS", ignore(ascii_case))]
    Is,
    #[token("JOIN", ignore(ascii_case))]
    Join,
    #[token("KEY", ignore(ascii_case))]
    Key,
    #[token("LEFT", ignore(ascii_case))]
    Left,
    #[token("LIKE", ignore(ascii_case))]
    Like,
    #[token("MERGE", ignore(ascii_case))]
    Merge,
    #[token("NOCHECK", ignore(ascii_case))]
    Nocheck,
    #[token("NONCLUSTERED", ignore(ascii_case))]
    Nonclustered,
    #[token("NOT", ignore(ascii_case))]
    Not,
    #[token("NULL", ignore(ascii_case))]
    Null,
    #[token("NULLIF", ignore(ascii_case))]
    Nullif,
    #[token("OF", ignore(ascii_case))]
    Of,
    #[token("OFF", ignore(ascii_case))]
    Off,
    #[token("ON", ignore(ascii_case))]
    On,
    #[token("OPEN", ignore(ascii_case))]
    Open,
    #[token("OPENQUERY", ignore(ascii_case))]
    Openquery,
    #[token("OPENROWSET", ignore(ascii_case))]
    Openrowset,
    #[token("OPTION", ignore(ascii_case))]
    Option,
    #[token("OR", ignore(ascii_case))]
    Or,
    #[token("ORDER", ignore(ascii_case))]
    Order,
    #[token("OUTER", ignore(ascii_case))]
    Outer,
    #[token("OVER", ignore(ascii_case))]
    Over,
    #[token("PERCENT", ignore(ascii_case))]
    Percent,
    #[token("PIVOT", ignore(ascii_case))]
    Pivot,
    #[token("PLAN", ignore(ascii_case))]
    Plan,
    #[token("PRIMARY", ignore(ascii_case))]
    Primary,
    #[token("PRINT", ignore(ascii_case))]
    Print,
    #[token("PROC", ignore(ascii_case))]
    Proc,
    #[token("PROCEDURE", ignore(ascii_case))]
    Procedure,
    #[token("PUBLIC", ignore(ascii_case))]
    Public,
    #[token("RAISERROR", ignore(ascii_case))]
    Raiserror,
    #[token("READ", ignore(ascii_case))]
    Read,
    #[token("REFERENCES", ignore(ascii_case))]
    References,
    #[token("REPLICATION", ignore(ascii_case))]
    Replication,
    #[token("RESTORE", ignore(ascii_case))]
    Restore,
    #[token("RETURN", ignore(ascii_case))]
    Return,
    #[token("REVERT", ignore(ascii_case))]
    Revert,
    #[token("REVOKE", ignore(ascii_case))]
    Revoke,
    #[token("RIGHT", ignore(ascii_case))]
    Right,
    #[token("ROLLBACK", ignore(ascii_case))]
    Rollback,
    #[token("ROWCOUNT", ignore(ascii_case))]
    Rowcount,
    #[token("ROWGUIDCOL", ignore(ascii_case))]
    Rowguidcol,
    #[token("RULE", ignore(ascii_case))]
    Rule,
    #[token("SAVE", ignore(ascii_case))]
    Save,
    #[token("SCHEMA", ignore(ascii_case))]
    Schema,
    #[token("SELECT", ignore(ascii_case))]
    Select,
    #[token("SESSION_USER", ignore(ascii_case))]
    SessionUser,
    #[token("SET", ignore(ascii_case))]
    Set,
    #[token("SOME", ignore(ascii_case))]
    Some,
    #[token("STATISTICS", ignore(ascii_case))]
    Statistics,
    #[token("SYSTEM_USER", ignore(ascii_case))]
    SystemUser,
    #[token("TABLE", ignore(ascii_case))]
    Table,
    #[token("THEN", ignore(ascii_case))]
    Then,
    #[token("TO", ignore(ascii_case))]
    To,
    #[token("TOP", ignore(ascii_case))]
    Top,
    #[token("TRAN", ignore(ascii_case))]
    Tran,
    #[token("TRANSACTION", ignore(ascii_case))]
    Transaction,
    #[token("TRIGGER", ignore(ascii_case))]
    Trigger,
    #[token("TRUNCATE", ignore(ascii_case))]
    Truncate,
    #[token("TRY_CONVERT", ignore(ascii_case))]
    TryConvert,
    #[token("UNION", ignore(ascii_case))]
    Union,
    #[token("UNIQUE", ignore(ascii_case))]
    Unique,
    #[token("UNPIVOT", ignore(ascii_case))]
    Unpivot,
    #[token("UPDATE", ignore(ascii_case))]
    Update,
    #[token("USE", ignore(ascii_case))]
    Use,
    #[token("USER", ignore(ascii_case))]
    User,
    #[token("VALUES", ignore(ascii_case))]
    Values,
    #[token("VARYING", ignore(ascii_case))]
    Varying,
    #[token("VIEW", ignore(ascii_case))]
    View,
    #[token("WAITFOR", ignore(ascii_case))]
    Waitfor,
    #[token("WHEN", ignore(ascii_case))]
    When,
    #[token("WHERE", ignore(ascii_case))]
    Where,
    #[token("WHILE", ignore(ascii_case))]
    While,
    #[token("WITH", ignore(ascii_case))]
    With,

    // Non-reserved words that are still lexed as keywords so the
    // statement parsers can match on them; always valid as names
    #[token("MASTER", ignore(ascii_case))]
    Master,
    #[token("LANGUAGE", ignore(ascii_case))]
    Language,
    #[token("MESSAGE", ignore(ascii_case))]
    Message,
    #[token("CREDENTIAL", ignore(ascii_case))]
    Credential,
    #[token("CERTIFICATE", ignore(ascii_case))]
    Certificate,
    #[token("LOGIN", ignore(ascii_case))]
    Login,
    #[token("SYMMETRIC", ignore(ascii_case))]
    Symmetric,
    #[token("ASYMMETRIC", ignore(ascii_case))]
    Asymmetric,
    #[token("QUERY", ignore(ascii_case))]
    Query,
    #[token("JOB", ignore(ascii_case))]
    Job,
    #[token("STATS", ignore(ascii_case))]
    Stats,
    #[token("PASSWORD", ignore(ascii_case))]
    Password,
    #[token("TIME", ignore(ascii_case))]
    Time,
    #[token("DELAY", ignore(ascii_case))]
    Delay,
    #[token("TYPE", ignore(ascii_case))]
    Type,
}

/// Consume through the closing `close` byte. A doubled `close` is an escape
/// and does not end the token; without a terminator the token runs to the
/// end of input.
fn scan_delimited(lex: &mut logos::Lexer<TokenKind>, close: u8) {
    let rest = lex.remainder().as_bytes();
    let mut i = 0;
    while i < rest.len() {
        if rest[i] == close {
            if rest.get(i + 1) == Some(&close) {
                i += 2;
                continue;
            }
            lex.bump(i + 1);
            return;
        }
        i += 1;
    }
    lex.bump(rest.len());
}

/// Extend an integer prefix with `.digits` and an exponent when present.
fn scan_number_tail(lex: &mut logos::Lexer<TokenKind>) {
    let rest = lex.remainder().as_bytes();
    if rest.first() == Some(&b'.') && rest.get(1).is_some_and(u8::is_ascii_digit) {
        let digits = rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
        lex.bump(1 + digits);
    }
    scan_exponent(lex);
}

/// `E[+|-]digits` after a number; left alone unless digits follow.
fn scan_exponent(lex: &mut logos::Lexer<TokenKind>) {
    let rest = lex.remainder().as_bytes();
    if !matches!(rest.first(), Some(b'e' | b'E')) {
        return;
    }
    let mut start = 1;
    if matches!(rest.get(start), Some(b'+' | b'-')) {
        start += 1;
    }
    let digits = rest[start.min(rest.len())..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits > 0 {
        lex.bump(start + digits);
    }
}

/// Block comments do not nest; the first `*/` ends them.
fn skip_block_comment(lex: &mut logos::Lexer<TokenKind>) -> logos::Skip {
    let rest = lex.remainder();
    let len = rest.find("*/").map_or(rest.len(), |end| end + 2);
    lex.bump(len);
    logos::Skip
}

impl TokenKind {
    /// True for every reserved or non-reserved keyword kind
    pub fn is_keyword(self) -> bool {
        !matches!(
            self,
            TokenKind::Eof
                | TokenKind::Invalid
                | TokenKind::LineComment
                | TokenKind::BlockComment
                | TokenKind::Ident
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::NationalString
                | TokenKind::BinaryLiteral
                | TokenKind::Star
                | TokenKind::Comma
                | TokenKind::Dot
                | TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::LBrace
                | TokenKind::RBrace
                | TokenKind::Semicolon
                | TokenKind::Colon
                | TokenKind::DoubleColon
                | TokenKind::Eq
                | TokenKind::NotEqBrackets
                | TokenKind::NotEqBang
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::LtEq
                | TokenKind::GtEq
                | TokenKind::NotLt
                | TokenKind::NotGt
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Slash
                | TokenKind::Modulo
                | TokenKind::Concat
                | TokenKind::ShiftLeft
                | TokenKind::ShiftRight
                | TokenKind::Ampersand
                | TokenKind::Pipe
                | TokenKind::Caret
                | TokenKind::Tilde
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::ModuloEq
                | TokenKind::AmpersandEq
                | TokenKind::PipeEq
                | TokenKind::CaretEq
        )
    }

    /// Keywords accepted wherever an object or column name is expected
    pub fn is_soft_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Master
                | TokenKind::Key
                | TokenKind::Index
                | TokenKind::Language
                | TokenKind::User
                | TokenKind::Schema
                | TokenKind::Database
                | TokenKind::Table
                | TokenKind::View
                | TokenKind::Procedure
                | TokenKind::Function
                | TokenKind::Trigger
                | TokenKind::Default
                | TokenKind::Message
                | TokenKind::Credential
                | TokenKind::Certificate
                | TokenKind::Login
                | TokenKind::External
                | TokenKind::Symmetric
                | TokenKind::Asymmetric
                | TokenKind::Group
                | TokenKind::Add
                | TokenKind::Grant
                | TokenKind::Revoke
                | TokenKind::Backup
                | TokenKind::Restore
                | TokenKind::Query
                | TokenKind::Job
                | TokenKind::Stats
                | TokenKind::Password
                | TokenKind::Time
                | TokenKind::Delay
                | TokenKind::Type
        )
    }

    /// Identifier or keyword: anything spelled with word characters
    pub fn is_word(self) -> bool {
        self == TokenKind::Ident || self.is_keyword()
    }
}

/// A token with its raw source slice and byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Source text exactly as written (delimiters and case preserved)
    pub literal: &'a str,
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub fn len(&self) -> usize {
        self.literal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literal.is_empty()
    }

    /// True when the token is the undelimited word `word`, ignoring case.
    /// Bracketed and quoted identifiers never match.
    pub fn is_word(&self, word: &str) -> bool {
        self.kind.is_word() && self.literal.eq_ignore_ascii_case(word)
    }

    /// An identifier written with `[...]` or `"..."`
    pub fn is_delimited(&self) -> bool {
        self.kind == TokenKind::Ident && (self.literal.starts_with('[') || self.literal.starts_with('"'))
    }

    /// `@name` (but not `@@name`)
    pub fn is_variable(&self) -> bool {
        self.kind == TokenKind::Ident && self.literal.starts_with('@') && !self.literal.starts_with("@@")
    }
}

/// Pull-based token stream over a source string
#[derive(Clone)]
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
        }
    }

    pub fn source(&self) -> &'a str {
        self.inner.source()
    }

    /// Produce the next token. After the input is exhausted every call
    /// returns an `Eof` token positioned at the end of the source.
    pub fn next_token(&mut self) -> Token<'a> {
        match self.inner.next() {
            Some(result) => Token {
                kind: result.unwrap_or(TokenKind::Invalid),
                literal: self.inner.slice(),
                offset: self.inner.span().start,
            },
            None => {
                let end = self.inner.source().len();
                Token {
                    kind: TokenKind::Eof,
                    literal: "",
                    offset: end,
                }
            }
        }
    }
}

/// Tokenize a whole source, including the final `Eof`
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        tokens.push(token);
        if token.kind == TokenKind::Eof {
            return tokens;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    fn literals(source: &str) -> Vec<&str> {
        tokenize(source).into_iter().map(|t| t.literal).collect()
    }

    #[test]
    fn test_leading_dot_numbers() {
        assert_eq!(literals("SELECT .5, .25e-2, 1.5E3"), vec!["SELECT", ".5", ",", ".25e-2", ",", "1.5E3", ""]);
        assert_eq!(kinds(".5")[0], TokenKind::Number);
        assert_eq!(kinds("a.b")[1], TokenKind::Dot);
        assert_eq!(kinds("a..b")[1..3].to_vec(), vec![TokenKind::Dot, TokenKind::Dot]);
    }

    #[test]
    fn test_non_ascii_case_fold_is_not_a_keyword() {
        assert_eq!(kinds("\u{17f}elect")[0], TokenKind::Ident);
        assert_eq!(kinds("SeLeCt")[0], TokenKind::Select);
    }

    #[test]
    fn test_basic_query() {
        assert_eq!(
            kinds("SELECT a, b FROM t;"),
            vec![
                TokenKind::Select,
                TokenKind::Ident,
                TokenKind::Comma,
                TokenKind::Ident,
                TokenKind::From,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_case_insensitive_keywords() {
        assert_eq!(kinds("select Select SELECT")[..3], [TokenKind::Select; 3]);
        let tokens = tokenize("sElEcT");
        assert_eq!(tokens[0].literal, "sElEcT");
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(kinds("selection")[0], TokenKind::Ident);
        assert_eq!(kinds("INTO_x")[0], TokenKind::Ident);
        assert_eq!(kinds("@select")[0], TokenKind::Ident);
    }

    #[test]
    fn test_bracketed_identifier() {
        let tokens = tokenize("[x]]y] [order]");
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].literal, "[x]]y]");
        assert_eq!(tokens[1].literal, "[order]");
        assert!(tokens[1].is_delimited());
        assert!(!tokens[1].is_word("order"));
    }

    #[test]
    fn test_unterminated_bracket_runs_to_end() {
        let tokens = tokenize("SELECT [abc");
        assert_eq!(tokens[1].literal, "[abc");
        assert_eq!(tokens[2].kind, TokenKind::Eof);
    }

    #[test]
    fn test_strings() {
        let tokens = tokenize("'it''s' N'wide' n'also'");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].literal, "'it''s'");
        assert_eq!(tokens[1].kind, TokenKind::NationalString);
        assert_eq!(tokens[1].literal, "N'wide'");
        assert_eq!(tokens[2].kind, TokenKind::NationalString);
    }

    #[test]
    fn test_unterminated_string() {
        let tokens = tokenize("PRINT 'abc");
        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(tokens[1].literal, "'abc");
    }

    #[test]
    fn test_double_quoted_identifier() {
        let tokens = tokenize("\"a\"\"b\" x");
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].literal, "\"a\"\"b\"");
        assert_eq!(tokens[1].literal, "x");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(literals("1 1.5 1.5E10 2e-3 7.x"), vec!["1", "1.5", "1.5E10", "2e-3", "7", ".", "x", ""]);
        assert_eq!(kinds("0x1F")[0], TokenKind::BinaryLiteral);
        assert_eq!(kinds("0x")[0], TokenKind::BinaryLiteral);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("<> != <= >= !< !> << >> :: || += |= ~ :"),
            vec![
                TokenKind::NotEqBrackets,
                TokenKind::NotEqBang,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::NotLt,
                TokenKind::NotGt,
                TokenKind::ShiftLeft,
                TokenKind::ShiftRight,
                TokenKind::DoubleColon,
                TokenKind::Concat,
                TokenKind::PlusEq,
                TokenKind::PipeEq,
                TokenKind::Tilde,
                TokenKind::Colon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let source = "SELECT -- trailing\n1 /* block\n * comment */ + 2 /* open";
        assert_eq!(literals(source), vec!["SELECT", "1", "+", "2", ""]);
    }

    #[test]
    fn test_variables_and_temp_tables() {
        let tokens = tokenize("@x @@ROWCOUNT #tmp ##global $action");
        assert!(tokens[0].is_variable());
        assert!(!tokens[1].is_variable());
        assert_eq!(tokens[1].literal, "@@ROWCOUNT");
        assert_eq!(tokens[2].literal, "#tmp");
        assert_eq!(tokens[3].literal, "##global");
        assert_eq!(tokens[4].kind, TokenKind::Ident);
    }

    #[test]
    fn test_invalid_byte() {
        let tokens = tokenize("SELECT ?");
        assert_eq!(tokens[1].kind, TokenKind::Invalid);
        assert_eq!(tokens[1].literal, "?");
        assert_eq!(tokens[1].offset, 7);
    }

    #[test]
    fn test_eof_repeats() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
        for _ in 0..3 {
            let token = lexer.next_token();
            assert_eq!(token.kind, TokenKind::Eof);
            assert_eq!(token.offset, 1);
        }
    }

    #[test]
    fn test_soft_keywords_are_keywords() {
        assert!(TokenKind::Type.is_keyword());
        assert!(TokenKind::Type.is_soft_keyword());
        assert!(!TokenKind::Select.is_soft_keyword());
        assert!(!TokenKind::Ident.is_keyword());
        assert!(TokenKind::Ident.is_word());
    }

    proptest! {
        #[test]
        fn tokens_cover_every_non_whitespace_byte(source in "[a-zA-Z0-9_@#'\\[\\]\". ,;()=<>!+*%|&^~\n\t]{0,64}") {
            let tokens = tokenize(&source);
            prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));

            let mut covered = vec![false; source.len()];
            let mut last_end = 0;
            for token in &tokens[..tokens.len() - 1] {
                prop_assert!(!token.is_empty());
                prop_assert!(token.offset >= last_end);
                for flag in &mut covered[token.offset..token.offset + token.len()] {
                    prop_assert!(!*flag);
                    *flag = true;
                }
                last_end = token.offset + token.len();
            }
            for (byte, flag) in source.bytes().zip(covered) {
                prop_assert!(flag || byte.is_ascii_whitespace());
            }
        }

        #[test]
        fn keywords_ignore_ascii_case(
            keyword in prop::sample::select(vec!["select", "from", "where", "between"]),
            upper in prop::collection::vec(any::<bool>(), 7),
        ) {
            let word: String = keyword
                .chars()
                .zip(upper.iter().cycle())
                .map(|(c, &up)| if up { c.to_ascii_uppercase() } else { c })
                .collect();
            let tokens = tokenize(&word);
            prop_assert!(tokens[0].kind.is_keyword(), "{} lexed as {:?}", word, tokens[0].kind);
        }
    }
}
