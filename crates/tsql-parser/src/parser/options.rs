//! Option lists and the option-name mapper
//!
//! Every option parser names its node through [`option_kind_name`], so the
//! SNAKE_CASE to PascalCase conversion lives in one place.

use super::{PResult, Parser};
use crate::lexer::TokenKind;
use tsql_ast::Identifier;
use tsql_ast::options::{
    CompressionPartitionRange, DataCompressionOption, FileGroupOrPartitionScheme, FlagOption,
    IdentifierOption, IgnoreDupKeyIndexOption, IndexExpressionOption, IndexOption,
    IndexStateOption, ListOption, LiteralOption, MaxDurationOption, OnOffOption,
    OnlineIndexOption, OptionState, StatementOption,
};

/// Names whose PascalCase form does not follow from splitting on `_`
const OPTION_NAME_OVERRIDES: &[(&str, &str)] = &[
    ("MAXDOP", "MaxDop"),
    ("MAX_DOP", "MaxDop"),
    ("FILLFACTOR", "FillFactor"),
    ("MAXRECURSION", "MaxRecursion"),
    ("QUERYTRACEON", "QueryTraceOn"),
    ("VARDECIMAL_STORAGE_FORMAT", "VarDecimalStorageFormat"),
    (
        "IGNORE_NONCLUSTERED_COLUMNSTORE_INDEX",
        "IgnoreNonClusteredColumnStoreIndex",
    ),
    ("STATISTICS_NORECOMPUTE", "StatisticsNoRecompute"),
    ("SORT_IN_TEMPDB", "SortInTempDB"),
    ("COLUMNSTORE", "ColumnStore"),
    ("COLUMNSTORE_ARCHIVE", "ColumnStoreArchive"),
    ("NOCOUNT", "NoCount"),
    ("NOEXEC", "NoExec"),
    ("ARITHABORT", "ArithAbort"),
    ("ARITHIGNORE", "ArithIgnore"),
    ("FMTONLY", "FmtOnly"),
    ("NUMERIC_ROUNDABORT", "NumericRoundAbort"),
    ("ROWCOUNT", "RowCount"),
    ("TEXTSIZE", "TextSize"),
    ("DATEFIRST", "DateFirst"),
    ("DATEFORMAT", "DateFormat"),
    ("SHOWPLAN_XML", "ShowPlanXml"),
    ("SHOWPLAN_ALL", "ShowPlanAll"),
    ("SHOWPLAN_TEXT", "ShowPlanText"),
    ("FORCEPLAN", "ForcePlan"),
    ("KEEPFIXED_PLAN", "KeepFixedPlan"),
    ("FORCESEEK", "ForceSeek"),
    ("FORCESCAN", "ForceScan"),
    ("SCHEMABINDING", "SchemaBinding"),
    ("MAXSIZE", "MaxSize"),
    ("FILEGROWTH", "FileGrowth"),
    ("FILENAME", "FileName"),
    ("MAXVALUE", "MaxValue"),
    ("MINVALUE", "MinValue"),
    ("NOMAXVALUE", "NoMaxValue"),
    ("NOMINVALUE", "NoMinValue"),
    ("NOCYCLE", "NoCycle"),
    ("NOCACHE", "NoCache"),
    ("NOWAIT", "NoWait"),
    ("SETERROR", "SetError"),
    ("DB_CHAINING", "DBChaining"),
    ("ANSI_NULL_DFLT_ON", "AnsiNullDefaultOn"),
    ("ANSI_NULL_DFLT_OFF", "AnsiNullDefaultOff"),
];

/// Convert a source option name (`PAD_INDEX`, `maxdop`) to its PascalCase
/// tag (`PadIndex`, `MaxDop`)
pub fn option_kind_name(name: &str) -> String {
    let upper = name.to_ascii_uppercase();
    if let Some((_, mapped)) = OPTION_NAME_OVERRIDES.iter().find(|(from, _)| *from == upper) {
        return (*mapped).to_string();
    }
    upper
        .split(|c: char| c == '_' || c == ' ')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect()
}

/// Trailing units accepted after a literal option value
const OPTION_UNITS: &[&str] = &[
    "MINUTES", "MINUTE", "HOURS", "HOUR", "DAYS", "DAY", "WEEKS", "WEEK", "MONTHS", "MONTH",
    "YEARS", "YEAR", "SECONDS", "KB", "MB", "GB", "TB", "PERCENT",
];

impl<'a> Parser<'a> {
    pub(crate) fn at_on_off(&self) -> bool {
        matches!(self.current.kind, TokenKind::On | TokenKind::Off)
    }

    /// `ON` or `OFF`
    pub(crate) fn parse_option_state(&mut self) -> PResult<OptionState> {
        match OptionState::from_word(self.current.literal) {
            Some(state) if self.at_on_off() => {
                self.advance();
                Ok(state)
            }
            _ => Err(self.unexpected("ON or OFF")),
        }
    }

    /// `(option, ...)`; the cursor is on `(`
    pub(crate) fn parse_statement_option_list(&mut self) -> PResult<Vec<StatementOption>> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut options = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                options.push(self.parse_statement_option()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(options)
    }

    /// Optional `WITH (option, ...)`
    pub(crate) fn parse_optional_with_options(&mut self) -> PResult<Vec<StatementOption>> {
        if self.at(TokenKind::With) && self.peek_is(TokenKind::LParen) {
            self.advance();
            self.parse_statement_option_list()
        } else {
            Ok(Vec::new())
        }
    }

    /// One generic option: `NAME = ON|OFF [(...)]`, `NAME = value [unit]`,
    /// `NAME = word`, `NAME [=] (...)`, `NAME ON|OFF` or a bare `NAME`
    pub(crate) fn parse_statement_option(&mut self) -> PResult<StatementOption> {
        let name = self.parse_word()?;
        let option_kind = option_kind_name(&name.value);
        let explicit = self.eat(TokenKind::Eq);

        if self.at_on_off() {
            let option_state = self.parse_option_state()?;
            let options = if self.at(TokenKind::LParen) {
                self.parse_statement_option_list()?
            } else {
                Vec::new()
            };
            return Ok(OnOffOption {
                option_kind,
                option_state,
                options,
            }
            .into());
        }
        if self.at(TokenKind::LParen) {
            let options = self.parse_statement_option_list()?;
            return Ok(ListOption {
                option_kind,
                options,
            }
            .into());
        }
        if !explicit {
            return Ok(FlagOption { option_kind }.into());
        }

        let is_value = matches!(
            self.current.kind,
            TokenKind::Number
                | TokenKind::String
                | TokenKind::NationalString
                | TokenKind::BinaryLiteral
                | TokenKind::Minus
                | TokenKind::Plus
                | TokenKind::Null
        ) || self.at_variable();
        if is_value {
            let value = self.parse_unary_expression()?;
            let unit = if OPTION_UNITS.iter().any(|u| self.at_word(u)) || self.at(TokenKind::Modulo) {
                Some(Identifier::from_lexeme(self.advance().literal))
            } else {
                None
            };
            return Ok(LiteralOption {
                option_kind,
                value,
                unit,
            }
            .into());
        }

        let value = self.parse_option_word_value()?;
        Ok(IdentifierOption { option_kind, value }.into())
    }

    /// A word-valued option; dotted names collapse into one identifier
    fn parse_option_word_value(&mut self) -> PResult<Identifier> {
        let mut value = self.parse_word()?;
        while self.at(TokenKind::Dot) && self.peek.kind.is_word() {
            self.advance();
            let part = self.parse_word()?;
            value = Identifier::new(format!("{}.{}", value.value, part.value));
        }
        Ok(value)
    }

    // ========== Index options ==========

    /// `WITH (option, ...)` or the legacy `WITH option, ...` after an index or
    /// constraint. Returns nothing when no WITH follows.
    pub(crate) fn parse_optional_index_options(&mut self) -> PResult<Vec<IndexOption>> {
        if !self.at(TokenKind::With) {
            return Ok(Vec::new());
        }
        if self.peek_is(TokenKind::LParen) {
            self.advance();
            return self.parse_index_option_list();
        }
        let legacy = matches!(self.peek.kind, TokenKind::Fillfactor)
            || self.peek_is_word("PAD_INDEX")
            || self.peek_is_word("IGNORE_DUP_KEY")
            || self.peek_is_word("DROP_EXISTING")
            || self.peek_is_word("STATISTICS_NORECOMPUTE")
            || self.peek_is_word("SORT_IN_TEMPDB");
        if !legacy {
            return Ok(Vec::new());
        }
        self.advance();
        let mut options = vec![self.parse_index_option()?];
        while self.at(TokenKind::Comma) && self.peek.kind.is_word() {
            self.advance();
            options.push(self.parse_index_option()?);
        }
        Ok(options)
    }

    /// `(option, ...)`; the cursor is on `(`
    pub(crate) fn parse_index_option_list(&mut self) -> PResult<Vec<IndexOption>> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut options = Vec::new();
        loop {
            options.push(self.parse_index_option()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(options)
    }

    pub(crate) fn parse_index_option(&mut self) -> PResult<IndexOption> {
        let name = self.parse_word()?;
        let option_kind = option_kind_name(&name.value);
        if !self.eat(TokenKind::Eq) {
            // legacy flag form: `WITH PAD_INDEX`
            return Ok(IndexStateOption {
                option_kind,
                option_state: OptionState::On,
            }
            .into());
        }

        if name.is_word("DATA_COMPRESSION") || name.is_word("XML_COMPRESSION") {
            let level = self.parse_word()?;
            let partition_ranges = if self.at(TokenKind::On) && self.peek_is_word("PARTITIONS") {
                self.advance();
                self.advance();
                self.parse_partition_ranges()?
            } else {
                Vec::new()
            };
            return Ok(DataCompressionOption {
                option_kind,
                compression_level: option_kind_name(&level.value),
                partition_ranges,
            }
            .into());
        }

        if name.is_word("MAX_DURATION") {
            let max_duration = self.parse_unary_expression()?;
            let unit = if self.at_word("MINUTES") {
                Some(option_kind_name(self.advance().literal))
            } else {
                None
            };
            return Ok(MaxDurationOption {
                option_kind,
                max_duration,
                unit,
            }
            .into());
        }

        if self.at_on_off() {
            let option_state = self.parse_option_state()?;
            if name.is_word("ONLINE") {
                let low_priority_lock_wait_options = if self.at(TokenKind::LParen) {
                    self.parse_statement_option_list()?
                } else {
                    Vec::new()
                };
                return Ok(OnlineIndexOption {
                    option_kind,
                    option_state,
                    low_priority_lock_wait_options,
                }
                .into());
            }
            if name.is_word("IGNORE_DUP_KEY") {
                let suppress_messages_option = if self.at(TokenKind::LParen) {
                    self.advance();
                    self.expect_word("SUPPRESS_MESSAGES")?;
                    self.expect(TokenKind::Eq, "'='")?;
                    let state = self.parse_option_state()?;
                    self.expect(TokenKind::RParen, "')'")?;
                    Some(state == OptionState::On)
                } else {
                    None
                };
                return Ok(IgnoreDupKeyIndexOption {
                    option_kind,
                    option_state,
                    suppress_messages_option,
                }
                .into());
            }
            return Ok(IndexStateOption {
                option_kind,
                option_state,
            }
            .into());
        }

        let expression = self.parse_scalar_expression()?;
        Ok(IndexExpressionOption {
            option_kind,
            expression,
        }
        .into())
    }

    /// `(1, 3 TO 5)`
    pub(crate) fn parse_partition_ranges(&mut self) -> PResult<Vec<CompressionPartitionRange>> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut ranges = Vec::new();
        loop {
            let from = self.parse_unary_expression()?;
            let to = if self.eat(TokenKind::To) {
                Some(self.parse_unary_expression()?)
            } else {
                None
            };
            ranges.push(CompressionPartitionRange { from, to });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(ranges)
    }

    /// Optional `ON filegroup | ON scheme(column) | ON "default"`
    pub(crate) fn parse_optional_file_group(
        &mut self,
    ) -> PResult<Option<FileGroupOrPartitionScheme>> {
        if !self.at(TokenKind::On) {
            return Ok(None);
        }
        self.advance();
        self.parse_file_group_or_partition_scheme().map(Some)
    }

    pub(crate) fn parse_file_group_or_partition_scheme(
        &mut self,
    ) -> PResult<FileGroupOrPartitionScheme> {
        let name = self.parse_identifier_or_value()?;
        let partition_scheme_columns = if self.at(TokenKind::LParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            Vec::new()
        };
        Ok(FileGroupOrPartitionScheme {
            name,
            partition_scheme_columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tsql_core::ParserOptions;

    fn parser(source: &str) -> Parser<'_> {
        Parser::new(source, ParserOptions::default())
    }

    #[test]
    fn test_option_kind_name() {
        assert_eq!(option_kind_name("PAD_INDEX"), "PadIndex");
        assert_eq!(option_kind_name("maxdop"), "MaxDop");
        assert_eq!(option_kind_name("FILLFACTOR"), "FillFactor");
        assert_eq!(option_kind_name("VARDECIMAL_STORAGE_FORMAT"), "VarDecimalStorageFormat");
        assert_eq!(
            option_kind_name("IGNORE_NONCLUSTERED_COLUMNSTORE_INDEX"),
            "IgnoreNonClusteredColumnStoreIndex"
        );
        assert_eq!(option_kind_name("RECOMPILE"), "Recompile");
        assert_eq!(option_kind_name("HASH_JOIN"), "HashJoin");
    }

    #[test]
    fn test_statement_option_shapes() {
        let mut p = parser("(LOCK_ESCALATION = AUTO, SYSTEM_VERSIONING = ON (HISTORY_TABLE = dbo.h), RETENTION = 6 MONTHS, SCHEMABINDING)");
        let options = serde_json::to_value(p.parse_statement_option_list().unwrap()).unwrap();
        assert_eq!(options[0]["$type"], "IdentifierOption");
        assert_eq!(options[0]["Value"]["Value"], "AUTO");
        assert_eq!(options[1]["$type"], "OnOffOption");
        assert_eq!(options[1]["OptionState"], "On");
        assert_eq!(options[1]["Options"][0]["Value"]["Value"], "dbo.h");
        assert_eq!(options[2]["Unit"]["Value"], "MONTHS");
        assert_eq!(options[3]["$type"], "FlagOption");
        assert_eq!(options[3]["OptionKind"], "SchemaBinding");
    }

    #[test]
    fn test_index_option_shapes() {
        let mut p = parser(
            "WITH (PAD_INDEX = ON, FILLFACTOR = 80, DATA_COMPRESSION = PAGE ON PARTITIONS (1, 3 TO 5), \
             ONLINE = ON (WAIT_AT_LOW_PRIORITY (MAX_DURATION = 1 MINUTES)), MAX_DURATION = 10 MINUTES, \
             IGNORE_DUP_KEY = ON (SUPPRESS_MESSAGES = OFF))",
        );
        let options = serde_json::to_value(p.parse_optional_index_options().unwrap()).unwrap();
        assert_eq!(options[0]["$type"], "IndexStateOption");
        assert_eq!(options[1]["OptionKind"], "FillFactor");
        assert_eq!(options[2]["CompressionLevel"], "Page");
        assert_eq!(options[2]["PartitionRanges"][1]["To"]["Value"], "5");
        assert_eq!(options[3]["$type"], "OnlineIndexOption");
        assert_eq!(options[4]["Unit"], "Minutes");
        assert_eq!(options[5]["SuppressMessagesOption"], false);
    }

    #[test]
    fn test_legacy_index_options() {
        let mut p = parser("WITH FILLFACTOR = 70, PAD_INDEX");
        let options = p.parse_optional_index_options().unwrap();
        assert_eq!(options.len(), 2);
        let mut p = parser("WITH CHECK");
        assert!(p.parse_optional_index_options().unwrap().is_empty());
        assert_eq!(p.current.kind, TokenKind::With);
    }

    #[test]
    fn test_file_group_forms() {
        let mut p = parser("ON ps_date(created)");
        let value = serde_json::to_value(p.parse_optional_file_group().unwrap()).unwrap();
        assert_eq!(value["Name"]["Value"], "ps_date");
        assert_eq!(value["PartitionSchemeColumns"][0]["Value"], "created");

        let mut p = parser("ON [PRIMARY]");
        let value = serde_json::to_value(p.parse_optional_file_group().unwrap()).unwrap();
        assert_eq!(value["Name"]["Value"], "PRIMARY");
        assert_eq!(value["PartitionSchemeColumns"], Value::Array(Vec::new()));
    }
}
