//! Option lists shared by DDL statements
//!
//! Option names are stored in PascalCase (`MAXDOP` becomes `MaxDop`); the
//! parser converts them through a single mapping function.

use crate::expr::ScalarExpression;
use crate::names::{Identifier, IdentifierOrValueExpression};
use serde::Serialize;

/// Canonical form of an `ON` / `OFF` switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptionState {
    NotSet,
    On,
    Off,
}

impl OptionState {
    pub fn from_word(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("ON") {
            Some(Self::On)
        } else if word.eq_ignore_ascii_case("OFF") {
            Some(Self::Off)
        } else {
            None
        }
    }
}

node_enum! {
    /// One entry of a generic `WITH (...)` / `SET ...` option list
    pub enum StatementOption {
        OnOffOption,
        LiteralOption,
        IdentifierOption,
        ListOption,
        FlagOption,
    }
}

impl StatementOption {
    pub fn option_kind(&self) -> &str {
        match self {
            StatementOption::OnOffOption(o) => &o.option_kind,
            StatementOption::LiteralOption(o) => &o.option_kind,
            StatementOption::IdentifierOption(o) => &o.option_kind,
            StatementOption::ListOption(o) => &o.option_kind,
            StatementOption::FlagOption(o) => &o.option_kind,
        }
    }
}

/// `NAME = ON|OFF [(sub-options)]` or `NAME ON|OFF`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct OnOffOption {
    pub option_kind: String,
    pub option_state: OptionState,
    pub options: Vec<StatementOption>,
}

/// `NAME = value [unit]`, e.g. `HISTORY_RETENTION_PERIOD = 6 MONTHS`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct LiteralOption {
    pub option_kind: String,
    pub value: ScalarExpression,
    pub unit: Option<Identifier>,
}

/// `NAME = word` or `NAME word`, e.g. `LOCK_ESCALATION = TABLE`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct IdentifierOption {
    pub option_kind: String,
    pub value: Identifier,
}

/// `NAME [=] (sub-option, ...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct ListOption {
    pub option_kind: String,
    pub options: Vec<StatementOption>,
}

/// A bare keyword such as `SCHEMABINDING`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct FlagOption {
    pub option_kind: String,
}

node_enum! {
    /// One entry of an index `WITH (...)` clause
    pub enum IndexOption {
        IndexStateOption,
        IndexExpressionOption,
        DataCompressionOption,
        OnlineIndexOption,
        MaxDurationOption,
        IgnoreDupKeyIndexOption,
    }
}

/// `PAD_INDEX = ON`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct IndexStateOption {
    pub option_kind: String,
    pub option_state: OptionState,
}

/// `FILLFACTOR = 80`, `MAXDOP = 4`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct IndexExpressionOption {
    pub option_kind: String,
    pub expression: ScalarExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct CompressionPartitionRange {
    pub from: ScalarExpression,
    pub to: Option<ScalarExpression>,
}

/// `DATA_COMPRESSION = PAGE [ON PARTITIONS (1, 3 TO 5)]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct DataCompressionOption {
    pub option_kind: String,
    pub compression_level: String,
    pub partition_ranges: Vec<CompressionPartitionRange>,
}

/// `ONLINE = ON [(WAIT_AT_LOW_PRIORITY (...))]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct OnlineIndexOption {
    pub option_kind: String,
    pub option_state: OptionState,
    pub low_priority_lock_wait_options: Vec<StatementOption>,
}

/// `MAX_DURATION = 10 [MINUTES]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct MaxDurationOption {
    pub option_kind: String,
    pub max_duration: ScalarExpression,
    pub unit: Option<String>,
}

/// `IGNORE_DUP_KEY = ON [(SUPPRESS_MESSAGES = ON)]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct IgnoreDupKeyIndexOption {
    pub option_kind: String,
    pub option_state: OptionState,
    pub suppress_messages_option: Option<bool>,
}

/// `ON filegroup`, `ON scheme(column)` or `ON "default"`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct FileGroupOrPartitionScheme {
    pub name: IdentifierOrValueExpression,
    pub partition_scheme_columns: Vec<Identifier>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::IntegerLiteral;

    #[test]
    fn test_option_state_words() {
        assert_eq!(OptionState::from_word("on"), Some(OptionState::On));
        assert_eq!(OptionState::from_word("OFF"), Some(OptionState::Off));
        assert_eq!(OptionState::from_word("PAGE"), None);
    }

    #[test]
    fn test_index_expression_option_shape() {
        let option: IndexOption = IndexExpressionOption {
            option_kind: "MaxDop".to_string(),
            expression: IntegerLiteral::new("4").into(),
        }
        .into();
        let json = serde_json::to_value(&option).unwrap();
        assert_eq!(json["$type"], "IndexExpressionOption");
        assert_eq!(json["OptionKind"], "MaxDop");
        assert_eq!(json["Expression"]["Value"], "4");
    }
}
