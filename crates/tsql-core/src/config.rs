//! Parser configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Options controlling how a script is parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserOptions {
    /// `SET QUOTED_IDENTIFIER` semantics: double-quoted tokens are identifiers
    /// when true, string literals when false
    pub quoted_identifier: bool,

    /// Maximum nesting of expressions and query expressions
    pub max_nesting_depth: usize,

    /// Skip unrecognized statement tails instead of failing
    pub recover_statement_tails: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            quoted_identifier: true,
            max_nesting_depth: 128,
            recover_statement_tails: true,
        }
    }
}

impl ParserOptions {
    /// Create the default (lenient) configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that turns every skipped tail into an error
    pub fn strict() -> Self {
        Self {
            recover_statement_tails: false,
            ..Default::default()
        }
    }

    /// Builder: set QUOTED_IDENTIFIER
    pub fn quoted_identifier(mut self, on: bool) -> Self {
        self.quoted_identifier = on;
        self
    }

    /// Builder: set the nesting limit
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Builder: enable or disable lenient recovery
    pub fn recover_statement_tails(mut self, on: bool) -> Self {
        self.recover_statement_tails = on;
        self
    }

    /// Reject configurations the parser cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.max_nesting_depth == 0 {
            return Err(Error::Configuration(
                "max_nesting_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ParserOptions::default();
        assert!(options.quoted_identifier);
        assert!(options.recover_statement_tails);
        assert_eq!(options.max_nesting_depth, 128);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let options = ParserOptions::new()
            .quoted_identifier(false)
            .max_nesting_depth(64)
            .recover_statement_tails(false);

        assert!(!options.quoted_identifier);
        assert_eq!(options.max_nesting_depth, 64);
        assert_eq!(options, ParserOptions::strict().quoted_identifier(false).max_nesting_depth(64));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = ParserOptions::new().max_nesting_depth(0).validate().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
