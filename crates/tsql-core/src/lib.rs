//! tsqlscript Core Library
//!
//! Shared error handling, parser configuration and source-position helpers
//! used by the AST, parser and CLI crates.
//!
//! # Modules
//!
//! - `error` - Error types and result aliases
//! - `config` - Parser options
//! - `position` - Byte offset to line/column conversion

pub mod config;
pub mod error;
pub mod position;

pub use config::ParserOptions;
pub use error::{Error, ParseError, Result};
pub use position::LineIndex;
