//! tsqlscript Syntax Tree
//!
//! The closed set of nodes produced by the parser. Every node serializes to a
//! JSON object whose `$type` key names the node and whose other keys are the
//! PascalCase field names; this projection is the public contract.
//!
//! # Node families
//!
//! - `statement` - [`Script`] and the [`Statement`] family
//! - `query` - query expressions, select elements and clauses
//! - `table` - table references, joins and table hints
//! - `expr` / `boolean` - scalar and boolean expressions
//! - `types` - data type references
//! - `table_def` / `options` - shared DDL sub-structures

#[macro_use]
mod macros;

pub mod alter_table;
pub mod boolean;
pub mod broker;
pub mod database;
pub mod dml;
pub mod drop;
pub mod expr;
pub mod external;
pub mod governor;
pub mod literal;
pub mod names;
pub mod options;
pub mod procedural;
pub mod query;
pub mod routine;
pub mod security;
pub mod statement;
pub mod storage;
pub mod table;
pub mod table_def;
pub mod types;

pub use boolean::BooleanExpression;
pub use expr::ScalarExpression;
pub use names::{Identifier, MultiPartIdentifier, QuoteType, SchemaObjectName};
pub use query::QueryExpression;
pub use statement::{Script, Statement};
pub use table::TableReference;
pub use types::DataTypeReference;
