//! tsqlparse: parse a T-SQL script and print its syntax tree as JSON
//!
//! ```bash
//! tsqlparse schema.sql --pretty
//! cat batch.sql | tsqlparse --strict
//! ```
//!
//! The JSON goes to stdout. A parse failure is reported on stderr as
//! `path:line:column: message` and the process exits with status 1; I/O and
//! serialization failures exit with status 2.

use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use tsql_core::{Error, LineIndex, ParserOptions};

#[derive(Parser, Debug)]
#[command(name = "tsqlparse")]
#[command(about = "Parse a T-SQL script and print its syntax tree as JSON")]
#[command(version)]
struct Args {
    /// SQL file to parse; reads stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Fail on statement tails the parser would otherwise skip
    #[arg(long)]
    strict: bool,

    /// Treat double-quoted tokens as string literals (`SET QUOTED_IDENTIFIER OFF`)
    #[arg(long)]
    no_quoted_identifier: bool,

    /// Maximum expression and query nesting depth
    #[arg(long, default_value_t = 128)]
    max_nesting_depth: usize,

    /// Log filter used when RUST_LOG is not set (e.g. `debug`, `tsql_parser=trace`)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn parser_options(&self) -> ParserOptions {
        let options = if self.strict {
            ParserOptions::strict()
        } else {
            ParserOptions::default()
        };
        options
            .quoted_identifier(!self.no_quoted_identifier)
            .max_nesting_depth(self.max_nesting_depth)
    }

    fn display_name(&self) -> String {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => path.display().to_string(),
            _ => "<stdin>".to_string(),
        }
    }
}

fn read_source(input: Option<&PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;
            Ok(source)
        }
    }
}

/// Parse `source` and render the script JSON
fn render(source: &str, options: &ParserOptions, pretty: bool) -> tsql_core::Result<String> {
    let script = tsql_parser::parse_with_options(source, options)?;
    debug!(statements = script.statements.len(), "parsed script");
    if pretty {
        script.to_json_pretty()
    } else {
        script.to_json()
    }
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let source = read_source(args.input.as_ref())?;
    match render(&source, &args.parser_options(), args.pretty) {
        Ok(json) => {
            println!("{json}");
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::Parse(err)) => {
            let index = LineIndex::new(&source);
            eprintln!("{}:{}", args.display_name(), err.with_position(&index));
            Ok(ExitCode::from(1))
        }
        Err(err) => Err(err.into()),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["tsqlparse"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_default_flags() {
        let args = args(&[]);
        let options = args.parser_options();
        assert!(options.recover_statement_tails);
        assert!(options.quoted_identifier);
        assert_eq!(options.max_nesting_depth, 128);
        assert_eq!(args.display_name(), "<stdin>");
    }

    #[test]
    fn test_flags_map_onto_options() {
        let args = args(&["--strict", "--no-quoted-identifier", "--max-nesting-depth", "16", "x.sql"]);
        let options = args.parser_options();
        assert!(!options.recover_statement_tails);
        assert!(!options.quoted_identifier);
        assert_eq!(options.max_nesting_depth, 16);
        assert_eq!(args.display_name(), "x.sql");
    }

    #[test]
    fn test_render_compact_and_pretty() {
        let options = ParserOptions::default();
        let compact = render("SELECT 1", &options, false).unwrap();
        assert!(!compact.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(value["Statements"][0]["$type"], "SelectStatement");

        let pretty = render("SELECT 1", &options, true).unwrap();
        assert!(pretty.contains('\n'));
    }

    #[test]
    fn test_render_reports_parse_errors() {
        let err = render("FROBNICATE x", &ParserOptions::default(), false).unwrap_err();
        assert!(err.is_parse_error());
        assert!(err.offset().is_some());
    }

    #[test]
    fn test_read_source_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "SELECT a FROM t\nGO\nSELECT 2").unwrap();
        let path = file.path().to_path_buf();
        let source = read_source(Some(&path)).unwrap();
        assert!(source.contains("GO"));

        let json = render(&source, &ParserOptions::default(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["Statements"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let path = PathBuf::from("/definitely/not/here.sql");
        let err = read_source(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("here.sql"));
    }
}
