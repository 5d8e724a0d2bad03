//! Invariants that hold for whole families of inputs

use proptest::prelude::*;
use serde_json::Value;
use tsqlscript::{ParserOptions, parse, parse_with_options};

fn first_select_expression(source: &str) -> Value {
    let value = parse(source).unwrap().to_value().unwrap();
    value["Statements"][0]["QueryExpression"]["SelectElements"][0]["Expression"].clone()
}

proptest! {
    #[test]
    fn bracketed_identifier_unescapes(left in "[a-z][a-z0-9_ ]{0,8}", right in "[a-z0-9_ ]{0,8}") {
        let source = format!("SELECT [{left}]]{right}] FROM t");
        let expression = first_select_expression(&source);
        let identifier = &expression["MultiPartIdentifier"]["Identifiers"][0];
        let expected = format!("{left}]{right}");
        prop_assert_eq!(identifier["Value"].as_str(), Some(expected.as_str()));
        prop_assert_eq!(identifier["QuoteType"].as_str(), Some("SquareBracket"));
    }

    #[test]
    fn string_literal_unescapes(left in "[a-zA-Z0-9 ]{0,10}", right in "[a-zA-Z0-9 ]{0,10}") {
        let source = format!("SELECT '{left}''{right}'");
        let expression = first_select_expression(&source);
        let expected = format!("{left}'{right}");
        prop_assert_eq!(expression["$type"].as_str(), Some("StringLiteral"));
        prop_assert_eq!(expression["Value"].as_str(), Some(expected.as_str()));
        prop_assert_eq!(expression["IsNational"].as_bool(), Some(false));
    }

    #[test]
    fn national_string_is_flagged(text in "[a-z ]{0,10}") {
        let expression = first_select_expression(&format!("SELECT N'{text}'"));
        prop_assert_eq!(expression["IsNational"].as_bool(), Some(true));
        prop_assert_eq!(expression["Value"].as_str(), Some(text.as_str()));
    }

    #[test]
    fn integer_literals_keep_their_digits(digits in "[0-9]{1,20}") {
        let expression = first_select_expression(&format!("SELECT {digits}"));
        prop_assert_eq!(expression["Value"].as_str(), Some(digits.as_str()));
    }

    #[test]
    fn json_projection_is_stable(columns in prop::collection::vec("[a-z]{1,6}", 1..5), table in "[a-z]{1,6}") {
        let source = format!("SELECT {} FROM [{table}] WHERE 1 = 1", columns.join(", "));
        let script = parse(&source).unwrap();
        let first = script.to_json().unwrap();
        let second = parse(&source).unwrap().to_json().unwrap();
        prop_assert_eq!(&first, &second);

        let reparsed: Value = serde_json::from_str(&first).unwrap();
        prop_assert_eq!(reparsed, script.to_value().unwrap());
    }

    #[test]
    fn parser_never_panics(source in "[a-zA-Z0-9_@#'\\[\\]\". ,;()=<>!+*/%|&^~\n-]{0,80}") {
        let _ = parse(&source);
        let _ = parse_with_options(&source, &ParserOptions::strict());
    }

    #[test]
    fn parser_never_panics_on_keyword_soup(
        words in prop::collection::vec(
            prop::sample::select(vec![
                "SELECT", "FROM", "WHERE", "(", ")", ",", "ALTER", "TABLE", "ADD", "DROP",
                "CREATE", "INDEX", "ON", "WITH", "=", "x", "1", "'s'", "CASE", "WHEN", "END",
                "BEGIN", "IF", "ELSE", "GO", ";", "UNION", "ALL", "ORDER", "BY", "JOIN",
            ]),
            0..40,
        )
    ) {
        let _ = parse(&words.join(" "));
    }
}
