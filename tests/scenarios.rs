//! End-to-end scenarios: literal scripts in, JSON projections out

use serde_json::Value;
use tsqlscript::{ParserOptions, parse, parse_with_options};

fn statements(source: &str) -> Vec<Value> {
    let script = parse(source).unwrap();
    let json = script.to_json().unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["$type"], "Script");
    value["Statements"].as_array().unwrap().clone()
}

fn only_statement(source: &str) -> Value {
    let mut statements = statements(source);
    assert_eq!(statements.len(), 1, "expected one statement in {source}");
    statements.remove(0)
}

fn query_of(source: &str) -> Value {
    let statement = only_statement(source);
    assert_eq!(statement["$type"], "SelectStatement");
    statement["QueryExpression"].clone()
}

#[test]
fn test_select_literal() {
    let query = query_of("SELECT 1;");
    assert_eq!(query["$type"], "QuerySpecification");
    let element = &query["SelectElements"][0];
    assert_eq!(element["$type"], "SelectScalarExpression");
    assert_eq!(element["Expression"]["$type"], "IntegerLiteral");
    assert_eq!(element["Expression"]["LiteralType"], "Integer");
    assert_eq!(element["Expression"]["Value"], "1");
    assert_eq!(element["ColumnName"], Value::Null);
}

#[test]
fn test_select_with_inner_join() {
    let query = query_of("SELECT a.* , b.c AS x FROM t1 AS a INNER JOIN t2 AS b ON a.id = b.id;");

    let star = &query["SelectElements"][0];
    assert_eq!(star["$type"], "SelectStarExpression");
    assert_eq!(star["Qualifier"]["Identifiers"][0]["Value"], "a");

    let column = &query["SelectElements"][1];
    assert_eq!(column["Expression"]["$type"], "ColumnReferenceExpression");
    assert_eq!(column["Expression"]["MultiPartIdentifier"]["Count"], 2);
    assert_eq!(column["ColumnName"]["Value"], "x");

    let join = &query["FromClause"]["TableReferences"][0];
    assert_eq!(join["$type"], "QualifiedJoin");
    assert_eq!(join["QualifiedJoinType"], "Inner");
    assert_eq!(join["FirstTableReference"]["$type"], "NamedTableReference");
    assert_eq!(join["FirstTableReference"]["SchemaObject"]["BaseIdentifier"]["Value"], "t1");
    assert_eq!(join["FirstTableReference"]["Alias"]["Value"], "a");
    assert_eq!(join["SecondTableReference"]["Alias"]["Value"], "b");

    let condition = &join["SearchCondition"];
    assert_eq!(condition["$type"], "BooleanComparisonExpression");
    assert_eq!(condition["ComparisonType"], "Equals");
    assert_eq!(
        condition["FirstExpression"]["MultiPartIdentifier"]["Identifiers"][1]["Value"],
        "id"
    );
}

#[test]
fn test_where_between_or_in_subquery() {
    let query = query_of("SELECT x FROM t WHERE x BETWEEN 1 AND 10 OR y IN (SELECT z FROM u);");
    let condition = &query["WhereClause"]["SearchCondition"];
    assert_eq!(condition["$type"], "BooleanBinaryExpression");
    assert_eq!(condition["BinaryExpressionType"], "Or");

    let between = &condition["FirstExpression"];
    assert_eq!(between["$type"], "BooleanTernaryExpression");
    assert_eq!(between["TernaryExpressionType"], "Between");
    assert_eq!(between["SecondExpression"]["Value"], "1");
    assert_eq!(between["ThirdExpression"]["Value"], "10");

    let in_predicate = &condition["SecondExpression"];
    assert_eq!(in_predicate["$type"], "InPredicate");
    assert_eq!(in_predicate["NotDefined"], false);
    assert_eq!(in_predicate["Subquery"]["$type"], "QuerySpecification");
    assert!(in_predicate["Values"].as_array().unwrap().is_empty());
}

#[test]
fn test_union_all_with_order_by() {
    let query = query_of("SELECT x FROM t UNION ALL SELECT x FROM u ORDER BY x DESC;");
    assert_eq!(query["$type"], "BinaryQueryExpression");
    assert_eq!(query["BinaryQueryExpressionType"], "Union");
    assert_eq!(query["All"], true);
    let element = &query["OrderByClause"]["OrderByElements"][0];
    assert_eq!(element["SortOrder"], "Descending");
    assert_eq!(query["SecondQueryExpression"]["OrderByClause"], Value::Null);
}

#[test]
fn test_drop_table_if_exists() {
    let statement = only_statement("DROP TABLE IF EXISTS [dbo].[t1], [dbo].[t2];");
    assert_eq!(statement["$type"], "DropTableStatement");
    assert_eq!(statement["IsIfExists"], true);
    let objects = statement["Objects"].as_array().unwrap();
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0]["SchemaIdentifier"]["Value"], "dbo");
    assert_eq!(objects[0]["SchemaIdentifier"]["QuoteType"], "SquareBracket");
    assert_eq!(objects[1]["BaseIdentifier"]["Value"], "t2");
}

#[test]
fn test_alter_table_add_primary_key() {
    let statement =
        only_statement("ALTER TABLE t ADD CONSTRAINT pk PRIMARY KEY CLUSTERED (id ASC) WITH (MAXDOP = 4);");
    assert_eq!(statement["$type"], "AlterTableAddTableElementStatement");
    let constraint = &statement["Definition"]["TableConstraints"][0];
    assert_eq!(constraint["$type"], "UniqueConstraintDefinition");
    assert_eq!(constraint["ConstraintIdentifier"]["Value"], "pk");
    assert_eq!(constraint["IsPrimaryKey"], true);
    assert_eq!(constraint["Clustered"], true);
    assert_eq!(constraint["Columns"][0]["SortOrder"], "Ascending");
    let option = &constraint["IndexOptions"][0];
    assert_eq!(option["OptionKind"], "MaxDop");
    assert_eq!(option["Expression"]["Value"], "4");
}

#[test]
fn test_dot_sequence_preserved() {
    let query = query_of("SELECT * FROM a..b.c");
    let name = &query["FromClause"]["TableReferences"][0]["SchemaObject"];
    assert_eq!(name["Count"], 4);
    let values: Vec<&str> = name["Identifiers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|id| id["Value"].as_str().unwrap())
        .collect();
    assert_eq!(values, vec!["a", "", "b", "c"]);
}

#[test]
fn test_operator_precedence() {
    let expr = |source: &str| query_of(source)["SelectElements"][0]["Expression"].clone();

    let value = expr("SELECT a + b * c");
    assert_eq!(value["BinaryExpressionType"], "Add");
    assert_eq!(value["SecondExpression"]["BinaryExpressionType"], "Multiply");

    let value = expr("SELECT a * b + c");
    assert_eq!(value["BinaryExpressionType"], "Add");
    assert_eq!(value["FirstExpression"]["BinaryExpressionType"], "Multiply");

    let value = expr("SELECT a || b + c");
    assert_eq!(value["BinaryExpressionType"], "Add");
    assert_eq!(value["FirstExpression"]["BinaryExpressionType"], "Concat");
}

#[test]
fn test_order_by_placement() {
    let query = query_of("SELECT x FROM t UNION SELECT x FROM u ORDER BY x");
    assert_eq!(query["$type"], "BinaryQueryExpression");
    assert!(query["OrderByClause"].is_object());
    assert_eq!(query["FirstQueryExpression"]["OrderByClause"], Value::Null);

    let query = query_of("SELECT x FROM t ORDER BY x");
    assert_eq!(query["$type"], "QuerySpecification");
    assert!(query["OrderByClause"].is_object());
}

#[test]
fn test_qualified_star() {
    let query = query_of("SELECT d.* FROM d");
    let elements = query["SelectElements"].as_array().unwrap();
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0]["$type"], "SelectStarExpression");
    assert_eq!(elements[0]["Qualifier"]["Count"], 1);
    assert_eq!(elements[0]["Qualifier"]["Identifiers"][0]["Value"], "d");
}

#[test]
fn test_case_forms_are_distinct() {
    let simple = query_of("SELECT CASE x WHEN 1 THEN 'a' ELSE 'b' END");
    assert_eq!(simple["SelectElements"][0]["Expression"]["$type"], "SimpleCaseExpression");

    let searched = query_of("SELECT CASE WHEN x = 1 THEN 'a' END");
    assert_eq!(searched["SelectElements"][0]["Expression"]["$type"], "SearchedCaseExpression");

    assert!(parse("SELECT CASE x WHEN 1 THEN 'a'").is_err());
    assert!(parse("SELECT CASE WHEN x = 1 THEN 'a'").is_err());
}

#[test]
fn test_alter_table_garbage_tail_recovers() {
    let prefixes = [
        "ALTER TABLE t ADD c INT",
        "ALTER TABLE t DROP COLUMN c",
        "ALTER TABLE t ALTER COLUMN c INT",
        "ALTER TABLE t",
    ];
    for prefix in prefixes {
        let source = format!("{prefix} %% ?? garbage ,, here; SELECT 1");
        let statements = statements(&source);
        assert_eq!(statements.len(), 2, "{source}");
        let kind = statements[0]["$type"].as_str().unwrap();
        assert!(kind.starts_with("AlterTable"), "{source} gave {kind}");
        assert_eq!(statements[1]["$type"], "SelectStatement");
    }
}

#[test]
fn test_alter_table_verb_with_garbage_yields_placeholder() {
    for verb in ["ADD", "DROP", "ALTER", "SET"] {
        for garbage in ["%% ?? junk", "IF nonsense here", ""] {
            let source = format!("ALTER TABLE dbo.t {verb} {garbage}; SELECT 1");
            let statements = statements(&source);
            assert_eq!(statements.len(), 2, "{source}");
            assert_eq!(statements[0]["$type"], "AlterTableSetStatement", "{source}");
            assert_eq!(statements[0]["SchemaObjectName"]["BaseIdentifier"]["Value"], "t");
            assert_eq!(statements[0]["Options"], serde_json::json!([]), "{source}");
            assert_eq!(statements[1]["$type"], "SelectStatement", "{source}");
        }
    }
}

#[test]
fn test_strict_mode_rejects_garbage_tail() {
    let source = "ALTER TABLE t DROP COLUMN c garbage here";
    assert!(parse(source).is_ok());
    let err = parse_with_options(source, &ParserOptions::strict()).unwrap_err();
    assert!(err.offset > 0);
}

#[test]
fn test_batches_and_mixed_statements() {
    let source = "\
        CREATE TABLE dbo.orders (id INT IDENTITY(1, 1) PRIMARY KEY, total MONEY NOT NULL DEFAULT 0)\n\
        GO\n\
        CREATE PROCEDURE dbo.add_order @total MONEY AS\n\
        BEGIN\n\
            SET NOCOUNT ON;\n\
            INSERT INTO dbo.orders (total) VALUES (@total);\n\
        END\n\
        GO\n\
        EXEC dbo.add_order @total = 10;\n";
    let statements = statements(source);
    let kinds: Vec<&str> = statements.iter().map(|s| s["$type"].as_str().unwrap()).collect();
    assert_eq!(
        kinds,
        vec!["CreateTableStatement", "CreateProcedureStatement", "ExecuteStatement"]
    );
}

#[test]
fn test_first_error_stops_the_parse() {
    let err = parse("SELECT 1; SELECT (1; SELECT 3").unwrap_err();
    assert!(err.offset >= 10);
}
