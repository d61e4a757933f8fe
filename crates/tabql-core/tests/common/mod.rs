#![allow(dead_code)]

use tabql_core::ast::SelectStatement;
use tabql_core::{Catalog, Engine, Error, MemoryTable, ParseError, Parser, ResultTable};

pub fn parse_select(sql: &str) -> SelectStatement {
    Parser::new(sql)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    Parser::new(sql)
        .parse_statement()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

/// Verifies that `to_string()` produces a fixed point: the rendered
/// statement parses back to the same AST and renders identically.
pub fn round_trip(sql: &str) {
    let ast1 = parse_select(sql);
    let rendered1 = ast1.to_string();
    let ast2 = parse_select(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(ast1, ast2, "Round-trip changed the AST for: {sql}");
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}

pub fn table(columns: &[&str], rows: &[&[&str]]) -> MemoryTable {
    MemoryTable::from_rows(columns, rows).expect("fixture rows have the right width")
}

/// `people(name, age)` and the single-column tables `a(x)` and `b(y)`.
pub fn catalog() -> Catalog {
    Catalog::new()
        .with_table(
            "people",
            table(
                &["name", "age"],
                &[&["Ann", "30"], &["Bob", "17"], &["Abe", "19"]],
            ),
        )
        .with_table("a", table(&["x"], &[&["1"]]))
        .with_table("b", table(&["y"], &[&["2"], &["3"]]))
}

/// `customers(id, name)` and `orders(id, customer_id, total)`, with a
/// customer without orders and an order without a customer.
pub fn shop() -> Catalog {
    Catalog::new()
        .with_table(
            "customers",
            table(
                &["id", "name"],
                &[&["1", "Ann"], &["2", "Bob"], &["3", "Cy"]],
            ),
        )
        .with_table(
            "orders",
            table(
                &["id", "customer_id", "total"],
                &[
                    &["10", "1", "25"],
                    &["11", "1", "40"],
                    &["12", "3", "15"],
                    &["13", "9", "99"],
                ],
            ),
        )
}

pub fn run(catalog: &Catalog, sql: &str) -> ResultTable {
    Engine::new(catalog)
        .query(sql)
        .unwrap_or_else(|e| panic!("Failed to run: {sql}\nError: {e}"))
}

pub fn run_err(catalog: &Catalog, sql: &str) -> Error {
    Engine::new(catalog)
        .query(sql)
        .expect_err(&format!("Expected error for: {sql}"))
}

/// The rows of `result` with nulls shown as `NULL`.
pub fn rows(result: &ResultTable) -> Vec<Vec<String>> {
    result
        .rows_with_nulls("NULL")
        .map(|row| row.into_iter().map(String::from).collect())
        .collect()
}

pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| (*c).to_owned()).collect()
}
