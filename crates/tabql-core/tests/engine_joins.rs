//! Tests for join execution.

mod common;
use common::*;

use tabql_core::ast::JoinKind;
use tabql_core::{Catalog, Error, ResolutionError};

#[test]
fn cross_join_example() {
    let catalog = catalog();
    let result = run(&catalog, "SELECT * FROM a CROSS JOIN b");
    assert_eq!(result.columns, vec!["x", "y"]);
    assert_eq!(rows(&result), vec![row(&["1", "2"]), row(&["1", "3"])]);
}

#[test]
fn cross_join_is_m_times_n() {
    let catalog = shop();
    let result = run(&catalog, "SELECT * FROM customers CROSS JOIN orders");
    assert_eq!(result.len(), 3 * 4);
    assert_eq!(result.columns.len(), 2 + 3);

    let listed = run(&catalog, "SELECT * FROM customers, orders");
    assert_eq!(listed, result);
}

#[test]
fn inner_join_emits_matches_only() {
    let catalog = shop();
    let result = run(
        &catalog,
        "SELECT customers.name, orders.total FROM customers \
         JOIN orders ON customers.id = orders.customer_id",
    );
    assert_eq!(
        rows(&result),
        vec![
            row(&["Ann", "25"]),
            row(&["Ann", "40"]),
            row(&["Cy", "15"])
        ]
    );
}

#[test]
fn left_outer_join_pads_with_nulls() {
    let catalog = shop();
    let result = run(
        &catalog,
        "SELECT customers.name, orders.total FROM customers \
         LEFT JOIN orders ON customers.id = orders.customer_id",
    );
    assert_eq!(result.len(), 4);
    assert_eq!(rows(&result)[2], row(&["Bob", "NULL"]));
    assert_eq!(result.rows[2][1], None);
}

#[test]
fn right_outer_join_keeps_unmatched_right_rows() {
    let catalog = shop();
    let result = run(
        &catalog,
        "SELECT customers.name, orders.id FROM customers \
         RIGHT OUTER JOIN orders ON customers.id = orders.customer_id",
    );
    assert_eq!(result.len(), 4);
    assert!(rows(&result).contains(&row(&["NULL", "13"])));
}

#[test]
fn full_outer_join_keeps_both_sides() {
    let catalog = shop();
    let result = run(
        &catalog,
        "SELECT customers.name, orders.id FROM customers \
         FULL JOIN orders ON customers.id = orders.customer_id",
    );
    let rows = rows(&result);
    assert_eq!(rows.len(), 5);
    assert!(rows.contains(&row(&["Bob", "NULL"])));
    assert!(rows.contains(&row(&["NULL", "13"])));
}

#[test]
fn outer_join_row_counts_are_ordered() {
    let catalog = shop();
    let count = |kind: &str| {
        run(
            &catalog,
            &format!("SELECT * FROM customers {kind} orders ON customers.id = orders.customer_id"),
        )
        .len()
    };
    let inner = count("INNER JOIN");
    let left = count("LEFT OUTER JOIN");
    let right = count("RIGHT OUTER JOIN");
    let full = count("FULL OUTER JOIN");
    assert!(inner <= left && left <= full);
    assert!(inner <= right && right <= full);
    assert_eq!((inner, left, right, full), (3, 4, 4, 5));
}

#[test]
fn join_key_in_either_order() {
    let catalog = shop();
    let forward = run(
        &catalog,
        "SELECT * FROM customers JOIN orders ON customers.id = orders.customer_id",
    );
    let reversed = run(
        &catalog,
        "SELECT * FROM customers JOIN orders ON orders.customer_id = customers.id",
    );
    assert_eq!(forward, reversed);
}

#[test]
fn unqualified_columns_resolve_to_the_first_match() {
    let catalog = shop();
    let result = run(
        &catalog,
        "SELECT id, orders.id, name FROM customers JOIN orders ON id = customer_id LIMIT 1",
    );
    assert_eq!(result.columns, vec!["id", "id", "name"]);
    assert_eq!(rows(&result), vec![row(&["1", "10", "Ann"])]);
}

#[test]
fn where_and_order_after_join() {
    let catalog = shop();
    let result = run(
        &catalog,
        "SELECT customers.name, orders.total FROM customers \
         JOIN orders ON customers.id = orders.customer_id \
         WHERE orders.total > 20 ORDER BY orders.total DESC",
    );
    assert_eq!(rows(&result), vec![row(&["Ann", "40"]), row(&["Ann", "25"])]);
}

#[test]
fn table_wildcard_after_join() {
    let catalog = shop();
    let result = run(
        &catalog,
        "SELECT orders.* FROM customers JOIN orders ON customers.id = orders.customer_id LIMIT 1",
    );
    assert_eq!(result.columns, vec!["id", "customer_id", "total"]);
}

#[test]
fn natural_join_on_shared_columns() {
    let catalog = Catalog::new()
        .with_table(
            "staff",
            table(&["dept", "name"], &[&["1", "Ann"], &["2", "Bob"], &["3", "Cy"]]),
        )
        .with_table(
            "depts",
            table(&["DEPT", "title"], &[&["1", "Ops"], &["3", "Dev"]]),
        );
    let result = run(&catalog, "SELECT name, title FROM staff NATURAL JOIN depts");
    assert_eq!(rows(&result), vec![row(&["Ann", "Ops"]), row(&["Cy", "Dev"])]);
}

#[test]
fn natural_join_without_shared_columns_is_cross() {
    let catalog = catalog();
    let natural = run(&catalog, "SELECT * FROM a NATURAL JOIN b");
    let cross = run(&catalog, "SELECT * FROM a CROSS JOIN b");
    assert_eq!(natural, cross);
}

#[test]
fn chained_joins() {
    let catalog = shop().with_table(
        "notes",
        table(&["order_id", "text"], &[&["11", "gift"]]),
    );
    let result = run(
        &catalog,
        "SELECT customers.name, notes.text FROM customers \
         JOIN orders ON customers.id = orders.customer_id \
         LEFT JOIN notes ON orders.id = notes.order_id \
         ORDER BY notes.text",
    );
    assert_eq!(
        rows(&result),
        vec![
            row(&["Ann", "NULL"]),
            row(&["Cy", "NULL"]),
            row(&["Ann", "gift"])
        ]
    );
}

#[test]
fn unresolved_join_column() {
    let catalog = shop();
    let err = run_err(
        &catalog,
        "SELECT * FROM customers JOIN orders ON customers.id = orders.buyer",
    );
    assert_eq!(
        err,
        Error::Resolution(ResolutionError::ColumnNotFound {
            column: String::from("orders.buyer"),
            context: String::from("INNER JOIN orders"),
        })
    );
}

#[test]
fn unknown_join_table() {
    let catalog = shop();
    let err = run_err(&catalog, "SELECT * FROM customers CROSS JOIN invoices");
    assert_eq!(
        err,
        Error::Resolution(ResolutionError::TableNotFound(String::from("invoices")))
    );
}

#[test]
fn join_kind_in_missing_key_message() {
    let err = ResolutionError::MissingJoinKey(JoinKind::FullOuter);
    assert_eq!(err.to_string(), "FULL OUTER JOIN requires an ON key");
}
