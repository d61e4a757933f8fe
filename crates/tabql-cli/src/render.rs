//! Writing result tables.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use tabql_core::{Cell, ResultTable};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Aligned columns with a row count.
    Text,
    /// `{"columns": [...], "rows": [[...]]}` with nulls as `null`.
    Json,
}

/// Writes `result` as aligned text columns.
pub fn write_text(out: &mut impl Write, result: &ResultTable, null_text: &str) -> Result<()> {
    let rows: Vec<Vec<&str>> = result.rows_with_nulls(null_text).collect();
    let widths: Vec<usize> = result
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(core::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<&str> = result.columns.iter().map(String::as_str).collect();
    write_line(out, &header, &widths)?;
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    writeln!(out, "{}", rule.join("-+-"))?;
    for row in &rows {
        write_line(out, row, &widths)?;
    }
    match result.len() {
        1 => writeln!(out, "(1 row)")?,
        n => writeln!(out, "({n} rows)")?,
    }
    Ok(())
}

fn write_line(out: &mut impl Write, cells: &[&str], widths: &[usize]) -> Result<()> {
    let last = cells.len().saturating_sub(1);
    for (i, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            write!(out, " | ")?;
        }
        if i == last {
            write!(out, "{cell}")?;
        } else {
            write!(out, "{cell:<width$}")?;
        }
    }
    writeln!(out)?;
    Ok(())
}

#[derive(Serialize)]
struct JsonResult<'a> {
    columns: &'a [String],
    rows: &'a [Vec<Cell>],
}

/// Writes `result` as pretty-printed JSON.
pub fn write_json(out: &mut impl Write, result: &ResultTable) -> Result<()> {
    let json = JsonResult {
        columns: &result.columns,
        rows: &result.rows,
    };
    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)?;
    Ok(())
}
