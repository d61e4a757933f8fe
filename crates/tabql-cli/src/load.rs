//! Loading tables from JSON files.
//!
//! A table file holds column names and rows of cells:
//!
//! ```json
//! {"columns": ["name", "age"], "rows": [["Ann", 30], ["Bob", 17]]}
//! ```
//!
//! Cells may be strings, numbers, booleans or null; every cell is read
//! as text, and null becomes the empty string.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use tabql_core::{Catalog, MemoryTable, TabularData};

/// The on-disk form of a table.
#[derive(Debug, Deserialize)]
pub struct TableFile {
    /// Column names.
    pub columns: Vec<String>,
    /// Rows, one cell per column.
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl TableFile {
    /// Converts the file into a table.
    pub fn into_table(self) -> Result<MemoryTable> {
        let rows = self
            .rows
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();
        Ok(MemoryTable::new(self.columns, rows)?)
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Reads one table file.
pub fn load_table(path: &Path) -> Result<MemoryTable> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read table file {}", path.display()))?;
    let file: TableFile = serde_json::from_str(&text)
        .with_context(|| format!("invalid table file {}", path.display()))?;
    let table = file
        .into_table()
        .with_context(|| format!("invalid table file {}", path.display()))?;
    debug!(
        path = %path.display(),
        columns = table.column_count(),
        rows = table.row_count(),
        "loaded table"
    );
    Ok(table)
}

/// Builds the catalog from a data directory and explicit `NAME=PATH`
/// tables. Every `*.json` file in the directory is registered under its
/// file stem; explicit tables replace directory tables of the same name.
pub fn load_catalog(data_dir: Option<&Path>, tables: &[(String, PathBuf)]) -> Result<Catalog> {
    let mut catalog = Catalog::new();
    if let Some(dir) = data_dir {
        let mut paths = fs::read_dir(dir)
            .with_context(|| format!("failed to read data directory {}", dir.display()))?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<std::io::Result<Vec<_>>>()
            .with_context(|| format!("failed to read data directory {}", dir.display()))?;
        paths.sort();
        for path in paths
            .iter()
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        {
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                warn!(path = %path.display(), "skipping table file with a non UTF-8 name");
                continue;
            };
            catalog.register(name, load_table(path)?);
        }
    }
    for (name, path) in tables {
        catalog.register(name.clone(), load_table(path)?);
    }
    Ok(catalog)
}

/// Parses a `--table NAME=PATH` argument.
pub fn parse_table_arg(arg: &str) -> Result<(String, PathBuf), String> {
    match arg.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_owned(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got `{arg}`")),
    }
}
