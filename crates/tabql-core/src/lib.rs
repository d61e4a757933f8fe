//! # tabql-core
//!
//! A SQL-subset query engine for tabular data.
//!
//! This crate provides:
//! - A parser combinator framework and a SELECT grammar built on it
//! - A relational engine with cross, inner, outer and natural joins
//! - A small read-only table interface that any data source can implement
//!
//! ## Running a query
//!
//! ```rust
//! use tabql_core::{Catalog, Engine, MemoryTable};
//!
//! let people = MemoryTable::from_rows(
//!     &["name", "age"],
//!     &[&["Ann", "30"], &["Bob", "17"], &["Abe", "19"]],
//! )?;
//! let catalog = Catalog::new().with_table("people", people);
//!
//! let result = Engine::new(&catalog)
//!     .query("SELECT name, age FROM people WHERE age > 18 ORDER BY name LIMIT 2")?;
//!
//! assert_eq!(result.columns, vec!["name", "age"]);
//! assert_eq!(result.get(0, "name"), Some(Some("Abe")));
//! assert_eq!(result.get(1, "name"), Some(Some("Ann")));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Parsing only
//!
//! Parsed statements print in a canonical form that parses back to the
//! same tree:
//!
//! ```rust
//! use tabql_core::parse_select;
//!
//! let select = parse_select("select * from a left join b on a.id=b.a_id where not x = 1")?;
//! assert_eq!(
//!     select.to_string(),
//!     "SELECT * FROM a LEFT OUTER JOIN b ON a.id = b.a_id WHERE NOT x = 1"
//! );
//! # Ok::<(), tabql_core::ParseError>(())
//! ```
//!
//! ## Supported grammar
//!
//! ```text
//! SELECT column [, column]*
//! FROM table [, table]*
//! [ { CROSS | NATURAL } JOIN table
//! | { [INNER] | LEFT [OUTER] | RIGHT [OUTER] | FULL [OUTER] } JOIN table ON column = column ]*
//! [WHERE [NOT] condition [{ AND | OR | NOT | AND NOT | OR NOT } condition]*]
//! [ORDER BY column [ASC | DESC] [, column [ASC | DESC]]*]
//! [LIMIT n] [OFFSET n] [;]
//! ```
//!
//! Conditions combine strictly left to right with no precedence or
//! grouping: `a OR b AND c` means `(a OR b) AND c`.
//!
//! A comparison is numeric when both sides read as numbers (`age > 18`
//! matches `"30"` and `"19.5"`). A double-quoted literal always compares
//! as text, so `code = "01"` does not match a cell holding `1`.

pub mod ast;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod table;

pub use ast::SelectStatement;
pub use engine::{Cell, Engine, ResultTable};
pub use error::{Error, ResolutionError, Result};
pub use grammar::{parse_select, Parser};
pub use parser::ParseError;
pub use table::{Catalog, MemoryTable, TableError, TableResolver, TabularData};
