//! tabql CLI
//!
//! Runs one SELECT statement against tables stored as JSON files.

mod load;
mod render;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use tabql_core::{parse_select, Engine};

use render::Format;

/// Run SQL SELECT statements against JSON table files.
#[derive(Parser)]
#[command(name = "tabql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The statement to run, or `-` to read it from standard input.
    statement: String,

    /// Register a table file as NAME=PATH. May be repeated.
    #[arg(short, long = "table", value_name = "NAME=PATH", value_parser = load::parse_table_arg)]
    tables: Vec<(String, PathBuf)>,

    /// Directory whose `*.json` files are registered under their file stem.
    #[arg(short, long, env = "TABQL_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Text shown for null cells in text output.
    #[arg(long, default_value = "NULL")]
    null_text: String,

    /// Print the parsed statement instead of running it.
    #[arg(long)]
    explain: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn read_statement(arg: &str) -> anyhow::Result<String> {
    if arg != "-" {
        return Ok(arg.to_owned());
    }
    let mut sql = String::new();
    io::stdin()
        .read_to_string(&mut sql)
        .context("failed to read statement from stdin")?;
    Ok(sql)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let sql = read_statement(&cli.statement)?;
    let statement = parse_select(sql.trim()).context("failed to parse statement")?;
    if cli.explain {
        println!("{statement}");
        return Ok(());
    }

    let catalog = load::load_catalog(cli.data_dir.as_deref(), &cli.tables)?;
    info!(tables = ?catalog.table_names(), "loaded tables");

    let result = Engine::new(&catalog)
        .execute(&statement)
        .context("failed to run statement")?;

    let mut stdout = io::stdout().lock();
    match cli.format {
        Format::Text => render::write_text(&mut stdout, &result, &cli.null_text)?,
        Format::Json => render::write_json(&mut stdout, &result)?,
    }
    Ok(())
}
