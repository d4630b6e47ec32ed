/// Main entry point for the DayOne MCP server
///
/// This file sets up logging, parses command line arguments, and starts the
/// MCP server. The server listens for JSON-RPC requests over stdin/stdout.

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dayone::config::{default_database_path, prepare_database_path};
use dayone::{AppConfig, DayOneApp};

/// Command line arguments for the DayOne MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long, env = "DAYONE_DATABASE")]
    database: Option<PathBuf>,

    /// Treat this day (YYYY-MM-DD) as today instead of the local date
    #[arg(long, env = "DAYONE_TODAY", value_parser = parse_today)]
    today: Option<NaiveDate>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_today(raw: &str) -> Result<NaiveDate, String> {
    dayone::parse_day(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    // RUST_LOG wins over the flags when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dayone={}", log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // stdout carries the protocol
        .init();

    info!("Starting DayOne MCP server");

    let db_path = match args.database {
        Some(path) => prepare_database_path(path)?,
        None => default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let config = AppConfig::new(db_path).with_reference_day(args.today);
    let app = DayOneApp::new(config)?;

    app.run().await?;

    info!("DayOne MCP server shutdown complete");
    Ok(())
}
