//! pagesel - Entry Point

use clap::Parser;
use pagesel::config::CliOverrides;
use pagesel::model::{AppError, PageIndex};
use pagesel::source::{FileProvider, RecordProvider};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// pagesel - select records across the pages of a paginated table
#[derive(Parser, Debug)]
#[command(name = "pagesel")]
#[command(version)]
#[command(about = "TUI table for selecting records across the pages of a paginated record set")]
pub struct Args {
    /// Path to a JSONL file of records, one object with an integer `id` per line
    pub file: PathBuf,

    /// Page to open first (1-based)
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Rows per page
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Delay every page fetch by this many milliseconds
    #[arg(long)]
    pub fetch_delay_ms: Option<u64>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the selected ids as a JSON array on exit
    #[arg(long)]
    pub emit_selection: bool,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config_file = pagesel::config::load_config_with_precedence(args.config.clone())?;
    let merged = pagesel::config::merge_config(config_file);

    // Log path is file-only config; init before env overrides so their
    // warnings reach the log
    pagesel::logging::init(&merged.log_file_path)?;

    let config = pagesel::config::apply_cli_overrides(
        pagesel::config::apply_env_overrides(merged),
        CliOverrides {
            page_size: args.page_size.map(|n| n as usize),
            fetch_delay_ms: args.fetch_delay_ms,
        },
    );

    info!(config = ?config, "Configuration loaded and resolved");

    let provider = FileProvider::new(&args.file, config.page_size)?
        .with_latency(Duration::from_millis(config.fetch_delay_ms));
    let provider: Arc<dyn RecordProvider> = Arc::new(provider);

    let start = PageIndex::from_page_number(args.page as usize).unwrap_or(PageIndex::FIRST);

    let selected = pagesel::view::run_with_provider(provider, &config, start).map_err(
        |err| match err {
            pagesel::view::TuiError::Io(io) => AppError::Terminal(io),
        },
    )?;

    info!(selected = selected.len(), "exiting");

    if args.emit_selection {
        let json = serde_json::to_string(&selected).map_err(std::io::Error::other)?;
        println!("{json}");
    }

    Ok(())
}
