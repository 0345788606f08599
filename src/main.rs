// src/main.rs
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use title_chain::chain::CHAIN_WINDOW_DAYS;
use title_chain::pipeline::{self, ChainConfig};
use title_chain::source::{self, ExtractionMode};
use title_chain::storage::StorageManager;
use title_chain::utils::{self, AppError};

/// Command Line Interface for the 24-month chain of title extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Extractor output for one title report: text (.txt) or table matrices (.json)
    #[arg(short, long)]
    input: PathBuf,

    /// Which parser to run
    #[arg(short, long, value_enum, default_value_t = ExtractionMode::Auto)]
    mode: ExtractionMode,

    /// Date the chain is measured back from, as YYYY-MM-DD (default: today)
    #[arg(short, long)]
    reference_date: Option<NaiveDate>,

    /// Length of the chain window in days
    #[arg(long, env = "CHAIN_WINDOW_DAYS", default_value_t = CHAIN_WINDOW_DAYS)]
    window_days: i64,

    /// Output directory for the chain rows and metadata
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// Debug mode - save an extraction trace next to the output
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.debug);
    tracing::info!("Starting processing for args: {:?}", args);

    if args.window_days <= 0 {
        return Err(AppError::Config(format!("window length must be positive, got {}", args.window_days)));
    }

    // 3. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 4. Load the extractor output
    let extraction_source = source::load_source(&args.input, args.mode).await?;

    // 5. Parse, classify and select off the async runtime
    let config = ChainConfig { reference_date: args.reference_date, window_days: args.window_days };
    let report = pipeline::process_in_background(extraction_source, config).await?;
    tracing::info!(
        "Parsed {} entries with {} ({} vesting); cutoff {}",
        report.entries.len(),
        report.strategy,
        report.vesting_count(),
        report.cutoff_date
    );

    for record in &report.chain {
        let entry = record.entry();
        tracing::info!(
            "{} | {} -> {} | {} | {}",
            entry.date_string(),
            entry.grantor(),
            entry.grantee(),
            entry.instrument(),
            entry.book_page()
        );
    }

    // 6. Save results
    let stem = args
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("title")
        .to_string();

    let chain_path = storage.save_chain(&stem, &report)?;
    tracing::info!("Saved chain rows to: {}", chain_path.display());
    let meta_path = storage.save_chain_metadata(&stem, &args.input, &report)?;
    tracing::info!("Saved chain metadata to: {}", meta_path.display());

    if args.debug {
        let trace_path = storage.base_dir().join(format!("{}_trace.txt", stem));
        if let Err(e) = utils::debug::save_extraction_trace(&report, &trace_path) {
            tracing::warn!("Failed to save extraction trace: {}", e);
        }
    }

    println!("{}", report.summary());
    Ok(())
}
