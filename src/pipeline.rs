// src/pipeline.rs
use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::chain::classifier::classify_all;
use crate::chain::record::{ConveyanceRecord, ParsedEntry};
use crate::chain::selector::{cutoff_date, select_chain_window, CHAIN_WINDOW_DAYS};
use crate::extractors::{
    CellMatrixExtractor, ColumnTableStrategy, ExtractionStrategy, RegexFallbackStrategy, TableMatrix,
};
use crate::source::ExtractionSource;
use crate::utils::error::ExtractError;

pub use crate::chain::selector::select_24_month_chain;

/// Label recorded when entries came from table matrices.
pub const CELL_MATRIX_STRATEGY: &str = "cell-matrix";

/// Runs `primary`, and `fallback` only if `primary` found nothing.
///
/// Returns the entries together with the name of the strategy that produced them.
pub fn run_text_strategies(
    text: &str,
    primary: &dyn ExtractionStrategy,
    fallback: &dyn ExtractionStrategy,
) -> (Vec<ParsedEntry>, &'static str) {
    let entries = primary.extract(text);
    if !entries.is_empty() {
        tracing::info!("{} strategy found {} entries", primary.name(), entries.len());
        return (entries, primary.name());
    }

    tracing::info!("{} strategy found no entries, falling back to {}", primary.name(), fallback.name());
    let entries = fallback.extract(text);
    tracing::info!("{} strategy found {} entries", fallback.name(), entries.len());
    (entries, fallback.name())
}

fn extract_text(text: &str) -> (Vec<ConveyanceRecord>, &'static str) {
    let (entries, strategy) = run_text_strategies(text, &ColumnTableStrategy::new(), &RegexFallbackStrategy::new());
    (classify_all(entries), strategy)
}

/// Classified conveyances from a raw text blob, in document order.
pub fn extract_chain_from_text(raw_text: &str) -> Vec<ConveyanceRecord> {
    extract_text(raw_text).0
}

/// Classified conveyances from table matrices, in table then row order.
pub fn extract_chain_from_tables(tables: &[TableMatrix]) -> Vec<ConveyanceRecord> {
    classify_all(CellMatrixExtractor::new().extract_tables(tables))
}

/// Settings for one run of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfig {
    /// Date the chain is measured back from; today when `None`.
    pub reference_date: Option<NaiveDate>,
    pub window_days: i64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self { reference_date: None, window_days: CHAIN_WINDOW_DAYS }
    }
}

/// Everything one document yielded.
#[derive(Debug, Clone, Serialize)]
pub struct ChainReport {
    pub source_kind: &'static str,
    pub strategy: &'static str,
    pub reference_date: NaiveDate,
    pub cutoff_date: NaiveDate,
    /// Every classified entry, in document order.
    pub entries: Vec<ConveyanceRecord>,
    /// The selected vesting deeds, newest first.
    pub chain: Vec<ConveyanceRecord>,
}

impl ChainReport {
    pub fn vesting_count(&self) -> usize {
        self.entries.iter().filter(|r| r.is_vesting()).count()
    }

    pub fn summary(&self) -> String {
        if self.chain.is_empty() {
            "No vesting deeds found".to_string()
        } else {
            format!("Found {} vesting deeds in 24-month chain.", self.chain.len())
        }
    }
}

/// Parses, classifies and selects the chain for one document.
///
/// A source that parses to zero entries is reported as [`ExtractError::NoEntries`];
/// entries without any vesting deed give an `Ok` report with an empty chain.
pub fn process_source(source: &ExtractionSource, config: &ChainConfig) -> Result<ChainReport, ExtractError> {
    let (entries, strategy) = match source {
        ExtractionSource::Text(text) => extract_text(text),
        ExtractionSource::Tables(tables) => (extract_chain_from_tables(tables), CELL_MATRIX_STRATEGY),
    };

    if entries.is_empty() {
        return Err(ExtractError::NoEntries(format!("{} source", source.kind())));
    }

    let reference_date = config.reference_date.unwrap_or_else(|| Local::now().date_naive());
    let chain = select_chain_window(&entries, reference_date, config.window_days);

    Ok(ChainReport {
        source_kind: source.kind(),
        strategy,
        reference_date,
        cutoff_date: cutoff_date(reference_date, config.window_days),
        entries,
        chain,
    })
}

/// Runs [`process_source`] on the blocking pool so an async caller is not stalled.
///
/// There is no cancellation: dropping the returned future discards the result.
pub async fn process_in_background(
    source: ExtractionSource,
    config: ChainConfig,
) -> Result<ChainReport, ExtractError> {
    tokio::task::spawn_blocking(move || process_source(&source, &config))
        .await
        .map_err(|e| ExtractError::Worker(e.to_string()))?
}
