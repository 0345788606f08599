// src/utils/debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::pipeline::ChainReport;
use crate::utils::error::StorageError;

/// Renders every parsed entry with its classification and the source text it came from.
///
/// Markers: `V` vesting, `-` non-vesting, `*` selected into the chain.
pub fn render_extraction_trace(report: &ChainReport) -> String {
    let mut trace = format!(
        "source: {} | strategy: {} | reference: {} | cutoff: {}\n\n",
        report.source_kind, report.strategy, report.reference_date, report.cutoff_date
    );

    for (idx, record) in report.entries.iter().enumerate() {
        let entry = record.entry();
        let selected = report.chain.iter().any(|r| r == record);
        trace.push_str(&format!(
            "{:>3} [{}{}] {} | {} -> {} | {} | {}\n",
            idx + 1,
            if record.is_vesting() { 'V' } else { '-' },
            if selected { '*' } else { ' ' },
            entry.date_string(),
            entry.grantor(),
            entry.grantee(),
            entry.instrument(),
            entry.book_page(),
        ));
        if !entry.remark().is_empty() {
            trace.push_str(&format!("      remark: {}\n", entry.remark()));
        }
        trace.push_str(&format!("      source: {}\n", entry.source_line()));
    }

    trace
}

/// Saves the extraction trace for debugging
pub fn save_extraction_trace(report: &ChainReport, filename: &Path) -> Result<(), StorageError> {
    let mut file = File::create(filename)?;
    file.write_all(render_extraction_trace(report).as_bytes())?;

    tracing::info!("Saved extraction trace to {}", filename.display());
    Ok(())
}
