// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::chain::record::ConveyanceRecord;
use crate::pipeline::ChainReport;
use crate::utils::error::StorageError;

/// One row of the chain table as the document merge step fills it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct ChainRow {
    pub grantor: String,
    pub grantee: String,
    pub instrument: String,
    pub dated: String,
    pub recording: String,
}

impl From<&ConveyanceRecord> for ChainRow {
    fn from(record: &ConveyanceRecord) -> Self {
        let entry = record.entry();
        Self {
            grantor: entry.grantor().to_uppercase(),
            grantee: entry.grantee().to_uppercase(),
            instrument: entry.instrument().to_uppercase(),
            dated: entry.date_string().to_string(),
            recording: entry.book_page().to_string(),
        }
    }
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Writes the selected chain as render rows to `<stem>_chain.json`.
    pub fn save_chain(&self, stem: &str, report: &ChainReport) -> Result<PathBuf, StorageError> {
        let rows: Vec<ChainRow> = report.chain.iter().map(ChainRow::from).collect();
        let file_path = self.base_dir.join(format!("{}_chain.json", stem));

        let rows_str = serde_json::to_string_pretty(&rows)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, rows_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved {} chain rows to {}", rows.len(), file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about the run in JSON format
    pub fn save_chain_metadata(
        &self,
        stem: &str,
        source_path: &Path,
        report: &ChainReport,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_chain_meta.json", stem));

        let metadata = serde_json::json!({
            "source_file": source_path.display().to_string(),
            "source_kind": report.source_kind,
            "strategy": report.strategy,
            "entries_parsed": report.entries.len(),
            "vesting_deeds": report.vesting_count(),
            "chain_length": report.chain.len(),
            "reference_date": report.reference_date.to_string(),
            "cutoff_date": report.cutoff_date.to_string(),
            "message": report.summary(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}
