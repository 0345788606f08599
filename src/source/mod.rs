// src/source/mod.rs
//! Input handed over by the upstream PDF text/table extractor.
use std::path::Path;

use crate::extractors::TableMatrix;
use crate::utils::error::SourceError;

/// Which parsing path to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExtractionMode {
    /// Pick by file extension: `.json` is tables, anything else text.
    Auto,
    Text,
    Tables,
}

/// What the extractor produced for one document.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionSource {
    Text(String),
    Tables(Vec<TableMatrix>),
}

impl ExtractionSource {
    /// Wraps a text blob. Blank text means extraction failed upstream.
    pub fn from_text(text: impl Into<String>) -> Result<Self, SourceError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SourceError::Empty("no text was extracted".to_string()));
        }
        Ok(Self::Text(text))
    }

    /// Wraps per-page table matrices. No table with at least one row means extraction failed upstream.
    pub fn from_tables(tables: Vec<TableMatrix>) -> Result<Self, SourceError> {
        if tables.iter().all(|table| table.is_empty()) {
            return Err(SourceError::Empty("no tables were extracted".to_string()));
        }
        Ok(Self::Tables(tables))
    }

    /// Decodes tables serialized as a JSON array of matrices (`null` for empty cells).
    pub fn from_tables_json(json: &str) -> Result<Self, SourceError> {
        let tables: Vec<TableMatrix> = serde_json::from_str(json)?;
        Self::from_tables(tables)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionSource::Text(_) => "text",
            ExtractionSource::Tables(_) => "tables",
        }
    }
}

/// Resolves `Auto` against the file extension.
pub fn resolve_mode(path: &Path, mode: ExtractionMode) -> Result<ExtractionMode, SourceError> {
    if mode != ExtractionMode::Auto {
        return Ok(mode);
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "json" => Ok(ExtractionMode::Tables),
        "pdf" => Err(SourceError::Unsupported(format!(
            "{} is a PDF; pass the extractor's text (.txt) or table (.json) output instead",
            path.display()
        ))),
        _ => Ok(ExtractionMode::Text),
    }
}

/// Reads an extractor output file from disk.
pub async fn load_source(path: &Path, mode: ExtractionMode) -> Result<ExtractionSource, SourceError> {
    let mode = resolve_mode(path, mode)?;
    tracing::info!("Loading {:?} source from {}", mode, path.display());

    let content = tokio::fs::read_to_string(path).await?;
    tracing::debug!("Read {} bytes from {}", content.len(), path.display());

    match mode {
        ExtractionMode::Tables => ExtractionSource::from_tables_json(&content),
        _ => ExtractionSource::from_text(content),
    }
}
