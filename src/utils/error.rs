// src/utils/error.rs
use thiserror::Error;

// Errors raised at the boundary with the text/table extraction provider
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode table matrices: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Extraction produced no usable content: {0}")]
    Empty(String),

    #[error("Unsupported input: {0}")]
    Unsupported(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("No chain of title entries found in {0}")]
    NoEntries(String),

    #[error("Background extraction worker failed: {0}")]
    Worker(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Extraction source failed: {0}")]
    Source(#[from] SourceError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
