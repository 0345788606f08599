// src/lib.rs
//! Chain-of-title extraction from recorder text and tables.
//!
//! Text goes through the column table parser, falling back to line patterns;
//! table matrices go through the cell-matrix parser. Entries are classified as
//! vesting or not, and the 24-month chain is selected from the vesting deeds.
pub mod chain;
pub mod extractors;
pub mod pipeline;
pub mod source;
pub mod storage;
pub mod utils;

pub use chain::{ConveyanceRecord, ParsedEntry};
pub use pipeline::{
    extract_chain_from_tables, extract_chain_from_text, process_in_background, process_source,
    select_24_month_chain, ChainConfig, ChainReport,
};
