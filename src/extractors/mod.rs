// src/extractors/mod.rs
pub mod cell_matrix;
pub mod column_table;
pub mod columns;
pub mod normalize;
pub mod regex_fallback;

use crate::chain::record::ParsedEntry;

/// A way of reading conveyance entries out of extracted text.
pub trait ExtractionStrategy {
    /// Short label used in logs and output metadata.
    fn name(&self) -> &'static str;

    /// Entries in document order. Returns an empty Vec when the strategy does not apply.
    fn extract(&self, text: &str) -> Vec<ParsedEntry>;
}

// Re-export key extraction types for convenience
pub use cell_matrix::{Cell, CellMatrixExtractor, TableMatrix};
pub use column_table::ColumnTableStrategy;
pub use columns::{Column, ColumnLayout};
pub use normalize::normalize_lines;
pub use regex_fallback::{split_party_names, RegexFallbackStrategy};
