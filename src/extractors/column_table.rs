// src/extractors/column_table.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;

use crate::chain::record::{CandidateEntry, ParsedEntry};
use crate::extractors::columns::{Column, ColumnLayout};
use crate::extractors::normalize::DATE_PREFIX_RE;
use crate::extractors::ExtractionStrategy;

// --- Regex Patterns (Lazy Static) ---
static BOOK_PAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+-\w+").expect("Failed to compile BOOK_PAGE_RE"));

fn is_separator_line(line: &str) -> bool {
    line.contains("---") || line.contains("***")
}

/// Reads the recorder's fixed-width chain table.
///
/// Column boundaries come from the header line once; rows are separated by blank
/// lines and may wrap over several physical lines.
#[derive(Debug, Default)]
pub struct ColumnTableStrategy;

impl ColumnTableStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Assembles one row from its physical lines.
    fn assemble_row(&self, lines: &[&str], layout: &ColumnLayout) -> Option<ParsedEntry> {
        let joined = |column: Column| -> String {
            lines
                .iter()
                .map(|line| layout.slice(line, column))
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        };

        // Date and recording reference sit on the first line that has them.
        let date_string = lines
            .iter()
            .map(|line| layout.slice(line, Column::Dated))
            .find(|text| DATE_PREFIX_RE.is_match(text))
            .unwrap_or_default();
        let book_page = lines
            .iter()
            .map(|line| layout.slice(line, Column::Recording))
            .find(|text| BOOK_PAGE_RE.is_match(text))
            .unwrap_or_default();

        CandidateEntry {
            date_string: date_string.to_string(),
            grantor: joined(Column::Grantor),
            grantee: joined(Column::Grantee),
            instrument: joined(Column::Instrument),
            book_page: book_page.to_string(),
            remark: String::new(),
            source_line: lines.join(" "),
        }
        .into_entry()
    }
}

impl ExtractionStrategy for ColumnTableStrategy {
    fn name(&self) -> &'static str {
        "column-table"
    }

    fn extract(&self, text: &str) -> Vec<ParsedEntry> {
        let lines: Vec<&str> = text.lines().collect();

        let Some((header_idx, layout)) = lines
            .iter()
            .enumerate()
            .find_map(|(i, line)| ColumnLayout::from_header(line).map(|layout| (i, layout)))
        else {
            tracing::debug!("No GRANTOR/GRANTEE/INSTRUMENT header line found");
            return Vec::new();
        };
        tracing::debug!("Found chain table header on line {}: {:?}", header_idx + 1, layout);

        let mut entries = Vec::new();
        let mut in_table = false;
        let mut current_entry_lines: Vec<&str> = Vec::new();

        let flush = |pending: &mut Vec<&str>, entries: &mut Vec<ParsedEntry>| {
            if !pending.is_empty() {
                entries.extend(self.assemble_row(pending, &layout));
                pending.clear();
            }
        };

        for &line in &lines[header_idx + 1..] {
            if is_separator_line(line) {
                if in_table {
                    break; // Second separator closes the table
                }
                in_table = true;
                continue;
            }

            if !in_table {
                continue;
            }

            if line.trim().is_empty() {
                flush(&mut current_entry_lines, &mut entries);
                continue;
            }

            current_entry_lines.push(line);
        }
        flush(&mut current_entry_lines, &mut entries);

        tracing::debug!("Column table produced {} entries", entries.len());
        entries
    }
}
