// src/extractors/normalize.rs
use once_cell::sync::Lazy;
use regex::Regex;

/// A line that opens a new conveyance entry.
pub(crate) static DATE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}").expect("Failed to compile DATE_PREFIX_RE"));

// Lines containing any of these never get folded into the entry above them.
const STOP_MARKERS: &[&str] = &[
    "****",
    "----",
    "FILED",
    "NAME CERTIFICATION",
    "SELLER",
    "BUYER",
    "Information to follow",
];

fn is_continuation(line: &str) -> bool {
    !line.is_empty()
        && !DATE_PREFIX_RE.is_match(line)
        && !STOP_MARKERS.iter().any(|marker| line.contains(marker))
}

/// Re-joins conveyance descriptions that the PDF extractor wrapped over several lines.
///
/// Every date-prefixed line absorbs the continuation lines that follow it,
/// space-joined. All lines come back trimmed.
pub fn normalize_lines(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut processed_lines = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        i += 1;

        if !DATE_PREFIX_RE.is_match(line) {
            processed_lines.push(line.to_string());
            continue;
        }

        let mut combined = line.to_string();
        while i < lines.len() && is_continuation(lines[i]) {
            combined.push(' ');
            combined.push_str(lines[i]);
            i += 1;
        }
        processed_lines.push(combined);
    }

    processed_lines
}
