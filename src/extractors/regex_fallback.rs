// src/extractors/regex_fallback.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::chain::record::{CandidateEntry, ParsedEntry};
use crate::extractors::normalize::normalize_lines;
use crate::extractors::ExtractionStrategy;

/// Placeholder grantee when a name run has a single word.
pub const UNKNOWN_PARTY: &str = "UNKNOWN";

// --- Regex Patterns (Lazy Static) ---
// Banners, boilerplate and headers that never describe a conveyance.
static SKIP_LINE_RE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)FILED.*GRANTOR.*GRANTEE.*INSTRUMENT", // Table header
        r"(?i)^\*+",
        r"(?i)CHAIN OF TITLE",
        r"(?i)File No\.",
        r"(?i)NAME CERTIFICATION",
        r"(?i)SELLER\s+.*\s+BUYER",
        r"(?i)OWNER:",
        r"(?i)For further information",
        r"(?i)Certified to:",
        r"(?i)New Certification Date:",
        r"(?i)By:.*",
        r"(?i)INFORMATION TO FOLLOW",
        r"^\s*$",
    ]
    .iter()
    .filter_map(|pat| Regex::new(pat).ok())
    .collect()
});

/// How a pattern captured the two parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PartyCapture {
    /// `grantor` and `grantee` groups.
    Split,
    /// One `names` group, halved by word count.
    Combined,
}

struct RecordPattern {
    regex: Regex,
    parties: PartyCapture,
}

// Tried in order; the first match wins.
static RECORD_PATTERNS: Lazy<Vec<RecordPattern>> = Lazy::new(|| {
    [
        // Generic: any instrument run ending in a known keyword, or a "P n-n" plat reference
        (
            r"(?i)^(?P<date>\d{2}/\d{2}/\d{4})\s+(?P<grantor>.+?)\s+(?P<grantee>.+?)\s+(?P<instrument>(?:[\w\s]+(?:DEED|TRUST|ASSIGNMENT|MORTGAGE|UCC|SATISFACTION|RELEASE|SUBORDINATION|MODIFICATION|EXTENSION|LIS PENDENS|NOTICE|AFFIDAVIT|EASEMENT)[\w\s]*)|(?:P\s+\d+-\d+))\s+(?P<book_page>[A-Z]?\s*\d+-\d+|\w+-\w+)(?:\s+(?P<remark>.*))?$",
            PartyCapture::Split,
        ),
        // Narrow: the common deed and trust instruments only
        (
            r"(?i)^(?P<date>\d{2}/\d{2}/\d{4})\s+(?P<names>.+?)\s+(?P<instrument>WARRANTY DEED|DEED OF TRUST|QUITCLAIM DEED|SPECIAL WARRANTY DEED|DEED)\s+(?P<book_page>\d+-\d+)(?:\s+(?P<remark>.*))?$",
            PartyCapture::Combined,
        ),
    ]
    .iter()
    .filter_map(|&(pat, parties)| Regex::new(pat).ok().map(|regex| RecordPattern { regex, parties }))
    .collect()
});

/// Splits a run of names in half by word count; the grantor gets the smaller half.
pub fn split_party_names(combined: &str) -> (String, String) {
    let name_parts: Vec<&str> = combined.split_whitespace().collect();
    if name_parts.len() < 2 {
        return (combined.trim().to_string(), UNKNOWN_PARTY.to_string());
    }
    let mid_point = name_parts.len() / 2;
    (name_parts[..mid_point].join(" "), name_parts[mid_point..].join(" "))
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str().trim())
}

/// Line-at-a-time record matching for chains that are not laid out as a table.
#[derive(Debug, Default)]
pub struct RegexFallbackStrategy;

impl RegexFallbackStrategy {
    pub fn new() -> Self {
        Self
    }

    fn is_skipped(&self, line: &str) -> bool {
        SKIP_LINE_RE.iter().any(|re| re.is_match(line))
    }

    fn match_line(&self, line: &str) -> Option<ParsedEntry> {
        let (caps, parties) = RECORD_PATTERNS
            .iter()
            .find_map(|pattern| pattern.regex.captures(line).map(|caps| (caps, pattern.parties)))?;

        let (grantor, grantee) = match parties {
            PartyCapture::Split => (group(&caps, "grantor").to_string(), group(&caps, "grantee").to_string()),
            PartyCapture::Combined => split_party_names(group(&caps, "names")),
        };

        CandidateEntry {
            date_string: group(&caps, "date").to_string(),
            grantor,
            grantee,
            instrument: group(&caps, "instrument").to_string(),
            book_page: group(&caps, "book_page").to_string(),
            remark: group(&caps, "remark").to_string(),
            source_line: line.to_string(),
        }
        .into_entry()
    }
}

impl ExtractionStrategy for RegexFallbackStrategy {
    fn name(&self) -> &'static str {
        "regex-fallback"
    }

    fn extract(&self, text: &str) -> Vec<ParsedEntry> {
        let entries: Vec<ParsedEntry> = normalize_lines(text)
            .iter()
            .map(|line| line.trim())
            .filter(|line| !self.is_skipped(line))
            .filter_map(|line| {
                let entry = self.match_line(line);
                if entry.is_none() {
                    tracing::trace!("No record pattern matched: '{}'", line);
                }
                entry
            })
            .collect();

        tracing::debug!("Regex fallback produced {} entries", entries.len());
        entries
    }
}
