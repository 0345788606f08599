// src/chain/record.rs
use chrono::NaiveDate;
use serde::Serialize;

use crate::chain::date::parse_date;

/// Raw field values collected by a parser for one candidate line or row.
///
/// Nothing is validated until [`CandidateEntry::into_entry`] is called.
#[derive(Debug, Clone, Default)]
pub struct CandidateEntry {
    pub date_string: String,
    pub grantor: String,
    pub grantee: String,
    pub instrument: String,
    pub book_page: String,
    pub remark: String,
    pub source_line: String,
}

impl CandidateEntry {
    /// Turns the candidate into a [`ParsedEntry`] if it satisfies the record invariants:
    /// a parseable date, a non-empty recording reference and at least one party.
    pub fn into_entry(self) -> Option<ParsedEntry> {
        let date_string = self.date_string.trim().to_string();
        let grantor = self.grantor.trim().to_string();
        let grantee = self.grantee.trim().to_string();
        let book_page = self.book_page.trim().to_string();

        if date_string.is_empty() || book_page.is_empty() {
            tracing::debug!("Dropping candidate without date or recording: '{}'", self.source_line);
            return None;
        }
        if grantor.is_empty() && grantee.is_empty() {
            tracing::debug!("Dropping candidate without grantor or grantee: '{}'", self.source_line);
            return None;
        }
        let Some(date) = parse_date(&date_string) else {
            tracing::debug!("Dropping candidate with unparseable date '{}': '{}'", date_string, self.source_line);
            return None;
        };

        Some(ParsedEntry {
            date,
            date_string,
            grantor,
            grantee,
            instrument: self.instrument.trim().to_string(),
            book_page,
            remark: self.remark.trim().to_string(),
            source_line: self.source_line,
        })
    }
}

/// A validated conveyance as emitted by a parser, before classification.
///
/// Built only through [`CandidateEntry::into_entry`], so every instance has a real
/// date, a recording reference and at least one party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedEntry {
    date: NaiveDate,
    date_string: String,
    grantor: String,
    grantee: String,
    instrument: String,
    book_page: String,
    remark: String,
    source_line: String,
}

impl ParsedEntry {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The date as it appeared in the source.
    pub fn date_string(&self) -> &str {
        &self.date_string
    }

    pub fn grantor(&self) -> &str {
        &self.grantor
    }

    pub fn grantee(&self) -> &str {
        &self.grantee
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn book_page(&self) -> &str {
        &self.book_page
    }

    pub fn remark(&self) -> &str {
        &self.remark
    }

    pub fn source_line(&self) -> &str {
        &self.source_line
    }
}

/// A classified conveyance. Only the classifier can build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConveyanceRecord {
    #[serde(flatten)]
    entry: ParsedEntry,
    is_vesting: bool,
}

impl ConveyanceRecord {
    pub(crate) fn new(entry: ParsedEntry, is_vesting: bool) -> Self {
        Self { entry, is_vesting }
    }

    pub fn entry(&self) -> &ParsedEntry {
        &self.entry
    }

    pub fn date(&self) -> NaiveDate {
        self.entry.date
    }

    pub fn is_vesting(&self) -> bool {
        self.is_vesting
    }
}
