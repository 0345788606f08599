// src/chain/classifier.rs
use crate::chain::record::{ConveyanceRecord, ParsedEntry};

// Checked first: a match here wins even if a vesting keyword is also present.
const NON_VESTING_TYPES: &[&str] = &[
    "DEED OF TRUST",
    "MORTGAGE",
    "ASSIGNMENT OF LEASES",
    "ASSIGNMENT OF RENTS",
    "ASSIGNMENT OF INCOME",
    "ASSIGNMENT OF LEASES, RENTS AND INCOME",
    "ASSIGNMENT OF LEASES, REENTS AND INCOME", // Seen in recorder output
    "UCC FINANCING STATEMENT",
    "SATISFACTION",
    "RELEASE",
    "SUBORDINATION",
    "MODIFICATION",
    "EXTENSION",
    "LIS PENDENS",
    "NOTICE OF DEFAULT",
    "AFFIDAVIT",
    "EASEMENT",
    "RIGHT OF WAY",
];

const VESTING_DEED_TYPES: &[&str] = &[
    "WARRANTY DEED",
    "SPECIAL WARRANTY DEED",
    "QUITCLAIM DEED",
    "DEED",
    "GRANT DEED",
    "BARGAIN AND SALE DEED",
    "ASSUMPTION WARRANTY DEED",
    "CORRECTION DEED",
    "EXECUTOR'S DEED",
    "ADMINISTRATOR'S DEED",
    "TRUSTEE'S DEED",
    "SHERIFF'S DEED",
    "TAX DEED",
    "COMMISSIONER'S DEED",
    "SPECIAL DEED",
    "BENEFICIARY DEED",
];

/// Decides whether an instrument description transfers ownership.
pub fn is_vesting_deed(instrument: &str) -> bool {
    let upper_instrument = instrument.trim().to_uppercase();

    if let Some(keyword) = NON_VESTING_TYPES.iter().find(|k| upper_instrument.contains(*k)) {
        tracing::trace!("'{}' matched non-vesting keyword '{}'", upper_instrument, keyword);
        return false;
    }

    VESTING_DEED_TYPES.iter().any(|k| upper_instrument.contains(k))
}

/// Stamps a parsed entry with its vesting decision.
pub fn classify(entry: ParsedEntry) -> ConveyanceRecord {
    let is_vesting = is_vesting_deed(entry.instrument());
    ConveyanceRecord::new(entry, is_vesting)
}

pub fn classify_all(entries: Vec<ParsedEntry>) -> Vec<ConveyanceRecord> {
    entries.into_iter().map(classify).collect()
}
