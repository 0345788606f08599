// src/chain/mod.rs
pub mod classifier;
pub mod date;
pub mod record;
pub mod selector;

pub use classifier::{classify, classify_all, is_vesting_deed};
pub use date::{format_date, parse_date};
pub use record::{CandidateEntry, ConveyanceRecord, ParsedEntry};
pub use selector::{cutoff_date, select_24_month_chain, select_chain_window, CHAIN_WINDOW_DAYS};
