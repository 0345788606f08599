// src/chain/selector.rs
use chrono::{Duration, Local, NaiveDate};

use crate::chain::record::ConveyanceRecord;

/// 24 months, approximated as 730 days.
pub const CHAIN_WINDOW_DAYS: i64 = 730;

/// Earliest date the chain has to reach back to.
///
/// Windows reaching past the calendar range clamp to [`NaiveDate::MIN`].
pub fn cutoff_date(reference: NaiveDate, window_days: i64) -> NaiveDate {
    Duration::try_days(window_days)
        .and_then(|window| reference.checked_sub_signed(window))
        .unwrap_or(NaiveDate::MIN)
}

/// Selects the 24-month chain of vesting deeds, newest first.
///
/// `reference` defaults to today's local date.
pub fn select_24_month_chain(
    records: &[ConveyanceRecord],
    reference: Option<NaiveDate>,
) -> Vec<ConveyanceRecord> {
    let reference = reference.unwrap_or_else(|| Local::now().date_naive());
    select_chain_window(records, reference, CHAIN_WINDOW_DAYS)
}

/// Smallest run of the newest vesting deeds whose earliest date is on or before
/// `reference - window_days`.
///
/// When the newest vesting deed is already older than the cutoff it is returned
/// alone. When every vesting deed is needed and the cutoff is still not reached,
/// all of them are returned.
pub fn select_chain_window(
    records: &[ConveyanceRecord],
    reference: NaiveDate,
    window_days: i64,
) -> Vec<ConveyanceRecord> {
    let cutoff = cutoff_date(reference, window_days);

    let mut vesting_deeds: Vec<&ConveyanceRecord> = records.iter().filter(|r| r.is_vesting()).collect();
    vesting_deeds.sort_by(|a, b| b.date().cmp(&a.date())); // stable: ties keep document order

    let Some((newest, older)) = vesting_deeds.split_first() else {
        tracing::info!("No vesting deeds among {} records", records.len());
        return Vec::new();
    };

    let mut result = vec![(*newest).clone()];

    if newest.date() < cutoff {
        tracing::info!(
            "Newest vesting deed ({}) predates cutoff {}; reporting it alone",
            newest.entry().date_string(),
            cutoff
        );
        return result;
    }

    let mut earliest = newest.date();
    for deed in older {
        result.push((*deed).clone());
        earliest = earliest.min(deed.date());
        if earliest <= cutoff {
            break;
        }
    }

    if earliest > cutoff {
        tracing::debug!("Vesting deeds exhausted before reaching cutoff {}; earliest is {}", cutoff, earliest);
    }

    result.sort_by(|a, b| b.date().cmp(&a.date()));
    tracing::info!("Selected {} of {} vesting deeds (cutoff {})", result.len(), vesting_deeds.len(), cutoff);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::classifier::classify;
    use crate::chain::record::CandidateEntry;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, instrument: &str, book_page: &str) -> ConveyanceRecord {
        let entry = CandidateEntry {
            date_string: crate::chain::date::format_date(date),
            grantor: "SELLER".to_string(),
            grantee: "BUYER".to_string(),
            instrument: instrument.to_string(),
            book_page: book_page.to_string(),
            ..Default::default()
        }
        .into_entry()
        .unwrap();
        classify(entry)
    }

    fn dates(records: &[ConveyanceRecord]) -> Vec<NaiveDate> {
        records.iter().map(|r| r.date()).collect()
    }

    #[test]
    fn test_cutoff_is_730_days_back() {
        assert_eq!(cutoff_date(ymd(2025, 1, 10), CHAIN_WINDOW_DAYS), ymd(2023, 1, 11));
    }

    #[test]
    fn test_oversized_window_clamps_to_min_date() {
        let reference = ymd(2025, 1, 10);
        assert_eq!(cutoff_date(reference, i64::MAX), NaiveDate::MIN);
        assert_eq!(cutoff_date(reference, i64::MAX / 1000), NaiveDate::MIN);
    }

    #[test]
    fn test_oversized_window_returns_every_vesting_deed() {
        let records = vec![
            record(ymd(2024, 1, 10), "WARRANTY DEED", "2-2"),
            record(ymd(1990, 1, 1), "WARRANTY DEED", "1-1"),
        ];
        let chain = select_chain_window(&records, ymd(2025, 1, 10), i64::MAX);
        assert_eq!(dates(&chain), vec![ymd(2024, 1, 10), ymd(1990, 1, 1)]);
    }

    #[test]
    fn test_window_extends_until_cutoff_reached() {
        let records = vec![
            record(ymd(2021, 3, 1), "WARRANTY DEED", "1-1"),
            record(ymd(2024, 1, 10), "WARRANTY DEED", "3-3"),
            record(ymd(2023, 6, 1), "QUITCLAIM DEED", "2-2"),
        ];
        let chain = select_24_month_chain(&records, Some(ymd(2025, 1, 10)));
        // 2023-06-01 is still after the 2023-01-11 cutoff, so the 2021 deed is needed too.
        assert_eq!(dates(&chain), vec![ymd(2024, 1, 10), ymd(2023, 6, 1), ymd(2021, 3, 1)]);
    }

    #[test]
    fn test_window_stops_at_first_deed_reaching_cutoff() {
        let records = vec![
            record(ymd(2024, 1, 10), "WARRANTY DEED", "4-4"),
            record(ymd(2022, 6, 1), "WARRANTY DEED", "3-3"),
            record(ymd(2019, 3, 1), "WARRANTY DEED", "2-2"),
            record(ymd(2015, 3, 1), "WARRANTY DEED", "1-1"),
        ];
        let chain = select_24_month_chain(&records, Some(ymd(2025, 1, 10)));
        assert_eq!(dates(&chain), vec![ymd(2024, 1, 10), ymd(2022, 6, 1)]);
    }

    #[test]
    fn test_stale_newest_deed_returned_alone() {
        let records = vec![
            record(ymd(2020, 1, 1), "WARRANTY DEED", "2-2"),
            record(ymd(2010, 1, 1), "WARRANTY DEED", "1-1"),
        ];
        let chain = select_24_month_chain(&records, Some(ymd(2025, 1, 10)));
        assert_eq!(dates(&chain), vec![ymd(2020, 1, 1)]);
    }

    #[test]
    fn test_single_recent_deed_returned_alone() {
        let records = vec![record(ymd(2024, 12, 1), "WARRANTY DEED", "1-1")];
        let chain = select_24_month_chain(&records, Some(ymd(2025, 1, 10)));
        assert_eq!(dates(&chain), vec![ymd(2024, 12, 1)]);
    }

    #[test]
    fn test_all_deeds_returned_when_cutoff_never_reached() {
        let records = vec![
            record(ymd(2024, 12, 1), "WARRANTY DEED", "2-2"),
            record(ymd(2024, 2, 1), "GRANT DEED", "1-1"),
        ];
        let chain = select_24_month_chain(&records, Some(ymd(2025, 1, 10)));
        assert_eq!(dates(&chain), vec![ymd(2024, 12, 1), ymd(2024, 2, 1)]);
    }

    #[test]
    fn test_non_vesting_records_ignored() {
        let records = vec![
            record(ymd(2024, 12, 1), "DEED OF TRUST", "3-3"),
            record(ymd(2024, 6, 1), "MORTGAGE", "2-2"),
        ];
        assert!(select_24_month_chain(&records, Some(ymd(2025, 1, 10))).is_empty());
        assert!(select_24_month_chain(&[], Some(ymd(2025, 1, 10))).is_empty());
    }

    #[test]
    fn test_equal_dates_keep_document_order() {
        let records = vec![
            record(ymd(2024, 5, 1), "WARRANTY DEED", "1-1"),
            record(ymd(2024, 5, 1), "WARRANTY DEED", "1-2"),
            record(ymd(2020, 5, 1), "WARRANTY DEED", "1-3"),
        ];
        let chain = select_24_month_chain(&records, Some(ymd(2025, 1, 10)));
        let pages: Vec<&str> = chain.iter().map(|r| r.entry().book_page()).collect();
        assert_eq!(pages, vec!["1-1", "1-2", "1-3"]);
    }

    #[test]
    fn test_selection_is_idempotent() {
        let reference = ymd(2025, 1, 10);
        let records = vec![
            record(ymd(2024, 1, 10), "WARRANTY DEED", "3-3"),
            record(ymd(2023, 6, 1), "WARRANTY DEED", "2-2"),
            record(ymd(2021, 3, 1), "WARRANTY DEED", "1-1"),
            record(ymd(2018, 3, 1), "WARRANTY DEED", "0-0"),
        ];
        let first = select_24_month_chain(&records, Some(reference));
        let second = select_24_month_chain(&first, Some(reference));
        assert_eq!(first, second);
    }

    #[test]
    fn test_result_satisfies_coverage_invariant() {
        let reference = ymd(2025, 1, 10);
        let cutoff = cutoff_date(reference, CHAIN_WINDOW_DAYS);
        let records = vec![
            record(ymd(2024, 8, 1), "WARRANTY DEED", "4-4"),
            record(ymd(2024, 3, 1), "DEED OF TRUST", "3-3"),
            record(ymd(2022, 11, 30), "QUITCLAIM DEED", "2-2"),
            record(ymd(2001, 1, 1), "WARRANTY DEED", "1-1"),
        ];
        let chain = select_24_month_chain(&records, Some(reference));
        let earliest = chain.iter().map(|r| r.date()).min().unwrap();
        assert!(earliest <= cutoff);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_custom_window_length() {
        let records = vec![
            record(ymd(2024, 12, 1), "WARRANTY DEED", "2-2"),
            record(ymd(2024, 10, 1), "WARRANTY DEED", "1-1"),
        ];
        let chain = select_chain_window(&records, ymd(2025, 1, 10), 30);
        assert_eq!(dates(&chain), vec![ymd(2024, 12, 1)]);
    }
}
