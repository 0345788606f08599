// src/chain/date.rs
use chrono::NaiveDate;

/// Parses a recording date written as `MM/DD/YYYY`.
///
/// Single-digit months and days are accepted (`1/5/2024`). Anything other than
/// three all-digit parts separated by `/`, or a month/day that does not exist
/// on the calendar, yields `None`.
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = date_str.trim().split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let month = parse_number(parts[0])?;
    let day = parse_number(parts[1])?;
    let year = parse_number(parts[2])?;

    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Formats a date back into the zero-padded `MM/DD/YYYY` form.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

// `str::parse` accepts a leading `+`, recording dates never carry one.
fn parse_number(part: &str) -> Option<u32> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_dates() {
        assert_eq!(parse_date("01/10/2024"), NaiveDate::from_ymd_opt(2024, 1, 10));
        assert_eq!(parse_date("12/31/1999"), NaiveDate::from_ymd_opt(1999, 12, 31));
        assert_eq!(parse_date("02/29/2024"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_date(" 3/7/2021 "), NaiveDate::from_ymd_opt(2021, 3, 7));
    }

    #[test]
    fn test_round_trip_modulo_padding() {
        for text in ["01/10/2024", "11/30/2019", "06/01/2023"] {
            let date = parse_date(text).expect("valid date");
            assert_eq!(format_date(date), text);
        }
        let unpadded = parse_date("3/7/2021").unwrap();
        assert_eq!(format_date(unpadded), "03/07/2021");
    }

    #[test]
    fn test_malformed_dates_rejected() {
        let malformed = [
            "",
            "01/10",
            "01/10/2024/5",
            "01-10-2024",
            "AB/10/2024",
            "01/1O/2024",
            "+1/10/2024",
            "13/01/2024",
            "00/10/2024",
            "02/30/2023",
            "02/29/2023",
            "01//2024",
        ];
        for text in malformed {
            assert!(parse_date(text).is_none(), "expected {:?} to be rejected", text);
        }
    }
}
