//! UTC calendar helpers
//!
//! Every day boundary in the game is a UTC day so streaks do not depend on
//! the player's time zone.

use chrono::{NaiveDate, Utc};

#[must_use]
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Wall clock in milliseconds since the epoch, for guess timestamps
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[must_use]
pub fn is_yesterday(date: NaiveDate, today: NaiveDate) -> bool {
    today.pred_opt() == Some(date)
}

/// Parse an ISO `YYYY-MM-DD` date
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yesterday_crosses_month_and_year() {
        let d = |s| parse_date(s).unwrap();
        assert!(is_yesterday(d("2026-10-17"), d("2026-10-18")));
        assert!(is_yesterday(d("2026-09-30"), d("2026-10-01")));
        assert!(is_yesterday(d("2025-12-31"), d("2026-01-01")));
        assert!(is_yesterday(d("2028-02-29"), d("2028-03-01")));
        assert!(!is_yesterday(d("2026-10-16"), d("2026-10-18")));
        assert!(!is_yesterday(d("2026-10-18"), d("2026-10-18")));
        assert!(!is_yesterday(d("2026-10-19"), d("2026-10-18")));
    }

    #[test]
    fn parse_date_accepts_iso_only() {
        assert!(parse_date("2026-10-18").is_some());
        assert!(parse_date(" 2026-10-18 ").is_some());
        assert!(parse_date("10/18/2026").is_none());
        assert!(parse_date("").is_none());
    }
}
