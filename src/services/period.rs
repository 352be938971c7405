//! Period windowing
//!
//! Resolves an analytics window, given as a count of months that includes the
//! current one, into concrete calendar-month buckets anchored at a reference
//! date. Callers pass "today" explicitly so results are reproducible; the
//! binary passes the local wall-clock date.

use chrono::{Local, NaiveDate};

use crate::error::{FinTrackError, FinTrackResult};
use crate::models::Month;

/// Windows at least this long carry the year in their labels
const LABEL_YEAR_THRESHOLD: u32 = 12;

/// Longest analytics window, in months
pub const MAX_PERIOD: u32 = 120;

/// One calendar-month bucket of an analytics window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBucket {
    pub month: Month,
    /// "YYYY-MM"
    pub key: String,
    /// Short display label ("Jun" or "Jun 25")
    pub label: String,
}

impl MonthBucket {
    fn new(month: Month, with_year: bool) -> Self {
        Self {
            month,
            key: month.to_string(),
            label: month.short_label(with_year),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.month.contains(date)
    }
}

/// The local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Clamp a requested window length into `1..=MAX_PERIOD`
pub fn clamp_period(period: u32) -> u32 {
    period.clamp(1, MAX_PERIOD)
}

/// Check a user-supplied window length
pub fn validate_period(period: u32) -> FinTrackResult<u32> {
    if period == 0 || period > MAX_PERIOD {
        return Err(FinTrackError::Validation(format!(
            "Analytics period must be between 1 and {} months, got {}",
            MAX_PERIOD, period
        )));
    }
    Ok(period)
}

/// Buckets for the `period` months ending with the month of `today`,
/// ordered oldest to newest
pub fn month_window(period: u32, today: NaiveDate) -> Vec<MonthBucket> {
    let period = clamp_period(period);
    let current = Month::of(today);
    let with_year = period >= LABEL_YEAR_THRESHOLD;

    (0..period)
        .rev()
        .map(|back| MonthBucket::new(current.minus(back), with_year))
        .collect()
}

/// The single bucket for the month containing `today`
pub fn current_month(today: NaiveDate) -> MonthBucket {
    MonthBucket::new(Month::of(today), false)
}

/// Inclusive date range covered by a window
pub fn window_bounds(buckets: &[MonthBucket]) -> Option<(NaiveDate, NaiveDate)> {
    let first = buckets.first()?;
    let last = buckets.last()?;
    Some((first.month.start_date(), last.month.end_date()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_three_month_window() {
        let buckets = month_window(3, date(2025, 6, 15));
        let keys: Vec<_> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["2025-04", "2025-05", "2025-06"]);
        let labels: Vec<_> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Apr", "May", "Jun"]);
    }

    #[test]
    fn test_window_crosses_year_boundary() {
        let buckets = month_window(4, date(2025, 2, 1));
        let keys: Vec<_> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["2024-11", "2024-12", "2025-01", "2025-02"]);
    }

    #[test]
    fn test_zero_period_is_one_month() {
        let buckets = month_window(0, date(2025, 6, 30));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key, "2025-06");
    }

    #[test]
    fn test_period_upper_bound() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        assert_eq!(clamp_period(MAX_PERIOD), MAX_PERIOD);
        assert_eq!(clamp_period(MAX_PERIOD + 1), MAX_PERIOD);

        let window = month_window(u32::MAX, today);
        assert_eq!(window.len(), MAX_PERIOD as usize);
        assert_eq!(window.last().unwrap().key, "2025-06");
        assert_eq!(window[0].key, "2015-07");
    }

    #[test]
    fn test_validate_period() {
        assert_eq!(validate_period(1).unwrap(), 1);
        assert_eq!(validate_period(MAX_PERIOD).unwrap(), MAX_PERIOD);
        assert!(validate_period(0).unwrap_err().is_validation());
        assert!(validate_period(MAX_PERIOD + 1).unwrap_err().is_validation());
        assert!(validate_period(u32::MAX).unwrap_err().is_validation());
    }

    #[test]
    fn test_long_window_labels_carry_year() {
        let buckets = month_window(12, date(2025, 6, 1));
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0].label, "Jul 24");
        assert_eq!(buckets[11].label, "Jun 25");
    }

    #[test]
    fn test_bucket_membership() {
        let buckets = month_window(3, date(2025, 6, 15));
        assert!(!buckets.iter().any(|b| b.contains(date(2025, 3, 31))));
        assert!(buckets[0].contains(date(2025, 4, 1)));
        assert!(buckets[2].contains(date(2025, 6, 30)));
        assert!(!buckets.iter().any(|b| b.contains(date(2025, 7, 1))));
    }

    #[test]
    fn test_window_bounds() {
        let buckets = month_window(3, date(2024, 3, 10));
        assert_eq!(
            window_bounds(&buckets),
            Some((date(2024, 1, 1), date(2024, 3, 31)))
        );
        assert_eq!(window_bounds(&[]), None);
    }

    #[test]
    fn test_current_month() {
        let bucket = current_month(date(2025, 12, 31));
        assert_eq!(bucket.key, "2025-12");
        assert_eq!(bucket.label, "Dec");
    }
}
