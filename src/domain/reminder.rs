// The reminder arithmetic. Everything here is pure: the reference date is
// always a parameter, so the engine is deterministic and testable.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::property::join_address;

/// The default due window: swept 11 to 12 months ago, one month of lead
/// time before the annual anniversary.
pub const DEFAULT_MIN_MONTHS: i32 = 11;
pub const DEFAULT_MAX_MONTHS: i32 = 12;

/// Whole calendar months between `last_swept` and `today`, ignoring the
/// day-of-month entirely: 2024-01-31 and 2024-01-01 are both exactly one
/// month before any day in February 2024. `None` means never swept, which
/// behaves as unbounded — greater than any finite window.
pub fn months_since(last_swept: Option<NaiveDate>, today: NaiveDate) -> Option<i32> {
    let date = last_swept?;
    Some((today.year() - date.year()) * 12 + (today.month() as i32 - date.month() as i32))
}

/// Inclusive containment in `[min_months, max_months]`. A never-swept
/// property (`None`) is outside every finite window: properties with no
/// recorded history are not nagged automatically.
pub fn in_window(months: Option<i32>, min_months: i32, max_months: i32) -> bool {
    matches!(months, Some(m) if m >= min_months && m <= max_months)
}

/// The month-offset bucket a months-since value falls into, if any.
/// Offset 0 is "due this month" (11-12 months), 1 is next month, and so on.
/// Built on the same arithmetic as the due query, so a discovered offset is
/// guaranteed to yield at least one due property.
pub fn month_offset(months: Option<i32>) -> Option<i32> {
    match months {
        Some(m) if m >= DEFAULT_MIN_MONTHS => Some(m - DEFAULT_MIN_MONTHS),
        _ => None,
    }
}

/// A property due for a reminder, shaped for the reminders table and the
/// CSV / spreadsheet exports. Derived, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct ReminderCandidate {
    pub property_id: i64,
    pub customer_name: String,
    pub address_line_1: String,
    pub address_line_2: Option<String>,
    pub town: String,
    pub postcode: Option<String>,
    pub chimney_count: i64,
    pub square_feet: Option<i64>,
    pub notes: Option<String>,
    pub last_cleaned_date: Option<NaiveDate>,
    pub months_since_last_clean: i32,
    pub last_reminder_date: Option<NaiveDateTime>,
}

impl ReminderCandidate {
    pub fn address_full(&self) -> String {
        join_address(
            &self.address_line_1,
            self.address_line_2.as_deref(),
            &self.town,
            self.postcode.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn months_since_ignores_day_of_month() {
        let now = d(2024, 2, 1);
        assert_eq!(months_since(Some(d(2024, 1, 31)), now), Some(1));
        assert_eq!(months_since(Some(d(2024, 1, 1)), now), Some(1));
    }

    #[test]
    fn months_since_crosses_year_boundaries() {
        assert_eq!(months_since(Some(d(2023, 3, 1)), d(2024, 3, 15)), Some(12));
        assert_eq!(months_since(Some(d(2023, 4, 1)), d(2024, 3, 15)), Some(11));
        assert_eq!(months_since(Some(d(2022, 11, 30)), d(2024, 1, 2)), Some(14));
    }

    #[test]
    fn months_since_never_swept_is_none() {
        assert_eq!(months_since(None, d(2024, 3, 15)), None);
    }

    #[test]
    fn window_is_inclusive_both_ends() {
        assert!(in_window(Some(11), 11, 12));
        assert!(in_window(Some(12), 11, 12));
        assert!(!in_window(Some(10), 11, 12));
        assert!(!in_window(Some(13), 11, 12));
    }

    #[test]
    fn never_swept_is_outside_every_finite_window() {
        assert!(!in_window(None, 11, 12));
        assert!(!in_window(None, 0, i32::MAX));
    }

    #[test]
    fn month_offset_starts_at_eleven_months() {
        assert_eq!(month_offset(Some(10)), None);
        assert_eq!(month_offset(Some(11)), Some(0));
        assert_eq!(month_offset(Some(12)), Some(1));
        assert_eq!(month_offset(Some(24)), Some(13));
        assert_eq!(month_offset(None), None);
    }
}
