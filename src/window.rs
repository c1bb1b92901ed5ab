//! Creation-date filtering for topic summaries.

use chrono::{NaiveDate, NaiveDateTime};

use crate::forum::ForumError;

const FORUM_TIMESTAMP_FRACTIONAL: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const FORUM_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse a forum `created_at` value such as `2025-02-03T10:11:12.345Z`.
///
/// The fractional-second form is tried first; timestamps without fractions
/// fall back to the plain form. Both are read as UTC wall-clock time.
pub fn parse_forum_timestamp(value: &str) -> Result<NaiveDateTime, ForumError> {
    NaiveDateTime::parse_from_str(value, FORUM_TIMESTAMP_FRACTIONAL)
        .or_else(|_| NaiveDateTime::parse_from_str(value, FORUM_TIMESTAMP))
        .map_err(|_| ForumError::InvalidTimestamp(value.to_string()))
}

/// Parse a user-supplied bound: a bare date means midnight.
pub fn parse_bound(value: &str) -> Result<NaiveDateTime, ForumError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| parse_forum_timestamp(value))
        .map_err(|_| {
            ForumError::Config(format!(
                "Invalid date bound '{value}' (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)"
            ))
        })
}

/// Inclusive date range; a missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl DateWindow {
    /// A window that accepts every topic
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn new(from: Option<NaiveDateTime>, to: Option<NaiveDateTime>) -> Result<Self, ForumError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ForumError::Config(format!(
                    "Date window is empty: from {from} is after to {to}"
                )));
            }
        }
        Ok(Self { from, to })
    }

    pub fn from_bounds(from: Option<&str>, to: Option<&str>) -> Result<Self, ForumError> {
        let from = from.map(parse_bound).transpose()?;
        let to = to.map(parse_bound).transpose()?;
        Self::new(from, to)
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, created_at: NaiveDateTime) -> bool {
        self.from.is_none_or(|from| from <= created_at) && self.to.is_none_or(|to| created_at <= to)
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.from, self.to) {
            (None, None) => write!(f, "all dates"),
            (Some(from), None) => write!(f, "from {from}"),
            (None, Some(to)) => write!(f, "until {to}"),
            (Some(from), Some(to)) => write!(f, "{from} to {to}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_parses_fractional_timestamp() {
        let parsed = parse_forum_timestamp("2025-02-03T10:11:12.345Z").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2025, 2, 3).unwrap());
        assert_eq!(parsed.and_utc().timestamp_subsec_millis(), 345);
    }

    #[test]
    fn test_parses_whole_second_timestamp() {
        let parsed = parse_forum_timestamp("2025-02-03T10:11:12Z").unwrap();
        assert_eq!(parsed, at(2025, 2, 3, 10, 11, 12));
    }

    #[test]
    fn test_rejects_other_timestamp_shapes() {
        assert!(matches!(
            parse_forum_timestamp("2025-02-03 10:11:12"),
            Err(ForumError::InvalidTimestamp(_))
        ));
        assert!(parse_forum_timestamp("").is_err());
        assert!(parse_forum_timestamp("2025-02-03T10:11:12+01:00").is_err());
    }

    #[test]
    fn test_window_is_inclusive_on_both_ends() {
        let window = DateWindow::new(
            Some(at(2025, 1, 1, 0, 0, 0)),
            Some(at(2025, 4, 14, 0, 0, 0)),
        )
        .unwrap();

        assert!(window.contains(at(2025, 1, 1, 0, 0, 0)));
        assert!(window.contains(at(2025, 4, 14, 0, 0, 0)));
        assert!(window.contains(at(2025, 2, 20, 9, 30, 0)));
        assert!(!window.contains(at(2024, 12, 31, 23, 59, 59)));
        // Upper bound is midnight, so later on the same day falls outside
        assert!(!window.contains(at(2025, 4, 14, 0, 0, 1)));
    }

    #[test]
    fn test_open_bounds() {
        let from_only = DateWindow::new(Some(at(2025, 1, 1, 0, 0, 0)), None).unwrap();
        assert!(from_only.contains(at(2030, 1, 1, 0, 0, 0)));
        assert!(!from_only.contains(at(2020, 1, 1, 0, 0, 0)));

        let to_only = DateWindow::new(None, Some(at(2025, 1, 1, 0, 0, 0))).unwrap();
        assert!(to_only.contains(at(2000, 1, 1, 0, 0, 0)));
        assert!(!to_only.contains(at(2025, 1, 2, 0, 0, 0)));

        let all = DateWindow::unbounded();
        assert!(all.is_unbounded());
        assert!(all.contains(at(1970, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_bound_formats() {
        assert_eq!(parse_bound("2025-01-01").unwrap(), at(2025, 1, 1, 0, 0, 0));
        assert_eq!(
            parse_bound("2025-01-01T08:30:00").unwrap(),
            at(2025, 1, 1, 8, 30, 0)
        );
        assert_eq!(
            parse_bound(" 2025-01-01 08:30:00 ").unwrap(),
            at(2025, 1, 1, 8, 30, 0)
        );
        assert!(matches!(parse_bound("01/01/2025"), Err(ForumError::Config(_))));
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let result = DateWindow::from_bounds(Some("2025-04-14"), Some("2025-01-01"));
        assert!(matches!(result, Err(ForumError::Config(_))));
    }

    #[test]
    fn test_display() {
        let window = DateWindow::from_bounds(Some("2025-01-01"), None).unwrap();
        assert_eq!(window.to_string(), "from 2025-01-01 00:00:00");
        assert_eq!(DateWindow::unbounded().to_string(), "all dates");
    }
}
