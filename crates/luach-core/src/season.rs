//! Summer/winter season classification.
//!
//! The community switches between its summer and winter rule set on fixed
//! calendar dates, not on the actual clock-change weekend. The cutovers are
//! March 29 and October 26, both inclusive.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Rule-set season for a schedule run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Summer,
    Winter,
}

impl Season {
    /// Classify a date.
    ///
    /// Summer is the closed interval March 29 -- October 26 of the date's
    /// own year; everything else is winter. Total over all valid dates.
    pub fn for_date(date: NaiveDate) -> Season {
        let start = NaiveDate::from_ymd_opt(date.year(), 3, 29);
        let end = NaiveDate::from_ymd_opt(date.year(), 10, 26);
        match (start, end) {
            (Some(start), Some(end)) if start <= date && date <= end => Season::Summer,
            _ => Season::Winter,
        }
    }

    pub fn is_summer(self) -> bool {
        matches!(self, Season::Summer)
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Summer => write!(f, "summer"),
            Season::Winter => write!(f, "winter"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(Season::for_date(date(2025, 3, 28)), Season::Winter);
        assert_eq!(Season::for_date(date(2025, 3, 29)), Season::Summer);
        assert_eq!(Season::for_date(date(2025, 10, 26)), Season::Summer);
        assert_eq!(Season::for_date(date(2025, 10, 27)), Season::Winter);
    }

    #[test]
    fn midyear_and_midwinter() {
        assert_eq!(Season::for_date(date(2025, 7, 4)), Season::Summer);
        assert_eq!(Season::for_date(date(2025, 1, 10)), Season::Winter);
        assert_eq!(Season::for_date(date(2024, 12, 6)), Season::Winter);
    }

    #[test]
    fn classification_is_per_year() {
        // Same calendar day, different years, same answer.
        assert_eq!(Season::for_date(date(2024, 5, 1)), Season::Summer);
        assert_eq!(Season::for_date(date(2026, 5, 1)), Season::Summer);
    }
}
