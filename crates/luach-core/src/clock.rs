//! Minute-of-day clock arithmetic.
//!
//! Every schedule rule works on whole minutes since midnight. [`ClockTime`]
//! is the canonical internal representation; the `"HH:MM"` string form only
//! exists at input/output boundaries (config, reference tables, display).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Minutes in a day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Round a minute count down to the nearest 5-minute boundary.
///
/// Floors toward negative infinity, so a negative offset stays negative
/// instead of sliding up to zero. Callers deriving times from anchors must
/// still reject negative results as invalid times of day.
pub fn round_down5(minutes: i32) -> i32 {
    minutes.div_euclid(5) * 5
}

/// A wall-clock time as minutes since midnight, in `[0, 1439]`.
///
/// Serializes as `"HH:MM"` so TOML reference tables and JSON output carry
/// human-readable times while the engine keeps integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Build from a minute-of-day count.
    pub fn from_minutes(minutes: u16) -> Result<Self, DataError> {
        if minutes < MINUTES_PER_DAY {
            Ok(Self(minutes))
        } else {
            Err(DataError::MinutesOutOfDay {
                minutes: u32::from(minutes),
            })
        }
    }

    /// Build from an hour/minute pair.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, DataError> {
        if hour < 24 && minute < 60 {
            Ok(Self((hour * 60 + minute) as u16))
        } else {
            Err(DataError::InvalidClockTime {
                value: format!("{hour:02}:{minute:02}"),
            })
        }
    }

    /// Const constructor for compile-time-known times.
    ///
    /// Panics at compile time on an invalid hour/minute pair.
    pub const fn fixed(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60);
        Self(hour * 60 + minute)
    }

    /// Build from a signed minute count, rejecting anything outside the day.
    pub fn from_signed_minutes(minutes: i32) -> Option<Self> {
        if (0..i32::from(MINUTES_PER_DAY)).contains(&minutes) {
            Some(Self(minutes as u16))
        } else {
            None
        }
    }

    /// Parse `"HH:MM"`.
    pub fn parse(value: &str) -> Result<Self, DataError> {
        let invalid = || DataError::InvalidClockTime {
            value: value.to_string(),
        };
        let (h, m) = value.split_once(':').ok_or_else(invalid)?;
        let hour: u32 = h.trim().parse().map_err(|_| invalid())?;
        let minute: u32 = m.trim().parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Hour component (0-23).
    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    /// Minute component (0-59).
    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Round down to the nearest 5-minute boundary.
    pub fn round_down5(self) -> Self {
        // Rounding down never leaves the valid range.
        Self(self.0 / 5 * 5)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_and_format_roundtrip() {
        let t = ClockTime::parse("16:17").unwrap();
        assert_eq!(t.minutes(), 977);
        assert_eq!(t.to_string(), "16:17");
        assert_eq!(ClockTime::parse("00:00").unwrap().minutes(), 0);
        assert_eq!(ClockTime::parse("23:59").unwrap().minutes(), 1439);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(ClockTime::parse("24:00").is_err());
        assert!(ClockTime::parse("12:60").is_err());
        assert!(ClockTime::parse("1230").is_err());
        assert!(ClockTime::parse("ab:cd").is_err());
        assert!(ClockTime::parse("").is_err());
    }

    #[test]
    fn from_minutes_bounds() {
        assert!(ClockTime::from_minutes(1439).is_ok());
        assert!(ClockTime::from_minutes(1440).is_err());
    }

    #[test]
    fn round_down5_floors_negatives() {
        assert_eq!(round_down5(-3), -5);
        assert_eq!(round_down5(-5), -5);
        assert_eq!(round_down5(-1), -5);
        assert_eq!(round_down5(0), 0);
        assert_eq!(round_down5(977), 975);
    }

    #[test]
    fn serde_uses_hhmm_strings() {
        let t = ClockTime::fixed(7, 45);
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"07:45\"");
        let back: ClockTime = serde_json::from_str("\"07:45\"").unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<ClockTime>("\"25:00\"").is_err());
    }

    proptest! {
        #[test]
        fn round_down5_is_lower_multiple(m in 0i32..10_000) {
            let r = round_down5(m);
            prop_assert!(r <= m);
            prop_assert!(m - r < 5);
            prop_assert_eq!(r % 5, 0);
        }

        #[test]
        fn round_down5_is_idempotent(m in -10_000i32..10_000) {
            prop_assert_eq!(round_down5(round_down5(m)), round_down5(m));
        }

        #[test]
        fn clock_round_matches_free_fn(m in 0u16..1440) {
            let t = ClockTime::from_minutes(m).unwrap();
            prop_assert_eq!(
                i32::from(t.round_down5().minutes()),
                round_down5(i32::from(m))
            );
        }
    }
}
