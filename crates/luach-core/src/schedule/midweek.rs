//! Midweek (Sunday--Thursday) prayer time derivation.
//!
//! Weekday times hang off two sunset/dusk computations for the coming Sunday
//! and Thursday. The solar provider is external; this module only consumes
//! its results as already-computed clock times.

use crate::clock::{round_down5, ClockTime};
use crate::error::ScheduleError;

use super::derived;

/// Minutes before the earlier sunset for the interim afternoon prayer.
const MINCHA_SUNSET_OFFSET: i32 = 20;

/// Minutes after Friday's Mincha/Kabbalat for the weekday evening prayer.
const ARVIT_MINCHA_OFFSET: i32 = 45;

/// Interim weekday Mincha: 20 minutes before the earlier of the Sunday and
/// Thursday sunsets, rounded down to a 5-minute boundary.
///
/// `None` when the offset lands before midnight -- no valid time exists and
/// the caller shows a placeholder instead.
pub fn weekday_mincha(
    sunday_sunset: ClockTime,
    thursday_sunset: ClockTime,
) -> Option<ClockTime> {
    let earlier = i32::from(sunday_sunset.min(thursday_sunset).minutes());
    let base = earlier - MINCHA_SUNSET_OFFSET;
    if base < 0 {
        return None;
    }
    ClockTime::from_signed_minutes(round_down5(base))
}

/// Weekday Arvit pinned 45 minutes after Friday's Mincha/Kabbalat time.
///
/// # Errors
/// A valid anchor cannot go negative here; the only failure is the
/// (unrealistic) overflow past midnight, surfaced rather than wrapped.
pub fn weekday_arvit(mincha_kabbalat: ClockTime) -> Result<ClockTime, ScheduleError> {
    derived(
        "weekday_arvit",
        i32::from(mincha_kabbalat.minutes()) + ARVIT_MINCHA_OFFSET,
    )
}

/// Weekday Arvit from the earlier of the Sunday and Thursday dusk (tzeit)
/// computations, nudged 2 minutes past it.
pub fn weekday_arvit_from_dusk(
    sunday_dusk: ClockTime,
    thursday_dusk: ClockTime,
) -> Result<ClockTime, ScheduleError> {
    let earlier = i32::from(sunday_dusk.min(thursday_dusk).minutes());
    derived("weekday_arvit", earlier + 2)
}
