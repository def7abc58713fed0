//! Weekly Shabbat schedule rule engine.
//!
//! Maps one pair of anchor times (candle-lighting, Havdalah) plus the
//! season to the full set of named event times for the week:
//! - Fixed events keep their wall-clock value year-round
//! - Anchor-relative events are offset from candle-lighting or Shabbat end
//!   and rounded down to 5-minute boundaries
//! - Arvit, Mincha 2 and Shiur Rav form a strict dependency chain
//!
//! The engine is a pure function of its inputs; derived values that would
//! leave the day are reported, never wrapped.

pub mod midweek;

use serde::{Deserialize, Serialize};

use crate::clock::{round_down5, ClockTime};
use crate::error::ScheduleError;
use crate::season::Season;

/// Candle-lighting and Havdalah anchors for one Shabbat.
///
/// Supplied per week by the calendar provider; `shabbat_end` is later than
/// `candle_lighting` within the same Shabbat occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorTimes {
    pub candle_lighting: ClockTime,
    pub shabbat_end: ClockTime,
}

/// Derived event times for one Shabbat week.
///
/// Carries the season it was derived under so presentation layers can apply
/// season-conditional display (the summer Tehilim prefix); the stored times
/// themselves are season-agnostic values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub season: Season,
    pub mincha_kabbalat: ClockTime,
    pub shir_hashirim: ClockTime,
    pub shacharit: ClockTime,
    pub mincha_gdola: ClockTime,
    pub tehilim: ClockTime,
    pub parashat_hashavua: ClockTime,
    pub arvit: ClockTime,
    pub mincha_2: ClockTime,
    pub shiur_rav: ClockTime,
    pub shiur_nashim: ClockTime,
}

/// Morning service, year-round.
const SHACHARIT: ClockTime = ClockTime::fixed(7, 45);
/// Women's shiur, year-round.
const SHIUR_NASHIM: ClockTime = ClockTime::fixed(16, 0);

/// Round an offset minute count down and reject values outside the day.
pub(crate) fn derived(event: &'static str, minutes: i32) -> Result<ClockTime, ScheduleError> {
    let rounded = round_down5(minutes);
    ClockTime::from_signed_minutes(rounded).ok_or(ScheduleError::InvalidDerivedTime {
        event,
        minutes: rounded,
    })
}

impl WeeklySchedule {
    /// Apply the rule table to one week's anchors.
    ///
    /// # Errors
    /// Returns [`ScheduleError::InvalidDerivedTime`] when an offset pushes a
    /// derived event outside `[0, 1439]` (a pathologically early Havdalah).
    pub fn derive(anchors: AnchorTimes, season: Season) -> Result<Self, ScheduleError> {
        let candles = i32::from(anchors.candle_lighting.minutes());
        let end = i32::from(anchors.shabbat_end.minutes());

        let mincha_gdola_base = if season.is_summer() { 13 * 60 } else { 12 * 60 + 30 };
        let arvit_offset = if season.is_summer() { 10 } else { 5 };

        let arvit = derived("arvit", end - arvit_offset)?;
        let mincha_2 = derived("mincha_2", i32::from(arvit.minutes()) - 90)?;
        let shiur_rav = derived("shiur_rav", i32::from(mincha_2.minutes()) - 45)?;

        Ok(Self {
            season,
            // Candle-lighting itself, deliberately unrounded.
            mincha_kabbalat: anchors.candle_lighting,
            shir_hashirim: derived("shir_hashirim", candles - 10)?,
            shacharit: SHACHARIT,
            mincha_gdola: derived("mincha_gdola", mincha_gdola_base)?,
            tehilim: derived("tehilim", 13 * 60 + 45)?,
            parashat_hashavua: derived("parashat_hashavua", end - 3 * 60)?,
            arvit,
            mincha_2,
            shiur_rav,
            shiur_nashim: SHIUR_NASHIM,
        })
    }

    /// The named events in board order.
    pub fn events(&self) -> [(&'static str, ClockTime); 10] {
        [
            ("shir_hashirim", self.shir_hashirim),
            ("mincha_kabbalat", self.mincha_kabbalat),
            ("shacharit", self.shacharit),
            ("mincha_gdola", self.mincha_gdola),
            ("tehilim", self.tehilim),
            ("shiur_nashim", self.shiur_nashim),
            ("parashat_hashavua", self.parashat_hashavua),
            ("shiur_rav", self.shiur_rav),
            ("mincha_2", self.mincha_2),
            ("arvit", self.arvit),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(text: &str) -> ClockTime {
        ClockTime::parse(text).unwrap()
    }

    fn anchors(candles: &str, end: &str) -> AnchorTimes {
        AnchorTimes {
            candle_lighting: t(candles),
            shabbat_end: t(end),
        }
    }

    #[test]
    fn winter_week_from_anchor_times() {
        let schedule =
            WeeklySchedule::derive(anchors("16:17", "17:16"), Season::Winter).unwrap();

        assert_eq!(schedule.mincha_kabbalat, t("16:17"));
        assert_eq!(schedule.shir_hashirim, t("16:05"));
        assert_eq!(schedule.shacharit, t("07:45"));
        assert_eq!(schedule.mincha_gdola, t("12:30"));
        assert_eq!(schedule.tehilim, t("13:45"));
        assert_eq!(schedule.shiur_nashim, t("16:00"));
        assert_eq!(schedule.parashat_hashavua, t("14:15"));
        assert_eq!(schedule.arvit, t("17:10"));
        assert_eq!(schedule.mincha_2, t("15:40"));
        assert_eq!(schedule.shiur_rav, t("14:55"));
    }

    #[test]
    fn summer_rules_shift_afternoon_and_arvit() {
        let schedule =
            WeeklySchedule::derive(anchors("19:26", "20:28"), Season::Summer).unwrap();

        assert_eq!(schedule.mincha_gdola, t("13:00"));
        // 20:28 - 10 = 20:18 -> 20:15
        assert_eq!(schedule.arvit, t("20:15"));
        assert_eq!(schedule.mincha_2, t("18:45"));
        assert_eq!(schedule.shiur_rav, t("18:00"));
        // Tehilim value is season-agnostic; display handles the prefix.
        assert_eq!(schedule.tehilim, t("13:45"));
    }

    #[test]
    fn mincha_kabbalat_is_not_rounded() {
        let schedule =
            WeeklySchedule::derive(anchors("19:33", "20:33"), Season::Summer).unwrap();
        assert_eq!(schedule.mincha_kabbalat, t("19:33"));
    }

    #[test]
    fn arvit_chain_depends_on_arvit() {
        // arvit 17:10 -> mincha_2 = round5(17:10 - 90) = 15:40
        //             -> shiur_rav = round5(15:40 - 45) = 14:55
        let schedule =
            WeeklySchedule::derive(anchors("16:30", "17:16"), Season::Winter).unwrap();
        assert_eq!(
            schedule.mincha_2.minutes(),
            (i32::from(schedule.arvit.minutes()) - 90) as u16 / 5 * 5
        );
        assert_eq!(
            schedule.shiur_rav.minutes(),
            (schedule.mincha_2.minutes() - 45) / 5 * 5
        );
    }

    #[test]
    fn pathologically_early_havdalah_is_an_error() {
        // Shabbat "ending" at 02:30 pushes parashat_hashavua negative.
        let err =
            WeeklySchedule::derive(anchors("16:17", "02:30"), Season::Winter).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InvalidDerivedTime { event: "parashat_hashavua", .. }
        ));

        // An even earlier end breaks the Arvit dependency chain first.
        let err =
            WeeklySchedule::derive(anchors("16:17", "02:00"), Season::Winter).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InvalidDerivedTime { event: "shiur_rav", .. }
        ));
    }

    #[test]
    fn events_cover_all_ten_keys() {
        let schedule =
            WeeklySchedule::derive(anchors("18:59", "19:54"), Season::Summer).unwrap();
        let events = schedule.events();
        assert_eq!(events.len(), 10);
        assert!(events.iter().any(|(name, _)| *name == "tehilim"));
        assert!(events.iter().any(|(name, _)| *name == "arvit"));
    }
}
