//! Notice-board layout for the weekly schedule.
//!
//! The community prints the week onto a fixed image template; this module
//! owns the template's pixel geometry and the season-conditional display
//! rules, and hands a drawing backend a flat list of positioned text lines.
//! Keeping composition here lets the engine output stay season-agnostic.

use serde::Serialize;

use crate::clock::ClockTime;
use crate::schedule::WeeklySchedule;

/// X position of the time column.
const TIME_COLUMN_X: u32 = 120;

/// Y positions of the ten event rows, top to bottom in board order.
const EVENT_ROW_Y: [u32; 10] = [400, 475, 510, 550, 590, 630, 670, 710, 750, 790];

/// Candle-lighting row, between Shir HaShirim and Shacharit.
const CANDLE_ROW_Y: u32 = 440;
/// Shabbat-end row under the main block.
const SHABBAT_END_ROW_Y: u32 = 830;
/// Weekday rows at the bottom of the board.
const WEEKDAY_MINCHA_ROW_Y: u32 = 950;
const WEEKDAY_ARVIT_ROW_Y: u32 = 990;
/// Parasha header slot.
const PARASHA_POS: (u32, u32) = (300, 280);

/// Displayed alongside the Tehilim value during the summer season.
const TEHILIM_SUMMER_PREFIX: &str = "17:00/";

/// Ink color a line is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ink {
    Black,
    Green,
    Blue,
}

/// One positioned text line for the drawing backend.
#[derive(Debug, Clone, Serialize)]
pub struct BoardLine {
    pub x: u32,
    pub y: u32,
    pub text: String,
    pub ink: Ink,
}

/// Everything the board shows beyond the derived schedule itself.
#[derive(Debug, Clone)]
pub struct BoardWeek<'a> {
    pub schedule: &'a WeeklySchedule,
    pub shabbat_end: ClockTime,
    pub parasha_hebrew: &'a str,
    pub weekday_mincha: Option<ClockTime>,
    pub weekday_arvit: Option<ClockTime>,
}

/// Template image to print on.
pub fn template_for(mevarchim: bool) -> &'static str {
    if mevarchim {
        "template_rosh_hodesh.jpg"
    } else {
        "template.jpg"
    }
}

/// Compose the board lines for one week.
pub fn compose(week: &BoardWeek<'_>) -> Vec<BoardLine> {
    let schedule = week.schedule;
    let mut lines = Vec::new();

    for ((name, time), y) in schedule.events().into_iter().zip(EVENT_ROW_Y) {
        let text = if name == "tehilim" && schedule.season.is_summer() {
            format!("{TEHILIM_SUMMER_PREFIX}{time}")
        } else {
            time.to_string()
        };
        lines.push(BoardLine {
            x: TIME_COLUMN_X,
            y,
            text,
            ink: Ink::Black,
        });
    }

    lines.push(BoardLine {
        x: TIME_COLUMN_X,
        y: CANDLE_ROW_Y,
        text: schedule.mincha_kabbalat.to_string(),
        ink: Ink::Black,
    });
    lines.push(BoardLine {
        x: TIME_COLUMN_X,
        y: SHABBAT_END_ROW_Y,
        text: week.shabbat_end.to_string(),
        ink: Ink::Black,
    });

    if let Some(mincha) = week.weekday_mincha {
        lines.push(BoardLine {
            x: TIME_COLUMN_X,
            y: WEEKDAY_MINCHA_ROW_Y,
            text: mincha.to_string(),
            ink: Ink::Green,
        });
    }
    if let Some(arvit) = week.weekday_arvit {
        lines.push(BoardLine {
            x: TIME_COLUMN_X,
            y: WEEKDAY_ARVIT_ROW_Y,
            text: arvit.to_string(),
            ink: Ink::Green,
        });
    }

    lines.push(BoardLine {
        x: PARASHA_POS.0,
        y: PARASHA_POS.1,
        text: week.parasha_hebrew.to_string(),
        ink: Ink::Blue,
    });

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::AnchorTimes;
    use crate::season::Season;

    fn t(text: &str) -> ClockTime {
        ClockTime::parse(text).unwrap()
    }

    fn schedule(season: Season) -> WeeklySchedule {
        WeeklySchedule::derive(
            AnchorTimes {
                candle_lighting: t("18:59"),
                shabbat_end: t("19:54"),
            },
            season,
        )
        .unwrap()
    }

    fn line_at<'a>(lines: &'a [BoardLine], y: u32) -> &'a BoardLine {
        lines.iter().find(|line| line.y == y).unwrap()
    }

    #[test]
    fn winter_tehilim_shows_value_alone() {
        let schedule = schedule(Season::Winter);
        let week = BoardWeek {
            schedule: &schedule,
            shabbat_end: t("19:54"),
            parasha_hebrew: "שמיני",
            weekday_mincha: None,
            weekday_arvit: None,
        };
        let lines = compose(&week);
        assert_eq!(line_at(&lines, 590).text, "13:45");
    }

    #[test]
    fn summer_tehilim_gets_the_prefix() {
        let schedule = schedule(Season::Summer);
        let week = BoardWeek {
            schedule: &schedule,
            shabbat_end: t("19:54"),
            parasha_hebrew: "שמיני",
            weekday_mincha: None,
            weekday_arvit: None,
        };
        let lines = compose(&week);
        assert_eq!(line_at(&lines, 590).text, "17:00/13:45");
    }

    #[test]
    fn weekday_rows_render_only_when_present() {
        let schedule = schedule(Season::Summer);
        let mut week = BoardWeek {
            schedule: &schedule,
            shabbat_end: t("19:54"),
            parasha_hebrew: "שמיני",
            weekday_mincha: None,
            weekday_arvit: None,
        };
        let without = compose(&week);
        assert!(!without.iter().any(|line| line.y == 950));

        week.weekday_mincha = Some(t("19:05"));
        week.weekday_arvit = Some(t("19:45"));
        let with = compose(&week);
        assert_eq!(line_at(&with, 950).text, "19:05");
        assert_eq!(line_at(&with, 950).ink, Ink::Green);
        assert_eq!(line_at(&with, 990).text, "19:45");
    }

    #[test]
    fn board_carries_anchors_and_parasha() {
        let schedule = schedule(Season::Winter);
        let week = BoardWeek {
            schedule: &schedule,
            shabbat_end: t("19:54"),
            parasha_hebrew: "שמיני",
            weekday_mincha: None,
            weekday_arvit: None,
        };
        let lines = compose(&week);
        // Unrounded candle-lighting at the top slot.
        assert_eq!(line_at(&lines, 440).text, "18:59");
        assert_eq!(line_at(&lines, 830).text, "19:54");
        let parasha = line_at(&lines, 280);
        assert_eq!(parasha.text, "שמיני");
        assert_eq!(parasha.ink, Ink::Blue);
    }

    #[test]
    fn template_switches_for_mevarchim() {
        assert_eq!(template_for(false), "template.jpg");
        assert_eq!(template_for(true), "template_rosh_hodesh.jpg");
    }
}
