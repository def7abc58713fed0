//! Yearly Shabbat reference table and next-anchor lookup.
//!
//! The table is static reference data: one row per Shabbat with the parasha
//! label, candle-lighting and (usually) Havdalah. It is loaded once, kept
//! immutable, and consulted for the "next Shabbat" row on the printed board
//! and for offline schedule generation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::DataError;

/// One row of the yearly reference table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyRecord {
    pub date: NaiveDate,
    pub parasha: String,
    pub candle_lighting: ClockTime,
    /// Absent for the handful of weeks where no Havdalah time was published.
    #[serde(default)]
    pub havdalah: Option<ClockTime>,
}

/// The next anchor row: date plus candle-lighting rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextAnchor {
    pub date: NaiveDate,
    pub candle_lighting: ClockTime,
}

#[derive(Deserialize)]
struct YearTableFile {
    changeover: NaiveDate,
    #[serde(rename = "shabbat")]
    records: Vec<YearlyRecord>,
}

/// The yearly table, ordered ascending by date.
#[derive(Debug, Clone)]
pub struct YearTable {
    changeover: NaiveDate,
    records: Vec<YearlyRecord>,
}

impl YearTable {
    /// Parse a table from TOML.
    ///
    /// # Errors
    /// A record with an unparsable time aborts the whole load (a bad clock
    /// value must not flow further), and rows must be strictly ascending.
    pub fn from_toml(input: &str) -> Result<Self, DataError> {
        let file: YearTableFile =
            toml::from_str(input).map_err(|e| DataError::TableParseFailed(e.to_string()))?;
        for pair in file.records.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(DataError::UnorderedTable {
                    previous: pair[0].date,
                    date: pair[1].date,
                });
            }
        }
        Ok(Self {
            changeover: file.changeover,
            records: file.records,
        })
    }

    /// The table bundled with the crate (5785 / 2024-25, Ramat Gan).
    pub fn builtin() -> Result<Self, DataError> {
        Self::from_toml(include_str!("../data/year_5785.toml"))
    }

    /// All rows, ascending by date.
    pub fn records(&self) -> &[YearlyRecord] {
        &self.records
    }

    /// The clock-change cutover date this table was published against.
    pub fn changeover(&self) -> NaiveDate {
        self.changeover
    }

    /// First record on or after `date` -- the coming Shabbat when generating
    /// offline from the table.
    pub fn first_on_or_after(&self, date: NaiveDate) -> Option<&YearlyRecord> {
        self.records.iter().find(|record| record.date >= date)
    }

    /// Next anchor strictly after `reference`, using the table's own
    /// changeover date.
    pub fn next_after(&self, reference: NaiveDate) -> Option<NextAnchor> {
        self.next_after_with(reference, self.changeover)
    }

    /// Next anchor strictly after `reference`.
    ///
    /// When the matched row falls strictly after `changeover` and a previous
    /// row exists, the previous row is substituted wholesale: in the week
    /// before the clock change the prior week's candle time is still the one
    /// shown on the board. Returns `None` when the table is exhausted.
    pub fn next_after_with(
        &self,
        reference: NaiveDate,
        changeover: NaiveDate,
    ) -> Option<NextAnchor> {
        let mut previous: Option<&YearlyRecord> = None;
        for record in &self.records {
            if record.date > reference {
                let chosen = match previous {
                    Some(previous) if record.date > changeover => previous,
                    _ => record,
                };
                return Some(NextAnchor {
                    date: chosen.date,
                    candle_lighting: chosen.candle_lighting.round_down5(),
                });
            }
            previous = Some(record);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const SYNTHETIC: &str = r#"
changeover = "2025-03-27"

[[shabbat]]
date = "2025-03-14"
parasha = "Ki Tisa"
candle_lighting = "17:30"
havdalah = "18:25"

[[shabbat]]
date = "2025-03-21"
parasha = "Vayakhel"
candle_lighting = "17:34"
havdalah = "18:30"

[[shabbat]]
date = "2025-03-28"
parasha = "Pekudei"
candle_lighting = "18:39"
havdalah = "19:35"
"#;

    #[test]
    fn builtin_table_loads_and_is_ordered() {
        let table = YearTable::builtin().unwrap();
        assert_eq!(table.changeover(), date(2025, 3, 27));
        assert!(table.records().len() > 40);
        assert_eq!(table.records()[0].date, date(2024, 12, 6));
        assert_eq!(table.records()[0].candle_lighting.to_string(), "16:17");
        // One week has no published Havdalah.
        assert!(table
            .records()
            .iter()
            .any(|record| record.havdalah.is_none()));
    }

    #[test]
    fn plain_lookup_before_changeover() {
        let table = YearTable::from_toml(SYNTHETIC).unwrap();
        let next = table.next_after(date(2025, 3, 15)).unwrap();
        assert_eq!(next.date, date(2025, 3, 21));
        // 17:34 -> 17:30
        assert_eq!(next.candle_lighting.to_string(), "17:30");
    }

    #[test]
    fn changeover_substitutes_previous_row() {
        let table = YearTable::from_toml(SYNTHETIC).unwrap();
        // Matched row (03-28) is past the changeover (03-27): the 03-21 row
        // is used instead, candle time rounded.
        let next = table.next_after(date(2025, 3, 22)).unwrap();
        assert_eq!(next.date, date(2025, 3, 21));
        assert_eq!(next.candle_lighting.to_string(), "17:30");
    }

    #[test]
    fn no_substitution_without_a_previous_row() {
        let table = YearTable::from_toml(SYNTHETIC).unwrap();
        // Reference before the whole table: first row matches even though a
        // changeover this early would otherwise trigger substitution.
        let next = table
            .next_after_with(date(2025, 3, 1), date(2025, 3, 1))
            .unwrap();
        assert_eq!(next.date, date(2025, 3, 14));
    }

    #[test]
    fn exhausted_table_is_absent() {
        let table = YearTable::from_toml(SYNTHETIC).unwrap();
        assert!(table.next_after(date(2025, 3, 28)).is_none());
        assert!(table.next_after(date(2026, 1, 1)).is_none());
    }

    #[test]
    fn first_on_or_after_includes_same_day() {
        let table = YearTable::from_toml(SYNTHETIC).unwrap();
        let record = table.first_on_or_after(date(2025, 3, 21)).unwrap();
        assert_eq!(record.parasha, "Vayakhel");
        assert!(table.first_on_or_after(date(2025, 4, 1)).is_none());
    }

    #[test]
    fn malformed_time_aborts_the_load() {
        let bad = SYNTHETIC.replace("17:34", "25:61");
        assert!(matches!(
            YearTable::from_toml(&bad),
            Err(DataError::TableParseFailed(_))
        ));
    }

    #[test]
    fn unordered_rows_are_rejected() {
        let swapped = r#"
changeover = "2025-03-27"

[[shabbat]]
date = "2025-03-21"
parasha = "Vayakhel"
candle_lighting = "17:34"

[[shabbat]]
date = "2025-03-14"
parasha = "Ki Tisa"
candle_lighting = "17:30"
"#;
        assert!(matches!(
            YearTable::from_toml(swapped),
            Err(DataError::UnorderedTable { .. })
        ));
    }
}
