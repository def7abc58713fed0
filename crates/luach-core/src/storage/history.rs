//! SQLite-based storage for generated weekly schedules.
//!
//! One row per generated week: the anchors, all derived event times, the
//! weekday times and the next-Shabbat lookup result. Times are stored as
//! "HH:MM" text -- this table is an output boundary.

use chrono::{DateTime, NaiveDate, Utc};
use indoc::indoc;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::board::BoardWeek;
use crate::clock::ClockTime;
use crate::error::CoreError;
use crate::yearly::NextAnchor;

/// One generated week as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekRecord {
    pub shabbat_date: NaiveDate,
    pub parasha: String,
    pub season: String,
    pub candle_lighting: String,
    pub shabbat_end: String,
    pub shir_hashirim: String,
    pub shacharit: String,
    pub mincha_gdola: String,
    pub tehilim: String,
    pub shiur_nashim: String,
    pub parashat_hashavua: String,
    pub shiur_rav: String,
    pub mincha_2: String,
    pub arvit: String,
    pub weekday_mincha: Option<String>,
    pub weekday_arvit: Option<String>,
    pub next_shabbat_date: Option<NaiveDate>,
    pub next_shabbat_time: Option<String>,
    pub mevarchim: bool,
    pub created_at: DateTime<Utc>,
}

impl WeekRecord {
    /// Flatten one composed week into a row.
    pub fn from_week(
        week: &BoardWeek<'_>,
        shabbat_date: NaiveDate,
        parasha: &str,
        next: Option<NextAnchor>,
        mevarchim: bool,
    ) -> Self {
        let schedule = week.schedule;
        let hhmm = |time: ClockTime| time.to_string();
        Self {
            shabbat_date,
            parasha: parasha.to_string(),
            season: schedule.season.to_string(),
            candle_lighting: hhmm(schedule.mincha_kabbalat),
            shabbat_end: hhmm(week.shabbat_end),
            shir_hashirim: hhmm(schedule.shir_hashirim),
            shacharit: hhmm(schedule.shacharit),
            mincha_gdola: hhmm(schedule.mincha_gdola),
            tehilim: hhmm(schedule.tehilim),
            shiur_nashim: hhmm(schedule.shiur_nashim),
            parashat_hashavua: hhmm(schedule.parashat_hashavua),
            shiur_rav: hhmm(schedule.shiur_rav),
            mincha_2: hhmm(schedule.mincha_2),
            arvit: hhmm(schedule.arvit),
            weekday_mincha: week.weekday_mincha.map(hhmm),
            weekday_arvit: week.weekday_arvit.map(hhmm),
            next_shabbat_date: next.map(|anchor| anchor.date),
            next_shabbat_time: next.map(|anchor| anchor.candle_lighting.to_string()),
            mevarchim,
            created_at: Utc::now(),
        }
    }
}

/// SQLite database of generated weeks.
pub struct HistoryDb {
    conn: Connection,
}

impl HistoryDb {
    /// Open the database at `~/.config/luach/luach.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()
            .map_err(|e| CoreError::Custom(e.to_string()))?
            .join("luach.db");
        Ok(Self::open_at_path(path)?)
    }

    /// Open at an explicit path (tests use a temp dir).
    pub fn open_at_path(path: impl AsRef<std::path::Path>) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(indoc! {"
            CREATE TABLE IF NOT EXISTS weekly_schedule (
                id                  INTEGER PRIMARY KEY AUTOINCREMENT,
                shabbat_date        TEXT NOT NULL,
                parasha             TEXT NOT NULL,
                season              TEXT NOT NULL,
                candle_lighting     TEXT NOT NULL,
                shabbat_end         TEXT NOT NULL,
                shir_hashirim       TEXT NOT NULL,
                shacharit           TEXT NOT NULL,
                mincha_gdola        TEXT NOT NULL,
                tehilim             TEXT NOT NULL,
                shiur_nashim        TEXT NOT NULL,
                parashat_hashavua   TEXT NOT NULL,
                shiur_rav           TEXT NOT NULL,
                mincha_2            TEXT NOT NULL,
                arvit               TEXT NOT NULL,
                weekday_mincha      TEXT,
                weekday_arvit       TEXT,
                next_shabbat_date   TEXT,
                next_shabbat_time   TEXT,
                mevarchim           INTEGER NOT NULL DEFAULT 0,
                created_at          TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_weekly_schedule_date
                ON weekly_schedule (shabbat_date);
        "})
    }

    /// Insert one generated week, returning its row id.
    pub fn insert_week(&self, record: &WeekRecord) -> Result<i64, rusqlite::Error> {
        self.conn.execute(
            indoc! {"
                INSERT INTO weekly_schedule (
                    shabbat_date, parasha, season, candle_lighting, shabbat_end,
                    shir_hashirim, shacharit, mincha_gdola, tehilim, shiur_nashim,
                    parashat_hashavua, shiur_rav, mincha_2, arvit,
                    weekday_mincha, weekday_arvit,
                    next_shabbat_date, next_shabbat_time, mevarchim, created_at
                ) VALUES (
                    ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                    ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20
                )
            "},
            params![
                record.shabbat_date.to_string(),
                record.parasha,
                record.season,
                record.candle_lighting,
                record.shabbat_end,
                record.shir_hashirim,
                record.shacharit,
                record.mincha_gdola,
                record.tehilim,
                record.shiur_nashim,
                record.parashat_hashavua,
                record.shiur_rav,
                record.mincha_2,
                record.arvit,
                record.weekday_mincha,
                record.weekday_arvit,
                record.next_shabbat_date.map(|date| date.to_string()),
                record.next_shabbat_time,
                record.mevarchim,
                record.created_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent weeks, newest first.
    pub fn recent(&self, limit: u32) -> Result<Vec<WeekRecord>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(indoc! {"
            SELECT shabbat_date, parasha, season, candle_lighting, shabbat_end,
                   shir_hashirim, shacharit, mincha_gdola, tehilim, shiur_nashim,
                   parashat_hashavua, shiur_rav, mincha_2, arvit,
                   weekday_mincha, weekday_arvit,
                   next_shabbat_date, next_shabbat_time, mevarchim, created_at
            FROM weekly_schedule
            ORDER BY shabbat_date DESC, id DESC
            LIMIT ?1
        "})?;
        let rows = stmt.query_map(params![limit], row_to_record)?;
        rows.collect()
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    text.parse().ok()
}

fn row_to_record(row: &rusqlite::Row<'_>) -> Result<WeekRecord, rusqlite::Error> {
    let shabbat_date: String = row.get(0)?;
    let next_date: Option<String> = row.get(16)?;
    let created_at: String = row.get(19)?;
    Ok(WeekRecord {
        shabbat_date: parse_date(&shabbat_date).unwrap_or_default(),
        parasha: row.get(1)?,
        season: row.get(2)?,
        candle_lighting: row.get(3)?,
        shabbat_end: row.get(4)?,
        shir_hashirim: row.get(5)?,
        shacharit: row.get(6)?,
        mincha_gdola: row.get(7)?,
        tehilim: row.get(8)?,
        shiur_nashim: row.get(9)?,
        parashat_hashavua: row.get(10)?,
        shiur_rav: row.get(11)?,
        mincha_2: row.get(12)?,
        arvit: row.get(13)?,
        weekday_mincha: row.get(14)?,
        weekday_arvit: row.get(15)?,
        next_shabbat_date: next_date.as_deref().and_then(parse_date),
        next_shabbat_time: row.get(17)?,
        mevarchim: row.get(18)?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map(|at| at.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}
