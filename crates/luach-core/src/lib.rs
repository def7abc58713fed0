//! # Luach Core Library
//!
//! Core business logic for Luach, a weekly Shabbat schedule generator for a
//! single community. The CLI binary drives this library; a drawing backend
//! consumes its board layout.
//!
//! ## Architecture
//!
//! - **Schedule engine**: pure derivation from one pair of anchor times
//!   (candle-lighting, Havdalah) plus the season to the week's named events
//! - **Yearly table**: bundled reference data with the next-Shabbat lookup
//! - **Calendar client**: Hebcal fetch for anchors, parasha and Rosh Hodesh
//! - **Board**: template pixel layout and season-conditional display text
//! - **Storage**: TOML configuration and SQLite history of generated weeks
//!
//! ## Key Components
//!
//! - [`ClockTime`]: minute-of-day value type, the engine's only time form
//! - [`WeeklySchedule`]: the derived schedule for one week
//! - [`YearTable`]: yearly reference table and next-anchor lookup
//! - [`HebcalClient`]: calendar data provider

pub mod board;
pub mod clock;
pub mod error;
pub mod hebcal;
pub mod schedule;
pub mod season;
pub mod storage;
pub mod yearly;

pub use clock::{round_down5, ClockTime, MINUTES_PER_DAY};
pub use error::{CalendarError, ConfigError, CoreError, DataError, ScheduleError};
pub use hebcal::{HebcalClient, ShabbatInfo};
pub use schedule::{AnchorTimes, WeeklySchedule};
pub use season::Season;
pub use storage::{Config, HistoryDb, WeekRecord};
pub use yearly::{NextAnchor, YearTable, YearlyRecord};
