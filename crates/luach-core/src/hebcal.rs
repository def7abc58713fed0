//! Hebcal calendar client.
//!
//! Fetches candle-lighting, Havdalah and parasha data from the Hebcal
//! Shabbat API, plus Rosh Hodesh dates for Shabbat-Mevarchim detection.
//! Timestamps arrive with the venue's UTC offset already applied, so only
//! the local wall-clock part is kept. Response parsing is pure and testable
//! without the network.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clock::ClockTime;
use crate::error::CalendarError;

/// Default Hebcal API endpoint.
const DEFAULT_BASE_URL: &str = "https://www.hebcal.com";

/// Candle-lighting, Havdalah and parasha data for one Shabbat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShabbatInfo {
    /// Friday (candle-lighting day).
    pub date: NaiveDate,
    pub candle_lighting: ClockTime,
    pub havdalah: Option<ClockTime>,
    pub parasha: String,
    pub parasha_hebrew: String,
}

/// Client for the Hebcal Shabbat and holiday APIs.
pub struct HebcalClient {
    base_url: String,
    geoname_id: u32,
    havdalah_minutes: u8,
    http: reqwest::Client,
}

impl HebcalClient {
    /// Client against the public Hebcal endpoint.
    pub fn new(geoname_id: u32, havdalah_minutes: u8) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, geoname_id, havdalah_minutes)
    }

    /// Client against a custom endpoint (tests use a mock server).
    pub fn with_base_url(
        base_url: impl Into<String>,
        geoname_id: u32,
        havdalah_minutes: u8,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            geoname_id,
            havdalah_minutes,
            http: reqwest::Client::new(),
        }
    }

    /// Fetch Shabbat entries for a date range, earliest first.
    pub async fn fetch_week(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ShabbatInfo>, CalendarError> {
        let url = format!("{}/shabbat", self.base_url);
        let body: Value = self
            .http
            .get(&url)
            .query(&[
                ("cfg", "json".to_string()),
                ("geonameid", self.geoname_id.to_string()),
                ("b", self.havdalah_minutes.to_string()),
                ("M", "on".to_string()),
                ("start", start.to_string()),
                ("end", end.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let weeks = parse_shabbat_items(&body)?;
        if weeks.is_empty() {
            return Err(CalendarError::NoShabbatFound { start, end });
        }
        Ok(weeks)
    }

    /// Fetch Rosh Hodesh dates for a range, one per month, ascending.
    pub async fn fetch_rosh_chodesh(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>, CalendarError> {
        let url = format!("{}/hebcal", self.base_url);
        let body: Value = self
            .http
            .get(&url)
            .query(&[
                ("v", "1".to_string()),
                ("cfg", "json".to_string()),
                ("geonameid", self.geoname_id.to_string()),
                ("nx", "on".to_string()),
                ("start", start.to_string()),
                ("end", end.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_rosh_chodesh_items(&body)
    }
}

/// Extract Shabbat entries from a Hebcal items array.
///
/// Items come in chronological order: a `candles` item opens a week, the
/// following `parashat` and `havdalah` items complete it.
pub fn parse_shabbat_items(body: &Value) -> Result<Vec<ShabbatInfo>, CalendarError> {
    let items = body["items"]
        .as_array()
        .ok_or(CalendarError::MissingField("items"))?;

    let mut weeks = Vec::new();
    let mut pending: Option<ShabbatInfo> = None;

    for item in items {
        match item["category"].as_str() {
            Some("candles") => {
                if let Some(done) = pending.take() {
                    weeks.push(done);
                }
                let (date, time) = local_date_time(item)?;
                pending = Some(ShabbatInfo {
                    date,
                    candle_lighting: time,
                    havdalah: None,
                    parasha: String::new(),
                    parasha_hebrew: String::new(),
                });
            }
            Some("havdalah") => {
                if let Some(week) = pending.as_mut() {
                    let (_, time) = local_date_time(item)?;
                    week.havdalah = Some(time);
                }
            }
            Some("parashat") => {
                if let Some(week) = pending.as_mut() {
                    let title = item["title"]
                        .as_str()
                        .ok_or(CalendarError::MissingField("title"))?;
                    week.parasha = title.trim_start_matches("Parashat ").to_string();
                    week.parasha_hebrew = item["hebrew"]
                        .as_str()
                        .unwrap_or(title)
                        .to_string();
                }
            }
            _ => {}
        }
    }
    if let Some(done) = pending.take() {
        weeks.push(done);
    }
    Ok(weeks)
}

/// Extract Rosh Hodesh dates, keeping the first day per Gregorian month.
pub fn parse_rosh_chodesh_items(body: &Value) -> Result<Vec<NaiveDate>, CalendarError> {
    let items = body["items"]
        .as_array()
        .ok_or(CalendarError::MissingField("items"))?;

    let mut seen_months = std::collections::BTreeSet::new();
    let mut dates = Vec::new();
    for item in items {
        if item["category"].as_str() != Some("roshchodesh") {
            continue;
        }
        let (date, _) = local_date_time(item)?;
        if seen_months.insert((date.year(), date.month())) {
            dates.push(date);
        }
    }
    dates.sort();
    Ok(dates)
}

/// The Friday of the Shabbat that blesses the month starting on
/// `rosh_chodesh`.
///
/// A Friday or Saturday Rosh Hodesh pushes a full week back so the blessing
/// Shabbat stays strictly before the new month.
pub fn mevarchim_friday(rosh_chodesh: NaiveDate) -> NaiveDate {
    match rosh_chodesh.weekday() {
        Weekday::Fri => rosh_chodesh - Duration::days(7),
        Weekday::Sat => rosh_chodesh - Duration::days(8),
        other => {
            let days_past_friday = (i64::from(other.num_days_from_monday()) + 7 - 4) % 7;
            rosh_chodesh - Duration::days(days_past_friday)
        }
    }
}

/// Whether the Shabbat starting on `shabbat_date` (a Friday) blesses one of
/// the given Rosh Hodesh dates.
pub fn is_mevarchim(shabbat_date: NaiveDate, rosh_dates: &[NaiveDate]) -> bool {
    rosh_dates.iter().any(|&rosh| {
        let friday = mevarchim_friday(rosh);
        friday < rosh && friday == shabbat_date
    })
}

/// Local date and wall-clock minute of an item's `date` timestamp.
fn local_date_time(item: &Value) -> Result<(NaiveDate, ClockTime), CalendarError> {
    let raw = item["date"]
        .as_str()
        .ok_or(CalendarError::MissingField("date"))?;
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map_err(|_| CalendarError::BadTimestamp(raw.to_string()))?;
    let time = ClockTime::from_hm(parsed.hour(), parsed.minute())
        .map_err(|_| CalendarError::BadTimestamp(raw.to_string()))?;
    Ok((parsed.date_naive(), time))
}
