use chrono::{Duration, Local, NaiveDate};
use clap::Args;

use luach_core::board::{self, BoardWeek};
use luach_core::hebcal;
use luach_core::schedule::midweek;
use luach_core::{
    AnchorTimes, ClockTime, Config, HebcalClient, HistoryDb, Season, ShabbatInfo, WeekRecord,
    WeeklySchedule, YearTable,
};

#[derive(Args)]
pub struct GenerateArgs {
    /// Reference date (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Use the bundled yearly table instead of the calendar API
    #[arg(long)]
    pub offline: bool,
    /// Sunday sunset (HH:MM) for the weekday Mincha row
    #[arg(long)]
    pub sunday_sunset: Option<String>,
    /// Thursday sunset (HH:MM) for the weekday Mincha row
    #[arg(long)]
    pub thursday_sunset: Option<String>,
    /// Emit the board lines as JSON
    #[arg(long)]
    pub json: bool,
    /// Skip writing the history row
    #[arg(long)]
    pub no_store: bool,
}

pub fn run(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    let table = YearTable::builtin()?;

    let (info, mevarchim) = if args.offline {
        offline_week(&table, today)?
    } else {
        fetch_week(today)?
    };

    let havdalah = info
        .havdalah
        .ok_or_else(|| format!("no Havdalah time published for {}", info.date))?;
    let season = Season::for_date(today);
    let schedule = WeeklySchedule::derive(
        AnchorTimes {
            candle_lighting: info.candle_lighting,
            shabbat_end: havdalah,
        },
        season,
    )?;

    let weekday_mincha = match (&args.sunday_sunset, &args.thursday_sunset) {
        (Some(sunday), Some(thursday)) => {
            midweek::weekday_mincha(ClockTime::parse(sunday)?, ClockTime::parse(thursday)?)
        }
        _ => None,
    };
    let weekday_arvit = midweek::weekday_arvit(schedule.mincha_kabbalat)?;

    let week = BoardWeek {
        schedule: &schedule,
        shabbat_end: havdalah,
        parasha_hebrew: &info.parasha_hebrew,
        weekday_mincha,
        weekday_arvit: Some(weekday_arvit),
    };
    let lines = board::compose(&week);
    let next = table.next_after(info.date);

    if !args.no_store {
        let record = WeekRecord::from_week(&week, info.date, &info.parasha, next, mevarchim);
        let db = HistoryDb::open()?;
        db.insert_week(&record)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        println!("{} -- {} ({season})", info.date, info.parasha);
        println!("template: {}", board::template_for(mevarchim));
        for line in &lines {
            println!("({:>4},{:>4}) {}", line.x, line.y, line.text);
        }
        match next {
            Some(next) => println!("next shabbat: {} {}", next.date, next.candle_lighting),
            None => println!("next shabbat: not in the table"),
        }
    }
    Ok(())
}

/// Fetch the coming week and the Mevarchim flag from Hebcal.
fn fetch_week(today: NaiveDate) -> Result<(ShabbatInfo, bool), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let client = HebcalClient::new(
        config.calendar.geoname_id,
        config.calendar.havdalah_minutes,
    );
    let end = today + Duration::days(i64::from(config.calendar.lookahead_days));

    let runtime = tokio::runtime::Runtime::new()?;
    let weeks = runtime.block_on(client.fetch_week(today, end))?;
    let info = weeks
        .into_iter()
        .next()
        .ok_or("no Shabbat found in the query range")?;

    // Rosh Hodesh up to a month out decides whether this is Shabbat Mevarchim.
    let rosh = runtime.block_on(client.fetch_rosh_chodesh(today, today + Duration::days(35)))?;
    let mevarchim = hebcal::is_mevarchim(info.date, &rosh);
    Ok((info, mevarchim))
}

/// The coming week from the bundled table; Mevarchim is unknown offline.
fn offline_week(
    table: &YearTable,
    today: NaiveDate,
) -> Result<(ShabbatInfo, bool), Box<dyn std::error::Error>> {
    let record = table
        .first_on_or_after(today)
        .ok_or_else(|| format!("yearly table has no Shabbat on or after {today}"))?;
    let info = ShabbatInfo {
        date: record.date,
        candle_lighting: record.candle_lighting,
        havdalah: record.havdalah,
        parasha: record.parasha.clone(),
        parasha_hebrew: record.parasha.clone(),
    };
    Ok((info, false))
}
