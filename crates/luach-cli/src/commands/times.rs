use chrono::{Local, NaiveDate};
use clap::Args;

use luach_core::{AnchorTimes, ClockTime, Season, WeeklySchedule};

#[derive(Args)]
pub struct TimesArgs {
    /// Candle-lighting time (HH:MM)
    #[arg(long)]
    pub candles: String,
    /// Havdalah time (HH:MM)
    #[arg(long)]
    pub havdalah: String,
    /// Classify the season for this date instead of today
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Force a season ("summer" or "winter") instead of classifying by date
    #[arg(long)]
    pub season: Option<String>,
    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: TimesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let anchors = AnchorTimes {
        candle_lighting: ClockTime::parse(&args.candles)?,
        shabbat_end: ClockTime::parse(&args.havdalah)?,
    };

    let season = match args.season.as_deref() {
        Some("summer") => Season::Summer,
        Some("winter") => Season::Winter,
        Some(other) => return Err(format!("unknown season '{other}'").into()),
        None => {
            let date = args.date.unwrap_or_else(|| Local::now().date_naive());
            Season::for_date(date)
        }
    };

    let schedule = WeeklySchedule::derive(anchors, season)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
    } else {
        println!("season: {season}");
        for (name, time) in schedule.events() {
            println!("{name:<18} {time}");
        }
    }
    Ok(())
}
