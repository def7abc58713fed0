use chrono::{Local, NaiveDate};
use clap::Args;

use luach_core::YearTable;

#[derive(Args)]
pub struct NextArgs {
    /// Reference date (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

pub fn run(args: NextArgs) -> Result<(), Box<dyn std::error::Error>> {
    let reference = args.date.unwrap_or_else(|| Local::now().date_naive());
    let table = YearTable::builtin()?;
    match table.next_after(reference) {
        Some(next) => println!("{} {}", next.date, next.candle_lighting),
        None => println!("no next shabbat in the table"),
    }
    Ok(())
}
