use clap::Subcommand;

use luach_core::HistoryDb;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Show recently generated weeks
    List {
        /// Maximum number of rows
        #[arg(long, default_value_t = 10)]
        limit: u32,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        HistoryAction::List { limit, json } => {
            let db = HistoryDb::open()?;
            let rows = db.recent(limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if rows.is_empty() {
                println!("no stored weeks");
            } else {
                for row in rows {
                    println!(
                        "{} {:<20} candles {} end {} ({})",
                        row.shabbat_date, row.parasha, row.candle_lighting, row.shabbat_end,
                        row.season
                    );
                }
            }
        }
    }
    Ok(())
}
