mod config;
pub mod history;

pub use config::Config;
pub use history::{HistoryDb, WeekRecord};

use std::path::PathBuf;

/// Returns `~/.config/luach[-dev]/` based on LUACH_ENV.
///
/// Set LUACH_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LUACH_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("luach-dev")
    } else {
        base_dir.join("luach")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
