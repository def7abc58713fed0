use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "luach-cli", version, about = "Luach CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive a week's schedule from explicit anchor times
    Times(commands::times::TimesArgs),
    /// Generate the weekly board: fetch anchors, derive, compose, store
    Generate(commands::generate::GenerateArgs),
    /// Next Shabbat from the bundled yearly table
    Next(commands::next::NextArgs),
    /// Stored weeks
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Times(args) => commands::times::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Next(args) => commands::next::run(args),
        Commands::History { action } => commands::history::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
