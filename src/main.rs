//! CLI entry point for driftband.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use driftband::commands::{self, PriceOverride};
use driftband::config::Config;

#[derive(Parser)]
#[command(name = "driftband")]
#[command(about = "Tolerance-band portfolio rebalancing calculator")]
#[command(version)]
struct Cli {
    /// Path to config.toml (defaults apply if the file does not exist)
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show current holdings and allocations
    Show {
        /// Path to portfolio.json
        portfolio: PathBuf,
    },

    /// Compute the rebalance orders and the resulting allocations
    Plan {
        /// Path to portfolio.json
        portfolio: PathBuf,

        /// Price override, e.g. --price AAPL=180.50 (repeatable)
        #[arg(long = "price", value_parser = commands::parse_price_override)]
        prices: Vec<PriceOverride>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let config = match Config::load_or_default(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Show { portfolio } => commands::show(&config, &portfolio),
        Command::Plan { portfolio, prices } => commands::plan(&config, &portfolio, &prices),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
