mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::import::ImportArgs;
use commands::measure::MeasureArgs;
use commands::portfolio::PortfolioArgs;

/// IFRS 16 lease measurement
#[derive(Parser)]
#[command(
    name = "ifrs16",
    version,
    about = "IFRS 16 lease liability and right-of-use asset measurement",
    long_about = "Measures lessee leases under IFRS 16 with decimal precision: lease term \
                  from renewal and termination options, lease liability at the incremental \
                  borrowing rate, right-of-use asset, amortization, depreciation and cashflow \
                  schedules, journal entries and portfolio summaries."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure a single lease contract
    Measure(MeasureArgs),
    /// Summarise a portfolio of lease contracts
    Portfolio(PortfolioArgs),
    /// Map a lease register CSV onto contract parameters
    Import(ImportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ifrs16=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Measure(args) => commands::measure::run_measure(args),
        Commands::Portfolio(args) => commands::portfolio::run_portfolio(args),
        Commands::Import(args) => commands::import::run_import(args),
        Commands::Version => {
            println!("ifrs16 {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
