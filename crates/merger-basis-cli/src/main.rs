mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::params::ParamsArgs;
use commands::price::PriceArgs;
use commands::qualify::QualifyArgs;
use commands::valuate::ValuateArgs;
use output::CommandOutput;

/// VMW/AVGO merger cost basis calculator
#[derive(Parser)]
#[command(
    name = "vmw-basis",
    version,
    about = "Cost basis and tax figures for VMW lots converted in the AVGO merger",
    long_about = "Computes per-lot ordinary income, merger capital gain and AVGO cost basis \
                  for ESPP, RSU and open-market VMW lots, with special dividend return-of-capital \
                  adjustments. Produces a text report and a 23-column CSV export."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "report", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Valuate a batch of lots against the price and ESPP offer-date feeds
    Valuate(ValuateArgs),
    /// Show the merger parameters, optionally refined from actual cash/stock shares
    Params(ParamsArgs),
    /// Look up the VMW price for a date, falling back to the prior trading day
    Price(PriceArgs),
    /// Check whether an ESPP sale is a qualifying disposition
    Qualify(QualifyArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Report,
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("merger_basis_core=info,vmw_basis=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<CommandOutput, Box<dyn std::error::Error>> = match cli.command {
        Commands::Valuate(args) => commands::valuate::run_valuate(args),
        Commands::Params(args) => commands::params::run_params(args),
        Commands::Price(args) => commands::price::run_price(args),
        Commands::Qualify(args) => commands::qualify::run_qualify(args),
        Commands::Version => {
            println!("vmw-basis {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(out) => {
            output::format_output(&cli.output, &out);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
