//! Strikeboard CLI entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use service_cli::commands;
use service_cli::commands::grid::GridOptions;
use service_cli::commands::payoff::PayoffOptions;
use service_cli::config::{build_settings, CliOverrides};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Strikeboard options strategy valuation
#[derive(Parser)]
#[command(name = "strikeboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE", env = "STRIKEBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Lattice steps for American legs
    #[arg(long, global = true)]
    lattice_steps: Option<usize>,

    /// Evaluate grid rows on a single thread
    #[arg(long, global = true)]
    sequential: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the date × price profit grid for a scenario
    Grid {
        /// Path to scenario file (TOML)
        #[arg(short, long)]
        scenario: PathBuf,

        /// Lower bound of the price axis
        #[arg(long)]
        lower: Option<f64>,

        /// Upper bound of the price axis
        #[arg(long)]
        upper: Option<f64>,

        /// Number of price samples
        #[arg(short = 'n', long)]
        samples: Option<usize>,

        /// Show strategy value instead of profit
        #[arg(long)]
        value: bool,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Profit at expiration over a price axis
    Payoff {
        /// Path to scenario file (TOML)
        #[arg(short, long)]
        scenario: PathBuf,

        /// Lower bound of the price axis
        #[arg(long)]
        lower: Option<f64>,

        /// Upper bound of the price axis
        #[arg(long)]
        upper: Option<f64>,

        /// Number of axis points
        #[arg(short = 'n', long)]
        samples: Option<usize>,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Estimate historical volatility from closing prices
    Volatility {
        /// File of closing prices, oldest first
        #[arg(short, long)]
        prices: PathBuf,

        /// Use population instead of sample standard deviation
        #[arg(long)]
        population: bool,

        /// Annualisation factor
        #[arg(long, default_value_t = 252.0)]
        trading_days: f64,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Check engine configuration
    Check,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        config_file: cli.config.clone(),
        log_level: cli.log_level.clone(),
        lattice_steps: cli.lattice_steps,
        parallel: cli.sequential.then_some(false),
    };
    let settings = build_settings(&overrides)?;

    init_tracing(if cli.verbose {
        "debug"
    } else {
        settings.log_level.as_filter_str()
    });
    tracing::info!("Strikeboard v{}", service_cli::VERSION);

    match cli.command {
        Commands::Grid {
            scenario,
            lower,
            upper,
            samples,
            value,
            format,
        } => {
            let options = GridOptions {
                lower,
                upper,
                samples,
                show_value: value,
            };
            commands::grid::run(&scenario, &settings, &options, &format)?
        }
        Commands::Payoff {
            scenario,
            lower,
            upper,
            samples,
            format,
        } => {
            let options = PayoffOptions {
                lower,
                upper,
                samples,
            };
            commands::payoff::run(&scenario, &settings, &options, &format)?
        }
        Commands::Volatility {
            prices,
            population,
            trading_days,
            format,
        } => commands::volatility::run(&prices, population, trading_days, &format)?,
        Commands::Check => commands::check::run(&settings)?,
    }

    Ok(())
}
