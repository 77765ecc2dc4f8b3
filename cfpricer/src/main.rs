//! `cfpricer` command line.
//!
//! - `cfpricer price --config FILE [--strike K] [--maturity DATE]`
//! - `cfpricer bench --config FILE [--format table|json]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use cfpricer::{
    benchmark::{BenchmarkHarness, ExperimentConfig},
    methods::MonteCarloValuation,
    models::NaiveDate,
    pricingengines::{FourierEngine, OptionPricer},
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Fourier-transform European option pricer
#[derive(Parser)]
#[command(name = "cfpricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price the configured contract with the transform engine
    Price {
        /// Experiment file (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Strike, overriding [contract].strike
        #[arg(short, long)]
        strike: Option<f64>,

        /// Maturity (YYYY-MM-DD), overriding [contract].maturity
        #[arg(short, long)]
        maturity: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Compare Monte Carlo and transform prices over the configured grid
    Bench {
        /// Experiment file (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn price(
    config: &ExperimentConfig,
    strike: Option<f64>,
    maturity: Option<NaiveDate>,
    format: Format,
) -> Result<()> {
    let market = config.market()?;
    let model = config.model()?;
    let contract = config.contract(strike, maturity)?;
    let engine = FourierEngine::from_model(model, config.fourier_settings()?)?;
    let result = engine
        .valuation(&contract, &market)
        .with_context(|| format!("pricing {} {}", contract.option_type(), contract.strike()))?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        Format::Table => {
            println!("model          {}", engine.kind());
            println!("option         {}", contract.option_type());
            println!("strike         {}", contract.strike());
            println!("maturity       {}", contract.maturity());
            println!("present value  {:.6}", result.present_value);
            for (name, value) in &result.additional_results {
                println!("{name:<14} {value}");
            }
        }
    }
    Ok(())
}

fn bench(config: &ExperimentConfig, format: Format) -> Result<()> {
    let market = config.market()?;
    let model = config.model()?;
    let grid = config.grid()?;
    let engine = FourierEngine::from_model(model, config.fourier_settings()?)?;

    // The simulation is re-pointed at every grid point; start at the first.
    let first_maturity = grid.maturities()[0];
    let first_strike = grid.strike_ratios()[0] * market.spot();
    let contract = config.contract(Some(first_strike), Some(first_maturity))?;
    let mut simulation =
        MonteCarloValuation::new(model, market.clone(), contract, config.simulation_settings()?)?;

    let report = BenchmarkHarness::new(&engine, &market, config.contract.option_type)
        .run(&grid, &mut simulation)?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Table => println!("{report}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Price {
            config,
            strike,
            maturity,
            format,
        } => {
            let experiment = ExperimentConfig::load(&config)?;
            info!(config = %config.display(), "pricing");
            price(&experiment, strike, maturity, format)
        }
        Commands::Bench { config, format } => {
            let experiment = ExperimentConfig::load(&config)?;
            info!(config = %config.display(), "benchmarking");
            bench(&experiment, format)
        }
    }
}
