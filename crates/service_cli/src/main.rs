//! FX Risk CLI - Command Line Operations for FX Option Risk
//!
//! This is the operational entry point for the FX options risk engine.
//!
//! # Commands
//!
//! - `fxrisk price --input <file>` - Price a trade book and write a report
//! - `fxrisk check --input <file>` - Validate a trade book without pricing
//!
//! # Logging
//!
//! `RUST_LOG` takes precedence; otherwise the configured `log_level` is
//! used, or `debug` with `--verbose`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use service_cli::commands::{self, price::PriceArgs, OutputFormat};
use service_cli::config::RunConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// FX options risk engine CLI
#[derive(Parser)]
#[command(name = "fxrisk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "fxrisk.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a trade book and write the risk report
    Price {
        /// Trade book (CSV, TSV, semicolon-separated or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// FX rate table (CSV `currency,rate_to_usd` or TOML `[rates]`)
        #[arg(short, long)]
        rates: Option<PathBuf>,

        /// Report directory
        #[arg(short, long, default_value = "fxrisk_report")]
        output: PathBuf,

        /// Group-by selectors, comma-separated; repeat for several tabs
        #[arg(short, long = "group-by")]
        group_by: Vec<String>,

        /// Terminal output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Validate a trade book without pricing
    Check {
        /// Trade book
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = RunConfig::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    let default_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_filter_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Price {
            input,
            rates,
            output,
            group_by,
            format,
        } => {
            let args = PriceArgs {
                input,
                rates,
                output,
                group_by,
                format,
            };
            commands::price::run(&args, &config).context("price command failed")?;
        }
        Commands::Check { input } => {
            commands::check::run(&input, &config).context("check command failed")?;
        }
    }
    Ok(())
}
