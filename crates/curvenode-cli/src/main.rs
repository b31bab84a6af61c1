//! Curvenode CLI - turns curve definitions into instrument definitions.
//!
//! # Usage
//!
//! ```bash
//! # Resolve market data identifiers for every node of a curve
//! curvenode spec --env env.toml --curve "EUR Discounting" --date 2024-01-15
//!
//! # Convert the curve's nodes into instrument definitions
//! curvenode --format json convert --env env.toml --curve "EUR Discounting" --date 2024-01-15
//!
//! # Check a curve definition against the reference data
//! curvenode validate --env env.toml --curve "EUR Discounting" --date 2024-01-15
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info,curvenode=debug" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;

    let code = match cli.command {
        Commands::Spec(args) => commands::spec::execute(args, format)?,
        Commands::Convert(args) => commands::convert::execute(args, format)?,
        Commands::Validate(args) => commands::validate::execute(args, format)?,
    };

    Ok(code)
}
