//! Spec command implementation.
//!
//! Resolves the market data identifier of every node of a curve.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use curvenode_curves::prelude::{CurveSpecification, CurveSpecificationBuilder};
use curvenode_traits::MarketDataBundle;

use crate::cli::OutputFormat;
use crate::commands::{load_session, parse_date, CurveArgs};
use crate::output::{format_quote, print_curve_header, print_json, print_output};

/// Arguments for the spec command.
#[derive(Args, Debug)]
pub struct SpecArgs {
    #[command(flatten)]
    pub curve: CurveArgs,
}

/// One row of a curve specification.
#[derive(Debug, Serialize, Tabled)]
struct SpecRow {
    #[tabled(rename = "Node")]
    node: String,
    #[tabled(rename = "Identifier")]
    identifier: String,
    #[tabled(rename = "Field")]
    data_field: String,
    #[tabled(rename = "Type")]
    field_type: String,
    #[tabled(rename = "Quote")]
    quote: String,
}

fn rows(specification: &CurveSpecification, quotes: &dyn MarketDataBundle) -> Vec<SpecRow> {
    specification
        .nodes()
        .iter()
        .map(|entry| SpecRow {
            node: entry.node.to_string(),
            identifier: entry.identifier.to_string(),
            data_field: entry.data_field.clone(),
            field_type: format!("{:?}", entry.field_type),
            quote: format_quote(quotes.get_quote(&entry.identifier)),
        })
        .collect()
}

/// Executes the spec command.
pub fn execute(args: SpecArgs, format: OutputFormat) -> Result<ExitCode> {
    let curve_date = parse_date(&args.curve.date)?;
    let session = load_session(&args.curve.env)?;

    let specification = CurveSpecificationBuilder::new(session.sources.config.clone())
        .build_named(curve_date, &args.curve.curve)
        .with_context(|| format!("cannot build curve specification for {}", args.curve.curve))?;

    match format {
        OutputFormat::Json => print_json(&specification)?,
        OutputFormat::Table => {
            print_curve_header(specification.name(), specification.curve_date());
            print_output(&rows(&specification, &session.quotes), format)?;
        }
        OutputFormat::Csv => print_output(&rows(&specification, &session.quotes), format)?,
    }

    Ok(ExitCode::SUCCESS)
}
