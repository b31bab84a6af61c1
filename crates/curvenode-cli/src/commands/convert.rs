//! Convert command implementation.
//!
//! Builds a curve's specification and converts every node against the
//! environment's quote snapshot.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use curvenode_curves::prelude::{
    CurveSpecificationBuilder, InstrumentDefinition, NodeConverterDispatch,
};
use curvenode_traits::ExternalId;

use crate::cli::OutputFormat;
use crate::commands::{load_session, parse_date, CurveArgs};
use crate::output::{print_curve_header, print_json, print_output, print_success};

/// Arguments for the convert command.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub curve: CurveArgs,
}

/// A converted node as written in JSON output.
#[derive(Debug, Serialize)]
struct ConvertedNode<'a> {
    node: String,
    identifier: &'a ExternalId,
    instrument: &'a InstrumentDefinition,
}

#[derive(Debug, Serialize, Tabled)]
struct InstrumentRow {
    #[tabled(rename = "Node")]
    node: String,
    #[tabled(rename = "Identifier")]
    identifier: String,
    #[tabled(rename = "Instrument")]
    instrument: &'static str,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Maturity")]
    maturity: String,
}

/// Executes the convert command.
pub fn execute(args: ConvertArgs, format: OutputFormat) -> Result<ExitCode> {
    let curve_date = parse_date(&args.curve.date)?;
    let session = load_session(&args.curve.env)?;

    let specification = CurveSpecificationBuilder::new(session.sources.config.clone())
        .build_named(curve_date, &args.curve.curve)
        .with_context(|| format!("cannot build curve specification for {}", args.curve.curve))?;
    let instruments = NodeConverterDispatch::standard()
        .convert_all(&session.sources, curve_date, &session.quotes, &specification)
        .with_context(|| format!("cannot convert nodes of {}", args.curve.curve))?;

    let converted: Vec<ConvertedNode<'_>> = specification
        .nodes()
        .iter()
        .zip(&instruments)
        .map(|(entry, instrument)| ConvertedNode {
            node: entry.node.to_string(),
            identifier: &entry.identifier,
            instrument,
        })
        .collect();

    if format == OutputFormat::Json {
        print_json(&converted)?;
        return Ok(ExitCode::SUCCESS);
    }

    let rows: Vec<InstrumentRow> = converted
        .iter()
        .map(|c| InstrumentRow {
            node: c.node.clone(),
            identifier: c.identifier.to_string(),
            instrument: c.instrument.type_name(),
            currency: c
                .instrument
                .currency()
                .map_or_else(|| "-".to_string(), |ccy| ccy.to_string()),
            maturity: c.instrument.maturity().to_string(),
        })
        .collect();

    if format == OutputFormat::Table {
        print_curve_header(specification.name(), curve_date);
    }
    print_output(&rows, format)?;
    if format == OutputFormat::Table {
        print_success(&format!("converted {} nodes", rows.len()));
    }

    Ok(ExitCode::SUCCESS)
}
