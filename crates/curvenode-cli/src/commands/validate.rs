//! Validate command implementation.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use curvenode_core::Date;
use curvenode_curves::prelude::{CurveDefinition, CurveValidator, ValidationReport};
use curvenode_traits::ConfigSourceExt;

use crate::cli::OutputFormat;
use crate::commands::{load_session, parse_date, CurveArgs};
use crate::output::{print_error, print_json, print_output, print_success, print_warning};

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub curve: CurveArgs,
}

#[derive(Debug, Serialize)]
struct ReportSummary<'a> {
    curve: &'a str,
    curve_date: Date,
    valid: bool,
    nodes_checked: usize,
    errors: Vec<String>,
    warnings: Vec<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct FindingRow {
    #[tabled(rename = "Severity")]
    severity: &'static str,
    #[tabled(rename = "Finding")]
    message: String,
}

fn findings(report: &ValidationReport) -> Vec<FindingRow> {
    let errors = report.errors().iter().map(|e| FindingRow {
        severity: "error",
        message: e.to_string(),
    });
    let warnings = report.warnings().iter().map(|w| FindingRow {
        severity: "warning",
        message: w.to_string(),
    });
    errors.chain(warnings).collect()
}

/// Executes the validate command. Exits with status 1 when the report has errors.
pub fn execute(args: ValidateArgs, format: OutputFormat) -> Result<ExitCode> {
    let curve_date = parse_date(&args.curve.date)?;
    let session = load_session(&args.curve.env)?;

    let definition: CurveDefinition = session
        .sources
        .config
        .get_latest_by_name(&args.curve.curve)
        .with_context(|| format!("cannot load curve definition {}", args.curve.curve))?;
    let report = CurveValidator::new(session.sources.clone()).validate(curve_date, &definition);

    match format {
        OutputFormat::Json => print_json(&ReportSummary {
            curve: &definition.name,
            curve_date,
            valid: report.is_valid(),
            nodes_checked: report.nodes_checked(),
            errors: report.errors().iter().map(ToString::to_string).collect(),
            warnings: report.warnings().iter().map(ToString::to_string).collect(),
        })?,
        OutputFormat::Csv => print_output(&findings(&report), format)?,
        OutputFormat::Table => {
            print!("{report}");
            if report.has_errors() {
                print_error(&format!(
                    "{} failed validation with {} errors",
                    definition.name,
                    report.errors().len()
                ));
            } else if report.has_warnings() {
                print_warning(&format!(
                    "{} passed with {} warnings",
                    definition.name,
                    report.warnings().len()
                ));
            } else {
                print_success(&format!("{} passed validation", definition.name));
            }
        }
    }

    if report.has_errors() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
