//! CLI command implementations.

pub mod convert;
pub mod spec;
pub mod validate;

pub use convert::ConvertArgs;
pub use spec::SpecArgs;
pub use validate::ValidateArgs;

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;

use curvenode_core::Date;
use curvenode_curves::prelude::{ConverterSources, SourceSet};
use curvenode_ext_file::Environment;
use curvenode_traits::SnapshotDataBundle;

use crate::error::{CliError, CliResult};

/// Selects one curve of an environment on a curve date.
#[derive(Args, Debug, Clone)]
pub struct CurveArgs {
    /// Environment file (TOML, or JSON with a .json extension)
    #[arg(short, long, env = "CURVENODE_ENV")]
    pub env: PathBuf,

    /// Curve definition name
    #[arg(short, long)]
    pub curve: String,

    /// Curve date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: String,
}

/// Sources and quotes loaded from an environment file.
pub struct Session {
    pub sources: ConverterSources,
    pub quotes: SnapshotDataBundle,
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Loads an environment file and wires its sources together.
pub fn load_session(path: &Path) -> CliResult<Session> {
    let environment_error = |e: curvenode_traits::SourceError| CliError::Environment {
        path: path.display().to_string(),
        message: e.to_string(),
    };
    let loaded = Environment::from_path(path)
        .and_then(Environment::load)
        .map_err(environment_error)?;

    let sources = SourceSet {
        conventions: loaded.conventions,
        securities: loaded.securities,
        legal_entities: loaded.legal_entities,
        regions: loaded.regions,
        holidays: loaded.holidays,
        config: loaded.config,
        time_series: loaded.time_series,
    }
    .into();
    debug!(path = %path.display(), "sources ready");

    Ok(Session {
        sources,
        quotes: loaded.quotes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15").unwrap(),
            Date::from_ymd(2024, 1, 15).unwrap()
        );
        assert!(matches!(
            parse_date("15/01/2024"),
            Err(CliError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_missing_environment_file() {
        let err = load_session(Path::new("does/not/exist.toml")).err().unwrap();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
