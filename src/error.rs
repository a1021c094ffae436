//! Pipeline error types

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Input shape errors. Fatal: raised before any query runs.
#[derive(Error, Debug)]
pub enum DatasetFormatError {
    #[error(
        "{}: expected {expected} columns (games schema v{schema_version}), found {found}",
        .path.display()
    )]
    ColumnCount {
        path: PathBuf,
        schema_version: u32,
        expected: usize,
        found: usize,
    },

    #[error(
        "{}: header is missing required columns: {}",
        .path.display(),
        .missing.join(", ")
    )]
    MissingColumns { path: PathBuf, missing: Vec<String> },
}

/// Invalid query parameters
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("percentile must be within [0, 1], got {0}")]
    PercentileOutOfRange(f64),

    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Format(#[from] DatasetFormatError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("table operation failed: {0}")]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
