//! Error taxonomy for the loading and cleaning pipeline.
//!
//! Every variant is fatal for the dataset being processed. Numeric cells that
//! fail to parse are not represented here: they are coerced to zero and
//! counted in [`crate::normalize::NormalizationReport`] instead.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Load,
    Schema,
    Field,
    Config,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse delimited data: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to decode row {row} using {encoding}")]
    Decode { row: usize, encoding: &'static str },
    #[error("row {row}: found {found} field(s) but the header has {expected}")]
    TooManyFields {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("input does not contain a header row")]
    EmptyInput,
    #[error(
        "missing required column(s): {}; columns present in file: {}",
        missing.join(", "),
        available.join(", ")
    )]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },
    #[error("row {row}: cannot parse '{value}' in column '{column}' as a day-first date")]
    InvalidDate {
        row: usize,
        column: String,
        value: String,
    },
    #[error("row {row}: revenue (price x quantity) exceeds the decimal range")]
    RevenueOverflow { row: usize },
    #[error("invalid label rule pattern '{pattern}': {source}")]
    InvalidRule {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("failed to load configuration from {}: {message}", path.display())]
    ConfigFile { path: PathBuf, message: String },
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::NotFound { .. }
            | PipelineError::Read { .. }
            | PipelineError::Csv(_)
            | PipelineError::Decode { .. }
            | PipelineError::TooManyFields { .. }
            | PipelineError::EmptyInput => ErrorKind::Load,
            PipelineError::MissingColumns { .. } => ErrorKind::Schema,
            PipelineError::InvalidDate { .. } | PipelineError::RevenueOverflow { .. } => {
                ErrorKind::Field
            }
            PipelineError::InvalidRule { .. } | PipelineError::ConfigFile { .. } => {
                ErrorKind::Config
            }
        }
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
