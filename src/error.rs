//! Error taxonomy for the segmentation pipeline

use thiserror::Error;

/// Errors that halt a pipeline run
#[derive(Debug, Error)]
pub enum Error {
    /// A metric cannot be split into 5 non-empty quintile buckets.
    /// Downstream classification assumes a 5-bucket domain, so the run
    /// must fail rather than degrade to fewer bins.
    #[error("cannot form 5 {metric} quintiles from {population} customers")]
    Binning {
        metric: &'static str,
        population: usize,
    },

    /// Requested segment label is not one of the ten known segments
    #[error("unknown segment label: {0}")]
    InvalidSegment(String),

    /// An rfm code matched no classification rule. The rule table covers
    /// all 25 codes, so this indicates a bug in the table itself.
    #[error("rfm code {0:?} matched no segment rule")]
    UnclassifiedCode(String),

    /// No usable transactions survived the record filter
    #[error("no valid transactions after filtering")]
    EmptyDataset,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid date: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("chart rendering failed: {0}")]
    Chart(String),
}

impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for Error
{
    fn from(e: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Error::Chart(e.to_string())
    }
}

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;
