use thiserror::Error;

/// Errors raised by the datastream transforms and the signal / export layers
/// they delegate to.
#[derive(Error, Debug)]
pub enum Error {
    #[error("slice step cannot be zero")]
    ZeroSliceStep,

    #[error("filter order must be at least 1")]
    InvalidOrder,

    #[error("digital filter critical frequencies must be 0 < Wn < 1, got {0}")]
    InvalidCutoff(f64),

    #[error("{filter_type} filter needs {expected} critical frequencies")]
    CutoffMismatch {
        filter_type: String,
        expected: &'static str,
    },

    #[error("band edges must be increasing, got ({0}, {1})")]
    InvalidBand(f64, f64),

    #[error("unknown filter type: {0}")]
    UnknownFilterType(String),

    #[error("the length of the input vector x must be greater than padlen, which is {padlen} (got {len})")]
    SignalTooShort { len: usize, padlen: usize },

    #[error("decimation factor must be a positive integer")]
    InvalidFactor,

    #[error("{labels} column labels passed, data has {channels} channels")]
    ColumnMismatch { labels: usize, channels: usize },

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
