//! Error type shared by training, prediction, and model persistence.
use std::io;
use thiserror::Error;


/// Errors returned by this crate.
///
/// Numeric degeneracies (an empty split side, a zero ideal DCG, ...)
/// are never reported here. They are resolved by a fixed fallback value
/// in the code that meets them.
#[derive(Error, Debug)]
pub enum GbdtError {
    /// A parameter is out of its domain,
    /// or two parameters conflict each other.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),


    /// The dataset cannot be trained on
    /// (no rows, no features, no query groups, ...).
    #[error("degenerate dataset: {0}")]
    DegenerateDataset(String),


    /// A persisted model misses a key or has an unknown tag.
    #[error("malformed model: {0}")]
    MalformedModel(String),


    /// Reading/writing a model file failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying error.
        #[from]
        source: io::Error,
    },


    /// The model text is not a valid JSON document.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying error.
        #[from]
        source: serde_json::Error,
    },


    /// A `polars::DataFrame` could not be converted into a dataset.
    #[error("DataFrame error: {source}")]
    Polars {
        /// The underlying error.
        #[from]
        source: polars::prelude::PolarsError,
    },
}


impl GbdtError {
    pub(crate) fn config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig(message.into())
    }


    pub(crate) fn dataset<S: Into<String>>(message: S) -> Self {
        Self::DegenerateDataset(message.into())
    }


    pub(crate) fn model<S: Into<String>>(message: S) -> Self {
        Self::MalformedModel(message.into())
    }
}


/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, GbdtError>;
