//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, traversal, codec, and config errors, and provides
//! semantic variants for argument validation and per-file pipeline failures.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory traversal error: {0}")]
    Traverse(#[from] walkdir::Error),

    #[error("Could not decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Could not encode {path:?}: {reason}")]
    Encode { path: PathBuf, reason: String },

    #[error("No encoder for output path {path:?}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {from:?} to {to:?}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Resolution must be greater than 0 in both dimensions, got: {width}x{height}")]
    ZeroSize { width: u32, height: u32 },

    #[error("Split ratios must each lie in [0, 1] and sum to 1, got: train={train} val={val} test={test}")]
    InvalidRatios { train: f64, val: f64, test: f64 },

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),
}
