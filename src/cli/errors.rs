use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not load config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: dataprep::Error,
    },

    #[error("Could not write report {path:?}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Pipeline(#[from] dataprep::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
