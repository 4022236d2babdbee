use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures at the crate's I/O boundaries. Cycle generation itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config field {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    #[error("failed to write export: {0}")]
    Write(#[from] io::Error),
}
