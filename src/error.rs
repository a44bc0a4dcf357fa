//! Errors at the configuration boundary
//!
//! The simulation itself never fails; only loading tuning, settings and
//! level descriptors can.

/// Errors produced while loading or validating external data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input was not valid JSON for the expected shape.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A level descriptor violates a structural rule.
    #[error("invalid level: {0}")]
    InvalidLevel(String),

    /// A tuning value is out of its allowed range.
    #[error("invalid tuning value '{field}': {reason}")]
    InvalidTuning { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Read a whole file, attaching the path to any I/O failure.
pub(crate) fn read_file(path: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_string(),
        source,
    })
}
