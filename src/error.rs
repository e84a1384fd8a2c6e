// Error types for the MCC/MNC extraction pipeline
//
// Every variant here is fatal: the run stops and no output file is written.
// Cleanup problems are deliberately not part of this enum, they are reported
// as warnings on the run summary instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MccMncError {
    /// The source file could not be opened as a zip container
    #[error("{path} is not a valid archive/docx: {reason}")]
    InputFormat { path: PathBuf, reason: String },

    /// The container does not hold the expected markup entry
    #[error("entry '{entry}' not found in archive")]
    MissingEntry { entry: String },

    /// A code line could not be split, or its MCC is not an integer
    #[error("malformed code '{code}': {reason}")]
    MalformedCode { code: String, reason: String },

    #[error("failed to load config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, MccMncError>;

/// Attach a short description to an I/O error
pub(crate) trait IoContext<T> {
    fn context(self, context: impl FnOnce() -> String) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn context(self, context: impl FnOnce() -> String) -> Result<T> {
        self.map_err(|source| MccMncError::Io {
            context: context(),
            source,
        })
    }
}
