use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed report {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("Best practice '{rule}' missing from page findings")]
    MissingRule { rule: String },

    #[error("Unknown language '{0}' (available: en, fr)")]
    UnknownLanguage(String),
}

impl ReportError {
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ReportError::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
