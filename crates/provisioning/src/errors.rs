use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("invalid MAC address: expected 12 hex digits, got {sanitized:?}")]
    InvalidMac { sanitized: String },

    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("xml error: {0}")]
    Xml(#[from] std::io::Error),

    #[error("document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

pub type Result<T, E = ProvisionError> = std::result::Result<T, E>;
