use thiserror::Error;

/// Error type that captures common ledger and storage failures.
///
/// Id lookups that miss are deliberately not an error: operations referencing
/// a vanished group or record are silent no-ops.
#[derive(Debug, Error)]
pub enum KasaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid number: `{0}`")]
    InvalidNumber(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Missing field: `{0}` must be present as an array")]
    MissingFields(String),
}

pub type Result<T> = std::result::Result<T, KasaError>;
