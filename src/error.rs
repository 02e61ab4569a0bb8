use thiserror::Error;

/// Errors raised by topology construction and document import.
///
/// Lookups never error; absence is reported as `Option`/empty results.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown node kind: {0}")]
    InvalidKind(String),

    #[error("invalid exchange type: {0}")]
    InvalidExchangeType(String),

    #[error("unsupported document version: {found} (supported: {supported})")]
    UnsupportedVersion { found: String, supported: String },

    #[error("invalid topology JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
