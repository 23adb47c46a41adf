use thiserror::Error;

pub type Result<T> = std::result::Result<T, NotaError>;

/// Error type for all nota operations.
#[derive(Debug, Error)]
pub enum NotaError {
    /// A page or block (or a stack entry matching a query) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Transport-level failure talking to the API.
    #[error("request failed")]
    Fetch(#[from] ureq::Error),

    /// The API answered with an error status.
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// A block type outside the supported set.
    #[error("unknown block type: {0}")]
    UnknownBlockType(String),

    /// A required sub-payload was absent or malformed (e.g. a page without
    /// a title property, an image without a usable URL).
    #[error("malformed content: {0}")]
    Format(String),

    /// Missing or unusable local configuration.
    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}
