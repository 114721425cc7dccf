use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("Fetch error: {status} - {body}")]
    Fetch { status: u16, body: String },

    #[error("No pairs found for token: {0}")]
    EmptyResult(String),

    #[error("Mapping error: {0}")]
    Mapping(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AlertError {
    /// True for errors raised by a non-success upstream status.
    pub fn is_fetch(&self) -> bool {
        matches!(self, AlertError::Fetch { .. })
    }
}
