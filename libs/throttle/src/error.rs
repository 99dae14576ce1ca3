use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThrottleError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("{api} kept answering 429 after {attempts} attempts")]
    Exhausted { api: String, attempts: u32 },

    #[error("Request body cannot be replayed for a retry")]
    NotReplayable,
}

impl ThrottleError {
    /// HTTP status of a non-success response, if this error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => Some(*status_code),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
