use thiserror::Error;
use throttle::ThrottleError;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse JSON response at '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("Rate limiting failed: {0}")]
    Throttle(ThrottleError),
}

impl From<ThrottleError> for TmdbError {
    fn from(err: ThrottleError) -> Self {
        match err {
            ThrottleError::Request(e) => Self::Request(e),
            ThrottleError::Api {
                status_code,
                message,
            } => Self::Api {
                status_code,
                message,
            },
            other => Self::Throttle(other),
        }
    }
}
