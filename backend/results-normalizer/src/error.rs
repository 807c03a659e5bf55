use thiserror::Error;

/// Failures of the results API boundary. The normalizer itself never fails.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid resource url '{0}': {1}")]
    InvalidUrl(String, String),

    #[error("request to results API failed: {0}")]
    Transport(String),

    #[error("results API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode results API response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Transport failures and 5xx responses are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) => true,
            FetchError::Status { status, .. } => *status >= 500,
            FetchError::InvalidUrl(..) | FetchError::Decode(_) => false,
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidUrl(..) => "invalid_url",
            FetchError::Transport(_) => "transport",
            FetchError::Status { .. } => "status",
            FetchError::Decode(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}
