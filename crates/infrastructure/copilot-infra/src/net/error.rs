#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    Transport,
    Status,
    Decode,
    InvalidUrl,
}

impl ServiceError {
    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            ServiceError::Http(_) => ServiceErrorKind::Transport,
            ServiceError::Status { .. } => ServiceErrorKind::Status,
            ServiceError::Decode(_) => ServiceErrorKind::Decode,
            ServiceError::InvalidUrl(_) => ServiceErrorKind::InvalidUrl,
        }
    }
}
