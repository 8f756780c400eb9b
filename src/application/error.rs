use thiserror::Error;

/// Failures produced by API calls. Every variant is scoped to the single
/// operation that produced it; repeating the user action retries it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Download failed: {0}")]
    Download(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Transport("Request timeout".to_string())
        } else if error.is_connect() {
            ApiError::Transport(format!("Connection failed: {}", error))
        } else if error.is_decode() {
            ApiError::MalformedResponse(error.to_string())
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}

/// Upload state-machine violations. Local only; these never reach the
/// network.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadStateError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("An upload is already in progress")]
    UploadInFlight,
}
