use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Failed to parse request: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Unable to complete the request due to an error from the server.")]
    ServerError { status: u16 },

    #[error("Failed to send message: {0}")]
    MessagingError(String),
}

impl From<reqwest::Error> for TrackerError {
    fn from(error: reqwest::Error) -> Self {
        TrackerError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(error: serde_json::Error) -> Self {
        TrackerError::ParseError(format!("Invalid JSON: {}", error))
    }
}

impl From<base64::DecodeError> for TrackerError {
    fn from(error: base64::DecodeError) -> Self {
        TrackerError::ParseError(format!("Invalid base64 body: {}", error))
    }
}
