use thiserror::Error;

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("network error: {0}")]
pub struct TransportError(pub String);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("not authorized, log in again")]
    Unauthorized,
    #[error("server answered with status {status}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Short message suitable for an inline error line in the UI.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "Could not connect to the server.".to_string(),
            ApiError::Unauthorized => "Your session is no longer valid. Log out and sign in again.".to_string(),
            ApiError::Status { status, .. } if *status >= 500 => {
                "The server failed to process the request.".to_string()
            }
            ApiError::Status { .. } => "The server rejected the request.".to_string(),
            ApiError::Decode(_) | ApiError::Encode(_) => "Unexpected data, try again.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoginError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Could not connect to the server")]
    Unreachable(#[source] TransportError),
}
