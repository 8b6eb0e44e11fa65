//! Client-side error type.

use thiserror::Error;

/// Errors surfaced by the session store and dashboard controller.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("request failed with status {status}")]
    Api { status: u16, message: Option<String> },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Another session request is still in flight.
    #[error("session is busy")]
    Busy,

    #[error("not authenticated")]
    NotAuthenticated,
}

impl ClientError {
    /// Message from the server's error envelope, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Result type alias
pub type ClientResult<T> = Result<T, ClientError>;
