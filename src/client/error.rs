//! Client error types

use thiserror::Error;

/// Shown when the request never got a response
pub const CONNECT_MESSAGE: &str = "There was a problem connecting to the server. Please try again.";

/// Detail used when the server gives none we can read
pub const UNKNOWN_DETAIL: &str = "An unknown error occurred.";

/// Shown for an `ask` with neither text nor image
pub const EMPTY_QUESTION_MESSAGE: &str = "Please type a question or upload an image.";

/// Error from a submission attempt, carrying the message shown to the user
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct AskError {
    pub kind: AskErrorKind,
    /// HTTP status, when a response was received
    pub status: Option<u16>,
    pub message: String,
}

impl AskError {
    #[must_use]
    pub fn new(kind: AskErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(AskErrorKind::Validation, message)
    }

    #[must_use]
    pub fn transport() -> Self {
        Self::new(AskErrorKind::Transport, CONNECT_MESSAGE)
    }

    /// Non-2xx response. `detail` is the server's `detail` field, if the body
    /// had one.
    #[must_use]
    pub fn server(status: u16, detail: Option<&str>) -> Self {
        let detail = detail.unwrap_or(UNKNOWN_DETAIL);
        Self {
            kind: AskErrorKind::Server,
            status: Some(status),
            message: format!("Error {status}: {detail}"),
        }
    }

    /// Response body that could not be decoded as an answer
    #[must_use]
    pub fn malformed(status: u16) -> Self {
        Self {
            kind: AskErrorKind::MalformedResponse,
            status: Some(status),
            message: format!("Error {status}: {UNKNOWN_DETAIL}"),
        }
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskErrorKind {
    /// Rejected locally, nothing was sent
    Validation,
    /// Network unreachable or request aborted
    Transport,
    /// Non-2xx status
    Server,
    /// Success status but an unreadable body
    MalformedResponse,
}
