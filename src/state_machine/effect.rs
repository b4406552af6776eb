//! Effects produced by state transitions

use crate::client::PendingRequest;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show or hide the loading indicator
    SetLoading(bool),

    /// Clear and hide the error area
    ClearError,

    /// Hide the answer area
    HideAnswer,

    /// Send the request to the backend
    Dispatch { request: PendingRequest },

    /// Persist a session id the server handed back
    StoreSession { session_id: String },

    /// Replace the answer area with formatted markup and reveal it
    ShowAnswer { markup: String },

    /// Show a message in the error area
    ShowError { message: String },
}

impl Effect {
    #[must_use]
    pub fn dispatch(request: PendingRequest) -> Self {
        Effect::Dispatch { request }
    }

    #[must_use]
    pub fn show_error(message: impl Into<String>) -> Self {
        Effect::ShowError {
            message: message.into(),
        }
    }
}
