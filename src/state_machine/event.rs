//! Events that drive the form

use crate::client::{Action, AskError, AskResponse, PendingRequest};
use crate::image::ImageAttachment;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// The user activated submit, regenerate or simplify
    Submit { action: Action, input: FormInput },

    /// Input was rejected before any submission (e.g. unreadable image)
    InputRejected { message: String },

    /// The backend answered
    Answered { response: AskResponse },

    /// The submission failed
    Failed { error: AskError },
}

impl Event {
    /// Map a finished request onto its event
    #[must_use]
    pub fn from_result(result: Result<AskResponse, AskError>) -> Self {
        match result {
            Ok(response) => Event::Answered { response },
            Err(error) => Event::Failed { error },
        }
    }
}

/// The editable fields of the question form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub text: String,
    pub image: Option<ImageAttachment>,
}

impl FormInput {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.image = Some(image);
        self
    }

    /// Trimmed question text, if any
    #[must_use]
    pub fn question(&self) -> Option<&str> {
        let text = self.text.trim();
        (!text.is_empty()).then_some(text)
    }

    /// Nothing to ask about
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.question().is_none() && self.image.is_none()
    }

    /// Build the request for `action`. The image only travels with `ask`.
    #[must_use]
    pub fn to_request(&self, action: Action, session_id: Option<String>) -> PendingRequest {
        PendingRequest {
            action,
            question: self.question().map(str::to_string),
            image: self.image.clone().filter(|_| action.sends_image()),
            session_id,
        }
    }
}
