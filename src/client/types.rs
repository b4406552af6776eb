//! Wire types for the question endpoint

use crate::image::ImageAttachment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the user asked the backend to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// New question, optionally with an image
    #[default]
    Ask,
    /// Answer the last question again, differently
    Regenerate,
    /// Rephrase the last answer more simply
    Simplify,
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Ask => "ask",
            Action::Regenerate => "regenerate",
            Action::Simplify => "simplify",
        }
    }

    /// Regenerate and simplify build on the previous answer
    #[must_use]
    pub fn needs_prior_answer(self) -> bool {
        !matches!(self, Action::Ask)
    }

    /// Only the initiating action carries the image
    #[must_use]
    pub fn sends_image(self) -> bool {
        matches!(self, Action::Ask)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to be sent. Built fresh for every submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub action: Action,
    pub question: Option<String>,
    pub image: Option<ImageAttachment>,
    pub session_id: Option<String>,
}

/// Successful response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Error response body
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: String,
}

/// `GET /health` response body
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}
