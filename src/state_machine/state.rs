//! Form state types

use crate::client::{Action, AskErrorKind};

/// Where the form is in its submit cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    /// Nothing shown yet
    #[default]
    Idle,

    /// A request is in flight
    Submitting { action: Action },

    /// An answer is on screen
    Displaying {
        /// Raw answer text from the backend
        answer: String,
        /// Formatted markup shown in the answer area
        markup: String,
    },

    /// The last attempt failed; the user may retry immediately
    Error { message: String, kind: AskErrorKind },
}

impl FormState {
    /// True while a submission is outstanding
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, FormState::Submitting { .. })
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            FormState::Idle => "idle",
            FormState::Submitting { .. } => "submitting",
            FormState::Displaying { .. } => "displaying",
            FormState::Error { .. } => "error",
        }
    }
}

/// Inputs to transitions that live outside the state itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormContext {
    /// Session id to attach to the next request
    pub session_id: Option<String>,
    /// Whether any answer has been displayed in this session
    pub has_answer: bool,
}

impl FormContext {
    #[must_use]
    pub fn new(session_id: Option<String>) -> Self {
        Self {
            session_id,
            has_answer: false,
        }
    }
}

/// What the controls look like for a given state
#[allow(clippy::struct_excessive_bools)] // one flag per widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub loading: bool,
    pub submit_enabled: bool,
    /// Regenerate and simplify
    pub secondary_enabled: bool,
    pub answer_visible: bool,
    pub error_visible: bool,
}

impl Controls {
    #[must_use]
    pub fn project(state: &FormState, context: &FormContext) -> Self {
        let busy = state.is_busy();
        Self {
            loading: busy,
            submit_enabled: !busy,
            secondary_enabled: !busy && context.has_answer,
            answer_visible: matches!(state, FormState::Displaying { .. }),
            error_visible: matches!(state, FormState::Error { .. }),
        }
    }

    /// Whether the control for `action` can be activated
    #[must_use]
    pub fn allows(&self, action: Action) -> bool {
        if action.needs_prior_answer() {
            self.secondary_enabled
        } else {
            self.submit_enabled
        }
    }
}
