//! Pure state transition function
//!
//! Given the same state, context and event this always produces the same
//! new state and effects. All I/O happens in the orchestrator that executes
//! the effects.

use super::{Effect, Event, FormContext, FormState};
use crate::client::{Action, AskError, EMPTY_QUESTION_MESSAGE};
use crate::format::format_answer;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: FormState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    #[must_use]
    pub fn new(state: FormState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Events the current state does not accept. The matching control is
/// disabled, so the driver treats these as no-ops.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A submission is already in flight")]
    Busy,
    #[error("Cannot {0} before an answer has been shown")]
    NoAnswerYet(Action),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Compute the next state and the effects that get there.
///
/// # Errors
///
/// Rejects work while a request is in flight, secondary actions before any
/// answer, and events that make no sense in the current state.
pub fn transition(
    state: &FormState,
    context: &FormContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Submission
        // ============================================================
        (FormState::Submitting { .. }, Event::Submit { .. } | Event::InputRejected { .. }) => {
            Err(TransitionError::Busy)
        }

        (_, Event::Submit { action, .. }) if action.needs_prior_answer() && !context.has_answer => {
            Err(TransitionError::NoAnswerYet(action))
        }

        // Empty ask never reaches the server
        (_, Event::Submit { action: Action::Ask, input }) if input.is_empty() => {
            Ok(fail(AskError::validation(EMPTY_QUESTION_MESSAGE)))
        }

        // Idle/Displaying/Error + Submit -> Submitting
        (_, Event::Submit { action, input }) => {
            let request = input.to_request(action, context.session_id.clone());
            Ok(TransitionResult::new(FormState::Submitting { action })
                .with_effect(Effect::ClearError)
                .with_effect(Effect::HideAnswer)
                .with_effect(Effect::SetLoading(true))
                .with_effect(Effect::dispatch(request)))
        }

        (_, Event::InputRejected { message }) => Ok(fail(AskError::validation(message))),

        // ============================================================
        // Completion
        // ============================================================
        (FormState::Submitting { .. }, Event::Answered { response }) => {
            let markup = format_answer(&response.answer);
            let mut result = TransitionResult::new(FormState::Displaying {
                answer: response.answer,
                markup: markup.clone(),
            })
            .with_effect(Effect::SetLoading(false));

            if let Some(session_id) = response
                .session_id
                .filter(|id| !id.is_empty() && context.session_id.as_deref() != Some(id.as_str()))
            {
                result = result.with_effect(Effect::StoreSession { session_id });
            }

            Ok(result
                .with_effect(Effect::ClearError)
                .with_effect(Effect::ShowAnswer { markup }))
        }

        (FormState::Submitting { .. }, Event::Failed { error }) => Ok(
            TransitionResult::new(FormState::Error {
                message: error.message.clone(),
                kind: error.kind,
            })
            .with_effect(Effect::SetLoading(false))
            .with_effect(Effect::HideAnswer)
            .with_effect(Effect::show_error(error.message)),
        ),

        // ============================================================
        // Invalid Transitions
        // ============================================================
        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {} with event {event:?}",
            state.name()
        ))),
    }
}

/// Error state for a failure that did not involve an in-flight request
fn fail(error: AskError) -> TransitionResult {
    TransitionResult::new(FormState::Error {
        message: error.message.clone(),
        kind: error.kind,
    })
    .with_effect(Effect::HideAnswer)
    .with_effect(Effect::show_error(error.message))
}
