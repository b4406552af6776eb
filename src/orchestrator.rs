//! Request orchestrator
//!
//! Owns the form: its input fields, the session, the current state and the
//! visible surface. Events go through the pure [`transition`] function and the
//! resulting effects are executed here, one at a time, with the backend call
//! as the only suspension point.

#[cfg(test)]
pub mod testing;

use crate::client::{Action, AskClient, AskError, AskResponse, PendingRequest};
use crate::image::ImageAttachment;
use crate::session::{SessionManager, SessionStore};
use crate::state_machine::{transition, Controls, Effect, Event, FormContext, FormInput, FormState};
use std::path::Path;

/// What the user currently sees
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surface {
    pub loading: bool,
    /// Formatted markup in the answer area, when revealed
    pub answer: Option<String>,
    /// Message in the error area, when shown
    pub error: Option<String>,
}

pub struct Orchestrator<C, S> {
    client: C,
    session: SessionManager<S>,
    state: FormState,
    context: FormContext,
    input: FormInput,
    surface: Surface,
}

impl<C, S> Orchestrator<C, S>
where
    C: AskClient,
    S: SessionStore,
{
    #[must_use]
    pub fn new(client: C, session: SessionManager<S>) -> Self {
        Self {
            client,
            session,
            state: FormState::Idle,
            context: FormContext::default(),
            input: FormInput::default(),
            surface: Surface::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    #[must_use]
    pub fn input(&self) -> &FormInput {
        &self.input
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session.current()
    }

    #[must_use]
    pub fn controls(&self) -> Controls {
        Controls::project(&self.state, &self.context)
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input.text = text.into();
    }

    /// Load and attach an image. On failure the error is shown and the
    /// previous attachment, if any, is kept.
    pub async fn attach_image(&mut self, path: &Path) -> bool {
        match ImageAttachment::load(path).await {
            Ok(image) => {
                tracing::debug!(
                    file = %image.file_name,
                    media_type = %image.media_type,
                    bytes = image.len(),
                    "Image attached"
                );
                self.input.image = Some(image);
                true
            }
            Err(e) => {
                self.apply(Event::InputRejected {
                    message: e.to_string(),
                });
                false
            }
        }
    }

    pub fn remove_image(&mut self) {
        self.input.image = None;
    }

    /// Data URL of the attached image, for previews
    #[must_use]
    pub fn preview(&self) -> Option<String> {
        self.input.image.as_ref().map(ImageAttachment::to_data_url)
    }

    /// Whether submitting `action` now would send a request
    #[must_use]
    pub fn would_dispatch(&self, action: Action) -> bool {
        let event = Event::Submit {
            action,
            input: self.input.clone(),
        };
        transition(&self.state, &self.context, event).is_ok_and(|result| {
            result
                .effects
                .iter()
                .any(|effect| matches!(effect, Effect::Dispatch { .. }))
        })
    }

    /// Run one full submission: validate, send, render.
    pub async fn submit(&mut self, action: Action) -> &FormState {
        if let Some(request) = self.begin(action) {
            let result = self.client.ask(&request).await;
            self.complete(result);
        }
        &self.state
    }

    /// Start a submission. Returns the request to send, or `None` when the
    /// action was rejected (busy, nothing to ask, no prior answer).
    pub fn begin(&mut self, action: Action) -> Option<PendingRequest> {
        if !self.state.is_busy() {
            self.context.session_id = Some(self.session.get_or_create_session_id());
        }
        self.apply(Event::Submit {
            action,
            input: self.input.clone(),
        })
    }

    /// Finish the in-flight submission with the backend's result
    pub fn complete(&mut self, result: Result<AskResponse, AskError>) {
        self.apply(Event::from_result(result));
    }

    fn apply(&mut self, event: Event) -> Option<PendingRequest> {
        let result = match transition(&self.state, &self.context, event) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!(state = self.state.name(), error = %e, "Event ignored");
                return None;
            }
        };

        tracing::debug!(
            from = self.state.name(),
            to = result.new_state.name(),
            "Form transition"
        );
        self.state = result.new_state;
        if matches!(self.state, FormState::Displaying { .. }) {
            self.context.has_answer = true;
        }

        let mut dispatch = None;
        for effect in result.effects {
            if let Some(request) = self.execute_effect(effect) {
                dispatch = Some(request);
            }
        }
        dispatch
    }

    fn execute_effect(&mut self, effect: Effect) -> Option<PendingRequest> {
        match effect {
            Effect::SetLoading(loading) => self.surface.loading = loading,
            Effect::ClearError => self.surface.error = None,
            Effect::HideAnswer => self.surface.answer = None,
            Effect::Dispatch { request } => {
                tracing::info!(
                    action = %request.action,
                    session_id = request.session_id.as_deref().unwrap_or("-"),
                    has_text = request.question.is_some(),
                    has_image = request.image.is_some(),
                    "Submitting question"
                );
                return Some(request);
            }
            Effect::StoreSession { session_id } => {
                self.session.update_session_id(&session_id);
                self.context.session_id = Some(session_id);
            }
            Effect::ShowAnswer { markup } => self.surface.answer = Some(markup),
            Effect::ShowError { message } => {
                tracing::warn!(error = %message, "Showing error");
                self.surface.error = Some(message);
            }
        }
        None
    }
}
