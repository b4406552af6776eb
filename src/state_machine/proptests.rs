//! Property-based tests for the form state machine
//!
//! These tests verify key invariants hold across all possible inputs:
//! - At most one request is ever dispatched per transition, and never while busy
//! - An empty ask never dispatches
//! - Regenerate and simplify never carry an image
//! - Every failure ends in a visible error with loading switched off
//! - Transitions are deterministic

use super::*;
use crate::client::{Action, AskError, AskErrorKind, AskResponse};
use crate::image::ImageAttachment;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Ask),
        Just(Action::Regenerate),
        Just(Action::Simplify),
    ]
}

fn arb_image() -> impl Strategy<Value = Option<ImageAttachment>> {
    prop_oneof![
        Just(None),
        proptest::collection::vec(any::<u8>(), 1..8)
            .prop_map(|bytes| ImageAttachment::from_bytes("q.png", bytes).ok()),
    ]
}

fn arb_input() -> impl Strategy<Value = FormInput> {
    ("[a-z ]{0,12}", arb_image()).prop_map(|(text, image)| FormInput { text, image })
}

fn arb_error() -> impl Strategy<Value = AskError> {
    prop_oneof![
        Just(AskError::transport()),
        (400u16..600, proptest::option::of("[a-zA-Z ]{1,20}"))
            .prop_map(|(status, detail)| AskError::server(status, detail.as_deref())),
        (200u16..300).prop_map(AskError::malformed),
    ]
}

fn arb_state() -> impl Strategy<Value = FormState> {
    prop_oneof![
        Just(FormState::Idle),
        arb_action().prop_map(|action| FormState::Submitting { action }),
        "[a-z ]{0,20}".prop_map(|answer| FormState::Displaying {
            markup: answer.clone(),
            answer,
        }),
        arb_error().prop_map(|e| FormState::Error {
            message: e.message,
            kind: e.kind,
        }),
    ]
}

fn arb_context() -> impl Strategy<Value = FormContext> {
    (proptest::option::of("[a-z0-9]{4}"), any::<bool>())
        .prop_map(|(session_id, has_answer)| FormContext { session_id, has_answer })
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        (arb_action(), arb_input()).prop_map(|(action, input)| Event::Submit { action, input }),
        "[a-z ]{1,20}".prop_map(|message| Event::InputRejected { message }),
        ("[a-z*\\n ]{0,20}", proptest::option::of("[a-z0-9]{4}")).prop_map(
            |(answer, session_id)| Event::Answered {
                response: AskResponse { answer, session_id },
            }
        ),
        arb_error().prop_map(|error| Event::Failed { error }),
    ]
}

fn dispatch_count(result: &TransitionResult) -> usize {
    result
        .effects
        .iter()
        .filter(|e| matches!(e, Effect::Dispatch { .. }))
        .count()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_busy_rejects_new_work(
        action in arb_action(),
        context in arb_context(),
        event in arb_event(),
    ) {
        let state = FormState::Submitting { action };
        if matches!(event, Event::Submit { .. } | Event::InputRejected { .. }) {
            prop_assert_eq!(transition(&state, &context, event).unwrap_err(), TransitionError::Busy);
        }
    }

    #[test]
    fn prop_at_most_one_dispatch(
        state in arb_state(),
        context in arb_context(),
        event in arb_event(),
    ) {
        if let Ok(result) = transition(&state, &context, event) {
            let count = dispatch_count(&result);
            prop_assert!(count <= 1);
            if count == 1 {
                prop_assert!(result.new_state.is_busy());
                prop_assert!(!state.is_busy());
            }
        }
    }

    #[test]
    fn prop_empty_ask_never_dispatches(
        state in arb_state(),
        context in arb_context(),
        text in "[ \\t\\n]{0,5}",
    ) {
        let event = Event::Submit { action: Action::Ask, input: FormInput::new(text) };
        if let Ok(result) = transition(&state, &context, event) {
            prop_assert_eq!(dispatch_count(&result), 0);
            let is_validation_error = matches!(
                result.new_state,
                FormState::Error { kind: AskErrorKind::Validation, .. }
            );
            prop_assert!(is_validation_error);
        }
    }

    #[test]
    fn prop_image_only_with_ask(
        state in arb_state(),
        context in arb_context(),
        action in arb_action(),
        input in arb_input(),
    ) {
        if let Ok(result) = transition(&state, &context, Event::Submit { action, input }) {
            for effect in &result.effects {
                if let Effect::Dispatch { request } = effect {
                    prop_assert_eq!(request.action, action);
                    prop_assert_eq!(&request.session_id, &context.session_id);
                    if action != Action::Ask {
                        prop_assert!(request.image.is_none());
                    }
                }
            }
        }
    }

    #[test]
    fn prop_failure_is_visible(
        action in arb_action(),
        context in arb_context(),
        error in arb_error(),
    ) {
        let message = error.message.clone();
        let result = transition(&FormState::Submitting { action }, &context, Event::Failed { error }).unwrap();
        prop_assert!(result.effects.contains(&Effect::SetLoading(false)));
        let shown = result.effects.contains(&Effect::ShowError { message });
        prop_assert!(shown);
        let controls = Controls::project(&result.new_state, &context);
        prop_assert!(controls.submit_enabled);
        prop_assert!(controls.error_visible);
        prop_assert!(!controls.answer_visible);
    }

    #[test]
    fn prop_session_stored_only_when_different(
        context in arb_context(),
        session_id in proptest::option::of("[a-z0-9]{4}"),
    ) {
        let event = Event::Answered {
            response: AskResponse { answer: "ok".to_string(), session_id: session_id.clone() },
        };
        let result = transition(&FormState::Submitting { action: Action::Ask }, &context, event).unwrap();
        let stored = result.effects.iter().any(|e| matches!(e, Effect::StoreSession { .. }));
        let expected = session_id.is_some() && session_id != context.session_id;
        prop_assert_eq!(stored, expected);
    }

    #[test]
    fn prop_deterministic(
        state in arb_state(),
        context in arb_context(),
        event in arb_event(),
    ) {
        let a = transition(&state, &context, event.clone());
        let b = transition(&state, &context, event);
        match (a, b) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.new_state, b.new_state);
                prop_assert_eq!(a.effects, b.effects);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "transition results diverged"),
        }
    }
}
