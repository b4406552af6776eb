//! Question form state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! `Idle`, `Submitting`, `Displaying` and `Error`, with every visible change
//! expressed as an [`Effect`].

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::{Event, FormInput};
pub use state::{Controls, FormContext, FormState};
pub use transition::{transition, TransitionError, TransitionResult};
