//! Science Helper client
//!
//! Collects a question (text and/or image), posts it to a session-scoped
//! question-answering backend, and formats the answer for display.

pub mod client;
pub mod config;
pub mod format;
pub mod image;
pub mod orchestrator;
pub mod session;
pub mod state_machine;
pub mod terminal;

pub use client::{Action, AskClient, AskError, AskErrorKind, HttpAskClient, LoggingClient};
pub use config::ClientConfig;
pub use format::format_answer;
pub use orchestrator::{Orchestrator, Surface};
pub use session::{FileStore, MemoryStore, SessionManager, SessionStore};
pub use state_machine::{Controls, FormState};
