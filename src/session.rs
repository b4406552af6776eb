//! Session identifier management
//!
//! The backend keys its conversational context by a session id. The client
//! creates one lazily, persists it, and adopts whatever id the server echoes
//! back. Storage failures never stop a session: the id is kept in memory for
//! the rest of the process.

mod store;

pub use store::{FileStore, MemoryStore, SessionStore, StoreError, UnavailableStore};

use uuid::Uuid;

/// Storage key for the session id
pub const SESSION_KEY: &str = "science_helper_session_id";

pub struct SessionManager<S> {
    store: S,
    current: Option<String>,
}

impl<S: SessionStore> SessionManager<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// The id held right now, without creating one
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Return the persisted id, or create and persist a new one
    pub fn get_or_create_session_id(&mut self) -> String {
        if let Some(id) = &self.current {
            return id.clone();
        }

        match self.store.get(SESSION_KEY) {
            Ok(Some(id)) if !id.is_empty() => {
                tracing::debug!(session_id = %id, "Restored session");
                self.current = Some(id.clone());
                return id;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Could not read session storage");
            }
        }

        let id = Uuid::new_v4().to_string();
        self.persist(&id);
        tracing::info!(session_id = %id, "Created session");
        self.current = Some(id.clone());
        id
    }

    /// Adopt `new_id` if it differs from the held id. Returns whether it changed.
    pub fn update_session_id(&mut self, new_id: &str) -> bool {
        if new_id.is_empty() || self.current.as_deref() == Some(new_id) {
            return false;
        }

        tracing::info!(
            old = self.current.as_deref().unwrap_or("-"),
            new = %new_id,
            "Server assigned session"
        );
        self.persist(new_id);
        self.current = Some(new_id.to_string());
        true
    }

    fn persist(&mut self, id: &str) {
        if let Err(e) = self.store.set(SESSION_KEY, id) {
            tracing::warn!(error = %e, "Session storage unavailable, keeping id in memory");
        }
    }
}
