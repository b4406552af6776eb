//! Question-answering backend client
//!
//! The backend is an opaque HTTP endpoint. [`AskClient`] is the seam the
//! orchestrator talks through, so tests can swap in a mock.

mod error;
mod http;
mod types;

pub use error::{AskError, AskErrorKind, CONNECT_MESSAGE, EMPTY_QUESTION_MESSAGE, UNKNOWN_DETAIL};
pub use http::HttpAskClient;
pub use types::{Action, AskResponse, HealthResponse, PendingRequest};

use async_trait::async_trait;
use std::sync::Arc;

/// Sends a pending request to the backend
#[async_trait]
pub trait AskClient: Send + Sync {
    async fn ask(&self, request: &PendingRequest) -> Result<AskResponse, AskError>;
}

#[async_trait]
impl<T: AskClient + ?Sized> AskClient for Arc<T> {
    async fn ask(&self, request: &PendingRequest) -> Result<AskResponse, AskError> {
        (**self).ask(request).await
    }
}

/// Logging wrapper for backend clients
pub struct LoggingClient<C> {
    inner: C,
}

impl<C: AskClient> LoggingClient<C> {
    #[must_use]
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: AskClient> AskClient for LoggingClient<C> {
    async fn ask(&self, request: &PendingRequest) -> Result<AskResponse, AskError> {
        let start = std::time::Instant::now();
        let result = self.inner.ask(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    action = %request.action,
                    session_id = request.session_id.as_deref().unwrap_or("-"),
                    duration_ms = %duration.as_millis(),
                    answer_len = response.answer.len(),
                    "Question answered"
                );
            }
            Err(e) => {
                tracing::error!(
                    action = %request.action,
                    session_id = request.session_id.as_deref().unwrap_or("-"),
                    duration_ms = %duration.as_millis(),
                    status = ?e.status,
                    error = %e.message,
                    "Question failed"
                );
            }
        }

        result
    }
}
