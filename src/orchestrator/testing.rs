//! Mock implementations for testing
//!
//! These mocks let the orchestrator run without a backend.

use crate::client::{AskClient, AskError, AskResponse, PendingRequest};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock backend client that returns queued responses
pub struct MockAskClient {
    responses: Mutex<VecDeque<Result<AskResponse, AskError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<PendingRequest>>,
}

impl MockAskClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: AskResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: AskError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    #[must_use]
    pub fn recorded_requests(&self) -> Vec<PendingRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockAskClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AskClient for MockAskClient {
    async fn ask(&self, request: &PendingRequest) -> Result<AskResponse, AskError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AskError::transport()))
    }
}
