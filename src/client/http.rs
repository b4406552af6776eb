//! HTTP implementation of the backend client

use super::types::{ErrorBody, HealthResponse};
use super::{AskClient, AskError, AskResponse, PendingRequest};
use crate::config::ClientConfig;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;

/// Upper bound on the startup health check, independent of the answer timeout
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Posts questions as multipart forms to `{base_url}/ask`
#[derive(Clone)]
pub struct HttpAskClient {
    client: Client,
    base_url: String,
    health_timeout: Duration,
}

impl HttpAskClient {
    /// # Errors
    ///
    /// Fails when the underlying HTTP client cannot be built (TLS backend
    /// initialisation).
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            health_timeout: HEALTH_TIMEOUT.min(config.timeout),
        })
    }

    #[must_use]
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn build_form(request: &PendingRequest) -> Result<Form, AskError> {
        let mut form = Form::new().text("action", request.action.as_str());

        if let Some(session_id) = &request.session_id {
            form = form.text("session_id", session_id.clone());
        }
        if let Some(question) = &request.question {
            form = form.text("question", question.clone());
        }
        if let Some(image) = request.image.as_ref().filter(|_| request.action.sends_image()) {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.media_type)
                .map_err(|e| AskError::validation(format!("Invalid image type: {e}")))?;
            form = form.part("image", part);
        }

        Ok(form)
    }

    /// Probe `GET /health`, giving up after the health timeout
    ///
    /// # Errors
    ///
    /// Returns a transport error when the backend is unreachable or silent,
    /// and a server error for a non-2xx status.
    pub async fn health(&self) -> Result<HealthResponse, AskError> {
        let response = self
            .client
            .get(self.url("/health"))
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Health check request failed");
                AskError::transport()
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|_| AskError::transport())?;
        if !(200..300).contains(&status) {
            return Err(error_from_body(status, &body));
        }
        serde_json::from_str(&body).map_err(|_| AskError::malformed(status))
    }
}

#[async_trait]
impl AskClient for HttpAskClient {
    async fn ask(&self, request: &PendingRequest) -> Result<AskResponse, AskError> {
        let form = Self::build_form(request)?;

        let response = self
            .client
            .post(self.url("/ask"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::warn!(error = %e, "Request timed out");
                } else {
                    tracing::warn!(error = %e, "Request failed");
                }
                AskError::transport()
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read response body");
            AskError::transport()
        })?;

        interpret_response(status, &body)
    }
}

/// Decode a response. Pure so the status/body rules can be tested directly.
pub(crate) fn interpret_response(status: u16, body: &str) -> Result<AskResponse, AskError> {
    if !(200..300).contains(&status) {
        return Err(error_from_body(status, body));
    }

    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(status, error = %e, "Unreadable answer body");
        AskError::malformed(status)
    })
}

fn error_from_body(status: u16, body: &str) -> AskError {
    let detail = serde_json::from_str::<ErrorBody>(body).ok().map(|b| b.detail);
    AskError::server(status, detail.as_deref())
}
