// src/transport/http.rs
// reqwest transport for the Flask planning backend

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use super::{ChatReply, HealthStatus, Transport};
use crate::context::TripContext;
use crate::destinations::DestinationSummary;
use crate::error::{PlannerError, Result};

/// Default request timeout for backend calls
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Connect timeout, capped at the request timeout
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct DestinationsBody {
    #[serde(default)]
    destinations: Vec<DestinationSummary>,
}

#[derive(Debug, Deserialize)]
struct SessionContextBody {
    #[serde(default)]
    context: serde_json::Value,
}

pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let connect_timeout = timeout.min(Duration::from_secs(CONNECT_TIMEOUT_SECS));
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reject non-2xx replies, keeping the backend's `error` text when present
    async fn check_status(path: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or(body);

        warn!(path = %path, status = %status, error = %detail, "Backend returned error status");
        Err(PlannerError::TransportUnavailable(format!(
            "HTTP {} from {}: {}",
            status, path, detail
        )))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.client.get(self.url(path)).query(query).send().await?;
        let response = Self::check_status(path, response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    async fn post_chat(&self, message: &str, session_id: &str) -> Result<ChatReply> {
        let path = "/api/chat";
        debug!(session_id = %session_id, chars = message.len(), "POST {}", path);

        let response = self
            .client
            .post(self.url(path))
            .json(&json!({ "message": message, "session_id": session_id }))
            .send()
            .await?;
        let response = Self::check_status(path, response).await?;
        let reply: ChatReply = response.json().await?;

        if let Some(error) = reply.error_message() {
            warn!(session_id = %session_id, error = %error, "Backend flagged chat reply as failed");
            return Err(PlannerError::Backend(error));
        }
        Ok(reply)
    }

    async fn get_destinations(&self) -> Result<Vec<DestinationSummary>> {
        let body: DestinationsBody = self.get_json("/api/destinations", &[]).await?;
        debug!(count = body.destinations.len(), "Fetched destinations");
        Ok(body.destinations)
    }

    async fn reset_session(&self, session_id: &str) -> Result<()> {
        let path = "/api/session/reset";
        let response = self
            .client
            .post(self.url(path))
            .json(&json!({ "session_id": session_id }))
            .send()
            .await?;
        Self::check_status(path, response).await?;
        debug!(session_id = %session_id, "Backend session reset");
        Ok(())
    }

    async fn session_context(&self, session_id: &str) -> Result<TripContext> {
        let body: SessionContextBody = self
            .get_json("/api/session/context", &[("session_id", session_id)])
            .await?;
        Ok(TripContext::from_value(&body.context))
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.get_json("/api/health", &[]).await
    }
}
