//! Planning backend transport
//!
//! The [`Transport`] trait is the seam between the chat orchestrator and the
//! network. [`HttpTransport`] talks to the Flask planning backend;
//! [`OfflineTransport`] never connects, so every exchange is answered by the
//! local simulator.

mod http;

pub use http::{DEFAULT_TIMEOUT_SECS, HttpTransport};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::context::TripContext;
use crate::destinations::{DestinationSummary, fallback_destinations};
use crate::error::{PlannerError, Result};

/// Body of a `POST /api/chat` reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub context: serde_json::Value,
    #[serde(default)]
    pub session_id: Option<String>,
    /// Anything truthy here means the backend failed the exchange
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl ChatReply {
    /// Error description when the reply carries a truthy `error` field
    pub fn error_message(&self) -> Option<String> {
        match &self.error {
            Some(value) if is_truthy(value) => Some(match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
            _ => None,
        }
    }

    pub fn trip_context(&self) -> TripContext {
        TripContext::from_value(&self.context)
    }
}

/// `GET /api/health` reply
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Human-readable target, for status output
    fn describe(&self) -> String;

    async fn post_chat(&self, message: &str, session_id: &str) -> Result<ChatReply>;

    async fn get_destinations(&self) -> Result<Vec<DestinationSummary>>;

    async fn reset_session(&self, session_id: &str) -> Result<()>;

    async fn session_context(&self, session_id: &str) -> Result<TripContext>;

    async fn health(&self) -> Result<HealthStatus>;
}

/// Transport that is never reachable
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineTransport;

impl OfflineTransport {
    fn unavailable<T>() -> Result<T> {
        Err(PlannerError::TransportUnavailable("offline mode".to_string()))
    }
}

#[async_trait]
impl Transport for OfflineTransport {
    fn describe(&self) -> String {
        "offline".to_string()
    }

    async fn post_chat(&self, _message: &str, _session_id: &str) -> Result<ChatReply> {
        Self::unavailable()
    }

    async fn get_destinations(&self) -> Result<Vec<DestinationSummary>> {
        Self::unavailable()
    }

    async fn reset_session(&self, _session_id: &str) -> Result<()> {
        Self::unavailable()
    }

    async fn session_context(&self, _session_id: &str) -> Result<TripContext> {
        Self::unavailable()
    }

    async fn health(&self) -> Result<HealthStatus> {
        Self::unavailable()
    }
}

/// Destination list and where it came from
#[derive(Debug, Clone)]
pub struct DestinationList {
    pub destinations: Vec<DestinationSummary>,
    pub from_backend: bool,
}

/// Fetch destinations, falling back to the built-in catalog
pub async fn load_destinations(transport: &dyn Transport) -> DestinationList {
    match transport.get_destinations().await {
        Ok(destinations) => DestinationList {
            destinations,
            from_backend: true,
        },
        Err(e) => {
            warn!(error = %e, "Destination fetch failed, using built-in list");
            DestinationList {
                destinations: fallback_destinations(),
                from_backend: false,
            }
        }
    }
}

/// JavaScript-style truthiness of a JSON value
pub fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("boom")));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_reply_error_message() {
        let reply: ChatReply =
            serde_json::from_value(json!({"response": "", "error": "Message is required"})).unwrap();
        assert_eq!(reply.error_message().as_deref(), Some("Message is required"));

        let reply: ChatReply = serde_json::from_value(json!({"response": "hi", "error": false})).unwrap();
        assert!(reply.error_message().is_none());

        let reply: ChatReply = serde_json::from_value(json!({"error": true})).unwrap();
        assert_eq!(reply.error_message().as_deref(), Some("true"));
    }

    #[test]
    fn test_reply_context() {
        let reply: ChatReply = serde_json::from_value(json!({
            "response": "ok",
            "context": {"destination": "Seoul", "duration_days": 3},
            "session_id": "s"
        }))
        .unwrap();
        let ctx = reply.trip_context();
        assert_eq!(ctx.destination.as_deref(), Some("Seoul"));
        assert_eq!(ctx.duration_days, Some(3));
    }

    #[tokio::test]
    async fn test_offline_transport_always_unavailable() {
        let transport = OfflineTransport;
        let err = transport.post_chat("hi", "s").await.unwrap_err();
        assert!(matches!(err, PlannerError::TransportUnavailable(_)));
        assert!(transport.health().await.is_err());
    }

    #[tokio::test]
    async fn test_load_destinations_falls_back() {
        let list = load_destinations(&OfflineTransport).await;
        assert!(!list.from_backend);
        assert_eq!(list.destinations.len(), 6);
        assert_eq!(list.destinations[0].name, "Tokyo");
    }
}
