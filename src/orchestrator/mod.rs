//! Chat orchestrator
//!
//! Drives one exchange at a time: the user message goes to the transport,
//! and whatever comes back (or fails to) is turned into an assistant turn.
//! Any recoverable transport failure is answered by the local simulator, so
//! the user always gets a reply.

mod state;

pub use state::{
    ChatMessage, ChatState, Completion, Exchange, Phase, Role, Source, SubmitRejected,
};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::context::TripContext;
use crate::error::{PlannerError, Result};
use crate::panel::DisplayContextPanel;
use crate::simulator;
use crate::transport::{ChatReply, Transport};

/// Generate a client session id
pub fn new_session_id() -> String {
    format!("session-{}", Uuid::new_v4())
}

pub struct Orchestrator {
    transport: Box<dyn Transport>,
    session_id: String,
    state: ChatState,
}

impl Orchestrator {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self::with_session(transport, new_session_id())
    }

    pub fn with_session(transport: Box<dyn Transport>, session_id: String) -> Self {
        Self {
            transport,
            session_id,
            state: ChatState::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn panel(&self) -> &DisplayContextPanel {
        &self.state.panel
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.state.transcript
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Start an exchange. See [`ChatState::begin`].
    pub fn begin(&mut self, message: &str) -> std::result::Result<(), SubmitRejected> {
        self.state.begin(message)?;
        debug!(session_id = %self.session_id, "Exchange started");
        Ok(())
    }

    /// Finish the exchange in flight with the transport outcome.
    ///
    /// A successful reply is rendered and its context merged. A failed call
    /// or a reply flagged as an error is replaced by the simulated reply for
    /// the pending message. Returns `None` when nothing is in flight.
    pub fn complete(&mut self, outcome: Result<ChatReply>) -> Option<Exchange> {
        let message = self.state.pending()?.to_string();

        let outcome = outcome.and_then(|reply| match reply.error_message() {
            Some(error) => Err(PlannerError::Backend(error)),
            None => Ok(reply),
        });

        let completion = match outcome {
            Ok(reply) => Completion {
                source: Source::Backend,
                context: Some(reply.trip_context()),
                text: reply.response,
                intent: None,
            },
            Err(e) => {
                warn!(
                    session_id = %self.session_id,
                    error = %e,
                    recoverable = e.is_recoverable(),
                    "Backend unavailable, using simulated reply"
                );
                let reply = simulator::simulate(&message);
                Completion {
                    source: Source::Simulated,
                    text: reply.text,
                    context: reply.context,
                    intent: Some(reply.intent),
                }
            }
        };

        let exchange = self.state.complete(completion)?;
        info!(
            session_id = %self.session_id,
            source = %exchange.source,
            intent = ?exchange.intent.map(|i| i.to_string()),
            "Exchange complete"
        );
        Some(exchange)
    }

    /// Send a message and wait for the reply
    pub async fn submit(&mut self, message: &str) -> std::result::Result<Exchange, SubmitRejected> {
        self.begin(message)?;
        let outcome = self.transport.post_chat(message, &self.session_id).await;
        self.complete(outcome).ok_or(SubmitRejected::Busy)
    }

    /// Pull the backend's session context into the panel
    pub async fn sync_context(&mut self) -> Result<&DisplayContextPanel> {
        let context: TripContext = self.transport.session_context(&self.session_id).await?;
        Ok(self.state.merge_context(&context))
    }

    /// Reset the backend session (best effort) and the local state
    pub async fn reset(&mut self) {
        if let Err(e) = self.transport.reset_session(&self.session_id).await {
            warn!(session_id = %self.session_id, error = %e, "Backend session reset failed");
        }
        self.state.reset();
        info!(session_id = %self.session_id, "Session reset");
    }
}
