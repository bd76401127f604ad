//! Chat state and its transitions
//!
//! [`ChatState`] is the single owner of the transcript and the context panel.
//! It only changes through [`ChatState::begin`], [`ChatState::complete`] and
//! [`ChatState::reset`]; there is no other writer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::context::TripContext;
use crate::panel::{self, DisplayContextPanel};
use crate::render::{escape_text, render};
use crate::simulator::Intent;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    /// One exchange in flight for `message`
    Busy { message: String },
}

impl Phase {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. Never edited after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub html: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: &str) -> Self {
        Self {
            role: Role::User,
            text: text.to_string(),
            html: escape_text(text),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(text: &str) -> Self {
        Self {
            role: Role::Assistant,
            text: text.to_string(),
            html: render(text),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("message is empty")]
    Empty,
    #[error("an exchange is already in flight")]
    Busy,
}

/// Which path produced the assistant reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Backend,
    Simulated,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend => write!(f, "backend"),
            Self::Simulated => write!(f, "simulated"),
        }
    }
}

/// Reply data handed to [`ChatState::complete`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub source: Source,
    pub text: String,
    pub context: Option<TripContext>,
    /// Simulator intent, when the reply was simulated
    pub intent: Option<Intent>,
}

/// Outcome of one finished exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exchange {
    pub message: ChatMessage,
    pub source: Source,
    pub intent: Option<Intent>,
    pub panel: DisplayContextPanel,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatState {
    pub phase: Phase,
    pub transcript: Vec<ChatMessage>,
    pub panel: DisplayContextPanel,
    /// Text of the submission currently being processed
    pub input: String,
    /// Completed exchanges since start or the last reset
    pub updates: u64,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idle -> Busy. Appends the user message.
    ///
    /// Blank input or an exchange already in flight is rejected with no state
    /// change at all.
    pub fn begin(&mut self, message: &str) -> Result<(), SubmitRejected> {
        if message.trim().is_empty() {
            return Err(SubmitRejected::Empty);
        }
        if self.phase.is_busy() {
            return Err(SubmitRejected::Busy);
        }

        self.transcript.push(ChatMessage::user(message));
        self.input = message.to_string();
        self.phase = Phase::Busy {
            message: message.to_string(),
        };
        Ok(())
    }

    /// The message of the exchange in flight, if any
    pub fn pending(&self) -> Option<&str> {
        match &self.phase {
            Phase::Busy { message } => Some(message),
            Phase::Idle => None,
        }
    }

    /// Busy -> Idle. Appends the assistant reply and merges its context.
    ///
    /// Returns `None` when no exchange is in flight.
    pub fn complete(&mut self, completion: Completion) -> Option<Exchange> {
        if !self.phase.is_busy() {
            return None;
        }

        let message = ChatMessage::assistant(&completion.text);
        self.transcript.push(message.clone());

        if let Some(fragment) = &completion.context {
            self.panel = panel::merge(fragment, &self.panel);
        }

        self.input.clear();
        self.phase = Phase::Idle;
        self.updates += 1;

        Some(Exchange {
            message,
            source: completion.source,
            intent: completion.intent,
            panel: self.panel.clone(),
        })
    }

    /// Merge a fragment outside of an exchange
    pub fn merge_context(&mut self, fragment: &TripContext) -> &DisplayContextPanel {
        self.panel = panel::merge(fragment, &self.panel);
        &self.panel
    }

    /// Back to a fresh session: empty transcript, empty panel, idle
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulated(text: &str, context: Option<TripContext>) -> Completion {
        Completion {
            source: Source::Simulated,
            text: text.to_string(),
            context,
            intent: None,
        }
    }

    #[test]
    fn test_begin_rejects_blank_without_change() {
        let mut state = ChatState::new();
        assert_eq!(state.begin(""), Err(SubmitRejected::Empty));
        assert_eq!(state.begin("   \n\t"), Err(SubmitRejected::Empty));
        assert!(state.transcript.is_empty());
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.panel.is_empty());
    }

    #[test]
    fn test_begin_rejects_while_busy() {
        let mut state = ChatState::new();
        state.begin("first").unwrap();
        assert_eq!(state.begin("second"), Err(SubmitRejected::Busy));
        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.pending(), Some("first"));
    }

    #[test]
    fn test_user_message_is_escaped() {
        let mut state = ChatState::new();
        state.begin("<b>hi</b>").unwrap();
        assert_eq!(state.transcript[0].role, Role::User);
        assert_eq!(state.transcript[0].html, "&lt;b&gt;hi&lt;/b&gt;");
    }

    #[test]
    fn test_user_entities_shown_literally() {
        let message = ChatMessage::user("is &lt; the same as <?");
        assert_eq!(message.html, "is &amp;lt; the same as &lt;?");
    }

    #[test]
    fn test_assistant_wrapped_markup_is_escaped() {
        let message =
            ChatMessage::assistant("<div class=\"message-content\"><img src=x onerror=alert(1)>**x**</div>");
        assert!(message.html.contains("&lt;img"));
        assert!(!message.html.contains("<img"));
        assert!(message.html.contains("<strong>x</strong>"));
    }

    #[test]
    fn test_complete_returns_to_idle() {
        let mut state = ChatState::new();
        state.begin("tokyo").unwrap();
        let exchange = state
            .complete(simulated("## Tokyo", Some(TripContext::for_destination("Tokyo"))))
            .unwrap();

        assert_eq!(state.phase, Phase::Idle);
        assert!(state.input.is_empty());
        assert_eq!(state.updates, 1);
        assert_eq!(state.transcript.len(), 2);
        assert!(exchange.message.html.contains("<h2>Tokyo</h2>"));
        assert_eq!(exchange.panel.value("Destination"), Some("Tokyo"));
    }

    #[test]
    fn test_complete_without_fragment_keeps_panel() {
        let mut state = ChatState::new();
        state.begin("tokyo").unwrap();
        state.complete(simulated("a", Some(TripContext::for_destination("Tokyo"))));
        state.begin("weather").unwrap();
        state.complete(simulated("b", None));
        assert_eq!(state.panel.value("Destination"), Some("Tokyo"));
    }

    #[test]
    fn test_complete_when_idle_is_noop() {
        let mut state = ChatState::new();
        assert!(state.complete(simulated("x", None)).is_none());
        assert!(state.transcript.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut state = ChatState::new();
        state.begin("tokyo").unwrap();
        state.complete(simulated("a", Some(TripContext::for_destination("Tokyo"))));
        state.reset();
        assert!(state.transcript.is_empty());
        assert!(state.panel.is_empty());
        assert_eq!(state.updates, 0);
    }
}
