//! Trip context fragments
//!
//! A [`TripContext`] is a partial view of what the planner knows about the
//! trip. Both the backend (`context` field of a chat reply) and the local
//! simulator produce them; any subset of fields may be present.

use serde::{Deserialize, Serialize};

/// Interests attached to every simulated destination reply
pub const DEFAULT_INTERESTS: [&str; 2] = ["cultural", "food"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripContext {
    #[serde(default)]
    pub destination: Option<String>,

    #[serde(default, alias = "durationDays")]
    pub duration_days: Option<u32>,

    #[serde(default, alias = "budgetLevel")]
    pub budget_level: Option<String>,

    #[serde(default)]
    pub travelers: Option<u32>,

    /// Backend sends `null` for an unset list, so accept that as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub interests: Vec<String>,
}

impl TripContext {
    /// Fragment emitted for a simulated destination match
    pub fn for_destination(name: &str) -> Self {
        Self {
            destination: Some(name.to_string()),
            interests: DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Parse the `context` object of a backend reply.
    ///
    /// Anything that is not an object (or fails to parse) is treated as an
    /// empty fragment rather than an error.
    pub fn from_value(value: &serde_json::Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        match serde_json::from_value(value.clone()) {
            Ok(context) => context,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring malformed context payload");
                Self::default()
            }
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
