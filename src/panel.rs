//! Trip context panel
//!
//! Materializes [`TripContext`] fragments as label/value rows for display.
//! The panel is sticky: an update that yields no rows keeps whatever was
//! shown before instead of reverting to the empty state.

use serde::Serialize;

use crate::context::TripContext;

/// Text shown while nothing is known about the trip
pub const EMPTY_MESSAGE: &str = "Start chatting to plan your trip!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelRow {
    pub label: &'static str,
    pub value: String,
}

impl std::fmt::Display for PanelRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "rows", rename_all = "snake_case")]
pub enum DisplayContextPanel {
    #[default]
    Empty,
    Rows(Vec<PanelRow>),
}

impl DisplayContextPanel {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn rows(&self) -> &[PanelRow] {
        match self {
            Self::Empty => &[],
            Self::Rows(rows) => rows,
        }
    }

    /// Look up a row value by label
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows()
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }
}

/// Rows for every populated field, in display order:
/// destination, duration, budget, travelers, interests.
pub fn rows_for(fragment: &TripContext) -> Vec<PanelRow> {
    let mut rows = Vec::new();

    if let Some(destination) = non_blank(&fragment.destination) {
        rows.push(PanelRow {
            label: "Destination",
            value: destination.to_string(),
        });
    }
    if let Some(days) = fragment.duration_days.filter(|d| *d > 0) {
        rows.push(PanelRow {
            label: "Duration",
            value: format!("{} days", days),
        });
    }
    if let Some(budget) = non_blank(&fragment.budget_level) {
        rows.push(PanelRow {
            label: "Budget",
            value: budget.to_string(),
        });
    }
    if let Some(travelers) = fragment.travelers.filter(|t| *t > 0) {
        rows.push(PanelRow {
            label: "Travelers",
            value: travelers.to_string(),
        });
    }
    if !fragment.interests.is_empty() {
        rows.push(PanelRow {
            label: "Interests",
            value: fragment.interests.join(", "),
        });
    }

    rows
}

/// Merge a fragment into the panel.
///
/// A fragment with rows replaces the panel. A fragment without rows keeps the
/// previous panel, so the empty sentinel only ever shows before the first
/// populated update.
pub fn merge(fragment: &TripContext, previous: &DisplayContextPanel) -> DisplayContextPanel {
    let rows = rows_for(fragment);
    if rows.is_empty() {
        return previous.clone();
    }
    DisplayContextPanel::Rows(rows)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
