//! Offline response simulator
//!
//! Picks a canned reply for a user message when the planning backend is not
//! reachable. Classification is an ordered rule table, first match wins:
//! - destinations (city name or country), in catalog order
//! - accommodation, budget, itinerary, activities, weather, recommendations
//! - anything else gets the capabilities overview
//!
//! Because several rules can match the same message, order is the tie-break:
//! "tokyo budget" is a Tokyo question, not a budget question.

mod templates;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::context::TripContext;
use crate::destinations::CATALOG;

/// Response category selected for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Intent {
    Destination(&'static str),
    Accommodation,
    Budget,
    Itinerary,
    Activities,
    Weather,
    Recommendation,
    Capabilities,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Destination(_) => "destination",
            Self::Accommodation => "accommodation",
            Self::Budget => "budget",
            Self::Itinerary => "itinerary",
            Self::Activities => "activities",
            Self::Weather => "weather",
            Self::Recommendation => "recommendation",
            Self::Capabilities => "capabilities",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Destination(name) => write!(f, "destination:{}", name),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Canned reply plus the context fragment it implies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTemplate {
    pub text: String,
    pub context: Option<TripContext>,
}

impl ResponseTemplate {
    fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: None,
        }
    }
}

/// One entry of the ordered classification table
#[derive(Debug)]
pub struct Rule {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
    pub template: ResponseTemplate,
}

impl Rule {
    fn matches(&self, lower: &str) -> bool {
        contains_any(lower, self.keywords)
    }
}

/// Result of simulating one exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedReply {
    pub intent: Intent,
    pub text: String,
    pub context: Option<TripContext>,
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(build_rules);

static CAPABILITIES: Lazy<ResponseTemplate> =
    Lazy::new(|| ResponseTemplate::text_only(templates::CAPABILITIES));

fn build_rules() -> Vec<Rule> {
    let mut rules: Vec<Rule> = CATALOG
        .iter()
        .map(|dest| Rule {
            intent: Intent::Destination(dest.name),
            keywords: dest.keywords,
            template: ResponseTemplate {
                text: templates::destination(dest),
                context: Some(TripContext::for_destination(dest.name)),
            },
        })
        .collect();

    let topical: [(Intent, &'static [&'static str], String); 6] = [
        (
            Intent::Accommodation,
            &["hotel", "stay", "accommodation"],
            templates::ACCOMMODATION.to_string(),
        ),
        (Intent::Budget, &["budget", "cost"], templates::BUDGET.to_string()),
        (Intent::Itinerary, &["itinerary", "plan"], templates::ITINERARY.to_string()),
        (Intent::Activities, &["activity", "attraction"], templates::ACTIVITIES.to_string()),
        (Intent::Weather, &["weather"], templates::WEATHER.to_string()),
        (
            Intent::Recommendation,
            &["recommend", "suggest", "where"],
            templates::recommendations(),
        ),
    ];

    rules.extend(topical.into_iter().map(|(intent, keywords, text)| Rule {
        intent,
        keywords,
        template: ResponseTemplate::text_only(text),
    }));

    rules
}

/// The classification table in evaluation order
pub fn rules() -> &'static [Rule] {
    &RULES
}

fn select(message: &str) -> (Intent, &'static ResponseTemplate) {
    let lower = message.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&lower))
        .map(|rule| (rule.intent, &rule.template))
        .unwrap_or((Intent::Capabilities, &*CAPABILITIES))
}

/// Classify a message without building the reply
pub fn classify(message: &str) -> Intent {
    select(message).0
}

/// Produce the offline reply for a message. Pure and total.
pub fn simulate(message: &str) -> SimulatedReply {
    let (intent, template) = select(message);
    SimulatedReply {
        intent,
        text: template.text.clone(),
        context: template.context.clone(),
    }
}

fn contains_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;

    #[test]
    fn test_destination_any_case() {
        for message in ["I want to visit Tokyo", "TOKYO!", "thinking about japan"] {
            let reply = simulate(message);
            assert_eq!(reply.intent, Intent::Destination("Tokyo"));
            let context = reply.context.expect("destination fragment");
            assert_eq!(context.destination.as_deref(), Some("Tokyo"));
            assert_eq!(context.interests, vec!["cultural", "food"]);
        }
    }

    #[test]
    fn test_country_synonyms() {
        assert_eq!(classify("a week in France"), Intent::Destination("Paris"));
        assert_eq!(classify("korea trip"), Intent::Destination("Seoul"));
        assert_eq!(classify("Indonesia beaches"), Intent::Destination("Bali"));
        assert_eq!(classify("spain in may"), Intent::Destination("Barcelona"));
        assert_eq!(classify("ITALY"), Intent::Destination("Rome"));
    }

    #[test]
    fn test_destination_beats_topic() {
        assert_eq!(classify("tokyo budget"), Intent::Destination("Tokyo"));
        assert_eq!(classify("hotel in paris"), Intent::Destination("Paris"));
        assert_eq!(classify("weather in rome"), Intent::Destination("Rome"));
    }

    #[test]
    fn test_catalog_order_breaks_destination_ties() {
        assert_eq!(classify("paris or tokyo?"), Intent::Destination("Tokyo"));
    }

    #[test]
    fn test_topical_order() {
        assert_eq!(classify("cheap hotel"), Intent::Accommodation);
        assert_eq!(classify("where to stay"), Intent::Accommodation);
        assert_eq!(classify("what will it cost"), Intent::Budget);
        assert_eq!(classify("budget for my itinerary"), Intent::Budget);
        assert_eq!(classify("help me plan"), Intent::Itinerary);
        assert_eq!(classify("any attractions nearby"), Intent::Activities);
        assert_eq!(classify("weather next week"), Intent::Weather);
        assert_eq!(classify("suggest somewhere warm"), Intent::Recommendation);
        assert_eq!(classify("where should I go"), Intent::Recommendation);
    }

    #[test]
    fn test_default_capabilities() {
        let reply = simulate("hello there");
        assert_eq!(reply.intent, Intent::Capabilities);
        assert!(reply.context.is_none());
        assert_eq!(simulate("").intent, Intent::Capabilities);
    }

    #[test]
    fn test_topical_replies_have_no_context() {
        assert!(simulate("budget").context.is_none());
        assert!(simulate("weather").context.is_none());
    }

    #[test]
    fn test_simulate_is_pure() {
        assert_eq!(simulate("Tokyo budget"), simulate("Tokyo budget"));
        assert_eq!(simulate("hmm"), simulate("hmm"));
    }

    #[test]
    fn test_rule_table_order() {
        let intents: Vec<Intent> = rules().iter().map(|r| r.intent).collect();
        assert_eq!(intents.len(), CATALOG.len() + 6);
        assert_eq!(intents[0], Intent::Destination("Tokyo"));
        assert_eq!(&intents[CATALOG.len()..], &[
            Intent::Accommodation,
            Intent::Budget,
            Intent::Itinerary,
            Intent::Activities,
            Intent::Weather,
            Intent::Recommendation,
        ]);
    }

    #[test]
    fn test_destination_reply_renders_heading() {
        let html = render(&simulate("I want to visit Tokyo").text);
        assert!(html.contains("<h2>Tokyo, Japan</h2>"));
        assert_eq!(html.matches("<table>").count(), 1);
    }

    #[test]
    fn test_intent_display() {
        assert_eq!(Intent::Destination("Bali").to_string(), "destination:Bali");
        assert_eq!(Intent::Weather.to_string(), "weather");
    }
}
