// src/destinations.rs
// Static destination catalog shared by the simulator and the offline destination list

use serde::{Deserialize, Serialize};

/// A destination the planner knows about without asking the backend
#[derive(Debug)]
pub struct Destination {
    pub name: &'static str,
    pub country: &'static str,
    /// Lower-case keywords that select this destination (city, then country synonym)
    pub keywords: &'static [&'static str],
    pub description: &'static str,
    pub best_season: &'static [&'static str],
    pub attractions: &'static [&'static str],
    /// Average daily spend per person in USD
    pub avg_daily_cost: u32,
    pub currency: &'static str,
    pub language: &'static str,
}

/// Catalog order is the classifier's tie-break order among destinations
pub static CATALOG: &[Destination] = &[
    Destination {
        name: "Tokyo",
        country: "Japan",
        keywords: &["tokyo", "japan"],
        description: "A fascinating blend of ultra-modern and traditional, with ancient temples alongside neon-lit skyscrapers.",
        best_season: &["spring", "autumn"],
        attractions: &["Senso-ji Temple", "Shibuya Crossing", "Meiji Shrine", "Tsukiji Outer Market", "Akihabara"],
        avg_daily_cost: 150,
        currency: "JPY",
        language: "Japanese",
    },
    Destination {
        name: "Paris",
        country: "France",
        keywords: &["paris", "france"],
        description: "The City of Light captivates with iconic landmarks, world-class museums and exquisite cuisine.",
        best_season: &["spring", "autumn"],
        attractions: &["Eiffel Tower", "Louvre Museum", "Montmartre", "Seine River Cruise", "Palace of Versailles"],
        avg_daily_cost: 180,
        currency: "EUR",
        language: "French",
    },
    Destination {
        name: "Seoul",
        country: "South Korea",
        keywords: &["seoul", "korea"],
        description: "A dynamic capital blending ancient palaces with K-pop culture, cutting-edge technology and incredible food.",
        best_season: &["spring", "autumn"],
        attractions: &["Gyeongbokgung Palace", "Bukchon Hanok Village", "Myeongdong", "N Seoul Tower", "Hongdae"],
        avg_daily_cost: 100,
        currency: "KRW",
        language: "Korean",
    },
    Destination {
        name: "Bali",
        country: "Indonesia",
        keywords: &["bali", "indonesia"],
        description: "A tropical island of ancient temples, rice terraces, pristine beaches and spiritual retreats.",
        best_season: &["spring", "summer"],
        attractions: &["Uluwatu Temple", "Ubud Rice Terraces", "Tanah Lot", "Sacred Monkey Forest", "Mount Batur"],
        avg_daily_cost: 70,
        currency: "IDR",
        language: "Indonesian, Balinese",
    },
    Destination {
        name: "Barcelona",
        country: "Spain",
        keywords: &["barcelona", "spain"],
        description: "A vibrant coastal city famous for Gaudi architecture, Mediterranean beaches and lively nightlife.",
        best_season: &["spring", "early summer", "autumn"],
        attractions: &["Sagrada Familia", "Park Guell", "Gothic Quarter", "La Rambla", "Barceloneta Beach"],
        avg_daily_cost: 130,
        currency: "EUR",
        language: "Spanish, Catalan",
    },
    Destination {
        name: "Rome",
        country: "Italy",
        keywords: &["rome", "italy"],
        description: "The Eternal City offers unparalleled ancient history, Renaissance art and authentic Italian cuisine.",
        best_season: &["spring", "autumn"],
        attractions: &["Colosseum", "Vatican Museums", "Trevi Fountain", "Pantheon", "Roman Forum"],
        avg_daily_cost: 140,
        currency: "EUR",
        language: "Italian",
    },
];

/// Budget level multipliers applied to the average daily cost
pub const BUDGET_LEVELS: [(&str, f64); 3] = [("Budget", 0.5), ("Moderate", 1.0), ("Luxury", 2.5)];

impl Destination {
    /// Daily cost per person for each budget level, rounded to whole dollars
    pub fn daily_costs(&self) -> Vec<(&'static str, u32)> {
        BUDGET_LEVELS
            .iter()
            .map(|(level, mult)| (*level, (self.avg_daily_cost as f64 * mult).round() as u32))
            .collect()
    }

    pub fn summary(&self) -> DestinationSummary {
        DestinationSummary {
            name: self.name.to_string(),
            country: self.country.to_string(),
            avg_daily_cost: self.avg_daily_cost as f64,
        }
    }
}

/// Destination entry as listed by `GET /api/destinations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationSummary {
    pub name: String,
    pub country: String,
    #[serde(default, alias = "avgDailyCost")]
    pub avg_daily_cost: f64,
}

impl std::fmt::Display for DestinationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {} (~${:.0}/day)", self.name, self.country, self.avg_daily_cost)
    }
}

/// Hardcoded list used when the backend cannot be reached
pub fn fallback_destinations() -> Vec<DestinationSummary> {
    CATALOG.iter().map(Destination::summary).collect()
}
