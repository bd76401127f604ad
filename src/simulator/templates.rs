//! Canned reply bodies, written in the chat dialect

use crate::destinations::{CATALOG, Destination};

pub const ACCOMMODATION: &str = "\
## Where to Stay

Here's how accommodation usually breaks down:

- **Hostels:** $25-45 per night, social and central
- **Mid-range hotels:** $100-200 per night, the best value for most trips
- **Apartments:** $150-250 per night, more space and your own kitchen
- **Luxury hotels:** $350+ per night, with spa, pool and concierge

**Tip:** stay close to a main transit line so every neighborhood is one ride away.

Which city are you staying in? I can narrow this down.";

pub const BUDGET: &str = "\
## Budget Planning

A typical daily budget splits like this:

| Category | Share |
| Accommodation | 40% |
| Food and dining | 25% |
| Activities and tours | 20% |
| Local transport | 10% |
| Miscellaneous | 5% |

### Money-saving tips
- Eat at local restaurants and street food stalls
- Use public transportation
- Book popular attractions in advance
- Travel during shoulder season

Tell me your destination and trip length for a full estimate.";

pub const ITINERARY: &str = "\
## Let's Plan Your Itinerary

To build a day-by-day plan I need a few details:

- **Destination:** where are you headed?
- **Duration:** how many days do you have?
- **Budget:** budget, moderate or luxury?
- **Travelers:** how many people are going?

### A sample day
| Time | Plan |
| Morning | Headline landmark before the crowds |
| Afternoon | Museum or neighborhood walk |
| Evening | Local food tour |

*Share the details and I'll fill in every day.*";

pub const ACTIVITIES: &str = "\
## Things to Do

Popular activity types:

- **Cultural:** temples, museums and historic quarters
- **Food:** market tours and cooking classes
- **Adventure:** hiking, diving and day trips
- **Relaxation:** spas, beaches and gardens

Which destination should I find activities for?";

pub const WEATHER: &str = "\
## Weather and Packing

The season makes a big difference:

- **Spring:** layers, a light jacket and an umbrella
- **Summer:** light, breathable clothing and sunscreen
- **Autumn:** layers and a rain jacket
- **Winter:** a warm coat, gloves and waterproof boots

Which destination and dates should I check?";

pub const CAPABILITIES: &str = "\
## Hi! I'm your travel planning assistant

I can help you:

- **Find destinations** that match your interests
- **Compare accommodation** for your budget
- **Discover activities** and must-see attractions
- **Create itineraries** day by day
- **Estimate budgets** with money-saving tips

Where would you like to go? Try *\"I want to visit Tokyo\"*.";

/// Reply for a destination match
pub fn destination(dest: &Destination) -> String {
    let seasons: Vec<String> = dest.best_season.iter().map(|s| capitalize(s)).collect();

    let mut text = format!("## {}, {}\n\n{}\n\n", dest.name, dest.country, dest.description);
    text.push_str(&format!("**Best time to visit:** {}\n", seasons.join(", ")));
    text.push_str(&format!("**Language:** {}\n", dest.language));
    text.push_str(&format!("**Currency:** {}\n\n", dest.currency));

    text.push_str("### Top attractions\n");
    for attraction in dest.attractions {
        text.push_str(&format!("- {}\n", attraction));
    }

    text.push_str("\n### Daily budget per person\n");
    let costs = dest.daily_costs();
    let header: Vec<&str> = costs.iter().map(|(level, _)| *level).collect();
    let amounts: Vec<String> = costs.iter().map(|(_, cost)| format!("${}", cost)).collect();
    text.push_str(&format!("| {} |\n", header.join(" | ")));
    text.push_str(&format!("| {} |\n\n", amounts.join(" | ")));

    text.push_str(&format!(
        "*Tell me how many days you have in {} and I'll sketch an itinerary.*",
        dest.name
    ));
    text
}

/// Reply listing every catalog destination
pub fn recommendations() -> String {
    let mut text = String::from("## Destination Ideas\n\nHere are some great places to consider:\n\n");
    for dest in CATALOG {
        text.push_str(&format!(
            "- **{}, {}:** best in {} (about ${}/day)\n",
            dest.name,
            dest.country,
            dest.best_season.join(" and "),
            dest.avg_daily_cost
        ));
    }
    text.push_str("\nTell me what you enjoy and I'll narrow it down!");
    text
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
