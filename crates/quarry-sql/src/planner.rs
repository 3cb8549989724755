//! Planner: date window and category hints from question text.

use quarry_core::constants::{CATEGORIES, SEASONS};
use quarry_core::types::{DateRange, Plan};

/// Pure function of the question text. Later seasons in `SEASONS` win when
/// several are mentioned.
pub fn plan(question: &str) -> Plan {
    let lower = question.to_lowercase();

    let date_range = SEASONS
        .iter()
        .filter(|(name, _, _)| lower.contains(name))
        .last()
        .map(|(_, start, end)| DateRange::new(*start, *end));

    let categories = CATEGORIES
        .iter()
        .filter(|category| {
            let full = category.to_lowercase();
            let first = full.split_whitespace().next().unwrap_or(&full).to_string();
            lower.contains(&full) || lower.contains(&first)
        })
        .map(|c| c.to_string())
        .collect();

    Plan {
        date_range,
        categories,
    }
}
