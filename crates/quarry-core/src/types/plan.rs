use serde::{Deserialize, Serialize};

/// Inclusive ISO-8601 date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Coarse hints extracted from the question text. Advisory only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub date_range: Option<DateRange>,
    /// Catalog categories mentioned in the question, in catalog order.
    pub categories: Vec<String>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.date_range.is_none() && self.categories.is_empty()
    }

    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }
}
