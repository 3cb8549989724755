//! Domain constants for the fixed Northwind dataset.
//!
//! The query templates, planner and citation scanner all read from here so the
//! business assumptions live in one place.

/// Hard ceiling on synthesize/execute attempts per question.
pub const MAX_REPAIR_ATTEMPTS: u32 = 5;

/// Fraction of the unit price assumed to be cost when computing gross margin.
pub const COST_FRACTION: f64 = 0.7;

/// The single year the dataset's analytic questions are asked about.
pub const DATASET_YEAR: u32 = 1997;

/// Named marketing windows: (name, start date, end date). Inclusive bounds.
pub const SEASONS: [(&str, &str, &str); 2] = [
    ("summer", "1997-06-01", "1997-06-30"),
    ("winter", "1997-12-01", "1997-12-31"),
];

/// Product categories known to the planner, in catalog order.
pub const CATEGORIES: [&str; 6] = [
    "Beverages",
    "Condiments",
    "Confections",
    "Dairy Products",
    "Produce",
    "Seafood",
];

/// Category used by the policy lookup when the question names none.
pub const DEFAULT_POLICY_CATEGORY: &str = "Beverages";

/// Structured-store entities that can be cited when a query references them.
pub const STORE_ENTITIES: [&str; 5] = [
    "Orders",
    "Order Details",
    "Products",
    "Customers",
    "Categories",
];

/// Confidence for an answer coerced from real rows or a matched document.
pub const CONFIDENCE_ANSWERED: f64 = 0.9;

/// Confidence for an empty-shaped answer or a document-route miss.
pub const CONFIDENCE_LOW: f64 = 0.2;

/// Confidence after the repair budget is exhausted.
pub const CONFIDENCE_EXHAUSTED: f64 = 0.1;

/// Confidence when the requested answer shape is unknown.
pub const CONFIDENCE_NONE: f64 = 0.0;

/// Fixed score reported by the keyword baseline router.
pub const BASELINE_ROUTE_SCORE: f64 = 0.9;

/// Minimum number of labeled examples before the router will train.
pub const MIN_TRAINING_EXAMPLES: usize = 3;

/// Maximum explanation length, in characters.
pub const MAX_EXPLANATION_CHARS: usize = 200;

/// Error string reported when there is no query to execute.
pub const NO_QUERY_ERROR: &str = "no-sql";
