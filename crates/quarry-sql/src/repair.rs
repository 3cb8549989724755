//! Repair strategies applied to a failing query between attempts.
//!
//! Attempt `n` (1-based) applies strategies `1..=n` of [`RepairStrategy::ORDER`]
//! to the synthesized base query. Attempts past the end reuse the full list.

use std::sync::LazyLock;

use regex::Regex;

/// Quoted identifiers, e.g. `"Order Details"`.
static QUOTED_IDENT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).ok());

/// `alias.OrderDate >=` / `"Orders".OrderDate <=` comparisons not yet wrapped.
static DATE_COMPARISON: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(^|[^(\w])((?:"[^"]+"|\w+)\.OrderDate)\s*(>=|<=)"#).ok()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairStrategy {
    /// Run the synthesized query unchanged.
    Verbatim,
    /// Rewrite quoted entity names missing from the schema to a table with the
    /// same normalized name.
    ResolveTableNames,
    /// Compare `date(col)` so timestamped order dates match whole days.
    NormalizeDateComparisons,
}

impl RepairStrategy {
    pub const ORDER: [RepairStrategy; 3] = [
        Self::Verbatim,
        Self::ResolveTableNames,
        Self::NormalizeDateComparisons,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Verbatim => "verbatim",
            Self::ResolveTableNames => "resolve_table_names",
            Self::NormalizeDateComparisons => "normalize_date_comparisons",
        }
    }

    /// Strategy introduced at the 1-based `attempt`.
    pub fn for_attempt(attempt: u32) -> Self {
        let index = (attempt.max(1) as usize - 1).min(Self::ORDER.len() - 1);
        Self::ORDER[index]
    }

    fn apply(&self, query: &str, tables: &[String]) -> String {
        match self {
            Self::Verbatim => query.to_string(),
            Self::ResolveTableNames => resolve_table_names(query, tables),
            Self::NormalizeDateComparisons => normalize_date_comparisons(query),
        }
    }
}

/// Query to run on the 1-based `attempt`, given the live table names.
pub fn repair_query(base: &str, attempt: u32, tables: &[String]) -> String {
    if base.trim().is_empty() {
        return String::new();
    }
    let last = RepairStrategy::ORDER
        .iter()
        .position(|s| *s == RepairStrategy::for_attempt(attempt))
        .unwrap_or(0);
    RepairStrategy::ORDER[..=last]
        .iter()
        .fold(base.to_string(), |query, strategy| strategy.apply(&query, tables))
}

fn normalized_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn resolve_table_names(query: &str, tables: &[String]) -> String {
    let Some(re) = QUOTED_IDENT.as_ref() else {
        return query.to_string();
    };
    if tables.is_empty() {
        return query.to_string();
    }
    re.replace_all(query, |caps: &regex::Captures<'_>| {
        let name = &caps[1];
        if tables.iter().any(|t| t == name) {
            return caps[0].to_string();
        }
        let wanted = normalized_name(name);
        match tables.iter().find(|t| normalized_name(t) == wanted) {
            Some(table) => format!("\"{table}\""),
            None => caps[0].to_string(),
        }
    })
    .into_owned()
}

fn normalize_date_comparisons(query: &str) -> String {
    let Some(re) = DATE_COMPARISON.as_ref() else {
        return query.to_string();
    };
    re.replace_all(query, "${1}date(${2}) ${3}").into_owned()
}
