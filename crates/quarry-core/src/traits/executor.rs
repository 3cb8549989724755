use crate::types::QueryOutcome;

/// Runs queries against the structured store.
///
/// Implementations never fail: store faults come back as `QueryOutcome::error`.
pub trait QueryExecutor {
    fn execute(&self, query: &str) -> QueryOutcome;

    /// Table and view names visible in the store. Empty when introspection fails.
    fn tables(&self) -> Vec<String> {
        Vec::new()
    }
}
