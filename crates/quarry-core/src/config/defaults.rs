// Single source of truth for default config values.

// --- Storage ---
pub const DEFAULT_DB_CANDIDATES: [&str; 3] = [
    "data/northwind.sqlite",
    "data/northwind.db",
    "data/northwind.sqlite/northwind.db",
];

// --- Retrieval ---
pub const DEFAULT_DOCS_DIR: &str = "docs";
pub const DEFAULT_TOP_K: usize = 3;

// --- Repair ---
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

// --- Project config ---
pub const PROJECT_CONFIG_FILENAME: &str = "quarry.toml";

// --- Observability ---
pub const LOG_ENV_VAR: &str = "QUARRY_LOG";
pub const DEFAULT_LOG_FILTER: &str = "quarry=info";
