//! Configuration system for Quarry.
//! Layered TOML configuration with `Option` fields and `effective_*` accessors.

pub mod defaults;
pub mod quarry_config;
pub mod repair_config;
pub mod retrieval_config;
pub mod router_config;
pub mod storage_config;
pub mod synthesis_config;

pub use quarry_config::{CliOverrides, QuarryConfig};
pub use repair_config::RepairConfig;
pub use retrieval_config::RetrievalConfig;
pub use router_config::RouterConfig;
pub use storage_config::StorageConfig;
pub use synthesis_config::SynthesisConfig;
