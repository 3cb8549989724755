//! # quarry-sql
//!
//! Structured side of the agent. The planner pulls date windows and categories
//! out of a question, the synthesizer matches it against an ordered table of
//! known question shapes, repair strategies adjust a failing query against the
//! live schema, and the executor runs it on the read-only SQLite store.

pub mod discovery;
pub mod executor;
pub mod planner;
pub mod repair;
pub mod shapes;
pub mod synthesizer;

pub use discovery::locate_database;
pub use executor::SqliteExecutor;
pub use planner::plan;
pub use repair::{repair_query, RepairStrategy};
pub use shapes::{QueryShape, ShapeInput, SHAPES};
pub use synthesizer::{normalize_question, QuerySynthesizer};
