//! Shared data model: documents, routes, plans, query outcomes, answers, jobs.

pub mod answer;
pub mod document;
pub mod job;
pub mod plan;
pub mod query;
pub mod route;

pub use answer::{AnswerEnvelope, AnswerOutcome, FinalAnswer, ProductRevenue};
pub use document::{DocumentChunk, ScoredChunk};
pub use job::{Job, OutputRecord};
pub use plan::{DateRange, Plan};
pub use query::{CellValue, QueryOutcome};
pub use route::{Route, RouteDecision};
