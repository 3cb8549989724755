//! HybridAgent: per-question orchestration.
//!
//! route -> retrieve -> plan -> (synthesize -> repair -> execute){bounded} -> answer.
//! Every step is recorded on the agent's [`TraceLog`].

use std::sync::Arc;

use regex::Regex;
use serde_json::json;
use tracing::{debug, info};

use quarry_core::config::defaults::{DEFAULT_MAX_ATTEMPTS, DEFAULT_TOP_K};
use quarry_core::config::QuarryConfig;
use quarry_core::constants::{
    CONFIDENCE_ANSWERED, CONFIDENCE_EXHAUSTED, CONFIDENCE_LOW, CONFIDENCE_NONE,
    DEFAULT_POLICY_CATEGORY,
};
use quarry_core::errors::AnswerError;
use quarry_core::events::{TraceKind, TraceLog, TraceSink};
use quarry_core::traits::{DocumentRetriever, QueryExecutor};
use quarry_core::types::{
    AnswerEnvelope, AnswerOutcome, DocumentChunk, FinalAnswer, Plan, Route, ScoredChunk,
};
use quarry_router::Router;
use quarry_sql::{plan, repair_query, QuerySynthesizer, RepairStrategy};

use crate::answer::{citations, AnswerSynthesizer, FormatTag};

pub struct HybridAgent {
    router: Router,
    retriever: Box<dyn DocumentRetriever>,
    executor: Box<dyn QueryExecutor>,
    synthesizer: QuerySynthesizer,
    answers: AnswerSynthesizer,
    trace: TraceLog,
    top_k: usize,
    max_attempts: u32,
}

impl HybridAgent {
    /// Agent with default retrieval depth, attempt budget and cost fraction.
    pub fn new(
        router: Router,
        retriever: Box<dyn DocumentRetriever>,
        executor: Box<dyn QueryExecutor>,
    ) -> Self {
        Self {
            router,
            retriever,
            executor,
            synthesizer: QuerySynthesizer::default(),
            answers: AnswerSynthesizer::new(),
            trace: TraceLog::new(),
            top_k: DEFAULT_TOP_K,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Apply the retrieval, repair and synthesis sections of `config`.
    pub fn with_config(mut self, config: &QuarryConfig) -> Self {
        self.top_k = config.retrieval.effective_top_k();
        self.max_attempts = config.repair.effective_max_attempts();
        self.synthesizer = QuerySynthesizer::new(&config.synthesis);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.trace.register(sink);
        self
    }

    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Answer one question. Never fails: faults become low-confidence envelopes.
    pub fn answer(&mut self, question: &str, format_hint: &str) -> AnswerEnvelope {
        let decision = self.router.predict(question);
        self.trace.record(
            TraceKind::Router,
            json!({ "question": question, "route": decision.route.as_str(), "score": decision.score }),
        );

        let scored = self.retriever.retrieve(question, self.top_k);
        self.trace.record(
            TraceKind::Retriever,
            json!({
                "question": question,
                "chunks": scored.iter().map(|s| s.chunk.id.as_str()).collect::<Vec<_>>(),
                "scores": scored.iter().map(|s| s.score).collect::<Vec<_>>(),
            }),
        );
        let documents: Vec<DocumentChunk> =
            scored.into_iter().map(|ScoredChunk { chunk, .. }| chunk).collect();

        let plan = plan(question);
        self.trace.record(TraceKind::Planner, json!({ "plan": &plan }));

        let envelope = if decision.route.uses_store() {
            self.answer_from_store(question, decision.route, &plan, &documents, format_hint)
        } else {
            self.answer_from_documents(&documents, &plan, format_hint)
        };

        self.trace.record(
            TraceKind::Answer,
            json!({
                "route": decision.route.as_str(),
                "confidence": envelope.confidence,
                "outcome": envelope.outcome,
                "citations": &envelope.citations,
            }),
        );
        info!(
            event = "question_answered",
            route = decision.route.as_str(),
            confidence = envelope.confidence,
            "answered"
        );
        envelope
    }

    /// Policy lookup: `"<Category> unopened: <N> days"` in the first matching document.
    /// The figure only fills scalar shapes; any other tag is a miss.
    fn policy_lookup(
        &self,
        documents: &[DocumentChunk],
        plan: &Plan,
        tag: FormatTag,
    ) -> Option<AnswerEnvelope> {
        let render = |days: i64| match tag {
            FormatTag::Int => Some(FinalAnswer::Int(days)),
            FormatTag::Float => Some(FinalAnswer::Float(days as f64)),
            _ => None,
        };
        let category = plan.primary_category().unwrap_or(DEFAULT_POLICY_CATEGORY);
        let pattern = Regex::new(&format!(r"{} unopened: (\d+) days", regex::escape(category))).ok()?;

        let hit = documents.iter().find_map(|doc| {
            let days = pattern.captures(&doc.content)?.get(1)?.as_str().parse::<i64>().ok()?;
            Some((doc, days))
        });
        if hit.is_none() {
            debug!(category, "policy pattern not found in retrieved documents");
        }

        let (doc, days) = hit?;
        Some(AnswerEnvelope::new(
            render(days)?,
            "",
            CONFIDENCE_ANSWERED,
            &format!("Retrieved from {}", doc.source),
            vec![doc.id.clone()],
            AnswerOutcome::Answered,
        ))
    }

    fn answer_from_documents(
        &self,
        documents: &[DocumentChunk],
        plan: &Plan,
        format_hint: &str,
    ) -> AnswerEnvelope {
        let tag = match FormatTag::parse(format_hint) {
            Ok(tag) => tag,
            Err(e) => return unsupported_format("", &e, doc_ids(documents)),
        };
        self.policy_lookup(documents, plan, tag).unwrap_or_else(|| {
            AnswerEnvelope::new(
                FinalAnswer::empty(),
                "",
                CONFIDENCE_LOW,
                "Document-only fallback: no policy figure found",
                doc_ids(documents),
                AnswerOutcome::Fallback,
            )
        })
    }

    /// The bounded attempt loop. A mixed-route question with no recognized
    /// query shape tries the policy lookup before spending attempts.
    fn answer_from_store(
        &mut self,
        question: &str,
        route: Route,
        plan: &Plan,
        documents: &[DocumentChunk],
        format_hint: &str,
    ) -> AnswerEnvelope {
        let base = self.synthesizer.synthesize(question, plan);
        self.trace.record(
            TraceKind::Synthesizer,
            json!({
                "query": &base,
                "shape": self.synthesizer.matched_shape(question, plan).map(|s| s.name),
            }),
        );

        if base.is_empty() && route == Route::Mixed {
            match FormatTag::parse(format_hint) {
                Ok(tag) => {
                    if let Some(envelope) = self.policy_lookup(documents, plan, tag) {
                        return envelope;
                    }
                }
                Err(e) => return unsupported_format("", &e, doc_ids(documents)),
            }
        }

        let tables = if base.is_empty() {
            Vec::new()
        } else {
            self.executor.tables()
        };

        let mut last_query = String::new();
        for attempt in 1..=self.max_attempts {
            let strategy = RepairStrategy::for_attempt(attempt);
            let query = repair_query(&base, attempt, &tables);
            let outcome = self.executor.execute(&query);
            self.trace.record(
                TraceKind::Executor,
                json!({
                    "attempt": attempt,
                    "strategy": strategy.name(),
                    "query": &query,
                    "error": &outcome.error,
                    "rows": outcome.rows.len(),
                }),
            );

            if outcome.is_usable() {
                return match self.answers.synthesize(
                    &outcome.rows,
                    &outcome.columns,
                    documents,
                    &query,
                    format_hint,
                ) {
                    Ok(envelope) => envelope,
                    Err(e) => unsupported_format(&query, &e, citations(&query, documents)),
                };
            }

            debug!(attempt, error = ?outcome.error, "attempt failed");
            self.trace.record(
                TraceKind::RepairAttempt,
                json!({ "attempt": attempt, "error": &outcome.error }),
            );
            last_query = query;
        }

        AnswerEnvelope::new(
            FinalAnswer::empty(),
            last_query,
            CONFIDENCE_EXHAUSTED,
            &format!("Failed after {} attempt(s)", self.max_attempts),
            doc_ids(documents),
            AnswerOutcome::Fallback,
        )
    }
}

fn doc_ids(documents: &[DocumentChunk]) -> Vec<String> {
    documents.iter().map(|d| d.id.clone()).collect()
}

fn unsupported_format(query: &str, err: &AnswerError, cited: Vec<String>) -> AnswerEnvelope {
    AnswerEnvelope::new(
        FinalAnswer::empty(),
        query,
        CONFIDENCE_NONE,
        &err.to_string(),
        cited,
        AnswerOutcome::UnsupportedFormat,
    )
}
