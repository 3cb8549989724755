//! End-to-end orchestration against an in-memory Northwind fixture.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use quarry_agent::{AnswerSynthesizer, HybridAgent};
use quarry_core::config::QuarryConfig;
use quarry_core::events::{MemorySink, TraceKind};
use quarry_core::traits::QueryExecutor;
use quarry_core::types::{
    AnswerOutcome, CellValue, DocumentChunk, FinalAnswer, ProductRevenue, QueryOutcome,
};
use quarry_retrieval::{DocumentIndex, TfIdfRetriever};
use quarry_router::Router;
use quarry_sql::SqliteExecutor;
use rusqlite::Connection;

const NORTHWIND: &str = r#"
CREATE TABLE "Categories" (CategoryID INTEGER PRIMARY KEY, CategoryName TEXT);
CREATE TABLE "Products" (ProductID INTEGER PRIMARY KEY, ProductName TEXT, CategoryID INTEGER);
CREATE TABLE "Customers" (CustomerID TEXT PRIMARY KEY, CompanyName TEXT);
CREATE TABLE "Orders" (OrderID INTEGER PRIMARY KEY, CustomerID TEXT, OrderDate TEXT);
CREATE TABLE "Order Details" (OrderID INTEGER, ProductID INTEGER, UnitPrice REAL, Quantity INTEGER, Discount REAL);

INSERT INTO "Categories" VALUES (1, 'Beverages'), (2, 'Condiments'), (8, 'Seafood');
INSERT INTO "Products" VALUES (1, 'Chai', 1), (2, 'Chang', 1), (3, 'Aniseed Syrup', 2), (4, 'Ikura', 8);
INSERT INTO "Customers" VALUES ('ALFKI', 'Alfreds Futterkiste'), ('BONAP', 'Bon app''');
INSERT INTO "Orders" VALUES
    (10001, 'ALFKI', '1997-06-05'),
    (10002, 'BONAP', '1997-06-20'),
    (10003, 'ALFKI', '1997-12-10'),
    (10004, 'BONAP', '1996-06-10');
INSERT INTO "Order Details" VALUES
    (10001, 1, 18.0, 10, 0.0),
    (10001, 3, 10.0, 5, 0.0),
    (10002, 2, 19.0, 20, 0.0),
    (10002, 4, 31.0, 4, 0.0),
    (10003, 1, 18.0, 2, 0.0),
    (10003, 4, 31.0, 10, 0.0),
    (10004, 3, 10.0, 30, 0.0);
"#;

const LIST_TAG: &str = "list[{product:str, revenue:float}]";

fn corpus() -> Vec<DocumentChunk> {
    vec![
        DocumentChunk::whole(
            "catalog",
            "Catalog of product categories: Beverages, Condiments, Confections, Seafood.",
        ),
        DocumentChunk::whole(
            "kpi_definitions",
            "Average Order Value is revenue divided by distinct orders. Gross margin uses cost.",
        ),
        DocumentChunk::whole(
            "marketing_calendar",
            "Summer Beverages 1997 runs in June. Winter Classics 1997 runs in December.",
        ),
        DocumentChunk::whole(
            "product_policy",
            "Return policy. Beverages unopened: 30 days. Perishables (Produce, Seafood): 3-7 days.",
        ),
    ]
}

fn retriever() -> Box<TfIdfRetriever> {
    Box::new(TfIdfRetriever::new(DocumentIndex::build(corpus())))
}

fn fixture_agent() -> HybridAgent {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(NORTHWIND).unwrap();
    HybridAgent::new(
        Router::new(),
        retriever(),
        Box::new(SqliteExecutor::from_connection(conn)),
    )
}

/// Returns the same outcome for every query and counts calls.
struct ScriptedExecutor {
    calls: Arc<AtomicUsize>,
    outcome: QueryOutcome,
}

impl QueryExecutor for ScriptedExecutor {
    fn execute(&self, _query: &str) -> QueryOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

fn scripted_agent(outcome: QueryOutcome) -> (HybridAgent, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let executor = ScriptedExecutor {
        calls: Arc::clone(&calls),
        outcome,
    };
    (
        HybridAgent::new(Router::new(), retriever(), Box::new(executor)),
        calls,
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Document answers
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn policy_days_from_documents() {
    let mut agent = fixture_agent();
    let env = agent.answer("unopened Beverages returns how many days", "int");
    assert_eq!(env.final_answer, FinalAnswer::Int(30));
    assert_eq!(env.confidence, 0.9);
    assert_eq!(env.citations, vec!["product_policy::chunk0"]);
    assert_eq!(env.query, "");
    assert_eq!(env.outcome, AnswerOutcome::Answered);
}

#[test]
fn policy_route_with_explicit_phrase() {
    let mut agent = fixture_agent();
    let env = agent.answer("According to the product policy, unopened Beverages return days?", "int");
    assert_eq!(env.final_answer, FinalAnswer::Int(30));
    assert_eq!(env.citations, vec!["product_policy::chunk0"]);
}

#[test]
fn policy_miss_falls_back_with_all_retrieved_documents() {
    let mut agent = fixture_agent();
    let env = agent.answer("What is the return policy for unopened Dairy Products?", "int");
    assert!(env.final_answer.is_empty_text());
    assert_eq!(env.confidence, 0.2);
    assert_eq!(env.outcome, AnswerOutcome::Fallback);
    assert!(env.citations.contains(&"product_policy::chunk0".to_string()));
    assert!(env.citations.iter().all(|c| c.ends_with("::chunk0")));
}

#[test]
fn policy_answer_follows_the_format_tag() {
    let mut agent = fixture_agent();
    let env = agent.answer("What is the return policy for unopened Beverages?", "float");
    assert_eq!(env.final_answer, FinalAnswer::Float(30.0));
    assert_eq!(env.confidence, 0.9);

    let env = agent.answer("What is the return policy for unopened Beverages?", LIST_TAG);
    assert_eq!(env.outcome, AnswerOutcome::Fallback);
    assert_eq!(env.confidence, 0.2);
}

#[test]
fn policy_question_with_unknown_tag_is_unsupported() {
    let mut agent = fixture_agent();
    for question in [
        "What is the return policy for unopened Beverages?",
        "unopened Beverages returns how many days",
    ] {
        let env = agent.answer(question, "yaml");
        assert!(env.final_answer.is_empty_text());
        assert_eq!(env.confidence, 0.0);
        assert_eq!(env.outcome, AnswerOutcome::UnsupportedFormat);
        assert_eq!(env.query, "");
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Structured answers
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn top_three_products_list() {
    let mut agent = fixture_agent();
    let env = agent.answer("Top 3 products by revenue", LIST_TAG);
    assert!(env.query.contains("LIMIT 3"));
    assert!(env.query.contains("GROUP BY p.ProductID"));
    assert_eq!(env.confidence, 0.9);
    assert_eq!(
        env.final_answer,
        FinalAnswer::ProductRevenues(vec![
            ProductRevenue { product: "Ikura".into(), revenue: 434.0 },
            ProductRevenue { product: "Chang".into(), revenue: 380.0 },
            ProductRevenue { product: "Aniseed Syrup".into(), revenue: 350.0 },
        ])
    );
    assert_eq!(&env.citations[..2], &["Order Details", "Products"]);
    assert!(env.citations[2..].iter().all(|c| c.ends_with("::chunk0")));
}

#[test]
fn category_leader_object() {
    let mut agent = fixture_agent();
    let env = agent.answer(
        "Which category had the highest total quantity sold in summer 1997?",
        "{category:str, quantity:int}",
    );
    assert_eq!(
        env.final_answer,
        FinalAnswer::CategoryQuantity { category: "Beverages".into(), quantity: 30 }
    );
    assert_eq!(&env.citations[..4], &["Orders", "Order Details", "Products", "Categories"]);
}

#[test]
fn customer_margin_object() {
    let mut agent = fixture_agent();
    let env = agent.answer(
        "Who was the best customer by gross margin in 1997?",
        "{customer:str, margin:float}",
    );
    assert_eq!(
        env.final_answer,
        FinalAnswer::CustomerMargin { customer: "Alfreds Futterkiste".into(), margin: 172.8 }
    );
}

#[test]
fn average_order_value_float() {
    let mut agent = fixture_agent();
    let env = agent.answer("Average Order Value during Winter Classics 1997", "float");
    assert_eq!(env.final_answer, FinalAnswer::Float(346.0));
    assert_eq!(env.confidence, 0.9);
}

#[test]
fn unsupported_format_is_distinguishable() {
    let mut agent = fixture_agent();
    let env = agent.answer("Top 3 products by revenue", "yaml");
    assert!(env.final_answer.is_empty_text());
    assert_eq!(env.confidence, 0.0);
    assert_eq!(env.outcome, AnswerOutcome::UnsupportedFormat);
    assert!(env.query.contains("LIMIT 3"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Repair loop
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn failing_store_gets_exactly_three_attempts() {
    let (mut agent, calls) = scripted_agent(QueryOutcome::failure("no such table"));
    let env = agent.answer("Top 3 products by revenue", LIST_TAG);

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(env.confidence, 0.1);
    assert!(env.final_answer.is_empty_text());
    assert!(env.query.contains("LIMIT 3"));
    assert_eq!(env.outcome, AnswerOutcome::Fallback);
    assert!(env.citations.iter().all(|c| c.ends_with("::chunk0")));
    assert_eq!(agent.trace().of_kind(TraceKind::RepairAttempt).count(), 3);
}

#[test]
fn zero_rows_count_as_failure() {
    let (mut agent, calls) = scripted_agent(QueryOutcome::success(vec!["x".into()], vec![]));
    let env = agent.answer("Top 3 products by revenue", LIST_TAG);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(env.confidence, 0.1);
}

#[test]
fn attempt_budget_follows_config() {
    let config = QuarryConfig::from_toml("[repair]\nmax_attempts = 5\n").unwrap();
    let (agent, calls) = scripted_agent(QueryOutcome::failure("boom"));
    let mut agent = agent.with_config(&config);
    agent.answer("Top 3 products by revenue", LIST_TAG);
    assert_eq!(calls.load(Ordering::SeqCst), 5);
}

#[test]
fn unrecognized_mixed_question_exhausts_with_empty_query() {
    let (mut agent, calls) = scripted_agent(QueryOutcome::no_query());
    let env = agent.answer("Tell me about the weather", "int");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(env.query, "");
    assert_eq!(env.confidence, 0.1);
}

#[test]
fn success_on_first_attempt_stops_the_loop() {
    let rows = vec![vec![CellValue::Integer(42)]];
    let (mut agent, calls) = scripted_agent(QueryOutcome::success(vec!["n".into()], rows));
    let env = agent.answer("Top 3 products by revenue", "int");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(env.final_answer, FinalAnswer::Int(42));
    assert_eq!(env.confidence, 0.9);
}

// ═══════════════════════════════════════════════════════════════════════════
// Trace
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn trace_records_every_step_in_order() {
    let sink = Arc::new(MemorySink::new());
    let mut agent = fixture_agent().with_sink(sink.clone());
    agent.answer("Top 3 products by revenue", LIST_TAG);

    let kinds: Vec<TraceKind> = sink.events().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TraceKind::Router,
            TraceKind::Retriever,
            TraceKind::Planner,
            TraceKind::Synthesizer,
            TraceKind::Executor,
            TraceKind::Answer,
        ]
    );
    assert_eq!(agent.trace().len(), 6);

    let router = &sink.events()[0];
    assert_eq!(router.data["route"], "mixed");
    assert_eq!(router.data["score"], 0.9);
}

#[test]
fn trace_accumulates_across_questions() {
    let mut agent = fixture_agent();
    agent.answer("unopened Beverages returns how many days", "int");
    let first = agent.trace().len();
    agent.answer("unopened Beverages returns how many days", "int");
    assert_eq!(agent.trace().len(), first * 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// Answer synthesizer
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn int_coercion_with_and_without_rows() {
    let synth = AnswerSynthesizer::new();
    let cols = vec!["n".to_string()];

    let env = synth
        .synthesize(&[vec![CellValue::Integer(42)]], &cols, &[], "SELECT 42", "int")
        .unwrap();
    assert_eq!(env.final_answer, FinalAnswer::Int(42));
    assert_eq!(env.confidence, 0.9);

    let env = synth.synthesize(&[], &cols, &[], "SELECT 42", "int").unwrap();
    assert_eq!(env.final_answer, FinalAnswer::Int(0));
    assert_eq!(env.confidence, 0.2);
    assert_eq!(env.outcome, AnswerOutcome::LowConfidence);
}

#[test]
fn uncoercible_cells_give_zero_shape() {
    let synth = AnswerSynthesizer::new();
    let env = synth
        .synthesize(&[vec![CellValue::Null]], &[], &[], "", "float")
        .unwrap();
    assert_eq!(env.final_answer, FinalAnswer::Float(0.0));
    assert_eq!(env.confidence, 0.2);
}

#[test]
fn list_uses_all_rows_and_rounds() {
    let synth = AnswerSynthesizer::new();
    let rows = vec![
        vec![CellValue::Text("A".into()), CellValue::Real(1.234)],
        vec![CellValue::Text("B".into()), CellValue::Real(5.678)],
    ];
    let env = synth.synthesize(&rows, &[], &[], "", LIST_TAG).unwrap();
    assert_eq!(
        env.final_answer,
        FinalAnswer::ProductRevenues(vec![
            ProductRevenue { product: "A".into(), revenue: 1.23 },
            ProductRevenue { product: "B".into(), revenue: 5.68 },
        ])
    );

    let empty = synth.synthesize(&[], &[], &[], "", LIST_TAG).unwrap();
    assert_eq!(empty.final_answer, FinalAnswer::ProductRevenues(vec![]));
    assert_eq!(empty.confidence, 0.2);
}

#[test]
fn unknown_tag_is_an_error_even_with_rows() {
    let synth = AnswerSynthesizer::new();
    let result = synth.synthesize(&[vec![CellValue::Integer(1)]], &[], &[], "", "xml");
    assert!(result.is_err());
}

#[test]
fn output_record_serializes_typed_answers() {
    let mut agent = fixture_agent();
    let env = agent.answer("Top 3 products by revenue", LIST_TAG);
    let record = quarry_core::types::OutputRecord::from_envelope("q1", env);
    let json: serde_json::Value = serde_json::to_value(&record).unwrap();
    assert_eq!(json["final_answer"][0]["product"], "Ikura");
    assert_eq!(json["final_answer"][0]["revenue"], 434.0);
    assert!(json.get("outcome").is_none());
}
