//! Property tests: answer shape follows the tag, citations stay referenced.

use proptest::prelude::*;

use quarry_agent::{citations, AnswerSynthesizer, FormatTag};
use quarry_core::constants::STORE_ENTITIES;
use quarry_core::types::{CellValue, DocumentChunk, FinalAnswer};

fn int_rows() -> impl Strategy<Value = Vec<Vec<CellValue>>> {
    prop::collection::vec(
        prop::collection::vec(any::<i32>().prop_map(|v| CellValue::Integer(v as i64)), 1..3),
        0..4,
    )
}

proptest! {
    #[test]
    fn prop_int_tag_yields_int(rows in int_rows()) {
        let env = AnswerSynthesizer::new()
            .synthesize(&rows, &[], &[], "", "int")
            .unwrap();
        prop_assert!(matches!(env.final_answer, FinalAnswer::Int(_)));
        let expected = if rows.is_empty() { 0.2 } else { 0.9 };
        prop_assert_eq!(env.confidence, expected);
    }

    #[test]
    fn prop_unknown_tags_rejected(tag in "[a-z]{1,8}") {
        prop_assume!(!["int", "float"].contains(&tag.as_str()) && !tag.starts_with("list"));
        prop_assert!(FormatTag::parse(&tag).is_err());
        let rows = vec![vec![CellValue::Integer(1)]];
        prop_assert!(AnswerSynthesizer::new().synthesize(&rows, &[], &[], "", &tag).is_err());
    }

    #[test]
    fn prop_citations_only_referenced(
        query in "[A-Za-z \"]{0,60}",
        ids in prop::collection::vec("[a-z]{1,6}", 0..4),
    ) {
        let docs: Vec<DocumentChunk> = ids.iter().map(|s| DocumentChunk::whole(s.clone(), "")).collect();
        let cited = citations(&query, &docs);
        let entity_count = cited.len() - docs.len();
        for entity in &cited[..entity_count] {
            prop_assert!(STORE_ENTITIES.contains(&entity.as_str()));
            prop_assert!(query.to_lowercase().contains(&entity.to_lowercase()));
        }
        let doc_ids: Vec<String> = docs.iter().map(|d| d.id.clone()).collect();
        prop_assert_eq!(&cited[entity_count..], doc_ids.as_slice());
    }

    #[test]
    fn prop_explanation_bounded(rows in int_rows(), columns in prop::collection::vec("[a-z]{0,80}", 0..8)) {
        let env = AnswerSynthesizer::new()
            .synthesize(&rows, &columns, &[], "", "int")
            .unwrap();
        prop_assert!(env.explanation.chars().count() <= 200);
    }
}
