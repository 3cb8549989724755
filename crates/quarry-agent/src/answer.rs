//! Answer synthesizer: rows and documents into a typed, cited envelope.
//!
//! The caller's format tag alone decides the answer shape. Rows that are
//! present but cannot be coerced into that shape are treated like no rows.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use quarry_core::constants::{CONFIDENCE_ANSWERED, CONFIDENCE_LOW, STORE_ENTITIES};
use quarry_core::errors::AnswerError;
use quarry_core::types::{
    AnswerEnvelope, AnswerOutcome, CellValue, DocumentChunk, FinalAnswer, ProductRevenue,
};

/// Whole-word, case-insensitive matchers for each store entity, in catalog order.
static ENTITY_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    STORE_ENTITIES
        .iter()
        .filter_map(|entity| {
            Regex::new(&format!(r"(?i)\b{}\b", regex::escape(entity)))
                .ok()
                .map(|re| (*entity, re))
        })
        .collect()
});

/// Answer shapes a caller may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    /// `int`
    Int,
    /// `float`, rounded to 2 decimals.
    Float,
    /// `{category:str, quantity:int}`
    CategoryQuantity,
    /// `list[{product:str, revenue:float}]`
    ProductRevenueList,
    /// `{customer:str, margin:float}`
    CustomerMargin,
}

impl FormatTag {
    pub fn parse(tag: &str) -> Result<Self, AnswerError> {
        let tag = tag.trim();
        if tag == "int" {
            Ok(Self::Int)
        } else if tag.starts_with('{') && tag.contains("category") {
            Ok(Self::CategoryQuantity)
        } else if tag == "float" {
            Ok(Self::Float)
        } else if tag.starts_with("list") {
            Ok(Self::ProductRevenueList)
        } else if tag.starts_with("{customer") {
            Ok(Self::CustomerMargin)
        } else {
            Err(AnswerError::UnsupportedFormat {
                tag: tag.to_string(),
            })
        }
    }

    /// The zero-valued instance of this shape.
    pub fn empty_answer(&self) -> FinalAnswer {
        match self {
            Self::Int => FinalAnswer::Int(0),
            Self::Float => FinalAnswer::Float(0.0),
            Self::CategoryQuantity => FinalAnswer::CategoryQuantity {
                category: String::new(),
                quantity: 0,
            },
            Self::ProductRevenueList => FinalAnswer::ProductRevenues(Vec::new()),
            Self::CustomerMargin => FinalAnswer::CustomerMargin {
                customer: String::new(),
                margin: 0.0,
            },
        }
    }

    /// Coerce `rows` into this shape. `None` when nothing usable is there.
    fn coerce(&self, rows: &[Vec<CellValue>]) -> Option<FinalAnswer> {
        if let Self::ProductRevenueList = self {
            let items: Vec<ProductRevenue> = rows
                .iter()
                .filter_map(|row| {
                    Some(ProductRevenue {
                        product: row.first()?.as_text()?,
                        revenue: round2(row.get(1)?.as_f64()?),
                    })
                })
                .collect();
            return (!items.is_empty()).then_some(FinalAnswer::ProductRevenues(items));
        }

        let row = rows.first()?;
        match self {
            Self::Int => row.first()?.as_i64().map(FinalAnswer::Int),
            Self::Float => row.first()?.as_f64().map(|v| FinalAnswer::Float(round2(v))),
            Self::CategoryQuantity => Some(FinalAnswer::CategoryQuantity {
                category: row.first()?.as_text()?,
                quantity: row.get(1)?.as_i64()?,
            }),
            Self::CustomerMargin => Some(FinalAnswer::CustomerMargin {
                customer: row.first()?.as_text()?,
                margin: round2(row.get(1)?.as_f64()?),
            }),
            Self::ProductRevenueList => None,
        }
    }
}

impl FromStr for FormatTag {
    type Err = AnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Store entities referenced by `query` followed by every document id.
pub fn citations(query: &str, documents: &[DocumentChunk]) -> Vec<String> {
    let mut cited: Vec<String> = if query.is_empty() {
        Vec::new()
    } else {
        ENTITY_PATTERNS
            .iter()
            .filter(|(_, re)| re.is_match(query))
            .map(|(entity, _)| entity.to_string())
            .collect()
    };
    cited.extend(documents.iter().map(|d| d.id.clone()));
    cited
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AnswerSynthesizer;

impl AnswerSynthesizer {
    pub fn new() -> Self {
        Self
    }

    pub fn synthesize(
        &self,
        rows: &[Vec<CellValue>],
        columns: &[String],
        documents: &[DocumentChunk],
        query: &str,
        format_tag: &str,
    ) -> Result<AnswerEnvelope, AnswerError> {
        let tag = FormatTag::parse(format_tag)?;
        let cited = citations(query, documents);

        let envelope = match tag.coerce(rows) {
            Some(answer) => AnswerEnvelope::new(
                answer,
                query,
                CONFIDENCE_ANSWERED,
                &format!(
                    "Computed from {} row(s) of [{}]; sources as cited.",
                    rows.len(),
                    columns.join(", ")
                ),
                cited,
                AnswerOutcome::Answered,
            ),
            None => AnswerEnvelope::new(
                tag.empty_answer(),
                query,
                CONFIDENCE_LOW,
                "No usable rows for the requested answer shape.",
                cited,
                AnswerOutcome::LowConfidence,
            ),
        };
        Ok(envelope)
    }
}
