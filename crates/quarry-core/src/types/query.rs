use serde::{Deserialize, Serialize};

use crate::constants::NO_QUERY_ERROR;

/// A single cell returned by the structured store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl CellValue {
    /// Integer view of the cell. Reals truncate toward zero; text must parse.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Real(v) if v.is_finite() => Some(v.trunc() as i64),
            Self::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.trunc() as i64))
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Real(v) => Some(*v),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Text view of the cell. Numbers render in their natural form; null is `None`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Integer(v) => Some(v.to_string()),
            Self::Real(v) => Some(v.to_string()),
            Self::Blob(b) => Some(String::from_utf8_lossy(b).into_owned()),
            Self::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Result of running one query: columns, rows and an optional error message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub error: Option<String>,
}

impl QueryOutcome {
    pub fn success(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            columns,
            rows,
            error: None,
        }
    }

    /// A failed execution: empty columns and rows plus a non-empty message.
    pub fn failure(message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = "unknown error".to_string();
        }
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            error: Some(message),
        }
    }

    /// The outcome for an empty query string.
    pub fn no_query() -> Self {
        Self::failure(NO_QUERY_ERROR)
    }

    /// No error and at least one row.
    pub fn is_usable(&self) -> bool {
        self.error.is_none() && !self.rows.is_empty()
    }
}
