//! Data types shared by the collector, aggregator and renderers.

use serde::Serialize;

use crate::config::Student;
use crate::report::grade::{Grade, Recommendation};

/// One unit code and the mark entered for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitEntry {
    pub code: String,
    pub score: f64,
}

impl UnitEntry {
    pub fn new(code: impl Into<String>, score: f64) -> Self {
        Self {
            code: code.into(),
            score,
        }
    }

    /// The mark as printed in the table, truncated toward zero.
    pub fn whole_score(&self) -> i64 {
        self.score as i64
    }
}

/// Totals derived from the entered marks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total: i64,
    pub average: f64,
    pub grade: Grade,
    pub recommendation: Recommendation,
}

/// A single table row: the entered code next to its configured subject name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub code: String,
    pub subject: String,
    pub score: i64,
}

/// Everything the renderers need for one results sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSheet {
    pub student: Student,
    pub rows: Vec<ReportRow>,
    #[serde(flatten)]
    pub summary: Summary,
}
