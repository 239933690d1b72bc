//! Mark aggregation and grading.
//!
//! [`aggregate::build_sheet`] turns the collected [`types::UnitEntry`] list
//! into a [`types::ResultSheet`]: configured subject names, a truncated
//! total, the average and the letter grade from [`grade::Grade`].

pub mod aggregate;
pub mod grade;
pub mod types;

pub use aggregate::{ReportError, build_sheet, check_unit_count, summarize};
pub use grade::{GRADE_BANDS, Grade, Recommendation};
pub use types::{ReportRow, ResultSheet, Summary, UnitEntry};
