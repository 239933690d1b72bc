use tracing::{debug, warn};

use crate::config::ReportConfig;
use crate::report::grade::Grade;
use crate::report::types::{ReportRow, ResultSheet, Summary, UnitEntry};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ReportError {
    #[error("expected {expected} units but only {found} were entered")]
    InsufficientUnits { expected: usize, found: usize },
    #[error("expected {expected} units but {found} were entered")]
    UnexpectedUnits { expected: usize, found: usize },
}

/// Checks a unit count against the number of configured subjects.
///
/// An empty count is always insufficient.
pub fn check_unit_count(found: usize, expected: usize) -> Result<(), ReportError> {
    if found < expected || found == 0 {
        return Err(ReportError::InsufficientUnits { expected, found });
    }
    if found > expected {
        return Err(ReportError::UnexpectedUnits { expected, found });
    }
    Ok(())
}

/// Sums every entered mark and grades their average.
///
/// The entry count must match `subject_count` exactly, so the divisor is
/// always the number of marks that were summed.
pub fn summarize(entries: &[UnitEntry], subject_count: usize) -> Result<Summary, ReportError> {
    check_unit_count(entries.len(), subject_count)?;

    let sum: f64 = entries.iter().map(|e| e.score).sum();
    let average = sum / entries.len() as f64;
    let grade = Grade::from_average(average);

    debug!(sum, average, grade = %grade, "Marks aggregated");

    Ok(Summary {
        total: sum as i64,
        average,
        grade,
        recommendation: grade.recommendation(),
    })
}

/// Pairs each entry with its configured subject and attaches the summary.
pub fn build_sheet(
    config: &ReportConfig,
    entries: &[UnitEntry],
) -> Result<ResultSheet, ReportError> {
    let summary = summarize(entries, config.subjects.len())?;

    let rows = config
        .subjects
        .iter()
        .zip(entries)
        .map(|(subject, entry)| {
            if let Some(expected) = subject.code.as_deref() {
                if expected != entry.code {
                    warn!(
                        subject = %subject.name,
                        expected,
                        entered = %entry.code,
                        "Unit code does not match configured subject"
                    );
                }
            }
            ReportRow {
                code: entry.code.clone(),
                subject: subject.name.clone(),
                score: entry.whole_score(),
            }
        })
        .collect();

    Ok(ResultSheet {
        student: config.student.clone(),
        rows,
        summary,
    })
}
