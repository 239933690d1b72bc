//! Rendering and persistence for results sheets.
//!
//! Supports the tab-aligned text sheet, JSON serialization, and CSV append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

use crate::report::{GRADE_BANDS, ResultSheet};

fn rule(w: &mut impl Write, ch: char, width: usize) -> io::Result<()> {
    writeln!(w, "{}", ch.to_string().repeat(width))
}

/// Formats the average with shortest round-trip digits and a trailing `.0`
/// for whole numbers. Non-finite and extreme values keep Rust's `{:?}`
/// spelling (`inf`, `NaN`, `1e16`).
pub fn format_average(average: f64) -> String {
    format!("{average:?}")
}

/// Writes the grading-criteria bands, one per line.
pub fn render_bands(w: &mut impl Write) -> io::Result<()> {
    for (label, grade) in GRADE_BANDS {
        // letters sit on the second tab stop
        let gap = if label.len() < 8 { "\t\t" } else { "\t" };
        writeln!(w, "{label}{gap}{grade}")?;
    }
    Ok(())
}

/// Writes the full tab-aligned results sheet.
pub fn render_text(w: &mut impl Write, sheet: &ResultSheet) -> io::Result<()> {
    let student = &sheet.student;
    let summary = &sheet.summary;

    writeln!(w, "\t\t\tDepartment of Computer Science")?;
    writeln!(w, "\t\t\t\tEnd of Semester Results")?;
    rule(w, '-', 78)?;
    writeln!(
        w,
        "|Name:{}\t|Roll_No:{}\tSemester:{}",
        student.name, student.registration, student.semester
    )?;
    rule(w, '_', 79)?;
    writeln!(w, "|Unit Code\t\t\t|Unit Name:\t\t\tScore")?;
    rule(w, '-', 80)?;

    for (i, row) in sheet.rows.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        writeln!(w, "|{}\t\t\t|{}\t\t\t|{}", row.code, row.subject, row.score)?;
    }

    rule(w, '-', 80)?;
    writeln!(w, "|Total\t\t\t\t\t\t\t\t|{}", summary.total)?;
    rule(w, '-', 81)?;
    writeln!(w, "|Average\t\t\t\t\t\t\t|{}", format_average(summary.average))?;
    rule(w, '-', 81)?;
    writeln!(w, "|Grade\t\t\t\t\t\t\t\t|{}", summary.grade)?;
    rule(w, '-', 82)?;
    writeln!(w, "\t\t\t\t\t\t  Recommendation|")?;
    rule(w, '-', 83)?;
    writeln!(
        w,
        "Grading Criteria\t\t\tOverall Grade(A-D)\t{}",
        summary.recommendation
    )?;
    render_bands(w)?;
    rule(w, '-', 84)?;

    Ok(())
}

/// Serializes the sheet as pretty-printed JSON.
pub fn render_json(sheet: &ResultSheet) -> Result<String> {
    Ok(serde_json::to_string_pretty(sheet)?)
}

/// One-line summary of a results sheet, as stored in the CSV log.
#[derive(Debug, Serialize)]
pub struct ResultRecord {
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub registration: String,
    pub semester: String,
    pub total: i64,
    pub average: f64,
    pub grade: char,
    pub recommendation: String,
}

impl ResultRecord {
    pub fn from_sheet(sheet: &ResultSheet) -> Self {
        ResultRecord {
            timestamp: Utc::now(),
            name: sheet.student.name.clone(),
            registration: sheet.student.registration.clone(),
            semester: sheet.student.semester.clone(),
            total: sheet.summary.total,
            average: sheet.summary.average,
            grade: sheet.summary.grade.letter(),
            recommendation: sheet.summary.recommendation.to_string(),
        }
    }
}

/// Appends a [`ResultRecord`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: impl AsRef<Path>, record: &ResultRecord) -> Result<()> {
    let path = path.as_ref();
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::report::{UnitEntry, build_sheet};
    use std::fs;

    fn sheet(scores: [f64; 4]) -> ResultSheet {
        let entries: Vec<_> = ["CS101", "CS102", "CS103", "CS104"]
            .into_iter()
            .zip(scores)
            .map(|(code, score)| UnitEntry::new(code, score))
            .collect();
        build_sheet(&ReportConfig::default(), &entries).unwrap()
    }

    fn text(sheet: &ResultSheet) -> String {
        let mut out = Vec::new();
        render_text(&mut out, sheet).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_average() {
        assert_eq!(format_average(61.25), "61.25");
        assert_eq!(format_average(70.0), "70.0");
        assert_eq!(format_average(16.25), "16.25");
        assert_eq!(format_average(f64::INFINITY), "inf");
        assert_eq!(format_average(f64::NAN), "NaN");
    }

    #[test]
    fn test_bands() {
        let mut out = Vec::new();
        render_bands(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "70-100\t\tA\n60-69\t\tB\n50-59\t\tC\n40-49\t\tD\nBelow 40\tF\n"
        );
    }

    #[test]
    fn test_full_sheet_layout() {
        let expected: [&str; 30] = [
            "\t\t\tDepartment of Computer Science",
            "\t\t\t\tEnd of Semester Results",
            &"-".repeat(78),
            "|Name:Kyalo Josephine Kathini\t|Roll_No:C026-01-0935/2022\tSemester:2.2",
            &"_".repeat(79),
            "|Unit Code\t\t\t|Unit Name:\t\t\tScore",
            &"-".repeat(80),
            "|CS101\t\t\t|Database\t\t\t|80",
            "",
            "|CS102\t\t\t|Systems\t\t\t|65",
            "",
            "|CS103\t\t\t|Algorithm\t\t\t|55",
            "",
            "|CS104\t\t\t|Statistics\t\t\t|45",
            &"-".repeat(80),
            "|Total\t\t\t\t\t\t\t\t|245",
            &"-".repeat(81),
            "|Average\t\t\t\t\t\t\t|61.25",
            &"-".repeat(81),
            "|Grade\t\t\t\t\t\t\t\t|B",
            &"-".repeat(82),
            "\t\t\t\t\t\t  Recommendation|",
            &"-".repeat(83),
            "Grading Criteria\t\t\tOverall Grade(A-D)\tRecommend Pass",
            "70-100\t\tA",
            "60-69\t\tB",
            "50-59\t\tC",
            "40-49\t\tD",
            "Below 40\tF",
            &"-".repeat(84),
        ];

        let rendered = text(&sheet([80.0, 65.0, 55.0, 45.0]));
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_failing_sheet() {
        let rendered = text(&sheet([30.0, 20.0, 10.0, 5.0]));
        assert!(rendered.contains("|Total\t\t\t\t\t\t\t\t|65\n"));
        assert!(rendered.contains("|Average\t\t\t\t\t\t\t|16.25\n"));
        assert!(rendered.contains("|Grade\t\t\t\t\t\t\t\t|F\n"));
        assert!(rendered.contains("Overall Grade(A-D)\tRecommend Fail\n"));
    }

    #[test]
    fn test_scores_truncated_in_table() {
        let rendered = text(&sheet([79.9, 65.5, 55.1, 45.99]));
        assert!(rendered.contains("|CS101\t\t\t|Database\t\t\t|79\n"));
        assert!(rendered.contains("|CS104\t\t\t|Statistics\t\t\t|45\n"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sheet([70.0, 70.0, 70.0, 70.0])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["student"]["registration"], "C026-01-0935/2022");
        assert_eq!(value["rows"][3]["subject"], "Statistics");
        assert_eq!(value["total"], 280);
        assert_eq!(value["average"], 70.0);
        assert_eq!(value["grade"], "A");
        assert_eq!(value["recommendation"], "Recommend Pass");
    }

    #[test]
    fn test_append_record_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        let record = ResultRecord::from_sheet(&sheet([80.0, 65.0, 55.0, 45.0]));
        append_record(&path, &record).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(
            lines[0],
            "timestamp,name,registration,semester,total,average,grade,recommendation"
        );
        assert!(lines[1].ends_with(
            ",Kyalo Josephine Kathini,C026-01-0935/2022,2.2,245,61.25,B,Recommend Pass"
        ));
    }

    #[test]
    fn test_append_record_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        let record = ResultRecord::from_sheet(&sheet([30.0, 20.0, 10.0, 5.0]));
        append_record(&path, &record).unwrap();
        append_record(&path, &record).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.starts_with("timestamp")).count();
        assert_eq!(header_count, 1);
        assert_eq!(content.lines().count(), 3);
    }
}
