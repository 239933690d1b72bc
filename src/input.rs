//! Interactive collection of unit codes and marks.
//!
//! Input is read as whitespace-delimited tokens, so a count and several
//! `code mark` pairs may share a line or be spread across many.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::report::{ReportError, UnitEntry, check_unit_count};

#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("input ended while waiting for {expected}")]
    MissingToken { expected: String },
    #[error("unit count must be a non-negative integer, got `{token}`")]
    InvalidCount { token: String },
    #[error("mark for unit {unit} must be a number, got `{token}`")]
    InvalidScore { unit: String, token: String },
    #[error(transparent)]
    UnitCount(#[from] ReportError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Splits a reader into whitespace-delimited tokens, one line at a time.
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Returns the next token, or `None` once the reader is exhausted.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }

    fn expect(&mut self, expected: &str) -> Result<String, InputError> {
        self.next_token()?.ok_or_else(|| InputError::MissingToken {
            expected: expected.to_string(),
        })
    }
}

/// Prompts for a unit count, then that many unit codes and marks.
///
/// Prompts go to `prompt`; tokens come from `reader`. The count must equal
/// `expected_units` and is checked before any unit is asked for. Entries
/// are returned in the order they were typed.
///
/// # Errors
///
/// Returns [`InputError`] if input ends early, a count or mark does not
/// parse, or the count differs from `expected_units`.
#[tracing::instrument(skip_all)]
pub fn collect_entries<R: BufRead, W: Write>(
    reader: R,
    mut prompt: W,
    expected_units: usize,
) -> Result<Vec<UnitEntry>, InputError> {
    let mut tokens = Tokens::new(reader);

    writeln!(prompt, "Enter the number of unit codes:")?;
    prompt.flush()?;
    let token = tokens.expect("the number of unit codes")?;
    let size: usize = token
        .parse()
        .map_err(|_| InputError::InvalidCount { token })?;
    debug!(size, expected_units, "Unit count read");
    check_unit_count(size, expected_units)?;

    let mut entries = Vec::with_capacity(size);
    for i in 1..=size {
        writeln!(prompt, "Enter unit {i}:")?;
        prompt.flush()?;
        let code = tokens.expect(&format!("unit {i}"))?;

        writeln!(prompt, "Now enter the mark for\t{code}:")?;
        prompt.flush()?;
        let token = tokens.expect(&format!("the mark for {code}"))?;
        let score: f64 = token.parse().map_err(|_| InputError::InvalidScore {
            unit: code.clone(),
            token,
        })?;

        debug!(unit = %code, score, "Mark read");
        entries.push(UnitEntry::new(code, score));
    }

    Ok(entries)
}
