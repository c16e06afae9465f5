//! CSV parsing and validation for running logs.
//!
//! Turns raw `date,person,miles run` text into validated [`Record`]s plus one
//! human-readable message per rejected row. Content problems never abort a
//! parse; only structural problems (bad header, no data, unreadable input)
//! collapse the outcome to a single error.

use std::io::Read;
use std::path::Path;

use runner_core::error::{Result, RunnerError};
use runner_core::models::{ParseOutcome, Record};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Header names in the required column order, compared case-insensitively.
pub const REQUIRED_HEADERS: [&str; 3] = ["date", "person", "miles run"];

pub const MISSING_HEADERS_MESSAGE: &str = "CSV file must have headers";
pub const NO_DATA_MESSAGE: &str = "CSV file is empty or contains no valid data";

// ── Row errors ────────────────────────────────────────────────────────────────

/// Why a single data row was rejected. `row` is the 1-based file line,
/// counting the header as line 1.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("Row {row}: Missing required field(s)")]
    MissingFields { row: usize },

    #[error("Row {row}: Invalid miles value \"{raw}\"")]
    InvalidMiles { row: usize, raw: String },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Check header names positionally against [`REQUIRED_HEADERS`].
///
/// Names are trimmed and lower-cased before comparison. The first mismatch,
/// scanning left to right, is reported with its 1-based column and the raw
/// header text.
pub fn validate_headers(headers: &[&str]) -> std::result::Result<(), String> {
    if headers.len() != REQUIRED_HEADERS.len() {
        return Err(format!(
            "Expected {} columns, found {}",
            REQUIRED_HEADERS.len(),
            headers.len()
        ));
    }

    for (i, (actual, expected)) in headers.iter().zip(REQUIRED_HEADERS).enumerate() {
        if actual.trim().to_lowercase() != expected {
            return Err(format!(
                "Invalid header at column {}. Expected \"{}\", found \"{}\"",
                i + 1,
                expected,
                actual
            ));
        }
    }

    Ok(())
}

/// Parse CSV text into a [`ParseOutcome`].
pub fn parse_str(input: &str) -> ParseOutcome {
    parse_records(input).unwrap_or_else(failed_outcome)
}

/// Parse raw bytes, which must be UTF-8 text.
pub fn parse_bytes(bytes: &[u8]) -> ParseOutcome {
    match std::str::from_utf8(bytes) {
        Ok(text) => parse_str(text),
        Err(e) => failed_outcome(RunnerError::from(e)),
    }
}

/// Read `reader` to the end, then parse its contents.
pub fn parse_reader<R: Read>(mut reader: R) -> ParseOutcome {
    let mut bytes = Vec::new();
    if let Err(e) = reader.read_to_end(&mut bytes) {
        return failed_outcome(RunnerError::from(e));
    }
    parse_bytes(&bytes)
}

/// Read and parse the file at `path`.
pub fn parse_path(path: &Path) -> ParseOutcome {
    match std::fs::read(path) {
        Ok(bytes) => parse_bytes(&bytes),
        Err(source) => failed_outcome(RunnerError::FileRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Collapse an infrastructure failure into a single structural error.
pub fn failed_outcome(err: impl std::fmt::Display) -> ParseOutcome {
    warn!("CSV input could not be parsed: {}", err);
    ParseOutcome::structural(format!("Failed to parse CSV: {}", err))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn parse_records(input: &str) -> Result<ParseOutcome> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        warn!("{}", MISSING_HEADERS_MESSAGE);
        return Ok(ParseOutcome::structural(MISSING_HEADERS_MESSAGE));
    }

    let names: Vec<&str> = headers.iter().collect();
    if let Err(message) = validate_headers(&names) {
        warn!("Rejecting CSV header: {}", message);
        return Ok(ParseOutcome::structural(message));
    }

    let mut outcome = ParseOutcome::default();
    let mut rows_read = 0usize;

    for (index, result) in reader.records().enumerate() {
        let record = result?;
        rows_read += 1;

        match RawRow::from_record(&record).validate(index + 2) {
            Ok(valid) => outcome.records.push(valid),
            Err(e) => {
                trace!("{}", e);
                outcome.errors.push(e.to_string());
            }
        }
    }

    if rows_read == 0 {
        warn!("{}", NO_DATA_MESSAGE);
        return Ok(ParseOutcome::structural(NO_DATA_MESSAGE));
    }

    debug!(
        "Parsed {} rows: {} accepted, {} rejected",
        rows_read,
        outcome.records.len(),
        outcome.errors.len()
    );

    Ok(outcome)
}

/// Trimmed cells of one data row, read positionally once the header has been
/// validated. Absent trailing cells read as empty; extra cells are ignored.
struct RawRow<'a> {
    date: &'a str,
    person: &'a str,
    miles: &'a str,
}

impl<'a> RawRow<'a> {
    fn from_record(record: &'a csv::StringRecord) -> Self {
        let cell = move |i: usize| record.get(i).map(str::trim).unwrap_or("");
        Self {
            date: cell(0),
            person: cell(1),
            miles: cell(2),
        }
    }

    fn validate(self, row: usize) -> std::result::Result<Record, RowError> {
        if self.date.is_empty() || self.person.is_empty() || self.miles.is_empty() {
            return Err(RowError::MissingFields { row });
        }

        let miles = parse_miles(self.miles).ok_or_else(|| RowError::InvalidMiles {
            row,
            raw: self.miles.to_string(),
        })?;

        Ok(Record::new(self.date, self.person, miles))
    }
}

/// Parse a distance from the leading number in `raw`, ignoring any trailing
/// text (`"3.5 miles"` reads as 3.5). `None` when there is no leading number
/// or the value is non-finite or negative.
fn parse_miles(raw: &str) -> Option<f64> {
    let value = leading_number(raw)?.parse::<f64>().ok()?;
    // abs() folds -0 into 0; negatives were already rejected.
    (value.is_finite() && value >= 0.0).then(|| value.abs())
}

/// Longest prefix of `raw` shaped like a decimal float: optional sign,
/// digits with an optional fraction, then an optional exponent.
fn leading_number(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    let digits_from = |start: usize| {
        start
            + bytes[start.min(bytes.len())..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digit_count = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digit_count += frac_end - (end + 1);
        end = frac_end;
    }
    if digit_count == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    Some(&raw[..end])
}

// ── Tests ─────────────────────────────────────────────────────────────────────
