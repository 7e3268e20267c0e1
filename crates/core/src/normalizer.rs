//! CSV parsing, schema validation, and row normalization.
//!
//! This module has zero external collaborators (no DB, no async, no I/O).
//! It turns raw upload bytes into named rows, enforces the required column
//! set, and keeps only rows whose values satisfy the record constraints.
//! A missing required column fails the whole batch; individual bad rows
//! are dropped and reported in the batch outcome, never as errors.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// ── Constants ────────────────────────────────────────────────────────

/// Columns every upload must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: &[&str] = &["name", "age", "email"];

/// Inclusive lower bound for a valid age.
pub const AGE_MIN: i32 = 0;

/// Inclusive upper bound for a valid age.
pub const AGE_MAX: i32 = 120;

/// Address pattern: local part, `@`, domain with at least one dot, no `@`
/// inside the parts. Anchored at the start only -- text trailing a valid
/// prefix is accepted. The service has always matched this way, so stored
/// data depends on it; do not tighten the anchor.
const EMAIL_PATTERN: &str = r"^[^@]+@[^@]+\.[^@]+";

/// Compiled email pattern. Compiled once, reused forever.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

// ── Types ────────────────────────────────────────────────────────────

/// An upload parsed into named rows, prior to validation.
#[derive(Debug, Clone)]
pub struct TabularInput {
    /// Header names in file order, trimmed.
    pub columns: Vec<String>,
    /// One map per data row, keyed by header name. Values are trimmed.
    pub rows: Vec<HashMap<String, String>>,
}

/// A row that survived validation, ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecord {
    pub name: String,
    pub age: i32,
    pub email: String,
}

/// Why a row was dropped during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// A required column value was absent or empty.
    MissingValue,
    /// The age value contained a character other than a decimal digit.
    AgeNotNumeric,
    /// The age was numeric but fell outside `[AGE_MIN, AGE_MAX]`.
    AgeOutOfRange,
    /// The email value did not match the address pattern.
    EmailInvalid,
}

/// A dropped row: zero-based data-row index plus the first constraint it
/// violated.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRow {
    pub row: usize,
    pub reason: RejectReason,
}

/// The outcome of normalizing one upload: valid records in input order,
/// plus the rows that were dropped and why.
#[derive(Debug, Clone)]
pub struct NormalizedBatch {
    pub records: Vec<ValidRecord>,
    pub rejected: Vec<RejectedRow>,
}

/// A required column is missing from the upload header. Fails the whole
/// batch; no rows are processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required column: {column}")]
pub struct SchemaError {
    pub column: String,
}

// ── Pure Functions ───────────────────────────────────────────────────

/// Parse raw CSV bytes into [`TabularInput`].
///
/// The first row is the header. Data rows may be shorter or longer than
/// the header (cells past the header width are ignored); fully blank rows
/// are skipped. All header names and values are trimmed.
pub fn parse_csv(bytes: &[u8]) -> Result<TabularInput, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = HashMap::new();

        for (idx, value) in record.iter().enumerate() {
            if let Some(column) = columns.get(idx) {
                row.insert(column.clone(), value.trim().to_string());
            }
        }

        if row.values().all(|v| v.is_empty()) {
            continue;
        }

        rows.push(row);
    }

    Ok(TabularInput { columns, rows })
}

/// Validate a tabular upload against the required schema and produce the
/// batch of persistable records.
///
/// Fails only when a required column is absent from the header. Rows that
/// violate a record constraint are dropped and listed in the outcome,
/// preserving the relative order of the survivors.
pub fn normalize(input: &TabularInput) -> Result<NormalizedBatch, SchemaError> {
    for required in REQUIRED_COLUMNS {
        if !input.columns.iter().any(|c| c == required) {
            return Err(SchemaError {
                column: (*required).to_string(),
            });
        }
    }

    let mut records = Vec::with_capacity(input.rows.len());
    let mut rejected = Vec::new();

    for (idx, row) in input.rows.iter().enumerate() {
        match validate_row(row) {
            Ok(record) => records.push(record),
            Err(reason) => rejected.push(RejectedRow { row: idx, reason }),
        }
    }

    Ok(NormalizedBatch { records, rejected })
}

// ── Private helpers ──────────────────────────────────────────────────

/// Check one row against the record constraints, returning the first
/// violated constraint.
fn validate_row(row: &HashMap<String, String>) -> Result<ValidRecord, RejectReason> {
    let name = required_value(row, "name")?;
    let age_raw = required_value(row, "age")?;
    let email = required_value(row, "email")?;

    if !age_raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(RejectReason::AgeNotNumeric);
    }
    // An all-digit value too large for i32 is necessarily out of range.
    let age: i32 = age_raw.parse().map_err(|_| RejectReason::AgeOutOfRange)?;
    if !(AGE_MIN..=AGE_MAX).contains(&age) {
        return Err(RejectReason::AgeOutOfRange);
    }

    if !EMAIL_RE.is_match(&email) {
        return Err(RejectReason::EmailInvalid);
    }

    Ok(ValidRecord { name, age, email })
}

/// Fetch a required column value from a row; empty counts as missing.
fn required_value(row: &HashMap<String, String>, column: &str) -> Result<String, RejectReason> {
    match row.get(column) {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(RejectReason::MissingValue),
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn input(columns: &[&str], rows: &[&[&str]]) -> TabularInput {
        TabularInput {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| {
                    columns
                        .iter()
                        .zip(row.iter())
                        .map(|(c, v)| (c.to_string(), v.to_string()))
                        .collect()
                })
                .collect(),
        }
    }

    // -- schema tests --

    #[test]
    fn test_missing_required_column_fails_batch() {
        for missing in REQUIRED_COLUMNS {
            let columns: Vec<&str> = REQUIRED_COLUMNS
                .iter()
                .copied()
                .filter(|c| c != missing)
                .collect();
            let err = normalize(&input(&columns, &[])).unwrap_err();
            assert_eq!(err.column, *missing, "missing: {missing}");
        }
    }

    #[test]
    fn test_schema_error_yields_no_records() {
        let result = normalize(&input(&["name", "age"], &[&["Alice", "30"]]));
        assert_matches!(result, Err(SchemaError { .. }));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let batch = normalize(&input(
            &["id", "name", "age", "email", "notes"],
            &[&["7", "Alice", "30", "alice@example.com", "vip"]],
        ))
        .unwrap();

        assert_eq!(
            batch.records,
            vec![ValidRecord {
                name: "Alice".to_string(),
                age: 30,
                email: "alice@example.com".to_string(),
            }]
        );
    }

    // -- age tests --

    #[test]
    fn test_age_bounds_inclusive() {
        let batch = normalize(&input(
            &["name", "age", "email"],
            &[
                &["A", "0", "a@b.c"],
                &["B", "120", "b@c.d"],
                &["C", "121", "c@d.e"],
            ],
        ))
        .unwrap();

        let ages: Vec<i32> = batch.records.iter().map(|r| r.age).collect();
        assert_eq!(ages, vec![0, 120]);
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].reason, RejectReason::AgeOutOfRange);
    }

    #[test]
    fn test_non_digit_ages_dropped() {
        for bad in &["12.5", "-5", "-1", "abc", "3O"] {
            let batch = normalize(&input(&["name", "age", "email"], &[&["A", bad, "a@b.c"]]))
                .unwrap();
            assert!(batch.records.is_empty(), "age: {bad}");
            assert_eq!(batch.rejected[0].reason, RejectReason::AgeNotNumeric);
        }
    }

    #[test]
    fn test_age_overflowing_i32_dropped_as_out_of_range() {
        let batch = normalize(&input(
            &["name", "age", "email"],
            &[&["A", "99999999999999999999", "a@b.c"]],
        ))
        .unwrap();
        assert_eq!(batch.rejected[0].reason, RejectReason::AgeOutOfRange);
    }

    // -- email tests --

    #[test]
    fn test_minimal_valid_email_retained() {
        let batch =
            normalize(&input(&["name", "age", "email"], &[&["A", "30", "a@b.c"]])).unwrap();
        assert_eq!(batch.records.len(), 1);
    }

    #[test]
    fn test_email_without_at_sign_dropped() {
        let batch = normalize(&input(
            &["name", "age", "email"],
            &[&["A", "30", "noatsign.com"]],
        ))
        .unwrap();
        assert!(batch.records.is_empty());
        assert_eq!(batch.rejected[0].reason, RejectReason::EmailInvalid);
    }

    #[test]
    fn test_email_with_trailing_garbage_retained() {
        // Start-anchored match only: anything after a valid prefix passes.
        let batch = normalize(&input(
            &["name", "age", "email"],
            &[&["A", "30", "a@b.c!!!garbage"]],
        ))
        .unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].email, "a@b.c!!!garbage");
    }

    #[test]
    fn test_email_with_second_at_sign_dropped() {
        let batch = normalize(&input(
            &["name", "age", "email"],
            &[&["A", "30", "a@b@c.d"]],
        ))
        .unwrap();
        assert!(batch.records.is_empty());
    }

    // -- row filtering tests --

    #[test]
    fn test_empty_value_drops_row() {
        let batch = normalize(&input(
            &["name", "age", "email"],
            &[&["", "30", "a@b.c"], &["B", "31", "b@c.d"]],
        ))
        .unwrap();

        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].name, "B");
        assert_eq!(batch.rejected[0].reason, RejectReason::MissingValue);
    }

    #[test]
    fn test_valid_rows_survive_bad_neighbours_in_order() {
        let batch = normalize(&input(
            &["name", "age", "email"],
            &[
                &["A", "30", "a@b.com"],
                &["B", "200", "b@c.com"],
                &["C", "40", "c@d.com"],
            ],
        ))
        .unwrap();

        let names: Vec<&str> = batch.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].row, 1);
    }

    // -- parse_csv tests --

    #[test]
    fn test_parse_csv_headers_and_rows() {
        let data = b"name,age,email\nAlice,30,alice@example.com\nBob,25,bob@example.com\n";
        let parsed = parse_csv(data).unwrap();

        assert_eq!(parsed.columns, vec!["name", "age", "email"]);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0]["name"], "Alice");
        assert_eq!(parsed.rows[1]["age"], "25");
    }

    #[test]
    fn test_parse_csv_trims_and_skips_blank_rows() {
        let data = b"name, age ,email\n Alice , 30 , alice@example.com \n,,\nBob,25,bob@example.com\n";
        let parsed = parse_csv(data).unwrap();

        assert_eq!(parsed.columns, vec!["name", "age", "email"]);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0]["age"], "30");
    }

    #[test]
    fn test_parse_csv_short_row_leaves_column_absent() {
        let data = b"name,age,email\nAlice,30\n";
        let parsed = parse_csv(data).unwrap();

        assert_eq!(parsed.rows.len(), 1);
        assert!(!parsed.rows[0].contains_key("email"));

        // The absent value then drops the row during normalization.
        let batch = normalize(&parsed).unwrap();
        assert!(batch.records.is_empty());
        assert_eq!(batch.rejected[0].reason, RejectReason::MissingValue);
    }

    #[test]
    fn test_parse_then_normalize_end_to_end() {
        let data = b"name,age,email,extra\nA,30,a@b.com,x\nB,200,b@c.com,y\n";
        let batch = normalize(&parse_csv(data).unwrap()).unwrap();

        assert_eq!(
            batch.records,
            vec![ValidRecord {
                name: "A".to_string(),
                age: 30,
                email: "a@b.com".to_string(),
            }]
        );
        assert_eq!(batch.rejected.len(), 1);
    }
}
