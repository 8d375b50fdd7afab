//! Normalization of bulk mark submissions.
//!
//! Rows that cannot be keyed (bad student id, blank subject) are dropped
//! rather than rejected: bulk entry is best-effort per row. Batch-level
//! problems are the caller's to raise.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::input::parse_id;
use crate::types::DbId;

/// One row of a bulk marks submission, exactly as the caller sent it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkEntryInput {
    #[serde(default)]
    pub student_id: Value,
    #[serde(default)]
    pub subject: Value,
    #[serde(default)]
    pub marks: Value,
    #[serde(default)]
    pub grade: Value,
}

/// A row that survived normalization and is ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkRow {
    pub student_id: DbId,
    pub subject: String,
    pub marks: Option<f64>,
    pub grade: Option<String>,
}

/// Normalized rows plus how many inputs were dropped or merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedMarks {
    pub rows: Vec<MarkRow>,
    /// Inputs that could not be keyed.
    pub skipped: usize,
    /// Inputs that repeated an earlier `(student, subject key)` pair.
    pub merged: usize,
}

/// Case-folded subject name used for matching and uniqueness.
pub fn subject_key(subject: &str) -> String {
    subject.trim().to_lowercase()
}

/// Trimmed subject text, or `None` when blank or not a scalar.
pub fn normalize_subject(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Blank or missing marks become `None`; numeric strings are parsed.
pub fn normalize_marks(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Stringify a supplied grade. Null and blank grades become `None`.
pub fn normalize_grade(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Normalize a single entry, or `None` if it cannot be keyed.
pub fn normalize_entry(input: &MarkEntryInput) -> Option<MarkRow> {
    let student_id = parse_id(&input.student_id)?;
    let subject = normalize_subject(&input.subject)?;
    Some(MarkRow {
        student_id,
        subject,
        marks: normalize_marks(&input.marks),
        grade: normalize_grade(&input.grade),
    })
}

/// Normalize a batch. Rows sharing a `(student, subject key)` pair collapse
/// into one: the last occurrence wins and takes the first one's position.
pub fn normalize_entries(items: &[MarkEntryInput]) -> NormalizedMarks {
    let mut rows: Vec<MarkRow> = Vec::with_capacity(items.len());
    let mut positions: HashMap<(DbId, String), usize> = HashMap::new();
    let mut skipped = 0;
    let mut merged = 0;

    for item in items {
        let Some(row) = normalize_entry(item) else {
            skipped += 1;
            continue;
        };
        let key = (row.student_id, subject_key(&row.subject));
        match positions.get(&key) {
            Some(&at) => {
                rows[at] = row;
                merged += 1;
            }
            None => {
                positions.insert(key, rows.len());
                rows.push(row);
            }
        }
    }

    NormalizedMarks {
        rows,
        skipped,
        merged,
    }
}
