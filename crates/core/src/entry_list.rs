//! Roster ordering and request validation for the marks entry list.

use std::cmp::Ordering;

use serde_json::Value;

use crate::error::CoreError;
use crate::input::{require_id, require_text};
use crate::types::DbId;

/// Validated parameters for an entry list request.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryListParams {
    pub exam_id: DbId,
    pub class_name: String,
    pub section: String,
    pub subject: String,
}

impl EntryListParams {
    /// Validate raw request parameters. All four are required.
    pub fn validate(
        exam_id: &Value,
        class_name: Option<&str>,
        section: Option<&str>,
        subject: Option<&str>,
    ) -> Result<Self, CoreError> {
        if exam_id.is_null() || exam_id.as_str().is_some_and(|s| s.trim().is_empty()) {
            return Err(CoreError::Validation("examId is required".to_string()));
        }
        Ok(Self {
            exam_id: require_id(exam_id, "examId")?,
            class_name: require_text(class_name, "className")?,
            section: require_text(section, "section")?,
            subject: require_text(subject, "subject")?,
        })
    }
}

/// Numeric value of a roll number, if it has one.
pub fn roll_number_value(roll_number: Option<&str>) -> Option<f64> {
    roll_number
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Roster order: numeric roll number ascending, rows without one last,
/// then student name.
pub fn compare_roster(
    a_roll: Option<&str>,
    a_name: &str,
    b_roll: Option<&str>,
    b_name: &str,
) -> Ordering {
    let by_roll = match (roll_number_value(a_roll), roll_number_value(b_roll)) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_roll.then_with(|| a_name.cmp(b_name))
}
