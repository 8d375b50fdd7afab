//! Grade calculation from percentage bands.
//!
//! A grading scheme stores its bands as a JSON object mapping a grade label
//! to the minimum percentage that earns it (`{"A+": 90, "A": 80, ...}`).
//! [`GradeBands`] turns that mapping into an ordered list once, so lookups and
//! tie-breaking are explicit.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Grade returned when no band qualifies (including an empty band set).
pub const FALLBACK_GRADE: &str = "F";

/// Overall percentage at or above which a result card is a pass.
///
/// Fixed policy; not configurable per scheme.
pub const PASS_PERCENTAGE: f64 = 33.0;

pub const STATUS_PASS: &str = "Pass";
pub const STATUS_FAIL: &str = "Fail";

// ---------------------------------------------------------------------------
// Bands
// ---------------------------------------------------------------------------

/// One `(grade label, minimum percentage)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeBand {
    pub grade: String,
    pub min_percentage: f64,
}

/// Bands sorted by threshold descending.
///
/// Bands sharing a threshold are ordered by label ascending, so the result
/// never depends on the order the caller listed them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeBands(Vec<GradeBand>);

impl GradeBands {
    pub fn new<I, S>(bands: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut bands: Vec<GradeBand> = bands
            .into_iter()
            .map(|(grade, min_percentage)| GradeBand {
                grade: grade.into(),
                min_percentage,
            })
            .collect();
        bands.sort_by(compare_bands);
        Self(bands)
    }

    /// Build bands from a stored JSON object.
    ///
    /// Thresholds may be numbers or numeric strings. Entries whose threshold
    /// cannot be read are ignored; a non-object value yields no bands.
    pub fn from_json(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        Self::new(
            map.iter()
                .filter_map(|(grade, min)| threshold_value(min).map(|m| (grade.clone(), m))),
        )
    }

    pub fn as_slice(&self) -> &[GradeBand] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Label of the first band whose threshold is at or below `percentage`.
    pub fn grade_for(&self, percentage: f64) -> &str {
        self.0
            .iter()
            .find(|band| band.min_percentage <= percentage)
            .map(|band| band.grade.as_str())
            .unwrap_or(FALLBACK_GRADE)
    }
}

fn compare_bands(a: &GradeBand, b: &GradeBand) -> Ordering {
    b.min_percentage
        .total_cmp(&a.min_percentage)
        .then_with(|| a.grade.cmp(&b.grade))
}

fn threshold_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Map a percentage to a grade label under the given bands.
pub fn compute_grade(percentage: f64, bands: &GradeBands) -> String {
    bands.grade_for(percentage).to_string()
}

/// Pass/fail status for an overall percentage.
pub fn pass_status(percentage: f64) -> &'static str {
    if percentage >= PASS_PERCENTAGE {
        STATUS_PASS
    } else {
        STATUS_FAIL
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a band mapping submitted for a grading scheme.
///
/// Must be a JSON object. Labels must be non-blank and every threshold a
/// number in `[0, 100]`. An empty object is valid.
pub fn validate_bands(value: &Value) -> Result<(), CoreError> {
    let map = value
        .as_object()
        .ok_or_else(|| CoreError::Validation("bands must be an object".to_string()))?;

    for (grade, min) in map {
        if grade.trim().is_empty() {
            return Err(CoreError::Validation(
                "band labels must not be blank".to_string(),
            ));
        }
        let threshold = threshold_value(min).ok_or_else(|| {
            CoreError::Validation(format!("band '{grade}' threshold must be a number"))
        })?;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(CoreError::Validation(format!(
                "band '{grade}' threshold must be between 0 and 100, got {threshold}"
            )));
        }
    }
    Ok(())
}

/// Validate a grading scheme name.
pub fn validate_scheme_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "grading scheme name is required".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
