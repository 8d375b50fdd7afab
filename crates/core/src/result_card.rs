//! Result card assembly.
//!
//! Reconciles three independent sources into one per-student view:
//! the class's configured subjects (authoritative list and full marks),
//! the stored marks, and the grading bands. Stored marks for subjects that
//! are no longer configured are still reported, with no full marks.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::grading::{compute_grade, pass_status, GradeBands};
use crate::marks::subject_key;

/// A subject configured for the student's class and section.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfiguredSubject {
    pub subject_name: String,
    pub full_marks: Option<f64>,
}

/// A stored mark for one subject.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMark {
    pub subject: String,
    pub marks: Option<f64>,
    pub grade: Option<String>,
}

/// One line of the result card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResult {
    pub subject: String,
    pub full_marks: Option<f64>,
    pub obtained_marks: Option<f64>,
    pub percentage: Option<f64>,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultTotals {
    pub total_marks: f64,
    pub obtained_marks: f64,
    pub percentage: f64,
    pub grade: String,
    pub status: &'static str,
}

/// Build the subject lines: configured subjects first, in configuration
/// order, then orphaned marks in the order they were stored.
pub fn build_subject_results(
    configured: &[ConfiguredSubject],
    marks: &[StoredMark],
    bands: &GradeBands,
) -> Vec<SubjectResult> {
    let by_subject: HashMap<String, &StoredMark> =
        marks.iter().map(|m| (subject_key(&m.subject), m)).collect();

    let mut subjects: Vec<SubjectResult> = configured
        .iter()
        .map(|cfg| {
            let stored = by_subject.get(&subject_key(&cfg.subject_name)).copied();
            subject_line(cfg.subject_name.clone(), cfg.full_marks, stored, bands)
        })
        .collect();

    let mut seen: HashSet<String> = configured
        .iter()
        .map(|cfg| subject_key(&cfg.subject_name))
        .collect();
    for mark in marks {
        let key = subject_key(&mark.subject);
        if !seen.insert(key.clone()) {
            continue;
        }
        // Last stored row wins when keys collide, matching the index above.
        let stored = by_subject.get(&key).copied();
        subjects.push(subject_line(mark.subject.clone(), None, stored, bands));
    }

    subjects
}

fn subject_line(
    subject: String,
    full_marks: Option<f64>,
    stored: Option<&StoredMark>,
    bands: &GradeBands,
) -> SubjectResult {
    let obtained_marks = stored.and_then(|m| m.marks);
    let percentage = match (obtained_marks, full_marks) {
        (Some(obtained), Some(full)) if full > 0.0 => Some(obtained / full * 100.0),
        _ => None,
    };
    let grade = stored
        .and_then(|m| m.grade.clone())
        .or_else(|| percentage.map(|p| compute_grade(p, bands)));

    SubjectResult {
        subject,
        full_marks,
        obtained_marks,
        percentage,
        grade,
    }
}

/// Sum the subject lines. Missing values count as zero.
pub fn compute_totals(subjects: &[SubjectResult], bands: &GradeBands) -> ResultTotals {
    let total_marks: f64 = subjects.iter().filter_map(|s| s.full_marks).sum();
    let obtained_marks: f64 = subjects.iter().filter_map(|s| s.obtained_marks).sum();
    let percentage = if total_marks > 0.0 {
        obtained_marks / total_marks * 100.0
    } else {
        0.0
    };

    ResultTotals {
        total_marks,
        obtained_marks,
        percentage,
        grade: compute_grade(percentage, bands),
        status: pass_status(percentage),
    }
}
