use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::action::{ImagingStudy, LabTerm};

/// Guideline-adherence scores for one evaluated case.
///
/// Parsing fields are flags (0 or 1), not counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRecord {
    pub late_physical_examination: u32,
    pub physical_examination: u32,
    pub laboratory_tests: u32,
    pub imaging: u32,
    pub diagnosis: u32,
    pub gracious_diagnosis: u32,
    pub action_parsing: u32,
    pub treatment_parsing: u32,
    pub diagnosis_parsing: u32,
    pub invalid_tools: u32,
    pub rounds: u32,
}

/// What the model actually asked for and answered, grouped by guideline
/// relevance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerRecord {
    pub diagnosis: String,
    pub treatment: String,
    pub unnecessary_laboratory_tests: Vec<LabTerm>,
    /// Guideline category name → identifiers that satisfied it, in request order.
    pub correct_laboratory_tests: BTreeMap<String, Vec<u32>>,
    pub unnecessary_imaging: Vec<ImagingStudy>,
    pub correct_imaging: Vec<ImagingStudy>,
    pub treatment_requested: BTreeMap<String, bool>,
    pub treatment_required: BTreeMap<String, bool>,
}

/// Terminal output of a trajectory evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Evaluation {
    pub pathology: String,
    pub scores: ScoreRecord,
    pub answers: AnswerRecord,
}
