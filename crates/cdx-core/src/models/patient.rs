use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One radiology report as stored for an admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiologyReport {
    pub modality: String,
    pub region: String,
    pub report: String,
}

/// The results available to the model during a simulated encounter.
///
/// Lab and microbiology results are keyed by raw identifier and hold the
/// first recorded value string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(default)]
    pub physical_examination: Option<String>,
    #[serde(default)]
    pub laboratory_tests: BTreeMap<u32, String>,
    #[serde(default)]
    pub microbiology: BTreeMap<u32, String>,
    #[serde(default)]
    pub radiology: Vec<RadiologyReport>,
}
