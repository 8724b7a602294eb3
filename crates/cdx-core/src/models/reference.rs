use serde::{Deserialize, Serialize};

/// Ground truth for one hospital admission, used to decide which treatments
/// were actually required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceBundle {
    #[serde(default)]
    pub discharge_diagnosis: String,
    /// Titles of the coded diagnoses.
    #[serde(default)]
    pub icd_diagnoses: Vec<String>,
    #[serde(default)]
    pub procedures_icd9: Vec<u32>,
    #[serde(default)]
    pub procedures_icd10: Vec<String>,
    /// Free-text procedure descriptions from the discharge summary.
    #[serde(default)]
    pub procedures_discharge: Vec<String>,
}
