pub mod appendicitis;
pub mod cholecystitis;
pub mod diverticulitis;
pub mod pancreatitis;

use crate::TreatmentScores;
use crate::keyword_positive;

pub(crate) const ABDOMEN: &str = "Abdomen";

/// Fluids or pain relief.
pub(crate) fn supportive_care_requested(treatment: &str) -> bool {
    ["fluid", "analgesi", "pain"]
        .iter()
        .any(|keyword| keyword_positive(treatment, keyword))
}

pub(crate) fn score_antibiotics(treatment: &str, scores: &mut TreatmentScores) {
    if keyword_positive(treatment, "antibiotic") {
        scores.request("Antibiotics");
    }
}
