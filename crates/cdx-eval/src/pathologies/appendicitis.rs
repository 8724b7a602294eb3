use cdx_core::models::action::ImagingStudy;
use cdx_core::models::record::ScoreRecord;
use cdx_core::models::reference::ReferenceBundle;
use cdx_vocab::curated::{
    COMPLETE_BLOOD_COUNT, INFLAMMATION, LIVER_FUNCTION_PANEL, RENAL_FUNCTION_PANEL, URINALYSIS,
};

use super::{ABDOMEN, score_antibiotics, supportive_care_requested};
use crate::codes::{APPENDECTOMY, SURGERY_MODIFIERS};
use crate::procedures::{AlternativeName, alternative_requested};
use crate::{LabCategory, Pathology, TreatmentScores, award_first_imaging, neutral_from_panels};

const ALTERNATIVES: &[AlternativeName] = &[AlternativeName::new(
    "appendi",
    &["gangren", "infect", "inflam", "abscess", "rupture", "necros", "perf"],
)];

const LAB_CATEGORIES: &[LabCategory] = &[LabCategory {
    name: "Inflammation",
    tests: INFLAMMATION,
}];

const APPENDECTOMY_PHRASES: &[AlternativeName] =
    &[AlternativeName::new("appendix", SURGERY_MODIFIERS)];

/// Acute appendicitis. Ultrasound first, CT or MRI after; appendectomy when
/// the case had one, antibiotics and supportive care always.
pub struct Appendicitis;

impl Pathology for Appendicitis {
    fn name(&self) -> &str {
        "appendicitis"
    }

    fn alternatives(&self) -> &[AlternativeName] {
        ALTERNATIVES
    }

    fn lab_categories(&self) -> &[LabCategory] {
        LAB_CATEGORIES
    }

    fn neutral_lab_tests(&self) -> Vec<u32> {
        neutral_from_panels(
            &[
                COMPLETE_BLOOD_COUNT,
                LIVER_FUNCTION_PANEL,
                RENAL_FUNCTION_PANEL,
                URINALYSIS,
            ],
            LAB_CATEGORIES,
        )
    }

    fn treatment_defaults(&self) -> &[(&'static str, bool)] {
        &[("Appendectomy", false), ("Antibiotics", true), ("Support", true)]
    }

    fn score_imaging(
        &self,
        study: &ImagingStudy,
        scores: &mut ScoreRecord,
        _reference: &ReferenceBundle,
    ) -> bool {
        if study.region != ABDOMEN {
            return false;
        }
        match study.modality.as_str() {
            "Ultrasound" => award_first_imaging(scores, 2),
            "CT" | "MRI" => award_first_imaging(scores, 1),
            _ => return false,
        }
        true
    }

    fn score_treatment(
        &self,
        treatment: &str,
        reference: &ReferenceBundle,
        scores: &mut TreatmentScores,
    ) {
        if APPENDECTOMY.performed(reference) {
            scores.require("Appendectomy");
        }
        if APPENDECTOMY.requested(treatment)
            || alternative_requested(APPENDECTOMY_PHRASES, treatment)
        {
            scores.request("Appendectomy");
        }

        score_antibiotics(treatment, scores);

        if supportive_care_requested(treatment) {
            scores.request("Support");
        }
    }
}
