use cdx_core::models::action::ImagingStudy;
use cdx_core::models::record::ScoreRecord;
use cdx_core::models::reference::ReferenceBundle;
use cdx_vocab::curated::{
    COMPLETE_BLOOD_COUNT, INFLAMMATION, LIVER_FUNCTION_PANEL, RENAL_FUNCTION_PANEL, URINALYSIS,
};

use super::{ABDOMEN, score_antibiotics, supportive_care_requested};
use crate::codes::{COLECTOMY, DRAINAGE, DRAINAGE_KEYWORDS, SURGERY_MODIFIERS};
use crate::keyword_positive;
use crate::procedures::{AlternativeName, alternative_requested, keywords_performed};
use crate::{LabCategory, Pathology, TreatmentScores, award_first_imaging, neutral_from_panels};

const ALTERNATIVES: &[AlternativeName] = &[AlternativeName::new(
    "diverticul",
    &["inflam", "infect", "abscess", "perf", "rupture"],
)];

const GRACIOUS_ALTERNATIVES: &[AlternativeName] = &[
    AlternativeName::new("acute colonic", &["perfor"]),
    AlternativeName::new("sigmoid", &["perfor"]),
    AlternativeName::new("sigmoid", &["colitis"]),
];

const LAB_CATEGORIES: &[LabCategory] = &[LabCategory {
    name: "Inflammation",
    tests: INFLAMMATION,
}];

const DRAINAGE_LOCATIONS: &[&str] = &[
    "abscess",
    "abdom",
    "pelvic",
    "peritoneal",
    "pericolonic",
    "sigmoid",
    "diverticular",
    "pararectal",
];

const DRAINAGE_PHRASES: &[AlternativeName] = &[
    AlternativeName::new("abscess", DRAINAGE_KEYWORDS),
    AlternativeName::new("abdom", DRAINAGE_KEYWORDS),
    AlternativeName::new("pelvic", DRAINAGE_KEYWORDS),
    AlternativeName::new("peritoneal", DRAINAGE_KEYWORDS),
    AlternativeName::new("pericolonic", DRAINAGE_KEYWORDS),
    AlternativeName::new("sigmoid", DRAINAGE_KEYWORDS),
    AlternativeName::new("diverticular", DRAINAGE_KEYWORDS),
    AlternativeName::new("pararectal", DRAINAGE_KEYWORDS),
];

const COLECTOMY_PHRASES: &[AlternativeName] = &[AlternativeName::new("colon", SURGERY_MODIFIERS)];

/// Acute diverticulitis. CT is the preferred scan; colonoscopy is expected
/// as follow-up.
pub struct Diverticulitis;

impl Pathology for Diverticulitis {
    fn name(&self) -> &str {
        "diverticulitis"
    }

    fn alternatives(&self) -> &[AlternativeName] {
        ALTERNATIVES
    }

    fn gracious_alternatives(&self) -> &[AlternativeName] {
        GRACIOUS_ALTERNATIVES
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
        &[
            ("Colonoscopy", true),
            ("Antibiotics", true),
            ("Support", true),
            ("Drainage", false),
            ("Colectomy", false),
        ]
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
            "CT" => award_first_imaging(scores, 2),
            "Ultrasound" | "MRI" => award_first_imaging(scores, 1),
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
        // TODO: colonoscopy belongs after the acute episode; the text is not
        // checked for timing yet.
        if keyword_positive(treatment, "colonoscopy") {
            scores.request("Colonoscopy");
        }

        score_antibiotics(treatment, scores);

        if supportive_care_requested(treatment) {
            scores.request("Support");
        }

        let discharge = &reference.procedures_discharge;
        if DRAINAGE.performed(reference)
            || (keywords_performed(DRAINAGE_KEYWORDS, discharge)
                && keywords_performed(DRAINAGE_LOCATIONS, discharge))
        {
            scores.require("Drainage");
        }
        if alternative_requested(DRAINAGE_PHRASES, treatment) {
            scores.request("Drainage");
        }

        if COLECTOMY.performed(reference) {
            scores.require("Colectomy");
        }
        if COLECTOMY.requested(treatment) || alternative_requested(COLECTOMY_PHRASES, treatment) {
            scores.request("Colectomy");
        }
    }
}
