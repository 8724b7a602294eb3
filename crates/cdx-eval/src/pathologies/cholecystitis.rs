use cdx_core::models::action::ImagingStudy;
use cdx_core::models::record::ScoreRecord;
use cdx_core::models::reference::ReferenceBundle;
use cdx_vocab::curated::{COMPLETE_BLOOD_COUNT, INFLAMMATION, RENAL_FUNCTION_PANEL, URINALYSIS};

use super::{ABDOMEN, score_antibiotics, supportive_care_requested};
use crate::codes::{CHOLECYSTECTOMY, SURGERY_MODIFIERS};
use crate::procedures::{AlternativeName, alternative_requested};
use crate::{LabCategory, Pathology, TreatmentScores, award_first_imaging, neutral_from_panels};

const ALTERNATIVES: &[AlternativeName] = &[
    AlternativeName::new(
        "gallbladder",
        &["gangren", "infect", "inflam", "abscess", "necros", "perf"],
    ),
    AlternativeName::new("cholangitis", &["cholangitis"]),
];

const GRACIOUS_ALTERNATIVES: &[AlternativeName] = &[
    AlternativeName::new("acute gallbladder", &["disease", "attack"]),
    AlternativeName::new("acute biliary", &["colic"]),
];

const LAB_CATEGORIES: &[LabCategory] = &[
    LabCategory {
        name: "Inflammation",
        tests: INFLAMMATION,
    },
    LabCategory {
        name: "Liver",
        tests: &[
            50861, // Alanine Aminotransferase (ALT)
            50878, // Asparate Aminotransferase (AST)
        ],
    },
    LabCategory {
        name: "Gallbladder",
        tests: &[
            50883, // Bilirubin
            50927, // Gamma Glutamyltransferase
        ],
    },
];

const ALKALINE_PHOSPHATASE: &[u32] = &[50863];

pub(crate) const CHOLECYSTECTOMY_PHRASES: &[AlternativeName] =
    &[AlternativeName::new("gallbladder", SURGERY_MODIFIERS)];

pub struct Cholecystitis;

impl Pathology for Cholecystitis {
    fn name(&self) -> &str {
        "cholecystitis"
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
                RENAL_FUNCTION_PANEL,
                ALKALINE_PHOSPHATASE,
                URINALYSIS,
            ],
            LAB_CATEGORIES,
        )
    }

    fn treatment_defaults(&self) -> &[(&'static str, bool)] {
        &[
            ("Cholecystectomy", false),
            ("Antibiotics", true),
            ("Support", true),
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
            "Ultrasound" | "HIDA" => award_first_imaging(scores, 2),
            "MRI" | "EUS" => award_first_imaging(scores, 1),
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
        if CHOLECYSTECTOMY.performed(reference) {
            scores.require("Cholecystectomy");
        }
        if CHOLECYSTECTOMY.requested(treatment)
            || alternative_requested(CHOLECYSTECTOMY_PHRASES, treatment)
        {
            scores.request("Cholecystectomy");
        }

        if supportive_care_requested(treatment) {
            scores.request("Support");
        }

        score_antibiotics(treatment, scores);
    }
}
