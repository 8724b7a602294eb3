use cdx_core::models::action::ImagingStudy;
use cdx_core::models::record::ScoreRecord;
use cdx_core::models::reference::ReferenceBundle;
use cdx_vocab::curated::{
    COMPLETE_BLOOD_COUNT, INFLAMMATION, LIVER_FUNCTION_PANEL, RENAL_FUNCTION_PANEL, URINALYSIS,
};

use super::ABDOMEN;
use super::cholecystitis::CHOLECYSTECTOMY_PHRASES;
use crate::codes::{
    CHOLECYSTECTOMY, DRAINAGE, DRAINAGE_KEYWORDS, ERCP, PANCREATIC_DRAINAGE_ICD10,
};
use crate::keyword_positive;
use crate::procedures::{
    AlternativeName, alternative_requested, diagnosis_mentions, keywords_performed,
};
use crate::{LabCategory, Pathology, TreatmentScores, award_first_imaging, neutral_from_panels};

const ALTERNATIVES: &[AlternativeName] = &[AlternativeName::new(
    "pancrea",
    &["gangren", "infect", "inflam", "abscess", "necros"],
)];

const LAB_CATEGORIES: &[LabCategory] = &[
    LabCategory {
        name: "Inflammation",
        tests: INFLAMMATION,
    },
    LabCategory {
        name: "Pancreas",
        tests: &[
            50867, // Amylase
            50956, // Lipase
        ],
    },
    LabCategory {
        name: "Seriousness",
        tests: &[
            51480, 50810, 51221, 51638, // Hematocrit
            51006, 52647, // Urea Nitrogen
            51000, // Triglycerides
            50893, // Calcium, Total
            50824, 52623, 50983, // Sodium
            52610, 50971, 50822, // Potassium
        ],
    },
];

const DRAINAGE_LOCATIONS: &[&str] = &[
    "abscess",
    "abdom",
    "pelvic",
    "peritoneal",
    "pancrea",
    "gallbladder",
    "biliary",
    "bile duct",
    "perirectal",
];

const DRAINAGE_PHRASES: &[AlternativeName] = &[
    AlternativeName::new("abscess", DRAINAGE_KEYWORDS),
    AlternativeName::new("abdom", DRAINAGE_KEYWORDS),
    AlternativeName::new("pelvic", DRAINAGE_KEYWORDS),
    AlternativeName::new("peritoneal", DRAINAGE_KEYWORDS),
    AlternativeName::new("pancrea", DRAINAGE_KEYWORDS),
    AlternativeName::new("gallbladder", DRAINAGE_KEYWORDS),
    AlternativeName::new("biliary", DRAINAGE_KEYWORDS),
    AlternativeName::new("bile duct", DRAINAGE_KEYWORDS),
    AlternativeName::new("perirectal", DRAINAGE_KEYWORDS),
];

/// Acute pancreatitis. Severity markers form their own lab category, and
/// a biliary cause makes endoscopic ultrasound and cholecystectomy part of
/// the guideline.
pub struct Pancreatitis;

impl Pancreatitis {
    fn biliary(reference: &ReferenceBundle) -> bool {
        diagnosis_mentions(reference, "biliary")
    }
}

impl Pathology for Pancreatitis {
    fn name(&self) -> &str {
        "pancreatitis"
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
        &[
            ("Support", true),
            ("Drainage", false),
            ("ERCP", false),
            ("Cholecystectomy", false),
        ]
    }

    fn score_imaging(
        &self,
        study: &ImagingStudy,
        scores: &mut ScoreRecord,
        reference: &ReferenceBundle,
    ) -> bool {
        if study.region != ABDOMEN {
            return false;
        }
        match study.modality.as_str() {
            "Ultrasound" => award_first_imaging(scores, 2),
            "CT" => award_first_imaging(scores, 1),
            // Neutral unless the cause is biliary, then on top of other scans.
            "EUS" => {
                if Self::biliary(reference) {
                    scores.imaging += 1;
                }
            }
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
        let supported = keyword_positive(treatment, "fluid")
            && (keyword_positive(treatment, "analgesi") || keyword_positive(treatment, "pain"))
            && keyword_positive(treatment, "monitor");
        if supported {
            scores.request("Support");
        }

        let discharge = &reference.procedures_discharge;
        if DRAINAGE.performed(reference)
            || keywords_performed(PANCREATIC_DRAINAGE_ICD10, &reference.procedures_icd10)
            || (keywords_performed(DRAINAGE_KEYWORDS, discharge)
                && keywords_performed(DRAINAGE_LOCATIONS, discharge))
        {
            scores.require("Drainage");
        }
        if alternative_requested(DRAINAGE_PHRASES, treatment) {
            scores.request("Drainage");
        }

        if Self::biliary(reference) {
            // Removal once the episode settles, to prevent recurrence.
            scores.require("Cholecystectomy");
            if CHOLECYSTECTOMY.requested(treatment)
                || alternative_requested(CHOLECYSTECTOMY_PHRASES, treatment)
            {
                scores.request("Cholecystectomy");
            }
        }

        if ERCP.performed(reference) {
            scores.require("ERCP");
        }
        if ERCP.requested(treatment) {
            scores.request("ERCP");
        }
    }
}
