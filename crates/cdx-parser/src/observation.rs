//! What the model sees after each action.

use std::collections::HashMap;

use cdx_core::config::DiagnosisConfig;
use cdx_core::models::action::{ActionInput, AgentAction, ImagingStudy, LabTerm, ToolKind};
use cdx_core::models::patient::PatientRecord;
use cdx_vocab::Vocabulary;
use cdx_vocab::fuzzy::{Scorer, extract_one};
use cdx_vocab::imaging::broad_modality;

pub const INVALID_ACTION_OBSERVATION: &str = "Provide a diagnosis and treatment OR a valid tool. \
     That is not a valid tool, try one of [Physical Examination, Laboratory Tests, Imaging, \
     Diagnostic Criteria].";

const CRITERIA: &[(&str, &str)] = &[
    (
        "appendicitis",
        "To diagnose appendicitis consider the following criteria: General symptoms usually \
         include pain around the naval that shifts to the right lower quadrant (RLQ) of the \
         abdomen, accompanied by fever and nausea or vomiting. During a physical examination, a \
         patient might show RLQ tenderness, positive rebound tenderness, or signs of \
         peritonitis. Laboratory tests may reveal signs of an inflammatory response, such as an \
         elevated white blood cell count and elevated C-reactive protein levels. Imaging may \
         disclose an enlarged appendix or possibly an appendicolith.",
    ),
    (
        "cholecystitis",
        "To diagnose cholecystitis, consider the following criteria: General symptoms usually \
         include pain in the right upper quadrant (RUQ) of the abdomen, fever, and nausea. \
         During a physical examination, a patient might display RUQ tenderness or indications \
         of jaundice. Laboratory tests may reveal signs of inflammation, such as elevated white \
         blood cell count and C-reactive protein levels, liver damage, indicated through \
         heightened Alanine Aminotransferase (ALT) or Asparate Aminotransferase (AST) levels, \
         or gallbladder damage, indicated through heightened Bilirubin or Gamma \
         Glutamyltransferase levels. Imaging may show gallstones, thickened gallbladder walls, \
         pericholecystic fluid, and a distended gallbladder.",
    ),
    (
        "diverticulitis",
        "To diagnose diverticulitis consider the following criteria: General symptoms typically \
         encompass abdominal pain, primarily in the left lower quadrant (LLQ), along with fever, \
         and nausea or vomiting. During a physical examination, a patient may display \
         tenderness in the LLQ, fever, and signs of peritonitis. Laboratory tests often reveal \
         signs of inflammation and infection, which may include an elevated white blood cell \
         count and elevated C-reactive protein levels. Imaging findings often include bowel \
         wall thickening, diverticula, inflammation, or abscesses around the affected segment \
         of the colon.",
    ),
    (
        "pancreatitis",
        "To diagnose pancreatitis consider the following criteria: General symptoms usually \
         include abdominal pain, primarily in the epigastric region, along with nausea or \
         vomiting. During a physical examination, a patient might display epigastric \
         tenderness, fever, and signs of jaundice. Laboratory tests may reveal signs of \
         inflammation, such as elevated white blood cell count and C-reactive protein levels, \
         and pancreatic damage, indicated through heightened Amylase or Lipase levels. Further \
         lab tests of hematocrit, urea nitrogen, triglycerides, calcium, sodium and potassium \
         can indicate the severity of the disease. Imaging may show inflammation of the \
         pancreas or fluid collection.",
    ),
];

/// How many reports of each requested scan have already been returned in
/// the current case. One ledger per case.
#[derive(Debug, Clone, Default)]
pub struct ImagingLedger {
    returned: HashMap<ImagingStudy, usize>,
}

impl ImagingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returned(&self, study: &ImagingStudy) -> usize {
        self.returned.get(study).copied().unwrap_or(0)
    }

    fn record(&mut self, study: &ImagingStudy) {
        *self.returned.entry(study.clone()).or_insert(0) += 1;
    }
}

/// Render the observation for `action` against one patient's record.
pub fn render_observation(
    action: &AgentAction,
    patient: &PatientRecord,
    vocabulary: &Vocabulary,
    config: &DiagnosisConfig,
    ledger: &mut ImagingLedger,
) -> String {
    let tool = action.tool();
    if tool == ToolKind::Invalid {
        return INVALID_ACTION_OBSERVATION.to_string();
    }

    let body = match action.input() {
        ActionInput::LabTests(terms) => render_lab_tests(terms, patient, vocabulary),
        ActionInput::Imaging(study) => render_imaging(study, patient, ledger),
        ActionInput::Pathologies(names) => {
            render_diagnostic_criteria(names, config.criteria_match_threshold)
        }
        ActionInput::None => render_physical_examination(patient),
    };
    format!("{}:\n{body}", tool.name())
}

pub fn render_physical_examination(patient: &PatientRecord) -> String {
    let text = patient
        .physical_examination
        .as_deref()
        .unwrap_or("Not available.");
    format!("{text}\n")
}

/// One line per requested test the patient has a result for. Tests that
/// could not be resolved are reported as unavailable.
pub fn render_lab_tests(terms: &[LabTerm], patient: &PatientRecord, vocabulary: &Vocabulary) -> String {
    let mut out = String::new();
    for term in terms {
        match term {
            LabTerm::Identifier(id) => {
                let label = vocabulary
                    .label_of(*id)
                    .map_or_else(|| id.to_string(), str::to_string);
                if let Some(value) = patient.laboratory_tests.get(id) {
                    match vocabulary.fluid_of(*id) {
                        Some(fluid) => out.push_str(&format!("({fluid}) {label}: {value}\n")),
                        None => out.push_str(&format!("{label}: {value}\n")),
                    }
                } else if let Some(value) = patient.microbiology.get(id) {
                    out.push_str(&format!("(Microbiology) {label}: {value}\n"));
                }
            }
            LabTerm::Unresolved(raw) => out.push_str(&format!("{raw}: N/A\n")),
        }
    }
    out
}

/// The next unreturned report for the requested scan. A specific procedure
/// also matches reports filed under its broad modality.
pub fn render_imaging(
    study: &ImagingStudy,
    patient: &PatientRecord,
    ledger: &mut ImagingLedger,
) -> String {
    let requested = format!("{} {}", study.region, study.modality);
    let mut skip = ledger.returned(study);
    let mut exhausted = false;

    for report in &patient.radiology {
        let modality_matches = report.modality == study.modality
            || broad_modality(&report.modality) == study.modality;
        if !modality_matches || report.region != study.region {
            continue;
        }
        if skip == 0 {
            ledger.record(study);
            return format!("{requested}: {}\n", report.report);
        }
        exhausted = true;
        skip -= 1;
    }

    let message = if exhausted {
        "Cannot repeat this scan anymore. Try a different imaging modality."
    } else {
        "Not available. Try a different imaging modality."
    };
    format!("{requested}: {message}\n")
}

/// Criteria for each named pathology, matched loosely against the known
/// ones. A match must score at least `threshold`.
pub fn render_diagnostic_criteria(names: &[String], threshold: u32) -> String {
    let mut out = String::new();
    for name in names {
        let known = extract_one(name, CRITERIA.iter().map(|(n, _)| *n), Scorer::WRatio)
            .filter(|m| m.score >= threshold)
            .map(|m| CRITERIA[m.index].1);
        match known {
            Some(criteria) => out.push_str(&format!("{criteria}\n")),
            None => {
                tracing::warn!(pathology = %name, "no diagnostic criteria available");
                out.push_str(&format!("Diagnostic criteria for {name} is not available.\n"));
            }
        }
    }
    out
}
