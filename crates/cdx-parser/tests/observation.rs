use std::collections::BTreeMap;

use cdx_core::config::DiagnosisConfig;
use cdx_core::models::action::{ActionInput, AgentAction, ImagingStudy, LabTerm, ToolKind};
use cdx_core::models::patient::{PatientRecord, RadiologyReport};
use cdx_parser::observation::{
    INVALID_ACTION_OBSERVATION, render_diagnostic_criteria, render_imaging, render_lab_tests,
};
use cdx_parser::{ImagingLedger, render_observation};
use cdx_vocab::Vocabulary;

fn report(modality: &str, region: &str, text: &str) -> RadiologyReport {
    RadiologyReport {
        modality: modality.into(),
        region: region.into(),
        report: text.into(),
    }
}

fn patient() -> PatientRecord {
    PatientRecord {
        physical_examination: Some("Tender RLQ.".into()),
        laboratory_tests: BTreeMap::from([(50867, "120 IU/L".into()), (50956, "45 IU/L".into())]),
        microbiology: BTreeMap::from([(90201, "No growth".into())]),
        radiology: vec![
            report("Ultrasound", "Abdomen", "Gallstones."),
            report("CT", "Abdomen", "Dilated appendix."),
            report("Ultrasound", "Abdomen", "Unchanged gallstones."),
        ],
    }
}

#[test]
fn physical_examination_with_header() {
    let vocab = Vocabulary::bundled().unwrap();
    let action = AgentAction::new(ToolKind::PhysicalExamination, ActionInput::None, "", 0);
    let text = render_observation(
        &action,
        &patient(),
        &vocab,
        &DiagnosisConfig::default(),
        &mut ImagingLedger::new(),
    );
    assert_eq!(text, "Physical Examination:\nTender RLQ.\n");
}

#[test]
fn missing_physical_examination() {
    let vocab = Vocabulary::bundled().unwrap();
    let action = AgentAction::new(ToolKind::PhysicalExamination, ActionInput::None, "", 0);
    let text = render_observation(
        &action,
        &PatientRecord::default(),
        &vocab,
        &DiagnosisConfig::default(),
        &mut ImagingLedger::new(),
    );
    assert_eq!(text, "Physical Examination:\nNot available.\n");
}

#[test]
fn lab_results_in_request_order() {
    let vocab = Vocabulary::bundled().unwrap();
    let terms = vec![
        LabTerm::Identifier(50956),
        LabTerm::Identifier(50867),
        // Resolved but never measured for this patient.
        LabTerm::Identifier(51300),
        LabTerm::Identifier(90201),
        LabTerm::Unresolved("CBD".into()),
    ];
    assert_eq!(
        render_lab_tests(&terms, &patient(), &vocab),
        "(Blood) Lipase: 45 IU/L\n\
         (Blood) Amylase: 120 IU/L\n\
         (Microbiology) Blood Culture, Routine: No growth\n\
         CBD: N/A\n"
    );
}

#[test]
fn repeated_scans_return_later_reports_then_stop() {
    let patient = patient();
    let mut ledger = ImagingLedger::new();
    let us = ImagingStudy::new("Ultrasound", "Abdomen");

    assert_eq!(
        render_imaging(&us, &patient, &mut ledger),
        "Abdomen Ultrasound: Gallstones.\n"
    );
    assert_eq!(
        render_imaging(&us, &patient, &mut ledger),
        "Abdomen Ultrasound: Unchanged gallstones.\n"
    );
    assert_eq!(
        render_imaging(&us, &patient, &mut ledger),
        "Abdomen Ultrasound: Cannot repeat this scan anymore. Try a different imaging modality.\n"
    );
    assert_eq!(ledger.returned(&us), 2);
}

#[test]
fn unavailable_scan() {
    let mut ledger = ImagingLedger::new();
    let mri = ImagingStudy::new("MRI", "Abdomen");
    assert_eq!(
        render_imaging(&mri, &patient(), &mut ledger),
        "Abdomen MRI: Not available. Try a different imaging modality.\n"
    );
    assert_eq!(ledger.returned(&mri), 0);
}

#[test]
fn specific_procedure_matches_its_broad_modality() {
    let mut patient = patient();
    patient.radiology.push(report("EUS", "Abdomen", "Small stones in the duct."));
    let mut ledger = ImagingLedger::new();
    let text = render_imaging(&ImagingStudy::new("Ultrasound", "Abdomen"), &patient, &mut ledger);
    assert_eq!(text, "Abdomen Ultrasound: Gallstones.\n");

    let eus = ImagingStudy::new("EUS", "Abdomen");
    assert_eq!(
        render_imaging(&eus, &patient, &mut ledger),
        "Abdomen EUS: Small stones in the duct.\n"
    );
}

#[test]
fn criteria_for_known_and_unknown_pathologies() {
    let text = render_diagnostic_criteria(&["appendicits".into(), "migraine".into()], 80);
    assert!(text.starts_with("To diagnose appendicitis consider the following criteria:"));
    assert!(text.contains("possibly an appendicolith.\n"));
    assert!(text.ends_with("Diagnostic criteria for migraine is not available.\n"));
}

#[test]
fn criteria_match_qualified_names() {
    let text = render_diagnostic_criteria(&["acute pancreatitis".into()], 80);
    assert!(text.starts_with("To diagnose pancreatitis consider the following criteria:"));
    assert!(text.contains("heightened Amylase or Lipase levels."));
}

#[test]
fn invalid_action_observation() {
    let vocab = Vocabulary::bundled().unwrap();
    let action = AgentAction::invalid("gibberish", 0);
    let text = render_observation(
        &action,
        &patient(),
        &vocab,
        &DiagnosisConfig::default(),
        &mut ImagingLedger::new(),
    );
    assert_eq!(text, INVALID_ACTION_OBSERVATION);
    assert!(text.ends_with(
        "try one of [Physical Examination, Laboratory Tests, Imaging, Diagnostic Criteria]."
    ));
}

#[test]
fn criteria_threshold_comes_from_config() {
    let vocab = Vocabulary::bundled().unwrap();
    let action = AgentAction::new(
        ToolKind::DiagnosticCriteria,
        ActionInput::Pathologies(vec!["appendicits".into()]),
        "",
        0,
    );
    let strict = DiagnosisConfig {
        criteria_match_threshold: 100,
        ..DiagnosisConfig::default()
    };
    let text = render_observation(
        &action,
        &patient(),
        &vocab,
        &strict,
        &mut ImagingLedger::new(),
    );
    assert_eq!(
        text,
        "Diagnostic Criteria:\nDiagnostic criteria for appendicits is not available.\n"
    );
}
