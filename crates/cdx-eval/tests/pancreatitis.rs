use cdx_core::config::DiagnosisConfig;
use cdx_core::models::action::{ActionInput, AgentAction, ImagingStudy, LabTerm, ToolKind};
use cdx_core::models::reference::ReferenceBundle;
use cdx_eval::diagnosis::score_diagnosis;
use cdx_eval::pathologies::pancreatitis::Pancreatitis;
use cdx_eval::{Evaluator, Pathology, TreatmentScores};

fn treatments(treatment: &str, reference: &ReferenceBundle) -> TreatmentScores {
    let mut scores = TreatmentScores::with_defaults(Pancreatitis.treatment_defaults());
    Pancreatitis.score_treatment(treatment, reference, &mut scores);
    scores
}

fn scan(modality: &str) -> AgentAction {
    AgentAction::new(
        ToolKind::Imaging,
        ActionInput::Imaging(ImagingStudy::new(modality, "Abdomen")),
        "",
        0,
    )
}

fn evaluator() -> Evaluator {
    Evaluator::for_pathology("pancreatitis", DiagnosisConfig::default()).unwrap()
}

fn biliary() -> ReferenceBundle {
    ReferenceBundle {
        discharge_diagnosis: "Biliary acute pancreatitis".into(),
        icd_diagnoses: vec!["Biliary acute pancreatitis".into()],
        ..Default::default()
    }
}

#[test]
fn diagnosis_scoring() {
    for (diagnosis, expected) in [
        ("Acute Pancreatitis", true),
        ("Pancreatic inflammation", true),
        ("Necrotizing pancreatitis", true),
        ("Pancreas", false),
        ("Pancreatolithiasis", false),
    ] {
        let score = score_diagnosis(&Pancreatitis, diagnosis, 90);
        assert_eq!(score.diagnosis, expected, "{diagnosis:?}");
    }
}

#[test]
fn severity_markers_form_their_own_category() {
    let labs = AgentAction::new(
        ToolKind::LaboratoryTests,
        ActionInput::LabTests(
            [50867, 50956, 50824, 51000]
                .into_iter()
                .map(LabTerm::Identifier)
                .collect(),
        ),
        "",
        0,
    );
    let evaluation = evaluator().evaluate(&[labs], "", &ReferenceBundle::default());
    assert_eq!(evaluation.scores.laboratory_tests, 2);
    assert_eq!(
        evaluation.answers.correct_laboratory_tests["Pancreas"],
        vec![50867, 50956]
    );
    assert_eq!(
        evaluation.answers.correct_laboratory_tests["Seriousness"],
        vec![50824, 51000]
    );
    assert!(evaluation.answers.correct_laboratory_tests["Inflammation"].is_empty());
}

#[test]
fn eus_is_neutral_without_biliary_cause() {
    let reference = ReferenceBundle {
        discharge_diagnosis: "Acute pancreatitis".into(),
        ..Default::default()
    };
    let evaluation = evaluator().evaluate(&[scan("EUS")], "", &reference);
    assert_eq!(evaluation.scores.imaging, 0);
    assert_eq!(evaluation.answers.correct_imaging.len(), 1);
}

#[test]
fn eus_adds_a_point_for_biliary_cause() {
    let evaluation = evaluator().evaluate(&[scan("Ultrasound"), scan("EUS")], "", &biliary());
    assert_eq!(evaluation.scores.imaging, 3);
}

#[test]
fn supportive_care_needs_fluids_pain_control_and_monitoring() {
    let full = "Supportive care is essential. Provide plenty of fluids and manage pain with \
                analgesics. Ensure adequate nutrition and continuous monitoring of vital signs.";
    assert_eq!(treatments(full, &ReferenceBundle::default()).requested["Support"], true);

    let unmonitored = "Supportive care is essential. Provide plenty of fluids and manage pain \
                       with analgesics. Ensure adequate nutrition.";
    assert_eq!(
        treatments(unmonitored, &ReferenceBundle::default()).requested["Support"],
        false
    );
    assert_eq!(
        treatments("Support patient with pain killers.", &ReferenceBundle::default()).requested
            ["Support"],
        false
    );
}

#[test]
fn drainage_required_from_discharge_procedures() {
    let reference = ReferenceBundle {
        procedures_discharge: vec!["PELVIC ABSCESS DRAIN".into()],
        ..Default::default()
    };
    let scores = treatments("Drain the peritoneal abscess", &reference);
    assert_eq!(scores.required["Drainage"], true);
    assert_eq!(scores.requested["Drainage"], true);
}

#[test]
fn drainage_required_from_pancreatic_codes() {
    let reference = ReferenceBundle {
        procedures_icd10: vec!["0F9G30Z".into()],
        ..Default::default()
    };
    assert_eq!(treatments("", &reference).required["Drainage"], true);
}

#[test]
fn drainage_needs_a_site() {
    let scores = treatments("Drain", &ReferenceBundle::default());
    assert_eq!(scores.requested["Drainage"], false);

    let scores = treatments("Drainage of pancreatic abscess", &ReferenceBundle::default());
    assert_eq!(scores.requested["Drainage"], true);
}

#[test]
fn cholecystectomy_only_counts_for_biliary_cause() {
    let scores = treatments("Cholecystectomy", &ReferenceBundle::default());
    assert_eq!(scores.required["Cholecystectomy"], false);
    assert_eq!(scores.requested["Cholecystectomy"], false);

    let scores = treatments("Cholecystectomy", &biliary());
    assert_eq!(scores.required["Cholecystectomy"], true);
    assert_eq!(scores.requested["Cholecystectomy"], true);
}

#[test]
fn ercp_required_and_requested() {
    let reference = ReferenceBundle {
        procedures_icd9: vec![5110],
        ..Default::default()
    };
    let scores = treatments("ERCP", &reference);
    assert_eq!(scores.required["ERCP"], true);
    assert_eq!(scores.requested["ERCP"], true);

    let scores = treatments("Antibiotics", &ReferenceBundle::default());
    assert_eq!(scores.requested["ERCP"], false);
}
