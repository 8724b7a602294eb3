use std::collections::BTreeMap;

use cdx_core::config::DiagnosisConfig;
use cdx_core::models::action::{ActionInput, AgentAction, ImagingStudy, ToolKind};
use cdx_core::models::reference::ReferenceBundle;
use cdx_eval::diagnosis::score_diagnosis;
use cdx_eval::pathologies::diverticulitis::Diverticulitis;
use cdx_eval::{Evaluator, Pathology, TreatmentScores};

fn treatments(treatment: &str, reference: &ReferenceBundle) -> TreatmentScores {
    let mut scores = TreatmentScores::with_defaults(Diverticulitis.treatment_defaults());
    Diverticulitis.score_treatment(treatment, reference, &mut scores);
    scores
}

fn flags(entries: &[(&str, bool)]) -> BTreeMap<String, bool> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn diagnosis_scoring() {
    for (diagnosis, expected) in [
        ("Acute Diverticulitis", (true, true)),
        ("Inflammed diverticula", (true, true)),
        ("Diverticulosis", (false, false)),
        ("Diverticulum", (false, false)),
        ("Diverticula", (false, false)),
        ("Sigmoid perforation", (false, true)),
        ("Sigmoid colitis", (false, true)),
    ] {
        let score = score_diagnosis(&Diverticulitis, diagnosis, 90);
        assert_eq!((score.diagnosis, score.gracious), expected, "{diagnosis:?}");
    }
}

#[test]
fn ct_is_preferred() {
    let evaluator = Evaluator::for_pathology("diverticulitis", DiagnosisConfig::default()).unwrap();
    let scan = |modality: &str| {
        AgentAction::new(
            ToolKind::Imaging,
            ActionInput::Imaging(ImagingStudy::new(modality, "Abdomen")),
            "",
            0,
        )
    };
    let reference = ReferenceBundle::default();
    assert_eq!(
        evaluator.evaluate(&[scan("CT")], "", &reference).scores.imaging,
        2
    );
    assert_eq!(
        evaluator
            .evaluate(&[scan("Ultrasound"), scan("CT")], "", &reference)
            .scores
            .imaging,
        1
    );
}

#[test]
fn drainage_from_codes() {
    let by_icd9 = ReferenceBundle {
        procedures_icd9: vec![5491],
        ..Default::default()
    };
    let scores = treatments("Diverticular drainage", &by_icd9);
    assert_eq!(scores.required["Drainage"], true);
    assert_eq!(scores.requested["Drainage"], true);

    let by_icd10 = ReferenceBundle {
        procedures_icd10: vec!["0W9G30Z".into()],
        ..Default::default()
    };
    let scores = treatments("Pericolonic drainage", &by_icd10);
    assert_eq!(scores.required["Drainage"], true);
    assert_eq!(scores.requested["Drainage"], true);
}

#[test]
fn drainage_from_discharge_needs_a_diverticular_site() {
    let abdominal = ReferenceBundle {
        procedures_discharge: vec!["Drainage of intra-abdominal space".into()],
        ..Default::default()
    };
    assert_eq!(
        treatments("Drain the pelvic abscess", &abdominal).required["Drainage"],
        true
    );

    let chest = ReferenceBundle {
        procedures_discharge: vec!["Drainage of chest".into()],
        ..Default::default()
    };
    let scores = treatments("Drain the pelvic abscess", &chest);
    assert_eq!(scores.required["Drainage"], false);
    assert_eq!(scores.requested["Drainage"], true);
}

#[test]
fn drainage_requested_without_being_required() {
    for treatment in ["Sigmoid colon drainage", "Drain the abscess"] {
        let scores = treatments(treatment, &ReferenceBundle::default());
        assert_eq!(scores.requested["Drainage"], true, "{treatment:?}");
        assert_eq!(scores.required["Drainage"], false);
    }
}

#[test]
fn colectomy_required_from_codes_and_discharge() {
    let references = [
        ReferenceBundle {
            procedures_icd10: vec!["0DBM8ZZ".into()],
            ..Default::default()
        },
        ReferenceBundle {
            procedures_icd9: vec![4542],
            ..Default::default()
        },
        ReferenceBundle {
            procedures_discharge: vec!["COLECTOMY".into()],
            ..Default::default()
        },
    ];
    for reference in &references {
        let scores = treatments("Colectomy", reference);
        assert_eq!(scores.required["Colectomy"], true);
        assert_eq!(scores.requested["Colectomy"], true);
    }
    assert_eq!(
        treatments("Colectomy", &ReferenceBundle::default()).required["Colectomy"],
        false
    );
}

#[test]
fn colon_removal_counts_as_colectomy() {
    let scores = treatments("Surgical removal parts of the colon.", &ReferenceBundle::default());
    assert_eq!(
        scores.requested,
        flags(&[
            ("Colonoscopy", false),
            ("Antibiotics", false),
            ("Support", false),
            ("Drainage", false),
            ("Colectomy", true),
        ])
    );
}

#[test]
fn every_treatment() {
    let reference = ReferenceBundle {
        procedures_icd9: vec![4542, 5491],
        ..Default::default()
    };
    let scores = treatments(
        "Colonoscopy, Antibiotics, Drain the abdomen, Colectomy, Monitoring, Fluids, Analgesia",
        &reference,
    );
    let all = flags(&[
        ("Colonoscopy", true),
        ("Antibiotics", true),
        ("Support", true),
        ("Drainage", true),
        ("Colectomy", true),
    ]);
    assert_eq!(scores.requested, all);
    assert_eq!(scores.required, all);
}
