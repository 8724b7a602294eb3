use std::sync::Arc;

use cdx_core::config::DiagnosisConfig;
use cdx_core::models::action::{ActionInput, AgentAction, ImagingStudy, LabTerm, ToolKind};
use cdx_parser::{ActionParser, InvalidReason, ParseOutcome};
use cdx_vocab::Vocabulary;
use cdx_vocab::curated::COMPLETE_BLOOD_COUNT;

fn parser() -> ActionParser {
    let vocab = Arc::new(Vocabulary::bundled().unwrap());
    ActionParser::new(vocab, DiagnosisConfig::default())
}

fn action(text: &str) -> AgentAction {
    match parser().parse(text) {
        ParseOutcome::Action(action) => action,
        other => panic!("expected an action for {text:?}, got {other:?}"),
    }
}

fn invalid(text: &str) -> (u32, InvalidReason) {
    match parser().parse(text) {
        ParseOutcome::Invalid(invalid) => (invalid.repair_count, invalid.reason),
        other => panic!("expected an invalid outcome for {text:?}, got {other:?}"),
    }
}

fn labs(ids: &[u32]) -> ActionInput {
    ActionInput::LabTests(ids.iter().copied().map(LabTerm::Identifier).collect())
}

fn imaging(modality: &str, region: &str) -> ActionInput {
    ActionInput::Imaging(ImagingStudy::new(modality, region))
}

fn assert_action(text: &str, tool: ToolKind, input: ActionInput, repairs: u32) {
    let parsed = action(text);
    assert_eq!(parsed.tool(), tool, "{text:?}");
    assert_eq!(parsed.input(), &input, "{text:?}");
    assert_eq!(parsed.repair_count(), repairs, "{text:?}");
    assert_eq!(parsed.raw_log(), text);
}

// Amylase, Lipase, then the closed Sodium class.
const AMYLASE_LIPASE_SODIUM: &[u32] = &[50867, 50956, 50824, 50983, 52623];

#[test]
fn vanilla_imaging() {
    assert_action(
        "Action: Imaging\nAction Input: CT Abdomen",
        ToolKind::Imaging,
        imaging("CT", "Abdomen"),
        0,
    );
}

#[test]
fn physical_examination_takes_no_input() {
    assert_action(
        "Action: Physical Examination",
        ToolKind::PhysicalExamination,
        ActionInput::None,
        0,
    );
}

#[test]
fn abbreviated_tool_name_is_repaired() {
    assert_action(
        "Action: Physical Exam",
        ToolKind::PhysicalExamination,
        ActionInput::None,
        1,
    );
}

#[test]
fn final_diagnosis_finishes() {
    let text = "Final Diagnosis: Appendicitis\nTreatment: Appendectomy";
    assert_eq!(
        parser().parse(text),
        ParseOutcome::Finish {
            answer: text.to_string()
        }
    );
}

#[test]
fn diagnosis_marker_anywhere_finishes() {
    let text = "Action: Imaging\nAction Input: CT Abdomen\nThought: done.\ndiagnosis: Appendicitis";
    assert!(parser().parse(text).is_finish());
}

#[test]
fn lab_lists_with_comma_and_newline_separators() {
    for text in [
        "Action: Laboratory Tests\nAction Input: Amylase, Lipase, Sodium",
        "Action: Laboratory Tests\nAction Input: Amylase, Lipase, and Sodium",
        "Action: Laboratory Tests\nAction Input: Amylase, Lipase and Sodium",
        "Action: Laboratory Tests\nAction Input: Amylase\nLipase\nSodium",
    ] {
        assert_action(text, ToolKind::LaboratoryTests, labs(AMYLASE_LIPASE_SODIUM), 0);
    }
}

#[test]
fn request_noise_words_are_stripped() {
    assert_action(
        "Action: Laboratory Tests\nAction Input: Order a CBC",
        ToolKind::LaboratoryTests,
        labs(COMPLETE_BLOOD_COUNT),
        1,
    );
    assert_action(
        "Action: Laboratory Tests\nAction Input: Amylase levels",
        ToolKind::LaboratoryTests,
        labs(&[50867]),
        1,
    );
    assert_action(
        "Action: Laboratory Tests\nAction Input: Repeat lipase",
        ToolKind::LaboratoryTests,
        labs(&[50956]),
        1,
    );
}

#[test]
fn repeated_tests_are_deduplicated() {
    assert_action(
        "Action: Laboratory Tests\nAction Input: Amylase, amylase",
        ToolKind::LaboratoryTests,
        labs(&[50867]),
        0,
    );
}

#[test]
fn curated_synonyms_resolve() {
    let cases: &[(&str, &[u32])] = &[
        ("pregnancy test", &[51085, 52720]),
        ("CRP", &[50889]),
        ("Double Stranded DNA", &[50918]),
        ("WBC Count", &[51300, 51301, 51755]),
    ];
    for (input, ids) in cases {
        assert_action(
            &format!("Action: Laboratory Tests\nAction Input: {input}"),
            ToolKind::LaboratoryTests,
            labs(ids),
            0,
        );
    }
}

#[test]
fn unresolved_lab_terms_travel_with_resolved_ones() {
    assert_action(
        "Action: Laboratory Tests\nAction Input: Blood culture, CBD",
        ToolKind::LaboratoryTests,
        ActionInput::LabTests(vec![
            LabTerm::Identifier(90201),
            LabTerm::Unresolved("CBD".into()),
        ]),
        0,
    );
}

#[test]
fn dash_moves_the_rest_into_the_input() {
    assert_action(
        "Action: Imaging - Upper GI Series\nAction Input: No contrast",
        ToolKind::Imaging,
        imaging("Upper GI Series", "Abdomen"),
        1,
    );
    assert_action(
        "Action: Laboratory Tests - Amylase",
        ToolKind::LaboratoryTests,
        labs(&[50867]),
        2,
    );
    assert_action(
        "Action: Imaging - Abdominal Ultrasound\nAction Input: None",
        ToolKind::Imaging,
        imaging("Ultrasound", "Abdomen"),
        1,
    );
}

#[test]
fn lab_aliases() {
    assert_action(
        "Action: Labs\nAction Input: Lipase",
        ToolKind::LaboratoryTests,
        labs(&[50956]),
        1,
    );
    assert_action(
        "Action: Labs - Amylase",
        ToolKind::LaboratoryTests,
        labs(&[50867]),
        3,
    );
    assert_action(
        "Action: Blood work\nAction Input: CBC",
        ToolKind::LaboratoryTests,
        labs(COMPLETE_BLOOD_COUNT),
        1,
    );
}

#[test]
fn misspelled_tool_is_repaired() {
    assert_action(
        "Action: Imagin\nAction Input: CT Abdomen",
        ToolKind::Imaging,
        imaging("CT", "Abdomen"),
        1,
    );
}

#[test]
fn markers_on_their_own_lines() {
    assert_action(
        "Action:\nImaging\nAction Input:\nCT Abdomen",
        ToolKind::Imaging,
        imaging("CT", "Abdomen"),
        0,
    );
    assert_action(
        "Action: Imaging. Action Input: CT Abdomen",
        ToolKind::Imaging,
        imaging("CT", "Abdomen"),
        0,
    );
}

#[test]
fn bare_input_marker_is_repaired() {
    assert_action(
        "Action: Imaging\nInput: CT Abdomen",
        ToolKind::Imaging,
        imaging("CT", "Abdomen"),
        1,
    );
    assert_action(
        "Action: Laboratory Tests\nInput: Amylase",
        ToolKind::LaboratoryTests,
        labs(&[50867]),
        1,
    );
}

#[test]
fn imaging_request_written_as_the_action() {
    assert_action(
        "Action: CT Abdomen",
        ToolKind::Imaging,
        imaging("CT", "Abdomen"),
        2,
    );
    assert_action(
        "Action: Do a CT of the Abdomen",
        ToolKind::Imaging,
        imaging("CT", "Abdomen"),
        2,
    );
    assert_action(
        "Action: Echo Endoscopy",
        ToolKind::Imaging,
        imaging("EUS", "Abdomen"),
        2,
    );
    assert_action(
        "Action: Imaging - Ultrasound Abdomen",
        ToolKind::Imaging,
        imaging("Ultrasound", "Abdomen"),
        2,
    );
}

#[test]
fn lab_request_written_as_the_action() {
    assert_action(
        "Action: Amylase, Lipase, and Sodium",
        ToolKind::LaboratoryTests,
        labs(AMYLASE_LIPASE_SODIUM),
        2,
    );
}

#[test]
fn specific_procedures_imply_the_abdomen() {
    for (input, modality) in [
        ("EUS", "EUS"),
        ("HIDA scan", "HIDA"),
        ("MRCP", "MRCP"),
        ("ERCP", "ERCP"),
        ("Upper GI series", "Upper GI Series"),
    ] {
        assert_action(
            &format!("Action: Imaging\nAction Input: {input}"),
            ToolKind::Imaging,
            imaging(modality, "Abdomen"),
            0,
        );
    }
}

#[test]
fn region_order_does_not_matter() {
    assert_action(
        "Action: Imaging\nAction Input: Abdomen CT",
        ToolKind::Imaging,
        imaging("CT", "Abdomen"),
        0,
    );
}

#[test]
fn diagnostic_criteria_names() {
    assert_action(
        "Action: Diagnostic Criteria\nAction Input: appendicitis and pancreatitis",
        ToolKind::DiagnosticCriteria,
        ActionInput::Pathologies(vec!["appendicitis".into(), "pancreatitis".into()]),
        0,
    );
}

#[test]
fn no_action_marker_is_invalid_without_repairs() {
    assert_eq!(
        invalid("This is an invalid action."),
        (0, InvalidReason::NoActionMarker)
    );
    assert_eq!(
        invalid("Do physical examination to start."),
        (0, InvalidReason::NoActionMarker)
    );
}

#[test]
fn empty_action_is_invalid_after_one_repair() {
    assert_eq!(invalid("Action:"), (1, InvalidReason::UnknownTool));
}

#[test]
fn prose_action_is_invalid() {
    let text = "Action: Refer the patient to a specialist for further management of their liver \
                disease and diabetes. Initiate therapy with insulin and statins to manage the \
                patient's diabetes and hyperlipidemia, respectively. Consider starting \
                levothyroxine replacement therapy for the patient's hypothyroidism. Monitor the \
                patient closely for progression of their liver disease and adjust treatment \
                accordingly.";
    assert_eq!(invalid(text), (1, InvalidReason::UnknownTool));
}

#[test]
fn tools_needing_input_without_one_are_invalid() {
    assert_eq!(
        invalid("Action: Laboratory Tests"),
        (0, InvalidReason::MissingInput)
    );
    assert_eq!(invalid("Action: Imaging"), (0, InvalidReason::MissingInput));
    assert_eq!(
        invalid("Action: Imaging\nAction Input: None"),
        (0, InvalidReason::MissingInput)
    );
}

#[test]
fn incomplete_imaging_is_invalid() {
    assert_eq!(
        invalid("Action:Imaging\nAction Input: Abdomen"),
        (0, InvalidReason::IncompleteImaging)
    );
    assert_eq!(
        invalid("Action: Imaging\nAction Input: CT"),
        (0, InvalidReason::IncompleteImaging)
    );
}

#[test]
fn invalid_outcome_becomes_sentinel_action() {
    let sentinel = parser().parse("Action:").into_action().unwrap();
    assert!(sentinel.is_invalid());
    assert_eq!(sentinel.input(), &ActionInput::None);
    assert_eq!(sentinel.repair_count(), 1);
    assert_eq!(sentinel.raw_log(), "Action:");
}

#[test]
fn finishing_turn_has_no_action() {
    assert!(
        parser()
            .parse_action("Final Diagnosis: Pancreatitis")
            .is_none()
    );
}

#[test]
fn outcome_serializes_with_tag() {
    let json = serde_json::to_value(parser().parse("No marker here")).unwrap();
    assert_eq!(json["outcome"], "invalid");
    assert_eq!(json["reason"], "no_action_marker");
    assert_eq!(json["repair_count"], 0);
}
