use cdx_core::config::DiagnosisConfig;
use cdx_core::models::action::LabTerm;
use cdx_vocab::curated::{COMPLETE_BLOOD_COUNT, LIVER_FUNCTION_PANEL, RENAL_FUNCTION_PANEL};
use cdx_vocab::{LabResolver, Vocabulary};

fn resolve(terms: &[&str]) -> Vec<LabTerm> {
    let vocab = Vocabulary::bundled().unwrap();
    let config = DiagnosisConfig::default();
    let terms: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
    LabResolver::new(&vocab, &config).resolve(&terms)
}

fn ids(ids: &[u32]) -> Vec<LabTerm> {
    ids.iter().copied().map(LabTerm::Identifier).collect()
}

#[test]
fn exact_match() {
    assert_eq!(resolve(&["Amylase"]), ids(&[50867]));
}

#[test]
fn spelling_mistake() {
    assert_eq!(resolve(&["Amylasee"]), ids(&[50867]));
}

#[test]
fn similar_but_different_name_stays_unresolved() {
    assert_eq!(
        resolve(&["Amylase Dehydrogenase"]),
        vec![LabTerm::Unresolved("Amylase Dehydrogenase".into())]
    );
}

#[test]
fn panel_by_full_long_and_short_name() {
    let cbc = ids(COMPLETE_BLOOD_COUNT);
    assert_eq!(resolve(&["Complete Blood Count (CBC)"]), cbc);
    assert_eq!(resolve(&["Complete Blood Count"]), cbc);
    assert_eq!(resolve(&["CBC"]), cbc);
}

#[test]
fn wrong_long_name_falls_back_to_short_name() {
    assert_eq!(resolve(&["All Blood Tests (CBC)"]), ids(COMPLETE_BLOOD_COUNT));
}

#[test]
fn wrong_short_name_falls_back_to_long_name() {
    assert_eq!(
        resolve(&["Complete Blood Count (CompBldCnt)"]),
        ids(COMPLETE_BLOOD_COUNT)
    );
}

#[test]
fn multiple_terms_flatten_in_order() {
    let mut expected = ids(COMPLETE_BLOOD_COUNT);
    expected.push(LabTerm::Identifier(50867));
    assert_eq!(resolve(&["CBC", "Amylase"]), expected);
}

#[test]
fn fluid_word_restricts_the_class() {
    let blood_glucose = ids(&[50809, 50931, 52569]);
    assert_eq!(resolve(&["blood glucose"]), blood_glucose);
    assert_eq!(resolve(&["serum glucose"]), blood_glucose);
    assert_eq!(resolve(&["Glucose (Blood)"]), blood_glucose);
}

#[test]
fn fluid_in_parentheses_selects_the_fluid_specific_label() {
    assert_eq!(resolve(&["Amylase (Urine)"]), ids(&[51072]));
}

#[test]
fn label_synonyms_resolve_to_their_panel() {
    assert_eq!(resolve(&["Liver Function Tests (LFTs)"]), ids(LIVER_FUNCTION_PANEL));
    assert_eq!(resolve(&["Renal Function Tests"]), ids(RENAL_FUNCTION_PANEL));
}

#[test]
fn unknown_abbreviation_is_kept_verbatim() {
    assert_eq!(resolve(&["CBD"]), vec![LabTerm::Unresolved("CBD".into())]);
}

#[test]
fn microbiology_tests_survive_the_fluid_filter() {
    assert_eq!(resolve(&["Blood Culture"]), ids(&[90201]));
    assert_eq!(resolve(&["Urine culture"]), ids(&[90039]));
}

#[test]
fn total_prefix_variant_resolves_to_single_item() {
    assert_eq!(resolve(&["Total Bilirubin"]), ids(&[50885]));
}
