use cdx_eval::keyword_positive;
use cdx_eval::negation::is_negated;

#[test]
fn plain_mention_is_positive() {
    assert!(keyword_positive("Acute Appendicitis", "appendicitis"));
    assert!(keyword_positive("Periappendiceal Abscess", "appendi"));
}

#[test]
fn absent_keyword_is_not_positive() {
    assert!(!keyword_positive("Acute Pancreatitis", "appendicitis"));
    assert!(!keyword_positive("anything", ""));
}

#[test]
fn pre_negation_triggers() {
    for text in [
        "The patient does not have Acute Appendicitis",
        "No Acute Appendicitis",
        "There is no evidence of acute appendicitis.",
        "No signs of acute appendicitis.",
        "Absence of typical signs and symptoms of appendicitis.",
        "Patient denies appendicitis",
        "Rule out appendicitis",
    ] {
        assert!(!keyword_positive(text, "appendicitis"), "{text:?}");
    }
}

#[test]
fn post_negation_triggers() {
    assert!(!keyword_positive("Appendicitis was ruled out", "appendicitis"));
    assert!(!keyword_positive("Perforation not seen on CT", "perforation"));
}

#[test]
fn negation_does_not_cross_sentences() {
    assert!(keyword_positive("No fever. Acute appendicitis.", "appendicitis"));
    assert!(keyword_positive("No fever; acute appendicitis", "appendicitis"));
}

#[test]
fn termination_term_closes_the_scope() {
    assert!(keyword_positive("No fever but acute appendicitis", "appendicitis"));
    assert!(!keyword_positive("No fever but acute appendicitis", "fever"));
}

#[test]
fn trigger_after_keyword_only_negates_what_follows() {
    let text = "Appendicitis, no perforation";
    assert!(keyword_positive(text, "appendicitis"));
    assert!(!keyword_positive(text, "perf"));
}

#[test]
fn pseudo_triggers_do_not_negate() {
    assert!(keyword_positive("No change in the appendicitis", "appendicitis"));
    assert!(keyword_positive("Not only appendicitis", "appendicitis"));
}

#[test]
fn any_asserted_occurrence_is_enough() {
    let text = "No appendicitis in the first scan. Appendicitis on the second.";
    assert!(keyword_positive(text, "appendicitis"));
}

#[test]
fn triggers_match_whole_words() {
    // "no" inside "nodes" and "not" inside "notable" are not triggers.
    assert!(keyword_positive("Enlarged nodes around the appendicitis", "appendicitis"));
    assert!(keyword_positive("notable appendicitis", "appendicitis"));
}

#[test]
fn span_negation_on_lowercase_sentence() {
    let sentence = "free of gallstones";
    let start = sentence.find("gallstones").unwrap();
    assert!(is_negated(sentence, start, sentence.len()));
    assert!(!is_negated("gallstones", 0, "gallstones".len()));
}
