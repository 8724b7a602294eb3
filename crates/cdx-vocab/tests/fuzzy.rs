use cdx_vocab::fuzzy::{Scorer, extract_one, process, ratio, score};

#[test]
fn processing_lowercases_and_blanks_symbols() {
    assert_eq!(process("  C-Reactive Protein (CRP) "), "c reactive protein  crp");
}

#[test]
fn ratio_is_indel_similarity() {
    assert_eq!(ratio("amylase", "amylase"), 100.0);
    assert_eq!(score(Scorer::Ratio, "Amylasee", "Amylase"), 93);
    assert_eq!(ratio("abc", "xyz"), 0.0);
}

#[test]
fn weighted_ratio_rewards_contained_tool_names() {
    assert_eq!(score(Scorer::WRatio, "Imaging", "Imaging"), 100);
    assert!(score(Scorer::WRatio, "Laboratory Test", "Laboratory Tests") > 80);
    assert!(score(Scorer::WRatio, "Abdominal Ultrasound", "Imaging") <= 80);
}

#[test]
fn extract_one_keeps_first_best() {
    let choices = ["Sodium", "Sodium", "Potassium"];
    let best = extract_one("sodium", choices, Scorer::Ratio).unwrap();
    assert_eq!(best.index, 0);
    assert_eq!(best.score, 100);
}

#[test]
fn empty_query_matches_nothing() {
    assert!(extract_one("  ", ["Imaging"], Scorer::WRatio).is_none());
}

#[test]
fn half_scores_round_to_even() {
    // Five shared characters out of sixteen: 62.5 and 12.5.
    assert_eq!(ratio("aaaaabbb", "aaaaaccc"), 62.5);
    assert_eq!(score(Scorer::Ratio, "aaaaabbb", "aaaaaccc"), 62);
    assert_eq!(score(Scorer::Ratio, "abbbbbbb", "accccccc"), 12);
    // 37.5 rounds up to the even neighbour.
    assert_eq!(score(Scorer::Ratio, "aaabbbbb", "aaaccccc"), 38);
}
