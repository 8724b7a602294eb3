//! Typing of action inputs.

use std::collections::HashSet;
use std::sync::LazyLock;

use cdx_core::models::action::{ImagingStudy, LabTerm};
use cdx_vocab::text::{remove_stop_words, split_outside_parens};
use cdx_vocab::{LabResolver, resolve_imaging};
use regex::Regex;

/// Words models add around lab names ("order a CBC", "lipase levels").
static REQUEST_NOISE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["order", "run", "level[s]?", "repeat", "check"]
        .iter()
        .map(|w| Regex::new(&format!(r"(?i)\b{w}\b")).expect("valid regex"))
        .collect()
});

static AND_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\band\b").expect("valid regex"));

/// Remove request noise words. Returns the cleaned text and how many of the
/// noise words were present.
pub fn strip_request_noise(text: &str) -> (String, u32) {
    let mut removed = 0;
    let mut current = text.to_string();
    for re in REQUEST_NOISE.iter() {
        let next = re.replace_all(&current, "").into_owned();
        if next != current {
            removed += 1;
            current = next;
        }
    }
    (current, removed)
}

/// Split a free-text list into items: "and" and newlines separate like
/// commas, stop words go, commas inside parentheses do not split.
pub fn split_list(text: &str) -> Vec<String> {
    let normalized = AND_WORD.replace_all(text, ",").replace('\n', ",");
    split_outside_parens(&remove_stop_words(&normalized))
}

/// Resolve list items to lab terms, dropping repeats but keeping the order
/// of first request.
pub fn lab_terms(resolver: &LabResolver<'_>, items: &[String]) -> Vec<LabTerm> {
    let mut seen = HashSet::new();
    resolver
        .resolve(items)
        .into_iter()
        .filter(|term| seen.insert(term.clone()))
        .collect()
}

/// The scan named by `text`, if both its modality and region are known.
pub fn imaging_study(text: &str) -> Option<ImagingStudy> {
    let found = resolve_imaging(text);
    tracing::debug!(
        modality = found.modality,
        modality_hits = found.modality_hits,
        region = found.region,
        region_hits = found.region_hits,
        "resolved imaging request"
    );
    found
        .is_complete()
        .then(|| ImagingStudy::new(found.modality, found.region))
}
