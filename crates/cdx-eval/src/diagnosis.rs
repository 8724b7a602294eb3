//! Extracting and scoring the final diagnosis and treatment.
//!
//! Models rarely answer with a bare diagnosis. The extraction peels off the
//! usual wrappers (intro sentences, rationale sections, numbered or bulleted
//! differentials, "the most likely diagnosis is ...") down to a single
//! diagnosis, and records whether any peeling was needed.

use std::sync::LazyLock;

use cdx_vocab::fuzzy::ratio;
use cdx_vocab::text::remove_punctuation;
use regex::Regex;

use crate::Pathology;
use crate::negation::keyword_positive;
use crate::procedures::AlternativeName;

static DIAGNOSIS_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(Final )?Diagnosis:").expect("valid regex"));

/// Start of the line (or sentence) that introduces the treatment.
static TREATMENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[.\n][^\n]*Treatment[^\n]*:").expect("valid regex"));

static TREATMENT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)Treatment(.*)?:(.*)").expect("valid regex"));

static BASED_ON_INTRO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Based on.*:\n\n").expect("valid regex"));

/// Headings after which everything is commentary.
static TRAILING_SECTIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        "rationale",
        "note",
        "recommendation",
        "explanation",
        "finding",
        "other.*diagnos.*include",
        "other.*diagnos.*considered(?: were)?",
        "management",
        "action",
        "plan",
        "reasoning",
        "assessment",
        "justification",
        "tests",
        "additional diagnoses",
        "notification",
        "impression",
        "background",
        "additional findings include",
    ]
    .iter()
    .map(|heading| Regex::new(&format!(r"(?is){heading}s?:.*")).expect("valid regex"))
    .collect()
});

static NUMBERED_FIRST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^1\.(.*)").expect("valid regex"));
static BULLETED_FIRST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\*(.*)").expect("valid regex"));
static FROM_DASH_OR_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-:].*").expect("valid regex"));
static FROM_SPACED_DASH_OR_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-:] .*").expect("valid regex"));
static TRAILING_PARAGRAPHS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n.*").expect("valid regex"));
static DIAGNOSIS_IS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s).*?diagnosis[^.\n]*?\bis\b(.*?)[.\n]").expect("valid regex")
});
static PATIENT_HAS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s).*?patient has").expect("valid regex"));
static DIAGNOSIS_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[,.\n]|(?:\s*\b(?:and|or|vs[.]?)\b\s*)").expect("valid regex")
});

/// Free text pulled out of the final answer, and whether it had to be
/// reformatted to get there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAnswer {
    pub text: String,
    pub reformatted: bool,
}

impl ParsedAnswer {
    fn apply(&mut self, next: String) {
        if next != self.text {
            self.reformatted = true;
            self.text = next;
        }
    }
}

/// Extract the single diagnosis from a final answer. An answer with no
/// diagnosis marker yields an empty diagnosis that was not reformatted.
pub fn parse_diagnosis(answer: &str) -> ParsedAnswer {
    let Some(caps) = DIAGNOSIS_MARKER.captures(answer) else {
        return ParsedAnswer::default();
    };
    let Some(marker) = caps.get(0) else {
        return ParsedAnswer::default();
    };

    let rest = &answer[marker.end()..];
    let end = TREATMENT_LINE.find(rest).map_or(rest.len(), |m| m.start());
    let mut parsed = ParsedAnswer {
        text: rest[..end].trim().to_string(),
        // Answers are asked to open with "Final Diagnosis:".
        reformatted: caps.get(1).is_none(),
    };

    let next = BASED_ON_INTRO.replacen(&parsed.text, 1, "").into_owned();
    parsed.apply(next);

    let mut without_sections = parsed.text.clone();
    for section in TRAILING_SECTIONS.iter() {
        without_sections = section.replace_all(&without_sections, "").into_owned();
    }
    parsed.apply(without_sections);

    if let Some(first) = first_list_item(&NUMBERED_FIRST, &parsed.text) {
        parsed.reformatted = true;
        parsed.text = FROM_DASH_OR_COLON.replace_all(&first, "").into_owned();
    }
    if let Some(first) = first_list_item(&BULLETED_FIRST, &parsed.text) {
        parsed.reformatted = true;
        parsed.text = FROM_SPACED_DASH_OR_COLON.replace_all(&first, "").into_owned();
    }

    let next = TRAILING_PARAGRAPHS.replace_all(&parsed.text, "").into_owned();
    parsed.apply(next);

    let stated = DIAGNOSIS_IS
        .captures(&parsed.text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string());
    if let Some(stated) = stated {
        parsed.apply(stated);
    }

    let next = PATIENT_HAS.replacen(&parsed.text, 1, "").into_owned();
    parsed.apply(next);

    let candidates: Vec<&str> = DIAGNOSIS_SEPARATORS
        .split(&parsed.text)
        .filter(|piece| !piece.is_empty())
        .collect();
    if candidates.len() > 1 {
        parsed.reformatted = true;
    }
    let first = candidates.first().map_or("", |c| c.trim()).to_string();
    parsed.text = first;

    tracing::debug!(
        diagnosis = %parsed.text,
        reformatted = parsed.reformatted,
        "parsed diagnosis"
    );
    parsed
}

/// The first item of a list in `text`, when the text is more than that item.
fn first_list_item(pattern: &Regex, text: &str) -> Option<String> {
    let item = pattern.captures(text)?.get(1)?.as_str().trim();
    (item != text).then(|| item.to_string())
}

/// Extract the treatment. Any words between "Treatment" and its colon mark
/// the answer as reformatted.
pub fn parse_treatment(answer: &str) -> Option<ParsedAnswer> {
    let caps = TREATMENT_MARKER.captures(answer)?;
    let qualified = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
    let text = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
    Some(ParsedAnswer {
        text,
        reformatted: qualified,
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosisScore {
    pub diagnosis: bool,
    pub gracious: bool,
}

/// Compare a parsed diagnosis with the pathology.
///
/// Full credit needs a word within `threshold` similarity of the pathology's
/// name, or one of its alternative phrasings, asserted rather than negated.
/// Gracious phrasings earn only the gracious score.
pub fn score_diagnosis(pathology: &dyn Pathology, diagnosis: &str, threshold: u32) -> DiagnosisScore {
    let normalized = remove_punctuation(&diagnosis.to_lowercase());

    let named = normalized.split_whitespace().any(|word| {
        let similarity = ratio(word, pathology.name()).round_ties_even() as u32;
        similarity > threshold && keyword_positive(diagnosis, word)
    });
    let alternative = asserts_alternative(pathology.alternatives(), &normalized, diagnosis);
    let gracious = asserts_alternative(pathology.gracious_alternatives(), &normalized, diagnosis);

    DiagnosisScore {
        diagnosis: named || alternative,
        gracious: named || alternative || gracious,
    }
}

fn asserts_alternative(alternatives: &[AlternativeName], normalized: &str, diagnosis: &str) -> bool {
    alternatives.iter().any(|alternative| {
        let location = alternative.location;
        normalized.contains(location)
            && keyword_positive(diagnosis, location)
            && alternative.modifiers.iter().any(|modifier| {
                normalized.contains(modifier) && keyword_positive(diagnosis, modifier)
            })
    })
}
