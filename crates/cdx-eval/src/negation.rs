//! Rule-based negation detection.
//!
//! A keyword counts as asserted when at least one of its occurrences is not
//! negated. Negation is decided within the occurrence's sentence, and within
//! its clause: a termination term ("but", "however", ...) closes the scope of
//! any trigger on the other side of it. Pseudo-triggers ("no change", "not
//! only") look like negations but are masked before the trigger search.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

const SENTENCE_BREAKS: [char; 5] = ['.', '!', '?', ';', '\n'];

const TERMINATION_TERMS: &[&str] = &[
    "but",
    "however",
    "although",
    "though",
    "except",
    "apart from",
    "aside from",
    "yet",
    "which",
    "secondary to",
];

const PRE_NEGATION_TRIGGERS: &[&str] = &[
    "no",
    "not",
    "without",
    "absence of",
    "no evidence of",
    "no signs of",
    "no sign of",
    "negative for",
    "denies",
    "denied",
    "free of",
    "rule out",
    "does not have",
    "never",
    "cannot",
];

const POST_NEGATION_TRIGGERS: &[&str] = &[
    "ruled out",
    "unlikely",
    "excluded",
    "was negative",
    "not seen",
    "not present",
];

const PSEUDO_TRIGGERS: &[&str] = &["no increase", "not only", "no change", "without difficulty"];

fn phrase_pattern(phrases: &[&str]) -> Regex {
    let alternation = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b")).expect("valid regex")
}

static TERMINATION: LazyLock<Regex> = LazyLock::new(|| phrase_pattern(TERMINATION_TERMS));
static PRE_NEGATION: LazyLock<Regex> = LazyLock::new(|| phrase_pattern(PRE_NEGATION_TRIGGERS));
static POST_NEGATION: LazyLock<Regex> = LazyLock::new(|| phrase_pattern(POST_NEGATION_TRIGGERS));
static PSEUDO: LazyLock<Regex> = LazyLock::new(|| phrase_pattern(PSEUDO_TRIGGERS));

/// Whether `keyword` occurs in `text` (case-insensitively, as a substring)
/// with at least one occurrence that is not negated.
pub fn keyword_positive(text: &str, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    if keyword.is_empty() {
        return false;
    }
    let text = text.to_lowercase();
    text.split(SENTENCE_BREAKS).any(|sentence| {
        sentence
            .match_indices(keyword.as_str())
            .any(|(start, found)| !is_negated(sentence, start, start + found.len()))
    })
}

/// Whether the span `start..end` of a lowercased sentence is negated.
pub fn is_negated(sentence: &str, start: usize, end: usize) -> bool {
    let scope_start = TERMINATION
        .find_iter(&sentence[..start])
        .last()
        .map_or(0, |m| m.end());
    let scope_end = TERMINATION
        .find(&sentence[end..])
        .map_or(sentence.len(), |m| end + m.start());

    let before = mask_pseudo_triggers(&sentence[scope_start..start]);
    let after = mask_pseudo_triggers(&sentence[end..scope_end]);
    PRE_NEGATION.is_match(&before) || POST_NEGATION.is_match(&after)
}

fn mask_pseudo_triggers(span: &str) -> Cow<'_, str> {
    PSEUDO.replace_all(span, " ")
}
