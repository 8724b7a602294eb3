//! Text clean-up shared by the parser, the resolver and the evaluator.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::curated::FLUID_MAPPING;

/// English stop words. Single letters are handled separately by
/// [`remove_stop_words`].
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Verbs a model uses to ask for something. Never content words.
const REQUEST_VERBS: &[&str] = &[
    "do", "order", "ordering", "ordered", "perform", "performing", "get", "obtain", "check",
    "run", "request", "requesting", "repeat", "consider", "evaluate", "assess", "need", "needs",
    "want", "like", "would", "please", "recommend", "suggest", "start", "proceed", "send",
    "draw", "schedule", "arrange", "let", "us", "let's", "show", "see",
];

/// Adverbs, modals and fillers that pad a request without naming anything.
const FILLER_WORDS: &[&str] = &[
    "also", "additionally", "first", "firstly", "next", "maybe", "perhaps", "possibly",
    "probably", "likely", "quickly", "urgently", "immediately", "promptly", "already", "still",
    "even", "really", "now", "soon", "asap", "stat", "today", "could", "may", "might", "must",
    "shall", "ok", "okay", "yes", "well",
];

static MULTI_LETTER_STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    STOP_WORDS
        .iter()
        .copied()
        .filter(|w| w.chars().count() > 1)
        .collect()
});

static SINGLE_LETTER_STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    STOP_WORDS
        .iter()
        .copied()
        .filter(|w| w.chars().count() == 1)
        .collect()
});

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

static LEADING_ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bA\s").expect("valid regex"));

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w]+(?:['-][\w]+)*").expect("valid regex"));

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((.*)\)").expect("valid regex"));

/// Whether `word` is a stop word, ignoring case. Single letters count.
pub fn is_stop_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    MULTI_LETTER_STOP_WORDS.contains(lower.as_str())
        || SINGLE_LETTER_STOP_WORDS.contains(lower.as_str())
}

/// Drop stop words from a space-separated sentence, keeping punctuation
/// attached to the words that survive.
///
/// Multi-letter stop words match case-insensitively. Single letters only
/// match in lowercase, so an uppercase "A" in "Vitamin A" survives unless
/// it is followed by whitespace.
pub fn remove_stop_words(sentence: &str) -> String {
    let kept: Vec<&str> = sentence
        .split(' ')
        .filter(|word| {
            let bare = NON_WORD.replace_all(word, "");
            !MULTI_LETTER_STOP_WORDS.contains(bare.to_lowercase().as_str())
                && !SINGLE_LETTER_STOP_WORDS.contains(bare.as_ref())
        })
        .collect();
    LEADING_ARTICLE
        .replace_all(&kept.join(" "), "")
        .into_owned()
}

/// Remove ASCII punctuation.
pub fn remove_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Words that carry meaning in a short request: everything except stop
/// words, request verbs, fillers, punctuation and bare numbers. Without a
/// part-of-speech tagger this approximates the nouns and adjectives.
pub fn content_words(text: &str) -> Vec<&str> {
    TOKEN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|w| w.chars().any(char::is_alphabetic))
        .filter(|w| !is_stop_word(w))
        .filter(|w| {
            let lower = w.to_lowercase();
            !REQUEST_VERBS.contains(&lower.as_str()) && !FILLER_WORDS.contains(&lower.as_str())
        })
        .collect()
}

/// Split on commas that are not inside parentheses, trimming each fragment
/// and dropping empty ones.
///
/// A comma counts as inside when a closing parenthesis follows it before
/// any opening one.
pub fn split_outside_parens(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut fragments = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if c == ',' && !closes_before_opening(&chars[i + 1..]) {
            fragments.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    fragments.push(current);
    fragments
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

fn closes_before_opening(rest: &[char]) -> bool {
    for &c in rest {
        match c {
            '(' => return false,
            ')' => return true,
            _ => {}
        }
    }
    false
}

/// Split "Long Name (SHORT)" into `("SHORT", "Long Name")`. Labels without
/// a parenthetical come back unchanged on both sides.
pub fn extract_short_and_long_name(label: &str) -> (String, String) {
    match PARENTHETICAL.captures(label) {
        Some(caps) => {
            let short = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
            let whole = caps.get(0).map_or("", |m| m.as_str());
            let long = label
                .replace(whole, "")
                .trim()
                .replace("  ", " ")
                .replace(" ,", ",");
            (short, long)
        }
        None => (label.to_string(), label.to_string()),
    }
}

/// The body fluid a term names, if any, and the term with every occurrence
/// of the matched fluid word removed.
pub fn match_fluid(term: &str) -> Option<(&'static str, String)> {
    let lower = term.to_lowercase();
    for (fluid, keywords) in FLUID_MAPPING {
        for keyword in *keywords {
            if lower.contains(&keyword.to_lowercase()) {
                let pattern = format!("(?i){}", regex::escape(keyword));
                let stripped = match Regex::new(&pattern) {
                    Ok(re) => re.replace_all(term, "").trim().to_string(),
                    Err(_) => term.to_string(),
                };
                return Some((fluid, stripped));
            }
        }
    }
    None
}
