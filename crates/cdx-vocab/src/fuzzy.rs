//! String similarity on the 0–100 scale.
//!
//! `ratio` is the Indel-normalized similarity `200 · LCS / (len_a + len_b)`.
//! The token and partial variants build on it the usual way. Scores returned
//! by [`score`] and [`extract_one`] are computed on processed strings and
//! rounded to whole numbers, halves to even.

use std::collections::BTreeSet;

/// Which similarity function to rank candidates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scorer {
    Ratio,
    WRatio,
}

/// Best candidate returned by [`extract_one`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatch<'a> {
    pub index: usize,
    pub choice: &'a str,
    pub score: u32,
}

/// Lowercase, turn every non-alphanumeric character into a space, trim.
pub fn process(s: &str) -> String {
    let mapped: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .flat_map(char::to_lowercase)
        .collect();
    mapped.trim().to_string()
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                cur[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Indel similarity of the raw strings, unrounded. Two empty strings are
/// identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best [`ratio`] of the shorter string against any equally long window of
/// the longer one, including windows that hang off either end.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }
    let m = short.len();
    let mut best = 0.0f64;
    for end in 1..m {
        best = best.max(ratio_chars(&short, &long[..end]));
    }
    for start in 0..=(long.len() - m) {
        best = best.max(ratio_chars(&short, &long[start..start + m]));
        if best >= 100.0 {
            return 100.0;
        }
    }
    for start in (long.len() - m + 1)..long.len() {
        best = best.max(ratio_chars(&short, &long[start..]));
    }
    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn joined(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn empty_is_zero(f: fn(&str, &str) -> f64, a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        0.0
    } else {
        f(a, b)
    }
}

fn token_set_with(a: &str, b: &str, f: fn(&str, &str) -> f64) -> f64 {
    let ta: BTreeSet<&str> = a.split_whitespace().collect();
    let tb: BTreeSet<&str> = b.split_whitespace().collect();
    let sect: Vec<&str> = ta.intersection(&tb).copied().collect();
    let diff_ab: Vec<&str> = ta.difference(&tb).copied().collect();
    let diff_ba: Vec<&str> = tb.difference(&ta).copied().collect();

    let sect = sect.join(" ");
    let combined_ab = joined(&[&sect, &diff_ab.join(" ")]);
    let combined_ba = joined(&[&sect, &diff_ba.join(" ")]);

    empty_is_zero(f, &sect, &combined_ab)
        .max(empty_is_zero(f, &sect, &combined_ba))
        .max(empty_is_zero(f, &combined_ab, &combined_ba))
}

pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    token_set_with(a, b, ratio)
}

pub fn partial_token_sort_ratio(a: &str, b: &str) -> f64 {
    partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

pub fn partial_token_set_ratio(a: &str, b: &str) -> f64 {
    token_set_with(a, b, partial_ratio)
}

/// Weighted ratio: plain ratio for similarly sized strings, scaled partial
/// and token variants once one string is much longer than the other.
/// Expects processed input.
pub fn wratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    const UNBASE_SCALE: f64 = 0.95;

    let base = ratio(a, b);
    let (la, lb) = (a.chars().count() as f64, b.chars().count() as f64);
    let len_ratio = la.max(lb) / la.min(lb);

    if len_ratio < 1.5 {
        let tsor = token_sort_ratio(a, b) * UNBASE_SCALE;
        let tser = token_set_ratio(a, b) * UNBASE_SCALE;
        return base.max(tsor).max(tser);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
    let partial = partial_ratio(a, b) * partial_scale;
    let ptsor = partial_token_sort_ratio(a, b) * UNBASE_SCALE * partial_scale;
    let ptser = partial_token_set_ratio(a, b) * UNBASE_SCALE * partial_scale;
    base.max(partial).max(ptsor).max(ptser)
}

/// Score two strings after processing both. Empty input scores zero.
pub fn score(scorer: Scorer, a: &str, b: &str) -> u32 {
    score_processed(scorer, &process(a), &process(b))
}

fn score_processed(scorer: Scorer, a: &str, b: &str) -> u32 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let raw = match scorer {
        Scorer::Ratio => ratio(a, b),
        Scorer::WRatio => wratio(a, b),
    };
    raw.round_ties_even() as u32
}

/// Highest-scoring choice for `query`. Ties keep the earliest choice. Returns
/// `None` when the query is empty after processing or there are no choices.
pub fn extract_one<'a, I>(query: &str, choices: I, scorer: Scorer) -> Option<FuzzyMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = process(query);
    if query.is_empty() {
        return None;
    }
    let mut best: Option<FuzzyMatch<'a>> = None;
    for (index, choice) in choices.into_iter().enumerate() {
        let score = score_processed(scorer, &query, &process(choice));
        if best.is_none_or(|b| score > b.score) {
            best = Some(FuzzyMatch {
                index,
                choice,
                score,
            });
            if score == 100 {
                break;
            }
        }
    }
    best
}
