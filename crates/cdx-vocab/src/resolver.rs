//! Free-text lab requests → raw identifiers.

use cdx_core::config::DiagnosisConfig;
use cdx_core::models::action::LabTerm;

use crate::fuzzy::{Scorer, extract_one};
use crate::text::{extract_short_and_long_name, match_fluid};
use crate::vocabulary::Vocabulary;

/// Resolves lab names against a [`Vocabulary`].
///
/// The cascade tries the full term, then the name without its
/// parenthetical, then the parenthetical alone (exact only), then the term
/// with its fluid word removed among labels of that fluid.
#[derive(Debug, Clone, Copy)]
pub struct LabResolver<'v> {
    vocabulary: &'v Vocabulary,
    lab_threshold: u32,
    short_threshold: u32,
}

impl<'v> LabResolver<'v> {
    pub fn new(vocabulary: &'v Vocabulary, config: &DiagnosisConfig) -> Self {
        Self {
            vocabulary,
            lab_threshold: config.lab_match_threshold,
            short_threshold: config.short_name_threshold,
        }
    }

    /// Resolve every term, flattening matched classes in request order.
    /// Unmatched terms are kept verbatim. Duplicates are not removed.
    pub fn resolve(&self, terms: &[String]) -> Vec<LabTerm> {
        terms.iter().flat_map(|t| self.resolve_term(t)).collect()
    }

    pub fn resolve_term(&self, term: &str) -> Vec<LabTerm> {
        let fluid = match_fluid(term);
        let (short, long) = extract_short_and_long_name(term);

        let matched = self
            .best_label(term, self.lab_threshold, None)
            .or_else(|| self.best_label(&long, self.lab_threshold, None))
            .or_else(|| self.best_label(&short, self.short_threshold, None))
            .or_else(|| {
                let (wanted, stripped) = fluid.as_ref()?;
                self.best_label(stripped, self.lab_threshold, Some(*wanted))
            });

        let Some(label) = matched else {
            tracing::warn!(term = %term, "no canonical lab label matched");
            return vec![LabTerm::Unresolved(term.to_string())];
        };

        let ids = self.vocabulary.ids_for_label(label).unwrap_or_default();
        tracing::debug!(term = %term, label = %label, ids = ids.len(), "resolved lab term");
        ids.iter()
            .copied()
            .filter(|&id| match (&fluid, self.vocabulary.fluid_of(id)) {
                (Some((wanted, _)), Some(actual)) => *wanted == actual,
                _ => true,
            })
            .map(LabTerm::Identifier)
            .collect()
    }

    fn best_label(&self, query: &str, threshold: u32, fluid: Option<&str>) -> Option<&'v str> {
        let vocabulary = self.vocabulary;
        let candidates = vocabulary
            .entries()
            .iter()
            .filter(|e| fluid.is_none() || e.fluid.as_deref() == fluid)
            .map(|e| e.label.as_str());
        extract_one(query, candidates, Scorer::Ratio)
            .filter(|m| m.score >= threshold)
            .map(|m| m.choice)
    }
}
