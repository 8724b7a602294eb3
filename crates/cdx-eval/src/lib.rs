//! cdx-eval
//!
//! Guideline-adherence scoring of completed diagnostic trajectories. Each
//! supported pathology describes its guideline as data (accepted names, lab
//! categories, neutral tests) plus two hooks for imaging and treatment; the
//! [`Evaluator`] replays a trajectory against it. Pure computation, no I/O.

pub mod codes;
pub mod diagnosis;
pub mod error;
pub mod evaluator;
pub mod negation;
pub mod pathologies;
pub mod procedures;

use std::collections::{BTreeMap, HashSet};

use cdx_core::models::action::ImagingStudy;
use cdx_core::models::record::ScoreRecord;
use cdx_core::models::reference::ReferenceBundle;

pub use error::EvalError;
pub use evaluator::Evaluator;
pub use negation::keyword_positive;
pub use procedures::AlternativeName;

/// A group of lab tests the guideline asks for. One test from the group is
/// enough to satisfy it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabCategory {
    pub name: &'static str,
    pub tests: &'static [u32],
}

/// Which treatments the model asked for and which the case required, keyed
/// by treatment name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreatmentScores {
    pub requested: BTreeMap<String, bool>,
    pub required: BTreeMap<String, bool>,
}

impl TreatmentScores {
    /// Nothing requested yet; required set to each treatment's default.
    pub fn with_defaults(defaults: &[(&str, bool)]) -> Self {
        Self {
            requested: defaults.iter().map(|(name, _)| (name.to_string(), false)).collect(),
            required: defaults
                .iter()
                .map(|(name, required)| (name.to_string(), *required))
                .collect(),
        }
    }

    pub fn request(&mut self, treatment: &str) {
        self.requested.insert(treatment.to_string(), true);
    }

    pub fn require(&mut self, treatment: &str) {
        self.required.insert(treatment.to_string(), true);
    }
}

/// Trait implemented by each supported pathology.
pub trait Pathology: Send + Sync {
    /// Lowercase name the diagnosis is compared against (e.g. "appendicitis").
    fn name(&self) -> &str;

    /// Other phrasings that count as the correct diagnosis.
    fn alternatives(&self) -> &[AlternativeName];

    /// Phrasings that only earn the gracious diagnosis score.
    fn gracious_alternatives(&self) -> &[AlternativeName] {
        &[]
    }

    /// Guideline lab categories, in the order a test is matched against them.
    fn lab_categories(&self) -> &[LabCategory];

    /// Tests that are neither required nor penalized.
    fn neutral_lab_tests(&self) -> Vec<u32>;

    /// Treatment names with whether each is required before the case's
    /// procedures are looked at.
    fn treatment_defaults(&self) -> &[(&'static str, bool)];

    /// Award imaging points for a requested scan. Returns whether the scan
    /// is acceptable at all.
    fn score_imaging(
        &self,
        study: &ImagingStudy,
        scores: &mut ScoreRecord,
        reference: &ReferenceBundle,
    ) -> bool;

    /// Mark requested and required treatments.
    fn score_treatment(
        &self,
        treatment: &str,
        reference: &ReferenceBundle,
        scores: &mut TreatmentScores,
    );

    /// Reject guideline tables that could not be scored meaningfully.
    fn validate(&self) -> Result<(), EvalError> {
        let malformed = |reason: String| EvalError::Guideline {
            pathology: self.name().to_string(),
            reason,
        };

        if self.name().trim().is_empty() {
            return Err(malformed("pathology has no name".into()));
        }
        if self.lab_categories().is_empty() {
            return Err(malformed("no lab test categories".into()));
        }
        if let Some(empty) = self.lab_categories().iter().find(|c| c.tests.is_empty()) {
            return Err(malformed(format!("lab category '{}' has no tests", empty.name)));
        }

        let required: HashSet<u32> = self
            .lab_categories()
            .iter()
            .flat_map(|c| c.tests.iter().copied())
            .collect();
        if let Some(both) = self.neutral_lab_tests().into_iter().find(|t| required.contains(t)) {
            return Err(malformed(format!("lab test {both} is both neutral and required")));
        }

        let alternatives = self
            .alternatives()
            .iter()
            .chain(self.gracious_alternatives());
        for alternative in alternatives {
            if alternative.modifiers.is_empty() {
                return Err(malformed(format!(
                    "alternative name '{}' has no modifiers",
                    alternative.location
                )));
            }
        }
        Ok(())
    }
}

/// Set the imaging score unless an earlier scan already set it, so the
/// first acceptable scan decides the points.
pub fn award_first_imaging(scores: &mut ScoreRecord, points: u32) {
    if scores.imaging == 0 {
        scores.imaging = points;
    }
}

/// Union of the given panels, in order and without repeats, minus every test
/// a category requires.
pub fn neutral_from_panels(panels: &[&[u32]], categories: &[LabCategory]) -> Vec<u32> {
    let required: HashSet<u32> = categories
        .iter()
        .flat_map(|c| c.tests.iter().copied())
        .collect();
    let mut seen = HashSet::new();
    panels
        .iter()
        .flat_map(|panel| panel.iter().copied())
        .filter(|test| !required.contains(test) && seen.insert(*test))
        .collect()
}

/// Return all supported pathologies.
pub fn all_pathologies() -> Vec<Box<dyn Pathology>> {
    vec![
        Box::new(pathologies::appendicitis::Appendicitis),
        Box::new(pathologies::cholecystitis::Cholecystitis),
        Box::new(pathologies::diverticulitis::Diverticulitis),
        Box::new(pathologies::pancreatitis::Pancreatitis),
    ]
}

/// Look up a pathology by name, ignoring case.
pub fn get_pathology(name: &str) -> Option<Box<dyn Pathology>> {
    all_pathologies()
        .into_iter()
        .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
}
