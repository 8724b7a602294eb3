//! Checks of what was done (from the reference bundle) and what was asked
//! for (in the model's treatment text).

use cdx_core::models::reference::ReferenceBundle;

use crate::negation::keyword_positive;

/// A phrasing made of an anatomical location plus one of several modifiers,
/// e.g. "appendix" + "removal". Both must be asserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlternativeName {
    pub location: &'static str,
    pub modifiers: &'static [&'static str],
}

impl AlternativeName {
    pub const fn new(location: &'static str, modifiers: &'static [&'static str]) -> Self {
        Self {
            location,
            modifiers,
        }
    }
}

/// The codes and discharge phrases that show a procedure was performed.
#[derive(Debug, Clone, Copy)]
pub struct ProcedureCodes {
    pub icd9: &'static [u32],
    pub icd10: &'static [&'static str],
    pub keywords: &'static [&'static str],
}

impl ProcedureCodes {
    /// Whether the admission's coded or free-text procedures include this one.
    pub fn performed(&self, reference: &ReferenceBundle) -> bool {
        codes_performed(self.icd9, &reference.procedures_icd9)
            || keywords_performed(self.icd10, &reference.procedures_icd10)
            || keywords_performed(self.keywords, &reference.procedures_discharge)
    }

    /// Whether the treatment text names this procedure outright.
    pub fn requested(&self, treatment: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| keyword_positive(treatment, keyword))
    }
}

pub fn codes_performed(valid: &[u32], done: &[u32]) -> bool {
    valid.iter().any(|code| done.contains(code))
}

/// Any keyword asserted in any of the done procedures.
pub fn keywords_performed<S: AsRef<str>>(keywords: &[&str], done: &[S]) -> bool {
    keywords.iter().any(|keyword| {
        done.iter()
            .any(|procedure| keyword_positive(procedure.as_ref(), keyword))
    })
}

/// Whether some sentence of `text` asserts one of the alternatives' location
/// together with one of its modifiers.
pub fn alternative_requested(alternatives: &[AlternativeName], text: &str) -> bool {
    alternatives.iter().any(|alternative| {
        alternative.modifiers.iter().any(|modifier| {
            text.split('.').any(|sentence| {
                keyword_positive(sentence, alternative.location)
                    && keyword_positive(sentence, modifier)
            })
        })
    })
}

/// Whether the discharge diagnosis or any coded diagnosis asserts `keyword`.
pub fn diagnosis_mentions(reference: &ReferenceBundle, keyword: &str) -> bool {
    reference
        .icd_diagnoses
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(reference.discharge_diagnosis.as_str()))
        .any(|diagnosis| keyword_positive(diagnosis, keyword))
}
