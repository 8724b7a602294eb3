//! Fallback classifiers for action names that match no tool.
//!
//! Models often skip the tool name and write the request itself ("CT of the
//! abdomen", "Amylase, Lipase"). Each classifier looks at the words of such
//! an action and claims it when the share of domain terms is high enough.
//! They run in [`FALLBACK_CLASSIFIERS`] order and the first claim wins.

use cdx_core::models::action::ToolKind;
use cdx_vocab::Vocabulary;
use cdx_vocab::imaging::imaging_term_hits;
use cdx_vocab::text::content_words;

/// What a classifier needs besides the action text.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierContext<'a> {
    pub vocabulary: &'a Vocabulary,
    /// Domain-term hits must exceed this share of the content words.
    pub keyword_share: f64,
}

/// A tool inferred from the wording of an action. The action text itself
/// becomes input for that tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tool: ToolKind,
}

pub type Classifier = fn(&ClassifierContext<'_>, &str) -> Option<Classification>;

pub const FALLBACK_CLASSIFIERS: &[Classifier] = &[classify_imaging, classify_labs];

/// Run the fallback classifiers in order.
pub fn classify(ctx: &ClassifierContext<'_>, action: &str) -> Option<Classification> {
    FALLBACK_CLASSIFIERS
        .iter()
        .find_map(|classifier| classifier(ctx, action))
}

fn exceeds_share(hits: usize, action: &str, share: f64) -> bool {
    let words = content_words(action).len();
    hits as f64 > share * words as f64
}

/// Modality and region terms.
pub fn classify_imaging(ctx: &ClassifierContext<'_>, action: &str) -> Option<Classification> {
    let hits = imaging_term_hits(action);
    tracing::debug!(hits, "imaging classifier");
    exceeds_share(hits, action, ctx.keyword_share).then_some(Classification {
        tool: ToolKind::Imaging,
    })
}

/// Whole-word mentions of known lab labels.
pub fn classify_labs(ctx: &ClassifierContext<'_>, action: &str) -> Option<Classification> {
    let hits = ctx.vocabulary.count_label_mentions(action);
    tracing::debug!(hits, "lab classifier");
    exceeds_share(hits, action, ctx.keyword_share).then_some(Classification {
        tool: ToolKind::LaboratoryTests,
    })
}
