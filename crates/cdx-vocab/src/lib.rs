//! cdx-vocab
//!
//! Controlled clinical vocabulary. Builds the lab-test lookup table from a
//! raw item table plus curated mappings, closes identifier synonymy into
//! equivalence classes, and resolves free-text lab and imaging phrases
//! against it. Pure data and matching, no I/O beyond loading a source table.

pub mod curated;
pub mod error;
pub mod fuzzy;
pub mod imaging;
pub mod resolver;
pub mod source;
pub mod text;
pub mod vocabulary;

pub use error::VocabError;
pub use imaging::{ImagingMatch, resolve_imaging};
pub use resolver::LabResolver;
pub use source::LabItemTable;
pub use vocabulary::{VocabEntry, Vocabulary, VocabularyBuilder};
