use thiserror::Error;

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("invalid lab item table: {0}")]
    Source(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not compile label pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("lab item table has no items")]
    EmptyTable,

    #[error("label synonym '{synonym}' points at unknown curated label '{label}'")]
    UnknownCuratedLabel { synonym: String, label: String },
}
