use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("malformed guideline for '{pathology}': {reason}")]
    Guideline { pathology: String, reason: String },

    #[error("unknown pathology: {0}")]
    UnknownPathology(String),
}
