use cdx_core::models::action::AgentAction;
use serde::Serialize;
use thiserror::Error;

/// Why a turn could not be turned into a callable action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    #[error("no \"Action:\" marker in the turn")]
    NoActionMarker,

    #[error("action names no known tool")]
    UnknownTool,

    #[error("tool requires an input but none was given")]
    MissingInput,

    #[error("no laboratory test could be read from the input")]
    NoLabTests,

    #[error("imaging input lacks a recognizable modality or region")]
    IncompleteImaging,

    #[error("no pathology names in the input")]
    NoPathologies,
}

/// A turn that was classified invalid. Callers record it as the sentinel
/// invalid-tool action and tell the model to try again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidAction {
    pub raw_log: String,
    /// Repairs applied before parsing gave up.
    pub repair_count: u32,
    pub reason: InvalidReason,
}

impl InvalidAction {
    pub fn to_action(&self) -> AgentAction {
        AgentAction::invalid(self.raw_log.clone(), self.repair_count)
    }
}

/// Result of parsing one model turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ParseOutcome {
    /// A callable tool with its typed input.
    Action(AgentAction),
    /// The model gave its final diagnosis. `answer` is the verbatim turn.
    Finish { answer: String },
    Invalid(InvalidAction),
}

impl ParseOutcome {
    /// The action to append to the trajectory. Invalid turns become the
    /// sentinel action; a finishing turn has none.
    pub fn into_action(self) -> Option<AgentAction> {
        match self {
            ParseOutcome::Action(action) => Some(action),
            ParseOutcome::Invalid(invalid) => Some(invalid.to_action()),
            ParseOutcome::Finish { .. } => None,
        }
    }

    pub fn is_finish(&self) -> bool {
        matches!(self, ParseOutcome::Finish { .. })
    }
}
