use cdx_core::models::action::{ActionInput, AgentAction, ToolKind};

use crate::outcome::{InvalidAction, InvalidReason};

/// Scratch state of a single parse call. Built fresh for every turn and
/// consumed when the turn ends in an action or an invalid outcome.
#[derive(Debug)]
pub(crate) struct ParseState<'a> {
    pub raw: &'a str,
    /// Action name as currently understood.
    pub action: String,
    /// Input text recovered from the action line itself.
    pub prepend: String,
    pub repairs: u32,
}

impl<'a> ParseState<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            action: String::new(),
            prepend: String::new(),
            repairs: 0,
        }
    }

    pub fn repair(&mut self, what: &'static str) {
        self.repairs += 1;
        tracing::debug!(repair = what, repairs = self.repairs, "applied parse repair");
    }

    pub fn finish(self, tool: ToolKind, input: ActionInput) -> AgentAction {
        AgentAction::new(tool, input, self.raw, self.repairs)
    }

    pub fn reject(self, reason: InvalidReason) -> InvalidAction {
        tracing::info!(
            reason = %reason,
            repairs = self.repairs,
            "turn classified as invalid action"
        );
        InvalidAction {
            raw_log: self.raw.to_string(),
            repair_count: self.repairs,
            reason,
        }
    }
}
