use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Tool name recorded for a turn that could not be parsed into a valid action.
/// The model sees it followed by "is not a valid tool".
pub const INVALID_TOOL_NAME: &str = "Provide a diagnosis and treatment OR a valid tool. That";

/// The tools a model may call during a diagnostic encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ToolKind {
    PhysicalExamination,
    LaboratoryTests,
    Imaging,
    DiagnosticCriteria,
    /// Sentinel for a turn the parser could not interpret.
    Invalid,
}

impl ToolKind {
    /// The callable tools, in the order they are offered to the model.
    pub const VALID: [ToolKind; 4] = [
        ToolKind::PhysicalExamination,
        ToolKind::LaboratoryTests,
        ToolKind::Imaging,
        ToolKind::DiagnosticCriteria,
    ];

    /// Display name as written in the prompt ("Laboratory Tests").
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::PhysicalExamination => "Physical Examination",
            ToolKind::LaboratoryTests => "Laboratory Tests",
            ToolKind::Imaging => "Imaging",
            ToolKind::DiagnosticCriteria => "Diagnostic Criteria",
            ToolKind::Invalid => INVALID_TOOL_NAME,
        }
    }

    /// Exact lookup of a valid tool by display name.
    pub fn from_name(name: &str) -> Option<ToolKind> {
        Self::VALID.into_iter().find(|t| t.name() == name)
    }

    /// Whether the tool needs an "Action Input" to be callable.
    pub fn requires_input(&self) -> bool {
        matches!(
            self,
            ToolKind::LaboratoryTests | ToolKind::Imaging | ToolKind::DiagnosticCriteria
        )
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One requested laboratory test after vocabulary resolution.
///
/// Unresolved terms are kept verbatim so the model can be told the result is
/// not available instead of the request silently disappearing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum LabTerm {
    Identifier(u32),
    Unresolved(String),
}

impl LabTerm {
    pub fn identifier(&self) -> Option<u32> {
        match self {
            LabTerm::Identifier(id) => Some(*id),
            LabTerm::Unresolved(_) => None,
        }
    }
}

impl From<u32> for LabTerm {
    fn from(id: u32) -> Self {
        LabTerm::Identifier(id)
    }
}

/// A requested scan: broad modality ("CT") or a specific procedure ("EUS"),
/// plus the body region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImagingStudy {
    pub modality: String,
    pub region: String,
}

impl ImagingStudy {
    pub fn new(modality: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            modality: modality.into(),
            region: region.into(),
        }
    }
}

/// Typed input of a parsed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum ActionInput {
    None,
    LabTests(Vec<LabTerm>),
    Imaging(ImagingStudy),
    Pathologies(Vec<String>),
}

/// A single parsed model turn. Built once by the parser and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AgentAction {
    tool: ToolKind,
    input: ActionInput,
    raw_log: String,
    repair_count: u32,
}

impl AgentAction {
    pub fn new(
        tool: ToolKind,
        input: ActionInput,
        raw_log: impl Into<String>,
        repair_count: u32,
    ) -> Self {
        Self {
            tool,
            input,
            raw_log: raw_log.into(),
            repair_count,
        }
    }

    /// The sentinel action recorded for an uninterpretable turn.
    pub fn invalid(raw_log: impl Into<String>, repair_count: u32) -> Self {
        Self::new(ToolKind::Invalid, ActionInput::None, raw_log, repair_count)
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn input(&self) -> &ActionInput {
        &self.input
    }

    pub fn raw_log(&self) -> &str {
        &self.raw_log
    }

    /// Number of non-standard interpretations needed to produce this action.
    pub fn repair_count(&self) -> u32 {
        self.repair_count
    }

    pub fn is_invalid(&self) -> bool {
        self.tool == ToolKind::Invalid
    }
}
