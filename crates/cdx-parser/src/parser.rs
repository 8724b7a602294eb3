use std::sync::{Arc, LazyLock};

use cdx_core::config::DiagnosisConfig;
use cdx_core::models::action::{ActionInput, AgentAction, ToolKind};
use cdx_vocab::fuzzy::{Scorer, extract_one};
use cdx_vocab::{LabResolver, Vocabulary};
use regex::Regex;

use crate::classify::{ClassifierContext, classify};
use crate::input::{imaging_study, lab_terms, split_list, strip_request_noise};
use crate::outcome::{InvalidReason, ParseOutcome};
use crate::state::ParseState;

static ACTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Action:").expect("valid regex"));

/// Start of the line (or sentence) that introduces the input.
static INPUT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[.\n][^\n]*Input[^\n]*:").expect("valid regex"));

static INPUT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(Action )?Input:([\s\S]*)").expect("valid regex"));

const LAB_ALIASES: [&str; 2] = ["labs", "blood work"];

/// Parses model turns into actions.
///
/// Holds only immutable data, so one parser can serve many cases at once.
#[derive(Debug, Clone)]
pub struct ActionParser {
    vocabulary: Arc<Vocabulary>,
    config: DiagnosisConfig,
}

impl ActionParser {
    pub fn new(vocabulary: Arc<Vocabulary>, config: DiagnosisConfig) -> Self {
        Self { vocabulary, config }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn config(&self) -> &DiagnosisConfig {
        &self.config
    }

    /// Parse one turn.
    pub fn parse(&self, text: &str) -> ParseOutcome {
        if text.to_lowercase().contains("diagnosis:") {
            tracing::debug!("turn carries a final diagnosis");
            return ParseOutcome::Finish {
                answer: text.to_string(),
            };
        }

        let mut state = ParseState::new(text);
        let tool = match self.extract_action(&mut state).and_then(|()| self.interpret(&mut state))
        {
            Ok(tool) => tool,
            Err(reason) => return ParseOutcome::Invalid(state.reject(reason)),
        };

        if !tool.requires_input() {
            return ParseOutcome::Action(state.finish(tool, ActionInput::None));
        }

        let typed = self
            .extract_input(&mut state)
            .and_then(|input| self.type_input(&mut state, tool, &input));
        match typed {
            Ok(input) => ParseOutcome::Action(state.finish(tool, input)),
            Err(reason) => ParseOutcome::Invalid(state.reject(reason)),
        }
    }

    /// Parse and collapse invalid turns to the sentinel action.
    pub fn parse_action(&self, text: &str) -> Option<AgentAction> {
        self.parse(text).into_action()
    }

    fn extract_action(&self, state: &mut ParseState<'_>) -> Result<(), InvalidReason> {
        let raw = state.raw;
        let marker = ACTION_MARKER
            .find(raw)
            .ok_or(InvalidReason::NoActionMarker)?;
        let rest = &raw[marker.end()..];
        let end = INPUT_LINE.find(rest).map_or(rest.len(), |m| m.start());
        let mut action = rest[..end].trim().to_string();
        tracing::debug!(action = %action, "extracted action");

        if let Some((name, fragment)) = action.split_once('-') {
            state.prepend = fragment.trim().to_string();
            action = name.trim().to_string();
            state.repair("dash in action");
        }

        let lower = action.to_lowercase();
        if LAB_ALIASES.iter().any(|alias| lower.contains(alias)) {
            action = ToolKind::LaboratoryTests.name().to_string();
            state.repair("lab alias");
        }

        state.action = action;
        Ok(())
    }

    fn interpret(&self, state: &mut ParseState<'_>) -> Result<ToolKind, InvalidReason> {
        let names = ToolKind::VALID.map(|t| t.name());
        let best = extract_one(&state.action, names, Scorer::WRatio);

        if let Some(found) = best
            && found.score > self.config.action_match_threshold
        {
            if found.score != 100 {
                state.repair("fuzzy tool name");
            }
            return ToolKind::from_name(found.choice).ok_or(InvalidReason::UnknownTool);
        }

        state.repair("tool inferred from action text");
        let ctx = ClassifierContext {
            vocabulary: &self.vocabulary,
            keyword_share: self.config.keyword_share_threshold,
        };
        let classification = classify(&ctx, &state.action).ok_or(InvalidReason::UnknownTool)?;
        state.prepend = state.action.clone();
        Ok(classification.tool)
    }

    fn extract_input(&self, state: &mut ParseState<'_>) -> Result<String, InvalidReason> {
        let raw = state.raw;
        let extracted = match INPUT_MARKER.captures(raw) {
            Some(caps) => {
                if caps.get(1).is_none() {
                    state.repair("bare input marker");
                }
                let value = caps.get(2).map_or("", |m| m.as_str());
                if value.trim() == "None" { "" } else { value }
            }
            None if !state.prepend.is_empty() => {
                state.repair("input taken from action line");
                ""
            }
            None => return Err(InvalidReason::MissingInput),
        };

        let input = format!("{} {}", state.prepend, extracted).trim().to_string();
        if input.is_empty() {
            return Err(InvalidReason::MissingInput);
        }
        Ok(input)
    }

    fn type_input(
        &self,
        state: &mut ParseState<'_>,
        tool: ToolKind,
        input: &str,
    ) -> Result<ActionInput, InvalidReason> {
        match tool {
            ToolKind::LaboratoryTests => {
                let (cleaned, removed) = strip_request_noise(input);
                for _ in 0..removed {
                    state.repair("request noise word");
                }
                let resolver = LabResolver::new(&self.vocabulary, &self.config);
                let terms = lab_terms(&resolver, &split_list(&cleaned));
                if terms.is_empty() {
                    return Err(InvalidReason::NoLabTests);
                }
                Ok(ActionInput::LabTests(terms))
            }
            ToolKind::Imaging => imaging_study(input)
                .map(ActionInput::Imaging)
                .ok_or(InvalidReason::IncompleteImaging),
            ToolKind::DiagnosticCriteria => {
                let names = split_list(input);
                if names.is_empty() {
                    return Err(InvalidReason::NoPathologies);
                }
                Ok(ActionInput::Pathologies(names))
            }
            ToolKind::PhysicalExamination | ToolKind::Invalid => Ok(ActionInput::None),
        }
    }
}
