use std::path::Path;

use cdx_core::models::action::AgentAction;
use cdx_core::models::record::Evaluation;
use cdx_core::models::reference::ReferenceBundle;
use cdx_eval::Evaluator;
use cdx_parser::{ActionParser, ParseOutcome};
use eyre::{Result, WrapErr};
use serde::Deserialize;

/// Line that separates turns in a transcript file.
pub const TURN_SEPARATOR: &str = "---";

/// A recorded case: the model's turns, optionally its final answer, and the
/// admission's ground truth.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseFile {
    pub turns: Vec<String>,
    /// Falls back to the first turn that gives a final diagnosis.
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub reference: ReferenceBundle,
}

impl CaseFile {
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).wrap_err("invalid case file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read case file {}", path.display()))?;
        Self::from_json(&contents).wrap_err_with(|| format!("in {}", path.display()))
    }
}

/// Non-empty turns of a transcript, trimmed. Turns are separated by lines
/// holding only `---`.
pub fn split_turns(transcript: &str) -> Vec<String> {
    let mut turns = Vec::new();
    let mut current = String::new();
    for line in transcript.lines() {
        if line.trim() == TURN_SEPARATOR {
            turns.push(std::mem::take(&mut current));
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    turns.push(current);

    turns
        .into_iter()
        .map(|turn| turn.trim().to_string())
        .filter(|turn| !turn.is_empty())
        .collect()
}

/// Trajectory rebuilt from a list of turns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replay {
    pub trajectory: Vec<AgentAction>,
    /// The finishing turn, if the model reached one.
    pub answer: Option<String>,
}

/// Parse turns in order until one gives the final diagnosis. Invalid turns
/// stay in the trajectory as invalid-tool actions.
pub fn replay<S: AsRef<str>>(parser: &ActionParser, turns: &[S]) -> Replay {
    let mut replay = Replay::default();
    for (index, turn) in turns.iter().enumerate() {
        match parser.parse(turn.as_ref()) {
            ParseOutcome::Finish { answer } => {
                let ignored = turns.len() - index - 1;
                if ignored > 0 {
                    tracing::warn!(ignored, "turns after the final diagnosis are ignored");
                }
                replay.answer = Some(answer);
                break;
            }
            outcome => replay.trajectory.extend(outcome.into_action()),
        }
    }
    replay
}

/// Replay a recorded case and score it.
pub fn evaluate_case(parser: &ActionParser, evaluator: &Evaluator, case: &CaseFile) -> Evaluation {
    let replay = replay(parser, &case.turns);
    let answer = case
        .answer
        .as_deref()
        .or(replay.answer.as_deref())
        .unwrap_or_default();
    if answer.is_empty() {
        tracing::warn!("case has no final answer");
    }
    evaluator.evaluate(&replay.trajectory, answer, &case.reference)
}
