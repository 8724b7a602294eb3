//! Replay of a finished trajectory against one pathology's guideline.

use cdx_core::config::DiagnosisConfig;
use cdx_core::models::action::{ActionInput, AgentAction, ImagingStudy, LabTerm, ToolKind};
use cdx_core::models::record::{AnswerRecord, Evaluation, ScoreRecord};
use cdx_core::models::reference::ReferenceBundle;

use crate::diagnosis::{parse_diagnosis, parse_treatment, score_diagnosis};
use crate::{EvalError, Pathology, TreatmentScores, get_pathology};

/// Scores trajectories for one pathology. Holds no per-case state, so one
/// evaluator can score many cases, concurrently if need be.
pub struct Evaluator {
    pathology: Box<dyn Pathology>,
    neutral_lab_tests: Vec<u32>,
    config: DiagnosisConfig,
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("pathology", &self.pathology.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Evaluator {
    /// Fails if the pathology's guideline tables are malformed.
    pub fn new(pathology: Box<dyn Pathology>, config: DiagnosisConfig) -> Result<Self, EvalError> {
        pathology.validate()?;
        let neutral_lab_tests = pathology.neutral_lab_tests();
        Ok(Self {
            pathology,
            neutral_lab_tests,
            config,
        })
    }

    /// Evaluator for a built-in pathology, looked up by name.
    pub fn for_pathology(name: &str, config: DiagnosisConfig) -> Result<Self, EvalError> {
        let pathology =
            get_pathology(name).ok_or_else(|| EvalError::UnknownPathology(name.to_string()))?;
        Self::new(pathology, config)
    }

    pub fn pathology(&self) -> &dyn Pathology {
        self.pathology.as_ref()
    }

    /// Score the actions taken in a case and the final answer that ended it.
    pub fn evaluate(
        &self,
        trajectory: &[AgentAction],
        answer: &str,
        reference: &ReferenceBundle,
    ) -> Evaluation {
        let mut case = CaseScoring::new(self, reference);

        for (index, action) in trajectory.iter().enumerate() {
            case.score_action(index, action);
        }
        case.scores.rounds = trajectory.len() as u32;

        case.score_diagnosis(answer);
        if !trajectory.is_empty() {
            case.score_treatment(answer);
        }

        let evaluation = case.finish();
        tracing::info!(
            pathology = %evaluation.pathology,
            rounds = evaluation.scores.rounds,
            diagnosis = evaluation.scores.diagnosis,
            gracious_diagnosis = evaluation.scores.gracious_diagnosis,
            "evaluated case"
        );
        evaluation
    }
}

/// Running scores for the case being replayed.
struct CaseScoring<'a> {
    evaluator: &'a Evaluator,
    reference: &'a ReferenceBundle,
    scores: ScoreRecord,
    answers: AnswerRecord,
    treatments: TreatmentScores,
}

impl<'a> CaseScoring<'a> {
    fn new(evaluator: &'a Evaluator, reference: &'a ReferenceBundle) -> Self {
        let pathology = evaluator.pathology();
        let mut answers = AnswerRecord::default();
        for category in pathology.lab_categories() {
            answers
                .correct_laboratory_tests
                .insert(category.name.to_string(), Vec::new());
        }
        Self {
            evaluator,
            reference,
            scores: ScoreRecord::default(),
            answers,
            treatments: TreatmentScores::with_defaults(pathology.treatment_defaults()),
        }
    }

    fn score_action(&mut self, index: usize, action: &AgentAction) {
        if action.repair_count() > 0 {
            self.scores.action_parsing = 1;
        }
        tracing::debug!(index, tool = action.tool().name(), "scoring action");

        match (action.tool(), action.input()) {
            (ToolKind::Invalid, _) => self.scores.invalid_tools += 1,
            (ToolKind::PhysicalExamination, _) => self.score_physical_examination(index),
            (ToolKind::LaboratoryTests, ActionInput::LabTests(terms)) => {
                self.score_laboratory_tests(terms)
            }
            (ToolKind::Imaging, ActionInput::Imaging(study)) => self.score_imaging(study),
            (ToolKind::DiagnosticCriteria, _) => {}
            (tool, _) => tracing::warn!(
                index,
                tool = tool.name(),
                "action input does not match its tool; skipped"
            ),
        }
    }

    /// Full credit only when the examination comes first.
    fn score_physical_examination(&mut self, index: usize) {
        if index == 0 {
            self.scores.physical_examination = 1;
        }
        self.scores.late_physical_examination = 1;
    }

    /// One point per guideline category, for its first test. Tests outside
    /// every category are unnecessary unless neutral.
    fn score_laboratory_tests(&mut self, terms: &[LabTerm]) {
        let categories = self.evaluator.pathology().lab_categories();
        for term in terms {
            let category = term
                .identifier()
                .and_then(|id| categories.iter().find(|c| c.tests.contains(&id)).map(|c| (id, c)));

            match category {
                Some((id, category)) => {
                    let recorded = self
                        .answers
                        .correct_laboratory_tests
                        .entry(category.name.to_string())
                        .or_default();
                    if recorded.is_empty() {
                        self.scores.laboratory_tests += 1;
                    }
                    recorded.push(id);
                }
                None => {
                    let neutral = term
                        .identifier()
                        .is_some_and(|id| self.evaluator.neutral_lab_tests.contains(&id));
                    if !neutral {
                        self.answers.unnecessary_laboratory_tests.push(term.clone());
                    }
                }
            }
        }
    }

    /// Repeating a scan that was already counted as correct is unnecessary.
    fn score_imaging(&mut self, study: &ImagingStudy) {
        let acceptable = self.evaluator.pathology().score_imaging(
            study,
            &mut self.scores,
            self.reference,
        );
        if !acceptable || self.answers.correct_imaging.contains(study) {
            self.answers.unnecessary_imaging.push(study.clone());
        } else {
            self.answers.correct_imaging.push(study.clone());
        }
    }

    fn score_diagnosis(&mut self, answer: &str) {
        let parsed = parse_diagnosis(answer);
        if parsed.reformatted {
            self.scores.diagnosis_parsing = 1;
        }

        let threshold = self.evaluator.config.diagnosis_match_threshold;
        let score = score_diagnosis(self.evaluator.pathology(), &parsed.text, threshold);
        if score.diagnosis {
            self.scores.diagnosis = 1;
        }
        if score.gracious {
            self.scores.gracious_diagnosis = 1;
        }
        self.answers.diagnosis = parsed.text;
    }

    fn score_treatment(&mut self, answer: &str) {
        if let Some(parsed) = parse_treatment(answer) {
            if parsed.reformatted {
                self.scores.treatment_parsing = 1;
            }
            self.answers.treatment = parsed.text;
        }
        self.evaluator.pathology().score_treatment(
            &self.answers.treatment,
            self.reference,
            &mut self.treatments,
        );
    }

    fn finish(self) -> Evaluation {
        let mut answers = self.answers;
        answers.treatment_requested = self.treatments.requested;
        answers.treatment_required = self.treatments.required;
        Evaluation {
            pathology: self.evaluator.pathology().name().to_string(),
            scores: self.scores,
            answers,
        }
    }
}
