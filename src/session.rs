//! Quiz session engine.
//!
//! A [`QuizSession`] owns everything about one participant's attempt and only
//! changes through the transitions below:
//!
//! ```text
//! NotStarted --start--> AwaitingSelection(0)
//! AwaitingSelection(i) --submit_answer--> AwaitingAdvance(i)
//! AwaitingAdvance(i) --advance--> AwaitingSelection(i + 1) | Complete
//! Complete --start | retry_wrong--> AwaitingSelection(0)
//! any --restart--> NotStarted
//! ```
//!
//! Every operation validates before mutating, so a failed call leaves the
//! session exactly as it was.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info};

use crate::clock::{Clock, elapsed_seconds};
use crate::error::QuizError;
use crate::leaderboard::LeaderboardEntry;
use crate::models::{OptionKey, Question, QuestionBank};

/// Where a session is in the question-by-question protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    /// Question `i` is shown, waiting for the participant's answer.
    AwaitingSelection(usize),
    /// Question `i` was answered and its feedback shown, waiting for "next".
    AwaitingAdvance(usize),
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::NotStarted => f.write_str("not started"),
            Phase::AwaitingSelection(i) => {
                write!(f, "awaiting a selection for question {}", i + 1)
            }
            Phase::AwaitingAdvance(i) => write!(f, "awaiting advance past question {}", i + 1),
            Phase::Complete => f.write_str("complete"),
        }
    }
}

/// What the participant sees after submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub selected: Option<OptionKey>,
    pub correct_key: OptionKey,
    pub correct_text: String,
    pub explanation: String,
}

impl AnswerFeedback {
    fn new(question: &Question, selected: Option<OptionKey>) -> Self {
        Self {
            correct: question.is_correct(selected),
            selected,
            correct_key: question.correct_key(),
            correct_text: question.correct_text().to_string(),
            explanation: question.explanation().to_string(),
        }
    }
}

/// Emitted once when a pass finishes; the caller records it on the leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCompleted {
    pub name: String,
    pub score: usize,
    pub total: usize,
    pub elapsed_seconds: f64,
}

impl SessionCompleted {
    pub fn to_entry(&self) -> LeaderboardEntry {
        LeaderboardEntry::new(self.name.clone(), self.score, self.elapsed_seconds)
    }
}

/// One participant's quiz attempt.
#[derive(Debug, Clone)]
pub struct QuizSession {
    clock: Clock,
    phase: Phase,
    participant: String,
    question_set: Vec<Arc<Question>>,
    current_index: usize,
    score: usize,
    wrong_answers: Vec<Arc<Question>>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    pending_selection: Option<OptionKey>,
    answer_revealed: bool,
    retry_pass: bool,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::with_clock(Clock::default())
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock,
            phase: Phase::NotStarted,
            participant: String::new(),
            question_set: Vec::new(),
            current_index: 0,
            score: 0,
            wrong_answers: Vec::new(),
            started_at: None,
            finished_at: None,
            pending_selection: None,
            answer_revealed: false,
            retry_pass: false,
        }
    }

    /// Start a fresh quiz of `count` questions sampled from `bank`.
    pub fn start(
        &mut self,
        name: &str,
        count: usize,
        bank: &QuestionBank,
    ) -> Result<(), QuizError> {
        self.start_with(name, count, bank, &mut rand::rng())
    }

    /// Same as [`start`](Self::start) with a caller-supplied RNG.
    pub fn start_with<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        count: usize,
        bank: &QuestionBank,
        rng: &mut R,
    ) -> Result<(), QuizError> {
        self.ensure(
            "start",
            matches!(self.phase, Phase::NotStarted | Phase::Complete),
        )?;

        let name = name.trim();
        if name.is_empty() {
            return Err(QuizError::InvalidRequest(
                "participant name must not be empty".to_string(),
            ));
        }

        let questions = bank.sample_with(count, rng)?;
        self.begin(name.to_string(), questions, false);
        Ok(())
    }

    /// Answer the current question. `None` counts as a wrong answer.
    ///
    /// Re-submitting while the feedback is shown returns the recorded
    /// feedback without scoring again.
    pub fn submit_answer(
        &mut self,
        selection: Option<OptionKey>,
    ) -> Result<AnswerFeedback, QuizError> {
        match self.phase {
            Phase::AwaitingSelection(i) => {
                let question = Arc::clone(&self.question_set[i]);
                let feedback = AnswerFeedback::new(&question, selection);
                if feedback.correct {
                    self.score += 1;
                }
                self.pending_selection = selection;
                self.answer_revealed = true;
                self.phase = Phase::AwaitingAdvance(i);
                debug!(
                    question = i,
                    correct = feedback.correct,
                    score = self.score,
                    "answer submitted"
                );
                Ok(feedback)
            }
            Phase::AwaitingAdvance(i) => Ok(AnswerFeedback::new(
                &self.question_set[i],
                self.pending_selection,
            )),
            phase => Err(QuizError::InvalidOperation {
                operation: "submit an answer",
                phase,
            }),
        }
    }

    /// Answer with a raw option label. Labels that name no option of the
    /// current question count as no selection.
    pub fn submit_label(&mut self, label: Option<&str>) -> Result<AnswerFeedback, QuizError> {
        self.submit_answer(label.and_then(|l| l.parse().ok()))
    }

    /// Move past the answered question.
    ///
    /// Returns the completion event when this was the last question of the pass.
    pub fn advance(&mut self) -> Result<Option<SessionCompleted>, QuizError> {
        let Phase::AwaitingAdvance(i) = self.phase else {
            return Err(QuizError::InvalidOperation {
                operation: "advance",
                phase: self.phase,
            });
        };

        let question = &self.question_set[i];
        if !question.is_correct(self.pending_selection) {
            self.wrong_answers.push(Arc::clone(question));
        }
        self.pending_selection = None;
        self.answer_revealed = false;
        self.current_index = i + 1;

        if self.current_index < self.question_set.len() {
            self.phase = Phase::AwaitingSelection(self.current_index);
            return Ok(None);
        }

        self.phase = Phase::Complete;
        self.finished_at = Some(self.clock.now());
        let completed = SessionCompleted {
            name: self.participant.clone(),
            score: self.score,
            total: self.question_set.len(),
            elapsed_seconds: self.elapsed_seconds(),
        };
        info!(
            participant = %completed.name,
            score = completed.score,
            total = completed.total,
            elapsed = completed.elapsed_seconds,
            retry = self.retry_pass,
            "quiz pass complete"
        );
        Ok(Some(completed))
    }

    /// Start a new pass over exactly the questions missed in the last one.
    pub fn retry_wrong(&mut self) -> Result<(), QuizError> {
        self.ensure(
            "retry wrong answers",
            self.phase == Phase::Complete && !self.wrong_answers.is_empty(),
        )?;

        let questions = std::mem::take(&mut self.wrong_answers);
        let participant = std::mem::take(&mut self.participant);
        self.begin(participant, questions, true);
        Ok(())
    }

    /// Discard everything and go back to `NotStarted`. Always succeeds.
    pub fn restart(&mut self) {
        *self = Self::with_clock(self.clock);
    }

    fn begin(&mut self, participant: String, questions: Vec<Arc<Question>>, retry_pass: bool) {
        debug!(%participant, questions = questions.len(), retry_pass, "starting quiz pass");
        self.participant = participant;
        self.question_set = questions;
        self.current_index = 0;
        self.score = 0;
        self.wrong_answers = Vec::new();
        self.started_at = Some(self.clock.now());
        self.finished_at = None;
        self.pending_selection = None;
        self.answer_revealed = false;
        self.retry_pass = retry_pass;
        self.phase = Phase::AwaitingSelection(0);
    }

    fn ensure(&self, operation: &'static str, allowed: bool) -> Result<(), QuizError> {
        if allowed {
            Ok(())
        } else {
            Err(QuizError::InvalidOperation {
                operation,
                phase: self.phase,
            })
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn participant(&self) -> &str {
        &self.participant
    }

    pub fn question_set(&self) -> &[Arc<Question>] {
        &self.question_set
    }

    pub fn total(&self) -> usize {
        self.question_set.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question being asked or reviewed, if a pass is in progress.
    pub fn current_question(&self) -> Option<&Arc<Question>> {
        match self.phase {
            Phase::AwaitingSelection(i) | Phase::AwaitingAdvance(i) => self.question_set.get(i),
            Phase::NotStarted | Phase::Complete => None,
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn wrong_answers(&self) -> &[Arc<Question>] {
        &self.wrong_answers
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn pending_selection(&self) -> Option<OptionKey> {
        self.pending_selection
    }

    pub fn answer_revealed(&self) -> bool {
        self.answer_revealed
    }

    pub fn is_retry_pass(&self) -> bool {
        self.retry_pass
    }

    /// Seconds since the pass started; frozen once it completes.
    pub fn elapsed_seconds(&self) -> f64 {
        match self.started_at {
            Some(start) => {
                let end = self.finished_at.unwrap_or_else(|| self.clock.now());
                elapsed_seconds(start, end)
            }
            None => 0.0,
        }
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}
