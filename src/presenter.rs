//! Presentation surface and the driver that runs a quiz through it.
//!
//! The driver only ever calls the engine in response to discrete presenter
//! events, so any frontend that can answer these calls can host a quiz.

use std::io;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::error::QuizError;
use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::models::{OptionKey, Question, QuestionBank};
use crate::session::{AnswerFeedback, QuizSession};

/// Failure reported by a presenter.
#[derive(Debug, Error)]
pub enum PresenterError {
    /// The participant asked to leave.
    #[error("participant quit")]
    Quit,
    /// The session refused a transition.
    #[error(transparent)]
    Engine(#[from] QuizError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type PresenterResult<T> = Result<T, PresenterError>;

/// Input collection and rendering for one participant.
pub trait Presenter {
    /// Whether the participant wants to begin a quiz.
    fn collect_start(&mut self) -> PresenterResult<bool>;
    fn collect_name(&mut self) -> PresenterResult<String>;
    /// A question count in `min..=max`.
    fn collect_count(&mut self, min: usize, max: usize) -> PresenterResult<usize>;

    fn render_question(
        &mut self,
        question: &Question,
        index: usize,
        total: usize,
    ) -> PresenterResult<()>;
    fn collect_selection(&mut self) -> PresenterResult<Option<OptionKey>>;
    fn collect_submit(&mut self) -> PresenterResult<bool>;
    fn render_feedback(&mut self, feedback: &AnswerFeedback) -> PresenterResult<()>;
    fn collect_next(&mut self) -> PresenterResult<bool>;

    fn render_summary(
        &mut self,
        score: usize,
        total: usize,
        elapsed_seconds: f64,
    ) -> PresenterResult<()>;
    fn render_wrong_answers(&mut self, questions: &[Arc<Question>]) -> PresenterResult<()>;
    fn render_leaderboard(&mut self, entries: &[LeaderboardEntry]) -> PresenterResult<()>;
    fn collect_retry(&mut self) -> PresenterResult<bool>;
    fn collect_restart(&mut self) -> PresenterResult<bool>;

    /// Show a recoverable problem, such as an empty name.
    fn render_error(&mut self, message: &str) -> PresenterResult<()>;
}

/// Run quizzes through `presenter` until the participant quits.
///
/// Every completed pass is recorded on `leaderboard` exactly once.
pub fn run_quiz<P: Presenter + ?Sized>(
    presenter: &mut P,
    bank: &QuestionBank,
    leaderboard: &Leaderboard,
) -> Result<(), QuizError> {
    run_quiz_with(presenter, bank, leaderboard, QuizSession::new())
}

/// Same as [`run_quiz`] with a caller-prepared session (e.g. a fixed clock).
pub fn run_quiz_with<P: Presenter + ?Sized>(
    presenter: &mut P,
    bank: &QuestionBank,
    leaderboard: &Leaderboard,
    mut session: QuizSession,
) -> Result<(), QuizError> {
    match drive(presenter, bank, leaderboard, &mut session) {
        Ok(()) | Err(PresenterError::Quit) => Ok(()),
        Err(PresenterError::Engine(e)) => Err(e),
        Err(PresenterError::Io(e)) => Err(QuizError::Io(e)),
    }
}

fn drive<P: Presenter + ?Sized>(
    presenter: &mut P,
    bank: &QuestionBank,
    leaderboard: &Leaderboard,
    session: &mut QuizSession,
) -> PresenterResult<()> {
    if bank.is_empty() {
        presenter.render_error("The question bank has no valid questions.")?;
        return Ok(());
    }

    loop {
        if !presenter.collect_start()? {
            return Ok(());
        }
        start_session(presenter, bank, session)?;

        loop {
            run_pass(presenter, session, leaderboard)?;

            let wants_retry = !session.wrong_answers().is_empty() && presenter.collect_retry()?;
            if wants_retry {
                if let Err(e) = session.retry_wrong() {
                    warn!(error = %e, "retry of wrong answers refused");
                    presenter.render_error(&e.to_string())?;
                } else {
                    continue;
                }
            }

            if presenter.collect_restart()? {
                session.restart();
                break;
            }
            return Ok(());
        }
    }
}

/// Collect start parameters until the engine accepts them.
fn start_session<P: Presenter + ?Sized>(
    presenter: &mut P,
    bank: &QuestionBank,
    session: &mut QuizSession,
) -> PresenterResult<()> {
    loop {
        let name = presenter.collect_name()?;
        let count = presenter.collect_count(1, bank.len())?;
        match session.start(&name, count, bank) {
            Ok(()) => return Ok(()),
            Err(e) => {
                debug!(error = %e, "start parameters rejected");
                presenter.render_error(&e.to_string())?;
            }
        }
    }
}

/// Ask every question of the current pass, then show the results.
fn run_pass<P: Presenter + ?Sized>(
    presenter: &mut P,
    session: &mut QuizSession,
    leaderboard: &Leaderboard,
) -> PresenterResult<()> {
    let total = session.total();

    while let Some(question) = session.current_question().cloned() {
        let index = session.current_index();
        presenter.render_question(&question, index, total)?;

        let selection = loop {
            let selection = presenter.collect_selection()?;
            if presenter.collect_submit()? {
                break selection;
            }
        };
        let feedback = session.submit_answer(selection)?;
        presenter.render_feedback(&feedback)?;

        while !presenter.collect_next()? {}
        if let Some(completed) = session.advance()? {
            leaderboard.record(completed.to_entry());
            presenter.render_summary(
                completed.score,
                completed.total,
                completed.elapsed_seconds,
            )?;
            presenter.render_wrong_answers(session.wrong_answers())?;
            presenter.render_leaderboard(&leaderboard.ranked())?;
        }
    }

    Ok(())
}
