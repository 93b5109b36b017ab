//! # disa-quiz
//!
//! A multiple-choice quiz session manager: samples questions from a bank,
//! scores answers one at a time, keeps the missed questions for a retry pass,
//! and ranks finished sessions on a leaderboard.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use disa_quiz::{Leaderboard, QuestionRepository, QuestionSource, QuizError, QuizSession};
//!
//! # async fn example() -> Result<(), QuizError> {
//! let repo = QuestionRepository::default();
//! let bank = repo.load(&QuestionSource::parse("questions.json")).await?;
//! let leaderboard = Leaderboard::new();
//!
//! let mut session = QuizSession::new();
//! session.start("Alice", 3, &bank)?;
//! while let Some(question) = session.current_question().cloned() {
//!     session.submit_answer(Some(question.correct_key()))?;
//!     if let Some(done) = session.advance()? {
//!         leaderboard.record(done.to_entry());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod data;
pub mod error;
pub mod leaderboard;
pub mod models;
pub mod presenter;
pub mod protocol;
pub mod server;
pub mod session;
pub mod terminal;
pub mod ui;

pub use clock::Clock;
pub use data::{QuestionRepository, QuestionSource, normalize_records, parse_bank};
pub use error::QuizError;
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use models::{OptionKey, Question, QuestionBank};
pub use presenter::{Presenter, PresenterError, run_quiz};
pub use session::{AnswerFeedback, Phase, QuizSession, SessionCompleted};
