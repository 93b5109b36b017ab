//! Terminal frontend.

mod presenter;
mod quiz;
mod result;
mod welcome;

use std::sync::Arc;

use ratatui::{prelude::*, widgets::Block};

use crate::leaderboard::LeaderboardEntry;
use crate::models::{OptionKey, Question};
use crate::session::AnswerFeedback;

pub use presenter::TerminalPresenter;

/// What the terminal is currently showing.
#[derive(Debug, Clone)]
pub enum Screen {
    Welcome {
        bank_size: usize,
    },
    NameEntry {
        input: String,
        error: Option<String>,
    },
    CountEntry {
        value: usize,
        min: usize,
        max: usize,
    },
    Question {
        question: Question,
        index: usize,
        total: usize,
        cursor: Option<OptionKey>,
        feedback: Option<AnswerFeedback>,
    },
    Summary(Summary),
}

/// Results of a finished pass.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub score: usize,
    pub total: usize,
    pub elapsed_seconds: f64,
    pub wrong_answers: Vec<Arc<Question>>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub scroll: usize,
    pub error: Option<String>,
}

pub fn render(frame: &mut Frame, screen: &Screen) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match screen {
        Screen::Welcome { bank_size } => welcome::render_welcome(frame, area, *bank_size),
        Screen::NameEntry { input, error } => {
            welcome::render_name_entry(frame, area, input, error.as_deref())
        }
        Screen::CountEntry { value, min, max } => {
            welcome::render_count_entry(frame, area, *value, *min, *max)
        }
        Screen::Question {
            question,
            index,
            total,
            cursor,
            feedback,
        } => quiz::render(
            frame,
            area,
            question,
            *index,
            *total,
            *cursor,
            feedback.as_ref(),
        ),
        Screen::Summary(summary) => result::render(frame, area, summary),
    }
}
