use std::io;
use std::sync::Arc;

use crossterm::event::KeyCode;

use crate::leaderboard::LeaderboardEntry;
use crate::models::{OptionKey, Question};
use crate::presenter::{Presenter, PresenterError, PresenterResult};
use crate::session::AnswerFeedback;
use crate::terminal::{TerminalGuard, next_key};

use super::{Screen, Summary};

/// Question count offered before the participant adjusts it.
const DEFAULT_COUNT: usize = 5;
const PAGE_STEP: usize = 10;

/// Interactive terminal implementation of [`Presenter`].
pub struct TerminalPresenter {
    guard: TerminalGuard,
    screen: Screen,
    bank_size: usize,
    pending_error: Option<String>,
    restart_choice: Option<bool>,
}

impl TerminalPresenter {
    pub fn new(bank_size: usize) -> io::Result<Self> {
        Ok(Self {
            guard: TerminalGuard::enter()?,
            screen: Screen::Welcome { bank_size },
            bank_size,
            pending_error: None,
            restart_choice: None,
        })
    }

    fn draw(&mut self) -> io::Result<()> {
        let screen = &self.screen;
        self.guard
            .terminal()
            .draw(|frame| super::render(frame, screen))?;
        Ok(())
    }

    fn show(&mut self, screen: Screen) -> io::Result<()> {
        self.screen = screen;
        self.draw()
    }

    fn update_summary(&mut self, update: impl FnOnce(&mut Summary)) -> io::Result<()> {
        if let Screen::Summary(summary) = &mut self.screen {
            update(summary);
        }
        self.draw()
    }

    fn scroll(&mut self, key: KeyCode) -> io::Result<()> {
        match key {
            KeyCode::Down | KeyCode::Char('j') => self.update_summary(|s| s.scroll += 1),
            KeyCode::Up | KeyCode::Char('k') => {
                self.update_summary(|s| s.scroll = s.scroll.saturating_sub(1))
            }
            _ => Ok(()),
        }
    }

    fn move_cursor(&mut self, forward: bool) {
        if let Screen::Question { cursor, .. } = &mut self.screen {
            let len = OptionKey::ALL.len();
            let next = match (*cursor, forward) {
                (None, true) => 0,
                (None, false) => len - 1,
                (Some(key), true) => (key.index() + 1) % len,
                (Some(key), false) => (key.index() + len - 1) % len,
            };
            *cursor = OptionKey::from_index(next);
        }
    }

    fn set_cursor(&mut self, key: OptionKey) {
        if let Screen::Question { cursor, .. } = &mut self.screen {
            *cursor = Some(key);
        }
    }

    fn cursor(&self) -> Option<OptionKey> {
        match &self.screen {
            Screen::Question { cursor, .. } => *cursor,
            _ => None,
        }
    }
}

impl Presenter for TerminalPresenter {
    fn collect_start(&mut self) -> PresenterResult<bool> {
        self.show(Screen::Welcome {
            bank_size: self.bank_size,
        })?;
        loop {
            match next_key()? {
                KeyCode::Enter => return Ok(true),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(false),
                _ => {}
            }
        }
    }

    fn collect_name(&mut self) -> PresenterResult<String> {
        let mut input = String::new();
        let error = self.pending_error.take();
        loop {
            self.show(Screen::NameEntry {
                input: input.clone(),
                error: error.clone(),
            })?;
            match next_key()? {
                KeyCode::Enter => return Ok(input),
                KeyCode::Esc => return Err(PresenterError::Quit),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) => input.push(c),
                _ => {}
            }
        }
    }

    fn collect_count(&mut self, min: usize, max: usize) -> PresenterResult<usize> {
        let mut value = DEFAULT_COUNT.clamp(min, max);
        loop {
            self.show(Screen::CountEntry { value, min, max })?;
            match next_key()? {
                KeyCode::Enter => return Ok(value),
                KeyCode::Esc | KeyCode::Char('q') => return Err(PresenterError::Quit),
                KeyCode::Up | KeyCode::Right | KeyCode::Char('k') | KeyCode::Char('+') => {
                    value = (value + 1).min(max)
                }
                KeyCode::Down | KeyCode::Left | KeyCode::Char('j') | KeyCode::Char('-') => {
                    value = value.saturating_sub(1).max(min)
                }
                KeyCode::PageUp => value = (value + PAGE_STEP).min(max),
                KeyCode::PageDown => value = value.saturating_sub(PAGE_STEP).max(min),
                _ => {}
            }
        }
    }

    fn render_question(
        &mut self,
        question: &Question,
        index: usize,
        total: usize,
    ) -> PresenterResult<()> {
        self.show(Screen::Question {
            question: question.clone(),
            index,
            total,
            cursor: None,
            feedback: None,
        })?;
        Ok(())
    }

    fn collect_selection(&mut self) -> PresenterResult<Option<OptionKey>> {
        loop {
            self.draw()?;
            match next_key()? {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(self.cursor()),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Err(PresenterError::Quit);
                }
                KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
                KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
                KeyCode::Char(c) => {
                    if let Ok(key) = c.to_string().parse() {
                        self.set_cursor(key);
                    }
                }
                _ => {}
            }
        }
    }

    fn collect_submit(&mut self) -> PresenterResult<bool> {
        // Enter in collect_selection already committed the answer
        Ok(true)
    }

    fn render_feedback(&mut self, answer: &AnswerFeedback) -> PresenterResult<()> {
        if let Screen::Question { feedback, .. } = &mut self.screen {
            *feedback = Some(answer.clone());
        }
        self.draw()?;
        Ok(())
    }

    fn collect_next(&mut self) -> PresenterResult<bool> {
        match next_key()? {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') => Ok(true),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Err(PresenterError::Quit),
            _ => Ok(false),
        }
    }

    fn render_summary(
        &mut self,
        score: usize,
        total: usize,
        elapsed_seconds: f64,
    ) -> PresenterResult<()> {
        self.restart_choice = None;
        self.show(Screen::Summary(Summary {
            score,
            total,
            elapsed_seconds,
            ..Default::default()
        }))?;
        Ok(())
    }

    fn render_wrong_answers(&mut self, questions: &[Arc<Question>]) -> PresenterResult<()> {
        self.update_summary(|s| s.wrong_answers = questions.to_vec())?;
        Ok(())
    }

    fn render_leaderboard(&mut self, entries: &[LeaderboardEntry]) -> PresenterResult<()> {
        self.update_summary(|s| s.leaderboard = entries.to_vec())?;
        Ok(())
    }

    fn collect_retry(&mut self) -> PresenterResult<bool> {
        loop {
            match next_key()? {
                KeyCode::Char('w') | KeyCode::Char('W') => return Ok(true),
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    self.restart_choice = Some(true);
                    return Ok(false);
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.restart_choice = Some(false);
                    return Ok(false);
                }
                key => self.scroll(key)?,
            }
        }
    }

    fn collect_restart(&mut self) -> PresenterResult<bool> {
        if let Some(choice) = self.restart_choice.take() {
            return Ok(choice);
        }
        loop {
            match next_key()? {
                KeyCode::Char('r') | KeyCode::Char('R') => return Ok(true),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(false),
                key => self.scroll(key)?,
            }
        }
    }

    fn render_error(&mut self, message: &str) -> PresenterResult<()> {
        if matches!(self.screen, Screen::Summary(_)) {
            self.update_summary(|s| s.error = Some(message.to_string()))?;
        } else {
            self.pending_error = Some(message.to_string());
        }
        Ok(())
    }
}
