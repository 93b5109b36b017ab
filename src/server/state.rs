//! Server state management.
//!
//! The bank and leaderboard are shared by every connection; each connection
//! owns its own [`QuizSession`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use crate::leaderboard::Leaderboard;
use crate::models::QuestionBank;
use crate::protocol::{ClientMessage, ReviewItem, ServerMessage};
use crate::session::QuizSession;

/// Status of one connected participant, for logs and host queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantStatus {
    /// Connected, no quiz started yet.
    Idle,
    /// Answering question `index` of `total`.
    Answering {
        name: String,
        index: usize,
        total: usize,
    },
    /// Finished a pass.
    Finished { name: String, score: usize },
}

/// State shared across all connections.
pub struct ServerState {
    bank: Arc<QuestionBank>,
    leaderboard: Arc<Leaderboard>,
    participants: Mutex<HashMap<Uuid, ParticipantStatus>>,
}

impl ServerState {
    pub fn new(bank: Arc<QuestionBank>, leaderboard: Arc<Leaderboard>) -> Self {
        Self {
            bank,
            leaderboard,
            participants: Mutex::new(HashMap::new()),
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Number of currently connected participants.
    pub fn connected_count(&self) -> usize {
        self.participants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn participant_status(&self, id: &Uuid) -> Option<ParticipantStatus> {
        self.participants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub(crate) fn connect(&self, id: Uuid) {
        self.set_status(id, ParticipantStatus::Idle);
    }

    pub(crate) fn disconnect(&self, id: &Uuid) {
        self.participants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
    }

    fn set_status(&self, id: Uuid, status: ParticipantStatus) {
        self.participants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, status);
    }

    /// Apply one client message to `session` and return the replies, in order.
    ///
    /// Refused requests produce a single `Error` reply and leave the session as is.
    pub fn handle_message(
        &self,
        id: Uuid,
        session: &mut QuizSession,
        msg: ClientMessage,
    ) -> Vec<ServerMessage> {
        let replies = match msg {
            ClientMessage::Start { name, count } => {
                let started = session.start(&name, count, &self.bank);
                match started {
                    Ok(()) => vec![self.current_question(session)],
                    Err(e) => vec![ServerMessage::error(&e)],
                }
            }
            ClientMessage::Submit { selection } => {
                let submitted = session.submit_label(selection.as_deref());
                match submitted {
                    Ok(feedback) => vec![ServerMessage::feedback(feedback)],
                    Err(e) => vec![ServerMessage::error(&e)],
                }
            }
            ClientMessage::Next => match session.advance() {
                Ok(None) => vec![self.current_question(session)],
                Ok(Some(completed)) => {
                    self.leaderboard.record(completed.to_entry());
                    vec![
                        ServerMessage::Summary {
                            score: completed.score,
                            total: completed.total,
                            elapsed_seconds: completed.elapsed_seconds,
                            wrong_answers: session
                                .wrong_answers()
                                .iter()
                                .map(|q| ReviewItem::from(q.as_ref()))
                                .collect(),
                        },
                        self.leaderboard_snapshot(),
                    ]
                }
                Err(e) => vec![ServerMessage::error(&e)],
            },
            ClientMessage::RetryWrong => match session.retry_wrong() {
                Ok(()) => vec![self.current_question(session)],
                Err(e) => vec![ServerMessage::error(&e)],
            },
            ClientMessage::Restart => {
                session.restart();
                Vec::new()
            }
            ClientMessage::Leaderboard => vec![self.leaderboard_snapshot()],
        };

        self.set_status(id, status_of(session));
        replies
    }

    fn current_question(&self, session: &QuizSession) -> ServerMessage {
        match session.current_question() {
            Some(question) => {
                ServerMessage::question(question, session.current_index(), session.total())
            }
            None => ServerMessage::Error {
                kind: "invalid_operation".to_string(),
                message: "no question in progress".to_string(),
            },
        }
    }

    fn leaderboard_snapshot(&self) -> ServerMessage {
        ServerMessage::Leaderboard {
            entries: self.leaderboard.ranked(),
        }
    }
}

fn status_of(session: &QuizSession) -> ParticipantStatus {
    if session.is_complete() {
        ParticipantStatus::Finished {
            name: session.participant().to_string(),
            score: session.score(),
        }
    } else if session.current_question().is_some() {
        ParticipantStatus::Answering {
            name: session.participant().to_string(),
            index: session.current_index(),
            total: session.total(),
        }
    } else {
        ParticipantStatus::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OptionKey, Question};

    fn state(n: usize) -> ServerState {
        let bank = QuestionBank::new((0..n).map(|i| {
            Question::new(
                format!("Q{i}"),
                ["a".into(), "b".into(), "c".into(), "d".into()],
                OptionKey::B,
                None,
            )
        }));
        ServerState::new(Arc::new(bank), Arc::new(Leaderboard::new()))
    }

    fn submit(label: &str) -> ClientMessage {
        ClientMessage::Submit {
            selection: Some(label.to_string()),
        }
    }

    #[test]
    fn test_full_pass_records_and_reports() {
        let state = state(4);
        let id = Uuid::new_v4();
        let mut session = QuizSession::new();
        state.connect(id);

        let replies = state.handle_message(
            id,
            &mut session,
            ClientMessage::Start {
                name: "Alice".to_string(),
                count: 2,
            },
        );
        assert!(matches!(replies[..], [ServerMessage::Question { index: 0, total: 2, .. }]));

        let replies = state.handle_message(id, &mut session, submit("b"));
        assert!(matches!(replies[..], [ServerMessage::Feedback { correct: true, .. }]));
        state.handle_message(id, &mut session, ClientMessage::Next);

        state.handle_message(id, &mut session, submit("a"));
        let replies = state.handle_message(id, &mut session, ClientMessage::Next);
        match &replies[..] {
            [
                ServerMessage::Summary {
                    score,
                    total,
                    wrong_answers,
                    ..
                },
                ServerMessage::Leaderboard { entries },
            ] => {
                assert_eq!((*score, *total), (1, 2));
                assert_eq!(wrong_answers.len(), 1);
                assert_eq!(wrong_answers[0].correct_key, OptionKey::B);
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].name, "Alice");
            }
            other => panic!("unexpected replies: {other:?}"),
        }

        assert_eq!(
            state.participant_status(&id),
            Some(ParticipantStatus::Finished {
                name: "Alice".to_string(),
                score: 1
            })
        );
    }

    #[test]
    fn test_refused_request_reports_kind() {
        let state = state(2);
        let id = Uuid::new_v4();
        let mut session = QuizSession::new();

        let replies = state.handle_message(id, &mut session, ClientMessage::Next);
        assert!(matches!(
            &replies[..],
            [ServerMessage::Error { kind, .. }] if kind == "invalid_operation"
        ));

        let replies = state.handle_message(
            id,
            &mut session,
            ClientMessage::Start {
                name: "Bob".to_string(),
                count: 3,
            },
        );
        assert!(matches!(
            &replies[..],
            [ServerMessage::Error { kind, .. }] if kind == "invalid_request"
        ));
        assert!(state.leaderboard().is_empty());
    }

    #[test]
    fn test_sessions_are_independent() {
        let state = state(3);
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
        let (mut a, mut b) = (QuizSession::new(), QuizSession::new());
        state.connect(alice);
        state.connect(bob);

        state.handle_message(
            alice,
            &mut a,
            ClientMessage::Start {
                name: "Alice".to_string(),
                count: 1,
            },
        );
        state.handle_message(alice, &mut a, submit("B"));

        assert_eq!(state.connected_count(), 2);
        assert_eq!(state.participant_status(&bob), Some(ParticipantStatus::Idle));
        assert_eq!(a.score(), 1);
        assert_eq!(b.score(), 0);

        state.disconnect(&alice);
        assert_eq!(state.connected_count(), 1);
    }
}
