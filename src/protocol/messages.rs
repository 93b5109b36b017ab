//! Protocol messages for client-server communication.
//!
//! All messages are serialized as JSON over WebSocket.

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::leaderboard::LeaderboardEntry;
use crate::models::{OptionKey, Question};
use crate::session::AnswerFeedback;

/// Default server port.
pub const DEFAULT_PORT: u16 = 8712;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Begin a quiz of `count` questions.
    Start { name: String, count: usize },

    /// Answer the current question. Unknown or missing labels count as wrong.
    Submit { selection: Option<String> },

    /// Move past the answered question.
    Next,

    /// Start a pass over the questions missed in the finished quiz.
    RetryWrong,

    /// Abandon the current quiz.
    Restart,

    /// Ask for the current leaderboard.
    Leaderboard,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Connection accepted.
    Welcome { bank_size: usize },

    /// Next question to answer.
    Question {
        index: usize,
        total: usize,
        text: String,
        options: Vec<OptionView>,
    },

    /// Correctness of the submitted answer.
    Feedback {
        correct: bool,
        correct_key: OptionKey,
        correct_text: String,
        explanation: String,
    },

    /// Pass finished.
    Summary {
        score: usize,
        total: usize,
        elapsed_seconds: f64,
        wrong_answers: Vec<ReviewItem>,
    },

    /// Ranked leaderboard snapshot.
    Leaderboard { entries: Vec<LeaderboardEntry> },

    /// The request was refused; the session is unchanged.
    Error { kind: String, message: String },
}

/// One answer option as shown to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionView {
    pub key: OptionKey,
    pub text: String,
}

/// A missed question with its correct answer, for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub question: String,
    pub correct_key: OptionKey,
    pub correct_text: String,
    pub explanation: String,
}

impl ServerMessage {
    pub fn question(question: &Question, index: usize, total: usize) -> Self {
        ServerMessage::Question {
            index,
            total,
            text: question.prompt(),
            options: question
                .keyed_options()
                .map(|(key, text)| OptionView {
                    key,
                    text: text.to_string(),
                })
                .collect(),
        }
    }

    pub fn feedback(feedback: AnswerFeedback) -> Self {
        ServerMessage::Feedback {
            correct: feedback.correct,
            correct_key: feedback.correct_key,
            correct_text: feedback.correct_text,
            explanation: feedback.explanation,
        }
    }

    pub fn error(err: &QuizError) -> Self {
        ServerMessage::Error {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<&Question> for ReviewItem {
    fn from(question: &Question) -> Self {
        Self {
            question: question.prompt(),
            correct_key: question.correct_key(),
            correct_text: question.correct_text().to_string(),
            explanation: question.explanation().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serialization() {
        let msg = ClientMessage::Start {
            name: "Alice".to_string(),
            count: 5,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"Start\""));

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"Submit","selection":"b"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Submit { selection: Some(ref s) } if s == "b"));

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"Submit","selection":null}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Submit { selection: None }));

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"Next"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Next));
    }

    #[test]
    fn test_question_message_lists_keyed_options() {
        let question = Question::new(
            "Pick one",
            ["w".into(), "x".into(), "y".into(), "z".into()],
            OptionKey::C,
            None,
        );
        let json = serde_json::to_string(&ServerMessage::question(&question, 0, 1)).unwrap();
        assert!(json.contains("\"type\":\"Question\""));
        assert!(json.contains(r#"{"key":"C","text":"y"}"#));
        assert!(!json.contains("correct"));
    }
}
