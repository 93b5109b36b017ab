//! Raw record normalization.
//!
//! The upstream question files are uncurated, so individual bad records are
//! dropped with a debug log instead of failing the whole load.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::QuizError;
use crate::models::{OptionKey, Question, QuestionBank};

const QUESTION_FIELD: &str = "question";
const CORRECT_FIELD: &str = "correct";
const EXPLANATION_FIELD: &str = "explanation";

/// Parse a JSON document into a question bank.
///
/// The document must be an array; anything else means the source is broken.
pub fn parse_bank(json: &str) -> Result<QuestionBank, QuizError> {
    let document: Value = serde_json::from_str(json)
        .map_err(|e| QuizError::SourceUnavailable(format!("invalid JSON: {}", e)))?;

    let Value::Array(records) = document else {
        return Err(QuizError::SourceUnavailable(
            "expected a JSON array of question records".to_string(),
        ));
    };

    Ok(normalize_records(records))
}

/// Normalize raw records and keep only the structurally valid ones.
pub fn normalize_records(records: Vec<Value>) -> QuestionBank {
    let total = records.len();
    let questions: Vec<Question> = records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| {
            let question = match record {
                Value::Object(fields) => normalize_record(fields),
                _ => None,
            };
            if question.is_none() {
                debug!(record = i, "dropping malformed question record");
            }
            question
        })
        .collect();

    let bank = QuestionBank::new(questions);
    debug!(total, kept = bank.len(), "normalized question records");
    bank
}

/// Lower-case the keys of one record and map it onto a [`Question`].
fn normalize_record(fields: Map<String, Value>) -> Option<Question> {
    let fields: Map<String, Value> = fields
        .into_iter()
        .map(|(key, value)| (key.to_lowercase(), value))
        .collect();

    let text = field_text(&fields, QUESTION_FIELD)?;
    let options = [
        field_text(&fields, OptionKey::A.field())?,
        field_text(&fields, OptionKey::B.field())?,
        field_text(&fields, OptionKey::C.field())?,
        field_text(&fields, OptionKey::D.field())?,
    ];
    let correct_key: OptionKey = field_text(&fields, CORRECT_FIELD)?.parse().ok()?;
    let explanation = field_text(&fields, EXPLANATION_FIELD);

    Some(Question::new(text, options, correct_key, explanation))
}

/// Trimmed textual value of a field, or `None` when absent or empty.
fn field_text(fields: &Map<String, Value>, name: &str) -> Option<String> {
    let text = match fields.get(name)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };

    (!text.is_empty()).then_some(text)
}
