mod bank;
mod question;

pub use bank::QuestionBank;
pub use question::{EXPLANATION_PLACEHOLDER, OptionKey, Question};
