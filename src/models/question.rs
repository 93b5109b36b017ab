use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Text used when a record carries no explanation.
pub const EXPLANATION_PLACEHOLDER: &str = "No explanation provided.";

/// Stable key of one of the four answer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    pub fn index(self) -> usize {
        match self {
            OptionKey::A => 0,
            OptionKey::B => 1,
            OptionKey::C => 2,
            OptionKey::D => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Lower-case field name of this option in a raw record.
    pub fn field(self) -> &'static str {
        match self {
            OptionKey::A => "a",
            OptionKey::B => "b",
            OptionKey::C => "c",
            OptionKey::D => "d",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            OptionKey::A => "A",
            OptionKey::B => "B",
            OptionKey::C => "C",
            OptionKey::D => "D",
        };
        f.write_str(letter)
    }
}

impl FromStr for OptionKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(OptionKey::A),
            "B" => Ok(OptionKey::B),
            "C" => Ok(OptionKey::C),
            "D" => Ok(OptionKey::D),
            _ => Err(()),
        }
    }
}

/// A validated multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    text: String,
    options: [String; 4],
    correct_key: OptionKey,
    explanation: String,
}

impl Question {
    /// Build a question. A missing explanation falls back to the placeholder.
    pub fn new(
        text: impl Into<String>,
        options: [String; 4],
        correct_key: OptionKey,
        explanation: Option<String>,
    ) -> Self {
        Self {
            text: text.into(),
            options,
            correct_key,
            explanation: explanation.unwrap_or_else(|| EXPLANATION_PLACEHOLDER.to_string()),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Question text with line breaks folded into spaces, for display.
    pub fn prompt(&self) -> String {
        self.text
            .replace("\r\n", " ")
            .replace(['\n', '\r'], " ")
            .trim()
            .to_string()
    }

    pub fn options(&self) -> &[String; 4] {
        &self.options
    }

    pub fn option(&self, key: OptionKey) -> &str {
        &self.options[key.index()]
    }

    /// Options paired with their keys, in A..D order.
    pub fn keyed_options(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        OptionKey::ALL
            .into_iter()
            .map(move |key| (key, self.option(key)))
    }

    pub fn correct_key(&self) -> OptionKey {
        self.correct_key
    }

    pub fn correct_text(&self) -> &str {
        self.option(self.correct_key)
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Whether `selection` answers this question correctly. No selection is wrong.
    pub fn is_correct(&self, selection: Option<OptionKey>) -> bool {
        selection == Some(self.correct_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question::new(
            "Which port\r\ndoes SSH use?\n",
            ["21".into(), "22".into(), "23".into(), "25".into()],
            OptionKey::B,
            None,
        )
    }

    #[test]
    fn test_option_key_parsing() {
        assert_eq!(" c ".parse::<OptionKey>(), Ok(OptionKey::C));
        assert_eq!("d".parse::<OptionKey>(), Ok(OptionKey::D));
        assert!("E".parse::<OptionKey>().is_err());
        assert!("".parse::<OptionKey>().is_err());
        assert!("AB".parse::<OptionKey>().is_err());
    }

    #[test]
    fn test_prompt_folds_line_breaks() {
        assert_eq!(question().prompt(), "Which port does SSH use?");
    }

    #[test]
    fn test_missing_explanation_uses_placeholder() {
        let q = question();
        assert_eq!(q.explanation(), EXPLANATION_PLACEHOLDER);
        assert_eq!(q.correct_text(), "22");
    }

    #[test]
    fn test_no_selection_is_wrong() {
        let q = question();
        assert!(q.is_correct(Some(OptionKey::B)));
        assert!(!q.is_correct(Some(OptionKey::A)));
        assert!(!q.is_correct(None));
    }
}
