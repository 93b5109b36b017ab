use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::QuizError;

use super::Question;

/// Validated, de-duplicated questions available for sampling.
///
/// Never mutated after construction; a refresh builds a new bank.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Arc<Question>>,
}

impl QuestionBank {
    /// Build a bank, keeping the first occurrence of each duplicate question.
    pub fn new(questions: impl IntoIterator<Item = Question>) -> Self {
        let mut seen = HashSet::new();
        let questions = questions
            .into_iter()
            .filter(|q| seen.insert(q.clone()))
            .map(Arc::new)
            .collect();
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Arc<Question>] {
        &self.questions
    }

    /// Draw `count` distinct questions uniformly at random.
    pub fn sample(&self, count: usize) -> Result<Vec<Arc<Question>>, QuizError> {
        self.sample_with(count, &mut rand::rng())
    }

    /// Same as [`sample`](Self::sample) with a caller-supplied RNG.
    pub fn sample_with<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Arc<Question>>, QuizError> {
        if count < 1 || count > self.questions.len() {
            return Err(QuizError::InvalidRequest(format!(
                "question count must be between 1 and {}, got {}",
                self.questions.len(),
                count
            )));
        }

        let mut pool = self.questions.clone();
        let (picked, _) = pool.partial_shuffle(rng, count);
        Ok(picked.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::models::OptionKey;

    fn bank(n: usize) -> QuestionBank {
        QuestionBank::new((0..n).map(|i| {
            Question::new(
                format!("Question {i}"),
                ["w".into(), "x".into(), "y".into(), "z".into()],
                OptionKey::A,
                None,
            )
        }))
    }

    #[test]
    fn test_duplicates_are_collapsed() {
        let q = bank(1).questions()[0].as_ref().clone();
        let bank = QuestionBank::new(vec![q.clone(), q]);
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn test_sample_returns_distinct_questions_from_bank() {
        let bank = bank(10);
        let mut rng = StdRng::seed_from_u64(42);

        for count in 1..=10 {
            let picked = bank.sample_with(count, &mut rng).unwrap();
            assert_eq!(picked.len(), count);

            let unique: HashSet<_> = picked.iter().map(|q| q.text().to_string()).collect();
            assert_eq!(unique.len(), count);
            assert!(
                picked
                    .iter()
                    .all(|q| bank.questions().iter().any(|b| Arc::ptr_eq(b, q)))
            );
        }
    }

    #[test]
    fn test_sample_rejects_out_of_range_counts() {
        let bank = bank(3);
        assert!(matches!(bank.sample(0), Err(QuizError::InvalidRequest(_))));
        assert!(matches!(bank.sample(4), Err(QuizError::InvalidRequest(_))));
        assert!(matches!(
            QuestionBank::default().sample(1),
            Err(QuizError::InvalidRequest(_))
        ));
    }
}
