use serde::Serialize;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("expected 1 or 3 incorrect answers, got {count}")]
    UnsupportedAnswerCount { count: usize },

    #[error("correct answer {answer:?} is also listed as incorrect")]
    CorrectAmongIncorrect { answer: String },
}

//
// ─── KIND ──────────────────────────────────────────────────────────────────────
//

/// Shape of a question, derived from how many incorrect answers it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QuestionKind {
    /// Exactly one incorrect answer.
    TrueFalse,
    /// Exactly three incorrect answers.
    MultipleChoice,
}

impl QuestionKind {
    /// Number of incorrect answers a question of this kind holds.
    #[must_use]
    pub fn incorrect_count(self) -> usize {
        match self {
            Self::TrueFalse => 1,
            Self::MultipleChoice => 3,
        }
    }

    fn from_incorrect_count(count: usize) -> Result<Self, QuestionError> {
        match count {
            1 => Ok(Self::TrueFalse),
            3 => Ok(Self::MultipleChoice),
            count => Err(QuestionError::UnsupportedAnswerCount { count }),
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single trivia question as served by the question bank.
///
/// Text is kept exactly as received, markup entities included. Decoding is a
/// display concern and never happens here, so `correct_answer` is always
/// comparable against the raw option strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    category: String,
    prompt: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl Question {
    /// Build a question, checking the answer shape.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::UnsupportedAnswerCount` unless there are 1 or 3
    /// incorrect answers, and `QuestionError::CorrectAmongIncorrect` if the
    /// correct answer is repeated in the incorrect list.
    pub fn new(
        category: impl Into<String>,
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let correct_answer = correct_answer.into();
        QuestionKind::from_incorrect_count(incorrect_answers.len())?;
        if incorrect_answers.contains(&correct_answer) {
            return Err(QuestionError::CorrectAmongIncorrect {
                answer: correct_answer,
            });
        }

        Ok(Self {
            category: category.into(),
            prompt: prompt.into(),
            correct_answer,
            incorrect_answers,
        })
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn incorrect_answers(&self) -> &[String] {
        &self.incorrect_answers
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        if self.incorrect_answers.len() == 1 {
            QuestionKind::TrueFalse
        } else {
            QuestionKind::MultipleChoice
        }
    }

    #[must_use]
    pub fn is_true_false(&self) -> bool {
        self.kind() == QuestionKind::TrueFalse
    }

    /// Exact comparison against the undecoded correct answer.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn one_incorrect_answer_is_true_false() {
        let q = Question::new("General", "Sky is blue?", "True", strings(&["False"])).unwrap();
        assert_eq!(q.kind(), QuestionKind::TrueFalse);
        assert!(q.is_true_false());
    }

    #[test]
    fn three_incorrect_answers_is_multiple_choice() {
        let q = Question::new(
            "Geography",
            "Capital of France?",
            "Paris",
            strings(&["Rome", "Berlin", "Madrid"]),
        )
        .unwrap();
        assert_eq!(q.kind(), QuestionKind::MultipleChoice);
        assert_eq!(q.incorrect_answers().len(), q.kind().incorrect_count());
    }

    #[test]
    fn rejects_two_incorrect_answers() {
        let err = Question::new("x", "y", "a", strings(&["b", "c"])).unwrap_err();
        assert_eq!(err, QuestionError::UnsupportedAnswerCount { count: 2 });
    }

    #[test]
    fn rejects_no_incorrect_answers() {
        let err = Question::new("x", "y", "a", Vec::new()).unwrap_err();
        assert_eq!(err, QuestionError::UnsupportedAnswerCount { count: 0 });
    }

    #[test]
    fn rejects_correct_answer_listed_as_incorrect() {
        let err = Question::new("x", "y", "True", strings(&["True"])).unwrap_err();
        assert!(matches!(err, QuestionError::CorrectAmongIncorrect { .. }));
    }

    #[test]
    fn correctness_uses_raw_text() {
        let q = Question::new(
            "Entertainment",
            "Who?",
            "Beyonc&eacute;",
            strings(&["Adele", "Rihanna", "Shakira"]),
        )
        .unwrap();
        assert!(q.is_correct("Beyonc&eacute;"));
        assert!(!q.is_correct("Beyoncé"));
    }
}
