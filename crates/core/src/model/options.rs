use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::{Question, QuestionKind};

//
// ─── OPTION SET ────────────────────────────────────────────────────────────────
//

/// Displayable answers for the current question, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOptionSet {
    options: Vec<String>,
    correct_option: String,
}

impl AnswerOptionSet {
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The raw correct answer, identical to `Question::correct_answer`.
    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.correct_option
    }

    /// Two options means a true/false question; four means multiple choice.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.options.len() == 2
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    #[must_use]
    pub fn contains(&self, answer: &str) -> bool {
        self.options.iter().any(|option| option == answer)
    }

    #[must_use]
    pub fn position_of_correct(&self) -> Option<usize> {
        self.options
            .iter()
            .position(|option| *option == self.correct_option)
    }
}

//
// ─── BUILDER ───────────────────────────────────────────────────────────────────
//

/// Produces the option set for a question.
///
/// Multiple-choice answers are always shuffled. True/false answers keep the
/// bank order `[correct, incorrect]` unless `with_randomize_boolean(true)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerOptionBuilder {
    randomize_boolean: bool,
}

impl AnswerOptionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_randomize_boolean(mut self, randomize: bool) -> Self {
        self.randomize_boolean = randomize;
        self
    }

    #[must_use]
    pub fn randomize_boolean(&self) -> bool {
        self.randomize_boolean
    }

    /// Build options using the thread-local RNG.
    #[must_use]
    pub fn build_options(&self, question: &Question) -> AnswerOptionSet {
        self.build_options_with_rng(question, &mut rand::rng())
    }

    pub fn build_options_with_rng<R: Rng + ?Sized>(
        &self,
        question: &Question,
        rng: &mut R,
    ) -> AnswerOptionSet {
        let mut options = Vec::with_capacity(question.incorrect_answers().len() + 1);
        options.push(question.correct_answer().to_owned());
        options.extend(question.incorrect_answers().iter().cloned());

        let shuffle = match question.kind() {
            QuestionKind::MultipleChoice => true,
            QuestionKind::TrueFalse => self.randomize_boolean,
        };
        if shuffle {
            options.as_mut_slice().shuffle(rng);
        }

        AnswerOptionSet {
            options,
            correct_option: question.correct_answer().to_owned(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
