use services::{CurrentQuestion, FinalScore};

use crate::markup::decode_entities;

/// One answer button: what is shown and what gets submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub label: String,
    pub raw: String,
}

/// Display-ready copy of the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub number_label: String,
    pub category: String,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub is_binary: bool,
}

impl QuestionView {
    #[must_use]
    pub fn from_current(current: &CurrentQuestion<'_>) -> Self {
        let options = current
            .options
            .options()
            .iter()
            .map(|raw| OptionView {
                label: decode_entities(raw),
                raw: raw.clone(),
            })
            .collect();

        Self {
            number_label: format!("Question: {}/{}", current.index + 1, current.total),
            category: decode_entities(current.question.category()),
            prompt: decode_entities(current.question.prompt()),
            options,
            is_binary: current.options.is_binary(),
        }
    }

    /// Raw answer for a 1-based menu choice.
    #[must_use]
    pub fn raw_for_choice(&self, choice: usize) -> Option<&str> {
        choice
            .checked_sub(1)
            .and_then(|index| self.options.get(index))
            .map(|option| option.raw.as_str())
    }
}

#[must_use]
pub fn game_over_message(score: FinalScore) -> String {
    format!("Game over! Final score: {score}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::{AnswerOptionBuilder, Question};

    #[test]
    fn view_decodes_labels_but_keeps_raw_answers() {
        let question = Question::new(
            "Entertainment: Music",
            "Who sang &quot;Halo&quot;?",
            "Beyonc&eacute;",
            vec!["Adele".into(), "Rihanna".into(), "Shakira".into()],
        )
        .unwrap();
        let options = AnswerOptionBuilder::new().build_options(&question);
        let current = CurrentQuestion {
            index: 2,
            total: 15,
            question: &question,
            options: &options,
        };

        let view = QuestionView::from_current(&current);
        assert_eq!(view.number_label, "Question: 3/15");
        assert_eq!(view.prompt, "Who sang \"Halo\"?");
        assert!(!view.is_binary);

        let beyonce = view
            .options
            .iter()
            .find(|option| option.label == "Beyoncé")
            .unwrap();
        assert_eq!(beyonce.raw, "Beyonc&eacute;");
    }

    #[test]
    fn menu_choices_are_one_based() {
        let question =
            Question::new("General", "Ice is cold?", "True", vec!["False".into()]).unwrap();
        let options = AnswerOptionBuilder::new().build_options(&question);
        let current = CurrentQuestion {
            index: 0,
            total: 1,
            question: &question,
            options: &options,
        };
        let view = QuestionView::from_current(&current);

        assert!(view.is_binary);
        assert_eq!(view.raw_for_choice(1), Some("True"));
        assert_eq!(view.raw_for_choice(2), Some("False"));
        assert_eq!(view.raw_for_choice(0), None);
        assert_eq!(view.raw_for_choice(3), None);
    }

    #[test]
    fn game_over_reports_tally() {
        let score = FinalScore {
            correct: 7,
            total: 15,
        };
        assert_eq!(game_over_message(score), "Game over! Final score: 7/15");
    }
}
