use serde::Deserialize;
use trivia_core::model::{Question, QuestionError};

/// Body returned by the bank for `?amount=&type=`.
#[derive(Debug, Deserialize)]
pub(crate) struct BankResponse {
    #[serde(default)]
    pub response_code: u8,
    pub results: Vec<QuestionData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionData {
    pub category: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl TryFrom<QuestionData> for Question {
    type Error = QuestionError;

    fn try_from(data: QuestionData) -> Result<Self, Self::Error> {
        Question::new(
            data.category,
            data.question,
            data.correct_answer,
            data.incorrect_answers,
        )
    }
}
