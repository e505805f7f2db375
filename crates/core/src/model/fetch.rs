use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FetchRequestError {
    #[error("fetch amount must be > 0")]
    ZeroAmount,
}

/// Question category as understood by the remote bank's `type` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    MultipleChoice,
    Boolean,
}

impl QuestionType {
    /// Value sent as the `type` query parameter.
    #[must_use]
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

/// Parameters for a single call to the question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FetchRequest {
    question_type: QuestionType,
    amount: u32,
}

impl FetchRequest {
    /// Multiple-choice questions in the standard session.
    pub const STANDARD_MULTIPLE_CHOICE: u32 = 10;
    /// True/false questions in the standard session.
    pub const STANDARD_BOOLEAN: u32 = 5;

    /// # Errors
    ///
    /// Returns `FetchRequestError::ZeroAmount` if `amount` is zero.
    pub fn new(question_type: QuestionType, amount: u32) -> Result<Self, FetchRequestError> {
        if amount == 0 {
            return Err(FetchRequestError::ZeroAmount);
        }
        Ok(Self {
            question_type,
            amount,
        })
    }

    /// The fixed 10 multiple-choice + 5 true/false composition.
    #[must_use]
    pub fn standard_session() -> Vec<Self> {
        vec![
            Self {
                question_type: QuestionType::MultipleChoice,
                amount: Self::STANDARD_MULTIPLE_CHOICE,
            },
            Self {
                question_type: QuestionType::Boolean,
                amount: Self::STANDARD_BOOLEAN,
            },
        ]
    }

    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    #[must_use]
    pub fn amount(&self) -> u32 {
        self.amount
    }
}
