mod deck;
mod fetch;
mod options;
mod question;

pub use deck::Deck;
pub use fetch::{FetchRequest, FetchRequestError, QuestionType};
pub use options::{AnswerOptionBuilder, AnswerOptionSet};
pub use question::{Question, QuestionError, QuestionKind};
