mod assembler;
mod phase;
mod progress;
mod service;
mod source;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use assembler::SessionAssembler;
pub use phase::{QuestionStep, SessionPhase};
pub use progress::{FinalScore, SessionProgress};
pub use service::{Advance, AnswerOutcome, CurrentQuestion, QuizSession};
pub use source::DeckSource;
