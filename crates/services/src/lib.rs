#![forbid(unsafe_code)]

pub mod bank;
pub mod config;
pub mod error;
pub mod sessions;

pub use trivia_core::Clock;

pub use bank::{HttpRequest, HttpTransport, QuestionBankClient, ReqwestTransport};
pub use config::BankConfig;
pub use error::{BankError, ConfigError, SessionError, TransportError};
pub use sessions::{
    Advance, AnswerOutcome, CurrentQuestion, DeckSource, FinalScore, QuestionStep, QuizSession,
    SessionAssembler, SessionPhase, SessionProgress,
};
