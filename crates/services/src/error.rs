//! Shared error types for the services crate.

use thiserror::Error;

use crate::sessions::SessionPhase;

/// Errors emitted by an `HttpTransport`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("question bank responded with status {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Http(reqwest::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Errors from a single question bank fetch.
///
/// `QuestionBankClient` downgrades these to an empty batch when assembling a
/// deck; they only surface through `QuestionBankClient::fetch`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("invalid question bank url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported url scheme {0:?}")]
    UnsupportedScheme(String),
    #[error(transparent)]
    Network(#[from] TransportError),
    #[error("could not decode question bank response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("question bank rejected the request with response code {code}")]
    Rejected { code: u8 },
}

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    EmptyDeck,
    #[error("deck fetch ended without delivering a deck")]
    LoadInterrupted,
    #[error("a session can only start inside a tokio runtime")]
    NoRuntime,
    #[error("cannot {operation} while session is {phase}")]
    InvalidTransition {
        operation: &'static str,
        phase: SessionPhase,
    },
}

/// Errors emitted while reading `BankConfig` from the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{key} must not be empty")]
    Empty { key: &'static str },
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
