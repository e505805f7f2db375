use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::instrument;
use trivia_core::model::{Deck, FetchRequest, Question};
use url::Url;

use super::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use super::wire::BankResponse;
use crate::config::BankConfig;
use crate::error::{BankError, TransportError};
use crate::sessions::{DeckSource, SessionAssembler};

/// Fetches session questions from the remote bank.
///
/// Each request of the configured composition runs concurrently. A failed
/// request contributes an empty batch and never affects its siblings.
#[derive(Clone)]
pub struct QuestionBankClient {
    transport: Arc<dyn HttpTransport>,
    config: BankConfig,
    assembler: SessionAssembler,
}

impl QuestionBankClient {
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, config: BankConfig) -> Self {
        Self {
            transport,
            config,
            assembler: SessionAssembler::new(),
        }
    }

    /// Client using `ReqwestTransport` with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the HTTP client cannot be built.
    pub fn from_config(config: BankConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::new(Arc::new(transport), config))
    }

    #[must_use]
    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// `<base>?amount=<n>&type=<multiple|boolean>`.
    ///
    /// # Errors
    ///
    /// Returns `BankError::InvalidUrl` or `BankError::UnsupportedScheme` for a
    /// base that is not an http(s) url.
    pub fn request_url(&self, request: &FetchRequest) -> Result<Url, BankError> {
        let mut url = Url::parse(&self.config.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(BankError::UnsupportedScheme(url.scheme().to_string()));
        }
        url.query_pairs_mut()
            .append_pair("amount", &request.amount().to_string())
            .append_pair("type", request.question_type().as_query_value());
        Ok(url)
    }

    /// Run one request and decode its questions.
    ///
    /// Entries that do not form a valid `Question` are dropped.
    ///
    /// # Errors
    ///
    /// Returns `BankError` for url, transport, decode or bank-side failures.
    #[instrument(
        level = "debug",
        skip(self),
        fields(kind = %request.question_type(), amount = request.amount())
    )]
    pub async fn fetch(&self, request: FetchRequest) -> Result<Vec<Question>, BankError> {
        let url = self.request_url(&request)?;
        let body = self.transport.get(HttpRequest::fresh(url)).await?;
        let response: BankResponse = serde_json::from_slice(&body)?;
        if response.response_code != 0 {
            return Err(BankError::Rejected {
                code: response.response_code,
            });
        }

        let questions = response
            .results
            .into_iter()
            .filter_map(|data| match Question::try_from(data) {
                Ok(question) => Some(question),
                Err(err) => {
                    tracing::warn!(error = %err, "dropping malformed question");
                    None
                }
            })
            .collect::<Vec<_>>();
        tracing::debug!(count = questions.len(), "fetched questions");
        Ok(questions)
    }

    /// Run every request of the composition and wait for all of them.
    ///
    /// Batches come back in composition order; failures are empty batches.
    pub async fn fetch_batches(&self) -> Vec<Vec<Question>> {
        let fetches = self.config.composition.iter().map(|request| async move {
            match self.fetch(*request).await {
                Ok(questions) => questions,
                Err(err) => {
                    tracing::warn!(
                        kind = %request.question_type(),
                        amount = request.amount(),
                        error = %err,
                        "question fetch failed, continuing without it"
                    );
                    Vec::new()
                }
            }
        });
        join_all(fetches).await
    }

    /// Fetch, merge and shuffle a full session deck.
    ///
    /// An empty deck means every request failed or came back empty.
    pub async fn fetch_session_questions(&self) -> Deck {
        let batches = self.fetch_batches().await;
        let deck = self.assembler.assemble(batches);
        tracing::info!(questions = deck.len(), "assembled session deck");
        deck
    }
}

#[async_trait]
impl DeckSource for QuestionBankClient {
    async fn fetch_deck(&self) -> Deck {
        self.fetch_session_questions().await
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
