use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::task::JoinHandle;
use trivia_core::Clock;
use trivia_core::model::{AnswerOptionBuilder, AnswerOptionSet, Deck, Question};

use super::phase::{QuestionStep, SessionPhase};
use super::progress::{FinalScore, SessionProgress};
use super::source::DeckSource;
use crate::error::SessionError;

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// The question currently on screen together with its answer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentQuestion<'a> {
    pub index: usize,
    pub total: usize,
    pub question: &'a Question,
    pub options: &'a AnswerOptionSet,
}

/// Outcome of `QuizSession::submit_answer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// The raw correct answer, for highlighting.
    pub correct_answer: String,
    pub correct_count: usize,
}

/// Outcome of `QuizSession::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    Finished(FinalScore),
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Per-session values. Replaced wholesale on restart.
#[derive(Debug, Default)]
struct SessionState {
    deck: Deck,
    current_index: usize,
    correct_count: usize,
    options: Option<AnswerOptionSet>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Drives one quiz from fetch to final score.
///
/// The session owns its deck and exposes state through query methods and
/// `phase()`; it never calls back into the presentation layer. Methods take
/// `&mut self`, so callers drive it from a single owning task.
pub struct QuizSession {
    source: Arc<dyn DeckSource>,
    builder: AnswerOptionBuilder,
    clock: Clock,
    phase: SessionPhase,
    state: SessionState,
    pending: Option<oneshot::Receiver<Deck>>,
    fetch_task: Option<JoinHandle<()>>,
}

impl QuizSession {
    #[must_use]
    pub fn new(source: Arc<dyn DeckSource>) -> Self {
        Self {
            source,
            builder: AnswerOptionBuilder::new(),
            clock: Clock::default(),
            phase: SessionPhase::Idle,
            state: SessionState::default(),
            pending: None,
            fetch_task: None,
        }
    }

    #[must_use]
    pub fn with_option_builder(mut self, builder: AnswerOptionBuilder) -> Self {
        self.builder = builder;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.state.correct_count
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.state.deck.len()
    }

    /// When the deck arrived and the first question was shown.
    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.state.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.state.finished_at
    }

    /// Begin fetching a deck in the background and return immediately.
    ///
    /// Completion is observed with `wait_loaded` or `poll_loaded`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is idle,
    /// and `SessionError::NoRuntime` when called outside a tokio runtime.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Idle {
            return Err(self.invalid("start"));
        }
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| SessionError::NoRuntime)?;

        let (tx, rx) = oneshot::channel();
        let source = Arc::clone(&self.source);
        let task = runtime.spawn(async move {
            let deck = source.fetch_deck().await;
            if tx.send(deck).is_err() {
                tracing::debug!("session abandoned before its deck arrived");
            }
        });

        self.pending = Some(rx);
        self.fetch_task = Some(task);
        self.transition(SessionPhase::Loading);
        Ok(())
    }

    /// Wait for the deck requested by `start` and enter the first question.
    ///
    /// Returns the deck length.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyDeck` if nothing could be fetched,
    /// `SessionError::LoadInterrupted` if the fetch task died, and
    /// `SessionError::InvalidTransition` when no load is pending.
    pub async fn wait_loaded(&mut self) -> Result<usize, SessionError> {
        let Some(pending) = self.pending.take() else {
            return Err(self.invalid("wait for a deck"));
        };
        match pending.await {
            Ok(deck) => self.install_deck(deck),
            Err(_) => self.interrupted(),
        }
    }

    /// Non-blocking variant of `wait_loaded`.
    ///
    /// Returns `None` while the deck is still in flight or when no load is
    /// pending.
    pub fn poll_loaded(&mut self) -> Option<Result<usize, SessionError>> {
        let pending = self.pending.as_mut()?;
        match pending.try_recv() {
            Ok(deck) => {
                self.pending = None;
                Some(self.install_deck(deck))
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                self.pending = None;
                Some(self.interrupted())
            }
        }
    }

    /// The current question and its options.
    ///
    /// Options are built once when the question becomes current, so repeated
    /// calls return the same arrangement.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `InProgress`.
    pub fn current_question(&self) -> Result<CurrentQuestion<'_>, SessionError> {
        let SessionPhase::InProgress { index, .. } = self.phase else {
            return Err(self.invalid("show a question"));
        };
        let (Some(question), Some(options)) = (self.state.deck.get(index), &self.state.options)
        else {
            return Err(self.invalid("show a question"));
        };

        Ok(CurrentQuestion {
            index,
            total: self.state.deck.len(),
            question,
            options,
        })
    }

    #[must_use]
    pub fn progress(&self) -> Option<SessionProgress> {
        match self.phase {
            SessionPhase::InProgress { index, .. } => Some(SessionProgress {
                index,
                total: self.state.deck.len(),
                correct: self.state.correct_count,
            }),
            _ => None,
        }
    }

    /// Score `selected` against the current question's raw correct answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless awaiting an answer,
    /// which includes a second submission for the same question.
    pub fn submit_answer(&mut self, selected: &str) -> Result<AnswerOutcome, SessionError> {
        let SessionPhase::InProgress {
            index,
            step: QuestionStep::AwaitingAnswer,
        } = self.phase
        else {
            return Err(self.invalid("submit an answer"));
        };
        let Some(question) = self.state.deck.get(index) else {
            return Err(self.invalid("submit an answer"));
        };

        let correct = question.is_correct(selected);
        let correct_answer = question.correct_answer().to_owned();
        if correct {
            self.state.correct_count += 1;
        }

        self.transition(SessionPhase::InProgress {
            index,
            step: QuestionStep::Resolved { correct },
        });
        Ok(AnswerOutcome {
            correct,
            correct_answer,
            correct_count: self.state.correct_count,
        })
    }

    /// Move past a resolved question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the current question
    /// has been answered.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        let SessionPhase::InProgress {
            index,
            step: QuestionStep::Resolved { .. },
        } = self.phase
        else {
            return Err(self.invalid("advance"));
        };

        let next = index + 1;
        if next < self.state.deck.len() {
            self.enter_question(next);
            return Ok(Advance::Next { index: next });
        }

        self.state.current_index = next;
        self.state.options = None;
        self.state.finished_at = Some(self.clock.now());
        self.transition(SessionPhase::Finished);
        Ok(Advance::Finished(self.score()))
    }

    /// `(correct, total)` for a finished session.
    ///
    /// A failed start reports `0/0`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` while the session is still
    /// idle, loading or in progress.
    pub fn final_score(&self) -> Result<FinalScore, SessionError> {
        match self.phase {
            SessionPhase::Finished | SessionPhase::Failed => Ok(self.score()),
            _ => Err(self.invalid("report a final score")),
        }
    }

    /// Abandon the current session and start over with a fresh fetch.
    ///
    /// Allowed from any phase; an in-flight load is cancelled.
    ///
    /// # Errors
    ///
    /// Propagates `start` errors.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        tracing::debug!(phase = %self.phase, "restarting session");
        self.cancel_fetch();
        self.state = SessionState::default();
        self.phase = SessionPhase::Idle;
        self.start()
    }

    fn cancel_fetch(&mut self) {
        self.pending = None;
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
    }

    fn install_deck(&mut self, deck: Deck) -> Result<usize, SessionError> {
        if deck.is_empty() {
            tracing::warn!("no questions fetched, session cannot start");
            self.transition(SessionPhase::Failed);
            return Err(SessionError::EmptyDeck);
        }

        let len = deck.len();
        self.state.deck = deck;
        self.state.started_at = Some(self.clock.now());
        self.enter_question(0);
        Ok(len)
    }

    fn interrupted(&mut self) -> Result<usize, SessionError> {
        tracing::warn!("deck fetch task ended without a result");
        self.transition(SessionPhase::Failed);
        Err(SessionError::LoadInterrupted)
    }

    fn enter_question(&mut self, index: usize) {
        self.state.current_index = index;
        self.state.options = self
            .state
            .deck
            .get(index)
            .map(|question| self.builder.build_options(question));
        self.transition(SessionPhase::InProgress {
            index,
            step: QuestionStep::AwaitingAnswer,
        });
    }

    fn score(&self) -> FinalScore {
        FinalScore {
            correct: self.state.correct_count,
            total: self.state.deck.len(),
        }
    }

    fn transition(&mut self, next: SessionPhase) {
        tracing::debug!(from = %self.phase, to = %next, "session transition");
        self.phase = next;
    }

    fn invalid(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            operation,
            phase: self.phase,
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("deck_len", &self.state.deck.len())
            .field("current_index", &self.state.current_index)
            .field("correct_count", &self.state.correct_count)
            .field("loading", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for QuizSession {
    fn drop(&mut self) {
        self.cancel_fetch();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
