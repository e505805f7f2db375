use std::fmt;

/// Where the current question is in its answer cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStep {
    AwaitingAnswer,
    Resolved { correct: bool },
}

/// Observable lifecycle of a `QuizSession`.
///
/// `Idle → Loading → InProgress { .. } → Finished`, with `Failed` when the
/// fetch produced no playable deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Loading,
    InProgress { index: usize, step: QuestionStep },
    Finished,
    Failed,
}

impl SessionPhase {
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress { .. })
    }

    #[must_use]
    pub fn is_awaiting_answer(&self) -> bool {
        matches!(
            self,
            Self::InProgress {
                step: QuestionStep::AwaitingAnswer,
                ..
            }
        )
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Loading => f.write_str("loading"),
            Self::InProgress {
                index,
                step: QuestionStep::AwaitingAnswer,
            } => write!(f, "awaiting an answer to question {}", index + 1),
            Self::InProgress {
                index,
                step: QuestionStep::Resolved { .. },
            } => write!(f, "showing the result of question {}", index + 1),
            Self::Finished => f.write_str("finished"),
            Self::Failed => f.write_str("failed"),
        }
    }
}
