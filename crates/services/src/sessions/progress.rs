use std::fmt;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// Zero-based index of the current question.
    pub index: usize,
    pub total: usize,
    pub correct: usize,
}

impl SessionProgress {
    /// One-based question number for labels.
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Tally reported once a session has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    pub correct: usize,
    pub total: usize,
}

impl fmt::Display for FinalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}
