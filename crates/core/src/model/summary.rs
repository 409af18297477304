use crate::model::{Answer, Article};

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Answered share of the session as a whole percentage, rounded to nearest.
    ///
    /// An empty session counts as fully answered.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let pct = (self.answered * 200 + self.total) / (self.total * 2);
        u8::try_from(pct.min(100)).unwrap_or(100)
    }
}

/// A missed word, as listed for review after a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrongAnswer {
    pub index: usize,
    pub chosen: Article,
    pub expected: Article,
}

/// Outcome of a session: how many questions, how many right, which were wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    total: usize,
    correct: usize,
    wrong: Vec<WrongAnswer>,
}

impl SessionSummary {
    #[must_use]
    pub fn from_answers(total: usize, answers: &[Answer]) -> Self {
        let wrong: Vec<WrongAnswer> = answers
            .iter()
            .filter(|a| !a.is_correct())
            .map(|a| WrongAnswer {
                index: a.index(),
                chosen: a.chosen(),
                expected: a.expected(),
            })
            .collect();
        Self {
            total,
            correct: answers.len() - wrong.len(),
            wrong,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn wrong(&self) -> &[WrongAnswer] {
        &self.wrong
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.wrong.is_empty() && self.correct == self.total
    }

    /// Dataset indices to drill again in a retry session.
    #[must_use]
    pub fn wrong_indices(&self) -> Vec<usize> {
        self.wrong.iter().map(|w| w.index).collect()
    }
}
