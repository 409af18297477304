use thiserror::Error;

use crate::model::summary::{SessionProgress, SessionSummary};
use crate::model::{Answer, AnswerError, Article, Dataset};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Reasons a stored session cannot be restored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("pointer {pointer} is out of range for an order of length {len}")]
    PointerOutOfRange { pointer: usize, len: usize },

    #[error("done={done} does not match pointer {pointer} for an order of length {len}")]
    InconsistentCompletion { pointer: usize, len: usize, done: bool },

    #[error("expected {expected} answers, found {found}")]
    AnswerCountMismatch { expected: usize, found: usize },

    #[error("answer {position} is for index {found}, but the order has {expected} there")]
    AnswerOrderMismatch {
        position: usize,
        expected: usize,
        found: usize,
    },

    #[error("index {index} does not address a dataset of {dataset_len} words")]
    IndexOutOfDataset { index: usize, dataset_len: usize },

    #[error(transparent)]
    Answer(#[from] AnswerError),
}

//
// ─── SESSION STATE ────────────────────────────────────────────────────────────
//

/// One run through a set of dataset indices.
///
/// Values are never edited in place: every answer produces a new state and
/// the previous one is left as it was.
///
/// Once the last answer is given `pointer` stays on the last position instead
/// of moving one past the end, so `order[pointer]` is valid for every
/// non-empty session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    order: Vec<usize>,
    pointer: usize,
    answers: Vec<Answer>,
    done: bool,
}

impl SessionState {
    /// A session that has not been answered yet.
    pub(crate) fn unanswered(order: Vec<usize>) -> Self {
        let done = order.is_empty();
        Self {
            order,
            pointer: 0,
            answers: Vec::new(),
            done,
        }
    }

    /// Rehydrate a session from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError` if pointer, completion flag and answers do
    /// not describe a state reachable through `apply_answer`.
    pub fn from_persisted(
        order: Vec<usize>,
        pointer: usize,
        answers: Vec<Answer>,
        done: bool,
    ) -> Result<Self, SessionStateError> {
        let len = order.len();
        if pointer > len {
            return Err(SessionStateError::PointerOutOfRange { pointer, len });
        }

        let completion_ok = match (len, done) {
            (0, done) => done && pointer == 0,
            (_, true) => pointer == len - 1,
            (_, false) => pointer < len,
        };
        if !completion_ok {
            return Err(SessionStateError::InconsistentCompletion { pointer, len, done });
        }

        let expected_answers = if done { len } else { pointer };
        if answers.len() != expected_answers {
            return Err(SessionStateError::AnswerCountMismatch {
                expected: expected_answers,
                found: answers.len(),
            });
        }

        for (position, (answer, &expected)) in answers.iter().zip(&order).enumerate() {
            if answer.index() != expected {
                return Err(SessionStateError::AnswerOrderMismatch {
                    position,
                    expected,
                    found: answer.index(),
                });
            }
        }

        Ok(Self {
            order,
            pointer,
            answers,
            done,
        })
    }

    /// Check that every index in the order addresses a dataset of `dataset_len` words.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::IndexOutOfDataset` for the first index that does not.
    pub fn check_indices(&self, dataset_len: usize) -> Result<(), SessionStateError> {
        match self.order.iter().find(|&&index| index >= dataset_len) {
            Some(&index) => Err(SessionStateError::IndexOutOfDataset { index, dataset_len }),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    #[must_use]
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Number of questions in this session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Dataset index under the pointer: the word being asked, or the last
    /// word asked once the session is done. `None` only for an empty session.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.order.get(self.pointer).copied()
    }

    /// Record `chosen` for the current word and return the next state.
    ///
    /// A finished session is returned unchanged. `expected_lookup` resolves the
    /// correct article for a dataset index; indices come from the session
    /// order, so a lookup that cannot resolve one is a broken caller.
    #[must_use]
    pub fn apply_answer<F>(&self, chosen: Article, expected_lookup: F) -> Self
    where
        F: FnOnce(usize) -> Article,
    {
        if self.done {
            return self.clone();
        }

        let current = self.order[self.pointer];
        let expected = expected_lookup(current);

        let mut answers = Vec::with_capacity(self.answers.len() + 1);
        answers.extend_from_slice(&self.answers);
        answers.push(Answer::new(current, chosen, expected));

        let next_pointer = self.pointer + 1;
        let done = next_pointer >= self.order.len();

        Self {
            order: self.order.clone(),
            pointer: if done { self.pointer } else { next_pointer },
            answers,
            done,
        }
    }

    /// `apply_answer` with the dataset as lookup.
    ///
    /// # Panics
    ///
    /// Panics if the current index does not address `dataset`.
    #[must_use]
    pub fn apply_answer_with(&self, dataset: &Dataset, chosen: Article) -> Self {
        self.apply_answer(chosen, |index| dataset[index].article)
    }

    /// Most recent answers, newest first.
    pub fn recent_answers(&self, limit: usize) -> impl Iterator<Item = &Answer> {
        self.answers.iter().rev().take(limit)
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct()).count()
    }

    /// Dataset indices answered incorrectly, in the order they were asked.
    #[must_use]
    pub fn wrong_indices(&self) -> Vec<usize> {
        self.answers
            .iter()
            .filter(|a| !a.is_correct())
            .map(Answer::index)
            .collect()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.len(),
            answered: self.answers.len(),
            remaining: self.len().saturating_sub(self.answers.len()),
            is_complete: self.done,
        }
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_answers(self.len(), &self.answers)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WordEntry;

    fn sample_dataset() -> Dataset {
        Dataset::new(vec![
            WordEntry::new("huis", Article::Het),
            WordEntry::new("tafel", Article::De),
            WordEntry::new("kind", Article::Het),
        ])
        .unwrap()
    }

    #[test]
    fn answers_follow_the_order_and_freeze_the_pointer() {
        let dataset = sample_dataset();
        let start = SessionState::unanswered(vec![1, 0, 2]);

        let s1 = start.apply_answer_with(&dataset, Article::De);
        assert_eq!(s1.pointer(), 1);
        assert!(!s1.is_done());

        let s2 = s1.apply_answer_with(&dataset, Article::Het);
        assert_eq!(s2.pointer(), 2);
        assert!(!s2.is_done());

        let s3 = s2.apply_answer_with(&dataset, Article::De);
        assert!(s3.is_done());
        assert_eq!(s3.pointer(), 2);
        assert_eq!(s3.answers().len(), 3);
        assert_eq!(s3.correct_count(), 2);
        assert_eq!(s3.wrong_indices(), vec![2]);
        assert_eq!(s3.current_index(), Some(2));

        for (answer, index) in s3.answers().iter().zip(s3.order()) {
            assert_eq!(answer.index(), *index);
            assert_eq!(answer.is_correct(), answer.chosen() == answer.expected());
        }
    }

    #[test]
    fn previous_state_is_untouched() {
        let dataset = sample_dataset();
        let start = SessionState::unanswered(vec![0, 1]);
        let snapshot = start.clone();

        let next = start.apply_answer_with(&dataset, Article::Het);

        assert_eq!(start, snapshot);
        assert_eq!(next.answers().len(), 1);
    }

    #[test]
    fn answering_a_done_session_is_a_no_op() {
        let dataset = sample_dataset();
        let done = SessionState::unanswered(vec![0]).apply_answer_with(&dataset, Article::De);
        assert!(done.is_done());

        let again = done.apply_answer(Article::Het, |_| panic!("lookup must not run"));
        assert_eq!(again, done);
    }

    #[test]
    fn empty_session_is_done_immediately() {
        let empty = SessionState::unanswered(Vec::new());
        assert!(empty.is_done());
        assert_eq!(empty.pointer(), 0);
        assert_eq!(empty.current_index(), None);
        assert_eq!(empty.progress().remaining, 0);
    }

    #[test]
    fn single_item_session_completes_in_place() {
        let dataset = sample_dataset();
        let done = SessionState::unanswered(vec![2]).apply_answer_with(&dataset, Article::Het);
        assert!(done.is_done());
        assert_eq!(done.pointer(), 0);
        assert_eq!(done.correct_count(), 1);
    }

    #[test]
    fn recent_answers_are_newest_first() {
        let dataset = sample_dataset();
        let state = SessionState::unanswered(vec![0, 1, 2])
            .apply_answer_with(&dataset, Article::Het)
            .apply_answer_with(&dataset, Article::Het)
            .apply_answer_with(&dataset, Article::Het);

        let recent: Vec<usize> = state.recent_answers(2).map(Answer::index).collect();
        assert_eq!(recent, vec![2, 1]);
    }

    #[test]
    fn from_persisted_accepts_reachable_states() {
        let dataset = sample_dataset();
        let mid = SessionState::unanswered(vec![2, 0, 1]).apply_answer_with(&dataset, Article::De);
        let restored = SessionState::from_persisted(
            mid.order().to_vec(),
            mid.pointer(),
            mid.answers().to_vec(),
            mid.is_done(),
        )
        .unwrap();
        assert_eq!(restored, mid);

        let empty = SessionState::from_persisted(Vec::new(), 0, Vec::new(), true).unwrap();
        assert!(empty.is_done());
    }

    #[test]
    fn from_persisted_rejects_broken_states() {
        let err = SessionState::from_persisted(vec![0, 1], 3, Vec::new(), false).unwrap_err();
        assert!(matches!(err, SessionStateError::PointerOutOfRange { .. }));

        let err = SessionState::from_persisted(vec![0, 1], 2, Vec::new(), true).unwrap_err();
        assert!(matches!(err, SessionStateError::InconsistentCompletion { .. }));

        let err = SessionState::from_persisted(Vec::new(), 0, Vec::new(), false).unwrap_err();
        assert!(matches!(err, SessionStateError::InconsistentCompletion { .. }));

        let err = SessionState::from_persisted(vec![0, 1], 1, Vec::new(), false).unwrap_err();
        assert_eq!(
            err,
            SessionStateError::AnswerCountMismatch {
                expected: 1,
                found: 0
            }
        );

        let stray = vec![Answer::new(1, Article::De, Article::De)];
        let err = SessionState::from_persisted(vec![0, 1], 1, stray, false).unwrap_err();
        assert_eq!(
            err,
            SessionStateError::AnswerOrderMismatch {
                position: 0,
                expected: 0,
                found: 1
            }
        );
    }

    #[test]
    fn check_indices_flags_words_outside_the_dataset() {
        let state = SessionState::unanswered(vec![0, 5, 1]);
        assert!(state.check_indices(6).is_ok());
        assert_eq!(
            state.check_indices(3).unwrap_err(),
            SessionStateError::IndexOutOfDataset {
                index: 5,
                dataset_len: 3
            }
        );
    }
}
