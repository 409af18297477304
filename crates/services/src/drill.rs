use std::fmt;
use std::sync::Arc;

use lidwoord_core::SessionBuilder;
use lidwoord_core::model::{Answer, Article, Dataset, SessionState};
use storage::SessionStore;
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::view::DrillView;

//
// ─── ANSWER RESULT ─────────────────────────────────────────────────────────────
//

/// Result of answering the current word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub answer: Answer,
    pub is_complete: bool,
    pub state: SessionState,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Runs drill sessions over a dataset and keeps the latest one saved.
///
/// The service holds no session itself: callers own the current
/// `SessionState` and pass it back in, receiving the replacement.
#[derive(Clone)]
pub struct DrillService {
    dataset: Arc<Dataset>,
    store: SessionStore,
}

impl DrillService {
    #[must_use]
    pub fn new(dataset: Arc<Dataset>, store: SessionStore) -> Self {
        Self { dataset, store }
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Continue the saved session, or start and save a full one.
    ///
    /// A saved session that refers to words outside the current dataset (for
    /// example after switching word lists) is discarded.
    pub async fn resume_or_start(&self) -> SessionState {
        if let Some(saved) = self.store.load().await {
            match saved.check_indices(self.dataset.len()) {
                Ok(()) => {
                    debug!(
                        answered = saved.answers().len(),
                        total = saved.len(),
                        "resuming saved session"
                    );
                    return saved;
                }
                Err(err) => warn!(error = %err, "saved session does not fit the word list"),
            }
        }
        info!(words = self.dataset.len(), "starting new session");
        self.start(&SessionBuilder::all(self.dataset.len())).await
    }

    /// Record `chosen` for the current word and save the new state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if `state` is already done, and
    /// `SessionError::UnknownWord` if its current index is not in the dataset.
    pub async fn answer(
        &self,
        state: &SessionState,
        chosen: Article,
    ) -> Result<AnswerOutcome, SessionError> {
        if state.is_done() {
            return Err(SessionError::Completed);
        }
        let index = state.current_index().ok_or(SessionError::Completed)?;
        let expected = self
            .dataset
            .article_at(index)
            .ok_or(SessionError::UnknownWord { index })?;

        let next = state.apply_answer(chosen, |_| expected);
        self.store.save(&next).await;

        let answer = *next.answers().last().ok_or(SessionError::Completed)?;
        debug!(index, %chosen, %expected, correct = answer.is_correct(), "answered");
        if next.is_done() {
            info!(
                correct = next.correct_count(),
                total = next.len(),
                "session complete"
            );
        }

        Ok(AnswerOutcome {
            answer,
            is_complete: next.is_done(),
            state: next,
        })
    }

    /// Drop the current session and start over with every word.
    pub async fn restart_all(&self) -> SessionState {
        info!(words = self.dataset.len(), "restarting with all words");
        self.start(&SessionBuilder::all(self.dataset.len())).await
    }

    /// Start a session over the words missed in `previous`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` if `previous` is still running and
    /// `SessionError::NothingToRetry` if it had no wrong answers.
    pub async fn retry_wrong(&self, previous: &SessionState) -> Result<SessionState, SessionError> {
        if !previous.is_done() {
            return Err(SessionError::NotCompleted);
        }
        let builder = SessionBuilder::retry_wrong(previous);
        if builder.indices().is_empty() {
            return Err(SessionError::NothingToRetry);
        }
        info!(words = builder.indices().len(), "retrying wrong answers");
        Ok(self.start(&builder).await)
    }

    #[must_use]
    pub fn view(&self, state: &SessionState) -> DrillView {
        DrillView::build(&self.dataset, state)
    }

    async fn start(&self, builder: &SessionBuilder) -> SessionState {
        let state = builder.build(&mut rand::rng());
        self.store.save(&state).await;
        state
    }
}

impl fmt::Debug for DrillService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrillService")
            .field("dataset_len", &self.dataset.len())
            .field("key", &self.store.key())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
