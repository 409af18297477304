//! Saved-session slot: JSON under a fixed, versioned key.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use lidwoord_core::model::{Answer, Article, SessionState, SessionStateError};

use crate::repository::{StateSlotRepository, StorageError};

/// Slot key for the saved session. Bump the version suffix when the record
/// shape changes so old payloads are never parsed as the new shape.
pub const STORAGE_KEY: &str = "lidwoord-spel/state.v1";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionStoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("malformed session payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("saved session is inconsistent: {0}")]
    Invalid(#[from] SessionStateError),
}

/// Persisted shape for one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub index: usize,
    pub chosen: Article,
    pub expected: Article,
    pub correct: bool,
}

/// Persisted shape for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStateRecord {
    pub order: Vec<usize>,
    pub pointer: usize,
    pub answers: Vec<AnswerRecord>,
    pub done: bool,
}

impl SessionStateRecord {
    #[must_use]
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            order: state.order().to_vec(),
            pointer: state.pointer(),
            answers: state
                .answers()
                .iter()
                .map(|a| AnswerRecord {
                    index: a.index(),
                    chosen: a.chosen(),
                    expected: a.expected(),
                    correct: a.is_correct(),
                })
                .collect(),
            done: state.is_done(),
        }
    }

    /// Convert the record back into a domain `SessionState`.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError` if the record does not describe a reachable state.
    pub fn into_state(self) -> Result<SessionState, SessionStateError> {
        let answers = self
            .answers
            .into_iter()
            .map(|a| Answer::from_persisted(a.index, a.chosen, a.expected, a.correct))
            .collect::<Result<Vec<_>, _>>()?;
        SessionState::from_persisted(self.order, self.pointer, answers, self.done)
    }
}

/// Loads and saves the latest session.
///
/// `load` and `save` never fail from the caller's point of view: problems are
/// logged and a broken or missing slot reads as "no saved session". The
/// `try_` variants expose the underlying error for diagnostics.
#[derive(Clone)]
pub struct SessionStore {
    slots: Arc<dyn StateSlotRepository>,
    key: String,
}

impl SessionStore {
    #[must_use]
    pub fn new(slots: Arc<dyn StateSlotRepository>) -> Self {
        Self {
            slots,
            key: STORAGE_KEY.to_owned(),
        }
    }

    /// Use a different slot key, e.g. one per profile.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the saved session, if there is a usable one.
    pub async fn load(&self) -> Option<SessionState> {
        match self.try_load().await {
            Ok(state) => state,
            Err(err) => {
                warn!(key = %self.key, error = %err, "ignoring saved session");
                None
            }
        }
    }

    /// Overwrite the saved session with `state`.
    pub async fn save(&self, state: &SessionState) {
        if let Err(err) = self.try_save(state).await {
            warn!(key = %self.key, error = %err, "failed to save session");
        }
    }

    /// Forget the saved session.
    pub async fn clear(&self) {
        if let Err(err) = self.slots.delete_slot(&self.key).await {
            warn!(key = %self.key, error = %err, "failed to clear saved session");
        }
    }

    /// # Errors
    ///
    /// Returns `SessionStoreError` if the slot cannot be read, decoded or validated.
    pub async fn try_load(&self) -> Result<Option<SessionState>, SessionStoreError> {
        let Some(raw) = self.slots.get_slot(&self.key).await? else {
            debug!(key = %self.key, "no saved session");
            return Ok(None);
        };
        let record: SessionStateRecord = serde_json::from_str(&raw)?;
        Ok(Some(record.into_state()?))
    }

    /// # Errors
    ///
    /// Returns `SessionStoreError` if the state cannot be encoded or written.
    pub async fn try_save(&self, state: &SessionState) -> Result<(), SessionStoreError> {
        let raw = serde_json::to_string(&SessionStateRecord::from_state(state))?;
        self.slots.put_slot(&self.key, &raw).await?;
        debug!(
            key = %self.key,
            answered = state.answers().len(),
            total = state.len(),
            "saved session"
        );
        Ok(())
    }
}
