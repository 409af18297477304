//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by `DrillService`.
///
/// None of these are domain failures: a wrong answer is a recorded outcome.
/// They flag calls the front end should not have made, so it can ignore them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session already completed")]
    Completed,
    #[error("session is still in progress")]
    NotCompleted,
    #[error("no wrong answers to retry")]
    NothingToRetry,
    #[error("word index {index} is not in the dataset")]
    UnknownWord { index: usize },
}
