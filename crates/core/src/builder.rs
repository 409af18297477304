use rand::Rng;

use crate::model::SessionState;

/// Return a uniformly shuffled copy of `input`.
///
/// Fisher–Yates, walking from the last position down to 1 and swapping each
/// position with a uniformly drawn one at or before it. The loop direction
/// and the `0..=i` draw fix the output for a seeded generator, so this is not
/// interchangeable with `SliceRandom::shuffle`.
pub fn shuffle<T, R>(input: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut out = input.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Build an unanswered session over `indices` in random order.
///
/// Duplicates in `indices` are kept. Empty input gives a session that is
/// already done.
pub fn build_session<R>(indices: &[usize], rng: &mut R) -> SessionState
where
    R: Rng + ?Sized,
{
    SessionState::unanswered(shuffle(indices, rng))
}

/// Chooses which dataset indices a new session covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionBuilder {
    indices: Vec<usize>,
}

impl SessionBuilder {
    /// Every word of a dataset with `dataset_len` entries.
    #[must_use]
    pub fn all(dataset_len: usize) -> Self {
        Self {
            indices: (0..dataset_len).collect(),
        }
    }

    #[must_use]
    pub fn from_indices(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
        }
    }

    /// The words answered incorrectly in `previous`, once each time they were missed.
    #[must_use]
    pub fn retry_wrong(previous: &SessionState) -> Self {
        Self {
            indices: previous.wrong_indices(),
        }
    }

    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn build<R>(&self, rng: &mut R) -> SessionState
    where
        R: Rng + ?Sized,
    {
        build_session(&self.indices, rng)
    }
}
