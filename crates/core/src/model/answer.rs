use thiserror::Error;

use crate::model::Article;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnswerError {
    #[error("answer for index {index} records correct={correct}, but chose {chosen} expecting {expected}")]
    CorrectnessMismatch {
        index: usize,
        chosen: Article,
        expected: Article,
        correct: bool,
    },
}

/// One decision made by the user, frozen at the moment it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer {
    index: usize,
    chosen: Article,
    expected: Article,
    correct: bool,
}

impl Answer {
    #[must_use]
    pub fn new(index: usize, chosen: Article, expected: Article) -> Self {
        Self {
            index,
            chosen,
            expected,
            correct: chosen == expected,
        }
    }

    /// Rehydrate an answer from storage.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::CorrectnessMismatch` if the stored flag disagrees
    /// with the stored articles.
    pub fn from_persisted(
        index: usize,
        chosen: Article,
        expected: Article,
        correct: bool,
    ) -> Result<Self, AnswerError> {
        let answer = Self::new(index, chosen, expected);
        if answer.correct != correct {
            return Err(AnswerError::CorrectnessMismatch {
                index,
                chosen,
                expected,
                correct,
            });
        }
        Ok(answer)
    }

    /// Dataset index of the word that was asked.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn chosen(&self) -> Article {
        self.chosen
    }

    #[must_use]
    pub fn expected(&self) -> Article {
        self.expected
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.correct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correctness_is_derived_from_articles() {
        assert!(Answer::new(0, Article::De, Article::De).is_correct());
        assert!(!Answer::new(0, Article::De, Article::Het).is_correct());
    }

    #[test]
    fn persisted_answer_must_agree_with_articles() {
        assert!(Answer::from_persisted(3, Article::Het, Article::Het, true).is_ok());
        let err = Answer::from_persisted(3, Article::Het, Article::De, true).unwrap_err();
        assert!(matches!(
            err,
            AnswerError::CorrectnessMismatch { index: 3, .. }
        ));
    }
}
