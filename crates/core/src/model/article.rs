use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors that can occur while parsing an article.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArticleError {
    #[error("unknown article: {0:?} (expected \"de\" or \"het\")")]
    Unknown(String),
}

//
// ─── ARTICLE ──────────────────────────────────────────────────────────────────
//

/// Grammatical article of a Dutch noun.
///
/// - `De`: common gender (de-woorden)
/// - `Het`: neuter gender (het-woorden)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Article {
    De,
    Het,
}

impl Article {
    /// Both articles, in the order they are offered to the user.
    pub const ALL: [Article; 2] = [Article::De, Article::Het];

    /// Lowercase spelling as it appears in Dutch text.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Article::De => "de",
            Article::Het => "het",
        }
    }

    /// The other article.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Article::De => Article::Het,
            Article::Het => Article::De,
        }
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Article {
    type Err = ArticleError;

    /// Parses `"de"` or `"het"`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("de") {
            Ok(Article::De)
        } else if trimmed.eq_ignore_ascii_case("het") {
            Ok(Article::Het)
        } else {
            Err(ArticleError::Unknown(s.to_owned()))
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
