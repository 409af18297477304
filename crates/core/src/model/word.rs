use serde::{Deserialize, Serialize};
use std::ops::Index;
use thiserror::Error;

use crate::model::Article;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DatasetError {
    #[error("word at position {position} is empty")]
    EmptyWord { position: usize },
}

//
// ─── WORD ENTRY ────────────────────────────────────────────────────────────────
//

/// A noun together with the article it takes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub article: Article,
}

impl WordEntry {
    #[must_use]
    pub fn new(word: impl Into<String>, article: Article) -> Self {
        Self {
            word: word.into(),
            article,
        }
    }
}

//
// ─── DATASET ───────────────────────────────────────────────────────────────────
//

/// Ordered, read-only word list addressed by zero-based index.
///
/// Sessions only ever store indices into a dataset, so the order of entries
/// must stay stable for saved sessions to keep their meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    entries: Vec<WordEntry>,
}

impl Dataset {
    /// Build a dataset, rejecting blank words.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::EmptyWord` for the first entry whose word is blank.
    pub fn new(entries: Vec<WordEntry>) -> Result<Self, DatasetError> {
        if let Some(position) = entries.iter().position(|e| e.word.trim().is_empty()) {
            return Err(DatasetError::EmptyWord { position });
        }
        Ok(Self { entries })
    }

    /// The word list compiled into the crate.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = BUILTIN_WORDS
            .iter()
            .map(|(word, article)| WordEntry::new(*word, *article))
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&WordEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn article_at(&self, index: usize) -> Option<Article> {
        self.entries.get(index).map(|e| e.article)
    }

    #[must_use]
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.entries.len()
    }

    /// Every index of the dataset, in dataset order.
    #[must_use]
    pub fn all_indices(&self) -> Vec<usize> {
        (0..self.entries.len()).collect()
    }

    #[must_use]
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }
}

impl Index<usize> for Dataset {
    type Output = WordEntry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

const BUILTIN_WORDS: &[(&str, Article)] = &[
    ("huis", Article::Het),
    ("tafel", Article::De),
    ("kind", Article::Het),
    ("stoel", Article::De),
    ("boek", Article::Het),
    ("man", Article::De),
    ("water", Article::Het),
    ("vrouw", Article::De),
    ("brood", Article::Het),
    ("auto", Article::De),
    ("raam", Article::Het),
    ("fiets", Article::De),
    ("meisje", Article::Het),
    ("kat", Article::De),
    ("paard", Article::Het),
    ("hond", Article::De),
    ("bed", Article::Het),
    ("deur", Article::De),
    ("land", Article::Het),
    ("stad", Article::De),
    ("jaar", Article::Het),
    ("straat", Article::De),
    ("werk", Article::Het),
    ("boom", Article::De),
    ("geld", Article::Het),
    ("bloem", Article::De),
    ("woord", Article::Het),
    ("zon", Article::De),
    ("bos", Article::Het),
    ("maan", Article::De),
    ("dak", Article::Het),
    ("taal", Article::De),
    ("ei", Article::Het),
    ("school", Article::De),
    ("glas", Article::Het),
    ("kerk", Article::De),
    ("hoofd", Article::Het),
    ("trein", Article::De),
    ("oog", Article::Het),
    ("vis", Article::De),
    ("oor", Article::Het),
    ("appel", Article::De),
    ("been", Article::Het),
    ("koffie", Article::De),
    ("hart", Article::Het),
    ("melk", Article::De),
    ("bier", Article::Het),
    ("tijd", Article::De),
    ("mes", Article::Het),
    ("vraag", Article::De),
    ("schip", Article::Het),
    ("week", Article::De),
    ("spel", Article::Het),
    ("dag", Article::De),
    ("lied", Article::Het),
    ("nacht", Article::De),
    ("weer", Article::Het),
    ("winkel", Article::De),
    ("zand", Article::Het),
    ("sleutel", Article::De),
    ("licht", Article::Het),
    ("feest", Article::Het),
];

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_words() {
        let err = Dataset::new(vec![
            WordEntry::new("huis", Article::Het),
            WordEntry::new("  ", Article::De),
        ])
        .unwrap_err();
        assert_eq!(err, DatasetError::EmptyWord { position: 1 });
    }

    #[test]
    fn lookups_respect_bounds() {
        let dataset = Dataset::new(vec![
            WordEntry::new("huis", Article::Het),
            WordEntry::new("tafel", Article::De),
        ])
        .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.article_at(1), Some(Article::De));
        assert_eq!(dataset.article_at(2), None);
        assert!(dataset.contains_index(0));
        assert!(!dataset.contains_index(2));
        assert_eq!(dataset[0].word, "huis");
        assert_eq!(dataset.all_indices(), vec![0, 1]);
    }

    #[test]
    fn builtin_dataset_is_valid_and_has_both_articles() {
        let builtin = Dataset::builtin();
        assert!(!builtin.is_empty());
        assert!(Dataset::new(builtin.entries().to_vec()).is_ok());
        assert!(builtin.entries().iter().any(|e| e.article == Article::De));
        assert!(builtin.entries().iter().any(|e| e.article == Article::Het));
    }
}
