//! Word lists stored as JSON: `[{"word": "huis", "article": "het"}, ...]`.

use std::path::Path;

use lidwoord_core::model::{Dataset, DatasetError, WordEntry};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetFileError {
    #[error("cannot read word list: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed word list: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] DatasetError),
}

/// Parse a JSON word list.
///
/// # Errors
///
/// Returns `DatasetFileError::Decode` for malformed JSON or unknown articles,
/// and `DatasetFileError::Invalid` for blank words.
pub fn parse_dataset(raw: &str) -> Result<Dataset, DatasetFileError> {
    let entries: Vec<WordEntry> = serde_json::from_str(raw)?;
    Ok(Dataset::new(entries)?)
}

/// Read and parse a JSON word list from disk.
///
/// # Errors
///
/// Returns `DatasetFileError` if the file cannot be read or parsed.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetFileError> {
    let raw = std::fs::read_to_string(path)?;
    let dataset = parse_dataset(&raw)?;
    debug!(path = %path.display(), words = dataset.len(), "loaded word list");
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lidwoord_core::model::Article;

    #[test]
    fn parses_words_in_file_order() {
        let dataset = parse_dataset(
            r#"[{"word":"huis","article":"het"},{"word":"tafel","article":"de"}]"#,
        )
        .unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[0], WordEntry::new("huis", Article::Het));
        assert_eq!(dataset.article_at(1), Some(Article::De));
    }

    #[test]
    fn rejects_unknown_articles_and_blank_words() {
        assert!(matches!(
            parse_dataset(r#"[{"word":"huis","article":"den"}]"#),
            Err(DatasetFileError::Decode(_))
        ));
        assert!(matches!(
            parse_dataset(r#"[{"word":" ","article":"de"}]"#),
            Err(DatasetFileError::Invalid(DatasetError::EmptyWord { position: 0 }))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_dataset(Path::new("/nonexistent/lidwoord/words.json")).unwrap_err();
        assert!(matches!(err, DatasetFileError::Io(_)));
    }
}
