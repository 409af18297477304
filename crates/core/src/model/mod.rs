mod answer;
mod article;
mod session;
mod summary;
mod word;

pub use answer::{Answer, AnswerError};
pub use article::{Article, ArticleError};
pub use session::{SessionState, SessionStateError};
pub use summary::{SessionProgress, SessionSummary, WrongAnswer};
pub use word::{Dataset, DatasetError, WordEntry};
