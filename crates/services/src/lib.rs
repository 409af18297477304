#![forbid(unsafe_code)]

pub mod drill;
pub mod error;
pub mod rules;
pub mod view;

pub use drill::{AnswerOutcome, DrillService};
pub use error::SessionError;
pub use rules::{ARTICLE_RULES, ArticleRules, RULES_CAVEAT, rules_for};
pub use view::{DrillView, RECENT_ANSWERS_SHOWN, RecentAnswerView, SummaryView, WrongWordView};
