use lidwoord_core::model::{Article, Dataset, SessionProgress, SessionState, WordEntry};

/// How many past answers the drill screen shows.
pub const RECENT_ANSWERS_SHOWN: usize = 3;

/// One entry of the recent-answers ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentAnswerView {
    pub word: String,
    pub chosen: Article,
    pub expected: Article,
    pub correct: bool,
}

/// A missed word on the end-of-session screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrongWordView {
    pub index: usize,
    pub word: String,
    pub chosen: Article,
    pub expected: Article,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub total: usize,
    pub correct: usize,
    pub wrong: Vec<WrongWordView>,
}

impl SummaryView {
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.wrong.is_empty()
    }
}

/// Everything a front end needs to draw the current moment of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillView {
    /// Word being asked; `None` once the session is done.
    pub current: Option<WordEntry>,
    /// 1-based number of the question being asked; `None` once done.
    pub question_number: Option<usize>,
    pub progress: SessionProgress,
    /// Newest first, at most `RECENT_ANSWERS_SHOWN`.
    pub recent: Vec<RecentAnswerView>,
    /// Present once the session is done.
    pub summary: Option<SummaryView>,
}

impl DrillView {
    #[must_use]
    pub fn build(dataset: &Dataset, state: &SessionState) -> Self {
        let word_at = |index: usize| {
            dataset
                .get(index)
                .map_or_else(|| format!("#{index}"), |e| e.word.clone())
        };

        let (current, question_number) = if state.is_done() {
            (None, None)
        } else {
            (
                state.current_index().and_then(|i| dataset.get(i)).cloned(),
                Some(state.answers().len() + 1),
            )
        };

        let recent = state
            .recent_answers(RECENT_ANSWERS_SHOWN)
            .map(|a| RecentAnswerView {
                word: word_at(a.index()),
                chosen: a.chosen(),
                expected: a.expected(),
                correct: a.is_correct(),
            })
            .collect();

        let summary = state.is_done().then(|| {
            let summary = state.summary();
            SummaryView {
                total: summary.total(),
                correct: summary.correct(),
                wrong: summary
                    .wrong()
                    .iter()
                    .map(|w| WrongWordView {
                        index: w.index,
                        word: word_at(w.index),
                        chosen: w.chosen,
                        expected: w.expected,
                    })
                    .collect(),
            }
        });

        Self {
            current,
            question_number,
            progress: state.progress(),
            recent,
            summary,
        }
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.progress.percent()
    }
}
