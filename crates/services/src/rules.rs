use lidwoord_core::model::Article;

/// Rules of thumb for one article. They have exceptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleRules {
    pub article: Article,
    pub rules: &'static [&'static str],
}

pub const RULES_CAVEAT: &str = "let op, deze gelden niet altijd!";

pub const ARTICLE_RULES: [ArticleRules; 2] = [
    ArticleRules {
        article: Article::De,
        rules: &[
            "Woorden in het meervoud",
            "Beroepen",
            "Personen",
            "Bergen en rivieren",
            "Groenten, fruit, bomen en planten",
            "Letters en cijfers",
            "Vrouwelijke woorden die eindigen op -ing, -ie, -ij, -heid, -teit, -a, -nis, -st, -schap, -de",
        ],
    },
    ArticleRules {
        article: Article::Het,
        rules: &[
            "Verkleinwoorden",
            "Woorden van twee of meer lettergrepen die beginnen met be-, ge-, ver-, ont-",
            "Namen van talen",
            "Namen van metalen",
            "Windrichtingen",
            "Woorden die eindigen op -isme, -ment, -sel, -um",
            "Zelfstandige naamwoorden afgeleid van werkwoorden",
        ],
    },
];

/// The rule list for `article`.
#[must_use]
pub fn rules_for(article: Article) -> &'static [&'static str] {
    ARTICLE_RULES
        .iter()
        .find(|r| r.article == article)
        .map(|r| r.rules)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_article_has_rules() {
        for article in Article::ALL {
            assert!(!rules_for(article).is_empty(), "{article}");
        }
    }

    #[test]
    fn diminutives_are_het() {
        assert!(rules_for(Article::Het).contains(&"Verkleinwoorden"));
        assert!(!rules_for(Article::De).contains(&"Verkleinwoorden"));
    }
}
