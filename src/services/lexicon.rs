use std::collections::{HashMap, HashSet};

const DEFAULT_STOPWORDS: &[&str] = &[
    // determiners and pronouns
    "a", "an", "the", "i", "im", "me", "my", "we", "our", "you", "your", "it", "its", "this",
    "that", "these", "those", "some", "any",
    // prepositions and conjunctions
    "for", "to", "on", "in", "of", "and", "or", "with", "at", "by", "from", "into", "about",
    "under", "below", "less", "than", "upto", "up",
    // domain filler
    "need", "want", "looking", "show", "find", "buy", "get", "please", "budget", "random",
    "something", "rs", "inr", "rupees", "max",
];

const DEFAULT_SYNONYMS: &[(&str, &[&str])] = &[
    ("cup", &["kitchen", "coffee", "mug"]),
    ("mugs", &["kitchen", "coffee", "mug"]),
    ("mug", &["kitchen", "coffee", "mug"]),
    ("speaker", &["entertainment", "audio"]),
    ("headphones", &["entertainment", "audio"]),
    ("headphone", &["entertainment", "audio"]),
    ("vacuum", &["home improvement"]),
    ("lock", &["security", "security & surveillance"]),
    ("camera", &["security", "security & surveillance"]),
    ("coffee", &["kitchen appliances"]),
];

/// Stopword and synonym tables shared read-only by the query interpreter and scorer
#[derive(Debug, Clone)]
pub struct Lexicon {
    stopwords: HashSet<String>,
    synonyms: HashMap<String, Vec<String>>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(
            DEFAULT_STOPWORDS.iter().map(|w| w.to_string()),
            DEFAULT_SYNONYMS.iter().map(|(kw, terms)| {
                (kw.to_string(), terms.iter().map(|t| t.to_string()).collect::<Vec<_>>())
            }),
        )
    }
}

impl Lexicon {
    /// Builds a lexicon from custom tables; entries are lowercased
    pub fn new(
        stopwords: impl IntoIterator<Item = String>,
        synonyms: impl IntoIterator<Item = (String, Vec<String>)>,
    ) -> Self {
        Self {
            stopwords: stopwords.into_iter().map(|w| w.to_lowercase()).collect(),
            synonyms: synonyms
                .into_iter()
                .map(|(kw, terms)| {
                    (
                        kw.to_lowercase(),
                        terms.into_iter().map(|t| t.to_lowercase()).collect(),
                    )
                })
                .collect(),
        }
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Category terms related to a keyword, empty when it has none
    pub fn synonyms_for(&self, keyword: &str) -> &[String] {
        self.synonyms
            .get(keyword)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stopwords() {
        let lexicon = Lexicon::default();
        assert!(lexicon.is_stopword("need"));
        assert!(lexicon.is_stopword("budget"));
        assert!(lexicon.is_stopword("something"));
        assert!(!lexicon.is_stopword("kitchen"));
    }

    #[test]
    fn test_default_synonyms() {
        let lexicon = Lexicon::default();
        assert_eq!(
            lexicon.synonyms_for("camera"),
            &["security".to_string(), "security & surveillance".to_string()]
        );
        assert!(lexicon.synonyms_for("kitchen").is_empty());
    }

    #[test]
    fn test_custom_tables_are_lowercased() {
        let lexicon = Lexicon::new(
            vec!["Gimme".to_string()],
            vec![("Drone".to_string(), vec!["Aerial".to_string()])],
        );
        assert!(lexicon.is_stopword("gimme"));
        assert_eq!(lexicon.synonyms_for("drone"), &["aerial".to_string()]);
        assert!(!lexicon.is_stopword("need"));
    }
}
