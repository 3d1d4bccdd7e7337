use regex::Regex;
use std::sync::LazyLock;

use crate::models::ParsedQuery;
use crate::services::lexicon::Lexicon;

/// "under 500", "below ₹1200", "budget of 800", "<= 99"
static BUDGET_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\b(?:under|below|less than|up ?to|max|budget(?:\s+(?:of|is))?)|<=|<)\s*(?:rs\.?|inr|[₹$€£])?\s*([0-9]{2,7})(?:[^0-9]|$)",
    )
    .expect("budget phrase pattern is valid")
});

/// Any 2-7 digit number not embedded in a longer digit run
static STANDALONE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])([0-9]{2,7})(?:[^0-9]|$)").expect("number pattern is valid")
});

/// Whole digit-grouped numbers, so "1,500" reads as 1500 and "1,500,000" as 1500000
static DIGIT_GROUPING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,3}(?:,\d{3})+\b").expect("grouping pattern is valid")
});

/// Turns free text into a budget ceiling and a keyword set
pub struct QueryInterpreter<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> QueryInterpreter<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Never fails; an unhelpful query just yields no budget and no keywords
    pub fn parse(&self, text: &str) -> ParsedQuery {
        let lower = text.to_lowercase();
        ParsedQuery {
            budget: extract_budget(&lower),
            keywords: self.extract_keywords(&lower),
        }
    }

    fn extract_keywords(&self, lower: &str) -> Vec<String> {
        let mut keywords: Vec<String> = Vec::new();
        let tokens = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty());

        for token in tokens {
            if token.chars().count() < 2
                || token.chars().all(|c| c.is_ascii_digit())
                || self.lexicon.is_stopword(token)
            {
                continue;
            }
            if !keywords.iter().any(|kw| kw == token) {
                keywords.push(token.to_string());
            }
        }

        keywords
    }
}

fn extract_budget(lower: &str) -> Option<u64> {
    let normalized = DIGIT_GROUPING.replace_all(lower, |caps: &regex::Captures<'_>| {
        caps[0].replace(',', "")
    });

    let digits = BUDGET_PHRASE
        .captures(&normalized)
        .or_else(|| STANDALONE_NUMBER.captures(&normalized))
        .and_then(|caps| caps.get(1))?;

    digits
        .as_str()
        .parse::<u64>()
        .ok()
        .filter(|budget| *budget > 0)
}
