use crate::models::Product;
use crate::services::lexicon::Lexicon;
use crate::services::scoring::ProductText;

const GENERIC_REASON: &str = "great value pick based on your query";

/// Builds the human-readable justification attached to each recommendation
pub struct ReasonComposer<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> ReasonComposer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Budget clause first, then one clause per keyword in query order
    pub fn compose(&self, product: &Product, budget: Option<u64>, keywords: &[String]) -> String {
        let mut parts = Vec::new();

        if let Some(budget) = budget {
            if product.price <= budget as f64 {
                parts.push(format!("within your budget of {}", budget));
            } else {
                parts.push(format!("slightly above your budget of {}", budget));
            }
        }

        let text = ProductText::of(product);
        for keyword in keywords.iter().filter(|kw| !kw.is_empty()) {
            if text.matches_directly(keyword) {
                parts.push(format!("matches your keyword \"{}\"", keyword));
            } else if let Some(term) = self.related_term(&text, keyword) {
                parts.push(format!("related to \"{}\" via {}", keyword, term));
            }
        }

        if parts.is_empty() {
            return GENERIC_REASON.to_string();
        }
        parts.join(", ")
    }

    fn related_term<'t>(&'t self, text: &ProductText, keyword: &str) -> Option<&'t str> {
        let synonyms = self.lexicon.synonyms_for(keyword);
        synonyms
            .iter()
            .find(|term| text.category.contains(term.as_str()))
            .or_else(|| synonyms.iter().find(|term| text.name.contains(term.as_str())))
            .map(String::as_str)
    }
}
