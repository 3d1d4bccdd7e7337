use crate::models::{ParsedQuery, Product, ScoredProduct};
use crate::services::lexicon::Lexicon;

const NAME_MATCH: f64 = 3.0;
const DESCRIPTION_MATCH: f64 = 2.0;
const CATEGORY_MATCH: f64 = 2.0;
const SYNONYM_CATEGORY_MATCH: f64 = 2.0;
const SYNONYM_NAME_MATCH: f64 = 1.0;
const WITHIN_BUDGET: f64 = 5.0;
const CLOSENESS_WEIGHT: f64 = 2.0;
const NEAR_MISS: f64 = 1.0;
/// Fraction over budget that still earns near-miss credit
const NEAR_MISS_TOLERANCE: f64 = 0.25;

/// Lowercased searchable fields of a product
pub(crate) struct ProductText {
    pub name: String,
    pub description: String,
    pub category: String,
}

impl ProductText {
    pub fn of(product: &Product) -> Self {
        Self {
            name: product.name.to_lowercase(),
            description: product.description.to_lowercase(),
            category: product.category.to_lowercase(),
        }
    }

    pub fn matches_directly(&self, keyword: &str) -> bool {
        self.name.contains(keyword)
            || self.description.contains(keyword)
            || self.category.contains(keyword)
    }
}

/// Deterministic keyword and budget relevance scoring
///
/// Scores are additive and never negative. A product with no keyword,
/// synonym or budget signal scores exactly zero.
pub struct CatalogScorer<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> CatalogScorer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn score(&self, product: &Product, budget: Option<u64>, keywords: &[String]) -> f64 {
        self.relevance(product, keywords) + budget_score(product.price, budget)
    }

    pub fn score_product<'p>(&self, product: &'p Product, query: &ParsedQuery) -> ScoredProduct<'p> {
        let relevance = self.relevance(product, &query.keywords);
        ScoredProduct {
            product,
            relevance,
            score: relevance + budget_score(product.price, query.budget),
        }
    }

    /// Keyword and synonym contribution, excluding the budget
    pub fn relevance(&self, product: &Product, keywords: &[String]) -> f64 {
        let text = ProductText::of(product);
        let mut score = 0.0;

        for keyword in keywords.iter().filter(|kw| !kw.is_empty()) {
            if text.name.contains(keyword.as_str()) {
                score += NAME_MATCH;
            }
            if text.description.contains(keyword.as_str()) {
                score += DESCRIPTION_MATCH;
            }
            if text.category.contains(keyword.as_str()) {
                score += CATEGORY_MATCH;
            }
            for term in self.lexicon.synonyms_for(keyword) {
                if text.category.contains(term.as_str()) {
                    score += SYNONYM_CATEGORY_MATCH;
                }
                if text.name.contains(term.as_str()) {
                    score += SYNONYM_NAME_MATCH;
                }
            }
        }

        score
    }
}

fn budget_score(price: f64, budget: Option<u64>) -> f64 {
    let Some(budget) = budget else {
        return 0.0;
    };
    if !price.is_finite() {
        return 0.0;
    }

    let budget = budget as f64;
    if price <= budget {
        let closeness = 1.0 - (budget - price).max(0.0) / budget.max(1.0);
        WITHIN_BUDGET + closeness * CLOSENESS_WEIGHT
    } else if (price - budget) / budget.max(1.0) <= NEAR_MISS_TOLERANCE {
        NEAR_MISS
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kws(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn kettle() -> Product {
        Product::new(
            "Prestige",
            "Electric Kettle",
            450.0,
            "Kitchen Appliances",
            "Boils water fast",
        )
    }

    #[test]
    fn test_name_description_category_weights() {
        let lexicon = Lexicon::default();
        let scorer = CatalogScorer::new(&lexicon);
        let product = kettle();

        assert_eq!(scorer.score(&product, None, &kws(&["kettle"])), 3.0);
        assert_eq!(scorer.score(&product, None, &kws(&["water"])), 2.0);
        assert_eq!(scorer.score(&product, None, &kws(&["appliances"])), 2.0);
        // "kitchen" only appears in the category
        assert_eq!(scorer.score(&product, None, &kws(&["kitchen"])), 2.0);
    }

    #[test]
    fn test_synonym_expansion() {
        let lexicon = Lexicon::default();
        let scorer = CatalogScorer::new(&lexicon);
        let product = kettle();

        // "mug" -> kitchen (category +2), coffee, mug
        assert_eq!(scorer.score(&product, None, &kws(&["mug"])), 2.0);
        // "coffee" -> kitchen appliances (category +2)
        assert_eq!(scorer.score(&product, None, &kws(&["coffee"])), 2.0);
    }

    #[test]
    fn test_synonym_name_credit() {
        let lexicon = Lexicon::default();
        let scorer = CatalogScorer::new(&lexicon);
        let product = Product::new("Boat", "Audio Bar", 1999.0, "Home", "Soundbar");

        // "speaker" -> audio matches the name only
        assert_eq!(scorer.score(&product, None, &kws(&["speaker"])), 1.0);
    }

    #[test]
    fn test_within_budget_bonus() {
        let lexicon = Lexicon::default();
        let scorer = CatalogScorer::new(&lexicon);
        let product = kettle();

        let score = scorer.score(&product, Some(500), &[]);
        // 5 + (1 - 50/500) * 2
        assert!((score - 6.8).abs() < 1e-9);
    }

    #[test]
    fn test_exact_budget_gets_full_closeness() {
        let lexicon = Lexicon::default();
        let scorer = CatalogScorer::new(&lexicon);
        let score = scorer.score(&kettle(), Some(450), &[]);
        assert!((score - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_near_miss_and_far_over_budget() {
        let lexicon = Lexicon::default();
        let scorer = CatalogScorer::new(&lexicon);
        let product = kettle();

        assert_eq!(scorer.score(&product, Some(400), &[]), 1.0);
        assert_eq!(scorer.score(&product, Some(300), &[]), 0.0);
    }

    #[test]
    fn test_near_miss_boundary_is_inclusive() {
        let lexicon = Lexicon::default();
        let scorer = CatalogScorer::new(&lexicon);
        let product = Product::new("Pigeon", "Toaster", 500.0, "Kitchen Appliances", "");

        // exactly 25% over
        assert_eq!(scorer.score(&product, Some(400), &[]), 1.0);
        assert_eq!(scorer.score(&product, Some(399), &[]), 0.0);
    }

    #[test]
    fn test_no_signal_scores_zero() {
        let lexicon = Lexicon::default();
        let scorer = CatalogScorer::new(&lexicon);
        assert_eq!(scorer.score(&kettle(), None, &[]), 0.0);
    }

    #[test]
    fn test_name_keyword_adds_exactly_three() {
        let lexicon = Lexicon::default();
        let scorer = CatalogScorer::new(&lexicon);
        let product = Product::new("Acme", "Torch", 900.0, "Outdoors", "Bright light");

        let base = scorer.score(&product, Some(1000), &kws(&["bright"]));
        let with_name = scorer.score(&product, Some(1000), &kws(&["bright", "torch"]));
        assert!((with_name - base - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_is_pure() {
        let lexicon = Lexicon::default();
        let scorer = CatalogScorer::new(&lexicon);
        let product = kettle();
        let keywords = kws(&["kettle", "mug"]);

        let first = scorer.score(&product, Some(600), &keywords);
        let second = scorer.score(&product, Some(600), &keywords);
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_product_splits_relevance() {
        let lexicon = Lexicon::default();
        let scorer = CatalogScorer::new(&lexicon);
        let product = kettle();
        let query = ParsedQuery {
            budget: Some(450),
            keywords: kws(&["kettle"]),
        };

        let scored = scorer.score_product(&product, &query);
        assert_eq!(scored.relevance, 3.0);
        assert!((scored.score - 10.0).abs() < 1e-9);
    }
}
