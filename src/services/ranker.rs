use std::cmp::Ordering;

use crate::models::{ParsedQuery, Product, Recommendation, ScoredProduct};
use crate::services::{
    lexicon::Lexicon, query::QueryInterpreter, reasons::ReasonComposer, scoring::CatalogScorer,
};

pub const DEFAULT_LIMIT: usize = 5;
const RESCUE_COUNT: usize = 3;

/// Deterministic ranking over the local catalog
///
/// Always produces between one and `limit` recommendations. When the query
/// carries no usable signal the result is the single "no match" record, which
/// is never mixed with real products.
pub struct LocalRanker<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> LocalRanker<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn rank(&self, query: &str, catalog: &[Product], limit: usize) -> Vec<Recommendation> {
        let parsed = QueryInterpreter::new(self.lexicon).parse(query);
        self.rank_parsed(&parsed, catalog, limit)
    }

    pub fn rank_parsed(
        &self,
        parsed: &ParsedQuery,
        catalog: &[Product],
        limit: usize,
    ) -> Vec<Recommendation> {
        if !parsed.has_keywords() || limit == 0 {
            return vec![Recommendation::no_match()];
        }

        let scorer = CatalogScorer::new(self.lexicon);
        let mut scored: Vec<ScoredProduct> = catalog
            .iter()
            .map(|product| scorer.score_product(product, parsed))
            .collect();

        if !scored.iter().any(|s| s.relevance > 0.0) {
            tracing::debug!(
                keywords = ?parsed.keywords,
                catalog_size = catalog.len(),
                "No catalog item relates to the query keywords"
            );
            return vec![Recommendation::no_match()];
        }

        // Stable: equal scores keep catalog order
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(limit);

        let composer = ReasonComposer::new(self.lexicon);
        let top: Vec<Recommendation> = scored
            .iter()
            .map(|s| {
                let reason = composer.compose(s.product, parsed.budget, &parsed.keywords);
                Recommendation::from_product(s.product, reason)
            })
            .collect();

        let ranked = match parsed.budget {
            Some(budget) if !top.iter().any(|r| r.price <= budget as f64) => {
                tracing::debug!(budget, "No ranked item within budget, adding cheapest alternatives");
                with_budget_rescue(top, catalog, budget, limit)
            }
            _ => top,
        };

        if ranked.is_empty() {
            return vec![Recommendation::no_match()];
        }
        ranked
    }
}

/// Prepends the cheapest catalog items ahead of the scored list
fn with_budget_rescue(
    top: Vec<Recommendation>,
    catalog: &[Product],
    budget: u64,
    limit: usize,
) -> Vec<Recommendation> {
    let mut cheapest: Vec<&Product> = catalog.iter().collect();
    cheapest.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));

    let reason = format!(
        "closest budget-friendly alternative (no items under {})",
        budget
    );
    let mut merged: Vec<Recommendation> = cheapest
        .into_iter()
        .take(RESCUE_COUNT)
        .map(|product| Recommendation::from_product(product, reason.clone()))
        .collect();

    for rec in top {
        if !merged.iter().any(|m| m.dedup_key() == rec.dedup_key()) {
            merged.push(rec);
        }
    }
    merged.truncate(limit);
    merged
}
