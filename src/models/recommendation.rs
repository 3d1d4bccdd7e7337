use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Product;

pub const SENTINEL_BRAND: &str = "N/A";
pub const SENTINEL_NAME: &str = "No matching products found";
const SENTINEL_CATEGORY: &str = "Information";
const SENTINEL_DESCRIPTION: &str = "We don't currently have products matching your query, but we do offer healthtech, entertainment, travel accessories, and smart devices.";
const SENTINEL_REASON: &str = "Your query doesn't match our available product categories. Try searching for healthtech, entertainment, travel, or smart home products.";

/// A single recommended product with the reason it was picked
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub brand: String,
    pub product_name: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub reason: String,
}

impl Recommendation {
    pub fn from_product(product: &Product, reason: String) -> Self {
        Self {
            brand: product.brand.clone(),
            product_name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            description: product.description.clone(),
            reason,
        }
    }

    /// The canonical "no match" record
    pub fn no_match() -> Self {
        Self {
            brand: SENTINEL_BRAND.to_string(),
            product_name: SENTINEL_NAME.to_string(),
            price: 0.0,
            category: SENTINEL_CATEGORY.to_string(),
            description: SENTINEL_DESCRIPTION.to_string(),
            reason: SENTINEL_REASON.to_string(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.brand == SENTINEL_BRAND
    }

    /// Identity used when merging lists from different sources
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.brand, &self.product_name)
    }

    /// View of this record as a catalog product, for reason composition
    pub fn as_product(&self) -> Product {
        Product::new(
            self.brand.clone(),
            self.product_name.clone(),
            self.price,
            self.category.clone(),
            self.description.clone(),
        )
    }
}

/// Where the final list came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    /// Validated remote advisor output, unmodified
    Remote,
    /// Remote output topped up with local rankings
    Blended,
    /// Deterministic local ranking only
    Fallback,
}

impl std::fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationSource::Remote => write!(f, "remote"),
            RecommendationSource::Blended => write!(f, "blended"),
            RecommendationSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Response body returned to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    pub source: RecommendationSource,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_is_sentinel() {
        let sentinel = Recommendation::no_match();
        assert!(sentinel.is_sentinel());
        assert_eq!(sentinel.product_name, SENTINEL_NAME);
        assert_eq!(sentinel.price, 0.0);
    }

    #[test]
    fn test_product_recommendation_is_not_sentinel() {
        let product = Product::new("Sony", "Speaker", 2999.0, "Entertainment", "Bluetooth");
        let rec = Recommendation::from_product(&product, "because".to_string());
        assert!(!rec.is_sentinel());
        assert_eq!(rec.dedup_key(), ("Sony", "Speaker"));
        assert_eq!(rec.as_product(), product);
    }

    #[test]
    fn test_source_serializes_lowercase() {
        let json = serde_json::to_string(&RecommendationSource::Blended).unwrap();
        assert_eq!(json, r#""blended""#);
        assert_eq!(RecommendationSource::Fallback.to_string(), "fallback");
    }
}
