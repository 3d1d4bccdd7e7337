use serde::{Deserialize, Serialize};

pub mod recommendation;

pub use recommendation::{Recommendation, RecommendationResponse, RecommendationSource};

/// A catalog product as supplied by the catalog file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(default = "default_brand")]
    pub brand: String,
    #[serde(rename = "product_name", alias = "name", default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

fn default_brand() -> String {
    "Unknown".to_string()
}

fn default_name() -> String {
    "Unnamed Product".to_string()
}

fn default_category() -> String {
    "General".to_string()
}

impl Product {
    pub fn new(
        brand: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            brand: brand.into(),
            name: name.into(),
            price,
            category: category.into(),
            description: description.into(),
        }
    }
}

/// Budget and keywords extracted from one query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Currency ceiling, always positive when present
    pub budget: Option<u64>,
    /// Normalized keywords in first-seen order, without duplicates
    pub keywords: Vec<String>,
}

impl ParsedQuery {
    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }
}

/// A product paired with its relevance score during ranking
#[derive(Debug, Clone, Copy)]
pub struct ScoredProduct<'a> {
    pub product: &'a Product,
    /// Keyword and synonym contribution only
    pub relevance: f64,
    /// Relevance plus budget contribution
    pub score: f64,
}
