use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::models::Product;

/// The read-only product catalog served by this instance
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> AppResult<Self> {
        if let Some(bad) = products
            .iter()
            .find(|p| !p.price.is_finite() || p.price < 0.0)
        {
            return Err(AppError::Catalog(format!(
                "Product \"{}\" by {} has invalid price {}",
                bad.name, bad.brand, bad.price
            )));
        }
        Ok(Self { products })
    }

    pub fn from_json(json: &str) -> AppResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)
            .map_err(|e| AppError::Catalog(format!("Catalog is not a product array: {}", e)))?;
        Self::new(products)
    }

    /// Loads the catalog file once at startup
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Catalog(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json(&json)?;

        if catalog.is_empty() {
            tracing::warn!(path = %path.display(), "Catalog is empty, every query will return no match");
        } else {
            tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
        }

        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(
            r#"[
                {"brand":"Philips","product_name":"Trimmer","price":1299,"category":"Personal Care","description":"Cordless"},
                {"product_name":"Mystery Box","price":0}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products()[1].brand, "Unknown");
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = Catalog::from_json(r#"[{"brand":"X","product_name":"Y","price":-1}]"#);
        assert!(matches!(result, Err(AppError::Catalog(_))));
    }

    #[test]
    fn test_not_an_array_rejected() {
        assert!(Catalog::from_json(r#"{"products": []}"#).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Catalog::load("does/not/exist.json"),
            Err(AppError::Catalog(_))
        ));
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/products.json");
        let catalog = Catalog::load(path).unwrap();
        assert!(!catalog.is_empty());
    }
}
