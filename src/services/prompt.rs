use crate::error::{AppError, AppResult};
use crate::models::{ParsedQuery, Product};

const ADVISOR_RULES: &str = r#"You are an AI Product Advisor.
From the provided product catalog JSON, recommend the best matching items for the user's request.

Rules:
- Parse budget if the user mentions constraints like "under 100". Treat numbers as currency units.
- Prefer items within budget; if none fit, recommend the closest affordable alternatives and mention they are slightly above budget.
- If the query is vague, infer likely interests and return value-for-money, broadly appealing picks.
- If the user's query is random, nonsensical, or contains no meaningful keywords, return ONLY a single JSON object inside the array exactly as shown below, with no other products:
  {
    "brand": "N/A",
    "product_name": "No valid match found",
    "price": 0,
    "category": "General",
    "description": "Unable to understand your request.",
    "reason": "Your query doesn't seem to relate to any products. Please try rephrasing."
  }
- Otherwise always return 3-5 items when possible.
- Keep prices numeric. Do not include currency symbols."#;

const RESPONSE_FORMAT: &str = r#"Respond ONLY in valid JSON using this exact format:
[
  {
    "brand": "Brand",
    "product_name": "Product Name",
    "price": 2098,
    "category": "Category",
    "description": "Short description",
    "reason": "Why it's recommended (mention budget/keyword match where relevant)"
  }
]
Important: Return ONLY the JSON array, with 3-5 items."#;

/// Builds the advisor prompt embedding the query, its parsed signals and the catalog
pub fn build_prompt(query: &str, parsed: &ParsedQuery, catalog: &[Product]) -> AppResult<String> {
    let keywords = serde_json::to_string(&parsed.keywords)
        .map_err(|e| AppError::Internal(format!("Keyword serialization error: {}", e)))?;
    let catalog_json = serde_json::to_string_pretty(catalog)
        .map_err(|e| AppError::Internal(format!("Catalog serialization error: {}", e)))?;
    let budget = parsed
        .budget
        .map(|b| b.to_string())
        .unwrap_or_else(|| "none".to_string());

    Ok(format!(
        "{rules}\n\nUser Query: {query:?}\nDetected Budget: {budget}\nDetected Keywords: {keywords}\n\nProduct Catalog:\n{catalog_json}\n\n{format}",
        rules = ADVISOR_RULES,
        format = RESPONSE_FORMAT,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_signals_and_catalog() {
        let parsed = ParsedQuery {
            budget: Some(500),
            keywords: vec!["kitchen".to_string(), "kettle".to_string()],
        };
        let catalog = vec![Product::new("Prestige", "Electric Kettle", 450.0, "Kitchen", "Fast")];

        let prompt = build_prompt("kitchen kettle under 500", &parsed, &catalog).unwrap();

        assert!(prompt.contains("User Query: \"kitchen kettle under 500\""));
        assert!(prompt.contains("Detected Budget: 500"));
        assert!(prompt.contains(r#"Detected Keywords: ["kitchen","kettle"]"#));
        assert!(prompt.contains(r#""product_name": "Electric Kettle""#));
        assert!(prompt.ends_with("with 3-5 items."));
    }

    #[test]
    fn test_prompt_without_budget() {
        let parsed = ParsedQuery::default();
        let prompt = build_prompt("anything", &parsed, &[]).unwrap();

        assert!(prompt.contains("Detected Budget: none"));
        assert!(prompt.contains("Detected Keywords: []"));
    }
}
