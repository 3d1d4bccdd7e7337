use serde_json::{Map, Value};

use crate::models::{recommendation::SENTINEL_BRAND, Recommendation};

/// Why a remote advisor response could not be used
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Malformed advisor response: {0}")]
    MalformedResponse(String),

    #[error("Advisor response contained no valid recommendations")]
    EmptyValidResponse,
}

/// A remote response that passed validation
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteResponse {
    /// Usable recommendations; `reason` may be empty when the advisor omitted it
    Recommendations(Vec<Recommendation>),
    /// The advisor's canonical "no match" shape
    NoMatch,
}

/// Parses and normalizes untrusted advisor output
///
/// Accepts a bare JSON array or text with an array embedded in it. Entries
/// missing a required field are dropped, prices are coerced to non-negative
/// numbers, and duplicate `(brand, product_name)` pairs keep the first entry.
pub fn validate(raw: &str) -> Result<RemoteResponse, ValidationError> {
    let entries = parse_array(raw.trim())?;

    let mut recommendations: Vec<Recommendation> = Vec::new();
    for entry in entries.iter().filter_map(Value::as_object) {
        let Some(rec) = normalize_entry(entry) else {
            continue;
        };
        if !recommendations
            .iter()
            .any(|existing| existing.dedup_key() == rec.dedup_key())
        {
            recommendations.push(rec);
        }
    }

    if recommendations.is_empty() {
        return Err(ValidationError::EmptyValidResponse);
    }

    if recommendations.len() == 1 && is_no_match_shape(&recommendations[0]) {
        return Ok(RemoteResponse::NoMatch);
    }

    // "N/A" records are never inventory
    recommendations.retain(|rec| !rec.is_sentinel());
    if recommendations.is_empty() {
        return Ok(RemoteResponse::NoMatch);
    }

    Ok(RemoteResponse::Recommendations(recommendations))
}

fn parse_array(text: &str) -> Result<Vec<Value>, ValidationError> {
    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(direct_err) => {
            let embedded = extract_array_slice(text).ok_or_else(|| {
                ValidationError::MalformedResponse(format!("no JSON array found: {}", direct_err))
            })?;
            serde_json::from_str::<Value>(embedded).map_err(|e| {
                ValidationError::MalformedResponse(format!("embedded array is invalid: {}", e))
            })?
        }
    };

    match value {
        Value::Array(entries) => Ok(entries),
        other => Err(ValidationError::MalformedResponse(format!(
            "expected a JSON array, got {}",
            json_kind(&other)
        ))),
    }
}

/// Outermost bracketed span, e.g. an array wrapped in a markdown fence
fn extract_array_slice(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

fn normalize_entry(entry: &Map<String, Value>) -> Option<Recommendation> {
    let price = entry.get("price").filter(|v| !v.is_null())?;

    Some(Recommendation {
        brand: required_text(entry, "brand")?,
        product_name: required_text(entry, "product_name")?,
        price: coerce_price(price),
        category: required_text(entry, "category")?,
        description: required_text(entry, "description")?,
        reason: entry
            .get("reason")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    })
}

fn required_text(entry: &Map<String, Value>, field: &str) -> Option<String> {
    let text = match entry.get(field)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Numbers pass through; numeric strings are parsed leniently; anything else is 0
fn coerce_price(value: &Value) -> f64 {
    let price = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let s = s.trim();
            let Some(start) = s.find(|c: char| c.is_ascii_digit()) else {
                return 0.0;
            };
            // currency prefixes are dropped; a leading minus still means negative
            if s[..start].trim_end().ends_with('-') {
                return 0.0;
            }
            let cleaned: String = s[start..].chars().filter(|c| *c != ',').collect();
            cleaned.trim().parse::<f64>().unwrap_or(0.0)
        }
        _ => 0.0,
    };

    if price.is_finite() && price >= 0.0 {
        price
    } else {
        0.0
    }
}

fn is_no_match_shape(rec: &Recommendation) -> bool {
    let name = rec.product_name.to_lowercase();
    rec.brand == SENTINEL_BRAND && name.contains("no ") && name.contains("match")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
