//! Google Gemini provider
//!
//! Calls `generateContent` with fixed generation parameters and safety
//! thresholds. A missing API key is reported as a configuration error on
//! every call rather than at startup, so the service can still run on
//! local rankings alone.

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::providers::AdvisorProvider,
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const TEMPERATURE: f32 = 0.7;
const TOP_K: u32 = 40;
const TOP_P: f32 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 1024;
const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(
        api_key: Option<String>,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key: api_key
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.gemini_credential().ok().map(str::to_string),
            config.gemini_api_url.clone(),
            config.gemini_model.clone(),
            config.remote_timeout(),
        )
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url, self.model
        )
    }

    fn build_request(prompt: &str) -> GenerateRequest<'_> {
        GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
            safety_settings: SAFETY_CATEGORIES
                .into_iter()
                .map(|category| SafetySetting {
                    category,
                    threshold: SAFETY_THRESHOLD,
                })
                .collect(),
        }
    }

    /// Concatenates the text parts of the first candidate
    fn extract_text(response: GenerateResponse) -> AppResult<String> {
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AppError::ExternalApi(
                "Gemini returned no candidate text".to_string(),
            ));
        }
        Ok(text.trim().to_string())
    }
}

#[async_trait::async_trait]
impl AdvisorProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::Configuration("GEMINI_API_KEY environment variable is not set".to_string())
        })?;

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&Self::build_request(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                provider = "gemini",
                "Advisor request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let body: GenerateResponse = response.json().await?;
        let text = Self::extract_text(body)?;

        tracing::debug!(
            model = %self.model,
            response_len = text.len(),
            provider = "gemini",
            "Advisor response received"
        );

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider(api_key: Option<&str>) -> GeminiProvider {
        GeminiProvider::new(
            api_key.map(str::to_string),
            "http://test.local/".to_string(),
            "gemini-2.5-flash".to_string(),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint() {
        let provider = create_test_provider(Some("key"));
        assert_eq!(
            provider.endpoint(),
            "http://test.local/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GeminiProvider::build_request("hello")).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["topK"], 40);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(body["safetySettings"].as_array().unwrap().len(), 4);
        assert_eq!(
            body["safetySettings"][0]["threshold"],
            "BLOCK_MEDIUM_AND_ABOVE"
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "[{\"a\":"}, {"text": "1}]"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;

        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            GeminiProvider::extract_text(response).unwrap(),
            r#"[{"a":1}]"#
        );
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            GeminiProvider::extract_text(response),
            Err(AppError::ExternalApi(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let provider = create_test_provider(None);
        let result = provider.generate("prompt").await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_blank_key_is_configuration_error() {
        let provider = create_test_provider(Some("  "));
        let result = provider.generate("prompt").await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
