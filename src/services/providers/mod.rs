//! Remote advisor abstraction
//!
//! A provider turns a fully built prompt into free-form text. Everything about
//! that text is untrusted: callers validate it and fall back to local ranking
//! on any error.

use crate::error::AppResult;

pub mod gemini;

pub use gemini::GeminiProvider;

/// Trait for generative-AI advisor backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AdvisorProvider: Send + Sync {
    /// Submits a prompt and returns the raw text the model produced
    async fn generate(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
