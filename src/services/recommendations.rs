use std::sync::Arc;
use std::time::Duration;

use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::{ParsedQuery, Recommendation, RecommendationSource},
    services::{
        lexicon::Lexicon,
        prompt::build_prompt,
        providers::AdvisorProvider,
        query::QueryInterpreter,
        ranker::{LocalRanker, DEFAULT_LIMIT},
        reasons::ReasonComposer,
        validator::{self, RemoteResponse, ValidationError},
    },
};

/// Remote results shorter than this are topped up from local rankings
pub const MIN_REMOTE_RESULTS: usize = 3;
/// Upper bound on any response; long remote lists are cut to it so every answer holds 1-5 items
pub const MAX_RECOMMENDATIONS: usize = 5;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a description of what you need";

/// Classified result of one remote advisor attempt
#[derive(Debug)]
pub enum RemoteOutcome {
    /// Validated recommendations, sentinel-free and deduplicated
    Valid(Vec<Recommendation>),
    /// Output could not be parsed or held no usable entries
    Invalid(ValidationError),
    /// The advisor answered with its generic "no match" record
    NoMatch,
    /// Provider disabled, misconfigured, failed or timed out
    Unavailable(AppError),
}

impl RemoteOutcome {
    pub fn from_raw(raw: &str) -> Self {
        match validator::validate(raw) {
            Ok(RemoteResponse::Recommendations(recs)) => RemoteOutcome::Valid(recs),
            Ok(RemoteResponse::NoMatch) => RemoteOutcome::NoMatch,
            Err(e) => RemoteOutcome::Invalid(e),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            RemoteOutcome::Valid(_) => "valid",
            RemoteOutcome::Invalid(_) => "invalid",
            RemoteOutcome::NoMatch => "no_match",
            RemoteOutcome::Unavailable(_) => "unavailable",
        }
    }
}

/// Final answer for one query
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationOutcome {
    pub recommendations: Vec<Recommendation>,
    pub source: RecommendationSource,
}

/// Produces recommendations, preferring the remote advisor and falling back to local ranking
///
/// Remote failures of any kind are absorbed here. The only error a caller
/// can see is an empty query.
#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<Catalog>,
    lexicon: Arc<Lexicon>,
    provider: Option<Arc<dyn AdvisorProvider>>,
    remote_timeout: Duration,
}

impl RecommendationService {
    pub fn new(
        catalog: Arc<Catalog>,
        lexicon: Arc<Lexicon>,
        provider: Option<Arc<dyn AdvisorProvider>>,
        remote_timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            lexicon,
            provider,
            remote_timeout,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn recommend(&self, query: &str) -> AppResult<RecommendationOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput(EMPTY_QUERY_MESSAGE.to_string()));
        }

        let parsed = QueryInterpreter::new(&self.lexicon).parse(query);
        tracing::debug!(
            budget = ?parsed.budget,
            keywords = ?parsed.keywords,
            "Query parsed"
        );

        let outcome = self.attempt_remote(query, &parsed).await;
        Ok(self.resolve(&parsed, outcome))
    }

    async fn attempt_remote(&self, query: &str, parsed: &ParsedQuery) -> RemoteOutcome {
        let Some(provider) = &self.provider else {
            return RemoteOutcome::Unavailable(AppError::Configuration(
                "Remote advisor is disabled".to_string(),
            ));
        };

        let prompt = match build_prompt(query, parsed, self.catalog.products()) {
            Ok(prompt) => prompt,
            Err(e) => return RemoteOutcome::Unavailable(e),
        };

        let raw = match tokio::time::timeout(self.remote_timeout, provider.generate(&prompt)).await
        {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => return RemoteOutcome::Unavailable(e),
            Err(_) => {
                return RemoteOutcome::Unavailable(AppError::Timeout(self.remote_timeout.as_secs()))
            }
        };

        let outcome = RemoteOutcome::from_raw(&raw);
        tracing::info!(
            provider = provider.name(),
            outcome = outcome.label(),
            "Remote advisor responded"
        );
        outcome
    }

    /// Applies the merge policy to a classified remote outcome
    pub fn resolve(&self, parsed: &ParsedQuery, outcome: RemoteOutcome) -> RecommendationOutcome {
        let ranker = LocalRanker::new(&self.lexicon);

        let remote = match outcome {
            RemoteOutcome::Valid(recs) => recs,
            RemoteOutcome::Unavailable(e) => {
                tracing::warn!(error = %e, "Remote advisor unavailable, using local ranking");
                return self.fallback(&ranker, parsed);
            }
            RemoteOutcome::Invalid(e) => {
                tracing::warn!(error = %e, "Remote advisor response rejected, using local ranking");
                return self.fallback(&ranker, parsed);
            }
            RemoteOutcome::NoMatch => {
                tracing::info!("Remote advisor found no match, using local guidance");
                return self.fallback(&ranker, parsed);
            }
        };

        let composer = ReasonComposer::new(&self.lexicon);
        let remote: Vec<Recommendation> = remote
            .into_iter()
            .map(|mut rec| {
                if rec.reason.is_empty() {
                    rec.reason = composer.compose(&rec.as_product(), parsed.budget, &parsed.keywords);
                }
                rec
            })
            .collect();

        if remote.len() >= MIN_REMOTE_RESULTS {
            return RecommendationOutcome {
                recommendations: remote.into_iter().take(MAX_RECOMMENDATIONS).collect(),
                source: RecommendationSource::Remote,
            };
        }

        let fallback = ranker.rank_parsed(parsed, self.catalog.products(), DEFAULT_LIMIT);
        let remote_count = remote.len();
        let merged = top_up(remote, fallback);
        let source = if merged.len() > remote_count {
            RecommendationSource::Blended
        } else {
            RecommendationSource::Remote
        };

        tracing::info!(
            remote = remote_count,
            total = merged.len(),
            source = %source,
            "Topped up remote recommendations"
        );

        RecommendationOutcome {
            recommendations: merged,
            source,
        }
    }

    fn fallback(&self, ranker: &LocalRanker<'_>, parsed: &ParsedQuery) -> RecommendationOutcome {
        let recommendations = ranker.rank_parsed(parsed, self.catalog.products(), DEFAULT_LIMIT);
        tracing::info!(
            count = recommendations.len(),
            no_match = recommendations.iter().any(Recommendation::is_sentinel),
            "Serving local recommendations"
        );

        RecommendationOutcome {
            recommendations,
            source: RecommendationSource::Fallback,
        }
    }
}

/// Appends unseen fallback items until the minimum is reached; never adds the sentinel
fn top_up(mut merged: Vec<Recommendation>, fallback: Vec<Recommendation>) -> Vec<Recommendation> {
    for rec in fallback {
        if merged.len() >= MIN_REMOTE_RESULTS {
            break;
        }
        if rec.is_sentinel() {
            continue;
        }
        if !merged.iter().any(|m| m.dedup_key() == rec.dedup_key()) {
            merged.push(rec);
        }
    }
    merged
}
