pub mod lexicon;
pub mod prompt;
pub mod providers;
pub mod query;
pub mod ranker;
pub mod reasons;
pub mod recommendations;
pub mod scoring;
pub mod validator;

pub use lexicon::Lexicon;
pub use query::QueryInterpreter;
pub use ranker::LocalRanker;
pub use reasons::ReasonComposer;
pub use recommendations::{RecommendationOutcome, RecommendationService, RemoteOutcome};
pub use scoring::CatalogScorer;
