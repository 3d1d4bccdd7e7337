use std::sync::Arc;

use advisor_api::{
    catalog::Catalog,
    config::Config,
    routes::{create_router, AppState},
    services::{
        providers::{AdvisorProvider, GeminiProvider},
        Lexicon, RecommendationService,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("advisor_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let catalog = Arc::new(Catalog::load(&config.catalog_path)?);

    let provider: Option<Arc<dyn AdvisorProvider>> = if config.remote_enabled {
        if let Err(e) = config.gemini_credential() {
            tracing::warn!(error = %e, "Remote advisor will fall back to local ranking");
        }
        let gemini: Arc<dyn AdvisorProvider> = Arc::new(GeminiProvider::from_config(&config)?);
        Some(gemini)
    } else {
        tracing::info!("Remote advisor disabled, serving local rankings only");
        None
    };

    let recommender = RecommendationService::new(
        catalog,
        Arc::new(Lexicon::default()),
        provider,
        config.remote_timeout(),
    );
    let app = create_router(Arc::new(AppState::new(recommender)));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
