use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use herald::{
    api,
    config::Settings,
    db,
    service::{Integrations, ServiceContext},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herald=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!("Starting Herald server on {}:{}", settings.server.host, settings.server.port);

    let db_pool = db::connect(&settings.database).await?;

    warn_on_missing_secrets(&settings);

    let integrations = Integrations::from_settings(&settings);
    let service_context = Arc::new(ServiceContext::new(db_pool, integrations, &settings));

    let listener = tokio::net::TcpListener::bind(
        format!("{}:{}", settings.server.host, settings.server.port)
    ).await?;

    tracing::info!("Server listening on http://{}:{}", settings.server.host, settings.server.port);

    let app = api::create_app(service_context, Arc::new(settings));
    axum::serve(listener, app).await?;

    Ok(())
}

/// Endpoints backed by an unconfigured service still start; they fail per request.
fn warn_on_missing_secrets(settings: &Settings) {
    if settings.ai.validator.api_key.is_empty() {
        tracing::warn!("Validator API key not set; validation requests will fail");
    }
    if settings.ai.enhancer.api_key.is_empty() {
        tracing::warn!("Enhancer API key not set; enhancement requests will fail");
    }
    if settings.bot.token.as_deref().unwrap_or_default().is_empty() {
        tracing::warn!("Bot token not set; command sync and bot replies are disabled");
    }
    if settings.backend.service_key.is_empty() {
        tracing::warn!("Backend service key not set; storage initialization will fail");
    }
}
