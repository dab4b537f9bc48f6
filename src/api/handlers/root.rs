use axum::{extract::State, http::StatusCode, Json, response::IntoResponse};
use serde_json::json;

use crate::api::state::AppState;

pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    let settings = &state.settings;
    let configured = |key: &str| !key.trim().is_empty();

    Json(json!({
        "name": "Herald API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Announcement dashboard backend and bot integration",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "announcements": "/api/announcements",
            "functions": "/functions/v1",
            "bot_webhook": format!("/functions/v1/{}", settings.bot.webhook_function)
        },
        // Presence only; secrets are never echoed.
        "integrations": {
            "validator": configured(&settings.ai.validator.api_key),
            "enhancer": configured(&settings.ai.enhancer.api_key),
            "bot": settings.bot.token.as_deref().is_some_and(configured),
            "storage": configured(&settings.backend.service_key)
        }
    }))
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut database_ok = true;
    if let Err(e) = sqlx::query("SELECT 1")
        .execute(&state.service_context.db_pool)
        .await
    {
        tracing::warn!("Health check database query failed: {}", e);
        database_ok = false;
    }

    let status = if database_ok { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };

    (status, Json(json!({
        "status": if database_ok { "healthy" } else { "degraded" },
        "database": database_ok,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
