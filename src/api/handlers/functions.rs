use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    api::state::AppState,
    domain::{BucketStatus, ContentRequest, EnhancementResult, ValidationResult},
    error::{AppError, Result},
    service::bot_service::{CommandSyncReport, Update, WebhookConfiguration},
};

#[derive(Debug, Default, Deserialize)]
pub struct ConfigureBotRequest {
    #[serde(default)]
    pub token: Option<String>,
}

pub async fn validate_announcement(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ContentRequest>, JsonRejection>,
) -> Result<Json<ValidationResult>> {
    let Json(request) = payload?;
    let verdict = state.service_context.validation_service.validate(&request).await?;
    Ok(Json(verdict))
}

pub async fn enhance_announcement(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ContentRequest>, JsonRejection>,
) -> Result<Json<EnhancementResult>> {
    let Json(request) = payload?;
    let enhanced = state.service_context.enhancement_service.enhance(&request).await?;
    Ok(Json(enhanced))
}

pub async fn sync_bot_commands(
    State(state): State<AppState>,
) -> Result<Json<CommandSyncReport>> {
    let report = state.service_context.bot_service.sync_commands().await?;
    Ok(Json(report))
}

/// Errors use `{success: false, error}` here rather than the plain error envelope.
pub async fn configure_bot(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ConfigureBotRequest>, JsonRejection>,
) -> std::result::Result<Json<WebhookConfiguration>, Response> {
    let outcome = match payload {
        Ok(Json(request)) => {
            state
                .service_context
                .bot_service
                .configure_webhook(request.token.as_deref())
                .await
        }
        Err(rejection) => Err(AppError::from(rejection)),
    };

    outcome.map(Json).map_err(|e| {
        tracing::warn!("Bot configuration failed: {}", e);
        let body = Json(json!({
            "success": false,
            "error": e.public_message(),
        }));
        (e.status_code(), body).into_response()
    })
}

pub async fn init_storage(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let BucketStatus { bucket, existed, created } =
        state.service_context.storage_service.ensure_announcements_bucket().await?;

    let message = if existed {
        format!("Bucket '{}' already exists", bucket)
    } else {
        format!("Bucket '{}' created", bucket)
    };

    Ok(Json(json!({
        "success": true,
        "bucket": bucket,
        "existed": existed,
        "created": created,
        "message": message,
    })))
}

/// Receives platform updates. Always acknowledges so the platform does not
/// redeliver; failures are only logged.
pub async fn bot_webhook(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Update>, JsonRejection>,
) -> impl IntoResponse {
    match payload {
        Ok(Json(update)) => {
            if let Err(e) = state.service_context.bot_service.handle_update(&update).await {
                tracing::error!("Failed to handle update {}: {}", update.update_id, e);
            }
        }
        Err(rejection) => {
            tracing::warn!("Ignoring malformed update: {}", rejection.body_text());
        }
    }

    (StatusCode::OK, Json(json!({ "ok": true })))
}
