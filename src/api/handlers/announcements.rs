use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{
        Announcement, AnnouncementFilter, AnnouncementStatus, CreateAnnouncementRequest,
        UpdateAnnouncementRequest,
    },
    error::Result,
    service::announcement_service::SubmissionOutcome,
};

#[derive(Debug, Deserialize)]
pub struct ListAnnouncementsQuery {
    pub owner_id: Option<Uuid>,
    pub status: Option<AnnouncementStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListAnnouncementsQuery>,
) -> Result<Json<Vec<Announcement>>> {
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let offset = params.offset.unwrap_or(0).max(0);
    let filter = AnnouncementFilter {
        owner_id: params.owner_id,
        status: params.status,
    };

    let announcements = state
        .service_context
        .announcement_service
        .list(&filter, limit, offset)
        .await?;

    Ok(Json(announcements))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Announcement>> {
    let announcement = state.service_context.announcement_service.get(id).await?;
    Ok(Json(announcement))
}

pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateAnnouncementRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Announcement>)> {
    let Json(request) = payload?;
    let created = state.service_context.announcement_service.create(request).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: std::result::Result<Json<UpdateAnnouncementRequest>, JsonRejection>,
) -> Result<Json<Announcement>> {
    let Json(request) = payload?;
    let updated = state.service_context.announcement_service.update(id, request).await?;

    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.announcement_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Send an announcement through validation; it ends up published or rejected.
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmissionOutcome>> {
    let outcome = state.service_context.announcement_service.submit(id).await?;
    Ok(Json(outcome))
}
