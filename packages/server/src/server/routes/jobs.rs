//! REST handlers for the job board.
//!
//! Reads of the full board go through the shared snapshot cache; every
//! mutation writes through the store and then invalidates that snapshot.

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domains::jobs::{select_page, JobDraft, JobFilter, JobPage, JobPatch, JobPosting};
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Query parameters accepted by the board listing.
#[derive(Debug, Default, Deserialize)]
pub struct BoardParams {
    #[serde(default)]
    pub query: String,
    pub category: Option<String>,
    pub page: Option<u32>,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct AckResponse {
    pub message: String,
}

/// GET /api/jobs - filtered, paginated board
pub async fn board_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<BoardParams>,
) -> Result<Json<JobPage>, ApiError> {
    let jobs = state.cache.snapshot().await?;
    let filter = JobFilter {
        query: params.query,
        selected: params.category,
        page: params.page.unwrap_or(1),
    };
    Ok(Json(select_page(&jobs, &filter, state.page_size)))
}

/// GET /api/jobs/:id
pub async fn get_job_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobPosting>, ApiError> {
    let posting = state.store.get(&id).await?;
    Ok(Json(posting))
}

/// POST /api/jobs
pub async fn create_job_handler(
    Extension(state): Extension<AppState>,
    Json(draft): Json<JobDraft>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let created = state.store.create(&draft).await?;
    state.cache.invalidate().await;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: created.id,
            message: "Job posted successfully".to_string(),
        }),
    ))
}

/// PATCH /api/jobs/:id
pub async fn update_job_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<JobPatch>,
) -> Result<Json<AckResponse>, ApiError> {
    state.store.update(&id, &patch).await?;
    state.cache.invalidate().await;

    Ok(Json(AckResponse {
        message: "Job updated successfully".to_string(),
    }))
}

/// DELETE /api/jobs/:id
pub async fn delete_job_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AckResponse>, ApiError> {
    state.store.delete(&id).await?;
    state.cache.invalidate().await;

    Ok(Json(AckResponse {
        message: "Job deleted successfully".to_string(),
    }))
}

/// GET /api/jobs/posted-by/:email - one account's postings, unpaginated
pub async fn posted_by_handler(
    Extension(state): Extension<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<JobPosting>>, ApiError> {
    let postings = state.store.list_posted_by(&email).await?;
    Ok(Json(postings))
}
