use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::{csv_export, store};
use crate::models::job::{Job, JobUpdate, NewJob};
use crate::state::AppState;

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<Vec<Job>>, AppError> {
    Ok(Json(store::list_jobs(&state.db).await?))
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<NewJob>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    for (field, value) in [
        ("title", &req.title),
        ("client", &req.client),
        ("location", &req.location),
        ("specialization", &req.specialization),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} is required")));
        }
    }

    let job = req.into_job();
    let mut conn = state.db.acquire().await?;
    store::insert_job(&mut conn, &job).await?;
    tracing::info!("Created job '{}' ({})", job.title, job.id);
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Job>, AppError> {
    store::get_job(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

/// PATCH /api/v1/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<JobUpdate>,
) -> Result<Json<Job>, AppError> {
    store::update_job(&state.db, id, &req)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

/// GET /api/v1/jobs/export
pub async fn handle_export_jobs(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let jobs = store::list_jobs(&state.db).await?;
    let body = csv_export::export_jobs(&jobs)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"jobs.csv\""),
        ],
        body,
    ))
}
