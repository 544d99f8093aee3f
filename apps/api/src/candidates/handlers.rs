use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::candidates::cv::{detect_format, extract_cv_text, summarize_cv, CvFormat};
use crate::candidates::{csv_io, store};
use crate::errors::AppError;
use crate::mailer::validate_email;
use crate::models::candidate::{Candidate, CandidateUpdate, NewCandidate};
use crate::state::AppState;

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    Ok(Json(store::list_candidates(&state.db).await?))
}

/// POST /api/v1/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    Json(req): Json<NewCandidate>,
) -> Result<(StatusCode, Json<Candidate>), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    if !validate_email(&req.email) {
        return Err(AppError::Validation(format!("invalid email '{}'", req.email)));
    }

    let candidate = req.into_candidate();
    let mut conn = state.db.acquire().await?;
    if !store::insert_candidate(&mut conn, &candidate).await? {
        return Err(AppError::Conflict(format!(
            "A candidate with email {} already exists",
            candidate.email
        )));
    }
    Ok((StatusCode::CREATED, Json(candidate)))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Candidate>, AppError> {
    store::get_candidate(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
}

/// PATCH /api/v1/candidates/:id
pub async fn handle_update_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CandidateUpdate>,
) -> Result<Json<Candidate>, AppError> {
    if let Some(email) = &req.email {
        if !validate_email(email) {
            return Err(AppError::Validation(format!("invalid email '{email}'")));
        }
    }
    store::update_candidate(&state.db, id, &req)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
}

/// GET /api/v1/candidates/export
pub async fn handle_export_candidates(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let candidates = store::list_candidates(&state.db).await?;
    let body = csv_io::export_candidates(&candidates)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"candidates.csv\""),
        ],
        body,
    ))
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub duplicates: usize,
    pub rejected_rows: Vec<usize>,
}

/// POST /api/v1/candidates/import
/// Body is the CSV text. Candidates whose email already exists are skipped.
pub async fn handle_import_candidates(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    let parsed = csv_io::parse_candidates(&body)
        .map_err(|e| AppError::Validation(format!("Invalid CSV: {e}")))?;

    let mut tx = state.db.begin().await?;
    let mut imported = 0;
    let mut duplicates = 0;
    for candidate in &parsed.candidates {
        if store::insert_candidate(&mut tx, candidate).await? {
            imported += 1;
        } else {
            duplicates += 1;
        }
    }
    tx.commit().await?;

    tracing::info!("Imported {imported} candidates ({duplicates} duplicates skipped)");
    Ok(Json(ImportResponse {
        imported,
        duplicates,
        rejected_rows: parsed.rejected_rows,
    }))
}

#[derive(Debug, Serialize)]
pub struct CvSummaryResponse {
    pub candidate_id: Uuid,
    pub cv_summary: String,
}

/// POST /api/v1/candidates/:id/cv
/// Multipart upload with a `cv` file (PDF or plain text), or a `text` field.
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<CvSummaryResponse>, AppError> {
    if store::get_candidate(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound(format!("Candidate {id} not found")));
    }

    let mut cv_text: Option<String> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let format = if name == "text" {
            Some(CvFormat::PlainText)
        } else {
            detect_format(field.file_name(), field.content_type())
        };
        if name != "cv" && name != "text" {
            continue;
        }
        let format = format.ok_or_else(|| {
            AppError::UnprocessableEntity("CV must be a PDF or plain-text file".into())
        })?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
        cv_text = Some(extract_cv_text(format, data).await?);
        break;
    }

    let cv_text =
        cv_text.ok_or_else(|| AppError::Validation("Expected a 'cv' file or 'text' field".into()))?;

    let summary = summarize_cv(&state.llm, &cv_text).await?;
    let update = CandidateUpdate {
        cv_summary: Some(summary.clone()),
        ..CandidateUpdate::default()
    };
    store::update_candidate(&state.db, id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;

    Ok(Json(CvSummaryResponse {
        candidate_id: id,
        cv_summary: summary,
    }))
}
