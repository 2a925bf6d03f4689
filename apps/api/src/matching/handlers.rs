//! Axum route handlers for the Matching API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::extractor::extract_skills;
use crate::matching::intake::{extract_resume_text, ResumeFormat};
use crate::matching::ranker::{rank_jobs, MatchResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    /// Number of ranked jobs before `limit` was applied.
    pub total: usize,
    pub scorer_backend: String,
    pub results: Vec<MatchResult>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractSkillsRequest {
    #[serde(default)]
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractSkillsResponse {
    pub skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Ranks every job posting against the résumé text. Empty text yields an empty list.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    Ok(Json(run_match(&state, &request.resume_text, request.limit)))
}

/// POST /api/v1/match/upload
///
/// Multipart form: `resume` file (plain text or PDF), optional `limit` field.
pub async fn handle_match_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let mut resume_text: Option<String> = None;
    let mut limit: Option<usize> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart body", e))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let format = ResumeFormat::detect(field.file_name(), field.content_type())
                    .ok_or_else(|| {
                        AppError::Validation(
                            "Unsupported résumé format; upload a .txt or .pdf file".to_string(),
                        )
                    })?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Failed to read upload", e))?;
                resume_text = Some(extract_resume_text(format, data).await?);
            }
            Some("limit") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Failed to read limit", e))?;
                limit = Some(raw.trim().parse::<usize>().map_err(|_| {
                    AppError::Validation("limit must be a non-negative integer".to_string())
                })?);
            }
            _ => {}
        }
    }

    let resume_text = resume_text
        .ok_or_else(|| AppError::Validation("multipart field 'resume' is required".to_string()))?;

    info!("Matching uploaded résumé ({} chars)", resume_text.len());
    Ok(Json(run_match(&state, &resume_text, limit)))
}

/// POST /api/v1/skills/extract
///
/// Lists the catalogue skills found in the résumé, normalized and sorted.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<ExtractSkillsRequest>,
) -> Json<ExtractSkillsResponse> {
    let skills = extract_skills(&request.resume_text, &state.catalog.all_skills());
    Json(ExtractSkillsResponse {
        skills: skills.into_iter().collect(),
    })
}

fn run_match(state: &AppState, resume_text: &str, limit: Option<usize>) -> MatchResponse {
    let mut results = rank_jobs(
        resume_text,
        &state.catalog,
        state.scorer.as_ref(),
        &state.weights,
    );
    let total = results.len();
    if let Some(limit) = limit {
        results.truncate(limit);
    }

    MatchResponse {
        total,
        scorer_backend: state.scorer.backend().to_string(),
        results,
    }
}

/// Keeps the body-limit rejection as 413; any other multipart failure is a bad request.
fn multipart_error(context: &str, e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{context}: {}", e.body_text()))
    } else {
        AppError::Validation(format!("{context}: {}", e.body_text()))
    }
}
