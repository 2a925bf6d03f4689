//! Axum route handlers for browsing the reference catalogue.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::catalog::models::{Course, JobPosting};
use crate::errors::AppError;
use crate::matching::normalizer::normalize_skill;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CourseQuery {
    pub skill: Option<String>,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<Vec<JobPosting>> {
    Json(state.catalog.jobs.clone())
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<JobPosting>, AppError> {
    state
        .catalog
        .find_job(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

/// GET /api/v1/courses?skill=
///
/// With `skill`, returns courses whose target skill normalizes to the same form.
pub async fn handle_list_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseQuery>,
) -> Json<Vec<Course>> {
    let courses = match params.skill.as_deref().map(str::trim) {
        Some(skill) if !skill.is_empty() => {
            let wanted = normalize_skill(skill);
            state
                .catalog
                .courses
                .iter()
                .filter(|c| normalize_skill(&c.skill) == wanted)
                .cloned()
                .collect()
        }
        _ => state.catalog.courses.clone(),
    };
    Json(courses)
}
