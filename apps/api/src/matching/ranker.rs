//! Match Ranker: fuses skill coverage and text relevance into one score per job,
//! attaches gap-closing courses, and sorts the catalogue by fit.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::models::{Catalog, Course, JobPosting};
use crate::matching::extractor::extract_skills;
use crate::matching::normalizer::normalize_skill;
use crate::matching::relevance::RelevanceScorer;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWeights {
    pub coverage: f64,
    pub relevance: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            coverage: 0.6,
            relevance: 0.4,
        }
    }
}

/// One ranked job for one résumé. Lives for a single request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub job: JobPosting,
    /// 0 – 100, two decimals
    pub score: f64,
    /// Fraction of required skills found in the résumé, 0 – 1
    pub coverage: f64,
    /// Text relevance from the scorer backend, 0 – 1
    pub relevance: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommended_courses: Vec<Course>,
}

// ────────────────────────────────────────────────────────────────────────────
// Ranking
// ────────────────────────────────────────────────────────────────────────────

/// Ranks every job in the catalogue against `resume`.
///
/// Algorithm:
/// 1. Extract résumé skills against every skill the catalogue references
/// 2. Relevance per job description via `scorer`
/// 3. Per job: coverage = |matched| / |required| (0 with no requirements)
/// 4. score = round2(100 × (w_cov × coverage + w_rel × relevance)), clamped to [0, 100]
/// 5. Courses whose skill normalizes into the missing set are attached
/// 6. Stable sort by score descending
pub fn rank_jobs(
    resume: &str,
    catalog: &Catalog,
    scorer: &dyn RelevanceScorer,
    weights: &MatchWeights,
) -> Vec<MatchResult> {
    if resume.trim().is_empty() || catalog.jobs.is_empty() {
        return Vec::new();
    }

    let resume_skills = extract_skills(resume, &catalog.all_skills());

    let descriptions: Vec<&str> = catalog.jobs.iter().map(|j| j.description.as_str()).collect();
    let relevances = scorer.score(resume, &descriptions);

    let mut results: Vec<MatchResult> = catalog
        .jobs
        .iter()
        .enumerate()
        .map(|(i, job)| {
            let required = required_skills(job);
            let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = required
                .into_iter()
                .partition(|skill| resume_skills.contains(skill));

            let total = matched_skills.len() + missing_skills.len();
            let coverage = if total > 0 {
                matched_skills.len() as f64 / total as f64
            } else {
                0.0
            };
            let relevance = relevances.get(i).copied().unwrap_or(0.0).clamp(0.0, 1.0);
            let score = fuse_scores(coverage, relevance, weights);
            let recommended_courses = recommend_courses(&catalog.courses, &missing_skills);

            MatchResult {
                job: job.clone(),
                score,
                coverage,
                relevance,
                matched_skills,
                missing_skills,
                recommended_courses,
            }
        })
        .collect();

    // sort_by is stable: equal scores keep catalogue order
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(
        "Ranked {} jobs ({} résumé skills, backend {}), top score {}",
        results.len(),
        resume_skills.len(),
        scorer.backend(),
        results.first().map(|r| r.score).unwrap_or(0.0)
    );

    results
}

/// Normalized technical ∪ soft skills, first occurrence kept, blanks dropped.
pub fn required_skills(job: &JobPosting) -> Vec<String> {
    let mut seen = HashSet::new();
    job.technical_skills
        .iter()
        .chain(job.soft_skills.iter())
        .map(|s| normalize_skill(s))
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}

/// Weighted fusion, scaled to a percentage and rounded to two decimals.
fn fuse_scores(coverage: f64, relevance: f64, weights: &MatchWeights) -> f64 {
    let raw = (weights.coverage * coverage + weights.relevance * relevance) * 100.0;
    let clamped = if raw.is_finite() { raw.clamp(0.0, 100.0) } else { 0.0 };
    (clamped * 100.0).round() / 100.0
}

/// Every course whose target skill normalizes into `missing`, in catalogue order.
fn recommend_courses(courses: &[Course], missing: &[String]) -> Vec<Course> {
    courses
        .iter()
        .filter(|c| {
            let skill = normalize_skill(&c.skill);
            missing.iter().any(|m| *m == skill)
        })
        .cloned()
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
