use std::sync::Arc;

use crate::catalog::models::Catalog;
use crate::config::Config;
use crate::matching::ranker::MatchWeights;
use crate::matching::relevance::RelevanceScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Job postings and courses, loaded once at startup. Read-only.
    pub catalog: Arc<Catalog>,
    /// Pluggable relevance scorer. Default: TfIdfScorer.
    pub scorer: Arc<dyn RelevanceScorer>,
    pub weights: MatchWeights,
}
