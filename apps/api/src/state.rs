use std::sync::Arc;

use crate::analysis::JobMatcher;
use crate::config::Config;
use crate::rubric::Rubric;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Compiled once at startup; read-only afterwards.
    pub rubric: Arc<Rubric>,
    /// Pluggable job matcher. Default: SkillOverlapMatcher.
    pub job_matcher: Arc<dyn JobMatcher>,
    pub config: Config,
}
