//! Job matching: compares a resume's skills against the skills a job description asks for.
//!
//! Default: `SkillOverlapMatcher` (taxonomy-based, deterministic).
//! `AppState` holds an `Arc<dyn JobMatcher>`, so other backends slot in without
//! touching the handlers.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::AppError;
use crate::models::analysis::JobMatchResult;
use crate::rubric::Rubric;

#[async_trait]
pub trait JobMatcher: Send + Sync {
    async fn match_job(
        &self,
        resume_skills: &[String],
        job_description: &str,
    ) -> Result<JobMatchResult, AppError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

/// Overlap of canonical skills between the resume and the job description.
pub struct SkillOverlapMatcher {
    rubric: Arc<Rubric>,
}

impl SkillOverlapMatcher {
    pub fn new(rubric: Arc<Rubric>) -> Self {
        Self { rubric }
    }
}

#[async_trait]
impl JobMatcher for SkillOverlapMatcher {
    async fn match_job(
        &self,
        resume_skills: &[String],
        job_description: &str,
    ) -> Result<JobMatchResult, AppError> {
        Ok(match_job(&self.rubric, resume_skills, job_description))
    }

    fn backend(&self) -> &'static str {
        "skill_overlap"
    }
}

/// Scores `resume_skills` against the skills extracted from `job_text`.
///
/// Resume skills may be aliases ("k8s"); they are canonicalized first. Names the
/// taxonomy does not know are kept as written and can never match a requirement.
/// An empty job description yields a zero score, never an error.
pub fn match_job<I, S>(rubric: &Rubric, resume_skills: I, job_text: &str) -> JobMatchResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let taxonomy = rubric.taxonomy();
    let resume: BTreeSet<String> = resume_skills
        .into_iter()
        .filter_map(|skill| {
            let skill = skill.as_ref().trim();
            if skill.is_empty() {
                return None;
            }
            Some(
                taxonomy
                    .canonicalize(skill)
                    .map_or_else(|| skill.to_string(), str::to_string),
            )
        })
        .collect();

    let required = taxonomy.extract_skills(job_text);
    let matched: BTreeSet<String> = required.intersection(&resume).cloned().collect();
    let missing: BTreeSet<String> = required.difference(&resume).cloned().collect();

    let total = required.len();
    let match_score = (100.0 * matched.len() as f64 / total.max(1) as f64).round() as u32;

    let summary = if total == 0 {
        "No recognizable skill requirements found in the job description".to_string()
    } else {
        format!("{}/{} required skills matched", matched.len(), total)
    };

    debug!(
        "Job match: {}/{} requirements covered, score {}",
        matched.len(),
        total,
        match_score
    );

    JobMatchResult {
        match_score,
        matched_requirement_count: matched.len(),
        total_requirement_count: total,
        matched_skills: matched,
        missing_skills: missing,
        summary,
    }
}
