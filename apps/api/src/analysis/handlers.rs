use std::collections::BTreeSet;

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{analyze_with, extract_skills, AnalysisOptions};
use crate::errors::AppError;
use crate::models::analysis::{AnalysisResult, JobMatchResult};
use crate::rubric::RubricWarning;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    pub job_description: Option<String>,
    #[serde(default)]
    pub non_text_elements: u32,
    pub as_of: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub analysis: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_match: Option<JobMatchResult>,
}

#[derive(Deserialize)]
pub struct JobMatchRequest {
    pub resume_skills: Vec<String>,
    pub job_description: String,
}

#[derive(Deserialize)]
pub struct ExtractSkillsRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct ExtractSkillsResponse {
    pub skills: BTreeSet<String>,
}

#[derive(Serialize)]
pub struct RubricSummary {
    pub skill_count: usize,
    pub industries: Vec<String>,
    pub action_verb_count: usize,
    pub warnings: Vec<RubricWarning>,
}

/// POST /api/v1/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    validate_text("text", &req.text, state.config.max_document_chars)?;

    let options = AnalysisOptions {
        non_text_elements: req.non_text_elements,
        as_of: req.as_of,
    };
    let analysis = analyze_with(&req.text, &state.rubric, &options)?;

    let job_match = match req.job_description.as_deref() {
        Some(job) if !job.trim().is_empty() => {
            validate_length("job_description", job, state.config.max_document_chars)?;
            let skills: Vec<String> = analysis.keywords.iter().cloned().collect();
            Some(state.job_matcher.match_job(&skills, job).await?)
        }
        _ => None,
    };

    Ok(Json(AnalyzeResponse {
        analysis,
        job_match,
    }))
}

/// POST /api/v1/job-match
pub async fn handle_job_match(
    State(state): State<AppState>,
    Json(req): Json<JobMatchRequest>,
) -> Result<Json<JobMatchResult>, AppError> {
    validate_length(
        "job_description",
        &req.job_description,
        state.config.max_document_chars,
    )?;
    debug!(
        "Job match via {} backend: {} resume skills",
        state.job_matcher.backend(),
        req.resume_skills.len()
    );
    let result = state
        .job_matcher
        .match_job(&req.resume_skills, &req.job_description)
        .await?;
    Ok(Json(result))
}

/// POST /api/v1/skills/extract
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(req): Json<ExtractSkillsRequest>,
) -> Result<Json<ExtractSkillsResponse>, AppError> {
    validate_length("text", &req.text, state.config.max_document_chars)?;
    Ok(Json(ExtractSkillsResponse {
        skills: extract_skills(&req.text, &state.rubric),
    }))
}

/// GET /api/v1/rubric
pub async fn handle_rubric_summary(State(state): State<AppState>) -> Json<RubricSummary> {
    let rubric = &state.rubric;
    Json(RubricSummary {
        skill_count: rubric.taxonomy().len(),
        industries: rubric
            .industry_profiles()
            .iter()
            .map(|p| p.name.clone())
            .collect(),
        action_verb_count: rubric.action_verb_count(),
        warnings: rubric.warnings().to_vec(),
    })
}

fn validate_text(field: &str, value: &str, max_chars: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    validate_length(field, value, max_chars)
}

fn validate_length(field: &str, value: &str, max_chars: usize) -> Result<(), AppError> {
    let chars = value.chars().count();
    if chars > max_chars {
        return Err(AppError::Validation(format!(
            "{field} is too long ({chars} characters, maximum {max_chars})"
        )));
    }
    Ok(())
}
