//! Resume analysis engine.
//!
//! Pipeline: segment → extract features → score dimensions → aggregate → report.
//! Every stage is a pure function of the input text and the compiled `Rubric`;
//! only `processing_time_ms` varies between identical runs.

pub mod aggregate;
pub mod dates;
pub mod dimensions;
pub mod features;
pub mod handlers;
pub mod job_match;
pub mod report;
pub mod segmenter;
pub mod skills;

use std::collections::BTreeSet;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::AnalysisError;
use crate::models::analysis::AnalysisResult;
use crate::rubric::Rubric;

pub use job_match::{match_job, JobMatcher, SkillOverlapMatcher};

/// Per-call knobs that do not belong in the rubric.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisOptions {
    /// Tables, images and other non-text objects reported by the document extractor.
    #[serde(default)]
    pub non_text_elements: u32,
    /// Date "Present" resolves to. Defaults to today (UTC).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

pub fn analyze(text: &str, rubric: &Rubric) -> Result<AnalysisResult, AnalysisError> {
    analyze_with(text, rubric, &AnalysisOptions::default())
}

pub fn analyze_with(
    text: &str,
    rubric: &Rubric,
    options: &AnalysisOptions,
) -> Result<AnalysisResult, AnalysisError> {
    let started = Instant::now();

    let document = segmenter::segment(text, rubric)?;
    let features =
        features::extract_document_features(&document, rubric, options.non_text_elements);
    let as_of = options.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let scores = dimensions::score_dimensions(&features, rubric, as_of);
    debug!("Dimension scores: {:?}", scores);

    let aggregate = aggregate::aggregate(&scores, &features.skills, rubric);
    let result = report::build_report(
        report::ReportInputs {
            features: &features,
            scores,
            aggregate,
            started,
        },
        rubric,
    );

    info!(
        "Analyzed resume: {} words, {} sections, overall {}, {} skills ({}ms)",
        result.word_count,
        result.sections.len(),
        result.overall_score,
        result.keywords.len(),
        result.processing_time_ms
    );
    Ok(result)
}

/// Canonical skills mentioned anywhere in `text`.
pub fn extract_skills(text: &str, rubric: &Rubric) -> BTreeSet<String> {
    rubric.taxonomy().extract_skills(text)
}
