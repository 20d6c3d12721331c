//! Aggregate Scorer: overall score, interview-rate estimate and industry fit.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::analysis::DimensionScores;
use crate::rubric::{IndustryProfile, InterviewRateWeights, Rubric, ScoringWeights};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryFit {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateScores {
    pub overall_score: u32,
    pub estimated_interview_rate: u32,
    pub industry_fit: Vec<IndustryFit>,
}

pub fn aggregate(
    scores: &DimensionScores,
    skills: &BTreeSet<String>,
    rubric: &Rubric,
) -> AggregateScores {
    let config = rubric.config();
    let overall_score = overall_score(scores, &config.scoring_weights);
    AggregateScores {
        overall_score,
        estimated_interview_rate: estimated_interview_rate(
            overall_score,
            scores.ats_compatibility,
            &config.interview_rate,
        ),
        industry_fit: rank_industries(
            skills,
            rubric.industry_profiles(),
            config.industry_fit_limit,
        ),
    }
}

/// Weighted sum of the dimension scores, rounded and clamped to 0 – 100.
pub fn overall_score(scores: &DimensionScores, weights: &ScoringWeights) -> u32 {
    let weighted = scores.experience as f64 * weights.experience
        + scores.skills as f64 * weights.skills
        + scores.education as f64 * weights.education
        + scores.readability as f64 * weights.readability
        + scores.ats_compatibility as f64 * weights.ats;
    clamp_percent(weighted)
}

/// Heuristic estimate blending overall quality with ATS friendliness.
pub fn estimated_interview_rate(overall: u32, ats: u32, weights: &InterviewRateWeights) -> u32 {
    clamp_percent(overall as f64 * weights.overall + ats as f64 * weights.ats)
}

/// Ranks industry profiles by cosine similarity between the resume's skill set
/// (binary vector) and each profile's skill weights. Profiles sharing no skill are
/// dropped; ties keep declaration order.
pub fn rank_industries(
    skills: &BTreeSet<String>,
    profiles: &[IndustryProfile],
    limit: usize,
) -> Vec<IndustryFit> {
    let mut ranked: Vec<IndustryFit> = profiles
        .iter()
        .map(|profile| IndustryFit {
            name: profile.name.clone(),
            score: cosine_similarity(skills, profile),
        })
        .filter(|fit| fit.score > 0.0)
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(limit);
    ranked
}

fn cosine_similarity(skills: &BTreeSet<String>, profile: &IndustryProfile) -> f64 {
    let dot: f64 = profile
        .weighted_skills
        .iter()
        .filter(|(skill, _)| skills.contains(*skill))
        .map(|(_, weight)| weight)
        .sum();
    let profile_norm = profile
        .weighted_skills
        .values()
        .map(|w| w * w)
        .sum::<f64>()
        .sqrt();
    let skills_norm = (skills.len() as f64).sqrt();

    if dot <= 0.0 || profile_norm == 0.0 || skills_norm == 0.0 {
        return 0.0;
    }
    dot / (profile_norm * skills_norm)
}

fn clamp_percent(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(value: u32) -> DimensionScores {
        DimensionScores {
            education: value,
            experience: value,
            skills: value,
            readability: value,
            ats_compatibility: value,
        }
    }

    fn profile(name: &str, skills: &[(&str, f64)]) -> IndustryProfile {
        IndustryProfile {
            name: name.to_string(),
            weighted_skills: skills.iter().map(|(s, w)| (s.to_string(), *w)).collect(),
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_overall_uses_default_weights() {
        let s = DimensionScores {
            education: 60,
            experience: 80,
            skills: 100,
            readability: 80,
            ats_compatibility: 100,
        };
        // 0.30*80 + 0.20*100 + 0.15*60 + 0.15*80 + 0.20*100 = 85
        assert_eq!(overall_score(&s, &ScoringWeights::default()), 85);
    }

    #[test]
    fn test_overall_stays_in_bounds_for_unnormalized_weights() {
        let weights = ScoringWeights {
            experience: 1.0,
            skills: 1.0,
            education: 1.0,
            readability: 1.0,
            ats: 1.0,
        };
        assert_eq!(overall_score(&scores(100), &weights), 100);
        assert_eq!(overall_score(&scores(0), &weights), 0);
    }

    #[test]
    fn test_interview_rate_blend() {
        let weights = InterviewRateWeights::default();
        assert_eq!(estimated_interview_rate(80, 100, &weights), 88);
        assert_eq!(estimated_interview_rate(100, 100, &weights), 100);
        assert_eq!(estimated_interview_rate(0, 0, &weights), 0);
    }

    #[test]
    fn test_rank_industries_orders_by_similarity() {
        let profiles = vec![
            profile("Backend", &[("Rust", 1.0), ("SQL", 1.0)]),
            profile("Frontend", &[("React", 1.0), ("CSS", 1.0)]),
            profile("Data", &[("Python", 1.0), ("SQL", 0.5)]),
        ];
        let fits = rank_industries(&set(&["Rust", "SQL"]), &profiles, 3);
        let names: Vec<_> = fits.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Backend", "Data"]);
        assert!((fits[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rank_industries_ties_keep_declaration_order() {
        let profiles = vec![
            profile("First", &[("Rust", 1.0)]),
            profile("Second", &[("Rust", 1.0)]),
        ];
        let fits = rank_industries(&set(&["Rust"]), &profiles, 3);
        assert_eq!(fits[0].name, "First");
        assert_eq!(fits[1].name, "Second");
    }

    #[test]
    fn test_rank_industries_respects_limit_and_empty_skills() {
        let profiles = vec![
            profile("A", &[("Rust", 1.0)]),
            profile("B", &[("Rust", 0.5), ("Go", 1.0)]),
        ];
        assert_eq!(rank_industries(&set(&["Rust"]), &profiles, 1).len(), 1);
        assert!(rank_industries(&BTreeSet::new(), &profiles, 3).is_empty());
    }

    #[test]
    fn test_aggregate_with_builtin_rubric() {
        let rubric = Rubric::builtin().unwrap();
        let skills = set(&["Python", "SQL", "Machine Learning"]);
        let result = aggregate(&scores(100), &skills, &rubric);
        assert_eq!(result.overall_score, 100);
        assert_eq!(result.estimated_interview_rate, 100);
        assert!(!result.industry_fit.is_empty());
        assert!(result.industry_fit.len() <= 3);
    }
}
