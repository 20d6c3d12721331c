//! Rubric configuration: every tunable constant the engine scores with.
//!
//! `RubricConfig` is the externally loadable form (JSON, every field optional).
//! `Rubric` is the compiled, read-only form shared across analyses as `Arc<Rubric>`.

pub mod defaults;
pub mod loader;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::analysis::skills::SkillTaxonomy;
use crate::errors::RubricError;
use crate::models::analysis::SectionLabel;

// ────────────────────────────────────────────────────────────────────────────
// Loadable configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryProfile {
    pub name: String,
    pub weighted_skills: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOfStudy {
    pub name: String,
    pub aliases: Vec<String>,
    /// Canonical skills that make this field relevant when detected.
    pub skills: Vec<String>,
}

/// Weights combining sub-scores into the overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub experience: f64,
    pub skills: f64,
    pub education: f64,
    pub readability: f64,
    pub ats: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            experience: 0.30,
            skills: 0.20,
            education: 0.15,
            readability: 0.15,
            ats: 0.20,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.experience + self.skills + self.education + self.readability + self.ats
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterRubric {
    pub max_header_words: usize,
    pub max_header_chars: usize,
    /// Jaro-Winkler similarity at which a heading counts as a typo of a synonym.
    pub header_similarity_threshold: f64,
}

impl Default for SegmenterRubric {
    fn default() -> Self {
        Self {
            max_header_words: 5,
            max_header_chars: 40,
            header_similarity_threshold: 0.92,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationRubric {
    pub degree_points: u32,
    pub institution_points: u32,
    pub date_points: u32,
    pub honors_bonus: u32,
    pub field_relevance_bonus: u32,
    pub degree_keywords: Vec<String>,
    pub institution_keywords: Vec<String>,
    pub honors_keywords: Vec<String>,
    pub fields_of_study: Vec<FieldOfStudy>,
}

impl Default for EducationRubric {
    fn default() -> Self {
        Self {
            degree_points: 20,
            institution_points: 20,
            date_points: 20,
            honors_bonus: 15,
            field_relevance_bonus: 15,
            degree_keywords: to_strings(defaults::DEGREE_KEYWORDS),
            institution_keywords: to_strings(defaults::INSTITUTION_KEYWORDS),
            honors_keywords: to_strings(defaults::HONORS_KEYWORDS),
            fields_of_study: defaults::FIELDS_OF_STUDY
                .iter()
                .map(|(name, aliases, skills)| FieldOfStudy {
                    name: name.to_string(),
                    aliases: to_strings(aliases),
                    skills: to_strings(skills),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceRubric {
    /// Months of experience at which the tenure baseline saturates.
    pub full_credit_months: u32,
    pub max_tenure_points: u32,
    pub points_per_quantified: u32,
    pub max_quantified_bonus: u32,
}

impl Default for ExperienceRubric {
    fn default() -> Self {
        Self {
            full_credit_months: 60,
            max_tenure_points: 80,
            points_per_quantified: 2,
            max_quantified_bonus: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsRubric {
    pub points_per_skill: u32,
}

impl Default for SkillsRubric {
    fn default() -> Self {
        Self { points_per_skill: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadabilityRubric {
    pub max_bullet_words: usize,
    pub max_sentence_words: usize,
    pub offending_bullet_penalty: u32,
    pub long_sentence_penalty: u32,
    pub inconsistent_bullets_penalty: u32,
    pub unstructured_penalty: u32,
    /// Sections whose bullets are expected to open with an action verb.
    pub action_verb_sections: Vec<SectionLabel>,
}

impl Default for ReadabilityRubric {
    fn default() -> Self {
        Self {
            max_bullet_words: 30,
            max_sentence_words: 40,
            offending_bullet_penalty: 5,
            long_sentence_penalty: 5,
            inconsistent_bullets_penalty: 5,
            unstructured_penalty: 10,
            action_verb_sections: vec![
                SectionLabel::Summary,
                SectionLabel::Experience,
                SectionLabel::Projects,
                SectionLabel::Other,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtsRubric {
    pub nonstandard_header_penalty: u32,
    pub non_text_element_penalty: u32,
    pub missing_skills_penalty: u32,
    pub non_text_markers: Vec<String>,
}

impl Default for AtsRubric {
    fn default() -> Self {
        Self {
            nonstandard_header_penalty: 10,
            non_text_element_penalty: 5,
            missing_skills_penalty: 5,
            non_text_markers: to_strings(defaults::NON_TEXT_MARKERS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportRubric {
    pub strength_threshold: u32,
    pub improvement_threshold: u32,
    /// Share of narrative bullets opening with an action verb that counts as a strength.
    pub action_verb_strength_ratio: f64,
}

impl Default for ReportRubric {
    fn default() -> Self {
        Self {
            strength_threshold: 85,
            improvement_threshold: 70,
            action_verb_strength_ratio: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewRateWeights {
    pub overall: f64,
    pub ats: f64,
}

impl Default for InterviewRateWeights {
    fn default() -> Self {
        Self {
            overall: 0.6,
            ats: 0.4,
        }
    }
}

/// The externally loadable rubric. Missing fields fall back to the built-in tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RubricConfig {
    pub section_header_synonyms: BTreeMap<String, Vec<String>>,
    pub action_verbs: Vec<String>,
    pub skill_taxonomy: BTreeMap<String, Vec<String>>,
    pub industry_profiles: Vec<IndustryProfile>,
    pub industry_fit_limit: usize,
    pub scoring_weights: ScoringWeights,
    pub segmenter: SegmenterRubric,
    pub education: EducationRubric,
    pub experience: ExperienceRubric,
    pub skills: SkillsRubric,
    pub readability: ReadabilityRubric,
    pub ats: AtsRubric,
    pub report: ReportRubric,
    pub interview_rate: InterviewRateWeights,
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self {
            section_header_synonyms: defaults::SECTION_HEADER_SYNONYMS
                .iter()
                .map(|(label, synonyms)| (label.to_string(), to_strings(synonyms)))
                .collect(),
            action_verbs: to_strings(defaults::ACTION_VERBS),
            skill_taxonomy: defaults::SKILL_TAXONOMY
                .iter()
                .map(|(canonical, aliases)| (canonical.to_string(), to_strings(aliases)))
                .collect(),
            industry_profiles: defaults::INDUSTRY_PROFILES
                .iter()
                .map(|(name, skills)| IndustryProfile {
                    name: name.to_string(),
                    weighted_skills: skills
                        .iter()
                        .map(|(skill, weight)| (skill.to_string(), *weight))
                        .collect(),
                })
                .collect(),
            industry_fit_limit: 3,
            scoring_weights: ScoringWeights::default(),
            segmenter: SegmenterRubric::default(),
            education: EducationRubric::default(),
            experience: ExperienceRubric::default(),
            skills: SkillsRubric::default(),
            readability: ReadabilityRubric::default(),
            ats: AtsRubric::default(),
            report: ReportRubric::default(),
            interview_rate: InterviewRateWeights::default(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Compile-time warnings
// ────────────────────────────────────────────────────────────────────────────

/// Recoverable rubric problems. The offending reference is dropped and compilation continues.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RubricWarning {
    #[error("unknown config reference '{reference}' in {location}")]
    UnknownConfigReference { location: String, reference: String },

    #[error("alias '{alias}' maps to both '{kept}' and '{dropped}'; keeping '{kept}'")]
    DuplicateAlias {
        alias: String,
        kept: String,
        dropped: String,
    },

    #[error("scoring weights sum to {sum:.2}; overall score is clamped to 100")]
    WeightsNotNormalized { sum: f64 },
}

// ────────────────────────────────────────────────────────────────────────────
// Compiled rubric
// ────────────────────────────────────────────────────────────────────────────

/// Read-only compiled rubric. Built once at startup, shared across all analyses.
#[derive(Debug)]
pub struct Rubric {
    config: RubricConfig,
    taxonomy: SkillTaxonomy,
    headers: Vec<(SectionLabel, String)>,
    action_verbs: HashSet<String>,
    industry_profiles: Vec<IndustryProfile>,
    fields_of_study: Vec<FieldOfStudy>,
    warnings: Vec<RubricWarning>,
}

impl Rubric {
    /// Compiles the built-in rubric.
    pub fn builtin() -> Result<Self, RubricError> {
        Self::compile(RubricConfig::default())
    }

    /// Validates references and builds the lookup structures used during analysis.
    pub fn compile(config: RubricConfig) -> Result<Self, RubricError> {
        let mut warnings = Vec::new();

        let (taxonomy, alias_warnings) = SkillTaxonomy::build(&config.skill_taxonomy)?;
        warnings.extend(alias_warnings);

        let mut headers = Vec::new();
        for (label, synonyms) in &config.section_header_synonyms {
            match label.parse::<SectionLabel>() {
                Ok(parsed) => {
                    headers.extend(synonyms.iter().map(|s| (parsed, normalize_heading(s))));
                }
                Err(_) => warnings.push(RubricWarning::UnknownConfigReference {
                    location: "section_header_synonyms".to_string(),
                    reference: label.clone(),
                }),
            }
        }

        let action_verbs = config
            .action_verbs
            .iter()
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .collect();

        let industry_profiles = config
            .industry_profiles
            .iter()
            .map(|profile| IndustryProfile {
                name: profile.name.clone(),
                weighted_skills: profile
                    .weighted_skills
                    .iter()
                    .filter(|(skill, _)| {
                        known_skill(
                            &taxonomy,
                            skill,
                            &format!("industry_profiles[{}]", profile.name),
                            &mut warnings,
                        )
                    })
                    .map(|(skill, weight)| (skill.clone(), *weight))
                    .collect(),
            })
            .collect();

        let fields_of_study = config
            .education
            .fields_of_study
            .iter()
            .map(|field| FieldOfStudy {
                name: field.name.clone(),
                aliases: field.aliases.iter().map(|a| a.to_lowercase()).collect(),
                skills: field
                    .skills
                    .iter()
                    .filter(|skill| {
                        known_skill(
                            &taxonomy,
                            skill,
                            &format!("education.fields_of_study[{}]", field.name),
                            &mut warnings,
                        )
                    })
                    .cloned()
                    .collect(),
            })
            .collect();

        let sum = config.scoring_weights.sum();
        if (sum - 1.0).abs() > 0.001 {
            warnings.push(RubricWarning::WeightsNotNormalized { sum });
        }

        for warning in &warnings {
            warn!("Rubric: {warning}");
        }

        Ok(Self {
            config,
            taxonomy,
            headers,
            action_verbs,
            industry_profiles,
            fields_of_study,
            warnings,
        })
    }

    pub fn config(&self) -> &RubricConfig {
        &self.config
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    /// Normalized heading synonyms paired with the label they map to.
    pub fn headers(&self) -> &[(SectionLabel, String)] {
        &self.headers
    }

    pub fn is_action_verb(&self, word: &str) -> bool {
        self.action_verbs.contains(&word.to_lowercase())
    }

    pub fn action_verb_count(&self) -> usize {
        self.action_verbs.len()
    }

    pub fn industry_profiles(&self) -> &[IndustryProfile] {
        &self.industry_profiles
    }

    pub fn fields_of_study(&self) -> &[FieldOfStudy] {
        &self.fields_of_study
    }

    pub fn warnings(&self) -> &[RubricWarning] {
        &self.warnings
    }
}

fn known_skill(
    taxonomy: &SkillTaxonomy,
    skill: &str,
    location: &str,
    warnings: &mut Vec<RubricWarning>,
) -> bool {
    if taxonomy.contains_canonical(skill) {
        return true;
    }
    warnings.push(RubricWarning::UnknownConfigReference {
        location: location.to_string(),
        reference: skill.to_string(),
    });
    false
}

/// Lower-cases a heading and strips everything but letters and single spaces.
pub fn normalize_heading(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_alphabetic() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
