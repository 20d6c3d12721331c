use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Label assigned to a contiguous span of resume text by the segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLabel {
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
    Projects,
    Contact,
    Other,
}

impl SectionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionLabel::Summary => "summary",
            SectionLabel::Experience => "experience",
            SectionLabel::Education => "education",
            SectionLabel::Skills => "skills",
            SectionLabel::Certifications => "certifications",
            SectionLabel::Projects => "projects",
            SectionLabel::Contact => "contact",
            SectionLabel::Other => "other",
        }
    }

    /// Human-facing name used in report text.
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionLabel::Summary => "Summary",
            SectionLabel::Experience => "Experience",
            SectionLabel::Education => "Education",
            SectionLabel::Skills => "Skills",
            SectionLabel::Certifications => "Certifications",
            SectionLabel::Projects => "Projects",
            SectionLabel::Contact => "Contact",
            SectionLabel::Other => "Other",
        }
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summary" => Ok(SectionLabel::Summary),
            "experience" => Ok(SectionLabel::Experience),
            "education" => Ok(SectionLabel::Education),
            "skills" => Ok(SectionLabel::Skills),
            "certifications" => Ok(SectionLabel::Certifications),
            "projects" => Ok(SectionLabel::Projects),
            "contact" => Ok(SectionLabel::Contact),
            "other" => Ok(SectionLabel::Other),
            other => Err(format!("unknown section label '{other}'")),
        }
    }
}

/// The five rubric dimensions, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Experience,
    Skills,
    Education,
    Readability,
    AtsCompatibility,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Experience,
        Dimension::Skills,
        Dimension::Education,
        Dimension::Readability,
        Dimension::AtsCompatibility,
    ];
}

/// Per-dimension sub-scores, each in 0 – 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DimensionScores {
    pub education: u32,
    pub experience: u32,
    pub skills: u32,
    pub readability: u32,
    pub ats_compatibility: u32,
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::Education => self.education,
            Dimension::Experience => self.experience,
            Dimension::Skills => self.skills,
            Dimension::Readability => self.readability,
            Dimension::AtsCompatibility => self.ats_compatibility,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A single section-scoped suggestion produced from rubric thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub suggestion: String,
    pub section: SectionLabel,
    pub priority: Priority,
}

/// Shape of one detected section, for display next to the scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionOverview {
    pub label: SectionLabel,
    pub heading: Option<String>,
    pub word_count: usize,
    pub bullet_count: usize,
}

/// Full analysis returned to callers. Owned, immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: u32, // 0 – 100
    #[serde(flatten)]
    pub scores: DimensionScores,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub feedback: Vec<FeedbackItem>,
    pub keywords: BTreeSet<String>,
    pub top_industry_fit: Vec<String>,
    pub estimated_interview_rate: u32, // 0 – 100
    pub word_count: usize,
    pub sections: Vec<SectionOverview>,
    pub processing_time_ms: u64,
}

/// Skill overlap between a resume and a job description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMatchResult {
    pub match_score: u32, // 0 – 100
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub matched_requirement_count: usize,
    pub total_requirement_count: usize,
    pub summary: String,
}
