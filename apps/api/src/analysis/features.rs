//! Feature Extractor: derives structured signals from each section.
//!
//! Pure functions of the section text and the compiled rubric; nothing here
//! scores, it only counts.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::dates::{contains_year, find_date_ranges, is_year_token, DateRange};
use crate::analysis::segmenter::{ResumeDocument, Section};
use crate::models::analysis::SectionLabel;
use crate::rubric::Rubric;

static CURRENCY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[$€£¥]\s?\d").expect("currency regex is valid"));

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?P<num>\d[\d,]*(?:\.\d+)?)\s?(?P<unit>%|×|x\b|k\b|m\b|\+)?")
        .expect("number regex is valid")
});

static NUMBERED_BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}[.)]\s+").expect("numbered bullet regex is valid"));

static SENTENCE_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?](?:\s+|$)").expect("sentence regex is valid"));

static GPA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bgpa\b[:\s]*\d(?:\.\d+)?|\b\d\.\d{1,2}\s*/\s*[45](?:\.0+)?\b")
        .expect("gpa regex is valid")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email regex is valid")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}\b")
        .expect("phone regex is valid")
});

static LINKEDIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\blinkedin\b").expect("linkedin regex is valid"));

static PORTFOLIO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:github\.com|gitlab\.com|bitbucket\.org)/|https?://")
        .expect("portfolio regex is valid")
});

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// The marker a bullet line opens with. Mixed styles hurt readability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletStyle {
    Hyphen,
    Asterisk,
    Dot,
    Dash,
    Numbered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletFeature {
    pub text: String,
    pub style: BulletStyle,
    pub word_count: usize,
    pub starts_with_action_verb: bool,
    pub quantified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationSignals {
    pub has_degree: bool,
    pub has_institution: bool,
    pub has_date: bool,
    pub has_gpa_or_honors: bool,
    /// Names of configured fields of study mentioned in the section.
    pub fields_of_study: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSignals {
    pub has_email: bool,
    pub has_phone: bool,
    pub has_linkedin: bool,
    pub has_portfolio: bool,
}

/// Signals derived from one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub label: SectionLabel,
    pub heading: Option<String>,
    pub word_count: usize,
    pub bullets: Vec<BulletFeature>,
    pub bullet_count: usize,
    pub action_verb_count: usize,
    pub quantified_count: usize,
    pub date_ranges: Vec<DateRange>,
    pub skills: BTreeSet<String>,
    /// Non-bullet sentences longer than the readability threshold.
    pub long_sentence_count: usize,
    pub education: Option<EducationSignals>,
}

/// Signals for the whole document: every section plus document-wide facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFeatures {
    pub sections: Vec<FeatureSet>,
    pub skills: BTreeSet<String>,
    pub contact: ContactSignals,
    pub non_text_elements: u32,
    pub recognized_headers: usize,
    pub unrecognized_headers: Vec<String>,
    pub word_count: usize,
}

impl DocumentFeatures {
    /// No standard heading was found; the whole text is one Other section.
    pub fn is_unstructured(&self) -> bool {
        self.recognized_headers == 0
    }

    pub fn has_section(&self, label: SectionLabel) -> bool {
        self.sections.iter().any(|s| s.label == label)
    }

    pub fn sections_with(&self, label: SectionLabel) -> impl Iterator<Item = &FeatureSet> {
        self.sections.iter().filter(move |s| s.label == label)
    }

    pub fn all_bullets(&self) -> impl Iterator<Item = (SectionLabel, &BulletFeature)> {
        self.sections
            .iter()
            .flat_map(|s| s.bullets.iter().map(move |b| (s.label, b)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Extracts features for every section of `document`.
/// `reported_non_text` is the count of tables/images the upstream extractor saw.
pub fn extract_document_features(
    document: &ResumeDocument,
    rubric: &Rubric,
    reported_non_text: u32,
) -> DocumentFeatures {
    let sections: Vec<FeatureSet> = document
        .sections
        .iter()
        .map(|section| extract_features(section, rubric))
        .collect();

    let skills = sections
        .iter()
        .flat_map(|s| s.skills.iter().cloned())
        .collect();

    let inline_markers =
        count_non_text_markers(&document.raw_text, &rubric.config().ats.non_text_markers);

    DocumentFeatures {
        sections,
        skills,
        contact: extract_contact_signals(&document.raw_text),
        non_text_elements: reported_non_text.saturating_add(inline_markers),
        recognized_headers: document.recognized_headers,
        unrecognized_headers: document.unrecognized_headers.clone(),
        word_count: document.word_count,
    }
}

/// Extracts the FeatureSet for a single section.
pub fn extract_features(section: &Section, rubric: &Rubric) -> FeatureSet {
    let (bullet_lines, prose) = split_bullets(&section.text);

    let bullets: Vec<BulletFeature> = bullet_lines
        .into_iter()
        .map(|(style, text)| {
            let first_word = text
                .split_whitespace()
                .next()
                .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
                .unwrap_or("");
            BulletFeature {
                word_count: text.split_whitespace().count(),
                starts_with_action_verb: !first_word.is_empty()
                    && rubric.is_action_verb(first_word),
                quantified: is_quantified(&text),
                style,
                text,
            }
        })
        .collect();

    let max_sentence_words = rubric.config().readability.max_sentence_words;
    let long_sentence_count = SENTENCE_END_RE
        .split(&prose)
        .filter(|sentence| sentence.split_whitespace().count() > max_sentence_words)
        .count();

    let education = (section.label == SectionLabel::Education)
        .then(|| extract_education_signals(&section.text, rubric));

    FeatureSet {
        label: section.label,
        heading: section.heading.clone(),
        word_count: section.text.split_whitespace().count(),
        bullet_count: bullets.len(),
        action_verb_count: bullets.iter().filter(|b| b.starts_with_action_verb).count(),
        quantified_count: bullets.iter().filter(|b| b.quantified).count(),
        bullets,
        date_ranges: find_date_ranges(&section.text),
        skills: rubric.taxonomy().extract_skills(&section.text),
        long_sentence_count,
        education,
    }
}

/// Recognizes a bullet line, returning its style and the text after the marker.
pub fn parse_bullet(line: &str) -> Option<(BulletStyle, &str)> {
    let trimmed = line.trim_start();
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    let style = match first {
        '-' => BulletStyle::Hyphen,
        '*' => BulletStyle::Asterisk,
        '•' | '◦' | '▪' | '‣' | '·' | '●' => BulletStyle::Dot,
        '–' | '—' => BulletStyle::Dash,
        _ => {
            let m = NUMBERED_BULLET_RE.find(trimmed)?;
            return Some((BulletStyle::Numbered, trimmed[m.end()..].trim()));
        }
    };
    let rest = chars.as_str();
    // "-2020" or "--" are not bullets
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((style, rest.trim()))
}

/// Splits section text into bullets and the remaining prose.
/// Lower-case lines directly after a bullet are treated as its wrapped continuation.
fn split_bullets(text: &str) -> (Vec<(BulletStyle, String)>, String) {
    let mut bullets: Vec<(BulletStyle, String)> = Vec::new();
    let mut prose = Vec::new();
    let mut in_bullet = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            in_bullet = false;
            continue;
        }
        if let Some((style, rest)) = parse_bullet(trimmed) {
            bullets.push((style, rest.to_string()));
            in_bullet = true;
            continue;
        }
        let continues = in_bullet && trimmed.starts_with(|c: char| c.is_lowercase());
        match bullets.last_mut() {
            Some((_, text)) if continues => {
                text.push(' ');
                text.push_str(trimmed);
            }
            _ => {
                in_bullet = false;
                prose.push(trimmed);
            }
        }
    }

    (bullets, prose.join(" "))
}

/// True if `text` carries a measurable outcome: a currency amount, a number with a
/// unit (%, x, k, m, +), or a bare number of two or more digits that is not a year.
pub fn is_quantified(text: &str) -> bool {
    if CURRENCY_RE.is_match(text) {
        return true;
    }
    NUMBER_RE.captures_iter(text).any(|caps| {
        if caps.name("unit").is_some() {
            return true;
        }
        let digits: String = caps["num"].chars().filter(|c| c.is_ascii_digit()).collect();
        digits.len() >= 2 && !is_year_token(&digits)
    })
}

fn extract_education_signals(text: &str, rubric: &Rubric) -> EducationSignals {
    let lower = text.to_lowercase();
    let education = &rubric.config().education;

    let has_honors = education
        .honors_keywords
        .iter()
        .any(|k| contains_phrase(&lower, k));

    EducationSignals {
        has_degree: education
            .degree_keywords
            .iter()
            .any(|k| contains_phrase(&lower, k)),
        has_institution: education
            .institution_keywords
            .iter()
            .any(|k| contains_phrase(&lower, k)),
        has_date: contains_year(text),
        has_gpa_or_honors: has_honors || GPA_RE.is_match(text),
        fields_of_study: rubric
            .fields_of_study()
            .iter()
            .filter(|field| field.aliases.iter().any(|a| contains_phrase(&lower, a)))
            .map(|field| field.name.clone())
            .collect(),
    }
}

fn extract_contact_signals(text: &str) -> ContactSignals {
    ContactSignals {
        has_email: EMAIL_RE.is_match(text),
        has_phone: PHONE_RE.is_match(text),
        has_linkedin: LINKEDIN_RE.is_match(text),
        has_portfolio: PORTFOLIO_RE.is_match(text),
    }
}

/// Counts case-insensitive occurrences of the configured non-text placeholders.
pub fn count_non_text_markers(text: &str, markers: &[String]) -> u32 {
    let lower = text.to_lowercase();
    markers
        .iter()
        .filter(|m| !m.is_empty())
        .map(|m| lower.matches(m.to_lowercase().as_str()).count() as u32)
        .sum()
}

/// Whole-phrase containment: `phrase` must not be glued to letters or digits on either side.
/// Both arguments are expected in lower case.
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    let phrase = phrase.trim();
    if phrase.is_empty() {
        return false;
    }
    haystack.match_indices(phrase).any(|(pos, _)| {
        let before_ok = haystack[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[pos + phrase.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}
