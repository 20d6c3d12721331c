//! Dimension Scorer: turns extracted features into the five 0 – 100 sub-scores.
//!
//! Every constant comes from the rubric; nothing is tuned inline.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::analysis::dates::{total_months, DateRange};
use crate::analysis::features::{
    BulletFeature, BulletStyle, DocumentFeatures, EducationSignals, FeatureSet,
};
use crate::models::analysis::{DimensionScores, SectionLabel};
use crate::rubric::Rubric;

pub fn score_dimensions(
    features: &DocumentFeatures,
    rubric: &Rubric,
    as_of: NaiveDate,
) -> DimensionScores {
    DimensionScores {
        education: score_education(features, rubric),
        experience: score_experience(features, rubric, as_of),
        skills: score_skills(features, rubric),
        readability: score_readability(features, rubric),
        ats_compatibility: score_ats(features, rubric),
    }
}

/// Degree + institution + date form the baseline; GPA/honors and a field of study
/// backed by detected skills add bonuses. Zero without an Education section.
pub fn score_education(features: &DocumentFeatures, rubric: &Rubric) -> u32 {
    let cfg = &rubric.config().education;
    let signals: Vec<_> = features
        .sections_with(SectionLabel::Education)
        .filter_map(|s| s.education.as_ref())
        .collect();
    if signals.is_empty() {
        return 0;
    }

    let any = |f: fn(&EducationSignals) -> bool| signals.iter().any(|s| f(s));

    let mut score = 0;
    if any(|s| s.has_degree) {
        score += cfg.degree_points;
    }
    if any(|s| s.has_institution) {
        score += cfg.institution_points;
    }
    if any(|s| s.has_date) {
        score += cfg.date_points;
    }
    if any(|s| s.has_gpa_or_honors) {
        score += cfg.honors_bonus;
    }

    let mentioned: BTreeSet<&str> = signals
        .iter()
        .flat_map(|s| s.fields_of_study.iter().map(String::as_str))
        .collect();
    let relevant = rubric
        .fields_of_study()
        .iter()
        .filter(|field| mentioned.contains(field.name.as_str()))
        .any(|field| field.skills.iter().any(|skill| features.skills.contains(skill)));
    if relevant {
        score += cfg.field_relevance_bonus;
    }

    score.min(100)
}

/// Tenure baseline from the union of dated roles plus a bonus per quantified bullet.
/// Unstructured documents fall back to their single Other section.
pub fn score_experience(features: &DocumentFeatures, rubric: &Rubric, as_of: NaiveDate) -> u32 {
    let cfg = &rubric.config().experience;
    let sections = experience_sections(features);

    let ranges: Vec<DateRange> = sections
        .iter()
        .flat_map(|s| s.date_ranges.iter().copied())
        .collect();
    let months = total_months(&ranges, as_of);

    let tenure = if months == 0 {
        0
    } else if cfg.full_credit_months == 0 {
        cfg.max_tenure_points
    } else {
        let ratio = months.min(cfg.full_credit_months) as f64 / cfg.full_credit_months as f64;
        (ratio * cfg.max_tenure_points as f64).round() as u32
    };

    let quantified: u32 = sections.iter().map(|s| s.quantified_count as u32).sum();
    let bonus = (quantified * cfg.points_per_quantified).min(cfg.max_quantified_bonus);

    (tenure + bonus).min(100)
}

/// Sections that count as work history for experience scoring.
pub fn experience_sections(features: &DocumentFeatures) -> Vec<&FeatureSet> {
    let label = if features.has_section(SectionLabel::Experience) {
        SectionLabel::Experience
    } else if features.is_unstructured() {
        SectionLabel::Other
    } else {
        return Vec::new();
    };
    features.sections_with(label).collect()
}

pub fn score_skills(features: &DocumentFeatures, rubric: &Rubric) -> u32 {
    let points = rubric.config().skills.points_per_skill as usize;
    (features.skills.len().saturating_mul(points)).min(100) as u32
}

/// A bullet runs on when its words after any leading action verb exceed the limit.
pub fn is_run_on(bullet: &BulletFeature, rubric: &Rubric) -> bool {
    let words = bullet.word_count - usize::from(bullet.starts_with_action_verb);
    words > rubric.config().readability.max_bullet_words
}

/// True when a narrative section's bullet does not open with an action verb.
pub fn is_verbless(label: SectionLabel, bullet: &BulletFeature, rubric: &Rubric) -> bool {
    let needs_verb = rubric.config().readability.action_verb_sections.contains(&label);
    needs_verb && !bullet.starts_with_action_verb
}

/// A bullet is offending when it runs on, or opens a narrative line without an action verb.
pub fn is_offending_bullet(label: SectionLabel, bullet: &BulletFeature, rubric: &Rubric) -> bool {
    is_run_on(bullet, rubric) || is_verbless(label, bullet, rubric)
}

/// Starts at 100 and subtracts per offending bullet, per section with over-long prose,
/// for mixed bullet markers, and for a document with no recognizable structure.
pub fn score_readability(features: &DocumentFeatures, rubric: &Rubric) -> u32 {
    let cfg = &rubric.config().readability;
    let mut penalty: u64 = 0;

    let offending = features
        .all_bullets()
        .filter(|(label, bullet)| is_offending_bullet(*label, bullet, rubric))
        .count() as u64;
    penalty += offending * cfg.offending_bullet_penalty as u64;

    let long_sections = features
        .sections
        .iter()
        .filter(|s| s.long_sentence_count > 0)
        .count() as u64;
    penalty += long_sections * cfg.long_sentence_penalty as u64;

    let styles: BTreeSet<BulletStyle> = features.all_bullets().map(|(_, b)| b.style).collect();
    if styles.len() > 1 {
        penalty += cfg.inconsistent_bullets_penalty as u64;
    }

    if features.is_unstructured() {
        penalty += cfg.unstructured_penalty as u64;
    }

    100u64.saturating_sub(penalty) as u32
}

/// Starts at 100; penalizes non-standard structure, non-text elements and a missing Skills section.
pub fn score_ats(features: &DocumentFeatures, rubric: &Rubric) -> u32 {
    let cfg = &rubric.config().ats;
    let mut penalty: u64 = 0;

    if features.is_unstructured() || !features.unrecognized_headers.is_empty() {
        penalty += cfg.nonstandard_header_penalty as u64;
    }
    penalty += features.non_text_elements as u64 * cfg.non_text_element_penalty as u64;
    if !features.has_section(SectionLabel::Skills) {
        penalty += cfg.missing_skills_penalty as u64;
    }

    100u64.saturating_sub(penalty) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::features::extract_document_features;
    use crate::analysis::segmenter::segment;

    fn rubric() -> Rubric {
        Rubric::builtin().unwrap()
    }

    fn features(text: &str) -> DocumentFeatures {
        let rubric = rubric();
        let doc = segment(text, &rubric).unwrap();
        extract_document_features(&doc, &rubric, 0)
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_education_zero_without_section() {
        let f = features("EXPERIENCE\n- Led team\nSKILLS\n- Rust");
        assert_eq!(score_education(&f, &rubric()), 0);
    }

    #[test]
    fn test_education_baseline_is_sixty() {
        let f = features("EDUCATION\nBachelor of Arts in History\nState University, 2015");
        assert_eq!(score_education(&f, &rubric()), 60);
    }

    #[test]
    fn test_education_bonuses() {
        let f = features(
            "EDUCATION\nBachelor of Science in Computer Science\n\
             University of Technology, 2018, GPA 3.9\nSKILLS\n- Python\n- SQL",
        );
        assert_eq!(score_education(&f, &rubric()), 90);
    }

    #[test]
    fn test_field_without_matching_skills_gets_no_bonus() {
        let f = features(
            "EDUCATION\nBachelor of Science in Computer Science\nUniversity of Technology, 2018",
        );
        assert_eq!(score_education(&f, &rubric()), 60);
    }

    #[test]
    fn test_experience_tenure_scales_linearly() {
        // 30 months of 60 → half of 80
        let f = features("EXPERIENCE\nAcme\nJan 2020 - Jul 2022\n- Led team");
        assert_eq!(score_experience(&f, &rubric(), as_of()), 40);
    }

    #[test]
    fn test_experience_saturates_at_sixty_months() {
        let f = features("EXPERIENCE\nAcme\n2010 - Present\n- Led team");
        assert_eq!(score_experience(&f, &rubric(), as_of()), 80);
    }

    #[test]
    fn test_experience_quantified_bonus_is_capped() {
        let bullets: String = (0..15)
            .map(|i| format!("- Reduced cost by {}%\n", 10 + i))
            .collect();
        let f = features(&format!("EXPERIENCE\nAcme\n2010 - Present\n{bullets}"));
        assert_eq!(score_experience(&f, &rubric(), as_of()), 100);
    }

    #[test]
    fn test_experience_zero_without_dates_or_numbers() {
        let f = features("EXPERIENCE\n- Led team");
        assert_eq!(score_experience(&f, &rubric(), as_of()), 0);
    }

    #[test]
    fn test_skills_ten_points_each_capped() {
        let f = features("SKILLS\nRust, Python, Java");
        assert_eq!(score_skills(&f, &rubric()), 30);

        let many = features(
            "SKILLS\nRust, Python, Java, SQL, AWS, Docker, Kubernetes, React, Git, Linux, Redis",
        );
        assert_eq!(score_skills(&many, &rubric()), 100);
    }

    #[test]
    fn test_readability_penalizes_verbless_bullets() {
        let good = features("EXPERIENCE\n- Led team\n- Built API");
        let bad = features("EXPERIENCE\n- Team lead\n- API work");
        assert_eq!(score_readability(&good, &rubric()), 100);
        assert_eq!(score_readability(&bad, &rubric()), 90);
    }

    #[test]
    fn test_readability_ignores_skill_list_bullets() {
        let f = features("EXPERIENCE\n- Led team\nSKILLS\n- Rust\n- Python");
        assert_eq!(score_readability(&f, &rubric()), 100);
    }

    #[test]
    fn test_readability_penalizes_mixed_markers_and_run_ons() {
        let run_on = vec!["word"; 35].join(" ");
        let f = features(&format!("EXPERIENCE\n- Led team\n• Built {run_on}"));
        // one run-on bullet (−5) and mixed markers (−5)
        assert_eq!(score_readability(&f, &rubric()), 90);
    }

    #[test]
    fn test_leading_action_verb_does_not_count_toward_run_on() {
        let rubric = rubric();
        let body = vec!["tooling"; 30].join(" ");
        let plain = features(&format!("SKILLS\n- {body}"));
        let led = features(&format!("SKILLS\n- Led {body}"));
        assert!(!is_run_on(&led.sections[0].bullets[0], &rubric));
        assert_eq!(score_readability(&plain, &rubric), 100);
        assert_eq!(score_readability(&led, &rubric), 100);
    }

    #[test]
    fn test_all_caps_employer_keeps_experience_score() {
        let rubric = rubric();
        let resume = |employer: &str| {
            features(&format!(
                "EXPERIENCE\n{employer}\n2018 - 2023\n- Led team of 12\nSKILLS\nRust"
            ))
        };
        let titled = resume("Acme Corporation");
        let caps = resume("ACME CORPORATION");
        // 60 months saturates tenure (80), one quantified bullet (+2)
        assert_eq!(score_experience(&titled, &rubric, as_of()), 82);
        assert_eq!(score_experience(&caps, &rubric, as_of()), 82);
        assert_eq!(score_ats(&caps, &rubric), 100);
    }

    #[test]
    fn test_ats_full_marks_for_clean_resume() {
        let f = features("EXPERIENCE\n- Led team\nSKILLS\n- Rust");
        assert_eq!(score_ats(&f, &rubric()), 100);
    }

    #[test]
    fn test_ats_penalties() {
        let rubric = rubric();
        let doc = segment("EXPERIENCE\n- Led team\nVOLUNTEER WORK\n- Coached", &rubric).unwrap();
        let f = extract_document_features(&doc, &rubric, 2);
        // non-standard heading −10, two non-text elements −10, no skills −5
        assert_eq!(score_ats(&f, &rubric), 75);
    }

    #[test]
    fn test_unstructured_document_is_penalized() {
        let f = features("I am an engineer who likes building things and shipping them.");
        assert_eq!(score_ats(&f, &rubric()), 85);
        assert_eq!(score_readability(&f, &rubric()), 90);
    }
}
