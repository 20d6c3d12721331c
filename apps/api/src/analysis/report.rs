//! Report Builder: turns scores and features into strengths, improvements and the final result.

use std::time::Instant;

use crate::analysis::aggregate::AggregateScores;
use crate::analysis::dimensions::{experience_sections, is_run_on, is_verbless};
use crate::analysis::features::DocumentFeatures;
use crate::models::analysis::{
    AnalysisResult, Dimension, DimensionScores, FeedbackItem, Priority, SectionLabel,
    SectionOverview,
};
use crate::rubric::Rubric;

/// Minimum narrative bullets before action-verb usage counts as a strength.
const MIN_BULLETS_FOR_VERB_STRENGTH: usize = 3;

/// Minimum quantified bullets before they count as a strength.
const MIN_QUANTIFIED_FOR_STRENGTH: usize = 3;

struct DimensionMessages {
    dimension: Dimension,
    strength: &'static str,
    improvement: &'static str,
    section: SectionLabel,
    priority: Priority,
}

const DIMENSION_MESSAGES: &[DimensionMessages] = &[
    DimensionMessages {
        dimension: Dimension::Experience,
        strength: "Clear work history with dated roles and measurable impact",
        improvement: "Strengthen your experience section with dated roles and measurable results",
        section: SectionLabel::Experience,
        priority: Priority::High,
    },
    DimensionMessages {
        dimension: Dimension::Skills,
        strength: "Strong technical skills section",
        improvement: "List more relevant skills using their standard industry names",
        section: SectionLabel::Skills,
        priority: Priority::Medium,
    },
    DimensionMessages {
        dimension: Dimension::Education,
        strength: "Excellent education background",
        improvement: "Add your degree, institution and graduation date to the education section",
        section: SectionLabel::Education,
        priority: Priority::Medium,
    },
    DimensionMessages {
        dimension: Dimension::Readability,
        strength: "Concise, consistently formatted bullet points",
        improvement: "Tighten your bullet points and keep their formatting consistent",
        section: SectionLabel::Experience,
        priority: Priority::Medium,
    },
    DimensionMessages {
        dimension: Dimension::AtsCompatibility,
        strength: "Well structured for applicant tracking systems",
        improvement: "Improve ATS compatibility with standard headings and plain-text formatting",
        section: SectionLabel::Other,
        priority: Priority::High,
    },
];

const FALLBACK_STRENGTH: &str = "Resume content is fully machine-readable";
const FALLBACK_IMPROVEMENT: &str = "Tailor the skills you list to each job description";

pub struct ReportInputs<'a> {
    pub features: &'a DocumentFeatures,
    pub scores: DimensionScores,
    pub aggregate: AggregateScores,
    pub started: Instant,
}

pub fn build_report(inputs: ReportInputs<'_>, rubric: &Rubric) -> AnalysisResult {
    let ReportInputs {
        features,
        scores,
        aggregate,
        started,
    } = inputs;

    let mut strengths = dimension_strengths(&scores, rubric);
    strengths.extend(feature_strengths(features, rubric));
    if strengths.is_empty() {
        strengths.push(FALLBACK_STRENGTH.to_string());
    }

    let mut feedback = dimension_improvements(&scores, rubric);
    feedback.extend(feature_improvements(features, rubric));
    if feedback.is_empty() {
        feedback.push(FeedbackItem {
            suggestion: FALLBACK_IMPROVEMENT.to_string(),
            section: SectionLabel::Skills,
            priority: Priority::Low,
        });
    }
    feedback.sort_by_key(|item| item.priority);
    let improvements = feedback.iter().map(|f| f.suggestion.clone()).collect();

    let sections = features
        .sections
        .iter()
        .map(|s| SectionOverview {
            label: s.label,
            heading: s.heading.clone(),
            word_count: s.word_count,
            bullet_count: s.bullet_count,
        })
        .collect();

    AnalysisResult {
        overall_score: aggregate.overall_score,
        scores,
        strengths,
        improvements,
        feedback,
        keywords: features.skills.clone(),
        top_industry_fit: aggregate.industry_fit.into_iter().map(|f| f.name).collect(),
        estimated_interview_rate: aggregate.estimated_interview_rate,
        word_count: features.word_count,
        sections,
        processing_time_ms: started.elapsed().as_millis() as u64,
    }
}

fn dimension_strengths(scores: &DimensionScores, rubric: &Rubric) -> Vec<String> {
    let threshold = rubric.config().report.strength_threshold;
    DIMENSION_MESSAGES
        .iter()
        .filter(|m| scores.get(m.dimension) >= threshold)
        .map(|m| m.strength.to_string())
        .collect()
}

fn dimension_improvements(scores: &DimensionScores, rubric: &Rubric) -> Vec<FeedbackItem> {
    let threshold = rubric.config().report.improvement_threshold;
    DIMENSION_MESSAGES
        .iter()
        .filter(|m| scores.get(m.dimension) < threshold)
        .map(|m| FeedbackItem {
            suggestion: m.improvement.to_string(),
            section: m.section,
            priority: m.priority,
        })
        .collect()
}

fn feature_strengths(features: &DocumentFeatures, rubric: &Rubric) -> Vec<String> {
    let mut strengths = Vec::new();
    let narrative = &rubric.config().readability.action_verb_sections;

    let (bullets, with_verbs) = features
        .all_bullets()
        .filter(|(label, _)| narrative.contains(label))
        .fold((0usize, 0usize), |(total, verbs), (_, b)| {
            (total + 1, verbs + b.starts_with_action_verb as usize)
        });
    if bullets >= MIN_BULLETS_FOR_VERB_STRENGTH
        && with_verbs as f64 / bullets as f64 >= rubric.config().report.action_verb_strength_ratio
    {
        strengths.push("Good use of action verbs".to_string());
    }

    let quantified: usize = features.sections.iter().map(|s| s.quantified_count).sum();
    if quantified >= MIN_QUANTIFIED_FOR_STRENGTH {
        strengths.push("Quantified achievements demonstrate impact".to_string());
    }

    if features.has_section(SectionLabel::Certifications) {
        strengths.push("Relevant certifications included".to_string());
    }

    strengths
}

fn feature_improvements(features: &DocumentFeatures, rubric: &Rubric) -> Vec<FeedbackItem> {
    let mut items = Vec::new();
    let mut push = |suggestion: String, section: SectionLabel, priority: Priority| {
        items.push(FeedbackItem {
            suggestion,
            section,
            priority,
        })
    };
    let structured = !features.is_unstructured();

    if !structured {
        push(
            "Organize your resume with standard section headings such as Summary, Experience, \
             Education and Skills so its section structure can be parsed"
                .to_string(),
            SectionLabel::Other,
            Priority::High,
        );
    }
    if !features.unrecognized_headers.is_empty() {
        push(
            format!(
                "Rename non-standard section headings ({}) to standard ones",
                features.unrecognized_headers.join(", ")
            ),
            SectionLabel::Other,
            Priority::Medium,
        );
    }
    if features.non_text_elements > 0 {
        push(
            format!(
                "Replace {} table, image or graphic element(s) with plain text that applicant \
                 tracking systems can read",
                features.non_text_elements
            ),
            SectionLabel::Other,
            Priority::High,
        );
    }
    if structured && !features.has_section(SectionLabel::Skills) {
        push(
            "Add a dedicated Skills section".to_string(),
            SectionLabel::Skills,
            Priority::High,
        );
    }
    if structured && !features.has_section(SectionLabel::Experience) {
        push(
            "Add an Experience section listing your roles with dates".to_string(),
            SectionLabel::Experience,
            Priority::High,
        );
    }

    let work = experience_sections(features);
    let has_work_bullets = work.iter().any(|s| s.bullet_count > 0);
    if has_work_bullets && work.iter().all(|s| s.quantified_count == 0) {
        push(
            "Add specific metrics to your achievements (percentages, amounts, counts)".to_string(),
            SectionLabel::Experience,
            Priority::High,
        );
    }

    let verbless: Vec<SectionLabel> = features
        .all_bullets()
        .filter(|(label, b)| is_verbless(*label, b, rubric))
        .map(|(label, _)| label)
        .collect();
    if let Some(section) = busiest_section(&verbless) {
        push(
            format!(
                "Start {} bullet point(s) with a strong action verb, most of them in your {} section",
                verbless.len(),
                section.display_name()
            ),
            section,
            Priority::Medium,
        );
    }

    let max_words = rubric.config().readability.max_bullet_words;
    let run_on: Vec<SectionLabel> = features
        .all_bullets()
        .filter(|(_, b)| is_run_on(b, rubric))
        .map(|(label, _)| label)
        .collect();
    if let Some(section) = busiest_section(&run_on) {
        push(
            format!(
                "Shorten {} bullet point(s) to {max_words} words or fewer, most of them in your {} section",
                run_on.len(),
                section.display_name()
            ),
            section,
            Priority::Medium,
        );
    }

    if structured && !features.has_section(SectionLabel::Summary) {
        push(
            "Include a brief professional summary at the top".to_string(),
            SectionLabel::Summary,
            Priority::Medium,
        );
    }
    if !features.contact.has_email {
        push(
            "Add an email address to your contact details".to_string(),
            SectionLabel::Contact,
            Priority::High,
        );
    }
    if !features.contact.has_linkedin {
        push(
            "Add a link to your LinkedIn profile".to_string(),
            SectionLabel::Contact,
            Priority::Low,
        );
    }
    if !features.contact.has_portfolio {
        push(
            "Add a link to your GitHub profile or portfolio".to_string(),
            SectionLabel::Contact,
            Priority::Low,
        );
    }
    if structured && !features.has_section(SectionLabel::Projects) {
        push(
            "Consider adding a projects section".to_string(),
            SectionLabel::Projects,
            Priority::Low,
        );
    }

    items
}

/// The label occurring most often; ties go to the one seen first.
fn busiest_section(labels: &[SectionLabel]) -> Option<SectionLabel> {
    let mut counts: Vec<(SectionLabel, usize)> = Vec::new();
    for &label in labels {
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }
    counts
        .into_iter()
        .rev()
        .max_by_key(|(_, n)| *n)
        .map(|(label, _)| label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate::aggregate;
    use crate::analysis::dimensions::score_dimensions;
    use crate::analysis::features::extract_document_features;
    use crate::analysis::segmenter::segment;
    use chrono::NaiveDate;

    fn rubric() -> Rubric {
        Rubric::builtin().unwrap()
    }

    fn report(text: &str) -> AnalysisResult {
        let rubric = rubric();
        let doc = segment(text, &rubric).unwrap();
        let features = extract_document_features(&doc, &rubric, 0);
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let scores = score_dimensions(&features, &rubric, as_of);
        let aggregate = aggregate(&scores, &features.skills, &rubric);
        build_report(
            ReportInputs {
                features: &features,
                scores,
                aggregate,
                started: Instant::now(),
            },
            &rubric,
        )
    }

    const STRONG: &str = "Jane Roe\njane@example.com | linkedin.com/in/janeroe | github.com/janeroe\n\
SUMMARY\nBackend engineer.\n\
EXPERIENCE\nSenior Engineer | Tech Corp\n2016 - Present\n\
- Led migration to Kubernetes cutting costs by 30%\n\
- Built Rust services handling 2M requests daily\n\
- Reduced latency by 45%\n\
EDUCATION\nBachelor of Science in Computer Science\nState University, 2015, magna cum laude\n\
SKILLS\nRust, Python, SQL, AWS, Docker, Kubernetes, Terraform, Redis, Kafka, Linux\n\
PROJECTS\n- Built an open source scheduler\n\
CERTIFICATIONS\nAWS Solutions Architect";

    #[test]
    fn test_strong_resume_lists_strengths() {
        let result = report(STRONG);
        assert!(result
            .strengths
            .iter()
            .any(|s| s == "Good use of action verbs"));
        assert!(result
            .strengths
            .iter()
            .any(|s| s == "Quantified achievements demonstrate impact"));
        assert!(result
            .strengths
            .iter()
            .any(|s| s == "Relevant certifications included"));
        assert!(!result.improvements.is_empty());
    }

    #[test]
    fn test_improvements_sorted_by_priority() {
        let result = report("EXPERIENCE\n- Team lead\n- API work");
        let priorities: Vec<Priority> = result.feedback.iter().map(|f| f.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        assert_eq!(priorities, sorted);
        assert_eq!(
            result.improvements,
            result
                .feedback
                .iter()
                .map(|f| f.suggestion.clone())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_missing_sections_and_metrics_are_flagged() {
        let result = report("EXPERIENCE\n- Led team\n- Built API");
        let has = |needle: &str| result.improvements.iter().any(|i| i.contains(needle));
        assert!(has("Skills section"));
        assert!(has("specific metrics"));
        assert!(has("professional summary"));
        assert!(has("LinkedIn"));
    }

    #[test]
    fn test_unstructured_document_mentions_section_structure() {
        let result = report("I build things and ship them quickly for startups.");
        assert!(result
            .improvements
            .iter()
            .any(|i| i.contains("section structure")));
        assert_eq!(result.feedback[0].priority, Priority::High);
    }

    #[test]
    fn test_sections_overview_and_keywords() {
        let result = report(STRONG);
        assert_eq!(result.sections[0].label, SectionLabel::Contact);
        assert!(result.keywords.contains("Kubernetes"));
        assert!(result
            .sections
            .iter()
            .any(|s| s.label == SectionLabel::Experience && s.bullet_count == 3));
    }

    #[test]
    fn test_bullet_feedback_points_at_offending_section() {
        let run_on = vec!["word"; 35].join(" ");
        let result = report(&format!(
            "EXPERIENCE\n- Led team\nPROJECTS\n- Scheduler in Rust\n- Chat bot\n- Built {run_on}"
        ));
        let verbs = result
            .feedback
            .iter()
            .find(|f| f.suggestion.starts_with("Start 2 bullet point(s)"))
            .unwrap();
        assert_eq!(verbs.section, SectionLabel::Projects);
        assert!(verbs.suggestion.ends_with("in your Projects section"));

        let long = result
            .feedback
            .iter()
            .find(|f| f.suggestion.starts_with("Shorten 1 bullet point(s)"))
            .unwrap();
        assert_eq!(long.section, SectionLabel::Projects);
    }

    #[test]
    fn test_busiest_section_prefers_first_on_tie() {
        use SectionLabel::*;
        assert_eq!(busiest_section(&[]), None);
        assert_eq!(busiest_section(&[Summary, Projects, Projects]), Some(Projects));
        assert_eq!(busiest_section(&[Other, Summary]), Some(Other));
    }

    #[test]
    fn test_always_at_least_one_strength_and_improvement() {
        for text in [STRONG, "x", "SKILLS\nRust"] {
            let result = report(text);
            assert!(!result.strengths.is_empty());
            assert!(!result.improvements.is_empty());
        }
    }
}
