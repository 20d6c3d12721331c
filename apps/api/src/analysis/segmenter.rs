//! Section Segmenter: splits raw resume text into labeled sections.
//!
//! Heading detection is heuristic: short upper-case, title-case or colon-terminated
//! lines are matched against the rubric's synonym vocabulary with tolerance for
//! plurals, qualifier prefixes ("WORK EXPERIENCE") and small typos.

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;
use tracing::debug;

use crate::analysis::dates::find_date_ranges;
use crate::analysis::features::parse_bullet;
use crate::errors::AnalysisError;
use crate::models::analysis::SectionLabel;
use crate::rubric::{normalize_heading, Rubric};

/// Words that may stay lower-case inside a title-case heading.
const HEADING_CONNECTORS: &[&str] = &["and", "of", "&", "in", "the", "for", "/"];

/// Maximum qualifier words allowed in front of a synonym ("RELEVANT WORK EXPERIENCE").
const MAX_QUALIFIER_WORDS: usize = 2;

/// Minimum letters for an unmatched all-caps line to count as a non-standard heading.
const MIN_UNRECOGNIZED_HEADER_LETTERS: usize = 4;

/// Non-empty lines searched below an all-caps line for the dates of a role.
const ROLE_DATE_LOOKAHEAD: usize = 2;

/// Sections whose entries open with an employer, title or project name.
const ROLE_SECTIONS: &[SectionLabel] = &[SectionLabel::Experience, SectionLabel::Projects];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub label: SectionLabel,
    /// Heading line as written. `None` for the implicit Contact section.
    pub heading: Option<String>,
    pub text: String,
    /// Byte offsets of `text` within the raw document.
    pub start: usize,
    pub end: usize,
}

/// An immutable, segmented resume. Edits produce a new document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub raw_text: String,
    pub sections: Vec<Section>,
    pub word_count: usize,
    pub recognized_headers: usize,
    pub unrecognized_headers: Vec<String>,
}

/// Where a heading was found and where its body begins.
struct Boundary {
    label: SectionLabel,
    heading: String,
    header_start: usize,
    body_start: usize,
}

/// Shape of a line that might be a heading.
struct HeadingShape {
    normalized: String,
    all_caps: bool,
    has_colon: bool,
    letters: usize,
}

/// Segments `text` into sections. Fails only when there are no words at all.
pub fn segment(text: &str, rubric: &Rubric) -> Result<ResumeDocument, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::MalformedDocument(
            "document is empty".to_string(),
        ));
    }
    let word_count = count_words(text);
    if word_count == 0 {
        return Err(AnalysisError::MalformedDocument(
            "document contains no extractable words".to_string(),
        ));
    }

    let mut lines = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        lines.push((offset, line));
        offset += line.len();
    }

    let mut boundaries: Vec<Boundary> = Vec::new();
    let mut unrecognized_headers = Vec::new();
    let mut recognized_headers = 0;

    for (index, &(line_start, line)) in lines.iter().enumerate() {
        let line_end = line_start + line.len();
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some((label, body_offset)) = match_inline_heading(trimmed, rubric) {
            let lead = line.len() - line.trim_start().len();
            recognized_headers += 1;
            boundaries.push(Boundary {
                label,
                heading: trimmed[..body_offset].trim_end_matches(':').trim().to_string(),
                header_start: line_start,
                body_start: line_start + lead + body_offset,
            });
            continue;
        }

        let Some(shape) = heading_shape(trimmed, rubric) else {
            continue;
        };

        if let Some(label) = match_heading(&shape, rubric) {
            recognized_headers += 1;
            boundaries.push(Boundary {
                label,
                heading: trimmed.trim_end_matches(':').trim().to_string(),
                header_start: line_start,
                body_start: line_end,
            });
        } else if recognized_headers > 0
            && shape.all_caps
            && shape.letters >= MIN_UNRECOGNIZED_HEADER_LETTERS
            && rubric.taxonomy().extract_skills(trimmed).is_empty()
        {
            let current = boundaries.last().map(|b| b.label);
            if current.is_some_and(|label| ROLE_SECTIONS.contains(&label))
                && is_followed_by_dates(&lines[index + 1..])
            {
                // "ACME CORPORATION" over "2018 - 2023" is a role, not a heading
                continue;
            }
            let heading = trimmed.trim_end_matches(':').trim().to_string();
            unrecognized_headers.push(heading.clone());
            boundaries.push(Boundary {
                label: SectionLabel::Other,
                heading,
                header_start: line_start,
                body_start: line_end,
            });
        }
    }

    let sections = if recognized_headers == 0 {
        vec![Section {
            label: SectionLabel::Other,
            heading: None,
            text: text.to_string(),
            start: 0,
            end: text.len(),
        }]
    } else {
        build_sections(text, &boundaries)
    };

    debug!(
        "Segmented document: {} words, {} sections, {} recognized headers, {} non-standard",
        word_count,
        sections.len(),
        recognized_headers,
        unrecognized_headers.len()
    );

    Ok(ResumeDocument {
        raw_text: text.to_string(),
        sections,
        word_count,
        recognized_headers,
        unrecognized_headers,
    })
}

/// Counts whitespace-delimited tokens that contain at least one letter or digit.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .count()
}

/// True when one of the next few non-empty lines carries a date range.
fn is_followed_by_dates(rest: &[(usize, &str)]) -> bool {
    rest.iter()
        .map(|(_, line)| line.trim())
        .filter(|line| !line.is_empty())
        .take(ROLE_DATE_LOOKAHEAD)
        .any(|line| !find_date_ranges(line).is_empty())
}

fn build_sections(text: &str, boundaries: &[Boundary]) -> Vec<Section> {
    let mut sections = Vec::with_capacity(boundaries.len() + 1);

    if let Some(first) = boundaries.first() {
        let preamble = &text[..first.header_start];
        if !preamble.trim().is_empty() {
            sections.push(Section {
                label: SectionLabel::Contact,
                heading: None,
                text: preamble.to_string(),
                start: 0,
                end: first.header_start,
            });
        }
    }

    for (i, boundary) in boundaries.iter().enumerate() {
        let end = boundaries
            .get(i + 1)
            .map_or(text.len(), |next| next.header_start);
        let start = boundary.body_start.min(end);
        sections.push(Section {
            label: boundary.label,
            heading: Some(boundary.heading.clone()),
            text: text[start..end].to_string(),
            start,
            end,
        });
    }

    sections
}

/// Returns the shape of `line` if it could be a heading at all.
fn heading_shape(line: &str, rubric: &Rubric) -> Option<HeadingShape> {
    if parse_bullet(line).is_some() || line.contains([',', '|', '@']) {
        return None;
    }
    let has_colon = line.ends_with(':');
    let core = line.trim_end_matches(':').trim();
    let cfg = &rubric.config().segmenter;

    let words: Vec<&str> = core.split_whitespace().collect();
    if words.is_empty() || words.len() > cfg.max_header_words {
        return None;
    }
    if core.chars().count() > cfg.max_header_chars || core.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let letters = core.chars().filter(|c| c.is_alphabetic()).count();
    if letters == 0 {
        return None;
    }
    let all_caps = core
        .chars()
        .filter(|c| c.is_alphabetic())
        .all(char::is_uppercase);
    let title_case = words.iter().all(|w| {
        HEADING_CONNECTORS.contains(&w.to_lowercase().as_str())
            || w.chars()
                .find(|c| c.is_alphabetic())
                .map_or(true, char::is_uppercase)
    });

    if !(all_caps || title_case || has_colon) {
        return None;
    }

    Some(HeadingShape {
        normalized: normalize_heading(core),
        all_caps,
        has_colon,
        letters,
    })
}

/// Matches a heading shape against the synonym vocabulary.
fn match_heading(shape: &HeadingShape, rubric: &Rubric) -> Option<SectionLabel> {
    let heading = stem_phrase(&shape.normalized);
    if heading.is_empty() {
        return None;
    }

    if let Some((label, _)) = rubric
        .headers()
        .iter()
        .find(|(_, synonym)| stem_phrase(synonym) == heading)
    {
        return Some(*label);
    }

    // Qualified headings ("PROFESSIONAL EXPERIENCE") only for strongly shaped lines;
    // a title-case job line like "Head of Customer Experience" must stay body text.
    if shape.all_caps || shape.has_colon {
        let heading_words: Vec<&str> = heading.split(' ').collect();
        let suffix_match = rubric.headers().iter().find(|(_, synonym)| {
            let synonym = stem_phrase(synonym);
            let synonym_words: Vec<&str> = synonym.split(' ').collect();
            heading_words.len() > synonym_words.len()
                && heading_words.len() - synonym_words.len() <= MAX_QUALIFIER_WORDS
                && heading_words.ends_with(&synonym_words)
        });
        if let Some((label, _)) = suffix_match {
            return Some(*label);
        }
    }

    let threshold = rubric.config().segmenter.header_similarity_threshold;
    rubric
        .headers()
        .iter()
        .map(|(label, synonym)| (*label, jaro_winkler(&shape.normalized, synonym)))
        .filter(|(_, similarity)| *similarity >= threshold)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(label, _)| label)
}

/// Matches "Skills: Rust, Python" style lines, where the heading shares a line with content.
/// Returns the label and the byte offset (within `line`) where the content begins.
fn match_inline_heading(line: &str, rubric: &Rubric) -> Option<(SectionLabel, usize)> {
    let colon = line.find(':')?;
    let (head, rest) = (&line[..colon], &line[colon + 1..]);
    if rest.trim().is_empty() || head.split_whitespace().count() > 3 {
        return None;
    }
    let head = stem_phrase(&normalize_heading(head));
    rubric
        .headers()
        .iter()
        .find(|(_, synonym)| stem_phrase(synonym) == head)
        .map(|(label, _)| (*label, colon + 1))
}

/// Trims a plural "s" from each word so "Certification" matches "certifications".
fn stem_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|w| {
            if w.len() > 3 && w.ends_with('s') && !w.ends_with("ss") {
                &w[..w.len() - 1]
            } else {
                w
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
