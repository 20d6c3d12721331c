//! Date range parsing and tenure arithmetic for experience scoring.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";

static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    let endpoint = format!(r"(?:{MONTH}\s+|\d{{1,2}}/)?(?:19|20)\d{{2}}");
    Regex::new(&format!(
        r"(?i)\b(?P<start>{endpoint})\s*(?:-|–|—|\bto\b|\buntil\b)\s*(?P<end>present\b|current\b|now\b|today\b|{endpoint})\b"
    ))
    .expect("date range regex is valid")
});

static ENDPOINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^(?:(?P<month_name>{MONTH})\s+|(?P<month_num>\d{{1,2}})/)?(?P<year>(?:19|20)\d{{2}})$"
    ))
    .expect("date endpoint regex is valid")
});

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year regex is valid"));

/// A span of time found in resume text. `end == None` means "Present".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

/// Finds every `start – end` range in `text`. Year-only endpoints resolve to January.
pub fn find_date_ranges(text: &str) -> Vec<DateRange> {
    DATE_RANGE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let start = parse_endpoint(caps.name("start")?.as_str())?;
            let end_raw = caps.name("end")?.as_str();
            let end = if is_present(end_raw) {
                None
            } else {
                Some(parse_endpoint(end_raw)?)
            };
            Some(DateRange { start, end })
        })
        .collect()
}

/// True when `text` mentions a plausible calendar year.
pub fn contains_year(text: &str) -> bool {
    YEAR_RE.is_match(text)
}

/// True for a four-digit token in 1900 – 2099.
pub fn is_year_token(digits: &str) -> bool {
    digits.len() == 4 && (digits.starts_with("19") || digits.starts_with("20"))
}

fn is_present(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "present" | "current" | "now" | "today"
    )
}

fn parse_endpoint(raw: &str) -> Option<NaiveDate> {
    let caps = ENDPOINT_RE.captures(raw.trim())?;
    let year: i32 = caps.name("year")?.as_str().parse().ok()?;
    let month = if let Some(name) = caps.name("month_name") {
        month_from_name(name.as_str())?
    } else if let Some(num) = caps.name("month_num") {
        num.as_str().parse::<u32>().ok().filter(|m| (1..=12).contains(m))?
    } else {
        1
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.to_ascii_lowercase().chars().take(3).collect();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

/// Total months covered by the union of `ranges`, resolving "Present" to `as_of`.
/// Overlapping roles are counted once; inverted ranges are ignored.
pub fn total_months(ranges: &[DateRange], as_of: NaiveDate) -> u32 {
    let mut spans: Vec<(i32, i32)> = ranges
        .iter()
        .map(|r| {
            let start = month_index(r.start);
            let end = month_index(r.end.unwrap_or(as_of));
            (start, end)
        })
        .filter(|(start, end)| end > start)
        .collect();
    spans.sort_unstable();

    let mut total = 0;
    let mut current: Option<(i32, i32)> = None;
    for (start, end) in spans {
        current = match current {
            Some((cs, ce)) if start <= ce => Some((cs, ce.max(end))),
            Some((cs, ce)) => {
                total += ce - cs;
                Some((start, end))
            }
            None => Some((start, end)),
        };
    }
    if let Some((cs, ce)) = current {
        total += ce - cs;
    }
    total.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn test_year_to_year_range() {
        let ranges = find_date_ranges("Software Engineer | StartupCo\n2018 - 2020");
        assert_eq!(
            ranges,
            vec![DateRange {
                start: ymd(2018, 1),
                end: Some(ymd(2020, 1))
            }]
        );
    }

    #[test]
    fn test_en_dash_and_present() {
        let ranges = find_date_ranges("Tech Corp, 2020–Present");
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].end, None);
        assert_eq!(ranges[0].start, ymd(2020, 1));
    }

    #[test]
    fn test_month_name_range() {
        let ranges = find_date_ranges("Jan 2019 to Sept. 2021");
        assert_eq!(ranges[0].start, ymd(2019, 1));
        assert_eq!(ranges[0].end, Some(ymd(2021, 9)));
    }

    #[test]
    fn test_numeric_month_range() {
        let ranges = find_date_ranges("03/2017 - 11/2019");
        assert_eq!(ranges[0].start, ymd(2017, 3));
        assert_eq!(ranges[0].end, Some(ymd(2019, 11)));
    }

    #[test]
    fn test_current_keyword() {
        let ranges = find_date_ranges("March 2022 — Current");
        assert_eq!(ranges[0].start, ymd(2022, 3));
        assert_eq!(ranges[0].end, None);
    }

    #[test]
    fn test_single_year_is_not_a_range() {
        assert!(find_date_ranges("University of Technology, 2018").is_empty());
    }

    #[test]
    fn test_total_months_merges_overlaps() {
        let as_of = ymd(2024, 1);
        let ranges = vec![
            DateRange {
                start: ymd(2018, 1),
                end: Some(ymd(2020, 1)),
            },
            DateRange {
                start: ymd(2019, 1),
                end: Some(ymd(2021, 1)),
            },
        ];
        assert_eq!(total_months(&ranges, as_of), 36);
    }

    #[test]
    fn test_total_months_resolves_present() {
        let as_of = ymd(2023, 1);
        let ranges = vec![
            DateRange {
                start: ymd(2018, 1),
                end: Some(ymd(2020, 1)),
            },
            DateRange {
                start: ymd(2020, 1),
                end: None,
            },
        ];
        assert_eq!(total_months(&ranges, as_of), 60);
    }

    #[test]
    fn test_total_months_ignores_inverted_ranges() {
        let ranges = vec![DateRange {
            start: ymd(2022, 1),
            end: Some(ymd(2020, 1)),
        }];
        assert_eq!(total_months(&ranges, ymd(2024, 1)), 0);
    }

    #[test]
    fn test_year_helpers() {
        assert!(contains_year("Class of 2016"));
        assert!(!contains_year("Room 101"));
        assert!(is_year_token("2019"));
        assert!(!is_year_token("5000"));
    }
}
