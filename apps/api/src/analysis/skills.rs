//! Skill taxonomy matcher: maps surface forms in free text onto canonical skill names.
//!
//! Matching is greedy and longest-alias-first at token boundaries, so "Node.js" is
//! captured whole instead of as "Node" plus "JS".

use std::collections::{BTreeMap, BTreeSet, HashMap};

use aho_corasick::{AhoCorasick, Anchored, Input, MatchKind, StartKind};
use tracing::debug;

use crate::errors::RubricError;
use crate::rubric::RubricWarning;

#[derive(Debug)]
pub struct SkillTaxonomy {
    matcher: AhoCorasick,
    /// Pattern index → index into `canonical`.
    pattern_canonical: Vec<usize>,
    canonical: Vec<String>,
    canonical_index: HashMap<String, usize>,
    alias_lookup: HashMap<String, usize>,
}

impl SkillTaxonomy {
    /// Builds the matcher from a canonical → aliases table.
    /// An alias claimed by two canonical names stays with the first one.
    pub fn build(
        taxonomy: &BTreeMap<String, Vec<String>>,
    ) -> Result<(Self, Vec<RubricWarning>), RubricError> {
        let mut warnings = Vec::new();
        let mut canonical = Vec::new();
        let mut canonical_index = HashMap::new();
        let mut alias_lookup: HashMap<String, usize> = HashMap::new();
        let mut patterns = Vec::new();
        let mut pattern_canonical = Vec::new();

        for (name, aliases) in taxonomy {
            let idx = canonical.len();
            canonical.push(name.clone());
            canonical_index.insert(name.clone(), idx);

            for alias in std::iter::once(name).chain(aliases.iter()) {
                let normalized = normalize_alias(alias);
                if normalized.is_empty() {
                    continue;
                }
                match alias_lookup.get(&normalized) {
                    Some(&existing) if existing == idx => {}
                    Some(&existing) => warnings.push(RubricWarning::DuplicateAlias {
                        alias: normalized,
                        kept: canonical[existing].clone(),
                        dropped: name.clone(),
                    }),
                    None => {
                        alias_lookup.insert(normalized.clone(), idx);
                        patterns.push(normalized);
                        pattern_canonical.push(idx);
                    }
                }
            }
        }

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .start_kind(StartKind::Anchored)
            .build(&patterns)
            .map_err(|e| RubricError::Matcher(e.to_string()))?;

        debug!(
            "Skill taxonomy built: {} canonical skills, {} aliases",
            canonical.len(),
            patterns.len()
        );

        Ok((
            Self {
                matcher,
                pattern_canonical,
                canonical,
                canonical_index,
                alias_lookup,
            },
            warnings,
        ))
    }

    /// Extracts the set of canonical skills mentioned in `text`.
    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        let haystack = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let chars: Vec<(usize, char)> = haystack.char_indices().collect();

        let mut found = BTreeSet::new();
        let mut resume_at = 0;

        for (i, &(pos, ch)) in chars.iter().enumerate() {
            if pos < resume_at || ch.is_whitespace() {
                continue;
            }
            if i > 0 && chars[i - 1].1.is_alphanumeric() {
                continue;
            }
            if let Some((idx, end)) = self.longest_at(&haystack, pos) {
                found.insert(self.canonical[idx].clone());
                resume_at = end;
            }
        }

        found
    }

    /// Longest alias anchored at `start` that also ends on a token boundary.
    fn longest_at(&self, haystack: &str, start: usize) -> Option<(usize, usize)> {
        let mut limit = haystack.len();
        while limit > start {
            let input = Input::new(haystack)
                .span(start..limit)
                .anchored(Anchored::Yes);
            let m = self.matcher.find(input)?;
            if ends_on_boundary(haystack, m.end()) {
                return Some((self.pattern_canonical[m.pattern().as_usize()], m.end()));
            }
            limit = m.end() - 1;
        }
        None
    }

    /// Resolves a skill name or alias to its canonical form.
    pub fn canonicalize(&self, name: &str) -> Option<&str> {
        self.alias_lookup
            .get(&normalize_alias(name))
            .map(|&idx| self.canonical[idx].as_str())
    }

    pub fn contains_canonical(&self, name: &str) -> bool {
        self.canonical_index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

fn normalize_alias(alias: &str) -> String {
    alias
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn ends_on_boundary(haystack: &str, end: usize) -> bool {
    haystack
        .get(end..)
        .and_then(|rest| rest.chars().next())
        .map_or(true, |c| !c.is_alphanumeric())
}
