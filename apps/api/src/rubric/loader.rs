//! Rubric file loading. Any field left out of the JSON file keeps its built-in default.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::errors::RubricError;
use crate::rubric::{Rubric, RubricConfig};

pub fn load_rubric_config(path: &Path) -> Result<RubricConfig, RubricError> {
    let raw = fs::read_to_string(path).map_err(|source| RubricError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| RubricError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads and compiles the rubric at `path`, or the built-in rubric when `path` is `None`.
pub fn load_rubric(path: Option<&Path>) -> Result<Rubric, RubricError> {
    let rubric = match path {
        Some(path) => {
            let rubric = Rubric::compile(load_rubric_config(path)?)?;
            info!("Rubric loaded from {}", path.display());
            rubric
        }
        None => {
            let rubric = Rubric::builtin()?;
            info!("Using built-in rubric");
            rubric
        }
    };
    info!(
        "Rubric ready: {} skills, {} industry profiles, {} warnings",
        rubric.taxonomy().len(),
        rubric.industry_profiles().len(),
        rubric.warnings().len()
    );
    Ok(rubric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    use crate::rubric::RubricWarning;

    fn write_json(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_json(r#"{ "skills": { "points_per_skill": 25 } }"#);
        let config = load_rubric_config(file.path()).unwrap();
        assert_eq!(config.skills.points_per_skill, 25);
        assert_eq!(config.readability, RubricConfig::default().readability);
        assert_eq!(config.skill_taxonomy, RubricConfig::default().skill_taxonomy);
    }

    #[test]
    fn test_unknown_references_become_warnings() {
        let file = write_json(
            r#"{
                "section_header_synonyms": { "hobbies": ["interests"] },
                "industry_profiles": [
                    { "name": "Games", "weighted_skills": { "Unity": 1.0, "C++": 0.8 } }
                ]
            }"#,
        );
        let rubric = load_rubric(Some(file.path())).unwrap();
        let references: Vec<&str> = rubric
            .warnings()
            .iter()
            .filter_map(|w| match w {
                RubricWarning::UnknownConfigReference { reference, .. } => Some(reference.as_str()),
                _ => None,
            })
            .collect();
        assert!(references.contains(&"hobbies"));
        assert!(references.contains(&"Unity"));
        assert_eq!(rubric.industry_profiles().len(), 1);
        assert_eq!(rubric.industry_profiles()[0].weighted_skills.len(), 1);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let file = write_json("{ not json");
        assert!(matches!(
            load_rubric(Some(file.path())),
            Err(RubricError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("rubric.json");
        assert!(matches!(
            load_rubric_config(&missing),
            Err(RubricError::Io { .. })
        ));
    }

    #[test]
    fn test_no_path_uses_builtin() {
        let rubric = load_rubric(None).unwrap();
        assert!(rubric.warnings().is_empty());
        assert!(!rubric.taxonomy().is_empty());
    }
}
