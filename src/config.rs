use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{GrantError, Result};
use crate::pipeline::score::ScoringCriteria;

/// Optional on-disk configuration. A missing file means defaults apply;
/// an unreadable or malformed file is a configuration error.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub criteria: ScoringCriteria,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("config.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            GrantError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_MAX_FUNDING;
    use std::io::Write;

    #[test]
    fn test_defaults_when_file_absent() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.criteria.issue_area, None);
        assert_eq!(config.criteria.min_funding, 0.0);
        assert_eq!(config.criteria.max_funding, DEFAULT_MAX_FUNDING);
    }

    #[test]
    fn test_parses_criteria_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[criteria]\nissue_area = \"sport\"\nmin_funding = 1000.0\nmax_funding = 10000.0"
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.criteria.issue_area.as_deref(), Some("sport"));
        assert_eq!(config.criteria.min_funding, 1000.0);
        assert_eq!(config.criteria.max_funding, 10000.0);
    }

    #[test]
    fn test_partial_criteria_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[criteria]\nissue_area = \"health\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.criteria.issue_area.as_deref(), Some("health"));
        assert_eq!(config.criteria.max_funding, DEFAULT_MAX_FUNDING);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[criteria\nnot toml").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
