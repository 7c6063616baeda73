use std::path::PathBuf;

use anyhow::{Context, Result};
use regex::Regex;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub skills_file: Option<PathBuf>,
    pub resume_dir: PathBuf,
    pub ranking_output_dir: PathBuf,
    pub ranking_multiproc: bool,
    pub phone_pattern: Option<Regex>,
    pub entity_model_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let path_or = |key: &str, default: &str| {
            PathBuf::from(lookup(key).unwrap_or_else(|| default.to_string()))
        };
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let phone_pattern = optional("PHONE_PATTERN")
            .map(|pattern| {
                Regex::new(&pattern)
                    .with_context(|| format!("PHONE_PATTERN '{pattern}' is not a valid regex"))
            })
            .transpose()?;

        Ok(Config {
            data_dir: path_or("RESPARSER_DATA_DIR", "./data"),
            skills_file: optional("RESPARSER_SKILLS_FILE").map(PathBuf::from),
            resume_dir: path_or("RESUME_DIR", "./resumes"),
            ranking_output_dir: path_or("RANKING_OUTPUT_DIR", "."),
            ranking_multiproc: lookup("RANKING_MULTIPROC")
                .unwrap_or_else(|| "true".to_string())
                .parse::<bool>()
                .context("RANKING_MULTIPROC must be 'true' or 'false'")?,
            phone_pattern,
            entity_model_url: optional("ENTITY_MODEL_URL"),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
impl Config {
    /// Defaults, with data and resumes pointed at the given directories.
    pub fn for_tests(data_dir: PathBuf, resume_dir: PathBuf) -> Self {
        Config {
            data_dir,
            resume_dir,
            ..Self::from_lookup(|_| None).unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.resume_dir, PathBuf::from("./resumes"));
        assert_eq!(config.ranking_output_dir, PathBuf::from("."));
        assert!(config.ranking_multiproc);
        assert!(config.phone_pattern.is_none());
        assert!(config.skills_file.is_none());
        assert!(config.entity_model_url.is_none());
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("RESUME_DIR", "/srv/resumes"),
            ("RANKING_MULTIPROC", "false"),
            ("PHONE_PATTERN", r"(\d{3})-(\d{4})"),
            ("ENTITY_MODEL_URL", "http://localhost:9000/entities"),
            ("PORT", "3000"),
        ])
        .unwrap();
        assert_eq!(config.resume_dir, PathBuf::from("/srv/resumes"));
        assert!(!config.ranking_multiproc);
        assert!(config.phone_pattern.is_some());
        assert_eq!(
            config.entity_model_url.as_deref(),
            Some("http://localhost:9000/entities")
        );
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_blank_optional_values_are_unset() {
        let config = config_from(&[("PHONE_PATTERN", " "), ("ENTITY_MODEL_URL", "")]).unwrap();
        assert!(config.phone_pattern.is_none());
        assert!(config.entity_model_url.is_none());
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(config_from(&[("PORT", "http")]).is_err());
        assert!(config_from(&[("RANKING_MULTIPROC", "yes")]).is_err());
        assert!(config_from(&[("PHONE_PATTERN", "(unclosed")]).is_err());
    }
}
