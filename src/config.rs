use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::analysis::TOP_ISSUE_LIMIT;
use crate::words::DEFAULT_WORD_LIMIT;

pub const CONFIG_ENV: &str = "SURVEY_PULSE_CONFIG";
pub const LOG_ENV: &str = "SURVEY_PULSE_LOG";
pub const LOG_JSON_ENV: &str = "SURVEY_PULSE_LOG_JSON";
pub const TOP_WORDS_ENV: &str = "SURVEY_PULSE_TOP_WORDS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub top_words: usize,
    pub top_issues: usize,
    pub table_limit: Option<usize>,
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            top_words: DEFAULT_WORD_LIMIT,
            top_issues: TOP_ISSUE_LIMIT,
            table_limit: None,
            log_json: false,
        }
    }
}

impl Settings {
    /// Defaults, then the JSON file if one is named, then environment
    /// overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path: Option<PathBuf> = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut settings = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(TOP_WORDS_ENV) {
            self.top_words = value
                .trim()
                .parse()
                .with_context(|| format!("{TOP_WORDS_ENV} must be a non-negative integer, got {value:?}"))?;
        }
        if let Some(value) = lookup(LOG_JSON_ENV) {
            self.log_json = parse_flag(&value)
                .with_context(|| format!("{LOG_JSON_ENV} must be true or false, got {value:?}"))?;
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_match_dashboard_constants() {
        let settings = Settings::default();
        assert_eq!(settings.top_words, 50);
        assert_eq!(settings.top_issues, 3);
        assert_eq!(settings.table_limit, None);
        assert!(!settings.log_json);
    }

    #[test]
    fn file_values_fill_in_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"top_words": 10, "table_limit": 25}}"#).unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.top_words, 10);
        assert_eq!(settings.table_limit, Some(25));
        assert_eq!(settings.top_issues, 3);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"colour": "red"}}"#).unwrap();
        assert!(Settings::from_file(file.path()).is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [(TOP_WORDS_ENV, " 7 "), (LOG_JSON_ENV, "yes")].into();
        let mut settings = Settings::default();
        settings
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(settings.top_words, 7);
        assert!(settings.log_json);
    }

    #[test]
    fn bad_env_values_are_errors() {
        let mut settings = Settings::default();
        let err = settings
            .apply_env(|key| (key == TOP_WORDS_ENV).then(|| "lots".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(TOP_WORDS_ENV));
        assert!(err.to_string().contains("non-negative integer"));
    }

    #[test]
    fn zero_top_words_is_accepted() {
        let mut settings = Settings::default();
        settings
            .apply_env(|key| (key == TOP_WORDS_ENV).then(|| "0".to_string()))
            .unwrap();
        assert_eq!(settings.top_words, 0);
    }
}
