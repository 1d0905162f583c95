//! Configuration for the classifier

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Generic words and phrases that are never a company name
pub const DEFAULT_DENYLIST: &[&str] = &[
    "senior",
    "engineer",
    "thank you",
    "application",
    "applying",
    "your company",
    "interest",
    "infra",
];

/// Sender prefixes whose remainder is taken as the company domain
pub const DEFAULT_NOREPLY_PREFIXES: &[&str] = &["no-reply@", "gh-no-reply@"];

/// Configuration for the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Maximum number of emails classified at the same time
    pub max_concurrency: usize,

    /// Maximum time for a single extraction call (seconds)
    pub extraction_timeout_secs: u64,

    /// The applicant's own names; a candidate containing one is rejected
    pub applicant_names: Vec<String>,

    /// Additional denylist terms
    pub extra_denylist: Vec<String>,

    /// No-reply sender prefixes
    pub noreply_prefixes: Vec<String>,
}

impl ClassifierConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Full denylist: applicant names, built-in terms, then extra terms
    pub fn denylist(&self) -> Vec<String> {
        self.applicant_names
            .iter()
            .cloned()
            .chain(DEFAULT_DENYLIST.iter().map(|term| term.to_string()))
            .chain(self.extra_denylist.iter().cloned())
            .collect()
    }

    /// Append the applicant's names from `APPLICANT_FIRST_NAME` / `APPLICANT_LAST_NAME`
    pub fn with_env_applicant(mut self) -> Self {
        for var in ["APPLICANT_FIRST_NAME", "APPLICANT_LAST_NAME"] {
            if let Ok(name) = std::env::var(var) {
                let name = name.trim();
                if !name.is_empty() && !self.applicant_names.iter().any(|n| n == name) {
                    self.applicant_names.push(name.to_string());
                }
            }
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be greater than 0".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 5,
            extraction_timeout_secs: 15,
            applicant_names: Vec::new(),
            extra_denylist: Vec::new(),
            noreply_prefixes: DEFAULT_NOREPLY_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClassifierConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_concurrency, 5);
        assert_eq!(config.extraction_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_invalid_values() {
        let mut config = ClassifierConfig::default();
        config.max_concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = ClassifierConfig::default();
        config.extraction_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_denylist_order() {
        let config = ClassifierConfig {
            applicant_names: vec!["Jane".to_string()],
            extra_denylist: vec!["sentaur".to_string()],
            ..Default::default()
        };

        let denylist = config.denylist();
        assert_eq!(denylist.first().map(String::as_str), Some("Jane"));
        assert_eq!(denylist.last().map(String::as_str), Some("sentaur"));
        assert!(denylist.iter().any(|t| t == "thank you"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ClassifierConfig::from_toml("max_concurrency = 2\napplicant_names = [\"Jane\"]").unwrap();
        assert_eq!(config.max_concurrency, 2);
        assert_eq!(config.extraction_timeout_secs, 15);
        assert_eq!(config.noreply_prefixes, vec!["no-reply@", "gh-no-reply@"]);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ClassifierConfig {
            applicant_names: vec!["Jane".to_string(), "Doe".to_string()],
            ..Default::default()
        };
        let toml_str = config.to_toml().unwrap();
        let parsed = ClassifierConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
