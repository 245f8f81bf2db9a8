//! Configuration loading and management

use crate::core::auth::Grant;
use crate::core::error::{ConfigError, FleetResult};
use serde::{Deserialize, Serialize};

/// Settings for the outbound API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the cars backend
    pub base_url: String,

    /// Request timeout in seconds; timeout policy lives here, not in flows
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Complete configuration for the admin application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// API client settings
    pub api: ApiConfig,

    /// Grants for the session, as `service:entity:operation` strings
    #[serde(default)]
    pub grants: Vec<String>,
}

impl AdminConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> FleetResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_string(),
                }
            } else {
                ConfigError::IoError {
                    message: e.to_string(),
                }
            }
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> FleetResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Parse the configured grant strings, rejecting malformed entries
    pub fn parsed_grants(&self) -> FleetResult<Vec<Grant>> {
        self.grants
            .iter()
            .map(|s| {
                Grant::parse(s).ok_or_else(|| {
                    ConfigError::InvalidValue {
                        field: "grants".to_string(),
                        value: s.clone(),
                        message: "expected service:entity:operation".to_string(),
                    }
                    .into()
                })
            })
            .collect()
    }

    /// A default configuration for tests and demos
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:3000".to_string(),
                timeout_secs: default_timeout_secs(),
            },
            grants: vec![
                "project:car:create".to_string(),
                "project:car:read".to_string(),
                "project:organization:read".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::{AccessOperation, AccessService};

    #[test]
    fn test_default_config_parses_cleanly() {
        let config = AdminConfig::default_config();
        let grants = config.parsed_grants().expect("defaults are well-formed");
        assert_eq!(grants.len(), 3);
        assert_eq!(grants[0].service, AccessService::Project);
        assert_eq!(grants[0].entity, "car");
        assert_eq!(grants[0].operation, AccessOperation::Create);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = AdminConfig::default_config();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = AdminConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed.api.base_url, config.api.base_url);
        assert_eq!(parsed.grants, config.grants);
    }

    #[test]
    fn test_timeout_defaults_when_omitted() {
        let yaml = "api:\n  base_url: http://localhost:8080\n";
        let config = AdminConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.grants.is_empty());
    }

    #[test]
    fn test_malformed_grant_is_rejected() {
        let yaml = "api:\n  base_url: http://localhost:8080\ngrants:\n  - project:car:drive\n";
        let config = AdminConfig::from_yaml_str(yaml).unwrap();
        assert!(config.parsed_grants().is_err());
    }

    #[test]
    fn test_from_yaml_file_reports_missing_file() {
        let result = AdminConfig::from_yaml_file("/does/not/exist.yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_yaml_file_reads_written_config() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let yaml = serde_yaml::to_string(&AdminConfig::default_config()).unwrap();
        file.write_all(yaml.as_bytes()).expect("write config");

        let path = file.path().to_str().expect("utf-8 path");
        let config = AdminConfig::from_yaml_file(path).expect("config loads");
        assert_eq!(config.api.base_url, "http://localhost:3000");
    }
}
