mod api;
mod inspector;
mod logging;

pub use api::*;
pub use inspector::*;
pub use logging::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub inspector: InspectorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.api.page_size == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "api.page_size".into(),
                message: "page_size must be greater than 0".into(),
            });
        }

        if self.api.timeout_ms == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "api.timeout_ms".into(),
                message: "timeout_ms must be greater than 0".into(),
            });
        }

        if let Some(ref url) = self.api.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: "api.base_url".into(),
                    message: format!("base_url must be an http(s) URL, got {url:?}"),
                });
            }
        }

        if let Some(ref agent_id) = self.inspector.agent_id {
            if !is_agent_id(agent_id) {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: "inspector.agent_id".into(),
                    message: format!(
                        "expected projects/<project>/locations/<location>/agents/<agent>, got {agent_id:?}"
                    ),
                });
            }
        }

        // Sweeps still work without pacing, but bursts may trip quotas.
        if self.inspector.page_scan_delay_ms == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "inspector.page_scan_delay_ms".into(),
                message: "page scans are not paced; large sweeps may hit rate limits".into(),
            });
        }

        errors
    }
}

/// `true` when `id` has the shape
/// `projects/<project>/locations/<location>/agents/<agent>`.
pub fn is_agent_id(id: &str) -> bool {
    let parts: Vec<&str> = id.split('/').collect();
    parts.len() == 6
        && parts[0] == "projects"
        && parts[2] == "locations"
        && parts[4] == "agents"
        && parts.iter().all(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn agent_id_shape() {
        assert!(is_agent_id("projects/p/locations/global/agents/a1"));
        assert!(!is_agent_id("projects/p/locations/global/agents/"));
        assert!(!is_agent_id("projects/p/agents/a1"));
        assert!(!is_agent_id("projects/p/locations/global/agents/a1/flows/f"));
    }

    #[test]
    fn validate_reports_bad_fields() {
        let mut cfg = Config::default();
        cfg.api.page_size = 0;
        cfg.api.base_url = Some("dialogflow.googleapis.com".into());
        cfg.inspector.agent_id = Some("agents/a1".into());
        cfg.inspector.page_scan_delay_ms = 0;

        let issues = cfg.validate();
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "api.page_size",
                "api.base_url",
                "inspector.agent_id",
                "inspector.page_scan_delay_ms"
            ]
        );
        assert_eq!(issues[3].severity, ConfigSeverity::Warning);
    }

    #[test]
    fn display_includes_severity_tag() {
        let issue = ConfigError {
            severity: ConfigSeverity::Warning,
            field: "inspector.page_scan_delay_ms".into(),
            message: "not paced".into(),
        };
        assert_eq!(
            issue.to_string(),
            "[WARN] inspector.page_scan_delay_ms: not paced"
        );
    }
}
