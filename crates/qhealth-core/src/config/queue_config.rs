//! Queue health thresholds and roster exclusions.
//!
//! Every threshold is optional in the serialized form; compiled defaults
//! come from the team's accountability framework and are exposed through
//! the `effective_*` accessors. The exclusion list (admin and service
//! accounts that must not appear as agents) is injected here rather than
//! hardcoded so deployments can vary roster composition.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::collections::FxHashSet;

/// Configuration for aggregation, classification, and alerting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QueueConfig {
    /// Soft limit on open conversations per agent. Default: 5.
    pub max_open_soft: Option<u32>,
    /// Soft limit on waiting-on-agent snoozed conversations. Default: 5.
    pub max_waiting_soft: Option<u32>,
    /// Open-count alert threshold. Default: 6.
    pub max_open_alert: Option<u32>,
    /// Waiting-on-agent alert threshold. Default: 7.
    pub max_waiting_alert: Option<u32>,
    /// Margin above an alert threshold at which severity becomes high. Default: 3.
    pub high_severity_margin: Option<u32>,
    /// Hours a waiting-on-agent snooze may age before the conversation is a
    /// reassignment candidate. Default: 48.
    pub reassignment_hours: Option<u32>,
    /// Hours since last customer contact before a customer-wait snooze is a
    /// closure candidate. Default: 24.
    pub closure_checkin_hours: Option<u32>,
    /// Days since last customer contact at which closure is overdue. Default: 3.
    pub closure_warning_days: Option<u32>,
    /// Display names of admin/service accounts excluded from aggregation.
    #[serde(default)]
    pub excluded_names: Vec<String>,
}

impl QueueConfig {
    /// Effective soft limit on open conversations, defaulting to 5.
    pub fn effective_max_open_soft(&self) -> u32 {
        self.max_open_soft.unwrap_or(5)
    }

    /// Effective soft limit on waiting-on-agent conversations, defaulting to 5.
    pub fn effective_max_waiting_soft(&self) -> u32 {
        self.max_waiting_soft.unwrap_or(5)
    }

    /// Effective open-count alert threshold, defaulting to 6.
    pub fn effective_max_open_alert(&self) -> u32 {
        self.max_open_alert.unwrap_or(6)
    }

    /// Effective waiting-on-agent alert threshold, defaulting to 7.
    pub fn effective_max_waiting_alert(&self) -> u32 {
        self.max_waiting_alert.unwrap_or(7)
    }

    /// Effective high-severity margin, defaulting to 3.
    pub fn effective_high_severity_margin(&self) -> u32 {
        self.high_severity_margin.unwrap_or(3)
    }

    /// Effective reassignment age in hours, defaulting to 48.
    pub fn effective_reassignment_hours(&self) -> u32 {
        self.reassignment_hours.unwrap_or(48)
    }

    /// Effective closure check-in age in hours, defaulting to 24.
    pub fn effective_closure_checkin_hours(&self) -> u32 {
        self.closure_checkin_hours.unwrap_or(24)
    }

    /// Effective closure warning age in days, defaulting to 3.
    pub fn effective_closure_warning_days(&self) -> u32 {
        self.closure_warning_days.unwrap_or(3)
    }

    /// The exclusion list as a set for O(1) membership checks during the
    /// aggregation fold.
    pub fn exclusion_set(&self) -> FxHashSet<&str> {
        self.excluded_names.iter().map(String::as_str).collect()
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing and embedding).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate threshold consistency.
    ///
    /// Alert thresholds must sit strictly above the soft limits; a config
    /// where they do not is a programmer error and fails fast.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.effective_max_open_alert() <= self.effective_max_open_soft() {
            return Err(ConfigError::ValidationFailed {
                field: "max_open_alert".to_string(),
                message: format!(
                    "must exceed max_open_soft ({})",
                    self.effective_max_open_soft()
                ),
            });
        }
        if self.effective_max_waiting_alert() <= self.effective_max_waiting_soft() {
            return Err(ConfigError::ValidationFailed {
                field: "max_waiting_alert".to_string(),
                message: format!(
                    "must exceed max_waiting_soft ({})",
                    self.effective_max_waiting_soft()
                ),
            });
        }
        if self.effective_high_severity_margin() == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "high_severity_margin".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
