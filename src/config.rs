//! Registry configuration.
//!
//! Loaded from TOML; every field is optional and falls back to the defaults
//! below.
//!
//! ```toml
//! deadzone = 0.125
//! ps4_aliases = ["Wireless Controller", "054c-05c4-Wireless Controller"]
//! # probe_timeout_ticks = 600
//! ```

use crate::classifier::DEFAULT_PS4_ALIASES;
use crate::controller::DEADZONE;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Analog deadzone applied by `get_axis`.
    pub deadzone: f32,

    /// Device names classified as PS4 pads.
    pub ps4_aliases: Vec<String>,

    /// Abandon a readiness probe after this many neutral ticks.
    /// `None` waits indefinitely.
    pub probe_timeout_ticks: Option<u32>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            deadzone: DEADZONE,
            ps4_aliases: DEFAULT_PS4_ALIASES.iter().map(|s| s.to_string()).collect(),
            probe_timeout_ticks: None,
        }
    }
}

impl RegistryConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.deadzone) {
            return Err(ConfigError::InvalidDeadzone(self.deadzone));
        }
        if self.probe_timeout_ticks == Some(0) {
            return Err(ConfigError::ZeroProbeTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = RegistryConfig::from_toml_str("").unwrap();
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.deadzone, 0.125);
        assert_eq!(config.probe_timeout_ticks, None);
    }

    #[test]
    fn overrides_are_applied() {
        let config = RegistryConfig::from_toml_str(
            r#"
            deadzone = 0.2
            ps4_aliases = ["DUALSHOCK 4"]
            probe_timeout_ticks = 120
            "#,
        )
        .unwrap();
        assert_eq!(config.deadzone, 0.2);
        assert_eq!(config.ps4_aliases, vec!["DUALSHOCK 4".to_string()]);
        assert_eq!(config.probe_timeout_ticks, Some(120));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            RegistryConfig::from_toml_str("deadzone = 1.5"),
            Err(ConfigError::InvalidDeadzone(_))
        ));
        assert!(matches!(
            RegistryConfig::from_toml_str("probe_timeout_ticks = 0"),
            Err(ConfigError::ZeroProbeTimeout)
        ));
        assert!(matches!(
            RegistryConfig::from_toml_str("deadzone = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = RegistryConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
