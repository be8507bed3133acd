//! Runtime configuration for platform adapters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notifications::{DEFAULT_NOTIFICATION_AUTO_CLOSE_MS, DEFAULT_NOTIFICATION_TAG};

/// Path, relative to the page, that serves the deployed build identifier.
pub const DEFAULT_VERSION_PATH: &str = "version";
/// Interval between unattended update polls (10 minutes).
pub const DEFAULT_UPDATE_POLL_INTERVAL_MS: u32 = 10 * 60 * 1000;
/// Badge background for the unread count.
pub const DEFAULT_BADGE_COLOR: &str = "#d00";
/// Badge background while the error flag is raised.
pub const DEFAULT_BADGE_ERROR_COLOR: &str = "#f00";

/// Errors raised when a configuration document is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for [`PlatformConfig`].
    #[error("platform config parse failed: {0}")]
    Parse(String),
    /// A field holds a value the adapter cannot work with.
    #[error("platform config field `{field}` is invalid: {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// Human-readable reason.
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Tunables for notification, badge and version behavior.
pub struct PlatformConfig {
    /// Version endpoint path, joined onto the page URL.
    pub version_path: String,
    /// Interval between unattended update polls.
    pub update_poll_interval_ms: u32,
    /// Auto-close delay for displayed notifications.
    pub notification_auto_close_ms: u32,
    /// Tag shared by all notifications.
    pub notification_tag: String,
    /// Badge colors.
    pub badge_colors: BadgeColors,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            version_path: DEFAULT_VERSION_PATH.to_string(),
            update_poll_interval_ms: DEFAULT_UPDATE_POLL_INTERVAL_MS,
            notification_auto_close_ms: DEFAULT_NOTIFICATION_AUTO_CLOSE_MS,
            notification_tag: DEFAULT_NOTIFICATION_TAG.to_string(),
            badge_colors: BadgeColors::default(),
        }
    }
}

impl PlatformConfig {
    /// Parses and validates a JSON configuration document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the JSON is malformed or a field fails validation.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks field invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version_path.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "versionPath",
                reason: "must not be empty",
            });
        }
        if self.update_poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "updatePollIntervalMs",
                reason: "must be greater than zero",
            });
        }
        if self.notification_auto_close_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "notificationAutoCloseMs",
                reason: "must be greater than zero",
            });
        }
        if self.notification_tag.is_empty() {
            return Err(ConfigError::Invalid {
                field: "notificationTag",
                reason: "must not be empty",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Background colors used by the badge render rule.
pub struct BadgeColors {
    /// Color behind the unread count.
    pub count: String,
    /// Color behind the error glyph or count while the error flag is raised.
    pub error: String,
}

impl Default for BadgeColors {
    fn default() -> Self {
        Self {
            count: DEFAULT_BADGE_COLOR.to_string(),
            error: DEFAULT_BADGE_ERROR_COLOR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = PlatformConfig::from_json("{}").expect("config");
        assert_eq!(config, PlatformConfig::default());
        assert_eq!(config.notification_auto_close_ms, 5_000);
        assert_eq!(config.update_poll_interval_ms, 600_000);
        assert_eq!(config.notification_tag, "vector");
    }

    #[test]
    fn partial_document_overrides_named_fields() {
        let config = PlatformConfig::from_json(
            r##"{"versionPath":"build/version","badgeColors":{"error":"#a00"}}"##,
        )
        .expect("config");
        assert_eq!(config.version_path, "build/version");
        assert_eq!(config.badge_colors.error, "#a00");
        assert_eq!(config.badge_colors.count, DEFAULT_BADGE_COLOR);
    }

    #[test]
    fn invalid_fields_are_rejected() {
        assert_eq!(
            PlatformConfig::from_json(r#"{"updatePollIntervalMs":0}"#),
            Err(ConfigError::Invalid {
                field: "updatePollIntervalMs",
                reason: "must be greater than zero",
            })
        );
        assert!(matches!(
            PlatformConfig::from_json(r#"{"versionPath":"  "}"#),
            Err(ConfigError::Invalid {
                field: "versionPath",
                ..
            })
        ));
        assert!(matches!(
            PlatformConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
