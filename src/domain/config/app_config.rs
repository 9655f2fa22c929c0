//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::error::ParseValueError;
use crate::domain::toast::{AudioOption, TemplateKind, ToastDuration};

/// Application user model id used when none is configured
pub const DEFAULT_APP_ID: &str = "WinToast.Cli";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub app_id: Option<String>,
    pub template: Option<String>,
    pub duration: Option<String>,
    pub audio_mode: Option<String>,
    pub expiration_ms: Option<i64>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            app_id: Some(DEFAULT_APP_ID.to_string()),
            template: Some(TemplateKind::Text02.to_string()),
            duration: Some(ToastDuration::System.to_string()),
            audio_mode: Some(AudioOption::Default.to_string()),
            expiration_ms: Some(0),
            log_level: Some("warn".to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            app_id: other.app_id.or(self.app_id),
            template: other.template.or(self.template),
            duration: other.duration.or(self.duration),
            audio_mode: other.audio_mode.or(self.audio_mode),
            expiration_ms: other.expiration_ms.or(self.expiration_ms),
            log_level: other.log_level.or(self.log_level),
        }
    }

    /// Get the application user model id, or the default if not set/empty
    pub fn app_id_or_default(&self) -> &str {
        self.app_id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_APP_ID)
    }

    /// Get template as parsed TemplateKind, or Text02 if not set
    pub fn template_or_default(&self) -> Result<TemplateKind, ParseValueError> {
        self.template
            .as_deref()
            .map_or(Ok(TemplateKind::Text02), str::parse)
    }

    /// Get duration as parsed ToastDuration, or default if not set
    pub fn duration_or_default(&self) -> Result<ToastDuration, ParseValueError> {
        self.duration
            .as_deref()
            .map_or(Ok(ToastDuration::default()), str::parse)
    }

    /// Get audio mode as parsed AudioOption, or default if not set
    pub fn audio_mode_or_default(&self) -> Result<AudioOption, ParseValueError> {
        self.audio_mode
            .as_deref()
            .map_or(Ok(AudioOption::default()), str::parse)
    }

    /// Get expiration offset, or 0 (no expiration) if not set
    pub fn expiration_ms_or_default(&self) -> i64 {
        self.expiration_ms.unwrap_or(0)
    }

    /// Get log filter directive, or "warn" if not set
    pub fn log_level_or_default(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.app_id, Some(DEFAULT_APP_ID.to_string()));
        assert_eq!(config.template, Some("text02".to_string()));
        assert_eq!(config.duration, Some("system".to_string()));
        assert_eq!(config.audio_mode, Some("default".to_string()));
        assert_eq!(config.expiration_ms, Some(0));
        assert_eq!(config.log_level, Some("warn".to_string()));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.app_id.is_none());
        assert!(config.template.is_none());
        assert!(config.duration.is_none());
        assert!(config.expiration_ms.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            app_id: Some("Base.App".to_string()),
            duration: Some("short".to_string()),
            template: Some("text01".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            app_id: Some("Other.App".to_string()),
            duration: None, // Should not override
            template: Some("text04".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.app_id, Some("Other.App".to_string()));
        assert_eq!(merged.duration, Some("short".to_string())); // Kept from base
        assert_eq!(merged.template, Some("text04".to_string()));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            app_id: Some("Base.App".to_string()),
            expiration_ms: Some(3000),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.app_id, Some("Base.App".to_string()));
        assert_eq!(merged.expiration_ms, Some(3000));
    }

    #[test]
    fn typed_accessors_parse() {
        let config = AppConfig {
            template: Some("image-text04".to_string()),
            duration: Some("long".to_string()),
            audio_mode: Some("silent".to_string()),
            ..Default::default()
        };
        assert_eq!(config.template_or_default(), Ok(TemplateKind::ImageAndText04));
        assert_eq!(config.duration_or_default(), Ok(ToastDuration::Long));
        assert_eq!(config.audio_mode_or_default(), Ok(AudioOption::Silent));
    }

    #[test]
    fn typed_accessors_default_when_unset() {
        let config = AppConfig::empty();
        assert_eq!(config.template_or_default(), Ok(TemplateKind::Text02));
        assert_eq!(config.duration_or_default(), Ok(ToastDuration::System));
        assert_eq!(config.audio_mode_or_default(), Ok(AudioOption::Default));
    }

    #[test]
    fn typed_accessors_reject_invalid() {
        let config = AppConfig {
            template: Some("bogus".to_string()),
            duration: Some("bogus".to_string()),
            audio_mode: Some("bogus".to_string()),
            ..Default::default()
        };
        assert_eq!(config.template_or_default().unwrap_err().input, "bogus");
        assert!(config.duration_or_default().is_err());
        assert!(config.audio_mode_or_default().is_err());
    }

    #[test]
    fn blank_app_id_uses_default() {
        let config = AppConfig {
            app_id: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.app_id_or_default(), DEFAULT_APP_ID);
        assert_eq!(AppConfig::empty().app_id_or_default(), DEFAULT_APP_ID);
    }

    #[test]
    fn toml_round_trip_keeps_fields() {
        let config = AppConfig::defaults();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
