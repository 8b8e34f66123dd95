//! Configuration types for optidemon
//!
//! Defines:
//! - `Settings` - Global application settings
//! - `ServiceSettings` - Backend location and stage deadlines
//! - `UiSettings` - Theme and copy acknowledgement timing

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Global application settings (from `config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub service: ServiceSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServiceSettings {
    /// Base URL the three stage routes are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Deadline for each stage call in seconds (0 = wait forever)
    #[serde(default = "default_stage_timeout_secs")]
    pub stage_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            stage_timeout_secs: default_stage_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl ServiceSettings {
    pub fn stage_timeout(&self) -> Option<Duration> {
        (self.stage_timeout_secs > 0).then(|| Duration::from_secs(self.stage_timeout_secs))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_stage_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default)]
    pub theme: ThemeMode,

    /// How long the "Copied!" acknowledgement stays up, in milliseconds
    #[serde(default = "default_copy_ack_ms")]
    pub copy_ack_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            copy_ack_ms: default_copy_ack_ms(),
        }
    }
}

impl UiSettings {
    pub fn copy_ack(&self) -> Duration {
        Duration::from_millis(self.copy_ack_ms)
    }
}

fn default_copy_ack_ms() -> u64 {
    2000
}

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.service.base_url, "http://127.0.0.1:5000");
        assert_eq!(
            settings.service.stage_timeout(),
            Some(Duration::from_secs(120))
        );
        assert_eq!(settings.ui.theme, ThemeMode::Dark);
        assert_eq!(settings.ui.copy_ack(), Duration::from_millis(2000));
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let service = ServiceSettings {
            stage_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(service.stage_timeout(), None);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [ui]
            theme = "light"
            "#,
        )
        .unwrap();
        assert_eq!(settings.ui.theme, ThemeMode::Light);
        assert_eq!(settings.ui.copy_ack_ms, 2000);
        assert_eq!(settings.service, ServiceSettings::default());
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled().label(), "dark");
    }
}
