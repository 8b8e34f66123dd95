//! Settings file location, loading and saving
//!
//! Precedence, highest first: CLI flags, `OPTIDEMON_ENDPOINT`, the config
//! file, built-in defaults.

use std::path::{Path, PathBuf};

use optidemon_core::prelude::*;

use super::types::Settings;

const CONFIG_DIR_NAME: &str = "optidemon";
pub const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable overriding `service.base_url`
pub const ENDPOINT_ENV: &str = "OPTIDEMON_ENDPOINT";

/// `<config_dir>/optidemon/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME))
}

/// Read the settings file at `path`.
///
/// `Ok(None)` means there is no file yet.
pub fn read_settings_file(path: &Path) -> Result<Option<Settings>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read {:?}: {}", path, e)))?;
    let settings = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {:?}: {}", path, e)))?;
    Ok(Some(settings))
}

/// Write settings to `path` atomically (temp file, then rename).
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::config(format!("Failed to create config dir: {}", e)))?;
        }
    }

    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;
    let full_content = format!("{}{}", generate_config_header(), content);

    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &full_content)
        .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

    debug!("Saved settings to {:?}", path);
    Ok(())
}

fn generate_config_header() -> String {
    r#"# optidemon configuration
# Rewritten when the theme is toggled from the TUI

"#
    .to_string()
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub endpoint: Option<String>,
    pub stage_timeout_secs: Option<u64>,
}

impl SettingsOverrides {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(endpoint) = &self.endpoint {
            settings.service.base_url = endpoint.clone();
        }
        if let Some(secs) = self.stage_timeout_secs {
            settings.service.stage_timeout_secs = secs;
        }
    }
}

/// The config file layer on its own, without env or CLI overrides.
///
/// Only this copy is ever written back.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsFile {
    pub path: PathBuf,
    pub settings: Settings,
}

/// Effective settings plus the file layer they were built from.
#[derive(Debug, Clone, Default)]
pub struct LoadedSettings {
    /// File, env and CLI layers merged
    pub settings: Settings,
    /// `None` when there is no config dir or the file could not be parsed
    pub file: Option<SettingsFile>,
}

/// Resolve settings with full precedence applied.
///
/// `config_path` replaces the default location when given.
pub fn resolve_settings(config_path: Option<&Path>, overrides: &SettingsOverrides) -> LoadedSettings {
    let file = match config_path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => match read_settings_file(&path) {
            Ok(found) => {
                debug!("Settings file {:?} (exists: {})", path, found.is_some());
                Some(SettingsFile {
                    path,
                    settings: found.unwrap_or_default(),
                })
            }
            Err(e) => {
                // A broken file is never overwritten
                warn!("{}; settings changes will not be saved", e);
                None
            }
        },
        None => {
            warn!("No config directory available, using defaults");
            None
        }
    };

    let mut settings = file
        .as_ref()
        .map(|file| file.settings.clone())
        .unwrap_or_default();

    if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
        if !endpoint.trim().is_empty() {
            debug!("{} overrides service.base_url", ENDPOINT_ENV);
            settings.service.base_url = endpoint.trim().to_string();
        }
    }

    overrides.apply(&mut settings);

    LoadedSettings { settings, file }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::ThemeMode;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_read_missing_file() {
        let temp = tempdir().unwrap();
        let found = read_settings_file(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_read_custom_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[service]
base_url = "http://backend:8080"
stage_timeout_secs = 5

[ui]
theme = "light"
copy_ack_ms = 500
"#,
        )
        .unwrap();

        let settings = read_settings_file(&path).unwrap().unwrap();
        assert_eq!(settings.service.base_url, "http://backend:8080");
        assert_eq!(settings.service.stage_timeout_secs, 5);
        assert_eq!(settings.service.connect_timeout_secs, 10);
        assert_eq!(settings.ui.theme, ThemeMode::Light);
        assert_eq!(settings.ui.copy_ack_ms, 500);
    }

    #[test]
    fn test_read_invalid_toml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "this is [not valid toml").unwrap();
        let err = read_settings_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_save_then_load() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join(CONFIG_FILENAME);

        let mut settings = Settings::default();
        settings.ui.theme = ThemeMode::Light;
        save_settings(&path, &settings).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# optidemon configuration"));
        assert_eq!(read_settings_file(&path).unwrap(), Some(settings));
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    #[serial]
    fn test_precedence_cli_over_env_over_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[service]\nbase_url = \"http://file:1\"\n").unwrap();

        std::env::remove_var(ENDPOINT_ENV);
        let loaded = resolve_settings(Some(&path), &SettingsOverrides::default());
        assert_eq!(loaded.settings.service.base_url, "http://file:1");
        assert_eq!(loaded.file.as_ref().map(|f| f.path.as_path()), Some(path.as_path()));

        std::env::set_var(ENDPOINT_ENV, "http://env:2");
        let loaded = resolve_settings(Some(&path), &SettingsOverrides::default());
        assert_eq!(loaded.settings.service.base_url, "http://env:2");

        let overrides = SettingsOverrides {
            endpoint: Some("http://cli:3".into()),
            stage_timeout_secs: Some(0),
        };
        let loaded = resolve_settings(Some(&path), &overrides);
        assert_eq!(loaded.settings.service.base_url, "http://cli:3");
        assert_eq!(loaded.settings.service.stage_timeout(), None);

        std::env::remove_var(ENDPOINT_ENV);
    }

    #[test]
    #[serial]
    fn test_file_layer_excludes_overrides() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[service]\nbase_url = \"http://file:1\"\n").unwrap();

        std::env::set_var(ENDPOINT_ENV, "http://env:2");
        let overrides = SettingsOverrides {
            endpoint: None,
            stage_timeout_secs: Some(0),
        };
        let loaded = resolve_settings(Some(&path), &overrides);
        std::env::remove_var(ENDPOINT_ENV);

        assert_eq!(loaded.settings.service.base_url, "http://env:2");
        let file = loaded.file.unwrap();
        assert_eq!(file.settings.service.base_url, "http://file:1");
        assert_eq!(file.settings.service.stage_timeout_secs, 120);
    }

    #[test]
    #[serial]
    fn test_missing_file_is_writable_with_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);

        std::env::remove_var(ENDPOINT_ENV);
        let loaded = resolve_settings(Some(&path), &SettingsOverrides::default());
        let file = loaded.file.unwrap();
        assert_eq!(file.path, path);
        assert_eq!(file.settings, Settings::default());
    }

    #[test]
    #[serial]
    fn test_malformed_file_is_not_writable() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "this is [not valid toml").unwrap();

        std::env::remove_var(ENDPOINT_ENV);
        let loaded = resolve_settings(Some(&path), &SettingsOverrides::default());
        assert!(loaded.file.is_none());
        assert_eq!(loaded.settings, Settings::default());
    }
}
