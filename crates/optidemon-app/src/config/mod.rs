//! Configuration loading and persistence
//!
//! - `types`: settings structures with serde defaults
//! - `settings`: file location, loading, overrides and atomic save

pub mod settings;
pub mod types;

pub use settings::{
    default_config_path, read_settings_file, resolve_settings, save_settings,
    LoadedSettings, SettingsFile, SettingsOverrides, CONFIG_FILENAME, ENDPOINT_ENV,
};
pub use types::{ServiceSettings, Settings, ThemeMode, UiSettings};
