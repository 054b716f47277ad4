use std::{env, path::PathBuf};

use super::schema::Settings;
use crate::library::parse_duration;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment variables
/// (prefix `ENCORE__`), and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ENCORE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.playback.tick_ms == 0 {
            return Err("playback.tick_ms must be >= 1".to_string());
        }
        if self.playback.initial_volume > 100 {
            return Err("playback.initial_volume must be <= 100".to_string());
        }
        if self.audio.position_interval_ms == 0 {
            return Err("audio.position_interval_ms must be >= 1".to_string());
        }
        if let Err(e) = parse_duration(&self.library.default_duration) {
            return Err(format!("library.default_duration: {e}"));
        }
        Ok(())
    }
}

/// Resolve the config path from `ENCORE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ENCORE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/encore/config.toml`
/// or `~/.config/encore/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("encore").join("config.toml"))
}
