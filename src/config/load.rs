use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` layers environment variables (prefix `MIXTAPE__`) over an
/// optional config file over struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MIXTAPE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.audio.initial_volume) {
            return Err("audio.initial_volume must be within 0.0..=1.0".to_string());
        }
        if self.audio.tick_ms == 0 {
            return Err("audio.tick_ms must be >= 1".to_string());
        }
        if self.audio.fetch_timeout_secs == 0 {
            return Err("audio.fetch_timeout_secs must be >= 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.controls.volume_step) || self.controls.volume_step == 0.0 {
            return Err("controls.volume_step must be within (0.0, 1.0]".to_string());
        }
        if self.controls.seek_seconds == 0 {
            return Err("controls.seek_seconds must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `MIXTAPE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MIXTAPE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/mixtape/config.toml`
/// or `~/.config/mixtape/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("mixtape").join("config.toml"))
}
