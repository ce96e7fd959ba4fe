use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/mixtape/config.toml` or `~/.config/mixtape/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MIXTAPE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub playback: PlaybackSettings,
    pub playlist: PlaylistSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume applied at startup, `0.0..=1.0`.
    pub initial_volume: f32,
    /// How often the audio thread reports the playback position (milliseconds).
    pub tick_ms: u64,
    /// Overall timeout for downloading a remote source (seconds).
    pub fetch_timeout_secs: u64,
    /// Largest remote body that will be buffered (bytes).
    pub max_remote_bytes: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            tick_ms: 250,
            fetch_timeout_secs: 30,
            max_remote_bytes: 64 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Separator between elapsed and total time in the transport bar.
    pub time_separator: String,
    /// Shown in the transport bar when no track is active.
    pub empty_title: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ mixtape ~ ".to_string(),
            time_separator: " / ".to_string(),
            empty_title: "Select a song".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to seek when pressing `H` / `L`.
    pub seek_seconds: u64,
    /// Volume change per `-` / `+` key press.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_seconds: 5,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Start the next track when the current one ends instead of stopping.
    pub auto_advance: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Tracks added to the playlist at startup, in order.
    /// `seed = []` starts with an empty playlist.
    pub seed: Vec<SeedTrack>,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            seed: vec![SeedTrack {
                title: "pikachu".to_string(),
                source: "https://freepd.com/music/Battle%20Ready.mp3".to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedTrack {
    pub title: String,
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Log file path. Logging is disabled when unset.
    pub file: Option<std::path::PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
