use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/encore/config.toml` or `~/.config/encore/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ENCORE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

/// Which progress source drives the controller.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendSetting {
    /// rodio when an output device opens and some track has a source,
    /// otherwise the simulated tick.
    Auto,
    Rodio,
    #[serde(alias = "simulate", alias = "headless")]
    Simulated,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub backend: BackendSetting,
    /// How often the audio thread reports the playback position (milliseconds).
    pub position_interval_ms: u64,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            backend: BackendSetting::Auto,
            position_interval_ms: 250,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Volume percentage at startup (0-100).
    pub initial_volume: u8,
    /// Period of the simulated progress tick (milliseconds).
    pub tick_ms: u64,
    /// Start playing the first track right away.
    pub autoplay: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            initial_volume: 75,
            tick_ms: 1000,
            autoplay: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Artist used for imported files without an artist tag.
    pub default_artist: String,
    /// Duration (`m:ss`) used for imported files whose length can't be read.
    pub default_duration: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
            default_artist: "Unknown Artist".to_string(),
            default_duration: "3:45".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Which track fields to show in the status line, and in what order.
    ///
    /// Example: ["artist", "title"]
    pub now_playing_track_fields: Vec<TrackDisplayField>,

    /// Separator used to join `now_playing_track_fields`.
    pub now_playing_track_separator: String,

    /// Which time fields to show for the status line, and in what order.
    ///
    /// Example: ["elapsed", "total", "remaining"]
    pub now_playing_time_fields: Vec<TimeField>,

    /// Separator used to join `now_playing_time_fields`.
    pub now_playing_time_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            now_playing_track_fields: vec![TrackDisplayField::Title, TrackDisplayField::Artist],
            now_playing_track_separator: " - ".to_string(),
            now_playing_time_fields: vec![TimeField::Elapsed, TimeField::Total],
            now_playing_time_separator: " / ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeField {
    Elapsed,
    Total,
    Remaining,
    /// Elapsed share of the track, e.g. `37%`.
    Progress,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Id,
    Title,
    Artist,
    Filename,
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directives, e.g. `info` or `encore=debug`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
