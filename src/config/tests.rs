use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_encore_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", "/tmp/encore-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/encore-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("encore")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("encore")
            .join("config.toml")
    );
}

#[test]
fn defaults_are_valid() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.audio.backend, BackendSetting::Auto);
    assert_eq!(s.playback.initial_volume, 75);
    assert_eq!(s.playback.tick_ms, 1000);
    assert_eq!(s.library.default_artist, "Unknown Artist");
}

#[test]
fn validate_rejects_bad_values() {
    let mut s = Settings::default();
    s.playback.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.initial_volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.position_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.default_duration = "three minutes".into();
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
backend = "headless"
position_interval_ms = 100
quit_fade_out_ms = 0

[playback]
initial_volume = 40
tick_ms = 500
autoplay = true

[ui]
now_playing_track_fields = ["artist", "title"]
now_playing_track_separator = " • "
now_playing_time_fields = ["elapsed", "remaining"]
now_playing_time_separator = " | "

[library]
extensions = ["mp3"]
recursive = false
include_hidden = false
follow_links = false
default_artist = "Anonymous"
default_duration = "2:00"

[logging]
level = "encore=debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("ENCORE__PLAYBACK__INITIAL_VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.backend, BackendSetting::Simulated);
    assert_eq!(s.audio.position_interval_ms, 100);
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.playback.initial_volume, 40);
    assert_eq!(s.playback.tick_ms, 500);
    assert!(s.playback.autoplay);
    assert_eq!(
        s.ui.now_playing_track_fields,
        vec![TrackDisplayField::Artist, TrackDisplayField::Title]
    );
    assert_eq!(s.ui.now_playing_track_separator, " • ");
    assert_eq!(
        s.ui.now_playing_time_fields,
        vec![TimeField::Elapsed, TimeField::Remaining]
    );
    assert_eq!(s.ui.now_playing_time_separator, " | ");
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.default_artist, "Anonymous");
    assert_eq!(s.library.default_duration, "2:00");
    assert_eq!(s.logging.level, "encore=debug");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
initial_volume = 90
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("ENCORE__PLAYBACK__INITIAL_VOLUME", "10");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.initial_volume, 10);
}
