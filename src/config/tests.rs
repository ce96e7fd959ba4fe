use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
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
fn resolve_config_path_prefers_mixtape_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("MIXTAPE_CONFIG_PATH", "/tmp/mixtape-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/mixtape-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("mixtape")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("mixtape")
            .join("config.toml")
    );
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
initial_volume = 0.5
tick_ms = 100
fetch_timeout_secs = 5
max_remote_bytes = 1024

[ui]
header_text = "hello"
time_separator = " | "
empty_title = "nothing"

[controls]
seek_seconds = 9
volume_step = 0.1

[playback]
auto_advance = true

[[playlist.seed]]
title = "pikachu"
source = "https://freepd.com/music/Battle%20Ready.mp3"

[[playlist.seed]]
title = "local"
source = "/tmp/local.mp3"

[log]
level = "debug"
file = "/tmp/mixtape.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MIXTAPE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("MIXTAPE__CONTROLS__SEEK_SECONDS");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 0.5);
    assert_eq!(s.audio.tick_ms, 100);
    assert_eq!(s.audio.fetch_timeout_secs, 5);
    assert_eq!(s.audio.max_remote_bytes, 1024);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.time_separator, " | ");
    assert_eq!(s.ui.empty_title, "nothing");
    assert_eq!(s.controls.seek_seconds, 9);
    assert_eq!(s.controls.volume_step, 0.1);
    assert!(s.playback.auto_advance);
    assert_eq!(s.playlist.seed.len(), 2);
    assert_eq!(s.playlist.seed[0].title, "pikachu");
    assert_eq!(s.playlist.seed[1].source, "/tmp/local.mp3");
    assert_eq!(s.log.level, "debug");
    assert_eq!(
        s.log.file.as_deref(),
        Some(std::path::Path::new("/tmp/mixtape.log"))
    );
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
[controls]
seek_seconds = 9
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MIXTAPE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("MIXTAPE__CONTROLS__SEEK_SECONDS", "30");

    let s = Settings::load().unwrap();
    assert_eq!(s.controls.seek_seconds, 30);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let _g1 = EnvGuard::set("MIXTAPE_CONFIG_PATH", missing.to_str().unwrap());

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 1.0);
    assert!(!s.playback.auto_advance);
    assert_eq!(s.playlist.seed.len(), 1);
    assert_eq!(s.playlist.seed[0].title, "pikachu");
    assert_eq!(
        s.playlist.seed[0].source,
        "https://freepd.com/music/Battle%20Ready.mp3"
    );
    assert!(s.log.file.is_none());
}

#[test]
fn partial_sections_fill_in_defaults() {
    let s: Settings = toml::from_str(
        r#"
[controls]
volume_step = 0.2
"#,
    )
    .unwrap();
    assert_eq!(s.controls.volume_step, 0.2);
    assert_eq!(s.controls.seek_seconds, 5);
    assert_eq!(s.ui.time_separator, " / ");
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.audio.initial_volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.volume_step = 0.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.tick_ms = 0;
    assert!(s.validate().is_err());
}

#[test]
fn empty_seed_list_overrides_default_track() {
    let s: Settings = toml::from_str(
        r#"
[playlist]
seed = []
"#,
    )
    .unwrap();
    assert!(s.playlist.seed.is_empty());
}
