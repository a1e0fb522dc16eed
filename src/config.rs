use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::KeyCode;
use serde::Deserialize;

use crate::format::TonePalette;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
    pub logging: LoggingConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub sample_interval_ms: u64,
    pub frame_rate_ms: u64,
    pub theme: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            sample_interval_ms: 500,
            frame_rate_ms: 100,
            theme: "dark".to_string(),
        }
    }
}

impl GeneralConfig {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn frame_rate(&self) -> Duration {
        Duration::from_millis(self.frame_rate_ms.max(1))
    }
}

/// The three-tone palette for values below, equal to and above baseline.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub low: String,
    pub neutral: String,
    pub high: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            low: "#5fb35f".to_string(),
            neutral: "#c8c8c8".to_string(),
            high: "#e05252".to_string(),
        }
    }
}

impl ColorsConfig {
    pub fn palette(&self) -> TonePalette {
        TonePalette {
            low: self.low.clone(),
            neutral: self.neutral.clone(),
            high: self.high.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub pin: String,
    pub unpin: String,
    pub log_new: String,
    pub cycle_kind: String,
    pub toggle_delta: String,
    pub load_batch: String,
    pub unload_batch: String,
    pub help: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            pin: "p".to_string(),
            unpin: "x".to_string(),
            log_new: "n".to_string(),
            cycle_kind: "k".to_string(),
            toggle_delta: "d".to_string(),
            load_batch: "l".to_string(),
            unload_batch: "u".to_string(),
            help: "?".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: None,
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub batch_size: usize,
    pub initial_batches: usize,
    pub use_process_counters: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            batch_size: 8,
            initial_batches: 2,
            use_process_counters: true,
        }
    }
}

/// Parses a keybind string: a single character or a named key.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match s.to_lowercase().as_str() {
        "enter" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "space" => Some(KeyCode::Char(' ')),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        _ => None,
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("memcheck").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), %err, "invalid config, using defaults");
            Config::default()
        }),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "unreadable config, using defaults");
            Config::default()
        }
    }
}
