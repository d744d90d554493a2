use crate::home::SlotIndex;
use crate::sys::launch::ExecCommand;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::{DurationSecondsWithFrac, serde_as};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub satellites: usize,
    pub main_radius: f64,
    pub satellite_radius: f64,
    pub ring_distance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            satellites: 8,
            main_radius: 100.0,
            satellite_radius: 50.0,
            ring_distance: 250.0,
        }
    }
}

/// All delays are fractional seconds in the config file.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub toggle_delay: Duration,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub select_delay: Duration,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub logo_delay: Duration,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub frame_interval: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            toggle_delay: Duration::from_secs(1),
            select_delay: Duration::from_secs(1),
            logo_delay: Duration::from_secs(1),
            frame_interval: Duration::from_millis(50),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetConfig {
    pub root: PathBuf,
    pub logo: PathBuf,
    pub apps_dir: PathBuf,
    pub audio_dir: PathBuf,
    pub sound: bool,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            logo: PathBuf::from("logo.jpg"),
            apps_dir: PathBuf::from("apps"),
            audio_dir: PathBuf::from("audio"),
            sound: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    pub slot: SlotIndex,
    pub name: Option<String>,
    pub exec: ExecCommand,
    pub icon: Option<PathBuf>,
}

impl AppConfig {
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.slot.plugin_id().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub assets: AssetConfig,
    #[serde(default)]
    pub apps: Vec<AppConfig>,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if layout.satellites == 0 {
            return Err(ConfigError::Invalid("layout.satellites must be at least 1".into()));
        }
        if layout.main_radius <= 0.0 || layout.satellite_radius <= 0.0 {
            return Err(ConfigError::Invalid("layout radii must be positive".into()));
        }
        if layout.ring_distance < 0.0 {
            return Err(ConfigError::Invalid(
                "layout.ring_distance must not be negative".into(),
            ));
        }
        if self.timing.frame_interval.is_zero() {
            return Err(ConfigError::Invalid("timing.frame_interval must be positive".into()));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid config: {0}")]
    Invalid(String),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "kiosk", "orbit").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("ORBIT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Writes the bundled config on first launch, then loads. Falls back to
/// defaults when the config cannot be read.
pub fn load_or_default() -> Config {
    if let Err(e) = write_default_config() {
        log::warn!("Could not write default config: {}", e);
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
        log::info!("Wrote default config to {}", path.display());
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", ConfigError::from(e));
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
