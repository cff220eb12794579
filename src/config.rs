use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use taskflow::domain::run_config::{
    DEFAULT_INNER, DEFAULT_MIDDLE, DEFAULT_OUTER, DEFAULT_REPORT_PATH, DEFAULT_SHORT_CIRCUIT_PROBABILITY,
    DEFAULT_SLEEP_MAX_SECS, DEFAULT_SLEEP_MIN_SECS,
};
use taskflow::live::DEFAULT_REFRESH_PER_SECOND;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub run: RunDefaults,
    pub dashboard: DashboardConfig,
}

/// Defaults for `taskflow run` flags that were not given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunDefaults {
    pub outer: usize,
    pub middle: usize,
    pub inner: usize,
    pub short_circuit_probability: f64,
    pub sleep_min_ms: u64,
    pub sleep_max_ms: u64,
    pub report_path: PathBuf,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            outer: DEFAULT_OUTER,
            middle: DEFAULT_MIDDLE,
            inner: DEFAULT_INNER,
            short_circuit_probability: DEFAULT_SHORT_CIRCUIT_PROBABILITY,
            sleep_min_ms: (DEFAULT_SLEEP_MIN_SECS * 1000.0).round() as u64,
            sleep_max_ms: (DEFAULT_SLEEP_MAX_SECS * 1000.0).round() as u64,
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub refresh_per_second: u32,
    pub log_lines: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_per_second: DEFAULT_REFRESH_PER_SECOND,
            log_lines: taskflow::dashboard::VISIBLE_MESSAGES,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            run: RunDefaults::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if let Some(config) = Self::try_load(&primary_config) {
                return Ok(config);
            }
        }

        // Try fallback location: ./<project>.yml
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if let Some(config) = Self::try_load(&fallback_config) {
            return Ok(config);
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load `path` if it exists; a broken file is logged and skipped.
    fn try_load(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config from {}: {}", path.display(), e);
                None
            }
        }
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}
