use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// Overrides `api_base_url` when set.
pub const API_URL_ENV_VAR: &str = "MTAG_API_URL";

/// Tunables for the timeline engine and its HTTP collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineSettings {
    /// Fraction of the visible range added or removed per zoom step.
    pub zoom_factor: f64,
    /// Fraction of the visible range moved per pan step.
    pub move_factor: f64,
    pub side_padding: f64,
    /// Zooming in is refused once a single step would be shorter than this.
    pub minimum_zoom_step_ms: i64,
    pub ruler_height: f64,
    pub band_margin: f64,
    /// Sample label measured to size ruler ticks.
    pub label_sample: String,
    pub label_padding: f64,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            zoom_factor: 0.03,
            move_factor: 0.05,
            side_padding: 29.0,
            minimum_zoom_step_ms: 5_000,
            ruler_height: 30.0,
            band_margin: 10.0,
            label_sample: "88:88".into(),
            label_padding: 6.0,
            api_base_url: "http://127.0.0.1:5000".into(),
            request_timeout_secs: 10,
        }
    }
}

impl TimelineSettings {
    /// Apply environment overrides on top of the loaded values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV_VAR) {
            let url = url.trim();
            if !url.is_empty() {
                self.api_base_url = url.to_string();
            }
        }
        self
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<TimelineSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!(
                    "Ignoring malformed settings in {}: {err}",
                    path.display()
                );
                TimelineSettings::default()
            })
        } else {
            TimelineSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn settings(&self) -> TimelineSettings {
        self.read().clone()
    }

    pub fn update(&self, settings: TimelineSettings) -> Result<()> {
        let mut guard = self.write();
        self.persist(&settings)?;
        *guard = settings;
        Ok(())
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let data: TimelineSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;
        *self.write() = data;
        Ok(())
    }

    fn persist(&self, data: &TimelineSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    fn read(&self) -> RwLockReadGuard<'_, TimelineSettings> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, TimelineSettings> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
