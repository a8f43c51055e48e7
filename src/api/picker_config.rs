use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PickerError, PickerResult};
use crate::model::{ComponentSet, StationCode};

pub const DEFAULT_RAW_CLICKS_FILE: &str = "clicked_times.json";
pub const DEFAULT_SUMMARY_FILE: &str = "click_table_summary.json";

/// Step sizes for keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationTuning {
    /// Fraction of the visible span shifted per pan step.
    #[serde(default = "default_pan_factor")]
    pub pan_factor: f64,
    /// Span multiplier per time zoom step.
    #[serde(default = "default_zoom_factor")]
    pub zoom_factor: f64,
    /// Span multiplier per amplitude scale step.
    #[serde(default = "default_amplitude_factor")]
    pub amplitude_factor: f64,
    /// Padding added on both sides of freshly fitted ranges.
    #[serde(default = "default_window_padding_ratio")]
    pub window_padding_ratio: f64,
}

impl Default for NavigationTuning {
    fn default() -> Self {
        Self {
            pan_factor: default_pan_factor(),
            zoom_factor: default_zoom_factor(),
            amplitude_factor: default_amplitude_factor(),
            window_padding_ratio: default_window_padding_ratio(),
        }
    }
}

impl NavigationTuning {
    pub fn validate(self) -> PickerResult<Self> {
        if !self.pan_factor.is_finite() || self.pan_factor <= 0.0 {
            return Err(PickerError::InvalidConfig(
                "navigation pan_factor must be finite and > 0".to_owned(),
            ));
        }
        for (value, name) in [
            (self.zoom_factor, "zoom_factor"),
            (self.amplitude_factor, "amplitude_factor"),
        ] {
            if !value.is_finite() || value <= 1.0 {
                return Err(PickerError::InvalidConfig(format!(
                    "navigation {name} must be finite and > 1"
                )));
            }
        }
        if !self.window_padding_ratio.is_finite() || self.window_padding_ratio < 0.0 {
            return Err(PickerError::InvalidConfig(
                "navigation window_padding_ratio must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Locations of the two persisted click stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_raw_clicks_path")]
    pub raw_clicks_path: PathBuf,
    #[serde(default = "default_summary_path")]
    pub summary_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            raw_clicks_path: default_raw_clicks_path(),
            summary_path: default_summary_path(),
        }
    }
}

impl StoreConfig {
    /// Both stores rooted in `dir`, with their default file names.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            raw_clicks_path: dir.join(DEFAULT_RAW_CLICKS_FILE),
            summary_path: dir.join(DEFAULT_SUMMARY_FILE),
        }
    }

    /// Store paths in precedence order; the summary store is canonical.
    #[must_use]
    pub fn paths(&self) -> [&Path; 2] {
        [self.summary_path.as_path(), self.raw_clicks_path.as_path()]
    }
}

/// Run configuration.
///
/// Serializable so an operator can keep one JSON file per campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    #[serde(default = "default_components")]
    pub components: Vec<String>,
    #[serde(default = "default_stations")]
    pub stations: Vec<String>,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub navigation: NavigationTuning,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            components: default_components(),
            stations: default_stations(),
            store: StoreConfig::default(),
            navigation: NavigationTuning::default(),
        }
    }
}

impl PickerConfig {
    #[must_use]
    pub fn with_components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = components.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_stations<I, S>(mut self, stations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stations = stations.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    #[must_use]
    pub fn with_navigation(mut self, navigation: NavigationTuning) -> Self {
        self.navigation = navigation;
        self
    }

    pub fn validate(&self) -> PickerResult<()> {
        self.component_set()?;
        if self.stations.is_empty() {
            return Err(PickerError::InvalidConfig(
                "at least one station is required".to_owned(),
            ));
        }
        if self.stations.iter().any(|s| s.trim().is_empty()) {
            return Err(PickerError::InvalidConfig(
                "station codes must not be empty".to_owned(),
            ));
        }
        if self.store.raw_clicks_path == self.store.summary_path {
            return Err(PickerError::InvalidConfig(
                "raw clicks and summary stores must be different files".to_owned(),
            ));
        }
        self.navigation.validate()?;
        Ok(())
    }

    pub fn component_set(&self) -> PickerResult<ComponentSet> {
        ComponentSet::new(self.components.iter().cloned())
    }

    #[must_use]
    pub fn station_codes(&self) -> Vec<StationCode> {
        self.stations.iter().map(|s| StationCode::new(s.as_str())).collect()
    }

    pub fn to_json_pretty(&self) -> PickerResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PickerError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> PickerResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| PickerError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> PickerResult<Self> {
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PickerError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }
}

fn default_pan_factor() -> f64 {
    0.1
}

fn default_zoom_factor() -> f64 {
    1.2
}

fn default_amplitude_factor() -> f64 {
    1.2
}

fn default_window_padding_ratio() -> f64 {
    0.05
}

fn default_raw_clicks_path() -> PathBuf {
    PathBuf::from(DEFAULT_RAW_CLICKS_FILE)
}

fn default_summary_path() -> PathBuf {
    PathBuf::from(DEFAULT_SUMMARY_FILE)
}

fn default_components() -> Vec<String> {
    ["u", "n", "e"].into_iter().map(str::to_owned).collect()
}

fn default_stations() -> Vec<String> {
    vec!["v.skd2".to_owned()]
}
