// Generation configuration
// Built-in defaults cover a full sweep; a JSON file overrides any subset

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::scheduler::{CatalogError, EventCatalog};
use crate::scene::SceneFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid event catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("clip duration must be positive, got {0}")]
    InvalidDuration(f64),

    #[error("time slot count must be at least 1")]
    NoSlots,

    #[error("event count range is inverted: {0}..={1}")]
    InvertedEventRange(u32, u32),

    #[error("SNR range is inverted: {0}..{1} dB")]
    InvertedSnrRange(f64, f64),

    #[error("sample rate must be positive")]
    ZeroSampleRate,
}

/// Parameters for one batch generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Clip length in seconds
    pub duration_s: f64,

    /// Output sample rate in Hz
    pub sample_rate: u32,

    /// Reference loudness handed to the engine, dB
    pub ref_db: f64,

    /// SNR range for event mixing, dB (lo, hi)
    pub snr_range_db: (f64, f64),

    /// Number of equal time slots events are spread across
    pub time_slots: usize,

    /// Events per clip, inclusive range
    pub events_range: (u32, u32),

    /// Maximum simultaneous event overlap
    pub max_event_overlap: u32,

    /// Rendered output format
    pub format: SceneFormat,

    /// Emit DCASE-format labels
    pub dcase_format: bool,

    /// Number of clips in the batch
    pub num_clips: u32,

    /// Event-type label -> relative sampling weight
    pub event_distribution: BTreeMap<String, f64>,

    /// Foreground sound event dataset root
    pub sound_dir: PathBuf,

    /// Room impulse response dataset root
    pub rir_dir: PathBuf,

    /// Output root; audio and labels land in subdirectories
    pub output_dir: PathBuf,
}

impl Default for GenConfig {
    fn default() -> Self {
        let mut event_distribution = BTreeMap::new();
        event_distribution.insert("doorCupboard".to_string(), 10.0);
        event_distribution.insert("bell".to_string(), 10.0);

        GenConfig {
            duration_s: 60.0,
            sample_rate: 24_000,
            ref_db: -50.0,
            snr_range_db: (5.0, 7.0),
            time_slots: 4,
            events_range: (5, 15),
            max_event_overlap: 2,
            format: SceneFormat::Foa,
            dcase_format: true,
            num_clips: 900,
            event_distribution,
            sound_dir: PathBuf::from("datasets/sound_event_datasets/FSD50K_FMA"),
            rir_dir: PathBuf::from("datasets/rir_datasets"),
            output_dir: PathBuf::from("output/soundscapes"),
        }
    }
}

impl GenConfig {
    /// Load and validate a config from a JSON file
    ///
    /// Fields absent from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: GenConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check semantic invariants and build the validated event catalog
    pub fn validate(&self) -> Result<EventCatalog, ConfigError> {
        if !self.duration_s.is_finite() || self.duration_s <= 0.0 {
            return Err(ConfigError::InvalidDuration(self.duration_s));
        }
        if self.time_slots == 0 {
            return Err(ConfigError::NoSlots);
        }
        if self.events_range.0 > self.events_range.1 {
            return Err(ConfigError::InvertedEventRange(
                self.events_range.0,
                self.events_range.1,
            ));
        }
        if self.snr_range_db.0 > self.snr_range_db.1 {
            return Err(ConfigError::InvertedSnrRange(
                self.snr_range_db.0,
                self.snr_range_db.1,
            ));
        }
        if self.sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }

        Ok(EventCatalog::from_weights(&self.event_distribution)?)
    }
}
