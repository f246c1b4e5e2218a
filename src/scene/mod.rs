// Scene synthesis boundary - The external engine that turns a schedule
// into spatialized audio and label files
// The driver only ever talks to these traits; impulse-response
// convolution, spatial rendering, SNR mixing, and label serialization are
// the engine's concern

pub mod offline;

// Re-export main types
pub use offline::OfflineEngine;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::scheduler::{ScheduledEvent, TimeWindow};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("scene engine error: {0}")]
    Engine(String),
}

/// Output format of the rendered scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneFormat {
    /// First-order ambisonics (4 channels)
    Foa,

    /// Tetrahedral microphone array (4 capsules)
    Mic,
}

impl SceneFormat {
    pub fn channel_count(&self) -> u16 {
        match self {
            SceneFormat::Foa => 4,
            SceneFormat::Mic => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneFormat::Foa => "foa",
            SceneFormat::Mic => "mic",
        }
    }
}

/// Per-clip configuration passed through to the engine unchanged
///
/// The driver never interprets these beyond filling them in from its own
/// config; what the engine does with them is opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSpec {
    /// Room whose impulse responses the engine convolves with
    pub room: String,

    pub format: SceneFormat,

    /// Clip length in seconds
    pub duration_s: f64,

    /// Output sample rate in Hz
    pub sample_rate: u32,

    /// Reference loudness in dB the engine normalizes against
    pub ref_db: f64,

    /// Maximum number of simultaneously overlapping events
    pub max_event_overlap: u32,

    /// Emit DCASE-format labels
    pub dcase_format: bool,
}

/// One scheduled event as handed to the engine
///
/// The engine draws the final onset uniformly within `window` and mixes
/// the event at an SNR drawn from `snr_range_db`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRequest {
    pub label: String,

    /// Onset window the engine samples within
    pub window: TimeWindow,

    /// The driver's own in-window draw, usable as a fixed onset by engines
    /// that do not re-draw
    pub onset_s: f64,

    /// SNR range in dB for mixing against the background
    pub snr_range_db: (f64, f64),
}

impl EventRequest {
    pub fn from_scheduled(event: &ScheduledEvent, snr_range_db: (f64, f64)) -> Self {
        EventRequest {
            label: event.label.clone(),
            window: event.window,
            onset_s: event.onset_s,
            snr_range_db,
        }
    }
}

/// A scene under construction for one output clip
pub trait SceneRenderer {
    /// Add background ambient noise to the scene
    fn add_background(&mut self) -> Result<(), RenderError>;

    /// Place one labeled event into the scene
    fn add_event(&mut self, event: &EventRequest) -> Result<(), RenderError>;

    /// Render the scene, writing the audio and label artifacts
    fn generate(&mut self, audio_path: &Path, label_path: &Path) -> Result<(), RenderError>;
}

/// Factory for per-clip renderers
pub trait SceneEngine {
    type Renderer: SceneRenderer;

    fn begin_scene(&self, spec: &SceneSpec) -> Result<Self::Renderer, RenderError>;
}
