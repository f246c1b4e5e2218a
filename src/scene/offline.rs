// Offline placeholder engine
// Writes silent multichannel WAV plus a minimal onset/label sidecar so the
// batch pipeline runs end-to-end without the external synthesis engine

use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs;
use std::io::Write;
use std::path::Path;

use super::{EventRequest, RenderError, SceneEngine, SceneRenderer, SceneSpec};

/// Engine that stands in for the external scene synthesizer
///
/// Spatialization, impulse-response convolution, and SNR mixing are not
/// performed; the audio artifact is silence of the correct shape. Real
/// deployments plug an engine-backed [`SceneEngine`] into the batch driver
/// instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineEngine;

impl OfflineEngine {
    pub fn new() -> Self {
        OfflineEngine
    }
}

/// Scene accumulated by [`OfflineEngine`]
#[derive(Debug)]
pub struct OfflineScene {
    spec: SceneSpec,
    background: bool,
    events: Vec<EventRequest>,
}

impl SceneEngine for OfflineEngine {
    type Renderer = OfflineScene;

    fn begin_scene(&self, spec: &SceneSpec) -> Result<OfflineScene, RenderError> {
        Ok(OfflineScene {
            spec: spec.clone(),
            background: false,
            events: Vec::new(),
        })
    }
}

impl SceneRenderer for OfflineScene {
    fn add_background(&mut self) -> Result<(), RenderError> {
        self.background = true;
        Ok(())
    }

    fn add_event(&mut self, event: &EventRequest) -> Result<(), RenderError> {
        self.events.push(event.clone());
        Ok(())
    }

    fn generate(&mut self, audio_path: &Path, label_path: &Path) -> Result<(), RenderError> {
        let channels = self.spec.format.channel_count();
        let wav_spec = WavSpec {
            channels,
            sample_rate: self.spec.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let frames = (self.spec.duration_s * self.spec.sample_rate as f64).round() as usize;
        let mut writer = WavWriter::create(audio_path, wav_spec)?;
        for _ in 0..frames * channels as usize {
            writer.write_sample(0i16)?;
        }
        writer.finalize()?;

        // One line per event: onset window and label. Full DCASE
        // serialization belongs to the real engine.
        let mut label_file = fs::File::create(label_path)?;
        for event in &self.events {
            writeln!(
                label_file,
                "{:.3},{:.3},{}",
                event.window.start_s, event.window.end_s, event.label
            )?;
        }

        log::info!(
            "offline scene for room {}: {} events, background={}, {:.1}s @ {}Hz",
            self.spec.room,
            self.events.len(),
            self.background,
            self.spec.duration_s,
            self.spec.sample_rate
        );
        log::warn!("offline engine: spatial rendering not performed, audio is silent");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneFormat;
    use crate::scheduler::TimeWindow;
    use hound::WavReader;
    use tempfile::TempDir;

    fn test_spec() -> SceneSpec {
        SceneSpec {
            room: "arni".to_string(),
            format: SceneFormat::Foa,
            duration_s: 0.5,
            sample_rate: 8000,
            ref_db: -50.0,
            max_event_overlap: 2,
            dcase_format: true,
        }
    }

    fn test_event(label: &str, start: f64, end: f64) -> EventRequest {
        EventRequest {
            label: label.to_string(),
            window: TimeWindow::new(start, end),
            onset_s: (start + end) / 2.0,
            snr_range_db: (5.0, 7.0),
        }
    }

    #[test]
    fn test_generate_writes_silent_foa_wav() {
        let temp_dir = TempDir::new().unwrap();
        let audio_path = temp_dir.path().join("clip.wav");
        let label_path = temp_dir.path().join("clip.csv");

        let engine = OfflineEngine::new();
        let mut scene = engine.begin_scene(&test_spec()).unwrap();
        scene.add_background().unwrap();
        scene.add_event(&test_event("bell", 0.0, 0.25)).unwrap();
        scene.generate(&audio_path, &label_path).unwrap();

        let mut reader = WavReader::open(&audio_path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 4);
        assert_eq!(spec.sample_rate, 8000);

        // 0.5s at 8kHz, 4 channels
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), 4000 * 4);
        assert!(samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_generate_writes_one_label_line_per_event() {
        let temp_dir = TempDir::new().unwrap();
        let audio_path = temp_dir.path().join("clip.wav");
        let label_path = temp_dir.path().join("clip.csv");

        let engine = OfflineEngine::new();
        let mut scene = engine.begin_scene(&test_spec()).unwrap();
        scene.add_event(&test_event("bell", 0.0, 0.25)).unwrap();
        scene
            .add_event(&test_event("doorCupboard", 0.25, 0.5))
            .unwrap();
        scene.generate(&audio_path, &label_path).unwrap();

        let contents = fs::read_to_string(&label_path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "0.000,0.250,bell");
        assert_eq!(lines[1], "0.250,0.500,doorCupboard");
    }

    #[test]
    fn test_generate_without_events_writes_empty_labels() {
        let temp_dir = TempDir::new().unwrap();
        let audio_path = temp_dir.path().join("clip.wav");
        let label_path = temp_dir.path().join("clip.csv");

        let engine = OfflineEngine::new();
        let mut scene = engine.begin_scene(&test_spec()).unwrap();
        scene.generate(&audio_path, &label_path).unwrap();

        assert!(audio_path.exists());
        assert_eq!(fs::read_to_string(&label_path).unwrap(), "");
    }
}
