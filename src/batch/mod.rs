// Batch generation driver
// One schedule per clip, one engine invocation per clip; per-clip failures
// are logged and skipped so a bad clip never aborts the sweep

pub mod trace;

// Re-export main types
pub use trace::{read_trace, ClipStage, TraceError, TraceEvent, TraceWriter};

use serde_json::json;
use thiserror::Error;

use crate::config::{ConfigError, GenConfig};
use crate::manifest::{self, ClipStatus, DbError, OutputLayout, StoreError};
use crate::rooms::{self, RoomError};
use crate::scene::{EventRequest, RenderError, SceneEngine, SceneRenderer, SceneSpec};
use crate::scheduler::{build_schedule, EventCatalog, Sampler, ScheduleError};

/// Fatal setup failures; anything per-clip is a [`ClipError`] and skipped
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("room discovery failed: {0}")]
    Rooms(#[from] RoomError),

    #[error("no FOA rooms found under {0}")]
    NoRooms(String),

    #[error("manifest error: {0}")]
    Db(#[from] DbError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("trace error: {0}")]
    Trace(#[from] TraceError),
}

/// Per-clip failure reasons; these are skipped, not fatal
#[derive(Debug, Error)]
pub enum ClipError {
    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("trace error: {0}")]
    Trace(#[from] TraceError),
}

/// Outcome of one successfully generated clip
#[derive(Debug, Clone)]
pub struct ClipOutcome {
    pub clip_index: u32,
    pub stem: String,
    pub room: String,
    pub n_events: u32,
}

/// Counts for a finished batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub requested: u32,
    pub generated: u32,
    pub failed: u32,
}

/// Filename stem carrying the sweep parameters, e.g. `arni_n10_snr5-7_042`
fn clip_stem(room: &str, n_events: u32, snr_range_db: (f64, f64), clip_index: u32) -> String {
    format!(
        "{}_n{}_snr{}-{}_{:03}",
        room, n_events, snr_range_db.0, snr_range_db.1, clip_index
    )
}

/// Generate one clip: pick a room, draw the event count, build the
/// schedule, and drive the engine
///
/// `rooms` must be non-empty; the batch loop checks this once up front.
pub fn generate_clip<E: SceneEngine>(
    clip_index: u32,
    rooms: &[String],
    catalog: &EventCatalog,
    config: &GenConfig,
    layout: &OutputLayout,
    engine: &E,
    sampler: &mut impl Sampler,
    tracer: &TraceWriter,
) -> Result<ClipOutcome, ClipError> {
    let room = rooms[sampler.uniform_int(0, rooms.len() as u32 - 1) as usize].clone();
    let n_events = sampler.uniform_int(config.events_range.0, config.events_range.1);

    let schedule = build_schedule(
        config.duration_s,
        n_events as usize,
        config.time_slots,
        catalog,
        sampler,
    )?;
    tracer.append(&TraceEvent::with_detail(
        clip_index,
        ClipStage::Scheduled,
        format!("{} events across {} slots", n_events, config.time_slots),
        json!({ "room": room.as_str(), "n_events": n_events }),
    ))?;

    let spec = SceneSpec {
        room: room.clone(),
        format: config.format,
        duration_s: config.duration_s,
        sample_rate: config.sample_rate,
        ref_db: config.ref_db,
        max_event_overlap: config.max_event_overlap,
        dcase_format: config.dcase_format,
    };

    let mut scene = engine.begin_scene(&spec)?;
    scene.add_background()?;
    for event in schedule.iter() {
        scene.add_event(&EventRequest::from_scheduled(event, config.snr_range_db))?;
    }

    let stem = clip_stem(&room, n_events, config.snr_range_db, clip_index);
    let audio_path = layout.audio_file(&stem);
    let label_path = layout.label_file(&stem);
    scene.generate(&audio_path, &label_path)?;
    tracer.append(&TraceEvent::new(
        clip_index,
        ClipStage::Rendered,
        stem.clone(),
    ))?;

    Ok(ClipOutcome {
        clip_index,
        stem,
        room,
        n_events,
    })
}

/// Run a full batch: discover rooms, set up the output tree and manifest,
/// then generate `num_clips` clips
///
/// Per-clip failures are logged and skipped; the run only aborts on setup
/// failures (bad config, unreadable RIR dataset, manifest IO).
pub fn run_batch<E: SceneEngine>(
    config: &GenConfig,
    engine: &E,
    sampler: &mut impl Sampler,
) -> Result<BatchSummary, BatchError> {
    let catalog = config.validate()?;

    let available_rooms = rooms::discover_foa_rooms(&config.rir_dir)?;
    if available_rooms.is_empty() {
        return Err(BatchError::NoRooms(config.rir_dir.display().to_string()));
    }
    log::info!(
        "found {} FOA rooms: {:?}",
        available_rooms.len(),
        available_rooms
    );

    let layout = OutputLayout::new(config.output_dir.clone());
    layout.ensure()?;
    let db = manifest::init_db(&layout.manifest_path())?;
    let tracer = TraceWriter::new(layout.trace_path());

    let mut summary = BatchSummary {
        requested: config.num_clips,
        ..BatchSummary::default()
    };

    log::info!("generating {} soundscapes...", config.num_clips);
    for clip_index in 0..config.num_clips {
        let result = generate_clip(
            clip_index,
            &available_rooms,
            &catalog,
            config,
            &layout,
            engine,
            sampler,
            &tracer,
        );

        match result {
            Ok(outcome) => {
                let record = manifest::create_clip(
                    &db,
                    outcome.clip_index,
                    outcome.room.clone(),
                    outcome.n_events,
                    config.snr_range_db,
                    layout.audio_file(&outcome.stem).display().to_string(),
                    layout.label_file(&outcome.stem).display().to_string(),
                )?;

                let audio_sha256 = manifest::hash_file(&layout.audio_file(&outcome.stem))?;
                manifest::update_clip_status(
                    &db,
                    &record.id,
                    ClipStatus::Complete,
                    Some(&audio_sha256),
                )?;
                tracer.append(&TraceEvent::with_detail(
                    clip_index,
                    ClipStage::Completed,
                    outcome.stem.clone(),
                    json!({ "room": outcome.room.as_str(), "n_events": outcome.n_events }),
                ))?;

                summary.generated += 1;
                log::info!(
                    "generated soundscape {}/{}: {}",
                    clip_index + 1,
                    config.num_clips,
                    outcome.stem
                );
            }
            Err(e) => {
                log::error!("failed to generate soundscape {}: {}", clip_index + 1, e);
                tracer.append(&TraceEvent::new(clip_index, ClipStage::Failed, e.to_string()))?;
                summary.failed += 1;
            }
        }
    }

    log::info!(
        "batch finished: {} generated, {} failed of {} requested",
        summary.generated,
        summary.failed,
        summary.requested
    );
    Ok(summary)
}
