// Batch run tracing
// Append-only JSONL log of per-clip progress

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Stage of one clip's generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipStage {
    /// Schedule built, events assigned to slots
    Scheduled,

    /// Engine finished writing audio and label artifacts
    Rendered,

    /// Clip recorded in the manifest
    Completed,

    /// Clip skipped after an error
    Failed,
}

/// A single entry in the batch trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    /// ISO 8601 timestamp of when this entry was created
    pub timestamp: String,

    /// Zero-based clip index within the batch
    pub clip_index: u32,

    pub stage: ClipStage,

    /// Human-readable message describing the step
    pub message: String,

    /// Optional structured data (room, event count, artifact paths)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl TraceEvent {
    pub fn new(clip_index: u32, stage: ClipStage, message: impl Into<String>) -> Self {
        TraceEvent {
            timestamp: Utc::now().to_rfc3339(),
            clip_index,
            stage,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(
        clip_index: u32,
        stage: ClipStage,
        message: impl Into<String>,
        detail: serde_json::Value,
    ) -> Self {
        TraceEvent {
            timestamp: Utc::now().to_rfc3339(),
            clip_index,
            stage,
            message: message.into(),
            detail: Some(detail),
        }
    }

    fn to_json_line(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(format!("{}\n", json))
    }
}

/// Appends trace events to a JSONL file, creating it on first write
pub struct TraceWriter {
    file_path: PathBuf,
}

impl TraceWriter {
    pub fn new(file_path: PathBuf) -> Self {
        TraceWriter { file_path }
    }

    pub fn append(&self, event: &TraceEvent) -> Result<(), TraceError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;

        let json_line = event.to_json_line()?;
        file.write_all(json_line.as_bytes())?;
        file.flush()?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

/// Read all trace events from a JSONL file
pub fn read_trace(path: &Path) -> Result<Vec<TraceEvent>, TraceError> {
    let contents = std::fs::read_to_string(path)?;
    let mut events = Vec::new();

    for line in contents.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let event: TraceEvent = serde_json::from_str(line)?;
        events.push(event);
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_trace_event_creation() {
        let event = TraceEvent::new(3, ClipStage::Scheduled, "10 events across 4 slots");

        assert_eq!(event.clip_index, 3);
        assert_eq!(event.stage, ClipStage::Scheduled);
        assert_eq!(event.message, "10 events across 4 slots");
        assert!(event.detail.is_none());
    }

    #[test]
    fn test_trace_event_with_detail() {
        let detail = serde_json::json!({
            "room": "arni",
            "n_events": 10
        });

        let event = TraceEvent::with_detail(0, ClipStage::Completed, "generated", detail);
        assert_eq!(event.detail.as_ref().unwrap()["room"], "arni");
        assert_eq!(event.detail.as_ref().unwrap()["n_events"], 10);
    }

    #[test]
    fn test_append_and_read_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let trace_path = temp_dir.path().join("trace.jsonl");

        let writer = TraceWriter::new(trace_path.clone());
        writer
            .append(&TraceEvent::new(0, ClipStage::Scheduled, "scheduled"))
            .unwrap();
        writer
            .append(&TraceEvent::new(0, ClipStage::Rendered, "rendered"))
            .unwrap();
        writer
            .append(&TraceEvent::new(1, ClipStage::Failed, "engine error"))
            .unwrap();

        let events = read_trace(&trace_path).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].stage, ClipStage::Scheduled);
        assert_eq!(events[1].stage, ClipStage::Rendered);
        assert_eq!(events[2].clip_index, 1);
        assert_eq!(events[2].stage, ClipStage::Failed);
    }

    #[test]
    fn test_json_line_format() {
        let event = TraceEvent::new(7, ClipStage::Completed, "done");
        let line = event.to_json_line().unwrap();

        assert!(line.ends_with('\n'));

        let parsed: TraceEvent = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(parsed.clip_index, 7);
        assert_eq!(parsed.stage, ClipStage::Completed);
    }

    #[test]
    fn test_stage_serializes_lowercase() {
        let json = serde_json::to_string(&ClipStage::Scheduled).unwrap();
        assert_eq!(json, "\"scheduled\"");
    }
}
