// Data models for the clip manifest
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One generated (or attempted) clip in a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Zero-based index within the batch
    pub clip_index: u32,
    pub room: String,
    pub n_events: u32,
    pub snr_lo_db: f64,
    pub snr_hi_db: f64,
    pub audio_path: String,
    pub label_path: String,
    /// SHA-256 of the audio artifact; empty until the clip is complete
    pub audio_sha256: String,
    pub status: ClipStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipStatus {
    Pending,
    Complete,
    Failed,
}

impl ClipStatus {
    pub fn to_string(&self) -> String {
        match self {
            ClipStatus::Pending => "pending".to_string(),
            ClipStatus::Complete => "complete".to_string(),
            ClipStatus::Failed => "failed".to_string(),
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "pending" => ClipStatus::Pending,
            "complete" => ClipStatus::Complete,
            "failed" => ClipStatus::Failed,
            _ => ClipStatus::Pending,
        }
    }
}
