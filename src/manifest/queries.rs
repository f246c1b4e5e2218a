// Manifest CRUD operations
use chrono::Utc;
use rusqlite::params;
use uuid::Uuid;

use super::db::{DbConnection, DbResult};
use super::models::{ClipRecord, ClipStatus};

/// Insert a new clip row in `Pending` state and return the record
pub fn create_clip(
    db: &DbConnection,
    clip_index: u32,
    room: String,
    n_events: u32,
    snr_range_db: (f64, f64),
    audio_path: String,
    label_path: String,
) -> DbResult<ClipRecord> {
    let record = ClipRecord {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        clip_index,
        room,
        n_events,
        snr_lo_db: snr_range_db.0,
        snr_hi_db: snr_range_db.1,
        audio_path,
        label_path,
        audio_sha256: String::new(),
        status: ClipStatus::Pending,
    };

    let conn = db.lock();
    conn.execute(
        "INSERT INTO clips (id, created_at, clip_index, room, n_events, snr_lo_db, snr_hi_db, audio_path, label_path, audio_sha256, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            record.id.to_string(),
            record.created_at.to_rfc3339(),
            record.clip_index,
            record.room,
            record.n_events,
            record.snr_lo_db,
            record.snr_hi_db,
            record.audio_path,
            record.label_path,
            record.audio_sha256,
            record.status.to_string(),
        ],
    )?;

    Ok(record)
}

/// Update a clip's status, optionally recording the audio artifact hash
pub fn update_clip_status(
    db: &DbConnection,
    id: &Uuid,
    status: ClipStatus,
    audio_sha256: Option<&str>,
) -> DbResult<()> {
    let conn = db.lock();
    match audio_sha256 {
        Some(hash) => {
            conn.execute(
                "UPDATE clips SET status = ?1, audio_sha256 = ?2 WHERE id = ?3",
                params![status.to_string(), hash, id.to_string()],
            )?;
        }
        None => {
            conn.execute(
                "UPDATE clips SET status = ?1 WHERE id = ?2",
                params![status.to_string(), id.to_string()],
            )?;
        }
    }
    Ok(())
}

/// Get a clip by ID
pub fn get_clip(db: &DbConnection, id: &Uuid) -> DbResult<Option<ClipRecord>> {
    let conn = db.lock();
    let mut stmt = conn.prepare(
        "SELECT id, created_at, clip_index, room, n_events, snr_lo_db, snr_hi_db, audio_path, label_path, audio_sha256, status
         FROM clips WHERE id = ?1",
    )?;

    let result = stmt.query_row([id.to_string()], map_clip_row);

    match result {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List all clips in batch order
pub fn list_clips(db: &DbConnection) -> DbResult<Vec<ClipRecord>> {
    let conn = db.lock();
    let mut stmt = conn.prepare(
        "SELECT id, created_at, clip_index, room, n_events, snr_lo_db, snr_hi_db, audio_path, label_path, audio_sha256, status
         FROM clips ORDER BY clip_index ASC",
    )?;

    let clips = stmt
        .query_map([], map_clip_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(clips)
}

/// Count clips with the given status
pub fn count_by_status(db: &DbConnection, status: ClipStatus) -> DbResult<i64> {
    let conn = db.lock();
    let count = conn.query_row(
        "SELECT COUNT(*) FROM clips WHERE status = ?1",
        [status.to_string()],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn map_clip_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ClipRecord> {
    Ok(ClipRecord {
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
        created_at: row.get::<_, String>(1)?.parse().unwrap(),
        clip_index: row.get(2)?,
        room: row.get(3)?,
        n_events: row.get(4)?,
        snr_lo_db: row.get(5)?,
        snr_hi_db: row.get(6)?,
        audio_path: row.get(7)?,
        label_path: row.get(8)?,
        audio_sha256: row.get(9)?,
        status: ClipStatus::from_string(&row.get::<_, String>(10)?),
    })
}
