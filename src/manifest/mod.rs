// Clip manifest - SQLite index of generated clips plus artifact storage
pub mod db;
pub mod models;
pub mod queries;
pub mod storage;

// Re-export main types
pub use db::{init_db, DbConnection, DbError, DbResult};
pub use models::{ClipRecord, ClipStatus};
pub use queries::{count_by_status, create_clip, get_clip, list_clips, update_clip_status};
pub use storage::{hash_bytes, hash_file, OutputLayout, StoreError, StoreResult};
