// Room discovery - Enumerates FOA rooms available in the RIR dataset

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Subdirectory of the RIR dataset root holding the SOFA impulse responses
const SOFA_SUBDIR: &str = "spatialscaper_RIRs";

const FOA_SUFFIX: &str = "_foa";
const SOFA_EXT: &str = "sofa";

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("RIR directory not found: {}", .0.display())]
    MissingDir(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// List rooms with first-order-ambisonic impulse responses
///
/// Scans `<rir_dir>/spatialscaper_RIRs` for `*_foa.sofa` files and returns
/// the room names (file stem with the `_foa` suffix stripped), sorted so
/// that a seeded batch run picks the same rooms on every machine.
pub fn discover_foa_rooms(rir_dir: &Path) -> Result<Vec<String>, RoomError> {
    let sofa_dir = rir_dir.join(SOFA_SUBDIR);
    if !sofa_dir.is_dir() {
        return Err(RoomError::MissingDir(sofa_dir));
    }

    let mut rooms = Vec::new();
    for entry in fs::read_dir(&sofa_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(SOFA_EXT) {
            continue;
        }

        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem,
            None => continue,
        };

        if let Some(room) = stem.strip_suffix(FOA_SUFFIX) {
            rooms.push(room.to_string());
        }
    }

    rooms.sort();
    Ok(rooms)
}
