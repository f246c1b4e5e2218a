// Output tree layout and artifact hashing
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Output tree for one batch run
///
/// Audio lands in `<root>/audio`, labels in `<root>/labels`; the manifest
/// database and the run trace sit at the root.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: PathBuf) -> Self {
        OutputLayout { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.root.join("audio")
    }

    pub fn labels_dir(&self) -> PathBuf {
        self.root.join("labels")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("manifest.db")
    }

    pub fn trace_path(&self) -> PathBuf {
        self.root.join("trace.jsonl")
    }

    /// Create the audio and label directories
    pub fn ensure(&self) -> StoreResult<()> {
        fs::create_dir_all(self.audio_dir())?;
        fs::create_dir_all(self.labels_dir())?;
        Ok(())
    }

    pub fn audio_file(&self, stem: &str) -> PathBuf {
        self.audio_dir().join(format!("{}.wav", stem))
    }

    pub fn label_file(&self, stem: &str) -> PathBuf {
        self.labels_dir().join(format!("{}.csv", stem))
    }
}

/// SHA-256 of a file's contents, hex encoded
pub fn hash_file(path: &Path) -> StoreResult<String> {
    let data = fs::read(path)?;
    Ok(hash_bytes(&data))
}

/// SHA-256 of a byte slice, hex encoded
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_hash_bytes() {
        let hash = hash_bytes(b"hello world");
        assert_eq!(
            hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_hash_file_matches_hash_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("artifact.bin");
        fs::write(&path, b"hello world").unwrap();

        assert_eq!(hash_file(&path).unwrap(), hash_bytes(b"hello world"));
    }

    #[test]
    fn test_layout_paths() {
        let layout = OutputLayout::new(PathBuf::from("output/soundscapes"));

        assert_eq!(
            layout.audio_file("arni_n10_snr5-7_000"),
            PathBuf::from("output/soundscapes/audio/arni_n10_snr5-7_000.wav")
        );
        assert_eq!(
            layout.label_file("arni_n10_snr5-7_000"),
            PathBuf::from("output/soundscapes/labels/arni_n10_snr5-7_000.csv")
        );
        assert_eq!(
            layout.manifest_path(),
            PathBuf::from("output/soundscapes/manifest.db")
        );
    }

    #[test]
    fn test_ensure_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let layout = OutputLayout::new(temp_dir.path().join("soundscapes"));

        layout.ensure().unwrap();
        assert!(layout.audio_dir().is_dir());
        assert!(layout.labels_dir().is_dir());
    }
}
