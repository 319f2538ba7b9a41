//! Upload persistence.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Writes uploads into a single directory, keyed by sanitized filename.
///
/// Same-named uploads overwrite each other; concurrent writes to one name
/// are last-writer-wins.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Opens the store, creating the directory if it is absent.
    pub async fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stores `bytes` under `filename`, which must be a single path segment.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        if !is_single_segment(filename) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a plain filename: {:?}", filename),
            ));
        }

        let path = self.dir.join(filename);
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), size = bytes.len(), "Stored upload");
        Ok(path)
    }
}

fn is_single_segment(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_creates_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("uploads");

        let store = UploadStore::open(&dir).await.unwrap();
        assert!(store.dir().is_dir());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let root = tempfile::tempdir().unwrap();
        let store = UploadStore::open(root.path()).await.unwrap();

        let first = store.save("a.jpg", b"first").await.unwrap();
        let second = store.save("a.jpg", b"second").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read(&second).unwrap(), b"second");
        assert_eq!(second.parent(), Some(root.path()));
    }

    #[tokio::test]
    async fn test_save_rejects_paths() {
        let root = tempfile::tempdir().unwrap();
        let store = UploadStore::open(root.path()).await.unwrap();

        for name in ["", ".", "..", "../x.jpg", "a/b.jpg", "a\\b.jpg"] {
            let err = store.save(name, b"x").await.unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{name:?}");
        }
    }
}
