//! Filesystem image storage.
//!
//! Uploaded files land in a public directory that the HTTP server also
//! serves statically; the stored path recorded in the database is the
//! URL path (`/public/<filename>`), not the filesystem path.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::warn;

use crate::config::StorageConfig;
use crate::error::AppResult;

/// Writes and removes image files under the configured public directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    public_dir: PathBuf,
    public_prefix: String,
}

impl ImageStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            public_dir: config.public_dir.clone(),
            public_prefix: config.public_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Writes `bytes` to `<public_dir>/<filename>` and returns the URL path
    /// under which the file is served.
    ///
    /// The directory is created on demand so a fresh deployment works
    /// without manual setup.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> AppResult<String> {
        fs::create_dir_all(&self.public_dir).await?;
        fs::write(self.public_dir.join(filename), bytes).await?;
        Ok(format!("{}/{}", self.public_prefix, filename))
    }

    /// Best-effort removal of a previously stored file by its URL path.
    ///
    /// A missing file is not an error; replacement and deletion flows must
    /// not fail because an old file was already cleaned up.
    pub async fn remove(&self, url_path: &str) {
        let Some(filename) = self.filename_from_url_path(url_path) else {
            warn!(path = url_path, "refusing to remove file outside the public prefix");
            return;
        };
        let file = self.public_dir.join(filename);
        if let Err(error) = fs::remove_file(&file).await {
            if error.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %file.display(), %error, "failed to remove stored image");
            }
        }
    }

    /// Maps a stored URL path back to the bare filename, rejecting anything
    /// outside the public prefix or containing path separators.
    fn filename_from_url_path<'a>(&self, url_path: &'a str) -> Option<&'a str> {
        let rest = url_path.strip_prefix(&self.public_prefix)?;
        let filename = rest.strip_prefix('/')?;
        if filename.is_empty() || filename.contains('/') || filename.contains("..") {
            return None;
        }
        Some(filename)
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path) -> ImageStore {
        ImageStore::new(&StorageConfig {
            public_dir: dir.to_path_buf(),
            public_prefix: "/public".to_string(),
            max_upload_bytes: 5 * 1024 * 1024,
        })
    }

    #[tokio::test]
    async fn save_writes_file_and_returns_url_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let path = store.save("cover-abc123.png", b"png bytes").await.unwrap();

        assert_eq!(path, "/public/cover-abc123.png");
        let on_disk = tokio::fs::read(dir.path().join("cover-abc123.png"))
            .await
            .unwrap();
        assert_eq!(on_disk, b"png bytes");
    }

    #[tokio::test]
    async fn remove_deletes_stored_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let path = store.save("old.png", b"x").await.unwrap();

        store.remove(&path).await;

        assert!(!dir.path().join("old.png").exists());
    }

    #[tokio::test]
    async fn remove_ignores_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store.remove("/public/never-existed.png").await;
    }

    #[tokio::test]
    async fn remove_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        tokio::fs::write(dir.path().join("keep.png"), b"x").await.unwrap();

        store.remove("/public/../keep.png").await;
        store.remove("/elsewhere/keep.png").await;

        assert!(dir.path().join("keep.png").exists());
    }

    #[test]
    fn filename_mapping_strips_prefix() {
        let store = store(Path::new("public"));
        assert_eq!(
            store.filename_from_url_path("/public/a.png"),
            Some("a.png")
        );
        assert_eq!(store.filename_from_url_path("/public/"), None);
        assert_eq!(store.filename_from_url_path("/public/a/b.png"), None);
    }
}
