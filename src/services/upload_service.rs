//! Standalone image upload.

use crate::error::{AppError, AppResult};
use crate::storage::ImageStore;
use crate::utils::filename;

/// A file received from a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name.
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Result of storing an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Public URL path of the stored file.
    pub path: String,
    /// Original file name.
    pub name: String,
    /// Generated on-disk file name.
    pub stored_name: String,
}

/// Rejects files that are not images or exceed the size limit.
///
/// Shared by the standalone upload endpoint and book cover handling; no
/// file is written when validation fails.
pub fn validate_image(file: &UploadedFile, max_bytes: u64) -> AppResult<()> {
    if !file.content_type.starts_with("image/") {
        return Err(AppError::validation(
            "file",
            "Only image files are allowed",
        ));
    }
    if file.bytes.is_empty() {
        return Err(AppError::validation("file", "File must not be empty"));
    }
    if file.bytes.len() as u64 > max_bytes {
        return Err(AppError::validation(
            "file",
            "File size must not exceed 5 MB",
        ));
    }
    Ok(())
}

/// Stores standalone uploads under timestamped names.
///
/// Touches no catalog tables; callers wire the returned path into a later
/// book create or update.
#[derive(Clone)]
pub struct UploadService {
    store: ImageStore,
    max_bytes: u64,
}

impl UploadService {
    pub fn new(store: ImageStore, max_bytes: u64) -> Self {
        Self { store, max_bytes }
    }

    pub async fn store(&self, file: UploadedFile) -> AppResult<StoredUpload> {
        validate_image(&file, self.max_bytes)?;

        let stored_name = filename::upload_filename(&file.name);
        let path = self.store.save(&stored_name, &file.bytes).await?;
        Ok(StoredUpload {
            path,
            name: file.name,
            stored_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;

    fn png(bytes: Vec<u8>) -> UploadedFile {
        UploadedFile {
            name: "cover.png".to_string(),
            content_type: "image/png".to_string(),
            bytes,
        }
    }

    fn service(dir: &std::path::Path) -> UploadService {
        let store = ImageStore::new(&StorageConfig {
            public_dir: dir.to_path_buf(),
            public_prefix: "/public".to_string(),
            max_upload_bytes: 64,
        });
        UploadService::new(store, 64)
    }

    #[test]
    fn validate_rejects_non_image() {
        let file = UploadedFile {
            name: "notes.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(matches!(
            validate_image(&file, 64),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn validate_rejects_oversized_file() {
        let file = png(vec![0u8; 65]);
        assert!(validate_image(&file, 64).is_err());
        assert!(validate_image(&png(vec![0u8; 64]), 64).is_ok());
    }

    #[tokio::test]
    async fn store_writes_file_and_reports_names() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());

        let stored = service.store(png(vec![1, 2, 3])).await.unwrap();

        assert_eq!(stored.name, "cover.png");
        assert!(stored.stored_name.ends_with(".png"));
        assert_eq!(stored.path, format!("/public/{}", stored.stored_name));
        assert!(dir.path().join(&stored.stored_name).exists());
    }

    #[tokio::test]
    async fn rejected_upload_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());
        let file = UploadedFile {
            name: "payload.bin".to_string(),
            content_type: "application/octet-stream".to_string(),
            bytes: vec![1],
        };

        assert!(service.store(file).await.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
