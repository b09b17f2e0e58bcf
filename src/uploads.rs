//! Local storage for property images.
//!
//! Files land in `<root>/properties/` under a content-addressed name; only
//! the public URL is persisted in the database.

use crate::config::UploadConfig;
use crate::error::{AppError, AppResult};
use axum::body::Bytes;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const PUBLIC_PREFIX: &str = "/uploads";
const PROPERTY_DIR: &str = "properties";
const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

/// A file received in a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Writes uploaded images below the upload root
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    max_bytes: usize,
}

impl UploadStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            root: config.dir.clone(),
            max_bytes: config.max_bytes,
        }
    }

    /// Directory served under `/uploads`
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Create `<root>/properties` if missing
    pub async fn ensure_dirs(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(self.root.join(PROPERTY_DIR)).await?;
        Ok(())
    }

    /// Validate and persist one property image, returning its public URL
    pub async fn save_property_image(&self, file: &UploadedFile) -> AppResult<String> {
        let extension = self.validate(file)?;
        let name = stored_name(&file.data, &extension);

        let dir = self.root.join(PROPERTY_DIR);
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(&name);
        // Same content, same name: nothing to rewrite
        if tokio::fs::try_exists(&path).await? {
            return Ok(public_url(&name));
        }
        tokio::fs::write(&path, &file.data).await?;

        info!(
            "Stored upload {} ({} bytes) as {}",
            file.file_name.as_deref().unwrap_or("<unnamed>"),
            file.data.len(),
            name
        );
        Ok(public_url(&name))
    }

    /// Remove a stored file given its public URL.
    ///
    /// URLs that do not point inside the upload root are ignored.
    pub async fn remove_by_url(&self, url: &str) -> AppResult<()> {
        let Some(name) = url
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .and_then(|rest| rest.strip_prefix(PROPERTY_DIR))
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            return Ok(());
        };

        if name.is_empty() || name.contains('/') || name.contains("..") {
            warn!("Refusing to remove suspicious upload path {}", url);
            return Ok(());
        }

        match tokio::fs::remove_file(self.root.join(PROPERTY_DIR).join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn validate(&self, file: &UploadedFile) -> AppResult<String> {
        if file.data.is_empty() {
            return Err(AppError::Validation(format!(
                "Uploaded file in field '{}' is empty",
                file.field
            )));
        }

        if file.data.len() > self.max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Uploaded file exceeds {} bytes",
                self.max_bytes
            )));
        }

        let extension = file
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .ok_or_else(|| AppError::Validation("Uploaded file needs an extension".to_string()))?;

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AppError::Validation(format!(
                "Unsupported image type .{} (allowed: {})",
                extension,
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }

        Ok(extension)
    }
}

fn stored_name(data: &[u8], extension: &str) -> String {
    let digest = Sha256::digest(data);
    format!("{}.{}", &hex::encode(digest)[..32], extension)
}

fn public_url(name: &str) -> String {
    format!("{}/{}/{}", PUBLIC_PREFIX, PROPERTY_DIR, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path, max_bytes: usize) -> UploadStore {
        UploadStore::new(&UploadConfig {
            dir: dir.to_path_buf(),
            max_bytes,
        })
    }

    fn image(name: &str, data: &'static [u8]) -> UploadedFile {
        UploadedFile {
            field: "images".to_string(),
            file_name: Some(name.to_string()),
            content_type: Some("image/jpeg".to_string()),
            data: Bytes::from_static(data),
        }
    }

    #[test]
    fn test_stored_name_is_content_addressed() {
        let a = stored_name(b"same bytes", "jpg");
        let b = stored_name(b"same bytes", "jpg");
        let c = stored_name(b"other bytes", "jpg");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 32 + ".jpg".len());
    }

    #[tokio::test]
    async fn test_save_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path(), 1024);

        let url = store.save_property_image(&image("Front.JPG", b"jpeg-bytes")).await.unwrap();
        assert!(url.starts_with("/uploads/properties/"));
        assert!(url.ends_with(".jpg"));

        let name = url.rsplit('/').next().unwrap();
        let written = std::fs::read(dir.path().join("properties").join(name)).unwrap();
        assert_eq!(written, b"jpeg-bytes");
    }

    #[tokio::test]
    async fn test_rejects_bad_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path(), 4);

        let err = store.save_property_image(&image("a.png", b"")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = store.save_property_image(&image("a.exe", b"MZ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = store.save_property_image(&image("noext", b"ab")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = store.save_property_image(&image("big.png", b"12345")).await.unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }

    #[tokio::test]
    async fn test_remove_by_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path(), 1024);
        let url = store.save_property_image(&image("x.webp", b"webp")).await.unwrap();

        store.remove_by_url(&url).await.unwrap();
        let name = url.rsplit('/').next().unwrap();
        assert!(!dir.path().join("properties").join(name).exists());

        // Removing again, or removing foreign URLs, is a no-op
        store.remove_by_url(&url).await.unwrap();
        store.remove_by_url("https://cdn.example.com/a.jpg").await.unwrap();
        store.remove_by_url("/uploads/properties/../secret").await.unwrap();
    }
}
