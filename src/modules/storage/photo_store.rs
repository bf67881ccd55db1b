use uuid::Uuid;

use crate::core::config::MediaConfig;
use crate::core::error::{AppError, Result};

/// Content types accepted for uploaded photos
pub const ALLOWED_PHOTO_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// A photo received from a multipart form, held in memory until the
/// submission it belongs to has validated.
#[derive(Debug, Clone)]
pub struct UploadedPhoto {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// Disk-backed store for uploaded photos. Entities keep the relative path
/// this store returns; serving the files back is not this component's job.
pub struct PhotoStore {
    config: MediaConfig,
}

impl PhotoStore {
    pub fn new(config: MediaConfig) -> Self {
        Self { config }
    }

    /// Create the photo directory if it does not exist yet.
    pub async fn ensure_photo_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.config.photo_dir).await
    }

    /// Field-level checks, run before anything touches the disk.
    pub fn check(&self, photo: &UploadedPhoto) -> std::result::Result<(), String> {
        if photo.data.is_empty() {
            return Err("Uploaded photo is empty".to_string());
        }

        if photo.data.len() > self.config.max_photo_size {
            return Err(format!(
                "Photo too large. Maximum size is {} bytes",
                self.config.max_photo_size
            ));
        }

        if !ALLOWED_PHOTO_TYPES.contains(&photo.content_type.as_str()) {
            return Err(format!(
                "Photo type '{}' is not allowed. Allowed types: {}",
                photo.content_type,
                ALLOWED_PHOTO_TYPES.join(", ")
            ));
        }

        Ok(())
    }

    fn extension_for(photo: &UploadedPhoto) -> &str {
        match photo.content_type.as_str() {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            _ => photo.file_name.rsplit('.').next().unwrap_or("bin"),
        }
    }

    /// Write the photo under the photo directory with a generated name and
    /// return the relative path stored on the entity (e.g. "photo/<uuid>.jpg").
    pub async fn store(&self, photo: &UploadedPhoto) -> Result<String> {
        let file_name = format!("{}.{}", Uuid::new_v4(), Self::extension_for(photo));
        let path = self.config.photo_dir.join(&file_name);

        tokio::fs::write(&path, &photo.data).await.map_err(|e| {
            tracing::error!("Failed to write photo {}: {}", path.display(), e);
            AppError::Internal("Failed to store uploaded photo".to_string())
        })?;

        tracing::debug!("Photo stored: {}", path.display());

        let dir_name = self
            .config
            .photo_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(format!("{}/{}", dir_name, file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn store_with_limit(max_photo_size: usize) -> PhotoStore {
        PhotoStore::new(MediaConfig {
            photo_dir: PathBuf::from("media/photo"),
            max_photo_size,
        })
    }

    fn jpeg_photo(size: usize) -> UploadedPhoto {
        UploadedPhoto {
            data: vec![0u8; size],
            file_name: "hammer.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
        }
    }

    #[test]
    fn test_check_accepts_image() {
        let store = store_with_limit(1024);
        assert!(store.check(&jpeg_photo(512)).is_ok());
    }

    #[test]
    fn test_check_rejects_oversize() {
        let store = store_with_limit(1024);
        let err = store.check(&jpeg_photo(2048)).unwrap_err();
        assert!(err.contains("too large"));
    }

    #[test]
    fn test_check_rejects_non_image() {
        let store = store_with_limit(1024);
        let photo = UploadedPhoto {
            data: vec![1, 2, 3],
            file_name: "notes.pdf".to_string(),
            content_type: "application/pdf".to_string(),
        };
        let err = store.check(&photo).unwrap_err();
        assert!(err.contains("not allowed"));
    }

    #[test]
    fn test_check_rejects_empty() {
        let store = store_with_limit(1024);
        assert!(store.check(&jpeg_photo(0)).is_err());
    }

    #[test]
    fn test_extension_follows_content_type() {
        assert_eq!(PhotoStore::extension_for(&jpeg_photo(1)), "jpg");
        let webp = UploadedPhoto {
            data: vec![0],
            file_name: "x.bin".to_string(),
            content_type: "image/webp".to_string(),
        };
        assert_eq!(PhotoStore::extension_for(&webp), "webp");
    }
}
