use std::path::PathBuf;

use axum::extract::multipart::Field;
use common::storage::{BlobKey, BlobStore, BoxReader};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::AppError;

/// Image extensions accepted by every upload endpoint.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Lowercased image extension of `filename`, or a validation error.
pub fn image_extension(filename: &str) -> Result<String, AppError> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .ok_or_else(|| AppError::Validation("File must have an image extension".into()))?;

    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::Validation(format!(
            "Unsupported image type '.{ext}': expected one of {}",
            IMAGE_EXTENSIONS.join(", ")
        )));
    }
    Ok(ext)
}

/// An uploaded image spooled to a temp file, not yet in the blob store.
///
/// The temp file is removed when this value is dropped.
pub struct SpooledImage {
    temp_path: PathBuf,
    extension: String,
    size: u64,
}

impl SpooledImage {
    /// Read a multipart `file` field to disk, enforcing the image extension
    /// and `max_size` before anything reaches the store.
    pub async fn from_field(mut field: Field<'_>, max_size: u64) -> Result<Self, AppError> {
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;
        let extension = image_extension(&filename)?;

        let mut spooled = Self {
            temp_path: std::env::temp_dir().join(format!("club-upload-{}", Uuid::new_v4())),
            extension,
            size: 0,
        };
        let mut temp_file = tokio::fs::File::create(&spooled.temp_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create temp file: {e}")))?;

        let mut total_size: u64 = 0;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
        {
            total_size += chunk.len() as u64;
            if total_size > max_size {
                return Err(AppError::PayloadTooLarge { limit: max_size });
            }
            temp_file
                .write_all(&chunk)
                .await
                .map_err(|e| AppError::Internal(format!("Temp file write failed: {e}")))?;
        }

        if total_size == 0 {
            return Err(AppError::Validation("Uploaded file is empty".into()));
        }

        temp_file
            .flush()
            .await
            .map_err(|e| AppError::Internal(format!("Temp file flush failed: {e}")))?;

        spooled.size = total_size;
        Ok(spooled)
    }

    /// Move the image into the blob store under a fresh `<prefix>/<uuid>.<ext>` key.
    pub async fn store(self, prefix: &str, blob_store: &dyn BlobStore) -> Result<BlobKey, AppError> {
        let key = BlobKey::generate(prefix, &self.extension)?;

        let file = tokio::fs::File::open(&self.temp_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to reopen temp file: {e}")))?;
        let reader: BoxReader = Box::new(file);
        blob_store.put_stream(&key, reader).await?;

        tracing::info!(key = %key, size = self.size, "Stored uploaded image");
        Ok(key)
    }
}

/// Remove a stored image whose database record could not be written.
pub async fn discard_stored(blob_store: &dyn BlobStore, key: &BlobKey) {
    match blob_store.delete(key).await {
        Ok(_) => tracing::info!(key = %key, "Removed image left without a record"),
        Err(e) => tracing::warn!(key = %key, error = %e, "Failed to remove orphaned image"),
    }
}

impl Drop for SpooledImage {
    fn drop(&mut self) {
        // Best effort.
        let _ = std::fs::remove_file(&self.temp_path);
    }
}
