//! Image upload handling: validation, storage, and public URLs.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::file::storage::FileStorage;

/// Maximum accepted image size (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Upload failures, split so routes can answer 400 vs 500.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("image exceeds the {} MiB limit", MAX_IMAGE_BYTES / (1024 * 1024))]
    TooLarge,

    #[error("file is not a supported image")]
    NotAnImage,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// File service handling image uploads.
pub struct FileService {
    storage: Arc<dyn FileStorage>,
}

impl FileService {
    /// Create a new file service.
    pub fn new(storage: Arc<dyn FileStorage>) -> Self {
        Self { storage }
    }

    /// Validate and store an uploaded image; returns the public URL.
    ///
    /// The content type is sniffed from the bytes rather than trusted from
    /// the client, and anything over [`MAX_IMAGE_BYTES`] is rejected before
    /// touching storage.
    pub async fn store_image(&self, filename: &str, data: &[u8]) -> Result<String, UploadError> {
        if data.len() > MAX_IMAGE_BYTES {
            return Err(UploadError::TooLarge);
        }

        if !is_image(data) {
            return Err(UploadError::NotAnImage);
        }

        let uri = self.storage.generate_uri(filename);
        self.storage.write(&uri, data).await?;

        let url = self.storage.public_url(&uri);
        info!(uri = %uri, size = data.len(), "image stored");
        Ok(url)
    }
}

/// Sniff whether the bytes are an image (JPEG, PNG, GIF, WebP, ...).
fn is_image(data: &[u8]) -> bool {
    infer::get(data).is_some_and(|kind| kind.matcher_type() == infer::MatcherType::Image)
}

/// Strip any path components and replace unsafe characters with underscores.
pub fn sanitize_filename(filename: &str) -> String {
    let name = std::path::Path::new(filename)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());

    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
