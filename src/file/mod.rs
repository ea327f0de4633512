//! File uploads and storage.

pub mod service;
pub mod storage;

pub use service::{FileService, MAX_IMAGE_BYTES, UploadError, sanitize_filename};
pub use storage::{FileStorage, LocalFileStorage};
