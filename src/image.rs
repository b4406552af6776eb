//! Image attachments for questions
//!
//! Stands in for the browser's file picker: a file is read into memory, its
//! media type is guessed from the extension, and a data URL is available for
//! previewing it before submission.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Media types the backend accepts
pub const SUPPORTED_MEDIA_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "image/heic",
    "image/heif",
];

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Could not read image {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported image type: {media_type}. Please use JPEG, PNG, WEBP, GIF, HEIC or HEIF.")]
    Unsupported { media_type: String },
}

/// An image selected for the next question
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageAttachment {
    /// Build an attachment from in-memory bytes, guessing the media type
    /// from the file name.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Unsupported`] unless the name maps to one of the
    /// supported image types.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ImageError> {
        let file_name = file_name.into();
        let media_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        if !SUPPORTED_MEDIA_TYPES.contains(&media_type.as_str()) {
            return Err(ImageError::Unsupported { media_type });
        }

        Ok(Self {
            file_name,
            media_type,
            bytes,
        })
    }

    /// Read an attachment from disk
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not a supported image type.
    pub async fn load(path: &Path) -> Result<Self, ImageError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ImageError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;

        let file_name = path
            .file_name()
            .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());

        Self::from_bytes(file_name, bytes)
    }

    /// `data:` URL for previewing the image
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, BASE64.encode(&self.bytes))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
