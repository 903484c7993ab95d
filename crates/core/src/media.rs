//! Media classification and upload constraints.
//!
//! Uploaded files are stored with a coarse `image`/`video` discriminator
//! derived from the declared MIME type. Size and type limits match what the
//! admin frontend enforces: a 10MB cap on every upload, plus a stricter MIME
//! allow-list on car creation only.

use serde::{Deserialize, Serialize};

/// Maximum accepted upload size in bytes (10MB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// MIME types accepted when creating a car.
///
/// Other resources only enforce the global size cap. The asymmetry is
/// inherited from the admin frontend and is deliberate for now.
pub const CAR_CREATE_ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "video/mp4"];

/// Stored media discriminator. Persisted as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// The database/text representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

/// Classify a MIME type: anything under `image/` is an image, everything else
/// is treated as video.
pub fn media_type_from_mime(mime: &str) -> MediaType {
    if mime.starts_with("image") {
        MediaType::Image
    } else {
        MediaType::Video
    }
}

/// Build the public URL for a stored upload from the configured base URL.
pub fn public_url(base_url: &str, filename: &str) -> String {
    format!("{}/uploads/{filename}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_mime() {
        assert_eq!(media_type_from_mime("image/jpeg"), MediaType::Image);
        assert_eq!(media_type_from_mime("image/png"), MediaType::Image);
        assert_eq!(media_type_from_mime("video/mp4"), MediaType::Video);
        // Non-image falls through to video, matching the upload pipeline.
        assert_eq!(media_type_from_mime("application/pdf"), MediaType::Video);
    }

    #[test]
    fn test_public_url_joins_cleanly() {
        assert_eq!(
            public_url("https://cdn.example.com", "media-1.jpg"),
            "https://cdn.example.com/uploads/media-1.jpg"
        );
        // Trailing slash on the base URL must not double up.
        assert_eq!(
            public_url("https://cdn.example.com/", "media-1.jpg"),
            "https://cdn.example.com/uploads/media-1.jpg"
        );
    }
}
