//! Multipart form handling and local disk storage for uploads.
//!
//! Admin create/update endpoints send `multipart/form-data`: scalar fields as
//! text parts, array fields (`tags`, `variants`, `mediaFiles`, `cars`) as
//! JSON-encoded strings, and uploads under the `media` part name. Files are
//! written to the configured upload directory and served back under
//! `/uploads/{filename}`.

use std::collections::BTreeMap;
use std::path::Path;

use axum::extract::Multipart;
use rand::Rng;
use serde::de::DeserializeOwned;

use showroom_core::media::{media_type_from_mime, public_url, MediaType, MAX_UPLOAD_BYTES};

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// An upload that has been validated and written to disk.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Generated on-disk filename.
    pub filename: String,
    /// Public URL clients use to fetch the file.
    pub url: String,
    /// Coarse image/video discriminator derived from the MIME type.
    pub media_type: MediaType,
}

/// A parsed multipart form: text fields plus stored uploads.
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: BTreeMap<String, String>,
    pub files: Vec<StoredFile>,
}

impl UploadForm {
    /// Drain a multipart stream, storing every file part to disk.
    ///
    /// Each file is checked against the 10MB cap; `allowed_mimes` additionally
    /// restricts the declared MIME type where an endpoint enforces one.
    pub async fn collect(
        multipart: &mut Multipart,
        config: &ServerConfig,
        allowed_mimes: Option<&[&str]>,
    ) -> AppResult<Self> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(original_name) = field.file_name() {
                let original_name = original_name.to_string();
                let mime = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

                if data.len() > MAX_UPLOAD_BYTES {
                    return Err(AppError::field(
                        "media",
                        "File size must not exceed 10MB",
                    ));
                }
                if let Some(allowed) = allowed_mimes {
                    if !allowed.contains(&mime.as_str()) {
                        return Err(AppError::field("media", "File type is not allowed"));
                    }
                }

                let filename = generate_filename(&original_name);
                write_to_disk(&config.upload_dir, &filename, &data).await?;

                form.files.push(StoredFile {
                    url: public_url(&config.base_url, &filename),
                    media_type: media_type_from_mime(&mime),
                    filename,
                });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Malformed form field: {e}")))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// A text field, if present and non-empty.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// A required text field, or a 422 keyed on the field name.
    pub fn require_text(&self, name: &str) -> AppResult<&str> {
        self.text(name)
            .ok_or_else(|| AppError::field(name, &format!("The {name} field is required")))
    }

    /// A JSON-encoded array field. Absent or empty means an empty list.
    pub fn json_array<T: DeserializeOwned>(&self, name: &str) -> AppResult<Vec<T>> {
        match self.text(name) {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(raw)
                .map_err(|_| AppError::field(name, &format!("The {name} field is malformed"))),
        }
    }

    /// Whether the form carried a JSON array under `name` at all, empty or not.
    ///
    /// Distinguishes "sync to this list" from "remove everything" on promo
    /// updates, where an absent `cars` field clears the links.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

/// `media-{unix_millis}-{random}{ext}`, keeping the original extension.
fn generate_filename(original: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random: u32 = rand::rng().random_range(0..1_000_000_000);
    let ext = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("media-{millis}-{random}{ext}")
}

async fn write_to_disk(upload_dir: &str, filename: &str, data: &[u8]) -> AppResult<()> {
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
    tokio::fs::write(Path::new(upload_dir).join(filename), data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_filenames_keep_extension_and_differ() {
        let a = generate_filename("photo.JPG");
        let b = generate_filename("photo.JPG");
        assert!(a.starts_with("media-"));
        assert!(a.ends_with(".JPG"));
        assert_ne!(a, b);

        // No extension stays bare.
        let c = generate_filename("raw");
        assert!(!c.contains('.'));
    }
}
