use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// An image received from a form submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-supplied name; never trusted as a path.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct UploadService {
    upload_dir: PathBuf,
}

impl UploadService {
    #[must_use]
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    #[must_use]
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Writes the image under its sanitized name and returns that name.
    ///
    /// Returns `None` without touching the disk when no usable file was sent.
    /// An existing file with the same name is overwritten.
    pub async fn save_image(&self, upload: Option<ImageUpload>) -> Result<Option<String>> {
        let Some(upload) = upload else {
            return Ok(None);
        };

        let filename = secure_filename(&upload.file_name);
        if filename.is_empty() || upload.bytes.is_empty() {
            debug!(original = %upload.file_name, "Skipping empty upload");
            return Ok(None);
        }

        if !self.upload_dir.exists() {
            fs::create_dir_all(&self.upload_dir).await.with_context(|| {
                format!(
                    "Failed to create upload directory {}",
                    self.upload_dir.display()
                )
            })?;
        }

        let file_path = self.upload_dir.join(&filename);
        fs::write(&file_path, &upload.bytes)
            .await
            .with_context(|| format!("Failed to write image to {}", file_path.display()))?;

        info!(path = %file_path.display(), size = upload.bytes.len(), "Stored uploaded image");
        Ok(Some(filename))
    }
}

/// Reduces a client filename to a flat, ASCII-only name safe to join onto the
/// upload directory.
///
/// Path separators become word breaks, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9._-]` is dropped and leading/trailing dots and
/// underscores are stripped. The result may be empty.
#[must_use]
pub fn secure_filename(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    filtered.trim_matches(|c| c == '.' || c == '_').to_string()
}
