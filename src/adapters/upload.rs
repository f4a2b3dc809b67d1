use crate::domain::model::ImageUpload;
use crate::utils::error::{CrmError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

/// Guess an image MIME type from the file extension. Unknown extensions map to
/// `application/octet-stream`, which upload validation rejects.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Read a local file into an upload request, base64-encoding its bytes.
pub async fn read_image_file(path: &Path, content_type: Option<&str>) -> Result<ImageUpload> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        CrmError::invalid_argument("file", format!("cannot read {}: {}", path.display(), e))
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::debug!("Loaded {} ({} bytes)", path.display(), bytes.len());

    Ok(ImageUpload {
        base64_data: STANDARD.encode(&bytes),
        file_name,
        content_type: content_type
            .map(str::to_string)
            .unwrap_or_else(|| content_type_for(path).to_string()),
        size_in_bytes: bytes.len() as i64,
    })
}
