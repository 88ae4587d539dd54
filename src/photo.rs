/// Project photos
///
/// Photos are stored inline on the project as `data:` URIs.
/// The bytes are kept as picked: no resizing or re-encoding.
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::PathBuf;

use crate::error::PhotoError;

/// Extensions offered by the photo picker
pub const PHOTO_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Read an image file and turn it into a `data:` URI.
/// Runs on the async runtime so the UI keeps responding.
pub async fn load_photo(path: PathBuf) -> Result<String, PhotoError> {
    let bytes = tokio::fs::read(&path).await.map_err(|e| PhotoError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let uri = encode_data_uri(&bytes)?;
    tracing::info!("Loaded photo {} ({} KB)", path.display(), bytes.len() / 1024);
    Ok(uri)
}

/// Wrap raw image bytes in a `data:` URI, using the detected format's MIME type
pub fn encode_data_uri(bytes: &[u8]) -> Result<String, PhotoError> {
    let format = image::guess_format(bytes).map_err(|_| PhotoError::NotAnImage)?;
    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        STANDARD.encode(bytes)
    ))
}

/// Extract the bytes of a base64 `data:` URI.
/// Anything malformed is treated as "no photo".
pub fn decode_data_uri(uri: &str) -> Option<Vec<u8>> {
    let (header, payload) = uri.strip_prefix("data:")?.split_once(',')?;
    if !header.ends_with(";base64") {
        return None;
    }
    STANDARD.decode(payload.trim()).ok()
}
