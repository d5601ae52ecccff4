use std::path::Path;

use crate::capture::error::{CaptureError, Result};
use crate::processing::types::EncodedImage;

/// MIME type used when content sniffing finds nothing.
const UNKNOWN_MIME: &str = "application/octet-stream";

/// Read a user-selected file into a data URI.
///
/// The bytes are forwarded verbatim — no size or type validation and no
/// re-encoding. The MIME type is sniffed from the content.
pub async fn read_file_as_data_uri(path: &Path) -> Result<EncodedImage> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CaptureError::FileRead(format!("{}: {e}", path.display())))?;

    let mime = infer::get(&bytes)
        .map(|kind| kind.mime_type())
        .unwrap_or(UNKNOWN_MIME);

    Ok(EncodedImage::from_bytes(mime, &bytes))
}
