use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, Rgb};

use crate::capture::error::{CaptureError, Result};
use crate::capture::session::{CaptureSession, Frame};
use crate::processing::types::EncodedImage;

/// Minimum plausible length for an encoded still. Anything shorter is
/// treated as a failed grab.
pub const MIN_PAYLOAD_CHARS: usize = 1000;

/// Undo the mirrored preview by reversing each pixel row.
pub fn flip_horizontal(frame: &Frame) -> Vec<u8> {
    let row_bytes = (frame.width * 3) as usize;
    let mut flipped = Vec::with_capacity(frame.data.len());
    for row in frame.data.chunks_exact(row_bytes) {
        for pixel in row.chunks_exact(3).rev() {
            flipped.extend_from_slice(pixel);
        }
    }
    flipped
}

/// Compress raw RGB pixel data to JPEG at the given quality (1-100).
pub fn encode_jpeg(data: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>> {
    let img: ImageBuffer<Rgb<u8>, _> = ImageBuffer::from_raw(width, height, data)
        .ok_or_else(|| CaptureError::Stream(format!("frame data does not match {width}x{height}")))?;

    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    img.write_with_encoder(encoder)
        .map_err(|e| CaptureError::Stream(format!("JPEG encoding failed: {e}")))?;
    Ok(buf)
}

/// Grab one still from the live stream as a JPEG data URI.
///
/// Requires the stream to have buffered at least one frame. The frame is
/// un-mirrored, encoded at the frame's native resolution, and rejected if
/// the encoded payload falls under [`MIN_PAYLOAD_CHARS`] — all before any
/// network involvement.
pub fn grab_still(session: &CaptureSession, quality: u8) -> Result<EncodedImage> {
    if !session.is_ready() {
        return Err(CaptureError::NotReady);
    }
    let frame = session.latest_frame().ok_or(CaptureError::NotReady)?;

    let unmirrored = flip_horizontal(&frame);
    let jpeg = encode_jpeg(&unmirrored, frame.width, frame.height, quality)?;
    let image = EncodedImage::from_bytes("image/jpeg", &jpeg);

    if image.len() < MIN_PAYLOAD_CHARS {
        return Err(CaptureError::PayloadTooSmall(image.len()));
    }
    Ok(image)
}
