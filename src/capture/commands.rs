use std::path::PathBuf;

use base64::Engine;
use tauri::State;

use crate::capture::error::CaptureError;
use crate::capture::{still, upload};
use crate::context::AppContext;
use crate::display::slots::DisplayState;
use crate::error::UserNotice;
use crate::processing::types::EncodedImage;

/// JPEG quality for preview frames pushed to the frontend.
const PREVIEW_QUALITY: u8 = 75;

/// Capture a still from the live camera and submit it for processing.
#[tauri::command]
pub async fn capture_and_submit(ctx: State<'_, AppContext>) -> Result<DisplayState, UserNotice> {
    let image = still::grab_still(&ctx.camera, ctx.settings.jpeg_quality())?;
    submit(&ctx, image).await
}

/// Read a selected file and submit its bytes unmodified.
#[tauri::command]
pub async fn submit_file(
    ctx: State<'_, AppContext>,
    path: String,
) -> Result<DisplayState, UserNotice> {
    let path = PathBuf::from(path);
    let image = upload::read_file_as_data_uri(&path).await?;
    ctx.set_selected_file(Some(path));
    submit(&ctx, image).await
}

/// Whether the camera has buffered at least one frame.
#[tauri::command]
pub async fn camera_ready(ctx: State<'_, AppContext>) -> Result<bool, UserNotice> {
    Ok(ctx.camera.is_ready())
}

/// Latest live frame as base64 JPEG, for the preview element.
#[tauri::command]
pub async fn preview_frame(ctx: State<'_, AppContext>) -> Result<String, UserNotice> {
    let frame = ctx.camera.latest_frame().ok_or(CaptureError::NotReady)?;
    let jpeg = still::encode_jpeg(&frame.data, frame.width, frame.height, PREVIEW_QUALITY)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(&jpeg))
}

/// Shared submission path: register a ticket, post the image, decode the
/// typed response, commit unless superseded, and report the current
/// display state.
///
/// On any failure the slots keep their prior content.
pub(crate) async fn submit(
    ctx: &AppContext,
    image: EncodedImage,
) -> Result<DisplayState, UserNotice> {
    let ticket = ctx.display.begin_request();
    let endpoint = ctx.settings.endpoint();

    let set = ctx.client.process(&endpoint, &image).await?;

    if !ctx.display.commit(ticket, set) {
        tracing::debug!("discarding response for a superseded request");
    }
    Ok(ctx.display.state())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::test_context;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// One-shot HTTP server answering a single request with `body`.
    fn mock_server(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut byte = [0u8; 1];
            while !head.ends_with(b"\r\n\r\n") {
                stream.read_exact(&mut byte).unwrap();
                head.push(byte[0]);
            }
            let head = String::from_utf8_lossy(&head).to_string();
            let content_length = head
                .lines()
                .find_map(|line| {
                    line.to_ascii_lowercase()
                        .strip_prefix("content-length:")
                        .map(|v| v.trim().to_string())
                })
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(0);
            let mut request_body = vec![0u8; content_length];
            stream.read_exact(&mut request_body).unwrap();

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        format!("http://{addr}")
    }

    const SIX_SLOT_BODY: &str =
        r#"{"original":"a","grayscale":"b","binary":"c","negative":"d","sepia":"e","cartoon":"f"}"#;

    #[tokio::test]
    async fn submit_populates_all_six_slots_verbatim() {
        let (ctx, _dir) = test_context();
        ctx.settings.set_endpoint(mock_server(SIX_SLOT_BODY));

        let image = EncodedImage::from_bytes("image/jpeg", b"payload");
        let state = submit(&ctx, image).await.unwrap();

        let set = state.slots.unwrap();
        assert_eq!(set.original, "a");
        assert_eq!(set.grayscale, "b");
        assert_eq!(set.binary, "c");
        assert_eq!(set.negative, "d");
        assert_eq!(set.sepia, "e");
        assert_eq!(set.cartoon, "f");
    }

    #[tokio::test]
    async fn server_error_leaves_slots_untouched() {
        let (ctx, _dir) = test_context();

        // Populate first
        ctx.settings.set_endpoint(mock_server(SIX_SLOT_BODY));
        let image = EncodedImage::from_bytes("image/jpeg", b"payload");
        submit(&ctx, image.clone()).await.unwrap();

        // Then fail
        ctx.settings.set_endpoint(mock_server(r#"{"error":"bad image"}"#));
        let notice = submit(&ctx, image).await.unwrap_err();

        assert!(notice.message.contains("bad image"));
        let set = ctx.display.state().slots.unwrap();
        assert_eq!(set.original, "a");
    }

    #[tokio::test]
    async fn transport_failure_leaves_slots_empty() {
        let (ctx, _dir) = test_context();
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        ctx.settings.set_endpoint(format!("http://127.0.0.1:{port}"));

        let image = EncodedImage::from_bytes("image/jpeg", b"payload");
        let notice = submit(&ctx, image).await.unwrap_err();

        assert!(notice.message.starts_with("❌"));
        assert!(ctx.display.is_empty());
    }

    #[tokio::test]
    async fn capture_happy_path_submits_the_camera_still() {
        let (ctx, _dir) = test_context();
        ctx.settings.set_endpoint(mock_server(SIX_SLOT_BODY));

        let image = still::grab_still(&ctx.camera, ctx.settings.jpeg_quality()).unwrap();
        assert!(image.as_str().starts_with("data:image/jpeg;base64,"));

        let state = submit(&ctx, image).await.unwrap();
        assert_eq!(state.slots.unwrap().cartoon, "f");
    }

    #[test]
    fn preview_frame_is_base64_jpeg() {
        let (ctx, _dir) = test_context();
        let frame = ctx.camera.latest_frame().unwrap();
        let jpeg = still::encode_jpeg(&frame.data, frame.width, frame.height, PREVIEW_QUALITY)
            .unwrap();
        let b64 = base64::engine::general_purpose::STANDARD.encode(&jpeg);

        let decoded = base64::engine::general_purpose::STANDARD.decode(b64).unwrap();
        assert_eq!(decoded[0], 0xFF);
        assert_eq!(decoded[1], 0xD8);
    }
}
