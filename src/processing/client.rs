use tracing::error;

use crate::processing::error::{ProcessingError, Result};
use crate::processing::types::{EncodedImage, FilterSet, ProcessRequest, ProcessResponse};

/// Path of the processing operation on the filter service.
const PROCESS_PATH: &str = "process_image";

/// HTTP client for the remote filter service.
///
/// One logical request per submission — no timeout, no retry, no
/// cancellation. The body is decoded regardless of HTTP status: the
/// service reports failures as `{"error": …}` bodies on 4xx/5xx.
pub struct FilterClient {
    http: reqwest::Client,
}

impl FilterClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ProcessingError::Transport(format!("could not build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// Send one encoded image to `{base}/process_image` and decode the
    /// typed response.
    pub async fn process(&self, base: &str, image: &EncodedImage) -> Result<FilterSet> {
        let url = format!("{}/{PROCESS_PATH}", base.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .json(&ProcessRequest {
                image: image.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                error!("request to {url} failed: {e}");
                ProcessingError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("reading response body from {url} failed: {e}");
            ProcessingError::Transport(e.to_string())
        })?;

        match serde_json::from_str::<ProcessResponse>(&body) {
            Ok(ProcessResponse::Success(set)) => Ok(set),
            Ok(ProcessResponse::Failure { error }) => Err(ProcessingError::Server(error)),
            Err(e) => {
                error!("unparseable response from {url} (status {status}): {e}");
                Err(ProcessingError::Transport(format!(
                    "response was not valid JSON: {e}"
                )))
            }
        }
    }
}
