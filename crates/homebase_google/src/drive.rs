//! Google Drive file download.

use futures_util::StreamExt;
use homebase_config::DriveSettings;
use homebase_error::{HomebaseResult, HttpError};
use reqwest::Client;
use tracing::{debug, error, info, instrument};

/// Downloads file content from Google Drive with an OAuth access token.
#[derive(Clone)]
pub struct DriveClient {
    client: Client,
    access_token: String,
    base_url: String,
}

impl std::fmt::Debug for DriveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl DriveClient {
    /// Creates a client for the given access token.
    pub fn new(access_token: impl Into<String>, settings: &DriveSettings) -> Self {
        Self {
            client: Client::new(),
            access_token: access_token.into(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Download a file's raw bytes.
    ///
    /// Progress is logged as the body streams in when the server reports a
    /// content length.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] if the request fails, the server answers
    /// with a non-success status, or the body stream breaks.
    #[instrument(skip(self), fields(file_id = %file_id))]
    pub async fn download_file(&self, file_id: &str) -> HomebaseResult<Vec<u8>> {
        let url = format!("{}/drive/v3/files/{}", self.base_url, file_id);
        debug!(url = %url, "Requesting file media");

        let response = self
            .client
            .get(&url)
            .query(&[("alt", "media")])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Drive request failed");
                HttpError::new(format!("An error occurred: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Drive API returned error");
            return Err(HttpError::status(
                status.as_u16(),
                format!("An error occurred: {} {}", status, body),
            )
            .into());
        }

        let total = response.content_length();
        let mut content = Vec::with_capacity(initial_capacity(total));
        let mut last_percent = None;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| HttpError::new(format!("An error occurred: {}", e)))?;
            content.extend_from_slice(&chunk);

            if let Some(total) = total.filter(|total| *total > 0) {
                let percent = (content.len() as u64 * 100 / total).min(100);
                if last_percent != Some(percent) {
                    debug!(percent, "Download {}%.", percent);
                    last_percent = Some(percent);
                }
            }
        }

        info!(bytes = content.len(), "Download complete");
        Ok(content)
    }
}

/// Largest buffer reserved up front from a server-reported length.
const MAX_PREALLOCATION: u64 = 8 << 20;

fn initial_capacity(content_length: Option<u64>) -> usize {
    content_length.unwrap_or(0).min(MAX_PREALLOCATION) as usize
}
