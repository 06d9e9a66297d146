//! Snapshot-per-frame HTTP source.
//!
//! Some firmware builds only expose a still-capture URL on the root
//! port, so each frame is a full GET. A failed request is logged and
//! retried; only a run of consecutive failures gives up, matching the
//! print-and-continue behavior of reading a flaky camera by hand.

use std::time::Duration;

use image::DynamicImage;

use super::jpeg::{extract_last_jpeg, looks_like_jpeg};
use super::{FrameSource, SourceError};
use crate::config::StreamSettings;

const DEFAULT_FAILURE_BUDGET: u32 = 5;

/// One-GET-per-frame source for still-capture endpoints.
pub struct SnapshotSource {
    url: String,
    client: reqwest::blocking::Client,
    consecutive_failures: u32,
    failure_budget: u32,
}

impl SnapshotSource {
    /// Create a snapshot source for the given URL.
    pub fn open(url: &str, settings: &StreamSettings) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_millis(settings.connect_timeout_ms))
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .build()
            .map_err(|e| SourceError::ConnectFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            url: url.to_string(),
            client,
            consecutive_failures: 0,
            failure_budget: DEFAULT_FAILURE_BUDGET,
        })
    }

    fn fetch_once(&self) -> Result<Vec<u8>, String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("HTTP status {}", response.status()));
        }

        let body = response.bytes().map_err(|e| e.to_string())?;

        if looks_like_jpeg(&body) {
            Ok(body.to_vec())
        } else {
            extract_last_jpeg(&body).ok_or_else(|| "response contained no JPEG frame".to_string())
        }
    }
}

impl FrameSource for SnapshotSource {
    fn next_frame(&mut self) -> Result<Option<DynamicImage>, SourceError> {
        loop {
            match self.fetch_once() {
                Ok(jpeg) => {
                    self.consecutive_failures = 0;
                    let frame = image::load_from_memory(&jpeg)
                        .map_err(|e| SourceError::BadFrame(e.to_string()))?;
                    return Ok(Some(frame));
                }
                Err(message) => {
                    self.consecutive_failures += 1;
                    tracing::warn!(
                        "[Snapshot] Request to {} failed ({}/{}): {}",
                        self.url,
                        self.consecutive_failures,
                        self.failure_budget,
                        message
                    );
                    if self.consecutive_failures >= self.failure_budget {
                        return Err(SourceError::RequestFailed {
                            url: self.url.clone(),
                            attempts: self.consecutive_failures,
                            message,
                        });
                    }
                }
            }
        }
    }

    fn describe(&self) -> String {
        format!("snapshot endpoint {}", self.url)
    }
}
