//! HTTP MJPEG stream client.
//!
//! Connects to the CameraWebServer stream endpoint (`:81/stream`) and
//! yields frames as they arrive. The body is read incrementally; frames
//! are split on JPEG markers, so the multipart framing the firmware
//! emits never needs to be parsed.

use std::io::Read;
use std::time::Duration;

use image::DynamicImage;

use super::jpeg::FrameAssembler;
use super::{FrameSource, SourceError};
use crate::config::StreamSettings;

const CHUNK_SIZE: usize = 8 * 1024;

/// Blocking MJPEG-over-HTTP frame source.
pub struct MjpegStream {
    url: String,
    response: reqwest::blocking::Response,
    assembler: FrameAssembler,
    frames_read: u64,
}

impl MjpegStream {
    /// Connect to an MJPEG stream endpoint.
    pub fn open(url: &str, settings: &StreamSettings) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_millis(settings.connect_timeout_ms))
            // The stream never ends; no overall request deadline.
            .timeout(None)
            .build()
            .map_err(|e| SourceError::ConnectFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let response = client
            .get(url)
            .send()
            .map_err(|e| SourceError::ConnectFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SourceError::ConnectFailed {
                url: url.to_string(),
                message: format!("HTTP status {}", response.status()),
            });
        }

        tracing::debug!("[MJPEG] Connected to {}", url);

        Ok(Self {
            url: url.to_string(),
            response,
            assembler: FrameAssembler::new(),
            frames_read: 0,
        })
    }
}

impl FrameSource for MjpegStream {
    fn next_frame(&mut self) -> Result<Option<DynamicImage>, SourceError> {
        let mut chunk = [0u8; CHUNK_SIZE];

        loop {
            if let Some(jpeg) = self.assembler.next_frame() {
                let frame = image::load_from_memory(&jpeg)
                    .map_err(|e| SourceError::BadFrame(e.to_string()))?;
                self.frames_read += 1;
                tracing::trace!(
                    "[MJPEG] Frame {} ({} bytes)",
                    self.frames_read,
                    jpeg.len()
                );
                return Ok(Some(frame));
            }

            let n = self.response.read(&mut chunk)?;
            if n == 0 {
                // Camera closed the connection.
                tracing::debug!(
                    "[MJPEG] Stream ended after {} frames ({} bytes pending)",
                    self.frames_read,
                    self.assembler.pending()
                );
                return Ok(None);
            }
            self.assembler.extend(&chunk[..n]);
        }
    }

    fn describe(&self) -> String {
        format!("MJPEG stream {}", self.url)
    }
}
