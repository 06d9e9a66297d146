//! Frame acquisition.
//!
//! Provides frames from the camera endpoints the firmware exposes, or
//! from local files/devices, through multiple backends:
//! - MJPEG HTTP stream (CameraWebServer `:81/stream`)
//! - Single-JPEG snapshot endpoint (one GET per frame)
//! - FFmpeg subprocess (video files and local capture devices)
//!
//! # Usage
//!
//! ```no_run
//! use camscan_core::config::StreamSettings;
//! use camscan_core::source::{open_source, SourceSpec};
//!
//! let spec = SourceSpec::parse("http://192.168.1.100:81/stream", false);
//! let mut source = open_source(&spec, &StreamSettings::default()).unwrap();
//! while let Some(frame) = source.next_frame().unwrap() {
//!     // process frame
//! }
//! ```

mod ffmpeg;
mod jpeg;
mod mjpeg;
mod snapshot;

use std::path::PathBuf;

use image::DynamicImage;

pub use ffmpeg::FfmpegSource;
pub use jpeg::{looks_like_jpeg, FrameAssembler};
pub use mjpeg::MjpegStream;
pub use snapshot::SnapshotSource;

use crate::config::StreamSettings;

/// Errors that can occur while acquiring frames.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Failed to open the stream URL.
    #[error("Failed to connect to '{url}': {message}")]
    ConnectFailed { url: String, message: String },

    /// Snapshot requests kept failing past the retry budget.
    #[error("Request to '{url}' failed {attempts} times in a row: {message}")]
    RequestFailed {
        url: String,
        attempts: u32,
        message: String,
    },

    /// Failed to read stream data.
    #[error("Failed to read frame data: {0}")]
    ReadFailed(#[from] std::io::Error),

    /// Frame bytes did not decode as an image.
    #[error("Invalid frame data: {0}")]
    BadFrame(String),

    /// Failed to open a local file or device.
    #[error("Failed to open '{path}': {message}")]
    OpenFailed { path: PathBuf, message: String },

    /// FFmpeg not available.
    #[error("FFmpeg not found or not executable")]
    FfmpegNotFound,
}

/// Trait for frame sources.
///
/// Implementations deliver decoded frames one at a time. `Ok(None)`
/// signals a clean end of stream.
pub trait FrameSource {
    /// Read the next frame, blocking until one is available.
    fn next_frame(&mut self) -> Result<Option<DynamicImage>, SourceError>;

    /// Human-readable description of the source for logs.
    fn describe(&self) -> String;
}

/// Where frames come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// HTTP MJPEG stream endpoint.
    Stream(String),
    /// HTTP still-capture endpoint, fetched once per frame.
    Snapshot(String),
    /// Video file read through FFmpeg.
    File(PathBuf),
    /// Local capture device index (`/dev/video<n>`).
    Device(u32),
}

impl SourceSpec {
    /// Parse a CLI source argument.
    ///
    /// URLs become stream sources (or snapshot sources when requested),
    /// bare integers select a capture device, anything else is a file
    /// path.
    pub fn parse(input: &str, snapshot: bool) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            if snapshot {
                SourceSpec::Snapshot(input.to_string())
            } else {
                SourceSpec::Stream(input.to_string())
            }
        } else if let Ok(index) = input.parse::<u32>() {
            SourceSpec::Device(index)
        } else {
            SourceSpec::File(PathBuf::from(input))
        }
    }
}

/// Open a frame source for the given spec.
pub fn open_source(
    spec: &SourceSpec,
    settings: &StreamSettings,
) -> Result<Box<dyn FrameSource>, SourceError> {
    match spec {
        SourceSpec::Stream(url) => Ok(Box::new(MjpegStream::open(url, settings)?)),
        SourceSpec::Snapshot(url) => Ok(Box::new(SnapshotSource::open(url, settings)?)),
        SourceSpec::File(path) => Ok(Box::new(FfmpegSource::open_file(path)?)),
        SourceSpec::Device(index) => Ok(Box::new(FfmpegSource::open_device(*index)?)),
    }
}
