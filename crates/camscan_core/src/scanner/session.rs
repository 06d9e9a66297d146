//! The capture-and-decode loop.
//!
//! One session owns a frame source and drives it to completion:
//! read frame, decode (with the preprocess ladder), de-duplicate,
//! persist, until the stream ends, the frame budget is spent, or a
//! read fails.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::config::DecodeSettings;
use crate::decode::{self, overlay, DecodeError, DecodedObject};
use crate::scanner::sink::DecodedLog;
use crate::source::FrameSource;

/// Errors that abort a session outright.
///
/// Source read failures do not abort; they end the loop with a
/// diagnostic and a normal report.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Decoder failure.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Failed to persist a decoded object or a frame image.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Failed to encode an annotated or saved frame.
    #[error("Failed to save frame image: {0}")]
    FrameSave(#[from] image::ImageError),
}

/// Session options.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Stop after this many frames (None = run until end of stream).
    pub max_frames: Option<u64>,

    /// Write every captured frame as `frame-NNNNNN.jpg` into this
    /// directory.
    pub save_frames: Option<PathBuf>,

    /// Write an outlined copy of each frame that decoded something
    /// into this directory.
    pub annotate: Option<PathBuf>,

    /// Suppress payloads already seen this session.
    pub dedupe: bool,

    /// Decode settings, including the preprocess ladder.
    pub decode: DecodeSettings,
}

/// Counters for one finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Frames read from the source.
    pub frames_read: u64,
    /// Decoded objects across all frames, duplicates included.
    pub objects_decoded: u64,
    /// Objects written to the decoded log (first sighting only when
    /// de-duplication is on).
    pub unique_saved: u64,
}

/// A single capture-and-decode run over one source.
pub struct ScanSession {
    source: Box<dyn FrameSource>,
    log: Option<DecodedLog>,
    options: ScanOptions,
    /// Payloads already persisted this run. Session-lifetime only;
    /// a new run starts clean.
    seen: HashSet<String>,
}

impl ScanSession {
    /// Create a session over an open source.
    ///
    /// `log` is the decoded-objects sink; pass None to only print.
    pub fn new(source: Box<dyn FrameSource>, log: Option<DecodedLog>, options: ScanOptions) -> Self {
        Self {
            source,
            log,
            options,
            seen: HashSet::new(),
        }
    }

    /// Drive the loop to completion and return the counters.
    pub fn run(&mut self) -> Result<ScanReport, ScanError> {
        let mut report = ScanReport::default();

        tracing::info!("Scanning {}", self.source.describe());

        loop {
            if let Some(max) = self.options.max_frames {
                if report.frames_read >= max {
                    tracing::info!("Frame budget of {} reached", max);
                    break;
                }
            }

            let frame = match self.source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    tracing::info!("End of stream");
                    break;
                }
                Err(e) => {
                    // A failed read ends the session, not the process.
                    tracing::warn!("Could not read frame: {}", e);
                    break;
                }
            };
            report.frames_read += 1;

            if let Some(dir) = &self.options.save_frames {
                let path = dir.join(format!("frame-{:06}.jpg", report.frames_read));
                frame.to_rgb8().save(&path)?;
                tracing::trace!("Saved frame to {}", path.display());
            }

            let Some(hit) = decode::decode_with_ladder(&frame, &self.options.decode)? else {
                continue;
            };
            report.objects_decoded += hit.objects.len() as u64;

            tracing::debug!(
                "Frame {} decoded {} object(s) at stage '{}'",
                report.frames_read,
                hit.objects.len(),
                hit.stage.as_str()
            );

            for object in &hit.objects {
                tracing::info!("Type: {}  Data: {}", object.symbology, object.payload);
                if self.record(object)? {
                    report.unique_saved += 1;
                }
            }

            if let Some(dir) = &self.options.annotate {
                let annotated = overlay::annotate(&frame, &hit.objects);
                let path = dir.join(format!("decoded-{:06}.jpg", report.frames_read));
                annotated.save(&path)?;
                tracing::debug!("Wrote annotated frame to {}", path.display());
            }
        }

        tracing::info!(
            "Session finished: {} frames, {} decoded, {} saved",
            report.frames_read,
            report.objects_decoded,
            report.unique_saved
        );

        Ok(report)
    }

    /// Persist one object unless it is a duplicate. Returns whether it
    /// was written.
    fn record(&mut self, object: &DecodedObject) -> Result<bool, ScanError> {
        if self.options.dedupe && !self.seen.insert(object.payload.clone()) {
            tracing::trace!("Duplicate payload suppressed: {}", object.payload);
            return Ok(false);
        }

        if let Some(log) = &mut self.log {
            log.append(object)?;
            tracing::debug!("Recorded {} payload to {}", object.symbology, log.path().display());
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodedObject;
    use crate::source::{FrameSource, SourceError};
    use image::DynamicImage;
    use tempfile::TempDir;

    /// Source that serves a fixed number of blank frames.
    struct BlankFrames {
        remaining: u32,
    }

    impl FrameSource for BlankFrames {
        fn next_frame(&mut self) -> Result<Option<DynamicImage>, SourceError> {
            if self.remaining == 0 {
                return Ok(None);
            }
            self.remaining -= 1;
            Ok(Some(DynamicImage::new_luma8(32, 32)))
        }

        fn describe(&self) -> String {
            "blank test frames".to_string()
        }
    }

    /// Source that fails immediately.
    struct BrokenSource;

    impl FrameSource for BrokenSource {
        fn next_frame(&mut self) -> Result<Option<DynamicImage>, SourceError> {
            Err(SourceError::BadFrame("synthetic failure".to_string()))
        }

        fn describe(&self) -> String {
            "broken test source".to_string()
        }
    }

    fn options() -> ScanOptions {
        ScanOptions {
            dedupe: true,
            ..ScanOptions::default()
        }
    }

    #[test]
    fn blank_stream_produces_empty_report() {
        let mut session = ScanSession::new(Box::new(BlankFrames { remaining: 3 }), None, options());
        let report = session.run().unwrap();
        assert_eq!(report.frames_read, 3);
        assert_eq!(report.objects_decoded, 0);
        assert_eq!(report.unique_saved, 0);
    }

    #[test]
    fn max_frames_bounds_the_loop() {
        let mut session = ScanSession::new(
            Box::new(BlankFrames { remaining: 100 }),
            None,
            ScanOptions {
                max_frames: Some(5),
                ..options()
            },
        );
        let report = session.run().unwrap();
        assert_eq!(report.frames_read, 5);
    }

    #[test]
    fn read_failure_ends_loop_with_report() {
        let mut session = ScanSession::new(Box::new(BrokenSource), None, options());
        let report = session.run().unwrap();
        assert_eq!(report.frames_read, 0);
    }

    #[test]
    fn save_frames_writes_jpegs() {
        let dir = TempDir::new().unwrap();
        let mut session = ScanSession::new(
            Box::new(BlankFrames { remaining: 2 }),
            None,
            ScanOptions {
                save_frames: Some(dir.path().to_path_buf()),
                ..options()
            },
        );
        let report = session.run().unwrap();
        assert_eq!(report.frames_read, 2);
        assert!(dir.path().join("frame-000001.jpg").exists());
        assert!(dir.path().join("frame-000002.jpg").exists());
    }

    #[test]
    fn duplicate_payload_recorded_once() {
        let dir = TempDir::new().unwrap();
        let log_path = dir.path().join("decoded_objects.txt");
        let log = DecodedLog::open(&log_path).unwrap();

        let mut session = ScanSession::new(Box::new(BlankFrames { remaining: 0 }), Some(log), options());

        let object = DecodedObject {
            symbology: "EAN_13".to_string(),
            payload: "8412345678905".to_string(),
            corners: Vec::new(),
        };
        assert!(session.record(&object).unwrap());
        assert!(!session.record(&object).unwrap());

        drop(session);
        let content = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.matches("8412345678905").count(), 1);
    }

    #[test]
    fn dedupe_off_records_every_sighting() {
        let dir = TempDir::new().unwrap();
        let log_path = dir.path().join("decoded_objects.txt");
        let log = DecodedLog::open(&log_path).unwrap();

        let mut session = ScanSession::new(
            Box::new(BlankFrames { remaining: 0 }),
            Some(log),
            ScanOptions {
                dedupe: false,
                ..ScanOptions::default()
            },
        );

        let object = DecodedObject {
            symbology: "QR_CODE".to_string(),
            payload: "twice".to_string(),
            corners: Vec::new(),
        };
        assert!(session.record(&object).unwrap());
        assert!(session.record(&object).unwrap());

        drop(session);
        let content = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.matches("twice").count(), 2);
    }
}
