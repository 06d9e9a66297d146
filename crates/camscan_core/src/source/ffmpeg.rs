//! FFmpeg subprocess frame source.
//!
//! Covers video files and local capture devices: FFmpeg transcodes the
//! input to an MJPEG stream on stdout (`image2pipe`), which is split on
//! JPEG markers like the HTTP stream. Works everywhere FFmpeg is
//! installed, with no linkage against libav.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use image::DynamicImage;

use super::jpeg::FrameAssembler;
use super::{FrameSource, SourceError};

const CHUNK_SIZE: usize = 32 * 1024;

/// Frame source backed by an `ffmpeg` child process.
pub struct FfmpegSource {
    input: String,
    child: Child,
    stdout: ChildStdout,
    assembler: FrameAssembler,
    finished: bool,
}

impl FfmpegSource {
    /// Open a video file.
    pub fn open_file(path: &Path) -> Result<Self, SourceError> {
        if !path.exists() {
            return Err(SourceError::OpenFailed {
                path: path.to_path_buf(),
                message: "File does not exist".to_string(),
            });
        }

        let input = path.to_string_lossy().into_owned();
        Self::spawn(&input, &[])
    }

    /// Open a local capture device by index (`/dev/video<n>`).
    pub fn open_device(index: u32) -> Result<Self, SourceError> {
        let device = format!("/dev/video{index}");
        if !PathBuf::from(&device).exists() {
            return Err(SourceError::OpenFailed {
                path: PathBuf::from(&device),
                message: "Capture device does not exist".to_string(),
            });
        }

        Self::spawn(&device, &["-f", "v4l2"])
    }

    /// Check if FFmpeg is available.
    pub fn is_available() -> bool {
        Command::new("ffmpeg")
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn spawn(input: &str, input_args: &[&str]) -> Result<Self, SourceError> {
        if !Self::is_available() {
            return Err(SourceError::FfmpegNotFound);
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.args(["-hide_banner", "-loglevel", "error"])
            .args(input_args)
            .args(["-i", input])
            .args(["-f", "image2pipe", "-vcodec", "mjpeg", "-q:v", "2", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        tracing::debug!("[FFmpeg] Spawning: ffmpeg {:?} -i {} ...", input_args, input);

        let mut child = cmd.spawn().map_err(|e| SourceError::OpenFailed {
            path: PathBuf::from(input),
            message: e.to_string(),
        })?;

        let stdout = child.stdout.take().ok_or_else(|| SourceError::OpenFailed {
            path: PathBuf::from(input),
            message: "Failed to capture ffmpeg stdout".to_string(),
        })?;

        Ok(Self {
            input: input.to_string(),
            child,
            stdout,
            assembler: FrameAssembler::new(),
            finished: false,
        })
    }
}

impl FrameSource for FfmpegSource {
    fn next_frame(&mut self) -> Result<Option<DynamicImage>, SourceError> {
        if self.finished {
            return Ok(None);
        }

        let mut chunk = [0u8; CHUNK_SIZE];

        loop {
            if let Some(jpeg) = self.assembler.next_frame() {
                let frame = image::load_from_memory(&jpeg)
                    .map_err(|e| SourceError::BadFrame(e.to_string()))?;
                return Ok(Some(frame));
            }

            let n = self.stdout.read(&mut chunk)?;
            if n == 0 {
                self.finished = true;
                let status = self.child.wait()?;
                tracing::debug!("[FFmpeg] Process exited with {}", status);
                return Ok(None);
            }
            self.assembler.extend(&chunk[..n]);
        }
    }

    fn describe(&self) -> String {
        format!("ffmpeg input {}", self.input)
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
