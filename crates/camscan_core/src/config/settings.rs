//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Camera stream settings.
    #[serde(default)]
    pub stream: StreamSettings,

    /// Decode and preprocessing settings.
    #[serde(default)]
    pub decode: DecodeSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Path configuration for output, frames, and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Output folder for exports and annotated frames.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Folder for log files.
    #[serde(default = "default_logs_dir")]
    pub logs_dir: String,

    /// File that decoded payloads are appended to.
    #[serde(default = "default_decoded_log")]
    pub decoded_log: String,
}

fn default_output_dir() -> String {
    "scan_output".to_string()
}

fn default_logs_dir() -> String {
    ".logs".to_string()
}

fn default_decoded_log() -> String {
    "decoded_objects.txt".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            logs_dir: default_logs_dir(),
            decoded_log: default_decoded_log(),
        }
    }
}

/// Camera stream configuration.
///
/// The default URL matches the CameraWebServer firmware, which serves
/// the MJPEG stream on port 81 under `/stream`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSettings {
    /// Default camera URL used when `scan` is invoked without a source.
    #[serde(default = "default_camera_url")]
    pub camera_url: String,

    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Per-request timeout in milliseconds (snapshot mode only; the
    /// MJPEG stream read has no overall deadline).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_camera_url() -> String {
    "http://192.168.1.100:81/stream".to_string()
}

fn default_connect_timeout() -> u64 {
    5_000
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            camera_url: default_camera_url(),
            connect_timeout_ms: default_connect_timeout(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

/// Decode and preprocessing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeSettings {
    /// Run the preprocess ladder (blur/sharpen/threshold) when the
    /// plain frame yields nothing.
    #[serde(default = "default_true")]
    pub preprocess_ladder: bool,

    /// Gaussian blur sigma for the preprocess ladder.
    #[serde(default = "default_blur_sigma")]
    pub blur_sigma: f32,

    /// Weight of the grey image in the sharpen blend.
    #[serde(default = "default_sharpen_weight")]
    pub sharpen_weight: f32,

    /// Weight of the blurred image in the sharpen blend (negative).
    #[serde(default = "default_blur_weight")]
    pub blur_weight: f32,

    /// Binary threshold applied as the last ladder stage.
    #[serde(default = "default_threshold")]
    pub threshold: u8,

    /// Suppress payloads already seen this session.
    #[serde(default = "default_true")]
    pub dedupe: bool,
}

fn default_true() -> bool {
    true
}

fn default_blur_sigma() -> f32 {
    5.0
}

fn default_sharpen_weight() -> f32 {
    2.5
}

fn default_blur_weight() -> f32 {
    -1.5
}

fn default_threshold() -> u8 {
    100
}

impl Default for DecodeSettings {
    fn default() -> Self {
        Self {
            preprocess_ladder: true,
            blur_sigma: default_blur_sigma(),
            sharpen_weight: default_sharpen_weight(),
            blur_weight: default_blur_weight(),
            threshold: default_threshold(),
            dedupe: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default log level when RUST_LOG is not set.
    #[serde(default)]
    pub level: LogLevel,

    /// Also write a daily-rolling log file into the logs folder.
    #[serde(default)]
    pub log_to_file: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            log_to_file: false,
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Paths,
    Stream,
    Decode,
    Logging,
}

impl ConfigSection {
    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Stream => "stream",
            ConfigSection::Decode => "decode",
            ConfigSection::Logging => "logging",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[stream]"));
        assert!(toml.contains("camera_url"));
    }

    #[test]
    fn settings_round_trip() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.paths.output_dir, settings.paths.output_dir);
        assert_eq!(parsed.stream.camera_url, settings.stream.camera_url);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[stream]\ncamera_url = \"http://10.0.0.9:81/stream\"";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        // Custom value preserved
        assert_eq!(parsed.stream.camera_url, "http://10.0.0.9:81/stream");
        // Defaults applied for missing
        assert_eq!(parsed.paths.decoded_log, "decoded_objects.txt");
        assert_eq!(parsed.decode.threshold, 100);
        assert!(parsed.decode.preprocess_ladder);
    }
}
