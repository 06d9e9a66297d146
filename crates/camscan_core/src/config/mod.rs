//! Configuration management.
//!
//! TOML settings file with section tables, loaded through a manager
//! that supports atomic saves and section-level updates.

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, DecodeSettings, LoggingSettings, PathSettings, Settings, StreamSettings,
};
