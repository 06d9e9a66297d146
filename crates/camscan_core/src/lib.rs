//! camscan core - backend logic for the ESP32-CAM scanning toolkit.
//!
//! This crate contains all capture, decode, and export logic with zero
//! CLI dependencies. It is driven by the `camscan` binary but can be
//! embedded anywhere else.

pub mod assets;
pub mod config;
pub mod decode;
pub mod groups;
pub mod logging;
pub mod scanner;
pub mod source;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
