//! Firmware asset packing.
//!
//! The camera firmware serves its index page from a gzip byte array
//! compiled into the source. This module turns an HTML file into that
//! array: gzip-compress, then render a C-style listing with a byte
//! count comment, ready to paste into the firmware:
//!
//! ```text
//! // 1174 bytes
//! 0x1f, 0x8b, 0x08, ...
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

/// Errors that can occur while packing an asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// Failed to read the input file.
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the output file.
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Compression failed.
    #[error("Compression failed: {0}")]
    Compress(#[from] std::io::Error),
}

/// Gzip-compress raw bytes.
pub fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Render compressed bytes as the firmware listing: a byte-count
/// comment line followed by the comma-separated hex bytes.
pub fn render_c_array(compressed: &[u8]) -> String {
    let mut out = String::with_capacity(compressed.len() * 6 + 32);
    out.push_str(&format!("// {} bytes\n", compressed.len()));
    let hex: Vec<String> = compressed.iter().map(|b| format!("0x{b:02x}")).collect();
    out.push_str(&hex.join(", "));
    out
}

/// Default output path: input stem + `_gzip.txt`, next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "asset".to_string());
    input.with_file_name(format!("{stem}_gzip.txt"))
}

/// Compress `input` and write the listing to `output`.
///
/// Returns the compressed size in bytes.
pub fn pack_asset(input: &Path, output: &Path) -> Result<usize, AssetError> {
    let data = fs::read(input).map_err(|source| AssetError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let compressed = gzip(&data)?;
    let listing = render_c_array(&compressed);

    fs::write(output, listing).map_err(|source| AssetError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    tracing::info!(
        "Packed {} ({} bytes) into {} ({} bytes gzipped)",
        input.display(),
        data.len(),
        output.display(),
        compressed.len()
    );

    Ok(compressed.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn gzip_output_has_magic_bytes() {
        let compressed = gzip(b"<html><body>hi</body></html>").unwrap();
        assert_eq!(compressed[0], 0x1f);
        assert_eq!(compressed[1], 0x8b);
    }

    #[test]
    fn listing_starts_with_byte_count_comment() {
        let listing = render_c_array(&[0x1f, 0x8b, 0x00]);
        let mut lines = listing.lines();
        assert_eq!(lines.next(), Some("// 3 bytes"));
        assert_eq!(lines.next(), Some("0x1f, 0x8b, 0x00"));
    }

    #[test]
    fn pack_asset_round_trip() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("index_ov2640_simple.html");
        std::fs::write(&input, "<html><head></head><body>stream</body></html>").unwrap();

        let output = default_output_path(&input);
        assert_eq!(
            output.file_name().unwrap(),
            "index_ov2640_simple_gzip.txt"
        );

        let size = pack_asset(&input, &output).unwrap();
        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.starts_with(&format!("// {size} bytes\n0x1f, 0x8b")));

        // Every byte token is 0xNN
        let listing = content.lines().nth(1).unwrap();
        assert!(listing
            .split(", ")
            .all(|tok| tok.len() == 4 && tok.starts_with("0x")));
    }

    #[test]
    fn missing_input_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = pack_asset(&dir.path().join("nope.html"), &dir.path().join("out.txt"))
            .unwrap_err();
        assert!(matches!(err, AssetError::Read { .. }));
    }
}
