//! Decoded-object persistence.
//!
//! Appends decoded payloads to a plain-text log, one record per
//! object:
//!
//! ```text
//! Type: QR_CODE
//! Data: 8412345678905
//!
//! ```
//!
//! The file format matches what the firmware-side tooling already
//! consumes, so it stays exactly this shape.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::decode::DecodedObject;

/// Append-only writer for the decoded-objects log.
pub struct DecodedLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl DecodedLog {
    /// Open (or create) the log file in append mode.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// File path the log writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one decoded object record.
    pub fn append(&mut self, object: &DecodedObject) -> std::io::Result<()> {
        write!(
            self.writer,
            "Type: {}\nData: {}\n\n",
            object.symbology, object.payload
        )?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn object(symbology: &str, payload: &str) -> DecodedObject {
        DecodedObject {
            symbology: symbology.to_string(),
            payload: payload.to_string(),
            corners: Vec::new(),
        }
    }

    #[test]
    fn append_writes_record_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("decoded_objects.txt");

        let mut log = DecodedLog::open(&path).unwrap();
        log.append(&object("QR_CODE", "hello")).unwrap();
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Type: QR_CODE\nData: hello\n\n");
    }

    #[test]
    fn reopen_appends_rather_than_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("decoded_objects.txt");

        {
            let mut log = DecodedLog::open(&path).unwrap();
            log.append(&object("EAN_13", "8412345678905")).unwrap();
        }
        {
            let mut log = DecodedLog::open(&path).unwrap();
            log.append(&object("QR_CODE", "second")).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Type: EAN_13\nData: 8412345678905\n\n"));
        assert!(content.ends_with("Type: QR_CODE\nData: second\n\n"));
    }

    #[test]
    fn open_creates_missing_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/decoded_objects.txt");
        let log = DecodedLog::open(&path).unwrap();
        assert!(log.path().parent().unwrap().is_dir());
    }
}
