//! Capture-and-decode sessions.

mod session;
mod sink;

pub use session::{ScanError, ScanOptions, ScanReport, ScanSession};
pub use sink::DecodedLog;
