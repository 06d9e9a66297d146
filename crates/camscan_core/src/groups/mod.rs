//! Nutritional food-group dataset: parsing and spreadsheet export.

pub mod dataset;
pub mod export;
pub mod record;

pub use dataset::GROUP_CALLS;
pub use export::{write_xlsx, ExportError, DEFAULT_OUTPUT};
pub use record::{parse_call, parse_calls, GroupRecord, RecordError};
