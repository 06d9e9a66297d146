//! Spreadsheet export for the food-group dataset.
//!
//! Writes the parsed records to an `.xlsx` workbook with the column
//! layout the downstream database tooling expects:
//! `ID_grupo, Nombre_grupo, Ejemplos_grupo, Kcal_g, Prot_g, Lip_g, Carb_g`.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::record::GroupRecord;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "grupos_alimentos.xlsx";

/// Column headers, in sheet order.
const HEADERS: [&str; 7] = [
    "ID_grupo",
    "Nombre_grupo",
    "Ejemplos_grupo",
    "Kcal_g",
    "Prot_g",
    "Lip_g",
    "Carb_g",
];

/// Errors that can occur during spreadsheet export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The workbook writer failed.
    #[error("Failed to write spreadsheet: {0}")]
    Xlsx(#[from] XlsxError),

    /// No records survived parsing.
    #[error("No valid records to export")]
    Empty,
}

/// Write the records to an xlsx workbook at `path`.
pub fn write_xlsx(records: &[GroupRecord], path: &Path) -> Result<(), ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_number(row, 0, record.id as f64)?;
        worksheet.write_string(row, 1, &record.name)?;
        worksheet.write_string(row, 2, &record.examples)?;
        worksheet.write_number(row, 3, record.kcal_g)?;
        worksheet.write_number(row, 4, record.prot_g)?;
        worksheet.write_number(row, 5, record.lip_g)?;
        worksheet.write_number(row, 6, record.carb_g)?;
    }

    workbook.save(path)?;
    tracing::info!("Wrote {} group(s) to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::{dataset::GROUP_CALLS, record::parse_calls};
    use tempfile::TempDir;

    #[test]
    fn export_writes_workbook_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT);

        let records = parse_calls(GROUP_CALLS);
        write_xlsx(&records, &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
        // xlsx is a zip container
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = write_xlsx(&[], &dir.path().join("empty.xlsx")).unwrap_err();
        assert!(matches!(err, ExportError::Empty));
    }
}
