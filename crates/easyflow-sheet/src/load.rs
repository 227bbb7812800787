use std::io::Cursor;
use std::path::Path;

use easyflow_core::models::row::StudentRow;

use crate::error::LoadError;
use crate::format::SheetFormat;
use crate::table::RawTable;

/// Load every student row from a spreadsheet on disk.
pub fn load_path(path: &Path) -> Result<Vec<StudentRow>, LoadError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let format = SheetFormat::from_file_name(&name)?;
    let bytes = std::fs::read(path)?;
    load_bytes(&bytes, format)
}

/// Load every student row from spreadsheet bytes (e.g. an upload).
///
/// Fails with [`LoadError::Schema`] when a required column is absent;
/// otherwise returns all data rows in file order.
pub fn load_bytes(bytes: &[u8], format: SheetFormat) -> Result<Vec<StudentRow>, LoadError> {
    let rows = read_table(bytes, format)?.into_student_rows()?;
    tracing::info!(%format, rows = rows.len(), "spreadsheet loaded");
    Ok(rows)
}

/// Read the raw header and data rows without interpreting any column.
pub fn read_table(bytes: &[u8], format: SheetFormat) -> Result<RawTable, LoadError> {
    match format {
        SheetFormat::Xlsx => crate::xlsx::read_table(Cursor::new(bytes)),
        SheetFormat::Csv => crate::csv::read_table(bytes),
    }
}
