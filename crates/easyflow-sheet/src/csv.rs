use easyflow_core::models::scalar::Scalar;

use crate::error::LoadError;
use crate::table::RawTable;

/// Parse CSV text. The delimiter is `;` when the header line uses it and
/// has no commas (the usual export from Spanish-locale spreadsheets),
/// otherwise `,`.
pub fn read_table(input: &[u8]) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(sniff_delimiter(input))
        .from_reader(input);

    let mut grid = Vec::new();
    for result in reader.records() {
        let record = result?;
        grid.push(record.iter().map(Scalar::from_cell).collect());
    }

    Ok(RawTable::from_grid(grid))
}

fn sniff_delimiter(input: &[u8]) -> u8 {
    let first_line = input.split(|b| *b == b'\n').next().unwrap_or_default();
    let has = |needle: u8| first_line.contains(&needle);
    if has(b';') && !has(b',') { b';' } else { b',' }
}
