use easyflow_core::models::row::StudentRow;
use easyflow_core::models::scalar::Scalar;
use easyflow_core::schema;

use crate::error::LoadError;

/// A sheet as read from disk: a header row plus data rows, before any
/// column is interpreted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Scalar>>,
}

impl RawTable {
    /// The first row with any value becomes the header; every later row
    /// with any value is a data row.
    pub fn from_grid(grid: Vec<Vec<Scalar>>) -> Self {
        let mut rows = grid
            .into_iter()
            .filter(|row| row.iter().any(|cell| !cell.is_empty()));

        let headers = match rows.next() {
            Some(header) => header
                .iter()
                .map(|cell| {
                    cell.to_string()
                        .trim_start_matches('\u{feff}')
                        .trim()
                        .to_string()
                })
                .collect(),
            None => return Self::default(),
        };

        Self {
            headers,
            rows: rows.collect(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Check the required columns and convert every data row, in order.
    pub fn into_student_rows(self) -> Result<Vec<StudentRow>, LoadError> {
        let missing = schema::missing_columns(&self.headers);
        if !missing.is_empty() {
            return Err(LoadError::Schema {
                missing: missing.into_iter().map(String::from).collect(),
            });
        }

        self.rows
            .iter()
            .map(|row| {
                StudentRow::from_columns(|name| {
                    self.column_index(name)
                        .map(|idx| row.get(idx).cloned().unwrap_or(Scalar::Empty))
                })
                .map_err(LoadError::from)
            })
            .collect()
    }
}
