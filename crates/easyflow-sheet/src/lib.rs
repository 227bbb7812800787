//! easyflow-sheet
//!
//! Loads student grade tables from `.xlsx` and `.csv` files.

pub mod csv;
pub mod error;
pub mod format;
pub mod load;
pub mod table;
pub mod xlsx;

pub use format::SheetFormat;
pub use load::{load_bytes, load_path, read_table};
