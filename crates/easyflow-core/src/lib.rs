//! easyflow-core
//!
//! Pure domain types, column/placeholder names, and output file naming.
//! Shared vocabulary of the EasyFlow crates. No I/O.

pub mod date;
pub mod error;
pub mod file_names;
pub mod models;
pub mod schema;
