//! easyflow-export
//!
//! Per-student DOCX rendering from a Word template, and the paginated
//! PDF summary report.

pub mod docx;
pub mod error;
pub mod generate;
pub mod layout;
pub mod pdf;
pub mod render;
pub mod styles;
