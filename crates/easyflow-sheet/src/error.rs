use easyflow_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("unsupported spreadsheet format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid xlsx package: {0}")]
    Xlsx(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<zip::result::ZipError> for LoadError {
    fn from(e: zip::result::ZipError) -> Self {
        LoadError::Xlsx(e.to_string())
    }
}

impl From<quick_xml::Error> for LoadError {
    fn from(e: quick_xml::Error) -> Self {
        LoadError::Xlsx(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for LoadError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        LoadError::Xlsx(e.to_string())
    }
}
