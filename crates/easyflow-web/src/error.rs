use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use easyflow_export::error::ExportError;
use easyflow_notify::error::NotifyError;
use easyflow_sheet::error::LoadError;

/// A failure shown to the user as a message on the page.
#[derive(Debug)]
pub enum PageError {
    BadRequest(String),
    /// Input was readable but does not fit (wrong columns, bad template).
    Rejected(String),
    NotFound(String),
    Unavailable(String),
    Internal(String),
}

impl PageError {
    pub fn status(&self) -> StatusCode {
        match self {
            PageError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PageError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PageError::NotFound(_) => StatusCode::NOT_FOUND,
            PageError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            PageError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Same error with `prefix` put in front of its message.
    pub fn prefixed(self, prefix: &str) -> Self {
        match self {
            PageError::BadRequest(msg) => PageError::BadRequest(format!("{prefix} {msg}")),
            PageError::Rejected(msg) => PageError::Rejected(format!("{prefix} {msg}")),
            PageError::NotFound(msg) => PageError::NotFound(format!("{prefix} {msg}")),
            PageError::Unavailable(msg) => PageError::Unavailable(format!("{prefix} {msg}")),
            PageError::Internal(msg) => PageError::Internal(format!("{prefix} {msg}")),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PageError::BadRequest(msg)
            | PageError::Rejected(msg)
            | PageError::NotFound(msg)
            | PageError::Unavailable(msg)
            | PageError::Internal(msg) => msg,
        }
    }
}

// Fallback when the page itself cannot be rendered.
impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        if let PageError::Internal(msg) = &self {
            tracing::error!("internal error: {msg}");
        }
        let body = format!(
            "<!doctype html><meta charset=\"utf-8\"><title>EasyFlow</title><p>{}</p><p><a href=\"/\">Volver</a></p>",
            tera::escape_html(self.message())
        );
        (self.status(), Html(body)).into_response()
    }
}

impl From<LoadError> for PageError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::Schema { missing } => PageError::Rejected(format!(
                "Faltan columnas en la hoja de cálculo: {}",
                missing.join(", ")
            )),
            LoadError::UnsupportedFormat(name) => PageError::BadRequest(format!(
                "Formato de hoja de cálculo no admitido: {name} (use .xlsx o .csv)"
            )),
            other => PageError::Rejected(format!("No se pudo leer la hoja de cálculo: {other}")),
        }
    }
}

impl From<ExportError> for PageError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::Render(msg) | ExportError::TemplateParse(msg) => {
                PageError::Rejected(format!("Error en la plantilla: {msg}"))
            }
            ExportError::Package(msg) => {
                PageError::Rejected(format!("La plantilla no es un documento Word válido: {msg}"))
            }
            other => PageError::Internal(other.to_string()),
        }
    }
}

impl From<NotifyError> for PageError {
    fn from(e: NotifyError) -> Self {
        match e {
            NotifyError::Address { .. } => PageError::BadRequest(e.to_string()),
            NotifyError::Config(_) => PageError::Unavailable(e.to_string()),
            other => PageError::Rejected(format!("No se pudo enviar el correo: {other}")),
        }
    }
}

impl From<tokio::task::JoinError> for PageError {
    fn from(e: tokio::task::JoinError) -> Self {
        PageError::Internal(format!("background task failed: {e}"))
    }
}
