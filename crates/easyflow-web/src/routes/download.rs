use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use easyflow_core::file_names::SUMMARY_REPORT;

use crate::error::PageError;
use crate::state::AppState;

/// Serve the most recent summary report of the session.
pub async fn download_report(State(state): State<AppState>) -> Result<Response, PageError> {
    let path = {
        let session = state.session.lock().await;
        session
            .report()
            .map(|p| p.to_path_buf())
            .ok_or_else(|| PageError::NotFound("Todavía no se ha generado el PDF.".to_string()))?
    };

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| PageError::NotFound(format!("No se pudo leer {}: {e}", path.display())))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SUMMARY_REPORT}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
