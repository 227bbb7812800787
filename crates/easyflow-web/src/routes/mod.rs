pub mod download;
pub mod generate;
pub mod health;
pub mod index;
pub mod send;
pub mod upload;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::error::PageError;
use crate::pages::{IndexView, Notice};
use crate::session::Session;
use crate::state::AppState;

/// Render the application page for the outcome of an action. Failures
/// become an error notice on the page, with the matching status code.
fn respond(
    state: &AppState,
    session: &Session,
    outcome: Result<Vec<Notice>, PageError>,
) -> Response {
    let (status, notices) = match outcome {
        Ok(notices) => (StatusCode::OK, notices),
        Err(e) => {
            match &e {
                PageError::Internal(msg) => tracing::error!("internal error: {msg}"),
                other => tracing::warn!(status = %other.status(), "{}", other.message()),
            }
            (e.status(), vec![Notice::error(e.message())])
        }
    };

    let view = IndexView::new(session, &state.mail, notices);
    match state.pages.index(&view) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => e.into_response(),
    }
}
