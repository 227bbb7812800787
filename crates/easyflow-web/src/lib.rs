//! easyflow-web
//!
//! Single-user web front end: upload a grade sheet and a Word template,
//! preview the rows, generate documents and the summary report, download
//! the report and mail the results.

pub mod config;
pub mod error;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Uploads carry a spreadsheet and a template in one request.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index::index))
        .route("/health", get(routes::health::health_check))
        .route("/upload", post(routes::upload::upload))
        .route("/generate", post(routes::generate::generate))
        .route("/download/report", get(routes::download::download_report))
        .route("/send", post(routes::send::send))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
