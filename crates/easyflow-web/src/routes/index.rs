use axum::extract::State;
use axum::response::Response;

use crate::state::AppState;

pub async fn index(State(state): State<AppState>) -> Response {
    let session = state.session.lock().await;
    super::respond(&state, &session, Ok(Vec::new()))
}
