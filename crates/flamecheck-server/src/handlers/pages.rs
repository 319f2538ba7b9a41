use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::ServerState;

/// GET / - Home page.
pub async fn home(State(state): State<Arc<ServerState>>) -> Html<String> {
    Html(state.pages.home.clone())
}

/// GET /fire-detection and /fire-detection.html - Upload page.
pub async fn fire_detection(State(state): State<Arc<ServerState>>) -> Html<String> {
    Html(state.pages.fire_detection.clone())
}
