use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    error::AppError,
    proxy::{ProxyReply, list_heroes, search_heroes},
    state::AppState,
    utils::keyword_from_body,
};

pub async fn list_handler(State(state): State<Arc<AppState>>) -> Result<ProxyReply, AppError> {
    list_heroes(&state.upstream).await
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<ProxyReply, AppError> {
    let keyword = keyword_from_body(&body)?;

    search_heroes(&state.upstream, keyword).await
}

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
