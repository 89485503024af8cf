// HTTP request handlers
use crate::infrastructure::http_response::upstream_response;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Edge proxy: forward any method to `<BACKEND_API_BASE>/graphql`
pub async fn proxy_graphql(State(state): State<Arc<AppState>>, request: Request) -> Response {
    match state.proxy_service.forward(request).await {
        Ok(upstream) => upstream_response(upstream),
        Err(e) => e.into_response(),
    }
}
