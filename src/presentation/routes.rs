// Router for the edge proxy binary
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, proxy_graphql};
use axum::{
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/graphql", any(proxy_graphql))
        .route("/api/graphql/*rest", any(proxy_graphql))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
