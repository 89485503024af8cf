// Main entry point - Edge proxy for /api/graphql
use std::{net::SocketAddr, sync::Arc};

use baby_coach::application::proxy_service::GraphqlProxyService;
use baby_coach::infrastructure::config::load_proxy_settings;
use baby_coach::infrastructure::logging::init_logging;
use baby_coach::infrastructure::reqwest_transport::ReqwestTransport;
use baby_coach::presentation::app_state::AppState;
use baby_coach::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let settings = load_proxy_settings()?;
    if settings.backend_api_base.as_deref().map_or(true, |base| base.trim().is_empty()) {
        tracing::warn!("BACKEND_API_BASE is not set, /api/graphql will answer 500");
    }

    // Upstream transport (infrastructure layer)
    let transport = Arc::new(ReqwestTransport::new(reqwest::Client::new()));

    // Proxy service (application layer)
    let proxy_service = GraphqlProxyService::new(transport, settings.backend_api_base);

    let state = Arc::new(AppState { proxy_service });
    let router = router(state);

    let addr: SocketAddr = settings.listen_addr.parse()?;
    tracing::info!("Starting baby-coach edge proxy on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
