// Application state for HTTP handlers
use crate::application::proxy_service::GraphqlProxyService;

#[derive(Clone)]
pub struct AppState {
    pub proxy_service: GraphqlProxyService,
}
