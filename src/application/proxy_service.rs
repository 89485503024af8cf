// Proxy service - Forward /api/graphql traffic to the configured backend
use crate::application::upstream::{OutboundRequest, TransportError, UpstreamResponse, UpstreamTransport};
use axum::body::Body;
use axum::http::{header, uri::InvalidUri, HeaderMap, Method, Request, Uri};
use std::sync::Arc;
use thiserror::Error;
use url::Url;

pub const MISSING_BACKEND_MESSAGE: &str = "Missing BACKEND_API_BASE env";

/// Headers whose values belong to the connection, not the request. The
/// transport recomputes them for the rewritten target.
const TRANSPORT_MANAGED_HEADERS: [header::HeaderName; 4] = [
    header::HOST,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::CONNECTION,
];

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Missing BACKEND_API_BASE env")]
    MissingBackend,

    #[error("Invalid BACKEND_API_BASE: {0}")]
    InvalidBackend(#[from] url::ParseError),

    #[error("Invalid upstream target: {0}")]
    InvalidTarget(#[from] InvalidUri),

    #[error("Failed to read request body: {0}")]
    Body(#[from] axum::Error),

    #[error(transparent)]
    Upstream(#[from] TransportError),
}

#[derive(Clone)]
pub struct GraphqlProxyService {
    transport: Arc<dyn UpstreamTransport>,
    backend_base: Option<String>,
}

impl GraphqlProxyService {
    pub fn new(transport: Arc<dyn UpstreamTransport>, backend_base: Option<String>) -> Self {
        Self {
            transport,
            backend_base,
        }
    }

    /// Forward one inbound request and return the upstream response verbatim
    pub async fn forward(&self, request: Request<Body>) -> Result<UpstreamResponse, ProxyError> {
        let backend_base = self
            .backend_base
            .as_deref()
            .filter(|base| !base.trim().is_empty())
            .ok_or(ProxyError::MissingBackend)?;

        let (parts, body) = request.into_parts();
        let uri = target_uri(backend_base, parts.uri.query())?;

        let body = if carries_body(&parts.method) {
            Some(axum::body::to_bytes(body, usize::MAX).await?)
        } else {
            None
        };

        let outbound = OutboundRequest {
            method: parts.method,
            uri,
            headers: forwarded_headers(&parts.headers),
            body,
        };

        tracing::debug!(
            method = %outbound.method,
            target = %outbound.uri,
            body_len = outbound.body.as_ref().map(|b| b.len()).unwrap_or(0),
            "Forwarding GraphQL request"
        );

        Ok(self.transport.send(outbound).await?)
    }
}

/// Rewrite the backend base to `/graphql` and append the inbound query string.
/// The query is concatenated as received; `Url::set_query` would re-encode it.
pub fn target_uri(backend_base: &str, query: Option<&str>) -> Result<Uri, ProxyError> {
    let mut base = Url::parse(backend_base.trim())?;
    base.set_path("/graphql");
    base.set_query(None);
    base.set_fragment(None);

    let target = match query.filter(|q| !q.is_empty()) {
        Some(query) => format!("{}?{}", base, query),
        None => base.to_string(),
    };
    Ok(target.parse::<Uri>()?)
}

fn carries_body(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD)
}

fn forwarded_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = inbound.clone();
    for name in TRANSPORT_MANAGED_HEADERS {
        headers.remove(name);
    }
    headers
}
