// Transport trait for the one-hop forward to the GraphQL backend
use async_trait::async_trait;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use bytes::Bytes;
use std::error::Error;
use thiserror::Error;

/// Request handed to the transport after the target rewrite
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    /// Rewritten target; the query string is the inbound one, byte for byte
    pub uri: Uri,
    pub headers: HeaderMap,
    /// `None` for GET and HEAD
    pub body: Option<Bytes>,
}

/// Upstream response, passed back to the caller as-is
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Debug, Error)]
#[error("upstream request failed: {source}")]
pub struct TransportError {
    #[source]
    source: Box<dyn Error + Send + Sync>,
}

impl TransportError {
    pub fn new(source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    /// Perform exactly one outbound call, no retry
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse, TransportError>;
}
