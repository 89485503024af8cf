// HTTP response utilities for the edge proxy
use crate::application::proxy_service::ProxyError;
use crate::application::upstream::UpstreamResponse;
use axum::{
    body::Body,
    http::{header, Response, StatusCode},
    response::IntoResponse,
};

/// Hand the upstream status, headers and body back unchanged. Framing
/// headers are dropped because the server re-frames the buffered body.
pub fn upstream_response(upstream: UpstreamResponse) -> Response<Body> {
    let mut headers = upstream.headers;
    headers.remove(header::TRANSFER_ENCODING);
    headers.remove(header::CONNECTION);

    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    *response.headers_mut() = headers;
    response
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::MissingBackend
            | ProxyError::InvalidBackend(_)
            | ProxyError::InvalidTarget(_)
            | ProxyError::Body(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        tracing::error!(status = %status, error = %self, "Proxy request failed");

        (status, self.to_string()).into_response()
    }
}
