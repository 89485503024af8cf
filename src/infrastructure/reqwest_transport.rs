// reqwest-backed upstream transport for the edge proxy
use crate::application::upstream::{OutboundRequest, TransportError, UpstreamResponse, UpstreamTransport};
use async_trait::async_trait;
use url::Url;

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UpstreamTransport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse, TransportError> {
        // reqwest only takes a `Url`; the query is re-serialized with the WHATWG
        // rules a browser fetch applies to the same target
        let url = Url::parse(&request.uri.to_string()).map_err(TransportError::new)?;
        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(TransportError::new)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(TransportError::new)?;

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
