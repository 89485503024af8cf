use serde::Deserialize;
use url::Url;

/// Local GraphQL server used while developing
pub const DEV_GRAPHQL_ENDPOINT: &str = "http://localhost:4000/graphql";

/// Path the edge proxy serves, relative to the page origin
pub const PROXY_GRAPHQL_PATH: &str = "/api/graphql";

#[derive(Debug, Deserialize, Clone)]
pub struct ProxySettings {
    /// `BACKEND_API_BASE`; checked on every request, not at start-up
    #[serde(default)]
    pub backend_api_base: Option<String>,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientSettings {
    #[serde(default, rename = "vite_graphql_endpoint")]
    pub graphql_endpoint: Option<String>,
    /// `development` or `production`; unset follows the build profile
    #[serde(default)]
    pub app_mode: Option<String>,
    #[serde(default = "default_app_origin")]
    pub app_origin: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8788".to_string()
}

fn default_app_origin() -> String {
    "http://127.0.0.1:8788".to_string()
}

impl ClientSettings {
    pub fn is_development(&self) -> bool {
        match self.app_mode.as_deref() {
            Some(mode) => mode.eq_ignore_ascii_case("development"),
            None => cfg!(debug_assertions),
        }
    }

    pub fn endpoint(&self) -> Result<Url, url::ParseError> {
        resolve_endpoint(
            self.graphql_endpoint.as_deref(),
            self.is_development(),
            &self.app_origin,
        )
    }
}

pub fn load_proxy_settings() -> anyhow::Result<ProxySettings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/proxy").required(false))
        .add_source(config::Environment::default())
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_client_settings() -> anyhow::Result<ClientSettings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/coach").required(false))
        .add_source(config::Environment::default())
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Explicit override, then the dev server in development, then the proxy path.
/// Relative endpoints are resolved against `origin`.
pub fn resolve_endpoint(
    override_endpoint: Option<&str>,
    development: bool,
    origin: &str,
) -> Result<Url, url::ParseError> {
    let endpoint = override_endpoint
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or(if development {
            DEV_GRAPHQL_ENDPOINT
        } else {
            PROXY_GRAPHQL_PATH
        });

    Url::parse(origin)?.join(endpoint)
}
