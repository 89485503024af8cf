// GraphQL client - Single HTTP link plus the in-memory normalized cache
use crate::application::coach_gateway::{CoachGateway, FetchPolicy, GatewayError};
use crate::domain::agent::{AgentAnswer, AskAgentInput};
use crate::domain::care_profile::CareProfile;
use crate::domain::dashboard::DashboardData;
use crate::infrastructure::cache::InMemoryCache;
use crate::infrastructure::operations::{Operation, ASK_AGENT_MUTATION, DASHBOARD_QUERY};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::{Mutex, MutexGuard, PoisonError};
use url::Url;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlRequest<'a> {
    operation_name: &'a str,
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

/// One instance per process, shared by both views
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: Url,
    cache: Mutex<InMemoryCache>,
}

impl GraphqlClient {
    pub fn new(endpoint: Url) -> Self {
        Self::with_http_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_http_client(http: reqwest::Client, endpoint: Url) -> Self {
        Self {
            http,
            endpoint,
            cache: Mutex::new(InMemoryCache::new()),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    // never held across an await
    fn cache(&self) -> MutexGuard<'_, InMemoryCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn execute(&self, operation: Operation, variables: Value) -> Result<Value, GatewayError> {
        let request = GraphqlRequest {
            operation_name: operation.name,
            query: operation.document,
            variables,
        };

        tracing::debug!(operation = operation.name, endpoint = %self.endpoint, "Executing GraphQL operation");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(Box::new(e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(Box::new(e)))?;

        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GraphqlResponse = serde_json::from_str(&body)?;
        if !payload.errors.is_empty() {
            return Err(GatewayError::GraphQl(
                payload.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        payload.data.ok_or(GatewayError::MissingData(operation.name))
    }
}

#[async_trait]
impl CoachGateway for GraphqlClient {
    async fn dashboard(&self, profile: &CareProfile, policy: FetchPolicy) -> Result<DashboardData, GatewayError> {
        let variables = json!({ "profile": serde_json::to_value(profile)? });
        let key = InMemoryCache::query_key(DASHBOARD_QUERY.name, &variables);

        if policy == FetchPolicy::CacheFirst {
            let cached = self.cache().read_query(&key);
            if let Some(data) = cached {
                tracing::debug!(profile = %profile.name, "Dashboard served from cache");
                return Ok(serde_json::from_value(data)?);
            }
        }

        let data = self.execute(DASHBOARD_QUERY, variables).await?;

        let cached = {
            let mut cache = self.cache();
            cache.write_query(key.clone(), &data);
            cache.read_query(&key)
        };

        Ok(serde_json::from_value(cached.unwrap_or(data))?)
    }

    async fn ask_agent(&self, input: &AskAgentInput) -> Result<Option<AgentAnswer>, GatewayError> {
        let variables = json!({ "input": serde_json::to_value(input)? });
        let data = self.execute(ASK_AGENT_MUTATION, variables).await?;

        match data.get("askAgent") {
            None | Some(Value::Null) => Ok(None),
            Some(answer) => Ok(Some(serde_json::from_value(answer.clone())?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Backend {
        hits: AtomicUsize,
        requests: Mutex<Vec<Value>>,
    }

    async fn graphql(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let hit = backend.hits.fetch_add(1, Ordering::SeqCst) + 1;
        backend.requests.lock().unwrap().push(body.clone());

        let reply = match body["operationName"].as_str() {
            Some("Dashboard") if body["variables"]["profile"]["name"] == "broken" => {
                json!({"data": null, "errors": [{"message": "resolver exploded"}]})
            }
            Some("Dashboard") => json!({"data": {
                "dailyTips": [
                    {"__typename": "Tip", "id": "1", "title": format!("T{}", hit), "description": "D", "category": "sleep"}
                ],
                "carePlan": {
                    "__typename": "CarePlan",
                    "summary": "S", "feedingFocus": "F", "sleepFocus": "Z",
                    "playFocus": "P", "developmentFocus": "V", "reminders": ["R1", "R2"]
                }
            }}),
            Some("AskAgent") => json!({"data": {"askAgent": {
                "__typename": "AgentAnswer", "message": "答复", "highlights": ["A", "B"]
            }}}),
            _ => return (StatusCode::BAD_REQUEST, Json(json!({"errors": [{"message": "unknown"}]}))),
        };
        (StatusCode::OK, Json(reply))
    }

    async fn spawn_backend() -> (Arc<Backend>, Url) {
        let backend = Arc::new(Backend::default());
        let app = Router::new()
            .route("/graphql", post(graphql))
            .with_state(backend.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (backend, Url::parse(&format!("http://{}/graphql", addr)).unwrap())
    }

    #[tokio::test]
    async fn test_cache_first_skips_network_on_repeat() {
        let (backend, endpoint) = spawn_backend().await;
        let client = GraphqlClient::new(endpoint);
        let profile = CareProfile::default();

        let first = client.dashboard(&profile, FetchPolicy::CacheFirst).await.unwrap();
        let second = client.dashboard(&profile, FetchPolicy::CacheFirst).await.unwrap();

        assert_eq!(backend.hits.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(first.daily_tips[0].title, "T1");
        assert_eq!(first.care_plan.unwrap().reminders, vec!["R1", "R2"]);
    }

    #[tokio::test]
    async fn test_network_only_refreshes_cache() {
        let (backend, endpoint) = spawn_backend().await;
        let client = GraphqlClient::new(endpoint);
        let profile = CareProfile::default();

        client.dashboard(&profile, FetchPolicy::CacheFirst).await.unwrap();
        let refreshed = client.dashboard(&profile, FetchPolicy::NetworkOnly).await.unwrap();
        let cached = client.dashboard(&profile, FetchPolicy::CacheFirst).await.unwrap();

        assert_eq!(backend.hits.load(Ordering::SeqCst), 2);
        assert_eq!(refreshed.daily_tips[0].title, "T2");
        assert_eq!(cached.daily_tips[0].title, "T2");
    }

    #[tokio::test]
    async fn test_request_carries_operation_and_variables() {
        let (backend, endpoint) = spawn_backend().await;
        let client = GraphqlClient::new(endpoint);

        client
            .ask_agent(&AskAgentInput::new("测试问题".to_string(), CareProfile::default()))
            .await
            .unwrap();

        let requests = backend.requests.lock().unwrap();
        let body = &requests[0];
        assert_eq!(body["operationName"], "AskAgent");
        assert!(body["query"].as_str().unwrap().starts_with("mutation AskAgent"));
        assert_eq!(body["variables"]["input"]["question"], "测试问题");
        assert_eq!(body["variables"]["input"]["profile"]["babyStage"], "INFANT");
    }

    #[tokio::test]
    async fn test_ask_agent_is_never_cached() {
        let (backend, endpoint) = spawn_backend().await;
        let client = GraphqlClient::new(endpoint);
        let input = AskAgentInput::new("q".to_string(), CareProfile::default());

        let answer = client.ask_agent(&input).await.unwrap().unwrap();
        client.ask_agent(&input).await.unwrap();

        assert_eq!(answer.message, "答复");
        assert_eq!(answer.highlights, vec!["A", "B"]);
        assert_eq!(backend.hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_graphql_errors_are_reported() {
        let (_backend, endpoint) = spawn_backend().await;
        let client = GraphqlClient::new(endpoint);
        let profile = CareProfile::default().with_name("broken");

        let err = client.dashboard(&profile, FetchPolicy::CacheFirst).await.unwrap_err();
        assert!(matches!(err, GatewayError::GraphQl(ref messages) if messages == &vec!["resolver exploded".to_string()]));
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let (_backend, endpoint) = spawn_backend().await;
        let client = GraphqlClient::new(endpoint.join("/missing").unwrap());

        let err = client
            .dashboard(&CareProfile::default(), FetchPolicy::CacheFirst)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Status { status: 404, .. }));
    }
}
