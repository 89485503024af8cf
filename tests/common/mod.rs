#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Stand-in for the GraphQL backend. GraphQL operations get canned data,
/// anything else is echoed back with status 201.
#[derive(Default)]
pub struct StubBackend {
    pub requests: Mutex<Vec<Recorded>>,
}

impl StubBackend {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn operation_count(&self, name: &str) -> usize {
        self.requests()
            .iter()
            .filter_map(|r| serde_json::from_slice::<Value>(&r.body).ok())
            .filter(|body| body["operationName"] == name)
            .count()
    }
}

pub fn dashboard_payload() -> Value {
    json!({"data": {
        "dailyTips": [
            {"__typename": "Tip", "id": "1", "title": "T", "description": "D", "category": "sleep"}
        ],
        "carePlan": {
            "__typename": "CarePlan",
            "summary": "规律作息",
            "feedingFocus": "按需喂养",
            "sleepFocus": "固定入睡仪式",
            "playFocus": "趴卧游戏",
            "developmentFocus": "观察翻身",
            "reminders": ["多喝水", "早点睡"]
        }
    }})
}

async fn handle(State(backend): State<Arc<StubBackend>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    backend.requests.lock().unwrap().push(Recorded {
        method: parts.method.clone(),
        path_and_query: parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default(),
        headers: parts.headers.clone(),
        body: body.clone(),
    });

    let graphql: Option<Value> = serde_json::from_slice(&body).ok();
    match graphql.as_ref().and_then(|b| b["operationName"].as_str()) {
        Some("Dashboard") => Json(dashboard_payload()).into_response(),
        Some("AskAgent") => {
            let question = graphql.as_ref().map(|b| b["variables"]["input"]["question"].clone());
            if question == Some(json!("fail")) {
                (StatusCode::INTERNAL_SERVER_ERROR, "agent offline").into_response()
            } else {
                Json(json!({"data": {"askAgent": {
                    "__typename": "AgentAnswer",
                    "message": "答复",
                    "highlights": ["A", "B"]
                }}}))
                .into_response()
            }
        }
        _ => {
            let mut response = (StatusCode::CREATED, body).into_response();
            response
                .headers_mut()
                .insert("x-upstream", HeaderValue::from_static("stub"));
            response
        }
    }
}

pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub async fn spawn_backend() -> (Arc<StubBackend>, SocketAddr) {
    let backend = Arc::new(StubBackend::default());
    let router = Router::new()
        .route("/*path", any(handle))
        .with_state(backend.clone());
    (backend, serve(router).await)
}
