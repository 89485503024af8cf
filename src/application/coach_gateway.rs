// Gateway trait for the two GraphQL operations the dashboard consumes
use crate::domain::agent::{AgentAnswer, AskAgentInput};
use crate::domain::care_profile::CareProfile;
use crate::domain::dashboard::DashboardData;
use async_trait::async_trait;
use std::error::Error;
use thiserror::Error;

/// How a dashboard query may use the client cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Serve from cache when the same profile was already fetched
    CacheFirst,
    /// Always hit the network, then refresh the cache
    NetworkOnly,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("GraphQL transport failed: {0}")]
    Transport(#[source] Box<dyn Error + Send + Sync>),

    #[error("GraphQL endpoint responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("Failed to decode GraphQL response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("GraphQL response carried no data for {0}")]
    MissingData(&'static str),
}

#[async_trait]
pub trait CoachGateway: Send + Sync {
    /// `query Dashboard($profile: CareProfileInput!)`
    async fn dashboard(&self, profile: &CareProfile, policy: FetchPolicy) -> Result<DashboardData, GatewayError>;

    /// `mutation AskAgent($input: AskAgentInput!)`; `None` when the payload is null
    async fn ask_agent(&self, input: &AskAgentInput) -> Result<Option<AgentAnswer>, GatewayError>;
}
