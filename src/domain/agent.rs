// Agent Q&A domain model
use super::care_profile::CareProfile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentAnswer {
    pub message: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// Payload of the ask-agent mutation (`AskAgentInput`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskAgentInput {
    pub question: String,
    pub profile: CareProfile,
}

impl AskAgentInput {
    pub fn new(question: String, profile: CareProfile) -> Self {
        Self { question, profile }
    }
}

pub const DEFAULT_QUESTION: &str = "宝宝白天总是短睡，晚上也爱闹，怎么调整节奏？";
