// Agent Q&A view - Question state and the ask-agent mutation lifecycle
use crate::application::coach_gateway::{CoachGateway, GatewayError};
use crate::domain::agent::{AgentAnswer, AskAgentInput, DEFAULT_QUESTION};
use crate::domain::care_profile::CareProfile;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentPhase {
    Idle,
    Asking,
    Answered,
}

pub struct AgentView {
    question: String,
    asking: bool,
    answer: Option<AgentAnswer>,
    last_error: Option<String>,
    revision: watch::Sender<u64>,
}

impl AgentView {
    pub fn new(question: impl Into<String>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            question: question.into(),
            asking: false,
            answer: None,
            last_error: None,
            revision,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
        self.notify();
    }

    pub fn phase(&self) -> AgentPhase {
        if self.asking {
            AgentPhase::Asking
        } else if self.answer.is_some() {
            AgentPhase::Answered
        } else {
            AgentPhase::Idle
        }
    }

    pub fn is_asking(&self) -> bool {
        self.asking
    }

    pub fn answer(&self) -> Option<&AgentAnswer> {
        self.answer.as_ref()
    }

    /// Message of the last failed submission, cleared by the next submit
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start a submission. Blank questions and submits while a request is
    /// in flight (the disabled send control) issue nothing.
    pub fn begin_submit(&mut self, profile: &CareProfile) -> Option<AskAgentInput> {
        if self.asking || self.question.trim().is_empty() {
            return None;
        }

        self.asking = true;
        self.last_error = None;
        self.notify();
        Some(AskAgentInput::new(self.question.clone(), profile.clone()))
    }

    /// Apply the mutation outcome. A failure keeps any earlier answer.
    pub fn complete(&mut self, result: Result<Option<AgentAnswer>, GatewayError>) {
        self.asking = false;
        match result {
            Ok(Some(answer)) => self.answer = Some(answer),
            Ok(None) => tracing::warn!("askAgent returned no payload"),
            Err(e) => {
                tracing::error!("askAgent mutation failed: {}", e);
                self.last_error = Some(e.to_string());
            }
        }
        self.notify();
    }

    /// Submit the current question and wait for the answer
    pub async fn submit(&mut self, profile: &CareProfile, gateway: &dyn CoachGateway) -> AgentPhase {
        if let Some(input) = self.begin_submit(profile) {
            let result = gateway.ask_agent(&input).await;
            self.complete(result);
        }
        self.phase()
    }

    fn notify(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

impl Default for AgentView {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTION)
    }
}
