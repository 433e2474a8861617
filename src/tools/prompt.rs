use serde::Serialize;

use super::{now_iso8601, AGENT_NAME, AGENT_VERSION};
use crate::config::AgentConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptStatus {
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptMetadata {
    pub project_id: Option<String>,
    pub region: String,
    pub initialized_at: String,
}

/// Result of the `process_prompt` tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptResponse {
    pub agent: String,
    pub version: String,
    pub timestamp: String,
    pub prompt_received: String,
    pub response: String,
    pub status: PromptStatus,
    pub metadata: PromptMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Echo `prompt` back. `context` is attached only when non-empty.
pub fn process_prompt(config: &AgentConfig, prompt: &str, context: &str) -> PromptResponse {
    PromptResponse {
        agent: AGENT_NAME.into(),
        version: AGENT_VERSION.into(),
        timestamp: now_iso8601(),
        prompt_received: prompt.to_string(),
        response: format!("Test agent successfully received prompt: '{prompt}'"),
        status: PromptStatus::Success,
        metadata: PromptMetadata {
            project_id: config.project_id.clone(),
            region: config.region.clone(),
            initialized_at: now_iso8601(),
        },
        context: (!context.is_empty()).then(|| context.to_string()),
    }
}
