use serde::Serialize;

use super::{now_iso8601, AGENT_NAME, AGENT_VERSION};
use crate::config::AgentConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Healthy,
}

/// Result of the `health_check` tool.
///
/// `project_id` is always serialized, as `null` when unconfigured.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    pub agent: String,
    pub version: String,
    pub status: HealthState,
    pub timestamp: String,
    pub project_id: Option<String>,
    pub region: String,
}

pub fn health_check(config: &AgentConfig) -> HealthStatus {
    HealthStatus {
        agent: AGENT_NAME.into(),
        version: AGENT_VERSION.into(),
        status: HealthState::Healthy,
        timestamp: now_iso8601(),
        project_id: config.project_id.clone(),
        region: config.region.clone(),
    }
}
