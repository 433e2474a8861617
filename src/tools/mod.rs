//! The diagnostic tool pair and its by-name dispatch.
//!
//! Both tools are total: they never fail for any input. Errors in this module
//! belong to the dispatch layer (a host naming a tool that does not exist, or
//! passing arguments that do not match the tool's input schema).

pub mod health;
pub mod prompt;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AgentConfig;
use crate::protocol::{ToolErrorCode, ToolErrorResponse};
use crate::schema;

pub use health::{HealthState, HealthStatus};
pub use prompt::{PromptMetadata, PromptResponse, PromptStatus};

/// Name reported in every tool response.
pub const AGENT_NAME: &str = "test-agent";

/// Version reported in every tool response.
pub const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HEALTH_CHECK: &str = "health_check";
pub const PROCESS_PROMPT: &str = "process_prompt";

/// Errors raised while routing a tool call.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Invalid arguments for {tool}: {detail}")]
    InvalidArguments { tool: String, detail: String },
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    pub fn code(&self) -> ToolErrorCode {
        match self {
            Self::UnknownTool(_) => ToolErrorCode::UnknownTool,
            Self::InvalidArguments { .. } => ToolErrorCode::InvalidArguments,
            Self::Serialization(_) => ToolErrorCode::InternalError,
        }
    }
}

impl From<ToolError> for ToolErrorResponse {
    fn from(err: ToolError) -> Self {
        ToolErrorResponse::new(err.code(), err.to_string())
    }
}

/// Description of one callable tool, as advertised to a host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Arguments for `process_prompt`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessPromptParams {
    pub prompt: String,
    /// `null` and absent are both treated as empty.
    #[serde(default)]
    pub context: Option<String>,
}

/// The health check and prompt processor, bound to one configuration.
#[derive(Debug, Clone)]
pub struct DiagnosticTools {
    config: AgentConfig,
}

impl DiagnosticTools {
    pub fn new(config: AgentConfig) -> Self {
        Self { config }
    }

    pub fn health_check(&self) -> HealthStatus {
        health::health_check(&self.config)
    }

    pub fn process_prompt(&self, prompt: &str, context: &str) -> PromptResponse {
        prompt::process_prompt(&self.config, prompt, context)
    }

    /// Tools in registration order.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor {
                name: HEALTH_CHECK.into(),
                description: "Perform a health check on the agent".into(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {}
                }),
            },
            ToolDescriptor {
                name: PROCESS_PROMPT.into(),
                description: "Process a test prompt and return a response".into(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "required": ["prompt"],
                    "properties": {
                        "prompt": {
                            "type": "string",
                            "description": "The input prompt to process"
                        },
                        "context": {
                            "type": ["string", "null"],
                            "description": "Optional context information"
                        }
                    }
                }),
            },
        ]
    }

    /// Invoke a tool by name with JSON arguments.
    ///
    /// `None` arguments are treated as an empty object.
    pub fn call(&self, name: &str, arguments: Option<&Value>) -> Result<Value, ToolError> {
        let descriptor = self
            .descriptors()
            .into_iter()
            .find(|d| d.name == name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let empty = Value::Object(Default::default());
        let arguments = arguments.unwrap_or(&empty);

        schema::validate_value(&descriptor.input_schema, arguments).map_err(|e| {
            ToolError::InvalidArguments {
                tool: name.to_string(),
                detail: e.to_string(),
            }
        })?;

        tracing::debug!(tool = name, "invoking tool");

        match name {
            HEALTH_CHECK => Ok(serde_json::to_value(self.health_check())?),
            PROCESS_PROMPT => {
                let params: ProcessPromptParams = serde_json::from_value(arguments.clone())
                    .map_err(|e| ToolError::InvalidArguments {
                        tool: name.to_string(),
                        detail: e.to_string(),
                    })?;
                let context = params.context.as_deref().unwrap_or_default();
                Ok(serde_json::to_value(self.process_prompt(&params.prompt, context))?)
            }
            _ => Err(ToolError::UnknownTool(name.to_string())),
        }
    }
}

/// Current UTC time as RFC 3339 (`2024-01-01T12:00:00.000000Z`).
pub(crate) fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
