//! Agent definition and the contract a hosting adapter satisfies.

use serde_json::Value;

use crate::config::AgentConfig;
use crate::tools::{DiagnosticTools, ToolDescriptor, ToolError};

pub const ROOT_AGENT_NAME: &str = "test_agent";
pub const ROOT_AGENT_MODEL: &str = "gemini-2.0-flash";
pub const ROOT_AGENT_DESCRIPTION: &str = "Test agent for verifying Vertex AI integration";
pub const ROOT_AGENT_INSTRUCTION: &str = "You are a test agent designed to verify the Vertex AI integration.
When asked to perform a health check, use the health_check function.
When asked to process a prompt, use the process_prompt function.
Always be helpful and provide clear responses about the system status.";

/// Everything a host needs to expose an agent: identity, model, prompt and
/// the callable tool list.
#[derive(Debug, Clone)]
pub struct AgentDefinition {
    pub name: String,
    pub model: String,
    pub description: String,
    pub instruction: String,
    pub tools: DiagnosticTools,
}

impl AgentDefinition {
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.descriptors()
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.descriptors().into_iter().map(|d| d.name).collect()
    }

    pub fn tool(&self, name: &str) -> Option<ToolDescriptor> {
        self.descriptors().into_iter().find(|d| d.name == name)
    }

    pub fn call_tool(&self, name: &str, arguments: Option<&Value>) -> Result<Value, ToolError> {
        self.tools.call(name, arguments)
    }
}

/// Build the diagnostic agent with its two tools bound to `config`.
pub fn root_agent(config: AgentConfig) -> AgentDefinition {
    AgentDefinition {
        name: ROOT_AGENT_NAME.into(),
        model: ROOT_AGENT_MODEL.into(),
        description: ROOT_AGENT_DESCRIPTION.into(),
        instruction: ROOT_AGENT_INSTRUCTION.into(),
        tools: DiagnosticTools::new(config),
    }
}

/// A runtime that agents can be registered with.
pub trait AgentHost {
    type Error: std::error::Error;

    fn register(&mut self, agent: AgentDefinition) -> Result<(), Self::Error>;
}
