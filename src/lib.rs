//! Minimal diagnostic agent.
//!
//! Exposes `health_check` and `process_prompt` tools to a hosted agent
//! runtime, to verify that a deployment can reach its cloud project and
//! region. Tools are bound to an explicit [`config::AgentConfig`] and
//! registered with any [`agent::AgentHost`]; [`server::McpServer`] is the
//! bundled host, serving them over JSON-RPC 2.0 stdio.

pub mod agent;
pub mod cli;
pub mod config;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;

pub mod schema;
