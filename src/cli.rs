//! Command-line surface: local smoke run, stdio serving, or deployment help.

use std::io::{self, Write};

use clap::Parser;

use crate::agent::AgentDefinition;

#[derive(Debug, Parser)]
#[command(name = "diagnostic-agent", version, about = "Diagnostic agent for verifying cloud AI deployments")]
pub struct Cli {
    /// Invoke both tools locally and print the results
    #[arg(long, conflicts_with = "serve")]
    pub local: bool,

    /// Register the agent and serve its tools over MCP stdio
    #[arg(long)]
    pub serve: bool,
}

/// What the binary should do, decided from the parsed flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Local,
    Serve,
    Instructions,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.local {
            Mode::Local
        } else if self.serve {
            Mode::Serve
        } else {
            Mode::Instructions
        }
    }
}

/// Sample invocations of both tools, as printed by `--local`.
pub fn run_local<W: Write>(out: &mut W, agent: &AgentDefinition) -> io::Result<()> {
    writeln!(out, "Running test agent in local mode...")?;
    writeln!(out, "Test Agent initialized")?;

    let health = agent.tools.health_check();
    writeln!(out, "Health Check: {}", to_json(&health)?)?;

    let response = agent.tools.process_prompt("Hello, test agent!", "");
    writeln!(out, "Prompt Response: {}", to_json(&response)?)?;

    let with_context = agent
        .tools
        .process_prompt("Test with context", "user-session-123");
    writeln!(out, "Response with Context: {}", to_json(&with_context)?)?;

    writeln!(out)?;
    writeln!(out, "Agent is ready for deployment to Vertex AI")
}

pub fn print_deployment_instructions<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Test agent ready for deployment to Vertex AI")?;
    writeln!(out, "Use 'diagnostic-agent --local' to test locally")?;
    writeln!(out)?;
    writeln!(out, "To deploy to Vertex AI:")?;
    writeln!(out, "1. Ensure you have set up Google Cloud credentials")?;
    writeln!(out, "2. Run: gcloud auth application-default login")?;
    writeln!(out, "3. Deploy using ADK CLI or Vertex AI console")
}

fn to_json<T: serde::Serialize>(value: &T) -> io::Result<String> {
    serde_json::to_string(value).map_err(io::Error::from)
}
