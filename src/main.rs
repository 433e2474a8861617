use clap::Parser;
use tracing_subscriber::EnvFilter;

use diagnostic_agent::agent::{root_agent, AgentDefinition, AgentHost};
use diagnostic_agent::cli::{self, Cli, Mode};
use diagnostic_agent::config::AgentConfig;
use diagnostic_agent::server::{McpServer, ServerError};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // stdout carries tool output or protocol frames; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("diagnostic_agent=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Cli::parse();
    let config = AgentConfig::from_env();
    config.validate_environment();

    let agent = root_agent(config);

    let result: Result<(), ServerError> = match args.mode() {
        Mode::Local => cli::run_local(&mut std::io::stdout().lock(), &agent).map_err(Into::into),
        Mode::Instructions => {
            cli::print_deployment_instructions(&mut std::io::stdout().lock()).map_err(Into::into)
        }
        Mode::Serve => serve(agent).await,
    };

    if let Err(e) = result {
        tracing::error!("diagnostic-agent: fatal error: {e}");
        std::process::exit(1);
    }
}

async fn serve(agent: AgentDefinition) -> Result<(), ServerError> {
    let mut server = McpServer::new();
    server.register(agent)?;
    server.run().await
}
