use clap::Parser;

use diagnostic_agent::agent::root_agent;
use diagnostic_agent::cli::{self, Cli, Mode};
use diagnostic_agent::config::AgentConfig;

fn render<F>(f: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
{
    let mut out = Vec::new();
    f(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn flags_select_mode() {
    let parse = |args: &[&str]| Cli::try_parse_from(args).unwrap().mode();

    assert_eq!(parse(&["diagnostic-agent"]), Mode::Instructions);
    assert_eq!(parse(&["diagnostic-agent", "--local"]), Mode::Local);
    assert_eq!(parse(&["diagnostic-agent", "--serve"]), Mode::Serve);
    assert!(Cli::try_parse_from(["diagnostic-agent", "--local", "--serve"]).is_err());
}

#[test]
fn local_mode_prints_sample_invocations() {
    let agent = root_agent(AgentConfig::default());
    let text = render(|out| cli::run_local(out, &agent));

    assert!(text.contains("Running test agent in local mode..."));
    assert!(text.contains("Test Agent initialized"));
    assert!(text.contains("Health Check:"));
    assert!(text.contains("Prompt Response:"));
    assert!(text.contains("Response with Context:"));
    assert!(text.contains("user-session-123"));
    assert!(text.trim_end().ends_with("Agent is ready for deployment to Vertex AI"));

    let health_line = text
        .lines()
        .find_map(|l| l.strip_prefix("Health Check: "))
        .unwrap();
    let health: serde_json::Value = serde_json::from_str(health_line).unwrap();
    assert_eq!(health["status"], "healthy");
}

#[test]
fn default_mode_prints_deployment_steps() {
    let text = render(|out| cli::print_deployment_instructions(out));

    assert!(text.contains("--local"));
    assert!(text.contains("gcloud auth application-default login"));
    assert!(text.contains("3. Deploy using ADK CLI or Vertex AI console"));
}
