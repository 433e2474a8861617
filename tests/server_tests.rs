//! End-to-end tests of the stdio loop over in-memory buffers.

use diagnostic_agent::agent::{root_agent, AgentHost};
use diagnostic_agent::config::AgentConfig;
use diagnostic_agent::server::{McpServer, ServerError};
use serde_json::Value;

async fn run_session(input: &str) -> Vec<Value> {
    let mut server = McpServer::new();
    server.register(root_agent(AgentConfig::default())).unwrap();

    let mut out = Vec::new();
    server.serve(input.as_bytes(), &mut out).await.unwrap();

    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn full_session() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":"call-3","method":"tools/call","params":{"name":"process_prompt","arguments":{"prompt":"hi","context":"session-9"}}}"#,
        "\n",
    );

    let responses = run_session(input).await;
    assert_eq!(responses.len(), 3, "notification must not produce a response");

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 2);

    assert_eq!(responses[2]["id"], "call-3");
    let text = responses[2]["result"]["content"][0]["text"].as_str().unwrap();
    let payload: Value = serde_json::from_str(text).unwrap();
    assert_eq!(payload["prompt_received"], "hi");
    assert_eq!(payload["context"], "session-9");
    assert!(payload["metadata"]["project_id"].is_null());
    assert_eq!(payload["metadata"]["region"], "us-central1");
}

#[tokio::test]
async fn requests_before_initialize_are_rejected() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
    );

    let responses = run_session(input).await;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["error"]["code"], -32600);
    assert_eq!(responses[0]["error"]["message"], "Server not initialized");
}

#[tokio::test]
async fn malformed_lines_get_parse_errors() {
    let input = "not json\n\n{\"jsonrpc\":\"1.0\",\"id\":4,\"method\":\"ping\"}\n";

    let responses = run_session(input).await;
    assert_eq!(responses.len(), 2, "blank lines are skipped");
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0].get("id").is_none());
    assert_eq!(responses[1]["error"]["code"], -32600);
    assert_eq!(responses[1]["id"], 4);
}

#[tokio::test]
async fn serving_without_agent_fails() {
    let mut server = McpServer::new();
    let mut out = Vec::new();

    let err = server.serve(&b""[..], &mut out).await.unwrap_err();
    assert!(matches!(err, ServerError::NoAgent));
    assert!(out.is_empty());
}

#[tokio::test]
async fn notifications_never_get_replies() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/cancelled","params":{"requestId":7}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/progress"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"tools/call","params":{"name":"health_check"}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"no/such/method"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
        "\n",
    );

    let responses = run_session(input).await;
    assert_eq!(responses.len(), 2, "only requests with an id are answered: {responses:?}");
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"], serde_json::json!({}));
}

#[tokio::test]
async fn oversized_and_non_utf8_lines_get_parse_errors() {
    let mut input = Vec::new();
    input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"initialize\"}\n");
    input.extend(std::iter::repeat(b'x').take(1024 * 1024 + 10));
    input.push(b'\n');
    input.extend_from_slice(b"\xff\xfe\n");
    input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n");

    let mut server = McpServer::new();
    server.register(root_agent(AgentConfig::default())).unwrap();
    let mut out = Vec::new();
    server.serve(&input[..], &mut out).await.unwrap();

    let responses: Vec<Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(responses.len(), 4);
    for rejected in &responses[1..3] {
        assert_eq!(rejected["error"]["code"], -32700);
        assert_eq!(rejected["error"]["message"], "Parse error");
        assert!(rejected.get("id").is_none());
    }
    assert_eq!(responses[3]["id"], 2, "session continues after rejected lines");
    assert!(responses[3].get("error").is_none());
}
