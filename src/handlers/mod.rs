use crate::agent::AgentDefinition;
use crate::protocol::{
    InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallParams,
    ToolErrorResponse, ToolResult,
};

/// MCP protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub fn dispatch(req: &JsonRpcRequest, agent: &AgentDefinition) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            let params: InitializeParams = req
                .params
                .as_ref()
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .unwrap_or_default();
            let client = params.client_info.as_ref().and_then(|c| c.name.as_deref());
            tracing::info!(
                client = client.unwrap_or("unknown"),
                protocol = params.protocol_version.as_deref().unwrap_or("unspecified"),
                "initialize"
            );

            let result = serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": agent.name,
                    "version": env!("CARGO_PKG_VERSION")
                },
                "instructions": agent.instruction
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        method if method.starts_with("notifications/") => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => {
            let result = serde_json::json!({ "tools": agent.descriptors() });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params("Invalid tools/call params")
                                .with_data(serde_json::json!({ "detail": e.to_string() })),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    ));
                }
            };

            let tool_result = call_tool(&params, agent);
            match serde_json::to_value(&tool_result) {
                Ok(v) => Some(JsonRpcResponse::success(req.id.clone(), v)),
                Err(e) => Some(JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::internal_error(format!("Cannot serialize tool result: {e}")),
                )),
            }
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

/// Run one tool call and wrap its record (or dispatch error) as a tool result.
pub fn call_tool(params: &ToolCallParams, agent: &AgentDefinition) -> ToolResult {
    match agent.call_tool(&params.name, params.arguments.as_ref()) {
        Ok(value) => ToolResult::text(value.to_string()),
        Err(err) => {
            tracing::warn!(tool = %params.name, error = %err, "tool call rejected");
            ToolErrorResponse::from(err).into()
        }
    }
}
