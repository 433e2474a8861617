pub mod request;
pub mod response;

pub use request::{ClientInfo, InitializeParams, JsonRpcRequest, RpcId, ToolCallParams};
pub use response::{
    JsonRpcError, JsonRpcResponse, ToolErrorBody, ToolErrorCode, ToolErrorResponse, ToolResult,
    ToolResultContent,
};
