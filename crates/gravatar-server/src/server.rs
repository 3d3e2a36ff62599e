//! MCP server loop — line-delimited JSON-RPC 2.0 over stdio.
//!
//! The loop is generic over the reader/writer pair so tests can drive it with
//! in-memory duplex streams. Logging goes to stderr; stdout carries only
//! protocol frames.

use crate::protocol::{
    JsonRpcRequest, JsonRpcResponse, INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR,
    PROTOCOL_VERSION,
};
use gravatar_core::ToolResponse;
use gravatar_tools::ToolRegistry;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

/// Serves the registered tools over an MCP stdio transport.
pub struct McpServer {
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a server over the given tool registry.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Serve stdin/stdout until the client closes the stream.
    pub async fn run_stdio(&self) -> std::io::Result<()> {
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.run(reader, writer).await
    }

    /// Serve an arbitrary reader/writer pair until EOF.
    pub async fn run<R, W>(&self, mut reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(tools = self.registry.tool_count(), "MCP server ready");
        let mut line = String::new();
        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    debug!("client closed the stream, shutting down");
                    break;
                }
                Ok(_) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    if let Some(resp) = self.handle_line(trimmed).await {
                        let msg = serde_json::to_string(&resp).map_err(std::io::Error::other)?;
                        writer.write_all(msg.as_bytes()).await?;
                        writer.write_all(b"\n").await?;
                        writer.flush().await?;
                    }
                }
                Err(e) => {
                    error!(error = %e, "Error reading request stream");
                    break;
                }
            }
        }
        Ok(())
    }

    /// Parse and dispatch one frame. Notifications produce no response.
    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let req: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                debug!(error = %e, "Non-JSON-RPC line from client");
                return Some(JsonRpcResponse::error(
                    serde_json::Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };

        let Some(id) = req.id else {
            debug!(method = %req.method, "notification");
            return None;
        };

        Some(self.dispatch(&req.method, req.params, id).await)
    }

    async fn dispatch(
        &self,
        method: &str,
        params: Option<serde_json::Value>,
        id: serde_json::Value,
    ) -> JsonRpcResponse {
        match method {
            "initialize" => JsonRpcResponse::result(id, self.initialize_result()),
            "ping" => JsonRpcResponse::result(id, serde_json::json!({})),
            "tools/list" => {
                let tools = self.registry.descriptors();
                JsonRpcResponse::result(id, serde_json::json!({ "tools": tools }))
            }
            "tools/call" => self.call_tool(params, id).await,
            other => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ),
        }
    }

    fn initialize_result(&self) -> serde_json::Value {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": "gravatar-mcp",
                "version": env!("CARGO_PKG_VERSION"),
            },
        })
    }

    /// Execute a tool call. Tool failures — validation and upstream alike —
    /// become `isError` envelopes, not JSON-RPC errors.
    async fn call_tool(
        &self,
        params: Option<serde_json::Value>,
        id: serde_json::Value,
    ) -> JsonRpcResponse {
        let params = params.unwrap_or_else(|| serde_json::json!({}));
        let Some(name) = params.get("name").and_then(|n| n.as_str()) else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing tool name");
        };
        let Some(tool) = self.registry.get(name) else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Unknown tool: {name}"));
        };
        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| serde_json::json!({}));

        info!(tool = %name, "Tool call");
        let response = match tool.invoke(arguments).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(tool = %name, error = %e, "Tool call failed");
                ToolResponse::error(e.to_string())
            }
        };

        match serde_json::to_value(&response) {
            Ok(value) => JsonRpcResponse::result(id, value),
            Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
        }
    }
}
