// MCP server: JSON-RPC dispatch and the newline-delimited stdio loop

use crate::protocol::{
    negotiate_protocol_version, CallToolParams, CallToolResult, InitializeParams,
    InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListToolsResult,
    ServerCapabilities, ServerInfo, ToolsCapability,
};
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

const INSTRUCTIONS: &str = "Tools for the Sprout Social API. Call list_customers to discover \
                            customer IDs and list_profiles for profile IDs before using the \
                            analytics, messages and publishing tools. Failures are returned as \
                            a JSON error record with status, endpoint, kind and body.";

/// MCP server over a fixed tool registry
#[derive(Clone)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            info: ServerInfo {
                name: "sprout-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Answer one request. Notifications yield `None`.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!(
                    "Unsupported jsonrpc version '{}'",
                    request.jsonrpc
                )),
            ));
        }

        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => to_result(&ListToolsResult {
                tools: self.registry.list_schemas(),
            }),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn initialize(
        &self,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, JsonRpcError> {
        let params: Option<InitializeParams> = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid initialize params: {}", e)))?;

        let requested = params.as_ref().map(|p| p.protocol_version.as_str());
        let protocol_version = negotiate_protocol_version(requested);

        if let Some(client) = params.as_ref().and_then(|p| p.client_info.as_ref()) {
            tracing::info!(
                client = %client.name,
                client_version = %client.version,
                protocol_version,
                "Client initialized"
            );
        }

        to_result(&InitializeResult {
            protocol_version: protocol_version.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: self.info.clone(),
            instructions: Some(INSTRUCTIONS.to_string()),
        })
    }

    async fn call_tool(
        &self,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, JsonRpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| JsonRpcError::invalid_params("Missing tools/call params"))
            .and_then(|p| {
                serde_json::from_value(p).map_err(|e| {
                    JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e))
                })
            })?;

        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)))?;

        let started = Instant::now();
        let result = match tool.execute(params.arguments).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(tool = %params.name, error = %e, "Tool execution failed");
                CallToolResult::error(format!("{:#}", e))
            }
        };
        tracing::debug!(
            tool = %params.name,
            is_error = result.is_error(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Tool call finished"
        );

        to_result(&result)
    }

    /// Serve newline-delimited JSON-RPC until `reader` reaches EOF.
    ///
    /// Requests run concurrently; responses are written one line at a
    /// time in completion order.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

        let writer_task = tokio::spawn(async move {
            let mut writer = BufWriter::new(writer);
            while let Some(response) = rx.recv().await {
                let line = serde_json::to_string(&response)?;
                writer.write_all(line.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
            writer.shutdown().await?;
            anyhow::Ok(())
        });

        let mut reader = BufReader::new(reader);
        let mut line = Vec::new();
        let mut in_flight = JoinSet::new();

        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .await
                .context("Failed to read from input")?;
            if read == 0 {
                break;
            }
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let request = match parse_request(&line) {
                Ok(request) => request,
                Err(response) => {
                    let _ = tx.send(response);
                    continue;
                }
            };

            let server = self.clone();
            let tx = tx.clone();
            in_flight.spawn(async move {
                let id = request.id.clone();
                let method = request.method.clone();
                let response = match tokio::spawn(async move { server.handle(request).await }).await
                {
                    Ok(response) => response,
                    Err(e) => {
                        tracing::error!(method = %method, error = %e, "Request handler panicked");
                        id.map(|id| {
                            JsonRpcResponse::error(
                                id,
                                JsonRpcError::internal_error(format!(
                                    "Internal error while handling '{}'",
                                    method
                                )),
                            )
                        })
                    }
                };
                if let Some(response) = response {
                    // Receiver only goes away if the writer failed
                    let _ = tx.send(response);
                }
            });

            while let Some(done) = in_flight.try_join_next() {
                log_join(done);
            }
        }

        tracing::debug!(pending = in_flight.len(), "Input closed, draining requests");
        while let Some(done) = in_flight.join_next().await {
            log_join(done);
        }
        drop(tx);

        writer_task
            .await
            .context("Response writer task failed")?
            .context("Failed to write response")
    }

    /// Serve on this process's stdin and stdout.
    pub async fn start(&self) -> Result<()> {
        tracing::info!(
            tools = self.registry.len(),
            version = %self.info.version,
            "MCP server listening on stdio"
        );
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await?;
        tracing::info!("Input closed, MCP server stopped");
        Ok(())
    }
}

/// Decode one line, or produce the error response it deserves.
///
/// Bytes that are not UTF-8 are a parse error like any other bad JSON.
fn parse_request(line: &[u8]) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let value: serde_json::Value = serde_json::from_slice(line).map_err(|e| {
        tracing::warn!(error = %e, "Malformed JSON on input");
        JsonRpcResponse::error(serde_json::Value::Null, JsonRpcError::parse_error(e))
    })?;

    let id = value.get("id").cloned().unwrap_or(serde_json::Value::Null);
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(error = %e, "Invalid JSON-RPC request");
        JsonRpcResponse::error(
            id,
            JsonRpcError::invalid_request(format!("Invalid request: {}", e)),
        )
    })
}

fn to_result<T: Serialize>(value: &T) -> Result<serde_json::Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

fn log_join(done: Result<(), tokio::task::JoinError>) {
    if let Err(e) = done {
        tracing::error!(error = %e, "Request task failed");
    }
}
