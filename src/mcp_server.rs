//! JSON-RPC-over-stdio dispatcher.
//!
//! Exposes the scan and audit operations as tools for an assistant-side
//! consumer. The loop is transport glue only; every operation is the same
//! library call the CLI uses.

use crate::audit::{HostSnapshot, run_live_audit};
use crate::rules::{Category, list_rules};
use crate::scanner::{DEFAULT_FILE_CAP, scan_content, scan_file, scan_path};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::info;

pub struct McpServer;

#[derive(Debug, Serialize, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    params: Option<Value>,
}

#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    name: String,
    description: String,
    #[serde(rename = "inputSchema")]
    input_schema: Value,
}

const FALLBACK_RESPONSE: &str =
    r#"{"jsonrpc":"2.0","error":{"code":-32603,"message":"Internal error"}}"#;

fn invalid_params(message: impl Into<String>) -> JsonRpcError {
    JsonRpcError {
        code: -32602,
        message: message.into(),
    }
}

/// Wrap a report as an MCP text content block.
fn text_result<T: Serialize>(value: &T) -> Value {
    let text = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize result: {}"}}"#, e));
    json!({ "content": [{ "type": "text", "text": text }] })
}

impl McpServer {
    pub fn new() -> Self {
        Self
    }

    /// Serve JSON-RPC requests line by line until stdin closes.
    pub fn run(&self) {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        let reader = BufReader::new(stdin.lock());

        info!("MCP server started");

        for line in reader.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error reading input: {}", e);
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
                Ok(request) => self.handle_request(request),
                Err(e) => JsonRpcResponse {
                    jsonrpc: "2.0".to_string(),
                    id: None,
                    result: None,
                    error: Some(JsonRpcError {
                        code: -32700,
                        message: format!("Parse error: {}", e),
                    }),
                },
            };

            let serialized = serde_json::to_string(&response)
                .unwrap_or_else(|_| FALLBACK_RESPONSE.to_string());
            let _ = writeln!(stdout, "{}", serialized);
            let _ = stdout.flush();
        }
    }

    fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let result = match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize()),
            "tools/list" => Ok(self.handle_list_tools()),
            "tools/call" => self.handle_tool_call(&request.params),
            "shutdown" => Ok(json!({})),
            _ => Err(JsonRpcError {
                code: -32601,
                message: format!("Method not found: {}", request.method),
            }),
        };

        match result {
            Ok(value) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: request.id,
                result: Some(value),
                error: None,
            },
            Err(error) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: request.id,
                result: None,
                error: Some(error),
            },
        }
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": "2024-11-05",
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": "cms-audit",
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    fn handle_list_tools(&self) -> Value {
        let tools = vec![
            Tool {
                name: "scan".to_string(),
                description: "Scan a file or directory tree for vulnerability-shaped code patterns"
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "path": { "type": "string", "description": "Path to scan" },
                        "category": {
                            "type": "string",
                            "description": "Restrict to one rule category (optional)"
                        }
                    },
                    "required": ["path"]
                }),
            },
            Tool {
                name: "scan_file".to_string(),
                description: "Scan a single source file with the full rule set".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "path": { "type": "string", "description": "File to scan" }
                    },
                    "required": ["path"]
                }),
            },
            Tool {
                name: "scan_content".to_string(),
                description: "Scan a content string for vulnerability-shaped code patterns"
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "content": { "type": "string", "description": "Content to scan" },
                        "filename": {
                            "type": "string",
                            "description": "Virtual filename for context"
                        }
                    },
                    "required": ["content"]
                }),
            },
            Tool {
                name: "list_rules".to_string(),
                description: "List registered detection rules".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Filter by category (optional)"
                        }
                    }
                }),
            },
            Tool {
                name: "live_audit".to_string(),
                description: "Audit a live instance's configuration and produce a scored report"
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "snapshot": {
                            "type": "object",
                            "description": "Host snapshot facts"
                        },
                        "snapshot_path": {
                            "type": "string",
                            "description": "Path to a snapshot JSON file"
                        }
                    }
                }),
            },
        ];

        json!({ "tools": tools })
    }

    fn handle_tool_call(&self, params: &Option<Value>) -> Result<Value, JsonRpcError> {
        let params = params
            .as_ref()
            .ok_or_else(|| invalid_params("Missing params"))?;
        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| invalid_params("Missing tool name"))?;
        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        match name {
            "scan" => self.tool_scan(&arguments),
            "scan_file" => self.tool_scan_file(&arguments),
            "scan_content" => self.tool_scan_content(&arguments),
            "list_rules" => self.tool_list_rules(&arguments),
            "live_audit" => self.tool_live_audit(&arguments),
            _ => Err(invalid_params(format!("Unknown tool: {}", name))),
        }
    }

    fn tool_scan(&self, args: &Value) -> Result<Value, JsonRpcError> {
        let path = args
            .get("path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| invalid_params("Missing 'path' argument"))?;
        let category = parse_category(args)?;

        match scan_path(&PathBuf::from(path), category, DEFAULT_FILE_CAP) {
            Ok(report) => Ok(text_result(&report)),
            Err(e) => Err(JsonRpcError {
                code: -32000,
                message: format!("Scan failed: {}", e),
            }),
        }
    }

    fn tool_scan_file(&self, args: &Value) -> Result<Value, JsonRpcError> {
        let path = args
            .get("path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| invalid_params("Missing 'path' argument"))?;

        match scan_file(&PathBuf::from(path)) {
            Ok(report) => Ok(text_result(&report)),
            Err(e) => Err(JsonRpcError {
                code: -32000,
                message: format!("Scan failed: {}", e),
            }),
        }
    }

    fn tool_scan_content(&self, args: &Value) -> Result<Value, JsonRpcError> {
        let content = args
            .get("content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| invalid_params("Missing 'content' argument"))?;
        let filename = args
            .get("filename")
            .and_then(|v| v.as_str())
            .unwrap_or("content.php");

        Ok(text_result(&scan_content(content, filename)))
    }

    fn tool_list_rules(&self, args: &Value) -> Result<Value, JsonRpcError> {
        let category = parse_category(args)?;
        Ok(text_result(&list_rules(category)))
    }

    fn tool_live_audit(&self, args: &Value) -> Result<Value, JsonRpcError> {
        let snapshot = if let Some(value) = args.get("snapshot") {
            serde_json::from_value::<HostSnapshot>(value.clone())
                .map_err(|e| invalid_params(format!("Invalid snapshot: {}", e)))?
        } else if let Some(path) = args.get("snapshot_path").and_then(|v| v.as_str()) {
            HostSnapshot::from_file(&PathBuf::from(path)).map_err(|e| JsonRpcError {
                code: -32000,
                message: format!("Audit failed: {}", e),
            })?
        } else {
            HostSnapshot::default()
        };

        Ok(text_result(&run_live_audit(&snapshot)))
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_category(args: &Value) -> Result<Option<Category>, JsonRpcError> {
    match args.get("category").and_then(|v| v.as_str()) {
        None => Ok(None),
        Some(raw) => serde_json::from_value::<Category>(Value::String(raw.to_string()))
            .map(Some)
            .map_err(|_| invalid_params(format!("Unknown category: {}", raw))),
    }
}
