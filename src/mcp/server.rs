/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads newline-delimited JSON-RPC requests
/// 2. Routes tool calls to the habit store
/// 3. Writes JSON-RPC responses back, one per line

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::mcp::protocol::*;
use crate::storage::KeyValueStore;
use crate::tools;
use crate::{HabitTrackerServer, ServerError};

/// MCP server wrapping a habit tracker
pub struct McpServer<S: KeyValueStore, C: Clock> {
    habit_tracker: HabitTrackerServer<S, C>,
    initialized: bool,
}

impl<S: KeyValueStore, C: Clock> McpServer<S, C> {
    pub fn new(habit_tracker: HabitTrackerServer<S, C>) -> Self {
        Self {
            habit_tracker,
            initialized: false,
        }
    }

    /// Serve over the process's stdin/stdout until stdin closes
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
    }

    /// Serve requests from `reader`, writing responses to `writer`, until EOF
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = String::new();

        loop {
            line.clear();

            if reader.read_line(&mut line).await? == 0 {
                info!("MCP server shutting down (input closed)");
                break;
            }

            if let Some(response) = self.process_line(&line).await {
                let response_str = serde_json::to_string(&response)?;

                writer.write_all(response_str.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;

                debug!("Sent response: {}", response_str);
            }
        }

        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn habit_tracker(&self) -> &HabitTrackerServer<S, C> {
        &self.habit_tracker
    }

    /// Process a single line of JSON-RPC input
    pub async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            warn!("Rejecting request with jsonrpc version '{}'", request.jsonrpc);
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(Value::Null),
                error_codes::INVALID_REQUEST,
                format!("Unsupported jsonrpc version '{}'", request.jsonrpc),
            ));
        }

        if request.is_notification() {
            self.handle_notification(&request.method);
            return None;
        }

        Some(self.handle_request(request).await)
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "notifications/initialized" | "initialized" => {
                self.initialized = true;
                info!("MCP client finished initialization");
            }
            other => debug!("Ignoring notification: {}", other),
        }
    }

    async fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.unwrap_or(Value::Null);

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(id, Value::Null)
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": tool_definitions() })),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
            ),
        }
    }

    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION,
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: "Habit Tracker",
                version: env!("CARGO_PKG_VERSION"),
            },
        };

        to_response(id, &result)
    }

    fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(id, error_codes::INVALID_PARAMS, "Missing parameters");
        };
        let call: ToolCallParams = match serde_json::from_value(params) {
            Ok(call) => call,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                );
            }
        };

        debug!("Calling tool: {}", call.name);
        let result = self.call_tool(&call.name, call.arguments);
        if result.is_error {
            warn!("Tool {} failed", call.name);
        }

        to_response(id, &result)
    }

    fn call_tool(&mut self, name: &str, args: Map<String, Value>) -> ToolCallResult {
        let store = self.habit_tracker.store_mut();

        let outcome = match name {
            "habit_create" => parse_args(args)
                .and_then(|params| tools::create_habit(store, params).map_err(|e| e.to_string()))
                .map(|response| format!("{}\nHabit ID: {}", response.message, response.habit_id)),
            "habit_toggle" => parse_args(args)
                .and_then(|params| tools::toggle_habit(store, params).map_err(|e| e.to_string()))
                .map(|response| response.message),
            "habit_delete" => parse_args(args)
                .and_then(|params| tools::delete_habit(store, params).map_err(|e| e.to_string()))
                .map(|response| response.message),
            "habit_list" => parse_args(args)
                .and_then(|params| tools::list_habits(store, params).map_err(|e| e.to_string()))
                .map(|response| response.message),
            "habit_stats" => tools::get_habit_stats(store)
                .map(|response| response.message)
                .map_err(|e| e.to_string()),
            "habit_calendar" => parse_args(args)
                .and_then(|params| tools::get_habit_calendar(store, params).map_err(|e| e.to_string()))
                .map(|response| response.message),
            "habit_export" => tools::export_habits(store).map_err(|e| e.to_string()),
            _ => Err(format!("Unknown tool: {}", name)),
        };

        match outcome {
            Ok(text) => ToolCallResult::success(text),
            Err(message) => ToolCallResult::error(message),
        }
    }
}

fn parse_args<T: DeserializeOwned>(args: Map<String, Value>) -> Result<T, String> {
    serde_json::from_value(Value::Object(args)).map_err(|e| format!("Invalid arguments: {}", e))
}

fn to_response<T: serde::Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}

fn tool_definitions() -> Vec<ToolDefinition> {
    let habit_id_schema = json!({
        "type": "object",
        "properties": {
            "habit_id": {"type": "string", "description": "ID of the habit"}
        },
        "required": ["habit_id"]
    });

    vec![
        ToolDefinition {
            name: "habit_create",
            description: "Create a new daily habit to track",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string", "description": "Name of the habit"},
                    "category": {
                        "type": "string",
                        "enum": ["health", "productivity", "learning", "wellness", "other"],
                        "description": "Category of the habit"
                    }
                },
                "required": ["name", "category"]
            }),
        },
        ToolDefinition {
            name: "habit_toggle",
            description: "Mark a habit as done today, or undo it if already done",
            input_schema: habit_id_schema.clone(),
        },
        ToolDefinition {
            name: "habit_delete",
            description: "Delete a habit and all of its history",
            input_schema: habit_id_schema,
        },
        ToolDefinition {
            name: "habit_list",
            description: "List habits with today's status, streaks and per-category counts",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "category": {"type": "string", "description": "'all' or a category to filter by (optional)"},
                    "view": {"type": "string", "enum": ["list", "grouped"], "description": "Flat list or grouped by category (optional, defaults to list)"}
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: "habit_stats",
            description: "Today's progress, overall streaks, completion rate, the last 7 days and per-habit performance",
            input_schema: json!({"type": "object", "properties": {}, "required": []}),
        },
        ToolDefinition {
            name: "habit_calendar",
            description: "Month calendar showing how many habits were completed each day",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "year": {"type": "integer", "description": "Year (optional, defaults to the current year)"},
                    "month": {"type": "integer", "minimum": 1, "maximum": 12, "description": "Month 1-12 (optional, defaults to the current month)"}
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: "habit_export",
            description: "Export all habits and history as JSON",
            input_schema: json!({"type": "object", "properties": {}, "required": []}),
        },
    ]
}
