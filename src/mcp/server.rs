/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads newline-delimited JSON-RPC requests from stdin
/// 2. Routes tool calls to the DayOne tools
/// 3. Writes JSON-RPC responses to stdout

use jsonrpc_core::ErrorCode;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools;
use crate::{AppError, DayOneApp};

/// MCP server wrapping a DayOne application
pub struct McpServer {
    app: DayOneApp,
    /// Whether the client finished the initialize handshake
    initialized: bool,
}

impl McpServer {
    pub fn new(app: DayOneApp) -> Self {
        Self {
            app,
            initialized: false,
        }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), AppError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    return Err(e.into());
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns None for blank lines and notifications.
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
                return Some(JsonRpcResponse::standard_error(
                    Value::Null,
                    ErrorCode::ParseError,
                    format!("Invalid JSON: {}", e),
                ));
            }
        };

        self.handle_request(request)
    }

    fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            self.handle_notification(&request.method);
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": tool_definitions() })),
            "tools/call" => self.handle_tools_call(id, request.params),
            // Some clients send this as a request instead of a notification
            "initialized" | "notifications/initialized" => {
                self.handle_notification(&request.method);
                JsonRpcResponse::success(id, json!({}))
            }
            _ => JsonRpcResponse::standard_error(
                id,
                ErrorCode::MethodNotFound,
                format!("Method '{}' not found", request.method),
            ),
        };

        Some(response)
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                info!("MCP client finished initialization");
            }
            other => debug!("Ignoring notification {}", other),
        }
    }

    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: "dayone".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::standard_error(id, ErrorCode::InternalError, e.to_string()),
        }
    }

    fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::standard_error(id, ErrorCode::InvalidParams, "Missing parameters".to_string());
        };
        let call: ToolCallParams = match serde_json::from_value(params) {
            Ok(call) => call,
            Err(e) => {
                return JsonRpcResponse::standard_error(
                    id,
                    ErrorCode::InvalidParams,
                    format!("Invalid parameters: {}", e),
                );
            }
        };

        if !self.initialized {
            warn!("Tool {} called before initialization finished", call.name);
        }

        let result = match self.call_tool(&call.name, call.arguments) {
            Ok(text) => ToolCallResult::success(text),
            Err(e) if is_tool_error(&e) => {
                debug!("Tool {} rejected the call: {}", call.name, e);
                ToolCallResult::error(e.to_string())
            }
            Err(e) => {
                error!("Tool {} failed: {}", call.name, e);
                return JsonRpcResponse::error(id, app_error_code(&e), e.to_string());
            }
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::standard_error(id, ErrorCode::InternalError, e.to_string()),
        }
    }

    /// Run a tool and return the text shown to the client
    fn call_tool(&mut self, name: &str, args: Map<String, Value>) -> Result<String, AppError> {
        let args = Value::Object(args);
        let app = &mut self.app;

        match name {
            "habit_create" => {
                let response = tools::create_habit(app, parse_args(args)?)?;
                Ok(match response.habit_id {
                    Some(habit_id) => format!("{}\nHabit ID: {}", response.message, habit_id),
                    None => response.message,
                })
            }
            "habit_delete" => Ok(tools::delete_habit(app, parse_args(args)?)?.message),
            "habit_toggle" => Ok(tools::toggle_habit(app, parse_args(args)?)?.message),
            "habit_status" => Ok(tools::get_habit_status(app, parse_args(args)?)?.message),
            "weekly_overview" => Ok(tools::weekly_overview(app, parse_args(args)?)?.message),
            "overall_stats" => Ok(tools::overall_stats(app, parse_args(args)?)?.message),
            "journal_save" => Ok(tools::save_journal_entry(app, parse_args(args)?)?.message),
            "journal_get" => Ok(tools::get_journal_entry(app, parse_args(args)?)?.message),
            "app_settings" => Ok(tools::update_settings(app, parse_args(args)?)?.message),
            _ => Err(AppError::InvalidParams(format!("Unknown tool: {}", name))),
        }
    }
}

fn parse_args<P: DeserializeOwned>(args: Value) -> Result<P, AppError> {
    serde_json::from_value(args).map_err(|e| AppError::InvalidParams(e.to_string()))
}

fn definition<P: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: serde_json::to_value(schema_for!(P)).unwrap_or_else(|_| json!({ "type": "object" })),
    }
}

/// Every tool the server offers, with schemas derived from the parameter types
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        definition::<tools::CreateHabitParams>("habit_create", "Create a new habit to track"),
        definition::<tools::DeleteHabitParams>("habit_delete", "Delete a habit and its completion history"),
        definition::<tools::ToggleHabitParams>(
            "habit_toggle",
            "Mark a habit done or not done for a day (defaults to the selected day)",
        ),
        definition::<tools::StatusParams>(
            "habit_status",
            "Today view: which habits are done, with current and longest streaks",
        ),
        definition::<tools::WeeklyParams>(
            "weekly_overview",
            "Completion rates for the Sunday-to-Saturday week around a day",
        ),
        definition::<tools::OverallParams>(
            "overall_stats",
            "Lifetime totals, best streaks and insights across all habits",
        ),
        definition::<tools::SaveJournalParams>("journal_save", "Write or revise the journal entry for a day"),
        definition::<tools::GetJournalParams>("journal_get", "Read the journal entry for a day"),
        definition::<tools::SettingsParams>(
            "app_settings",
            "Show or change the selected day, current view and dark mode",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_app;

    async fn send(server: &mut McpServer, request: Value) -> Option<Value> {
        let response = server.process_line(&request.to_string()).await?;
        Some(serde_json::to_value(response).unwrap())
    }

    async fn call(server: &mut McpServer, id: u64, name: &str, arguments: Value) -> Value {
        send(server, json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": {"name": name, "arguments": arguments}
        })).await.unwrap()
    }

    #[tokio::test]
    async fn test_initialize_handshake() {
        let mut server = McpServer::new(test_app());

        let response = send(&mut server, json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {"protocolVersion": MCP_VERSION, "capabilities": {}, "clientInfo": {"name": "test", "version": "1"}}
        })).await.unwrap();
        assert_eq!(response["result"]["protocolVersion"], MCP_VERSION);
        assert_eq!(response["result"]["serverInfo"]["name"], "dayone");

        let notification = send(&mut server, json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        })).await;
        assert!(notification.is_none());
        assert!(server.initialized);
    }

    #[tokio::test]
    async fn test_tools_list() {
        let mut server = McpServer::new(test_app());
        let response = send(&mut server, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await.unwrap();

        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 9);
        let create = tools.iter().find(|tool| tool["name"] == "habit_create").unwrap();
        assert!(create["inputSchema"]["properties"]["name"].is_object());
    }

    #[tokio::test]
    async fn test_create_toggle_and_status() {
        let mut server = McpServer::new(test_app());

        let created = call(&mut server, 1, "habit_create", json!({"name": "Read"})).await;
        assert_eq!(created["result"]["isError"], false);

        let toggled = call(&mut server, 2, "habit_toggle", json!({"habit_id": "read"})).await;
        let text = toggled["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Current streak: 1 day"));

        let status = call(&mut server, 3, "habit_status", json!({})).await;
        let text = status["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("1 of 1 habits done (100%)"));
    }

    #[tokio::test]
    async fn test_tool_errors_are_results() {
        let mut server = McpServer::new(test_app());

        let unknown = call(&mut server, 1, "habit_toggle", json!({"habit_id": "Swim"})).await;
        assert_eq!(unknown["result"]["isError"], true);

        let missing = call(&mut server, 2, "habit_create", json!({})).await;
        assert_eq!(missing["result"]["isError"], true);

        let no_such_tool = call(&mut server, 3, "habit_juggle", json!({})).await;
        assert_eq!(no_such_tool["result"]["isError"], true);
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let mut server = McpServer::new(test_app());

        let garbage = server.process_line("{not json").await.unwrap();
        assert_eq!(garbage.error.unwrap().code, -32700);

        let unknown = send(&mut server, json!({"jsonrpc": "2.0", "id": 9, "method": "resources/list"})).await.unwrap();
        assert_eq!(unknown["error"]["code"], -32601);

        let ping = send(&mut server, json!({"jsonrpc": "2.0", "id": 10, "method": "ping"})).await.unwrap();
        assert_eq!(ping["result"], json!({}));

        assert!(server.process_line("   ").await.is_none());
    }
}
