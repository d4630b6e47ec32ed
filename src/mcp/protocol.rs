/// MCP (Model Context Protocol) message structures and JSON-RPC handling
///
/// This module defines the JSON-RPC message format MCP clients use to talk
/// to the DayOne server, and how application errors map onto error codes.

use jsonrpc_core::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;
use crate::AppError;

/// MCP protocol version we support
pub const MCP_VERSION: &str = "2024-11-05";

/// JSON-RPC 2.0 request message
///
/// A request without an `id` is a notification and gets no response.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0")
    #[allow(dead_code)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    /// The method to call (e.g., "tools/call")
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 response message
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// MCP tool call parameters
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    /// Name of the tool to call (e.g., "habit_toggle")
    pub name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

/// Result of a tool call, as shown to the client
#[derive(Debug, Serialize)]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
    /// Tool failures are reported here rather than as JSON-RPC errors
    #[serde(rename = "isError")]
    pub is_error: bool,
}

#[derive(Debug, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// Describes one tool to the client
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema of the tool's parameter struct
    pub input_schema: Value,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    pub list_changed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// Application-specific error codes, in the JSON-RPC server error range
pub mod error_codes {
    /// The referenced habit doesn't exist
    pub const HABIT_NOT_FOUND: i64 = -32001;
    /// Input validation failed
    pub const VALIDATION_ERROR: i64 = -32003;
    /// Database or storage operation failed
    pub const STORAGE_ERROR: i64 = -32004;
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i64, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
        }
    }

    /// An error response for one of the standard JSON-RPC error codes
    pub fn standard_error(id: Value, code: ErrorCode, message: String) -> Self {
        Self::error(id, code.code(), message)
    }
}

impl ToolCallResult {
    pub fn success(text: String) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text,
            }],
            is_error: false,
        }
    }

    pub fn error(error_message: String) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text: format!("Error: {}", error_message),
            }],
            is_error: true,
        }
    }
}

/// Map an application error to the JSON-RPC code reported for it
pub fn app_error_code(error: &AppError) -> i64 {
    match error {
        AppError::Domain(DomainError::HabitNotFound(_)) => error_codes::HABIT_NOT_FOUND,
        AppError::Domain(_) => error_codes::VALIDATION_ERROR,
        AppError::InvalidParams(_) => ErrorCode::InvalidParams.code(),
        AppError::Storage(_) => error_codes::STORAGE_ERROR,
        AppError::Io(_) | AppError::Json(_) => ErrorCode::InternalError.code(),
    }
}

/// Whether an error is the caller's fault and belongs in the tool result
///
/// Everything else is an infrastructure failure and becomes a JSON-RPC error.
pub fn is_tool_error(error: &AppError) -> bool {
    matches!(error, AppError::Domain(_) | AppError::InvalidParams(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_result_serialization() {
        let value = serde_json::to_value(ToolCallResult::error("boom".to_string())).unwrap();
        assert_eq!(value, json!({
            "content": [{"type": "text", "text": "Error: boom"}],
            "isError": true
        }));
    }

    #[test]
    fn test_notification_has_no_id() {
        let request: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).unwrap();
        assert!(request.id.is_none());
        assert!(request.params.is_none());
    }

    #[test]
    fn test_error_codes() {
        let not_found = AppError::Domain(DomainError::HabitNotFound("x".to_string()));
        assert_eq!(app_error_code(&not_found), error_codes::HABIT_NOT_FOUND);
        assert!(is_tool_error(&not_found));

        let params = AppError::InvalidParams("bad".to_string());
        assert_eq!(app_error_code(&params), -32602);

        let storage = AppError::Storage(crate::storage::StorageError::Migration("v2".to_string()));
        assert_eq!(app_error_code(&storage), error_codes::STORAGE_ERROR);
        assert!(!is_tool_error(&storage));
    }

    #[test]
    fn test_initialize_result_uses_camel_case() {
        let value = serde_json::to_value(InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: "dayone".to_string(),
                version: "0.1.0".to_string(),
            },
        }).unwrap();

        assert_eq!(value["protocolVersion"], MCP_VERSION);
        assert_eq!(value["capabilities"]["tools"]["listChanged"], false);
        assert_eq!(value["serverInfo"]["name"], "dayone");
    }
}
