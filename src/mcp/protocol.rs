use serde::{Deserialize, Serialize};
use serde_json::Value;

/// MCP 协议版本
pub const MCP_VERSION: &str = "2025-03-26";

/// MCP 服务器的功能列表
pub const SERVER_CAPABILITIES: &[&str] = &[
    "tools",
];

/// MCP 请求（每行一个 JSON）
#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// 请求 ID，数字或字符串
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// MCP 响应
#[derive(Debug, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

/// MCP 错误响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// MCP 初始化参数
#[derive(Debug, Default, Deserialize)]
pub struct InitializeParams {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_version: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// MCP 初始化结果
#[derive(Debug, Serialize)]
pub struct InitializeResult {
    pub server_name: String,
    pub server_version: String,
    pub protocol_version: String,
    pub capabilities: Vec<String>,
}

impl Response {
    /// 创建一个成功响应
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    /// 创建一个错误响应
    pub fn error(id: Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(ErrorResponse {
                code,
                message,
                data: None,
            }),
        }
    }
}

// 错误代码定义
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const TOOL_EXECUTION_FAILED: i32 = -32000;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_creation() {
        let resp = Response::success(json!(1), json!({"status": "ok"}));
        assert_eq!(resp.id, json!(1));
        assert!(resp.error.is_none());

        let err_resp = Response::error(
            json!("req-2"),
            error_codes::INVALID_REQUEST,
            "Invalid request".to_string(),
        );
        let value = serde_json::to_value(&err_resp).unwrap();
        assert_eq!(value["id"], "req-2");
        assert_eq!(value["error"]["code"], -32600);
        assert!(value.get("result").is_none());
    }

    #[test]
    fn test_request_defaults() {
        let req: Request = serde_json::from_str(r#"{"method": "tools/list"}"#).unwrap();
        assert_eq!(req.method, "tools/list");
        assert!(req.id.is_null());
        assert!(req.params.is_null());
    }
}
