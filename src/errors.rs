use thiserror::Error;

pub type Result<T> = anyhow::Result<T>;
pub type MCPResult<T> = std::result::Result<T, MCPError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MCPError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("MCP server returned status {0}")]
    ServerStatus(u16),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("{0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for MCPError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MCPError::Timeout(err.to_string())
        } else if err.is_decode() {
            MCPError::InvalidResponse(err.to_string())
        } else {
            MCPError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for MCPError {
    fn from(err: serde_json::Error) -> Self {
        MCPError::InvalidResponse(err.to_string())
    }
}

impl MCPError {
    pub fn error_code(&self) -> &'static str {
        match self {
            MCPError::InvalidParameter(_) => "INVALID_PARAMETER",
            MCPError::ServerStatus(_) => "SERVER_STATUS",
            MCPError::Timeout(_) => "TIMEOUT",
            MCPError::Transport(_) => "TRANSPORT_ERROR",
            MCPError::InvalidResponse(_) => "INVALID_RESPONSE",
            MCPError::Config(_) => "CONFIG_ERROR",
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            MCPError::InvalidParameter(_) => "检查参数格式并确保 drug_name 已提供",
            MCPError::ServerStatus(_) => "MCP 服务器返回了非 200 状态，请稍后重试或检查服务器地址",
            MCPError::Timeout(_) => "请检查网络连接，或调大 MCP_TIMEOUT_SECS",
            MCPError::Transport(_) => "请检查 MCP_SERVER_URL 是否可访问",
            MCPError::InvalidResponse(_) => "服务器响应格式不符合预期，请确认服务器版本",
            MCPError::Config(_) => "请检查 MCP_SERVER_URL / MCP_TIMEOUT_SECS 环境变量",
        }
    }

    /// 服务端状态或网络类错误，稍后重试可能成功
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MCPError::ServerStatus(_) | MCPError::Timeout(_) | MCPError::Transport(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_contains_code() {
        let err = MCPError::ServerStatus(503);
        assert_eq!(err.to_string(), "MCP server returned status 503");
        assert_eq!(err.error_code(), "SERVER_STATUS");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_shape_errors_are_not_recoverable() {
        let err = MCPError::InvalidResponse("results is not a list".to_string());
        assert_eq!(err.error_code(), "INVALID_RESPONSE");
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("results is not a list"));
    }

    #[test]
    fn test_every_error_has_a_suggestion() {
        let cases = [
            (MCPError::InvalidParameter("drug_name".to_string()), "drug_name", false),
            (MCPError::ServerStatus(500), "非 200", true),
            (MCPError::Timeout("operation timed out".to_string()), "MCP_TIMEOUT_SECS", true),
            (MCPError::Transport("connection refused".to_string()), "MCP_SERVER_URL", true),
            (MCPError::InvalidResponse("bad".to_string()), "响应格式", false),
            (MCPError::Config("bad".to_string()), "环境变量", false),
        ];

        for (err, hint, recoverable) in cases {
            println!("💡 {}: {}", err.error_code(), err.suggestion());
            assert!(err.suggestion().contains(hint), "{} 的建议应该包含 '{}'", err.error_code(), hint);
            assert_eq!(err.is_recoverable(), recoverable, "{}", err.error_code());
        }
    }

    #[test]
    fn test_json_error_maps_to_invalid_response() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: MCPError = json_err.into();
        assert!(matches!(err, MCPError::InvalidResponse(_)));
    }
}
