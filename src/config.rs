use std::env;
use std::time::Duration;

use crate::errors::{MCPError, MCPResult};

/// 默认的公共 MCP 服务器地址
pub const DEFAULT_SERVER_URL: &str = "https://certus.opensource.mieweb.org/mcp";
/// 默认请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const SERVER_URL_ENV: &str = "MCP_SERVER_URL";
pub const TIMEOUT_ENV: &str = "MCP_TIMEOUT_SECS";

/// 药品工具配置
///
/// 构造后不可变，每个查询组件持有自己的一份。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrugToolsConfig {
    /// MCP 服务器基础URL（不带末尾的 `/`）
    pub server_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for DrugToolsConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl DrugToolsConfig {
    /// 从环境变量（以及 `.env` 文件）加载配置
    pub fn from_env() -> MCPResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> MCPResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(SERVER_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config = config.with_server_url(url);
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let timeout_secs = raw.trim().parse::<u64>().map_err(|_| {
                MCPError::Config(format!("{} must be a whole number of seconds, got {:?}", TIMEOUT_ENV, raw))
            })?;
            config = config.with_timeout_secs(timeout_secs);
        }

        Ok(config)
    }

    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.server_url = url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `{server_url}/tools/{tool_name}`
    pub fn tool_url(&self, tool_name: &str) -> String {
        format!("{}/tools/{}", self.server_url, tool_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = DrugToolsConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, DrugToolsConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(
            config.tool_url("search_drug_shortages"),
            "https://certus.opensource.mieweb.org/mcp/tools/search_drug_shortages"
        );
    }

    #[test]
    fn test_env_overrides() {
        let config = DrugToolsConfig::from_lookup(lookup_from(&[
            (SERVER_URL_ENV, "http://localhost:8080/mcp/"),
            (TIMEOUT_ENV, "3"),
        ]))
        .unwrap();

        assert_eq!(config.server_url, "http://localhost:8080/mcp");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(
            config.tool_url("get_medication_profile"),
            "http://localhost:8080/mcp/tools/get_medication_profile"
        );
    }

    #[test]
    fn test_blank_url_keeps_default() {
        let config = DrugToolsConfig::from_lookup(lookup_from(&[(SERVER_URL_ENV, "  ")])).unwrap();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let err = DrugToolsConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "ten")])).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("MCP_TIMEOUT_SECS"));
    }
}
