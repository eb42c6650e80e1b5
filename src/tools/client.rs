use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::DrugToolsConfig;
use crate::errors::{MCPError, MCPResult};

/// 远程药品信息 MCP 服务器的 HTTP 客户端
///
/// 每次调用只发一个 `POST {server_url}/tools/{tool_name}` 请求，不重试、不缓存。
#[derive(Clone)]
pub struct DrugServiceClient {
    config: DrugToolsConfig,
    client: Client,
}

impl DrugServiceClient {
    pub fn new(config: DrugToolsConfig) -> MCPResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| MCPError::Config(format!("failed to build HTTP client: {}", e)))?;

        debug!("🔧 药品服务客户端: {} (超时 {}s)", config.server_url, config.timeout_secs);

        Ok(Self { config, client })
    }

    /// 调用远程工具，只有 200 视为成功
    pub async fn call_tool(&self, tool_name: &str, body: &Value) -> MCPResult<Value> {
        let url = self.config.tool_url(tool_name);
        debug!("📤 POST {} {}", url, body);

        let response = self.client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!("📥 {} 返回状态 {}", tool_name, status);
            return Err(MCPError::ServerStatus(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        debug!("📥 {} 返回 {} 字节", tool_name, bytes.len());

        Ok(serde_json::from_slice(&bytes)?)
    }
}
