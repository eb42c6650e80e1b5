use anyhow::Result;
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use crate::tools::base::MCPTool;

use super::protocol::error_codes;
use super::{Request, Response, InitializeParams, InitializeResult, MCP_VERSION, SERVER_CAPABILITIES};

/// 工具信息结构
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub category: String,
    pub parameters: Value,
}

impl ToolInfo {
    fn from_tool(tool: &dyn MCPTool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            category: tool.annotations().category.clone(),
            parameters: serde_json::to_value(tool.parameters_schema()).unwrap_or_else(|_| json!({})),
        }
    }
}

/// MCP 工具注册表
pub struct MCPServer {
    tools: Arc<RwLock<Vec<Box<dyn MCPTool>>>>,
}

impl Default for MCPServer {
    fn default() -> Self {
        Self::new()
    }
}

impl MCPServer {
    pub fn new() -> Self {
        Self {
            tools: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn register_tool(&self, tool: Box<dyn MCPTool>) -> Result<()> {
        let mut tools = self.tools.write().await;
        if tools.iter().any(|t| t.name() == tool.name()) {
            return Err(anyhow::anyhow!("工具已注册: {}", tool.name()));
        }
        tools.push(tool);
        Ok(())
    }

    pub async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
        let tools = self.tools.read().await;

        for tool in tools.iter() {
            if tool.name() == tool_name {
                return tool.execute(params).await;
            }
        }

        Err(anyhow::anyhow!("工具不存在: {}", tool_name))
    }

    /// 获取所有工具列表
    pub async fn list_tools(&self) -> Vec<ToolInfo> {
        let tools = self.tools.read().await;
        tools.iter().map(|tool| ToolInfo::from_tool(tool.as_ref())).collect()
    }

    /// 获取指定工具的信息
    pub async fn get_tool_info(&self, tool_name: &str) -> Option<ToolInfo> {
        let tools = self.tools.read().await;
        tools
            .iter()
            .find(|tool| tool.name() == tool_name)
            .map(|tool| ToolInfo::from_tool(tool.as_ref()))
    }

    /// 获取工具数量
    pub async fn get_tool_count(&self) -> usize {
        self.tools.read().await.len()
    }
}

/// 基于 stdio 的 MCP 服务器：每行一个请求，每行一个响应
pub struct Server {
    name: String,
    version: String,
    initialized: bool,
    mcp_server: MCPServer,
}

impl Server {
    /// 创建新的 MCP 服务器实例
    pub fn new(name: String, version: String, mcp_server: MCPServer) -> Self {
        Self {
            name,
            version,
            initialized: false,
            mcp_server,
        }
    }

    /// 在 stdin/stdout 上运行服务器
    pub async fn run(&mut self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.run_with(stdin, &mut stdout).await
    }

    pub async fn run_with<R, W>(&mut self, mut reader: R, writer: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("🔧 MCP服务器已启动，等待请求...");

        loop {
            let mut request_line = String::new();
            match reader.read_line(&mut request_line).await {
                Ok(0) => {
                    info!("📡 客户端断开连接");
                    break;
                }
                Ok(n) => debug!("📥 收到 {} 字节数据", n),
                Err(e) => {
                    warn!("❌ 读取请求失败: {}", e);
                    break;
                }
            }

            if request_line.trim().is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<Request>(&request_line) {
                Ok(request) => {
                    debug!("🔄 处理请求: {}", request.method);
                    self.handle_request(request).await
                }
                Err(e) => {
                    warn!("❌ 请求解析失败: {}", e);
                    Response::error(Value::Null, error_codes::PARSE_ERROR, format!("Parse error: {}", e))
                }
            };

            let response_json = serde_json::to_string(&response)?;
            writer.write_all(response_json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        info!("👋 MCP服务器关闭");
        Ok(())
    }

    /// 处理 MCP 请求
    pub async fn handle_request(&mut self, request: Request) -> Response {
        match request.method.as_str() {
            "initialize" => {
                if self.initialized {
                    return Response::error(request.id, error_codes::INVALID_REQUEST, "Server already initialized".to_string());
                }

                match self.handle_initialize(&request.params) {
                    Ok(result) => {
                        self.initialized = true;
                        match serde_json::to_value(result) {
                            Ok(value) => Response::success(request.id, value),
                            Err(e) => Response::error(request.id, error_codes::INVALID_PARAMS, e.to_string()),
                        }
                    }
                    Err(e) => Response::error(request.id, error_codes::INVALID_PARAMS, e.to_string()),
                }
            }
            _ if !self.initialized => {
                Response::error(request.id, error_codes::INVALID_REQUEST, "Server not initialized".to_string())
            }
            "shutdown" => {
                self.initialized = false;
                Response::success(request.id, Value::Null)
            }
            "tools/list" => self.handle_list_tools(request.id).await,
            "tools/call" => self.handle_tool_call(request.id, &request.params).await,
            _ => Response::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        }
    }

    /// 处理初始化请求
    fn handle_initialize(&self, params: &Value) -> Result<InitializeResult> {
        let params: InitializeParams = if params.is_null() {
            InitializeParams::default()
        } else {
            serde_json::from_value(params.clone())?
        };

        info!("Client connected: {} {}", params.client_name, params.client_version);

        Ok(InitializeResult {
            server_name: self.name.clone(),
            server_version: self.version.clone(),
            protocol_version: MCP_VERSION.to_string(),
            capabilities: SERVER_CAPABILITIES.iter().map(|&s| s.to_string()).collect(),
        })
    }

    /// 处理工具列表请求
    async fn handle_list_tools(&self, id: Value) -> Response {
        let tool_list: Vec<Value> = self
            .mcp_server
            .list_tools()
            .await
            .into_iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": tool.parameters
                })
            })
            .collect();

        Response::success(id, json!({ "tools": tool_list }))
    }

    /// 处理工具调用请求
    async fn handle_tool_call(&self, id: Value, params: &Value) -> Response {
        let tool_name = match params.get("name").and_then(|v| v.as_str()) {
            Some(name) => name,
            None => {
                return Response::error(id, error_codes::INVALID_PARAMS, "Missing tool name".to_string());
            }
        };

        let tool_params = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        match self.mcp_server.execute_tool(tool_name, tool_params).await {
            Ok(result) => {
                let text = match result {
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                Response::success(id, json!({
                    "content": [
                        {
                            "type": "text",
                            "text": text
                        }
                    ]
                }))
            }
            Err(e) => Response::error(id, error_codes::TOOL_EXECUTION_FAILED, format!("工具执行失败: {}", e)),
        }
    }
}
