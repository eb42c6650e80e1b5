//! # Drug Tools
//!
//! 基于 MCP 服务器的 FDA 药品信息工具：药品短缺、药品召回、药品说明书概要。
//! 每个工具调用远程 MCP 服务器，并把 JSON 响应渲染成可直接展示的文本。
//!
//! ## 特性
//!
//! - 📊 **药品短缺** - `search_drug_shortages`
//! - 💊 **药品概要** - `get_medication_profile`
//! - ⚠️ **药品召回** - `search_drug_recalls`
//! - 🚀 **MCP协议** - 可以作为 stdio MCP 服务器运行
//!
//! ## 快速开始
//!
//! ```no_run
//! use drug_tools::{DrugTools, DrugToolsConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let tools = DrugTools::new(DrugToolsConfig::default())?;
//!     println!("{}", tools.search_drug_shortages("amoxicillin", Some(2)).await);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod mcp;
pub mod report;
pub mod tools;

pub use config::DrugToolsConfig;
pub use errors::{MCPError, MCPResult};
pub use report::ToolReport;
pub use tools::DrugTools;

// Re-export commonly used types
pub use async_trait::async_trait;
pub use serde_json::{json, Value};
