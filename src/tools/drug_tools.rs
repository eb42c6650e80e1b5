use crate::config::DrugToolsConfig;
use crate::errors::MCPResult;

use super::base::MCPTool;
use super::client::DrugServiceClient;
use super::{profile, recalls, shortages};
use super::{GetMedicationProfileTool, SearchDrugRecallsTool, SearchDrugShortagesTool};

/// FDA 药品信息工具集合
///
/// 面向宿主的入口：每个方法都只返回一段文本，成功是报告，失败是以 `❌` 开头的错误说明。
pub struct DrugTools {
    shortages: SearchDrugShortagesTool,
    profile: GetMedicationProfileTool,
    recalls: SearchDrugRecallsTool,
}

impl DrugTools {
    pub fn new(config: DrugToolsConfig) -> MCPResult<Self> {
        let client = DrugServiceClient::new(config)?;
        Ok(Self {
            shortages: SearchDrugShortagesTool::new(client.clone()),
            profile: GetMedicationProfileTool::new(client.clone()),
            recalls: SearchDrugRecallsTool::new(client),
        })
    }

    pub fn from_env() -> MCPResult<Self> {
        Self::new(DrugToolsConfig::from_env()?)
    }

    /// 默认返回最多 5 条短缺记录
    pub async fn search_drug_shortages(&self, drug_name: &str, limit: Option<usize>) -> String {
        self.shortages
            .search(drug_name, limit.unwrap_or(shortages::DEFAULT_LIMIT))
            .await
            .into_text()
    }

    pub async fn get_medication_profile(&self, drug_name: &str) -> String {
        self.profile.lookup(drug_name).await.into_text()
    }

    /// 默认返回最多 3 条召回记录
    pub async fn search_drug_recalls(&self, drug_name: &str, limit: Option<usize>) -> String {
        self.recalls
            .search(drug_name, limit.unwrap_or(recalls::DEFAULT_LIMIT))
            .await
            .into_text()
    }

    pub fn shortages(&self) -> &SearchDrugShortagesTool {
        &self.shortages
    }

    pub fn profile(&self) -> &GetMedicationProfileTool {
        &self.profile
    }

    pub fn recalls(&self) -> &SearchDrugRecallsTool {
        &self.recalls
    }

    /// 拆成可注册到 MCP 服务器的工具列表
    pub fn into_tools(self) -> Vec<Box<dyn MCPTool>> {
        vec![
            Box::new(self.shortages),
            Box::new(self.profile),
            Box::new(self.recalls),
        ]
    }
}

// 工具名与远程服务器的 /tools/{name} 路径一一对应
pub const TOOL_NAMES: [&str; 3] = [shortages::TOOL_NAME, profile::TOOL_NAME, recalls::TOOL_NAME];
