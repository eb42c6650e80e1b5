use std::collections::HashMap;
use std::sync::OnceLock;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use super::base::{drug_name_param, drug_name_schema, MCPTool, Schema, SchemaObject, ToolAnnotations};
use super::client::DrugServiceClient;
use crate::errors::MCPResult;
use crate::report::{format_profile_report, ToolReport};

pub const TOOL_NAME: &str = "get_medication_profile";

/// 药品说明书概要（品牌名、通用名、生产商、适应症）
pub struct GetMedicationProfileTool {
    annotations: ToolAnnotations,
    client: DrugServiceClient,
}

impl GetMedicationProfileTool {
    pub fn new(client: DrugServiceClient) -> Self {
        Self {
            annotations: ToolAnnotations {
                category: "药品信息".to_string(),
                tags: vec!["FDA".to_string(), "说明书".to_string()],
                version: "1.0".to_string(),
            },
            client,
        }
    }

    pub async fn lookup(&self, drug_name: &str) -> ToolReport {
        info!("📋 获取药品概要: {}", drug_name);

        match self.fetch_report(drug_name).await {
            Ok(text) => ToolReport::success(text),
            Err(e) => {
                if e.is_recoverable() {
                    warn!("⚠️ 药品概要查询失败 [{}]: {} ({})", e.error_code(), e, e.suggestion());
                } else {
                    error!("❌ 药品概要查询失败 [{}]: {} ({})", e.error_code(), e, e.suggestion());
                }
                ToolReport::from_error("getting medication profile", &e)
            }
        }
    }

    async fn fetch_report(&self, drug_name: &str) -> MCPResult<String> {
        // 服务器端参数名是 drug_identifier
        let body = json!({ "drug_identifier": drug_name });
        let data = self.client.call_tool(TOOL_NAME, &body).await?;
        format_profile_report(&data, drug_name)
    }
}

#[async_trait]
impl MCPTool for GetMedicationProfileTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Get a medication profile from FDA label information: brand names, generic names, manufacturers and indications."
    }

    fn parameters_schema(&self) -> &Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::Object(SchemaObject {
                required: vec!["drug_name".to_string()],
                properties: HashMap::from([("drug_name".to_string(), drug_name_schema())]),
                ..Default::default()
            })
        })
    }

    fn annotations(&self) -> &ToolAnnotations {
        &self.annotations
    }

    async fn execute(&self, params: Value) -> Result<Value> {
        self.validate_params(&params)?;
        let drug_name = drug_name_param(&params)?;

        let report = self.lookup(drug_name).await;
        Ok(Value::String(report.into_text()))
    }
}
