use std::collections::HashMap;
use std::sync::OnceLock;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use super::base::{drug_name_param, drug_name_schema, limit_param, limit_schema, MCPTool, Schema, SchemaObject, ToolAnnotations};
use super::client::DrugServiceClient;
use crate::errors::MCPResult;
use crate::report::{format_recall_report, ToolReport};

pub const TOOL_NAME: &str = "search_drug_recalls";
pub const DEFAULT_LIMIT: usize = 3;

pub struct SearchDrugRecallsTool {
    annotations: ToolAnnotations,
    client: DrugServiceClient,
}

impl SearchDrugRecallsTool {
    pub fn new(client: DrugServiceClient) -> Self {
        Self {
            annotations: ToolAnnotations {
                category: "药品召回".to_string(),
                tags: vec!["FDA".to_string(), "召回".to_string(), "安全警报".to_string()],
                version: "1.0".to_string(),
            },
            client,
        }
    }

    pub async fn search(&self, drug_name: &str, limit: usize) -> ToolReport {
        info!("⚠️ 查询药品召回: {} (limit={})", drug_name, limit);

        match self.fetch_report(drug_name, limit).await {
            Ok(text) => ToolReport::success(text),
            Err(e) => {
                if e.is_recoverable() {
                    warn!("⚠️ 药品召回查询失败 [{}]: {} ({})", e.error_code(), e, e.suggestion());
                } else {
                    error!("❌ 药品召回查询失败 [{}]: {} ({})", e.error_code(), e, e.suggestion());
                }
                ToolReport::from_error("searching drug recalls", &e)
            }
        }
    }

    async fn fetch_report(&self, drug_name: &str, limit: usize) -> MCPResult<String> {
        let body = json!({ "drug_name": drug_name, "limit": limit });
        let data = self.client.call_tool(TOOL_NAME, &body).await?;
        format_recall_report(&data, drug_name, limit)
    }
}

#[async_trait]
impl MCPTool for SearchDrugRecallsTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Search for drug recalls and safety alerts. Returns recall date, reason and FDA classification for each affected product."
    }

    fn parameters_schema(&self) -> &Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::Object(SchemaObject {
                required: vec!["drug_name".to_string()],
                properties: HashMap::from([
                    ("drug_name".to_string(), drug_name_schema()),
                    ("limit".to_string(), limit_schema(DEFAULT_LIMIT)),
                ]),
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
        let limit = limit_param(&params, DEFAULT_LIMIT);

        let report = self.search(drug_name, limit).await;
        Ok(Value::String(report.into_text()))
    }
}
