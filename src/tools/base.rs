use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use anyhow::Result;
use crate::errors::MCPError;

/// JSON Schema 定义
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Schema {
    Object(SchemaObject),
    String(SchemaString),
    Integer(SchemaInteger),
}

impl Schema {
    pub fn validate(&self, value: &Value) -> Result<()> {
        match self {
            Schema::Object(obj) => obj.validate(value),
            Schema::String(s) => s.validate(value),
            Schema::Integer(i) => i.validate(value),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SchemaObject {
    pub required: Vec<String>,
    pub properties: HashMap<String, Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SchemaObject {
    pub fn validate(&self, value: &Value) -> Result<()> {
        let obj = value
            .as_object()
            .ok_or_else(|| MCPError::InvalidParameter("Expected object".to_string()))?;

        for req in &self.required {
            if obj.get(req).map_or(true, Value::is_null) {
                return Err(MCPError::InvalidParameter(format!("Required property {} missing", req)).into());
            }
        }

        // 只校验出现了的属性，未声明的属性忽略
        for (name, schema) in &self.properties {
            match obj.get(name) {
                Some(v) if !v.is_null() => schema.validate(v)?,
                _ => {}
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SchemaString {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 非空字符串
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
}

impl SchemaString {
    pub fn validate(&self, value: &Value) -> Result<()> {
        let s = value
            .as_str()
            .ok_or_else(|| MCPError::InvalidParameter("Expected string".to_string()))?;

        if let Some(min) = self.min_length {
            if s.trim().chars().count() < min {
                return Err(MCPError::InvalidParameter(format!("Length must be >= {}", min)).into());
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SchemaInteger {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<i64>,
}

impl SchemaInteger {
    pub fn validate(&self, value: &Value) -> Result<()> {
        let num = value
            .as_i64()
            .ok_or_else(|| MCPError::InvalidParameter("Expected integer".to_string()))?;

        if let Some(min) = self.minimum {
            if num < min {
                return Err(MCPError::InvalidParameter(format!("Value must be >= {}", min)).into());
            }
        }

        if let Some(max) = self.maximum {
            if num > max {
                return Err(MCPError::InvalidParameter(format!("Value must be <= {}", max)).into());
            }
        }

        Ok(())
    }
}

/// 工具注解信息（用于工具发现和分类）
#[derive(Debug, Clone)]
pub struct ToolAnnotations {
    pub category: String,
    pub tags: Vec<String>,
    pub version: String,
}

// Tool 的基础 trait 定义
#[async_trait]
pub trait MCPTool: Send + Sync {
    /// 获取工具名称
    fn name(&self) -> &str;

    /// 获取工具描述
    fn description(&self) -> &str;

    /// 获取工具参数Schema
    fn parameters_schema(&self) -> &Schema;

    fn annotations(&self) -> &ToolAnnotations;

    /// 执行工具
    async fn execute(&self, params: Value) -> Result<Value>;

    /// 验证输入参数，错误均为 `MCPError::InvalidParameter`
    fn validate_params(&self, params: &Value) -> Result<()> {
        self.parameters_schema().validate(params)
    }
}

/// drug_name 参数的 Schema，三个查询工具共用
pub(crate) fn drug_name_schema() -> Schema {
    Schema::String(SchemaString {
        description: Some("Drug name to look up, e.g. \"amoxicillin\"".to_string()),
        min_length: Some(1),
    })
}

pub(crate) fn limit_schema(default_limit: usize) -> Schema {
    Schema::Integer(SchemaInteger {
        description: Some("Maximum number of results to include in the report".to_string()),
        minimum: Some(0),
        maximum: None,
        default: Some(default_limit as i64),
    })
}

/// 原样取出 drug_name，与 `DrugTools` 入口一致，不做裁剪
pub(crate) fn drug_name_param(params: &Value) -> Result<&str> {
    params["drug_name"]
        .as_str()
        .ok_or_else(|| MCPError::InvalidParameter("missing drug_name parameter".to_string()).into())
}

pub(crate) fn limit_param(params: &Value, default_limit: usize) -> usize {
    params["limit"]
        .as_u64()
        .map(|limit| limit as usize)
        .unwrap_or(default_limit)
}
