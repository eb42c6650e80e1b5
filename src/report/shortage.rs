use serde_json::Value;

use super::fields::{is_truthy, FieldBag};
use super::title_case;
use crate::errors::MCPResult;

/// 渲染药品短缺报告
///
/// 只渲染前 `limit` 条结果，保持服务器返回的顺序。缺少 `reason` 的条目
/// 不输出 Reason 行。
pub fn format_shortage_report(response: &Value, drug_name: &str, limit: usize) -> MCPResult<String> {
    if !is_truthy(response) {
        return Ok(format!("No shortage data found for {}", drug_name));
    }

    let data = FieldBag::new(response);
    let mut summary = format!("📊 **Drug Shortage Information for {}**\n\n", title_case(drug_name));

    match data.records("results")? {
        Some(results) => {
            for (i, entry) in results.iter().take(limit).enumerate() {
                let shortage = FieldBag::record(entry, "shortage result")?;
                summary.push_str(&format!(
                    "**{}. {}**\n",
                    i + 1,
                    shortage.get_or_default("product_description", "Unknown Product")
                ));
                summary.push_str(&format!(
                    "   • Status: {}\n",
                    shortage.get_or_default("shortage_status", "Unknown")
                ));
                if let Some(reason) = shortage.truthy_text("reason") {
                    summary.push_str(&format!("   • Reason: {}\n", reason));
                }
                summary.push('\n');
            }
        }
        None => {
            summary.push_str(&format!("✅ No current shortages reported for {}", drug_name));
        }
    }

    Ok(summary)
}
