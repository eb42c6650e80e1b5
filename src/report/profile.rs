use serde_json::Value;

use super::fields::{is_truthy, render_value, FieldBag};
use super::{title_case, truncate_chars};
use crate::errors::MCPResult;

/// 适应症文本的最大字符数
pub const INDICATIONS_MAX_CHARS: usize = 300;

const OPENFDA_FIELDS: [(&str, &str); 3] = [
    ("brand_name", "Brand Name(s)"),
    ("generic_name", "Generic Name(s)"),
    ("manufacturer_name", "Manufacturer(s)"),
];

/// 渲染药品说明书概要
///
/// `label_info` 为列表时只使用第一条记录。适应症截断到 300 个字符，
/// 末尾总是追加 `...`（即使没有发生截断）。
pub fn format_profile_report(response: &Value, drug_name: &str) -> MCPResult<String> {
    if !is_truthy(response) {
        return Ok(format!("No medication profile data found for {}", drug_name));
    }

    let data = FieldBag::new(response);
    let mut profile = format!("💊 **Medication Profile: {}**\n\n", title_case(drug_name));

    let label = match data.first_record("label_info")? {
        Some(label) => label,
        None => return Ok(profile),
    };

    if let Some(openfda) = label.nested("openfda")? {
        for (key, heading) in OPENFDA_FIELDS {
            if let Some(names) = openfda.list(key) {
                profile.push_str(&format!("**{}:** {}\n", heading, names.join(", ")));
            }
        }
    }

    if let Some(indications) = first_text(label.field("indications_and_usage")) {
        profile.push_str(&format!(
            "\n**Indications:** {}...\n",
            truncate_chars(&indications, INDICATIONS_MAX_CHARS)
        ));
    }

    Ok(profile)
}

// 列表取第一个元素；空列表视为没有
fn first_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Array(items) => items.first().map(render_value),
        other => Some(render_value(other)),
    }
}
