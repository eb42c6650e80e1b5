use serde_json::Value;

use super::fields::{is_truthy, FieldBag};
use super::title_case;
use crate::errors::MCPResult;

/// 渲染药品召回报告
///
/// 与短缺报告不同，每个字段都会输出，缺失时使用默认文案。
pub fn format_recall_report(response: &Value, drug_name: &str, limit: usize) -> MCPResult<String> {
    let no_recalls = || format!("✅ No recalls found for {}", drug_name);

    if !is_truthy(response) {
        return Ok(no_recalls());
    }

    let results = match FieldBag::new(response).records("results")? {
        Some(results) => results,
        None => return Ok(no_recalls()),
    };

    let mut summary = format!("⚠️ **Drug Recall Information for {}**\n\n", title_case(drug_name));

    for (i, entry) in results.iter().take(limit).enumerate() {
        let recall = FieldBag::record(entry, "recall result")?;
        summary.push_str(&format!(
            "**{}. {}**\n",
            i + 1,
            recall.get_or_default("product_description", "Unknown Product")
        ));
        summary.push_str(&format!("   • Recall Date: {}\n", recall.get_or_default("recall_initiation_date", "Unknown")));
        summary.push_str(&format!("   • Reason: {}\n", recall.get_or_default("reason_for_recall", "Not specified")));
        summary.push_str(&format!("   • Classification: {}\n", recall.get_or_default("classification", "Unknown")));
        summary.push('\n');
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recalls(n: usize) -> Value {
        let results: Vec<Value> = (1..=n)
            .map(|i| {
                json!({
                    "product_description": format!("Lot {}", i),
                    "recall_initiation_date": format!("2024010{}", i),
                    "reason_for_recall": "Subpotent",
                    "classification": "Class II"
                })
            })
            .collect();
        json!({ "results": results })
    }

    #[test]
    fn test_empty_or_missing_results() {
        for response in [json!(null), json!({}), json!({"results": []}), json!({"meta": 1})] {
            let text = format_recall_report(&response, "valsartan", 3).unwrap();
            assert_eq!(text, "✅ No recalls found for valsartan");
        }
    }

    #[test]
    fn test_missing_fields_use_fallbacks() {
        let response = json!({"results": [{}]});
        let text = format_recall_report(&response, "valsartan", 3).unwrap();
        assert_eq!(
            text,
            "⚠️ **Drug Recall Information for Valsartan**\n\n\
             **1. Unknown Product**\n\
             \u{20}  • Recall Date: Unknown\n\
             \u{20}  • Reason: Not specified\n\
             \u{20}  • Classification: Unknown\n\n"
        );
    }

    #[test]
    fn test_limit_and_order() {
        let text = format_recall_report(&recalls(5), "valsartan", 3).unwrap();
        assert_eq!(text.matches("   • Classification:").count(), 3);
        assert!(text.contains("**1. Lot 1**"));
        assert!(text.contains("**3. Lot 3**"));
        assert!(!text.contains("Lot 4"));
        assert!(text.find("Lot 1").unwrap() < text.find("Lot 2").unwrap());

        let text = format_recall_report(&recalls(2), "valsartan", 0).unwrap();
        assert_eq!(text, "⚠️ **Drug Recall Information for Valsartan**\n\n");
    }

    #[test]
    fn test_entry_layout() {
        let text = format_recall_report(&recalls(1), "valsartan", 3).unwrap();
        assert!(text.contains("   • Recall Date: 20240101\n"));
        assert!(text.contains("   • Reason: Subpotent\n"));
        assert!(text.contains("   • Classification: Class II\n"));
    }

    #[test]
    fn test_results_must_be_a_list() {
        let response = json!({"results": "none"});
        assert!(format_recall_report(&response, "valsartan", 3).is_err());
    }
}
