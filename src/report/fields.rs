use serde_json::{Map, Value};

use crate::errors::{MCPError, MCPResult};

/// JSON 值的"真值"判断：null / false / 0 / "" / [] / {} 视为空
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// 将任意 JSON 值渲染为展示文本
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// 可选字段包
///
/// 对一个 JSON 对象的只读视图，所有缺省值处理都通过显式的访问方法完成。
/// 缺失的键和值为 `null` 的键一律视为"不存在"。
#[derive(Debug, Clone, Copy)]
pub struct FieldBag<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> FieldBag<'a> {
    /// 宽松构造：非对象的值被视为没有任何字段
    pub fn new(value: &'a Value) -> Self {
        Self { map: value.as_object() }
    }

    /// 严格构造：值必须是对象
    pub fn record(value: &'a Value, what: &str) -> MCPResult<Self> {
        value
            .as_object()
            .map(|map| Self { map: Some(map) })
            .ok_or_else(|| MCPError::InvalidResponse(format!("{} is not a mapping", what)))
    }

    pub fn field(&self, key: &str) -> Option<&'a Value> {
        self.map
            .and_then(|map| map.get(key))
            .filter(|value| !value.is_null())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    pub fn get_or_default(&self, key: &str, fallback: &str) -> String {
        self.field(key)
            .map(render_value)
            .unwrap_or_else(|| fallback.to_string())
    }

    /// 字段存在且非空时返回文本，否则 `None`
    pub fn truthy_text(&self, key: &str) -> Option<String> {
        self.field(key).filter(|v| is_truthy(v)).map(render_value)
    }

    /// 字符串列表字段；单个字符串视为只有一个元素的列表
    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        self.field(key).map(|value| match value {
            Value::Array(items) => items.iter().map(render_value).collect(),
            other => vec![render_value(other)],
        })
    }

    pub fn nested(&self, key: &str) -> MCPResult<Option<FieldBag<'a>>> {
        self.field(key)
            .map(|value| Self::record(value, &format!("`{}`", key)))
            .transpose()
    }

    /// 非空的结果列表；字段缺失或为空时返回 `None`
    pub fn records(&self, key: &str) -> MCPResult<Option<&'a [Value]>> {
        match self.field(key).filter(|v| is_truthy(v)) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items.as_slice())),
            Some(_) => Err(MCPError::InvalidResponse(format!("`{}` is not a list", key))),
        }
    }

    /// 单个对象或对象列表中的第一个，其余元素被忽略
    pub fn first_record(&self, key: &str) -> MCPResult<Option<FieldBag<'a>>> {
        let value = match self.field(key).filter(|v| is_truthy(v)) {
            None => return Ok(None),
            Some(Value::Array(items)) => &items[0],
            Some(other) => other,
        };
        Self::record(value, &format!("`{}` entry", key)).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{} should be falsy", falsy);
        }
        for truthy in [json!(true), json!(1), json!(0.5), json!("x"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&truthy), "{} should be truthy", truthy);
        }
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("Class II")), "Class II");
        assert_eq!(render_value(&json!(20240105)), "20240105");
        assert_eq!(render_value(&json!(["a", "b"])), "a, b");
        assert_eq!(render_value(&json!(true)), "true");
    }

    #[test]
    fn test_get_or_default_treats_null_as_absent() {
        let value = json!({"status": null, "reason": "", "date": "20240101"});
        let bag = FieldBag::new(&value);

        assert_eq!(bag.get_or_default("status", "Unknown"), "Unknown");
        assert_eq!(bag.get_or_default("missing", "Not specified"), "Not specified");
        assert_eq!(bag.get_or_default("reason", "Unknown"), "");
        assert_eq!(bag.get_or_default("date", "Unknown"), "20240101");
    }

    #[test]
    fn test_truthy_text_skips_empty_values() {
        let value = json!({"reason": "", "other": "Demand increase"});
        let bag = FieldBag::new(&value);
        assert_eq!(bag.truthy_text("reason"), None);
        assert_eq!(bag.truthy_text("absent"), None);
        assert_eq!(bag.truthy_text("other").as_deref(), Some("Demand increase"));
    }

    #[test]
    fn test_list_accepts_single_string() {
        let value = json!({"brand_name": "Amoxil", "generic_name": ["AMOXICILLIN", "AMOXICILLIN TRIHYDRATE"]});
        let bag = FieldBag::new(&value);
        assert_eq!(bag.list("brand_name"), Some(vec!["Amoxil".to_string()]));
        assert_eq!(bag.list("generic_name").map(|v| v.len()), Some(2));
        assert_eq!(bag.list("manufacturer_name"), None);
    }

    #[test]
    fn test_non_object_is_an_empty_bag() {
        let value = json!(["not", "a", "mapping"]);
        let bag = FieldBag::new(&value);
        assert!(!bag.contains("results"));
        assert!(FieldBag::record(&value, "result").is_err());
    }

    #[test]
    fn test_records_shape_checks() {
        let value = json!({"results": [{"a": 1}], "empty": [], "bad": {"a": 1}});
        let bag = FieldBag::new(&value);
        assert_eq!(bag.records("results").unwrap().map(|r| r.len()), Some(1));
        assert!(bag.records("empty").unwrap().is_none());
        assert!(bag.records("missing").unwrap().is_none());
        assert!(bag.records("bad").is_err());
    }

    #[test]
    fn test_first_record_uses_only_first_element() {
        let value = json!({"label_info": [{"id": "first"}, {"id": "second"}]});
        let label = FieldBag::new(&value).first_record("label_info").unwrap().unwrap();
        assert_eq!(label.get_or_default("id", ""), "first");

        let single = json!({"label_info": {"id": "only"}});
        let label = FieldBag::new(&single).first_record("label_info").unwrap().unwrap();
        assert_eq!(label.get_or_default("id", ""), "only");

        let bad = json!({"label_info": ["text"]});
        assert!(FieldBag::new(&bad).first_record("label_info").is_err());
    }
}
