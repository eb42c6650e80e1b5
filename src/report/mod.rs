//! 响应格式化
//!
//! 把 MCP 服务器返回的弱类型 JSON 渲染成稳定、长度有限的文本报告。
//! 所有函数都是纯函数：只依赖 (response, 请求参数)。

pub mod fields;
pub mod profile;
pub mod recall;
pub mod shortage;

use std::fmt;

use crate::errors::MCPError;

pub use fields::FieldBag;
pub use profile::format_profile_report;
pub use recall::format_recall_report;
pub use shortage::format_shortage_report;

/// 报告错误前缀
pub const ERROR_MARKER: &str = "❌";

/// 工具调用结果
///
/// 内部保留成功/失败标记，只在交给宿主时才折叠成一个字符串。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolReport {
    Success(String),
    Error(String),
}

impl ToolReport {
    pub fn success(text: impl Into<String>) -> Self {
        ToolReport::Success(text.into())
    }

    /// 把查询失败转换成错误报告
    ///
    /// 非 200 状态使用固定文案，其余错误带上查询上下文（如 `searching drug recalls`）。
    pub fn from_error(context: &str, err: &MCPError) -> Self {
        match err {
            MCPError::ServerStatus(code) => ToolReport::Error(format!(
                "{} Error: MCP server returned status {}",
                ERROR_MARKER, code
            )),
            other => ToolReport::Error(format!("{} Error {}: {}", ERROR_MARKER, context, other)),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ToolReport::Error(_))
    }

    pub fn text(&self) -> &str {
        match self {
            ToolReport::Success(text) | ToolReport::Error(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ToolReport::Success(text) | ToolReport::Error(text) => text,
        }
    }
}

impl fmt::Display for ToolReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl From<ToolReport> for String {
    fn from(report: ToolReport) -> Self {
        report.into_text()
    }
}

/// 标题化：字母前面不是字母时大写，否则小写
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// 按字符（而非字节）截断
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("amoxicillin"), "Amoxicillin");
        assert_eq!(title_case("AMOXICILLIN clavulanate"), "Amoxicillin Clavulanate");
        assert_eq!(title_case("co-trimoxazole"), "Co-Trimoxazole");
        assert_eq!(title_case("5-fu"), "5-Fu");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_truncate_chars_respects_code_points() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        assert_eq!(truncate_chars("μg/kg dose", 2), "μg");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_error_report_prefix() {
        let report = ToolReport::from_error("searching drug shortages", &MCPError::ServerStatus(500));
        assert!(report.is_error());
        assert_eq!(report.text(), "❌ Error: MCP server returned status 500");

        let report = ToolReport::from_error(
            "searching drug recalls",
            &MCPError::Transport("connection refused".to_string()),
        );
        assert_eq!(report.text(), "❌ Error searching drug recalls: connection refused");

        let ok = ToolReport::success("report");
        assert!(!ok.is_error());
        assert_eq!(String::from(ok), "report");
    }
}
