//! Browser-side fault reports

use serde::{Deserialize, Serialize};

/// Channel the report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Console,
    Uncaught,
    Promise,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Uncaught => "uncaught",
            Self::Promise => "promise",
        }
    }
}

/// Body of `POST /api/client-error`.
///
/// Every field is optional on the wire; the server logs whatever arrives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientErrorReport {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineno: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colno: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ReportKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ClientErrorReport {
    pub fn new(kind: ReportKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: Some(kind),
            ..Default::default()
        }
    }

    /// `line:column`, with `?` for unknown parts.
    pub fn location(&self) -> String {
        let part = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string());
        format!("{}:{}", part(self.lineno), part(self.colno))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let mut report = ClientErrorReport::new(ReportKind::Uncaught, "boom");
        report.lineno = Some(12);
        report.user_agent = Some("agent".to_string());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["type"], "uncaught");
        assert_eq!(json["userAgent"], "agent");
        assert_eq!(json["lineno"], 12);
        assert!(json.get("colno").is_none());
    }

    #[test]
    fn test_lenient_parse() {
        let report: ClientErrorReport =
            serde_json::from_str(r#"{"message":"x","source":null,"stack":null}"#).unwrap();
        assert_eq!(report.message, "x");
        assert!(report.kind.is_none());
        assert_eq!(report.location(), "?:?");
    }
}
