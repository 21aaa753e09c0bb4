use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

const GENERIC_TEXTS: [&str; 6] = ["error", "unknown", "unknown error", "http error", "undefined", "null"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawServiceError {
    pub status_code: Option<u16>,
    pub status_text: Option<String>,
    pub message: Option<String>,
    pub response_text: Option<String>,
}

impl RawServiceError {
    pub fn with_status(status_code: u16, status_text: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            status_text: Some(status_text.into()),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, response_text: impl Into<String>) -> Self {
        self.response_text = Some(response_text.into());
        self
    }
}

impl fmt::Display for RawServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status_code, self.status_text.as_deref(), self.message.as_deref()) {
            (Some(code), Some(text), _) => write!(f, "{code} {text}"),
            (Some(code), None, _) => write!(f, "HTTP {code}"),
            (None, _, Some(message)) => f.write_str(message),
            (None, Some(text), None) => f.write_str(text),
            (None, None, None) => f.write_str("unknown service error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn from_service(raw: Option<&str>) -> Self {
        match raw.map(|value| value.trim().to_lowercase()).as_deref() {
            Some("info") | Some("information") => Severity::Info,
            Some("warning") => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn display_label(self) -> &'static str {
        match self {
            Severity::Info => "Information",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceErrorDetail {
    pub severity: Severity,
    pub message: String,
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedServiceError {
    pub summary: String,
    pub details: Vec<ServiceErrorDetail>,
}

impl NormalizedServiceError {
    fn summary_only(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            details: Vec::new(),
        }
    }

    fn from_details(details: Vec<ServiceErrorDetail>) -> Self {
        let summary = details
            .iter()
            .map(|detail| detail.message.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self { summary, details }
    }

    pub fn has_details(&self) -> bool {
        !self.details.is_empty()
    }

    /// The single top-level message to show, or `None` when the detail rows
    /// take its place.
    pub fn headline(&self) -> Option<&str> {
        (!self.has_details()).then_some(self.summary.as_str())
    }

    pub fn is_unknown(&self) -> bool {
        !self.has_details() && self.summary == UNKNOWN_ERROR_MESSAGE
    }
}

pub fn normalize(raw: &RawServiceError) -> NormalizedServiceError {
    let body = raw.response_text.as_deref().map(str::trim).unwrap_or("");

    if body.starts_with('{') {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => {
                if let Some(normalized) = from_json_value(&value) {
                    return normalized;
                }
            }
            Err(error) => {
                tracing::warn!(%error, "service error body looked like JSON but did not parse");
                return NormalizedServiceError::summary_only(UNKNOWN_ERROR_MESSAGE);
            }
        }
    }

    if looks_like_xml(body) {
        if let Some(message) = from_xml_body(body) {
            return NormalizedServiceError::summary_only(message);
        }
    }

    if let Some(text) = non_generic(raw.status_text.as_deref()) {
        return NormalizedServiceError::summary_only(match raw.status_code {
            Some(code) => format!("{code}: {text}"),
            None => text.to_string(),
        });
    }

    if let Some(message) = non_generic(raw.message.as_deref()) {
        return NormalizedServiceError::summary_only(message);
    }

    if let Some(code) = raw.status_code {
        return NormalizedServiceError::summary_only(format!("HTTP Error {code}"));
    }

    NormalizedServiceError::summary_only(UNKNOWN_ERROR_MESSAGE)
}

fn non_generic(value: Option<&str>) -> Option<&str> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    let lowered = value.to_lowercase();
    (!GENERIC_TEXTS.contains(&lowered.as_str())).then_some(value)
}

fn from_json_value(value: &Value) -> Option<NormalizedServiceError> {
    let error = value.get("error")?;

    let details: Vec<ServiceErrorDetail> = error
        .pointer("/innererror/errordetails")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(detail_from_json).collect())
        .unwrap_or_default();
    if !details.is_empty() {
        return Some(NormalizedServiceError::from_details(details));
    }

    let message = error
        .pointer("/message/value")
        .and_then(Value::as_str)
        .or_else(|| error.get("message").and_then(Value::as_str))?;
    non_generic(Some(message)).map(NormalizedServiceError::summary_only)
}

fn detail_from_json(entry: &Value) -> Option<ServiceErrorDetail> {
    let message = entry.get("message").and_then(|message| match message {
        Value::String(text) => Some(text.clone()),
        other => other.get("value").and_then(Value::as_str).map(str::to_string),
    })?;
    Some(ServiceErrorDetail {
        severity: Severity::from_service(entry.get("severity").and_then(Value::as_str)),
        message,
        code: entry.get("code").and_then(Value::as_str).map(str::to_string),
    })
}

fn looks_like_xml(body: &str) -> bool {
    body.contains("<?xml") || body.contains("<error")
}

fn from_xml_body(body: &str) -> Option<String> {
    message_tag_text(body)
        .or_else(|| error_tag_text(body))
        .or_else(|| parsed_message_element(body))
}

fn message_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<message(?:\s[^>]*)?>(.*?)</message>").expect("valid message tag regex")
    })
}

fn error_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<error(?:\s[^>]*)?>(.*?)</error>").expect("valid error tag regex")
    })
}

fn any_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag regex"))
}

fn clean_text(raw: &str) -> Option<String> {
    let unescaped = quick_xml::escape::unescape(raw)
        .map(|text| text.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    let collapsed = unescaped.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

fn message_tag_text(body: &str) -> Option<String> {
    let captures = message_tag_regex().captures(body)?;
    let inner = any_tag_regex().replace_all(captures.get(1)?.as_str(), " ");
    clean_text(&inner)
}

fn error_tag_text(body: &str) -> Option<String> {
    let captures = error_tag_regex().captures(body)?;
    let inner = any_tag_regex().replace_all(captures.get(1)?.as_str(), " ");
    clean_text(&inner)
}

/// Last resort: a real parse, matching `message` by local name so prefixed
/// elements like `<m:message>` are found too.
fn parsed_message_element(body: &str) -> Option<String> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);
    let mut depth = 0_usize;
    let mut text = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if depth > 0 {
                    depth += 1;
                } else if start.local_name().as_ref() == b"message" {
                    depth = 1;
                }
            }
            Ok(Event::End(_)) if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Text(chunk)) if depth > 0 => match chunk.unescape() {
                Ok(value) => {
                    text.push(' ');
                    text.push_str(&value);
                }
                Err(error) => {
                    tracing::warn!(%error, "could not unescape XML error text");
                    return None;
                }
            },
            Ok(Event::CData(chunk)) if depth > 0 => {
                text.push(' ');
                text.push_str(&String::from_utf8_lossy(&chunk.into_inner()));
            }
            Ok(Event::Eof) => break,
            Err(error) => {
                tracing::warn!(%error, "service error body is not well-formed XML");
                return None;
            }
            _ => {}
        }
    }
    clean_text(&text)
}

#[cfg(test)]
mod tests {
    use super::{
        normalize, parsed_message_element, RawServiceError, ServiceErrorDetail, Severity,
        UNKNOWN_ERROR_MESSAGE,
    };
    use pretty_assertions::assert_eq;

    fn body(text: &str) -> RawServiceError {
        RawServiceError::default().with_body(text)
    }

    #[test]
    fn errordetails_supersede_the_summary() {
        let raw = body(
            r#"{"error":{"message":{"value":"X"},"innererror":{"errordetails":[{"severity":"error","message":"A"},{"severity":"info","message":"B"}]}}}"#,
        );
        let normalized = normalize(&raw);
        assert_eq!(
            normalized.details,
            vec![
                ServiceErrorDetail {
                    severity: Severity::Error,
                    message: "A".to_string(),
                    code: None,
                },
                ServiceErrorDetail {
                    severity: Severity::Info,
                    message: "B".to_string(),
                    code: None,
                },
            ]
        );
        assert_eq!(normalized.details[1].severity.display_label(), "Information");
        assert_eq!(normalized.headline(), None);
        assert!(!normalized.summary.contains('X'));
    }

    #[test]
    fn detail_severity_is_case_folded_and_codes_kept() {
        let raw = body(
            r#"{"error":{"innererror":{"errordetails":[{"severity":"WARNING","message":"w","code":"FIELD/002"},{"message":"no severity"}]}}}"#,
        );
        let normalized = normalize(&raw);
        assert_eq!(normalized.details[0].severity, Severity::Warning);
        assert_eq!(normalized.details[0].code.as_deref(), Some("FIELD/002"));
        assert_eq!(normalized.details[1].severity, Severity::Error);
    }

    #[test]
    fn json_message_value_becomes_the_summary() {
        let raw = body(r#"{"error":{"code":"SY/530","message":{"lang":"en","value":"Critical"}}}"#);
        assert_eq!(normalize(&raw).headline(), Some("Critical"));
    }

    #[test]
    fn plain_text_with_status_code_only() {
        let raw = RawServiceError {
            status_code: Some(500),
            ..body("not json or xml")
        };
        assert_eq!(normalize(&raw).summary, "HTTP Error 500");
    }

    #[test]
    fn malformed_json_becomes_the_unknown_summary() {
        let normalized = normalize(&body("{"));
        assert_eq!(normalized.summary, UNKNOWN_ERROR_MESSAGE);
        assert!(normalized.is_unknown());

        let with_status = RawServiceError {
            status_code: Some(502),
            status_text: Some("Bad Gateway".to_string()),
            ..body("{ not really json")
        };
        assert!(normalize(&with_status).is_unknown());
    }

    #[test]
    fn json_without_a_message_continues_to_the_status() {
        let raw = RawServiceError {
            status_code: Some(502),
            ..body(r#"{"error":{"code":"X"}}"#)
        };
        assert_eq!(normalize(&raw).summary, "HTTP Error 502");
    }

    #[test]
    fn xml_message_tag_wins() {
        let raw = body(
            r#"<?xml version="1.0" encoding="utf-8"?><error><code>E1</code><message lang="en">Order &amp; item locked</message></error>"#,
        );
        assert_eq!(normalize(&raw).summary, "Order & item locked");
    }

    #[test]
    fn xml_error_inner_text_is_used_without_a_message_tag() {
        let raw = body("<error><code>E42</code>\n  <text>Stock   exhausted</text></error>");
        assert_eq!(normalize(&raw).summary, "E42 Stock exhausted");
    }

    #[test]
    fn namespaced_message_needs_the_parser() {
        let xml = r#"<?xml version="1.0"?><m:error xmlns:m="urn:x"><m:code>1</m:code><m:message>Prefixed text</m:message></m:error>"#;
        assert_eq!(normalize(&body(xml)).summary, "Prefixed text");
        assert_eq!(parsed_message_element(xml).as_deref(), Some("Prefixed text"));
    }

    #[test]
    fn status_text_then_message_then_unknown() {
        let raw = RawServiceError {
            status_code: Some(404),
            status_text: Some("Not Found".to_string()),
            message: Some("ignored".to_string()),
            response_text: None,
        };
        assert_eq!(normalize(&raw).summary, "404: Not Found");

        let raw = RawServiceError {
            status_code: Some(500),
            status_text: Some("error".to_string()),
            message: Some("Database offline".to_string()),
            response_text: None,
        };
        assert_eq!(normalize(&raw).summary, "Database offline");

        let raw = RawServiceError {
            message: Some("Unknown Error".to_string()),
            ..RawServiceError::default()
        };
        assert_eq!(normalize(&raw).summary, UNKNOWN_ERROR_MESSAGE);
    }
}
