use crate::error::FacadeError;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub mod keys {
    pub const ERROR_TITLE: &str = "error.title";
    pub const WARNING_TITLE: &str = "warning.title";
    pub const INFO_TITLE: &str = "info.title";
    pub const SUCCESS_TITLE: &str = "success.title";
    pub const CONFIRMATION_TITLE: &str = "confirmation.title";
    pub const ERROR_UNKNOWN: &str = "error.unknown";
    pub const ERROR_CLOSE: &str = "error.close";
    pub const DIALOG_OK: &str = "dialog.ok";
    pub const DIALOG_CANCEL: &str = "dialog.cancel";
    pub const DIALOG_TITLE: &str = "dialog.title";
    pub const DIALOG_NO_DATA_FOUND: &str = "dialog.noDataFound";
    pub const DIGITAL_SIGNATURE_TITLE: &str = "digitalSignature.title";
    pub const DIGITAL_SIGNATURE_CLEAR: &str = "digitalSignature.clear";
    pub const DIGITAL_SIGNATURE_SAVE: &str = "digitalSignature.save";
    pub const DIGITAL_SIGNATURE_CANCEL: &str = "digitalSignature.cancel";
}

const DEFAULT_TEXTS: [(&str, &str); 15] = [
    (keys::ERROR_TITLE, "Error"),
    (keys::WARNING_TITLE, "Warning"),
    (keys::INFO_TITLE, "Information"),
    (keys::SUCCESS_TITLE, "Success"),
    (keys::CONFIRMATION_TITLE, "Confirmation"),
    (keys::ERROR_UNKNOWN, "An unknown error occurred."),
    (keys::ERROR_CLOSE, "Close"),
    (keys::DIALOG_OK, "OK"),
    (keys::DIALOG_CANCEL, "Cancel"),
    (keys::DIALOG_TITLE, "Select an item"),
    (keys::DIALOG_NO_DATA_FOUND, "No data found"),
    (keys::DIGITAL_SIGNATURE_TITLE, "Digital Signature"),
    (keys::DIGITAL_SIGNATURE_CLEAR, "Clear"),
    (keys::DIGITAL_SIGNATURE_SAVE, "Save"),
    (keys::DIGITAL_SIGNATURE_CANCEL, "Cancel"),
];

#[derive(Debug, Clone)]
pub struct TextBundle {
    texts: HashMap<String, String>,
}

impl Default for TextBundle {
    fn default() -> Self {
        Self {
            texts: DEFAULT_TEXTS
                .iter()
                .map(|(key, text)| (key.to_string(), text.to_string()))
                .collect(),
        }
    }
}

impl TextBundle {
    pub fn with_overrides_json(mut self, json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        if let Some(map) = value.as_object() {
            for (key, text) in map {
                if let Some(text) = text.as_str() {
                    self.texts.insert(key.clone(), text.to_string());
                }
            }
        }
        Ok(self)
    }

    pub fn load(path: &Path) -> Result<Self, FacadeError> {
        let raw = fs::read_to_string(path).map_err(|error| {
            FacadeError::InvalidConfig(format!("failed to read {}: {error}", path.display()))
        })?;
        Self::default().with_overrides_json(&raw).map_err(|error| {
            FacadeError::InvalidConfig(format!("{} is not a text bundle: {error}", path.display()))
        })
    }

    /// Unknown keys come back verbatim so a missing translation stays visible.
    pub fn text(&self, key: &str, params: &[&str]) -> String {
        let template = self.texts.get(key).map(String::as_str).unwrap_or(key);
        format_positional(template, params)
    }
}

pub fn format_positional(template: &str, params: &[&str]) -> String {
    if params.is_empty() {
        return template.to_string();
    }
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        match after[..close].parse::<usize>().ok().and_then(|i| params.get(i)) {
            Some(param) => out.push_str(param),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}
