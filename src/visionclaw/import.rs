//! Interpretation of scanned QR contents, matching the apps' import rules

use serde::Serialize;
use serde_json::{Map, Value};

/// How a recognized key is validated on import
#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Text,
    Integer,
}

/// Recognized keys in the order the apps report them.
const IMPORT_FIELDS: &[(&str, &str, FieldKind, bool)] = &[
    ("geminiAPIKey", "Gemini API Key", FieldKind::Text, true),
    ("openClawHost", "OpenClaw Host", FieldKind::Text, false),
    ("openClawPort", "OpenClaw Port", FieldKind::Integer, false),
    ("openClawHookToken", "OpenClaw Hook Token", FieldKind::Text, true),
    ("openClawGatewayToken", "OpenClaw Gateway Token", FieldKind::Text, true),
    ("webrtcSignalingURL", "WebRTC Signaling URL", FieldKind::Text, false),
    ("geminiSystemPrompt", "Gemini System Prompt", FieldKind::Text, false),
];

/// A single setting the apps would take from a scanned code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedField {
    /// JSON key, e.g. `openClawHost`
    pub key: &'static str,
    /// Label shown to the user, e.g. `OpenClaw Host`
    pub label: &'static str,
    /// Imported value
    pub value: Value,
    /// Whether the value is a credential
    pub secret: bool,
}

/// What the apps would import from a scanned payload
#[derive(Debug, Clone, PartialEq)]
pub enum ImportedConfig {
    /// Payload was not a JSON object and is taken as the Gemini API key verbatim
    PlainKey(String),
    /// Payload was a JSON object; holds the recognized, well-typed fields
    Fields(Vec<ImportedField>),
}

impl ImportedConfig {
    /// Summary line the apps show after a scan
    pub fn message(&self) -> String {
        match self {
            Self::PlainKey(_) => "Gemini API key imported".to_string(),
            Self::Fields(fields) if fields.is_empty() => {
                "No valid configuration found in QR code".to_string()
            }
            Self::Fields(fields) => {
                let labels: Vec<&str> = fields.iter().map(|f| f.label).collect();
                format!("Imported: {}", labels.join(", "))
            }
        }
    }
}

/// Interpret scanned text the way the apps do: a JSON object contributes its
/// recognized fields, anything else is a bare API key.
pub fn interpret_scanned(text: &str) -> ImportedConfig {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => ImportedConfig::Fields(collect_fields(&object)),
        _ => ImportedConfig::PlainKey(text.to_string()),
    }
}

fn collect_fields(object: &Map<String, Value>) -> Vec<ImportedField> {
    IMPORT_FIELDS
        .iter()
        .filter_map(|&(key, label, kind, secret)| {
            let value = object.get(key)?;
            let accepted = match kind {
                FieldKind::Text => value.as_str().is_some_and(|s| !s.is_empty()),
                FieldKind::Integer => value.is_i64() || value.is_u64(),
            };
            if !accepted {
                tracing::debug!(key, "Ignoring field with unexpected type or empty value");
                return None;
            }
            Some(ImportedField {
                key,
                label,
                value: value.clone(),
                secret,
            })
        })
        .collect()
}
