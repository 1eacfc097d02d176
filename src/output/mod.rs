//! Helpers for rendering results for the terminal

use crate::GeneratedQr;
use crate::visionclaw::{ImportedConfig, ImportedField};
use serde_json::{Map, Value, json};

/// Shown after every generated image
pub const SECURITY_WARNING: [&str; 3] = [
    "Security Warning:",
    "   This QR code contains sensitive API keys.",
    "   Store securely and delete after scanning.",
];

/// Combined structured and human-readable representation of an import
#[derive(Debug, Clone)]
pub struct RenderedImport {
    /// Structured JSON representation suitable for downstream consumers
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Confirmation lines printed once an image has been written.
pub fn render_generated(generated: &GeneratedQr) -> Vec<String> {
    let mut lines = vec![format!("QR code saved to: {}", generated.path.display())];
    lines.push(String::new());
    lines.extend(SECURITY_WARNING.iter().map(|line| line.to_string()));
    lines
}

/// Render what the apps would import into both JSON and human-readable forms.
///
/// Credentials are masked in the human-readable lines only.
pub fn render_import(imported: &ImportedConfig) -> RenderedImport {
    let mut human = vec![imported.message()];

    let json = match imported {
        ImportedConfig::PlainKey(key) => {
            human.push(format!("  Gemini API Key: {}", mask_secret(key)));
            json!({
                "kind": "plain_key",
                "message": imported.message(),
                "geminiAPIKey": key,
            })
        }
        ImportedConfig::Fields(fields) => {
            let mut values = Map::new();
            for field in fields {
                human.push(format!("  {}: {}", field.label, display_value(field)));
                values.insert(field.key.to_string(), field.value.clone());
            }
            json!({
                "kind": "json",
                "message": imported.message(),
                "fields": Value::Object(values),
            })
        }
    };

    RenderedImport { json, human }
}

fn display_value(field: &ImportedField) -> String {
    let text = match &field.value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if field.secret {
        mask_secret(&text)
    } else {
        text
    }
}

/// Keep the last four characters of a credential, mask the rest.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{visible}", "*".repeat(chars.len() - 4))
}
