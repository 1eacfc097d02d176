//! VisionClaw app configuration carried inside the QR code
//!
//! Field names and their serialization order are what the iOS and Android
//! apps expect when they scan the code.

mod import;

pub use import::{ImportedConfig, ImportedField, interpret_scanned};

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Port the OpenClaw gateway listens on unless told otherwise
pub const DEFAULT_OPENCLAW_PORT: u16 = 18789;

/// App configuration encoded into the QR code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Gemini Live API key
    #[serde(rename = "geminiAPIKey")]
    pub gemini_api_key: String,

    /// Custom system prompt for the Gemini session
    #[serde(
        rename = "geminiSystemPrompt",
        skip_serializing_if = "Option::is_none"
    )]
    pub gemini_system_prompt: Option<String>,

    /// OpenClaw gateway host, e.g. `http://192.168.1.100`
    #[serde(rename = "openClawHost", skip_serializing_if = "Option::is_none")]
    pub openclaw_host: Option<String>,

    /// OpenClaw gateway port, only set together with the host
    #[serde(rename = "openClawPort", skip_serializing_if = "Option::is_none")]
    pub openclaw_port: Option<u16>,

    /// Token for the OpenClaw hook endpoint
    #[serde(rename = "openClawHookToken", skip_serializing_if = "Option::is_none")]
    pub openclaw_hook_token: Option<String>,

    /// Token for the OpenClaw gateway
    #[serde(
        rename = "openClawGatewayToken",
        skip_serializing_if = "Option::is_none"
    )]
    pub openclaw_gateway_token: Option<String>,

    /// WebRTC signaling server, e.g. `wss://server.com`
    #[serde(rename = "webrtcSignalingURL", skip_serializing_if = "Option::is_none")]
    pub webrtc_signaling_url: Option<String>,
}

impl Configuration {
    /// Start a configuration with just the Gemini API key
    pub fn new(gemini_api_key: impl Into<String>) -> Self {
        Self {
            gemini_api_key: gemini_api_key.into(),
            ..Self::default()
        }
    }

    /// Point the app at an OpenClaw gateway; the port falls back to 18789.
    pub fn with_openclaw(mut self, host: impl Into<String>, port: Option<u16>) -> Self {
        self.openclaw_host = Some(host.into());
        self.openclaw_port = Some(port.unwrap_or(DEFAULT_OPENCLAW_PORT));
        self
    }

    /// Whether an OpenClaw gateway is configured
    pub fn has_openclaw(&self) -> bool {
        self.openclaw_host.is_some()
    }

    /// Two-space indented JSON, as produced by the interactive builder
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Single-line JSON without whitespace
    pub fn to_json_compact(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn minimal_configuration_only_has_key() {
        let json = Configuration::new("abc").to_json_compact().unwrap();
        assert_eq!(json, r#"{"geminiAPIKey":"abc"}"#);
    }

    #[test]
    fn host_without_port_defaults_to_18789() {
        let config = Configuration::new("abc").with_openclaw("http://192.168.1.100", None);
        let value: Value = serde_json::from_str(&config.to_json_compact().unwrap()).unwrap();
        assert_eq!(value["openClawPort"], 18789);
        assert_eq!(value["openClawHost"], "http://192.168.1.100");
    }

    #[test]
    fn explicit_port_wins() {
        let config = Configuration::new("abc").with_openclaw("http://mac.local", Some(9000));
        assert_eq!(config.openclaw_port, Some(9000));
        assert!(config.has_openclaw());
    }

    #[test]
    fn keys_serialize_in_app_order() {
        let config = Configuration {
            gemini_system_prompt: Some("be terse".into()),
            openclaw_hook_token: Some("hook".into()),
            openclaw_gateway_token: Some("gw".into()),
            webrtc_signaling_url: Some("wss://server.com".into()),
            ..Configuration::new("abc").with_openclaw("http://mac.local", None)
        };

        let json = config.to_json_compact().unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"geminiAPIKey":"abc","geminiSystemPrompt":"be terse","#,
                r#""openClawHost":"http://mac.local","openClawPort":18789,"#,
                r#""openClawHookToken":"hook","openClawGatewayToken":"gw","#,
                r#""webrtcSignalingURL":"wss://server.com"}"#
            )
        );
    }

    #[test]
    fn pretty_json_uses_two_space_indent() {
        let json = Configuration::new("abc").to_json_pretty().unwrap();
        assert_eq!(json, "{\n  \"geminiAPIKey\": \"abc\"\n}");
    }
}
