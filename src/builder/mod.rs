//! Building the text that goes into the QR code
//!
//! A payload comes from one of three places: a bare API key given on the
//! command line, an existing JSON file, or an interactive prompt session.

mod interactive;

pub use interactive::{InteractiveOutcome, InteractiveSession};

use crate::error::{Error, Result};
use crate::visionclaw::Configuration;
use std::fs;
use std::io;
use std::path::Path;

/// Text handed verbatim to the QR encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(String);

impl Payload {
    /// The API key exactly as given, not wrapped in JSON.
    ///
    /// Only an empty or all-whitespace key is rejected.
    pub fn from_key(key: &str) -> Result<Self> {
        if key.trim().is_empty() {
            return Err(Error::MissingInput("Gemini API key".to_string()));
        }
        Ok(Self(key.to_string()))
    }

    /// Contents of a JSON file, re-serialized without whitespace.
    ///
    /// Key order of the file is preserved.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;

        let value: serde_json::Value =
            serde_json::from_str(&contents).map_err(|source| Error::InvalidJson {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self(serde_json::to_string(&value)?))
    }

    /// Indented JSON of a configuration built in this process
    pub fn from_configuration(config: &Configuration) -> Result<Self> {
        Ok(Self(config.to_json_pretty()?))
    }

    /// The payload text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The UTF-8 bytes stored in the QR code
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn key_is_used_verbatim() {
        let payload = Payload::from_key("abc123").unwrap();
        assert_eq!(payload.as_str(), "abc123");
    }

    #[test]
    fn key_keeps_surrounding_whitespace() {
        let payload = Payload::from_key(" abc123 ").unwrap();
        assert_eq!(payload.as_str(), " abc123 ");
        assert_eq!(payload.as_bytes(), b" abc123 ");
    }

    #[test]
    fn blank_key_is_missing_input() {
        let err = Payload::from_key("   ").unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
        assert_eq!(err.to_string(), "Gemini API key is required.");
    }

    #[test]
    fn json_file_is_compacted_in_file_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "{{\n  \"openClawHost\": \"http://h\",\n  \"geminiAPIKey\": \"k\",\n  \"openClawPort\": 18789\n}}"
        )
        .unwrap();

        let payload = Payload::from_json_file(file.path()).unwrap();
        assert_eq!(
            payload.as_str(),
            r#"{"openClawHost":"http://h","geminiAPIKey":"k","openClawPort":18789}"#
        );
    }

    #[test]
    fn missing_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = Payload::from_json_file(&path).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
        assert!(err.to_string().starts_with("File not found:"));
    }

    #[test]
    fn malformed_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"geminiAPIKey\": ").unwrap();
        let err = Payload::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidJson { .. }));
    }

    #[test]
    fn configuration_payload_is_pretty() {
        let payload = Payload::from_configuration(&Configuration::new("k")).unwrap();
        assert_eq!(payload.as_str(), "{\n  \"geminiAPIKey\": \"k\"\n}");
    }
}
