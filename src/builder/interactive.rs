//! Prompt-driven configuration builder

use crate::builder::Payload;
use crate::error::{Error, Result};
use crate::visionclaw::Configuration;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Result of a completed prompt session
#[derive(Debug, Clone)]
pub struct InteractiveOutcome {
    /// The configuration that was assembled
    pub configuration: Configuration,
    /// Indented JSON of `configuration`
    pub payload: Payload,
    /// Where the image should be written
    pub output: PathBuf,
}

/// Asks for each setting in turn on `output`, reading answers from `input`.
///
/// Every answer is trimmed; end of input counts as an empty answer.
pub struct InteractiveSession<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractiveSession<R, W> {
    /// Create a session over the given reader and writer
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run all prompts. Fails before anything is written to disk when the
    /// API key is empty or the port is not a number.
    pub fn run(&mut self, default_output: &Path) -> Result<InteractiveOutcome> {
        writeln!(self.output, "===============================================")?;
        writeln!(self.output, "   VisionClaw QR Code Configuration Generator")?;
        writeln!(self.output, "===============================================")?;
        writeln!(self.output)?;

        writeln!(self.output, "Gemini API Configuration")?;
        let key = self.ask("   Gemini API Key (required): ")?;
        if key.is_empty() {
            return Err(Error::MissingInput("Gemini API key".to_string()));
        }
        let mut config = Configuration::new(key);

        config.gemini_system_prompt =
            self.ask_optional("   Custom System Prompt (optional, press Enter to skip): ")?;

        writeln!(self.output)?;
        writeln!(self.output, "OpenClaw Configuration (optional)")?;
        if let Some(host) =
            self.ask_optional("   Host (e.g., http://192.168.1.100, press Enter to skip): ")?
        {
            let port = self.ask("   Port (default 18789): ")?;
            let port = if port.is_empty() {
                None
            } else {
                Some(port.parse::<u16>().map_err(|e| {
                    Error::InvalidInput(format!("OpenClaw port '{port}' is not a valid port: {e}"))
                })?)
            };
            config = config.with_openclaw(host, port);
            config.openclaw_hook_token = self.ask_optional("   Hook Token: ")?;
            config.openclaw_gateway_token = self.ask_optional("   Gateway Token: ")?;
        }

        writeln!(self.output)?;
        writeln!(self.output, "WebRTC Configuration (optional)")?;
        config.webrtc_signaling_url = self
            .ask_optional("   Signaling URL (e.g., wss://server.com, press Enter to skip): ")?;

        writeln!(self.output)?;
        writeln!(self.output, "Generating QR code...")?;
        let payload = Payload::from_configuration(&config)?;
        writeln!(self.output)?;
        writeln!(self.output, "Configuration:")?;
        writeln!(self.output, "{}", payload.as_str())?;
        writeln!(self.output)?;

        let output = self
            .ask_optional(&format!(
                "Output filename (default: {}): ",
                default_output.display()
            ))?
            .map(PathBuf::from)
            .unwrap_or_else(|| default_output.to_path_buf());

        tracing::debug!(
            openclaw = config.has_openclaw(),
            output = %output.display(),
            "Interactive configuration complete"
        );

        Ok(InteractiveOutcome {
            configuration: config,
            payload,
            output,
        })
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn ask_optional(&mut self, prompt: &str) -> Result<Option<String>> {
        let answer = self.ask(prompt)?;
        Ok((!answer.is_empty()).then_some(answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visionclaw::DEFAULT_OPENCLAW_PORT;
    use std::io::Cursor;

    fn run(answers: &str) -> (Result<InteractiveOutcome>, String) {
        let mut transcript = Vec::new();
        let result = InteractiveSession::new(Cursor::new(answers.as_bytes()), &mut transcript)
            .run(Path::new("visionclaw_config.png"));
        (result, String::from_utf8(transcript).unwrap())
    }

    #[test]
    fn empty_api_key_fails() {
        let (result, transcript) = run("\n");
        assert!(matches!(result, Err(Error::MissingInput(_))));
        assert!(!transcript.contains("Custom System Prompt"));
    }

    #[test]
    fn end_of_input_counts_as_empty_key() {
        let (result, _) = run("");
        assert!(matches!(result, Err(Error::MissingInput(_))));
    }

    #[test]
    fn key_only_skips_openclaw_questions() {
        // key, prompt, host, webrtc, output
        let (result, transcript) = run("  AIzaKey  \n\n\n\n\n");
        let outcome = result.unwrap();

        assert_eq!(outcome.configuration, Configuration::new("AIzaKey"));
        assert_eq!(outcome.output, PathBuf::from("visionclaw_config.png"));
        assert_eq!(outcome.payload.as_str(), "{\n  \"geminiAPIKey\": \"AIzaKey\"\n}");
        assert!(!transcript.contains("Port (default 18789)"));
        assert!(transcript.contains("Configuration:\n{\n  \"geminiAPIKey\": \"AIzaKey\"\n}"));
    }

    #[test]
    fn host_without_port_uses_default() {
        // key, prompt, host, port, hook, gateway, webrtc, output
        let (result, _) = run("k\n\nhttp://192.168.1.100\n\nhook\n\n\nout.png\n");
        let outcome = result.unwrap();

        let config = &outcome.configuration;
        assert_eq!(config.openclaw_host.as_deref(), Some("http://192.168.1.100"));
        assert_eq!(config.openclaw_port, Some(DEFAULT_OPENCLAW_PORT));
        assert_eq!(config.openclaw_hook_token.as_deref(), Some("hook"));
        assert_eq!(config.openclaw_gateway_token, None);
        assert_eq!(outcome.output, PathBuf::from("out.png"));
        assert!(outcome.payload.as_str().contains("\"openClawPort\": 18789"));
    }

    #[test]
    fn full_answers() {
        let (result, _) = run(
            "k\nbe brief\nhttp://mac.local\n9000\nhook\ngate\nwss://server.com\n\n",
        );
        let config = result.unwrap().configuration;

        assert_eq!(config.gemini_system_prompt.as_deref(), Some("be brief"));
        assert_eq!(config.openclaw_port, Some(9000));
        assert_eq!(config.openclaw_gateway_token.as_deref(), Some("gate"));
        assert_eq!(config.webrtc_signaling_url.as_deref(), Some("wss://server.com"));
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let (result, _) = run("k\n\nhttp://mac.local\neighty\n");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
