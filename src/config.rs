//! Tool settings: QR rendering defaults and logging, loaded from disk or environment

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name written when neither settings nor flags choose one
pub const DEFAULT_OUTPUT_FILE: &str = "visionclaw_config.png";

/// Top-level settings structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// QR rendering and output options
    pub qr: QrOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl GeneratorSettings {
    /// Load settings from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut settings = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using settings file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No visionclaw-qr.toml / visionclaw-qr.yaml found, using defaults");
            Self::default()
        };

        settings.apply_env_overrides();
        Ok(settings)
    }

    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["visionclaw-qr.toml", "visionclaw-qr.yaml", "visionclaw-qr.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("visionclaw-qr");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read settings from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported settings format '{other}', expected toml/yaml"
            ))),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| env::var(name).ok());
    }

    /// Apply `VISIONCLAW_QR_*` overrides read through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        self.qr.apply_overrides(&lookup);
        self.logging.apply_overrides(&lookup);
    }
}

/// QR rendering parameters and output defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QrOptions {
    /// Output image path used when no `-o` flag or prompt answer is given
    pub output: PathBuf,
    /// Error correction level
    pub ecc: ErrorCorrection,
    /// Pixels per QR module
    pub module_size: u32,
    /// White border width, in modules
    pub border: u32,
    /// Decode the written image and compare it with the payload
    pub verify: bool,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            ecc: ErrorCorrection::Low,
            module_size: 10,
            border: 4,
            verify: true,
        }
    }
}

impl QrOptions {
    pub(crate) fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(output) = lookup("VISIONCLAW_QR_OUTPUT").filter(|o| !o.trim().is_empty()) {
            self.output = PathBuf::from(output);
        }
        if let Some(ecc) = lookup("VISIONCLAW_QR_ECC").and_then(|v| ErrorCorrection::parse(&v)) {
            self.ecc = ecc;
        }
        if let Some(size) = lookup("VISIONCLAW_QR_MODULE_SIZE").and_then(|v| v.parse::<u32>().ok())
        {
            self.module_size = size.max(1);
        }
        if let Some(border) = lookup("VISIONCLAW_QR_BORDER").and_then(|v| v.parse::<u32>().ok()) {
            self.border = border;
        }
        if let Some(verify) = lookup("VISIONCLAW_QR_VERIFY").and_then(|v| parse_bool(&v)) {
            self.verify = verify;
        }
    }
}

/// QR error correction level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    /// ~7% recovery, largest capacity
    #[serde(alias = "l")]
    Low,
    /// ~15% recovery
    #[serde(alias = "m")]
    Medium,
    /// ~25% recovery
    #[serde(alias = "q")]
    Quartile,
    /// ~30% recovery
    #[serde(alias = "h")]
    High,
}

impl ErrorCorrection {
    /// Parse an error correction identifier (case-insensitive) from a string slice.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "l" | "low" => Some(Self::Low),
            "m" | "medium" => Some(Self::Medium),
            "q" | "quartile" => Some(Self::Quartile),
            "h" | "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            format!("Unsupported error correction level '{value}', expected l, m, q or h")
        })
    }
}

impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => qrcode::EcLevel::L,
            ErrorCorrection::Medium => qrcode::EcLevel::M,
            ErrorCorrection::Quartile => qrcode::EcLevel::Q,
            ErrorCorrection::High => qrcode::EcLevel::H,
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingOptions {
    /// Level for this tool's own events, or a full `EnvFilter` directive
    /// (overridable via `VISIONCLAW_QR_LOG_LEVEL`)
    pub level: String,
    /// Optional file that receives a copy of every log line
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stderr logging
    pub color: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(level) = lookup("VISIONCLAW_QR_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(file) = lookup("VISIONCLAW_QR_LOG_FILE") {
            self.file = (!file.trim().is_empty()).then(|| PathBuf::from(file));
        }
        if let Some(color) = lookup("VISIONCLAW_QR_LOG_COLOR").and_then(|v| parse_bool(&v)) {
            self.color = color;
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
