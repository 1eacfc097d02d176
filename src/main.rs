//! visionclaw-qr command-line entrypoint

use anyhow::Context;
use clap::{ArgGroup, Parser, ValueEnum};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use visionclaw_qr::output::{render_generated, render_import};
use visionclaw_qr::{
    ErrorCorrection, GeneratorSettings, InteractiveSession, Payload, QrGenerator, logging,
};

#[derive(Parser, Debug)]
#[command(
    name = "visionclaw-qr",
    version,
    about = "Generate QR codes for VisionClaw configuration",
    after_help = "With no --key, --json or --decode, every setting is asked for interactively."
)]
#[command(group(ArgGroup::new("mode").args(["key", "json", "decode"])))]
struct Cli {
    /// Quick mode: encode just the Gemini API key
    #[arg(long, value_name = "API_KEY")]
    key: Option<String>,

    /// Encode the contents of an existing JSON configuration file
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Read a QR image and show what the apps would import from it
    #[arg(long, value_name = "IMAGE")]
    decode: Option<PathBuf>,

    /// Output filename (default: visionclaw_config.png)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Settings file (toml/yaml). Defaults to visionclaw-qr.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Error correction level (l, m, q, h)
    #[arg(long, value_name = "LEVEL")]
    ecc: Option<ErrorCorrection>,

    /// Pixels per QR module
    #[arg(long, value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    module_size: Option<u32>,

    /// White border width in modules
    #[arg(long, value_name = "MODULES")]
    border: Option<u32>,

    /// Skip decoding the rendered image before writing it
    #[arg(long)]
    no_verify: bool,

    /// Output format for --decode
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings =
        GeneratorSettings::load(cli.config.as_deref()).context("Failed to load settings")?;

    if let Some(ecc) = cli.ecc {
        settings.qr.ecc = ecc;
    }
    if let Some(size) = cli.module_size {
        settings.qr.module_size = size;
    }
    if let Some(border) = cli.border {
        settings.qr.border = border;
    }
    if cli.no_verify {
        settings.qr.verify = false;
    }

    let _log_guard = logging::init(&settings.logging)?;

    let generator = QrGenerator::new(&settings.qr);
    let output = cli.output.unwrap_or_else(|| settings.qr.output.clone());

    if let Some(image) = cli.decode {
        return decode(&generator, &image, cli.format);
    }

    if let Some(key) = cli.key {
        let payload = Payload::from_key(&key)?;
        println!("Generating QR code for API key...");
        return generate(&generator, &payload, &output);
    }

    if let Some(path) = cli.json {
        let payload = Payload::from_json_file(&path)?;
        println!("Generating QR code from {}...", path.display());
        return generate(&generator, &payload, &output);
    }

    let stdin = io::stdin();
    let outcome = InteractiveSession::new(stdin.lock(), io::stdout()).run(&output)?;
    generate(&generator, &outcome.payload, &outcome.output)
}

fn generate(generator: &QrGenerator, payload: &Payload, output: &Path) -> anyhow::Result<()> {
    let generated = generator.generate(payload, output)?;
    info!(
        bytes = generated.payload_bytes,
        size = generated.size,
        "QR code generated"
    );

    for line in render_generated(&generated) {
        println!("{line}");
    }
    Ok(())
}

fn decode(generator: &QrGenerator, image: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let imported = generator.inspect(image)?;
    let rendered = render_import(&imported);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rendered.json)?),
        OutputFormat::Text => {
            for line in &rendered.human {
                println!("{line}");
            }
        }
    }
    Ok(())
}
