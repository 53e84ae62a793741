// SPDX-License-Identifier: MIT
//
// rx-art — render a prescription artwork from the command line.
//
// Wires the engine to stdin-free, one-shot I/O:
//
//   flags/env → EngineConfig (+ optional JSON file) → Engine
//   question + confidence → ArtworkRequest → Engine::render → Artwork
//   Artwork → SVG | JSON metadata | swatch list → stdout or --output
//
// Logs go to stderr and are filtered by RUST_LOG (default: warn), so the
// document on stdout can be piped straight into a file or viewer.

use std::fs;
use std::io::{self, Write as _};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rx_engine::{Artwork, ArtworkRequest, Engine, EngineConfig, builtin_names};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Standalone SVG document
    Svg,
    /// Analysis, seed, palette and rarity as JSON
    Json,
    /// One `role #rrggbb` line per palette swatch
    Swatches,
}

#[derive(Debug, Parser)]
#[command(name = "rx-art", version, about = "Deterministic prescription artwork generator")]
struct Cli {
    /// The medical question to visualize
    #[arg(required_unless_present = "list_themes")]
    question: Option<String>,

    /// Upstream confidence score in [0, 1]
    #[arg(long, short, env = "RX_ART_CONFIDENCE", default_value_t = 0.5)]
    confidence: f64,

    /// Canvas edge in pixels (defaults to the configured size)
    #[arg(long, short, env = "RX_ART_SIZE", conflicts_with = "prescription")]
    size: Option<u32>,

    /// Render at the configured prescription size
    #[arg(long, env = "RX_ART_PRESCRIPTION")]
    prescription: bool,

    /// Appended to the question before hashing
    #[arg(long, env = "RX_ART_SALT")]
    salt: Option<String>,

    /// Builtin theme preset (see --list-themes)
    #[arg(long, short, env = "RX_ART_THEME")]
    theme: Option<String>,

    /// Shift palette saturation by the question's time context
    #[arg(long, env = "RX_ART_ADAPT_TIME")]
    adapt_time: bool,

    /// Apply the seed-derived color jitter
    #[arg(long, env = "RX_ART_JITTER")]
    jitter: bool,

    #[arg(long, short, value_enum, env = "RX_ART_FORMAT", default_value_t = Format::Svg)]
    format: Format,

    /// JSON engine configuration file
    #[arg(long, env = "RX_ART_CONFIG")]
    config: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(long, short, env = "RX_ART_OUTPUT")]
    output: Option<PathBuf>,

    /// Print the builtin theme presets and exit
    #[arg(long)]
    list_themes: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_themes {
        let mut stdout = io::stdout().lock();
        for name in builtin_names() {
            writeln!(stdout, "{name}")?;
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    if let Some(theme) = &cli.theme {
        if rx_engine::builtin_theme(theme).is_none() {
            bail!("unknown theme '{theme}' (available: {})", builtin_names().join(", "));
        }
    }

    let size = if cli.prescription { Some(config.prescription_size) } else { cli.size };
    let engine = Engine::new(config).context("invalid engine configuration")?;

    let mut request = ArtworkRequest::new(cli.question.unwrap_or_default(), cli.confidence)
        .with_time_adaptation(cli.adapt_time)
        .with_jitter(cli.jitter);
    request.size = size;
    request.salt = cli.salt;
    request.theme = cli.theme;

    let artwork = engine.render(&request).context("rendering artwork")?;
    info!(
        id = %artwork.rarity.id,
        tier = %artwork.rarity.tier,
        subspecialty = artwork.analysis.subspecialty.name(),
        "artwork rendered"
    );

    let document = render_output(&artwork, cli.format)?;
    match &cli.output {
        Some(path) => fs::write(path, document).with_context(|| format!("writing {}", path.display()))?,
        None => io::stdout().lock().write_all(document.as_bytes())?,
    }
    Ok(())
}

fn render_output(artwork: &Artwork, format: Format) -> Result<String> {
    Ok(match format {
        Format::Svg => artwork.to_svg(),
        Format::Json => {
            let mut json = artwork.metadata_json().context("serializing metadata")?;
            json.push('\n');
            json
        }
        Format::Swatches => artwork
            .palette
            .swatches()
            .iter()
            .map(|(role, hex)| format!("{role:<12} {hex}\n"))
            .collect(),
    })
}
