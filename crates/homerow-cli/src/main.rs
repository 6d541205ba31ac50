//! HomeRow CLI — preview which channels a device would show.
//!
//! Run `homerow channels --locale en-US --flag tv_guide_channels` to see the
//! home screen a US device in the guide rollout gets.

mod report;

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use tracing_subscriber::EnvFilter;

use homerow_core::channel::{ChannelConfig, ChannelKind};
use homerow_core::config::HomeRowConfig;
use homerow_core::telemetry::TelemetrySink;
use homerow_core::tile::{ChannelTile, TileSource};
use homerow_hub::context_with_overrides;
use homerow_hub::experiments::StaticExperiments;
use homerow_hub::home::HomeScreen;
use homerow_hub::telemetry::{create_backend, MultiTelemetry, NoopTelemetry, RecordingTelemetry};

// ─── CLI Definition ────────────────────────────────────────

/// HomeRow — channel gating for TV home screens
#[derive(Parser)]
#[command(name = "homerow", version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(short, long, global = true, env = "HOMEROW_CONFIG")]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List channels and whether this device would show them
    Channels {
        #[command(flatten)]
        device: DeviceArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Invoke a channel hook and print the telemetry it emits
    Simulate {
        /// Channel: curated, pinned, guide
        channel: String,

        /// Tile id passed to the hook
        #[arg(short, long)]
        tile: String,

        /// Long click instead of click
        #[arg(long, conflicts_with = "focus")]
        long: bool,

        /// Focus change instead of click
        #[arg(long, value_enum)]
        focus: Option<FocusArg>,

        #[command(flatten)]
        device: DeviceArgs,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args)]
struct DeviceArgs {
    /// Device locale tag (e.g. en-US), overrides config and environment
    #[arg(short, long)]
    locale: Option<String>,

    /// Feature flag override, NAME or NAME=true|false (repeatable)
    #[arg(short, long = "flag")]
    flags: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FocusArg {
    Gained,
    Lost,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current config
    Show,
    /// Print the config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,homerow_core=debug,homerow_hub=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(HomeRowConfig::default_path);

    match cli.command {
        // ─── Channel Preview ───────────────────────────
        Commands::Channels { device, json } => {
            let config = load_config(&config_path, &device)?;
            let overrides = flag_overrides(&device)?;
            // No hooks fire in a preview.
            let ctx = context_with_overrides(&config, overrides, Arc::new(NoopTelemetry));
            let screen = HomeScreen::build(&ctx);
            let status = screen.status();
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                report::print_status(&status, config.device.locale.as_deref());
            }
        }

        // ─── Hook Simulation ───────────────────────────
        Commands::Simulate {
            channel,
            tile,
            long,
            focus,
            device,
        } => {
            let config = load_config(&config_path, &device)?;
            let overrides = flag_overrides(&device)?;
            let kind: ChannelKind = channel.parse()?;
            run_simulate(&config, overrides, kind, &tile, long, focus)?;
        }

        // ─── Config Management ─────────────────────────
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = HomeRowConfig::load(&config_path)?;
                println!("{}", toml::to_string_pretty(&config)?);
            }
            ConfigAction::Path => {
                println!("{}", config_path.display());
            }
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    bail!(
                        "{} already exists (use --force to overwrite)",
                        config_path.display()
                    );
                }
                HomeRowConfig::default().save(&config_path)?;
                println!(
                    "{} {}",
                    "✅ Wrote".green(),
                    config_path.display().to_string().bold()
                );
            }
        },
    }

    Ok(())
}

/// Load config and apply the command-line locale override.
fn load_config(path: &std::path::Path, device: &DeviceArgs) -> anyhow::Result<HomeRowConfig> {
    let mut config = HomeRowConfig::load(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    if let Some(locale) = &device.locale {
        config.device.locale = Some(locale.clone());
    }
    Ok(config)
}

/// Collect `--flag` values. They are layered over the config file's
/// `[experiments]` table rather than written into it.
fn flag_overrides(device: &DeviceArgs) -> anyhow::Result<StaticExperiments> {
    let mut overrides = StaticExperiments::new();
    for flag in &device.flags {
        let (name, enabled) = parse_flag(flag)?;
        overrides = overrides.with_flag(&name, enabled);
    }
    Ok(overrides)
}

/// Parse `NAME`, `NAME=true` or `NAME=false`.
fn parse_flag(raw: &str) -> anyhow::Result<(String, bool)> {
    let (name, value) = match raw.split_once('=') {
        Some((name, value)) => (name.trim(), value.trim()),
        None => (raw.trim(), "true"),
    };
    if name.is_empty() {
        bail!("Empty flag name in '{}'", raw);
    }
    let enabled = match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => true,
        "false" | "0" | "off" | "no" => false,
        other => bail!("Invalid value '{}' for flag '{}'", other, name),
    };
    Ok((name.to_string(), enabled))
}

fn run_simulate(
    config: &HomeRowConfig,
    overrides: StaticExperiments,
    kind: ChannelKind,
    tile_id: &str,
    long: bool,
    focus: Option<FocusArg>,
) -> anyhow::Result<()> {
    // Record inline so the events can be printed right after the hook runs.
    let recorder = Arc::new(RecordingTelemetry::new());
    let sink: Arc<dyn TelemetrySink> = Arc::new(MultiTelemetry::new(vec![
        recorder.clone() as Arc<dyn TelemetrySink>,
        create_backend(&config.telemetry),
    ]));

    let ctx = context_with_overrides(config, overrides, sink);
    let channel = ChannelConfig::for_kind(kind, &ctx);
    let tile = ChannelTile::new(tile_id, tile_source(kind));

    let (action, ran) = match (long, focus) {
        (true, _) => ("long click", channel.long_click(&tile)),
        (false, Some(FocusArg::Gained)) => ("focus gained", channel.focus_changed(&tile, true)),
        (false, Some(FocusArg::Lost)) => ("focus lost", channel.focus_changed(&tile, false)),
        (false, None) => ("click", channel.click(&tile)),
    };

    report::print_simulation(kind, action, ran, &recorder);
    Ok(())
}

fn tile_source(kind: ChannelKind) -> TileSource {
    match kind {
        ChannelKind::CuratedContent => TileSource::CuratedContent,
        ChannelKind::PinnedTiles => TileSource::Custom,
        ChannelKind::TvGuide => TileSource::Guide,
    }
}
