use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use greyroom::models::AppConfig;
use greyroom::services::{EditSession, JsonPresetStore, PngFileSink, PresetStore, RenderEvent};
use greyroom::surface::run_console;
use tone_pipeline::{Parameter, ParameterSet};

#[derive(Parser)]
#[command(name = "greyroom")]
#[command(about = "Greyroom - black-and-white photo editor with tone presets")]
struct Cli {
    /// Path to config.yaml (overrides GREYROOM_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a photo to a black-and-white PNG
    Render {
        /// Input image (JPEG, PNG, WebP, BMP, TIFF, GIF)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Start from a saved preset (index as shown by `presets list`)
        #[arg(short, long)]
        preset: Option<usize>,

        #[command(flatten)]
        values: ValueArgs,
    },
    /// Edit a photo interactively, one command per line on stdin
    Edit {
        /// Input image
        #[arg(short, long)]
        input: PathBuf,

        /// Where `export` writes the PNG
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Manage saved presets
    Presets {
        #[command(subcommand)]
        action: PresetAction,
    },
}

#[derive(Subcommand)]
enum PresetAction {
    /// List presets, newest first
    List,
    /// Show the parameters of one preset
    Show { index: usize },
    /// Save a new preset from the given values (unset values use defaults)
    Save {
        #[command(flatten)]
        values: ValueArgs,
    },
    /// Delete a preset
    Delete { index: usize },
}

#[derive(Args)]
struct ValueArgs {
    /// Brightness offset, -1.0 to 1.0
    #[arg(long, allow_hyphen_values = true)]
    brightness: Option<f32>,

    /// Contrast gain, 0.5 to 1.5
    #[arg(long, allow_hyphen_values = true)]
    contrast: Option<f32>,

    /// Tone curve at quarter grey, 0.0 to 0.5
    #[arg(long, allow_hyphen_values = true)]
    shadows: Option<f32>,

    /// Tone curve at half grey, 0.0 to 1.0
    #[arg(long, allow_hyphen_values = true)]
    midtones: Option<f32>,

    /// Tone curve at three-quarter grey, 0.5 to 1.0
    #[arg(long, allow_hyphen_values = true)]
    highlights: Option<f32>,
}

impl ValueArgs {
    /// Overlay the given values on `base`, clamping each one.
    fn apply_to(&self, base: ParameterSet) -> ParameterSet {
        [
            (Parameter::Brightness, self.brightness),
            (Parameter::Contrast, self.contrast),
            (Parameter::Shadows, self.shadows),
            (Parameter::Midtones, self.midtones),
            (Parameter::Highlights, self.highlights),
        ]
        .into_iter()
        .fold(base, |params, (parameter, value)| match value {
            Some(v) => params.with(parameter, v),
            None => params,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            preset,
            values,
        }) => {
            init_tracing("greyroom=info", false);
            let config = AppConfig::load(cli.config.as_deref());
            run_render_command(&config, &input, &output, preset, &values).await
        }
        Some(Commands::Edit { input, output }) => {
            init_tracing("greyroom=warn", true);
            let config = AppConfig::load(cli.config.as_deref());
            run_edit_command(&config, &input, &output).await
        }
        Some(Commands::Presets { action }) => {
            init_tracing("greyroom=warn", false);
            let config = AppConfig::load(cli.config.as_deref());
            run_presets_command(&config, action).await
        }
        None => {
            run_status_command(cli.config.as_deref());
            Ok(())
        }
    }
}

fn init_tracing(default_filter: &str, with_time: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);

    if with_time {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Render one photo with the given values and write it as PNG
async fn run_render_command(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    preset: Option<usize>,
    values: &ValueArgs,
) -> anyhow::Result<()> {
    let mut session = EditSession::from_config(config);

    let base = match preset {
        Some(index) => {
            let preset = nth_preset(session.store().as_ref(), index).await?;
            session.apply_preset(&preset).await?
        }
        None => ParameterSet::default(),
    };
    session.set_params(values.apply_to(base))?;

    let mut events = session.subscribe();
    session
        .load_image_path(input)
        .await
        .with_context(|| format!("reading {}", input.display()))?;

    let frame = match session.wait_for_frame().await? {
        Some(frame) => frame,
        None => {
            let mut reason = "no image produced".to_string();
            while let Ok(event) = events.try_recv() {
                if let RenderEvent::Failed { error, .. } = event {
                    reason = error.to_string();
                }
            }
            anyhow::bail!(reason);
        }
    };

    let sink = PngFileSink::new(output).with_compression(config.export_compression.to_png());
    session.export(&sink).await?;
    println!(
        "Rendered {} ({}x{}, {})",
        output.display(),
        frame.width(),
        frame.height(),
        frame.params
    );

    session.shutdown().await;
    Ok(())
}

/// Interactive editing from stdin
async fn run_edit_command(config: &AppConfig, input: &Path, output: &Path) -> anyhow::Result<()> {
    let mut session = EditSession::from_config(config);
    session
        .load_image_path(input)
        .await
        .with_context(|| format!("reading {}", input.display()))?;

    let sink = PngFileSink::new(output).with_compression(config.export_compression.to_png());
    println!(
        "Editing {} (type 'help' for commands, 'quit' to leave)",
        input.display()
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run_console(&mut session, &sink, stdin, tokio::io::stdout()).await?;

    session.shutdown().await;
    Ok(())
}

async fn run_presets_command(config: &AppConfig, action: PresetAction) -> anyhow::Result<()> {
    let store = JsonPresetStore::new(&config.presets_file);

    match action {
        PresetAction::List => {
            let presets = store.list().await?;
            if presets.is_empty() {
                println!("No presets in {}", store.path().display());
            }
            for (i, preset) in presets.iter().enumerate() {
                println!("{:>3}. {}", i + 1, preset.summary());
            }
        }
        PresetAction::Show { index } => {
            let preset = nth_preset(&store, index).await?;
            println!("Preset {index} (saved {})", preset.created_at.to_rfc3339());
            for parameter in Parameter::ALL {
                println!(
                    "  {:<11} {}",
                    parameter.label(),
                    parameter.format_value(preset.params.get(parameter))
                );
            }
        }
        PresetAction::Save { values } => {
            let preset = store.save(values.apply_to(ParameterSet::default())).await?;
            println!("Saved preset: {}", preset.summary());
        }
        PresetAction::Delete { index } => {
            let preset = nth_preset(&store, index).await?;
            store.delete(&preset).await?;
            println!("Deleted preset {index}: {}", preset.summary());
        }
    }
    Ok(())
}

/// Preset by 1-based position in the newest-first listing
async fn nth_preset(
    store: &dyn PresetStore,
    index: usize,
) -> anyhow::Result<greyroom::models::Preset> {
    let presets = store.list().await?;
    let count = presets.len();
    index
        .checked_sub(1)
        .and_then(|i| presets.into_iter().nth(i))
        .with_context(|| format!("no preset #{index} ({count} saved)"))
}

fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_env = std::env::var("GREYROOM_CONFIG").ok();
    let presets_env = std::env::var("GREYROOM_PRESETS").ok();

    println!("Greyroom v{VERSION}");
    println!("Black-and-white photo editor\n");

    println!("Environment Variables:");
    println!(
        "  GREYROOM_CONFIG  = {}",
        config_env.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  GREYROOM_PRESETS = {}",
        presets_env.as_deref().unwrap_or("(not set)")
    );

    let config = AppConfig::load(config_path);
    println!("\nConfiguration:");
    println!("  Settle delay:  {} ms", config.settle_delay_ms);
    println!("  Presets file:  {}", config.presets_file.display());
    println!("  Compression:   {:?}", config.export_compression);

    println!("\nCommands:");
    println!("  greyroom render -i photo.jpg -o out.png [--brightness 0.1 ...]");
    println!("  greyroom edit -i photo.jpg -o out.png");
    println!("  greyroom presets list|show|save|delete");
}
