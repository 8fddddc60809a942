mod settings;

use anyhow::{Context, Result, bail};
use clap::Parser;
use settings::{Overrides, StrategyArg, apply_overrides, load_config};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wildflower_core::{Identifier, is_supported_image, read_image};

/// Identify a wildflower from a JPEG photo.
#[derive(Debug, Parser)]
#[command(name = "wildflower", version)]
struct Cli {
    /// Photo to identify (.jpg or .jpeg).
    image: PathBuf,
    /// Config file; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
    /// Prediction endpoint for the remote strategy.
    #[arg(long)]
    endpoint: Option<String>,
    /// ONNX model for the local strategy.
    #[arg(long)]
    model: Option<PathBuf>,
    /// Print the identification as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error processing image: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if !is_supported_image(&cli.image) {
        bail!(
            "unsupported file {}; please upload a single .jpg or .jpeg file",
            cli.image.display()
        );
    }

    let overrides = Overrides {
        strategy: cli.strategy,
        endpoint: cli.endpoint,
        model: cli.model,
    };
    let cfg = apply_overrides(load_config(cli.config.as_deref())?, &overrides);
    tracing::debug!(strategy = ?cfg.strategy, "configuration resolved");
    let identifier = Identifier::from_config(&cfg).context("setting up classifier")?;

    let bytes = read_image(&cli.image)
        .with_context(|| format!("reading {}", cli.image.display()))?;
    let found = identifier.identify(&bytes)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else {
        println!("{found}");
    }
    Ok(())
}
