mod renderer;
mod sim;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use reel_core::{CarouselConfig, CarouselController, HandleTable};

use crate::sim::{CLIP_SECONDS, FailSwitch, SimulatedMedia};

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    log: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => args.config = Some(iter.next().context("--config needs a path")?.into()),
            "--log" => args.log = Some(iter.next().context("--log needs a path")?.into()),
            "-h" | "--help" => {
                eprintln!("Usage: reel [--config <carousel.json>] [--log <file>]");
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

/// The terminal belongs to the renderer, so logs only go to a file.
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("warn,reel_core=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("warn"),
        },
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn main() -> Result<()> {
    let args = parse_args()?;
    if let Some(path) = &args.log {
        init_tracing(path)?;
    }

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            CarouselConfig::from_json(&json)?
        }
        None => CarouselConfig::default(),
    };

    let fail = FailSwitch::default();
    let handles = HandleTable::from_fn(|_| SimulatedMedia::new(CLIP_SECONDS, fail.clone()));
    let controller = CarouselController::new(config, handles)?;
    tracing::info!("starting terminal carousel");

    renderer::run(controller, &fail)
}
