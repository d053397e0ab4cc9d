// extract - Turn color-coded mask images into scene obstacle rectangles
//
// Pipeline:
//   1. Load mask, nearest-neighbour resize to the target viewport
//   2. Flood fill red (blocking) then green (trigger-only) components
//   3. Bounding boxes, speckle filter, reading-order sort
//   4. Print listings and a JSON snippet for the scene descriptor
//
// Usage: cargo run --bin extract -- <mask> [scene] [width=1280] [height=720]

mod components;
mod mask;
mod output;

use std::env;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mask::{Class, Mask};

const DEFAULT_WIDTH: u32 = 1280;
const DEFAULT_HEIGHT: u32 = 720;
const USAGE: &str = "Usage: extract <path-to-mask-image> [sceneName] [gameWidth] [gameHeight]\n\
                     Example: extract assets/backgrounds/masks/grass.png grass 1280 720";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("missing mask image path")]
    MissingPath,
    #[error("cannot read {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Args {
    path: PathBuf,
    scene: String,
    width: u32,
    height: u32,
}

/// Non-numeric or zero sizes fall back to the defaults
fn parse_size(arg: Option<&String>, default: u32) -> u32 {
    arg.and_then(|s| s.parse().ok()).filter(|&v| v > 0).unwrap_or(default)
}

fn parse_args(args: &[String]) -> Result<Args, ExtractError> {
    let path = PathBuf::from(args.first().ok_or(ExtractError::MissingPath)?);
    let scene = match args.get(1) {
        Some(s) => s.clone(),
        None => path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default(),
    };
    Ok(Args {
        path,
        scene,
        width: parse_size(args.get(2), DEFAULT_WIDTH),
        height: parse_size(args.get(3), DEFAULT_HEIGHT),
    })
}

fn run(args: &Args, out: &mut impl io::Write) -> Result<(), ExtractError> {
    let mask = Mask::open(&args.path, args.width, args.height)?;
    info!(
        red = mask.count(Class::Blocking),
        green = mask.count(Class::TriggerOnly),
        "classified pixels"
    );

    let (blocking, trigger_only) = components::extract(&mask);
    let path = args.path.display().to_string();
    let report = output::Report {
        path: &path,
        scene: &args.scene,
        source: mask.source,
        target: (args.width, args.height),
        blocking: &blocking,
        trigger_only: &trigger_only,
    };
    output::write(out, &report)?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let argv: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(a) => a,
        Err(_) => {
            println!("{USAGE}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&args, &mut io::stdout().lock()) {
        error!(path = %args.path.display(), "extraction failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
