//! # Termreel
//!
//! Command line front end: read a captured terminal frame sequence from
//! JSON and render one self-contained animated SVG document.
//!
//! ```text
//! termreel <frames.json> <output.svg> [--config <options.yaml>] [--optimize] [--verbose]
//! ```
//!
//! ## Architecture
//!
//! This is Layer 3 - the binary tying together:
//! - termreel-core: captured frames, styles, themes, render options
//! - termreel-encoder: state dedup, pattern detection, timeline assembly
//! - termreel-svg: document emission

use anyhow::{bail, Context};
use termreel::RenderOptions;

const USAGE: &str =
    "usage: termreel <frames.json> <output.svg> [--config <options.yaml>] [--optimize] [--verbose]";

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut config: Option<String> = None;
    let mut verbose = false;
    let mut optimize = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config = Some(args.next().with_context(|| format!("--config needs a path\n{USAGE}"))?);
            }
            "--verbose" => verbose = true,
            "--optimize" => optimize = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ if arg.starts_with('-') => bail!("unknown flag {arg}\n{USAGE}"),
            _ if input.is_none() => input = Some(arg),
            _ if output.is_none() => output = Some(arg),
            _ => bail!("unexpected argument {arg}\n{USAGE}"),
        }
    }
    let (Some(input), Some(output)) = (input, output) else {
        bail!("{USAGE}");
    };

    let mut options = match &config {
        Some(path) => RenderOptions::from_file(path)
            .with_context(|| format!("failed to load options from {path}"))?,
        None => RenderOptions::default(),
    };
    options.verbose |= verbose;
    options.optimize_size |= optimize;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if options.verbose { "debug" } else { "info" })
            }),
        )
        .init();

    let frames = termreel::load_frames(&input)
        .with_context(|| format!("failed to read frames from {input}"))?;
    tracing::info!("encoding {} frames from {}", frames.len(), input);

    termreel::encode_to_file(&frames, &options, &output)
        .with_context(|| format!("failed to write {output}"))?;
    tracing::info!("wrote {}", output);

    Ok(())
}
