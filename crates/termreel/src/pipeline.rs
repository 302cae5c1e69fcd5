//! End-to-end encoding pipeline.
//!
//! One call runs the whole chain: resolve options, deduplicate states,
//! detect patterns, assemble the timeline, render. Generation never
//! fails; the only surfaced error is the final file write.

use std::path::Path;

use tracing::info;

use termreel_core::{CellMetrics, Frame, RenderOptions, Result};
use termreel_encoder::{
    PatternDetector, StateDeduplicator, StateTimeline, Timeline, TimelineBuilder,
};
use termreel_svg::SvgRenderer;

struct Encoded {
    options: RenderOptions,
    states: StateTimeline,
    plan: Timeline,
    cell: CellMetrics,
}

fn run_passes(frames: &[Frame], options: &RenderOptions) -> Encoded {
    let options = options.resolved(frames);
    let cell = frames.first().map_or(CellMetrics::default(), Frame::metrics);

    let states = StateDeduplicator::new().dedupe(frames);
    let patterns = PatternDetector::new().detect(frames);
    let plan = TimelineBuilder::new(&options).build(&states, &patterns);

    info!(
        frames = frames.len(),
        states = states.state_count(),
        stops = plan.stops.len(),
        tracks = plan.tracks.len(),
        "encoded capture"
    );

    Encoded {
        options,
        states,
        plan,
        cell,
    }
}

/// Encode a captured frame sequence into one animated document.
///
/// Options are resolved first, so zeroed or defaulted fields are fine;
/// an empty capture produces a minimal valid document.
pub fn encode(frames: &[Frame], options: &RenderOptions) -> String {
    let encoded = run_passes(frames, options);
    SvgRenderer::new(encoded.options).render(&encoded.states, &encoded.plan, encoded.cell)
}

/// Encode a captured frame sequence and write the document to a file.
pub fn encode_to_file<P: AsRef<Path>>(
    frames: &[Frame],
    options: &RenderOptions,
    path: P,
) -> Result<()> {
    let encoded = run_passes(frames, options);
    SvgRenderer::new(encoded.options).save_to_file(&encoded.states, &encoded.plan, encoded.cell, path)
}

/// Read a captured frame sequence from a JSON file holding one array of
/// frames.
pub fn load_frames<P: AsRef<Path>>(path: P) -> Result<Vec<Frame>> {
    let content = std::fs::read_to_string(path)?;
    let frames = serde_json::from_str(&content)?;
    Ok(frames)
}
