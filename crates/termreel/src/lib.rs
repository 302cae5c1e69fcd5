//! Termreel Library
//!
//! Encodes captured terminal session frames into self-contained animated
//! SVG documents: pure vector output, CSS-animated, no scripts, no
//! external assets. The command line binary is in main.rs.
//!
//! ```no_run
//! use termreel::{encode_to_file, RenderOptions};
//!
//! # fn main() -> termreel::Result<()> {
//! let frames = termreel::load_frames("capture.json")?;
//! encode_to_file(&frames, &RenderOptions::default(), "capture.svg")?;
//! # Ok(())
//! # }
//! ```

pub mod pipeline;

// Re-export commonly used types
pub use pipeline::{encode, encode_to_file, load_frames};
pub use termreel_core::{
    CellMetrics, CharStyle, Error, Frame, RenderOptions, Result, Theme, WindowBar,
};
pub use termreel_encoder::{
    FramePattern, PatternDetector, PatternKind, StateDeduplicator, StateTimeline, TerminalState,
    Timeline, TimelineBuilder,
};
pub use termreel_svg::SvgRenderer;
