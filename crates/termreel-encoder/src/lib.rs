//! # termreel-encoder
//!
//! Encoding passes for termreel.
//!
//! Three linear passes turn a captured frame sequence into an animation
//! plan:
//!
//! - State deduplication: collapse frames into unique, content-hashed
//!   states and a coarse keyframe timeline
//! - Pattern detection: find typing and deleting runs over consecutive
//!   frames
//! - Timeline assembly: fold pattern interiors into parked master stops
//!   plus stepped sub-animation tracks
//!
//! The numeric formatter keeps everything the renderer writes compact and
//! collision free.
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends only on termreel-core
//! and knows nothing about any output format.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all modules
pub mod format;
pub mod pattern;
pub mod state;
pub mod timeline;

// Re-export commonly used types
pub use format::{format_coord, format_percent, format_secs, percent_precision};
pub use pattern::{FramePattern, PatternDetector, PatternKind};
pub use state::{KeyframeStop, StateDeduplicator, StateTimeline, TerminalState};
pub use timeline::{PatternTrack, Timeline, TimelineBuilder, TrackKind};
