//! # termreel-svg
//!
//! Animated SVG rendering for termreel.
//!
//! Takes the encoder's output (deduplicated states plus an animation
//! plan) and assembles one self-contained document: all states rendered
//! side by side in an off-screen row, a CSS master animation sliding the
//! current state into a clipped viewport, and stepped clip-path tracks
//! replaying typing and deleting inside their host state. No scripts, no
//! external assets.
//!
//! ## Architecture
//!
//! This is Layer 2 in the architecture - it depends on termreel-core and
//! termreel-encoder and owns everything markup.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all modules
pub mod escape;
pub mod renderer;
pub mod style;

mod chrome;
mod writer;

// Re-export commonly used types
pub use escape::{escape_attr, escape_text};
pub use renderer::SvgRenderer;
pub use style::{NameScheme, Palette};
