//! # termreel-core
//!
//! Core types for termreel.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other termreel crates. It provides:
//!
//! - Frame and character style types (the captured input model)
//! - Color themes
//! - Render options and their one-shot defaulting step
//! - Error types
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other termreel crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all modules
pub mod error;
pub mod frame;
pub mod options;
pub mod theme;

// Re-export commonly used types
pub use error::{Error, Result};
pub use frame::{CellMetrics, CharStyle, Frame};
pub use options::{RenderOptions, WindowBar};
pub use theme::Theme;
