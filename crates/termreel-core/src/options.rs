//! Render options controlling document generation.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Frame, Result, Theme};

/// Decorative window bar style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowBar {
    /// No window bar
    #[default]
    None,
    /// Traffic-light circles, left aligned
    Colorful,
    /// Traffic-light circles, right aligned
    ColorfulRight,
    /// Outlined circles, left aligned
    Rings,
    /// Outlined circles, right aligned
    RingsRight,
}

impl WindowBar {
    /// Check if a bar is drawn at all.
    pub fn is_visible(&self) -> bool {
        *self != WindowBar::None
    }

    /// Check if the decorations sit on the right edge.
    pub fn is_right_aligned(&self) -> bool {
        matches!(self, WindowBar::ColorfulRight | WindowBar::RingsRight)
    }

    /// Check if the decorations are outlined instead of filled.
    pub fn is_outlined(&self) -> bool {
        matches!(self, WindowBar::Rings | WindowBar::RingsRight)
    }
}

impl FromStr for WindowBar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "" | "none" => Ok(WindowBar::None),
            "colorful" => Ok(WindowBar::Colorful),
            "colorfulright" => Ok(WindowBar::ColorfulRight),
            "rings" => Ok(WindowBar::Rings),
            "ringsright" => Ok(WindowBar::RingsRight),
            _ => Err(Error::Config(format!("unknown window bar style: {s}"))),
        }
    }
}

/// Options controlling document generation, loadable from a YAML file.
///
/// Zero or absent numeric values mean "use the default" and are replaced
/// once by [`RenderOptions::resolved`] before any pass runs; downstream
/// code never re-checks them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Canvas width in device units (0 = default)
    pub width: f64,
    /// Canvas height in device units (0 = default)
    pub height: f64,
    /// Inner padding around the terminal content
    pub padding: f64,
    /// Outer margin around the window
    pub margin: f64,
    /// Margin fill color (empty = no margin rectangle)
    pub margin_fill: String,
    /// Font size in device units (0 = default)
    pub font_size: f64,
    /// Font family for terminal text (empty = default)
    pub font_family: String,
    /// Color theme
    pub theme: Theme,
    /// Animation cycle length in seconds (0 = derive from timestamps)
    pub duration: f64,
    /// Playback speed multiplier (0 = 1x)
    pub playback_speed: f64,
    /// Loop start offset: fraction of the cycle when <= 1.0, otherwise an
    /// absolute frame number
    pub loop_offset: f64,
    /// Blink idle cursors
    pub cursor_blink: bool,
    /// Emit compact identifiers and no pretty-printing
    pub optimize_size: bool,
    /// Log per-pass statistics
    pub verbose: bool,
    /// Window bar style
    pub window_bar: WindowBar,
    /// Window bar height (0 = default)
    pub window_bar_size: f64,
    /// Window bar color (empty = theme background)
    pub window_bar_color: String,
    /// Title centered in the window bar (empty = none)
    pub window_title: String,
    /// Window corner radius
    pub border_radius: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 600.0,
            padding: 60.0,
            margin: 0.0,
            margin_fill: String::new(),
            font_size: 22.0,
            font_family: "JetBrains Mono".to_string(),
            theme: Theme::default(),
            duration: 0.0,
            playback_speed: 1.0,
            loop_offset: 0.0,
            cursor_blink: true,
            optimize_size: false,
            verbose: false,
            window_bar: WindowBar::None,
            window_bar_size: 40.0,
            window_bar_color: String::new(),
            window_title: String::new(),
            border_radius: 0.0,
        }
    }
}

impl RenderOptions {
    /// Load options from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse options from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let options: RenderOptions = serde_yaml::from_str(yaml)
            .map_err(|e| Error::Config(format!("failed to parse options: {e}")))?;
        options.validate()?;
        Ok(options)
    }

    /// Validate option values.
    pub fn validate(&self) -> Result<()> {
        if self.padding < 0.0 {
            return Err(Error::Config("padding must be >= 0".to_string()));
        }
        if self.margin < 0.0 {
            return Err(Error::Config("margin must be >= 0".to_string()));
        }
        if self.border_radius < 0.0 {
            return Err(Error::Config("border_radius must be >= 0".to_string()));
        }
        if self.window_bar_size < 0.0 {
            return Err(Error::Config("window_bar_size must be >= 0".to_string()));
        }
        Ok(())
    }

    /// Produce a copy with every zero/absent value replaced by its concrete
    /// default. The cycle length falls back to the capture's timestamp span.
    ///
    /// This is the single defaulting step; every pass reads resolved values
    /// only.
    pub fn resolved(&self, frames: &[Frame]) -> RenderOptions {
        let defaults = RenderOptions::default();
        let mut resolved = self.clone();

        if resolved.width <= 0.0 {
            resolved.width = defaults.width;
        }
        if resolved.height <= 0.0 {
            resolved.height = defaults.height;
        }
        if resolved.font_size <= 0.0 {
            resolved.font_size = defaults.font_size;
        }
        if resolved.font_family.is_empty() {
            resolved.font_family = defaults.font_family;
        }
        if resolved.window_bar_size <= 0.0 {
            resolved.window_bar_size = defaults.window_bar_size;
        }
        if resolved.playback_speed <= 0.0 {
            resolved.playback_speed = 1.0;
        }
        resolved.padding = resolved.padding.max(0.0);
        resolved.margin = resolved.margin.max(0.0);
        resolved.border_radius = resolved.border_radius.max(0.0);
        resolved.loop_offset = resolved.loop_offset.max(0.0);
        if resolved.duration <= 0.0 {
            resolved.duration = capture_span(frames).max(1.0);
        }
        if resolved.window_bar_color.is_empty() {
            resolved.window_bar_color = resolved.theme.background.clone();
        }
        resolved
    }
}

/// Timestamp span of a capture in seconds.
fn capture_span(frames: &[Frame]) -> f64 {
    match (frames.first(), frames.last()) {
        (Some(first), Some(last)) => last.timestamp - first.timestamp,
        _ => 0.0,
    }
}
