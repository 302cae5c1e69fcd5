//! Captured frame and per-character style types.

use serde::{Deserialize, Serialize};

/// Style of a single character cell, as captured from the terminal.
///
/// Colors are CSS color strings taken verbatim from the capture; an empty
/// string means the terminal default. Two styles compare equal only when
/// all five fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharStyle {
    /// Foreground color (empty = terminal default)
    pub foreground: String,
    /// Background color (empty = terminal default)
    pub background: String,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl CharStyle {
    /// Create a plain style with no color and no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a style with a foreground color.
    pub fn with_foreground(color: &str) -> Self {
        Self {
            foreground: color.to_string(),
            ..Default::default()
        }
    }

    /// Create a style with a background color.
    pub fn with_background(color: &str) -> Self {
        Self {
            background: color.to_string(),
            ..Default::default()
        }
    }

    /// Check if the style carries no color and no attribute.
    pub fn is_plain(&self) -> bool {
        self.foreground.is_empty()
            && self.background.is_empty()
            && !self.bold
            && !self.italic
            && !self.underline
    }

    /// Check if the style carries a background color.
    pub fn has_background(&self) -> bool {
        !self.background.is_empty()
    }
}

/// Width and height of one character cell in device units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellMetrics {
    /// Cell width
    pub width: f64,
    /// Cell height
    pub height: f64,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width: 12.0,
            height: 24.0,
        }
    }
}

fn default_cell_width() -> f64 {
    CellMetrics::default().width
}

fn default_cell_height() -> f64 {
    CellMetrics::default().height
}

fn default_cursor_glyph() -> char {
    '█'
}

/// One captured terminal frame: visible text, parallel style rows, cursor
/// position and capture time.
///
/// Frames are immutable once captured. Trailing whitespace in `lines` is
/// significant. A style row may be shorter than its line (remaining cells
/// are plain), longer than it (colored blank cells past the text), or
/// missing entirely for trailing lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frame {
    /// Visible lines, top to bottom
    pub lines: Vec<String>,
    /// Per-line style rows, parallel to `lines`
    pub styles: Vec<Vec<CharStyle>>,
    /// Cursor column (may exceed the cursor line's length)
    pub cursor_col: usize,
    /// Cursor row
    pub cursor_row: usize,
    /// Cell width in device units
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,
    /// Cell height in device units
    #[serde(default = "default_cell_height")]
    pub cell_height: f64,
    /// Capture time in seconds, relative to the recording start
    pub timestamp: f64,
    /// Glyph used to draw the cursor
    #[serde(default = "default_cursor_glyph")]
    pub cursor_glyph: char,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            styles: Vec::new(),
            cursor_col: 0,
            cursor_row: 0,
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            timestamp: 0.0,
            cursor_glyph: default_cursor_glyph(),
        }
    }
}

impl Frame {
    /// Create an unstyled frame from plain lines, with the cursor parked at
    /// the end of the last line.
    pub fn from_lines(lines: &[&str], timestamp: f64) -> Self {
        let cursor_row = lines.len().saturating_sub(1);
        let cursor_col = lines.last().map_or(0, |line| line.chars().count());
        Self {
            lines: lines.iter().map(|line| line.to_string()).collect(),
            cursor_col,
            cursor_row,
            timestamp,
            ..Default::default()
        }
    }

    /// Get the text of a row, or an empty string for out-of-range rows.
    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map_or("", String::as_str)
    }

    /// Get the text of the row the cursor sits on.
    pub fn cursor_line(&self) -> &str {
        self.line(self.cursor_row)
    }

    /// Number of visible rows.
    pub fn row_count(&self) -> usize {
        self.lines.len()
    }

    /// Look up the style of a cell. The column is independent of the line's
    /// text length, so colored blank cells past the end of a line resolve.
    pub fn style_at(&self, row: usize, col: usize) -> Option<&CharStyle> {
        self.styles.get(row).and_then(|style_row| style_row.get(col))
    }

    /// Number of styled columns on a row (0 if the row has no style row).
    pub fn style_cols(&self, row: usize) -> usize {
        self.styles.get(row).map_or(0, Vec::len)
    }

    /// Cell dimensions of this frame.
    pub fn metrics(&self) -> CellMetrics {
        CellMetrics {
            width: self.cell_width,
            height: self.cell_height,
        }
    }
}
