//! Identifier naming, palette collection, and the animation stylesheet.
//!
//! The stylesheet carries everything that moves: the master slide
//! animation switching state slots, one stepped clip animation per
//! pattern track, and the idle-cursor blink. Rules are emitted in a
//! single canonical compact form; readable output only affects markup
//! indentation.

use termreel_core::{RenderOptions, Theme};
use termreel_encoder::{
    format_coord, format_percent, format_secs, percent_precision, TerminalState, Timeline,
    TrackKind,
};

use crate::escape::escape_text;

/// Class, keyframe and clip-path names, readable or shortened.
#[derive(Debug, Clone, Copy)]
pub struct NameScheme {
    short: bool,
}

impl NameScheme {
    /// Pick the naming form from the size-optimization flag.
    pub fn new(optimize_size: bool) -> Self {
        Self {
            short: optimize_size,
        }
    }

    /// Foreground palette class for slot `i`.
    pub fn fg(&self, i: usize) -> String {
        if self.short {
            format!("f{i}")
        } else {
            format!("fg-{i}")
        }
    }

    /// Background palette class for slot `i`.
    pub fn bg(&self, i: usize) -> String {
        if self.short {
            format!("g{i}")
        } else {
            format!("bg-{i}")
        }
    }

    /// Bold text class.
    pub fn bold(&self) -> &'static str {
        if self.short {
            "b"
        } else {
            "bold"
        }
    }

    /// Italic text class.
    pub fn italic(&self) -> &'static str {
        if self.short {
            "i"
        } else {
            "italic"
        }
    }

    /// Underlined text class.
    pub fn underline(&self) -> &'static str {
        if self.short {
            "u"
        } else {
            "underline"
        }
    }

    /// Cursor glyph class.
    pub fn cursor(&self) -> &'static str {
        if self.short {
            "c"
        } else {
            "cursor"
        }
    }

    /// Blink class and keyframe name (idle cursors).
    pub fn blink(&self) -> &'static str {
        if self.short {
            "l"
        } else {
            "blink"
        }
    }

    /// Class of the group holding all state slots.
    pub fn frames(&self) -> &'static str {
        if self.short {
            "m"
        } else {
            "frames"
        }
    }

    /// Master slide keyframe name.
    pub fn slide(&self) -> &'static str {
        if self.short {
            "s"
        } else {
            "slide"
        }
    }

    /// Track class and keyframe name for pattern `i`.
    pub fn track(&self, kind: TrackKind, i: usize) -> String {
        if self.short {
            format!("t{i}")
        } else {
            match kind {
                TrackKind::Reveal => format!("type-{i}"),
                TrackKind::Conceal => format!("delete-{i}"),
            }
        }
    }

    /// Clip-path id for pattern `i`.
    pub fn clip(&self, i: usize) -> String {
        if self.short {
            format!("k{i}")
        } else {
            format!("clip-{i}")
        }
    }
}

/// Colors and text attributes the rendered states actually use.
///
/// Colors are stored resolved, in first-use order; the position is the
/// palette class index.
#[derive(Debug, Default)]
pub struct Palette {
    foregrounds: Vec<String>,
    backgrounds: Vec<String>,
    uses_bold: bool,
    uses_italic: bool,
    uses_underline: bool,
    uses_idle_cursor: bool,
}

impl Palette {
    /// Scan states for colors and attributes worth a stylesheet rule.
    ///
    /// Foreground colors and attributes only count on cells that carry a
    /// character; background colors also count on blank styled cells.
    pub fn collect<'a, I>(states: I, theme: &Theme) -> Self
    where
        I: IntoIterator<Item = &'a TerminalState>,
    {
        let mut palette = Palette::default();
        for state in states {
            if !state.cursor_active {
                palette.uses_idle_cursor = true;
            }
            for (row, style_row) in state.styles.iter().enumerate() {
                let text_cols = state.line(row).chars().count();
                for (col, style) in style_row.iter().enumerate() {
                    if style.has_background() {
                        intern(&mut palette.backgrounds, theme.resolve(&style.background));
                    }
                    if col >= text_cols {
                        continue;
                    }
                    if !style.foreground.is_empty() {
                        intern(&mut palette.foregrounds, theme.resolve(&style.foreground));
                    }
                    palette.uses_bold |= style.bold;
                    palette.uses_italic |= style.italic;
                    palette.uses_underline |= style.underline;
                }
            }
        }
        palette
    }

    /// Palette class index of a raw foreground color.
    pub fn fg_index(&self, theme: &Theme, color: &str) -> Option<usize> {
        let resolved = theme.resolve(color);
        self.foregrounds.iter().position(|c| c == resolved)
    }

    /// Palette class index of a raw background color.
    pub fn bg_index(&self, theme: &Theme, color: &str) -> Option<usize> {
        let resolved = theme.resolve(color);
        self.backgrounds.iter().position(|c| c == resolved)
    }

    /// Whether any rendered state carries an idle cursor.
    pub fn uses_idle_cursor(&self) -> bool {
        self.uses_idle_cursor
    }
}

fn intern(colors: &mut Vec<String>, color: &str) {
    if !colors.iter().any(|c| c == color) {
        colors.push(color.to_string());
    }
}

/// Build the stylesheet rules, one rule string per entry.
///
/// `master` holds the (cycle percent, rendered slot) pairs of the master
/// timeline after slot mapping; `slot_pitch` is the horizontal distance
/// between state slots.
pub fn stylesheet_rules(
    options: &RenderOptions,
    scheme: &NameScheme,
    palette: &Palette,
    plan: &Timeline,
    master: &[(f64, usize)],
    slot_pitch: f64,
    cell_width: f64,
) -> Vec<String> {
    let mut rules = Vec::new();
    let theme = &options.theme;
    let precision = percent_precision(plan.stop_count());
    let duration = format_secs(plan.duration);
    let delay = if plan.delay > 0.0 {
        format!(";animation-delay:-{}s", format_secs(plan.delay))
    } else {
        String::new()
    };

    rules.push(format!(
        "text{{font-family:'{}',monospace;font-size:{}px;fill:{}}}",
        escape_text(&options.font_family),
        format_coord(options.font_size),
        theme.foreground
    ));

    if palette.uses_bold {
        rules.push(format!(".{}{{font-weight:bold}}", scheme.bold()));
    }
    if palette.uses_italic {
        rules.push(format!(".{}{{font-style:italic}}", scheme.italic()));
    }
    if palette.uses_underline {
        rules.push(format!(
            ".{}{{text-decoration:underline}}",
            scheme.underline()
        ));
    }
    for (i, color) in palette.foregrounds.iter().enumerate() {
        rules.push(format!(".{}{{fill:{color}}}", scheme.fg(i)));
    }
    for (i, color) in palette.backgrounds.iter().enumerate() {
        rules.push(format!(".{}{{fill:{color}}}", scheme.bg(i)));
    }

    rules.push(format!(".{}{{fill:{}}}", scheme.cursor(), theme.cursor));
    if options.cursor_blink && palette.uses_idle_cursor() {
        rules.push(format!(
            ".{}{{animation:{} 1s step-end infinite}}",
            scheme.blink(),
            scheme.blink()
        ));
        rules.push(format!(
            "@keyframes {}{{0%,100%{{opacity:1}}50%{{opacity:0}}}}",
            scheme.blink()
        ));
    }

    let animated = master.windows(2).any(|pair| pair[0].1 != pair[1].1);
    if animated {
        rules.push(format!(
            ".{}{{animation:{} {duration}s step-end infinite{delay}}}",
            scheme.frames(),
            scheme.slide()
        ));
        let mut body = String::new();
        for &(percent, slot) in master {
            body.push_str(&format!(
                "{}%{{transform:{}}}",
                format_percent(percent, precision),
                translate_x(slot as f64 * slot_pitch)
            ));
        }
        rules.push(format!("@keyframes {}{{{body}}}", scheme.slide()));
    }

    for track in &plan.tracks {
        let name = scheme.track(track.kind, track.index);
        rules.push(format!(
            ".{name}{{animation:{name} {duration}s infinite{delay}}}"
        ));

        let full = format_coord(track.steps as f64 * cell_width);
        let start = format_percent(track.start_percent, precision);
        let end = format_percent(track.end_percent, precision);
        let start_sel = if track.start_percent > 0.0 {
            format!("0%,{start}%")
        } else {
            "0%".to_string()
        };
        let end_sel = if track.end_percent < 100.0 {
            format!("{end}%,100%")
        } else {
            "100%".to_string()
        };
        let (start_width, end_width) = match track.kind {
            TrackKind::Reveal => ("0".to_string(), full),
            TrackKind::Conceal => (full, "0".to_string()),
        };
        rules.push(format!(
            "@keyframes {name}{{{start_sel}{{width:{start_width}px;\
             animation-timing-function:steps({},end)}}{end_sel}{{width:{end_width}px}}}}",
            track.steps
        ));
    }

    rules
}

/// Horizontal transform moving the slot row so `offset` lands at x 0.
fn translate_x(offset: f64) -> String {
    if offset == 0.0 {
        "translateX(0)".to_string()
    } else {
        format!("translateX(-{}px)", format_coord(offset))
    }
}
