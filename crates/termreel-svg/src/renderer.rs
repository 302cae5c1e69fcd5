//! Animated document assembly.
//!
//! Every rendered state becomes one translated group, laid out side by
//! side one slot apart; the master slide animation moves the whole row so
//! the current state's slot shows through the viewport. Pattern tracks
//! add a clipped, stepped text segment on top of their host group.
//!
//! States never referenced by a master stop or a track host (frames whose
//! interior a pattern folded away) are not emitted at all; slots are
//! numbered over the surviving states only.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use termreel_core::{CellMetrics, CharStyle, Error, RenderOptions, Result};
use termreel_encoder::{
    format_coord, format_secs, PatternTrack, StateTimeline, TerminalState, Timeline, TrackKind,
};

use crate::chrome::WindowChrome;
use crate::escape::escape_text_into;
use crate::style::{stylesheet_rules, NameScheme, Palette};
use crate::writer::DocWriter;

/// Per-render lookup state shared by the emission helpers.
struct RenderContext {
    scheme: NameScheme,
    palette: Palette,
    cell: CellMetrics,
}

/// Renders an encoded capture into one self-contained animated document.
///
/// The renderer expects resolved options (see
/// [`RenderOptions::resolved`]); it performs no defaulting of its own.
pub struct SvgRenderer {
    options: RenderOptions,
}

impl SvgRenderer {
    /// Create a renderer over resolved options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render the complete document as a string.
    pub fn render(&self, states: &StateTimeline, plan: &Timeline, cell: CellMetrics) -> String {
        let o = &self.options;
        let chrome = WindowChrome::new(o);

        let outer_width = o.width + 2.0 * o.margin;
        let outer_height = o.height + 2.0 * o.margin;
        let content_width = (o.width - 2.0 * o.padding).max(0.0);
        let content_height = (o.height - chrome.bar_height() - 2.0 * o.padding).max(0.0);
        let content_x = o.margin + o.padding;
        let content_y = o.margin + chrome.bar_height() + o.padding;
        // One blank column between slots so neighbors never bleed through
        let slot_pitch = content_width + cell.width;

        let slots = rendered_slots(states, plan);
        let master: Vec<(f64, usize)> = plan
            .stops
            .iter()
            .map(|stop| (stop.percent, slots[stop.state_index].unwrap_or(0)))
            .collect();

        let rendered: Vec<&TerminalState> = states
            .states
            .iter()
            .enumerate()
            .filter(|(index, _)| slots[*index].is_some())
            .map(|(_, state)| state)
            .collect();

        let ctx = RenderContext {
            scheme: NameScheme::new(o.optimize_size),
            palette: Palette::collect(rendered.iter().copied(), &o.theme),
            cell,
        };

        let mut doc = DocWriter::new(o.optimize_size);
        doc.open(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = format_coord(outer_width),
            h = format_coord(outer_height),
        ));
        chrome.emit(&mut doc);

        doc.open("<style>");
        for rule in stylesheet_rules(
            o,
            &ctx.scheme,
            &ctx.palette,
            plan,
            &master,
            slot_pitch,
            cell.width,
        ) {
            doc.line(&rule);
        }
        doc.close("style");

        if !plan.tracks.is_empty() {
            self.emit_clip_defs(&mut doc, &ctx, plan);
        }

        doc.open(&format!(
            r#"<svg x="{}" y="{}" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            format_coord(content_x),
            format_coord(content_y),
            format_coord(content_width),
            format_coord(content_height),
            format_coord(content_width),
            format_coord(content_height),
        ));
        doc.open(&format!(r#"<g class="{}">"#, ctx.scheme.frames()));
        for (index, state) in states.states.iter().enumerate() {
            let Some(slot) = slots[index] else { continue };
            let tracks: Vec<&PatternTrack> = plan
                .tracks
                .iter()
                .filter(|track| track.host_state == index)
                .collect();
            self.emit_state(&mut doc, &ctx, state, slot as f64 * slot_pitch, &tracks);
        }
        doc.close("g");
        doc.close("svg");
        doc.close("svg");

        let document = doc.finish();
        debug!(
            states = rendered.len(),
            tracks = plan.tracks.len(),
            bytes = document.len(),
            "rendered document"
        );
        document
    }

    /// Render and write the document to a file, overwriting any previous
    /// content. This is the pipeline's only fallible step.
    pub fn save_to_file<P: AsRef<Path>>(
        &self,
        states: &StateTimeline,
        plan: &Timeline,
        cell: CellMetrics,
        path: P,
    ) -> Result<()> {
        let document = self.render(states, plan, cell);
        std::fs::write(path.as_ref(), document.as_bytes()).map_err(|source| {
            Error::DocumentWrite {
                path: path.as_ref().display().to_string(),
                source,
            }
        })
    }

    /// Render and write the document to a writer.
    pub fn save_to_writer<W: Write>(
        &self,
        states: &StateTimeline,
        plan: &Timeline,
        cell: CellMetrics,
        writer: &mut W,
    ) -> Result<()> {
        let document = self.render(states, plan, cell);
        writer.write_all(document.as_bytes())?;
        Ok(())
    }

    fn emit_clip_defs(&self, doc: &mut DocWriter, ctx: &RenderContext, plan: &Timeline) {
        doc.open("<defs>");
        for track in &plan.tracks {
            // Clip coordinates are local to the translated host group
            let initial = match track.kind {
                TrackKind::Reveal => 0.0,
                TrackKind::Conceal => track.steps as f64 * ctx.cell.width,
            };
            doc.open(&format!(
                r#"<clipPath id="{}" clipPathUnits="userSpaceOnUse">"#,
                ctx.scheme.clip(track.index)
            ));
            doc.line(&format!(
                r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
                ctx.scheme.track(track.kind, track.index),
                format_coord(track.prefix_cols as f64 * ctx.cell.width),
                format_coord(track.row as f64 * ctx.cell.height),
                format_coord(initial),
                format_coord(ctx.cell.height),
            ));
            doc.close("clipPath");
        }
        doc.close("defs");
    }

    fn emit_state(
        &self,
        doc: &mut DocWriter,
        ctx: &RenderContext,
        state: &TerminalState,
        offset: f64,
        tracks: &[&PatternTrack],
    ) {
        if offset > 0.0 {
            doc.open(&format!(
                r#"<g transform="translate({},0)">"#,
                format_coord(offset)
            ));
        } else {
            doc.open("<g>");
        }

        let rows = state.lines.len().max(state.styles.len());
        for row in 0..rows {
            match tracks.iter().find(|track| track.row == row) {
                None => self.emit_row(doc, ctx, state, row, 0, usize::MAX),
                Some(track) => {
                    let animated = track.prefix_cols..track.prefix_cols + track.steps;
                    self.emit_row(doc, ctx, state, row, 0, animated.start);
                    doc.open(&format!(
                        r#"<g clip-path="url(#{})">"#,
                        ctx.scheme.clip(track.index)
                    ));
                    self.emit_row(doc, ctx, state, row, animated.start, animated.end);
                    doc.close("g");
                    self.emit_row(doc, ctx, state, row, animated.end, usize::MAX);
                }
            }
        }

        doc.close("g");
    }

    /// Emit one row's background rectangles and text runs, restricted to
    /// the column range `[col_start, col_end)`.
    fn emit_row(
        &self,
        doc: &mut DocWriter,
        ctx: &RenderContext,
        state: &TerminalState,
        row: usize,
        col_start: usize,
        col_end: usize,
    ) {
        let chars: Vec<char> = state.line(row).chars().collect();
        let text_end = col_end.min(chars.len());
        let style_end = col_end.min(state.style_cols(row));
        let cursor_here = state.cursor_row == row
            && state.cursor_col >= col_start
            && state.cursor_col < col_end;

        self.emit_backgrounds(doc, ctx, state, row, col_start, style_end);

        let mut body = String::new();
        if cursor_here {
            self.emit_text_runs(&mut body, ctx, state, row, &chars, col_start, state.cursor_col);
            self.emit_cursor(&mut body, ctx, state);
            self.emit_text_runs(&mut body, ctx, state, row, &chars, state.cursor_col + 1, text_end);
        } else {
            self.emit_text_runs(&mut body, ctx, state, row, &chars, col_start, text_end);
        }
        if body.is_empty() {
            return;
        }

        let baseline = row as f64 * ctx.cell.height + self.options.font_size;
        doc.line(&format!(
            r#"<text y="{}" xml:space="preserve">{body}</text>"#,
            format_coord(baseline)
        ));
    }

    /// Emit rectangles behind runs of identically background-colored cells.
    fn emit_backgrounds(
        &self,
        doc: &mut DocWriter,
        ctx: &RenderContext,
        state: &TerminalState,
        row: usize,
        col_start: usize,
        col_end: usize,
    ) {
        let mut col = col_start;
        while col < col_end {
            let Some(style) = state.style_at(row, col) else {
                col += 1;
                continue;
            };
            if !style.has_background() {
                col += 1;
                continue;
            }
            let run_start = col;
            let color = &style.background;
            while col < col_end
                && state
                    .style_at(row, col)
                    .map_or(false, |s| s.background == *color)
            {
                col += 1;
            }
            if let Some(index) = ctx.palette.bg_index(&self.options.theme, color) {
                doc.line(&format!(
                    r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
                    ctx.scheme.bg(index),
                    format_coord(run_start as f64 * ctx.cell.width),
                    format_coord(row as f64 * ctx.cell.height),
                    format_coord((col - run_start) as f64 * ctx.cell.width),
                    format_coord(ctx.cell.height),
                ));
            }
        }
    }

    /// Append tspans for `[col_start, col_end)`, one per run of identically
    /// styled characters. Unstyled all-blank runs are skipped; positioning
    /// is absolute so the gap costs nothing.
    fn emit_text_runs(
        &self,
        body: &mut String,
        ctx: &RenderContext,
        state: &TerminalState,
        row: usize,
        chars: &[char],
        col_start: usize,
        col_end: usize,
    ) {
        let plain = CharStyle::default();
        let col_end = col_end.min(chars.len());
        let mut col = col_start;
        while col < col_end {
            let style = state.style_at(row, col).unwrap_or(&plain);
            let run_start = col;
            while col < col_end && state.style_at(row, col).unwrap_or(&plain) == style {
                col += 1;
            }

            let classes = self.run_classes(ctx, style);
            let text: String = chars[run_start..col].iter().collect();
            if classes.is_empty() && text.trim().is_empty() {
                continue;
            }

            body.push_str(&format!(
                r#"<tspan x="{}"{}>"#,
                format_coord(run_start as f64 * ctx.cell.width),
                class_attr(&classes)
            ));
            escape_text_into(body, &text);
            body.push_str("</tspan>");
        }
    }

    /// Append the cursor glyph tspan, active or blinking.
    fn emit_cursor(&self, body: &mut String, ctx: &RenderContext, state: &TerminalState) {
        let mut classes = ctx.scheme.cursor().to_string();
        let mut phase = String::new();
        if !state.cursor_active && self.options.cursor_blink {
            classes.push(' ');
            classes.push_str(ctx.scheme.blink());
            let offset = state.idle_time % 1.0;
            if offset > 0.0 {
                phase = format!(r#" style="animation-delay:-{}s""#, format_secs(offset));
            }
        }

        body.push_str(&format!(
            r#"<tspan x="{}" class="{classes}"{phase}>"#,
            format_coord(state.cursor_col as f64 * ctx.cell.width)
        ));
        escape_text_into(body, &state.cursor_glyph.to_string());
        body.push_str("</tspan>");
    }

    fn run_classes(&self, ctx: &RenderContext, style: &CharStyle) -> String {
        let mut classes: Vec<String> = Vec::new();
        if !style.foreground.is_empty() {
            if let Some(index) = ctx.palette.fg_index(&self.options.theme, &style.foreground) {
                classes.push(ctx.scheme.fg(index));
            }
        }
        if style.bold {
            classes.push(ctx.scheme.bold().to_string());
        }
        if style.italic {
            classes.push(ctx.scheme.italic().to_string());
        }
        if style.underline {
            classes.push(ctx.scheme.underline().to_string());
        }
        classes.join(" ")
    }
}

/// Map state indices to render slots, skipping states nothing references.
fn rendered_slots(states: &StateTimeline, plan: &Timeline) -> Vec<Option<usize>> {
    let mut referenced = vec![false; states.state_count()];
    for stop in &plan.stops {
        referenced[stop.state_index] = true;
    }
    for track in &plan.tracks {
        referenced[track.host_state] = true;
    }

    let mut slots = vec![None; states.state_count()];
    let mut next = 0;
    for (index, seen) in referenced.iter().enumerate() {
        if *seen {
            slots[index] = Some(next);
            next += 1;
        }
    }
    slots
}

fn class_attr(classes: &str) -> String {
    if classes.is_empty() {
        String::new()
    } else {
        format!(r#" class="{classes}""#)
    }
}
