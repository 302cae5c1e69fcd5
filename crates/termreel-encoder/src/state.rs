//! Unique-state extraction and the coarse keyframe timeline.
//!
//! Consecutive captured frames are usually identical or differ only in
//! cursor phase. This pass collapses a frame sequence into a table of
//! unique states (content-addressed by hash) plus an ordered list of
//! keyframe stops saying when each state shows.

use std::collections::HashMap;

use tracing::debug;

use termreel_core::{CharStyle, Frame};

/// A deduplicated terminal snapshot, identified by its content hash.
///
/// The hash covers every line's full text (trailing spaces included), the
/// per-column style tuples, the cursor position and the cursor-activity
/// flag. It deliberately excludes the idle duration: idle periods of
/// different lengths collapse into one state.
#[derive(Debug, Clone)]
pub struct TerminalState {
    /// Visible lines
    pub lines: Vec<String>,
    /// Per-line style rows
    pub styles: Vec<Vec<CharStyle>>,
    /// Cursor column
    pub cursor_col: usize,
    /// Cursor row
    pub cursor_row: usize,
    /// Glyph used to draw the cursor
    pub cursor_glyph: char,
    /// Content hash
    pub hash: blake3::Hash,
    /// Whether the cursor had just moved or typed when captured
    pub cursor_active: bool,
    /// Seconds the cursor had been idle when captured
    pub idle_time: f64,
}

impl PartialEq for TerminalState {
    /// States are content-addressed: equality is hash equality.
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl TerminalState {
    /// Snapshot a frame with explicit cursor activity.
    pub fn new(frame: &Frame, cursor_active: bool, idle_time: f64) -> Self {
        Self {
            lines: frame.lines.clone(),
            styles: frame.styles.clone(),
            cursor_col: frame.cursor_col,
            cursor_row: frame.cursor_row,
            cursor_glyph: frame.cursor_glyph,
            hash: content_hash(frame, cursor_active),
            cursor_active,
            idle_time,
        }
    }

    /// Snapshot a frame as-is, treating the cursor as active.
    pub fn snapshot(frame: &Frame) -> Self {
        Self::new(frame, true, 0.0)
    }

    /// Get the text of a row, or an empty string for out-of-range rows.
    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map_or("", String::as_str)
    }

    /// Look up the style of a cell, independent of the line's text length.
    pub fn style_at(&self, row: usize, col: usize) -> Option<&CharStyle> {
        self.styles.get(row).and_then(|style_row| style_row.get(col))
    }

    /// Number of styled columns on a row.
    pub fn style_cols(&self, row: usize) -> usize {
        self.styles.get(row).map_or(0, Vec::len)
    }
}

/// One master-timeline stop: from `percent` onward, show `state_index`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeStop {
    /// Position on the cycle, 0 to 100
    pub percent: f64,
    /// Index into the unique-state table
    pub state_index: usize,
}

/// Output of deduplication: the unique-state table, the coarse stop list,
/// and the resolved state index for every input frame.
#[derive(Debug, Clone, Default)]
pub struct StateTimeline {
    /// Unique states in order of first appearance
    pub states: Vec<TerminalState>,
    /// Coarse keyframe stops, one per state change, terminated at 100%
    pub stops: Vec<KeyframeStop>,
    /// Resolved state index per input frame
    pub frame_states: Vec<usize>,
}

impl StateTimeline {
    /// Check if the capture produced no states at all.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of unique states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}

/// Collapses a frame sequence into unique states and keyframe stops.
pub struct StateDeduplicator;

impl Default for StateDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl StateDeduplicator {
    /// Create a new deduplicator.
    pub fn new() -> Self {
        Self
    }

    /// Deduplicate `frames` into a state timeline.
    ///
    /// The cursor counts as active on the first frame, whenever its
    /// position changed, and whenever its row's text changed under a
    /// stationary cursor. Hash-known frames reuse their state index; a
    /// stop is recorded only when the resolved index changes.
    pub fn dedupe(&self, frames: &[Frame]) -> StateTimeline {
        if frames.is_empty() {
            return StateTimeline::default();
        }

        let mut states: Vec<TerminalState> = Vec::new();
        let mut by_hash: HashMap<blake3::Hash, usize> = HashMap::new();
        let mut frame_states = Vec::with_capacity(frames.len());

        let mut last_active_at = frames[0].timestamp;
        let mut prev: Option<&Frame> = None;

        for frame in frames {
            let active = prev.map_or(true, |p| cursor_moved(p, frame));
            if active {
                last_active_at = frame.timestamp;
            }
            let idle_time = frame.timestamp - last_active_at;

            let state = TerminalState::new(frame, active, idle_time);
            let index = match by_hash.get(&state.hash) {
                Some(&known) => known,
                None => {
                    let next = states.len();
                    by_hash.insert(state.hash, next);
                    states.push(state);
                    next
                }
            };
            frame_states.push(index);
            prev = Some(frame);
        }

        let stops = collapse_stops(&frame_states);
        debug!(
            frames = frames.len(),
            states = states.len(),
            stops = stops.len(),
            "deduplicated capture"
        );

        StateTimeline {
            states,
            stops,
            frame_states,
        }
    }
}

/// Collapse per-frame state indices into ordered keyframe stops.
///
/// Percentages are index-based (`i / (total - 1) * 100`), a single frame
/// yields the 0%/100% pair, and the list always terminates at exactly 100%.
pub(crate) fn collapse_stops(frame_states: &[usize]) -> Vec<KeyframeStop> {
    let total = frame_states.len();
    if total == 0 {
        return Vec::new();
    }
    if total == 1 {
        return vec![
            KeyframeStop {
                percent: 0.0,
                state_index: frame_states[0],
            },
            KeyframeStop {
                percent: 100.0,
                state_index: frame_states[0],
            },
        ];
    }

    let span = (total - 1) as f64;
    let mut stops: Vec<KeyframeStop> = Vec::new();
    for (i, &state_index) in frame_states.iter().enumerate() {
        if stops.last().map(|stop| stop.state_index) != Some(state_index) {
            stops.push(KeyframeStop {
                percent: i as f64 / span * 100.0,
                state_index,
            });
        }
    }

    if stops.last().map_or(true, |stop| stop.percent < 100.0) {
        stops.push(KeyframeStop {
            percent: 100.0,
            state_index: frame_states[total - 1],
        });
    }
    stops
}

/// Check whether the cursor moved or typed between two frames.
fn cursor_moved(prev: &Frame, cur: &Frame) -> bool {
    if prev.cursor_col != cur.cursor_col || prev.cursor_row != cur.cursor_row {
        return true;
    }
    prev.line(prev.cursor_row) != cur.line(cur.cursor_row)
}

fn content_hash(frame: &Frame, cursor_active: bool) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();

    hasher.update(&(frame.lines.len() as u64).to_le_bytes());
    for line in &frame.lines {
        hasher.update(&(line.len() as u64).to_le_bytes());
        hasher.update(line.as_bytes());
    }

    hasher.update(&(frame.styles.len() as u64).to_le_bytes());
    for style_row in &frame.styles {
        hasher.update(&(style_row.len() as u64).to_le_bytes());
        for style in style_row {
            hasher.update(&(style.foreground.len() as u64).to_le_bytes());
            hasher.update(style.foreground.as_bytes());
            hasher.update(&(style.background.len() as u64).to_le_bytes());
            hasher.update(style.background.as_bytes());
            hasher.update(&[
                style.bold as u8,
                style.italic as u8,
                style.underline as u8,
            ]);
        }
    }

    hasher.update(&(frame.cursor_col as u64).to_le_bytes());
    hasher.update(&(frame.cursor_row as u64).to_le_bytes());
    hasher.update(&[cursor_active as u8]);

    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use termreel_core::Frame;

    fn frames_from(lines: &[&str]) -> Vec<Frame> {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| Frame::from_lines(&[line], i as f64 * 0.5))
            .collect()
    }

    /// Rebuild plain frames from a timeline's unique states.
    fn frames_of_states(timeline: &StateTimeline) -> Vec<Frame> {
        timeline
            .states
            .iter()
            .enumerate()
            .map(|(i, state)| {
                let mut frame = Frame {
                    lines: state.lines.clone(),
                    styles: state.styles.clone(),
                    cursor_col: state.cursor_col,
                    cursor_row: state.cursor_row,
                    timestamp: i as f64,
                    ..Default::default()
                };
                frame.cursor_glyph = state.cursor_glyph;
                frame
            })
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let timeline = StateDeduplicator::new().dedupe(&[]);
        assert!(timeline.is_empty());
        assert!(timeline.stops.is_empty());
        assert!(timeline.frame_states.is_empty());
    }

    #[test]
    fn test_single_frame_pins_both_ends() {
        let frames = [Frame::from_lines(&["$ "], 0.0)];
        let timeline = StateDeduplicator::new().dedupe(&frames);
        assert_eq!(timeline.state_count(), 1);
        assert_eq!(timeline.stops.len(), 2);
        assert_eq!(timeline.stops[0].percent, 0.0);
        assert_eq!(timeline.stops[1].percent, 100.0);
        assert_eq!(timeline.stops[0].state_index, 0);
        assert_eq!(timeline.stops[1].state_index, 0);
    }

    #[test]
    fn test_identical_frames_collapse() {
        let frames = vec![
            Frame::from_lines(&["$ ls"], 0.0),
            Frame::from_lines(&["$ ls"], 0.5),
            Frame::from_lines(&["$ ls"], 1.0),
        ];
        let timeline = StateDeduplicator::new().dedupe(&frames);
        // The first frame is active, the rest idle: two distinct states.
        assert_eq!(timeline.state_count(), 2);
        assert_eq!(timeline.frame_states, vec![0, 1, 1]);
    }

    #[test]
    fn test_first_frame_counts_as_active() {
        let frames = [Frame::from_lines(&["$ "], 0.0)];
        let timeline = StateDeduplicator::new().dedupe(&frames);
        assert!(timeline.states[0].cursor_active);
        assert_eq!(timeline.states[0].idle_time, 0.0);
    }

    #[test]
    fn test_idle_time_accumulates_from_last_movement() {
        let frames = vec![
            Frame::from_lines(&["$ "], 0.0),
            Frame::from_lines(&["$ "], 1.0),
            Frame::from_lines(&["$ "], 2.5),
        ];
        let timeline = StateDeduplicator::new().dedupe(&frames);
        // Frames 2 and 3 are idle with different idle times but identical
        // hashes, so they dedupe into one state carrying the first idle time.
        assert_eq!(timeline.state_count(), 2);
        assert!(timeline.states[0].cursor_active);
        assert!(!timeline.states[1].cursor_active);
        assert_eq!(timeline.states[1].idle_time, 1.0);
    }

    #[test]
    fn test_typing_under_stationary_cursor_is_active() {
        let mut before = Frame::from_lines(&["$ a"], 0.0);
        let mut after = Frame::from_lines(&["$ ab"], 0.5);
        // Pin the cursor so only the text moves
        before.cursor_col = 5;
        after.cursor_col = 5;
        assert!(cursor_moved(&before, &after));
    }

    #[test]
    fn test_stop_emitted_only_on_state_change() {
        let frames = vec![
            Frame::from_lines(&["a"], 0.0),
            Frame::from_lines(&["b"], 0.1),
            Frame::from_lines(&["b"], 0.2),
            Frame::from_lines(&["c"], 0.3),
            Frame::from_lines(&["c"], 0.4),
        ];
        let timeline = StateDeduplicator::new().dedupe(&frames);
        // Idle-flag changes also count as state changes; the "b" hold
        // produces an active "b" then an idle "b".
        let changes: Vec<usize> = timeline.stops.iter().map(|s| s.state_index).collect();
        for pair in changes.windows(2) {
            assert_ne!(pair[0], pair[1], "adjacent stops must differ");
        }
        assert_eq!(timeline.stops.last().unwrap().percent, 100.0);
    }

    #[test]
    fn test_timeline_terminates_at_exactly_100() {
        // Last frames are duplicates, so the last change sits below 100%
        // and a terminating stop gets appended.
        let frames = vec![
            Frame::from_lines(&["a"], 0.0),
            Frame::from_lines(&["b"], 0.1),
            Frame::from_lines(&["b"], 0.2),
            Frame::from_lines(&["b"], 0.3),
        ];
        let timeline = StateDeduplicator::new().dedupe(&frames);
        let last = timeline.stops.last().unwrap();
        assert_eq!(last.percent, 100.0);
        assert_eq!(last.state_index, *timeline.frame_states.last().unwrap());
    }

    #[test]
    fn test_collapse_stops_percent_positions() {
        let stops = collapse_stops(&[0, 0, 1, 1, 2]);
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0].percent, 0.0);
        assert_eq!(stops[1].percent, 50.0);
        assert_eq!(stops[2].percent, 100.0);
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let frames = frames_from(&["$ ", "$ g", "$ g", "$ go", "$ go", "$ "]);
        let first = StateDeduplicator::new().dedupe(&frames);

        let unique = frames_of_states(&first);
        let second = StateDeduplicator::new().dedupe(&unique);

        // A sequence of already-unique frames maps one state per frame.
        assert_eq!(second.state_count(), second.frame_states.len());
        let identity: Vec<usize> = (0..unique.len()).collect();
        assert_eq!(second.frame_states, identity);
    }

    #[test]
    fn test_hash_covers_text_and_trailing_spaces() {
        let a = TerminalState::snapshot(&Frame::from_lines(&["ls"], 0.0));
        let b = TerminalState::snapshot(&Frame::from_lines(&["ls "], 0.0));
        // from_lines parks the cursor at the end of the line, so also pin it
        let mut plain = Frame::from_lines(&["ls"], 0.0);
        let mut padded = Frame::from_lines(&["ls "], 0.0);
        plain.cursor_col = 0;
        padded.cursor_col = 0;
        assert_ne!(a.hash, b.hash);
        assert_ne!(
            TerminalState::snapshot(&plain).hash,
            TerminalState::snapshot(&padded).hash
        );
    }

    #[test]
    fn test_hash_covers_every_style_field() {
        let base = Frame::from_lines(&["x"], 0.0);
        let base_hash = TerminalState::snapshot(&base).hash;

        let variants = [
            CharStyle::with_foreground("#ff0000"),
            CharStyle::with_background("#00ff00"),
            CharStyle {
                bold: true,
                ..Default::default()
            },
            CharStyle {
                italic: true,
                ..Default::default()
            },
            CharStyle {
                underline: true,
                ..Default::default()
            },
        ];

        let mut seen = vec![base_hash];
        for style in variants {
            let mut frame = base.clone();
            frame.styles = vec![vec![style]];
            let hash = TerminalState::snapshot(&frame).hash;
            assert!(!seen.contains(&hash), "style field not hashed");
            seen.push(hash);
        }
    }

    #[test]
    fn test_hash_covers_cursor_position() {
        let base = Frame::from_lines(&["hello"], 0.0);

        let mut col_moved = base.clone();
        col_moved.cursor_col += 1;
        assert_ne!(
            TerminalState::snapshot(&base).hash,
            TerminalState::snapshot(&col_moved).hash
        );

        let mut row_moved = base.clone();
        row_moved.cursor_row += 1;
        assert_ne!(
            TerminalState::snapshot(&base).hash,
            TerminalState::snapshot(&row_moved).hash
        );
    }

    #[test]
    fn test_hash_ignores_idle_duration() {
        let frame = Frame::from_lines(&["$ "], 0.0);
        let short = TerminalState::new(&frame, false, 0.5);
        let long = TerminalState::new(&frame, false, 9.5);
        assert_eq!(short.hash, long.hash);
        assert_eq!(short, long);

        let active = TerminalState::new(&frame, true, 0.0);
        assert_ne!(active.hash, short.hash);
    }
}
