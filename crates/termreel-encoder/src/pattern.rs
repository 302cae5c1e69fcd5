//! Typing and deleting run detection over consecutive frames.
//!
//! A left-to-right scan tries to grow a typing run, then a deleting run,
//! and otherwise emits a one-frame static pattern. The result always
//! partitions the frame range: no gaps, no overlaps. Bulk changes
//! (pastes, full redraws, non-prefix edits) deliberately stay static.

use tracing::debug;

use termreel_core::Frame;

use crate::state::TerminalState;

/// Kind of motion a pattern captures.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternKind {
    /// No compressible motion; exactly one frame
    Static,
    /// Characters appended left to right on one row
    Typing {
        /// The appended text
        text: String,
        /// Column where the first appended character lands
        start_col: usize,
    },
    /// Characters removed right to left from one row
    Deleting {
        /// The removed text
        text: String,
        /// Number of removed characters
        count: usize,
    },
}

/// A detected run of consecutive frames sharing one motion.
#[derive(Debug, Clone)]
pub struct FramePattern {
    /// What the run does
    pub kind: PatternKind,
    /// First frame index (inclusive)
    pub start_frame: usize,
    /// Last frame index (inclusive)
    pub end_frame: usize,
    /// Timestamp of the first frame
    pub start_time: f64,
    /// Timestamp of the last frame
    pub end_time: f64,
    /// Row the motion happens on
    pub row: usize,
    /// Snapshot of the first frame
    pub initial_state: TerminalState,
    /// Snapshot of the last frame
    pub final_state: TerminalState,
}

impl FramePattern {
    /// Number of frames the pattern spans.
    pub fn frame_count(&self) -> usize {
        self.end_frame - self.start_frame + 1
    }

    /// Check if this is a plain static pattern.
    pub fn is_static(&self) -> bool {
        matches!(self.kind, PatternKind::Static)
    }
}

/// Scans frames for typing and deleting runs.
///
/// The thresholds bound human input rates. A step growing more than
/// `max_typing_step` characters reads as a paste, a step shrinking more
/// than `max_deleting_step` as a line kill; both stay static.
pub struct PatternDetector {
    /// Minimum frames in a typing run
    pub min_typing_frames: usize,
    /// Minimum appended characters for a typing run
    pub min_typing_chars: usize,
    /// Maximum characters appended per step
    pub max_typing_step: usize,
    /// Maximum cursor column regression per step
    pub max_cursor_regress: usize,
    /// Minimum frames in a deleting run
    pub min_deleting_frames: usize,
    /// Minimum removed characters for a deleting run
    pub min_deleting_chars: usize,
    /// Maximum characters removed per step
    pub max_deleting_step: usize,
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self {
            min_typing_frames: 3,
            min_typing_chars: 2,
            max_typing_step: 15,
            max_cursor_regress: 1,
            min_deleting_frames: 2,
            min_deleting_chars: 2,
            max_deleting_step: 10,
        }
    }
}

impl PatternDetector {
    /// Create a detector with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition `frames` into typing, deleting and static patterns.
    ///
    /// Every frame index lands in exactly one pattern, in order. Runs are
    /// grown greedily; a run failing its minimum gates falls back to a
    /// single static frame and the scan resumes right after it.
    pub fn detect(&self, frames: &[Frame]) -> Vec<FramePattern> {
        let mut patterns = Vec::new();
        let mut start = 0;
        while start < frames.len() {
            if let Some(end) = self.typing_run_end(frames, start) {
                patterns.push(self.build_typing(frames, start, end));
                start = end + 1;
            } else if let Some(end) = self.deleting_run_end(frames, start) {
                patterns.push(self.build_deleting(frames, start, end));
                start = end + 1;
            } else {
                patterns.push(Self::build_static(frames, start));
                start += 1;
            }
        }

        let compressible = patterns.iter().filter(|p| !p.is_static()).count();
        debug!(
            frames = frames.len(),
            patterns = patterns.len(),
            compressible,
            "detected patterns"
        );
        patterns
    }

    /// Grow a typing run from `start`; `None` if it fails the gates.
    fn typing_run_end(&self, frames: &[Frame], start: usize) -> Option<usize> {
        let row = frames[start].cursor_row;
        let mut end = start;
        while end + 1 < frames.len() && self.extends_typing(&frames[end], &frames[end + 1], row) {
            end += 1;
        }

        if end - start + 1 < self.min_typing_frames {
            return None;
        }
        let first = frames[start].line(row);
        let last = frames[end].line(row);
        let appended = chars_len(last) - common_prefix_len(first, last);
        if appended < self.min_typing_chars {
            return None;
        }
        Some(end)
    }

    /// Grow a deleting run from `start`; `None` if it fails the gates.
    fn deleting_run_end(&self, frames: &[Frame], start: usize) -> Option<usize> {
        let row = frames[start].cursor_row;
        let mut end = start;
        while end + 1 < frames.len() && self.extends_deleting(&frames[end], &frames[end + 1], row)
        {
            end += 1;
        }

        if end - start + 1 < self.min_deleting_frames {
            return None;
        }
        let first = frames[start].line(row);
        let last = frames[end].line(row);
        let removed = chars_len(first) - chars_len(last);
        if removed < self.min_deleting_chars {
            return None;
        }
        Some(end)
    }

    /// Check whether `next` extends a typing run on `row`.
    ///
    /// The new text must start with the old text (equal text is a pause and
    /// keeps the run alive), growth is bounded per step, the cursor may
    /// settle back at most `max_cursor_regress` columns, and every other
    /// row must hold still.
    fn extends_typing(&self, prev: &Frame, next: &Frame, row: usize) -> bool {
        if prev.cursor_row != row || next.cursor_row != row {
            return false;
        }
        if next.cursor_col + self.max_cursor_regress < prev.cursor_col {
            return false;
        }
        let old = prev.line(row);
        let new = next.line(row);
        if !new.starts_with(old) {
            return false;
        }
        if chars_len(new) - chars_len(old) > self.max_typing_step {
            return false;
        }
        rows_stable(prev, next, row)
    }

    /// Check whether `next` extends a deleting run on `row`.
    ///
    /// The new text must be a strict prefix of the old text, the shrink is
    /// bounded per step, and every other row must hold still.
    fn extends_deleting(&self, prev: &Frame, next: &Frame, row: usize) -> bool {
        if prev.cursor_row != row || next.cursor_row != row {
            return false;
        }
        let old = prev.line(row);
        let new = next.line(row);
        if new.len() >= old.len() || !old.starts_with(new) {
            return false;
        }
        if chars_len(old) - chars_len(new) > self.max_deleting_step {
            return false;
        }
        rows_stable(prev, next, row)
    }

    fn build_typing(&self, frames: &[Frame], start: usize, end: usize) -> FramePattern {
        let row = frames[start].cursor_row;
        let first = frames[start].line(row);
        let last = frames[end].line(row);
        let prefix = common_prefix_len(first, last);
        let text: String = last.chars().skip(prefix).collect();

        FramePattern {
            kind: PatternKind::Typing {
                text,
                start_col: prefix,
            },
            start_frame: start,
            end_frame: end,
            start_time: frames[start].timestamp,
            end_time: frames[end].timestamp,
            row,
            initial_state: TerminalState::snapshot(&frames[start]),
            final_state: TerminalState::snapshot(&frames[end]),
        }
    }

    fn build_deleting(&self, frames: &[Frame], start: usize, end: usize) -> FramePattern {
        let row = frames[start].cursor_row;
        let first = frames[start].line(row);
        let last = frames[end].line(row);
        let surviving = chars_len(last);
        let text: String = first.chars().skip(surviving).collect();
        let count = chars_len(&text);

        FramePattern {
            kind: PatternKind::Deleting { text, count },
            start_frame: start,
            end_frame: end,
            start_time: frames[start].timestamp,
            end_time: frames[end].timestamp,
            row,
            initial_state: TerminalState::snapshot(&frames[start]),
            final_state: TerminalState::snapshot(&frames[end]),
        }
    }

    fn build_static(frames: &[Frame], index: usize) -> FramePattern {
        let frame = &frames[index];
        let state = TerminalState::snapshot(frame);
        FramePattern {
            kind: PatternKind::Static,
            start_frame: index,
            end_frame: index,
            start_time: frame.timestamp,
            end_time: frame.timestamp,
            row: frame.cursor_row,
            initial_state: state.clone(),
            final_state: state,
        }
    }
}

/// Length of the common prefix of two strings, in characters.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count()
}

fn chars_len(s: &str) -> usize {
    s.chars().count()
}

/// Check that every row other than `row` is unchanged between two frames,
/// allowing the row count itself to drift by at most one.
fn rows_stable(prev: &Frame, next: &Frame, row: usize) -> bool {
    let prev_rows = prev.row_count();
    let next_rows = next.row_count();
    if prev_rows.abs_diff(next_rows) > 1 {
        return false;
    }
    let shared = prev_rows.min(next_rows);
    for r in 0..shared {
        if r == row {
            continue;
        }
        if prev.lines[r] != next.lines[r] {
            return false;
        }
    }
    true
}
