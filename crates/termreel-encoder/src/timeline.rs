//! Master timeline assembly from deduplicated states and detected patterns.
//!
//! The coarse stop list would replay every keystroke as its own state
//! switch. The builder folds each compressible pattern into a single
//! parked master stop plus one sub-animation track, so a sixty-keystroke
//! command line costs one master switch and one stepped clip animation
//! instead of sixty document copies.

use tracing::debug;

use termreel_core::RenderOptions;

use crate::pattern::{FramePattern, PatternKind};
use crate::state::{collapse_stops, KeyframeStop, StateTimeline};

/// How a pattern track moves its clip window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    /// Clip grows from zero to full width (typing)
    Reveal,
    /// Clip shrinks from full width to zero (deleting)
    Conceal,
}

/// A per-pattern sub-animation slot on the master cycle.
#[derive(Debug, Clone)]
pub struct PatternTrack {
    /// Stable id used for animation and clip naming
    pub index: usize,
    /// Reveal or conceal
    pub kind: TrackKind,
    /// State group hosting the animated row
    pub host_state: usize,
    /// Row the animation runs on
    pub row: usize,
    /// Columns before the animated region
    pub prefix_cols: usize,
    /// Animated character count; each one is a step
    pub steps: usize,
    /// The text being revealed or concealed
    pub text: String,
    /// Window start on the master cycle, in percent
    pub start_percent: f64,
    /// Window end on the master cycle, in percent
    pub end_percent: f64,
}

/// Emission-ready animation plan.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    /// Master cycle length in seconds, after playback speed
    pub duration: f64,
    /// Seconds skipped at the start of the first cycle (loop offset)
    pub delay: f64,
    /// Master stops with pattern interiors folded away
    pub stops: Vec<KeyframeStop>,
    /// Sub-animations, at most one per compressible pattern
    pub tracks: Vec<PatternTrack>,
}

impl Timeline {
    /// Total keyframe stops across the master track and all sub-animations.
    /// Drives the percent precision of everything emitted.
    pub fn stop_count(&self) -> usize {
        self.stops.len() + self.tracks.len() * 2
    }
}

/// Combines deduplicated states and detected patterns into a render plan.
pub struct TimelineBuilder {
    duration: f64,
    speed: f64,
    loop_offset: f64,
}

impl TimelineBuilder {
    /// Create a builder from resolved options.
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            duration: if options.duration > 0.0 {
                options.duration
            } else {
                1.0
            },
            speed: if options.playback_speed > 0.0 {
                options.playback_speed
            } else {
                1.0
            },
            loop_offset: options.loop_offset.max(0.0),
        }
    }

    /// Assemble the final timeline.
    ///
    /// Frames inside a typing run resolve to the run's final state (the
    /// reveal animation supplies the intermediate text); frames inside a
    /// deleting run hold the run's initial state until the run ends. The
    /// remapped indices then collapse into master stops exactly like the
    /// coarse pass, so a pattern-free capture reproduces its coarse stops.
    pub fn build(&self, timeline: &StateTimeline, patterns: &[FramePattern]) -> Timeline {
        let cycle = self.duration / self.speed;
        let total = timeline.frame_states.len();
        if total == 0 {
            return Timeline {
                duration: cycle,
                ..Default::default()
            };
        }

        let mut effective = timeline.frame_states.clone();
        for pattern in patterns {
            match pattern.kind {
                PatternKind::Typing { .. } => {
                    let parked = timeline.frame_states[pattern.end_frame];
                    for slot in &mut effective[pattern.start_frame..=pattern.end_frame] {
                        *slot = parked;
                    }
                }
                PatternKind::Deleting { .. } => {
                    let parked = timeline.frame_states[pattern.start_frame];
                    for slot in &mut effective[pattern.start_frame..pattern.end_frame] {
                        *slot = parked;
                    }
                }
                PatternKind::Static => {}
            }
        }
        let stops = collapse_stops(&effective);

        let tracks = self.assemble_tracks(timeline, patterns);
        let delay = self.loop_delay(total, cycle);

        debug!(
            stops = stops.len(),
            tracks = tracks.len(),
            cycle,
            delay,
            "assembled timeline"
        );

        Timeline {
            duration: cycle,
            delay,
            stops,
            tracks,
        }
    }

    /// Map compressible patterns onto cycle-percent windows.
    ///
    /// Window positions come from the pattern timestamps relative to the
    /// capture span, so a stretched or shortened configured duration moves
    /// playback speed, not event positions. A second track landing on the
    /// same state and row as an earlier one is dropped; its text simply
    /// shows unanimated.
    fn assemble_tracks(
        &self,
        timeline: &StateTimeline,
        patterns: &[FramePattern],
    ) -> Vec<PatternTrack> {
        let origin = patterns.first().map_or(0.0, |p| p.start_time);
        let span = patterns.last().map_or(0.0, |p| p.end_time) - origin;
        if span <= 0.0 {
            return Vec::new();
        }

        let mut tracks: Vec<PatternTrack> = Vec::new();
        for pattern in patterns {
            let (kind, host_state, prefix_cols, steps, text) = match &pattern.kind {
                PatternKind::Typing { text, start_col } => (
                    TrackKind::Reveal,
                    timeline.frame_states[pattern.end_frame],
                    *start_col,
                    text.chars().count(),
                    text.clone(),
                ),
                PatternKind::Deleting { text, count } => (
                    TrackKind::Conceal,
                    timeline.frame_states[pattern.start_frame],
                    pattern
                        .final_state
                        .line(pattern.row)
                        .chars()
                        .count(),
                    *count,
                    text.clone(),
                ),
                PatternKind::Static => continue,
            };

            let start_percent = (pattern.start_time - origin) / span * 100.0;
            let end_percent = (pattern.end_time - origin) / span * 100.0;
            if steps == 0 || end_percent <= start_percent {
                continue;
            }
            if tracks
                .iter()
                .any(|t| t.host_state == host_state && t.row == pattern.row)
            {
                continue;
            }

            tracks.push(PatternTrack {
                index: tracks.len(),
                kind,
                host_state,
                row: pattern.row,
                prefix_cols,
                steps,
                text,
                start_percent,
                end_percent,
            });
        }
        tracks
    }

    /// Convert the loop offset into seconds skipped on the first cycle.
    ///
    /// Offsets at or below 1.0 are a fraction of the cycle; larger values
    /// are absolute frame numbers.
    fn loop_delay(&self, total_frames: usize, cycle: f64) -> f64 {
        if self.loop_offset <= 0.0 {
            return 0.0;
        }
        let fraction = if self.loop_offset <= 1.0 {
            self.loop_offset
        } else {
            (self.loop_offset / total_frames as f64).min(1.0)
        };
        fraction * cycle
    }
}
