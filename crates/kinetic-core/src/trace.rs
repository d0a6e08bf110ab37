//! Gesture traces and headless replay
//!
//! A trace is a TOML file of timestamped inputs. The replayer feeds them to a
//! fresh controller on a synthetic clock and records one `Frame` per tick, so
//! a recorded gesture always produces the same output.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::ScrollConfig;
use crate::controller::{InteractionState, Point, ScrollInteractionController};
use crate::motion::timing;
use crate::{Error, Result};

/// Viewport and content sizes the trace was recorded against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceLayout {
    pub viewport: f64,
    pub content: f64,
}

/// One input event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceInput {
    Down {
        x: f64,
        y: f64,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up,
    /// The pointer was lost without a release
    Cancel,
    Wheel {
        delta: i32,
    },
    ScrollToOffset {
        offset: f64,
        #[serde(default = "default_animate")]
        animate: bool,
    },
    ScrollToPage {
        index: i64,
        #[serde(default = "default_animate")]
        animate: bool,
    },
}

fn default_animate() -> bool {
    true
}

/// An input and the time it happened, relative to the start of the trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    pub at_ms: u64,
    #[serde(flatten)]
    pub input: TraceInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureTrace {
    pub layout: TraceLayout,
    /// Overrides the caller's scroll configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ScrollConfig>,
    #[serde(default)]
    pub steps: Vec<TraceStep>,
}

impl GestureTrace {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a trace
    pub fn from_toml(content: &str) -> Result<Self> {
        let trace: Self = toml::from_str(content).map_err(|e| Error::Trace(e.to_string()))?;
        trace.validate()?;
        Ok(trace)
    }

    fn validate(&self) -> Result<()> {
        if let Some(pair) = self.steps.windows(2).find(|pair| pair[1].at_ms < pair[0].at_ms) {
            return Err(Error::Trace(format!(
                "step at {} ms comes after a step at {} ms",
                pair[1].at_ms, pair[0].at_ms
            )));
        }
        Ok(())
    }

    /// Time of the last input
    pub fn duration_ms(&self) -> u64 {
        self.steps.last().map_or(0, |step| step.at_ms)
    }
}

/// Controller output after one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub at_ms: f64,
    pub offset: f64,
    pub state: InteractionState,
    pub page: i64,
}

/// Frame rate and stopping rule for replays
#[derive(Debug, Clone, Copy)]
pub struct Replayer {
    fps: u32,
    settle_limit_ms: u64,
}

impl Default for Replayer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl Replayer {
    /// Default time allowed after the last input for the motion to settle
    pub const DEFAULT_SETTLE_LIMIT_MS: u64 = 10_000;

    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1),
            settle_limit_ms: Self::DEFAULT_SETTLE_LIMIT_MS,
        }
    }

    pub fn with_settle_limit(mut self, settle_limit_ms: u64) -> Self {
        self.settle_limit_ms = settle_limit_ms;
        self
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Time between frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }

    /// Start replaying `trace`; `config` applies unless the trace carries its own
    pub fn session<'a>(&self, trace: &'a GestureTrace, config: &ScrollConfig) -> Replay<'a> {
        let config = trace.config.clone().unwrap_or_else(|| config.clone());
        let mut controller = ScrollInteractionController::new(config);
        let base = Instant::now();
        controller.set_layout(trace.layout.viewport, trace.layout.content);

        tracing::debug!(
            steps = trace.steps.len(),
            fps = self.fps,
            viewport = trace.layout.viewport,
            content = trace.layout.content,
            "Starting replay"
        );

        Replay {
            controller,
            steps: &trace.steps,
            next_step: 0,
            base,
            frame_ms: 1000.0 / f64::from(self.fps),
            frame_index: 0,
            deadline_ms: (trace.duration_ms() + self.settle_limit_ms) as f64,
            finished: false,
        }
    }

    /// Replay `trace` to the end and collect every frame
    pub fn run(&self, trace: &GestureTrace, config: &ScrollConfig) -> Vec<Frame> {
        self.session(trace, config).collect()
    }
}

/// A replay in progress, yielding one frame per tick
///
/// Ends after the frame where every step has run and the controller is idle,
/// or once the settle limit has passed.
#[derive(Debug)]
pub struct Replay<'a> {
    controller: ScrollInteractionController,
    steps: &'a [TraceStep],
    next_step: usize,
    base: Instant,
    frame_ms: f64,
    frame_index: u64,
    deadline_ms: f64,
    finished: bool,
}

impl Replay<'_> {
    fn instant(&self, at_ms: f64) -> Instant {
        self.base + timing::millis(at_ms)
    }

    fn apply(&mut self, step: TraceStep) {
        let now = self.base + Duration::from_millis(step.at_ms);
        let controller = &mut self.controller;
        match step.input {
            TraceInput::Down { x, y } => controller.pointer_down(Point::new(x, y), now),
            TraceInput::Move { x, y } => controller.pointer_move(Point::new(x, y), now),
            TraceInput::Up => controller.pointer_up(now),
            TraceInput::Cancel => controller.pointer_cancel(now),
            TraceInput::Wheel { delta } => controller.wheel_at(delta, now),
            TraceInput::ScrollToOffset { offset, animate } => {
                controller.scroll_to_offset_at(offset, animate, now)
            }
            TraceInput::ScrollToPage { index, animate } => {
                controller.scroll_to_page_at(index, animate, now)
            }
        }
    }
}

impl Iterator for Replay<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.finished {
            return None;
        }

        let at_ms = self.frame_index as f64 * self.frame_ms;
        self.frame_index += 1;

        // Input first, then the tick
        while let Some(&step) = self.steps.get(self.next_step) {
            if step.at_ms as f64 > at_ms {
                break;
            }
            self.apply(step);
            self.next_step += 1;
        }

        let now = self.instant(at_ms);
        self.controller.tick(now);

        let frame = Frame {
            at_ms,
            offset: self.controller.rendered_offset(),
            state: self.controller.state(),
            page: self.controller.current_page(),
        };

        let inputs_done = self.next_step >= self.steps.len();
        let settled = inputs_done
            && frame.state == InteractionState::Idle
            && !self.controller.is_animating();
        if settled || at_ms >= self.deadline_ms {
            if !settled {
                tracing::warn!(at_ms, "Replay stopped before the motion settled");
            }
            self.finished = true;
        }

        Some(frame)
    }
}
