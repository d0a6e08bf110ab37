//! Where a release, wheel step or page request should land
//!
//! Pure functions over offsets. Offsets grow negative as content advances,
//! so page `n` sits at offset `-n * page_size`.

use crate::config::{ScrollConfig, ScrollMode};
use crate::motion::CubicBezierEase;

use super::types::Bounds;

/// Why a release animation was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationKind {
    /// Released outside the bounds, returning to the nearest one
    SpringBack,
    /// Free-mode projection along the release velocity
    Fling,
    /// Paging-mode snap to a whole page
    PageSnap,
}

/// Target, timing and curve for a release animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Destination {
    pub target: f64,
    pub duration_ms: f64,
    pub curve: CubicBezierEase,
    pub kind: DestinationKind,
}

/// Page whose origin is nearest to `offset`, ties go to the even page
#[inline]
pub fn page_index(offset: f64, page_size: f64) -> i64 {
    (-offset / page_size).round_ties_even() as i64
}

/// Offset at which page `index` starts
#[inline]
pub fn page_offset(index: i64, page_size: f64) -> f64 {
    // Subtracting from +0.0 keeps page 0 at +0.0 rather than -0.0
    0.0 - index as f64 * page_size
}

/// Index of the last page that `content` units can fill
pub fn last_page_index(content: f64, page_size: f64) -> i64 {
    ((content / page_size).ceil() - 1.0).max(0.0) as i64
}

/// Page a paging release should settle on
///
/// Rounds to the nearest page, then lets a fast release advance one page in
/// its direction of travel, unless rounding already picked that neighbour.
/// Negative velocity moves content towards later pages.
pub fn snap_page(current: f64, velocity: f64, page_size: f64, fling_threshold: f64) -> i64 {
    let fraction = -current / page_size;
    let mut target = (fraction + 0.5).floor() as i64;

    if velocity.abs() > fling_threshold {
        if velocity < 0.0 {
            if target == fraction.floor() as i64 {
                target += 1;
            }
        } else if target == fraction.ceil() as i64 {
            target -= 1;
        }
    }

    target
}

/// Decide where a drag released at rendered offset `current` goes
pub fn release(
    current: f64,
    velocity: f64,
    bounds: Bounds,
    viewport_size: f64,
    config: &ScrollConfig,
) -> Destination {
    // Boundary correction wins over velocity
    if current > bounds.max || current < bounds.min {
        return Destination {
            target: bounds.clamp(current),
            duration_ms: config.spring_duration_ms,
            curve: config.spring,
            kind: DestinationKind::SpringBack,
        };
    }

    let (raw_target, kind) = match config.mode {
        ScrollMode::Free => (
            current + velocity * config.fling_momentum_factor,
            DestinationKind::Fling,
        ),
        ScrollMode::Paging => {
            let page_size = config.effective_page_size(viewport_size);
            let page = snap_page(current, velocity, page_size, config.fling_velocity_threshold);
            (page_offset(page, page_size), DestinationKind::PageSnap)
        }
    };

    let target = bounds.clamp(raw_target);
    Destination {
        target,
        duration_ms: config.fling_duration_ms(target - current),
        curve: config.friction,
        kind,
    }
}

/// Next wheel target after a notch of `delta`
///
/// `previous` is the last wheel target, so quick notches accumulate instead
/// of restarting from wherever the animation currently is. Positive deltas
/// (wheel up) move towards the start.
pub fn wheel_target(
    previous: f64,
    delta: i32,
    bounds: Bounds,
    viewport_size: f64,
    config: &ScrollConfig,
) -> f64 {
    let target = match config.mode {
        ScrollMode::Free => {
            let step = if delta > 0 {
                config.wheel_step
            } else {
                -config.wheel_step
            };
            previous + step
        }
        ScrollMode::Paging => {
            let page_size = config.effective_page_size(viewport_size);
            let mut index = page_index(previous, page_size);
            if delta < 0 {
                index += 1;
            } else {
                index -= 1;
            }
            page_offset(index, page_size).round()
        }
    };
    bounds.clamp(target)
}
