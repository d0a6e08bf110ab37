//! L4 Atomic Layer: Release velocity estimation
//!
//! Keeps a short, time-ordered history of positions and fits a straight line
//! through it with ordinary least squares. The slope of that line is the
//! velocity. A regression over the whole window absorbs single-sample jitter
//! and uneven frame pacing far better than a two-point difference.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Samples older than this (relative to the newest one) are discarded
pub const HORIZON: Duration = Duration::from_millis(150);

/// Fewer samples than this produce a velocity of zero
const MIN_SAMPLE_POINTS: usize = 2;

/// Denominators below this magnitude mean all timestamps coincide
const DENOMINATOR_EPSILON: f64 = 1e-9;

/// One recorded position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: Instant,
    pub position: f64,
}

/// Least-squares velocity tracker over a 150 ms window
///
/// Call `clear()` on pointer-down, `add_sample()` on every move and
/// `compute_velocity()` on release. Velocity is in position units per second.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(32),
        }
    }

    /// Discard all samples
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of retained samples
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Record a position and prune everything outside the window
    pub fn add_sample(&mut self, position: f64, now: Instant) {
        self.samples.push_back(Sample {
            timestamp: now,
            position,
        });
        self.prune(now);
    }

    /// Estimate velocity from the retained samples
    pub fn compute_velocity(&self) -> f64 {
        let count = self.samples.len();
        if count < MIN_SAMPLE_POINTS {
            return 0.0;
        }

        // Rebase time on the oldest sample for numeric stability
        let origin = self.samples[0].timestamp;
        let n = count as f64;

        let mut sum_t = 0.0;
        let mut sum_y = 0.0;
        let mut sum_ty = 0.0;
        let mut sum_tt = 0.0;

        for sample in &self.samples {
            let t = sample.timestamp.saturating_duration_since(origin).as_secs_f64();
            let y = sample.position;
            sum_t += t;
            sum_y += y;
            sum_ty += t * y;
            sum_tt += t * t;
        }

        let mean_t = sum_t / n;
        let mean_y = sum_y / n;

        let numerator = sum_ty - n * mean_t * mean_y;
        let denominator = sum_tt - n * mean_t * mean_t;

        if denominator.abs() < DENOMINATOR_EPSILON {
            return 0.0;
        }

        numerator / denominator
    }

    /// Estimate velocity as seen at `now`
    ///
    /// Samples that fell out of the window since the last move are dropped
    /// first, so a pointer held still before release reports zero.
    pub fn compute_velocity_at(&mut self, now: Instant) -> f64 {
        self.prune(now);
        self.compute_velocity()
    }

    /// Prefix trim: samples are time-ordered, so stale ones are at the front
    fn prune(&mut self, now: Instant) {
        let Some(deadline) = now.checked_sub(HORIZON) else {
            return;
        };
        while self
            .samples
            .front()
            .is_some_and(|sample| sample.timestamp < deadline)
        {
            self.samples.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn test_constant_rate_velocity() {
        let base = Instant::now();
        let mut tracker = VelocityTracker::new();
        for i in 0..10u64 {
            tracker.add_sample(i as f64 * 10.0, at(base, i * 10));
        }
        let velocity = tracker.compute_velocity();
        assert!((velocity - 1000.0).abs() < 1.0, "velocity = {}", velocity);
    }

    #[test]
    fn test_negative_direction() {
        let base = Instant::now();
        let mut tracker = VelocityTracker::new();
        for i in 0..6u64 {
            tracker.add_sample(-(i as f64) * 8.0, at(base, i * 16));
        }
        let velocity = tracker.compute_velocity();
        assert!((velocity + 500.0).abs() < 1.0, "velocity = {}", velocity);
    }

    #[test]
    fn test_fewer_than_two_samples() {
        let mut tracker = VelocityTracker::new();
        assert_eq!(tracker.compute_velocity(), 0.0);
        tracker.add_sample(42.0, Instant::now());
        assert_eq!(tracker.compute_velocity(), 0.0);
    }

    #[test]
    fn test_coincident_timestamps() {
        let now = Instant::now();
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0.0, now);
        tracker.add_sample(50.0, now);
        tracker.add_sample(100.0, now);
        assert_eq!(tracker.compute_velocity(), 0.0);
    }

    #[test]
    fn test_prunes_outside_horizon() {
        let base = Instant::now();
        let mut tracker = VelocityTracker::new();
        // Slow drift that should be forgotten
        tracker.add_sample(0.0, at(base, 0));
        tracker.add_sample(1.0, at(base, 100));
        // Fast movement 300ms later
        tracker.add_sample(0.0, at(base, 400));
        tracker.add_sample(20.0, at(base, 410));
        tracker.add_sample(40.0, at(base, 420));

        assert_eq!(tracker.len(), 3);
        assert!((tracker.compute_velocity() - 2000.0).abs() < 1.0);
    }

    #[test]
    fn test_sample_exactly_on_horizon_is_kept() {
        let base = Instant::now();
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0.0, at(base, 0));
        tracker.add_sample(15.0, at(base, 150));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_held_still_before_release() {
        let base = Instant::now();
        let mut tracker = VelocityTracker::new();
        for i in 0..5u64 {
            tracker.add_sample(i as f64 * 10.0, at(base, i * 10));
        }
        assert!(tracker.compute_velocity() > 900.0);
        assert_eq!(tracker.compute_velocity_at(at(base, 500)), 0.0);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(1.0, Instant::now());
        tracker.clear();
        assert!(tracker.is_empty());
    }
}
