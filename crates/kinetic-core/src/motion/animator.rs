//! L3 Molecular Layer: Time-driven value animator
//!
//! Combines the easing curve and timing utilities. Call `start()` to begin a
//! run, then `update()` once per frame to advance it and read
//! `current_value()`.

use std::time::Instant;

use super::easing::CubicBezierEase;
use super::timing::{lerp, raw_progress};

/// A live animation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRun {
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
    pub started_at: Instant,
    pub curve: CubicBezierEase,
}

/// Single-run value animator
///
/// At most one run is live; `start` replaces it. `interrupt` stops the run
/// but leaves `current_value` where it was, so it can seed the next start.
#[derive(Debug, Clone, Default)]
pub struct SmoothAnimator {
    run: Option<AnimationRun>,
    current_value: f64,
}

impl SmoothAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a run is currently live
    #[inline]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// The most recently computed value
    #[inline]
    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    /// End value of the live run
    pub fn target(&self) -> Option<f64> {
        self.run.map(|run| run.to)
    }

    /// The live run, if any
    pub fn run(&self) -> Option<&AnimationRun> {
        self.run.as_ref()
    }

    /// Start a run now
    pub fn start(&mut self, from: f64, to: f64, duration_ms: f64, curve: CubicBezierEase) {
        self.start_at(from, to, duration_ms, curve, Instant::now());
    }

    /// Start a run that began at `now`
    pub fn start_at(
        &mut self,
        from: f64,
        to: f64,
        duration_ms: f64,
        curve: CubicBezierEase,
        now: Instant,
    ) {
        self.current_value = from;
        self.run = Some(AnimationRun {
            from,
            to,
            duration_ms,
            started_at: now,
            curve,
        });
    }

    /// Stop the run in place. Safe to call when nothing is running.
    #[inline]
    pub fn interrupt(&mut self) {
        self.run = None;
    }

    /// Advance against the wall clock
    pub fn update(&mut self) -> bool {
        self.update_at(Instant::now())
    }

    /// Advance to `now`
    ///
    /// Returns `true` while the run continues. The poll that reaches the end
    /// snaps `current_value` to the target and returns `false`, as does every
    /// poll after it.
    pub fn update_at(&mut self, now: Instant) -> bool {
        let Some(run) = self.run else {
            return false;
        };

        let progress = raw_progress(run.started_at, now, run.duration_ms);
        if progress >= 1.0 {
            self.current_value = run.to;
            self.run = None;
            return false;
        }

        let eased = run.curve.solve(progress);
        self.current_value = lerp(run.from, run.to, eased);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_linear_run_completes() {
        let base = Instant::now();
        let mut animator = SmoothAnimator::new();
        animator.start_at(0.0, 100.0, 200.0, CubicBezierEase::LINEAR, base);

        let expected = [
            (0, 0.0, true),
            (50, 25.0, true),
            (100, 50.0, true),
            (150, 75.0, true),
            (200, 100.0, false),
            (250, 100.0, false),
        ];
        for (ms, value, running) in expected {
            let still_running = animator.update_at(base + Duration::from_millis(ms));
            assert_eq!(still_running, running, "at {}ms", ms);
            assert!(
                (animator.current_value() - value).abs() < 1e-6,
                "at {}ms: {}",
                ms,
                animator.current_value()
            );
        }
        assert!(!animator.is_running());
    }

    #[test]
    fn test_start_sets_current_immediately() {
        let mut animator = SmoothAnimator::new();
        animator.start(30.0, 90.0, 100.0, CubicBezierEase::EASE_OUT);
        assert_eq!(animator.current_value(), 30.0);
        assert!(animator.is_running());
        assert_eq!(animator.target(), Some(90.0));
    }

    #[test]
    fn test_interrupt_keeps_value() {
        let base = Instant::now();
        let mut animator = SmoothAnimator::new();
        animator.start_at(0.0, 100.0, 100.0, CubicBezierEase::LINEAR, base);
        animator.update_at(base + Duration::from_millis(40));
        animator.interrupt();

        assert!(!animator.is_running());
        assert!((animator.current_value() - 40.0).abs() < 1e-6);
        assert!(!animator.update_at(base + Duration::from_millis(90)));
        assert!((animator.current_value() - 40.0).abs() < 1e-6);
        // Interrupting again is a no-op
        animator.interrupt();
    }

    #[test]
    fn test_restart_supersedes_run() {
        let base = Instant::now();
        let mut animator = SmoothAnimator::new();
        animator.start_at(0.0, 100.0, 100.0, CubicBezierEase::LINEAR, base);
        animator.update_at(base + Duration::from_millis(50));

        let restart = base + Duration::from_millis(50);
        animator.start_at(animator.current_value(), -50.0, 100.0, CubicBezierEase::LINEAR, restart);
        assert_eq!(animator.target(), Some(-50.0));
        animator.update_at(restart + Duration::from_millis(50));
        assert!((animator.current_value() - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_duration_finishes_on_first_poll() {
        let mut animator = SmoothAnimator::new();
        let now = Instant::now();
        animator.start_at(5.0, 10.0, 0.0, CubicBezierEase::EASE, now);
        assert!(!animator.update_at(now));
        assert_eq!(animator.current_value(), 10.0);
    }

    #[test]
    fn test_update_without_run() {
        let mut animator = SmoothAnimator::new();
        assert!(!animator.update());
        assert_eq!(animator.current_value(), 0.0);
    }
}
