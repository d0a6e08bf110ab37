//! L4 Atomic Layer: Time calculation utilities for motion
//!
//! Pure functions for animation progress and interpolation. Every function
//! takes the "now" instant explicitly so callers can drive them from a frame
//! clock instead of the wall clock.

use std::time::{Duration, Instant};

/// Milliseconds elapsed between `start` and `now`, zero if `now` is earlier
#[inline]
pub fn elapsed_ms(start: Instant, now: Instant) -> f64 {
    now.saturating_duration_since(start).as_nanos() as f64 / 1_000_000.0
}

/// Raw (unclamped) progress of a run of `duration_ms` started at `start`
///
/// A non-positive duration is reported as already complete.
#[inline]
pub fn raw_progress(start: Instant, now: Instant, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    elapsed_ms(start, now) / duration_ms
}

/// Linear interpolation between two values
///
/// # Arguments
/// * `from` - Start value
/// * `to` - End value
/// * `t` - Interpolation factor, usually [0.0, 1.0] (overshooting curves may leave it)
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Convert a millisecond count into a `Duration`, negative values become zero
#[inline]
pub fn millis(ms: f64) -> Duration {
    Duration::from_secs_f64(ms.max(0.0) / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
        assert!((lerp(100.0, -100.0, 0.25) - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert_eq!(raw_progress(start, start, 0.0), 1.0);
        assert_eq!(raw_progress(start, start, -5.0), 1.0);
    }

    #[test]
    fn test_progress_is_unclamped() {
        let start = Instant::now();
        assert!((raw_progress(start, start + Duration::from_millis(50), 100.0) - 0.5).abs() < 1e-9);
        assert!((raw_progress(start, start + Duration::from_millis(500), 100.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_elapsed_never_negative() {
        let later = Instant::now() + Duration::from_millis(10);
        assert_eq!(elapsed_ms(later, later - Duration::from_millis(5)), 0.0);
    }

    #[test]
    fn test_millis() {
        assert_eq!(millis(250.0), Duration::from_millis(250));
        assert_eq!(millis(-1.0), Duration::ZERO);
    }
}
