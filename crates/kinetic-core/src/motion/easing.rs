//! L4 Atomic Layer: CSS-style cubic-bezier easing
//!
//! The curve runs from (0,0) to (1,1) through two control points. Callers pass
//! the elapsed-time fraction, which is the curve's *x* coordinate, not the
//! Bézier parameter. `solve` therefore inverts x(t) with Newton-Raphson before
//! evaluating y(t).

use serde::{Deserialize, Serialize};

/// Residual and derivative threshold for the Newton-Raphson solve
const EPSILON: f64 = 1e-6;

/// Maximum number of Newton-Raphson updates
const NEWTON_ITERATIONS: usize = 8;

/// `cubic-bezier(x1, y1, x2, y2)`
///
/// `x1` and `x2` are clamped to [0, 1] so the curve stays a function of x.
/// `y1` and `y2` are free, which allows overshooting curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct CubicBezierEase {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezierEase {
    pub const LINEAR: Self = Self::unchecked(0.0, 0.0, 1.0, 1.0);
    pub const EASE: Self = Self::unchecked(0.25, 0.1, 0.25, 1.0);
    pub const EASE_IN: Self = Self::unchecked(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: Self = Self::unchecked(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: Self = Self::unchecked(0.42, 0.0, 0.58, 1.0);
    /// Soft settle, used for boundary spring-back
    pub const SMOOTH: Self = Self::unchecked(0.33, 1.0, 0.68, 1.0);
    /// Quart-out style deceleration, used for flings and page snaps
    pub const FRICTION: Self = Self::unchecked(0.25, 1.0, 0.5, 1.0);

    const fn unchecked(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    /// Control points as `[x1, y1, x2, y2]`
    pub fn control_points(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Eased progress for an elapsed-time fraction `x`
    pub fn solve(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        if self.x1 == self.y1 && self.x2 == self.y2 {
            return x;
        }

        let t = self.solve_t(x);
        bezier(t, self.y1, self.y2)
    }

    /// Find t such that x(t) == x
    fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let residual = bezier(t, self.x1, self.x2) - x;
            if residual.abs() < EPSILON {
                break;
            }
            let slope = bezier_derivative(t, self.x1, self.x2);
            if slope.abs() < EPSILON {
                break;
            }
            t -= residual / slope;
        }
        t.clamp(0.0, 1.0)
    }
}

impl Default for CubicBezierEase {
    fn default() -> Self {
        Self::EASE_OUT
    }
}

impl From<[f64; 4]> for CubicBezierEase {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<CubicBezierEase> for [f64; 4] {
    fn from(curve: CubicBezierEase) -> Self {
        curve.control_points()
    }
}

/// One coordinate of the curve in Horner form:
/// B(t) = ((a·t + b)·t + c)·t with c = 3p1, b = 3p2 − 6p1, a = 3p1 − 3p2 + 1
#[inline]
fn bezier(t: f64, p1: f64, p2: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let a = 3.0 * p1 - 3.0 * p2 + 1.0;
    ((a * t + b) * t + c) * t
}

/// dB/dt
#[inline]
fn bezier_derivative(t: f64, p1: f64, p2: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let a = 3.0 * p1 - 3.0 * p2 + 1.0;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESETS: [CubicBezierEase; 7] = [
        CubicBezierEase::LINEAR,
        CubicBezierEase::EASE,
        CubicBezierEase::EASE_IN,
        CubicBezierEase::EASE_OUT,
        CubicBezierEase::EASE_IN_OUT,
        CubicBezierEase::SMOOTH,
        CubicBezierEase::FRICTION,
    ];

    #[test]
    fn test_easing_boundaries() {
        for curve in PRESETS {
            assert_eq!(curve.solve(0.0), 0.0, "{:?} at x=0", curve);
            assert_eq!(curve.solve(1.0), 1.0, "{:?} at x=1", curve);
            assert_eq!(curve.solve(-0.5), 0.0);
            assert_eq!(curve.solve(1.5), 1.0);
        }
    }

    #[test]
    fn test_linear_is_identity() {
        for x in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert!((CubicBezierEase::LINEAR.solve(x) - x).abs() < 1e-6);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for curve in [
            CubicBezierEase::LINEAR,
            CubicBezierEase::EASE,
            CubicBezierEase::EASE_IN,
            CubicBezierEase::EASE_OUT,
        ] {
            let mut prev = 0.0;
            for i in 0..=100 {
                let x = i as f64 / 100.0;
                let y = curve.solve(x);
                assert!(y + 1e-7 >= prev, "{:?} not monotonic at x={}", curve, x);
                prev = y;
            }
        }
    }

    #[test]
    fn test_ease_in_out_symmetry() {
        let curve = CubicBezierEase::EASE_IN_OUT;
        assert!((curve.solve(0.5) - 0.5).abs() < 1e-4);
        let a = curve.solve(0.2);
        let b = curve.solve(0.8);
        assert!((a + b - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_ease_out_leads_ease_in() {
        assert!(CubicBezierEase::EASE_OUT.solve(0.3) > 0.3);
        assert!(CubicBezierEase::EASE_IN.solve(0.3) < 0.3);
    }

    #[test]
    fn test_inverse_solve_matches_curve() {
        // x(t) at the solved t must reproduce the requested x
        let curve = CubicBezierEase::EASE;
        for i in 1..10 {
            let x = i as f64 / 10.0;
            let t = curve.solve_t(x);
            assert!((bezier(t, curve.x1, curve.x2) - x).abs() < 1e-5);
        }
    }

    #[test]
    fn test_x_controls_are_clamped() {
        let curve = CubicBezierEase::new(-1.0, 2.0, 3.0, -1.0);
        assert_eq!(curve.control_points(), [0.0, 2.0, 1.0, -1.0]);
    }

    #[test]
    fn test_overshoot_curve_is_finite() {
        let curve = CubicBezierEase::new(0.3, 1.8, 0.6, 1.4);
        let mut peak: f64 = 0.0;
        for i in 0..=50 {
            let y = curve.solve(i as f64 / 50.0);
            assert!(y.is_finite());
            peak = peak.max(y);
        }
        assert!(peak > 1.0);
    }

    #[test]
    fn test_degenerate_curve_never_nan() {
        // x'(t) vanishes at t = 0.5
        let curve = CubicBezierEase::new(1.0, 0.0, 0.0, 1.0);
        for i in 0..=20 {
            let y = curve.solve(i as f64 / 20.0);
            assert!(y.is_finite());
            assert!((0.0..=1.0).contains(&y));
        }
    }

    #[test]
    fn test_deserialize_clamps() {
        #[derive(Deserialize)]
        struct Wrapper {
            curve: CubicBezierEase,
        }
        let wrapper: Wrapper = toml::from_str("curve = [1.5, 0.2, -0.3, 1.0]").unwrap();
        assert_eq!(wrapper.curve.control_points(), [1.0, 0.2, 0.0, 1.0]);
    }
}
