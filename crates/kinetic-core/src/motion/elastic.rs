//! L4 Atomic Layer: Elastic overscroll damping
//!
//! Maps a logical offset that has left its bounds to the offset actually
//! rendered. Inside the bounds the mapping is the identity. Outside, the
//! overshoot is compressed by `vp · (1 − e^(−overshoot·k / vp))`, so the
//! rubber band can never stretch further than one viewport.

/// Default damping constant, smaller is stiffer
pub const DEFAULT_DAMPING: f64 = 0.55;

/// Linear factor used when there is no viewport to scale against
const FALLBACK_LINEAR_FACTOR: f64 = 0.5;

/// Damp `raw_offset` against `[min, max]` with the default constant
#[inline]
pub fn apply_tension(raw_offset: f64, min: f64, max: f64, viewport_size: f64) -> f64 {
    apply_tension_with(raw_offset, min, max, viewport_size, DEFAULT_DAMPING)
}

/// Damp `raw_offset` against `[min, max]` with damping constant `k`
pub fn apply_tension_with(raw_offset: f64, min: f64, max: f64, viewport_size: f64, k: f64) -> f64 {
    if raw_offset > max {
        max + damped_overshoot(raw_offset - max, viewport_size, k)
    } else if raw_offset < min {
        min - damped_overshoot(min - raw_offset, viewport_size, k)
    } else {
        raw_offset
    }
}

/// Rendered displacement for a logical `overshoot` past a bound
pub fn damped_overshoot(overshoot: f64, viewport_size: f64, k: f64) -> f64 {
    if viewport_size <= 0.0 {
        return overshoot * FALLBACK_LINEAR_FACTOR;
    }
    let damped = viewport_size * (1.0 - (-(overshoot * k) / viewport_size).exp());
    // Far past the bound the exponential underflows and 1 - e rounds to 1
    damped.min(viewport_size * (1.0 - f64::EPSILON))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_inside_bounds() {
        for x in [-1200.0, -800.5, -1.0, 0.0] {
            assert_eq!(apply_tension(x, -1200.0, 0.0, 400.0), x);
        }
    }

    #[test]
    fn test_damped_displacement_below_viewport() {
        let viewport = 400.0;
        for overshoot in [1.0, 50.0, 400.0, 5_000.0, 1e6] {
            let rendered = apply_tension(overshoot, -1200.0, 0.0, viewport);
            assert!(rendered > 0.0);
            assert!(rendered < viewport, "overshoot {} rendered {}", overshoot, rendered);
            assert!(rendered < overshoot);
        }
    }

    #[test]
    fn test_huge_overshoot_stays_below_viewport() {
        for viewport in [1.0, 400.0, 640.0, 1024.0] {
            for overshoot in [3e4, 1e6, 1e12, f64::MAX] {
                let d = damped_overshoot(overshoot, viewport, DEFAULT_DAMPING);
                assert!(d < viewport, "viewport {} overshoot {} gave {}", viewport, overshoot, d);
                assert!(viewport - d < 1e-9);
            }
        }
    }

    #[test]
    fn test_approaches_viewport_asymptotically() {
        let near = damped_overshoot(10_000.0, 400.0, DEFAULT_DAMPING);
        let far = damped_overshoot(20_000.0, 400.0, DEFAULT_DAMPING);
        assert!(far >= near);
        assert!(400.0 - far < 1e-3);
    }

    #[test]
    fn test_below_min_mirrors_above_max() {
        let above = apply_tension(100.0, -1200.0, 0.0, 400.0);
        let below = apply_tension(-1300.0, -1200.0, 0.0, 400.0);
        assert!((above - (-1200.0 - below)).abs() < 1e-9);
        assert!(below < -1200.0);
    }

    #[test]
    fn test_monotonic_in_overshoot() {
        let mut prev = 0.0;
        for i in 1..100 {
            let d = damped_overshoot(i as f64 * 10.0, 400.0, DEFAULT_DAMPING);
            assert!(d > prev);
            prev = d;
        }
    }

    #[test]
    fn test_zero_viewport_falls_back_to_linear() {
        assert_eq!(apply_tension(40.0, -100.0, 0.0, 0.0), 20.0);
        assert_eq!(apply_tension(-140.0, -100.0, 0.0, -5.0), -120.0);
    }

    #[test]
    fn test_custom_damping_is_stiffer() {
        let soft = apply_tension_with(200.0, -100.0, 0.0, 400.0, 0.8);
        let stiff = apply_tension_with(200.0, -100.0, 0.0, 400.0, 0.2);
        assert!(stiff < soft);
    }
}
