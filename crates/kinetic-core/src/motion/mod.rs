//! Motion primitives for kinetic scrolling
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `velocity` - Least-squares release velocity over a 150 ms window
//! - `easing` - CSS cubic-bezier curves with an inverse (Newton-Raphson) solve
//! - `elastic` - Asymptotic overscroll damping
//! - `timing` - Progress and interpolation helpers
//!
//! ## L3 Molecular Layer
//! - `animator` - Time-driven interpolator combining the atoms
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//! use kinetic_core::motion::{CubicBezierEase, SmoothAnimator};
//!
//! let start = Instant::now();
//! let mut animator = SmoothAnimator::new();
//! animator.start_at(0.0, 100.0, 200.0, CubicBezierEase::LINEAR, start);
//!
//! // Once per frame
//! animator.update_at(start + Duration::from_millis(100));
//! assert!((animator.current_value() - 50.0).abs() < 1e-6);
//! ```

// L4 Atomic Layer
pub mod easing;
pub mod elastic;
pub mod timing;
pub mod velocity;

// L3 Molecular Layer
pub mod animator;

pub use animator::{AnimationRun, SmoothAnimator};
pub use easing::CubicBezierEase;
pub use elastic::{apply_tension, apply_tension_with};
pub use velocity::{Sample, VelocityTracker};
