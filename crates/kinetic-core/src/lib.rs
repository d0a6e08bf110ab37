pub mod config;
pub mod controller;
pub mod error;
pub mod motion;
pub mod signal;
pub mod trace;

pub use config::{AppConfig, DefaultPage, Orientation, ScrollConfig, ScrollMode};
pub use controller::{Bounds, InteractionState, Point, ScrollInteractionController};
pub use error::{Error, Result};
pub use motion::{CubicBezierEase, SmoothAnimator, VelocityTracker};
pub use signal::SubscriptionId;
pub use trace::{Frame, GestureTrace, Replayer};
