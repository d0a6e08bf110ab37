use serde::{Deserialize, Serialize};

use crate::config::Orientation;
use crate::signal::Change;

/// Interaction phase of a scrollable view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionState {
    /// At rest
    #[default]
    Idle,
    /// A pointer is down (the drag threshold may not be crossed yet)
    Dragging,
    /// An animation is carrying the offset after a release, wheel or scroll request
    Flinging,
}

impl InteractionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Dragging => "dragging",
            InteractionState::Flinging => "flinging",
        }
    }
}

pub type StateChange = Change<InteractionState>;
pub type PageChange = Change<i64>;

/// Pointer position in host units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Coordinate along the scroll axis
    #[inline]
    pub fn along(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }
}

/// Legal range of the logical offset, `min <= max`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Bounds from two limits in either order
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Bounds for `content` scrolled inside `viewport`: content starts at 0 and
    /// moves towards negative offsets. Content that fits leaves no room at all.
    pub fn from_extent(viewport: f64, content: f64) -> Self {
        if content <= viewport {
            Self { min: 0.0, max: 0.0 }
        } else {
            Self {
                min: -(content - viewport),
                max: 0.0,
            }
        }
    }

    #[inline]
    pub fn contains(&self, offset: f64) -> bool {
        offset >= self.min && offset <= self.max
    }

    #[inline]
    pub fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(self.min, self.max)
    }

    /// Scrollable distance
    #[inline]
    pub fn extent(&self) -> f64 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_normalised() {
        let bounds = Bounds::new(0.0, -1200.0);
        assert_eq!(bounds.min, -1200.0);
        assert_eq!(bounds.max, 0.0);
        assert_eq!(bounds.extent(), 1200.0);
    }

    #[test]
    fn test_bounds_from_extent() {
        assert_eq!(Bounds::from_extent(400.0, 1600.0), Bounds::new(-1200.0, 0.0));
        assert_eq!(Bounds::from_extent(400.0, 300.0), Bounds::new(0.0, 0.0));
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = Bounds::new(-1200.0, 0.0);
        assert_eq!(bounds.clamp(50.0), 0.0);
        assert_eq!(bounds.clamp(-5_000.0), -1200.0);
        assert_eq!(bounds.clamp(-600.0), -600.0);
        assert!(bounds.contains(-1200.0) && !bounds.contains(0.5));
    }

    #[test]
    fn test_point_axis() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p.along(Orientation::Horizontal), 3.0);
        assert_eq!(p.along(Orientation::Vertical), 4.0);
        assert_eq!(p.distance(Point::default()), 5.0);
    }
}
