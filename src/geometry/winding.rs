use crate::math::predicates::is_convex;
use crate::math::{Point2, Vector2, Vector3, TOLERANCE};

use super::Segment;

/// Orientation of a closed loop.
///
/// The raw predicates ([`is_convex`] and the `edge × +Z` normal) describe a
/// clockwise loop. Counter-clockwise loops use their mirror image, so that
/// "inset" always moves toward the enclosed region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    /// Classifies a loop from its signed area. Zero area counts as clockwise.
    #[must_use]
    pub fn from_signed_area(area: f64) -> Self {
        if area > 0.0 {
            Self::CounterClockwise
        } else {
            Self::Clockwise
        }
    }

    /// Returns `true` if the turn `prev_start → vertex → next_end` is a
    /// convex corner for a loop of this orientation.
    #[must_use]
    pub fn is_convex_turn(self, prev_start: &Point2, vertex: &Point2, next_end: &Point2) -> bool {
        match self {
            Self::Clockwise => is_convex(prev_start, vertex, next_end),
            Self::CounterClockwise => is_convex(next_end, vertex, prev_start),
        }
    }

    /// Returns the unit normal of `segment` pointing into the loop interior,
    /// or `None` for a zero-length segment.
    ///
    /// The edge vector is crossed with the Z axis (`+Z` for clockwise, `-Z`
    /// for counter-clockwise loops) and dropped back to the plane.
    #[must_use]
    pub fn inset_direction(self, segment: &Segment) -> Option<Vector2> {
        let v = segment.vector();
        let up = match self {
            Self::Clockwise => Vector3::z(),
            Self::CounterClockwise => -Vector3::z(),
        };
        let normal = Vector3::new(v.x, v.y, 0.0).cross(&up);
        Vector2::new(normal.x, normal.y).try_normalize(TOLERANCE)
    }
}
