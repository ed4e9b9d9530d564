use std::fmt;

use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::{Point2, Vector2, TOLERANCE};

/// A directed line segment, one edge of a [`Loop`](super::Loop).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    /// Creates a segment from its endpoints.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Creates a segment from raw coordinates.
    #[must_use]
    pub fn from_coords(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    /// Returns the vector from `start` to `end`.
    #[must_use]
    pub fn vector(&self) -> Vector2 {
        self.end - self.start
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    #[must_use]
    pub fn squared_length(&self) -> f64 {
        self.vector().norm_squared()
    }

    /// Returns the unit direction, or `None` for a zero-length segment.
    #[must_use]
    pub fn direction(&self) -> Option<Vector2> {
        self.vector().try_normalize(TOLERANCE)
    }

    /// Returns the segment moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector2) -> Self {
        Self::new(self.start + *offset, self.end + *offset)
    }

    /// Returns the segment with its start pushed back by `distance` along
    /// its own direction. Zero-length segments are returned unchanged.
    #[must_use]
    pub fn extend_start(&self, distance: f64) -> Self {
        match self.direction() {
            Some(dir) => Self::new(self.start - dir * distance, self.end),
            None => *self,
        }
    }

    /// Returns the segment with its end pushed forward by `distance` along
    /// its own direction. Zero-length segments are returned unchanged.
    #[must_use]
    pub fn extend_end(&self, distance: f64) -> Self {
        match self.direction() {
            Some(dir) => Self::new(self.start, self.end + dir * distance),
            None => *self,
        }
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Bounded intersection point with `other`, if any.
    #[must_use]
    pub fn intersection(&self, other: &Segment) -> Option<Point2> {
        segment_segment_intersect_2d(&self.start, &self.end, &other.start, &other.end)
            .map(|(pt, _, _)| pt)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[({}, {}), ({}, {})]",
            self.start.x, self.start.y, self.end.x, self.end.y
        )
    }
}
