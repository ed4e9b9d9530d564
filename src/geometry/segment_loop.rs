use nalgebra::distance;

use crate::math::predicates::polygon_signed_area;
use crate::math::Point2;
use crate::topology::ring::{next_index, prev_index};

use super::{Segment, Winding};

/// A cyclically ordered sequence of segments.
///
/// For a closed loop, `segments[i].end` coincides with
/// `segments[(i + 1) % n].start`. Closure is not enforced on construction;
/// it is checked against a tolerance by the operations that require it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loop {
    segments: Vec<Segment>,
}

impl Loop {
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Builds a closed loop through `points`, connecting the last point back
    /// to the first.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        let n = points.len();
        if n < 2 {
            return Self::default();
        }
        (0..n)
            .map(|i| Segment::new(points[i], points[next_index(i, n)]))
            .collect()
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Index of the segment before `i`, wrapping around.
    #[must_use]
    pub fn prev_index(&self, i: usize) -> usize {
        prev_index(i, self.segments.len())
    }

    /// Index of the segment after `i`, wrapping around.
    #[must_use]
    pub fn next_index(&self, i: usize) -> usize {
        next_index(i, self.segments.len())
    }

    /// Distance between the end of segment `i - 1` and the start of segment `i`.
    #[must_use]
    pub fn closure_gap(&self, i: usize) -> f64 {
        let prev = &self.segments[self.prev_index(i)];
        distance(&prev.end, &self.segments[i].start)
    }

    /// Returns the first vertex whose closure gap exceeds `tolerance`,
    /// together with that gap.
    #[must_use]
    pub fn first_open_vertex(&self, tolerance: f64) -> Option<(usize, f64)> {
        (0..self.segments.len())
            .map(|i| (i, self.closure_gap(i)))
            .find(|&(_, gap)| gap > tolerance)
    }

    /// Returns `true` if every consecutive pair of segments meets within `tolerance`.
    #[must_use]
    pub fn is_closed(&self, tolerance: f64) -> bool {
        self.first_open_vertex(tolerance).is_none()
    }

    /// Shoelace area over the segment start points.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let points: Vec<Point2> = self.segments.iter().map(|s| s.start).collect();
        polygon_signed_area(&points)
    }

    #[must_use]
    pub fn winding(&self) -> Winding {
        Winding::from_signed_area(self.signed_area())
    }

    /// Returns the loop traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        self.segments.iter().rev().map(Segment::reversed).collect()
    }
}

impl FromIterator<Segment> for Loop {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Segment>> for Loop {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}

impl<'a> IntoIterator for &'a Loop {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl IntoIterator for Loop {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}
