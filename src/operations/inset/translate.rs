use crate::geometry::{Segment, Winding};
use crate::math::Vector2;

use super::TrackedEdge;

/// Moves `segment` by `distance` along its inward normal.
///
/// Zero-length segments have no normal and are returned unchanged.
#[must_use]
pub fn offset_segment(segment: &Segment, winding: Winding, distance: f64) -> Segment {
    let normal = winding
        .inset_direction(segment)
        .unwrap_or_else(Vector2::zeros);
    segment.translated(&(normal * distance))
}

/// Translates every surviving edge independently.
pub(super) fn offset_edges(edges: &[TrackedEdge], winding: Winding, distance: f64) -> Vec<TrackedEdge> {
    edges
        .iter()
        .map(|edge| TrackedEdge {
            source: edge.source,
            segment: offset_segment(&edge.segment, winding, distance),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use approx::assert_abs_diff_eq;

    #[test]
    fn edges_move_inward_for_both_orientations() {
        let bottom = Segment::from_coords(0.0, 0.0, 1.0, 0.0);
        let ccw = offset_segment(&bottom, Winding::CounterClockwise, 0.1);
        assert_abs_diff_eq!(ccw.start, Point2::new(0.0, 0.1), epsilon = 1e-12);
        assert_abs_diff_eq!(ccw.end, Point2::new(1.0, 0.1), epsilon = 1e-12);

        let cw = offset_segment(&bottom.reversed(), Winding::Clockwise, 0.1);
        assert_abs_diff_eq!(cw.start, Point2::new(1.0, 0.1), epsilon = 1e-12);
        assert_abs_diff_eq!(cw.end, Point2::new(0.0, 0.1), epsilon = 1e-12);
    }

    #[test]
    fn translation_keeps_cardinality_and_sources() {
        let edges = vec![
            TrackedEdge {
                source: 2,
                segment: Segment::from_coords(0.0, 0.0, 0.0, 1.0),
            },
            TrackedEdge {
                source: 5,
                segment: Segment::from_coords(3.0, 3.0, 3.0, 3.0),
            },
        ];
        let moved = offset_edges(&edges, Winding::Clockwise, 0.5);
        assert_eq!(moved.len(), 2);
        assert_eq!(moved[0].source, 2);
        assert_abs_diff_eq!(moved[0].segment.start, Point2::new(0.5, 0.0), epsilon = 1e-12);
        assert_eq!(moved[1].segment, edges[1].segment);
    }
}
