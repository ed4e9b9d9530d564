use tracing::warn;

use crate::geometry::{Loop, Segment, Winding};
use crate::math::Point2;
use crate::topology::ring::{next_index, prev_index};

use super::convexity::classify;
use super::{Anomaly, TrackedEdge};

/// How two consecutive translated edges meet.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Joint {
    /// Convex corner: both edges are clipped to the shared point.
    Miter(Point2),
    /// Reflex corner: bridged by a straight connector.
    Chord,
    /// Convex corner whose extensions never met; left unjoined.
    Open,
}

/// Reconciles translated edges into a loop.
///
/// Every joint is decided from the unmodified `edges`, then the output is
/// assembled into a fresh buffer, so no joint sees another joint's result.
/// Chords not longer than `tolerance` are dropped since their endpoints
/// already coincide within it.
pub(super) fn connect(
    edges: &[TrackedEdge],
    winding: Winding,
    reach: f64,
    tolerance: f64,
) -> (Loop, Vec<Anomaly>) {
    let n = edges.len();
    let segments: Vec<Segment> = edges.iter().map(|e| e.segment).collect();
    let convex = classify(&segments, winding);

    let mut anomalies = Vec::new();
    let mut joints = Vec::with_capacity(n);
    for (vertex, current) in segments.iter().enumerate() {
        if !convex[vertex] {
            joints.push(Joint::Chord);
            continue;
        }
        let previous = &segments[prev_index(vertex, n)];
        if let Some(point) = miter(previous, current, reach) {
            joints.push(Joint::Miter(point));
        } else {
            warn!(vertex, edge = edges[vertex].source, %previous, %current, "trim failed");
            anomalies.push(Anomaly::TrimFailed {
                vertex,
                edge: edges[vertex].source,
                previous: *previous,
                current: *current,
            });
            joints.push(Joint::Open);
        }
    }

    let mut joined = Vec::with_capacity(n * 2);
    for (i, segment) in segments.iter().enumerate() {
        let mut start = segment.start;
        match joints[i] {
            Joint::Miter(point) => start = point,
            Joint::Chord => {
                let chord = Segment::new(segments[prev_index(i, n)].end, segment.start);
                if chord.length() > tolerance {
                    joined.push(chord);
                }
            }
            Joint::Open => {}
        }
        let end = match joints[next_index(i, n)] {
            Joint::Miter(point) => point,
            Joint::Chord | Joint::Open => segment.end,
        };
        joined.push(Segment::new(start, end));
    }

    (Loop::new(joined), anomalies)
}

/// Extends `previous` forward and `current` backward by `reach` and returns
/// their intersection.
pub(super) fn miter(previous: &Segment, current: &Segment, reach: f64) -> Option<Point2> {
    previous
        .extend_end(reach)
        .intersection(&current.extend_start(reach))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn tracked(segments: &[Segment]) -> Vec<TrackedEdge> {
        segments
            .iter()
            .enumerate()
            .map(|(source, segment)| TrackedEdge {
                source,
                segment: *segment,
            })
            .collect()
    }

    #[test]
    fn convex_corners_are_mitered() {
        // Unit square edges translated inward by 0.1 (CCW).
        let edges = tracked(&[
            Segment::from_coords(0.0, 0.1, 1.0, 0.1),
            Segment::from_coords(0.9, 0.0, 0.9, 1.0),
            Segment::from_coords(1.0, 0.9, 0.0, 0.9),
            Segment::from_coords(0.1, 1.0, 0.1, 0.0),
        ]);
        let (joined, anomalies) = connect(&edges, Winding::CounterClockwise, 10.0, 1e-3);
        assert!(anomalies.is_empty());
        assert_eq!(joined.len(), 4);
        assert_abs_diff_eq!(joined.segments()[0].start, Point2::new(0.1, 0.1), epsilon = 1e-12);
        assert_abs_diff_eq!(joined.segments()[0].end, Point2::new(0.9, 0.1), epsilon = 1e-12);
        assert_abs_diff_eq!(joined.segments()[3].start, Point2::new(0.1, 0.9), epsilon = 1e-12);
        assert!(joined.is_closed(1e-12));
    }

    #[test]
    fn reflex_corner_gets_a_chord() {
        // Two edges of an L-shape around the reflex vertex (1, 1), translated
        // by 0.1, closed off by two far edges so the loop has four sides.
        let edges = tracked(&[
            Segment::from_coords(2.0, 0.9, 1.0, 0.9),
            Segment::from_coords(0.9, 1.0, 0.9, 2.0),
            Segment::from_coords(0.9, 2.0, -1.0, 2.0),
            Segment::from_coords(-1.0, 2.0, 2.0, 0.9),
        ]);
        let (joined, _) = connect(&edges, Winding::CounterClockwise, 1.0, 1e-3);
        let chord = joined
            .iter()
            .find(|s| s.start == Point2::new(1.0, 0.9))
            .unwrap();
        assert_eq!(chord.end, Point2::new(0.9, 1.0));
    }

    #[test]
    fn non_intersecting_convex_joint_is_reported() {
        let edges = tracked(&[
            Segment::from_coords(0.0, 0.0, 1.0, 0.0),
            Segment::from_coords(5.0, 10.0, 5.0, 11.0),
        ]);
        let (joined, anomalies) = connect(&edges, Winding::CounterClockwise, 1.0, 1e-3);
        assert_eq!(anomalies.len(), 1);
        let Anomaly::TrimFailed { vertex, edge, .. } = &anomalies[0] else {
            panic!("expected a trim failure, got {:?}", anomalies[0]);
        };
        assert_eq!(*vertex, 1);
        assert_eq!(*edge, 1);
        // Vertex 0 is reflex and bridged, vertex 1 stays open.
        assert_eq!(joined.len(), 3);
        assert!(!joined.is_closed(1e-3));
    }

    #[test]
    fn zero_length_chords_are_dropped() {
        // Collinear neighbours: the reflex chord has zero length.
        let edges = tracked(&[
            Segment::from_coords(0.0, 0.0, 1.0, 0.0),
            Segment::from_coords(1.0, 0.0, 2.0, 0.0),
            Segment::from_coords(2.0, 0.0, 1.0, 1.0),
            Segment::from_coords(1.0, 1.0, 0.0, 0.0),
        ]);
        let (joined, anomalies) = connect(&edges, Winding::CounterClockwise, 10.0, 1e-3);
        assert!(anomalies.is_empty());
        assert_eq!(joined.len(), 4);
        assert!(joined.is_closed(1e-9));
    }
}
