use crate::geometry::{Loop, Segment, Winding};
use crate::topology::ring::prev_index;

/// Returns `true` if the vertex where `current` follows `previous` is convex.
///
/// The turn is measured on `(previous.start, previous.end, previous.end +
/// current.vector())`. On a closed loop this is the triangle through the
/// previous start, the shared vertex and the current end; on a pruned loop,
/// where neighbours no longer touch, it still compares the edge directions.
#[must_use]
pub fn vertex_is_convex(previous: &Segment, current: &Segment, winding: Winding) -> bool {
    let vertex = previous.end;
    winding.is_convex_turn(&previous.start, &vertex, &(vertex + current.vector()))
}

/// One flag per vertex, indexed by the segment that starts at that vertex.
#[must_use]
pub fn classify(segments: &[Segment], winding: Winding) -> Vec<bool> {
    let n = segments.len();
    (0..n)
        .map(|i| vertex_is_convex(&segments[prev_index(i, n)], &segments[i], winding))
        .collect()
}

/// Convexity flags of a loop, using the loop's own orientation.
#[must_use]
pub fn convex_vertices(boundary: &Loop) -> Vec<bool> {
    classify(boundary.segments(), boundary.winding())
}
