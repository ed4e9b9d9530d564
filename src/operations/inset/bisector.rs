use nalgebra::distance;

use crate::error::{InsetError, Result};
use crate::geometry::{Loop, Segment, Winding};
use crate::math::{Vector2, TOLERANCE};

/// Computes one bisector per vertex of a closed loop.
///
/// Entry `i` belongs to the vertex where segment `i` starts. Each bisector is
/// the normalized sum of the inward normals of the two adjacent edges.
///
/// # Errors
///
/// Returns `InsetError::NotClosedLoop` for the first vertex whose adjacent
/// endpoints are further apart than `tolerance`.
pub(super) fn compute(boundary: &Loop, winding: Winding, tolerance: f64) -> Result<Vec<Vector2>> {
    let segments = boundary.segments();
    segments
        .iter()
        .enumerate()
        .map(|(index, current)| {
            let previous = &segments[boundary.prev_index(index)];
            let gap = distance(&previous.end, &current.start);
            if gap > tolerance {
                return Err(InsetError::NotClosedLoop {
                    index,
                    gap,
                    tolerance,
                });
            }
            Ok(vertex_bisector(previous, current, winding))
        })
        .collect()
}

/// Bisector of the vertex where `current` follows `previous`.
///
/// At a 180° spike the two normals cancel; the outgoing edge direction is
/// used instead. Two zero-length edges give the zero vector.
pub(super) fn vertex_bisector(previous: &Segment, current: &Segment, winding: Winding) -> Vector2 {
    let incoming = winding.inset_direction(previous).unwrap_or_else(Vector2::zeros);
    let outgoing = winding.inset_direction(current).unwrap_or_else(Vector2::zeros);
    (incoming + outgoing)
        .try_normalize(TOLERANCE)
        .or_else(|| current.direction())
        .or_else(|| previous.direction().map(|d| -d))
        .unwrap_or_else(Vector2::zeros)
}

/// Renders bisectors as segments from each vertex, for diagnostics.
pub(super) fn traces(boundary: &Loop, bisectors: &[Vector2], length: f64) -> Vec<Segment> {
    boundary
        .iter()
        .zip(bisectors)
        .map(|(segment, bisector)| Segment::new(segment.start, segment.start + bisector * length))
        .collect()
}
