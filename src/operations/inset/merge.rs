use tracing::debug;

use crate::geometry::Loop;
use crate::topology::ring::EdgeRing;

/// Merges every edge whose successor is shorter than `cutoff_length` with
/// that successor.
///
/// The merged edge keeps its own start and takes the successor's end; the
/// successor is consumed and not examined itself. The walk wraps across the
/// seam of the loop and never leaves fewer than two edges.
#[must_use]
pub fn merge_short_edges(boundary: &Loop, cutoff_length: f64) -> Loop {
    let cutoff_sq = cutoff_length * cutoff_length;
    let mut ring = EdgeRing::from_values(boundary.iter().copied());
    let mut merged = 0_usize;

    for key in ring.keys() {
        if ring.len() <= 2 {
            break;
        }
        let Some(next) = ring.next(key) else {
            // Consumed by its predecessor.
            continue;
        };
        let short = ring
            .get(next)
            .is_some_and(|s| s.squared_length() < cutoff_sq);
        if !short {
            continue;
        }
        if let Some(absorbed) = ring.remove(next) {
            if let Some(segment) = ring.get_mut(key) {
                segment.end = absorbed.end;
                merged += 1;
            }
        }
    }

    if merged > 0 {
        debug!(merged, remaining = ring.len(), "merged short edges");
    }
    ring.into_values().into_iter().collect()
}
