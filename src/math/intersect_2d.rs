use super::{Point2, TOLERANCE};

/// Bounded segment-segment intersection in 2D.
///
/// Solves `a0 + t * (a1 - a0) = b0 + u * (b1 - b0)` with cross-product
/// ratios. Returns `(intersection_point, t, u)` where `t` and `u` are in
/// `[0, 1]`, or `None` for parallel, degenerate or non-overlapping segments.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    // Parallel test relative to the segment lengths (sine of the angle).
    let cross = da.perp(&db);
    if cross.abs() <= TOLERANCE * da.norm() * db.norm() {
        return None;
    }

    let d = b0 - a0;
    let t = d.perp(&db) / cross;
    let u = d.perp(&da) / cross;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((a0 + da * t_clamped, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}
