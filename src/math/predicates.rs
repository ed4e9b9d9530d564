use super::Point2;
use crate::error::GeometryError;

/// Twice the signed area of triangle `(a, b, c)`.
///
/// Positive when `a → b → c` turns counter-clockwise, negative when it turns
/// clockwise, zero for collinear points.
#[must_use]
pub fn signed_area(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Returns `true` if `vertex` is a convex corner of a clockwise loop.
///
/// Collinear (zero-area) vertices are classified reflex.
#[must_use]
pub fn is_convex(prev_start: &Point2, vertex: &Point2, next_end: &Point2) -> bool {
    signed_area(prev_start, vertex, next_end) < 0.0
}

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn polygon_signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Altitude onto side `a` of the triangle with side lengths `a`, `b`, `c`.
///
/// Uses Heron's formula in its cancellation-stable form (sides sorted in
/// decreasing order). The altitude is `2 * area / a`.
///
/// # Errors
///
/// Returns `GeometryError::TriangleInequality` if the sides cannot form a
/// triangle (negative radicand, negative or non-finite input), and
/// `GeometryError::ZeroBase` if `a` is zero.
pub fn triangle_altitude(a: f64, b: f64, c: f64) -> Result<f64, GeometryError> {
    let invalid = GeometryError::TriangleInequality { a, b, c };
    if ![a, b, c].iter().all(|s| s.is_finite() && *s >= 0.0) {
        return Err(invalid);
    }
    if a == 0.0 {
        return Err(GeometryError::ZeroBase);
    }

    let mut sides = [a, b, c];
    sides.sort_by(|x, y| y.total_cmp(x));
    let [p, q, r] = sides;

    // 16 * s * (s - a) * (s - b) * (s - c)
    let radicand = (p + (q + r)) * (r - (p - q)) * (r + (p - q)) * (p + (q - r));
    if radicand < 0.0 {
        return Err(invalid);
    }
    let area = 0.25 * radicand.sqrt();
    Ok(2.0 * area / a)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn signed_area_turns() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let left = Point2::new(1.0, 1.0);
        let right = Point2::new(1.0, -1.0);
        assert!((signed_area(&a, &b, &left) - 1.0).abs() < TOLERANCE);
        assert!((signed_area(&a, &b, &right) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn convex_on_clockwise_turn() {
        // Right turn: convex corner of a clockwise loop.
        let i = Point2::new(0.0, 0.0);
        let j = Point2::new(0.0, 1.0);
        let k = Point2::new(1.0, 1.0);
        assert!(is_convex(&i, &j, &k));
        assert!(!is_convex(&k, &j, &i));
    }

    #[test]
    fn collinear_is_reflex() {
        let i = Point2::new(0.0, 0.0);
        let j = Point2::new(1.0, 0.0);
        let k = Point2::new(2.0, 0.0);
        assert!(!is_convex(&i, &j, &k));
        assert!(!is_convex(&k, &j, &i));
    }

    #[test]
    fn polygon_area_ccw_square() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert!((polygon_signed_area(&pts) - 1.0).abs() < TOLERANCE);
        let reversed: Vec<_> = pts.into_iter().rev().collect();
        assert!((polygon_signed_area(&reversed) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn polygon_area_degenerate() {
        assert!(polygon_signed_area(&[Point2::new(0.0, 0.0)]).abs() < TOLERANCE);
        assert!(polygon_signed_area(&[]).abs() < TOLERANCE);
    }

    #[test]
    fn altitude_equilateral() {
        let h = triangle_altitude(1.0, 1.0, 1.0).unwrap();
        assert!((h - 3.0_f64.sqrt() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn altitude_right_triangle_onto_hypotenuse() {
        // 3-4-5 triangle: altitude onto the hypotenuse is 3 * 4 / 5.
        let h = triangle_altitude(5.0, 3.0, 4.0).unwrap();
        assert!((h - 2.4).abs() < 1e-12);
        let h = triangle_altitude(3.0, 4.0, 5.0).unwrap();
        assert!((h - 4.0).abs() < 1e-12);
    }

    #[test]
    fn altitude_isosceles_square_apex() {
        // Unit base with apex at the square's center.
        let side = 0.5_f64.sqrt();
        let h = triangle_altitude(1.0, side, side).unwrap();
        assert!((h - 0.5).abs() < 1e-12);
    }

    #[test]
    fn altitude_flat_triangle_is_zero() {
        let h = triangle_altitude(2.0, 1.0, 1.0).unwrap();
        assert!(h.abs() < TOLERANCE);
    }

    #[test]
    fn altitude_rejects_triangle_inequality_violation() {
        let err = triangle_altitude(1.0, 0.2, 0.2).unwrap_err();
        assert!(matches!(err, GeometryError::TriangleInequality { .. }));
    }

    #[test]
    fn altitude_rejects_bad_input() {
        assert!(triangle_altitude(f64::NAN, 1.0, 1.0).is_err());
        assert!(triangle_altitude(1.0, -1.0, 1.0).is_err());
        assert_eq!(triangle_altitude(0.0, 1.0, 1.0), Err(GeometryError::ZeroBase));
    }
}
