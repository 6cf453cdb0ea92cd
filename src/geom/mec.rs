// Minimum enclosing circle via the rotating-base-edge search.
//
// Only convex hull vertices can determine the circle, so the hull is
// computed first. The search keeps a base edge (s1, s2) and each iteration
// finds the hull vertex v subtending the smallest angle over that edge:
//   - angle ≥ 90°: the edge's diametral circle covers everything — done.
//   - another angle of triangle (s1, s2, v) is ≥ 90°: the edge opposite
//     that obtuse angle becomes the new base edge — rotate and repeat.
//   - all angles acute: the circumcircle of (s1, s2, v) is the answer.

use std::f64::consts::FRAC_PI_2;

use super::hull::convex_hull;
use super::{Circle, GeomError, Point};

/// Angle at `vertex` between the rays toward `a` and `b`, in radians.
fn angle_at(vertex: Point, a: Point, b: Point) -> f64 {
    let v1 = vertex.vector_to(a);
    let v2 = vertex.vector_to(b);
    // Rounding can push the cosine a hair outside [-1, 1], where acos is NaN.
    (v1.dot(v2) / (v1.magnitude() * v2.magnitude()))
        .clamp(-1.0, 1.0)
        .acos()
}

/// Circle whose diameter is the segment from `a` to `b`.
fn diametral_circle(a: Point, b: Point) -> Result<Circle, GeomError> {
    let mid = a.midpoint(b);
    Circle::new(mid, mid.distance_to(a))
}

/// Diametral circle of the two farthest-apart points in `points`.
/// Fallback for collinear triples and for the iteration bound.
fn farthest_pair_circle(points: &[Point]) -> Result<Circle, GeomError> {
    let mut best = (points[0], points[0], 0.0);
    for (i, &a) in points.iter().enumerate() {
        for &b in &points[i + 1..] {
            let d = a.distance_to(b);
            if d > best.2 {
                best = (a, b, d);
            }
        }
    }
    diametral_circle(best.0, best.1)
}

/// Circumcircle of the triangle (s1, s2, v) via the 2×2 determinant
/// circumcenter formula. `None` when the denominator is zero or the center
/// overflows — a collinear "triangle" reached through floating-point edge
/// cases.
fn circumcircle(s1: Point, s2: Point, v: Point) -> Option<Circle> {
    let d = 2.0
        * (s1.x() * (v.y() - s2.y()) + v.x() * (s2.y() - s1.y()) + s2.x() * (s1.y() - v.y()));
    if d == 0.0 {
        return None;
    }

    let m1 = s1.y() * s1.y() + s1.x() * s1.x();
    let m2 = v.y() * v.y() + v.x() * v.x();
    let m3 = s2.y() * s2.y() + s2.x() * s2.x();
    let cx = (m1 * (v.y() - s2.y()) + m2 * (s2.y() - s1.y()) + m3 * (s1.y() - v.y())) / d;
    let cy = (m1 * (s2.x() - v.x()) + m2 * (s1.x() - s2.x()) + m3 * (v.x() - s1.x())) / d;

    let center = Point::new(cx, cy).ok()?;
    Circle::new(center, center.distance_to(s1)).ok()
}

/// Smallest circle containing every point in `points`.
///
/// Fails with [`GeomError::EmptyInput`] on zero points. One point yields a
/// zero-radius circle; two (or a fully collinear set) yield the diametral
/// circle of the extremes.
pub fn min_enclosing_circle(points: &[Point]) -> Result<Circle, GeomError> {
    let hull = convex_hull(points)?;
    match hull.as_slice() {
        [p] => Circle::new(*p, 0.0),
        [a, b] => diametral_circle(*a, *b),
        _ => rotating_base_search(&hull),
    }
}

// Invariant per iteration: (s1, s2) is the current base edge, v the hull
// vertex subtending the smallest angle over it.
fn rotating_base_search(hull: &[Point]) -> Result<Circle, GeomError> {
    let mut s1 = 0usize;
    let mut s2 = 1usize;

    // The unbounded form of this search can cycle on degenerate hulls;
    // after hull.len()² edge rotations, give up and cover the farthest pair.
    let max_rotations = hull.len() * hull.len();

    for _ in 0..max_rotations {
        let mut v = usize::MAX;
        let mut a = f64::INFINITY;
        for (i, &p) in hull.iter().enumerate() {
            if i == s1 || i == s2 {
                continue;
            }
            let angle = angle_at(p, hull[s1], hull[s2]);
            if angle < a {
                a = angle;
                v = i;
            }
        }
        if v == usize::MAX {
            break;
        }

        if a >= FRAC_PI_2 {
            // Every other vertex sees the base edge at an obtuse angle, so
            // the edge's diametral circle already covers the hull.
            return diametral_circle(hull[s1], hull[s2]);
        }

        let a2 = angle_at(hull[s2], hull[v], hull[s1]);
        let a3 = angle_at(hull[s1], hull[s2], hull[v]);
        if a2 >= FRAC_PI_2 {
            // Re-base on the edge opposite the obtuse angle at s2.
            s2 = s1;
            s1 = v;
        } else if a3 >= FRAC_PI_2 {
            s1 = s2;
            s2 = v;
        } else {
            // All three angles acute: the circumcircle is minimal.
            return match circumcircle(hull[s1], hull[s2], hull[v]) {
                Some(circle) => Ok(circle),
                None => farthest_pair_circle(&[hull[s1], hull[s2], hull[v]]),
            };
        }
    }

    farthest_pair_circle(hull)
}
