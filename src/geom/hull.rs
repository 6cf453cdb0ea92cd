// Convex hull via the monotone chain ("half-hull") construction.
//
// The hull comes out clockwise starting from the leftmost point: the upper
// half is built over the points sorted ascending by (x, y), the lower half
// over the same points reversed, and the lower half's shared endpoints are
// trimmed before concatenation.

use super::{GeomError, Point};

/// True if the path p1 → p2 → p3 turns right at p2.
///
/// Both edge vectors are rooted at the middle point; collinear triples
/// (cross == 0) do not count as a right turn, so they are eliminated from
/// the hull.
fn is_right_turn(p1: Point, p2: Point, p3: Point) -> bool {
    p2.vector_to(p1).cross(p2.vector_to(p3)) > 0.0
}

/// One half of the hull over `points` (already sorted). Ascending input
/// yields the upper half, descending input the lower half.
fn half_hull(points: &[Point]) -> Vec<Point> {
    let mut hull = vec![points[0], points[1]];
    for &p in &points[2..] {
        hull.push(p);
        // Pop middle points until the last three turn right again.
        while hull.len() >= 3
            && !is_right_turn(hull[hull.len() - 3], hull[hull.len() - 2], hull[hull.len() - 1])
        {
            hull.remove(hull.len() - 2);
        }
    }
    hull
}

/// Convex hull of `points`, clockwise starting from the point with the
/// smallest x-coordinate (ties broken by smallest y).
///
/// Fewer than three points have no hull shape and are returned as-is,
/// sorted. Zero points fail with [`GeomError::EmptyInput`].
pub fn convex_hull(points: &[Point]) -> Result<Vec<Point>, GeomError> {
    if points.is_empty() {
        return Err(GeomError::EmptyInput);
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x().total_cmp(&b.x()).then(a.y().total_cmp(&b.y())));

    if sorted.len() < 3 {
        return Ok(sorted);
    }

    let upper = half_hull(&sorted);
    sorted.reverse();
    let lower = half_hull(&sorted);

    // The lower half's first and last points are the upper half's endpoints.
    let mut hull = upper;
    hull.extend_from_slice(&lower[1..lower.len() - 1]);
    Ok(hull)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y).unwrap()
    }

    /// Containment test against a clockwise hull: a point is inside (or on
    /// the boundary) iff it sits on or right of every directed edge.
    fn inside_hull(hull: &[Point], p: Point) -> bool {
        hull.iter()
            .zip(hull.iter().cycle().skip(1))
            .all(|(a, b)| a.vector_to(*b).cross(a.vector_to(p)) <= 1e-9)
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(convex_hull(&[]), Err(GeomError::EmptyInput));
    }

    #[test]
    fn test_fewer_than_three_points_returned_sorted() {
        assert_eq!(convex_hull(&[pt(3.0, 1.0)]).unwrap(), vec![pt(3.0, 1.0)]);
        assert_eq!(
            convex_hull(&[pt(3.0, 1.0), pt(0.0, 2.0)]).unwrap(),
            vec![pt(0.0, 2.0), pt(3.0, 1.0)]
        );
    }

    #[test]
    fn test_square_clockwise_from_leftmost() {
        let square = [pt(0.0, 0.0), pt(0.0, 2.0), pt(2.0, 2.0), pt(2.0, 0.0)];
        let hull = convex_hull(&square).unwrap();
        assert_eq!(
            hull,
            vec![pt(0.0, 0.0), pt(0.0, 2.0), pt(2.0, 2.0), pt(2.0, 0.0)]
        );
    }

    #[test]
    fn test_interior_point_excluded() {
        let points = [
            pt(0.0, 0.0),
            pt(0.0, 2.0),
            pt(2.0, 2.0),
            pt(2.0, 0.0),
            pt(1.0, 1.0),
        ];
        let hull = convex_hull(&points).unwrap();
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&pt(1.0, 1.0)));
        assert!(inside_hull(&hull, pt(1.0, 1.0)));
    }

    #[test]
    fn test_collinear_points_collapse_to_endpoints() {
        let points = [pt(0.0, 0.0), pt(1.0, 1.0), pt(2.0, 2.0), pt(3.0, 3.0)];
        let hull = convex_hull(&points).unwrap();
        assert_eq!(hull, vec![pt(0.0, 0.0), pt(3.0, 3.0)]);
    }

    #[test]
    fn test_edge_midpoint_eliminated() {
        // A strictly collinear point on a hull edge must not survive.
        let points = [pt(0.0, 0.0), pt(0.0, 2.0), pt(2.0, 2.0), pt(2.0, 0.0), pt(0.0, 1.0)];
        let hull = convex_hull(&points).unwrap();
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&pt(0.0, 1.0)));
    }

    #[test]
    fn test_equal_x_ties_break_by_ascending_y() {
        let points = [pt(0.0, 2.0), pt(0.0, 0.0), pt(1.0, 1.0)];
        let hull = convex_hull(&points).unwrap();
        assert_eq!(hull[0], pt(0.0, 0.0));
    }

    #[test]
    fn test_random_clouds_are_contained() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let points: Vec<Point> = (0..40)
                .map(|_| pt(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)))
                .collect();
            let hull = convex_hull(&points).unwrap();
            assert!(hull.len() >= 3);
            assert_eq!(hull[0].x(), hull.iter().map(Point::x).fold(f64::INFINITY, f64::min));
            for &p in &points {
                assert!(inside_hull(&hull, p), "point {p:?} escaped its hull");
            }
        }
    }

    #[test]
    fn test_no_three_consecutive_collinear_vertices() {
        let mut rng = StdRng::seed_from_u64(11);
        let points: Vec<Point> = (0..60)
            .map(|_| pt(rng.gen_range(0.0..10.0), rng.gen_range(0.0..10.0)))
            .collect();
        let hull = convex_hull(&points).unwrap();
        for i in 0..hull.len() {
            let a = hull[i];
            let b = hull[(i + 1) % hull.len()];
            let c = hull[(i + 2) % hull.len()];
            assert!(b.vector_to(a).cross(b.vector_to(c)).abs() > 0.0);
        }
    }
}
