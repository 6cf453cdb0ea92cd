// 2-D geometry kernel: points, vectors, circles.
//
// Value types are backed by glam's f64 vectors and constructed only through
// validating constructors, so every coordinate in the system is finite by
// the time any algorithm touches it.

use glam::DVec2;
use std::f64::consts::TAU;
use std::ops::{Add, Sub};
use thiserror::Error;

pub mod hull;
pub mod mec;

// Re-export the algorithm entry points next to the types they operate on.
pub use hull::convex_hull;
pub use mec::min_enclosing_circle;

/// Constructor and algorithm misuse. None of these are recoverable
/// internally; they propagate to the caller unmodified.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeomError {
    /// A point or vector coordinate was NaN or infinite.
    #[error("coordinate is not a finite number")]
    InvalidCoordinate,
    /// A circle radius was NaN, infinite, or negative.
    #[error("radius is not a finite non-negative number")]
    InvalidRadius,
    /// The zero vector has no direction to take a unit or heading of.
    #[error("zero-magnitude vector has no direction")]
    DegenerateVector,
    /// A convex hull was requested for zero points.
    #[error("convex hull of an empty point set")]
    EmptyInput,
}

// ============================================================================
// POINT
// ============================================================================

/// A point in the plane. Coordinates are finite by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point(DVec2);

impl Point {
    pub fn new(x: f64, y: f64) -> Result<Self, GeomError> {
        if x.is_finite() && y.is_finite() {
            Ok(Self(DVec2::new(x, y)))
        } else {
            Err(GeomError::InvalidCoordinate)
        }
    }

    pub fn x(&self) -> f64 { self.0.x }
    pub fn y(&self) -> f64 { self.0.y }

    /// Vector from this point to `other`.
    pub fn vector_to(&self, other: Point) -> Vector {
        Vector(other.0 - self.0)
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        self.0.distance(other.0)
    }

    /// Midpoint of the segment from this point to `other`.
    pub fn midpoint(&self, other: Point) -> Point {
        Point(self.0.midpoint(other.0))
    }
}

// ============================================================================
// VECTOR
// ============================================================================

/// A displacement `<i, j>` in the plane. Components are finite by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector(DVec2);

impl Vector {
    pub fn new(i: f64, j: f64) -> Result<Self, GeomError> {
        if i.is_finite() && j.is_finite() {
            Ok(Self(DVec2::new(i, j)))
        } else {
            Err(GeomError::InvalidCoordinate)
        }
    }

    pub fn i(&self) -> f64 { self.0.x }
    pub fn j(&self) -> f64 { self.0.y }

    pub fn magnitude(&self) -> f64 {
        self.0.length()
    }

    /// The vector with this heading scaled to magnitude 1.
    pub fn unit(&self) -> Result<Vector, GeomError> {
        let m = self.magnitude();
        if m == 0.0 {
            return Err(GeomError::DegenerateVector);
        }
        Ok(Vector(self.0 / m))
    }

    /// Heading in radians on `[0, 2π)`, measured counterclockwise from the
    /// positive i axis. The zero vector has no heading.
    pub fn heading(&self) -> Result<f64, GeomError> {
        if self.magnitude() == 0.0 {
            return Err(GeomError::DegenerateVector);
        }
        Ok(self.0.y.atan2(self.0.x).rem_euclid(TAU))
    }

    /// Heading in degrees on `[0, 360)`.
    pub fn heading_degrees(&self) -> Result<f64, GeomError> {
        Ok(self.heading()?.to_degrees())
    }

    pub fn dot(&self, other: Vector) -> f64 {
        self.0.dot(other.0)
    }

    /// 2-D scalar cross product `i1*j2 - i2*j1` — the signed area factor of
    /// the parallelogram the two vectors span.
    pub fn cross(&self, other: Vector) -> f64 {
        self.0.perp_dot(other.0)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

// ============================================================================
// CIRCLE
// ============================================================================

/// A circle with a finite, non-negative radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Result<Self, GeomError> {
        if radius.is_finite() && radius >= 0.0 {
            Ok(Self { center, radius })
        } else {
            Err(GeomError::InvalidRadius)
        }
    }

    pub fn center(&self) -> Point { self.center }
    pub fn radius(&self) -> f64 { self.radius }

    /// True if `point` lies inside or on the circle.
    pub fn contains(&self, point: Point) -> bool {
        self.center.distance_to(point) <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y).unwrap()
    }

    fn vec2(i: f64, j: f64) -> Vector {
        Vector::new(i, j).unwrap()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_point_rejects_non_finite_coordinates() {
        assert_eq!(Point::new(f64::NAN, 0.0), Err(GeomError::InvalidCoordinate));
        assert_eq!(Point::new(0.0, f64::INFINITY), Err(GeomError::InvalidCoordinate));
        assert_eq!(Vector::new(f64::NEG_INFINITY, 0.0), Err(GeomError::InvalidCoordinate));
    }

    #[test]
    fn test_vector_to_and_distance() {
        let v = pt(1.0, 2.0).vector_to(pt(4.0, 6.0));
        assert_eq!(v, vec2(3.0, 4.0));
        assert_close(pt(1.0, 2.0).distance_to(pt(4.0, 6.0)), 5.0);
    }

    #[test]
    fn test_magnitude_three_four_five() {
        assert_close(vec2(3.0, 4.0).magnitude(), 5.0);
    }

    #[test]
    fn test_unit_has_magnitude_one() {
        for v in [vec2(3.0, 4.0), vec2(-0.2, 0.001), vec2(1e8, -1e8)] {
            assert_close(v.unit().unwrap().magnitude(), 1.0);
        }
    }

    #[test]
    fn test_unit_of_zero_vector_fails() {
        assert_eq!(vec2(0.0, 0.0).unit(), Err(GeomError::DegenerateVector));
        assert_eq!(vec2(0.0, 0.0).heading(), Err(GeomError::DegenerateVector));
    }

    #[test]
    fn test_heading_quadrants() {
        assert_close(vec2(1.0, 0.0).heading().unwrap(), 0.0);
        assert_close(vec2(0.0, 1.0).heading().unwrap(), FRAC_PI_2);
        assert_close(vec2(-1.0, 0.0).heading().unwrap(), PI);
        // atan2 is negative below the axis; heading must wrap into [0, 2π).
        assert_close(vec2(0.0, -1.0).heading().unwrap(), 3.0 * FRAC_PI_2);
        assert_close(vec2(1.0, -1.0).heading_degrees().unwrap(), 315.0);
    }

    #[test]
    fn test_dot_and_cross() {
        let a = vec2(2.0, 3.0);
        let b = vec2(-1.0, 4.0);
        assert_close(a.dot(b), 10.0);
        assert_close(a.cross(b), 11.0);
        assert_close(b.cross(a), -11.0);
        // Perpendicular vectors: zero dot. Parallel vectors: zero cross.
        assert_close(vec2(1.0, 0.0).dot(vec2(0.0, 5.0)), 0.0);
        assert_close(vec2(2.0, 2.0).cross(vec2(3.0, 3.0)), 0.0);
    }

    #[test]
    fn test_add_sub() {
        assert_eq!(vec2(1.0, 2.0) + vec2(3.0, -1.0), vec2(4.0, 1.0));
        assert_eq!(vec2(1.0, 2.0) - vec2(3.0, -1.0), vec2(-2.0, 3.0));
    }

    #[test]
    fn test_circle_contains_boundary_point() {
        let c = Circle::new(pt(0.0, 0.0), 5.0).unwrap();
        assert!(c.contains(pt(3.0, 4.0)));
        assert!(c.contains(pt(0.0, 0.0)));
        assert!(!c.contains(pt(3.1, 4.1)));
    }

    #[test]
    fn test_circle_rejects_bad_radius() {
        let center = pt(0.0, 0.0);
        assert_eq!(Circle::new(center, -1.0), Err(GeomError::InvalidRadius));
        assert_eq!(Circle::new(center, f64::NAN), Err(GeomError::InvalidRadius));
        assert!(Circle::new(center, 0.0).is_ok());
    }
}
