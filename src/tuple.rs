use std::fmt;
use std::ops::{ Add, Sub, Neg, Mul, Div };

use serde::{ Serialize, Deserialize };

use crate::feq;

/// A location in 3D space.
///
/// Homogeneously, a point is the tuple `(x, y, z, 1)`. The implicit `w == 1`
/// is what makes translations move points but not vectors when multiplied by
/// a `Matrix4D`.
///
/// Points are compared approximately; see `crate::feq`.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A direction or displacement in 3D space (`w == 0`).
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PartialEq for Point {
    fn eq(&self, other: &Point) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z)
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Vector) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z)
    }
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Point {
        Point { x, y, z }
    }

    /// The point `(0, 0, 0)`.
    pub fn origin() -> Point {
        Point { x: 0.0, y: 0.0, z: 0.0 }
    }

    /// The homogeneous `w` component of every point.
    pub fn w(&self) -> f64 {
        1.0
    }
}

impl From<[f64; 3]> for Point {
    fn from(c: [f64; 3]) -> Point {
        Point { x: c[0], y: c[1], z: c[2] }
    }
}

impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Vector {
        Vector { x, y, z }
    }

    /// The homogeneous `w` component of every vector.
    pub fn w(&self) -> f64 {
        0.0
    }

    pub fn magnitude(&self) -> f64 {
        f64::sqrt(self.dot(self))
    }

    /// Scales a vector to unit length.
    ///
    /// # Panics
    ///
    /// The vector must have a nonzero magnitude. Normalizing a zero vector
    /// would produce NaN components, so it is treated as a caller bug.
    pub fn normalize(&self) -> Vector {
        let mag = self.magnitude();
        assert!(mag > 0.0, "cannot normalize a zero-length vector");

        *self / mag
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
    }

    pub fn cross(&self, other: &Vector) -> Vector {
        Vector {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Reflects a vector across a normal.
    pub fn reflect(&self, normal: &Vector) -> Vector {
        *self - (*normal * 2.0 * self.dot(normal))
    }
}

impl From<[f64; 3]> for Vector {
    fn from(c: [f64; 3]) -> Vector {
        Vector { x: c[0], y: c[1], z: c[2] }
    }
}

/// Moving a point along a vector yields another point.
impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, other: Vector) -> Point {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, other: Vector) -> Point {
        Point {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

/// The difference of two points is the vector from `other` to `self`.
impl Sub<Point> for Point {
    type Output = Vector;

    fn sub(self, other: Point) -> Vector {
        Vector {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y, z: -self.z }
    }
}

/// Implements scalar right-multiplication for a vector.
///
/// ```
/// use ray_caster::tuple::Vector;
///
/// let v = Vector::new(1.0, 2.0, 3.0);
/// assert_eq!(v * 5.0, Vector::new(5.0, 10.0, 15.0));
/// ```
impl Mul<f64> for Vector {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
        }
    }
}

/// Implements scalar left-multiplication for a vector.
impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, other: Vector) -> Vector {
        other * self
    }
}

impl Div<f64> for Vector {
    type Output = Self;

    fn div(self, other: f64) -> Self {
        Self {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {}, {})", self.x, self.y, self.z)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector({}, {}, {})", self.x, self.y, self.z)
    }
}

/* Tests */

#[test]
fn point_and_vector_w() {
    let p = Point::new(4.3, -4.2, 3.1);
    let v = Vector::new(4.3, -4.2, 3.1);

    assert_eq!(p.w(), 1.0);
    assert_eq!(v.w(), 0.0);
}

#[test]
fn add_vector_to_point() {
    let p = Point::new(3.0, -2.0, 5.0);
    let v = Vector::new(-2.0, 3.0, 1.0);

    assert_eq!(p + v, Point::new(1.0, 1.0, 6.0));
}

#[test]
fn sub_points() {
    let p1 = Point::new(3.0, 2.0, 1.0);
    let p2 = Point::new(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Vector::new(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vector_from_point() {
    let p = Point::new(3.0, 2.0, 1.0);
    let v = Vector::new(5.0, 6.0, 7.0);

    assert_eq!(p - v, Point::new(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vectors() {
    let v1 = Vector::new(3.0, 2.0, 1.0);
    let v2 = Vector::new(5.0, 6.0, 7.0);

    assert_eq!(v1 - v2, Vector::new(-2.0, -4.0, -6.0));
}

#[test]
fn point_vector_round_trip() {
    let p = Point::new(0.3, -12.5, 7.75);
    let v = Vector::new(1.1, 2.2, -3.3);

    assert_eq!((p + v) - v, p);
    assert_eq!((p - v) + v, p);
}

#[test]
fn neg_vector() {
    let v = Vector::new(1.0, -2.0, 3.0);

    assert_eq!(-v, Vector::new(-1.0, 2.0, -3.0));
}

#[test]
fn mul_scalar() {
    let v = Vector::new(1.0, -2.0, 3.0);

    assert_eq!(v * 3.5, Vector::new(3.5, -7.0, 10.5));
    assert_eq!(0.5 * v, Vector::new(0.5, -1.0, 1.5));
}

#[test]
fn div_scalar() {
    let v = Vector::new(1.0, -2.0, 3.0);

    assert_eq!(v / 2.0, Vector::new(0.5, -1.0, 1.5));
}

#[test]
fn equality_is_approximate() {
    let v = Vector::new(1.0, 2.0, 3.0);

    assert_eq!(v, Vector::new(1.000001, 2.0, 3.0));
    assert_ne!(v, Vector::new(1.001, 2.0, 3.0));
}

#[test]
fn magnitude_pos() {
    let v = Vector::new(1.0, 2.0, 3.0);

    assert_eq!(v.magnitude(), f64::sqrt(14.0));
}

#[test]
fn magnitude_neg() {
    let v = Vector::new(-1.0, -2.0, -3.0);

    assert_eq!(v.magnitude(), f64::sqrt(14.0));
}

#[test]
fn normalize_clean() {
    let v = Vector::new(4.0, 0.0, 0.0);

    assert_eq!(v.normalize(), Vector::new(1.0, 0.0, 0.0));
}

#[test]
fn normalize_dirty() {
    let v = Vector::new(1.0, 2.0, 3.0);
    let e = Vector::new(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );

    assert_eq!(v.normalize(), e);
}

#[test]
fn normalized_magnitude_is_one() {
    let vs = [
        Vector::new(1.0, 2.0, 3.0),
        Vector::new(-0.001, 0.0, 0.002),
        Vector::new(1e4, -3e3, 42.0),
    ];

    for v in vs.iter() {
        assert!(crate::feq(v.normalize().magnitude(), 1.0));
    }
}

#[test]
#[should_panic(expected = "zero-length")]
fn normalize_zero_vector_panics() {
    Vector::new(0.0, 0.0, 0.0).normalize();
}

#[test]
fn dot_vectors() {
    let a = Vector::new(1.0, 2.0, 3.0);
    let b = Vector::new(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
}

#[test]
fn cross_vectors() {
    let a = Vector::new(1.0, 2.0, 3.0);
    let b = Vector::new(2.0, 3.0, 4.0);

    assert_eq!(a.cross(&b), Vector::new(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a), Vector::new(1.0, -2.0, 1.0));
}

#[test]
fn cross_is_perpendicular() {
    let a = Vector::new(0.3, -1.7, 2.9);
    let b = Vector::new(-4.1, 0.6, 1.2);
    let c = a.cross(&b);

    assert!(crate::feq(c.dot(&a), 0.0));
    assert!(crate::feq(c.dot(&b), 0.0));
}

#[test]
fn reflect_45() {
    let v = Vector::new(1.0, -1.0, 0.0);
    let n = Vector::new(0.0, 1.0, 0.0);

    assert_eq!(v.reflect(&n), Vector::new(1.0, 1.0, 0.0));
}

#[test]
fn reflect_slanted() {
    let v = Vector::new(0.0, -1.0, 0.0);
    let n = Vector::new(2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0);

    assert_eq!(v.reflect(&n), Vector::new(1.0, 0.0, 0.0));
}

#[test]
fn display_tuples() {
    assert_eq!(Point::new(1.0, 2.5, -3.0).to_string(), "Point(1, 2.5, -3)");
    assert_eq!(Vector::new(0.0, 1.0, 0.0).to_string(), "Vector(0, 1, 0)");
}
