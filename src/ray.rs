use crate::tuple::{ Point, Vector };
use crate::matrix::Matrix4D;
use crate::geometry::Sphere;
use crate::intersect::{ Intersections, intersect };

/// A half-line from `origin` along `direction`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vector,
}

impl Ray {
    pub fn new(origin: Point, direction: Vector) -> Ray {
        Ray { origin, direction }
    }

    /// The point `t` units along the ray.
    pub fn position(&self, t: f64) -> Point {
        self.origin + (t * self.direction)
    }

    /// Transforms both the origin and the direction of a ray.
    pub fn transform(&self, m: &Matrix4D) -> Ray {
        Ray {
            origin: *m * self.origin,
            direction: *m * self.direction,
        }
    }

    /// Intersects this ray with a sphere. See `intersect::intersect`.
    pub fn intersect<'a>(&self, sphere: &'a Sphere) -> Intersections<'a> {
        intersect(sphere, self)
    }
}

#[test]
fn ray_position() {
    let r = Ray::new(Point::new(2.0, 3.0, 4.0), Vector::new(1.0, 0.0, 0.0));

    assert_eq!(r.position(0.0), Point::new(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Point::new(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Point::new(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Point::new(4.5, 3.0, 4.0));
}

#[test]
fn ray_translation() {
    let r = Ray::new(Point::new(1.0, 2.0, 3.0), Vector::new(0.0, 1.0, 0.0));
    let t = r.transform(&Matrix4D::translation(3.0, 4.0, 5.0));

    assert_eq!(t.origin, Point::new(4.0, 6.0, 8.0));
    assert_eq!(t.direction, Vector::new(0.0, 1.0, 0.0));
}

#[test]
fn ray_scaling() {
    let r = Ray::new(Point::new(1.0, 2.0, 3.0), Vector::new(0.0, 1.0, 0.0));
    let t = r.transform(&Matrix4D::scaling(2.0, 3.0, 4.0));

    assert_eq!(t.origin, Point::new(2.0, 6.0, 12.0));
    assert_eq!(t.direction, Vector::new(0.0, 3.0, 0.0));
}

#[test]
fn transform_leaves_original_untouched() {
    let r = Ray::new(Point::new(1.0, 2.0, 3.0), Vector::new(0.0, 1.0, 0.0));
    let _ = r.transform(&Matrix4D::scaling(2.0, 3.0, 4.0));

    assert_eq!(r.origin, Point::new(1.0, 2.0, 3.0));
}
