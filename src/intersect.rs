use std::ops::Index;

use crate::tuple::{ Point, Vector };
use crate::ray::Ray;
use crate::geometry::Sphere;

/// An intersection.
///
/// This structure assumes that some ray produced an intersection. Parameter `t`
/// is the offset along the ray, and `object` borrows the sphere that was hit.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub object: &'a Sphere,
}

/// Two intersections are equal if their offsets `t` agree within the crate
/// tolerance and they refer to the *same* sphere (pointer identity, not value
/// equality).
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        crate::feq(self.t, other.t) && std::ptr::eq(self.object, other.object)
    }
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, object: &'a Sphere) -> Intersection<'a> {
        Intersection { t, object }
    }
}

/// A collection of intersections, kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Intersections<'a> {
    pub intersections: Vec<Intersection<'a>>,
}

impl<'a> Intersections<'a> {
    pub fn new() -> Intersections<'a> {
        Intersections { intersections: Vec::new() }
    }

    pub fn push(&mut self, i: Intersection<'a>) {
        self.intersections.push(i);
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Intersection<'a>> {
        self.intersections.iter()
    }

    /// The visible hit: the intersection with the smallest non-negative `t`.
    ///
    /// Intersections behind the ray origin (negative `t`) and non-finite
    /// offsets are skipped. On equal offsets the earlier entry wins. Returns
    /// `None` when nothing qualifies, which is distinct from a hit at `t == 0`.
    pub fn hit(&self) -> Option<Intersection<'a>> {
        let mut best: Option<Intersection<'a>> = None;

        for i in self.intersections.iter() {
            if !i.t.is_finite() || i.t < 0.0 {
                continue;
            }

            match best {
                Some(b) if b.t <= i.t => {},
                _ => best = Some(*i),
            }
        }

        best
    }
}

impl<'a> From<Vec<Intersection<'a>>> for Intersections<'a> {
    fn from(intersections: Vec<Intersection<'a>>) -> Intersections<'a> {
        Intersections { intersections }
    }
}

impl<'a> Index<usize> for Intersections<'a> {
    type Output = Intersection<'a>;

    fn index(&self, index: usize) -> &Intersection<'a> {
        &self.intersections[index]
    }
}

/// Intersects a ray with a sphere.
///
/// The ray is first moved into the sphere's object space with the sphere's
/// inverse transform; the sphere itself is never moved. Then
/// `|o + t·d - center|² = r²` is solved for `t`.
///
/// A miss yields an empty list. Otherwise both roots come back in ascending
/// order, including negative ones (the sphere is behind, or around, the ray
/// origin) and the doubled root of a tangent ray.
pub fn intersect<'a>(s: &'a Sphere, r: &Ray) -> Intersections<'a> {
    let transformed_ray = r.transform(s.inverse_transform());
    let sphere_to_ray = transformed_ray.origin - s.origin();

    let a = transformed_ray.direction.dot(&transformed_ray.direction);
    let b = 2.0 * transformed_ray.direction.dot(&sphere_to_ray);
    let c = sphere_to_ray.dot(&sphere_to_ray) - s.radius().powi(2);

    let discriminant = b.powi(2) - (4.0 * a * c);
    if discriminant < 0.0 {
        return Intersections::new();
    }

    let root = discriminant.sqrt();
    let t1 = (-b - root) / (2.0 * a);
    let t2 = (-b + root) / (2.0 * a);

    vec![Intersection::new(t1, s), Intersection::new(t2, s)].into()
}

/// A record of everything shading needs to know about a hit.
#[derive(Clone, Debug)]
pub struct IntersectionComputation<'a> {
    /// The "time" of the ray intersection.
    pub t: f64,

    /// The object being intersected.
    pub object: &'a Sphere,

    /// The point where the intersection occurs.
    pub point: Point,

    /// The eye vector, pointing back along the ray.
    pub eyev: Vector,

    /// The outward surface normal at `point`.
    pub normalv: Vector,

    /// Whether the ray started inside the object (the normal faces away from
    /// the eye).
    pub inside: bool,
}

impl<'a> IntersectionComputation<'a> {
    pub fn new(r: &Ray, hit: &Intersection<'a>) -> IntersectionComputation<'a> {
        let point = r.position(hit.t);
        let eyev = -r.direction;
        let normalv = hit.object.normal_at(point);
        let inside = normalv.dot(&eyev) < 0.0;

        IntersectionComputation {
            t: hit.t,
            object: hit.object,
            point,
            eyev,
            normalv,
            inside,
        }
    }
}

#[cfg(test)]
use crate::matrix::Matrix4D;

#[cfg(test)]
fn along_z(x: f64, y: f64, z: f64) -> Ray {
    Ray::new(Point::new(x, y, z), Vector::new(0.0, 0.0, 1.0))
}

#[test]
fn ray_pierces_sphere() {
    let s = Sphere::unit();
    let xs = along_z(0.0, 0.0, -5.0).intersect(&s);

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, 4.0);
    assert_eq!(xs[1].t, 6.0);
}

#[test]
fn ray_is_tangent_to_sphere() {
    let s = Sphere::unit();
    let xs = along_z(0.0, 1.0, -5.0).intersect(&s);

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, 5.0);
    assert_eq!(xs[1].t, 5.0);
}

#[test]
fn ray_misses_sphere() {
    let s = Sphere::unit();
    let xs = along_z(0.0, 2.0, -5.0).intersect(&s);

    assert!(xs.is_empty());
    assert_eq!(xs.hit(), None);
}

#[test]
fn ray_is_inside_sphere() {
    let s = Sphere::unit();
    let xs = along_z(0.0, 0.0, 0.0).intersect(&s);

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, -1.0);
    assert_eq!(xs[1].t, 1.0);
}

#[test]
fn sphere_is_behind_ray() {
    let s = Sphere::unit();
    let xs = along_z(0.0, 0.0, 5.0).intersect(&s);

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, -6.0);
    assert_eq!(xs[1].t, -4.0);
    assert_eq!(xs.hit(), None);
}

#[test]
fn intersections_reference_the_sphere() {
    let s = Sphere::unit();
    let xs = along_z(0.0, 0.0, -5.0).intersect(&s);

    assert!(xs.iter().all(|i| std::ptr::eq(i.object, &s)));
}

#[test]
fn intersection_equality_is_tolerant() {
    let s = Sphere::unit();
    let other = Sphere::unit();

    assert_eq!(Intersection::new(3.5, &s), Intersection::new(3.5 + 1e-6, &s));
    assert_ne!(Intersection::new(3.5, &s), Intersection::new(3.6, &s));
    assert_ne!(Intersection::new(3.5, &s), Intersection::new(3.5, &other));
}

#[test]
fn hit_with_all_positive() {
    let s = Sphere::unit();
    let i1 = Intersection::new(1.0, &s);
    let i2 = Intersection::new(2.0, &s);
    let xs: Intersections = vec![i2, i1].into();

    assert_eq!(xs.hit(), Some(i1));
}

#[test]
fn hit_with_some_negative() {
    let s = Sphere::unit();
    let i1 = Intersection::new(-1.0, &s);
    let i2 = Intersection::new(1.0, &s);
    let xs: Intersections = vec![i2, i1].into();

    assert_eq!(xs.hit(), Some(i2));
}

#[test]
fn hit_with_all_negative() {
    let s = Sphere::unit();
    let xs: Intersections = vec![
        Intersection::new(-2.0, &s),
        Intersection::new(-1.0, &s),
    ].into();

    assert_eq!(xs.hit(), None);
}

#[test]
fn hit_multiple() {
    let s = Sphere::unit();
    let i1 = Intersection::new(5.0, &s);
    let i2 = Intersection::new(7.0, &s);
    let i3 = Intersection::new(-3.0, &s);
    let i4 = Intersection::new(2.0, &s);
    let mut xs = Intersections::new();
    for i in [i1, i2, i3, i4].iter() {
        xs.push(*i);
    }

    assert_eq!(xs.hit(), Some(i4));
    // The list itself is not reordered
    assert_eq!(xs[0], i1);
}

#[test]
fn hit_at_zero_is_a_hit() {
    let s = Sphere::unit();
    let xs: Intersections = vec![Intersection::new(0.0, &s)].into();

    assert_eq!(xs.hit().map(|i| i.t), Some(0.0));
}

#[test]
fn hit_tie_keeps_insertion_order() {
    let a = Sphere::unit();
    let b = Sphere::unit();
    let xs: Intersections = vec![
        Intersection::new(3.0, &a),
        Intersection::new(3.0, &b),
    ].into();

    assert!(std::ptr::eq(xs.hit().unwrap().object, &a));
}

#[test]
fn hit_skips_nan() {
    let s = Sphere::unit();
    let xs: Intersections = vec![
        Intersection::new(f64::NAN, &s),
        Intersection::new(2.0, &s),
    ].into();

    assert_eq!(xs.hit().map(|i| i.t), Some(2.0));
}

#[test]
fn ray_hits_scaled_sphere() {
    let s = Sphere::unit()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))
        .unwrap();
    let xs = along_z(0.0, 0.0, -5.0).intersect(&s);

    assert_eq!(xs.len(), 2);
    assert!(crate::feq(xs[0].t, 3.0));
    assert!(crate::feq(xs[1].t, 7.0));
}

#[test]
fn ray_misses_translated_sphere() {
    let s = Sphere::unit()
        .with_transform(Matrix4D::translation(5.0, 0.0, 0.0))
        .unwrap();
    let xs = along_z(0.0, 0.0, -5.0).intersect(&s);

    assert!(xs.is_empty());
}

#[test]
fn ray_hits_large_offset_sphere() {
    let s = Sphere::new(Point::new(0.0, 0.0, 2.0), 2.0);
    let xs = along_z(0.0, 0.0, -5.0).intersect(&s);

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, 5.0);
    assert_eq!(xs[1].t, 9.0);
}

#[test]
fn precompute_intersection_state() {
    let r = along_z(0.0, 0.0, -5.0);
    let shape = Sphere::unit();
    let i = Intersection::new(4.0, &shape);

    let comps = IntersectionComputation::new(&r, &i);

    assert!(std::ptr::eq(comps.object, i.object));
    assert_eq!(comps.t, i.t);
    assert_eq!(comps.point, Point::new(0.0, 0.0, -1.0));
    assert_eq!(comps.eyev, Vector::new(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Vector::new(0.0, 0.0, -1.0));
    assert!(!comps.inside);
}

#[test]
fn precompute_inside_intersection() {
    let r = along_z(0.0, 0.0, 0.0);
    let shape = Sphere::unit();
    let i = Intersection::new(1.0, &shape);

    let comps = IntersectionComputation::new(&r, &i);

    assert!(comps.inside);
    assert_eq!(comps.point, Point::new(0.0, 0.0, 1.0));
    assert_eq!(comps.eyev, Vector::new(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Vector::new(0.0, 0.0, 1.0));
}
