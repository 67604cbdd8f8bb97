use crate::error::TransformError;
use crate::tuple::{ Point, Vector };
use crate::matrix::Matrix4D;
use crate::light::Material;

/// A sphere, the one primitive the caster understands.
///
/// In object space the sphere sits at `origin` with radius `radius` (the unit
/// sphere at the world origin by default). `transform` places it in the
/// world. The inverse of `transform` is computed once when the transform is
/// set, so intersecting and shading never have to deal with a singular
/// matrix: a degenerate transform is rejected up front.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    origin: Point,
    radius: f64,

    transform: Matrix4D,
    inverse: Matrix4D,

    pub material: Material,
}

impl Default for Sphere {
    fn default() -> Sphere {
        Sphere::unit()
    }
}

impl Sphere {
    /// Creates a sphere at `origin` with `radius`, untransformed.
    ///
    /// # Panics
    ///
    /// The radius must be positive and finite.
    pub fn new(origin: Point, radius: f64) -> Sphere {
        assert!(radius > 0.0 && radius.is_finite(),
            "sphere radius must be positive, got {}", radius);

        Sphere {
            origin,
            radius,
            transform: Matrix4D::identity(),
            inverse: Matrix4D::identity(),
            material: Default::default(),
        }
    }

    /// The unit sphere at the origin.
    pub fn unit() -> Sphere {
        Sphere::new(Point::origin(), 1.0)
    }

    pub fn with_material(mut self, material: Material) -> Sphere {
        self.material = material;
        self
    }

    /// Builder form of `set_transform`.
    pub fn with_transform(mut self, transform: Matrix4D)
        -> Result<Sphere, TransformError> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// Replaces the object-to-world transform.
    ///
    /// On a singular transform the sphere is left unchanged.
    pub fn set_transform(&mut self, transform: Matrix4D)
        -> Result<(), TransformError> {
        self.inverse = transform.inverse()?;
        self.transform = transform;

        Ok(())
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// World-to-object transform.
    pub fn inverse_transform(&self) -> &Matrix4D {
        &self.inverse
    }

    /// The outward surface normal at a world-space point on the sphere.
    ///
    /// The point is taken into object space, where the normal is just the
    /// direction from the center. Going back to world space uses the
    /// inverse-transpose, which keeps the normal perpendicular to the surface
    /// under non-uniform scaling. Multiplying a `Vector` drops the
    /// translation part, so `w` stays `0`.
    pub fn normal_at(&self, at: Point) -> Vector {
        let object_point = self.inverse * at;
        let object_normal = object_point - self.origin;
        let world_normal = self.inverse.transposition() * object_normal;

        world_normal.normalize()
    }
}

#[test]
fn default_sphere() {
    let s = Sphere::default();

    assert_eq!(s.origin(), Point::origin());
    assert_eq!(s.radius(), 1.0);
    assert_eq!(*s.transform(), Matrix4D::identity());
    assert_eq!(s.material, Material::default());
}

#[test]
fn change_transform() {
    let mut s = Sphere::unit();
    let t = Matrix4D::translation(2.0, 3.0, 4.0);
    s.set_transform(t).unwrap();

    assert_eq!(*s.transform(), t);
    assert_eq!(*s.inverse_transform(), Matrix4D::translation(-2.0, -3.0, -4.0));
}

#[test]
fn degenerate_transform_is_rejected() {
    let mut s = Sphere::unit();
    let res = s.set_transform(Matrix4D::scaling(0.0, 1.0, 1.0));

    assert!(matches!(res, Err(TransformError::Degenerate { .. })));
    assert_eq!(*s.transform(), Matrix4D::identity());
}

#[test]
fn assign_material() {
    let m = Material { ambient: 1.0, ..Default::default() };
    let s = Sphere::unit().with_material(m);

    assert_eq!(s.material, m);
}

#[test]
#[should_panic(expected = "radius must be positive")]
fn zero_radius_panics() {
    Sphere::new(Point::origin(), 0.0);
}

#[test]
fn normal_on_sphere_axes() {
    let s = Sphere::unit();

    assert_eq!(s.normal_at(Point::new(1.0, 0.0, 0.0)), Vector::new(1.0, 0.0, 0.0));
    assert_eq!(s.normal_at(Point::new(0.0, 1.0, 0.0)), Vector::new(0.0, 1.0, 0.0));
    assert_eq!(s.normal_at(Point::new(0.0, 0.0, 1.0)), Vector::new(0.0, 0.0, 1.0));
}

#[test]
fn normal_on_sphere_nonaxial() {
    let s = Sphere::unit();
    let k = 3.0f64.sqrt() / 3.0;
    let n = s.normal_at(Point::new(k, k, k));

    assert_eq!(n, Vector::new(k, k, k));
    assert_eq!(n, n.normalize());
}

#[test]
fn normal_on_sphere_translated() {
    let s = Sphere::unit()
        .with_transform(Matrix4D::translation(0.0, 1.0, 0.0))
        .unwrap();
    let n = s.normal_at(Point::new(0.0, 1.70711, -0.70711));

    assert_eq!(n, Vector::new(0.0, 0.70711, -0.70711));
}

#[test]
fn normal_on_sphere_transformed() {
    let s = Sphere::unit()
        .with_transform(Matrix4D::scaling(1.0, 0.5, 1.0)
            * Matrix4D::rotation_z(std::f64::consts::PI / 5.0))
        .unwrap();
    let n = s.normal_at(
        Point::new(0.0, 2.0f64.sqrt() / 2.0, -(2.0f64.sqrt() / 2.0))
    );

    assert_eq!(n, Vector::new(0.0, 0.97014, -0.24254));
}

#[test]
fn normal_on_offset_sphere() {
    let s = Sphere::new(Point::new(1.0, 0.0, 0.0), 2.0);
    let n = s.normal_at(Point::new(1.0, 2.0, 0.0));

    assert_eq!(n, Vector::new(0.0, 1.0, 0.0));
}
