use serde::{ Serialize, Deserialize };
use tracing::{ debug, info };

use crate::canvas::Canvas;
use crate::color::Color;
use crate::consts::{ WALL_Z, WALL_SIZE };
use crate::geometry::Sphere;
use crate::intersect::IntersectionComputation;
use crate::light::{ PointLight, lighting };
use crate::ray::Ray;
use crate::tuple::Point;

/// The virtual wall the canvas is projected onto.
///
/// The wall is a square of side `size`, centered on the z axis at depth `z`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wall {
    pub z: f64,
    pub size: f64,
}

impl Default for Wall {
    fn default() -> Wall {
        Wall { z: WALL_Z, size: WALL_SIZE }
    }
}

impl Wall {
    /// The wall point that pixel `(x, y)` of a `width` pixel wide canvas maps
    /// to. Pixels are square, so only the width sets the scale.
    pub fn point_for(&self, width: usize, x: usize, y: usize) -> Point {
        let pixel_size = self.size / width as f64;
        let half = self.size / 2.0;

        let world_x = -half + pixel_size * x as f64;
        let world_y = half - pixel_size * y as f64;

        Point::new(world_x, world_y, self.z)
    }
}

/// Summary of one pass over a canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CastStats {
    pub pixels: usize,
    pub hits: usize,
}

/// Casts a silhouette of `sphere` onto `canvas`.
///
/// Every pixel whose ray hits the sphere is painted in the material color.
/// Other pixels are left as they are.
///
/// # Panics
///
/// The eye must not lie on the wall plane (`eye.z == wall.z`): a pixel that
/// maps onto the eye leaves its ray without a direction.
pub fn cast_unshaded(canvas: &mut Canvas, eye: Point, sphere: &Sphere,
    wall: Wall) -> CastStats {
    cast_with(canvas, eye, sphere, wall, |_| sphere.material.color)
}

/// Casts `sphere` onto `canvas`, lit by `light`.
///
/// Hit pixels get the Phong lighting at the hit point, seen from the eye.
///
/// # Panics
///
/// Same precondition as `cast_unshaded`.
pub fn cast_shaded(canvas: &mut Canvas, eye: Point, sphere: &Sphere,
    light: &PointLight, wall: Wall) -> CastStats {
    cast_with(canvas, eye, sphere, wall, |comps| {
        lighting(&sphere.material, light, comps.point, comps.eyev, comps.normalv)
    })
}

fn cast_with<F>(canvas: &mut Canvas, eye: Point, sphere: &Sphere, wall: Wall,
    shade: F) -> CastStats
    where F: Fn(&IntersectionComputation) -> Color {
    debug!(width = canvas.width, height = canvas.height, ?eye, ?wall,
        "casting sphere");

    let mut stats = CastStats::default();

    for y in 0..canvas.height {
        for x in 0..canvas.width {
            let target = wall.point_for(canvas.width, x, y);
            let ray = Ray::new(eye, (target - eye).normalize());

            stats.pixels += 1;

            if let Some(hit) = ray.intersect(sphere).hit() {
                let comps = IntersectionComputation::new(&ray, &hit);
                canvas.write_pixel(x, y, shade(&comps));
                stats.hits += 1;
            }
        }
    }

    info!(pixels = stats.pixels, hits = stats.hits, "cast finished");
    stats
}

#[cfg(test)]
use crate::matrix::Matrix4D;

#[cfg(test)]
fn small_canvas() -> Canvas {
    Canvas::new(20, 20)
}

#[test]
fn wall_maps_corners_and_center() {
    let wall = Wall::default();

    assert_eq!(wall.point_for(100, 0, 0), Point::new(-3.5, 3.5, 10.0));
    assert_eq!(wall.point_for(100, 50, 50), Point::new(0.0, 0.0, 10.0));
    assert_eq!(wall.point_for(100, 99, 99), Point::new(3.43, -3.43, 10.0));
}

#[test]
fn unshaded_cast_paints_silhouette() {
    let mut canvas = small_canvas();
    let sphere = Sphere::unit();
    let eye = Point::new(0.0, 0.0, -5.0);

    let stats = cast_unshaded(&mut canvas, eye, &sphere, Wall::default());

    assert_eq!(stats.pixels, 400);
    assert!(stats.hits > 0 && stats.hits < 400);
    assert_eq!(canvas.pixel_at(10, 10), sphere.material.color);
    assert_eq!(canvas.pixel_at(0, 0), Color::black());

    let painted = canvas.pixels().iter()
        .filter(|p| **p == sphere.material.color)
        .count();
    assert_eq!(painted, stats.hits);
}

#[test]
fn unshaded_cast_is_symmetric() {
    let mut canvas = small_canvas();
    cast_unshaded(&mut canvas, Point::new(0.0, 0.0, -5.0), &Sphere::unit(),
        Wall::default());

    // Column 0 and row 0 sit on the wall's edge; the rest mirrors around 10
    for y in 1..20 {
        for x in 1..20 {
            assert_eq!(canvas.pixel_at(x, y), canvas.pixel_at(20 - x, y));
            assert_eq!(canvas.pixel_at(x, y), canvas.pixel_at(x, 20 - y));
        }
    }
}

#[test]
fn translated_sphere_leaves_no_hits() {
    let mut canvas = small_canvas();
    let sphere = Sphere::unit()
        .with_transform(Matrix4D::translation(100.0, 0.0, 0.0))
        .unwrap();

    let stats = cast_unshaded(&mut canvas, Point::new(0.0, 0.0, -5.0), &sphere,
        Wall::default());

    assert_eq!(stats.hits, 0);
    assert_eq!(canvas, small_canvas());
}

#[test]
fn shaded_cast_lights_front_of_sphere() {
    let mut canvas = small_canvas();
    let sphere = Sphere::unit();
    let light = PointLight::new(Color::white(), Point::new(0.0, 0.0, -10.0));

    let stats = cast_shaded(&mut canvas, Point::new(0.0, 0.0, -5.0), &sphere,
        &light, Wall::default());

    assert!(stats.hits > 0);

    // The center ray hits the sphere head on, eye and light behind it
    assert_eq!(canvas.pixel_at(10, 10), Color::rgb(1.9, 1.9, 1.9));

    // Near the rim, light grazes the surface
    let rim = canvas.pixels().iter()
        .filter(|p| **p != Color::black())
        .map(|p| p.r)
        .fold(f64::INFINITY, f64::min);
    assert!(rim < 1.9);
}

#[test]
fn shaded_cast_with_light_behind_is_ambient_only() {
    let mut canvas = small_canvas();
    let sphere = Sphere::unit();
    let light = PointLight::new(Color::white(), Point::new(0.0, 0.0, 10.0));

    cast_shaded(&mut canvas, Point::new(0.0, 0.0, -5.0), &sphere, &light,
        Wall::default());

    assert_eq!(canvas.pixel_at(10, 10), Color::rgb(0.1, 0.1, 0.1));
}

#[test]
#[should_panic(expected = "zero-length vector")]
fn eye_on_the_wall_panics() {
    let mut canvas = Canvas::new(10, 10);
    cast_unshaded(&mut canvas, Point::new(0.0, 0.0, 10.0), &Sphere::unit(),
        Wall::default());
}
