use serde::{ Serialize, Deserialize };

use crate::color::Color;
use crate::tuple::{ Point, Vector };

/// A point light.
///
/// A very simple light source. Provides a color and a position where light is
/// produced from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub intensity: Color,
    pub position: Point,
}

impl PointLight {
    pub fn new(intensity: Color, position: Point) -> PointLight {
        PointLight { intensity, position }
    }
}

/// A material record.
///
/// Materials use attributes from the Phong reflection model; ambient, diffuse,
/// specular and shininess. All four coefficients are expected to be
/// non-negative; `shininess` is an exponent.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub color: Color,

    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::white(),

            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
        }
    }
}

impl Material {
    /// Creates a material with the default coefficients and a given color.
    pub fn with_color(color: Color) -> Material {
        Material { color, ..Default::default() }
    }

    /// Names the first negative coefficient, if any.
    pub fn negative_coefficient(&self) -> Option<&'static str> {
        [
            ("ambient", self.ambient),
            ("diffuse", self.diffuse),
            ("specular", self.specular),
            ("shininess", self.shininess),
        ]
            .iter()
            .find(|(_, v)| *v < 0.0)
            .map(|(name, _)| *name)
    }
}

/// Calculate the lighting of a point on a surface.
///
/// Effectively, this function takes a material, a single light, a point, the
/// eye vector and the normal vector, and calculates how the light looks from
/// the eye. Both vectors are expected to be normalized.
///
/// The result is the sum of three Phong terms. Ambient light is always
/// present. Diffuse and specular light vanish when the light sits behind the
/// surface, and specular light also vanishes when the reflection points away
/// from the eye.
///
/// A light sitting exactly on `point` has no direction, so only ambient light
/// reaches the point.
///
/// For several lights, call this once per light and sum the results.
pub fn lighting(m: &Material, light: &PointLight, point: Point, eyev: Vector,
    normalv: Vector) -> Color {
    // Combine surface color with light's color
    let effective_color = m.color * light.intensity;
    let ambient = effective_color * m.ambient;

    let to_light = light.position - point;
    if to_light.magnitude() == 0.0 {
        return ambient;
    }

    // Find direction to light source
    let lightv = to_light.normalize();

    // The light is on the far side of the surface
    let light_dot_normal = lightv.dot(&normalv);
    if light_dot_normal < 0.0 {
        return ambient;
    }

    let diffuse = effective_color * m.diffuse * light_dot_normal;

    let reflectv = -lightv.reflect(&normalv);
    let reflect_dot_eye = reflectv.dot(&eyev);

    let specular = if reflect_dot_eye <= 0.0 {
        Color::black()
    } else {
        let factor = reflect_dot_eye.powf(m.shininess);
        light.intensity * m.specular * factor
    };

    ambient + diffuse + specular
}

#[cfg(test)]
fn front_lit() -> (Material, Point, Vector) {
    (Material::default(), Point::origin(), Vector::new(0.0, 0.0, -1.0))
}

#[test]
fn default_material() {
    let m = Material::default();

    assert_eq!(m.color, Color::white());
    assert_eq!(m.ambient, 0.1);
    assert_eq!(m.diffuse, 0.9);
    assert_eq!(m.specular, 0.9);
    assert_eq!(m.shininess, 200.0);
    assert_eq!(m.negative_coefficient(), None);
}

#[test]
fn negative_coefficient_is_reported() {
    let m = Material { specular: -0.5, ..Default::default() };
    assert_eq!(m.negative_coefficient(), Some("specular"));
}

#[test]
fn point_light_fields() {
    let light = PointLight::new(Color::white(), Point::origin());

    assert_eq!(light.intensity, Color::white());
    assert_eq!(light.position, Point::origin());
}

#[test]
fn eye_between_light_and_surface() {
    let (m, position, normalv) = front_lit();
    let eyev = Vector::new(0.0, 0.0, -1.0);
    let light = PointLight::new(Color::white(), Point::new(0.0, 0.0, -10.0));

    let res = lighting(&m, &light, position, eyev, normalv);
    assert_eq!(res, Color::rgb(1.9, 1.9, 1.9));
}

#[test]
fn eye_between_light_and_surface_offset_45() {
    let (m, position, normalv) = front_lit();
    let eyev = Vector::new(0.0, 2.0f64.sqrt() / 2.0, -(2.0f64.sqrt()) / 2.0);
    let light = PointLight::new(Color::white(), Point::new(0.0, 0.0, -10.0));

    let res = lighting(&m, &light, position, eyev, normalv);
    assert_eq!(res, Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn eye_opposite_from_surface_offset_45() {
    let (m, position, normalv) = front_lit();
    let eyev = Vector::new(0.0, 0.0, -1.0);
    let light = PointLight::new(Color::white(), Point::new(0.0, 10.0, -10.0));

    let res = lighting(&m, &light, position, eyev, normalv);
    assert_eq!(res, Color::rgb(0.7364, 0.7364, 0.7364));
}

#[test]
fn eye_in_path_of_reflection() {
    let (m, position, normalv) = front_lit();
    let eyev = Vector::new(0.0, -(2.0f64.sqrt()) / 2.0, -(2.0f64.sqrt()) / 2.0);
    let light = PointLight::new(Color::white(), Point::new(0.0, 10.0, -10.0));

    let res = lighting(&m, &light, position, eyev, normalv);
    assert_eq!(res, Color::rgb(1.6364, 1.6364, 1.6364));
}

#[test]
fn light_behind_surface() {
    let (m, position, normalv) = front_lit();
    let eyev = Vector::new(0.0, 0.0, -1.0);
    let light = PointLight::new(Color::white(), Point::new(0.0, 0.0, 10.0));

    let res = lighting(&m, &light, position, eyev, normalv);
    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn colored_light_tints_surface() {
    let m = Material::with_color(Color::rgb(1.0, 0.5, 0.0));
    let light = PointLight::new(Color::rgb(0.5, 1.0, 1.0),
        Point::new(0.0, 0.0, 10.0));

    let res = lighting(&m, &light, Point::origin(),
        Vector::new(0.0, 0.0, -1.0), Vector::new(0.0, 0.0, -1.0));
    assert_eq!(res, Color::rgb(0.05, 0.05, 0.0));
}

#[test]
fn light_at_the_point_is_ambient_only() {
    let (m, position, normalv) = front_lit();
    let light = PointLight::new(Color::white(), position);

    let res = lighting(&m, &light, position, Vector::new(0.0, 0.0, -1.0), normalv);
    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}
