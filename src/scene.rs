use std::convert::TryFrom;
use std::fs;
use std::path::Path;

use serde::{ Serialize, Deserialize };
use tracing::{ debug, info };

use crate::canvas::Canvas;
use crate::cast::{ Wall, CastStats, cast_shaded, cast_unshaded };
use crate::color::Color;
use crate::consts::{ CANVAS_WIDTH, CANVAS_HEIGHT, EYE, LIGHT_POSITION, SPHERE_COLOR };
use crate::error::SceneError;
use crate::feq;
use crate::geometry::Sphere;
use crate::light::{ Material, PointLight };
use crate::matrix::{ Matrix4D, ShearAxis };
use crate::tuple::Point;

/// Everything needed to cast one image: a canvas size, an eye, a wall, a
/// light and the sphere.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub canvas_width: usize,
    pub canvas_height: usize,

    pub eye: Point,
    pub wall: Wall,

    /// Whether to light the sphere or only paint its silhouette.
    pub shaded: bool,

    pub light: PointLight,
    pub sphere: Sphere,
}

impl Default for Scene {
    fn default() -> Scene {
        Scene {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            eye: EYE.into(),
            wall: Wall::default(),
            shaded: true,
            light: PointLight::new(Color::white(), LIGHT_POSITION.into()),
            sphere: Sphere::unit().with_material(Material::with_color(SPHERE_COLOR)),
        }
    }
}

impl Scene {
    /// Parses a JSON scene description.
    pub fn from_json_str(json: &str) -> Result<Scene, SceneError> {
        let scene_json: SceneJson = serde_json::from_str(json)?;
        Scene::try_from(scene_json)
    }

    /// Reads and parses a JSON scene description from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let scene = Scene::from_json_str(&json)?;

        info!(path = %path.display(), width = scene.canvas_width,
            height = scene.canvas_height, shaded = scene.shaded, "loaded scene");
        Ok(scene)
    }

    /// Changes the canvas size, keeping the rest of the scene.
    pub fn with_size(mut self, width: usize, height: usize)
        -> Result<Scene, SceneError> {
        check_canvas_size(width, height)?;

        self.canvas_width = width;
        self.canvas_height = height;
        Ok(self)
    }

    /// Casts the scene onto a fresh canvas.
    pub fn render(&self) -> (Canvas, CastStats) {
        let mut canvas = Canvas::new(self.canvas_width, self.canvas_height);

        let stats = if self.shaded {
            cast_shaded(&mut canvas, self.eye, &self.sphere, &self.light, self.wall)
        } else {
            cast_unshaded(&mut canvas, self.eye, &self.sphere, self.wall)
        };

        (canvas, stats)
    }
}

/// The JSON form of a `Scene`. Every field is optional.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneJson {
    canvas_width: usize,
    canvas_height: usize,

    eye: Point,
    wall: Wall,
    shaded: bool,

    light: PointLight,
    sphere: SphereJson,
}

impl Default for SceneJson {
    fn default() -> SceneJson {
        let scene = Scene::default();

        SceneJson {
            canvas_width: scene.canvas_width,
            canvas_height: scene.canvas_height,
            eye: scene.eye,
            wall: scene.wall,
            shaded: scene.shaded,
            light: scene.light,
            sphere: SphereJson::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SphereJson {
    origin: Point,
    radius: f64,
    material: Material,

    /// Applied in list order: the first step acts on the sphere first.
    transforms: Vec<TransformStep>,
}

impl Default for SphereJson {
    fn default() -> SphereJson {
        SphereJson {
            origin: Point::origin(),
            radius: 1.0,
            material: Material::with_color(SPHERE_COLOR),
            transforms: Vec::new(),
        }
    }
}

/// One step of an object transform, e.g. `{"op": "rotate_z", "radians": 0.5}`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransformStep {
    Translate { x: f64, y: f64, z: f64 },
    Scale { x: f64, y: f64, z: f64 },
    RotateX { radians: f64 },
    RotateY { radians: f64 },
    RotateZ { radians: f64 },
    Shear { axis: ShearAxis },
}

impl TransformStep {
    /// Applies this step after `m`.
    pub fn apply(self, m: Matrix4D) -> Matrix4D {
        match self {
            TransformStep::Translate { x, y, z } => m.translate(x, y, z),
            TransformStep::Scale { x, y, z } => m.scale(x, y, z),
            TransformStep::RotateX { radians } => m.rotate_x(radians),
            TransformStep::RotateY { radians } => m.rotate_y(radians),
            TransformStep::RotateZ { radians } => m.rotate_z(radians),
            TransformStep::Shear { axis } => m.shear(axis),
        }
    }
}

/// Checks that a `width` by `height` canvas has pixels and can be allocated.
pub fn check_canvas_size(width: usize, height: usize) -> Result<(), SceneError> {
    if width == 0 || height == 0 {
        return Err(SceneError::Invalid(
            format!("canvas must have pixels, got {}x{}", width, height)
        ));
    }

    if Canvas::pixel_count(width, height).is_none() {
        return Err(SceneError::Invalid(
            format!("canvas of {}x{} pixels is too large", width, height)
        ));
    }

    Ok(())
}

fn check_positive(name: &str, value: f64) -> Result<(), SceneError> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(SceneError::Invalid(
            format!("{} must be positive, got {}", name, value)
        ));
    }

    Ok(())
}

impl TryFrom<SceneJson> for Scene {
    type Error = SceneError;

    fn try_from(scene_json: SceneJson) -> Result<Scene, SceneError> {
        check_canvas_size(scene_json.canvas_width, scene_json.canvas_height)?;
        check_positive("wall size", scene_json.wall.size)?;

        if feq(scene_json.eye.z, scene_json.wall.z) {
            return Err(SceneError::Invalid(
                format!("eye must not lie on the wall plane z = {}", scene_json.wall.z)
            ));
        }

        let sphere_json = scene_json.sphere;
        check_positive("sphere radius", sphere_json.radius)?;

        if let Some(name) = sphere_json.material.negative_coefficient() {
            return Err(SceneError::Invalid(
                format!("material {} must not be negative", name)
            ));
        }

        let transform = sphere_json.transforms.iter()
            .fold(Matrix4D::identity(), |m, step| step.apply(m));
        debug!(steps = sphere_json.transforms.len(), %transform,
            "built sphere transform");

        let sphere = Sphere::new(sphere_json.origin, sphere_json.radius)
            .with_material(sphere_json.material)
            .with_transform(transform)?;

        Ok(Scene {
            canvas_width: scene_json.canvas_width,
            canvas_height: scene_json.canvas_height,
            eye: scene_json.eye,
            wall: scene_json.wall,
            shaded: scene_json.shaded,
            light: scene_json.light,
            sphere,
        })
    }
}

#[test]
fn empty_json_is_default_scene() {
    let scene = Scene::from_json_str("{}").unwrap();

    assert_eq!(scene, Scene::default());
    assert_eq!(scene.canvas_width, 100);
    assert_eq!(scene.eye, Point::new(0.0, 0.0, -5.0));
    assert_eq!(scene.sphere.material.color, Color::rgb(0.26, 0.96, 0.53));
}

#[test]
fn full_scene_description() {
    let scene = Scene::from_json_str(r#"{
        "canvas_width": 40,
        "canvas_height": 30,
        "eye": { "x": 0.0, "y": 1.0, "z": -6.0 },
        "wall": { "z": 8.0, "size": 5.0 },
        "shaded": false,
        "light": {
            "intensity": { "r": 1.0, "g": 0.5, "b": 0.5 },
            "position": { "x": 10.0, "y": 10.0, "z": -10.0 }
        },
        "sphere": {
            "radius": 2.0,
            "material": { "color": { "r": 1.0, "g": 0.2, "b": 1.0 }, "ambient": 0.2 },
            "transforms": [
                { "op": "scale", "x": 1.0, "y": 0.5, "z": 1.0 },
                { "op": "shear", "axis": "XY" }
            ]
        }
    }"#).unwrap();

    assert_eq!(scene.canvas_width, 40);
    assert_eq!(scene.canvas_height, 30);
    assert_eq!(scene.wall, Wall { z: 8.0, size: 5.0 });
    assert!(!scene.shaded);
    assert_eq!(scene.light.intensity, Color::rgb(1.0, 0.5, 0.5));
    assert_eq!(scene.sphere.radius(), 2.0);
    assert_eq!(scene.sphere.material.ambient, 0.2);
    assert_eq!(scene.sphere.material.diffuse, 0.9);
    assert_eq!(*scene.sphere.transform(),
        Matrix4D::skew(ShearAxis::XY) * Matrix4D::scaling(1.0, 0.5, 1.0));
}

#[test]
fn transforms_apply_in_list_order() {
    let steps = vec![
        TransformStep::Scale { x: 2.0, y: 2.0, z: 2.0 },
        TransformStep::Translate { x: 1.0, y: 0.0, z: 0.0 },
    ];
    let m = steps.iter().fold(Matrix4D::identity(), |m, s| s.apply(m));

    assert_eq!(m * Point::new(1.0, 0.0, 0.0), Point::new(3.0, 0.0, 0.0));
}

#[test]
fn unknown_fields_are_rejected() {
    let res = Scene::from_json_str(r#"{ "field_of_view": 1.0 }"#);
    assert!(matches!(res, Err(SceneError::Json(_))));
}

#[test]
fn zero_canvas_is_invalid() {
    let res = Scene::from_json_str(r#"{ "canvas_width": 0 }"#);
    assert!(matches!(res, Err(SceneError::Invalid(_))));

    assert!(matches!(Scene::default().with_size(10, 0), Err(SceneError::Invalid(_))));
}

#[test]
fn non_positive_radius_is_invalid() {
    let res = Scene::from_json_str(r#"{ "sphere": { "radius": -1.0 } }"#);
    assert!(matches!(res, Err(SceneError::Invalid(_))));
}

#[test]
fn negative_material_is_invalid() {
    let res = Scene::from_json_str(
        r#"{ "sphere": { "material": { "diffuse": -0.1 } } }"#
    );
    assert!(matches!(res, Err(SceneError::Invalid(ref msg)) if msg.contains("diffuse")));
}

#[test]
fn singular_transform_is_reported() {
    let res = Scene::from_json_str(
        r#"{ "sphere": { "transforms": [ { "op": "scale", "x": 0.0, "y": 1.0, "z": 1.0 } ] } }"#
    );
    assert!(matches!(res, Err(SceneError::Transform(_))));
}

#[test]
fn render_default_scene() {
    let scene = Scene::default().with_size(30, 30).unwrap();
    let (canvas, stats) = scene.render();

    assert_eq!(canvas.width, 30);
    assert_eq!(stats.pixels, 900);
    assert!(stats.hits > 0);
    assert_ne!(canvas.pixel_at(15, 15), Color::black());
}

#[test]
fn overflowing_canvas_is_invalid() {
    let json = format!(r#"{{ "canvas_width": {}, "canvas_height": 2 }}"#, usize::MAX);
    let res = Scene::from_json_str(&json);
    assert!(matches!(res, Err(SceneError::Invalid(ref msg)) if msg.contains("too large")));

    let res = Scene::default().with_size(1 << 40, 1 << 40);
    assert!(matches!(res, Err(SceneError::Invalid(_))));
}

#[test]
fn eye_on_wall_is_invalid() {
    let res = Scene::from_json_str(r#"{ "eye": { "x": 0.0, "y": 0.0, "z": 10.0 } }"#);
    assert!(matches!(res, Err(SceneError::Invalid(ref msg)) if msg.contains("wall")));

    let res = Scene::from_json_str(r#"{
        "eye": { "x": 0.0, "y": 0.0, "z": 2.0 },
        "wall": { "z": 2.0 }
    }"#);
    assert!(matches!(res, Err(SceneError::Invalid(_))));
}

#[test]
fn light_on_sphere_surface_renders() {
    let scene = Scene::from_json_str(r#"{
        "canvas_width": 10,
        "canvas_height": 10,
        "light": {
            "intensity": { "r": 1.0, "g": 1.0, "b": 1.0 },
            "position": { "x": 0.0, "y": 0.0, "z": -1.0 }
        }
    }"#).unwrap();

    let (canvas, stats) = scene.render();

    assert!(stats.hits > 0);
    assert_eq!(canvas.pixel_at(5, 5), scene.sphere.material.color * 0.1);
}
