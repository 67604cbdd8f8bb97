use ray_caster::canvas::Canvas;
use ray_caster::color::Color;
use ray_caster::error::{ CanvasError, DecodeError };
use ray_caster::ppm;
use ray_caster::scene::Scene;

const SCENE: &str = r#"{
    "canvas_width": 24,
    "canvas_height": 16,
    "light": {
        "intensity": { "r": 1.0, "g": 1.0, "b": 1.0 },
        "position": { "x": -10.0, "y": 10.0, "z": -10.0 }
    },
    "sphere": {
        "material": { "color": { "r": 1.0, "g": 0.2, "b": 1.0 } },
        "transforms": [
            { "op": "scale", "x": 1.0, "y": 0.5, "z": 1.0 },
            { "op": "rotate_z", "radians": 0.7853981633974483 }
        ]
    }
}"#;

#[test]
fn scene_to_ppm_and_back() {
    let scene = Scene::from_json_str(SCENE).unwrap();
    let (canvas, stats) = scene.render();

    assert_eq!(stats.pixels, 24 * 16);
    assert!(stats.hits > 0);

    let bytes = ppm::encode(&canvas);
    assert!(bytes.starts_with(b"P3\n24 16\n255\n"));

    let decoded = Canvas::from_ppm(&bytes).unwrap();
    assert_eq!(decoded.width, canvas.width);
    assert_eq!(decoded.height, canvas.height);

    for (a, b) in canvas.pixels().iter().zip(decoded.pixels()) {
        assert_eq!(a.to_rgb8(), b.to_rgb8());
    }
}

#[test]
fn unshaded_render_has_two_colors() {
    let mut scene = Scene::from_json_str(SCENE).unwrap();
    scene.shaded = false;

    let (canvas, stats) = scene.render();
    let sphere_color = Color::rgb(1.0, 0.2, 1.0);

    assert!(canvas.pixels().iter()
        .all(|p| *p == sphere_color || *p == Color::black()));
    assert_eq!(canvas.pixels().iter().filter(|p| **p == sphere_color).count(),
        stats.hits);
}

#[test]
fn save_load_through_file() {
    let (canvas, _) = Scene::default().with_size(16, 16).unwrap().render();
    let path = std::env::temp_dir()
        .join(format!("ray-caster-it-{}.ppm", std::process::id()));

    canvas.save(&path).unwrap();
    let loaded = Canvas::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.width, 16);
    for (a, b) in canvas.pixels().iter().zip(loaded.pixels()) {
        assert_eq!(a.to_rgb8(), b.to_rgb8());
    }
}

#[test]
fn truncated_file_is_a_decode_error() {
    let path = std::env::temp_dir()
        .join(format!("ray-caster-it-truncated-{}.ppm", std::process::id()));
    std::fs::write(&path, b"P3\n2 2\n255\n0 0 0\n").unwrap();

    let res = Canvas::load(&path);
    std::fs::remove_file(&path).unwrap();

    match res {
        Err(CanvasError::Decode(DecodeError::TruncatedPixels { expected, found })) => {
            assert_eq!(expected, 12);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
