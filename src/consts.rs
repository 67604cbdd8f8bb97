use crate::color::Color;

// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.00001;

// Raster format
pub const PPM_TAG: &str = "P3";
pub const PPM_MAX_VALUE: u32 = 255;

// Default render parameters
pub const CANVAS_WIDTH: usize = 100;
pub const CANVAS_HEIGHT: usize = 100;
pub const EYE: [f64; 3] = [0.0, 0.0, -5.0];
pub const WALL_Z: f64 = 10.0;
pub const WALL_SIZE: f64 = 7.0;
pub const LIGHT_POSITION: [f64; 3] = [-10.0, 10.0, -10.0];
pub const OUT_FILE: &str = "./out.ppm";

// Projectile plot
pub const PROJECTILE_CANVAS_WIDTH: usize = 900;
pub const PROJECTILE_CANVAS_HEIGHT: usize = 550;
pub const PROJECTILE_SPEED: f64 = 11.25;
pub const MAX_PROJECTILE_TICKS: usize = 100_000;

/// Surface colour of the default sphere.
pub const SPHERE_COLOR: Color = Color { r: 0.26, g: 0.96, b: 0.53, a: 1.0 };
