use tracing::{ debug, info };

use crate::canvas::Canvas;
use crate::color::Color;
use crate::consts::{ MAX_PROJECTILE_TICKS, PROJECTILE_SPEED };
use crate::tuple::{ Point, Vector };

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Projectile {
    pub position: Point,
    pub velocity: Vector,
}

impl Projectile {
    /// The demo launch: from one unit above the origin, up and to the right.
    pub fn launch() -> Projectile {
        Projectile {
            position: Point::new(0.0, 1.0, 0.0),
            velocity: Vector::new(1.0, 1.8, 0.0).normalize() * PROJECTILE_SPEED,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Environment {
    pub gravity: Vector,
    pub wind: Vector,
}

impl Environment {
    /// Light gravity and a slight headwind.
    pub fn earthlike() -> Environment {
        Environment {
            gravity: Vector::new(0.0, -0.1, 0.0),
            wind: Vector::new(-0.01, 0.0, 0.0),
        }
    }

    /// Advances a projectile by one tick, based on environmental conditions.
    ///
    /// The projectile returned from this function is the parameter `proj`
    /// subjected to one "tick" of time in the environment.
    pub fn tick(&self, proj: &Projectile) -> Projectile {
        let position = proj.position + proj.velocity;
        let velocity = proj.velocity + self.gravity + self.wind;

        Projectile { position, velocity }
    }
}

/// Plots the flight of `proj` onto `canvas` until it falls to the ground.
///
/// Canvas rows grow downwards, so a position is drawn at
/// `(floor(x), |height - floor(y)|)`. Positions off the canvas are skipped.
/// Returns the number of ticks simulated.
pub fn plot_trajectory(canvas: &mut Canvas, mut proj: Projectile,
    env: &Environment, color: Color) -> usize {
    let mut ticks = 0;
    let mut plotted = 0;

    while proj.position.y > 0.0 && ticks < MAX_PROJECTILE_TICKS {
        if let Some((x, y)) = pixel_for(canvas, proj.position) {
            canvas.write_pixel(x, y, color);
            plotted += 1;
        }

        proj = env.tick(&proj);
        ticks += 1;
    }

    if ticks == MAX_PROJECTILE_TICKS {
        debug!(?proj, "projectile still airborne, giving up");
    }

    info!(ticks, plotted, "plotted trajectory");
    ticks
}

fn pixel_for(canvas: &Canvas, position: Point) -> Option<(usize, usize)> {
    let x = position.x.floor();
    let y = (canvas.height as f64 - position.y.floor()).abs();

    if x < 0.0 || !x.is_finite() || !y.is_finite() {
        return None;
    }

    let (x, y) = (x as usize, y as usize);
    if canvas.is_in_range(x, y) {
        Some((x, y))
    } else {
        None
    }
}

#[test]
fn tick_moves_and_slows() {
    let env = Environment::earthlike();
    let proj = Projectile {
        position: Point::new(0.0, 1.0, 0.0),
        velocity: Vector::new(1.0, 1.0, 0.0),
    };

    let next = env.tick(&proj);

    assert_eq!(next.position, Point::new(1.0, 2.0, 0.0));
    assert_eq!(next.velocity, Vector::new(0.99, 0.9, 0.0));
}

#[test]
fn launch_speed() {
    let proj = Projectile::launch();

    assert!(crate::feq(proj.velocity.magnitude(), 11.25));
    assert_eq!(proj.position, Point::new(0.0, 1.0, 0.0));
}

#[test]
fn trajectory_lands_on_canvas() {
    let mut canvas = Canvas::new(900, 550);
    let ticks = plot_trajectory(&mut canvas, Projectile::launch(),
        &Environment::earthlike(), Color::red());

    assert!(ticks > 0 && ticks < MAX_PROJECTILE_TICKS);

    // The launch point, one unit up, is on the bottom rows
    assert_eq!(canvas.pixel_at(0, 549), Color::red());

    let plotted = canvas.pixels().iter().filter(|p| **p == Color::red()).count();
    assert!(plotted > 1 && plotted <= ticks);
}

#[test]
fn off_canvas_positions_are_skipped() {
    let mut canvas = Canvas::new(10, 10);
    let proj = Projectile {
        position: Point::new(-5.0, 1.0, 0.0),
        velocity: Vector::new(-1.0, 0.0, 0.0),
    };
    let env = Environment {
        gravity: Vector::new(0.0, -0.5, 0.0),
        wind: Vector::default(),
    };

    let ticks = plot_trajectory(&mut canvas, proj, &env, Color::white());

    assert_eq!(ticks, 3);
    assert_eq!(canvas, Canvas::new(10, 10));
}

#[test]
fn hovering_projectile_is_bounded() {
    let mut canvas = Canvas::new(4, 4);
    let proj = Projectile {
        position: Point::new(1.0, 1.0, 0.0),
        velocity: Vector::default(),
    };

    let ticks = plot_trajectory(&mut canvas, proj, &Environment::default(),
        Color::white());

    assert_eq!(ticks, MAX_PROJECTILE_TICKS);
    assert_eq!(canvas.pixel_at(1, 3), Color::white());
}
