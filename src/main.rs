use std::path::{ Path, PathBuf };

use anyhow::{ Context, Result };
use clap::{ Parser, Subcommand };
use tracing::{ info, Level };

use ray_caster::canvas::Canvas;
use ray_caster::color::Color;
use ray_caster::consts::{ OUT_FILE, PROJECTILE_CANVAS_WIDTH, PROJECTILE_CANVAS_HEIGHT };
use ray_caster::projectile::{ Environment, Projectile, plot_trajectory };
use ray_caster::scene::{ Scene, check_canvas_size };

#[derive(Parser)]
#[clap(name = "ray-caster", version, about = "Casts a sphere onto a PPM image")]
struct Cli {
    /// Most verbose log level to print (error, warn, info, debug, trace)
    #[clap(long, global = true, default_value = "info")]
    log_level: Level,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast a sphere onto the wall and save the image
    Render {
        /// JSON scene description (default: the built-in scene)
        #[clap(long)]
        scene: Option<PathBuf>,

        /// Output PPM file
        #[clap(short, long, default_value = OUT_FILE)]
        output: PathBuf,

        /// Paint the silhouette only, without lighting
        #[clap(long)]
        unshaded: bool,

        /// Override the canvas width
        #[clap(long)]
        width: Option<usize>,

        /// Override the canvas height
        #[clap(long)]
        height: Option<usize>,
    },
    /// Plot the flight of a projectile and save the image
    Projectile {
        /// Output PPM file
        #[clap(short, long, default_value = OUT_FILE)]
        output: PathBuf,

        #[clap(long, default_value_t = PROJECTILE_CANVAS_WIDTH)]
        width: usize,

        #[clap(long, default_value_t = PROJECTILE_CANVAS_HEIGHT)]
        height: usize,
    },
    /// Decode a PPM file and print its size
    Inspect {
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .init();

    match cli.command {
        Commands::Render { scene, output, unshaded, width, height } => {
            render(scene.as_deref(), &output, unshaded, width, height)?;
        }
        Commands::Projectile { output, width, height } => {
            projectile(&output, width, height)?;
        }
        Commands::Inspect { input } => {
            inspect(&input)?;
        }
    }

    Ok(())
}

fn render(scene_path: Option<&Path>, output: &Path, unshaded: bool,
    width: Option<usize>, height: Option<usize>) -> Result<()> {
    let mut scene = match scene_path {
        Some(path) => Scene::load(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => Scene::default(),
    };

    if width.is_some() || height.is_some() {
        let w = width.unwrap_or(scene.canvas_width);
        let h = height.unwrap_or(scene.canvas_height);
        scene = scene.with_size(w, h).context("bad canvas size")?;
    }

    if unshaded {
        scene.shaded = false;
    }

    let (canvas, stats) = scene.render();
    info!(hits = stats.hits, pixels = stats.pixels, "rendered scene");

    canvas.save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    Ok(())
}

fn projectile(output: &Path, width: usize, height: usize) -> Result<()> {
    check_canvas_size(width, height).context("bad canvas size")?;

    let mut canvas = Canvas::new(width, height);
    plot_trajectory(&mut canvas, Projectile::launch(),
        &Environment::earthlike(), Color::red());

    canvas.save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let canvas = Canvas::load(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let lit = canvas.pixels().iter()
        .filter(|p| **p != Color::black())
        .count();

    println!("{}: {}x{} pixels, {} non-black",
        input.display(), canvas.width, canvas.height, lit);

    Ok(())
}
