use std::fs;
use std::io;
use std::mem;
use std::path::Path;

use tracing::{ debug, info };

use crate::color::Color;
use crate::error::{ CanvasError, DecodeError };
use crate::ppm;

/// A canvas for drawing pixels.
///
/// The canvas stores the resulting color of every cast ray. Once casting
/// finishes, the `Canvas` can be encoded to a PPM image and saved to disk.
///
/// Pixels are stored row-major in one flattened vector, with `(0, 0)` in the
/// top-left corner. The size is fixed at construction.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new, all black canvas with specified width and height.
    ///
    /// This function allocates a `Vec<Color>` of size `width * height`, which
    /// may take up a decent amount of memory, depending on image size.
    ///
    /// # Panics
    ///
    /// When `width * height` is too large to allocate; see `pixel_count`.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); expect_pixel_count(width, height)],
        }
    }

    /// The number of pixels in a `width` by `height` canvas, or `None` when
    /// that many pixels could not be allocated at all.
    ///
    /// ```
    /// # use ray_caster::canvas::Canvas;
    /// assert_eq!(Canvas::pixel_count(900, 550), Some(495_000));
    /// assert_eq!(Canvas::pixel_count(usize::MAX, 2), None);
    /// ```
    pub fn pixel_count(width: usize, height: usize) -> Option<usize> {
        let max = isize::MAX as usize / mem::size_of::<Color>();

        width.checked_mul(height).filter(|&count| count <= max)
    }

    /// Builds a canvas from already decoded pixels.
    pub(crate) fn from_pixels(width: usize, height: usize, pixels: Vec<Color>)
        -> Canvas {
        debug_assert_eq!(pixels.len(), width * height);

        Canvas { width, height, pixels }
    }

    /// Whether `(x, y)` addresses a pixel of this canvas.
    pub fn is_in_range(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Pixels are specified in column-row order, where `x` is the column and
    /// `y` is the row. Rows and columns are zero-indexed.
    ///
    /// # Panics
    ///
    /// Writing outside of the canvas is a bug in the caller. Check with
    /// `is_in_range` first when plotting arbitrary coordinates.
    ///
    /// # Examples
    ///
    /// Writing a pixel to the fifth column, third row on an 8-by-8 canvas:
    ///
    /// ```
    /// # use ray_caster::color::Color;
    /// # use ray_caster::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, purple);
    /// assert_eq!(canvas.pixel_at(4, 2), purple);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: Color) {
        let index = self.index_of(x, y);
        self.pixels[index] = pixel;
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// # Panics
    ///
    /// Same as `write_pixel`.
    pub fn pixel_at(&self, x: usize, y: usize) -> Color {
        self.pixels[self.index_of(x, y)]
    }

    /// All pixels, row by row.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    fn index_of(&self, x: usize, y: usize) -> usize {
        assert!(self.is_in_range(x, y),
            "pixel ({}, {}) is outside of a {}x{} canvas",
            x, y, self.width, self.height);

        (y * self.width) + x
    }

    /// Encodes the canvas as a PPM (`P3`) image.
    pub fn to_ppm(&self) -> Vec<u8> {
        ppm::encode(self)
    }

    /// Decodes a PPM (`P3`) image.
    pub fn from_ppm(bytes: &[u8]) -> Result<Canvas, DecodeError> {
        ppm::decode(bytes)
    }

    /// Saves a canvas to a PPM file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CanvasError> {
        let path = path.as_ref();
        let bytes = self.to_ppm();

        debug!(path = %path.display(), bytes = bytes.len(), "writing canvas");
        fs::write(path, &bytes)?;

        info!(path = %path.display(), width = self.width, height = self.height,
            "saved canvas");
        Ok(())
    }

    /// Loads a canvas from a PPM file.
    ///
    /// A missing file is reported as `CanvasError::NotFound`, separately from
    /// other I/O failures.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Canvas, CanvasError> {
        let path = path.as_ref();

        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CanvasError::NotFound {
                path: path.to_path_buf(),
            },
            _ => CanvasError::Io(e),
        })?;

        let canvas = Canvas::from_ppm(&bytes)?;

        info!(path = %path.display(), width = canvas.width,
            height = canvas.height, "loaded canvas");
        Ok(canvas)
    }
}

fn expect_pixel_count(width: usize, height: usize) -> usize {
    match Canvas::pixel_count(width, height) {
        Some(count) => count,
        None => panic!("a {}x{} canvas is too large", width, height),
    }
}

#[test]
fn create_canvas() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.width, 10);
    assert_eq!(c.height, 20);
    assert_eq!(c.pixels().len(), 200);
    assert!(c.pixels().iter().all(|p| *p == Color::black()));
}

#[test]
fn write_and_read_pixel() {
    let mut c = Canvas::new(10, 20);
    let red = Color::red();
    c.write_pixel(2, 3, red);

    assert_eq!(c.pixel_at(2, 3), red);
    assert_eq!(c.pixels()[3 * 10 + 2], red);
    assert_eq!(c.pixel_at(3, 2), Color::black());
}

#[test]
fn pixel_count_rejects_overflow() {
    assert_eq!(Canvas::pixel_count(10, 20), Some(200));
    assert_eq!(Canvas::pixel_count(0, 20), Some(0));
    assert_eq!(Canvas::pixel_count(usize::MAX, 2), None);
    assert_eq!(Canvas::pixel_count(1 << 40, 1 << 40), None);
}

#[test]
#[should_panic(expected = "too large")]
fn huge_canvas_panics_with_message() {
    Canvas::new(usize::MAX, 2);
}

#[test]
fn range_check() {
    let c = Canvas::new(4, 2);

    assert!(c.is_in_range(3, 1));
    assert!(!c.is_in_range(4, 0));
    assert!(!c.is_in_range(0, 2));
}

#[test]
#[should_panic(expected = "outside of a 4x2 canvas")]
fn write_out_of_range_panics() {
    let mut c = Canvas::new(4, 2);
    c.write_pixel(4, 0, Color::white());
}

#[test]
#[should_panic(expected = "outside of a 4x2 canvas")]
fn read_out_of_range_panics() {
    let c = Canvas::new(4, 2);
    c.pixel_at(0, 2);
}

#[test]
fn save_and_load_file() {
    let path = std::env::temp_dir()
        .join(format!("ray-caster-canvas-{}.ppm", std::process::id()));

    let mut c = Canvas::new(3, 2);
    c.write_pixel(0, 0, Color::rgb(1.0, 0.0, 0.0));
    c.write_pixel(2, 1, Color::rgb(0.0, 0.0, 1.0));
    c.save(&path).unwrap();

    let loaded = Canvas::load(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(loaded, c);
}

#[test]
fn load_missing_file() {
    let path = std::env::temp_dir().join("ray-caster-does-not-exist.ppm");
    let res = Canvas::load(&path);

    assert!(matches!(res, Err(CanvasError::NotFound { .. })));
}
