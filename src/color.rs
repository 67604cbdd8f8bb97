use std::fmt;
use std::ops::{ Add, Sub, Mul, Div };

use serde::{ Serialize, Deserialize };

use crate::feq;

/// A linear-light color.
///
/// Channels are `f64` and carry no range invariant while light is being
/// summed; a lit surface can easily exceed `1.0`. Clamping happens only when
/// the color is quantized for output (`to_rgb8`).
///
/// The alpha channel defaults to opaque. Arithmetic works on `r`, `g` and `b`
/// and keeps the alpha of the left operand.
///
/// # Examples
///
/// ```
/// # use ray_caster::color::Color;
/// let lit = Color::rgb(0.8, 1.0, 0.6) * Color::rgb(1.0, 1.0, 1.0) * 0.9;
/// assert_eq!(lit, Color::rgb(0.72, 0.9, 0.54));
/// ```
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

/// Colors compare component-wise within the crate tolerance. Alpha is not
/// compared.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

impl Default for Color {
    fn default() -> Color {
        Color::black()
    }
}

/// An 8-bit-per-channel color, as written to and read from PPM files.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Creates an opaque color with red, green and blue values.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Color {
        Color { r, g, b, a }
    }

    pub const fn black() -> Color {
        Color::rgb(0.0, 0.0, 0.0)
    }

    pub const fn white() -> Color {
        Color::rgb(1.0, 1.0, 1.0)
    }

    pub const fn red() -> Color {
        Color::rgb(1.0, 0.0, 0.0)
    }

    pub const fn green() -> Color {
        Color::rgb(0.0, 1.0, 0.0)
    }

    pub const fn blue() -> Color {
        Color::rgb(0.0, 0.0, 1.0)
    }

    /// Computes the Hadamard (component-wise) product of two colors.
    ///
    /// `c1 * c2` is shorthand for this.
    pub fn hadamard(c1: &Color, c2: &Color) -> Color {
        Color {
            r: c1.r * c2.r,
            g: c1.g * c2.g,
            b: c1.b * c2.b,
            a: c1.a,
        }
    }

    /// Whether every channel already lies in `[0, 1]`.
    pub fn is_in_range(&self) -> bool {
        [self.r, self.g, self.b].iter().all(|c| (0.0..=1.0).contains(c))
    }

    /// Quantizes the color to 8 bits per channel.
    ///
    /// Each channel is clamped to `[0, 1]`, scaled to `[0, 255]` and rounded
    /// to the nearest integer. NaN channels quantize to `0`.
    pub fn to_rgb8(&self) -> Rgb8 {
        Rgb8 {
            r: quantize(self.r),
            g: quantize(self.g),
            b: quantize(self.b),
        }
    }

    /// The quantized color as a lowercase `rrggbb` hex string.
    ///
    /// ```
    /// # use ray_caster::color::Color;
    /// assert_eq!(Color::rgb(1.0, 0.5, 0.0).to_hex(), "ff8000");
    /// ```
    pub fn to_hex(&self) -> String {
        let Rgb8 { r, g, b } = self.to_rgb8();
        format!("{:02x}{:02x}{:02x}", r, g, b)
    }
}

fn quantize(channel: f64) -> u8 {
    if channel.is_nan() {
        return 0;
    }

    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl From<Rgb8> for Color {
    fn from(c: Rgb8) -> Color {
        Color::rgb(
            f64::from(c.r) / 255.0,
            f64::from(c.g) / 255.0,
            f64::from(c.b) / 255.0,
        )
    }
}

impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
            a: self.a,
        }
    }
}

impl Sub<Color> for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Self::Output {
        Color {
            r: self.r - other.r,
            g: self.g - other.g,
            b: self.b - other.b,
            a: self.a,
        }
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        Color {
            r: self.r * other,
            g: self.g * other,
            b: self.b * other,
            a: self.a,
        }
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        other * self
    }
}

impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        Color::hadamard(&self, &other)
    }
}

impl Div<f64> for Color {
    type Output = Color;

    fn div(self, other: f64) -> Self::Output {
        Color {
            r: self.r / other,
            g: self.g / other,
            b: self.b / other,
            a: self.a,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(r={:.10}, g={:.10}, b={:.10})", self.r, self.g, self.b)
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);

    assert_eq!(c1 + c2, Color::rgb(1.6, 0.7, 1.0));
}

#[test]
fn subtract_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);

    assert_eq!(c1 - c2, Color::rgb(0.2, 0.5, 0.5));
}

#[test]
fn scale_color() {
    let c = Color::rgb(0.2, 0.3, 0.4);

    assert_eq!(c * 2.0, Color::rgb(0.4, 0.6, 0.8));
    assert_eq!(2.0 * c, Color::rgb(0.4, 0.6, 0.8));
    assert_eq!(c / 2.0, Color::rgb(0.1, 0.15, 0.2));
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgb(1.0, 0.2, 0.4);
    let c2 = Color::rgb(0.9, 1.0, 0.1);

    assert_eq!(c1 * c2, Color::rgb(0.9, 0.2, 0.04));
}

#[test]
fn arithmetic_does_not_clamp() {
    let c = Color::rgb(0.9, 0.1, 0.5) + Color::rgb(0.9, -0.5, 0.0);

    assert_eq!(c, Color::rgb(1.8, -0.4, 0.5));
    assert!(!c.is_in_range());
}

#[test]
fn alpha_follows_left_operand() {
    let c = Color::rgba(0.1, 0.2, 0.3, 0.5) + Color::rgb(0.1, 0.1, 0.1);

    assert_eq!(c.a, 0.5);
    assert_eq!(Color::rgba(1.0, 1.0, 1.0, 0.0), Color::white());
}

#[test]
fn quantize_clamps_and_rounds() {
    assert_eq!(Color::rgb(1.5, 0.0, -0.5).to_rgb8(), Rgb8 { r: 255, g: 0, b: 0 });
    assert_eq!(Color::rgb(0.0, 0.5, 1.0).to_rgb8(), Rgb8 { r: 0, g: 128, b: 255 });
    assert_eq!(Color::rgb(f64::NAN, 0.2, 0.0).to_rgb8(), Rgb8 { r: 0, g: 51, b: 0 });
}

#[test]
fn quantize_round_trips_through_rgb8() {
    for v in 0..=255u8 {
        let c: Color = Rgb8 { r: v, g: 255 - v, b: v / 2 }.into();
        assert_eq!(c.to_rgb8(), Rgb8 { r: v, g: 255 - v, b: v / 2 });
    }
}

#[test]
fn hex_string() {
    assert_eq!(Color::black().to_hex(), "000000");
    assert_eq!(Color::rgb(0.26, 0.96, 0.53).to_hex(), "42f587");
}
