//! Error types for the ray caster.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A transform that cannot be inverted.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TransformError {
    /// The determinant is (numerically) zero, e.g. a scale by zero.
    #[error("degenerate transform: determinant {determinant} is too close to zero to invert")]
    Degenerate { determinant: f64 },
}

/// Failures while decoding a PPM (`P3`) byte buffer.
///
/// Each variant names the stage of the decoder that rejected the input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The first token is not the expected format tag.
    #[error("bad format tag {found:?}, expected {expected:?}")]
    BadTag { expected: &'static str, found: String },

    /// The buffer ended before the header was complete.
    #[error("header truncated while reading {field}")]
    TruncatedHeader { field: &'static str },

    /// A header field is not a decimal number.
    #[error("invalid {field} in header: {token:?}")]
    InvalidHeaderField { field: &'static str, token: String },

    /// Width or height is zero.
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: usize, height: usize },

    /// Width times height does not fit in memory addressing.
    #[error("image dimensions {width}x{height} are too large")]
    DimensionsTooLarge { width: usize, height: usize },

    /// Only 8-bit channels are supported.
    #[error("unsupported max channel value {found}, expected {expected}")]
    UnsupportedMaxValue { expected: u32, found: u32 },

    /// A byte in the pixel data is neither a digit nor whitespace.
    #[error("unexpected byte {byte:#04x} at offset {offset} in pixel data")]
    InvalidPixelByte { offset: usize, byte: u8 },

    /// A channel value is larger than the declared max value.
    #[error("channel value at offset {offset} exceeds max value {max}")]
    ChannelOutOfRange { offset: usize, max: u32 },

    /// Fewer channel values than `width * height * 3`.
    #[error("pixel data truncated: expected {expected} channel values, found {found}")]
    TruncatedPixels { expected: usize, found: usize },

    /// More data after the last declared pixel.
    #[error("trailing data at offset {offset} after {width}x{height} pixels")]
    TrailingData { offset: usize, width: usize, height: usize },
}

/// Errors from saving or loading a canvas.
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed image: {0}")]
    Decode(#[from] DecodeError),
}

/// Errors from loading or building a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed scene description: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("invalid scene: {0}")]
    Invalid(String),
}
