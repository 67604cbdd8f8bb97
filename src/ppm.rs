//! Plain-text PPM (`P3`) encoding and decoding.
//!
//! The encoder writes the header on three lines (`P3`, `width height`,
//! `255`) followed by one line per canvas row, each holding `width`
//! space-separated `R G B` triples.
//!
//! The decoder is more lenient about layout: header tokens and channel values
//! may be separated by any ASCII whitespace, and rows need not be on their own
//! lines. Any other byte between channel values, a comma for instance, is an
//! error. It is strict about content, and never returns a partially filled
//! canvas.

use crate::canvas::Canvas;
use crate::color::{ Color, Rgb8 };
use crate::consts::{ PPM_TAG, PPM_MAX_VALUE };
use crate::error::DecodeError;

/// Smallest number of bytes a pixel can take up in pixel data (`0 0 0 `).
const MIN_PIXEL_BYTES: usize = 6;

/// Encodes a canvas as a `P3` image.
///
/// ```
/// # use ray_caster::canvas::Canvas;
/// # use ray_caster::color::Color;
/// # use ray_caster::ppm;
/// let mut canvas = Canvas::new(2, 1);
/// canvas.write_pixel(1, 0, Color::white());
/// assert_eq!(ppm::encode(&canvas), b"P3\n2 1\n255\n0 0 0 255 255 255\n");
/// ```
pub fn encode(canvas: &Canvas) -> Vec<u8> {
    let mut out = format!("{}\n{} {}\n{}\n",
        PPM_TAG, canvas.width, canvas.height, PPM_MAX_VALUE);

    if canvas.width == 0 {
        return out.into_bytes();
    }

    for row in canvas.pixels().chunks(canvas.width) {
        let triples: Vec<String> = row.iter()
            .map(|pixel| {
                let Rgb8 { r, g, b } = pixel.to_rgb8();
                format!("{} {} {}", r, g, b)
            })
            .collect();

        out.push_str(&triples.join(" "));
        out.push('\n');
    }

    out.into_bytes()
}

/// Decodes a `P3` image.
pub fn decode(bytes: &[u8]) -> Result<Canvas, DecodeError> {
    let mut cursor = Cursor::new(bytes);

    let tag = cursor.token()
        .ok_or(DecodeError::TruncatedHeader { field: "tag" })?;
    if tag != PPM_TAG.as_bytes() {
        return Err(DecodeError::BadTag {
            expected: PPM_TAG,
            found: String::from_utf8_lossy(tag).into_owned(),
        });
    }

    let width: usize = cursor.header_field("width")?;
    let height: usize = cursor.header_field("height")?;

    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }

    let expected = width.checked_mul(height)
        .and_then(|n| n.checked_mul(3))
        .ok_or(DecodeError::DimensionsTooLarge { width, height })?;

    let max_value: u32 = cursor.header_field("max value")?;
    if max_value != PPM_MAX_VALUE {
        return Err(DecodeError::UnsupportedMaxValue {
            expected: PPM_MAX_VALUE,
            found: max_value,
        });
    }

    // The header may claim more pixels than the buffer can hold
    let capacity = (expected / 3).min(bytes.len() / MIN_PIXEL_BYTES + 1);
    let mut pixels = Vec::with_capacity(capacity);

    let mut channels = [0u8; 3];
    let mut found = 0;

    while found < expected {
        let value = match cursor.channel(max_value)? {
            Some(v) => v,
            None => break,
        };

        channels[found % 3] = value;
        found += 1;

        if found % 3 == 0 {
            let [r, g, b] = channels;
            pixels.push(Color::from(Rgb8 { r, g, b }));
        }
    }

    if found < expected {
        return Err(DecodeError::TruncatedPixels { expected, found });
    }

    cursor.skip_whitespace();
    if !cursor.is_at_end() {
        return Err(DecodeError::TrailingData {
            offset: cursor.pos,
            width,
            height,
        });
    }

    Ok(Canvas::from_pixels(width, height, pixels))
}

/// A read position in a byte buffer.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Cursor<'a> {
        Cursor { bytes, pos: 0 }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if !b.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
    }

    /// The next run of non-whitespace bytes, if any.
    fn token(&mut self) -> Option<&'a [u8]> {
        self.skip_whitespace();

        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }

        if start == self.pos {
            None
        } else {
            Some(&self.bytes[start..self.pos])
        }
    }

    fn header_field<T: std::str::FromStr>(&mut self, field: &'static str)
        -> Result<T, DecodeError> {
        let token = self.token()
            .ok_or(DecodeError::TruncatedHeader { field })?;

        std::str::from_utf8(token)
            .ok()
            .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| DecodeError::InvalidHeaderField {
                field,
                token: String::from_utf8_lossy(token).into_owned(),
            })
    }

    /// The next channel value, or `None` at the end of the buffer.
    fn channel(&mut self, max: u32) -> Result<Option<u8>, DecodeError> {
        self.skip_whitespace();

        let start = self.pos;
        let mut value: u32 = 0;

        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                break;
            }
            if !b.is_ascii_digit() {
                return Err(DecodeError::InvalidPixelByte { offset: self.pos, byte: b });
            }

            value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
            if value > max {
                return Err(DecodeError::ChannelOutOfRange { offset: start, max });
            }
            self.pos += 1;
        }

        if start == self.pos {
            return Ok(None);
        }

        // `max` is 255, so the value always fits
        Ok(Some(value as u8))
    }
}

#[cfg(test)]
fn sample_canvas() -> Canvas {
    let mut c = Canvas::new(5, 3);
    c.write_pixel(0, 0, Color::rgb(1.5, 0.0, 0.0));
    c.write_pixel(2, 1, Color::rgb(0.0, 0.5, 0.0));
    c.write_pixel(4, 2, Color::rgb(-0.5, 0.0, 1.0));
    c
}

#[test]
fn encode_header() {
    let bytes = encode(&Canvas::new(5, 3));
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.starts_with("P3\n5 3\n255\n"));
}

#[test]
fn encode_pixel_data() {
    let text = String::from_utf8(encode(&sample_canvas())).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[3], "255 0 0 0 0 0 0 0 0 0 0 0 0 0 0");
    assert_eq!(lines[4], "0 0 0 0 0 0 0 128 0 0 0 0 0 0 0");
    assert_eq!(lines[5], "0 0 0 0 0 0 0 0 0 0 0 0 0 0 255");
    assert!(text.ends_with('\n'));
}

#[test]
fn decode_what_was_encoded() {
    let original = sample_canvas();
    let decoded = decode(&encode(&original)).unwrap();

    assert_eq!(decoded.width, 5);
    assert_eq!(decoded.height, 3);
    for (a, b) in original.pixels().iter().zip(decoded.pixels()) {
        assert_eq!(a.to_rgb8(), b.to_rgb8());
    }
}

#[test]
fn decode_ignores_line_layout() {
    let c = decode(b"P3 2 1 255 10 20 30\n\n40\t50 60").unwrap();

    assert_eq!(c.pixel_at(0, 0).to_rgb8(), Rgb8 { r: 10, g: 20, b: 30 });
    assert_eq!(c.pixel_at(1, 0).to_rgb8(), Rgb8 { r: 40, g: 50, b: 60 });
}

#[test]
fn decode_empty_buffer() {
    assert_eq!(decode(b""), Err(DecodeError::TruncatedHeader { field: "tag" }));
}

#[test]
fn decode_bad_tag() {
    assert_eq!(decode(b"P6\n1 1\n255\n0 0 0\n"), Err(DecodeError::BadTag {
        expected: "P3",
        found: "P6".to_string(),
    }));
}

#[test]
fn decode_truncated_header() {
    assert_eq!(decode(b"P3\n4"),
        Err(DecodeError::TruncatedHeader { field: "height" }));
    assert_eq!(decode(b"P3\n4 4\n"),
        Err(DecodeError::TruncatedHeader { field: "max value" }));
}

#[test]
fn decode_non_numeric_header() {
    assert_eq!(decode(b"P3\nfour 4\n255\n"), Err(DecodeError::InvalidHeaderField {
        field: "width",
        token: "four".to_string(),
    }));
    assert!(matches!(decode(b"P3\n-1 4\n255\n"),
        Err(DecodeError::InvalidHeaderField { field: "width", .. })));
}

#[test]
fn decode_zero_dimension() {
    assert_eq!(decode(b"P3\n0 4\n255\n"),
        Err(DecodeError::EmptyImage { width: 0, height: 4 }));
}

#[test]
fn decode_huge_dimensions() {
    let header = format!("P3\n{} {}\n255\n", usize::MAX, 2);

    assert!(matches!(decode(header.as_bytes()),
        Err(DecodeError::DimensionsTooLarge { .. })));
}

#[test]
fn decode_lying_header_is_truncated() {
    assert_eq!(decode(b"P3\n100000 100000\n255\n0 0 0\n"),
        Err(DecodeError::TruncatedPixels { expected: 30_000_000_000, found: 3 }));
}

#[test]
fn decode_other_max_value() {
    assert_eq!(decode(b"P3\n1 1\n65535\n0 0 0\n"),
        Err(DecodeError::UnsupportedMaxValue { expected: 255, found: 65535 }));
}

#[test]
fn decode_invalid_pixel_byte() {
    assert_eq!(decode(b"P3\n1 1\n255\n0 x 0\n"),
        Err(DecodeError::InvalidPixelByte { offset: 13, byte: b'x' }));
    assert_eq!(decode(b"P3\n1 1\n255\n0 1a 0\n"),
        Err(DecodeError::InvalidPixelByte { offset: 14, byte: b'a' }));
}

#[test]
fn decode_rejects_comma_separators() {
    assert_eq!(decode(b"P3\n1 1\n255\n0,0,0\n"),
        Err(DecodeError::InvalidPixelByte { offset: 12, byte: b',' }));
}

#[test]
fn decode_channel_out_of_range() {
    assert_eq!(decode(b"P3\n1 1\n255\n0 256 0\n"),
        Err(DecodeError::ChannelOutOfRange { offset: 13, max: 255 }));
}

#[test]
fn decode_truncated_pixels() {
    assert_eq!(decode(b"P3\n2 1\n255\n0 0 0 1 1\n"),
        Err(DecodeError::TruncatedPixels { expected: 6, found: 5 }));
}

#[test]
fn decode_trailing_data() {
    assert_eq!(decode(b"P3\n1 1\n255\n0 0 0 7\n"),
        Err(DecodeError::TrailingData { offset: 17, width: 1, height: 1 }));
}
