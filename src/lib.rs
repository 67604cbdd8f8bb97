pub mod consts;
pub mod error;

pub mod tuple;
pub mod matrix;
pub mod ray;
pub mod light;

pub mod geometry;
pub mod intersect;
pub mod cast;

pub mod color;
pub mod canvas;
pub mod ppm;

pub mod scene;
pub mod projectile;

use crate::consts::FEQ_EPSILON;

/// Approximate equality of two floats, using the crate-wide tolerance.
///
/// The tolerance is an absolute one and was tuned against the fixtures in this
/// crate; see `feq_within` for comparisons at other magnitudes.
pub fn feq(left: f64, right: f64) -> bool {
    feq_within(left, right, FEQ_EPSILON)
}

/// Approximate equality of two floats within an explicit absolute `epsilon`.
pub fn feq_within(left: f64, right: f64, epsilon: f64) -> bool {
    (left - right).abs() <= epsilon
}

#[test]
fn feq_absorbs_rounding() {
    assert!(feq(0.1 + 0.2, 0.3));
    assert!(feq(1.0, 1.0 + FEQ_EPSILON / 2.0));
    assert!(!feq(1.0, 1.0001));
}

#[test]
fn feq_within_custom_epsilon() {
    assert!(feq_within(1000.0, 1000.05, 0.1));
    assert!(!feq_within(1000.0, 1000.05, 0.01));
}
