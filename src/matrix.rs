use std::fmt;
use std::ops::{ Index, IndexMut, Mul };
use std::convert::From;

use serde::{ Serialize, Deserialize };

use crate::feq;
use crate::error::TransformError;
use crate::tuple::{ Point, Vector };

/// One of the six ways a shear can couple two axes.
///
/// `XY` means "x changes in proportion to y", and so on. Each variant sets a
/// single off-diagonal cell of the identity to `1.0`; see `Matrix4D::skew`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShearAxis {
    XY,
    XZ,
    YX,
    YZ,
    ZX,
    ZY,
}

impl ShearAxis {
    /// The `(row, col)` cell this shear writes.
    fn cell(self) -> (usize, usize) {
        match self {
            ShearAxis::XY => (0, 1),
            ShearAxis::XZ => (0, 2),
            ShearAxis::YX => (1, 0),
            ShearAxis::YZ => (1, 2),
            ShearAxis::ZX => (2, 0),
            ShearAxis::ZY => (2, 1),
        }
    }
}

/// A 2x2 matrix, the base case of the cofactor expansion.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct Matrix2D {
    rows: [[f64; 2]; 2],
}

impl Matrix2D {
    fn determinant(&self) -> f64 {
        self.rows[0][0] * self.rows[1][1] - self.rows[0][1] * self.rows[1][0]
    }
}

/// A 3x3 matrix, produced by striking one row and column from a `Matrix4D`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct Matrix3D {
    rows: [[f64; 3]; 3],
}

impl Matrix3D {
    /// Removes `row` and `col`, keeping the remaining cells in order.
    fn submatrix(&self, row: usize, col: usize) -> Matrix2D {
        let mut sub = Matrix2D::default();

        for (r, src) in (0..3).filter(|&r| r != row).enumerate() {
            for (c, src_c) in (0..3).filter(|&c| c != col).enumerate() {
                sub.rows[r][c] = self.rows[src][src_c];
            }
        }

        sub
    }

    fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    fn cofactor(&self, row: usize, col: usize) -> f64 {
        sign(row, col) * self.minor(row, col)
    }

    fn determinant(&self) -> f64 {
        (0..3).map(|c| self.rows[0][c] * self.cofactor(0, c)).sum()
    }
}

/// `+1` on even `row + col`, `-1` on odd.
fn sign(row: usize, col: usize) -> f64 {
    if (row + col) % 2 == 0 { 1.0 } else { -1.0 }
}

/// A 4x4 row-major transformation matrix.
///
/// Every transform in the caster (sphere placement, ray moves into object
/// space, normals back out of it) is one of these. Points carry an implicit
/// `w == 1` and vectors `w == 0`, so `m * point` picks up the translation
/// column and `m * vector` does not.
///
/// Transforms compose right to left: in `a * b`, `b` is applied first. The
/// chaining helpers (`translate`, `scale`, `rotate_x`, ...) read in
/// application order instead:
///
/// ```
/// # use ray_caster::matrix::Matrix4D;
/// # use ray_caster::tuple::Point;
/// let m = Matrix4D::identity()
///     .rotate_x(std::f64::consts::PI / 2.0)
///     .scale(5.0, 5.0, 5.0)
///     .translate(10.0, 5.0, 7.0);
/// assert_eq!(m * Point::new(1.0, 0.0, 1.0), Point::new(15.0, 0.0, 7.0));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Matrix4D {
    rows: [[f64; 4]; 4],
}

/// Matrices are compared element-wise, within the crate tolerance.
impl PartialEq for Matrix4D {
    fn eq(&self, other: &Matrix4D) -> bool {
        self.rows.iter().flatten()
            .zip(other.rows.iter().flatten())
            .all(|(x, y)| feq(*x, *y))
    }
}

impl Default for Matrix4D {
    fn default() -> Matrix4D {
        Matrix4D::identity()
    }
}

impl Matrix4D {
    /// A matrix with every element `0.0`.
    pub fn zero() -> Matrix4D {
        Matrix4D { rows: [[0.0; 4]; 4] }
    }

    pub fn identity() -> Matrix4D {
        let mut m = Self::zero();
        for i in 0..4 {
            m.rows[i][i] = 1.0;
        }

        m
    }

    pub fn from_rows(rows: [[f64; 4]; 4]) -> Matrix4D {
        Matrix4D { rows }
    }

    /// Offsets points by `x`, `y` and `z`. Vectors are unaffected.
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix4D {
        let mut trans = Self::identity();
        trans[(0, 3)] = x;
        trans[(1, 3)] = y;
        trans[(2, 3)] = z;

        trans
    }

    /// Scales along the X, Y and Z axes. A negative factor reflects.
    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix4D {
        let mut scale = Self::identity();
        scale[(0, 0)] = x;
        scale[(1, 1)] = y;
        scale[(2, 2)] = z;

        scale
    }

    /// Rotates `r` radians about the X axis.
    pub fn rotation_x(r: f64) -> Matrix4D {
        let (sin, cos) = r.sin_cos();
        let mut rotate = Self::identity();
        rotate[(1, 1)] =  cos;
        rotate[(1, 2)] = -sin;
        rotate[(2, 1)] =  sin;
        rotate[(2, 2)] =  cos;

        rotate
    }

    /// Rotates `r` radians about the Y axis.
    pub fn rotation_y(r: f64) -> Matrix4D {
        let (sin, cos) = r.sin_cos();
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  cos;
        rotate[(0, 2)] =  sin;
        rotate[(2, 0)] = -sin;
        rotate[(2, 2)] =  cos;

        rotate
    }

    /// Rotates `r` radians about the Z axis.
    pub fn rotation_z(r: f64) -> Matrix4D {
        let (sin, cos) = r.sin_cos();
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  cos;
        rotate[(0, 1)] = -sin;
        rotate[(1, 0)] =  sin;
        rotate[(1, 1)] =  cos;

        rotate
    }

    /// A general shear. Each argument is the proportion by which the first
    /// axis changes with the second (`xy`: x in proportion to y).
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Matrix4D {
        let mut shear = Self::identity();
        shear[(0, 1)] = xy;
        shear[(0, 2)] = xz;
        shear[(1, 0)] = yx;
        shear[(1, 2)] = yz;
        shear[(2, 0)] = zx;
        shear[(2, 1)] = zy;

        shear
    }

    /// A unit shear along a single named axis pair.
    ///
    /// ```
    /// # use ray_caster::matrix::{ Matrix4D, ShearAxis };
    /// # use ray_caster::tuple::Point;
    /// let m = Matrix4D::skew(ShearAxis::XY);
    /// assert_eq!(m * Point::new(2.0, 3.0, 4.0), Point::new(5.0, 3.0, 4.0));
    /// ```
    pub fn skew(axis: ShearAxis) -> Matrix4D {
        let mut shear = Self::identity();
        shear[axis.cell()] = 1.0;

        shear
    }

    /// Applies a translation after `self`.
    pub fn translate(self, x: f64, y: f64, z: f64) -> Matrix4D {
        Self::translation(x, y, z) * self
    }

    /// Applies a scaling after `self`.
    pub fn scale(self, x: f64, y: f64, z: f64) -> Matrix4D {
        Self::scaling(x, y, z) * self
    }

    /// Applies a rotation about X after `self`.
    pub fn rotate_x(self, r: f64) -> Matrix4D {
        Self::rotation_x(r) * self
    }

    /// Applies a rotation about Y after `self`.
    pub fn rotate_y(self, r: f64) -> Matrix4D {
        Self::rotation_y(r) * self
    }

    /// Applies a rotation about Z after `self`.
    pub fn rotate_z(self, r: f64) -> Matrix4D {
        Self::rotation_z(r) * self
    }

    /// Applies a unit shear after `self`.
    pub fn shear(self, axis: ShearAxis) -> Matrix4D {
        Self::skew(axis) * self
    }

    /// Transposes a matrix in-place.
    pub fn transpose(&mut self) {
        for r in 0..4 {
            for c in (r + 1)..4 {
                let tmp = self.rows[r][c];
                self.rows[r][c] = self.rows[c][r];
                self.rows[c][r] = tmp;
            }
        }
    }

    /// Returns the transpose of a matrix, leaving `self` untouched.
    pub fn transposition(&self) -> Matrix4D {
        let mut t = *self;
        t.transpose();

        t
    }

    /// Strikes row `row` and column `col`, leaving a 3x3 matrix.
    fn submatrix(&self, row: usize, col: usize) -> Matrix3D {
        let mut sub = Matrix3D::default();

        for (r, src) in (0..4).filter(|&r| r != row).enumerate() {
            for (c, src_c) in (0..4).filter(|&c| c != col).enumerate() {
                sub.rows[r][c] = self.rows[src][src_c];
            }
        }

        sub
    }

    /// The determinant of the submatrix at `row`, `col`.
    pub fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    /// The minor at `row`, `col`, negated when `row + col` is odd.
    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        sign(row, col) * self.minor(row, col)
    }

    /// Cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        (0..4).map(|c| self.rows[0][c] * self.cofactor(0, c)).sum()
    }

    pub fn is_invertible(&self) -> bool {
        !feq(self.determinant(), 0.0)
    }

    /// Calculates the inverse of a matrix.
    ///
    /// Fails with `TransformError::Degenerate` when the determinant is within
    /// the crate tolerance of zero (a scale by zero, for instance).
    pub fn inverse(&self) -> Result<Matrix4D, TransformError> {
        let determinant = self.determinant();
        if feq(determinant, 0.0) {
            return Err(TransformError::Degenerate { determinant });
        }

        let mut inv = Matrix4D::zero();
        for r in 0..4 {
            for c in 0..4 {
                // Writing (c, r) transposes the cofactor matrix on the fly
                inv.rows[c][r] = self.cofactor(r, c) / determinant;
            }
        }

        Ok(inv)
    }

    /// Multiplies the homogeneous tuple `(x, y, z, w)` and drops the result's
    /// `w`, which stays `w` for affine transforms.
    fn apply(&self, x: f64, y: f64, z: f64, w: f64) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (r, o) in out.iter_mut().enumerate() {
            let row = &self.rows[r];
            *o = row[0] * x + row[1] * y + row[2] * z + row[3] * w;
        }

        out
    }
}

impl From<[f64; 16]> for Matrix4D {
    fn from(data: [f64; 16]) -> Matrix4D {
        let mut m = Matrix4D::zero();
        for (i, v) in data.iter().enumerate() {
            m.rows[i / 4][i % 4] = *v;
        }

        m
    }
}

impl Index<(usize, usize)> for Matrix4D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.rows[index.0][index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix4D {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.rows[index.0][index.1]
    }
}

/// Matrix composition. Not commutative; the right operand applies first.
impl Mul<Matrix4D> for Matrix4D {
    type Output = Matrix4D;

    fn mul(self, other: Matrix4D) -> Matrix4D {
        let mut res = Matrix4D::zero();

        for r in 0..4 {
            for c in 0..4 {
                res.rows[r][c] = (0..4)
                    .map(|k| self.rows[r][k] * other.rows[k][c])
                    .sum();
            }
        }

        res
    }
}

/// Transforms a point, translation included.
impl Mul<Point> for Matrix4D {
    type Output = Point;

    fn mul(self, p: Point) -> Point {
        let [x, y, z] = self.apply(p.x, p.y, p.z, p.w());
        Point { x, y, z }
    }
}

/// Transforms a vector. Translation has no effect since `w == 0`.
///
/// ```
/// # use ray_caster::tuple::Vector;
/// # use ray_caster::matrix::Matrix4D;
/// let v = Vector::new(1.0, 4.0, 5.0);
/// assert_eq!(Matrix4D::translation(9.0, 9.0, 9.0) * v, v);
/// assert_eq!(Matrix4D::scaling(2.0, 2.0, 2.0) * v, Vector::new(2.0, 8.0, 10.0));
/// ```
impl Mul<Vector> for Matrix4D {
    type Output = Vector;

    fn mul(self, v: Vector) -> Vector {
        let [x, y, z] = self.apply(v.x, v.y, v.z, v.w());
        Vector { x, y, z }
    }
}

impl fmt::Display for Matrix4D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.rows.iter().enumerate() {
            write!(f, "|")?;
            for v in row.iter() {
                write!(f, " {} |", v)?;
            }

            // Don't put a newline on the final row (allow the user to do that)
            if r != 3 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[test]
fn identity() {
    let i = Matrix4D::identity();
    let a: Matrix4D = [ 0.0, 1.0,  2.0,  4.0,
                        1.0, 2.0,  4.0,  8.0,
                        2.0, 4.0,  8.0, 16.0,
                        4.0, 8.0, 16.0, 32.0, ].into();

    assert_eq!(i * a, a);
    assert_eq!(a * i, a);
    assert_eq!(i * Point::new(1.0, 2.0, 3.0), Point::new(1.0, 2.0, 3.0));
    assert_eq!(i * Vector::new(1.0, 2.0, 3.0), Vector::new(1.0, 2.0, 3.0));
}

#[test]
fn multiply() {
    let a: Matrix4D = [ 1.0, 2.0, 3.0, 4.0,
                        5.0, 6.0, 7.0, 8.0,
                        9.0, 8.0, 7.0, 6.0,
                        5.0, 4.0, 3.0, 2.0, ].into();

    let b: Matrix4D = [ -2.0, 1.0, 2.0,  3.0,
                         3.0, 2.0, 1.0, -1.0,
                         4.0, 3.0, 6.0,  5.0,
                         1.0, 2.0, 7.0,  8.0, ].into();

    let ab: Matrix4D = [ 20.0, 22.0,  50.0,  48.0,
                         44.0, 54.0, 114.0, 108.0,
                         40.0, 58.0, 110.0, 102.0,
                         16.0, 26.0,  46.0,  42.0, ].into();

    assert_eq!(a * b, ab);
}

#[test]
fn transpose() {
    let a: Matrix4D = [ 0.0, 9.0, 3.0, 0.0,
                        9.0, 8.0, 0.0, 8.0,
                        1.0, 8.0, 5.0, 3.0,
                        0.0, 0.0, 5.0, 8.0, ].into();

    let t: Matrix4D = [ 0.0, 9.0, 1.0, 0.0,
                        9.0, 8.0, 8.0, 0.0,
                        3.0, 0.0, 5.0, 5.0,
                        0.0, 8.0, 3.0, 8.0, ].into();

    assert_eq!(t, a.transposition());
    assert_eq!(t.transposition(), a);

    let mut m = a;
    m.transpose();
    assert_eq!(m, t);
}

#[test]
fn transpose_identity() {
    let i = Matrix4D::identity();
    assert_eq!(i, i.transposition());
}

#[test]
fn mat2_determinant() {
    let a = Matrix2D { rows: [[1.0, 5.0], [-3.0, 2.0]] };
    assert_eq!(a.determinant(), 17.0);
}

#[test]
fn mat3_submatrix() {
    let a = Matrix3D { rows: [[ 1.0, 5.0,  0.0],
                              [-3.0, 2.0,  7.0],
                              [ 0.0, 6.0, -3.0]] };

    assert_eq!(a.submatrix(0, 2), Matrix2D { rows: [[-3.0, 2.0], [0.0, 6.0]] });
}

#[test]
fn mat4_submatrix() {
    let a: Matrix4D = [ -6.0, 1.0,  1.0, 6.0,
                        -8.0, 5.0,  8.0, 6.0,
                        -1.0, 0.0,  8.0, 2.0,
                        -7.0, 1.0, -1.0, 1.0, ].into();

    let s = Matrix3D { rows: [[-6.0,  1.0, 6.0],
                              [-8.0,  8.0, 6.0],
                              [-7.0, -1.0, 1.0]] };

    assert_eq!(a.submatrix(2, 1), s);
}

#[test]
fn mat3_minor_and_cofactor() {
    let a = Matrix3D { rows: [[3.0,  5.0,  0.0],
                              [2.0, -1.0, -7.0],
                              [6.0, -1.0,  5.0]] };

    assert_eq!(a.minor(0, 0), -12.0);
    assert_eq!(a.cofactor(0, 0), -12.0);
    assert_eq!(a.minor(1, 0), 25.0);
    assert_eq!(a.cofactor(1, 0), -25.0);
}

#[test]
fn mat3_determinant() {
    let a = Matrix3D { rows: [[ 1.0, 2.0,  6.0],
                              [-5.0, 8.0, -4.0],
                              [ 2.0, 6.0,  4.0]] };

    assert_eq!(a.cofactor(0, 0), 56.0);
    assert_eq!(a.cofactor(0, 1), 12.0);
    assert_eq!(a.cofactor(0, 2), -46.0);
    assert_eq!(a.determinant(), -196.0);
}

#[test]
fn mat4_determinant() {
    let a: Matrix4D = [ -2.0, -8.0,  3.0,  5.0,
                        -3.0,  1.0,  7.0,  3.0,
                         1.0,  2.0, -9.0,  6.0,
                        -6.0,  7.0,  7.0, -9.0, ].into();

    assert_eq!(a.cofactor(0, 0), 690.0);
    assert_eq!(a.cofactor(0, 1), 447.0);
    assert_eq!(a.cofactor(0, 2), 210.0);
    assert_eq!(a.cofactor(0, 3), 51.0);
    assert_eq!(a.determinant(), -4071.0);
}

#[test]
fn mat4_inverse() {
    let a: Matrix4D = [  8.0, -5.0,  9.0,  2.0,
                         7.0,  5.0,  6.0,  1.0,
                        -6.0,  0.0,  9.0,  6.0,
                        -3.0,  0.0, -9.0, -4.0, ].into();

    let i: Matrix4D = [ -0.15385, -0.15385, -0.28205, -0.53846,
                        -0.07692,  0.12308,  0.02564,  0.03077,
                         0.35897,  0.35897,  0.43590,  0.92308,
                        -0.69231, -0.69231, -0.76923, -1.92308, ].into();

    assert_eq!(a.inverse().unwrap(), i);
}

#[test]
fn mat4_inverse_mult() {
    let a: Matrix4D = [  3.0, -9.0,  7.0,  3.0,
                         3.0,  8.0,  2.0, -9.0,
                        -4.0,  4.0,  4.0,  1.0,
                        -6.0,  5.0, -1.0,  1.0, ].into();

    let b: Matrix4D = [ 8.0,  2.0, 2.0, 2.0,
                        3.0, -1.0, 7.0, 0.0,
                        7.0,  0.0, 5.0, 4.0,
                        6.0, -2.0, 0.0, 5.0  ].into();

    let c = a * b;

    assert_eq!(a, c * b.inverse().unwrap());
}

#[test]
fn inverse_times_original_is_identity() {
    let transforms = [
        Matrix4D::translation(5.0, -3.0, 2.0),
        Matrix4D::scaling(2.0, 0.5, -4.0),
        Matrix4D::rotation_x(0.7),
        Matrix4D::rotation_y(-1.3),
        Matrix4D::rotation_z(2.9),
        Matrix4D::skew(ShearAxis::ZX),
        Matrix4D::identity().scale(0.5, 1.0, 1.0).rotate_z(0.785).translate(1.0, 2.0, 3.0),
    ];

    for m in transforms.iter() {
        assert_eq!(m.inverse().unwrap() * *m, Matrix4D::identity());
    }
}

#[test]
fn singular_matrix_is_degenerate() {
    let a: Matrix4D = [ -4.0,  2.0, -2.0, -3.0,
                         9.0,  6.0,  2.0,  6.0,
                         0.0, -5.0,  1.0, -5.0,
                         0.0,  0.0,  0.0,  0.0, ].into();

    assert!(!a.is_invertible());
    assert_eq!(a.inverse(), Err(TransformError::Degenerate { determinant: 0.0 }));
    assert!(Matrix4D::scaling(1.0, 0.0, 1.0).inverse().is_err());
}

#[test]
fn mat4_translation() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0);
    let point = Point::new(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Point::new(2.0, 1.0, 7.0));
}

#[test]
fn mat4_translation_inverse() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0).inverse().unwrap();
    let point = Point::new(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Point::new(-8.0, 7.0, 3.0));
}

#[test]
fn mat4_translation_vector() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0);
    let vector = Vector::new(-3.0, 4.0, 5.0);

    assert_eq!(transform * vector, vector);
}

#[test]
fn mat4_scaling() {
    let transform = Matrix4D::scaling(2.0, 3.0, 4.0);

    assert_eq!(transform * Point::new(-4.0, 6.0, 8.0), Point::new(-8.0, 18.0, 32.0));
    assert_eq!(transform * Vector::new(-4.0, 6.0, 8.0), Vector::new(-8.0, 18.0, 32.0));
}

#[test]
fn mat4_scaling_inverse() {
    let transform = Matrix4D::scaling(2.0, 3.0, 4.0).inverse().unwrap();
    let vector = Vector::new(-4.0, 6.0, 8.0);

    assert_eq!(transform * vector, Vector::new(-2.0, 2.0, 2.0));
}

#[test]
fn mat4_scaling_reflection() {
    let transform = Matrix4D::scaling(-1.0, 1.0, 1.0);
    let point = Point::new(2.0, 3.0, 4.0);

    assert_eq!(transform * point, Point::new(-2.0, 3.0, 4.0));
}

#[test]
fn mat4_rotate_x() {
    let half_quarter = Matrix4D::rotation_x(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    let point = Point::new(0.0, 1.0, 0.0);

    assert_eq!(full_quarter * point, Point::new(0.0, 0.0, 1.0));
    assert_eq!(half_quarter * point,
        Point::new(0.0, 2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0));
}

#[test]
fn mat4_rotate_x_inverse() {
    let half_quarter = Matrix4D::rotation_x(std::f64::consts::PI / 4.0);
    let point = Point::new(0.0, 1.0, 0.0);

    assert_eq!(half_quarter.inverse().unwrap() * point,
        Point::new(0.0, 2.0f64.sqrt() / 2.0, -(2.0f64.sqrt()) / 2.0));
}

#[test]
fn mat4_rotate_y() {
    let half_quarter = Matrix4D::rotation_y(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix4D::rotation_y(std::f64::consts::PI / 2.0);
    let point = Point::new(0.0, 0.0, 1.0);

    assert_eq!(full_quarter * point, Point::new(1.0, 0.0, 0.0));
    assert_eq!(half_quarter * point,
        Point::new(2.0f64.sqrt() / 2.0, 0.0, 2.0f64.sqrt() / 2.0));
}

#[test]
fn mat4_rotate_z() {
    let half_quarter = Matrix4D::rotation_z(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix4D::rotation_z(std::f64::consts::PI / 2.0);
    let point = Point::new(0.0, 1.0, 0.0);

    assert_eq!(full_quarter * point, Point::new(-1.0, 0.0, 0.0));
    assert_eq!(half_quarter * point,
        Point::new(-2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0));
}

#[test]
fn mat4_skew_axes() {
    let point = Point::new(2.0, 3.0, 4.0);
    let expected = [
        (ShearAxis::XY, Point::new(5.0, 3.0, 4.0)),
        (ShearAxis::XZ, Point::new(6.0, 3.0, 4.0)),
        (ShearAxis::YX, Point::new(2.0, 5.0, 4.0)),
        (ShearAxis::YZ, Point::new(2.0, 7.0, 4.0)),
        (ShearAxis::ZX, Point::new(2.0, 3.0, 6.0)),
        (ShearAxis::ZY, Point::new(2.0, 3.0, 7.0)),
    ];

    for (axis, p) in expected.iter() {
        assert_eq!(Matrix4D::skew(*axis) * point, *p, "shear {:?}", axis);
    }
}

#[test]
fn mat4_shearing_matches_skew() {
    assert_eq!(Matrix4D::shearing(0.0, 0.0, 0.0, 1.0, 0.0, 0.0),
        Matrix4D::skew(ShearAxis::YZ));
}

#[test]
fn chained_transforms() {
    let a = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    let b = Matrix4D::scaling(5.0, 5.0, 5.0);
    let c = Matrix4D::translation(10.0, 5.0, 7.0);
    let p = Point::new(1.0, 0.0, 1.0);

    let p2 = a * p;
    assert_eq!(p2, Point::new(1.0, -1.0, 0.0));
    let p3 = b * p2;
    assert_eq!(p3, Point::new(5.0, -5.0, 0.0));
    assert_eq!(c * p3, Point::new(15.0, 0.0, 7.0));

    assert_eq!((c * b * a) * p, Point::new(15.0, 0.0, 7.0));
}

#[test]
fn fluent_chain_applies_in_reading_order() {
    let fluent = Matrix4D::identity()
        .rotate_x(std::f64::consts::PI / 2.0)
        .scale(5.0, 5.0, 5.0)
        .translate(10.0, 5.0, 7.0);

    let explicit = Matrix4D::translation(10.0, 5.0, 7.0)
        * Matrix4D::scaling(5.0, 5.0, 5.0)
        * Matrix4D::rotation_x(std::f64::consts::PI / 2.0);

    assert_eq!(fluent, explicit);
    assert_eq!(Matrix4D::identity().shear(ShearAxis::XY).scale(0.5, 1.0, 1.0),
        Matrix4D::scaling(0.5, 1.0, 1.0) * Matrix4D::skew(ShearAxis::XY));
}

#[test]
fn display_rows() {
    let s = Matrix4D::identity().to_string();
    assert_eq!(s.lines().count(), 4);
    assert_eq!(s.lines().next(), Some("| 1 | 0 | 0 | 0 |"));
}
