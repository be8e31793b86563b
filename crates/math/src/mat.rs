//! Square matrices.
//!
//! Storage is row-major, `e[row][col]`, and the rows are contiguous so
//! [`Mat4::as_slice`] can be handed to a graphics API as is. Matrices act on
//! column vectors: `m * v`, and `a * b` applies `b` first.
//!
//! Equality is exact per entry. Use the `approx` traits to compare results of
//! floating point computations.

use core::fmt;
use core::ops;

use bytemuck::{Pod, Zeroable};

use crate::error::{MathError, Result};
use crate::vec::*;

macro_rules! mat_impl {
    ($m: ident, $t: ident, $v: ident, $n: literal) => {

        #[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(C)]
        pub struct $m {
            pub e: [[$t; $n]; $n],
        }

        impl Default for $m {
            #[inline]
            fn default() -> $m {
                $m::identity()
            }
        }

        impl $m {
            pub const ZERO: $m = $m { e: [[0.0; $n]; $n] };

            #[inline]
            pub fn identity() -> $m {
                $m::scale_uniform(1.0)
            }

            #[inline]
            pub fn scale_uniform(d: $t) -> $m {
                let mut m = $m::ZERO;
                for i in 0..$n {
                    m.e[i][i] = d;
                }
                m
            }

            #[inline]
            pub fn scale(v: $v) -> $m {
                let vv = v.to_array();

                let mut m = $m::ZERO;
                for i in 0..$n {
                    m.e[i][i] = vv[i];
                }
                m
            }

            #[inline]
            pub fn from_rows(rows: &[$v; $n]) -> $m {
                let mut m = $m::ZERO;
                for i in 0..$n {
                    m.e[i] = rows[i].to_array();
                }
                m
            }

            #[inline]
            pub fn from_columns(columns: &[$v; $n]) -> $m {
                $m::from_rows(columns).transpose()
            }

            #[inline]
            pub fn row(&self, i: usize) -> $v {
                $v::from_array(self.e[i])
            }

            #[inline]
            pub fn column(&self, j: usize) -> $v {
                let mut c = [0.0; $n];
                for i in 0..$n {
                    c[i] = self.e[i][j];
                }
                $v::from_array(c)
            }

            #[inline]
            pub fn to_rows(&self) -> [$v; $n] {
                bytemuck::cast(self.e)
            }

            #[inline]
            pub fn to_columns(&self) -> [$v; $n] {
                self.transpose().to_rows()
            }

            #[inline]
            pub fn transpose(&self) -> $m {
                let mut m = $m::ZERO;

                for i in 0..$n {
                    for j in 0..$n {
                        m.e[j][i] = self.e[i][j];
                    }
                }
                m
            }

            /// All entries, row after row.
            #[inline]
            pub fn as_slice(&self) -> &[$t] {
                bytemuck::cast_slice(&self.e)
            }

            #[inline]
            pub fn as_bytes(&self) -> &[u8] {
                bytemuck::bytes_of(self)
            }

            /// True if any entry is NaN or infinite.
            pub fn contains_nan(&self) -> bool {
                self.as_slice().iter().any(|x| !x.is_finite())
            }
        }

        impl ops::Index<usize> for $m {
            type Output = [$t; $n];

            #[inline]
            fn index(&self, row: usize) -> &[$t; $n] {
                &self.e[row]
            }
        }

        impl ops::IndexMut<usize> for $m {
            #[inline]
            fn index_mut(&mut self, row: usize) -> &mut [$t; $n] {
                &mut self.e[row]
            }
        }

        impl fmt::Display for $m {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                let prec = f.precision().unwrap_or(3);
                for (i, row) in self.e.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "|")?;
                    for x in row {
                        write!(f, " {:>w$.p$}", x, w = prec + 4, p = prec)?;
                    }
                    write!(f, " |")?;
                }
                Ok(())
            }
        }

        impl ops::Add<$m> for $m {
            type Output = $m;

            #[inline]
            fn add(mut self, rhs: $m) -> $m {
                self += rhs;
                self
            }
        }

        impl ops::Sub<$m> for $m {
            type Output = $m;

            #[inline]
            fn sub(mut self, rhs: $m) -> $m {
                self -= rhs;
                self
            }
        }

        impl ops::AddAssign<$m> for $m {
            #[inline]
            fn add_assign(&mut self, rhs: $m) {
                for i in 0..$n {
                    for j in 0..$n {
                        self.e[i][j] += rhs.e[i][j];
                    }
                }
            }
        }

        impl ops::SubAssign<$m> for $m {
            #[inline]
            fn sub_assign(&mut self, rhs: $m) {
                for i in 0..$n {
                    for j in 0..$n {
                        self.e[i][j] -= rhs.e[i][j];
                    }
                }
            }
        }

        impl ops::Mul<$m> for $m {
            type Output = $m;

            #[inline]
            fn mul(self, rhs: $m) -> $m {
                let mut m = $m::ZERO;

                let a = self.to_rows();
                let b = rhs.to_columns();

                for i in 0..$n {
                    for j in 0..$n {
                        m.e[i][j] = $v::dot(a[i], b[j]);
                    }
                }
                m
            }
        }

        impl ops::MulAssign<$m> for $m {
            #[inline]
            fn mul_assign(&mut self, rhs: $m) {
                *self = *self * rhs;
            }
        }

        impl ops::Mul<$v> for $m {
            type Output = $v;

            #[inline]
            fn mul(self, rhs: $v) -> $v {
                let mut v = [0.0; $n];

                let a = self.to_rows();

                for i in 0..$n {
                    v[i] = a[i].dot(rhs);
                }
                $v::from_array(v)
            }
        }

        impl ops::Mul<$t> for $m {
            type Output = $m;

            #[inline]
            fn mul(mut self, rhs: $t) -> $m {
                self *= rhs;
                self
            }
        }

        impl ops::Mul<$m> for $t {
            type Output = $m;

            #[inline]
            fn mul(self, rhs: $m) -> $m {
                rhs * self
            }
        }

        impl ops::MulAssign<$t> for $m {
            #[inline]
            fn mul_assign(&mut self, rhs: $t) {
                for x in self.e.iter_mut().flatten() {
                    *x *= rhs;
                }
            }
        }

        impl ops::Div<$t> for $m {
            type Output = $m;

            #[inline]
            fn div(mut self, rhs: $t) -> $m {
                self /= rhs;
                self
            }
        }

        impl ops::DivAssign<$t> for $m {
            #[inline]
            fn div_assign(&mut self, rhs: $t) {
                for x in self.e.iter_mut().flatten() {
                    *x /= rhs;
                }
            }
        }

        impl ops::Neg for $m {
            type Output = $m;

            #[inline]
            fn neg(self) -> $m {
                self * -1.0
            }
        }

        impl approx::AbsDiffEq for $m {
            type Epsilon = $t;

            #[inline]
            fn default_epsilon() -> $t {
                <$t as approx::AbsDiffEq>::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &$m, epsilon: $t) -> bool {
                self.as_slice().iter().zip(other.as_slice())
                    .all(|(a, b)| approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
            }
        }

        impl approx::RelativeEq for $m {
            #[inline]
            fn default_max_relative() -> $t {
                <$t as approx::RelativeEq>::default_max_relative()
            }

            fn relative_eq(&self, other: &$m, epsilon: $t, max_relative: $t) -> bool {
                self.as_slice().iter().zip(other.as_slice())
                    .all(|(a, b)| approx::RelativeEq::relative_eq(a, b, epsilon, max_relative))
            }
        }

        impl approx::UlpsEq for $m {
            #[inline]
            fn default_max_ulps() -> u32 {
                <$t as approx::UlpsEq>::default_max_ulps()
            }

            fn ulps_eq(&self, other: &$m, epsilon: $t, max_ulps: u32) -> bool {
                self.as_slice().iter().zip(other.as_slice())
                    .all(|(a, b)| approx::UlpsEq::ulps_eq(a, b, epsilon, max_ulps))
            }
        }
    }
}

macro_rules! mat2_decomposition_impl {
    ($m: ident, $t: ident) => {
        impl $m {
            /// The entry left after removing `row` and `col`.
            ///
            /// # Panics
            ///
            /// If `row` or `col` is not 0 or 1.
            #[inline]
            pub fn minor(&self, row: usize, col: usize) -> $t {
                assert!(row < 2 && col < 2, "minor ({row}, {col}) out of range");
                self.e[1 - row][1 - col]
            }

            #[inline]
            pub fn cofactor(&self, row: usize, col: usize) -> $t {
                let d = self.minor(row, col);
                if (row + col) % 2 == 0 { d } else { -d }
            }

            #[inline]
            pub fn determinant(&self) -> $t {
                self.e[0][0] * self.e[1][1] - self.e[0][1] * self.e[1][0]
            }
        }
    }
}

macro_rules! mat_decomposition_impl {
    ($m: ident, $sub: ident, $t: ident, $n: literal) => {
        impl $m {
            /// The one-smaller matrix left after removing `row` and `col`.
            ///
            /// # Panics
            ///
            /// If `row` or `col` is out of range.
            pub fn minor(&self, row: usize, col: usize) -> $sub {
                assert!(row < $n && col < $n, "minor ({row}, {col}) out of range");

                let mut m = $sub::ZERO;
                for (r, i) in (0..$n).filter(|&i| i != row).enumerate() {
                    for (c, j) in (0..$n).filter(|&j| j != col).enumerate() {
                        m.e[r][c] = self.e[i][j];
                    }
                }
                m
            }

            #[inline]
            pub fn cofactor(&self, row: usize, col: usize) -> $t {
                let d = self.minor(row, col).determinant();
                if (row + col) % 2 == 0 { d } else { -d }
            }

            /// Cofactor expansion along the first row.
            pub fn determinant(&self) -> $t {
                let mut det = 0.0;
                for j in 0..$n {
                    det += self.e[0][j] * self.cofactor(0, j);
                }
                det
            }
        }

        /// Embeds the smaller matrix in the upper-left block, the rest is
        /// identity.
        impl From<$sub> for $m {
            fn from(s: $sub) -> $m {
                let mut m = $m::identity();
                for i in 0..$n - 1 {
                    m.e[i][..$n - 1].copy_from_slice(&s.e[i]);
                }
                m
            }
        }
    }
}

macro_rules! mat_inverse_impl {
    ($m: ident, $t: ident, $n: literal) => {
        impl $m {
            pub fn cofactor_matrix(&self) -> $m {
                let mut m = $m::ZERO;
                for i in 0..$n {
                    for j in 0..$n {
                        m.e[i][j] = self.cofactor(i, j);
                    }
                }
                m
            }

            /// Transpose of the cofactor matrix.
            #[inline]
            pub fn adjugate(&self) -> $m {
                self.cofactor_matrix().transpose()
            }

            /// Adjugate divided by the determinant. A singular matrix gives
            /// infinite or NaN entries, see [`Self::try_inverse`].
            #[inline]
            pub fn inverse(&self) -> $m {
                self.adjugate() / self.determinant()
            }

            #[inline]
            pub fn is_invertible(&self) -> bool {
                let det = self.determinant();
                det != 0.0 && det.is_finite()
            }

            pub fn try_inverse(&self) -> Result<$m> {
                let det = self.determinant();
                if det == 0.0 || !det.is_finite() {
                    return Err(MathError::SingularMatrix { determinant: det as f64 });
                }
                Ok(self.adjugate() / det)
            }
        }
    }
}

macro_rules! mat3_rotation_impl {
    ($m: ident, $v3: ident, $t: ident) => {
        impl $m {
            /// Rotation of `angle` radians about the unit vector `axis`
            /// (Rodrigues' formula), counter-clockwise when looking down the
            /// axis.
            pub fn rotation(axis: $v3, angle: $t) -> Self {
                let a = axis.x;
                let b = axis.y;
                let c = axis.z;

                let cos_alpha = angle.cos();
                let sin_alpha = angle.sin();

                let k = 1. - cos_alpha;

                let mut m = $m::identity();
                m.e[0][0] = a * a * k + cos_alpha;
                m.e[1][1] = b * b * k + cos_alpha;
                m.e[2][2] = c * c * k + cos_alpha;

                m.e[1][0] = a * b * k + c * sin_alpha;
                m.e[2][0] = a * c * k - b * sin_alpha;
                m.e[2][1] = b * c * k + a * sin_alpha;

                m.e[0][1] = a * b * k - c * sin_alpha;
                m.e[0][2] = a * c * k + b * sin_alpha;
                m.e[1][2] = b * c * k - a * sin_alpha;

                m
            }
        }
    }
}

macro_rules! mat4_transform_impl {
    ($m: ident, $m3: ident, $v3: ident, $t: ident) => {
        impl $m {
            #[inline]
            pub fn rotation(axis: $v3, angle: $t) -> Self {
                $m::from($m3::rotation(axis, angle))
            }

            pub fn translation(v: $v3) -> Self {
                let mut m = $m::identity();
                m.e[0][3] = v.x;
                m.e[1][3] = v.y;
                m.e[2][3] = v.z;

                m
            }

            pub fn scale3(v: $v3) -> Self {
                let vv = v.to_array();

                let mut m = $m::identity();
                for i in 0..3 {
                    m.e[i][i] = vv[i];
                }

                m
            }

            #[inline]
            pub fn upper_left(&self) -> $m3 {
                self.minor(3, 3)
            }

            /// Inverse transpose of the upper-left 3x3 block, for transforming
            /// normals.
            #[inline]
            pub fn normal_matrix(&self) -> $m3 {
                self.upper_left().inverse().transpose()
            }

            /// Transforms a point (w = 1) and divides by the resulting w.
            #[inline]
            pub fn transform_point(&self, p: $v3) -> $v3 {
                (*self * p.extend(1.0)).perspective_divide()
            }

            /// Transforms a direction (w = 0), translation has no effect.
            #[inline]
            pub fn transform_vector(&self, v: $v3) -> $v3 {
                (*self * v.extend(0.0)).truncate()
            }
        }
    }
}

mat_impl!(Mat4, f32, Vec4, 4);
mat_impl!(Mat3, f32, Vec3, 3);
mat_impl!(Mat2, f32, Vec2, 2);

mat_impl!(Mat4d, f64, Vec4d, 4);
mat_impl!(Mat3d, f64, Vec3d, 3);
mat_impl!(Mat2d, f64, Vec2d, 2);

mat2_decomposition_impl!(Mat2, f32);
mat_decomposition_impl!(Mat3, Mat2, f32, 3);
mat_decomposition_impl!(Mat4, Mat3, f32, 4);

mat2_decomposition_impl!(Mat2d, f64);
mat_decomposition_impl!(Mat3d, Mat2d, f64, 3);
mat_decomposition_impl!(Mat4d, Mat3d, f64, 4);

mat_inverse_impl!(Mat2, f32, 2);
mat_inverse_impl!(Mat3, f32, 3);
mat_inverse_impl!(Mat4, f32, 4);

mat_inverse_impl!(Mat2d, f64, 2);
mat_inverse_impl!(Mat3d, f64, 3);
mat_inverse_impl!(Mat4d, f64, 4);

mat3_rotation_impl!(Mat3, Vec3, f32);
mat3_rotation_impl!(Mat3d, Vec3d, f64);

mat4_transform_impl!(Mat4, Mat3, Vec3, f32);
mat4_transform_impl!(Mat4d, Mat3d, Vec3d, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use core::f32::consts::FRAC_PI_2;

    fn sample3() -> Mat3 {
        Mat3::from_rows(&[
            Vec3::new(1., 2., 3.),
            Vec3::new(0., 1., 4.),
            Vec3::new(5., 6., 0.),
        ])
    }

    fn sample4() -> Mat4d {
        Mat4d::from_rows(&[
            Vec4d::new(2., 1., 0., 3.),
            Vec4d::new(0., 3., 5., 1.),
            Vec4d::new(0., 0., 4., 2.),
            Vec4d::new(0., 0., 0., 5.),
        ])
    }

    #[test]
    fn identity() {
        let m = Mat4::identity();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(m[i][j], if i == j { 1.0 } else { 0.0 });
            }
        }
        assert_eq!(Mat4::default(), m);
        assert_eq!(Mat2d::default(), Mat2d::identity());
    }

    #[test]
    fn row_major_layout() {
        let m = Mat2::from_rows(&[Vec2::new(1., 2.), Vec2::new(3., 4.)]);
        assert_eq!(m.as_slice(), &[1f32, 2., 3., 4.]);
        assert_eq!(m.as_bytes().len(), 16);
        assert_eq!(m.row(1), Vec2::new(3., 4.));
        assert_eq!(m.column(1), Vec2::new(2., 4.));
        assert_eq!(Mat2::from_columns(&m.to_columns()), m);

        let t = Mat4::translation(Vec3::new(7., 8., 9.));
        assert_eq!(&t.as_slice()[..4], &[1f32, 0., 0., 7.]);
    }

    #[test]
    fn arithmetic() {
        let a = sample3();
        let i = Mat3::identity();

        assert_eq!(a + i - i, a);
        assert_eq!(a * 2., a + a);
        assert_eq!(2. * a, a * 2.);
        assert_eq!((a * 4.) / 2., a + a);
        assert_eq!(-a + a, Mat3::ZERO);

        let mut b = a;
        b += a;
        b -= a;
        b *= 3.;
        b /= 3.;
        b *= i;
        assert_eq!(b, a);
    }

    #[test]
    fn multiplication_is_row_by_column() {
        let a = Mat2::from_rows(&[Vec2::new(1., 2.), Vec2::new(3., 4.)]);
        let b = Mat2::from_rows(&[Vec2::new(0., 1.), Vec2::new(1., 0.)]);

        assert_eq!(a * b, Mat2::from_rows(&[Vec2::new(2., 1.), Vec2::new(4., 3.)]));
        assert_eq!(b * a, Mat2::from_rows(&[Vec2::new(3., 4.), Vec2::new(1., 2.)]));
        assert_ne!(a * b, b * a);
        assert_eq!(a * Vec2::new(1., 1.), Vec2::new(3., 7.));
    }

    #[test]
    fn minor_and_determinant() {
        let a = sample3();
        assert_eq!(a.minor(0, 0), Mat2::from_rows(&[Vec2::new(1., 4.), Vec2::new(6., 0.)]));
        assert_eq!(a.minor(1, 2), Mat2::from_rows(&[Vec2::new(1., 2.), Vec2::new(5., 6.)]));
        assert_eq!(a.determinant(), 1.0);

        let b = sample4();
        assert_eq!(b.determinant(), 120.0);
        assert_eq!(b.minor(3, 3).determinant(), 24.0);

        let c = Mat2::from_rows(&[Vec2::new(4., 7.), Vec2::new(2., 6.)]);
        assert_eq!(c.determinant(), 10.0);
        assert_eq!(c.minor(0, 1), 2.0);
        assert_eq!(c.cofactor(0, 1), -2.0);
    }

    #[test]
    #[should_panic]
    fn minor_out_of_range() {
        let _ = Mat3::identity().minor(3, 0);
    }

    #[test]
    fn adjugate_and_inverse() {
        let a = sample3();
        let inv = Mat3::from_rows(&[
            Vec3::new(-24., 18., 5.),
            Vec3::new(20., -15., -4.),
            Vec3::new(-5., 4., 1.),
        ]);
        assert_eq!(a.adjugate(), inv);
        assert_eq!(a.inverse(), inv);
        assert_eq!(a * a.inverse(), Mat3::identity());

        let c = Mat2::from_rows(&[Vec2::new(4., 7.), Vec2::new(2., 6.)]);
        assert_eq!(c.adjugate(), Mat2::from_rows(&[Vec2::new(6., -7.), Vec2::new(-2., 4.)]));
        assert_eq!(c.inverse(), Mat2::from_rows(&[Vec2::new(0.6, -0.7), Vec2::new(-0.2, 0.4)]));

        let b = sample4();
        assert_relative_eq!(b * b.inverse(), Mat4d::identity(), epsilon = 1e-12);
        assert_relative_eq!(b.inverse() * b, Mat4d::identity(), epsilon = 1e-12);
    }

    #[test]
    fn singular_inverse_is_silent() {
        let s = Mat3::from_rows(&[
            Vec3::new(2., 0., 1.),
            Vec3::new(1., 3., 2.),
            Vec3::new(1., 1., 1.),
        ]);
        assert_eq!(s.determinant(), 0.0);
        assert!(!s.is_invertible());
        assert!(s.inverse().contains_nan());
        assert_eq!(s.try_inverse(), Err(MathError::SingularMatrix { determinant: 0.0 }));

        assert!(Mat4::ZERO.inverse().contains_nan());
        assert!(sample3().is_invertible());
        assert_eq!(sample3().try_inverse(), Ok(sample3().inverse()));
    }

    #[test]
    fn transpose_and_nan() {
        let a = sample4();
        assert_eq!(a.transpose().transpose(), a);
        assert_eq!(a.transpose()[3][0], 3.0);

        let mut m = Mat4::identity();
        assert!(!m.contains_nan());
        m[2][1] = f32::NAN;
        assert!(m.contains_nan());
        m[2][1] = f32::INFINITY;
        assert!(m.contains_nan());
    }

    #[test]
    fn embedding() {
        let m: Mat4 = Mat4::from(sample3());
        assert_eq!(m.upper_left(), sample3());
        assert_eq!(m.row(3), Vec4::new(0., 0., 0., 1.));
        assert_eq!(m.column(3), Vec4::new(0., 0., 0., 1.));

        let m3 = Mat3::from(Mat2::scale_uniform(2.));
        assert_eq!(m3, Mat3::scale(Vec3::new(2., 2., 1.)));
    }

    #[test]
    fn rotation_translation_scale() {
        let r = Mat4::rotation(Vec3::Z, FRAC_PI_2);
        assert_abs_diff_eq!(r.transform_point(Vec3::X), Vec3::Y, epsilon = 1e-6);
        assert_abs_diff_eq!(Mat3::rotation(Vec3::X, FRAC_PI_2) * Vec3::Y, Vec3::Z, epsilon = 1e-6);

        let t = Mat4::translation(Vec3::new(1., 2., 3.));
        assert_eq!(t.transform_point(Vec3::ZERO), Vec3::new(1., 2., 3.));
        assert_eq!(t.transform_vector(Vec3::X), Vec3::X);

        let s = Mat4::scale3(Vec3::new(2., 3., 4.));
        assert_eq!(s.transform_point(Vec3::ONE), Vec3::new(2., 3., 4.));
        assert_eq!(s * Vec4::ONE, Vec4::new(2., 3., 4., 1.));
    }

    #[test]
    fn normal_matrix() {
        let m = Mat4::translation(Vec3::new(5., 5., 5.)) * Mat4::scale3(Vec3::new(2., 2., 2.));
        assert_relative_eq!(m.normal_matrix(), Mat3::scale_uniform(0.5));

        let r = Mat4::rotation(Vec3::new(0., 1., 0.), 0.7);
        assert_relative_eq!(r.normal_matrix(), r.upper_left(), epsilon = 1e-6);
    }

    #[test]
    fn display() {
        let m = Mat2::from_rows(&[Vec2::new(1., -2.), Vec2::new(0.5, 4.)]);
        assert_eq!(format!("{:.1}", m), "|   1.0  -2.0 |\n|   0.5   4.0 |");
    }
}
