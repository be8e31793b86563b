use core::fmt;
use core::ops;

use bytemuck::{Pod, Zeroable};

use crate::error::{MathError, Result};
use crate::mat::{Mat3, Mat3d, Mat4, Mat4d};
use crate::vec::{approx_fields_impl, Vec3, Vec3d, Vec4, Vec4d};

/// Above this cosine of the angle between two quaternions `slerp` falls back
/// to a normalized lerp, the sine in the denominator is too close to zero.
const SLERP_NLERP_THRESHOLD: f64 = 0.9995;

macro_rules! quat_impl {
    ($name: ident, $t: ident, $v3: ident, $v: ident, $m: ident, $m4: ident) => {

        /// `w + xi + yj + zk`. Only unit quaternions are rotations, nothing
        /// normalizes automatically.
        #[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(C)]
        pub struct $name {
            pub w: $t,
            pub x: $t,
            pub y: $t,
            pub z: $t,
        }

        impl Default for $name {
            #[inline]
            fn default() -> Self {
                Self::identity()
            }
        }

        impl $name {
            #[inline]
            pub const fn new(w: $t, x: $t, y: $t, z: $t) -> Self {
                Self { w, x, y, z }
            }

            #[inline]
            pub const fn identity() -> Self {
                Self { w: 1.0, x: 0.0, y: 0.0, z: 0.0 }
            }

            #[inline]
            pub fn re(&self) -> $t {
                self.w
            }

            #[inline]
            pub fn im(&self) -> $v3 {
                $v3 { x: self.x, y: self.y, z: self.z }
            }

            pub fn from_vec4(v: $v) -> Self {
                Self { x: v.x, y: v.y, z: v.z, w: v.w }
            }

            pub fn to_vec4(self) -> $v {
                $v { x: self.x, y: self.y, z: self.z, w: self.w }
            }

            /// Components in storage order: `[w, x, y, z]`.
            #[inline]
            pub fn to_array(self) -> [$t; 4] {
                bytemuck::cast(self)
            }

            #[inline]
            pub fn conjugate(self) -> Self {
                $name {
                    w: self.w,
                    x: -self.x,
                    y: -self.y,
                    z: -self.z,
                }
            }

            /// Conjugate over squared length. Zero quaternions give NaN.
            #[inline]
            pub fn inverse(self) -> Self {
                self.conjugate() / self.length2()
            }

            pub fn try_inverse(self) -> Result<Self> {
                let n = self.length2();
                if n == 0.0 || !n.is_finite() {
                    return Err(MathError::ZeroLength);
                }
                Ok(self.conjugate() / n)
            }

            #[inline]
            pub fn dot(self, b: Self) -> $t {
                self.w * b.w + self.x * b.x + self.y * b.y + self.z * b.z
            }

            #[inline]
            pub fn length2(self) -> $t {
                self.dot(self)
            }

            #[inline]
            pub fn length(self) -> $t {
                self.length2().sqrt()
            }

            #[inline]
            pub fn normalized(self) -> Self {
                self * (1.0 / self.length())
            }

            pub fn try_normalized(self) -> Result<Self> {
                let len = self.length();
                if len == 0.0 || !len.is_finite() {
                    return Err(MathError::ZeroLength);
                }
                Ok(self * (1.0 / len))
            }

            /// Rotation of `angle` radians about the unit vector `axis`.
            #[inline]
            pub fn angle_axis(angle: $t, axis: $v3) -> Self {
                let (s, c) = (angle * 0.5).sin_cos();
                Self {
                    w: c,
                    x: axis.x * s,
                    y: axis.y * s,
                    z: axis.z * s,
                }
            }

            /// Inverse of [`Self::to_euler_angles`]: `x` is roll, `y` pitch
            /// and `z` yaw, applied as `Rz(yaw) * Ry(pitch) * Rx(roll)`.
            pub fn from_euler(angles: $v3) -> Self {
                let (sr, cr) = (angles.x * 0.5).sin_cos();
                let (sp, cp) = (angles.y * 0.5).sin_cos();
                let (sy, cy) = (angles.z * 0.5).sin_cos();

                Self {
                    w: cr * cp * cy + sr * sp * sy,
                    x: sr * cp * cy - cr * sp * sy,
                    y: cr * sp * cy + sr * cp * sy,
                    z: cr * cp * sy - sr * sp * cy,
                }
            }

            /// Roll (about x), pitch (about y) and yaw (about z) in radians.
            ///
            /// Pitch is in `[-pi/2, pi/2]`. Its sine is clamped, so at gimbal
            /// lock the result is still finite.
            pub fn to_euler_angles(self) -> $v3 {
                let (w, x, y, z) = (self.w, self.x, self.y, self.z);

                let roll = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));
                let pitch = (2.0 * (w * y - z * x)).clamp(-1.0, 1.0).asin();
                let yaw = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));

                $v3 { x: roll, y: pitch, z: yaw }
            }

            /// Rotation matrix to quaternion (Shepperd's method). `m` must be
            /// orthonormal with determinant 1.
            pub fn from_mat3(m: $m) -> Self {
                let e = &m.e;
                let trace = e[0][0] + e[1][1] + e[2][2];

                if trace > 0.0 {
                    let s = (trace + 1.0).sqrt() * 2.0;
                    Self {
                        w: 0.25 * s,
                        x: (e[2][1] - e[1][2]) / s,
                        y: (e[0][2] - e[2][0]) / s,
                        z: (e[1][0] - e[0][1]) / s,
                    }
                } else if e[0][0] > e[1][1] && e[0][0] > e[2][2] {
                    let s = (1.0 + e[0][0] - e[1][1] - e[2][2]).sqrt() * 2.0;
                    Self {
                        w: (e[2][1] - e[1][2]) / s,
                        x: 0.25 * s,
                        y: (e[0][1] + e[1][0]) / s,
                        z: (e[0][2] + e[2][0]) / s,
                    }
                } else if e[1][1] > e[2][2] {
                    let s = (1.0 + e[1][1] - e[0][0] - e[2][2]).sqrt() * 2.0;
                    Self {
                        w: (e[0][2] - e[2][0]) / s,
                        x: (e[0][1] + e[1][0]) / s,
                        y: 0.25 * s,
                        z: (e[1][2] + e[2][1]) / s,
                    }
                } else {
                    let s = (1.0 + e[2][2] - e[0][0] - e[1][1]).sqrt() * 2.0;
                    Self {
                        w: (e[1][0] - e[0][1]) / s,
                        x: (e[0][2] + e[2][0]) / s,
                        y: (e[1][2] + e[2][1]) / s,
                        z: 0.25 * s,
                    }
                }
            }

            #[inline]
            pub fn to_mat3(self) -> $m {
                let x = self.x;
                let y = self.y;
                let z = self.z;
                let w = self.w;

                let xy = x * y;
                let xz = x * z;
                let xw = x * w;
                let yz = y * z;
                let yw = y * w;
                let zw = z * w;
                let x_squared = x * x;
                let y_squared = y * y;
                let z_squared = z * z;

                let mut m = $m::identity();
                m.e[0][0] = 1. - 2. * (y_squared + z_squared);
                m.e[0][1] = 2. * (xy - zw);
                m.e[0][2] = 2. * (xz + yw);

                m.e[1][0] = 2. * (xy + zw);
                m.e[1][1] = 1. - 2. * (x_squared + z_squared);
                m.e[1][2] = 2. * (yz - xw);

                m.e[2][0] = 2. * (xz - yw);
                m.e[2][1] = 2. * (yz + xw);
                m.e[2][2] = 1. - 2. * (x_squared + y_squared);

                m
            }

            /// Rotation in the upper-left block, identity translation.
            #[inline]
            pub fn to_mat4(self) -> $m4 {
                $m4::from(self.to_mat3())
            }

            /// Normalized linear interpolation.
            #[inline]
            pub fn nlerp(self, b: Self, t: $t) -> Self {
                (self * (1.0 - t) + b * t).normalized()
            }

            /// Spherical linear interpolation along the shorter arc. Both
            /// inputs are expected to be unit quaternions.
            pub fn slerp(self, b: Self, t: $t) -> Self {
                let mut cos_theta = self.dot(b);
                let mut end = b;
                if cos_theta < 0.0 {
                    cos_theta = -cos_theta;
                    end = -b;
                }

                if cos_theta > SLERP_NLERP_THRESHOLD as $t {
                    return self.nlerp(end, t);
                }

                let theta = cos_theta.acos();
                let sin_theta = theta.sin();
                let wa = ((1.0 - t) * theta).sin() / sin_theta;
                let wb = (t * theta).sin() / sin_theta;

                self * wa + end * wb
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}(w: {:.prec$}, x: {:.prec$}, y: {:.prec$}, z: {:.prec$})",
                       stringify!($name), self.w, self.x, self.y, self.z,
                       prec = f.precision().unwrap_or(3))
            }
        }

        impl ops::Add<$name> for $name {
            type Output = $name;

            #[inline]
            fn add(self, rhs: $name) -> $name {
                $name {
                    w: self.w + rhs.w,
                    x: self.x + rhs.x,
                    y: self.y + rhs.y,
                    z: self.z + rhs.z,
                }
            }
        }

        impl ops::Sub<$name> for $name {
            type Output = $name;

            #[inline]
            fn sub(self, rhs: $name) -> $name {
                $name {
                    w: self.w - rhs.w,
                    x: self.x - rhs.x,
                    y: self.y - rhs.y,
                    z: self.z - rhs.z,
                }
            }
        }

        impl ops::Neg for $name {
            type Output = $name;

            #[inline]
            fn neg(self) -> $name {
                $name { w: -self.w, x: -self.x, y: -self.y, z: -self.z }
            }
        }

        impl ops::Mul<$t> for $name {
            type Output = $name;

            #[inline]
            fn mul(self, rhs: $t) -> $name {
                $name {
                    w: self.w * rhs,
                    x: self.x * rhs,
                    y: self.y * rhs,
                    z: self.z * rhs,
                }
            }
        }

        impl ops::Mul<$name> for $t {
            type Output = $name;

            #[inline]
            fn mul(self, rhs: $name) -> $name {
                rhs * self
            }
        }

        impl ops::Div<$t> for $name {
            type Output = $name;

            #[inline]
            fn div(self, rhs: $t) -> $name {
                $name {
                    w: self.w / rhs,
                    x: self.x / rhs,
                    y: self.y / rhs,
                    z: self.z / rhs,
                }
            }
        }

        /// Hamilton product, `self` applied after `rhs`.
        impl ops::Mul<$name> for $name {
            type Output = $name;

            #[inline]
            fn mul(self, rhs: $name) -> $name {
                let (w1, x1, y1, z1) = (self.w, self.x, self.y, self.z);
                let (w2, x2, y2, z2) = (rhs.w, rhs.x, rhs.y, rhs.z);

                $name {
                    w: w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
                    x: w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
                    y: w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
                    z: w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
                }
            }
        }

        impl ops::Div<$name> for $name {
            type Output = $name;

            #[inline]
            fn div(self, rhs: $name) -> $name {
                self * rhs.inverse()
            }
        }

        impl ops::AddAssign<$name> for $name {
            #[inline]
            fn add_assign(&mut self, rhs: $name) {
                *self = *self + rhs;
            }
        }

        impl ops::SubAssign<$name> for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: $name) {
                *self = *self - rhs;
            }
        }

        impl ops::MulAssign<$name> for $name {
            #[inline]
            fn mul_assign(&mut self, rhs: $name) {
                *self = *self * rhs;
            }
        }

        impl ops::DivAssign<$name> for $name {
            #[inline]
            fn div_assign(&mut self, rhs: $name) {
                *self = *self / rhs;
            }
        }

        impl ops::MulAssign<$t> for $name {
            #[inline]
            fn mul_assign(&mut self, rhs: $t) {
                *self = *self * rhs;
            }
        }

        impl ops::DivAssign<$t> for $name {
            #[inline]
            fn div_assign(&mut self, rhs: $t) {
                *self = *self / rhs;
            }
        }

        /// Rotates a vector, `self` must be a unit quaternion.
        impl ops::Mul<$v3> for $name {
            type Output = $v3;

            #[inline]
            fn mul(self, rhs: $v3) -> $v3 {
                let u = self.im();
                let t = 2.0 * u.cross(rhs);

                rhs + self.w * t + u.cross(t)
            }
        }

        impl ops::Mul<$m> for $name {
            type Output = $m;

            #[inline]
            fn mul(self, rhs: $m) -> $m  {
                self.to_mat3() * rhs
            }
        }

        approx_fields_impl!($name, $t, w, x, y, z);
    }
}

quat_impl!(Quat, f32, Vec3, Vec4, Mat3, Mat4);
quat_impl!(Quatd, f64, Vec3d, Vec4d, Mat3d, Mat4d);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use core::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn hamilton_product() {
        let i = Quat::new(0., 1., 0., 0.);
        let j = Quat::new(0., 0., 1., 0.);
        let k = Quat::new(0., 0., 0., 1.);
        let minus_one = Quat::new(-1., 0., 0., 0.);

        assert_eq!(i * i, minus_one);
        assert_eq!(j * j, minus_one);
        assert_eq!(k * k, minus_one);
        assert_eq!(i * j * k, minus_one);
        assert_eq!(i * j, k);
        assert_eq!(j * i, -k);

        let a = Quat::new(1., 2., 3., 4.);
        let b = Quat::new(5., 6., 7., 8.);
        assert_eq!(a * b, Quat::new(-60., 12., 30., 24.));
        assert_eq!(b * a, Quat::new(-60., 20., 14., 32.));
    }

    #[test]
    fn non_commutative_rotations() {
        let q1 = Quat::angle_axis(FRAC_PI_2, Vec3::X);
        let q2 = Quat::angle_axis(FRAC_PI_2, Vec3::Y);
        assert_ne!(q1 * q2, q2 * q1);
    }

    #[test]
    fn conjugate_inverse_length() {
        let q = Quat::new(1., 2., 3., 4.);
        assert_eq!(q.conjugate(), Quat::new(1., -2., -3., -4.));
        assert_eq!(q.length2(), 30.);
        assert_relative_eq!(q.length(), 30f32.sqrt());
        assert_relative_eq!(q * q.inverse(), Quat::identity(), epsilon = 1e-6);
        assert_relative_eq!((q / q), Quat::identity(), epsilon = 1e-6);
        assert_relative_eq!(q.normalized().length(), 1.0, epsilon = 1e-6);

        let zero = Quat::new(0., 0., 0., 0.);
        assert!(zero.inverse().w.is_nan());
        assert_eq!(zero.try_inverse(), Err(MathError::ZeroLength));
        assert_eq!(zero.try_normalized(), Err(MathError::ZeroLength));
        assert!(q.try_inverse().is_ok());
    }

    #[test]
    fn scalar_and_compound_ops() {
        let mut q = Quat::new(1., 2., 3., 4.);
        assert_eq!(q * 2., 2. * q);
        assert_eq!(q + q, q * 2.);
        assert_eq!(q - q, Quat::new(0., 0., 0., 0.));
        assert_eq!((q * 2.) / 2., q);

        q += Quat::identity();
        q -= Quat::identity();
        q *= 2.;
        q /= 2.;
        q *= Quat::identity();
        assert_eq!(q, Quat::new(1., 2., 3., 4.));

        q /= Quat::identity();
        assert_eq!(q, Quat::new(1., 2., 3., 4.));
    }

    #[test]
    fn default_is_identity() {
        assert_eq!(Quat::default(), Quat::identity());
        assert_eq!(Quatd::default().to_array(), [1., 0., 0., 0.]);
        assert_eq!(Quat::identity().to_mat4(), Mat4::identity());
    }

    #[test]
    fn half_turn_about_z() {
        let q = Quat::angle_axis(PI, Vec3::Z);
        let p = q.to_mat4() * Vec4::new(1., 0., 0., 1.);
        assert_abs_diff_eq!(p, Vec4::new(-1., 0., 0., 1.), epsilon = 1e-6);
        assert_abs_diff_eq!(q * Vec3::X, -Vec3::X, epsilon = 1e-6);
    }

    #[test]
    fn matches_axis_angle_matrix() {
        let axis = Vec3::new(1., 2., -1.).normalized();
        let q = Quat::angle_axis(0.8, axis);
        assert_relative_eq!(q.to_mat3(), Mat3::rotation(axis, 0.8), epsilon = 1e-6);
        assert_relative_eq!(q.to_mat4(), Mat4::rotation(axis, 0.8), epsilon = 1e-6);

        let v = Vec3::new(0.3, -2., 5.);
        assert_relative_eq!(q * v, q.to_mat3() * v, epsilon = 1e-5);
        assert_relative_eq!(q * Mat3::identity(), q.to_mat3());
    }

    #[test]
    fn from_mat3_round_trip() {
        for (angle, axis) in [
            (0.3, Vec3d::X),
            (2.9, Vec3d::Y),
            (3.1, Vec3d::Z),
            (1.7, Vec3d::new(1., 1., 1.).normalized()),
            (3.0, Vec3d::new(-1., 0.2, 0.1).normalized()),
        ] {
            let q = Quatd::angle_axis(angle, axis);
            let r = Quatd::from_mat3(q.to_mat3());
            // q and -q are the same rotation.
            let r = if r.dot(q) < 0.0 { -r } else { r };
            assert_relative_eq!(r, q, epsilon = 1e-12);
        }
    }

    #[test]
    fn euler_angles() {
        let angles = Vec3d::new(0.1, -0.4, 1.2);
        let q = Quatd::from_euler(angles);
        assert_relative_eq!(q.to_euler_angles(), angles, epsilon = 1e-12);

        let composed = Quatd::angle_axis(angles.z, Vec3d::Z)
            * Quatd::angle_axis(angles.y, Vec3d::Y)
            * Quatd::angle_axis(angles.x, Vec3d::X);
        assert_relative_eq!(composed, q, epsilon = 1e-12);

        let roll = Quat::angle_axis(0.5, Vec3::X).to_euler_angles();
        assert_relative_eq!(roll, Vec3::new(0.5, 0., 0.), epsilon = 1e-6);
    }

    #[test]
    fn euler_gimbal_lock_is_finite() {
        let q = Quat::angle_axis(FRAC_PI_2, Vec3::Y) * 1.0000001;
        let e = q.to_euler_angles();
        assert!(e.is_finite());
        assert_relative_eq!(e.y, FRAC_PI_2, epsilon = 1e-3);
    }

    #[test]
    fn slerp() {
        let a = Quat::identity();
        let b = Quat::angle_axis(FRAC_PI_2, Vec3::Z);

        assert_relative_eq!(a.slerp(b, 0.), a, epsilon = 1e-6);
        assert_relative_eq!(a.slerp(b, 1.), b, epsilon = 1e-6);
        assert_relative_eq!(a.slerp(b, 0.5), Quat::angle_axis(FRAC_PI_2 * 0.5, Vec3::Z), epsilon = 1e-6);

        // -b is the same rotation, slerp takes the short way.
        assert_relative_eq!(a.slerp(-b, 0.5), Quat::angle_axis(FRAC_PI_2 * 0.5, Vec3::Z), epsilon = 1e-6);

        let c = Quat::angle_axis(1e-4, Vec3::X);
        assert_relative_eq!(a.slerp(c, 0.5).length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn vec4_conversion() {
        let q = Quat::new(4., 1., 2., 3.);
        assert_eq!(q.to_vec4(), Vec4::new(1., 2., 3., 4.));
        assert_eq!(Quat::from_vec4(q.to_vec4()), q);
        assert_eq!(q.re(), 4.);
        assert_eq!(q.im(), Vec3::new(1., 2., 3.));
        assert_eq!(q.to_array(), [4., 1., 2., 3.]);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{:.1}", Quat::identity()), "Quat(w: 1.0, x: 0.0, y: 0.0, z: 0.0)");
    }
}
