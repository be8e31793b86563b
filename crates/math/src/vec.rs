use core::cmp::Ordering;
use core::fmt;
use core::ops;

use bytemuck::{Pod, Zeroable};

use crate::error::{MathError, Result};

macro_rules! vec_op_impl {
    ($trait: ident, $func: ident, $v: ident, $($e: ident),*) => {
        impl ops::$trait<$v> for $v {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: $v) -> $v {
                $v { $( $e: ops::$trait::$func(self.$e, rhs.$e), )* }
            }
        }
    }
}

macro_rules! vec_assign_op_impl {
    ($trait: ident, $func: ident, $v: ident, $($e: ident),*) => {
        impl ops::$trait<$v> for $v {
            #[inline]
            fn $func(&mut self, rhs: $v) {
                $( ops::$trait::$func(&mut self.$e, rhs.$e); )*
            }
        }
    }
}

macro_rules! scalar_op_impl {
    ($trait: ident, $func: ident, $v: ident, $t: ident, $($e: ident),*) => {

        impl ops::$trait<$t> for $v {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: $t) -> $v {
                $v { $( $e: ops::$trait::$func(self.$e, rhs), )* }
            }
        }

        impl ops::$trait<$v> for $t {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: $v) -> $v {
                $v { $( $e: ops::$trait::$func(self, rhs.$e), )* }
            }
        }
    }
}

macro_rules! scalar_assign_op_impl {
    ($trait: ident, $func: ident, $v: ident, $t: ident, $($e: ident),*) => {

        impl ops::$trait<$t> for $v {
            #[inline]
            fn $func(&mut self, rhs: $t) {
                $( ops::$trait::$func(&mut self.$e, rhs); )*
            }
        }
    }
}

/// Component-wise approximate comparison, shared by vectors and quaternions.
macro_rules! approx_fields_impl {
    ($v: ident, $t: ident, $($e: ident),*) => {
        impl approx::AbsDiffEq for $v {
            type Epsilon = $t;

            #[inline]
            fn default_epsilon() -> $t {
                <$t as approx::AbsDiffEq>::default_epsilon()
            }

            #[inline]
            fn abs_diff_eq(&self, other: &$v, epsilon: $t) -> bool {
                $( approx::AbsDiffEq::abs_diff_eq(&self.$e, &other.$e, epsilon) )&&*
            }
        }

        impl approx::RelativeEq for $v {
            #[inline]
            fn default_max_relative() -> $t {
                <$t as approx::RelativeEq>::default_max_relative()
            }

            #[inline]
            fn relative_eq(&self, other: &$v, epsilon: $t, max_relative: $t) -> bool {
                $( approx::RelativeEq::relative_eq(&self.$e, &other.$e, epsilon, max_relative) )&&*
            }
        }

        impl approx::UlpsEq for $v {
            #[inline]
            fn default_max_ulps() -> u32 {
                <$t as approx::UlpsEq>::default_max_ulps()
            }

            #[inline]
            fn ulps_eq(&self, other: &$v, epsilon: $t, max_ulps: u32) -> bool {
                $( approx::UlpsEq::ulps_eq(&self.$e, &other.$e, epsilon, max_ulps) )&&*
            }
        }
    }
}

pub(crate) use approx_fields_impl;

macro_rules! vec_float_utils_impl {
    ($v: ident, $t: ident, $($e: ident),*) => {
        impl $v {
            #[inline]
            pub fn dot(self, b: $v) -> $t {
                // Adding negative zero (-0.0) is a nop in IEEE 754 floating
                // point, while adding positive zero can change the sign of
                // negative zero, thus llvm only optimizes out (-0.0):
                //
                // (-0.0 + -0.0) = -0.0
                // (-0.0 +  0.0) =  0.0
                // ( 0.0 + -0.0) =  0.0
                // ( 0.0 +  0.0) =  0.0
                $( self.$e * b.$e + )* (-0.0)
            }

            #[inline]
            pub fn length2(self) -> $t {
                $v::dot(self, self)
            }

            #[inline]
            pub fn length(self) -> $t {
                $v::length2(self).sqrt()
            }

            #[inline]
            pub fn distance(self, b: $v) -> $t {
                $v::length(b - self)
            }

            /// Unit vector in the direction of `self`. A zero vector yields
            /// NaN components, see [`Self::try_normalized`] for a checked
            /// version.
            #[inline]
            pub fn normalized(self) -> $v {
                self * (1.0 / $v::length(self))
            }

            #[inline]
            pub fn try_normalized(self) -> Result<$v> {
                let len = $v::length(self);
                if len == 0.0 || !len.is_finite() {
                    return Err(MathError::ZeroLength);
                }
                Ok(self * (1.0 / len))
            }

            /// Linear interpolation, `self` at `t = 0` and `b` at `t = 1`.
            #[inline]
            pub fn lerp(self, b: $v, t: $t) -> $v {
                $v { $( $e: self.$e * (1.0 - t) + b.$e * t, )* }
            }

            /// Reflects `self` about the plane with unit normal `n`.
            #[inline]
            pub fn reflect(self, n: $v) -> $v {
                self - 2.0 * $v::dot(self, n) * n
            }

            #[inline]
            pub fn is_finite(self) -> bool {
                $( self.$e.is_finite() )&&*
            }

            /// Compares the Euclidean lengths of two vectors. `None` if
            /// either length is NaN.
            #[inline]
            pub fn cmp_length(self, b: $v) -> Option<Ordering> {
                $v::length(self).partial_cmp(&$v::length(b))
            }

            #[inline]
            pub fn shorter_than(self, b: $v) -> bool {
                $v::length(self) < $v::length(b)
            }

            #[inline]
            pub fn longer_than(self, b: $v) -> bool {
                $v::length(self) > $v::length(b)
            }

            #[inline]
            pub fn at_most_as_long_as(self, b: $v) -> bool {
                $v::length(self) <= $v::length(b)
            }

            #[inline]
            pub fn at_least_as_long_as(self, b: $v) -> bool {
                $v::length(self) >= $v::length(b)
            }
        }

        impl ops::Neg for $v {
            type Output = $v;

            fn neg(self) -> $v {
                $v { $( $e: -self.$e, )* }
            }
        }

        approx_fields_impl!($v, $t, $($e),*);
    }
}

macro_rules! vec3_utils_impl {
    ($v: ident, $t: ident) => {
        impl $v {
            pub const X: $v = $v { x: 1.0, y: 0.0, z: 0.0 };
            pub const Y: $v = $v { x: 0.0, y: 1.0, z: 0.0 };
            pub const Z: $v = $v { x: 0.0, y: 0.0, z: 1.0 };

            #[inline]
            pub fn cross(self, b: $v) -> $v {
                $v {
                    x: self.y * b.z - self.z * b.y,
                    y: self.z * b.x - self.x * b.z,
                    z: self.x * b.y - self.y * b.x,
                }
            }
        }
    }
}

/// Color (`rgba`) and texture coordinate (`stuq`) names for the same fields.
macro_rules! vec_alias_impl {
    ($v: ident, $t: ident, $($e: ident => $get: ident, $get_mut: ident);*) => {
        impl $v {
            $(
                #[inline]
                pub fn $get(&self) -> $t {
                    self.$e
                }

                #[inline]
                pub fn $get_mut(&mut self) -> &mut $t {
                    &mut self.$e
                }
            )*
        }
    }
}

macro_rules! vec_resize_impl {
    ($small: ident, $big: ident, $t: ident, $extra: ident, $($e: ident),*) => {
        impl $small {
            #[inline]
            pub fn extend(self, $extra: $t) -> $big {
                $big { $( $e: self.$e, )* $extra }
            }
        }

        impl $big {
            /// Drops the last component.
            #[inline]
            pub fn truncate(self) -> $small {
                $small { $( $e: self.$e, )* }
            }
        }
    }
}

macro_rules! vec_impl {
    ($v: ident, $t: ident, $n: expr, $($e: ident),*) => {

        #[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(C)]
        pub struct $v {
            $( pub $e : $t, )*
        }

        impl $v {
            pub const ZERO: $v = $v { $( $e: 0.0, )* };
            pub const ONE: $v = $v { $( $e: 1.0, )* };

            #[inline]
            pub const fn new($( $e: $t, )*) -> $v {
                $v { $( $e, )* }
            }

            #[inline]
            pub const fn from_scalar(a: $t) -> $v {
                $v { $( $e : a, )* }
            }

            #[inline]
            pub fn from_array(a: [$t; $n]) -> $v {
                bytemuck::cast(a)
            }

            #[inline]
            pub fn to_array(self) -> [$t; $n] {
                bytemuck::cast(self)
            }

            #[inline]
            pub fn as_array(&self) -> &[$t; $n] {
                bytemuck::cast_ref(self)
            }

            #[inline]
            pub fn as_slice(&self) -> &[$t] {
                self.as_array()
            }

            #[inline]
            pub fn clamp(a: $v, min: $v, max: $v) -> $v {
                $v { $( $e: a.$e.clamp(min.$e, max.$e),)* }
            }

            #[inline]
            pub fn min(a: $v, b: $v) -> $v {
                $v { $( $e: a.$e.min(b.$e),)* }
            }

            #[inline]
            pub fn max(a: $v, b: $v) -> $v {
                $v { $( $e: a.$e.max(b.$e),)* }
            }
        }

        impl From<[$t; $n]> for $v {
            #[inline]
            fn from(a: [$t; $n]) -> $v {
                $v::from_array(a)
            }
        }

        impl From<$v> for [$t; $n] {
            #[inline]
            fn from(v: $v) -> [$t; $n] {
                v.to_array()
            }
        }

        impl ops::Index<usize> for $v {
            type Output = $t;

            #[inline]
            fn index(&self, i: usize) -> &$t {
                &self.as_array()[i]
            }
        }

        impl ops::IndexMut<usize> for $v {
            #[inline]
            fn index_mut(&mut self, i: usize) -> &mut $t {
                &mut bytemuck::cast_mut::<$v, [$t; $n]>(self)[i]
            }
        }

        impl fmt::Display for $v {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}({})", stringify!($v),
                        vec![$(
                           format!("{:.prec$}", self.$e, prec = f.precision().unwrap_or(3)),
                        )*].join(", "))
            }
        }


        vec_op_impl!(Add, add, $v, $($e),*);
        vec_op_impl!(Sub, sub, $v, $($e),*);
        vec_op_impl!(Mul, mul, $v, $($e),*);
        vec_op_impl!(Div, div, $v, $($e),*);

        vec_assign_op_impl!(AddAssign, add_assign, $v, $($e),*);
        vec_assign_op_impl!(SubAssign, sub_assign, $v, $($e),*);
        vec_assign_op_impl!(MulAssign, mul_assign, $v, $($e),*);
        vec_assign_op_impl!(DivAssign, div_assign, $v, $($e),*);

        scalar_op_impl!(Add, add, $v, $t, $($e),*);
        scalar_op_impl!(Sub, sub, $v, $t, $($e),*);
        scalar_op_impl!(Mul, mul, $v, $t, $($e),*);
        scalar_op_impl!(Div, div, $v, $t, $($e),*);

        scalar_assign_op_impl!(AddAssign, add_assign, $v, $t, $($e),*);
        scalar_assign_op_impl!(SubAssign, sub_assign, $v, $t, $($e),*);
        scalar_assign_op_impl!(MulAssign, mul_assign, $v, $t, $($e),*);
        scalar_assign_op_impl!(DivAssign, div_assign, $v, $t, $($e),*);

        vec_float_utils_impl!($v, $t, $($e),*);
    }
}


vec_impl!(Vec2, f32, 2, x, y);
vec_impl!(Vec3, f32, 3, x, y, z);
vec_impl!(Vec4, f32, 4, x, y, z, w);

vec_impl!(Vec2d, f64, 2, x, y);
vec_impl!(Vec3d, f64, 3, x, y, z);
vec_impl!(Vec4d, f64, 4, x, y, z, w);

vec3_utils_impl!(Vec3, f32);
vec3_utils_impl!(Vec3d, f64);

vec_resize_impl!(Vec2, Vec3, f32, z, x, y);
vec_resize_impl!(Vec3, Vec4, f32, w, x, y, z);
vec_resize_impl!(Vec2d, Vec3d, f64, z, x, y);
vec_resize_impl!(Vec3d, Vec4d, f64, w, x, y, z);

vec_alias_impl!(Vec2, f32, x => r, r_mut; y => g, g_mut;
                           x => s, s_mut; y => t, t_mut);
vec_alias_impl!(Vec3, f32, x => r, r_mut; y => g, g_mut; z => b, b_mut;
                           x => s, s_mut; y => t, t_mut; z => u, u_mut);
vec_alias_impl!(Vec4, f32, x => r, r_mut; y => g, g_mut; z => b, b_mut; w => a, a_mut;
                           x => s, s_mut; y => t, t_mut; z => u, u_mut; w => q, q_mut);
vec_alias_impl!(Vec2d, f64, x => r, r_mut; y => g, g_mut;
                            x => s, s_mut; y => t, t_mut);
vec_alias_impl!(Vec3d, f64, x => r, r_mut; y => g, g_mut; z => b, b_mut;
                            x => s, s_mut; y => t, t_mut; z => u, u_mut);
vec_alias_impl!(Vec4d, f64, x => r, r_mut; y => g, g_mut; z => b, b_mut; w => a, a_mut;
                            x => s, s_mut; y => t, t_mut; z => u, u_mut; w => q, q_mut);

impl Vec4 {
    /// Homogeneous to cartesian: divides `x`, `y` and `z` by `w`.
    #[inline]
    pub fn perspective_divide(self) -> Vec3 {
        Vec3::new(self.x / self.w, self.y / self.w, self.z / self.w)
    }
}

impl Vec4d {
    #[inline]
    pub fn perspective_divide(self) -> Vec3d {
        Vec3d::new(self.x / self.w, self.y / self.w, self.z / self.w)
    }
}
