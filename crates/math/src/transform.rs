//! Model, view and projection matrices.
//!
//! Functions at this level work on `f32` types, the [`f64`] module has the
//! same set for `Mat4d`/`Vec3d`. Every matrix acts on column vectors and the
//! composing helpers (`translate`, `rotate`, `scale`) right-multiply, so the
//! newest transform is applied to a point first.
//!
//! `look_at`, `perspective` and `orthographic` take the coordinate
//! conventions as an argument. The variants for each convention live in
//! [`lh`], [`rh`] and their `zo` (depth in `[0, 1]`) and `no` (depth in
//! `[-1, 1]`) submodules. Projections use the vertical field of view in
//! radians and are undefined for `near == far` or, for perspective,
//! `near <= 0`.

macro_rules! transform_fns {
    ($m: ident, $v3: ident, $t: ident) => {
        use crate::conventions::{Conventions, DepthRange, Handedness};
        use crate::mat::$m;
        use crate::vec::$v3;

        #[inline]
        pub fn translate(m: $m, v: $v3) -> $m {
            m * $m::translation(v)
        }

        /// `axis` must be normalized.
        #[inline]
        pub fn rotate(m: $m, angle: $t, axis: $v3) -> $m {
            m * $m::rotation(axis, angle)
        }

        #[inline]
        pub fn scale(m: $m, v: $v3) -> $m {
            m * $m::scale3(v)
        }

        #[inline]
        pub fn look_at_lh(eye: $v3, center: $v3, up: $v3) -> $m {
            lh::look_at(eye, center, up)
        }

        #[inline]
        pub fn look_at_rh(eye: $v3, center: $v3, up: $v3) -> $m {
            rh::look_at(eye, center, up)
        }

        pub fn look_at(handedness: Handedness, eye: $v3, center: $v3, up: $v3) -> $m {
            match handedness {
                Handedness::Left => lh::look_at(eye, center, up),
                Handedness::Right => rh::look_at(eye, center, up),
            }
        }

        pub fn perspective(conventions: Conventions, fovy: $t, aspect_ratio: $t,
                           near: $t, far: $t) -> $m {
            match (conventions.handedness, conventions.depth) {
                (Handedness::Left, DepthRange::ZeroToOne) =>
                    lh::zo::perspective(fovy, aspect_ratio, near, far),
                (Handedness::Left, DepthRange::NegativeOneToOne) =>
                    lh::no::perspective(fovy, aspect_ratio, near, far),
                (Handedness::Right, DepthRange::ZeroToOne) =>
                    rh::zo::perspective(fovy, aspect_ratio, near, far),
                (Handedness::Right, DepthRange::NegativeOneToOne) =>
                    rh::no::perspective(fovy, aspect_ratio, near, far),
            }
        }

        pub fn orthographic(conventions: Conventions, left: $t, right: $t, bottom: $t,
                            top: $t, near: $t, far: $t) -> $m {
            match (conventions.handedness, conventions.depth) {
                (Handedness::Left, DepthRange::ZeroToOne) =>
                    lh::zo::orthographic(left, right, bottom, top, near, far),
                (Handedness::Left, DepthRange::NegativeOneToOne) =>
                    lh::no::orthographic(left, right, bottom, top, near, far),
                (Handedness::Right, DepthRange::ZeroToOne) =>
                    rh::zo::orthographic(left, right, bottom, top, near, far),
                (Handedness::Right, DepthRange::NegativeOneToOne) =>
                    rh::no::orthographic(left, right, bottom, top, near, far),
            }
        }

        /// Left-handed matrices, the camera looks down +z.
        pub mod lh {
            use crate::mat::$m;
            use crate::vec::$v3;

            pub fn look_at(eye: $v3, center: $v3, up: $v3) -> $m {
                let f = (center - eye).normalized();
                let r = up.cross(f).normalized();
                let u = f.cross(r);

                $m {
                    e: [
                        [r.x, r.y, r.z, -$v3::dot(r, eye)],
                        [u.x, u.y, u.z, -$v3::dot(u, eye)],
                        [f.x, f.y, f.z, -$v3::dot(f, eye)],
                        [0.0, 0.0, 0.0, 1.0],
                    ],
                }
            }

            // Zero to one z
            pub mod zo {
                use crate::mat::$m;

                pub fn perspective(fovy: $t, aspect_ratio: $t, near: $t, far: $t) -> $m {
                    let t = (fovy / 2.).tan();

                    let mut m = $m::ZERO;
                    m.e[0][0] = 1.0 / (aspect_ratio * t);
                    m.e[1][1] = 1.0 / t;
                    m.e[2][2] = far / (far - near);
                    m.e[2][3] = -(far * near) / (far - near);
                    m.e[3][2] = 1.0;

                    m
                }

                pub fn orthographic(left: $t, right: $t, bottom: $t,
                                    top: $t, near: $t, far: $t) -> $m {
                    let mut m = $m::identity();
                    m.e[0][0] = 2.0 / (right - left);
                    m.e[1][1] = 2.0 / (top - bottom);
                    m.e[2][2] = 1.0 / (far - near);
                    m.e[0][3] = - (right + left) / (right - left);
                    m.e[1][3] = - (top + bottom) / (top - bottom);
                    m.e[2][3] = - near / (far - near);

                    m
                }
            }

            // Negative one to one z
            pub mod no {
                use crate::mat::$m;

                pub fn perspective(fovy: $t, aspect_ratio: $t, near: $t, far: $t) -> $m {
                    let t = (fovy / 2.).tan();

                    let mut m = $m::ZERO;
                    m.e[0][0] = 1.0 / (aspect_ratio * t);
                    m.e[1][1] = 1.0 / t;
                    m.e[2][2] = (far + near) / (far - near);
                    m.e[2][3] = -(2.0 * far * near) / (far - near);
                    m.e[3][2] = 1.0;

                    m
                }

                pub fn orthographic(left: $t, right: $t, bottom: $t,
                                    top: $t, near: $t, far: $t) -> $m {
                    let mut m = $m::identity();
                    m.e[0][0] = 2.0 / (right - left);
                    m.e[1][1] = 2.0 / (top - bottom);
                    m.e[2][2] = 2.0 / (far - near);
                    m.e[0][3] = - (right + left) / (right - left);
                    m.e[1][3] = - (top + bottom) / (top - bottom);
                    m.e[2][3] = - (far + near) / (far - near);

                    m
                }
            }
        }

        /// Right-handed matrices, the camera looks down -z.
        pub mod rh {
            use crate::mat::$m;
            use crate::vec::$v3;

            pub fn look_at(eye: $v3, center: $v3, up: $v3) -> $m {
                let f = (center - eye).normalized();
                let r = f.cross(up).normalized();
                let u = r.cross(f);

                $m {
                    e: [
                        [r.x, r.y, r.z, -$v3::dot(r, eye)],
                        [u.x, u.y, u.z, -$v3::dot(u, eye)],
                        [-f.x, -f.y, -f.z, $v3::dot(f, eye)],
                        [0.0, 0.0, 0.0, 1.0],
                    ],
                }
            }

            // Zero to one z
            pub mod zo {
                use crate::mat::$m;

                pub fn perspective(fovy: $t, aspect_ratio: $t, near: $t, far: $t) -> $m {
                    let t = (fovy / 2.).tan();

                    let mut m = $m::ZERO;
                    m.e[0][0] = 1.0 / (aspect_ratio * t);
                    m.e[1][1] = 1.0 / t;
                    m.e[2][2] = far / (near - far);
                    m.e[2][3] = -(far * near) / (far - near);
                    m.e[3][2] = -1.0;

                    m
                }

                pub fn orthographic(left: $t, right: $t, bottom: $t,
                                    top: $t, near: $t, far: $t) -> $m {
                    let mut m = $m::identity();
                    m.e[0][0] = 2.0 / (right - left);
                    m.e[1][1] = 2.0 / (top - bottom);
                    m.e[2][2] = -1.0 / (far - near);
                    m.e[0][3] = - (right + left) / (right - left);
                    m.e[1][3] = - (top + bottom) / (top - bottom);
                    m.e[2][3] = - near / (far - near);

                    m
                }
            }

            // Negative one to one z
            pub mod no {
                use crate::mat::$m;

                pub fn perspective(fovy: $t, aspect_ratio: $t, near: $t, far: $t) -> $m {
                    let t = (fovy / 2.).tan();

                    let mut m = $m::ZERO;
                    m.e[0][0] = 1.0 / (aspect_ratio * t);
                    m.e[1][1] = 1.0 / t;
                    m.e[2][2] = -(far + near) / (far - near);
                    m.e[2][3] = -(2.0 * far * near) / (far - near);
                    m.e[3][2] = -1.0;

                    m
                }

                pub fn orthographic(left: $t, right: $t, bottom: $t,
                                    top: $t, near: $t, far: $t) -> $m {
                    let mut m = $m::identity();
                    m.e[0][0] = 2.0 / (right - left);
                    m.e[1][1] = 2.0 / (top - bottom);
                    m.e[2][2] = -2.0 / (far - near);
                    m.e[0][3] = - (right + left) / (right - left);
                    m.e[1][3] = - (top + bottom) / (top - bottom);
                    m.e[2][3] = - (far + near) / (far - near);

                    m
                }
            }
        }
    }
}

transform_fns!(Mat4, Vec3, f32);

/// Double precision transforms.
pub mod f64 {
    transform_fns!(Mat4d, Vec3d, f64);
}
