pub mod conventions;
pub mod error;
pub mod vec;
pub mod mat;
pub mod quat;
pub mod transform;

pub use conventions::{Conventions, DepthRange, Handedness};
pub use error::{MathError, Result};
pub use mat::{Mat2, Mat2d, Mat3, Mat3d, Mat4, Mat4d};
pub use quat::{Quat, Quatd};
pub use vec::{Vec2, Vec2d, Vec3, Vec3d, Vec4, Vec4d};
