//! Coordinate system conventions used by view and projection matrices.
//!
//! The conventions are plain values passed to [`crate::transform::look_at`],
//! [`crate::transform::perspective`] and [`crate::transform::orthographic`].
//! [`Conventions::DEFAULT`] is fixed at build time through cargo features:
//!
//! * `right_handed` / `left_handed`
//! * `depth_negative_one_one` / `depth_zero_one`

use cfg_if::cfg_if;

#[cfg(all(feature = "right_handed", feature = "left_handed"))]
compile_error!("more than one math handedness configuration");

#[cfg(all(feature = "depth_zero_one", feature = "depth_negative_one_one"))]
compile_error!("more than one math depth configuration");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Handedness {
    /// +z points into the screen (Direct3D).
    Left,
    /// +z points out of the screen (OpenGL).
    Right,
}

/// Range of normalized device depth produced by a projection matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepthRange {
    ZeroToOne,
    NegativeOneToOne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Conventions {
    pub handedness: Handedness,
    pub depth: DepthRange,
}

cfg_if! {
    if #[cfg(feature = "left_handed")] {
        const DEFAULT_HANDEDNESS: Handedness = Handedness::Left;
    } else {
        const DEFAULT_HANDEDNESS: Handedness = Handedness::Right;
    }
}

cfg_if! {
    if #[cfg(feature = "depth_zero_one")] {
        const DEFAULT_DEPTH: DepthRange = DepthRange::ZeroToOne;
    } else {
        const DEFAULT_DEPTH: DepthRange = DepthRange::NegativeOneToOne;
    }
}

impl Conventions {
    pub const OPENGL: Conventions = Conventions {
        handedness: Handedness::Right,
        depth: DepthRange::NegativeOneToOne,
    };

    pub const DIRECT3D: Conventions = Conventions {
        handedness: Handedness::Left,
        depth: DepthRange::ZeroToOne,
    };

    pub const DEFAULT: Conventions = Conventions {
        handedness: DEFAULT_HANDEDNESS,
        depth: DEFAULT_DEPTH,
    };

    #[inline]
    pub const fn new(handedness: Handedness, depth: DepthRange) -> Self {
        Self { handedness, depth }
    }
}

impl Default for Handedness {
    fn default() -> Self {
        DEFAULT_HANDEDNESS
    }
}

impl Default for DepthRange {
    fn default() -> Self {
        DEFAULT_DEPTH
    }
}

impl Default for Conventions {
    fn default() -> Self {
        Conventions::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_follows_features() {
        let c = Conventions::default();

        #[cfg(feature = "left_handed")]
        assert_eq!(c.handedness, Handedness::Left);
        #[cfg(not(feature = "left_handed"))]
        assert_eq!(c.handedness, Handedness::Right);

        #[cfg(feature = "depth_zero_one")]
        assert_eq!(c.depth, DepthRange::ZeroToOne);
        #[cfg(not(feature = "depth_zero_one"))]
        assert_eq!(c.depth, DepthRange::NegativeOneToOne);
    }

    #[test]
    fn presets() {
        assert_eq!(Conventions::OPENGL,
                   Conventions::new(Handedness::Right, DepthRange::NegativeOneToOne));
        assert_eq!(Conventions::DIRECT3D,
                   Conventions::new(Handedness::Left, DepthRange::ZeroToOne));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&Conventions::DIRECT3D).unwrap();
        let c: Conventions = serde_json::from_str(&json).unwrap();
        assert_eq!(c, Conventions::DIRECT3D);
    }
}
