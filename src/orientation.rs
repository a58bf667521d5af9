//! EXIF orientation support.
//!
//! The eight orientation cases and their correction transforms. The
//! mapping is the standard EXIF Orientation table (TIFF tag 274), treated
//! as a fixed lookup, not computed geometry:
//!
//! ```text
//! Normal (1)      FlipHorizontal (2)  Rotate180 (3)   FlipVertical (4)
//! ┌───────┐       ┌───────┐           ┌───────┐       ┌───────┐
//! │ 1   2 │       │ 2   1 │           │ 4   3 │       │ 3   4 │
//! │ 3   4 │       │ 4   3 │           │ 2   1 │       │ 1   2 │
//! └───────┘       └───────┘           └───────┘       └───────┘
//!
//! Transpose (5)   Rotate90 (6)        Transverse (7)  Rotate270 (8)
//! ┌───────┐       ┌───────┐           ┌───────┐       ┌───────┐
//! │ 1   3 │       │ 2   4 │           │ 4   2 │       │ 3   1 │
//! │ 2   4 │       │ 1   3 │           │ 3   1 │       │ 4   2 │
//! └───────┘       └───────┘           └───────┘       └───────┘
//! ```
//!
//! Each cell shows how an upright `1 2 / 3 4` image appears in storage;
//! [`Orientation::correction`] is the transform that restores it.

use serde::{Deserialize, Serialize};

use crate::transform::Transform;

/// EXIF orientation tag values.
///
/// Describes how stored pixels must be transformed to display
/// right-side-up. Discriminants match the EXIF values 1-8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// No rotation or flip needed.
    #[default]
    Normal = 1,
    /// Mirrored left-right.
    FlipHorizontal = 2,
    /// Rotated 180 degrees.
    Rotate180 = 3,
    /// Mirrored top-bottom.
    FlipVertical = 4,
    /// Mirrored across the main diagonal.
    Transpose = 5,
    /// Needs a 90 degree clockwise rotation to display upright.
    Rotate90 = 6,
    /// Mirrored across the anti-diagonal.
    Transverse = 7,
    /// Needs a 90 degree counter-clockwise rotation to display upright.
    Rotate270 = 8,
}

impl Orientation {
    /// Create from an EXIF orientation value (1-8).
    ///
    /// Returns [`Normal`](Orientation::Normal) for out-of-range values.
    pub fn from_exif(value: u16) -> Self {
        match value {
            1 => Self::Normal,
            2 => Self::FlipHorizontal,
            3 => Self::Rotate180,
            4 => Self::FlipVertical,
            5 => Self::Transpose,
            6 => Self::Rotate90,
            7 => Self::Transverse,
            8 => Self::Rotate270,
            _ => Self::Normal,
        }
    }

    /// EXIF tag value (1-8).
    pub fn exif_value(self) -> u16 {
        self as u16
    }

    /// Whether this orientation swaps width and height (values 5-8).
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }

    /// Display dimensions for the given stored dimensions.
    pub fn display_dimensions(self, stored_width: u32, stored_height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (stored_height, stored_width)
        } else {
            (stored_width, stored_height)
        }
    }

    /// Whether any transformation is needed.
    pub fn is_identity(self) -> bool {
        matches!(self, Self::Normal)
    }

    /// The geometric correction that turns stored pixels upright.
    ///
    /// `Normal` contributes nothing at all (`None`), so callers counting
    /// applied filters see zero rather than an identity pass.
    pub fn correction(self) -> Option<Transform> {
        match self {
            Self::Normal => None,
            Self::FlipHorizontal => Some(Transform::FlipHorizontal),
            Self::Rotate180 => Some(Transform::Rotate180),
            Self::FlipVertical => Some(Transform::FlipVertical),
            Self::Transpose => Some(Transform::Transpose),
            Self::Rotate90 => Some(Transform::Rotate90Cw),
            Self::Transverse => Some(Transform::AntiTranspose),
            Self::Rotate270 => Some(Transform::Rotate90Ccw),
        }
    }
}
